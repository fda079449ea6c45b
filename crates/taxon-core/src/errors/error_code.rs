//! TaxonErrorCode trait for structured error reporting.

/// Every error enum implements this to expose a stable, machine-readable code
/// alongside its human-readable message.
pub trait TaxonErrorCode {
    /// Returns the error code string (e.g., "MISSING_INPUT").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_message(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const MISSING_INPUT: &str = "MISSING_INPUT";
pub const INVALID_RECORD: &str = "INVALID_RECORD";
pub const EMPTY_RESULT: &str = "EMPTY_RESULT";
pub const INVALID_PRECONDITION: &str = "INVALID_PRECONDITION";
pub const SINK_ERROR: &str = "SINK_ERROR";
