//! Errors raised at the input boundary, before any phase runs.

use super::error_code::{self, TaxonErrorCode};

/// Failures while loading or validating the source tables.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// A required table is absent or unreadable. Short-circuits the run.
    #[error("dataset '{dataset}': required input '{input}' is missing: {reason}")]
    MissingInput {
        dataset: String,
        input: String,
        reason: String,
    },

    /// A row could not be turned into a typed record.
    #[error("invalid record at row {row}: {reason}")]
    InvalidRecord { row: usize, reason: String },

    /// Two rows share the same facility id.
    #[error("duplicate facility id '{id}'")]
    DuplicateId { id: String },
}

impl TaxonErrorCode for InputError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingInput { .. } => error_code::MISSING_INPUT,
            Self::InvalidRecord { .. } | Self::DuplicateId { .. } => error_code::INVALID_RECORD,
        }
    }
}
