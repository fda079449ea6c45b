//! Errors from persisting rendered output.

use super::error_code::{self, TaxonErrorCode};

/// Failures while writing the hierarchy tree.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("failed to write tree to {location}: {reason}")]
    WriteFailed { location: String, reason: String },
}

impl TaxonErrorCode for SinkError {
    fn error_code(&self) -> &'static str {
        error_code::SINK_ERROR
    }
}
