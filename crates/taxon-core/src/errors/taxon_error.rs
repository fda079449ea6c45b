//! Aggregate error for whole-pipeline runs.

use super::{ConfigError, InputError, PhaseError, SinkError, TaxonErrorCode};

/// Errors that abort a pipeline run.
/// Aggregates concern-level errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum TaxonError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Phase error: {0}")]
    Phase(#[from] PhaseError),

    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),
}

impl TaxonErrorCode for TaxonError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Input(e) => e.error_code(),
            Self::Phase(e) => e.error_code(),
            Self::Sink(e) => e.error_code(),
        }
    }
}

pub type TaxonResult<T> = Result<T, TaxonError>;
