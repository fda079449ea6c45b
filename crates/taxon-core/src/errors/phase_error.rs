//! Phase boundary errors.

use serde::{Deserialize, Serialize};

use super::error_code::{self, TaxonErrorCode};

/// The three pipeline phases, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Signatures,
    Keywords,
    Evidence,
}

impl Phase {
    /// Human-readable label used in logs and error messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Signatures => "phase 1 (signature discovery)",
            Self::Keywords => "phase 2 (keyword extraction)",
            Self::Evidence => "phase 3 (evidence and hierarchy)",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A phase could not produce its output.
///
/// Carries the dataset and phase so the message can be diagnosed without
/// the surrounding logs.
#[derive(Debug, thiserror::Error)]
pub enum PhaseError {
    /// The phase ran but produced nothing.
    #[error("[{dataset}] {phase}: produced no {what}")]
    EmptyResult {
        dataset: String,
        phase: Phase,
        what: String,
    },

    /// The previous phase's output is not structurally valid input.
    #[error("[{dataset}] {phase}: precondition failed: {reason}")]
    InvalidPrecondition {
        dataset: String,
        phase: Phase,
        reason: String,
    },
}

impl PhaseError {
    /// The phase that raised this error.
    pub fn phase(&self) -> Phase {
        match self {
            Self::EmptyResult { phase, .. } | Self::InvalidPrecondition { phase, .. } => *phase,
        }
    }

    /// The dataset being processed when this error was raised.
    pub fn dataset(&self) -> &str {
        match self {
            Self::EmptyResult { dataset, .. } | Self::InvalidPrecondition { dataset, .. } => {
                dataset
            }
        }
    }
}

impl TaxonErrorCode for PhaseError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyResult { .. } => error_code::EMPTY_RESULT,
            Self::InvalidPrecondition { .. } => error_code::INVALID_PRECONDITION,
        }
    }
}

/// Result type returned by each phase entry point.
pub type PhaseResult<T> = Result<T, PhaseError>;
