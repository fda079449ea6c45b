use serde::{Deserialize, Serialize};

/// Non-fatal condition observed during a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// No discriminative columns; every facility fell into one group.
    DegenerateInput,
    /// A group yielded no keywords after filtering.
    NoKeywords,
    /// No join rows matched an equipment type's members.
    NoEvidence,
    /// Join rows referencing facilities outside every equipment type.
    OrphanEvidence,
    /// The rendered tree could not be persisted.
    TreeWriteFailed,
}

/// A reported fallback, kept alongside the phase output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Group / type id or facility id the diagnostic is about, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            subject: None,
            message: message.into(),
        }
    }

    pub fn about(mut self, subject: impl ToString) -> Self {
        self.subject = Some(subject.to_string());
        self
    }
}
