use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ColumnProfile, Diagnostic, FacilitySnapshot};

/// Presence/absence of a value over the signature columns, one bit per column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttributeSignature(Vec<bool>);

impl AttributeSignature {
    pub fn new(bits: Vec<bool>) -> Self {
        Self(bits)
    }

    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of populated columns.
    pub fn filled_count(&self) -> usize {
        self.0.iter().filter(|&&b| b).count()
    }

    /// `"1011..."` rendering, one character per column.
    pub fn bit_string(&self) -> String {
        self.0.iter().map(|&b| if b { '1' } else { '0' }).collect()
    }

    /// Split `columns` into (filled, empty) according to this signature.
    ///
    /// `columns` must be the column list the signature was built over.
    pub fn partition_columns(&self, columns: &[String]) -> (Vec<String>, Vec<String>) {
        let mut filled = Vec::new();
        let mut empty = Vec::new();
        for (column, &bit) in columns.iter().zip(&self.0) {
            if bit {
                filled.push(column.clone());
            } else {
                empty.push(column.clone());
            }
        }
        (filled, empty)
    }
}

/// One raw group of facilities sharing an attribute signature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacilityGroup {
    /// 1-based rank by descending facility count. Stable within a run only.
    pub group_id: usize,
    /// Short digest of the signature bit-string.
    pub signature_id: String,
    pub signature: AttributeSignature,
    pub filled_columns: Vec<String>,
    pub empty_columns: Vec<String>,
    pub facility_count: usize,
    pub percent_of_total: f64,
    /// Every member, in facility-table order.
    pub members: Vec<FacilitySnapshot>,
}

impl FacilityGroup {
    pub fn member_ids(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|m| m.id.as_str())
    }

    /// First `n` members, for display.
    pub fn sample(&self, n: usize) -> &[FacilitySnapshot] {
        &self.members[..n.min(self.members.len())]
    }

    /// First `n` filled signature columns.
    pub fn key_attributes(&self, n: usize) -> Vec<String> {
        self.filled_columns.iter().take(n).cloned().collect()
    }
}

/// A value and how often it appears in a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
    pub percent: f64,
}

/// Most common values of one key column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuePattern {
    pub column: String,
    pub total_unique_values: usize,
    pub total_filled: usize,
    pub top_values: Vec<ValueCount>,
}

/// Phase 1 output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignatureDiscovery {
    pub analyzed_at: DateTime<Utc>,
    pub total_facilities: usize,
    /// Every qualifying discriminative column, best first.
    pub key_columns: Vec<ColumnProfile>,
    /// The columns the signatures were built over (a prefix of `key_columns`).
    pub signature_columns: Vec<String>,
    pub total_unique_signatures: usize,
    pub groups: Vec<FacilityGroup>,
    /// Percentage of facilities covered by `groups`.
    pub coverage_pct: f64,
    pub value_patterns: Vec<ValuePattern>,
    pub diagnostics: Vec<Diagnostic>,
    pub recommendations: Vec<String>,
}

impl SignatureDiscovery {
    pub fn key_column_names(&self) -> Vec<String> {
        self.key_columns.iter().map(|p| p.column.clone()).collect()
    }
}
