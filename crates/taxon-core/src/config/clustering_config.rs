use serde::{Deserialize, Serialize};

use super::defaults;

/// Signature clustering (phase 1) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusteringConfig {
    /// Maximum number of columns in an attribute signature.
    pub max_signature_columns: usize,
    /// Columns must score strictly above this to be considered.
    pub min_discriminative_score: f64,
    /// Number of key columns profiled for value patterns.
    pub value_pattern_columns: usize,
    /// Top values reported per value-pattern column.
    pub top_values: usize,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            max_signature_columns: defaults::DEFAULT_MAX_SIGNATURE_COLUMNS,
            min_discriminative_score: defaults::DEFAULT_MIN_DISCRIMINATIVE_SCORE,
            value_pattern_columns: defaults::DEFAULT_VALUE_PATTERN_COLUMNS,
            top_values: defaults::DEFAULT_TOP_VALUES,
        }
    }
}
