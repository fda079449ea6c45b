use serde::{Deserialize, Serialize};

use super::defaults;

/// Keyword extraction and coherence scoring (phase 2) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordConfig {
    /// Tokens present in more than this fraction of facilities are noise.
    pub noise_threshold: f64,
    /// Keywords kept per group after noise filtering.
    pub top_keywords: usize,
    /// Keywords used for name generation and display.
    pub name_keywords: usize,
    /// Number of leading keywords used for the concentration ratio.
    pub concentration_window: usize,
    /// Coherence at or above this is `high`.
    pub high_coherence: f64,
    /// Coherence at or above this is `medium`.
    pub medium_coherence: f64,
    /// Columns always mined for text in addition to the key columns.
    pub anchor_columns: Vec<String>,
    /// Two-character tokens that survive tokenization.
    pub abbreviations: Vec<String>,
    /// Member facilities kept as display samples per equipment type.
    pub display_samples: usize,
    /// Filled signature columns listed per equipment type.
    pub key_attributes: usize,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            noise_threshold: defaults::DEFAULT_NOISE_THRESHOLD,
            top_keywords: defaults::DEFAULT_TOP_KEYWORDS,
            name_keywords: defaults::DEFAULT_NAME_KEYWORDS,
            concentration_window: defaults::DEFAULT_CONCENTRATION_WINDOW,
            high_coherence: defaults::DEFAULT_HIGH_COHERENCE,
            medium_coherence: defaults::DEFAULT_MEDIUM_COHERENCE,
            anchor_columns: defaults::DEFAULT_ANCHOR_COLUMNS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            abbreviations: defaults::DEFAULT_ABBREVIATIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            display_samples: defaults::DEFAULT_DISPLAY_SAMPLES,
            key_attributes: defaults::DEFAULT_KEY_ATTRIBUTES,
        }
    }
}
