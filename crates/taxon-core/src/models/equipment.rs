use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Diagnostic, FacilitySnapshot};

/// Confidence derived from a group's coherence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
    /// The group produced no keywords at all.
    None,
}

impl ConfidenceTier {
    pub const ALL: [ConfidenceTier; 4] = [Self::High, Self::Medium, Self::Low, Self::None];

    /// Tier for a coherence score. `high` and `medium` are inclusive lower bounds.
    pub fn from_coherence(score: f64, high: f64, medium: f64) -> Self {
        if score >= high {
            Self::High
        } else if score >= medium {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Upper-case label used in the rendered tree.
    pub fn label(self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
            Self::None => "NONE",
        }
    }
}

/// A keyword with its raw count and per-facility frequency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordCount {
    pub word: String,
    pub count: usize,
    /// count / group facility count. May exceed 1.0.
    pub frequency: f64,
}

/// A facility group enriched with a name, keywords and confidence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquipmentType {
    /// Same as the originating group id.
    pub id: usize,
    pub name: String,
    /// Leading keywords used for naming and display.
    pub keywords: Vec<String>,
    /// Noise-filtered keywords, strongest first.
    pub top_keywords: Vec<KeywordCount>,
    pub coherence: f64,
    pub concentration_ratio: f64,
    pub top_keyword_frequency: f64,
    pub confidence: ConfidenceTier,
    pub total_words: usize,
    pub unique_words: usize,
    pub facility_count: usize,
    pub percent_of_total: f64,
    pub facility_ids: Vec<String>,
    pub key_attributes: Vec<String>,
    pub sample_facilities: Vec<FacilitySnapshot>,
    pub source_groups: Vec<usize>,
}

/// Aggregated view of every type sharing one suggested name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub keywords: Vec<String>,
    pub groups: Vec<usize>,
    pub total_facilities: usize,
    pub average_coherence: f64,
}

/// Number of equipment types per confidence tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub none: usize,
}

impl TierCounts {
    pub fn record(&mut self, tier: ConfidenceTier) {
        match tier {
            ConfidenceTier::High => self.high += 1,
            ConfidenceTier::Medium => self.medium += 1,
            ConfidenceTier::Low => self.low += 1,
            ConfidenceTier::None => self.none += 1,
        }
    }

    pub fn get(&self, tier: ConfidenceTier) -> usize {
        match tier {
            ConfidenceTier::High => self.high,
            ConfidenceTier::Medium => self.medium,
            ConfidenceTier::Low => self.low,
            ConfidenceTier::None => self.none,
        }
    }
}

/// Phase 2 output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordAnalysis {
    pub analyzed_at: DateTime<Utc>,
    pub equipment_types: Vec<EquipmentType>,
    /// Tokens excluded from every group, sorted.
    pub noise_terms: Vec<String>,
    pub noise_threshold: f64,
    pub columns_analyzed: Vec<String>,
    pub vocabulary: BTreeMap<String, VocabularyEntry>,
    pub tier_counts: TierCounts,
    pub diagnostics: Vec<Diagnostic>,
    pub recommendations: Vec<String>,
}
