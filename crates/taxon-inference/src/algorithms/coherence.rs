//! Semantic coherence of a group's keywords.

use taxon_core::config::KeywordConfig;
use taxon_core::models::ConfidenceTier;

/// Coherence metrics for one group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoherenceScore {
    /// 0.5 · concentration + 0.5 · min(top frequency, 1), in [0, 1].
    pub coherence: f64,
    /// Share of all words taken by the leading keywords.
    pub concentration_ratio: f64,
    /// Top keyword count per facility. Uncapped.
    pub top_keyword_frequency: f64,
    pub confidence: ConfidenceTier,
}

impl CoherenceScore {
    /// Score for a group with no keywords.
    pub fn none() -> Self {
        Self {
            coherence: 0.0,
            concentration_ratio: 0.0,
            top_keyword_frequency: 0.0,
            confidence: ConfidenceTier::None,
        }
    }
}

/// Score a group from its ranked, noise-filtered keyword counts.
///
/// `ranked_counts` must be sorted descending. `total_words` counts every
/// token of the group, noise included.
pub fn score_coherence(
    ranked_counts: &[usize],
    total_words: usize,
    facility_count: usize,
    config: &KeywordConfig,
) -> CoherenceScore {
    let Some(&top) = ranked_counts.first() else {
        return CoherenceScore::none();
    };
    if total_words == 0 {
        return CoherenceScore::none();
    }

    let leading: usize = ranked_counts
        .iter()
        .take(config.concentration_window)
        .sum();
    let concentration_ratio = (leading as f64 / total_words as f64).min(1.0);
    let top_keyword_frequency = if facility_count > 0 {
        top as f64 / facility_count as f64
    } else {
        0.0
    };

    let coherence = (0.5 * concentration_ratio + 0.5 * top_keyword_frequency.min(1.0)).clamp(0.0, 1.0);
    CoherenceScore {
        coherence,
        concentration_ratio,
        top_keyword_frequency,
        confidence: ConfidenceTier::from_coherence(
            coherence,
            config.high_coherence,
            config.medium_coherence,
        ),
    }
}
