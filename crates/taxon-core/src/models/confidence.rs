use serde::{Deserialize, Serialize};

use super::ConfidenceTier;

/// One equipment type listed under its confidence bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketMember {
    pub id: usize,
    pub name: String,
    pub distinct_udcs: usize,
    pub facilities: usize,
}

/// Evidence statistics for every type sharing a confidence tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBucket {
    pub tier: ConfidenceTier,
    pub count: usize,
    pub avg_udc_count: f64,
    pub min_udc_count: usize,
    pub max_udc_count: usize,
    /// Mean over types that have core codes of their mean core coverage (%).
    pub avg_core_coverage_pct: f64,
    /// Leading members, for display.
    pub equipment_types: Vec<BucketMember>,
    pub recommendation: String,
}

/// Diagnostic view of evidence by confidence tier. Not fed back into
/// earlier phases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceReport {
    pub buckets: Vec<ConfidenceBucket>,
}

impl ConfidenceReport {
    pub fn bucket(&self, tier: ConfidenceTier) -> Option<&ConfidenceBucket> {
        self.buckets.iter().find(|b| b.tier == tier)
    }

    pub fn count(&self, tier: ConfidenceTier) -> usize {
        self.bucket(tier).map_or(0, |b| b.count)
    }
}
