use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One facility ↔ measurement-code link. Only `facility_id` and `code`
/// feed the scoring; the tag fields are carried for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceRow {
    #[serde(alias = "fac_id")]
    pub facility_id: String,
    #[serde(alias = "udc")]
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl EvidenceRow {
    pub fn new(facility_id: &str, code: &str) -> Self {
        Self {
            facility_id: facility_id.to_string(),
            code: code.to_string(),
            tag: None,
            description: None,
        }
    }
}

/// How representative a code is of an equipment type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UdcTier {
    Core,
    Common,
    Optional,
}

impl UdcTier {
    /// Tier for a coverage fraction. Both bounds are inclusive.
    pub fn classify(coverage: f64, core: f64, common: f64) -> Self {
        if coverage >= core {
            Self::Core
        } else if coverage >= common {
            Self::Common
        } else {
            Self::Optional
        }
    }
}

/// Coverage of one code over an equipment type's members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UdcCoverage {
    pub code: String,
    /// Distinct member facilities carrying the code.
    pub facility_count: usize,
    /// Join rows carrying the code (a facility may have several tags).
    pub tag_count: usize,
    /// facility_count / member count (0.0–1.0).
    pub coverage: f64,
    pub tier: UdcTier,
}

impl UdcCoverage {
    pub fn coverage_pct(&self) -> f64 {
        self.coverage * 100.0
    }
}

/// Whether any evidence was found for an equipment type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceStatus {
    Found,
    NoEvidence,
}

/// Measurement-code coverage for one equipment type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UdcCoverageProfile {
    pub equipment_type_id: usize,
    pub name: String,
    pub facility_count: usize,
    pub total_tags: usize,
    pub distinct_udcs: usize,
    /// Highest coverage first.
    pub codes: Vec<UdcCoverage>,
    pub status: EvidenceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl UdcCoverageProfile {
    pub fn has_evidence(&self) -> bool {
        self.status == EvidenceStatus::Found
    }

    /// Codes whose tier is one of `tiers`.
    pub fn codes_in(&self, tiers: &[UdcTier]) -> BTreeSet<String> {
        self.codes
            .iter()
            .filter(|c| tiers.contains(&c.tier))
            .map(|c| c.code.clone())
            .collect()
    }

    /// Every observed code regardless of tier.
    pub fn all_codes(&self) -> BTreeSet<String> {
        self.codes.iter().map(|c| c.code.clone()).collect()
    }

    pub fn count_in(&self, tier: UdcTier) -> usize {
        self.codes.iter().filter(|c| c.tier == tier).count()
    }

    /// Mean coverage percentage of the core codes, if there are any.
    pub fn mean_core_coverage_pct(&self) -> Option<f64> {
        let core: Vec<f64> = self
            .codes
            .iter()
            .filter(|c| c.tier == UdcTier::Core)
            .map(UdcCoverage::coverage_pct)
            .collect();
        if core.is_empty() {
            None
        } else {
            Some(core.iter().sum::<f64>() / core.len() as f64)
        }
    }
}
