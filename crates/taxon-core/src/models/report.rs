use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    ConfidenceReport, ConsolidationResult, Diagnostic, EquipmentHierarchy, UdcCoverageProfile,
};

/// Rendered hierarchy tree and what happened when persisting it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreeOutput {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub written_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub write_error: Option<String>,
}

/// Phase 3 output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceReport {
    pub analyzed_at: DateTime<Utc>,
    pub total_equipment_types: usize,
    /// Join rows that matched some equipment type.
    pub total_tags_analyzed: usize,
    /// Join rows skipped because their facility is in no equipment type.
    pub orphan_rows: usize,
    pub profiles: Vec<UdcCoverageProfile>,
    pub hierarchy: EquipmentHierarchy,
    pub consolidation: ConsolidationResult,
    pub confidence: ConfidenceReport,
    pub tree: TreeOutput,
    pub diagnostics: Vec<Diagnostic>,
    pub recommendations: Vec<String>,
}

impl EvidenceReport {
    pub fn profile(&self, equipment_type_id: usize) -> Option<&UdcCoverageProfile> {
        self.profiles
            .iter()
            .find(|p| p.equipment_type_id == equipment_type_id)
    }
}
