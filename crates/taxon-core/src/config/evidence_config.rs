use serde::{Deserialize, Serialize};

use super::defaults;

/// Evidence validation, hierarchy and consolidation (phase 3) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvidenceConfig {
    /// Coverage at or above this marks a code `core`.
    pub core_coverage: f64,
    /// Coverage at or above this marks a code `common`.
    pub common_coverage: f64,
    /// Core+common similarity must exceed this for a hierarchy edge.
    pub hierarchy_threshold: f64,
    /// All-tier similarity at or above this merges two types.
    pub merge_threshold: f64,
    /// Report every pairwise similarity, not only the edges.
    pub include_similarity_matrix: bool,
    /// Sample facility ids printed per tree node.
    pub tree_sample_facilities: usize,
    /// Core codes printed per tree node.
    pub tree_core_codes: usize,
    /// Where the rendered tree is written, if anywhere.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree_output_path: Option<String>,
}

impl Default for EvidenceConfig {
    fn default() -> Self {
        Self {
            core_coverage: defaults::DEFAULT_CORE_COVERAGE,
            common_coverage: defaults::DEFAULT_COMMON_COVERAGE,
            hierarchy_threshold: defaults::DEFAULT_HIERARCHY_THRESHOLD,
            merge_threshold: defaults::DEFAULT_MERGE_THRESHOLD,
            include_similarity_matrix: defaults::DEFAULT_INCLUDE_SIMILARITY_MATRIX,
            tree_sample_facilities: defaults::DEFAULT_TREE_SAMPLE_FACILITIES,
            tree_core_codes: defaults::DEFAULT_TREE_CORE_CODES,
            tree_output_path: None,
        }
    }
}
