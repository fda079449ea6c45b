use serde::{Deserialize, Serialize};

/// Two equipment types replaced by one combined group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedGroup {
    /// Id of the first type of the pair.
    pub new_group_id: usize,
    /// `"<first> + <second>"`.
    pub name: String,
    pub merged_from: Vec<usize>,
    pub total_facilities: usize,
    /// All-tier Jaccard similarity that triggered the merge.
    pub similarity: f64,
    /// Union of both code sets, sorted.
    pub combined_udcs: Vec<String>,
    pub merge_reason: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsolidationSummary {
    pub before: usize,
    pub after: usize,
    /// Number of original types absorbed into a merge.
    pub merged: usize,
}

/// Outcome of one greedy consolidation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsolidationResult {
    pub merged_groups: Vec<MergedGroup>,
    pub unchanged_groups: Vec<usize>,
    pub summary: ConsolidationSummary,
}
