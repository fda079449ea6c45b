//! Phase 3c: greedy pairwise consolidation of near-duplicate equipment types.

use std::collections::{BTreeSet, HashSet};

use taxon_core::models::{
    ConsolidationResult, ConsolidationSummary, MergedGroup, UdcCoverageProfile,
};
use tracing::debug;

use crate::algorithms::jaccard;

/// An equipment type as seen by the consolidator.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeCandidate {
    pub id: usize,
    pub name: String,
    pub facility_count: usize,
    /// Every observed code, regardless of tier.
    pub codes: BTreeSet<String>,
}

impl MergeCandidate {
    pub fn from_profile(profile: &UdcCoverageProfile) -> Self {
        Self {
            id: profile.equipment_type_id,
            name: profile.name.clone(),
            facility_count: profile.facility_count,
            codes: profile.all_codes(),
        }
    }
}

/// One greedy pass over `candidates`, ordered by id.
///
/// For each type not yet merged, the first later type whose code-set
/// similarity reaches `threshold` is merged with it and the scan moves on.
/// Each type takes part in at most one merge per pass.
pub fn consolidate(candidates: &[MergeCandidate], threshold: f64) -> ConsolidationResult {
    let mut ordered: Vec<&MergeCandidate> = candidates.iter().collect();
    ordered.sort_by_key(|c| c.id);

    let mut merged_ids: HashSet<usize> = HashSet::new();
    let mut merged_groups = Vec::new();

    for (i, a) in ordered.iter().enumerate() {
        if merged_ids.contains(&a.id) {
            continue;
        }
        let partner = ordered[i + 1..]
            .iter()
            .filter(|b| !merged_ids.contains(&b.id))
            .map(|b| (b, jaccard(&a.codes, &b.codes)))
            .find(|(_, similarity)| *similarity >= threshold);

        if let Some((b, similarity)) = partner {
            debug!(a = a.id, b = b.id, similarity, "merging equipment types");
            merged_ids.insert(a.id);
            merged_ids.insert(b.id);
            merged_groups.push(MergedGroup {
                new_group_id: a.id,
                name: format!("{} + {}", a.name, b.name),
                merged_from: vec![a.id, b.id],
                total_facilities: a.facility_count + b.facility_count,
                similarity,
                combined_udcs: a.codes.union(&b.codes).cloned().collect(),
                merge_reason: format!("UDC overlap: {:.1}%", similarity * 100.0),
            });
        }
    }

    let unchanged_groups: Vec<usize> = ordered
        .iter()
        .map(|c| c.id)
        .filter(|id| !merged_ids.contains(id))
        .collect();

    let summary = ConsolidationSummary {
        before: ordered.len(),
        after: unchanged_groups.len() + merged_groups.len(),
        merged: merged_ids.len(),
    };

    ConsolidationResult {
        merged_groups,
        unchanged_groups,
        summary,
    }
}

/// The candidate set after applying `result`: unchanged types plus one
/// combined candidate per merge, ordered by id.
pub fn apply(result: &ConsolidationResult, candidates: &[MergeCandidate]) -> Vec<MergeCandidate> {
    let mut next: Vec<MergeCandidate> = candidates
        .iter()
        .filter(|c| result.unchanged_groups.contains(&c.id))
        .cloned()
        .collect();
    next.extend(result.merged_groups.iter().map(|group| MergeCandidate {
        id: group.new_group_id,
        name: group.name.clone(),
        facility_count: group.total_facilities,
        codes: group.combined_udcs.iter().cloned().collect(),
    }));
    next.sort_by_key(|c| c.id);
    next
}
