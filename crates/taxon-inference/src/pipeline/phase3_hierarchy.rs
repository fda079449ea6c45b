//! Phase 3b: parent/child similarity graph over equipment types.

use std::collections::{BTreeSet, HashMap};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use taxon_core::config::EvidenceConfig;
use taxon_core::models::{
    EquipmentHierarchy, HierarchyRelationship, SimilarityEntry, UdcCoverageProfile, UdcTier,
};
use tracing::debug;

use crate::algorithms::{jaccard, shared_codes};

/// Tiers compared when looking for hierarchy edges.
pub const HIERARCHY_TIERS: [UdcTier; 2] = [UdcTier::Core, UdcTier::Common];

struct Node {
    id: usize,
    facilities: usize,
    codes: BTreeSet<String>,
}

/// Build the similarity hierarchy from core+common code sets.
///
/// Every unordered pair is visited once, in id order. An edge is emitted when
/// similarity exceeds the threshold; the side with more facilities is the
/// parent, the lower id on a tie. No transitive edges are added.
pub fn build(profiles: &[UdcCoverageProfile], config: &EvidenceConfig) -> EquipmentHierarchy {
    let mut nodes: Vec<Node> = profiles
        .iter()
        .map(|p| Node {
            id: p.equipment_type_id,
            facilities: p.facility_count,
            codes: p.codes_in(&HIERARCHY_TIERS),
        })
        .collect();
    nodes.sort_by_key(|n| n.id);

    let mut graph: DiGraph<usize, f64> = DiGraph::with_capacity(nodes.len(), 0);
    let index: HashMap<usize, NodeIndex> = nodes
        .iter()
        .map(|n| (n.id, graph.add_node(n.id)))
        .collect();

    let mut relationships = Vec::new();
    let mut similarity_matrix = Vec::new();
    for (i, a) in nodes.iter().enumerate() {
        for b in &nodes[i + 1..] {
            let similarity = jaccard(&a.codes, &b.codes);
            if config.include_similarity_matrix {
                similarity_matrix.push(SimilarityEntry {
                    a: a.id,
                    b: b.id,
                    similarity,
                });
            }
            if similarity <= config.hierarchy_threshold {
                continue;
            }

            let (parent, child) = if b.facilities > a.facilities { (b, a) } else { (a, b) };
            graph.add_edge(index[&parent.id], index[&child.id], similarity);
            relationships.push(HierarchyRelationship {
                parent_id: parent.id,
                child_id: child.id,
                similarity,
                shared_udcs: shared_codes(&a.codes, &b.codes),
            });
        }
    }

    let mut root_nodes = Vec::new();
    let mut isolated_nodes = Vec::new();
    for node in &nodes {
        let idx = index[&node.id];
        let has_parent = graph
            .neighbors_directed(idx, Direction::Incoming)
            .next()
            .is_some();
        let has_child = graph
            .neighbors_directed(idx, Direction::Outgoing)
            .next()
            .is_some();
        match (has_parent, has_child) {
            (false, false) => isolated_nodes.push(node.id),
            (false, true) => root_nodes.push(node.id),
            _ => {}
        }
    }

    debug!(
        edges = relationships.len(),
        roots = root_nodes.len(),
        isolated = isolated_nodes.len(),
        "hierarchy built"
    );

    EquipmentHierarchy {
        relationships,
        root_nodes,
        isolated_nodes,
        similarity_matrix,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::test_support::profile;

    #[test]
    fn subset_pair_becomes_parent_and_child() {
        let profiles = vec![
            profile(1, 3, &[("X", UdcTier::Core), ("Y", UdcTier::Core), ("Z", UdcTier::Common)]),
            profile(2, 2, &[("X", UdcTier::Core), ("Y", UdcTier::Common)]),
        ];
        let hierarchy = build(&profiles, &EvidenceConfig::default());

        assert_eq!(hierarchy.relationships.len(), 1);
        let edge = &hierarchy.relationships[0];
        assert_eq!((edge.parent_id, edge.child_id), (1, 2));
        assert!((edge.similarity - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(edge.shared_udcs, vec!["X", "Y"]);
        assert_eq!(hierarchy.root_nodes, vec![1]);
        assert!(hierarchy.isolated_nodes.is_empty());
    }

    #[test]
    fn larger_type_is_parent_regardless_of_id() {
        let profiles = vec![
            profile(1, 2, &[("X", UdcTier::Core)]),
            profile(2, 9, &[("X", UdcTier::Core)]),
        ];
        let hierarchy = build(&profiles, &EvidenceConfig::default());
        assert_eq!(hierarchy.relationships[0].parent_id, 2);
        assert_eq!(hierarchy.root_nodes, vec![2]);
    }

    #[test]
    fn equal_sizes_make_lower_id_parent() {
        let profiles = vec![
            profile(7, 4, &[("X", UdcTier::Core)]),
            profile(3, 4, &[("X", UdcTier::Core)]),
        ];
        let hierarchy = build(&profiles, &EvidenceConfig::default());
        assert_eq!(hierarchy.relationships[0].parent_id, 3);
    }

    #[test]
    fn optional_codes_and_threshold_edge_are_ignored() {
        // core+common sets {X,Y,Z} vs {X,Y,W}: similarity 0.5
        let profiles = vec![
            profile(1, 5, &[("X", UdcTier::Core), ("Y", UdcTier::Core), ("Z", UdcTier::Core)]),
            profile(2, 5, &[("X", UdcTier::Core), ("Y", UdcTier::Core), ("W", UdcTier::Common), ("Z", UdcTier::Optional)]),
            profile(3, 1, &[]),
        ];
        let hierarchy = build(&profiles, &EvidenceConfig::default());
        assert!(hierarchy.relationships.is_empty());
        assert_eq!(hierarchy.isolated_nodes, vec![1, 2, 3]);
        assert!(hierarchy.root_nodes.is_empty());
    }

    #[test]
    fn middle_node_is_neither_root_nor_isolated() {
        let codes = [("X", UdcTier::Core), ("Y", UdcTier::Core)];
        let profiles = vec![profile(1, 9, &codes), profile(2, 5, &codes), profile(3, 1, &codes)];
        let hierarchy = build(&profiles, &EvidenceConfig::default());
        // 1→2, 1→3, 2→3
        assert_eq!(hierarchy.relationships.len(), 3);
        assert_eq!(hierarchy.root_nodes, vec![1]);
        assert!(hierarchy.isolated_nodes.is_empty());
        assert_eq!(hierarchy.distinct_children(), 2);
    }

    #[test]
    fn similarity_matrix_is_opt_in() {
        let profiles = vec![profile(1, 1, &[("X", UdcTier::Core)]), profile(2, 1, &[])];
        assert!(build(&profiles, &EvidenceConfig::default()).similarity_matrix.is_empty());

        let config = EvidenceConfig {
            include_similarity_matrix: true,
            ..EvidenceConfig::default()
        };
        let hierarchy = build(&profiles, &config);
        assert_eq!(hierarchy.similarity_matrix.len(), 1);
        assert_eq!(hierarchy.similarity_matrix[0].similarity, 0.0);
    }
}
