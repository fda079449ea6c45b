use serde::{Deserialize, Serialize};

/// Directed parent → child edge between two similar equipment types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchyRelationship {
    /// The side with more member facilities.
    pub parent_id: usize,
    pub child_id: usize,
    /// Jaccard similarity of the core+common code sets.
    pub similarity: f64,
    /// Sorted codes present in both sets.
    pub shared_udcs: Vec<String>,
}

impl HierarchyRelationship {
    pub fn shared_udc_count(&self) -> usize {
        self.shared_udcs.len()
    }
}

/// Similarity of one unordered pair of equipment types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityEntry {
    pub a: usize,
    pub b: usize,
    pub similarity: f64,
}

/// Similarity graph over equipment types. Not a forced tree: a type may
/// have several parents and no transitive edges are added.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EquipmentHierarchy {
    pub relationships: Vec<HierarchyRelationship>,
    /// Connected types that are never a child.
    pub root_nodes: Vec<usize>,
    /// Types with no relationship at all.
    pub isolated_nodes: Vec<usize>,
    /// Every pairwise similarity; empty unless requested.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub similarity_matrix: Vec<SimilarityEntry>,
}

impl EquipmentHierarchy {
    pub fn total_relationships(&self) -> usize {
        self.relationships.len()
    }

    pub fn children_of(&self, parent_id: usize) -> impl Iterator<Item = &HierarchyRelationship> {
        self.relationships
            .iter()
            .filter(move |r| r.parent_id == parent_id)
    }

    /// Number of distinct types that appear as a child.
    pub fn distinct_children(&self) -> usize {
        let mut children: Vec<usize> = self.relationships.iter().map(|r| r.child_id).collect();
        children.sort_unstable();
        children.dedup();
        children.len()
    }

    pub fn mean_similarity(&self) -> Option<f64> {
        if self.relationships.is_empty() {
            return None;
        }
        let total: f64 = self.relationships.iter().map(|r| r.similarity).sum();
        Some(total / self.relationships.len() as f64)
    }
}
