//! Plain-text rendering of the equipment hierarchy.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use taxon_core::config::EvidenceConfig;
use taxon_core::models::{EquipmentHierarchy, EquipmentType, UdcCoverageProfile, UdcTier};

const RULE_WIDTH: usize = 80;
const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE_INDENT: &str = "│   ";
const SPACE_INDENT: &str = "    ";

struct TreeContext<'a> {
    nodes: HashMap<usize, (&'a EquipmentType, &'a UdcCoverageProfile)>,
    hierarchy: &'a EquipmentHierarchy,
    config: &'a EvidenceConfig,
}

/// Render the hierarchy as an indented text tree.
///
/// Roots are listed with their descendants, then isolated types, then
/// summary statistics. A type reachable from several parents is expanded
/// the first time and marked `(see above)` afterwards. Pure: the timestamp
/// is supplied by the caller.
pub fn render_tree(
    types: &[EquipmentType],
    profiles: &[UdcCoverageProfile],
    hierarchy: &EquipmentHierarchy,
    config: &EvidenceConfig,
    generated_at: DateTime<Utc>,
) -> String {
    let by_id: HashMap<usize, &UdcCoverageProfile> =
        profiles.iter().map(|p| (p.equipment_type_id, p)).collect();
    let ctx = TreeContext {
        nodes: types
            .iter()
            .filter_map(|t| by_id.get(&t.id).map(|p| (t.id, (t, *p))))
            .collect(),
        hierarchy,
        config,
    };

    let rule = "=".repeat(RULE_WIDTH);
    let thin_rule = "-".repeat(RULE_WIDTH);
    let mut lines = vec![
        rule.clone(),
        "FACILITY EQUIPMENT HIERARCHY".to_string(),
        rule.clone(),
        format!("Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S")),
        format!("Total Equipment Types: {}", types.len()),
        format!("Hierarchical Relationships: {}", hierarchy.total_relationships()),
        rule.clone(),
        String::new(),
    ];

    if !hierarchy.root_nodes.is_empty() {
        lines.push("ROOT EQUIPMENT CATEGORIES".to_string());
        lines.push(thin_rule.clone());
        lines.push(String::new());

        let mut visited = HashSet::new();
        let last = hierarchy.root_nodes.len() - 1;
        for (i, &root) in hierarchy.root_nodes.iter().enumerate() {
            ctx.render_subtree(root, "", i == last, &mut visited, &mut lines);
            if i != last {
                lines.push("│".to_string());
            }
        }
        lines.push(String::new());
    }

    if !hierarchy.isolated_nodes.is_empty() {
        lines.push(rule.clone());
        lines.push("ISOLATED EQUIPMENT TYPES (No Hierarchical Relationships)".to_string());
        lines.push(thin_rule.clone());
        lines.push(String::new());

        let last = hierarchy.isolated_nodes.len() - 1;
        for (i, &id) in hierarchy.isolated_nodes.iter().enumerate() {
            ctx.render_node(id, "", i == last, &mut lines);
        }
        lines.push(String::new());
    }

    lines.push(rule.clone());
    lines.push("SUMMARY STATISTICS".to_string());
    lines.push(thin_rule);
    lines.push(format!("Root Categories: {}", hierarchy.root_nodes.len()));
    lines.push(format!("Hierarchical Children: {}", hierarchy.distinct_children()));
    lines.push(format!("Isolated Types: {}", hierarchy.isolated_nodes.len()));
    lines.push(match hierarchy.mean_similarity() {
        Some(mean) => format!("Average Jaccard Similarity: {mean:.3}"),
        None => "Average Jaccard Similarity: N/A".to_string(),
    });
    lines.push(rule);

    lines.join("\n")
}

impl TreeContext<'_> {
    fn render_subtree(
        &self,
        id: usize,
        prefix: &str,
        is_last: bool,
        visited: &mut HashSet<usize>,
        lines: &mut Vec<String>,
    ) {
        if !visited.insert(id) {
            if let Some((equipment, _)) = self.nodes.get(&id) {
                lines.push(format!(
                    "{prefix}{}[{}] {} (see above)",
                    connector(is_last),
                    equipment.confidence.label(),
                    equipment.name
                ));
            }
            return;
        }

        self.render_node(id, prefix, is_last, lines);

        let children: Vec<usize> = self.hierarchy.children_of(id).map(|r| r.child_id).collect();
        let child_prefix = format!("{prefix}{}", indent(is_last));
        for (j, &child) in children.iter().enumerate() {
            self.render_subtree(child, &child_prefix, j + 1 == children.len(), visited, lines);
        }
    }

    fn render_node(&self, id: usize, prefix: &str, is_last: bool, lines: &mut Vec<String>) {
        let Some(&(equipment, profile)) = self.nodes.get(&id) else {
            return;
        };

        lines.push(format!(
            "{prefix}{}[{}] {} ({} facilities, {} tags)",
            connector(is_last),
            equipment.confidence.label(),
            equipment.name,
            profile.facility_count,
            profile.total_tags
        ));

        let pad = format!("{prefix}{}", indent(is_last));
        if !equipment.keywords.is_empty() {
            lines.push(format!("{pad}Keywords: {}", equipment.keywords.join(", ")));
        }

        let core: Vec<_> = profile
            .codes
            .iter()
            .filter(|c| c.tier == UdcTier::Core)
            .collect();
        lines.push(format!(
            "{pad}UDCs: {} distinct ({} core, {} common)",
            profile.distinct_udcs,
            core.len(),
            profile.count_in(UdcTier::Common)
        ));
        if profile.distinct_udcs == 0 {
            lines.push(format!("{pad}⚠ No UDCs found for this equipment type"));
        } else if !core.is_empty() {
            lines.push(format!("{pad}Core UDCs:"));
            for code in core.iter().take(self.config.tree_core_codes) {
                lines.push(format!(
                    "{pad}  • {}: {:.1}% coverage ({} facilities)",
                    code.code,
                    code.coverage_pct(),
                    code.facility_count
                ));
            }
            if core.len() > self.config.tree_core_codes {
                lines.push(format!(
                    "{pad}  ... and {} more core UDCs",
                    core.len() - self.config.tree_core_codes
                ));
            }
        }

        let samples: Vec<&str> = equipment
            .facility_ids
            .iter()
            .take(self.config.tree_sample_facilities)
            .map(String::as_str)
            .collect();
        if !samples.is_empty() {
            lines.push(format!("{pad}Sample Facilities: {}", samples.join(", ")));
        }
    }
}

fn connector(is_last: bool) -> &'static str {
    if is_last {
        LAST_BRANCH
    } else {
        BRANCH
    }
}

fn indent(is_last: bool) -> &'static str {
    if is_last {
        SPACE_INDENT
    } else {
        PIPE_INDENT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::phase3_hierarchy;
    use crate::pipeline::test_support::{equipment, profile};
    use chrono::TimeZone;
    use taxon_core::models::ConfidenceTier;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap()
    }

    fn typed(id: usize, name: &str, ids: &[&str], tier: ConfidenceTier, keywords: &[&str]) -> EquipmentType {
        let mut t = equipment(id, name, ids);
        t.confidence = tier;
        t.keywords = keywords.iter().map(|k| k.to_string()).collect();
        t
    }

    #[test]
    fn header_and_summary_without_relationships() {
        let types = vec![typed(1, "Pumps", &["P1"], ConfidenceTier::Low, &[])];
        let profiles = vec![profile(1, 1, &[])];
        let config = EvidenceConfig::default();
        let hierarchy = phase3_hierarchy::build(&profiles, &config);
        let text = render_tree(&types, &profiles, &hierarchy, &config, at());

        assert!(text.starts_with(&"=".repeat(80)));
        assert!(text.contains("Generated: 2024-03-01 12:30:00"));
        assert!(text.contains("Total Equipment Types: 1"));
        assert!(text.contains("Hierarchical Relationships: 0"));
        assert!(!text.contains("ROOT EQUIPMENT CATEGORIES"));
        assert!(text.contains("ISOLATED EQUIPMENT TYPES"));
        assert!(text.contains("└── [LOW] Pumps (1 facilities, 0 tags)"));
        assert!(text.contains("    UDCs: 0 distinct (0 core, 0 common)\n    ⚠ No UDCs found"));
        assert!(text.contains("Average Jaccard Similarity: N/A"));
    }

    #[test]
    fn parent_lists_child_with_annotations() {
        let types = vec![
            typed(1, "Production Wells", &["W1", "W2", "W3", "W4"], ConfidenceTier::High, &["well", "production"]),
            typed(2, "Injection Wells", &["I1"], ConfidenceTier::Medium, &["well", "injection"]),
        ];
        let codes = [("FLOW", UdcTier::Core), ("PRESS", UdcTier::Core)];
        let profiles = vec![profile(1, 4, &codes), profile(2, 1, &codes)];
        let config = EvidenceConfig::default();
        let hierarchy = phase3_hierarchy::build(&profiles, &config);
        let text = render_tree(&types, &profiles, &hierarchy, &config, at());

        assert!(text.contains("ROOT EQUIPMENT CATEGORIES"));
        assert!(text.contains("└── [HIGH] Production Wells (4 facilities, 2 tags)"));
        assert!(text.contains("    Keywords: well, production"));
        assert!(text.contains("    UDCs: 2 distinct (2 core, 0 common)"));
        assert!(text.contains("      • FLOW: 100.0% coverage (4 facilities)"));
        assert!(text.contains("    Sample Facilities: W1, W2, W3"));
        assert!(text.contains("    └── [MEDIUM] Injection Wells (1 facilities, 2 tags)"));
        assert!(text.contains("Hierarchical Children: 1"));
        assert!(text.contains("Average Jaccard Similarity: 1.000"));
        assert!(!text.contains("ISOLATED EQUIPMENT TYPES"));
    }

    #[test]
    fn shared_descendant_is_expanded_once() {
        let types: Vec<EquipmentType> = [(1, 9), (2, 5), (3, 1)]
            .iter()
            .map(|&(id, _)| typed(id, &format!("T{id}"), &["F"], ConfidenceTier::Low, &[]))
            .collect();
        let codes = [("X", UdcTier::Core)];
        let profiles = vec![profile(1, 9, &codes), profile(2, 5, &codes), profile(3, 1, &codes)];
        let config = EvidenceConfig::default();
        let hierarchy = phase3_hierarchy::build(&profiles, &config);
        let text = render_tree(&types, &profiles, &hierarchy, &config, at());

        assert_eq!(text.matches("[LOW] T3 (1 facilities").count(), 1);
        assert_eq!(text.matches("[LOW] T3 (see above)").count(), 1);
    }

    #[test]
    fn core_code_list_is_truncated() {
        let codes: Vec<(String, UdcTier)> =
            (0..7).map(|i| (format!("C{i}"), UdcTier::Core)).collect();
        let borrowed: Vec<(&str, UdcTier)> = codes.iter().map(|(c, t)| (c.as_str(), *t)).collect();
        let types = vec![typed(1, "Meters", &["M1"], ConfidenceTier::High, &["meter"])];
        let profiles = vec![profile(1, 1, &borrowed)];
        let config = EvidenceConfig::default();
        let hierarchy = phase3_hierarchy::build(&profiles, &config);
        let text = render_tree(&types, &profiles, &hierarchy, &config, at());

        assert_eq!(text.matches("% coverage").count(), 5);
        assert!(text.contains("... and 2 more core UDCs"));
    }
}
