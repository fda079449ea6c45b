//! Advisory messages attached to each phase output.

use taxon_core::constants::{CATEGORY_COLUMN, TYPE_COLUMN};
use taxon_core::models::{ConfidenceTier, EvidenceReport, KeywordAnalysis, SignatureDiscovery};

/// Category columns with fewer distinct values than this are called out.
const SMALL_CATEGORY_DOMAIN: usize = 10;

pub fn for_signatures(discovery: &SignatureDiscovery) -> Vec<String> {
    let mut out = Vec::new();

    if discovery.key_columns.is_empty() {
        out.push("No highly discriminative attributes found".to_string());
    } else {
        let top: Vec<&str> = discovery
            .key_columns
            .iter()
            .take(3)
            .map(|p| p.column.as_str())
            .collect();
        out.push(format!("Top discriminative attributes: {}", top.join(", ")));
    }

    if !discovery.groups.is_empty() {
        out.push(format!(
            "Discovered {} facility groups covering {:.1}% of facilities",
            discovery.groups.len(),
            discovery.coverage_pct
        ));
    }

    let distinct_values = |column: &str| {
        discovery
            .value_patterns
            .iter()
            .find(|p| p.column == column)
            .map(|p| p.total_unique_values)
    };
    if let Some(types) = distinct_values(TYPE_COLUMN) {
        out.push(format!(
            "Found {types} distinct facility types, a starting point for classification"
        ));
    }
    if let Some(categories) = distinct_values(CATEGORY_COLUMN) {
        if categories < SMALL_CATEGORY_DOMAIN {
            out.push(format!(
                "Category field has {categories} values, useful for high-level grouping"
            ));
        }
    }

    out.push("Next: analyze descriptions for semantic patterns".to_string());
    out.push("Next: cross-reference groups with measurement codes".to_string());
    out
}

pub fn for_keywords(analysis: &KeywordAnalysis) -> Vec<String> {
    let mut out = Vec::new();
    let counts = &analysis.tier_counts;

    if counts.high > 0 {
        out.push(format!(
            "{} equipment types identified with high confidence",
            counts.high
        ));
    }
    if counts.medium > 0 {
        out.push(format!("{} groups need review (medium confidence)", counts.medium));
    }
    if counts.low > 0 {
        out.push(format!("{} groups have low semantic coherence", counts.low));
    }
    if counts.none > 0 {
        out.push(format!("{} groups produced no keywords", counts.none));
    }

    out.push(format!(
        "Discovered {} distinct equipment type names",
        analysis.vocabulary.len()
    ));
    out.push("Next: map equipment types to measurement codes".to_string());
    out.push("Next: review low-confidence groups for refinement".to_string());
    out
}

pub fn for_evidence(report: &EvidenceReport) -> Vec<String> {
    let mut out = Vec::new();

    let relationships = report.hierarchy.total_relationships();
    if relationships > 0 {
        out.push(format!(
            "Discovered {relationships} hierarchical relationships, review the tree"
        ));
    }

    let merged = report.consolidation.summary.merged;
    if merged > 0 {
        out.push(format!(
            "{merged} groups are mergeable by measurement-code overlap, consider consolidation"
        ));
    }

    let low = report.confidence.count(ConfidenceTier::Low);
    if low > 0 {
        out.push(format!("{low} low-confidence groups need deeper analysis"));
    }

    if report.orphan_rows > 0 {
        out.push(format!(
            "{} measurement-code rows reference unknown facilities",
            report.orphan_rows
        ));
    }

    out.push("Review the hierarchy tree for the visual structure".to_string());
    out
}
