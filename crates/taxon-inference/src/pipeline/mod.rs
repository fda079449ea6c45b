//! The three-phase taxonomy pipeline.
//!
//! Phase 1 (`phase1_signatures`) groups facilities by attribute presence.
//! Phase 2 (`phase2_keywords`) names and scores each group.
//! Phase 3 (`phase3_*`) validates types against measurement codes, links
//! similar types and proposes merges.

pub mod phase1_signatures;
pub mod phase2_keywords;
pub mod phase3_confidence;
pub mod phase3_consolidation;
pub mod phase3_evidence;
pub mod phase3_hierarchy;

use chrono::Utc;
use taxon_core::errors::{Phase, PhaseError, PhaseResult};
use taxon_core::models::{
    ColumnProfile, ColumnSummary, Diagnostic, DiagnosticKind, EvidenceReport, EvidenceRow,
    FacilityTable, KeywordAnalysis, SignatureDiscovery, TreeOutput,
};
use taxon_core::traits::ITreeSink;
use taxon_core::{evidence_span, keywords_span, signatures_span, TaxonomyConfig};
use tracing::{info, warn};

use crate::profiling::profile_columns;
use crate::recommendations;
use crate::tree::render_tree;

use phase3_consolidation::MergeCandidate;

/// Every phase output of one run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub column_profiles: Vec<ColumnProfile>,
    pub signatures: SignatureDiscovery,
    pub keywords: KeywordAnalysis,
    pub evidence: EvidenceReport,
}

/// Phase 1 entry point.
pub fn discover_signatures(
    dataset: &str,
    facilities: &FacilityTable,
    column_profiles: &[ColumnProfile],
    config: &TaxonomyConfig,
) -> PhaseResult<SignatureDiscovery> {
    let _span = signatures_span!(dataset, facilities.len()).entered();
    phase1_signatures::discover(dataset, facilities, column_profiles, &config.clustering)
}

/// Phase 2 entry point.
pub fn extract_equipment_types(
    dataset: &str,
    facilities: &FacilityTable,
    discovery: &SignatureDiscovery,
    config: &TaxonomyConfig,
) -> PhaseResult<KeywordAnalysis> {
    let _span = keywords_span!(dataset, discovery.groups.len()).entered();
    phase2_keywords::extract(dataset, facilities, discovery, &config.keywords)
}

/// Phase 3 entry point: coverage profiles, hierarchy, consolidation,
/// confidence report and the rendered tree.
///
/// A sink failure is recorded on the report and does not fail the phase.
pub fn build_hierarchy(
    dataset: &str,
    analysis: &KeywordAnalysis,
    evidence: &[EvidenceRow],
    config: &TaxonomyConfig,
    sink: Option<&dyn ITreeSink>,
) -> PhaseResult<EvidenceReport> {
    let types = &analysis.equipment_types;
    let _span = evidence_span!(dataset, types.len()).entered();
    if types.is_empty() {
        return Err(PhaseError::InvalidPrecondition {
            dataset: dataset.to_string(),
            phase: Phase::Evidence,
            reason: "phase 2 produced no equipment types".to_string(),
        });
    }

    let cfg = &config.evidence;
    let analyzed_at = Utc::now();
    let evidence = phase3_evidence::profile_evidence(types, evidence, cfg);
    let hierarchy = phase3_hierarchy::build(&evidence.profiles, cfg);
    let candidates: Vec<MergeCandidate> = evidence
        .profiles
        .iter()
        .map(MergeCandidate::from_profile)
        .collect();
    let consolidation = phase3_consolidation::consolidate(&candidates, cfg.merge_threshold);
    let confidence = phase3_confidence::confidence_report(types, &evidence.profiles);

    let mut diagnostics = evidence.diagnostics;
    let mut tree = TreeOutput {
        text: render_tree(types, &evidence.profiles, &hierarchy, cfg, analyzed_at),
        ..TreeOutput::default()
    };
    if let Some(sink) = sink {
        match sink.write_tree(&tree.text) {
            Ok(location) => tree.written_to = Some(location),
            Err(err) => {
                warn!(dataset, error = %err, "failed to persist hierarchy tree");
                diagnostics.push(Diagnostic::new(DiagnosticKind::TreeWriteFailed, err.to_string()));
                tree.write_error = Some(err.to_string());
            }
        }
    }

    info!(
        dataset,
        equipment_types = types.len(),
        relationships = hierarchy.total_relationships(),
        merges = consolidation.merged_groups.len(),
        orphan_rows = evidence.orphan_rows,
        "phase 3: evidence validated"
    );

    let mut report = EvidenceReport {
        analyzed_at,
        total_equipment_types: types.len(),
        total_tags_analyzed: evidence.matched_rows,
        orphan_rows: evidence.orphan_rows,
        profiles: evidence.profiles,
        hierarchy,
        consolidation,
        confidence,
        tree,
        diagnostics,
        recommendations: Vec::new(),
    };
    report.recommendations = recommendations::for_evidence(&report);
    Ok(report)
}

/// Profile the columns and run all three phases in order.
pub fn run_pipeline(
    dataset: &str,
    facilities: &FacilityTable,
    summary: &ColumnSummary,
    evidence: &[EvidenceRow],
    config: &TaxonomyConfig,
    sink: Option<&dyn ITreeSink>,
) -> PhaseResult<PipelineOutput> {
    let column_profiles = profile_columns(summary, &config.profiling);
    let signatures = discover_signatures(dataset, facilities, &column_profiles, config)?;
    let keywords = extract_equipment_types(dataset, facilities, &signatures, config)?;
    let evidence = build_hierarchy(dataset, &keywords, evidence, config, sink)?;
    Ok(PipelineOutput {
        column_profiles,
        signatures,
        keywords,
        evidence,
    })
}
