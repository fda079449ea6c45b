//! Integration tests for taxon-inference: full runs over the bundled datasets
//! plus the phase boundary scenarios.

use std::collections::BTreeSet;

use taxon_core::errors::{InputError, Phase, PhaseError, SinkError, TaxonError};
use taxon_core::models::{
    ConfidenceTier, DiagnosticKind, EvidenceRow, EvidenceStatus, FacilityRecord, FacilityTable,
    KeywordAnalysis, UdcTier,
};
use taxon_core::traits::{ITableSource, ITreeSink};
use taxon_core::TaxonomyConfig;

use taxon_inference::pipeline::{self, phase3_consolidation};
use taxon_inference::profiling::profile_columns;
use taxon_inference::{TaxonomyEngine, TaxonomyReport};
use test_fixtures::{facility_ids, summarize, FixtureSource};

/// Sink that always fails, to check tree output errors stay non-fatal.
struct BrokenSink;

impl ITreeSink for BrokenSink {
    fn write_tree(&self, _text: &str) -> Result<String, SinkError> {
        Err(SinkError::WriteFailed {
            location: "nowhere".to_string(),
            reason: "disk full".to_string(),
        })
    }
}

fn field_sample() -> TaxonomyReport {
    TaxonomyEngine::new(TaxonomyConfig::default())
        .run(&FixtureSource::new("field_sample"))
        .unwrap()
}

fn type_named<'a>(report: &'a TaxonomyReport, name: &str) -> &'a taxon_core::EquipmentType {
    report
        .equipment_types()
        .iter()
        .find(|t| t.name == name)
        .unwrap_or_else(|| panic!("no equipment type named {name}"))
}

fn table(rows: &[&[(&str, &str)]]) -> FacilityTable {
    FacilityTable::new(
        rows.iter()
            .map(|pairs| FacilityRecord::from_pairs(pairs).unwrap())
            .collect(),
    )
    .unwrap()
}

// ── Full runs ────────────────────────────────────────────────────────────

#[test]
fn field_sample_groups_by_attribute_presence() {
    let report = field_sample();
    let signatures = &report.signatures;

    assert_eq!(
        signatures.signature_columns,
        vec!["attr1", "attr2", "desc", "type"]
    );
    let sizes: Vec<usize> = signatures.groups.iter().map(|g| g.facility_count).collect();
    assert_eq!(sizes, vec![4, 3, 3, 2]);
    assert_eq!(
        signatures.groups[1].member_ids().collect::<Vec<_>>(),
        vec!["T-201", "T-202", "T-203"]
    );
    assert!(signatures.diagnostics.is_empty());
    assert!(signatures.recommendations[0].starts_with("Top discriminative attributes: attr1"));
}

#[test]
fn field_sample_names_and_scores_types() {
    let report = field_sample();
    let names: Vec<&str> = report
        .equipment_types()
        .iter()
        .map(|t| t.name.as_str())
        .collect();
    assert_eq!(
        names,
        vec!["Production Wells", "Tanks/Storage", "Gas Meters", "Injection Wells"]
    );

    let wells = type_named(&report, "Production Wells");
    assert_eq!(wells.keywords, vec!["well", "production"]);
    assert_eq!(wells.confidence, ConfidenceTier::High);
    assert!((wells.coherence - (0.5 * 9.0 / 17.0 + 0.5)).abs() < 1e-9);

    let tanks = type_named(&report, "Tanks/Storage");
    assert_eq!(tanks.keywords, vec!["tank", "oil", "storage"]);
    assert_eq!(tanks.confidence, ConfidenceTier::Medium);
    assert!((tanks.coherence - 2.0 / 3.0).abs() < 1e-9);

    assert_eq!(report.keywords.noise_terms, vec!["field", "north"]);
    assert_eq!(report.keywords.tier_counts.high, 2);
    assert_eq!(report.keywords.tier_counts.medium, 2);
    assert_eq!(report.keywords.vocabulary.len(), 4);
}

#[test]
fn field_sample_evidence_hierarchy_and_tree() {
    let report = field_sample();
    let evidence = &report.evidence;

    assert_eq!(evidence.total_tags_analyzed, 28);
    assert_eq!(evidence.orphan_rows, 1);

    let wells = evidence.profile(1).unwrap();
    assert_eq!(wells.distinct_udcs, 4);
    assert_eq!(wells.count_in(UdcTier::Core), 3);
    assert_eq!(wells.count_in(UdcTier::Optional), 1);

    let meters = evidence.profile(3).unwrap();
    assert_eq!(meters.status, EvidenceStatus::NoEvidence);
    assert_eq!(meters.distinct_udcs, 0);

    let hierarchy = &evidence.hierarchy;
    assert_eq!(hierarchy.relationships.len(), 1);
    let edge = &hierarchy.relationships[0];
    assert_eq!((edge.parent_id, edge.child_id), (1, 4));
    assert!((edge.similarity - 0.75).abs() < 1e-9);
    assert_eq!(
        edge.shared_udcs,
        vec!["CASING_PRESS", "FLOW_RATE", "TUBING_PRESS"]
    );
    assert_eq!(hierarchy.root_nodes, vec![1]);
    assert_eq!(hierarchy.isolated_nodes, vec![2, 3]);

    // Wells vs injectors share 3 of 5 codes overall, below the merge bar.
    assert!(evidence.consolidation.merged_groups.is_empty());
    assert_eq!(evidence.consolidation.summary.after, 4);

    let kinds: Vec<DiagnosticKind> = evidence.diagnostics.iter().map(|d| d.kind).collect();
    assert_eq!(
        kinds,
        vec![DiagnosticKind::OrphanEvidence, DiagnosticKind::NoEvidence]
    );

    let tree = report.tree_text();
    assert!(tree.contains("└── [HIGH] Production Wells (4 facilities, 13 tags)"));
    assert!(tree.contains("    └── [HIGH] Injection Wells (2 facilities, 8 tags)"));
    assert!(tree.contains("[MEDIUM] Gas Meters (3 facilities, 0 tags)"));
    assert!(tree.contains("Sample Facilities: W-101, W-102, W-103"));
    assert!(tree.contains("Isolated Types: 2"));
    assert!(evidence.tree.written_to.is_none());
}

#[test]
fn field_sample_confidence_buckets() {
    let report = field_sample();
    let confidence = &report.evidence.confidence;

    let high = confidence.bucket(ConfidenceTier::High).unwrap();
    assert_eq!(high.count, 2);
    assert_eq!((high.min_udc_count, high.max_udc_count), (4, 4));
    assert!((high.avg_core_coverage_pct - 100.0).abs() < 1e-9);

    let medium = confidence.bucket(ConfidenceTier::Medium).unwrap();
    assert_eq!(medium.count, 2);
    assert_eq!((medium.min_udc_count, medium.max_udc_count), (0, 3));
    assert!((medium.avg_udc_count - 1.5).abs() < 1e-9);

    assert_eq!(confidence.count(ConfidenceTier::None), 0);
}

#[test]
fn report_round_trips_through_json() {
    let report = field_sample();
    let json = report.to_json().unwrap();
    let back = TaxonomyReport::from_json(&json).unwrap();
    assert_eq!(back.run_id, report.run_id);
    assert_eq!(back.version, taxon_core::constants::VERSION);
    assert_eq!(back.equipment_types().len(), 4);
    assert_eq!(back.tree_text(), report.tree_text());
}

// ── Partitioning ─────────────────────────────────────────────────────────

#[test]
fn every_facility_lands_in_exactly_one_group() {
    let report = field_sample();
    let mut seen: Vec<String> = report
        .signatures
        .groups
        .iter()
        .flat_map(|g| g.member_ids().map(str::to_string))
        .collect();
    seen.sort();
    let mut expected = facility_ids("field_sample");
    expected.sort();
    assert_eq!(seen, expected);

    let typed: usize = report.equipment_types().iter().map(|t| t.facility_ids.len()).sum();
    assert_eq!(typed, expected.len());
}

// ── Degenerate input ─────────────────────────────────────────────────────

#[test]
fn identical_facilities_form_one_group() {
    let report = TaxonomyEngine::new(TaxonomyConfig::default())
        .run(&FixtureSource::new("uniform_pumps"))
        .unwrap();

    assert_eq!(report.signatures.groups.len(), 1);
    assert_eq!(report.signatures.groups[0].facility_count, 4);
    assert!((report.signatures.groups[0].percent_of_total - 100.0).abs() < 1e-9);
    assert_eq!(
        report.signatures.diagnostics[0].kind,
        DiagnosticKind::DegenerateInput
    );

    // Every token occurs in every facility, so nothing survives filtering.
    let only = &report.equipment_types()[0];
    assert_eq!(only.confidence, ConfidenceTier::None);
    assert_eq!(only.name, "Unknown Equipment Type");
    assert_eq!(report.keywords.diagnostics[0].kind, DiagnosticKind::NoKeywords);

    assert_eq!(report.evidence.hierarchy.isolated_nodes, vec![1]);
    assert_eq!(report.evidence.confidence.count(ConfidenceTier::None), 1);
    assert_eq!(report.diagnostics().count(), 2);
}

#[test]
fn boundary_noise_token_is_kept() {
    // "valve" is in 3 of 4 facilities: exactly 75%, not noise.
    let facilities = table(&[
        &[("id", "A"), ("desc", "valve skid alpha")],
        &[("id", "B"), ("desc", "valve skid bravo")],
        &[("id", "C"), ("desc", "valve skid charlie")],
        &[("id", "D"), ("desc", "skid delta")],
    ]);
    let config = TaxonomyConfig::default();
    let profiles = profile_columns(&summarize(&facilities), &config.profiling);
    let signatures =
        pipeline::discover_signatures("boundary", &facilities, &profiles, &config).unwrap();
    let keywords =
        pipeline::extract_equipment_types("boundary", &facilities, &signatures, &config).unwrap();

    assert_eq!(keywords.noise_terms, vec!["skid"]);
    let all_keywords: BTreeSet<&str> = keywords
        .equipment_types
        .iter()
        .flat_map(|t| t.top_keywords.iter().map(|k| k.word.as_str()))
        .collect();
    assert!(all_keywords.contains("valve"));
    assert!(!all_keywords.contains("skid"));
}

// ── Phase boundaries ─────────────────────────────────────────────────────

#[test]
fn empty_facility_table_fails_phase_one() {
    let config = TaxonomyConfig::default();
    let err = pipeline::discover_signatures("empty", &FacilityTable::default(), &[], &config)
        .unwrap_err();
    assert!(matches!(err, PhaseError::EmptyResult { .. }));
    assert_eq!(err.phase(), Phase::Signatures);
    assert_eq!(err.dataset(), "empty");
}

#[test]
fn unknown_member_fails_phase_two() {
    let config = TaxonomyConfig::default();
    let facilities = table(&[&[("id", "A"), ("desc", "pump")]]);
    let signatures =
        pipeline::discover_signatures("d", &facilities, &[], &config).unwrap();
    let other = table(&[&[("id", "Z")]]);

    let err = pipeline::extract_equipment_types("d", &other, &signatures, &config).unwrap_err();
    assert!(matches!(err, PhaseError::InvalidPrecondition { .. }));
    assert_eq!(err.phase(), Phase::Keywords);
}

#[test]
fn no_equipment_types_fails_phase_three() {
    let analysis = KeywordAnalysis {
        analyzed_at: chrono::Utc::now(),
        equipment_types: Vec::new(),
        noise_terms: Vec::new(),
        noise_threshold: 0.75,
        columns_analyzed: Vec::new(),
        vocabulary: Default::default(),
        tier_counts: Default::default(),
        diagnostics: Vec::new(),
        recommendations: Vec::new(),
    };
    let err = pipeline::build_hierarchy("d", &analysis, &[], &TaxonomyConfig::default(), None)
        .unwrap_err();
    assert_eq!(err.phase(), Phase::Evidence);
}

#[test]
fn missing_evidence_table_short_circuits() {
    let err = TaxonomyEngine::new(TaxonomyConfig::default())
        .run(&FixtureSource::new("missing_evidence"))
        .unwrap_err();
    assert!(matches!(
        err,
        TaxonError::Input(InputError::MissingInput { .. })
    ));
}

#[test]
fn unknown_dataset_is_missing_input() {
    let source = FixtureSource::new("does_not_exist");
    assert!(matches!(
        source.load_facilities(),
        Err(InputError::MissingInput { .. })
    ));
}

// ── Tree output ──────────────────────────────────────────────────────────

#[test]
fn tree_is_written_to_configured_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("analysis").join("equipment_hierarchy.txt");
    let mut config = TaxonomyConfig::default();
    config.evidence.tree_output_path = Some(path.display().to_string());

    let report = TaxonomyEngine::new(config)
        .run(&FixtureSource::new("field_sample"))
        .unwrap();

    assert_eq!(
        report.evidence.tree.written_to.as_deref(),
        Some(path.display().to_string().as_str())
    );
    assert_eq!(std::fs::read_to_string(&path).unwrap(), report.tree_text());
}

#[test]
fn failing_sink_is_reported_not_fatal() {
    let report = TaxonomyEngine::new(TaxonomyConfig::default())
        .with_sink(Box::new(BrokenSink))
        .run(&FixtureSource::new("field_sample"))
        .unwrap();

    let tree = &report.evidence.tree;
    assert!(tree.write_error.as_deref().unwrap().contains("disk full"));
    assert!(!tree.text.is_empty());
    assert!(report
        .evidence
        .diagnostics
        .iter()
        .any(|d| d.kind == DiagnosticKind::TreeWriteFailed));
    assert_eq!(report.evidence.profiles.len(), 4);
}

// ── Scenarios on hand-built phase 3 input ────────────────────────────────

#[test]
fn inclusive_merge_threshold() {
    // {A,B,C,D,E} vs {A,B,C,D}: 4 / 5 = 0.80 exactly.
    let config = TaxonomyConfig::default();
    let facilities = table(&[
        &[("id", "S1"), ("type", "SEPARATOR"), ("desc", "hp separator")],
        &[("id", "S2"), ("type", "SEPARATOR"), ("desc", "lp separator")],
        &[("id", "H1"), ("type", "HEATER")],
        &[("id", "H2"), ("type", "HEATER")],
    ]);
    let summary = summarize(&facilities);
    let profiles = profile_columns(&summary, &config.profiling);
    let signatures = pipeline::discover_signatures("d", &facilities, &profiles, &config).unwrap();
    let keywords = pipeline::extract_equipment_types("d", &facilities, &signatures, &config).unwrap();
    assert_eq!(keywords.equipment_types.len(), 2);

    let ids: Vec<usize> = keywords.equipment_types.iter().map(|t| t.id).collect();
    let mut evidence = Vec::new();
    for t in &keywords.equipment_types {
        let codes: &[&str] = if t.id == ids[0] {
            &["A", "B", "C", "D", "E"]
        } else {
            &["A", "B", "C", "D"]
        };
        for facility in &t.facility_ids {
            for code in codes {
                evidence.push(EvidenceRow::new(facility, code));
            }
        }
    }

    let report = pipeline::build_hierarchy("d", &keywords, &evidence, &config, None).unwrap();
    let merged = &report.consolidation.merged_groups;
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].merged_from, vec![ids[0], ids[1]]);
    assert!((merged[0].similarity - 0.8).abs() < 1e-9);

    // A second pass over the consolidated set finds nothing more to merge.
    let candidates: Vec<_> = report
        .profiles
        .iter()
        .map(phase3_consolidation::MergeCandidate::from_profile)
        .collect();
    let next = phase3_consolidation::apply(&report.consolidation, &candidates);
    let again = phase3_consolidation::consolidate(&next, config.evidence.merge_threshold);
    assert!(again.merged_groups.is_empty());
}
