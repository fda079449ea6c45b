//! Property tests for taxon-inference: score bounds, similarity symmetry,
//! partitioning, noise stability and consolidation convergence.

use std::collections::{BTreeSet, HashSet};

use proptest::prelude::*;

use taxon_core::config::{KeywordConfig, ProfilingConfig};
use taxon_core::models::{FacilityRecord, FacilityTable};
use taxon_core::TaxonomyConfig;

use taxon_inference::algorithms::{jaccard, score_coherence};
use taxon_inference::pipeline::phase3_consolidation::{self, MergeCandidate};
use taxon_inference::pipeline;
use taxon_inference::profiling::{discriminative_score, profile_columns};
use test_fixtures::summarize;

const DESCRIPTIONS: &[&str] = &[
    "Production Well",
    "Oil Storage Tank",
    "Gas Sales Meter",
    "HP Separator",
    "Water Transfer Pump",
];
const TYPES: &[&str] = &["WELL", "TANK", "METER", "SEP", "PUMP"];
const CODES: &[&str] = &["FLOW", "PRESS", "TEMP", "LEVEL", "VOLT", "AMPS"];

type RowSpec = (Option<usize>, Option<usize>, Option<u8>, Option<u8>);

fn row_strategy() -> impl Strategy<Value = RowSpec> {
    (
        proptest::option::of(0..DESCRIPTIONS.len()),
        proptest::option::of(0..TYPES.len()),
        proptest::option::of(any::<u8>()),
        proptest::option::of(any::<u8>()),
    )
}

fn build_table(rows: &[RowSpec], shared_word: Option<&str>) -> FacilityTable {
    let records = rows
        .iter()
        .enumerate()
        .map(|(i, (desc, kind, a1, a2))| {
            let mut record = FacilityRecord::new(format!("F{i}")).unwrap();
            let desc = desc.map(|d| DESCRIPTIONS[d]).unwrap_or_default();
            let desc = match shared_word {
                Some(word) => format!("{desc} {word}"),
                None => desc.to_string(),
            };
            record.set_field("desc", Some(desc.as_str()));
            record.set_field("type", kind.map(|k| TYPES[k]));
            record.set_field("attr1", a1.map(|v| format!("v{v}")).as_deref());
            record.set_field("attr2", a2.map(|v| format!("v{v}")).as_deref());
            record
        })
        .collect();
    FacilityTable::new(records).unwrap()
}

fn code_set() -> impl Strategy<Value = BTreeSet<String>> {
    proptest::collection::btree_set(0..CODES.len(), 0..=CODES.len())
        .prop_map(|idx| idx.into_iter().map(|i| CODES[i].to_string()).collect())
}

proptest! {
    #[test]
    fn discriminative_score_is_bounded(
        total in 1usize..500,
        filled_frac in 0.0f64..=1.0,
        distinct_frac in 0.0f64..=1.0,
    ) {
        let filled = (total as f64 * filled_frac) as usize;
        let distinct = (filled as f64 * distinct_frac) as usize;
        let fill_rate = filled as f64 / total as f64;
        let score = discriminative_score(fill_rate, filled, distinct, &ProfilingConfig::default());
        prop_assert!((0.0..=1.0).contains(&score));
        if distinct <= 1 {
            prop_assert_eq!(score, 0.0);
        }
    }

    #[test]
    fn coherence_is_bounded(
        mut counts in proptest::collection::vec(1usize..50, 0..25),
        extra_words in 0usize..100,
        facilities in 1usize..40,
    ) {
        counts.sort_unstable_by(|a, b| b.cmp(a));
        let total = counts.iter().sum::<usize>() + extra_words;
        let score = score_coherence(&counts, total, facilities, &KeywordConfig::default());
        prop_assert!((0.0..=1.0).contains(&score.coherence));
        prop_assert!((0.0..=1.0).contains(&score.concentration_ratio));
    }

    #[test]
    fn jaccard_is_symmetric_and_bounded(a in code_set(), b in code_set()) {
        let ab = jaccard(&a, &b);
        prop_assert_eq!(ab, jaccard(&b, &a));
        prop_assert!((0.0..=1.0).contains(&ab));
        if !a.is_empty() {
            prop_assert_eq!(jaccard(&a, &a), 1.0);
        }
    }

    #[test]
    fn groups_partition_the_facilities(rows in proptest::collection::vec(row_strategy(), 1..40)) {
        let facilities = build_table(&rows, None);
        let config = TaxonomyConfig::default();
        let profiles = profile_columns(&summarize(&facilities), &config.profiling);
        let discovery = pipeline::discover_signatures("prop", &facilities, &profiles, &config).unwrap();

        let mut seen = HashSet::new();
        for group in &discovery.groups {
            for id in group.member_ids() {
                prop_assert!(seen.insert(id.to_string()), "facility {} in two groups", id);
            }
        }
        prop_assert_eq!(seen.len(), facilities.len());
        prop_assert!(discovery.groups.windows(2).all(|w| w[0].facility_count >= w[1].facility_count));
    }

    #[test]
    fn universal_token_is_always_noise(rows in proptest::collection::vec(row_strategy(), 1..30)) {
        let facilities = build_table(&rows, Some("Permian"));
        let config = TaxonomyConfig::default();
        let profiles = profile_columns(&summarize(&facilities), &config.profiling);
        let discovery = pipeline::discover_signatures("prop", &facilities, &profiles, &config).unwrap();
        let analysis = pipeline::extract_equipment_types("prop", &facilities, &discovery, &config).unwrap();

        prop_assert!(analysis.noise_terms.contains(&"permian".to_string()));
        for equipment in &analysis.equipment_types {
            prop_assert!(equipment.top_keywords.iter().all(|k| k.word != "permian"));
        }
    }

    #[test]
    fn repeated_consolidation_converges(sets in proptest::collection::vec(code_set(), 1..12)) {
        let mut candidates: Vec<MergeCandidate> = sets
            .into_iter()
            .enumerate()
            .map(|(i, codes)| MergeCandidate {
                id: i + 1,
                name: format!("T{}", i + 1),
                facility_count: 1,
                codes,
            })
            .collect();

        let mut passes = 0;
        loop {
            let result = phase3_consolidation::consolidate(&candidates, 0.80);
            let mut used = HashSet::new();
            for group in &result.merged_groups {
                for id in &group.merged_from {
                    prop_assert!(used.insert(*id), "type {} merged twice in one pass", id);
                }
            }
            if result.merged_groups.is_empty() {
                break;
            }
            let next = phase3_consolidation::apply(&result, &candidates);
            prop_assert!(next.len() < candidates.len());
            candidates = next;
            passes += 1;
        }
        prop_assert!(passes <= 12);
        prop_assert!(phase3_consolidation::consolidate(&candidates, 0.80).merged_groups.is_empty());
    }
}
