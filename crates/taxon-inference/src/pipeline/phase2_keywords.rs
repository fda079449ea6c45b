//! Phase 2: keyword extraction, noise filtering, coherence and naming.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use chrono::Utc;
use taxon_core::config::KeywordConfig;
use taxon_core::errors::{Phase, PhaseError, PhaseResult};
use taxon_core::models::{
    Diagnostic, DiagnosticKind, EquipmentType, FacilityGroup, FacilityRecord, FacilityTable,
    KeywordAnalysis, KeywordCount, SignatureDiscovery, TierCounts, VocabularyEntry,
};
use tracing::{debug, info, warn};

use crate::algorithms::{score_coherence, suggest_name, NoiseTerms, Tokenizer};
use crate::recommendations;

/// Token counts for one group.
#[derive(Debug, Default)]
struct GroupText {
    /// Token counts, with group-constant values contributing once.
    counts: HashMap<String, usize>,
}

impl GroupText {
    fn total_words(&self) -> usize {
        self.counts.values().sum()
    }
}

/// Turn every phase 1 group into a named, scored equipment type (1:1).
pub fn extract(
    dataset: &str,
    facilities: &FacilityTable,
    discovery: &SignatureDiscovery,
    config: &KeywordConfig,
) -> PhaseResult<KeywordAnalysis> {
    if discovery.groups.is_empty() {
        return Err(PhaseError::InvalidPrecondition {
            dataset: dataset.to_string(),
            phase: Phase::Keywords,
            reason: "phase 1 produced no facility groups".to_string(),
        });
    }

    let columns = analysis_columns(&discovery.key_column_names(), &config.anchor_columns);
    let tokenizer = Tokenizer::new(&config.abbreviations);

    // First pass: per-group counts plus dataset-wide facility frequency.
    let mut facility_frequency: HashMap<String, usize> = HashMap::new();
    let mut texts = Vec::with_capacity(discovery.groups.len());
    let mut total_facilities = 0usize;
    for group in &discovery.groups {
        let members = resolve_members(dataset, facilities, group)?;
        total_facilities += members.len();
        for record in &members {
            for token in facility_tokens(record, &columns, &tokenizer) {
                *facility_frequency.entry(token).or_insert(0) += 1;
            }
        }
        texts.push(group_text(&members, &columns, &tokenizer));
    }

    let noise = NoiseTerms::detect(&facility_frequency, total_facilities, config.noise_threshold);
    debug!(noise_terms = noise.len(), "detected noise terms");

    // Second pass: rank, score and name each group.
    let mut diagnostics = Vec::new();
    let mut equipment_types = Vec::with_capacity(texts.len());
    for (group, text) in discovery.groups.iter().zip(&texts) {
        let equipment = equipment_type(group, text, &noise, config);
        if equipment.top_keywords.is_empty() {
            warn!(group = group.group_id, "group produced no keywords");
            diagnostics.push(
                Diagnostic::new(
                    DiagnosticKind::NoKeywords,
                    "no keywords left after tokenization and noise filtering",
                )
                .about(group.group_id),
            );
        }
        debug!(
            group = group.group_id,
            name = %equipment.name,
            coherence = equipment.coherence,
            "equipment type scored"
        );
        equipment_types.push(equipment);
    }

    let mut tier_counts = TierCounts::default();
    for equipment in &equipment_types {
        tier_counts.record(equipment.confidence);
    }

    info!(
        dataset,
        equipment_types = equipment_types.len(),
        noise_terms = noise.len(),
        high = tier_counts.high,
        medium = tier_counts.medium,
        low = tier_counts.low,
        "phase 2: keywords extracted"
    );

    let mut analysis = KeywordAnalysis {
        analyzed_at: Utc::now(),
        vocabulary: build_vocabulary(&equipment_types),
        equipment_types,
        noise_terms: noise.to_vec(),
        noise_threshold: noise.threshold(),
        columns_analyzed: columns,
        tier_counts,
        diagnostics,
        recommendations: Vec::new(),
    };
    analysis.recommendations = recommendations::for_keywords(&analysis);
    Ok(analysis)
}

/// Key columns followed by any anchor column not already present.
pub fn analysis_columns(key_columns: &[String], anchors: &[String]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::with_capacity(key_columns.len() + anchors.len());
    for column in key_columns.iter().chain(anchors) {
        if !columns.contains(column) {
            columns.push(column.clone());
        }
    }
    columns
}

/// Noise-filtered keywords, highest count first, ties alphabetical.
pub fn rank_keywords(
    counts: &HashMap<String, usize>,
    noise: &NoiseTerms,
    limit: usize,
) -> Vec<(String, usize)> {
    let mut ranked: Vec<(String, usize)> = counts
        .iter()
        .filter(|(word, _)| !noise.contains(word))
        .map(|(word, &count)| (word.clone(), count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(limit);
    ranked
}

fn resolve_members<'a>(
    dataset: &str,
    facilities: &'a FacilityTable,
    group: &FacilityGroup,
) -> PhaseResult<Vec<&'a FacilityRecord>> {
    group
        .member_ids()
        .map(|id| {
            facilities
                .get(id)
                .ok_or_else(|| PhaseError::InvalidPrecondition {
                    dataset: dataset.to_string(),
                    phase: Phase::Keywords,
                    reason: format!(
                        "group {} references unknown facility '{id}'",
                        group.group_id
                    ),
                })
        })
        .collect()
}

/// Distinct tokens a single facility contributes over `columns`.
fn facility_tokens(
    record: &FacilityRecord,
    columns: &[String],
    tokenizer: &Tokenizer,
) -> HashSet<String> {
    columns
        .iter()
        .filter_map(|c| record.field(c))
        .flat_map(|value| tokenizer.tokenize(value))
        .collect()
}

/// Token counts for a group. A column whose populated values are all equal
/// contributes that value once instead of once per facility.
fn group_text(members: &[&FacilityRecord], columns: &[String], tokenizer: &Tokenizer) -> GroupText {
    let mut text = GroupText::default();
    for column in columns {
        let values: Vec<&str> = members.iter().filter_map(|r| r.field(column)).collect();
        let Some(first) = values.first() else {
            continue;
        };
        let constant = values.iter().all(|v| v == first);
        let contributions: &[&str] = if constant { &values[..1] } else { &values };
        for value in contributions {
            for token in tokenizer.tokenize(value) {
                *text.counts.entry(token).or_insert(0) += 1;
            }
        }
    }
    text
}

fn equipment_type(
    group: &FacilityGroup,
    text: &GroupText,
    noise: &NoiseTerms,
    config: &KeywordConfig,
) -> EquipmentType {
    let ranked = rank_keywords(&text.counts, noise, config.top_keywords);
    let counts: Vec<usize> = ranked.iter().map(|(_, c)| *c).collect();
    let score = score_coherence(&counts, text.total_words(), group.facility_count, config);

    let keywords: Vec<String> = ranked
        .iter()
        .take(config.name_keywords)
        .map(|(w, _)| w.clone())
        .collect();
    let top_keywords = ranked
        .into_iter()
        .map(|(word, count)| KeywordCount {
            frequency: if group.facility_count > 0 {
                count as f64 / group.facility_count as f64
            } else {
                0.0
            },
            word,
            count,
        })
        .collect();

    EquipmentType {
        id: group.group_id,
        name: suggest_name(&keywords),
        keywords,
        top_keywords,
        coherence: score.coherence,
        concentration_ratio: score.concentration_ratio,
        top_keyword_frequency: score.top_keyword_frequency,
        confidence: score.confidence,
        total_words: text.total_words(),
        unique_words: text.counts.len(),
        facility_count: group.facility_count,
        percent_of_total: group.percent_of_total,
        facility_ids: group.member_ids().map(str::to_string).collect(),
        key_attributes: group.key_attributes(config.key_attributes),
        sample_facilities: group.sample(config.display_samples).to_vec(),
        source_groups: vec![group.group_id],
    }
}

/// Aggregate equipment types by suggested name.
fn build_vocabulary(types: &[EquipmentType]) -> BTreeMap<String, VocabularyEntry> {
    let mut grouped: BTreeMap<&str, Vec<&EquipmentType>> = BTreeMap::new();
    for equipment in types {
        grouped.entry(equipment.name.as_str()).or_default().push(equipment);
    }

    grouped
        .into_iter()
        .map(|(name, members)| {
            let keywords: BTreeSet<&String> =
                members.iter().copied().flat_map(|e| &e.keywords).collect();
            let average_coherence =
                members.iter().map(|e| e.coherence).sum::<f64>() / members.len() as f64;
            (
                name.to_string(),
                VocabularyEntry {
                    keywords: keywords.into_iter().cloned().collect(),
                    groups: members.iter().flat_map(|e| e.source_groups.clone()).collect(),
                    total_facilities: members.iter().map(|e| e.facility_count).sum(),
                    average_coherence,
                },
            )
        })
        .collect()
}
