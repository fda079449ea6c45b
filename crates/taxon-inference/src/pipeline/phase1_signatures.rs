//! Phase 1: bucket facilities by which key columns they populate.

use std::collections::HashMap;

use chrono::Utc;
use taxon_core::config::ClusteringConfig;
use taxon_core::errors::{Phase, PhaseError, PhaseResult};
use taxon_core::models::{
    AttributeSignature, ColumnProfile, Diagnostic, DiagnosticKind, FacilityGroup, FacilityRecord,
    FacilityTable, SignatureDiscovery, ValueCount, ValuePattern,
};
use tracing::{debug, info, warn};

use crate::profiling::select_key_columns;
use crate::recommendations;

/// Hex characters kept from the signature digest.
const SIGNATURE_ID_LEN: usize = 16;

/// Discover attribute signatures and group facilities by them.
///
/// Every facility lands in exactly one group. With no qualifying key column
/// the whole table becomes a single catch-all group and a
/// [`DiagnosticKind::DegenerateInput`] diagnostic is recorded.
pub fn discover(
    dataset: &str,
    facilities: &FacilityTable,
    column_profiles: &[ColumnProfile],
    config: &ClusteringConfig,
) -> PhaseResult<SignatureDiscovery> {
    if facilities.is_empty() {
        return Err(PhaseError::EmptyResult {
            dataset: dataset.to_string(),
            phase: Phase::Signatures,
            what: "facility groups (the facility table is empty)".to_string(),
        });
    }

    let key_columns = select_key_columns(column_profiles, config);
    let signature_columns: Vec<String> = key_columns
        .iter()
        .take(config.max_signature_columns)
        .map(|p| p.column.clone())
        .collect();

    let mut diagnostics = Vec::new();
    if signature_columns.is_empty() {
        warn!(
            dataset,
            facilities = facilities.len(),
            "no discriminative columns, using a single catch-all group"
        );
        diagnostics.push(Diagnostic::new(
            DiagnosticKind::DegenerateInput,
            "no column qualified for attribute signatures; all facilities form one group",
        ));
    }

    let groups = group_by_signature(facilities, &signature_columns);
    let covered: usize = groups.iter().map(|g| g.facility_count).sum();
    let value_patterns = value_patterns(facilities, &key_columns, config);

    debug!(
        key_columns = key_columns.len(),
        signature_columns = signature_columns.len(),
        "selected signature columns"
    );
    info!(
        dataset,
        groups = groups.len(),
        facilities = facilities.len(),
        "phase 1: signatures discovered"
    );

    let mut discovery = SignatureDiscovery {
        analyzed_at: Utc::now(),
        total_facilities: facilities.len(),
        key_columns,
        signature_columns,
        total_unique_signatures: groups.len(),
        groups,
        coverage_pct: percent(covered, facilities.len()),
        value_patterns,
        diagnostics,
        recommendations: Vec::new(),
    };
    discovery.recommendations = recommendations::for_signatures(&discovery);
    Ok(discovery)
}

/// Presence vector of `record` over `columns`.
pub fn signature_of(record: &FacilityRecord, columns: &[String]) -> AttributeSignature {
    AttributeSignature::new(columns.iter().map(|c| record.is_populated(c)).collect())
}

/// Short stable digest of a signature.
pub fn signature_id(signature: &AttributeSignature) -> String {
    let hash = blake3::hash(signature.bit_string().as_bytes());
    hash.to_hex().as_str()[..SIGNATURE_ID_LEN].to_string()
}

/// Group facilities by signature, largest group first. Equal sizes keep the
/// order in which the signature first appeared in the table.
fn group_by_signature(facilities: &FacilityTable, columns: &[String]) -> Vec<FacilityGroup> {
    let mut index: HashMap<AttributeSignature, usize> = HashMap::new();
    let mut buckets: Vec<(AttributeSignature, Vec<&FacilityRecord>)> = Vec::new();

    for record in facilities.iter() {
        let signature = signature_of(record, columns);
        match index.get(&signature) {
            Some(&slot) => buckets[slot].1.push(record),
            None => {
                index.insert(signature.clone(), buckets.len());
                buckets.push((signature, vec![record]));
            }
        }
    }

    // Stable sort keeps first-appearance order among equal counts.
    buckets.sort_by(|a, b| b.1.len().cmp(&a.1.len()));

    let total = facilities.len();
    buckets
        .into_iter()
        .enumerate()
        .map(|(i, (signature, members))| {
            let (filled_columns, empty_columns) = signature.partition_columns(columns);
            FacilityGroup {
                group_id: i + 1,
                signature_id: signature_id(&signature),
                filled_columns,
                empty_columns,
                facility_count: members.len(),
                percent_of_total: percent(members.len(), total),
                members: members.iter().map(|r| r.snapshot()).collect(),
                signature,
            }
        })
        .collect()
}

/// Most common values of the leading key columns.
fn value_patterns(
    facilities: &FacilityTable,
    key_columns: &[ColumnProfile],
    config: &ClusteringConfig,
) -> Vec<ValuePattern> {
    key_columns
        .iter()
        .take(config.value_pattern_columns)
        .map(|profile| {
            let mut counts: HashMap<&str, usize> = HashMap::new();
            for record in facilities.iter() {
                if let Some(value) = record.field(&profile.column) {
                    *counts.entry(value).or_insert(0) += 1;
                }
            }
            let total_filled: usize = counts.values().sum();
            let total_unique_values = counts.len();

            let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
            ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

            ValuePattern {
                column: profile.column.clone(),
                total_unique_values,
                total_filled,
                top_values: ranked
                    .into_iter()
                    .take(config.top_values)
                    .map(|(value, count)| ValueCount {
                        value: value.to_string(),
                        count,
                        percent: percent(count, total_filled),
                    })
                    .collect(),
            }
        })
        .collect()
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
