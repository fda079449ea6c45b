//! Phase 3a: measurement-code coverage per equipment type.

use std::collections::{BTreeMap, HashMap, HashSet};

use taxon_core::config::EvidenceConfig;
use taxon_core::models::{
    Diagnostic, DiagnosticKind, EquipmentType, EvidenceRow, EvidenceStatus, UdcCoverage,
    UdcCoverageProfile, UdcTier,
};
use tracing::{debug, warn};

/// Warning attached to a profile with no matching join rows.
pub const NO_EVIDENCE_WARNING: &str = "no measurement codes found for these facilities";

/// Coverage profiles plus bookkeeping about the join rows used.
#[derive(Debug, Clone)]
pub struct EvidenceProfiles {
    /// One per equipment type, in input order.
    pub profiles: Vec<UdcCoverageProfile>,
    /// Join rows attributed to some equipment type.
    pub matched_rows: usize,
    /// Join rows whose facility belongs to no equipment type.
    pub orphan_rows: usize,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Default, Clone)]
struct CodeTally<'a> {
    facilities: HashSet<&'a str>,
    tags: usize,
}

/// Build a coverage profile for every equipment type.
///
/// Types without any join row are kept with [`EvidenceStatus::NoEvidence`].
/// Rows for unknown facilities are counted and skipped.
pub fn profile_evidence(
    types: &[EquipmentType],
    evidence: &[EvidenceRow],
    config: &EvidenceConfig,
) -> EvidenceProfiles {
    let mut owner: HashMap<&str, usize> = HashMap::new();
    for (slot, equipment) in types.iter().enumerate() {
        for id in &equipment.facility_ids {
            owner.insert(id.as_str(), slot);
        }
    }

    let mut tallies: Vec<BTreeMap<&str, CodeTally>> = vec![BTreeMap::new(); types.len()];
    let mut tag_totals = vec![0usize; types.len()];
    let mut matched_rows = 0usize;
    let mut orphan_rows = 0usize;

    for row in evidence {
        let facility = row.facility_id.trim();
        let code = row.code.trim();
        if facility.is_empty() || code.is_empty() {
            debug!(facility, code, "skipping join row with blank key");
            continue;
        }
        let Some(&slot) = owner.get(facility) else {
            orphan_rows += 1;
            continue;
        };
        matched_rows += 1;
        tag_totals[slot] += 1;
        let tally = tallies[slot].entry(code).or_default();
        tally.facilities.insert(facility);
        tally.tags += 1;
    }

    let mut diagnostics = Vec::new();
    if orphan_rows > 0 {
        warn!(orphan_rows, "join rows reference facilities outside every equipment type");
        diagnostics.push(Diagnostic::new(
            DiagnosticKind::OrphanEvidence,
            format!("{orphan_rows} join rows reference unknown facilities and were skipped"),
        ));
    }

    let profiles = types
        .iter()
        .zip(tallies)
        .zip(tag_totals)
        .map(|((equipment, tally), total_tags)| {
            let profile = coverage_profile(equipment, tally, total_tags, config);
            if !profile.has_evidence() {
                warn!(equipment_type = equipment.id, "no evidence for equipment type");
                diagnostics.push(
                    Diagnostic::new(DiagnosticKind::NoEvidence, NO_EVIDENCE_WARNING)
                        .about(equipment.id),
                );
            }
            profile
        })
        .collect();

    EvidenceProfiles {
        profiles,
        matched_rows,
        orphan_rows,
        diagnostics,
    }
}

fn coverage_profile(
    equipment: &EquipmentType,
    tally: BTreeMap<&str, CodeTally>,
    total_tags: usize,
    config: &EvidenceConfig,
) -> UdcCoverageProfile {
    let members = equipment.facility_ids.len();
    let mut codes: Vec<UdcCoverage> = tally
        .into_iter()
        .map(|(code, t)| {
            let coverage = if members > 0 {
                t.facilities.len() as f64 / members as f64
            } else {
                0.0
            };
            UdcCoverage {
                code: code.to_string(),
                facility_count: t.facilities.len(),
                tag_count: t.tags,
                coverage,
                tier: UdcTier::classify(coverage, config.core_coverage, config.common_coverage),
            }
        })
        .collect();
    // BTreeMap order gives alphabetical ties; the stable sort keeps it.
    codes.sort_by(|a, b| b.coverage.total_cmp(&a.coverage));

    let found = !codes.is_empty();
    UdcCoverageProfile {
        equipment_type_id: equipment.id,
        name: equipment.name.clone(),
        facility_count: members,
        total_tags,
        distinct_udcs: codes.len(),
        codes,
        status: if found {
            EvidenceStatus::Found
        } else {
            EvidenceStatus::NoEvidence
        },
        warning: (!found).then(|| NO_EVIDENCE_WARNING.to_string()),
    }
}
