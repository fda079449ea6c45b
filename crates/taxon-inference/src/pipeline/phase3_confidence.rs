//! Phase 3d: evidence statistics grouped by phase 2 confidence tier.

use taxon_core::models::{
    BucketMember, ConfidenceBucket, ConfidenceReport, ConfidenceTier, EquipmentType,
    UdcCoverageProfile,
};

/// Members listed per bucket.
const BUCKET_MEMBERS: usize = 5;

/// Cross-tabulate coverage profiles by the confidence of their equipment
/// type. All four tiers are always reported, empty ones included.
pub fn confidence_report(
    types: &[EquipmentType],
    profiles: &[UdcCoverageProfile],
) -> ConfidenceReport {
    let buckets = ConfidenceTier::ALL
        .iter()
        .map(|&tier| {
            let members: Vec<(&EquipmentType, &UdcCoverageProfile)> = types
                .iter()
                .filter(|t| t.confidence == tier)
                .filter_map(|t| {
                    profiles
                        .iter()
                        .find(|p| p.equipment_type_id == t.id)
                        .map(|p| (t, p))
                })
                .collect();
            bucket(tier, &members)
        })
        .collect();
    ConfidenceReport { buckets }
}

fn bucket(tier: ConfidenceTier, members: &[(&EquipmentType, &UdcCoverageProfile)]) -> ConfidenceBucket {
    let udc_counts: Vec<usize> = members.iter().map(|(_, p)| p.distinct_udcs).collect();
    let core_means: Vec<f64> = members
        .iter()
        .filter_map(|(_, p)| p.mean_core_coverage_pct())
        .collect();

    ConfidenceBucket {
        tier,
        count: members.len(),
        avg_udc_count: mean(udc_counts.iter().map(|&n| n as f64)),
        min_udc_count: udc_counts.iter().copied().min().unwrap_or(0),
        max_udc_count: udc_counts.iter().copied().max().unwrap_or(0),
        avg_core_coverage_pct: mean(core_means.iter().copied()),
        equipment_types: members
            .iter()
            .take(BUCKET_MEMBERS)
            .map(|(t, p)| BucketMember {
                id: t.id,
                name: t.name.clone(),
                distinct_udcs: p.distinct_udcs,
                facilities: t.facility_count,
            })
            .collect(),
        recommendation: recommendation(tier).to_string(),
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

/// Advice attached to each tier's bucket.
pub fn recommendation(tier: ConfidenceTier) -> &'static str {
    match tier {
        ConfidenceTier::High => "Ready for template generation",
        ConfidenceTier::Medium => "Review UDC patterns to confirm the classification",
        ConfidenceTier::Low => "Needs deep analysis; consider splitting into sub-types",
        ConfidenceTier::None => "No keywords found; inspect facility descriptions manually",
    }
}
