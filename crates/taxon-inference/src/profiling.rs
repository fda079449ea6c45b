//! Column profiler: discriminative score and category for every column of the
//! column summary.

use taxon_core::config::{ClusteringConfig, ProfilingConfig};
use taxon_core::constants::{
    ATTRIBUTE_PREFIX, BOOLEAN_FLAG_PREFIX, COMMENT_COLUMN, DESCRIPTIVE_COLUMNS, ID_COLUMN,
    STRUCTURAL_COLUMNS, TABLE_PREFIX,
};
use taxon_core::models::{ColumnCategory, ColumnProfile, ColumnStats, ColumnSummary};
use tracing::debug;

/// How well a column separates facilities, in [0, 1].
///
/// Zero for empty or constant columns. Otherwise a weighted blend of a
/// fill-rate score peaking at 50% fill and the scaled uniqueness ratio
/// (distinct / filled, capped at 1.0).
pub fn discriminative_score(
    fill_rate: f64,
    filled: usize,
    distinct: usize,
    config: &ProfilingConfig,
) -> f64 {
    if fill_rate <= 0.0 || filled == 0 || distinct <= 1 {
        return 0.0;
    }
    let fill_score = (1.0 - (fill_rate.min(1.0) - 0.5).abs() * 2.0).max(0.0);
    let uniqueness = distinct as f64 / filled as f64;
    let uniqueness_score = (uniqueness * config.uniqueness_scale).min(1.0);
    let score =
        fill_score * config.moderate_fill_weight + uniqueness_score * config.uniqueness_weight;
    score.clamp(0.0, 1.0)
}

/// Category of a column. Rules are checked in order; the first match wins.
pub fn categorize_column(
    name: &str,
    fill_rate: f64,
    distinct: usize,
    total_rows: usize,
    config: &ProfilingConfig,
) -> ColumnCategory {
    let column = name.to_ascii_lowercase();
    let column = column.as_str();

    if STRUCTURAL_COLUMNS.contains(&column) {
        return ColumnCategory::Structural;
    }
    if column == ID_COLUMN || distinct as f64 > total_rows as f64 * config.identity_uniqueness {
        return ColumnCategory::Identity;
    }
    if DESCRIPTIVE_COLUMNS.contains(&column) {
        return ColumnCategory::Descriptive;
    }
    if column.starts_with(ATTRIBUTE_PREFIX) {
        return if fill_rate <= 0.0 {
            ColumnCategory::UnusedAttribute
        } else if fill_rate < config.rare_fill_rate {
            ColumnCategory::RareAttribute
        } else if fill_rate > config.common_fill_rate {
            ColumnCategory::CommonAttribute
        } else {
            ColumnCategory::ModerateAttribute
        };
    }
    if column.starts_with(TABLE_PREFIX) {
        return if fill_rate <= 0.0 {
            ColumnCategory::UnusedTable
        } else {
            ColumnCategory::TableRef
        };
    }
    if column.starts_with(BOOLEAN_FLAG_PREFIX) {
        return ColumnCategory::BooleanFlag;
    }
    if column == COMMENT_COLUMN {
        return ColumnCategory::Comment;
    }
    ColumnCategory::Other
}

/// Profile a single column.
pub fn profile_column(stats: &ColumnStats, total_rows: usize, config: &ProfilingConfig) -> ColumnProfile {
    let fill_rate = if total_rows > 0 {
        (stats.non_empty as f64 / total_rows as f64).min(1.0)
    } else {
        0.0
    };
    let uniqueness_ratio = if stats.non_empty > 0 {
        stats.distinct as f64 / stats.non_empty as f64
    } else {
        0.0
    };

    ColumnProfile {
        column: stats.name.clone(),
        fill_rate,
        filled_count: stats.non_empty,
        distinct_count: stats.distinct,
        uniqueness_ratio,
        discriminative_score: discriminative_score(
            fill_rate,
            stats.non_empty,
            stats.distinct,
            config,
        ),
        category: categorize_column(&stats.name, fill_rate, stats.distinct, total_rows, config),
    }
}

/// Profile every column, ranked by discriminative score (highest first).
/// Equal scores keep header order.
pub fn profile_columns(summary: &ColumnSummary, config: &ProfilingConfig) -> Vec<ColumnProfile> {
    let mut profiles: Vec<ColumnProfile> = summary
        .columns
        .iter()
        .map(|stats| profile_column(stats, summary.total_rows, config))
        .collect();
    profiles.sort_by(|a, b| b.discriminative_score.total_cmp(&a.discriminative_score));

    debug!(
        columns = profiles.len(),
        total_rows = summary.total_rows,
        "profiled columns"
    );
    profiles
}

/// Columns eligible for attribute signatures: descriptive or in-use attribute
/// columns scoring above the configured minimum, best first.
///
/// Returns every qualifying column; callers cap the signature width with
/// `max_signature_columns`.
pub fn select_key_columns(profiles: &[ColumnProfile], config: &ClusteringConfig) -> Vec<ColumnProfile> {
    let mut key: Vec<ColumnProfile> = profiles
        .iter()
        .filter(|p| p.category.is_signature_candidate())
        .filter(|p| p.discriminative_score > config.min_discriminative_score)
        .cloned()
        .collect();
    key.sort_by(|a, b| b.discriminative_score.total_cmp(&a.discriminative_score));
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> ProfilingConfig {
        ProfilingConfig::default()
    }

    #[test]
    fn empty_or_constant_columns_score_zero() {
        assert_eq!(discriminative_score(0.0, 0, 0, &cfg()), 0.0);
        assert_eq!(discriminative_score(0.5, 50, 1, &cfg()), 0.0);
    }

    #[test]
    fn half_filled_unique_column_scores_one() {
        // fill 50% → fill score 1.0, uniqueness 0.5 * 2 → 1.0
        let score = discriminative_score(0.5, 50, 25, &cfg());
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn fully_filled_low_uniqueness_column() {
        // fill 100% → 0.0, uniqueness 10/100 * 2 = 0.2 → 0.6 * 0.2
        let score = discriminative_score(1.0, 100, 10, &cfg());
        assert!((score - 0.12).abs() < 1e-9);
    }

    #[test]
    fn categories_follow_rule_order() {
        let c = cfg();
        assert_eq!(categorize_column("site", 1.0, 3, 100, &c), ColumnCategory::Structural);
        assert_eq!(categorize_column("id", 1.0, 100, 100, &c), ColumnCategory::Identity);
        // High uniqueness wins over the descriptive name.
        assert_eq!(categorize_column("desc", 1.0, 95, 100, &c), ColumnCategory::Identity);
        assert_eq!(categorize_column("type", 1.0, 12, 100, &c), ColumnCategory::Descriptive);
        assert_eq!(categorize_column("attr1", 0.0, 0, 100, &c), ColumnCategory::UnusedAttribute);
        assert_eq!(categorize_column("attr2", 0.05, 3, 100, &c), ColumnCategory::RareAttribute);
        assert_eq!(categorize_column("attr3", 0.3, 3, 100, &c), ColumnCategory::ModerateAttribute);
        assert_eq!(categorize_column("attr4", 0.7, 3, 100, &c), ColumnCategory::CommonAttribute);
        assert_eq!(categorize_column("table0", 0.0, 0, 100, &c), ColumnCategory::UnusedTable);
        assert_eq!(categorize_column("table1", 0.2, 4, 100, &c), ColumnCategory::TableRef);
        assert_eq!(categorize_column("yes_no3", 0.2, 2, 100, &c), ColumnCategory::BooleanFlag);
        assert_eq!(categorize_column("comment", 0.2, 2, 100, &c), ColumnCategory::Comment);
        assert_eq!(categorize_column("owner", 0.2, 2, 100, &c), ColumnCategory::Other);
    }

    #[test]
    fn fill_band_edges() {
        let c = cfg();
        assert_eq!(categorize_column("attr1", 0.1, 3, 100, &c), ColumnCategory::ModerateAttribute);
        assert_eq!(categorize_column("attr1", 0.5, 3, 100, &c), ColumnCategory::ModerateAttribute);
    }

    #[test]
    fn profiles_are_ranked_by_score() {
        let summary = ColumnSummary::new(100)
            .with_column("site", 100, 2)
            .with_column("attr1", 100, 10)
            .with_column("type", 50, 25);
        let profiles = profile_columns(&summary, &cfg());
        assert_eq!(profiles[0].column, "type");
        assert_eq!(profiles.len(), 3);
        assert!(profiles
            .windows(2)
            .all(|w| w[0].discriminative_score >= w[1].discriminative_score));
    }

    #[test]
    fn key_columns_exclude_non_candidates_and_low_scores() {
        let summary = ColumnSummary::new(100)
            .with_column("site", 50, 25)
            .with_column("attr1", 100, 2)
            .with_column("attr2", 40, 20)
            .with_column("desc", 50, 20)
            .with_column("table3", 50, 25);
        let profiles = profile_columns(&summary, &cfg());
        let key = select_key_columns(&profiles, &ClusteringConfig::default());
        let names: Vec<&str> = key.iter().map(|p| p.column.as_str()).collect();
        // attr1 scores 0.6 * 0.04 = 0.024 and is dropped.
        assert_eq!(names, vec!["attr2", "desc"]);
    }

    #[test]
    fn zero_row_summary_scores_everything_zero() {
        let summary = ColumnSummary::new(0).with_column("desc", 0, 0);
        let profiles = profile_columns(&summary, &cfg());
        assert_eq!(profiles[0].fill_rate, 0.0);
        assert_eq!(profiles[0].discriminative_score, 0.0);
    }
}
