//! Top-level taxonomy configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    ClusteringConfig, EvidenceConfig, KeywordConfig, ObservabilityConfig, ProfilingConfig,
};
use crate::errors::ConfigError;

/// Environment variables recognised by [`TaxonomyConfig::apply_env_overrides`].
pub const ENV_NOISE_THRESHOLD: &str = "TAXON_NOISE_THRESHOLD";
pub const ENV_HIERARCHY_THRESHOLD: &str = "TAXON_HIERARCHY_THRESHOLD";
pub const ENV_MERGE_THRESHOLD: &str = "TAXON_MERGE_THRESHOLD";
pub const ENV_MAX_SIGNATURE_COLUMNS: &str = "TAXON_MAX_SIGNATURE_COLUMNS";
pub const ENV_TREE_OUTPUT_PATH: &str = "TAXON_TREE_OUTPUT_PATH";
pub const ENV_LOG_LEVEL: &str = "TAXON_LOG_LEVEL";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`TAXON_*`)
/// 2. Config file (`taxon.toml` or an explicit path)
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TaxonomyConfig {
    pub profiling: ProfilingConfig,
    pub clustering: ClusteringConfig,
    pub keywords: KeywordConfig,
    pub evidence: EvidenceConfig,
    pub observability: ObservabilityConfig,
}

impl TaxonomyConfig {
    /// Load configuration from `path` (if it exists), apply `TAXON_*`
    /// overrides, and validate the result.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let content =
                std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })?;
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Self::default()
        };

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(ENV_NOISE_THRESHOLD) {
            self.keywords.noise_threshold = parse_value(ENV_NOISE_THRESHOLD, &v)?;
        }
        if let Some(v) = lookup(ENV_HIERARCHY_THRESHOLD) {
            self.evidence.hierarchy_threshold = parse_value(ENV_HIERARCHY_THRESHOLD, &v)?;
        }
        if let Some(v) = lookup(ENV_MERGE_THRESHOLD) {
            self.evidence.merge_threshold = parse_value(ENV_MERGE_THRESHOLD, &v)?;
        }
        if let Some(v) = lookup(ENV_MAX_SIGNATURE_COLUMNS) {
            self.clustering.max_signature_columns = parse_value(ENV_MAX_SIGNATURE_COLUMNS, &v)?;
        }
        if let Some(v) = lookup(ENV_TREE_OUTPUT_PATH) {
            self.evidence.tree_output_path = Some(v);
        }
        if let Some(v) = lookup(ENV_LOG_LEVEL) {
            self.observability.log_level = v;
        }
        Ok(())
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let unit_fields = [
            ("profiling.moderate_fill_weight", self.profiling.moderate_fill_weight),
            ("profiling.uniqueness_weight", self.profiling.uniqueness_weight),
            ("profiling.identity_uniqueness", self.profiling.identity_uniqueness),
            ("profiling.rare_fill_rate", self.profiling.rare_fill_rate),
            ("profiling.common_fill_rate", self.profiling.common_fill_rate),
            ("clustering.min_discriminative_score", self.clustering.min_discriminative_score),
            ("keywords.noise_threshold", self.keywords.noise_threshold),
            ("keywords.high_coherence", self.keywords.high_coherence),
            ("keywords.medium_coherence", self.keywords.medium_coherence),
            ("evidence.core_coverage", self.evidence.core_coverage),
            ("evidence.common_coverage", self.evidence.common_coverage),
            ("evidence.hierarchy_threshold", self.evidence.hierarchy_threshold),
            ("evidence.merge_threshold", self.evidence.merge_threshold),
        ];
        for (field, value) in unit_fields {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: format!("must be between 0.0 and 1.0, got {value}"),
                });
            }
        }

        if self.profiling.uniqueness_scale <= 0.0 {
            return Err(ConfigError::ValidationFailed {
                field: "profiling.uniqueness_scale".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if self.keywords.medium_coherence > self.keywords.high_coherence {
            return Err(ConfigError::ValidationFailed {
                field: "keywords.medium_coherence".to_string(),
                message: "must not exceed keywords.high_coherence".to_string(),
            });
        }
        if self.evidence.common_coverage > self.evidence.core_coverage {
            return Err(ConfigError::ValidationFailed {
                field: "evidence.common_coverage".to_string(),
                message: "must not exceed evidence.core_coverage".to_string(),
            });
        }

        let count_fields = [
            ("clustering.max_signature_columns", self.clustering.max_signature_columns),
            ("keywords.top_keywords", self.keywords.top_keywords),
            ("keywords.name_keywords", self.keywords.name_keywords),
            ("keywords.concentration_window", self.keywords.concentration_window),
        ];
        for (field, value) in count_fields {
            if value == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(field: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        field: field.to_string(),
        message: format!("cannot parse '{raw}'"),
    })
}
