use serde::{Deserialize, Serialize};

use super::defaults;

/// Column profiler configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfilingConfig {
    /// Weight of the moderate-fill component (peaks at 50% fill).
    pub moderate_fill_weight: f64,
    /// Weight of the uniqueness component.
    pub uniqueness_weight: f64,
    /// Multiplier applied to distinct/filled before the 1.0 cap.
    pub uniqueness_scale: f64,
    /// Distinct/total ratio above which a column is treated as an identity column.
    pub identity_uniqueness: f64,
    /// Attribute columns below this fill rate are `rare`.
    pub rare_fill_rate: f64,
    /// Attribute columns above this fill rate are `common`.
    pub common_fill_rate: f64,
}

impl Default for ProfilingConfig {
    fn default() -> Self {
        Self {
            moderate_fill_weight: defaults::DEFAULT_MODERATE_FILL_WEIGHT,
            uniqueness_weight: defaults::DEFAULT_UNIQUENESS_WEIGHT,
            uniqueness_scale: defaults::DEFAULT_UNIQUENESS_SCALE,
            identity_uniqueness: defaults::DEFAULT_IDENTITY_UNIQUENESS,
            rare_fill_rate: defaults::DEFAULT_RARE_FILL_RATE,
            common_fill_rate: defaults::DEFAULT_COMMON_FILL_RATE,
        }
    }
}
