// Single source of truth for all default values.

// --- Profiling ---
pub const DEFAULT_MODERATE_FILL_WEIGHT: f64 = 0.4;
pub const DEFAULT_UNIQUENESS_WEIGHT: f64 = 0.6;
pub const DEFAULT_UNIQUENESS_SCALE: f64 = 2.0;
pub const DEFAULT_IDENTITY_UNIQUENESS: f64 = 0.8;
pub const DEFAULT_RARE_FILL_RATE: f64 = 0.1;
pub const DEFAULT_COMMON_FILL_RATE: f64 = 0.5;

// --- Clustering ---
pub const DEFAULT_MAX_SIGNATURE_COLUMNS: usize = 20;
pub const DEFAULT_MIN_DISCRIMINATIVE_SCORE: f64 = 0.1;
pub const DEFAULT_VALUE_PATTERN_COLUMNS: usize = 10;
pub const DEFAULT_TOP_VALUES: usize = 15;

// --- Keywords ---
pub const DEFAULT_NOISE_THRESHOLD: f64 = 0.75;
pub const DEFAULT_TOP_KEYWORDS: usize = 20;
pub const DEFAULT_NAME_KEYWORDS: usize = 3;
pub const DEFAULT_CONCENTRATION_WINDOW: usize = 5;
pub const DEFAULT_HIGH_COHERENCE: f64 = 0.7;
pub const DEFAULT_MEDIUM_COHERENCE: f64 = 0.4;
pub const DEFAULT_ANCHOR_COLUMNS: &[&str] = &["desc", "id"];
pub const DEFAULT_ABBREVIATIONS: &[&str] = &["wt", "sd", "hp", "lp"];
pub const DEFAULT_DISPLAY_SAMPLES: usize = 5;
pub const DEFAULT_KEY_ATTRIBUTES: usize = 5;

// --- Evidence ---
pub const DEFAULT_CORE_COVERAGE: f64 = 0.80;
pub const DEFAULT_COMMON_COVERAGE: f64 = 0.50;
pub const DEFAULT_HIERARCHY_THRESHOLD: f64 = 0.60;
pub const DEFAULT_MERGE_THRESHOLD: f64 = 0.80;
pub const DEFAULT_INCLUDE_SIMILARITY_MATRIX: bool = false;
pub const DEFAULT_TREE_SAMPLE_FACILITIES: usize = 3;
pub const DEFAULT_TREE_CORE_CODES: usize = 5;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
