//! Configuration system for the taxonomy pipeline.
//! TOML-based, layered: env > config file > compiled defaults.

pub mod clustering_config;
pub mod defaults;
pub mod evidence_config;
pub mod keyword_config;
pub mod observability_config;
pub mod profiling_config;
pub mod taxonomy_config;

pub use clustering_config::ClusteringConfig;
pub use evidence_config::EvidenceConfig;
pub use keyword_config::KeywordConfig;
pub use observability_config::ObservabilityConfig;
pub use profiling_config::ProfilingConfig;
pub use taxonomy_config::TaxonomyConfig;
