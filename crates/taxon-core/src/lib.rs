//! # taxon-core
//!
//! Foundation crate for the equipment taxonomy pipeline.
//! Defines the data model, traits, errors, config, tracing setup, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;
pub mod tracing;

// Re-export the most commonly used types at the crate root.
pub use config::TaxonomyConfig;
pub use errors::{PhaseError, PhaseResult, TaxonError, TaxonResult};
pub use models::{
    ColumnProfile, ColumnSummary, ConfidenceTier, EquipmentType, EvidenceRow, FacilityGroup,
    FacilityRecord, FacilityTable,
};
