//! # taxon-inference
//!
//! 3-phase equipment taxonomy inference: signature clustering → keyword coherence →
//! evidence validation (hierarchy, consolidation, confidence report, tree).
//! The column profiler feeds phase 1; [`TaxonomyEngine`] drives a full run.

pub mod algorithms;
pub mod engine;
pub mod pipeline;
pub mod profiling;
pub mod recommendations;
pub mod sink;
pub mod tree;

pub use engine::{TaxonomyEngine, TaxonomyReport};
pub use pipeline::{
    build_hierarchy, discover_signatures, extract_equipment_types, run_pipeline, PipelineOutput,
};
pub use sink::FileTreeSink;
