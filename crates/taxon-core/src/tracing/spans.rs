//! Span definitions per pipeline phase.
//!
//! Each phase span carries the dataset name plus the phase's input size.

/// Create the phase 1 (signature discovery) span.
#[macro_export]
macro_rules! signatures_span {
    ($dataset:expr, $facilities:expr) => {
        tracing::info_span!("taxon.phase1.signatures", dataset = %$dataset, facilities = $facilities)
    };
}

/// Create the phase 2 (keyword extraction) span.
#[macro_export]
macro_rules! keywords_span {
    ($dataset:expr, $groups:expr) => {
        tracing::info_span!("taxon.phase2.keywords", dataset = %$dataset, groups = $groups)
    };
}

/// Create the phase 3 (evidence and hierarchy) span.
#[macro_export]
macro_rules! evidence_span {
    ($dataset:expr, $types:expr) => {
        tracing::info_span!("taxon.phase3.evidence", dataset = %$dataset, equipment_types = $types)
    };
}

/// Create the span wrapping one full engine run.
#[macro_export]
macro_rules! run_span {
    ($dataset:expr, $run_id:expr) => {
        tracing::info_span!(
            "taxon.run",
            dataset = %$dataset,
            run_id = %$run_id,
            version = $crate::constants::VERSION
        )
    };
}
