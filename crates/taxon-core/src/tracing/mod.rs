//! Observability for the taxonomy pipeline.
//! `tracing` crate with `EnvFilter`, span macros per phase.

pub mod setup;
pub mod spans;

pub use setup::{init_tracing, init_tracing_with};
