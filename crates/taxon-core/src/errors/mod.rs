//! Error handling for the taxonomy pipeline.
//! One error enum per concern, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod error_code;
pub mod input_error;
pub mod phase_error;
pub mod sink_error;
pub mod taxon_error;

pub use config_error::ConfigError;
pub use error_code::TaxonErrorCode;
pub use input_error::InputError;
pub use phase_error::{Phase, PhaseError, PhaseResult};
pub use sink_error::SinkError;
pub use taxon_error::{TaxonError, TaxonResult};
