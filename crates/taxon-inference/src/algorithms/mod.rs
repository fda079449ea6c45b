//! Scoring and text algorithms shared by the pipeline phases.

pub mod coherence;
pub mod naming;
pub mod noise;
pub mod similarity;
pub mod tokenizer;

pub use coherence::{score_coherence, CoherenceScore};
pub use naming::suggest_name;
pub use noise::{is_noise, NoiseTerms};
pub use similarity::{jaccard, shared_codes};
pub use tokenizer::Tokenizer;
