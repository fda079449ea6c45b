//! Seams to the collaborators outside the pipeline.

pub mod table_source;
pub mod tree_sink;

pub use table_source::ITableSource;
pub use tree_sink::ITreeSink;
