use crate::errors::SinkError;

/// Destination for the rendered hierarchy tree.
pub trait ITreeSink: Send + Sync {
    /// Persist `text`, returning a description of where it went.
    fn write_tree(&self, text: &str) -> Result<String, SinkError>;
}
