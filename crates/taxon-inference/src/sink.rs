//! File-backed tree sink.

use std::path::{Path, PathBuf};

use taxon_core::errors::SinkError;
use taxon_core::traits::ITreeSink;
use tracing::debug;

/// Writes the rendered tree to a single file, replacing any previous run.
#[derive(Debug, Clone)]
pub struct FileTreeSink {
    path: PathBuf,
}

impl FileTreeSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn failed(&self, err: std::io::Error) -> SinkError {
        SinkError::WriteFailed {
            location: self.path.display().to_string(),
            reason: err.to_string(),
        }
    }
}

impl ITreeSink for FileTreeSink {
    fn write_tree(&self, text: &str) -> Result<String, SinkError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.failed(e))?;
        }
        std::fs::write(&self.path, text).map_err(|e| self.failed(e))?;
        debug!(path = %self.path.display(), bytes = text.len(), "wrote hierarchy tree");
        Ok(self.path.display().to_string())
    }
}
