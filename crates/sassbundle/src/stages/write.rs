//! Destination writer stage.
//!
//! Copyright (c) 2025 Posit, PBC

use std::fs;
use std::path::PathBuf;

use sassbundle_pipeline::{FileItem, PipelineError, PipelineStage};

/// Persist each item under the output directory, creating it on demand.
/// The item is forwarded unchanged.
#[derive(Debug, Clone)]
pub struct WriteStage {
    out_dir: PathBuf,
}

impl WriteStage {
    /// Create a write stage targeting `out_dir`.
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }
}

impl PipelineStage for WriteStage {
    fn name(&self) -> &str {
        "write"
    }

    fn run(&self, item: FileItem) -> Result<FileItem, PipelineError> {
        let dest = self.out_dir.join(item.path());
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&dest, item.contents())?;
        Ok(item)
    }
}
