//! Path manipulation stages: rebase, flatten, rename.
//!
//! Copyright (c) 2025 Posit, PBC

use std::env;

use sassbundle_pipeline::{FileItem, PipelineError, PipelineStage};

/// Reset the item base to the process working directory, so resource
/// references in the compiled CSS resolve against the project root
/// regardless of where the bundle is eventually written.
#[derive(Debug, Clone, Copy, Default)]
pub struct RebaseStage;

impl PipelineStage for RebaseStage {
    fn name(&self) -> &str {
        "rebase"
    }

    fn run(&self, mut item: FileItem) -> Result<FileItem, PipelineError> {
        item.set_base(env::current_dir()?);
        Ok(item)
    }
}

/// Strip any directory structure from the item path.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlattenStage;

impl PipelineStage for FlattenStage {
    fn name(&self) -> &str {
        "flatten"
    }

    fn run(&self, mut item: FileItem) -> Result<FileItem, PipelineError> {
        item.flatten();
        Ok(item)
    }
}

/// Rename the item to a fixed file name, overwriting whatever name earlier
/// stages assigned.
#[derive(Debug, Clone)]
pub struct RenameStage {
    name: String,
}

impl RenameStage {
    /// Create a rename stage.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl PipelineStage for RenameStage {
    fn name(&self) -> &str {
        "rename"
    }

    fn run(&self, mut item: FileItem) -> Result<FileItem, PipelineError> {
        item.rename(self.name.as_str());
        Ok(item)
    }
}
