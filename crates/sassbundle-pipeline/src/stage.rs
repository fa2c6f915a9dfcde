/*
 * stage.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * PipelineStage trait definition.
 */

//! Pipeline stage trait.
//!
//! The [`PipelineStage`] trait defines the interface for all pipeline
//! stages. Stages are the building blocks of a pipeline, each responsible
//! for one transformation of a [`FileItem`].

use crate::error::PipelineError;
use crate::item::FileItem;

/// A single stage in a file pipeline.
///
/// Stages consume an item, transform it, and return it for the next stage.
/// Stages may hold configuration (an output directory, a flag) but no
/// mutable state between runs; a pipeline can be run any number of times.
///
/// # Thread Safety
///
/// Stages must be `Send + Sync` so pipelines can be shared across threads
/// by callers that run several builds concurrently.
pub trait PipelineStage: Send + Sync {
    /// Human-readable name used in observer events and error messages.
    fn name(&self) -> &str;

    /// Run the stage on one item.
    ///
    /// # Errors
    ///
    /// A stage error aborts the remaining stages for the whole run; the
    /// pipeline reports it through its observer and returns it to the
    /// caller.
    fn run(&self, item: FileItem) -> Result<FileItem, PipelineError>;
}
