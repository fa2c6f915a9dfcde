/*
 * pipeline.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Pipeline struct for executing stage sequences.
 */

//! Pipeline execution.
//!
//! The [`Pipeline`] struct represents a validated sequence of stages that
//! can be executed together. Items are processed in order: each item flows
//! through every stage before the next item starts, so output order always
//! matches input order. The first stage error aborts the remaining stages
//! for the whole run.

use crate::error::{PipelineError, PipelineValidationError};
use crate::item::FileItem;
use crate::observer::{NoopObserver, PipelineObserver};
use crate::stage::PipelineStage;

/// A validated sequence of pipeline stages.
///
/// # Example
///
/// ```ignore
/// let stages: Vec<Box<dyn PipelineStage>> = vec![
///     Box::new(CompileStage::new(true)),
///     Box::new(WriteStage::new("dist")),
/// ];
///
/// let pipeline = Pipeline::new(stages)?;
/// let written = pipeline.run(items)?;
/// ```
pub struct Pipeline {
    stages: Vec<Box<dyn PipelineStage>>,
    observer: Box<dyn PipelineObserver>,
}

impl Pipeline {
    /// Create a new pipeline from stages.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineValidationError::Empty`] if the stage list is
    /// empty.
    pub fn new(stages: Vec<Box<dyn PipelineStage>>) -> Result<Self, PipelineValidationError> {
        if stages.is_empty() {
            return Err(PipelineValidationError::Empty);
        }

        Ok(Self {
            stages,
            observer: Box::new(NoopObserver),
        })
    }

    /// Replace the observer notified during [`run`](Self::run).
    pub fn with_observer(mut self, observer: Box<dyn PipelineObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Get the number of stages in the pipeline.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Check if the pipeline is empty (never true after construction).
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Get stage names for debugging.
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Run the pipeline over `items`.
    ///
    /// Items are processed in order and each passes through every stage in
    /// sequence. Returns the fully transformed items.
    ///
    /// # Errors
    ///
    /// Returns the first stage error; items after the failure point are
    /// not processed and nothing more is produced for this run.
    pub fn run(&self, items: Vec<FileItem>) -> Result<Vec<FileItem>, PipelineError> {
        let total = self.stages.len();
        self.observer.on_pipeline_start(total);

        let mut out = Vec::with_capacity(items.len());

        for mut item in items {
            for (idx, stage) in self.stages.iter().enumerate() {
                self.observer.on_stage_start(stage.name(), idx, total);

                match stage.run(item) {
                    Ok(next) => {
                        self.observer.on_stage_complete(stage.name(), idx, total);
                        item = next;
                    }
                    Err(e) => {
                        self.observer.on_stage_error(stage.name(), idx, &e);
                        self.observer.on_pipeline_error(&e);
                        return Err(e);
                    }
                }
            }
            out.push(item);
        }

        self.observer.on_pipeline_complete();
        Ok(out)
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("stages", &self.stage_names())
            .finish()
    }
}
