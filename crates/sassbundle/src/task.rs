//! Task factory and run loop.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! [`create_sass_task`] validates its arguments, resolves configuration
//! once, and returns a [`SassTask`]. No work happens until
//! [`SassTask::run`]; each run is an independent pass through the
//! pipeline with no caching or de-duplication between runs.

use std::path::{Path, PathBuf};
use std::time::Instant;

use sassbundle_pipeline::{FileItem, Pipeline, PipelineError, PipelineStage, TracingObserver};

use crate::config::{TaskConfig, TaskOptions};
use crate::error::TaskError;
use crate::events::BuildEvent;
use crate::source;
use crate::stages::{
    CompileStage, FlattenStage, InlineStage, RebaseStage, RenameStage, WriteStage,
};

const MSG_START: &str = "Sass: starting";
const MSG_END: &str = "Sass: finished";
const MSG_ERROR: &str = "Sass: error";

/// Outcome of one task run.
///
/// A run never panics and never returns an error: failures are reported
/// through the configured error sink and surface here as [`Aborted`]
/// (callers that need the failure itself inspect the error sink).
///
/// [`Aborted`]: RunOutcome::Aborted
#[derive(Debug)]
pub enum RunOutcome {
    /// Every stage completed and the bundle was written.
    Completed {
        /// The written file items, in stream order.
        files: Vec<FileItem>,
    },
    /// The run hit the fault barrier and was terminated early; no further
    /// stages ran and nothing more was written.
    Aborted,
}

impl RunOutcome {
    /// Whether the run completed.
    pub fn is_completed(&self) -> bool {
        matches!(self, RunOutcome::Completed { .. })
    }
}

/// A runnable Sass build task produced by [`create_sass_task`].
#[derive(Debug)]
pub struct SassTask {
    input_path: String,
    output_path: PathBuf,
    config: TaskConfig,
}

/// Create a build task that compiles the Sass entry point(s) matched by
/// `input_path` into a single CSS bundle under `output_path`.
///
/// Construction only validates arguments and resolves configuration;
/// nothing runs (and nothing is touched on disk) until
/// [`SassTask::run`].
///
/// # Errors
///
/// Fails fast when `input_path` or `output_path` is empty, so
/// misconfiguration is caught before the task is registered anywhere.
///
/// # Example
///
/// ```ignore
/// use sassbundle::{TaskOptions, create_sass_task};
///
/// let task = create_sass_task("scss/main.scss", "dist", TaskOptions::default())?;
/// let outcome = task.run();
/// ```
pub fn create_sass_task(
    input_path: impl Into<String>,
    output_path: impl Into<PathBuf>,
    options: TaskOptions,
) -> Result<SassTask, TaskError> {
    let input_path = input_path.into();
    if input_path.is_empty() {
        return Err(TaskError::MissingInputPath);
    }

    let output_path = output_path.into();
    if output_path.as_os_str().is_empty() {
        return Err(TaskError::MissingOutputPath);
    }

    Ok(SassTask {
        input_path,
        output_path,
        config: TaskConfig::resolve(options),
    })
}

impl SassTask {
    /// The input path or glob pattern.
    pub fn input_path(&self) -> &str {
        &self.input_path
    }

    /// The destination directory.
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// The resolved configuration.
    pub fn config(&self) -> &TaskConfig {
        &self.config
    }

    /// Run one full build pass.
    ///
    /// Emits a `start` event, pushes every matched input through the
    /// pipeline (compile, rebase, flatten, inline, rename, write), then
    /// emits one `end` event per written file - each paired with this
    /// run's start marker - and forwards the file into the end-of-pipeline
    /// sink.
    ///
    /// Any pipeline failure is caught at the fault barrier, reported
    /// through the error sink as a single `error` event, and aborts the
    /// rest of the run.
    pub fn run(&self) -> RunOutcome {
        let start_time = Instant::now();
        self.config
            .log
            .emit(&BuildEvent::start(MSG_START, start_time));

        match self.execute() {
            Ok(files) => {
                for file in &files {
                    self.config
                        .log
                        .emit(&BuildEvent::end(MSG_END, Instant::now(), start_time));
                    self.config.on_end.forward(file);
                }
                RunOutcome::Completed { files }
            }
            Err(err) => {
                self.config
                    .log_error
                    .emit(&BuildEvent::error(MSG_ERROR, Instant::now(), err));
                RunOutcome::Aborted
            }
        }
    }

    fn execute(&self) -> Result<Vec<FileItem>, PipelineError> {
        let items = source::resolve(&self.input_path)?;

        let stages: Vec<Box<dyn PipelineStage>> = vec![
            Box::new(CompileStage::new(self.config.minified)),
            Box::new(RebaseStage),
            Box::new(FlattenStage),
            Box::new(InlineStage),
            Box::new(RenameStage::new(self.config.bundle_name.clone())),
            Box::new(WriteStage::new(&self.output_path)),
        ];

        let pipeline = Pipeline::new(stages)?.with_observer(Box::new(TracingObserver));
        pipeline.run(items)
    }
}
