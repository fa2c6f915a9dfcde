//! Sass bundling build task.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! This crate provides:
//! - A task factory ([`create_sass_task`]) that validates its arguments and
//!   returns a runnable [`SassTask`]
//! - Build events ([`BuildEvent`]) with pluggable sinks
//! - The concrete pipeline stages: compile, rebase, flatten, inline,
//!   rename, write
//!
//! One [`SassTask::run`] call compiles the Sass entry point(s) matched by
//! the input path into a single CSS bundle with all `url(...)` resource
//! references inlined as base64 data URIs, written under the output
//! directory. Pipeline failures are reported through the configured error
//! sink rather than raised, so a long-lived build loop survives bad input.

mod config;
mod error;
mod events;
mod source;
mod stages;
mod task;

pub use config::{DEFAULT_BUNDLE_NAME, TaskConfig, TaskOptions};
pub use error::TaskError;
pub use events::{BuildEvent, BundleSink, EventKind, EventSink, NoopBundleSink, TracingSink};
pub use task::{RunOutcome, SassTask, create_sass_task};

// Re-export the pipeline types callers interact with.
pub use sassbundle_pipeline::{FileItem, Pipeline, PipelineError, PipelineStage};

// Re-export concrete stages for callers assembling their own pipelines.
pub use stages::{CompileStage, FlattenStage, InlineStage, RebaseStage, RenameStage, WriteStage};
