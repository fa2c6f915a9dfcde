/*
 * observer.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Pipeline observer for tracing and progress reporting.
 */

//! Observer abstraction for pipeline execution events.
//!
//! The [`PipelineObserver`] trait lets the pipeline emit progress
//! notifications without depending on a specific observability backend.
//! All methods have empty default implementations, so observers implement
//! only the events they care about.

use crate::error::PipelineError;

/// Observer for pipeline execution events.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so a pipeline can be shared
/// across threads.
pub trait PipelineObserver: Send + Sync {
    /// Called once per run, before the first item enters the first stage.
    fn on_pipeline_start(&self, _total_stages: usize) {}

    /// Called when a stage begins processing an item.
    fn on_stage_start(&self, _name: &str, _index: usize, _total: usize) {}

    /// Called when a stage finishes an item successfully.
    fn on_stage_complete(&self, _name: &str, _index: usize, _total: usize) {}

    /// Called when a stage fails.
    fn on_stage_error(&self, _name: &str, _index: usize, _error: &PipelineError) {}

    /// Called when every item has passed every stage.
    fn on_pipeline_complete(&self) {}

    /// Called when the run aborts on a stage error.
    fn on_pipeline_error(&self, _error: &PipelineError) {}
}

/// No-op observer implementation.
///
/// The default observer used when no other is specified.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl NoopObserver {
    /// Create a new no-op observer.
    pub fn new() -> Self {
        Self
    }
}

impl PipelineObserver for NoopObserver {
    // All methods use default empty implementations
}

/// Observer that emits `tracing` events.
///
/// Stage-level notifications go out at debug level; callers that log their
/// own task-level events keep the info stream uncluttered.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl TracingObserver {
    /// Create a new tracing observer.
    pub fn new() -> Self {
        Self
    }
}

impl PipelineObserver for TracingObserver {
    fn on_pipeline_start(&self, total_stages: usize) {
        tracing::debug!(total_stages, "starting pipeline");
    }

    fn on_stage_start(&self, name: &str, index: usize, total: usize) {
        tracing::debug!(
            stage.name = name,
            stage.index = index,
            stage.total = total,
            "starting stage"
        );
    }

    fn on_stage_complete(&self, name: &str, index: usize, total: usize) {
        tracing::debug!(
            stage.name = name,
            stage.index = index,
            stage.total = total,
            "completed stage"
        );
    }

    fn on_stage_error(&self, name: &str, index: usize, error: &PipelineError) {
        tracing::error!(stage.name = name, stage.index = index, error = %error, "stage failed");
    }

    fn on_pipeline_complete(&self) {
        tracing::debug!("pipeline completed");
    }

    fn on_pipeline_error(&self, error: &PipelineError) {
        tracing::error!(error = %error, "pipeline failed");
    }
}
