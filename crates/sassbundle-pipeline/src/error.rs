/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Pipeline error types.
 */

//! Error types for the file pipeline.
//!
//! [`PipelineValidationError`] covers errors in pipeline construction,
//! [`PipelineError`] covers errors during execution.

use thiserror::Error;

/// Error that occurs during pipeline validation (construction).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PipelineValidationError {
    /// Pipeline has no stages
    #[error("pipeline has no stages")]
    Empty,
}

/// Error that occurs during pipeline execution.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A stage failed while processing an item
    #[error("stage '{stage}' failed: {message}")]
    Stage { stage: String, message: String },

    /// I/O error during stage execution
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Pipeline validation failed
    #[error("pipeline validation error: {0}")]
    Validation(#[from] PipelineValidationError),
}

impl PipelineError {
    /// Create a stage failure with a message.
    pub fn stage(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Stage {
            stage: stage.into(),
            message: message.into(),
        }
    }
}
