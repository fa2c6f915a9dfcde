//! Error types for task construction.
//!
//! Copyright (c) 2025 Posit, PBC

use thiserror::Error;

/// Errors raised when a task is created with invalid arguments.
///
/// These fail fast at construction so misconfiguration is caught before a
/// task is ever registered with a build orchestrator. Run-time pipeline
/// failures are reported through the error sink instead; see
/// [`SassTask::run`](crate::SassTask::run).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TaskError {
    /// The input path argument was empty
    #[error("input path argument is required")]
    MissingInputPath,

    /// The output path argument was empty
    #[error("output path argument is required")]
    MissingOutputPath,
}
