//! Build events and sinks.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! A running task reports progress as [`BuildEvent`] records pushed into
//! caller-supplied [`EventSink`]s, and forwards the finished bundle into a
//! [`BundleSink`]. Defaults route events to `tracing` and drop the final
//! stream ([`NoopBundleSink`]), matching a build loop that only wants logs.
//!
//! Timestamps are [`Instant`]s: monotonic markers suitable for pairing an
//! `End` event with the `Start` it belongs to and for computing durations,
//! not wall-clock times.

use std::time::{Duration, Instant};

use sassbundle_pipeline::{FileItem, PipelineError};

/// Kind of a build event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// A run began
    Start,
    /// A file finished the whole pipeline
    End,
    /// A run aborted at the fault barrier
    Error,
}

impl EventKind {
    /// Convert to a string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Start => "start",
            EventKind::End => "end",
            EventKind::Error => "error",
        }
    }
}

/// Structured log payload emitted while a task runs.
#[derive(Debug)]
pub struct BuildEvent {
    /// Human-readable message
    pub message: String,
    /// What happened
    pub kind: EventKind,
    /// Monotonic marker for when the event was emitted
    pub timestamp: Instant,
    /// For `End` events, the marker captured when the run started
    pub start_time: Option<Instant>,
    /// For `Error` events, the underlying failure
    pub error: Option<PipelineError>,
}

impl BuildEvent {
    /// A `Start` event.
    pub fn start(message: impl Into<String>, timestamp: Instant) -> Self {
        Self {
            message: message.into(),
            kind: EventKind::Start,
            timestamp,
            start_time: None,
            error: None,
        }
    }

    /// An `End` event paired with the run's start marker.
    pub fn end(message: impl Into<String>, timestamp: Instant, start_time: Instant) -> Self {
        Self {
            message: message.into(),
            kind: EventKind::End,
            timestamp,
            start_time: Some(start_time),
            error: None,
        }
    }

    /// An `Error` event carrying the failure.
    pub fn error(message: impl Into<String>, timestamp: Instant, error: PipelineError) -> Self {
        Self {
            message: message.into(),
            kind: EventKind::Error,
            timestamp,
            start_time: None,
            error: Some(error),
        }
    }

    /// Time elapsed since the run started, for `End` events.
    pub fn elapsed(&self) -> Option<Duration> {
        self.start_time
            .map(|start| self.timestamp.duration_since(start))
    }
}

/// Sink receiving build events.
pub trait EventSink: Send + Sync {
    /// Handle one event.
    fn emit(&self, event: &BuildEvent);
}

impl<F> EventSink for F
where
    F: Fn(&BuildEvent) + Send + Sync,
{
    fn emit(&self, event: &BuildEvent) {
        self(event)
    }
}

/// Default sink: forwards events to `tracing` at a level matching the kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TracingSink {
    /// Create a new tracing sink.
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for TracingSink {
    fn emit(&self, event: &BuildEvent) {
        match event.kind {
            EventKind::Start => {
                tracing::info!(event = event.kind.as_str(), "{}", event.message);
            }
            EventKind::End => {
                let elapsed_ms = event.elapsed().map(|d| d.as_millis() as u64);
                tracing::info!(
                    event = event.kind.as_str(),
                    elapsed_ms,
                    "{}",
                    event.message
                );
            }
            EventKind::Error => match &event.error {
                Some(err) => {
                    tracing::error!(event = event.kind.as_str(), error = %err, "{}", event.message);
                }
                None => {
                    tracing::error!(event = event.kind.as_str(), "{}", event.message);
                }
            },
        }
    }
}

/// Consumer the final file stream is forwarded into.
///
/// The extension point for chaining further processing after the bundle is
/// written: copying to additional destinations, triggering live-reload
/// notifications, and so on.
pub trait BundleSink: Send + Sync {
    /// Receive one finished file.
    fn forward(&self, item: &FileItem);
}

impl<F> BundleSink for F
where
    F: Fn(&FileItem) + Send + Sync,
{
    fn forward(&self, item: &FileItem) {
        self(item)
    }
}

/// Default end-of-pipeline sink: identity passthrough, does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopBundleSink;

impl NoopBundleSink {
    /// Create a new no-op sink.
    pub fn new() -> Self {
        Self
    }
}

impl BundleSink for NoopBundleSink {
    fn forward(&self, _item: &FileItem) {}
}
