//! Task configuration.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! Configuration is resolved once per factory call: caller-supplied
//! [`TaskOptions`] are merged key-by-key over the defaults, producing an
//! immutable [`TaskConfig`] the task carries for all of its runs.

use std::fmt;
use std::sync::Arc;

use crate::events::{BundleSink, EventSink, NoopBundleSink, TracingSink};

/// File name of the written bundle when no override is given.
pub const DEFAULT_BUNDLE_NAME: &str = "bundle.css";

/// Resolved task configuration.
#[derive(Clone)]
pub struct TaskConfig {
    /// Name of the written CSS bundle.
    pub bundle_name: String,

    /// Whether to produce minified CSS.
    ///
    /// Defaults to `true`.
    pub minified: bool,

    /// Sink for `start`/`end` progress events.
    pub log: Arc<dyn EventSink>,

    /// Sink for `error` events.
    pub log_error: Arc<dyn EventSink>,

    /// Consumer the final file stream is forwarded into.
    pub on_end: Arc<dyn BundleSink>,
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            bundle_name: DEFAULT_BUNDLE_NAME.to_string(),
            minified: true,
            log: Arc::new(TracingSink),
            log_error: Arc::new(TracingSink),
            on_end: Arc::new(NoopBundleSink),
        }
    }
}

impl TaskConfig {
    /// Merge caller overrides over the defaults. Set fields win key-by-key;
    /// unset fields keep their default.
    pub fn resolve(options: TaskOptions) -> Self {
        let defaults = Self::default();
        Self {
            bundle_name: options.bundle_name.unwrap_or(defaults.bundle_name),
            minified: options.minified.unwrap_or(defaults.minified),
            log: options.log.unwrap_or(defaults.log),
            log_error: options.log_error.unwrap_or(defaults.log_error),
            on_end: options.on_end.unwrap_or(defaults.on_end),
        }
    }
}

impl fmt::Debug for TaskConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskConfig")
            .field("bundle_name", &self.bundle_name)
            .field("minified", &self.minified)
            .field("log", &"<EventSink>")
            .field("log_error", &"<EventSink>")
            .field("on_end", &"<BundleSink>")
            .finish()
    }
}

/// Caller-supplied configuration overrides.
///
/// Every field is optional; unset fields fall back to the defaults
/// described on [`TaskConfig`].
#[derive(Clone, Default)]
pub struct TaskOptions {
    /// Override for [`TaskConfig::bundle_name`].
    pub bundle_name: Option<String>,
    /// Override for [`TaskConfig::minified`].
    pub minified: Option<bool>,
    /// Override for [`TaskConfig::log`].
    pub log: Option<Arc<dyn EventSink>>,
    /// Override for [`TaskConfig::log_error`].
    pub log_error: Option<Arc<dyn EventSink>>,
    /// Override for [`TaskConfig::on_end`].
    pub on_end: Option<Arc<dyn BundleSink>>,
}

impl fmt::Debug for TaskOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskOptions")
            .field("bundle_name", &self.bundle_name)
            .field("minified", &self.minified)
            .field("log", &self.log.as_ref().map(|_| "<EventSink>"))
            .field("log_error", &self.log_error.as_ref().map(|_| "<EventSink>"))
            .field("on_end", &self.on_end.as_ref().map(|_| "<BundleSink>"))
            .finish()
    }
}
