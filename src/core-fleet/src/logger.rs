//! Severity-gated logging facade.
//!
//! In development everything is forwarded. In production only errors get through,
//! and they go to whatever [`LogSink`] was injected. An external error tracker
//! plugs in as a sink; none ships with the crate.

use std::fmt::{self, Display};
use std::sync::Arc;

use crate::config::BuildMode;

/// Ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Debug,
    Log,
    Warn,
    Error,
}

impl Severity {
    /// Lowest severity that is still emitted in the given build mode.
    pub fn minimum_for(mode: BuildMode) -> Self {
        match mode {
            BuildMode::Development => Self::Debug,
            BuildMode::Production => Self::Error,
        }
    }
}

/// Destination for messages that pass the severity gate.
pub trait LogSink: Send + Sync {
    fn write(&self, severity: Severity, message: &str);
}

/// Forwards to the `tracing` macros. `Log` maps to `info`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn write(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Debug => tracing::debug!("{}", message),
            Severity::Log => tracing::info!("{}", message),
            Severity::Warn => tracing::warn!("{}", message),
            Severity::Error => tracing::error!("{}", message),
        }
    }
}

#[derive(Clone)]
pub struct Logger {
    min_severity: Severity,
    sink: Arc<dyn LogSink>,
}

impl Logger {
    pub fn new(min_severity: Severity, sink: Arc<dyn LogSink>) -> Self {
        Self { min_severity, sink }
    }

    /// Tracing-backed logger with the build mode's minimum severity.
    pub fn for_mode(mode: BuildMode) -> Self {
        Self::new(Severity::minimum_for(mode), Arc::new(TracingSink))
    }

    pub fn min_severity(&self) -> Severity {
        self.min_severity
    }

    pub fn is_enabled(&self, severity: Severity) -> bool {
        severity >= self.min_severity
    }

    pub fn log(&self, args: &[&dyn Display]) {
        self.emit(Severity::Log, args)
    }

    pub fn error(&self, args: &[&dyn Display]) {
        self.emit(Severity::Error, args)
    }

    pub fn warn(&self, args: &[&dyn Display]) {
        self.emit(Severity::Warn, args)
    }

    pub fn debug(&self, args: &[&dyn Display]) {
        self.emit(Severity::Debug, args)
    }

    fn emit(&self, severity: Severity, args: &[&dyn Display]) {
        if !self.is_enabled(severity) {
            return;
        }
        let message = args.iter().map(|a| a.to_string()).collect::<Vec<_>>().join(" ");
        self.sink.write(severity, &message);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger").field("min_severity", &self.min_severity).finish_non_exhaustive()
    }
}
