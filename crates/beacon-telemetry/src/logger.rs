//! Structured logger and record formatting.
//!
//! # Design
//! - One logger per process, constructed at startup and passed explicitly.
//! - Child loggers carry a routing name; records stay otherwise identical.
//! - The emit path is infallible so logging can never become a fault itself.

use std::fmt::{self, Display};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::severity::Severity;
use crate::sink::DiagnosticSink;

/// Routing name applied when a logger is not given a more specific one.
pub const DEFAULT_LOGGER_NAME: &str = "Application";

/// Fully formatted record handed to a [`DiagnosticSink`].
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct LogRecord {
    /// Message text, already prefixed with the severity tag.
    pub message: String,
    /// Moment the record was created.
    pub timestamp: DateTime<Utc>,
    /// Numeric level for sink-side filtering.
    pub level: i64,
    /// Severity that produced the record.
    pub severity: Severity,
    /// Routing name identifying the component that logged.
    pub name: String,
    /// Rendered error attached to the record, if any.
    pub error: Option<String>,
    /// Stack trace attached to the record, if any.
    pub stack_trace: Option<String>,
}

/// Structured logger emitting formatted records to a diagnostic sink.
#[derive(Clone)]
pub struct Logger {
    sink: Arc<dyn DiagnosticSink>,
    name: Arc<str>,
}

impl Logger {
    /// Construct a logger emitting to `sink` under the default routing name.
    #[must_use]
    pub fn new(sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            sink,
            name: Arc::from(DEFAULT_LOGGER_NAME),
        }
    }

    /// Derive a child logger whose records carry `name` as their routing tag.
    #[must_use]
    pub fn named(&self, name: &str) -> Self {
        Self {
            sink: Arc::clone(&self.sink),
            name: Arc::from(name),
        }
    }

    /// Routing name carried by this logger's records.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Record a debug-severity message.
    pub fn debug(&self, message: &str) {
        self.log(Severity::Debug, message);
    }

    /// Record an info-severity message.
    pub fn info(&self, message: &str) {
        self.log(Severity::Info, message);
    }

    /// Record a warning-severity message.
    pub fn warning(&self, message: &str) {
        self.log(Severity::Warning, message);
    }

    /// Record an error-severity message.
    pub fn error(&self, message: &str) {
        self.log(Severity::Error, message);
    }

    /// Record a fatal-severity message.
    pub fn fatal(&self, message: &str) {
        self.log(Severity::Fatal, message);
    }

    /// Record a message at an explicit severity.
    pub fn log(&self, severity: Severity, message: &str) {
        self.emit(severity, message, None, None);
    }

    /// Record a message together with the failure that caused it.
    pub fn log_failure(
        &self,
        severity: Severity,
        message: &str,
        error: &dyn Display,
        stack_trace: Option<&str>,
    ) {
        self.emit(
            severity,
            message,
            Some(error.to_string()),
            stack_trace.map(str::to_owned),
        );
    }

    fn emit(
        &self,
        severity: Severity,
        message: &str,
        error: Option<String>,
        stack_trace: Option<String>,
    ) {
        let record = LogRecord {
            message: format!("[{}] {message}", severity.label()),
            timestamp: Utc::now(),
            level: severity.numeric_level(),
            severity,
            name: self.name.as_ref().to_owned(),
            error,
            stack_trace,
        };
        self.sink.emit(&record);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Logger")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;

    fn capture() -> (Arc<MemorySink>, Logger) {
        let sink = Arc::new(MemorySink::new());
        let logger = Logger::new(Arc::clone(&sink) as Arc<dyn DiagnosticSink>);
        (sink, logger)
    }

    #[test]
    fn every_severity_prefixes_and_levels_records() {
        let (sink, logger) = capture();
        for severity in Severity::ALL {
            logger.log(severity, "ping");
        }

        let records = sink.records();
        assert_eq!(records.len(), Severity::ALL.len());
        for (record, severity) in records.iter().zip(Severity::ALL) {
            assert_eq!(record.message, format!("[{}] ping", severity.label()));
            assert_eq!(record.level, severity.numeric_level());
            assert_eq!(record.severity, severity);
            assert_eq!(record.name, DEFAULT_LOGGER_NAME);
        }
    }

    #[test]
    fn named_child_keeps_sink_and_swaps_routing_tag() {
        let (sink, logger) = capture();
        logger.named("bloc").debug("observed");

        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "bloc");
        assert_eq!(logger.name(), DEFAULT_LOGGER_NAME);
    }

    #[test]
    fn log_failure_carries_error_and_stack_trace() {
        let (sink, logger) = capture();
        let failure = std::io::Error::other("sink exploded");
        logger.log_failure(Severity::Error, "write failed", &failure, Some("frame-a\nframe-b"));

        let records = sink.records();
        assert_eq!(records[0].error.as_deref(), Some("sink exploded"));
        assert_eq!(records[0].stack_trace.as_deref(), Some("frame-a\nframe-b"));
        assert_eq!(records[0].message, "[ERROR] write failed");
    }
}
