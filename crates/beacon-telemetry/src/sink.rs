//! Diagnostic sinks that receive formatted log records.
//!
//! # Design
//! - Sinks are infallible by contract; a sink that can fail internally must
//!   contain the failure rather than surface it to the logging path.
//! - The console sink bridges records onto the process-wide `tracing`
//!   subscriber; the memory sink retains a bounded ring for replay surfaces
//!   and test assertions.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::logger::LogRecord;
use crate::severity::Severity;

/// Default number of records retained by [`MemorySink`].
const DEFAULT_MEMORY_CAPACITY: usize = 1_024;

/// Collaborator that accepts fully formatted log records.
pub trait DiagnosticSink: Send + Sync {
    /// Deliver one record to the underlying destination.
    fn emit(&self, record: &LogRecord);
}

/// Sink that forwards records to the installed `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl ConsoleSink {
    /// Construct a console sink.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl DiagnosticSink for ConsoleSink {
    fn emit(&self, record: &LogRecord) {
        let error = record.error.as_deref();
        let stack_trace = record.stack_trace.as_deref();
        match record.severity {
            Severity::Debug => tracing::debug!(
                component = %record.name,
                level = record.level,
                error,
                stack_trace,
                "{}",
                record.message
            ),
            Severity::Info => tracing::info!(
                component = %record.name,
                level = record.level,
                error,
                stack_trace,
                "{}",
                record.message
            ),
            Severity::Warning => tracing::warn!(
                component = %record.name,
                level = record.level,
                error,
                stack_trace,
                "{}",
                record.message
            ),
            Severity::Error | Severity::Fatal => tracing::error!(
                component = %record.name,
                level = record.level,
                error,
                stack_trace,
                "{}",
                record.message
            ),
        }
    }
}

/// Sink that retains recent records in a bounded in-memory ring.
///
/// When the ring is full the oldest record is dropped, so a long-lived
/// process never grows without bound.
#[derive(Debug)]
pub struct MemorySink {
    records: Mutex<VecDeque<LogRecord>>,
    capacity: usize,
}

impl MemorySink {
    /// Construct a sink with the default retention capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MEMORY_CAPACITY)
    }

    /// Construct a sink retaining at most `capacity` records.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "memory sink capacity must be positive");
        Self {
            records: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    /// Snapshot of the retained records, oldest first.
    #[must_use]
    pub fn records(&self) -> Vec<LogRecord> {
        self.lock().iter().cloned().collect()
    }

    /// Messages of the retained records, oldest first.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.lock().iter().map(|record| record.message.clone()).collect()
    }

    /// Retained records carrying the given routing name, oldest first.
    #[must_use]
    pub fn records_named(&self, name: &str) -> Vec<LogRecord> {
        self.lock()
            .iter()
            .filter(|record| record.name == name)
            .cloned()
            .collect()
    }

    /// Drop every retained record.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<LogRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, record: &LogRecord) {
        let mut records = self.lock();
        if records.len() == self.capacity {
            records.pop_front();
        }
        records.push_back(record.clone());
    }
}
