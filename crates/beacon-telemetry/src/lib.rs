#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]

//! Telemetry primitives shared across the Beacon workspace.
//!
//! This crate centralises the severity scale, the structured logger, the
//! diagnostic sink contract, and the tracing pipeline installation so every
//! Beacon surface reports diagnostics the same way.

pub mod error;
pub mod init;
pub mod logger;
pub mod severity;
pub mod sink;

pub use error::{TelemetryError, TelemetryResult};
pub use init::{BuildMode, DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, app_identity, init_logging};
pub use logger::{DEFAULT_LOGGER_NAME, LogRecord, Logger};
pub use severity::Severity;
pub use sink::{ConsoleSink, DiagnosticSink, MemorySink};
