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

//! Shared test helpers used across the Beacon integration suites.
//! Layout: fixtures.rs (scope value builders), mocks.rs (recording reporter).

pub mod fixtures;
pub mod mocks;

pub use fixtures::{options_ignoring, sample_breadcrumb, sample_user};
pub use mocks::{RecordingReporter, ReporterCall};
