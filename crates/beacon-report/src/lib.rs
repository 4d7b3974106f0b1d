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

//! Error-reporting scope and the reporter capability contract.
//!
//! Layout: `scope.rs` (breadcrumb/context/tag/user state and snapshots),
//! `reporter.rs` (the [`ErrorReporter`] contract plus the no-op backend),
//! `debug.rs` (the reference backend that renders to the local log).

pub mod debug;
pub mod reporter;
pub mod scope;

pub use debug::DebugErrorReporter;
pub use reporter::{ErrorReporter, NoopReporter, ReporterOptions};
pub use scope::{
    Breadcrumb, DEFAULT_BREADCRUMB_CAPACITY, ReportUser, Scope, ScopeSnapshot,
};
