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

//! Supervised boot sequence for a Beacon-instrumented application.
//!
//! The [`Bootstrapper`] initialises the host runtime bindings, installs the
//! global fault handler and the lifecycle observer, awaits the caller's
//! initializer, and hands the built application root to the host — all
//! inside one guarded zone that reports anything escaping it exactly once.

pub mod bootstrap;
pub mod error;
pub mod host;

pub use bootstrap::{BootstrapDependencies, Bootstrapper};
pub use error::{BootError, BootResult};
pub use host::{FaultHandler, FrameworkFault, HostRuntime};
