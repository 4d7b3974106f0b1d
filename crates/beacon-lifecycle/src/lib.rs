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

//! Diagnostics tap over the host state-management lifecycle.
//!
//! The host drives the [`StateObserver`] hooks for every managed state
//! container; the [`LifecycleObserver`] mirrors each hook into one debug log
//! line plus one breadcrumb, forwards errors to the reporter, and
//! re-propagates everything to an optional inner observer.

pub mod event;
pub mod observer;

pub use event::{BREADCRUMB_CATEGORY, LifecycleEvent, StateChange, StateTransition};
pub use observer::{LifecycleObserver, StateObserver};
