//! Observer hooks and the diagnostics tap implementation.
//!
//! # Design
//! - Hooks are synchronous callbacks; the tap must never block the emitter.
//! - Errors are forwarded to the reporter and then re-propagated to the
//!   wrapped inner observer, never swallowed or transformed.

use std::error::Error;
use std::sync::Arc;

use beacon_report::ErrorReporter;
use beacon_telemetry::{Logger, Severity};

use crate::event::{LifecycleEvent, StateChange, StateTransition};

/// Hook contract the host state-management layer drives for every managed
/// container. All hooks default to no-ops so observers implement only what
/// they need.
pub trait StateObserver: Send + Sync {
    /// A container was created.
    fn on_create(&self, container: &str) {
        let _ = container;
    }

    /// A container received an event object.
    fn on_event(&self, container: &str, event: &str) {
        let _ = (container, event);
    }

    /// A container's state changed.
    fn on_change(&self, container: &str, change: &StateChange) {
        let _ = (container, change);
    }

    /// A container transitioned in response to an event.
    fn on_transition(&self, container: &str, transition: &StateTransition) {
        let _ = (container, transition);
    }

    /// A container was closed.
    fn on_close(&self, container: &str) {
        let _ = container;
    }

    /// A container's handling logic raised an error.
    fn on_error(&self, container: &str, error: &dyn Error, stack_trace: Option<&str>) {
        let _ = (container, error, stack_trace);
    }
}

/// Observer that mirrors every lifecycle hook into the diagnostics pipeline.
///
/// A pure tap: each non-error hook becomes one debug log line and one
/// breadcrumb; `on_error` is logged at error severity, forwarded to the
/// reporter, and then handed to the inner observer so outer supervision is
/// not short-circuited.
pub struct LifecycleObserver {
    logger: Logger,
    reporter: Arc<dyn ErrorReporter>,
    inner: Option<Arc<dyn StateObserver>>,
}

impl LifecycleObserver {
    /// Create an observer logging under the lifecycle routing name.
    #[must_use]
    pub fn new(logger: &Logger, reporter: Arc<dyn ErrorReporter>) -> Self {
        Self {
            logger: logger.named("bloc"),
            reporter,
            inner: None,
        }
    }

    /// Wrap an inner observer that receives every hook after the tap.
    #[must_use]
    pub fn with_inner(mut self, inner: Arc<dyn StateObserver>) -> Self {
        self.inner = Some(inner);
        self
    }

    fn observe(&self, event: &LifecycleEvent) {
        self.logger.debug(&event.describe());
        self.reporter.add_breadcrumb(event.to_breadcrumb());
    }
}

impl StateObserver for LifecycleObserver {
    fn on_create(&self, container: &str) {
        self.observe(&LifecycleEvent::Created {
            container: container.to_owned(),
        });
        if let Some(inner) = &self.inner {
            inner.on_create(container);
        }
    }

    fn on_event(&self, container: &str, event: &str) {
        self.observe(&LifecycleEvent::Dispatched {
            container: container.to_owned(),
            event: event.to_owned(),
        });
        if let Some(inner) = &self.inner {
            inner.on_event(container, event);
        }
    }

    fn on_change(&self, container: &str, change: &StateChange) {
        self.observe(&LifecycleEvent::Changed {
            container: container.to_owned(),
            change: change.clone(),
        });
        if let Some(inner) = &self.inner {
            inner.on_change(container, change);
        }
    }

    fn on_transition(&self, container: &str, transition: &StateTransition) {
        self.observe(&LifecycleEvent::Transitioned {
            container: container.to_owned(),
            transition: transition.clone(),
        });
        if let Some(inner) = &self.inner {
            inner.on_transition(container, transition);
        }
    }

    fn on_close(&self, container: &str) {
        self.observe(&LifecycleEvent::Closed {
            container: container.to_owned(),
        });
        if let Some(inner) = &self.inner {
            inner.on_close(container);
        }
    }

    fn on_error(&self, container: &str, error: &dyn Error, stack_trace: Option<&str>) {
        self.logger.log_failure(
            Severity::Error,
            &format!("onError -- {container}"),
            &error,
            stack_trace,
        );
        self.reporter.report_error(error, stack_trace);
        if let Some(inner) = &self.inner {
            inner.on_error(container, error, stack_trace);
        }
    }
}
