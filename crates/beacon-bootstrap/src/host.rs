//! Host runtime bindings configured by the bootstrapper.

use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

use async_trait::async_trait;

use beacon_lifecycle::StateObserver;

/// Synchronous fault surfaced by the host UI framework while building or
/// rendering. The framework has already contained the fault; it is handed
/// over purely for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameworkFault {
    /// Human-readable summary of the fault.
    pub summary: String,
    /// Stack trace captured by the framework, if any.
    pub stack_trace: Option<String>,
}

impl FrameworkFault {
    /// Create a fault with the given summary.
    #[must_use]
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            stack_trace: None,
        }
    }

    /// Attach the stack trace captured by the framework.
    #[must_use]
    pub fn with_stack_trace(mut self, stack_trace: impl Into<String>) -> Self {
        self.stack_trace = Some(stack_trace.into());
        self
    }
}

impl Display for FrameworkFault {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.summary)
    }
}

impl Error for FrameworkFault {}

/// Handler the host invokes for every synchronous framework fault.
pub type FaultHandler = Arc<dyn Fn(&FrameworkFault) + Send + Sync>;

/// Bindings to the UI runtime the bootstrapper configures exactly once per
/// run. Installing a handler or observer replaces any prior one; at most one
/// of each is active at a time.
#[async_trait]
pub trait HostRuntime: Send + Sync {
    /// Root value handed to the runtime when the application starts.
    type App: Send;

    /// Initialize the runtime bindings; safe to call multiple times.
    fn ensure_initialized(&self);

    /// Install the handler for synchronous framework faults.
    fn install_fault_handler(&self, handler: FaultHandler);

    /// Install the process-wide state observer.
    fn install_observer(&self, observer: Arc<dyn StateObserver>);

    /// Start the UI runtime with the built application root.
    ///
    /// # Errors
    ///
    /// Returns an error when the runtime fails to start or terminates
    /// abnormally.
    async fn run_app(&self, app: Self::App) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn framework_fault_displays_summary_only() {
        let fault = FrameworkFault::new("layout overflow").with_stack_trace("frame-a");
        assert_eq!(fault.to_string(), "layout overflow");
        assert_eq!(fault.stack_trace.as_deref(), Some("frame-a"));
    }
}
