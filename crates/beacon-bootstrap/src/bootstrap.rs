//! Supervised boot sequence for the host application.
//!
//! # Design
//! - Strictly ordered startup; each step completes before the next begins.
//! - One guarded zone catches everything the inner steps let escape,
//!   including panics; nothing is reported more than once.
//! - Failures are never retried; a failed boot is fatal to the run.

use std::any::Any;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use beacon_lifecycle::LifecycleObserver;
use beacon_report::{ErrorReporter, ReporterOptions};
use beacon_telemetry::{Logger, Severity};

use crate::error::{BootError, BootResult};
use crate::host::{FrameworkFault, HostRuntime};

/// Boxed caller-supplied asynchronous initializer.
type InitHook = Box<dyn FnOnce() -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send>> + Send>;

/// Collaborators required to boot the application.
pub struct BootstrapDependencies {
    /// Process logger, cloned into every installed handler.
    pub logger: Logger,
    /// Reporting backend shared by every diagnostic surface.
    pub reporter: Arc<dyn ErrorReporter>,
    /// Options consumed by the reporter during initialization.
    pub reporter_options: ReporterOptions,
}

impl BootstrapDependencies {
    /// Bundle a logger and reporter with default reporter options.
    #[must_use]
    pub fn new(logger: Logger, reporter: Arc<dyn ErrorReporter>) -> Self {
        Self {
            logger,
            reporter,
            reporter_options: ReporterOptions::default(),
        }
    }

    /// Override the options handed to the reporter.
    #[must_use]
    pub fn with_reporter_options(mut self, options: ReporterOptions) -> Self {
        self.reporter_options = options;
        self
    }
}

/// Orchestrates runtime initialization, global fault handling, observer
/// installation, and application startup.
pub struct Bootstrapper<H: HostRuntime> {
    host: Arc<H>,
    dependencies: BootstrapDependencies,
    on_initialize: Option<InitHook>,
}

impl<H> Bootstrapper<H>
where
    H: HostRuntime + 'static,
    H::App: 'static,
{
    /// Create a bootstrapper for the given host and collaborators.
    #[must_use]
    pub fn new(host: Arc<H>, dependencies: BootstrapDependencies) -> Self {
        Self {
            host,
            dependencies,
            on_initialize: None,
        }
    }

    /// Register an asynchronous initializer awaited before the application
    /// root is built. An error it returns aborts the boot; the application
    /// builder is never invoked in that case.
    #[must_use]
    pub fn on_initialize<F, Fut>(mut self, hook: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.on_initialize = Some(Box::new(move || Box::pin(hook())));
        self
    }

    /// Run the boot sequence and hand control to the host runtime.
    ///
    /// The sequence is strictly ordered: runtime bindings, fault handler,
    /// guarded zone, reporter initialization, observer installation, the
    /// caller's initializer, then the application builder and host start.
    ///
    /// # Errors
    ///
    /// Returns the error that aborted the boot after logging it at fatal
    /// severity and forwarding it to the reporter exactly once.
    pub async fn run<B, Fut>(self, app_builder: B) -> BootResult<()>
    where
        B: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = H::App> + Send + 'static,
    {
        let Self {
            host,
            dependencies,
            on_initialize,
        } = self;
        let BootstrapDependencies {
            logger,
            reporter,
            reporter_options,
        } = dependencies;

        host.ensure_initialized();
        install_fault_handler(host.as_ref(), &logger, &reporter);

        logger.info("application bootstrap starting");

        let zone = {
            let host = Arc::clone(&host);
            let logger = logger.clone();
            let reporter = Arc::clone(&reporter);
            tokio::spawn(boot_zone(
                host,
                logger,
                reporter,
                reporter_options,
                on_initialize,
                app_builder,
            ))
        };

        let outcome = match zone.await {
            Ok(outcome) => outcome,
            Err(join_error) => Err(match join_error.try_into_panic() {
                Ok(payload) => BootError::Panicked {
                    message: render_panic_payload(payload.as_ref()),
                },
                Err(join_error) => BootError::supervisor("boot_zone.join", join_error),
            }),
        };

        match outcome {
            Ok(()) => {
                logger.info("application bootstrap complete");
                Ok(())
            }
            Err(error) => {
                logger.log_failure(
                    Severity::Fatal,
                    "application bootstrap aborted",
                    &error,
                    None,
                );
                reporter.report_error(&error, None);
                Err(error)
            }
        }
    }
}

/// Guarded portion of the boot sequence; everything it returns or panics
/// with is funnelled to the caller's single failure path.
async fn boot_zone<H, B, Fut>(
    host: Arc<H>,
    logger: Logger,
    reporter: Arc<dyn ErrorReporter>,
    reporter_options: ReporterOptions,
    on_initialize: Option<InitHook>,
    app_builder: B,
) -> BootResult<()>
where
    H: HostRuntime,
    B: FnOnce() -> Fut + Send,
    Fut: Future<Output = H::App> + Send,
{
    reporter.initialize(reporter_options).await;

    let observer = LifecycleObserver::new(&logger, Arc::clone(&reporter));
    host.install_observer(Arc::new(observer));

    if let Some(hook) = on_initialize {
        hook()
            .await
            .map_err(|source| BootError::initialize("on_initialize", source))?;
    }

    let app = app_builder().await;
    host.run_app(app)
        .await
        .map_err(|source| BootError::host("host.run_app", source))?;
    Ok(())
}

fn install_fault_handler<H: HostRuntime>(
    host: &H,
    logger: &Logger,
    reporter: &Arc<dyn ErrorReporter>,
) {
    let logger = logger.clone();
    let reporter = Arc::clone(reporter);
    host.install_fault_handler(Arc::new(move |fault: &FrameworkFault| {
        logger.log_failure(
            Severity::Error,
            "framework fault",
            fault,
            fault.stack_trace.as_deref(),
        );
        reporter.report_error(fault, fault.stack_trace.as_deref());
    }));
}

fn render_panic_payload(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<String>() {
        return text.clone();
    }
    if let Some(text) = payload.downcast_ref::<&str>() {
        return (*text).to_owned();
    }
    "opaque panic payload".to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panic_payload_renders_string_and_str() {
        let owned: Box<dyn Any + Send> = Box::new("boom".to_owned());
        assert_eq!(render_panic_payload(owned.as_ref()), "boom");

        let borrowed: Box<dyn Any + Send> = Box::new("bang");
        assert_eq!(render_panic_payload(borrowed.as_ref()), "bang");

        let opaque: Box<dyn Any + Send> = Box::new(42_u32);
        assert_eq!(render_panic_payload(opaque.as_ref()), "opaque panic payload");
    }
}
