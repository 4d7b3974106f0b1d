//! Stub host runtime shared by the boot-sequence suites.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use beacon_bootstrap::{FaultHandler, FrameworkFault, HostRuntime};
use beacon_lifecycle::StateObserver;

/// Host double that records every binding the bootstrapper configures.
#[derive(Default)]
pub struct StubHost {
    init_transitions: AtomicUsize,
    init_calls: AtomicUsize,
    observer: Mutex<Option<Arc<dyn StateObserver>>>,
    fault_handler: Mutex<Option<FaultHandler>>,
    launched: Mutex<Vec<String>>,
    run_failure: Mutex<Option<String>>,
}

impl StubHost {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Times `ensure_initialized` actually changed state.
    pub fn init_transitions(&self) -> usize {
        self.init_transitions.load(Ordering::SeqCst)
    }

    /// Times `ensure_initialized` was called.
    pub fn init_calls(&self) -> usize {
        self.init_calls.load(Ordering::SeqCst)
    }

    /// The currently installed observer, if any.
    pub fn observer(&self) -> Option<Arc<dyn StateObserver>> {
        lock(&self.observer).clone()
    }

    /// Application roots handed to `run_app`, in order.
    pub fn launched(&self) -> Vec<String> {
        lock(&self.launched).clone()
    }

    /// Make the next `run_app` call fail with `message`.
    pub fn fail_next_run(&self, message: &str) {
        *lock(&self.run_failure) = Some(message.to_owned());
    }

    /// Invoke the installed fault handler the way the framework would.
    pub fn raise_fault(&self, fault: &FrameworkFault) {
        let handler = lock(&self.fault_handler).clone();
        let handler = handler.expect("no fault handler installed");
        handler(fault);
    }

    /// Replace the observer slot directly, as a second bootstrap run would.
    pub fn install_replacement_observer(&self, observer: Arc<dyn StateObserver>) {
        *lock(&self.observer) = Some(observer);
    }
}

#[async_trait]
impl HostRuntime for StubHost {
    type App = String;

    fn ensure_initialized(&self) {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        if self.init_transitions.load(Ordering::SeqCst) == 0 {
            self.init_transitions.store(1, Ordering::SeqCst);
        }
    }

    fn install_fault_handler(&self, handler: FaultHandler) {
        *lock(&self.fault_handler) = Some(handler);
    }

    fn install_observer(&self, observer: Arc<dyn StateObserver>) {
        *lock(&self.observer) = Some(observer);
    }

    async fn run_app(&self, app: String) -> anyhow::Result<()> {
        lock(&self.launched).push(app);
        match lock(&self.run_failure).take() {
            Some(message) => Err(anyhow::anyhow!(message)),
            None => Ok(()),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
