//! Error reporter capability contract and the no-op backend.

use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;

use async_trait::async_trait;
use serde_json::Value;

use beacon_telemetry::Severity;

use crate::scope::{Breadcrumb, ReportUser};

/// Configuration consumed once when a reporter is initialized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReporterOptions {
    /// Whether backends that submit reports externally stay active in debug
    /// builds. The reference backend ignores this; it renders locally.
    pub enable_in_debug_mode: bool,
    /// Patterns matched against rendered errors; matching errors are dropped.
    pub ignored_errors: BTreeSet<String>,
}

impl ReporterOptions {
    /// Create options with the documented defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable external submission from debug builds.
    #[must_use]
    pub fn enabled_in_debug_mode(mut self) -> Self {
        self.enable_in_debug_mode = true;
        self
    }

    /// Add an ignored-error pattern.
    #[must_use]
    pub fn ignore(mut self, pattern: impl Into<String>) -> Self {
        self.ignored_errors.insert(pattern.into());
        self
    }

    /// Whether the rendered error text matches an ignored pattern.
    #[must_use]
    pub fn is_ignored(&self, rendered: &str) -> bool {
        self.ignored_errors
            .iter()
            .any(|pattern| rendered.contains(pattern.as_str()))
    }
}

/// Capability contract every error-reporting backend implements.
///
/// Backends never surface failures to callers: a reporting problem is logged
/// locally and swallowed so diagnostics cannot become a second fault. Calling
/// any operation before [`ErrorReporter::initialize`] must not crash the
/// host; what such calls record is backend-defined.
#[async_trait]
pub trait ErrorReporter: Send + Sync {
    /// Consume configuration. Awaited exactly once before other operations
    /// are meaningful; misconfiguration is logged, never returned.
    async fn initialize(&self, options: ReporterOptions);

    /// Append a breadcrumb to the scope.
    fn add_breadcrumb(&self, breadcrumb: Breadcrumb);

    /// Record a standalone diagnostic event independent of any error.
    /// Conventionally sent at [`Severity::Info`].
    fn capture_message(
        &self,
        message: &str,
        severity: Severity,
        data: Option<BTreeMap<String, Value>>,
    );

    /// Set a context payload, replacing any previous value for the key.
    fn set_context(&self, key: &str, payload: Value);

    /// Remove a context payload; removing an absent key is a no-op.
    fn remove_context(&self, key: &str);

    /// Set a tag, replacing any previous value for the key.
    fn set_tag(&self, key: &str, value: &str);

    /// Remove a tag; removing an absent key is a no-op.
    fn remove_tag(&self, key: &str);

    /// Drop every breadcrumb in the scope.
    fn clear_breadcrumbs(&self);

    /// Drop every context payload and tag in the scope.
    fn clear_contexts_and_tags(&self);

    /// Replace or clear the current user.
    fn set_user(&self, user: Option<ReportUser>);

    /// Terminal sink for errors: render or forward `error` together with a
    /// self-contained snapshot of the scope taken at this call.
    fn report_error(&self, error: &dyn Error, stack_trace: Option<&str>);
}

/// Reporter that satisfies the contract while doing nothing at all.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl NoopReporter {
    /// Construct a no-op reporter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ErrorReporter for NoopReporter {
    async fn initialize(&self, options: ReporterOptions) {
        let _ = options;
    }

    fn add_breadcrumb(&self, breadcrumb: Breadcrumb) {
        let _ = breadcrumb;
    }

    fn capture_message(
        &self,
        message: &str,
        severity: Severity,
        data: Option<BTreeMap<String, Value>>,
    ) {
        let _ = (message, severity, data);
    }

    fn set_context(&self, key: &str, payload: Value) {
        let _ = (key, payload);
    }

    fn remove_context(&self, key: &str) {
        let _ = key;
    }

    fn set_tag(&self, key: &str, value: &str) {
        let _ = (key, value);
    }

    fn remove_tag(&self, key: &str) {
        let _ = key;
    }

    fn clear_breadcrumbs(&self) {}

    fn clear_contexts_and_tags(&self) {}

    fn set_user(&self, user: Option<ReportUser>) {
        let _ = user;
    }

    fn report_error(&self, error: &dyn Error, stack_trace: Option<&str>) {
        let _ = (error, stack_trace);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_default_to_disabled_and_empty() {
        let options = ReporterOptions::new();
        assert!(!options.enable_in_debug_mode);
        assert!(options.ignored_errors.is_empty());
    }

    #[test]
    fn ignored_errors_match_substrings() {
        let options = ReporterOptions::new().ignore("connection reset");
        assert!(options.is_ignored("io failure: connection reset by peer"));
        assert!(!options.is_ignored("io failure: timed out"));
    }

    #[tokio::test]
    async fn noop_reporter_accepts_every_operation() {
        let reporter = NoopReporter::new();
        reporter.initialize(ReporterOptions::new()).await;
        reporter.add_breadcrumb(Breadcrumb::new("ignored"));
        reporter.set_tag("screen", "home");
        reporter.set_user(Some(ReportUser::new("u-1")));
        reporter.report_error(&std::io::Error::other("boom"), None);
    }
}
