//! Reference reporter that renders every operation to the local log.
//!
//! # Design
//! - Scope mutations always apply, regardless of build mode.
//! - Rendering is gated by build mode so release logs stay quiet.
//! - Reports are assembled from a snapshot; later mutations never leak in.

use std::collections::BTreeMap;
use std::error::Error;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde_json::Value;

use beacon_telemetry::{BuildMode, Logger, Severity};

use crate::reporter::{ErrorReporter, ReporterOptions};
use crate::scope::{Breadcrumb, ReportUser, Scope, ScopeSnapshot};

/// Line closing every rendered error report.
const REPORT_DELIMITER: &str =
    "================================================================";

/// Reporter that keeps the scope in memory and renders every operation to
/// the local diagnostic log through named child loggers.
pub struct DebugErrorReporter {
    logger: Logger,
    scope: Mutex<Scope>,
    options: Mutex<ReporterOptions>,
    build_mode: BuildMode,
}

impl DebugErrorReporter {
    /// Create a reporter rendering through children of `logger`, with the
    /// build mode inferred from the current compilation.
    #[must_use]
    pub fn new(logger: &Logger) -> Self {
        Self::with_build_mode(logger, BuildMode::infer())
    }

    /// Create a reporter with an explicit build mode.
    #[must_use]
    pub fn with_build_mode(logger: &Logger, build_mode: BuildMode) -> Self {
        Self {
            logger: logger.clone(),
            scope: Mutex::new(Scope::new()),
            options: Mutex::new(ReporterOptions::default()),
            build_mode,
        }
    }

    /// Deep copy of the current scope.
    #[must_use]
    pub fn scope_snapshot(&self) -> ScopeSnapshot {
        self.lock_scope().snapshot()
    }

    const fn renders(&self) -> bool {
        self.build_mode.is_debug()
    }

    fn lock_scope(&self) -> MutexGuard<'_, Scope> {
        self.scope.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_options(&self) -> MutexGuard<'_, ReporterOptions> {
        self.options.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn echo(&self, component: &str, severity: Severity, message: &str) {
        if self.renders() {
            self.logger.named(component).log(severity, message);
        }
    }
}

#[async_trait]
impl ErrorReporter for DebugErrorReporter {
    async fn initialize(&self, options: ReporterOptions) {
        let ignored = options.ignored_errors.len();
        *self.lock_options() = options;
        self.echo(
            "reporter.init",
            Severity::Info,
            &format!(
                "initialized (rendering: {}, ignored patterns: {ignored})",
                self.renders()
            ),
        );
    }

    fn add_breadcrumb(&self, breadcrumb: Breadcrumb) {
        let line = breadcrumb.category.as_ref().map_or_else(
            || format!("breadcrumb: {}", breadcrumb.message),
            |category| format!("breadcrumb: {} [{category}]", breadcrumb.message),
        );
        self.lock_scope().push_breadcrumb(breadcrumb);
        self.echo("reporter.breadcrumb", Severity::Debug, &line);
    }

    fn capture_message(
        &self,
        message: &str,
        severity: Severity,
        data: Option<BTreeMap<String, Value>>,
    ) {
        let line = match &data {
            Some(data) if !data.is_empty() => {
                format!("{message} {}", render_data(data))
            }
            _ => message.to_owned(),
        };
        self.echo("reporter.message", severity, &line);
    }

    fn set_context(&self, key: &str, payload: Value) {
        let line = format!("context: {key}={payload}");
        self.lock_scope().set_context(key, payload);
        self.echo("reporter.context", Severity::Debug, &line);
    }

    fn remove_context(&self, key: &str) {
        self.lock_scope().remove_context(key);
        self.echo(
            "reporter.context",
            Severity::Debug,
            &format!("context: {key} cleared"),
        );
    }

    fn set_tag(&self, key: &str, value: &str) {
        self.lock_scope().set_tag(key, value);
        self.echo(
            "reporter.tag",
            Severity::Debug,
            &format!("tag: {key}={value}"),
        );
    }

    fn remove_tag(&self, key: &str) {
        self.lock_scope().remove_tag(key);
        self.echo(
            "reporter.tag",
            Severity::Debug,
            &format!("tag: {key} cleared"),
        );
    }

    fn clear_breadcrumbs(&self) {
        self.lock_scope().clear_breadcrumbs();
        self.echo("reporter.breadcrumb", Severity::Debug, "breadcrumbs cleared");
    }

    fn clear_contexts_and_tags(&self) {
        self.lock_scope().clear_contexts_and_tags();
        self.echo(
            "reporter.context",
            Severity::Debug,
            "contexts and tags cleared",
        );
    }

    fn set_user(&self, user: Option<ReportUser>) {
        let line = user.as_ref().map_or_else(
            || "user cleared".to_owned(),
            |user| format!("user set: {}", user.id),
        );
        self.lock_scope().set_user(user);
        self.echo("reporter.user", Severity::Debug, &line);
    }

    fn report_error(&self, error: &dyn Error, stack_trace: Option<&str>) {
        let rendered = error.to_string();
        let snapshot = self.lock_scope().snapshot();
        let ignored = self.lock_options().is_ignored(&rendered);

        if ignored {
            self.echo(
                "reporter.error",
                Severity::Debug,
                &format!("error ignored: {rendered}"),
            );
            return;
        }
        if !self.renders() {
            return;
        }

        let log = self.logger.named("reporter.error");
        for breadcrumb in &snapshot.breadcrumbs {
            log.error(&format!("breadcrumb: {}", breadcrumb.message));
        }
        for (key, payload) in &snapshot.contexts {
            log.error(&format!("context: {key}={payload}"));
        }
        for (key, value) in &snapshot.tags {
            log.error(&format!("tag: {key}={value}"));
        }
        if let Some(user) = &snapshot.user {
            log.error(&format!("user: {}", user.id));
        }
        log.log_failure(
            Severity::Error,
            &format!("captured error: {rendered}"),
            &rendered,
            stack_trace,
        );
        log.error(REPORT_DELIMITER);
    }
}

fn render_data(data: &BTreeMap<String, Value>) -> String {
    serde_json::to_string(data).unwrap_or_else(|_| "<unrenderable data>".to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use beacon_telemetry::{DiagnosticSink, MemorySink};

    fn reporter(build_mode: BuildMode) -> (Arc<MemorySink>, DebugErrorReporter) {
        let sink = Arc::new(MemorySink::new());
        let logger = Logger::new(Arc::clone(&sink) as Arc<dyn DiagnosticSink>);
        (sink, DebugErrorReporter::with_build_mode(&logger, build_mode))
    }

    #[test]
    fn mutations_apply_without_rendering_in_release_mode() {
        let (sink, reporter) = reporter(BuildMode::Release);
        reporter.add_breadcrumb(Breadcrumb::new("quiet"));
        reporter.set_tag("screen", "home");
        reporter.report_error(&std::io::Error::other("silent"), None);

        assert!(sink.records().is_empty());
        let snapshot = reporter.scope_snapshot();
        assert_eq!(snapshot.breadcrumbs.len(), 1);
        assert_eq!(snapshot.tags["screen"], "home");
    }

    #[test]
    fn operations_echo_under_component_names_in_debug_mode() {
        let (sink, reporter) = reporter(BuildMode::Debug);
        reporter.add_breadcrumb(Breadcrumb::new("tapped button").with_category("ui"));
        reporter.set_context("device", serde_json::json!({"model": "sim"}));
        reporter.set_tag("screen", "checkout");
        reporter.set_user(Some(ReportUser::new("u-1")));

        assert_eq!(sink.records_named("reporter.breadcrumb").len(), 1);
        assert_eq!(sink.records_named("reporter.context").len(), 1);
        assert_eq!(sink.records_named("reporter.tag").len(), 1);
        assert_eq!(sink.records_named("reporter.user").len(), 1);
        assert!(
            sink.records_named("reporter.breadcrumb")[0]
                .message
                .contains("tapped button [ui]")
        );
    }

    #[test]
    fn capture_message_renders_severity_and_data() {
        let (sink, reporter) = reporter(BuildMode::Debug);
        let mut data = BTreeMap::new();
        data.insert("attempt".to_owned(), serde_json::json!(2));
        reporter.capture_message("retrying sync", Severity::Warning, Some(data));

        let records = sink.records_named("reporter.message");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].severity, Severity::Warning);
        assert!(records[0].message.contains("retrying sync"));
        assert!(records[0].message.contains("\"attempt\":2"));
    }

    #[tokio::test]
    async fn ignored_errors_are_dropped() {
        let (sink, reporter) = reporter(BuildMode::Debug);
        reporter
            .initialize(ReporterOptions::new().ignore("reset by peer"))
            .await;
        sink.clear();

        reporter.report_error(&std::io::Error::other("connection reset by peer"), None);

        let records = sink.records_named("reporter.error");
        assert_eq!(records.len(), 1);
        assert!(records[0].message.contains("error ignored"));
        assert_eq!(records[0].severity, Severity::Debug);
    }

    #[tokio::test]
    async fn initialize_echoes_configuration() {
        let (sink, reporter) = reporter(BuildMode::Debug);
        reporter
            .initialize(ReporterOptions::new().ignore("a").ignore("b"))
            .await;

        let records = sink.records_named("reporter.init");
        assert_eq!(records.len(), 1);
        assert!(records[0].message.contains("ignored patterns: 2"));
    }
}
