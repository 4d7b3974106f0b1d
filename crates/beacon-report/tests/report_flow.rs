//! End-to-end rendering behaviour of the reference reporter.

use std::sync::Arc;

use beacon_report::{Breadcrumb, DebugErrorReporter, ErrorReporter, ReporterOptions};
use beacon_telemetry::{BuildMode, DiagnosticSink, Logger, MemorySink, Severity};

fn debug_reporter() -> (Arc<MemorySink>, DebugErrorReporter) {
    let sink = Arc::new(MemorySink::new());
    let logger = Logger::new(Arc::clone(&sink) as Arc<dyn DiagnosticSink>);
    let reporter = DebugErrorReporter::with_build_mode(&logger, BuildMode::Debug);
    (sink, reporter)
}

fn position(lines: &[String], needle: &str) -> usize {
    lines
        .iter()
        .position(|line| line.contains(needle))
        .unwrap_or_else(|| panic!("no report line contains {needle:?}: {lines:#?}"))
}

#[tokio::test]
async fn report_renders_breadcrumb_tag_and_error_in_order() {
    let (sink, reporter) = debug_reporter();
    reporter.initialize(ReporterOptions::new()).await;

    reporter.add_breadcrumb(Breadcrumb::new("tapped button"));
    reporter.set_tag("screen", "checkout");
    reporter.report_error(&std::io::Error::other("boom"), None);

    let lines: Vec<String> = sink
        .records_named("reporter.error")
        .into_iter()
        .map(|record| record.message)
        .collect();

    let breadcrumb = position(&lines, "tapped button");
    let tag = position(&lines, "screen=checkout");
    let error = position(&lines, "boom");
    assert!(breadcrumb < tag, "breadcrumb must render before the tag");
    assert!(tag < error, "tag must render before the error");
    assert!(
        lines.last().is_some_and(|line| line.contains("=====")),
        "report must close with the delimiter line"
    );
}

#[tokio::test]
async fn report_contents_are_snapshot_isolated() {
    let (sink, reporter) = debug_reporter();
    reporter.initialize(ReporterOptions::new()).await;

    reporter.add_breadcrumb(Breadcrumb::new("before report"));
    reporter.report_error(&std::io::Error::other("first failure"), None);
    let first_report = sink.records_named("reporter.error").len();

    // Mutating the scope after the report must not change what was rendered.
    reporter.add_breadcrumb(Breadcrumb::new("after report"));
    assert_eq!(sink.records_named("reporter.error").len(), first_report);

    reporter.report_error(&std::io::Error::other("second failure"), None);
    let lines: Vec<String> = sink
        .records_named("reporter.error")
        .into_iter()
        .map(|record| record.message)
        .collect();
    let in_second_report = lines
        .iter()
        .filter(|line| line.contains("after report"))
        .count();
    assert_eq!(in_second_report, 1, "later breadcrumbs belong to later reports only");
}

#[tokio::test]
async fn report_includes_stack_trace_and_user_when_present() {
    let (sink, reporter) = debug_reporter();
    reporter.initialize(ReporterOptions::new()).await;

    reporter.set_user(Some(beacon_report::ReportUser::new("user-7")));
    reporter.report_error(
        &std::io::Error::other("render failed"),
        Some("frame-a\nframe-b"),
    );

    let records = sink.records_named("reporter.error");
    let head = records
        .iter()
        .find(|record| record.message.contains("captured error"))
        .expect("report must contain the captured error line");
    assert_eq!(head.severity, Severity::Error);
    assert_eq!(head.stack_trace.as_deref(), Some("frame-a\nframe-b"));
    assert!(
        records.iter().any(|record| record.message.contains("user: user-7")),
        "report must list the current user"
    );
}
