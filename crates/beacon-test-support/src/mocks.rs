//! Recording doubles for the reporter contract.

use std::collections::BTreeMap;
use std::error::Error;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde_json::Value;

use beacon_report::{Breadcrumb, ErrorReporter, ReportUser, ReporterOptions};
use beacon_telemetry::Severity;

/// One recorded reporter operation, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum ReporterCall {
    /// `initialize` was awaited.
    Initialize {
        /// Options handed to the reporter.
        options: ReporterOptions,
    },
    /// A breadcrumb was appended.
    Breadcrumb {
        /// The appended breadcrumb.
        breadcrumb: Breadcrumb,
    },
    /// A standalone message was captured.
    Message {
        /// Captured message text.
        message: String,
        /// Severity the message was captured at.
        severity: Severity,
        /// Structured payload attached to the message, if any.
        data: Option<BTreeMap<String, Value>>,
    },
    /// A context payload was set.
    SetContext {
        /// Context key.
        key: String,
        /// Context payload.
        payload: Value,
    },
    /// A context payload was removed.
    RemoveContext {
        /// Context key.
        key: String,
    },
    /// A tag was set.
    SetTag {
        /// Tag key.
        key: String,
        /// Tag value.
        value: String,
    },
    /// A tag was removed.
    RemoveTag {
        /// Tag key.
        key: String,
    },
    /// Every breadcrumb was dropped.
    ClearBreadcrumbs,
    /// Every context payload and tag was dropped.
    ClearContextsAndTags,
    /// The current user was replaced or cleared.
    SetUser {
        /// The new user, if any.
        user: Option<ReportUser>,
    },
    /// An error was reported.
    Error {
        /// Rendered error text.
        rendered: String,
        /// Stack trace passed alongside the error, if any.
        stack_trace: Option<String>,
    },
}

/// Reporter that records every contract call for later assertions.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    calls: Mutex<Vec<ReporterCall>>,
}

impl RecordingReporter {
    /// Construct an empty recording reporter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every recorded call, in call order.
    #[must_use]
    pub fn calls(&self) -> Vec<ReporterCall> {
        self.lock().clone()
    }

    /// Rendered errors passed to `report_error`, in call order.
    #[must_use]
    pub fn reported_errors(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|call| match call {
                ReporterCall::Error { rendered, .. } => Some(rendered.clone()),
                _ => None,
            })
            .collect()
    }

    /// Breadcrumbs appended via `add_breadcrumb`, in call order.
    #[must_use]
    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        self.lock()
            .iter()
            .filter_map(|call| match call {
                ReporterCall::Breadcrumb { breadcrumb } => Some(breadcrumb.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: ReporterCall) {
        self.lock().push(call);
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ReporterCall>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ErrorReporter for RecordingReporter {
    async fn initialize(&self, options: ReporterOptions) {
        self.record(ReporterCall::Initialize { options });
    }

    fn add_breadcrumb(&self, breadcrumb: Breadcrumb) {
        self.record(ReporterCall::Breadcrumb { breadcrumb });
    }

    fn capture_message(
        &self,
        message: &str,
        severity: Severity,
        data: Option<BTreeMap<String, Value>>,
    ) {
        self.record(ReporterCall::Message {
            message: message.to_owned(),
            severity,
            data,
        });
    }

    fn set_context(&self, key: &str, payload: Value) {
        self.record(ReporterCall::SetContext {
            key: key.to_owned(),
            payload,
        });
    }

    fn remove_context(&self, key: &str) {
        self.record(ReporterCall::RemoveContext { key: key.to_owned() });
    }

    fn set_tag(&self, key: &str, value: &str) {
        self.record(ReporterCall::SetTag {
            key: key.to_owned(),
            value: value.to_owned(),
        });
    }

    fn remove_tag(&self, key: &str) {
        self.record(ReporterCall::RemoveTag { key: key.to_owned() });
    }

    fn clear_breadcrumbs(&self) {
        self.record(ReporterCall::ClearBreadcrumbs);
    }

    fn clear_contexts_and_tags(&self) {
        self.record(ReporterCall::ClearContextsAndTags);
    }

    fn set_user(&self, user: Option<ReportUser>) {
        self.record(ReporterCall::SetUser { user });
    }

    fn report_error(&self, error: &dyn Error, stack_trace: Option<&str>) {
        self.record(ReporterCall::Error {
            rendered: error.to_string(),
            stack_trace: stack_trace.map(str::to_owned),
        });
    }
}
