//! Scope state attached to error reports.
//!
//! # Design
//! - Breadcrumbs live in a bounded ring so a long-lived process cannot leak.
//! - Context and tag maps are keyed stores with last-write-wins semantics.
//! - Snapshots are deep copies; a report never observes later mutations.

use std::collections::{BTreeMap, VecDeque};

use chrono::{DateTime, Utc};
use serde_json::Value;

/// Default number of breadcrumbs retained by a scope.
pub const DEFAULT_BREADCRUMB_CAPACITY: usize = 100;

/// Timestamped trail event recorded ahead of a potential error report.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Breadcrumb {
    /// Human-readable description of the trail event.
    pub message: String,
    /// Optional grouping category.
    pub category: Option<String>,
    /// Optional structured payload attached to the event.
    pub data: Option<BTreeMap<String, Value>>,
    /// Moment the breadcrumb was created.
    pub timestamp: DateTime<Utc>,
}

impl Breadcrumb {
    /// Create a breadcrumb stamped with the current time.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            category: None,
            data: None,
            timestamp: Utc::now(),
        }
    }

    /// Attach a grouping category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Attach a structured payload.
    #[must_use]
    pub fn with_data(mut self, data: BTreeMap<String, Value>) -> Self {
        self.data = Some(data);
        self
    }

    /// Override the creation timestamp.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// Actor associated with subsequent error reports.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReportUser {
    /// Required stable identifier.
    pub id: String,
    /// Optional email address.
    pub email: Option<String>,
    /// Optional display username.
    pub username: Option<String>,
    /// Optional client IP address.
    pub ip_address: Option<String>,
}

impl ReportUser {
    /// Create a user with only the required identifier set.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: None,
            username: None,
            ip_address: None,
        }
    }

    /// Attach an email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Attach a display username.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Attach a client IP address.
    #[must_use]
    pub fn with_ip_address(mut self, ip_address: impl Into<String>) -> Self {
        self.ip_address = Some(ip_address.into());
        self
    }
}

/// Mutable bundle of breadcrumbs, contexts, tags, and the current user.
///
/// Owned exclusively by one reporter; other components only ever see the
/// reporter's public contract or a [`ScopeSnapshot`].
#[derive(Debug)]
pub struct Scope {
    breadcrumbs: VecDeque<Breadcrumb>,
    breadcrumb_capacity: usize,
    contexts: BTreeMap<String, Value>,
    tags: BTreeMap<String, String>,
    user: Option<ReportUser>,
}

impl Scope {
    /// Create a scope with the default breadcrumb capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_breadcrumb_capacity(DEFAULT_BREADCRUMB_CAPACITY)
    }

    /// Create a scope retaining at most `capacity` breadcrumbs.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn with_breadcrumb_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "breadcrumb capacity must be positive");
        Self {
            breadcrumbs: VecDeque::with_capacity(capacity),
            breadcrumb_capacity: capacity,
            contexts: BTreeMap::new(),
            tags: BTreeMap::new(),
            user: None,
        }
    }

    /// Append a breadcrumb, evicting the oldest one at capacity.
    pub fn push_breadcrumb(&mut self, breadcrumb: Breadcrumb) {
        if self.breadcrumbs.len() == self.breadcrumb_capacity {
            self.breadcrumbs.pop_front();
        }
        self.breadcrumbs.push_back(breadcrumb);
    }

    /// Set a context payload, replacing any previous value for the key.
    pub fn set_context(&mut self, key: impl Into<String>, payload: Value) {
        self.contexts.insert(key.into(), payload);
    }

    /// Remove a context payload; removing an absent key is a no-op.
    pub fn remove_context(&mut self, key: &str) {
        self.contexts.remove(key);
    }

    /// Set a tag, replacing any previous value for the key.
    pub fn set_tag(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.tags.insert(key.into(), value.into());
    }

    /// Remove a tag; removing an absent key is a no-op.
    pub fn remove_tag(&mut self, key: &str) {
        self.tags.remove(key);
    }

    /// Replace or clear the current user.
    pub fn set_user(&mut self, user: Option<ReportUser>) {
        self.user = user;
    }

    /// Drop every breadcrumb.
    pub fn clear_breadcrumbs(&mut self) {
        self.breadcrumbs.clear();
    }

    /// Drop every context payload and tag; breadcrumbs and user are kept.
    pub fn clear_contexts_and_tags(&mut self) {
        self.contexts.clear();
        self.tags.clear();
    }

    /// Breadcrumbs in insertion order, oldest first.
    pub fn breadcrumbs(&self) -> impl Iterator<Item = &Breadcrumb> {
        self.breadcrumbs.iter()
    }

    /// Context payloads keyed by context name.
    #[must_use]
    pub const fn contexts(&self) -> &BTreeMap<String, Value> {
        &self.contexts
    }

    /// Tags keyed by tag name.
    #[must_use]
    pub const fn tags(&self) -> &BTreeMap<String, String> {
        &self.tags
    }

    /// The current user, if one is set.
    #[must_use]
    pub const fn user(&self) -> Option<&ReportUser> {
        self.user.as_ref()
    }

    /// Deep copy of the scope at this instant.
    #[must_use]
    pub fn snapshot(&self) -> ScopeSnapshot {
        ScopeSnapshot {
            breadcrumbs: self.breadcrumbs.iter().cloned().collect(),
            contexts: self.contexts.clone(),
            tags: self.tags.clone(),
            user: self.user.clone(),
        }
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

/// Self-contained copy of a scope taken when a report is assembled.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ScopeSnapshot {
    /// Breadcrumbs in insertion order, oldest first.
    pub breadcrumbs: Vec<Breadcrumb>,
    /// Context payloads keyed by context name.
    pub contexts: BTreeMap<String, Value>,
    /// Tags keyed by tag name.
    pub tags: BTreeMap<String, String>,
    /// The user current when the snapshot was taken, if any.
    pub user: Option<ReportUser>,
}
