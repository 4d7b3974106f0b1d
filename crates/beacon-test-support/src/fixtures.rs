//! Value builders shared by the integration suites.

use std::collections::BTreeMap;

use serde_json::Value;

use beacon_report::{Breadcrumb, ReportUser, ReporterOptions};

/// Breadcrumb with a category and one data entry, suitable for assertions
/// on scope contents.
#[must_use]
pub fn sample_breadcrumb(message: &str) -> Breadcrumb {
    let mut data = BTreeMap::new();
    data.insert("source".to_owned(), Value::String("test".to_owned()));
    Breadcrumb::new(message)
        .with_category("test")
        .with_data(data)
}

/// User with every optional field populated.
#[must_use]
pub fn sample_user(id: &str) -> ReportUser {
    ReportUser::new(id)
        .with_email(format!("{id}@example.com"))
        .with_username(format!("user-{id}"))
        .with_ip_address("203.0.113.9")
}

/// Options ignoring a single rendered-error pattern.
#[must_use]
pub fn options_ignoring(pattern: &str) -> ReporterOptions {
    ReporterOptions::new().ignore(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_breadcrumb_has_category_and_data() {
        let breadcrumb = sample_breadcrumb("hello");
        assert_eq!(breadcrumb.message, "hello");
        assert_eq!(breadcrumb.category.as_deref(), Some("test"));
        assert!(breadcrumb.data.is_some());
    }

    #[test]
    fn options_ignoring_matches_pattern() {
        assert!(options_ignoring("boom").is_ignored("the boom happened"));
    }
}
