//! Typed lifecycle events mirrored from the host state-management layer.

use std::collections::BTreeMap;

use serde_json::Value;

use beacon_report::Breadcrumb;

/// Category attached to every lifecycle breadcrumb, matching the host
/// library's name for a managed state container.
pub const BREADCRUMB_CATEGORY: &str = "bloc";

/// State change observed by a container.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StateChange {
    /// State the container is leaving.
    pub current: String,
    /// State the container is entering.
    pub next: String,
}

impl StateChange {
    /// Describe a change between two state kinds.
    #[must_use]
    pub fn new(current: impl Into<String>, next: impl Into<String>) -> Self {
        Self {
            current: current.into(),
            next: next.into(),
        }
    }
}

/// Event-driven transition observed by a container.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StateTransition {
    /// Runtime kind of the event that drove the transition.
    pub event: String,
    /// State the container is leaving.
    pub current: String,
    /// State the container is entering.
    pub next: String,
}

impl StateTransition {
    /// Describe a transition driven by `event`.
    #[must_use]
    pub fn new(
        event: impl Into<String>,
        current: impl Into<String>,
        next: impl Into<String>,
    ) -> Self {
        Self {
            event: event.into(),
            current: current.into(),
            next: next.into(),
        }
    }
}

/// Lifecycle events emitted by the host for every managed state container.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LifecycleEvent {
    /// A container was created.
    Created {
        /// Runtime kind of the container.
        container: String,
    },
    /// A container received an event object.
    Dispatched {
        /// Runtime kind of the container.
        container: String,
        /// Runtime kind of the dispatched event.
        event: String,
    },
    /// A container's state changed.
    Changed {
        /// Runtime kind of the container.
        container: String,
        /// Observed state change.
        change: StateChange,
    },
    /// A container transitioned in response to an event.
    Transitioned {
        /// Runtime kind of the container.
        container: String,
        /// Observed transition.
        transition: StateTransition,
    },
    /// A container was closed.
    Closed {
        /// Runtime kind of the container.
        container: String,
    },
}

impl LifecycleEvent {
    /// Host-library hook name that produced the event.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Created { .. } => "onCreate",
            Self::Dispatched { .. } => "onEvent",
            Self::Changed { .. } => "onChange",
            Self::Transitioned { .. } => "onTransition",
            Self::Closed { .. } => "onClose",
        }
    }

    /// Runtime kind of the container that emitted the event.
    #[must_use]
    pub fn container(&self) -> &str {
        match self {
            Self::Created { container }
            | Self::Dispatched { container, .. }
            | Self::Changed { container, .. }
            | Self::Transitioned { container, .. }
            | Self::Closed { container } => container,
        }
    }

    /// One-line rendering used for the debug log.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Created { container } | Self::Closed { container } => {
                format!("{} -- {container}", self.kind())
            }
            Self::Dispatched { container, event } => {
                format!("onEvent -- {container}, {event}")
            }
            Self::Changed { container, change } => {
                format!(
                    "onChange -- {container}, {} -> {}",
                    change.current, change.next
                )
            }
            Self::Transitioned {
                container,
                transition,
            } => {
                format!(
                    "onTransition -- {container}, {}: {} -> {}",
                    transition.event, transition.current, transition.next
                )
            }
        }
    }

    /// Breadcrumb mirroring the event under the lifecycle category.
    #[must_use]
    pub fn to_breadcrumb(&self) -> Breadcrumb {
        let mut data = BTreeMap::new();
        data.insert(
            "bloc".to_owned(),
            Value::String(self.container().to_owned()),
        );
        match self {
            Self::Dispatched { event, .. } => {
                data.insert("event".to_owned(), Value::String(event.clone()));
            }
            Self::Changed { change, .. } => {
                data.insert("current".to_owned(), Value::String(change.current.clone()));
                data.insert("next".to_owned(), Value::String(change.next.clone()));
            }
            Self::Transitioned { transition, .. } => {
                data.insert("event".to_owned(), Value::String(transition.event.clone()));
                data.insert(
                    "current".to_owned(),
                    Value::String(transition.current.clone()),
                );
                data.insert("next".to_owned(), Value::String(transition.next.clone()));
            }
            Self::Created { .. } | Self::Closed { .. } => {}
        }
        Breadcrumb::new(self.kind())
            .with_category(BREADCRUMB_CATEGORY)
            .with_data(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_match_host_hook_names() {
        let created = LifecycleEvent::Created {
            container: "CartBloc".to_owned(),
        };
        let transitioned = LifecycleEvent::Transitioned {
            container: "CartBloc".to_owned(),
            transition: StateTransition::new("AddItem", "CartEmpty", "CartFilled"),
        };
        assert_eq!(created.kind(), "onCreate");
        assert_eq!(transitioned.kind(), "onTransition");
        assert_eq!(created.container(), "CartBloc");
    }

    #[test]
    fn describe_names_kind_container_and_fields() {
        let changed = LifecycleEvent::Changed {
            container: "CartBloc".to_owned(),
            change: StateChange::new("CartEmpty", "CartFilled"),
        };
        assert_eq!(
            changed.describe(),
            "onChange -- CartBloc, CartEmpty -> CartFilled"
        );
    }

    #[test]
    fn breadcrumb_carries_category_and_container_data() {
        let dispatched = LifecycleEvent::Dispatched {
            container: "CartBloc".to_owned(),
            event: "AddItem".to_owned(),
        };
        let breadcrumb = dispatched.to_breadcrumb();

        assert_eq!(breadcrumb.category.as_deref(), Some(BREADCRUMB_CATEGORY));
        let data = breadcrumb.data.expect("lifecycle breadcrumbs carry data");
        assert_eq!(data["bloc"], Value::String("CartBloc".to_owned()));
        assert_eq!(data["event"], Value::String("AddItem".to_owned()));
    }
}
