//! # Design
//!
//! - Centralize boot-sequence errors behind one enum.
//! - Keep error messages constant while carrying context fields for debugging.
//! - Preserve source errors without re-logging at call sites.

use thiserror::Error;

/// Result alias for boot operations.
pub type BootResult<T> = Result<T, BootError>;

/// Errors that abort the boot sequence.
#[derive(Debug, Error)]
pub enum BootError {
    /// The caller-supplied initializer failed.
    #[error("application initializer failed")]
    Initialize {
        /// Operation identifier.
        operation: &'static str,
        /// Source initializer error.
        source: anyhow::Error,
    },
    /// The host runtime failed to start or terminated abnormally.
    #[error("host runtime failed")]
    Host {
        /// Operation identifier.
        operation: &'static str,
        /// Source host error.
        source: anyhow::Error,
    },
    /// The guarded zone caught a panic.
    #[error("boot sequence panicked")]
    Panicked {
        /// Rendered panic payload.
        message: String,
    },
    /// The guarded zone's supervisor task failed without panicking.
    #[error("boot supervisor failed")]
    Supervisor {
        /// Operation identifier.
        operation: &'static str,
        /// Source join error.
        source: tokio::task::JoinError,
    },
}

impl BootError {
    pub(crate) fn initialize(operation: &'static str, source: anyhow::Error) -> Self {
        Self::Initialize { operation, source }
    }

    pub(crate) fn host(operation: &'static str, source: anyhow::Error) -> Self {
        Self::Host { operation, source }
    }

    pub(crate) fn supervisor(operation: &'static str, source: tokio::task::JoinError) -> Self {
        Self::Supervisor { operation, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn helpers_build_variants_with_constant_messages() {
        let initialize = BootError::initialize("on_initialize", anyhow::anyhow!("db offline"));
        assert!(matches!(initialize, BootError::Initialize { .. }));
        assert_eq!(initialize.to_string(), "application initializer failed");
        assert!(initialize.source().is_some());

        let host = BootError::host("host.run_app", anyhow::anyhow!("window server gone"));
        assert_eq!(host.to_string(), "host runtime failed");

        let panicked = BootError::Panicked {
            message: "widget tree invariant broken".to_owned(),
        };
        assert_eq!(panicked.to_string(), "boot sequence panicked");
        assert!(panicked.source().is_none());
    }
}
