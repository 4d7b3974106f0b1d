//! Logging pipeline installation and build-mode inference.
//!
//! # Design
//! - Centralises subscriber setup (pretty or JSON) behind one entry point.
//! - Records the application identity once so later records can reference it.
//! - `RUST_LOG` always wins over the configured default level.

use once_cell::sync::OnceCell;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::error::{TelemetryError, TelemetryResult};

/// Default filter directive when `RUST_LOG` is not provided.
pub const DEFAULT_LOG_LEVEL: &str = "info";

static APP_IDENTITY: OnceCell<String> = OnceCell::new();

/// Logging configuration consumed once at startup.
#[derive(Debug, Clone)]
pub struct LoggingConfig<'a> {
    /// Filter directive applied when the environment does not override it.
    pub level: &'a str,
    /// Output format for the installed subscriber.
    pub format: LogFormat,
    /// Application identity recorded for the process lifetime.
    pub app_identity: &'a str,
}

impl Default for LoggingConfig<'_> {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL,
            format: LogFormat::infer(),
            app_identity: "dev",
        }
    }
}

/// Available output formats for the installed subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Newline-delimited JSON records.
    Json,
    /// Human-readable multi-line records.
    Pretty,
}

impl LogFormat {
    /// Choose a sensible default for the current build.
    #[must_use]
    pub const fn infer() -> Self {
        if cfg!(debug_assertions) {
            Self::Pretty
        } else {
            Self::Json
        }
    }
}

/// Build mode the facade was compiled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    /// Development build with debug assertions enabled.
    Debug,
    /// Optimised build without debug assertions.
    Release,
}

impl BuildMode {
    /// Infer the build mode from compiler debug assertions.
    #[must_use]
    pub const fn infer() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    /// Whether this is a debug build.
    #[must_use]
    pub const fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Configure and install the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if the subscriber cannot be installed (for example,
/// because another subscriber has already been set globally).
pub fn init_logging(config: &LoggingConfig<'_>) -> TelemetryResult<()> {
    let _ = APP_IDENTITY.set(config.app_identity.to_owned());

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.level));
    let builder = fmt::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_thread_ids(false);

    let result = match config.format {
        LogFormat::Json => builder.json().finish().try_init(),
        LogFormat::Pretty => builder.pretty().finish().try_init(),
    };
    result.map_err(|source| TelemetryError::SubscriberInstall { source })
}

/// Application identity recorded during logging initialisation.
#[must_use]
pub fn app_identity() -> &'static str {
    APP_IDENTITY.get().map_or("dev", String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_mode_matches_debug_assertions() {
        assert_eq!(BuildMode::infer().is_debug(), cfg!(debug_assertions));
    }

    #[test]
    fn log_format_infers_pretty_for_debug_builds() {
        let expected = if cfg!(debug_assertions) {
            LogFormat::Pretty
        } else {
            LogFormat::Json
        };
        assert_eq!(LogFormat::infer(), expected);
    }

    #[test]
    fn default_config_uses_documented_level() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, DEFAULT_LOG_LEVEL);
        assert_eq!(config.app_identity, "dev");
    }
}
