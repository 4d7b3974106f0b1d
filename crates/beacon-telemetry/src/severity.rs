//! Ordered severity scale for diagnostic records.

use std::fmt::{self, Display, Formatter};

/// Ordered classification of diagnostic importance.
///
/// The ordering is fixed and monotonic; sinks filter on the numeric level
/// derived from a variant's position in the scale.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Verbose diagnostics useful only while developing.
    Debug,
    /// Routine operational events.
    Info,
    /// Unexpected situations the application recovered from.
    Warning,
    /// Failures that were contained but lost work.
    Error,
    /// Failures the application cannot recover from.
    Fatal,
}

impl Severity {
    /// Every severity in ascending order of importance.
    pub const ALL: [Self; 5] = [
        Self::Debug,
        Self::Info,
        Self::Warning,
        Self::Error,
        Self::Fatal,
    ];

    /// Position of the severity within the ordered scale.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Debug => 0,
            Self::Info => 1,
            Self::Warning => 2,
            Self::Error => 3,
            Self::Fatal => 4,
        }
    }

    /// Numeric level forwarded to sinks for filtering.
    ///
    /// Levels are spaced by 1000 so sinks can interleave their own scales
    /// between the named severities.
    #[must_use]
    pub const fn numeric_level(self) -> i64 {
        match self {
            Self::Debug => 0,
            Self::Info => 1000,
            Self::Warning => 2000,
            Self::Error => 3000,
            Self::Fatal => 4000,
        }
    }

    /// Uppercase tag used to prefix rendered messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Fatal => "FATAL",
        }
    }
}

impl Display for Severity {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Fatal => "fatal",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_strictly_monotonic() {
        for pair in Severity::ALL.windows(2) {
            assert!(pair[0] < pair[1], "{} should sort below {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn numeric_level_tracks_scale_position() {
        for (position, severity) in Severity::ALL.iter().enumerate() {
            let expected = i64::try_from(position).expect("scale position fits i64") * 1000;
            assert_eq!(severity.numeric_level(), expected);
            assert_eq!(severity.index(), position);
        }
    }

    #[test]
    fn label_is_uppercase_display() {
        for severity in Severity::ALL {
            assert_eq!(severity.label(), severity.to_string().to_uppercase());
        }
    }
}
