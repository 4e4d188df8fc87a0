//! crates/sitelog/src/level.rs
//! Configured thresholds and the emission policy.

use std::fmt;
use std::str::FromStr;

use sitelog_sink::Severity;

use crate::ConfigError;

/// The threshold a logger is configured with.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Level {
    /// Emit everything.
    #[default]
    Debug,
    /// Suppress debug entries.
    Info,
    /// Emit warnings and worse.
    Warning,
    /// Emit exceptions only.
    Error,
    /// Emit exceptions only.
    Critical,
}

impl Level {
    /// Every level, most verbose first.
    pub const ALL: [Self; 5] = [
        Self::Debug,
        Self::Info,
        Self::Warning,
        Self::Error,
        Self::Critical,
    ];

    /// Returns the lower-case name accepted by [`FromStr`].
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        }
    }

    /// Reports whether an entry of `severity` is emitted at this level.
    pub const fn allows(self, severity: Severity) -> bool {
        should_emit(self, severity)
    }

    /// Maps an optional debug switch to a level.
    ///
    /// `Some(true)` selects [`Level::Debug`], `Some(false)` selects
    /// [`Level::Info`] and `None` selects [`Level::Warning`].
    pub const fn from_debug_flag(debug: Option<bool>) -> Self {
        match debug {
            Some(true) => Self::Debug,
            Some(false) => Self::Info,
            None => Self::Warning,
        }
    }
}

impl FromStr for Level {
    type Err = ConfigError;

    /// Parses one of `"debug"`, `"info"`, `"warning"`, `"error"` or
    /// `"critical"`. Matching is exact and case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            "critical" => Ok(Self::Critical),
            other => Err(ConfigError::InvalidLevel(other.to_owned())),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decides whether an entry is emitted.
///
/// The policy is a fixed table rather than a severity comparison. At the
/// `error` and `critical` levels only [`Severity::Exception`] passes, which
/// means ERROR and CRITICAL entries are suppressed at their own level.
///
/// ```
/// use sitelog::{Level, Severity, should_emit};
///
/// assert!(should_emit(Level::Info, Severity::Warning));
/// assert!(!should_emit(Level::Info, Severity::Debug));
/// assert!(!should_emit(Level::Error, Severity::Error));
/// assert!(should_emit(Level::Critical, Severity::Exception));
/// ```
pub const fn should_emit(level: Level, severity: Severity) -> bool {
    match level {
        Level::Debug => true,
        Level::Info => !matches!(severity, Severity::Debug),
        Level::Warning => matches!(
            severity,
            Severity::Warning | Severity::Error | Severity::Critical | Severity::Exception
        ),
        Level::Error | Level::Critical => matches!(severity, Severity::Exception),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_exact_names() {
        for level in Level::ALL {
            assert_eq!(level.as_str().parse::<Level>().unwrap(), level);
        }
    }

    #[test]
    fn rejects_other_spellings() {
        for bad in ["DEBUG", "Info", "warn", "fatal", "", " info"] {
            let err = bad.parse::<Level>().unwrap_err();
            assert!(matches!(err, ConfigError::InvalidLevel(ref s) if s == bad));
        }
    }

    #[test]
    fn default_is_debug() {
        assert_eq!(Level::default(), Level::Debug);
    }

    #[test]
    fn debug_flag_mapping() {
        assert_eq!(Level::from_debug_flag(Some(true)), Level::Debug);
        assert_eq!(Level::from_debug_flag(Some(false)), Level::Info);
        assert_eq!(Level::from_debug_flag(None), Level::Warning);
    }

    #[test]
    fn exception_is_emitted_at_every_level() {
        for level in Level::ALL {
            assert!(level.allows(Severity::Exception));
        }
    }

    #[test]
    fn display_matches_parse_name() {
        assert_eq!(Level::Warning.to_string(), "warning");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_lower_case_names() {
        let json = serde_json::to_string(&Level::Critical).unwrap();
        assert_eq!(json, "\"critical\"");
        assert_eq!(serde_json::from_str::<Level>(&json).unwrap(), Level::Critical);
    }
}
