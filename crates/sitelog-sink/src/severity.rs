//! crates/sitelog-sink/src/severity.rs
//! Severity tags attached to every log entry.

use std::fmt;

/// Width of the label column, including the trailing colon.
const LABEL_WIDTH: usize = 8;

/// Severity of a single log entry.
///
/// The variants are ordered from least to most severe for display purposes;
/// filtering is decided by the level policy in the `sitelog` crate, not by
/// this ordering.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum Severity {
    /// Fine-grained diagnostics.
    Debug,
    /// Progress information.
    Info,
    /// Something unexpected that does not stop the program.
    Warning,
    /// A failed operation.
    Error,
    /// A failure the program is unlikely to recover from.
    Critical,
    /// A failure reported together with its trace; always emitted.
    Exception,
}

impl Severity {
    /// Every severity, least severe first.
    pub const ALL: [Self; 6] = [
        Self::Debug,
        Self::Info,
        Self::Warning,
        Self::Error,
        Self::Critical,
        Self::Exception,
    ];

    /// Returns the upper-case tag, e.g. `"WARNING"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
            Self::Exception => "EXCEPTION",
        }
    }

    /// Returns the fixed-width label written in front of each entry.
    ///
    /// The tag and a colon are left-aligned in an eight column field, so
    /// `"INFO"` becomes `"INFO:   "`. Longer tags are not truncated.
    ///
    /// ```
    /// use sitelog_sink::Severity;
    ///
    /// assert_eq!(Severity::Info.label(), "INFO:   ");
    /// assert_eq!(Severity::Warning.label(), "WARNING:");
    /// assert_eq!(Severity::Exception.label(), "EXCEPTION:");
    /// ```
    pub fn label(self) -> String {
        let tag = format!("{}:", self.as_str());
        format!("{tag:<width$}", width = LABEL_WIDTH)
    }

    /// Label for an optional severity; entries without one get an empty label.
    pub fn label_for(severity: Option<Self>) -> String {
        severity.map(Self::label).unwrap_or_default()
    }

    /// Colour name used by the rich display writer.
    pub const fn html_color(self) -> &'static str {
        match self {
            Self::Debug => "blue",
            Self::Info => "green",
            Self::Warning => "orange",
            Self::Error | Self::Critical | Self::Exception => "red",
        }
    }

    /// ANSI colour used by the styled terminal writer.
    #[cfg(feature = "color")]
    pub const fn terminal_color(self) -> anstyle::AnsiColor {
        match self {
            Self::Info => anstyle::AnsiColor::Green,
            Self::Debug => anstyle::AnsiColor::Cyan,
            Self::Warning => anstyle::AnsiColor::Yellow,
            Self::Error | Self::Critical | Self::Exception => anstyle::AnsiColor::Red,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_padded_to_eight_columns() {
        for severity in [Severity::Debug, Severity::Info, Severity::Error] {
            assert_eq!(severity.label().len(), LABEL_WIDTH);
        }
        assert_eq!(Severity::Debug.label(), "DEBUG:  ");
        assert_eq!(Severity::Error.label(), "ERROR:  ");
    }

    #[test]
    fn long_tags_overflow_the_label_column() {
        assert_eq!(Severity::Critical.label(), "CRITICAL:");
        assert_eq!(Severity::Exception.label(), "EXCEPTION:");
    }

    #[test]
    fn missing_severity_has_empty_label() {
        assert_eq!(Severity::label_for(None), "");
        assert_eq!(Severity::label_for(Some(Severity::Info)), "INFO:   ");
    }

    #[test]
    fn html_colors_follow_severity() {
        assert_eq!(Severity::Debug.html_color(), "blue");
        assert_eq!(Severity::Info.html_color(), "green");
        assert_eq!(Severity::Warning.html_color(), "orange");
        assert_eq!(Severity::Error.html_color(), "red");
        assert_eq!(Severity::Critical.html_color(), "red");
        assert_eq!(Severity::Exception.html_color(), "red");
    }

    #[cfg(feature = "color")]
    #[test]
    fn terminal_colors_follow_severity() {
        use anstyle::AnsiColor;

        assert_eq!(Severity::Info.terminal_color(), AnsiColor::Green);
        assert_eq!(Severity::Debug.terminal_color(), AnsiColor::Cyan);
        assert_eq!(Severity::Warning.terminal_color(), AnsiColor::Yellow);
        assert_eq!(Severity::Exception.terminal_color(), AnsiColor::Red);
    }

    #[test]
    fn display_uses_tag() {
        assert_eq!(Severity::Critical.to_string(), "CRITICAL");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_upper_case_tags() {
        let json = serde_json::to_string(&Severity::Warning).unwrap();
        assert_eq!(json, "\"WARNING\"");
        let back: Severity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Severity::Warning);
    }
}
