//! crates/sitelog/src/callsite.rs
//! Resolution and shortening of the location a log call came from.
//!
//! Public log methods carry `#[track_caller]`, so the location reported is
//! the first frame outside any chain of `#[track_caller]` functions. A
//! wrapper that should be transparent marks itself `#[track_caller]` too;
//! one that is not becomes the reported call site. Code that already knows
//! its location (macros, interpreters reporting through the warning hook)
//! builds a [`CallSite`] itself and uses the explicit variants.

use std::fmt;
use std::panic::Location;

use crate::CallSiteError;

/// Source suffixes reported by embedded interpreters for compiled modules,
/// with the source suffix they map back to.
const COMPILED_SUFFIXES: [(&str, &str); 2] = [(".pyc", ".py"), (".pyo", ".py")];

/// A raw frame as reported by a caller that is not a Rust location.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Frame<'a> {
    /// Source file of the frame, if it has one.
    pub file: Option<&'a str>,
    /// Identifier of the interactive session the frame runs in.
    pub session: Option<&'a str>,
    /// Line number within the file or session.
    pub line: u32,
}

impl<'a> Frame<'a> {
    /// A frame located in a source file.
    pub const fn in_file(file: &'a str, line: u32) -> Self {
        Self {
            file: Some(file),
            session: None,
            line,
        }
    }
}

/// Where a log call originated, already shortened for display.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CallSite {
    path: String,
    line: u32,
}

impl CallSite {
    /// Builds a call site from an already shortened path.
    pub fn new(path: impl Into<String>, line: u32) -> Self {
        Self {
            path: path.into(),
            line,
        }
    }

    /// Builds a call site from a full path, keeping its last `depth` segments.
    ///
    /// Both `/` and `\` separate segments. A depth of zero keeps the base
    /// name. Compiled-module names (`.pyc`, `.pyo`) are mapped back to their
    /// source name.
    ///
    /// ```
    /// use sitelog::CallSite;
    ///
    /// assert_eq!(CallSite::from_path("/srv/app/src/main.rs", 12, 1).to_string(), "main.rs:12");
    /// assert_eq!(CallSite::from_path("/srv/app/src/main.rs", 12, 2).to_string(), "src/main.rs:12");
    /// assert_eq!(CallSite::from_path(r"C:\work\tool.pyc", 3, 1).to_string(), "tool.py:3");
    /// ```
    pub fn from_path(path: &str, line: u32, depth: usize) -> Self {
        let depth = depth.max(1);
        let segments: Vec<&str> = path
            .split(['/', '\\'])
            .filter(|segment| !segment.is_empty())
            .collect();
        let start = segments.len().saturating_sub(depth);
        let mut shortened = segments[start..].join("/");

        for (compiled, source) in COMPILED_SUFFIXES {
            if let Some(stem) = shortened.strip_suffix(compiled) {
                shortened = format!("{stem}{source}");
                break;
            }
        }

        Self::new(shortened, line)
    }

    /// Builds a call site from a Rust source location.
    pub fn from_location(location: &Location<'_>, depth: usize) -> Self {
        Self::from_path(location.file(), location.line(), depth)
    }

    /// Returns the call site of the nearest caller not marked
    /// `#[track_caller]`.
    #[track_caller]
    pub fn caller(depth: usize) -> Self {
        Self::from_location(Location::caller(), depth)
    }

    /// Resolves a raw frame.
    ///
    /// The frame's file is preferred; frames without one (interactive
    /// hosts) fall back to the session identifier. A frame with neither is
    /// rejected.
    pub fn resolve(frame: &Frame<'_>, depth: usize) -> Result<Self, CallSiteError> {
        let path = frame
            .file
            .or(frame.session)
            .ok_or(CallSiteError::Unresolvable { line: frame.line })?;
        Ok(Self::from_path(path, frame.line, depth))
    }

    /// The shortened path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The line number.
    pub const fn line(&self) -> u32 {
        self.line
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path, self.line)
    }
}
