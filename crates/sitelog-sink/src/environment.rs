//! crates/sitelog-sink/src/environment.rs
//! Output environment probing and stream writer selection.

use std::env;
use std::io::{self, Write};
use std::sync::OnceLock;

use is_terminal::IsTerminal;

use crate::{PlainWriter, RichDisplayWriter, SinkWriter};

/// Variable set by the evcxr kernel in the processes it runs.
const RICH_HOST_VAR: &str = "EVCXR_IS_RUNTIME";

/// Facts about the process output environment that decide how log entries
/// are rendered.
///
/// [`Environment::current`] probes once per process and caches the result.
/// Tests and embedders construct a value directly instead.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Environment {
    /// Standard output is attached to a terminal.
    pub stdout_is_terminal: bool,
    /// The process runs inside a host that renders HTML display blocks.
    pub rich_display: bool,
    /// Terminal styling was compiled in.
    pub styling_available: bool,
    /// Identifier used for call sites that have no source file.
    pub session: Option<String>,
}

/// Stream writer chosen for an [`Environment`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StreamKind {
    /// ANSI-coloured output.
    Styled,
    /// HTML blocks for a rich host.
    RichDisplay,
    /// Verbatim text.
    Plain,
}

impl Environment {
    /// Probes the running process.
    pub fn detect() -> Self {
        Self {
            stdout_is_terminal: io::stdout().is_terminal(),
            rich_display: env::var_os(RICH_HOST_VAR).is_some(),
            styling_available: cfg!(feature = "color"),
            session: env::current_exe()
                .ok()
                .and_then(|exe| exe.file_stem().map(|s| s.to_string_lossy().into_owned())),
        }
    }

    /// Returns the environment probed at first use.
    pub fn current() -> &'static Self {
        static CURRENT: OnceLock<Environment> = OnceLock::new();
        CURRENT.get_or_init(Self::detect)
    }

    /// An environment that selects the plain writer.
    pub fn plain() -> Self {
        Self::default()
    }

    /// Picks the stream writer kind.
    ///
    /// A styling-capable terminal wins, then a rich host, then plain text.
    ///
    /// ```
    /// use sitelog_sink::{Environment, StreamKind};
    ///
    /// let env = Environment { rich_display: true, ..Environment::plain() };
    /// assert_eq!(env.stream_kind(), StreamKind::RichDisplay);
    /// assert_eq!(Environment::plain().stream_kind(), StreamKind::Plain);
    /// ```
    pub const fn stream_kind(&self) -> StreamKind {
        if self.stdout_is_terminal && self.styling_available {
            StreamKind::Styled
        } else if self.rich_display {
            StreamKind::RichDisplay
        } else {
            StreamKind::Plain
        }
    }
}

/// Builds the stream writer the environment calls for around `writer`.
///
/// When the `color` feature is disabled a styled selection degrades to the
/// plain writer.
pub fn select_writer<W>(environment: &Environment, writer: W) -> Box<dyn SinkWriter>
where
    W: Write + 'static,
{
    match environment.stream_kind() {
        #[cfg(feature = "color")]
        StreamKind::Styled => Box::new(crate::StyledWriter::new(writer)),
        StreamKind::RichDisplay => Box::new(RichDisplayWriter::new(writer)),
        _ => Box::new(PlainWriter::new(writer)),
    }
}
