//! crates/sitelog/src/dispatch.rs
//! Destinations a logger fans each entry out to.

use std::fmt;
use std::io::{self, Write};
use std::path::Path;

use sitelog_sink::{Encoding, Environment, FileMode, FileSink, Severity, SinkWriter, select_writer};

use crate::CallSite;

/// Width of the call-site column in a formatted line.
const SITE_WIDTH: usize = 28;

/// Formats the part of a line that follows the severity label.
///
/// ```
/// use sitelog::{CallSite, format_body};
///
/// let body = format_body(&CallSite::new("main.rs", 12), "hello");
/// assert_eq!(body, " main.rs:12                   hello\n");
/// ```
pub fn format_body(site: &CallSite, message: &str) -> String {
    format!(" {:<width$} {message}\n", site.to_string(), width = SITE_WIDTH)
}

/// A destination for log entries.
///
/// A logger calls every registered dispatcher in registration order with the
/// same [`CallSite`], so all destinations report an identical location.
/// Errors are returned to the logger, which reports and discards them.
pub trait Dispatch {
    /// Delivers one entry. `severity` is `None` for unformatted messages.
    fn dispatch(
        &mut self,
        severity: Option<Severity>,
        site: &CallSite,
        message: &str,
    ) -> io::Result<()>;

    /// Releases any resource the dispatcher holds. The default does nothing.
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Formats entries and hands them to a stream [`SinkWriter`].
pub struct StreamDispatch {
    writer: Box<dyn SinkWriter>,
    encoding: Encoding,
}

impl StreamDispatch {
    /// Wraps an already selected writer.
    pub fn new(writer: Box<dyn SinkWriter>, encoding: Encoding) -> Self {
        Self { writer, encoding }
    }

    /// Selects the writer for `environment` around `target`.
    pub fn for_environment<W>(environment: &Environment, target: W, encoding: Encoding) -> Self
    where
        W: Write + 'static,
    {
        Self::new(select_writer(environment, target), encoding)
    }
}

impl Dispatch for StreamDispatch {
    fn dispatch(
        &mut self,
        severity: Option<Severity>,
        site: &CallSite,
        message: &str,
    ) -> io::Result<()> {
        let label = Severity::label_for(severity);
        let body = format_body(site, message);
        self.writer
            .write_entry(severity, &label, &body, &self.encoding)
    }
}

impl fmt::Debug for StreamDispatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamDispatch")
            .field("encoding", &self.encoding)
            .finish_non_exhaustive()
    }
}

/// Writes formatted entries to a log file.
#[derive(Debug)]
pub struct FileDispatch {
    sink: FileSink,
    encoding: Encoding,
}

impl FileDispatch {
    /// Opens `path` in the given mode.
    pub fn open(path: &Path, mode: FileMode, encoding: Encoding) -> io::Result<Self> {
        let sink = FileSink::open(path, mode)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "sitelog::file", path = %path.display(), ?mode, "opened log file");
        Ok(Self { sink, encoding })
    }

    /// Path of the log file.
    pub fn path(&self) -> &Path {
        self.sink.path()
    }

    /// Reports whether the file is still open.
    pub const fn is_open(&self) -> bool {
        self.sink.is_open()
    }
}

impl Dispatch for FileDispatch {
    fn dispatch(
        &mut self,
        severity: Option<Severity>,
        site: &CallSite,
        message: &str,
    ) -> io::Result<()> {
        let label = Severity::label_for(severity);
        let body = format_body(site, message);
        self.sink
            .write_entry(severity, &label, &body, &self.encoding)
    }

    fn close(&mut self) -> io::Result<()> {
        #[cfg(feature = "tracing")]
        if self.sink.is_open() {
            tracing::debug!(target: "sitelog::file", path = %self.sink.path().display(), "closing log file");
        }
        self.sink.close()
    }
}

/// Adapts a closure into a [`Dispatch`].
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use sitelog::{FnDispatch, Logger};
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&seen);
/// let logger = Logger::builder()
///     .dispatch(FnDispatch::new(move |_severity, site, message: &str| {
///         sink.borrow_mut().push(format!("{site} {message}"));
///         Ok(())
///     }))
///     .build()?;
///
/// logger.info("ready");
/// assert!(seen.borrow()[0].ends_with(" ready"));
/// # Ok::<(), sitelog::ConfigError>(())
/// ```
pub struct FnDispatch<F> {
    func: F,
}

impl<F> FnDispatch<F>
where
    F: FnMut(Option<Severity>, &CallSite, &str) -> io::Result<()>,
{
    /// Wraps `func`.
    pub const fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> Dispatch for FnDispatch<F>
where
    F: FnMut(Option<Severity>, &CallSite, &str) -> io::Result<()>,
{
    fn dispatch(
        &mut self,
        severity: Option<Severity>,
        site: &CallSite,
        message: &str,
    ) -> io::Result<()> {
        (self.func)(severity, site, message)
    }
}

impl<F> fmt::Debug for FnDispatch<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnDispatch").finish_non_exhaustive()
    }
}
