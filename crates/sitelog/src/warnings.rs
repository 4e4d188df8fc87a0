//! crates/sitelog/src/warnings.rs
//! Per-thread warning hook and the RAII redirector that routes warnings
//! into a [`Logger`].

use std::cell::RefCell;
use std::fmt;
use std::io::{self, Write};
use std::panic::Location;
use std::rc::Rc;

use crate::{CallSiteError, Logger};

/// A warning raised by library code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WarningRecord {
    /// Warning text.
    pub message: String,
    /// Warning category, `"Warning"` unless set.
    pub category: String,
    /// Source file the warning was raised from, if known.
    pub file: Option<String>,
    /// Line the warning was raised from.
    pub line: u32,
}

impl WarningRecord {
    /// A warning with the default category and no location.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            category: String::from("Warning"),
            file: None,
            line: 0,
        }
    }

    /// A warning located at the caller.
    #[track_caller]
    pub fn here(message: impl Into<String>) -> Self {
        let location = Location::caller();
        Self::new(message).at(location.file(), location.line())
    }

    /// Sets the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Sets the location.
    pub fn at(mut self, file: impl Into<String>, line: u32) -> Self {
        self.file = Some(file.into());
        self.line = line;
        self
    }
}

impl fmt::Display for WarningRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {}: {}",
            self.file.as_deref().unwrap_or("<unknown>"),
            self.line,
            self.category,
            self.message
        )
    }
}

/// A function that receives every warning raised on the current thread.
pub type WarningHandler = Rc<dyn Fn(&WarningRecord) -> Result<(), CallSiteError>>;

thread_local! {
    static HANDLER: RefCell<WarningHandler> = RefCell::new(default_handler());
}

fn default_handler() -> WarningHandler {
    Rc::new(write_to_stderr)
}

fn write_to_stderr(record: &WarningRecord) -> Result<(), CallSiteError> {
    let _ = io::stderr().write_all(format_warning(record).as_bytes());
    Ok(())
}

/// Formats a warning the way the default handler prints it.
///
/// ```
/// use sitelog::warnings::{WarningRecord, format_warning};
///
/// let record = WarningRecord::new("deprecated").with_category("DeprecationWarning").at("cfg.rs", 4);
/// assert_eq!(format_warning(&record), "cfg.rs:4: DeprecationWarning: deprecated\n");
/// ```
pub fn format_warning(record: &WarningRecord) -> String {
    format!("{record}\n")
}

/// Routes `record` to the handler installed on this thread.
///
/// The handler is cloned out of the slot before it runs, so a handler may
/// itself install or restore handlers.
pub fn warn(record: &WarningRecord) -> Result<(), CallSiteError> {
    let current = handler();
    current(record)
}

/// Raises a warning located at the caller.
#[track_caller]
pub fn warn_here(message: &str) -> Result<(), CallSiteError> {
    warn(&WarningRecord::here(message))
}

/// Installs `new` and returns the handler it replaced.
pub fn set_handler(new: WarningHandler) -> WarningHandler {
    HANDLER.with(|slot| slot.replace(new))
}

/// Returns the handler installed on this thread.
pub fn handler() -> WarningHandler {
    HANDLER.with(|slot| Rc::clone(&slot.borrow()))
}

/// Installs the standard-error handler and returns the one it replaced.
pub fn reset_handler() -> WarningHandler {
    set_handler(default_handler())
}

/// Redirects warnings on the current thread into a logger while alive.
///
/// Creating the redirector saves the installed handler and replaces it with
/// one that forwards each warning to the logger at WARNING severity, located
/// at the warning's own file (base name) and line. Forwarded warnings bypass
/// the logger's level but not its enabled flag. Dropping the redirector
/// reinstates exactly the saved handler, so redirectors nest.
///
/// ```
/// use std::rc::Rc;
/// use sitelog::Logger;
/// use sitelog::warnings::{self, WarningRedirector, WarningRecord};
///
/// let logger = Rc::new(Logger::new("error")?);
/// {
///     let _redirect = WarningRedirector::new(Rc::clone(&logger));
///     warnings::warn(&WarningRecord::new("low disk").at("/srv/disk.rs", 40))?;
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[must_use = "dropping the redirector immediately restores the previous handler"]
pub struct WarningRedirector {
    previous: Option<WarningHandler>,
}

impl WarningRedirector {
    /// Starts redirecting warnings into `logger`.
    pub fn new<L>(logger: Rc<L>) -> Self
    where
        L: AsRef<Logger> + 'static,
    {
        let forward: WarningHandler = Rc::new(move |record: &WarningRecord| {
            AsRef::<Logger>::as_ref(&*logger).forward_warning(record)
        });
        Self {
            previous: Some(set_handler(forward)),
        }
    }

    /// Runs `body` with warnings redirected into `logger`.
    pub fn scope<L, T>(logger: Rc<L>, body: impl FnOnce() -> T) -> T
    where
        L: AsRef<Logger> + 'static,
    {
        let _redirect = Self::new(logger);
        body()
    }

    /// Returns the handler that will be restored on drop.
    pub fn previous_handler(&self) -> Option<&WarningHandler> {
        self.previous.as_ref()
    }
}

impl Drop for WarningRedirector {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            set_handler(previous);
        }
    }
}

impl fmt::Debug for WarningRedirector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WarningRedirector")
            .field("active", &self.previous.is_some())
            .finish()
    }
}
