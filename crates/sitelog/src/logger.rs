//! crates/sitelog/src/logger.rs
//! The leveled logger façade.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::io::{self, Write};
use std::panic::Location;

use sitelog_sink::{Encoding, Environment, Severity};

use crate::dispatch::{Dispatch, StreamDispatch};
use crate::warnings::WarningRecord;
use crate::{CallSite, CallSiteError, ConfigError, Frame, Level};

/// Plain configuration values for a [`Logger`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LoggerConfig {
    /// Emission threshold.
    pub level: Level,
    /// Encoding label used for file output.
    pub encoding: String,
    /// Number of trailing path segments shown in call sites.
    pub path_depth: usize,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: Level::Debug,
            encoding: String::from("utf-8"),
            path_depth: 1,
        }
    }
}

/// A synchronous leveled logger.
///
/// Each entry is filtered by the level policy, tagged with the call site of
/// the code that logged it and handed to every registered [`Dispatch`] in
/// order. Write failures never reach the caller.
///
/// The logger uses interior mutability without locking and is therefore
/// neither `Send` nor `Sync`.
pub struct Logger {
    level: Level,
    encoding: Encoding,
    path_depth: usize,
    session: Option<String>,
    enabled: Cell<bool>,
    dispatchers: RefCell<Vec<Box<dyn Dispatch>>>,
}

impl Logger {
    /// Builds a logger writing to standard output at the named level.
    ///
    /// ```
    /// use sitelog::{ConfigError, Level, Logger};
    ///
    /// assert_eq!(Logger::new("info")?.level(), Level::Info);
    /// assert!(matches!(Logger::new("loud"), Err(ConfigError::InvalidLevel(_))));
    /// # Ok::<(), ConfigError>(())
    /// ```
    pub fn new(level: &str) -> Result<Self, ConfigError> {
        Self::builder().level_name(level).build()
    }

    /// Builds a logger writing to standard output at `level` with the
    /// default encoding.
    pub fn with_level(level: Level) -> Self {
        let environment = Environment::current();
        let encoding = Encoding::utf8();
        let stream = StreamDispatch::for_environment(environment, io::stdout(), encoding.clone());
        Self::assemble(
            level,
            encoding,
            1,
            environment.session.clone(),
            vec![Box::new(stream)],
        )
    }

    /// Builds a logger writing to standard output from plain values.
    pub fn with_config(config: LoggerConfig) -> Result<Self, ConfigError> {
        Self::builder().config(config).build()
    }

    /// Starts a [`LoggerBuilder`].
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    pub(crate) fn assemble(
        level: Level,
        encoding: Encoding,
        path_depth: usize,
        session: Option<String>,
        dispatchers: Vec<Box<dyn Dispatch>>,
    ) -> Self {
        Self {
            level,
            encoding,
            path_depth,
            session,
            enabled: Cell::new(true),
            dispatchers: RefCell::new(dispatchers),
        }
    }

    /// Logs at DEBUG severity.
    #[track_caller]
    pub fn debug(&self, message: &str) {
        self.log_caller(Severity::Debug, message);
    }

    /// Logs at INFO severity.
    #[track_caller]
    pub fn info(&self, message: &str) {
        self.log_caller(Severity::Info, message);
    }

    /// Logs at WARNING severity.
    #[track_caller]
    pub fn warning(&self, message: &str) {
        self.log_caller(Severity::Warning, message);
    }

    /// Logs at ERROR severity.
    #[track_caller]
    pub fn error(&self, message: &str) {
        self.log_caller(Severity::Error, message);
    }

    /// Logs at CRITICAL severity.
    #[track_caller]
    pub fn critical(&self, message: &str) {
        self.log_caller(Severity::Critical, message);
    }

    /// Logs at EXCEPTION severity, which every level emits.
    #[track_caller]
    pub fn exception(&self, message: &str) {
        self.log_caller(Severity::Exception, message);
    }

    #[track_caller]
    fn log_caller(&self, severity: Severity, message: &str) {
        if !self.would_emit(severity) {
            return;
        }
        let site = CallSite::from_location(Location::caller(), self.path_depth);
        self.fan_out(Some(severity), &site, message);
    }

    /// Logs at an explicit call site, subject to the level policy.
    pub fn log_at(&self, severity: Severity, site: &CallSite, message: &str) {
        if self.would_emit(severity) {
            self.fan_out(Some(severity), site, message);
        }
    }

    /// Dispatches `message` regardless of level.
    ///
    /// The call site is always the caller's file base name. `severity` of
    /// `None` writes the entry without a label. Disabled loggers stay silent.
    #[track_caller]
    pub fn simple_msg(&self, message: &str, severity: Option<Severity>) {
        if !self.enabled.get() {
            return;
        }
        let site = CallSite::from_location(Location::caller(), 1);
        self.fan_out(severity, &site, message);
    }

    /// Forwards a warning at its own location, regardless of level.
    ///
    /// Warnings without a file are attributed to the session the logger was
    /// built in. A warning that has neither is an error.
    pub fn forward_warning(&self, record: &WarningRecord) -> Result<(), CallSiteError> {
        if !self.enabled.get() {
            return Ok(());
        }
        let frame = Frame {
            file: record.file.as_deref(),
            session: self.session.as_deref(),
            line: record.line,
        };
        let site = CallSite::resolve(&frame, 1)?;
        self.fan_out(Some(Severity::Warning), &site, &record.message);
        Ok(())
    }

    /// Reports whether an entry of `severity` would currently be dispatched.
    pub fn would_emit(&self, severity: Severity) -> bool {
        self.enabled.get() && self.level.allows(severity)
    }

    fn fan_out(&self, severity: Option<Severity>, site: &CallSite, message: &str) {
        let Ok(mut dispatchers) = self.dispatchers.try_borrow_mut() else {
            #[cfg(feature = "tracing")]
            tracing::debug!(target: "sitelog::dispatch", %site, "dropped re-entrant log entry");
            return;
        };
        for dispatcher in dispatchers.iter_mut() {
            if let Err(error) = dispatcher.dispatch(severity, site, message) {
                report_write_error(&error);
            }
        }
    }

    /// Closes every dispatcher, returning the first error.
    ///
    /// Every dispatcher is closed even if an earlier one fails.
    pub fn close(&self) -> io::Result<()> {
        let mut first = Ok(());
        for dispatcher in self.dispatchers.borrow_mut().iter_mut() {
            let result = dispatcher.close();
            if first.is_ok() {
                first = result;
            }
        }
        first
    }

    /// Resumes dispatching.
    pub fn enable(&self) {
        self.enabled.set(true);
    }

    /// Stops dispatching; log calls return without any work.
    pub fn disable(&self) {
        self.enabled.set(false);
    }

    /// Sets the enabled flag.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
    }

    /// Reports whether the logger dispatches.
    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    /// The configured level.
    pub const fn level(&self) -> Level {
        self.level
    }

    /// The configured encoding.
    pub const fn encoding(&self) -> &Encoding {
        &self.encoding
    }

    /// Number of trailing path segments shown in call sites.
    pub const fn path_depth(&self) -> usize {
        self.path_depth
    }

    /// Session identifier used for warnings without a file.
    pub fn session(&self) -> Option<&str> {
        self.session.as_deref()
    }

    /// Number of registered dispatchers.
    pub fn dispatcher_count(&self) -> usize {
        self.dispatchers.borrow().len()
    }
}

fn report_write_error(error: &io::Error) {
    #[cfg(feature = "tracing")]
    tracing::warn!(target: "sitelog::dispatch", %error, "failed to write log entry");
    #[cfg(not(feature = "tracing"))]
    let _ = error;
}

impl AsRef<Self> for Logger {
    fn as_ref(&self) -> &Self {
        self
    }
}

impl fmt::Display for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Logger(level={:?}, encoding={:?})",
            self.level.as_str(),
            self.encoding.label()
        )
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Builder for [`Logger`].
///
/// Values are validated by [`LoggerBuilder::build`]. Without an explicit
/// dispatcher the logger writes to standard output (or the target given to
/// [`LoggerBuilder::writer`]) through the stream writer the environment
/// calls for.
///
/// ```
/// use sitelog::{Environment, Level, Logger};
///
/// let logger = Logger::builder()
///     .level(Level::Warning)
///     .encoding("latin1")
///     .path_depth(2)
///     .environment(Environment::plain())
///     .writer(std::io::sink())
///     .build()?;
/// assert_eq!(logger.to_string(), r#"Logger(level="warning", encoding="latin1")"#);
/// # Ok::<(), sitelog::ConfigError>(())
/// ```
#[derive(Default)]
pub struct LoggerBuilder {
    config: LoggerConfig,
    level_name: Option<String>,
    environment: Option<Environment>,
    writer: Option<Box<dyn Write>>,
    dispatchers: Vec<Box<dyn Dispatch>>,
}

impl LoggerBuilder {
    /// Replaces all plain values.
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self.level_name = None;
        self
    }

    /// Sets the level.
    pub fn level(mut self, level: Level) -> Self {
        self.config.level = level;
        self.level_name = None;
        self
    }

    /// Sets the level by name, parsed when the logger is built.
    pub fn level_name(mut self, name: impl Into<String>) -> Self {
        self.level_name = Some(name.into());
        self
    }

    /// Sets the encoding label.
    pub fn encoding(mut self, label: impl Into<String>) -> Self {
        self.config.encoding = label.into();
        self
    }

    /// Sets how many trailing path segments call sites show.
    pub fn path_depth(mut self, depth: usize) -> Self {
        self.config.path_depth = depth;
        self
    }

    /// Uses `environment` instead of probing the process.
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Sends the default stream output to `writer` instead of standard output.
    pub fn writer<W>(mut self, writer: W) -> Self
    where
        W: Write + 'static,
    {
        self.writer = Some(Box::new(writer));
        self
    }

    /// Adds a dispatcher. Once any is added the default stream is not created.
    pub fn dispatch<D>(mut self, dispatch: D) -> Self
    where
        D: Dispatch + 'static,
    {
        self.dispatchers.push(Box::new(dispatch));
        self
    }

    pub(crate) fn validate(&self) -> Result<(Level, Encoding, usize), ConfigError> {
        let level = match &self.level_name {
            Some(name) => name.parse()?,
            None => self.config.level,
        };
        let encoding = Encoding::new(&self.config.encoding)?;
        if self.config.path_depth == 0 {
            return Err(ConfigError::InvalidPathDepth(0));
        }
        Ok((level, encoding, self.config.path_depth))
    }

    pub(crate) fn resolved_environment(&self) -> Environment {
        self.environment
            .clone()
            .unwrap_or_else(|| Environment::current().clone())
    }

    /// Splits off the parts a file logger reuses.
    pub(crate) fn into_stream_parts(
        self,
    ) -> (Option<Box<dyn Write>>, Vec<Box<dyn Dispatch>>) {
        (self.writer, self.dispatchers)
    }

    /// Validates the configuration and builds the logger.
    pub fn build(self) -> Result<Logger, ConfigError> {
        let (level, encoding, path_depth) = self.validate()?;
        let environment = self.resolved_environment();
        let (writer, mut dispatchers) = self.into_stream_parts();
        if dispatchers.is_empty() {
            dispatchers.push(Box::new(default_stream(&environment, writer, &encoding)));
        }
        Ok(Logger::assemble(
            level,
            encoding,
            path_depth,
            environment.session,
            dispatchers,
        ))
    }
}

impl fmt::Debug for LoggerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerBuilder")
            .field("config", &self.config)
            .field("level_name", &self.level_name)
            .field("environment", &self.environment)
            .field("dispatchers", &self.dispatchers.len())
            .finish_non_exhaustive()
    }
}

/// Stream dispatcher for `writer`, or standard output when absent.
pub(crate) fn default_stream(
    environment: &Environment,
    writer: Option<Box<dyn Write>>,
    encoding: &Encoding,
) -> StreamDispatch {
    let target: Box<dyn Write> = writer.unwrap_or_else(|| Box::new(io::stdout()));
    StreamDispatch::for_environment(environment, target, encoding.clone())
}

/// Returns `existing`, or a new standard-output logger at the named level
/// whose file output would use `encoding`.
pub fn get_logger(
    existing: Option<Logger>,
    level: &str,
    encoding: &str,
) -> Result<Logger, ConfigError> {
    match existing {
        Some(logger) => Ok(logger),
        None => Logger::builder().level_name(level).encoding(encoding).build(),
    }
}

/// Returns `existing`, or a new standard-output logger whose level follows
/// an optional debug switch (see [`Level::from_debug_flag`]).
pub fn get_logger_for_debug(
    existing: Option<Logger>,
    debug: Option<bool>,
    encoding: &str,
) -> Result<Logger, ConfigError> {
    match existing {
        Some(logger) => Ok(logger),
        None => Logger::builder()
            .level(Level::from_debug_flag(debug))
            .encoding(encoding)
            .build(),
    }
}
