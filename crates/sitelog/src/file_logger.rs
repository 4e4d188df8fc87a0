//! crates/sitelog/src/file_logger.rs
//! Logger that writes to a file, a stream, or both.

use std::fmt;
use std::io::{self, Write};
use std::ops::Deref;
use std::path::{Path, PathBuf};

use sitelog_sink::{Environment, FileMode};

use crate::dispatch::{Dispatch, FileDispatch};
use crate::logger::{LoggerBuilder, default_stream};
use crate::{ConfigError, Level, Logger, LoggerConfig};

/// Plain configuration values for a [`FileLogger`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FileLoggerConfig {
    /// Level, encoding and path depth.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub logger: LoggerConfig,
    /// Log file path. `None` logs to the stream only.
    pub path: Option<PathBuf>,
    /// Whether an existing file is truncated or appended to.
    pub mode: FileMode,
    /// Whether entries are also written to the stream.
    pub include_stream: bool,
}

impl Default for FileLoggerConfig {
    fn default() -> Self {
        Self {
            logger: LoggerConfig::default(),
            path: None,
            mode: FileMode::Truncate,
            include_stream: true,
        }
    }
}

/// A [`Logger`] whose dispatchers are a stream, a file, or both.
///
/// With both, the stream dispatcher runs first and the file second, and
/// both receive the same call site. The file stays open until
/// [`FileLogger::close`] or until the logger is dropped.
///
/// ```
/// use sitelog::{Environment, FileLogger};
///
/// let dir = std::env::temp_dir().join(format!("sitelog-doc-{}", std::process::id()));
/// std::fs::create_dir_all(&dir)?;
/// let path = dir.join("run.log");
///
/// let logger = FileLogger::builder()
///     .path(&path)
///     .include_stream(false)
///     .environment(Environment::plain())
///     .build()?;
/// logger.info("saved");
/// logger.close()?;
///
/// assert!(std::fs::read_to_string(&path)?.ends_with(" saved\n"));
/// # std::fs::remove_dir_all(&dir)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct FileLogger {
    logger: Logger,
    path: Option<PathBuf>,
    include_stream: bool,
}

impl FileLogger {
    /// Builds a file logger from plain values.
    pub fn new(config: FileLoggerConfig) -> Result<Self, ConfigError> {
        Self::builder().config(config).build()
    }

    /// Starts a [`FileLoggerBuilder`].
    pub fn builder() -> FileLoggerBuilder {
        FileLoggerBuilder::default()
    }

    /// Path of the log file, if one is written.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Reports whether entries are also written to the stream.
    pub const fn includes_stream(&self) -> bool {
        self.include_stream
    }

    /// Flushes and closes the log file.
    pub fn close(self) -> io::Result<()> {
        self.logger.close()
    }

    /// Runs `body` with this logger and closes the file afterwards.
    ///
    /// If `body` panics the file is still closed while unwinding.
    pub fn scope<T>(self, body: impl FnOnce(&Self) -> T) -> io::Result<T> {
        let value = body(&self);
        self.close()?;
        Ok(value)
    }

    /// Returns the underlying logger, which keeps the file open.
    pub fn into_logger(self) -> Logger {
        self.logger
    }
}

impl Deref for FileLogger {
    type Target = Logger;

    fn deref(&self) -> &Logger {
        &self.logger
    }
}

impl AsRef<Logger> for FileLogger {
    fn as_ref(&self) -> &Logger {
        &self.logger
    }
}

impl fmt::Display for FileLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FileLogger(level={:?}, path={:?}, include_stream={}, encoding={:?})",
            self.logger.level().as_str(),
            self.path,
            self.include_stream,
            self.logger.encoding().label()
        )
    }
}

impl fmt::Debug for FileLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Builder for [`FileLogger`].
///
/// Dispatchers added with [`FileLoggerBuilder::dispatch`] take the place of
/// the default stream. When the stream is excluded they run after the file.
#[derive(Debug)]
pub struct FileLoggerBuilder {
    logger: LoggerBuilder,
    path: Option<PathBuf>,
    mode: FileMode,
    include_stream: bool,
}

impl Default for FileLoggerBuilder {
    fn default() -> Self {
        Self {
            logger: LoggerBuilder::default(),
            path: None,
            mode: FileMode::Truncate,
            include_stream: true,
        }
    }
}

impl FileLoggerBuilder {
    /// Replaces all plain values.
    pub fn config(mut self, config: FileLoggerConfig) -> Self {
        self.logger = self.logger.config(config.logger);
        self.path = config.path;
        self.mode = config.mode;
        self.include_stream = config.include_stream;
        self
    }

    /// Sets the level.
    pub fn level(mut self, level: Level) -> Self {
        self.logger = self.logger.level(level);
        self
    }

    /// Sets the level by name, parsed when the logger is built.
    pub fn level_name(mut self, name: impl Into<String>) -> Self {
        self.logger = self.logger.level_name(name);
        self
    }

    /// Sets the encoding label used for the file.
    pub fn encoding(mut self, label: impl Into<String>) -> Self {
        self.logger = self.logger.encoding(label);
        self
    }

    /// Sets how many trailing path segments call sites show.
    pub fn path_depth(mut self, depth: usize) -> Self {
        self.logger = self.logger.path_depth(depth);
        self
    }

    /// Uses `environment` instead of probing the process.
    pub fn environment(mut self, environment: Environment) -> Self {
        self.logger = self.logger.environment(environment);
        self
    }

    /// Sends stream output to `writer` instead of standard output.
    pub fn writer<W>(mut self, writer: W) -> Self
    where
        W: Write + 'static,
    {
        self.logger = self.logger.writer(writer);
        self
    }

    /// Adds a dispatcher used in place of the default stream, or after the
    /// file when the stream is excluded.
    pub fn dispatch<D>(mut self, dispatch: D) -> Self
    where
        D: Dispatch + 'static,
    {
        self.logger = self.logger.dispatch(dispatch);
        self
    }

    /// Sets the log file path.
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets how an existing file is treated.
    pub fn mode(mut self, mode: FileMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets whether entries are also written to the stream.
    pub fn include_stream(mut self, include: bool) -> Self {
        self.include_stream = include;
        self
    }

    /// Validates the configuration, opens the file and builds the logger.
    pub fn build(self) -> Result<FileLogger, ConfigError> {
        let (level, encoding, path_depth) = self.logger.validate()?;
        if self.path.is_none() && !self.include_stream {
            return Err(ConfigError::NoTarget);
        }

        let environment = self.logger.resolved_environment();
        let (writer, custom) = self.logger.into_stream_parts();
        let mut dispatchers: Vec<Box<dyn Dispatch>> = Vec::new();

        let trailing = if !self.include_stream {
            custom
        } else if custom.is_empty() {
            dispatchers.push(Box::new(default_stream(&environment, writer, &encoding)));
            Vec::new()
        } else {
            dispatchers.extend(custom);
            Vec::new()
        };

        if let Some(path) = &self.path {
            check_parent(path)?;
            let file = FileDispatch::open(path, self.mode, encoding.clone()).map_err(|source| {
                ConfigError::Open {
                    path: path.clone(),
                    source,
                }
            })?;
            dispatchers.push(Box::new(file));
        }
        dispatchers.extend(trailing);

        let logger = Logger::assemble(level, encoding, path_depth, environment.session, dispatchers);
        Ok(FileLogger {
            logger,
            path: self.path,
            include_stream: self.include_stream,
        })
    }
}

fn check_parent(path: &Path) -> Result<(), ConfigError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
            Err(ConfigError::MissingParent {
                path: path.to_path_buf(),
            })
        }
        _ => Ok(()),
    }
}
