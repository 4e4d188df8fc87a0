#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/sitelog/src/lib.rs
//!
//! # Overview
//!
//! `sitelog` is a synchronous, leveled logger that tags every entry with the
//! file and line it was logged from. Entries are filtered by a [`Level`],
//! formatted as `LABEL path:line message` and fanned out to one or more
//! [`Dispatch`] destinations: a styled terminal, a plain stream, a rich
//! notebook display or a file.
//!
//! # Design
//!
//! - [`Logger`] owns the level, encoding, enabled flag and the ordered list
//!   of dispatchers. Its severity methods are `#[track_caller]`, so the call
//!   site is the caller's location without any frame walking.
//! - [`FileLogger`] assembles a stream dispatcher and a [`FileDispatch`]
//!   behind the same façade; both see the same [`CallSite`].
//! - [`warnings`] provides a per-thread warning hook, and
//!   [`WarningRedirector`] temporarily routes it into a logger.
//! - [`format_exception`] and [`log_exception`] report an error with its
//!   backtrace and source chain.
//! - With the `tracing` feature, [`tracing_bridge::WarningLayer`] feeds
//!   `tracing::warn!` events into the warning hook and the crate reports
//!   failed writes through `tracing`.
//!
//! The physical writers live in the `sitelog-sink` crate and are re-exported
//! where the façade needs them.
//!
//! # Invariants
//!
//! - A disabled logger performs no call-site resolution and no writes.
//! - Every dispatcher of a logger receives an entry in registration order
//!   with one shared [`CallSite`].
//! - Write failures never propagate to the code that logged.
//! - Dropping a [`WarningRedirector`] restores exactly the handler it
//!   replaced, including while unwinding.
//!
//! # Errors
//!
//! Constructors return [`ConfigError`] for an unknown level, a bad encoding,
//! a zero path depth, a missing file target or an unopenable file.
//! [`CallSiteError`] is returned when a forwarded warning carries no location.
//!
//! # Examples
//!
//! ```
//! use sitelog::{Environment, Logger};
//! use std::cell::RefCell;
//! use std::io::Write;
//! use std::rc::Rc;
//!
//! #[derive(Clone, Default)]
//! struct Shared(Rc<RefCell<Vec<u8>>>);
//!
//! impl Write for Shared {
//!     fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
//!         self.0.borrow_mut().extend_from_slice(buf);
//!         Ok(buf.len())
//!     }
//!     fn flush(&mut self) -> std::io::Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! let out = Shared::default();
//! let logger = Logger::builder()
//!     .level_name("info")
//!     .environment(Environment::plain())
//!     .writer(out.clone())
//!     .build()?;
//!
//! logger.debug("hidden");
//! logger.info("hello");
//!
//! let text = String::from_utf8(out.0.borrow().clone()).unwrap();
//! assert!(text.starts_with("INFO:    "));
//! assert_eq!(text.lines().count(), 1);
//! assert!(text.ends_with(" hello\n"));
//! # Ok::<(), sitelog::ConfigError>(())
//! ```

mod callsite;
mod dispatch;
mod error;
mod file_logger;
mod level;
mod logger;
mod macros;
mod trace;
#[cfg(feature = "tracing")]
pub mod tracing_bridge;
pub mod warnings;

pub use callsite::{CallSite, Frame};
pub use dispatch::{Dispatch, FileDispatch, FnDispatch, StreamDispatch, format_body};
pub use error::{CallSiteError, ConfigError};
pub use file_logger::{FileLogger, FileLoggerBuilder, FileLoggerConfig};
pub use level::{Level, should_emit};
pub use logger::{Logger, LoggerBuilder, LoggerConfig, get_logger, get_logger_for_debug};
pub use trace::{format_exception, log_exception};
pub use warnings::{WarningRecord, WarningRedirector};

pub use sitelog_sink::{Encoding, EncodingError, Environment, FileMode, Severity, SinkWriter, StreamKind};
