#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/sitelog-sink/src/lib.rs
//!
//! # Overview
//!
//! `sitelog-sink` provides the physical end of the sitelog pipeline: the
//! [`SinkWriter`] trait and the concrete writers that put one pre-formatted
//! log entry onto one medium. The `sitelog` crate performs level filtering
//! and call-site resolution, then hands each entry to a writer from this
//! crate.
//!
//! # Design
//!
//! Every writer receives the same four pieces: the optional [`Severity`] tag,
//! the fixed-width label produced by [`Severity::label`], the formatted body
//! (call site, message and trailing newline) and the configured
//! [`Encoding`]. Three stream writers exist:
//!
//! - [`StyledWriter`] colours the entry with ANSI escapes (feature `color`).
//! - [`PlainWriter`] writes the entry verbatim.
//! - [`RichDisplayWriter`] wraps the entry in an HTML block for rich hosts.
//!
//! [`FileSink`] owns an open file and flushes after every entry. Which stream
//! writer is used is decided once from an [`Environment`], which is probed
//! at first use but can always be supplied explicitly.
//!
//! # Invariants
//!
//! - Each call to [`SinkWriter::write_entry`] performs exactly one write to
//!   the underlying medium (plus a flush for files).
//! - An entry without a severity is written without its label.
//! - Terminal styling is reset after every entry.
//!
//! # Errors
//!
//! Writers surface [`std::io::Error`] from the medium, except
//! [`StyledWriter`], which degrades to a diagnostic fallback write instead.
//! Encoding labels are validated up front and rejected with
//! [`EncodingError`].
//!
//! # Examples
//!
//! ```
//! use sitelog_sink::{Encoding, PlainWriter, Severity, SinkWriter};
//!
//! let mut writer = PlainWriter::new(Vec::new());
//! let label = Severity::Info.label();
//! writer
//!     .write_entry(Some(Severity::Info), &label, " main.rs:3 ready\n", &Encoding::utf8())
//!     .unwrap();
//! assert_eq!(writer.into_inner(), b"INFO:    main.rs:3 ready\n".to_vec());
//! ```

mod encoding;
mod environment;
mod file;
mod plain;
mod rich;
mod severity;
#[cfg(feature = "color")]
mod styled;
mod writer;

pub use encoding::{Encoding, EncodingError};
pub use environment::{Environment, StreamKind, select_writer};
pub use file::{FileMode, FileSink};
pub use plain::PlainWriter;
pub use rich::{RichDisplayWriter, render_html};
pub use severity::Severity;
#[cfg(feature = "color")]
pub use styled::{StyledWriter, write_error};
pub use writer::SinkWriter;
