//! crates/sitelog-sink/src/writer.rs
//! The trait every sink writer implements.

use std::io;

use crate::{Encoding, Severity};

/// Writes one formatted log entry to a single medium.
///
/// `label` is the fixed-width severity label (see [`Severity::label`]) and
/// `body` is the rest of the line, already carrying the call site, the
/// message and the trailing newline. Implementations perform exactly one
/// write per call and hold no state beyond the medium they own.
pub trait SinkWriter {
    /// Writes a single entry.
    ///
    /// When `severity` is `None` the entry is an unformatted message and the
    /// label is not written.
    fn write_entry(
        &mut self,
        severity: Option<Severity>,
        label: &str,
        body: &str,
        encoding: &Encoding,
    ) -> io::Result<()>;
}

impl<T> SinkWriter for Box<T>
where
    T: SinkWriter + ?Sized,
{
    fn write_entry(
        &mut self,
        severity: Option<Severity>,
        label: &str,
        body: &str,
        encoding: &Encoding,
    ) -> io::Result<()> {
        (**self).write_entry(severity, label, body, encoding)
    }
}

/// Joins label and body the way every writer lays them out.
pub(crate) fn compose(severity: Option<Severity>, label: &str, body: &str) -> String {
    if severity.is_some() {
        let mut line = String::with_capacity(label.len() + body.len());
        line.push_str(label);
        line.push_str(body);
        line
    } else {
        body.to_owned()
    }
}
