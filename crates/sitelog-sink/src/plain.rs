//! crates/sitelog-sink/src/plain.rs
//! Unstyled stream writer.

use std::io::{self, Write};

use crate::writer::compose;
use crate::{Encoding, Severity, SinkWriter};

/// Writes entries verbatim to any [`Write`] target.
///
/// This is the writer used when output is redirected to a file or pipe, or
/// when terminal styling is unavailable.
///
/// ```
/// use sitelog_sink::{Encoding, PlainWriter, SinkWriter};
///
/// let mut writer = PlainWriter::new(Vec::new());
/// writer.write_entry(None, "", "as is\n", &Encoding::utf8())?;
/// assert_eq!(writer.into_inner(), b"as is\n".to_vec());
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct PlainWriter<W> {
    writer: W,
}

impl<W> PlainWriter<W> {
    /// Wraps `writer`.
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Borrows the underlying writer.
    pub const fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Consumes the writer and returns the wrapped target.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> SinkWriter for PlainWriter<W>
where
    W: Write,
{
    fn write_entry(
        &mut self,
        severity: Option<Severity>,
        label: &str,
        body: &str,
        _encoding: &Encoding,
    ) -> io::Result<()> {
        let line = compose(severity, label, body);
        self.writer.write_all(line.as_bytes())
    }
}
