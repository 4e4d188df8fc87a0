//! crates/sitelog-sink/src/styled.rs
//! ANSI-coloured terminal writer.

use std::io::{self, Write};

use anstyle::{AnsiColor, Color, Style};

use crate::writer::compose;
use crate::{Encoding, Severity, SinkWriter};

/// Style applied to an entry of the given severity.
///
/// Entries without a severity use the error colour.
fn style_for(severity: Option<Severity>) -> Style {
    let color = severity.map_or(AnsiColor::Red, Severity::terminal_color);
    Style::new().fg_color(Some(Color::Ansi(color))).bold()
}

/// Writes colour-coded entries to a terminal.
///
/// Each entry is emitted as `style + label + body + reset`, so styling never
/// leaks into the next line. If the primary writer fails (for example a
/// closed pipe), a short diagnostic naming the encoding is written to the
/// fallback stream followed by the raw body, and the failure is absorbed.
#[derive(Debug)]
pub struct StyledWriter<W, F = io::Stdout> {
    writer: W,
    fallback: F,
}

impl<W> StyledWriter<W> {
    /// Wraps `writer`, falling back to standard output on failure.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            fallback: io::stdout(),
        }
    }
}

impl<W, F> StyledWriter<W, F> {
    /// Wraps `writer` with an explicit fallback stream.
    pub const fn with_fallback(writer: W, fallback: F) -> Self {
        Self { writer, fallback }
    }

    /// Borrows the primary writer.
    pub const fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Borrows the fallback writer.
    pub const fn fallback(&self) -> &F {
        &self.fallback
    }

    /// Returns the primary and fallback writers.
    pub fn into_parts(self) -> (W, F) {
        (self.writer, self.fallback)
    }
}

impl<W, F> SinkWriter for StyledWriter<W, F>
where
    W: Write,
    F: Write,
{
    fn write_entry(
        &mut self,
        severity: Option<Severity>,
        label: &str,
        body: &str,
        encoding: &Encoding,
    ) -> io::Result<()> {
        let style = style_for(severity);
        let line = format!(
            "{}{}{}",
            style.render(),
            compose(severity, label, body),
            style.render_reset()
        );

        if self.writer.write_all(line.as_bytes()).is_err() {
            let notice = format!(
                "error writing line...encoding={:?}\n{body}",
                encoding.label()
            );
            self.fallback.write_all(notice.as_bytes())?;
        }
        Ok(())
    }
}

/// Writes `message` to `out` in the error style, followed by a newline.
///
/// ```
/// let mut out = Vec::new();
/// sitelog_sink::write_error(&mut out, "disk full").unwrap();
/// let text = String::from_utf8(out).unwrap();
/// assert!(text.contains("disk full"));
/// assert!(text.starts_with('\u{1b}'));
/// ```
pub fn write_error<W: Write + ?Sized>(out: &mut W, message: &str) -> io::Result<()> {
    let style = style_for(Some(Severity::Error));
    writeln!(out, "{}{message}{}", style.render(), style.render_reset())
}
