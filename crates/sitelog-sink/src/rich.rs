//! crates/sitelog-sink/src/rich.rs
//! HTML writer for rich notebook hosts.

use std::io::{self, Write};

use crate::writer::compose;
use crate::{Encoding, Severity, SinkWriter};

const BEGIN_MARKER: &str = "EVCXR_BEGIN_CONTENT text/html";
const END_MARKER: &str = "EVCXR_END_CONTENT";

/// Renders one entry as a coloured HTML fragment.
///
/// The text is escaped, so markup in a message is shown literally. Entries
/// without a severity are rendered in the error colour without a label.
///
/// ```
/// use sitelog_sink::{Severity, render_html};
///
/// let html = render_html(Some(Severity::Debug), "DEBUG:  ", " a.rs:1 <b>\n");
/// assert_eq!(html, "<text style=color:blue>DEBUG:   a.rs:1 &lt;b&gt;\n</text>");
/// ```
pub fn render_html(severity: Option<Severity>, label: &str, body: &str) -> String {
    let color = severity.map_or("red", Severity::html_color);
    let text = escape(&compose(severity, label, body));
    format!("<text style=color:{color}>{text}</text>")
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Emits entries as HTML display blocks understood by the evcxr kernel.
#[derive(Clone, Debug, Default)]
pub struct RichDisplayWriter<W> {
    writer: W,
}

impl<W> RichDisplayWriter<W> {
    /// Wraps `writer`, normally the process standard output.
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the writer and returns the wrapped target.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> SinkWriter for RichDisplayWriter<W>
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
        let block = format!(
            "{BEGIN_MARKER}\n{}\n{END_MARKER}\n",
            render_html(severity, label, body)
        );
        self.writer.write_all(block.as_bytes())
    }
}
