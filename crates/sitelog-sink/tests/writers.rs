//! Integration tests for the sink writers.
//!
//! These tests drive every writer through the [`SinkWriter`] trait object, the
//! way the `sitelog` dispatchers use them.

use std::fs;

use sitelog_sink::{
    Encoding, Environment, FileMode, FileSink, PlainWriter, RichDisplayWriter, Severity,
    SinkWriter, StreamKind, select_writer,
};
use test_support::{SharedBuffer, log_path, temp_dir};

fn write_all_severities(writer: &mut dyn SinkWriter) {
    for severity in Severity::ALL {
        writer
            .write_entry(
                Some(severity),
                &severity.label(),
                " app.rs:10                    step\n",
                &Encoding::utf8(),
            )
            .unwrap();
    }
}

// ============================================================================
// Plain Writer Tests
// ============================================================================

/// Verifies the label column and the body are joined without extra spacing.
#[test]
fn plain_lines_have_fixed_label_column() {
    let buffer = SharedBuffer::new();
    let mut writer = PlainWriter::new(buffer.clone());
    write_all_severities(&mut writer);

    let lines = buffer.lines();
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "DEBUG:   app.rs:10                    step");
    assert_eq!(lines[1], "INFO:    app.rs:10                    step");
    assert_eq!(lines[2], "WARNING: app.rs:10                    step");
    assert_eq!(lines[5], "EXCEPTION: app.rs:10                    step");
}

/// Verifies a boxed writer behaves like the writer it wraps.
#[test]
fn boxed_writer_forwards_entries() {
    let buffer = SharedBuffer::new();
    let mut boxed: Box<dyn SinkWriter> = Box::new(PlainWriter::new(buffer.clone()));
    boxed
        .write_entry(None, "", "unlabelled\n", &Encoding::utf8())
        .unwrap();
    assert_eq!(buffer.contents(), "unlabelled\n");
}

// ============================================================================
// Rich Display Tests
// ============================================================================

/// Verifies every entry becomes its own display block.
#[test]
fn rich_writer_emits_one_block_per_entry() {
    let buffer = SharedBuffer::new();
    let mut writer = RichDisplayWriter::new(buffer.clone());
    write_all_severities(&mut writer);

    let text = buffer.contents();
    assert_eq!(text.matches("EVCXR_BEGIN_CONTENT text/html").count(), 6);
    assert_eq!(text.matches("EVCXR_END_CONTENT").count(), 6);
    assert_eq!(text.matches("color:red").count(), 3);
}

// ============================================================================
// File Sink Tests
// ============================================================================

/// Verifies a file sink holds every entry once closed.
#[test]
fn file_sink_collects_all_entries() {
    let dir = temp_dir();
    let path = log_path(dir.path(), "all.log");
    let mut sink = FileSink::open(&path, FileMode::Truncate).unwrap();
    write_all_severities(&mut sink);
    sink.close().unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 6);
    assert!(text.starts_with("DEBUG:   app.rs:10"));
}

/// Verifies dropping a sink closes the file with its contents intact.
#[test]
fn dropped_file_sink_keeps_contents() {
    let dir = temp_dir();
    let path = log_path(dir.path(), "drop.log");
    {
        let mut sink = FileSink::open(&path, FileMode::Truncate).unwrap();
        sink.write_entry(None, "", "kept\n", &Encoding::utf8())
            .unwrap();
    }
    assert_eq!(fs::read_to_string(&path).unwrap(), "kept\n");
}

/// Verifies append mode across two sinks on the same path.
#[test]
fn reopening_in_append_mode_accumulates() {
    let dir = temp_dir();
    let path = log_path(dir.path(), "twice.log");
    for word in ["first\n", "second\n"] {
        let mut sink = FileSink::open(&path, FileMode::Append).unwrap();
        sink.write_entry(None, "", word, &Encoding::utf8()).unwrap();
    }
    assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
}

// ============================================================================
// Selection Tests
// ============================================================================

/// Verifies redirected output without a rich host is plain.
#[test]
fn redirected_output_selects_plain_writer() {
    let environment = Environment {
        stdout_is_terminal: false,
        rich_display: false,
        styling_available: true,
        session: Some(String::from("repl")),
    };
    assert_eq!(environment.stream_kind(), StreamKind::Plain);

    let buffer = SharedBuffer::new();
    let mut writer = select_writer(&environment, buffer.clone());
    write_all_severities(writer.as_mut());
    assert!(!buffer.contents().contains('\u{1b}'));
    assert!(!buffer.contents().contains("<text"));
}
