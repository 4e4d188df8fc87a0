//! crates/sitelog-sink/src/file.rs
//! File-backed sink that flushes after every entry.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::writer::compose;
use crate::{Encoding, Severity, SinkWriter};

/// How an existing log file is treated when the sink opens it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FileMode {
    /// Discard previous contents.
    #[default]
    Truncate,
    /// Keep previous contents and write after them.
    Append,
}

/// An open log file.
///
/// The file is opened by [`FileSink::open`] and stays open until
/// [`FileSink::close`] is called or the sink is dropped. Entries are encoded
/// with the encoding passed to [`SinkWriter::write_entry`] and flushed
/// immediately. Writing after close fails with [`io::ErrorKind::NotConnected`].
#[derive(Debug)]
pub struct FileSink {
    file: Option<File>,
    path: PathBuf,
}

impl FileSink {
    /// Opens `path` for writing, creating the file if needed.
    ///
    /// The parent directory is never created.
    pub fn open(path: impl AsRef<Path>, mode: FileMode) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut options = OpenOptions::new();
        options.create(true);
        match mode {
            FileMode::Truncate => options.write(true).truncate(true),
            FileMode::Append => options.append(true),
        };
        let file = options.open(&path)?;
        Ok(Self {
            file: Some(file),
            path,
        })
    }

    /// Path the sink was opened with.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reports whether the file is still open.
    pub const fn is_open(&self) -> bool {
        self.file.is_some()
    }

    /// Flushes and closes the file. Closing twice is a no-op.
    pub fn close(&mut self) -> io::Result<()> {
        match self.file.take() {
            Some(mut file) => file.flush(),
            None => Ok(()),
        }
    }
}

impl SinkWriter for FileSink {
    fn write_entry(
        &mut self,
        severity: Option<Severity>,
        label: &str,
        body: &str,
        encoding: &Encoding,
    ) -> io::Result<()> {
        let file = self.file.as_mut().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotConnected,
                format!("log file {} is closed", self.path.display()),
            )
        })?;
        let line = compose(severity, label, body);
        file.write_all(&encoding.encode(&line))?;
        file.flush()
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn truncate_replaces_previous_contents() {
        let dir = test_support::temp_dir();
        let path = dir.path().join("run.log");
        fs::write(&path, "old\n").unwrap();

        let mut sink = FileSink::open(&path, FileMode::Truncate).unwrap();
        sink.write_entry(Some(Severity::Info), "INFO:   ", " x.rs:1 new\n", &Encoding::utf8())
            .unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "INFO:    x.rs:1 new\n");
    }

    #[test]
    fn append_keeps_previous_contents() {
        let dir = test_support::temp_dir();
        let path = dir.path().join("run.log");
        fs::write(&path, "old\n").unwrap();

        let mut sink = FileSink::open(&path, FileMode::Append).unwrap();
        sink.write_entry(None, "", "more\n", &Encoding::utf8()).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "old\nmore\n");
    }

    #[test]
    fn entries_are_visible_before_close() {
        let dir = test_support::temp_dir();
        let path = dir.path().join("live.log");
        let mut sink = FileSink::open(&path, FileMode::default()).unwrap();
        sink.write_entry(None, "", "flushed\n", &Encoding::utf8()).unwrap();
        assert!(sink.is_open());
        assert_eq!(fs::read_to_string(&path).unwrap(), "flushed\n");
    }

    #[test]
    fn writes_use_requested_encoding() {
        let dir = test_support::temp_dir();
        let path = dir.path().join("latin.log");
        let mut sink = FileSink::open(&path, FileMode::Truncate).unwrap();
        sink.write_entry(None, "", "café\n", &Encoding::new("latin1").unwrap())
            .unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"caf\xe9\n".to_vec());
    }

    #[test]
    fn write_after_close_fails() {
        let dir = test_support::temp_dir();
        let mut sink = FileSink::open(dir.path().join("c.log"), FileMode::Truncate).unwrap();
        sink.close().unwrap();
        sink.close().unwrap();
        assert!(!sink.is_open());

        let err = sink
            .write_entry(None, "", "late\n", &Encoding::utf8())
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotConnected);
    }

    #[test]
    fn missing_parent_is_an_error() {
        let dir = test_support::temp_dir();
        let path = dir.path().join("absent").join("x.log");
        let err = FileSink::open(&path, FileMode::Truncate).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
