//! crates/sitelog-sink/src/encoding.rs
//! Validated text encodings for log output.

use std::borrow::Cow;
use std::fmt;

/// Error raised when an encoding label cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    /// The label was empty or whitespace only.
    #[error("encoding must be a non-empty label")]
    Empty,

    /// The label is not a known character set.
    #[error("unsupported encoding: {0:?}")]
    Unknown(String),

    /// The label is known but its encoder writes a different encoding, as
    /// with the UTF-16 and replacement labels.
    #[error("encoding {label:?} cannot be written; its encoder produces {output}")]
    Unwritable {
        /// Label as supplied.
        label: String,
        /// Name of the encoding the encoder would actually produce.
        output: &'static str,
    },
}

/// A text encoding chosen by label, e.g. `"utf-8"` or `"latin1"`.
///
/// The label the caller supplied is kept for display and diagnostics; the
/// resolved [`encoding_rs::Encoding`] is used when bytes are produced for a
/// file. Stream writers always emit UTF-8 because the process streams are
/// byte oriented and owned by the host terminal.
#[derive(Clone)]
pub struct Encoding {
    label: String,
    inner: &'static encoding_rs::Encoding,
}

impl Encoding {
    /// Resolves `label` into an encoding.
    ///
    /// Labels follow the WHATWG encoding standard, so `"utf-8"`, `"utf8"`,
    /// `"latin1"`, `"iso-8859-1"`, `"ascii"` and `"cp1252"` are all accepted.
    /// The last four resolve to windows-1252: `"ascii"` writes `'é'` as the
    /// byte `0xE9` rather than replacing it.
    ///
    /// Labels whose encoder emits something other than the named encoding
    /// (`"utf-16"`, `"utf-16le"`, `"utf-16be"` and the replacement labels
    /// such as `"iso-2022-kr"`) are rejected with [`EncodingError::Unwritable`].
    ///
    /// ```
    /// use sitelog_sink::{Encoding, EncodingError};
    ///
    /// assert!(Encoding::new("utf-8").is_ok());
    /// assert_eq!(Encoding::new("").unwrap_err(), EncodingError::Empty);
    /// assert!(matches!(Encoding::new("klingon"), Err(EncodingError::Unknown(_))));
    /// assert!(matches!(Encoding::new("utf-16"), Err(EncodingError::Unwritable { .. })));
    /// ```
    pub fn new(label: &str) -> Result<Self, EncodingError> {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Err(EncodingError::Empty);
        }

        let inner = encoding_rs::Encoding::for_label(trimmed.as_bytes())
            .ok_or_else(|| EncodingError::Unknown(label.to_owned()))?;
        if inner.output_encoding() != inner {
            return Err(EncodingError::Unwritable {
                label: label.to_owned(),
                output: inner.output_encoding().name(),
            });
        }

        Ok(Self {
            label: label.to_owned(),
            inner,
        })
    }

    /// The default UTF-8 encoding.
    pub fn utf8() -> Self {
        Self {
            label: String::from("utf-8"),
            inner: encoding_rs::UTF_8,
        }
    }

    /// Returns the label this encoding was created from.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the canonical name of the resolved encoding.
    pub fn name(&self) -> &'static str {
        self.inner.name()
    }

    /// Reports whether text is written unchanged.
    pub fn is_utf8(&self) -> bool {
        self.inner == encoding_rs::UTF_8
    }

    /// Encodes `text` for writing.
    ///
    /// Characters the target encoding cannot represent are replaced with
    /// numeric character references, so encoding never fails.
    pub fn encode<'a>(&self, text: &'a str) -> Cow<'a, [u8]> {
        if self.is_utf8() {
            return Cow::Borrowed(text.as_bytes());
        }
        let (bytes, _, _) = self.inner.encode(text);
        bytes
    }
}

impl Default for Encoding {
    fn default() -> Self {
        Self::utf8()
    }
}

impl PartialEq for Encoding {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Eq for Encoding {}

impl fmt::Debug for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Encoding")
            .field("label", &self.label)
            .field("name", &self.inner.name())
            .finish()
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_blank_labels_are_rejected() {
        assert_eq!(Encoding::new("").unwrap_err(), EncodingError::Empty);
        assert_eq!(Encoding::new("   ").unwrap_err(), EncodingError::Empty);
    }

    #[test]
    fn unknown_label_is_rejected() {
        let err = Encoding::new("not-a-charset").unwrap_err();
        assert_eq!(err, EncodingError::Unknown(String::from("not-a-charset")));
        assert!(err.to_string().contains("not-a-charset"));
    }

    #[test]
    fn encoding_rejects_utf16() {
        for label in ["utf-16", "utf-16le", "UTF-16BE", "iso-2022-kr", "hz-gb-2312"] {
            let err = Encoding::new(label).unwrap_err();
            assert!(
                matches!(&err, EncodingError::Unwritable { label: l, output: "UTF-8" } if l == label),
                "{label}: {err:?}"
            );
            assert!(err.to_string().contains(label));
        }
    }

    #[test]
    fn ascii_label_behaviour() {
        let encoding = Encoding::new("ascii").unwrap();
        assert_eq!(encoding.name(), "windows-1252");
        assert!(!encoding.is_utf8());
        assert_eq!(encoding.encode("caf\u{e9}").as_ref(), b"caf\xe9");
        assert_eq!(encoding.encode("\u{2603}").as_ref(), b"&#9731;");
    }

    #[test]
    fn label_is_preserved() {
        let encoding = Encoding::new("UTF8").unwrap();
        assert_eq!(encoding.label(), "UTF8");
        assert_eq!(encoding.name(), "UTF-8");
        assert_eq!(encoding, Encoding::utf8());
    }

    #[test]
    fn utf8_encoding_borrows_input() {
        let encoding = Encoding::utf8();
        assert!(matches!(encoding.encode("héllo"), Cow::Borrowed(_)));
    }

    #[test]
    fn latin1_encodes_single_bytes() {
        let encoding = Encoding::new("latin1").unwrap();
        assert!(!encoding.is_utf8());
        assert_eq!(encoding.encode("café").as_ref(), b"caf\xe9");
    }

    #[test]
    fn unmappable_characters_become_references() {
        let encoding = Encoding::new("latin1").unwrap();
        let bytes = encoding.encode("snow \u{2603}");
        assert_eq!(bytes.as_ref(), b"snow &#9731;");
    }

    #[test]
    fn display_shows_label() {
        assert_eq!(Encoding::new("latin1").unwrap().to_string(), "latin1");
    }
}
