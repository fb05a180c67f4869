use std::io;

use bookmarks_common::encoding::TextEncoding;
use bookmarks_tree::Folder;

use crate::error::ReadError;
use crate::parser::parse;

/// Longest encoded form of one character across the supported encodings.
const MAX_BYTES_PER_CHAR: usize = 4;

/// Reads Netscape bookmark documents from text, bytes or any [`io::Read`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetscapeReader {
    /// Detect the input encoding from its byte-order mark, byte pattern and
    /// `charset` declaration. When off, [`NetscapeReader::input_encoding`]
    /// is used as is.
    pub auto_detect_encoding: bool,
    /// Number of leading characters searched for a `charset` declaration;
    /// 0 searches the whole document.
    pub header_length: usize,
    /// Encoding used when detection is off.
    pub input_encoding: TextEncoding,
}

impl Default for NetscapeReader {
    fn default() -> Self {
        Self {
            auto_detect_encoding: true,
            header_length: 512,
            input_encoding: TextEncoding::Utf8,
        }
    }
}

impl NetscapeReader {
    /// A reader with encoding detection on.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an already decoded document.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::NotNetscapeDocument`] if the text has no
    /// `<DL> ... </DL>` block.
    pub fn read_str(&self, input: &str) -> Result<Folder, ReadError> {
        parse(input.as_bytes())
    }

    /// Decode and parse a document.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::NotNetscapeDocument`] if the decoded text has no
    /// `<DL> ... </DL>` block, which is also what a wrong encoding looks like.
    pub fn read_bytes(&self, input: &[u8]) -> Result<Folder, ReadError> {
        let text = self.detect_encoding(input).decode(input);
        self.read_str(&text)
    }

    /// Read a source to its end, then decode and parse it.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::Io`] if the source fails, otherwise as
    /// [`NetscapeReader::read_bytes`].
    pub fn read_from(&self, mut source: impl io::Read) -> Result<Folder, ReadError> {
        let mut input = Vec::new();
        let _ = source.read_to_end(&mut input)?;
        self.read_bytes(&input)
    }

    /// The encoding [`NetscapeReader::read_bytes`] will decode `input` with.
    ///
    /// A byte-order mark is authoritative. Otherwise a `charset` declaration
    /// in the header picks the encoding (UTF-8 if the label is unknown), and
    /// without one the byte-pattern guess stands.
    #[must_use]
    pub fn detect_encoding(&self, input: &[u8]) -> TextEncoding {
        if !self.auto_detect_encoding {
            return self.input_encoding;
        }

        let sniffed = TextEncoding::sniff(input);
        if input.starts_with(sniffed.bom()) {
            return sniffed;
        }

        let header_bytes = match self.header_length {
            0 => input,
            chars => &input[..input.len().min(chars.saturating_mul(MAX_BYTES_PER_CHAR))],
        };
        let decoded = sniffed.decode(header_bytes);
        let header = match self.header_length {
            0 => decoded.as_str(),
            chars => decoded
                .char_indices()
                .nth(chars)
                .map_or(decoded.as_str(), |(end, _)| &decoded[..end]),
        };

        charset_label(header).map_or(sniffed, |label| {
            TextEncoding::from_label(label).unwrap_or_default()
        })
    }
}

/// The label of the first `charset = <label>` declaration in `header`.
fn charset_label(header: &str) -> Option<&str> {
    const KEY: &str = "charset";

    let lowered = header.to_ascii_lowercase();
    let mut from = 0;
    while let Some(found) = lowered[from..].find(KEY) {
        let after = from + found + KEY.len();
        if let Some(value) = header[after..].trim_start().strip_prefix('=') {
            let value = value.trim_start();
            let end = value
                .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '-'))
                .unwrap_or(value.len());
            if end > 0 {
                return Some(&value[..end]);
            }
        }
        from = after;
    }
    None
}
