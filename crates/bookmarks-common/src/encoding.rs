//! Text encodings for bookmark documents.
//!
//! Format parsers work on UTF-8. Documents exported by older browsers may
//! be UTF-16 or UTF-32, so readers sniff the byte-order mark (or, lacking
//! one, the share of zero bytes) and transcode before tokenizing. Writers
//! encode their output in a caller-selected encoding and declare it in the
//! document's charset.
//!
//! Legacy single-byte code pages are not supported: labels for them are
//! unknown and callers fall back to UTF-8 with lossy decoding.

/// A Unicode text encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    /// UTF-8, the default for reading and writing.
    #[default]
    Utf8,
    /// UTF-16, little-endian.
    Utf16Le,
    /// UTF-16, big-endian.
    Utf16Be,
    /// UTF-32, little-endian.
    Utf32Le,
    /// UTF-32, big-endian.
    Utf32Be,
}

impl TextEncoding {
    /// The name written into a document's `charset` declaration.
    #[must_use]
    pub const fn web_name(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Utf16Le => "utf-16",
            Self::Utf16Be => "utf-16be",
            Self::Utf32Le => "utf-32",
            Self::Utf32Be => "utf-32be",
        }
    }

    /// Resolve a charset label (case-insensitive) to an encoding.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" | "unicode-1-1-utf-8" => Some(Self::Utf8),
            "utf-16" | "utf-16le" | "utf16" | "unicode" | "ucs-2" => Some(Self::Utf16Le),
            "utf-16be" | "unicodefffe" => Some(Self::Utf16Be),
            "utf-32" | "utf-32le" | "utf32" => Some(Self::Utf32Le),
            "utf-32be" => Some(Self::Utf32Be),
            _ => None,
        }
    }

    /// Byte-order mark for this encoding.
    #[must_use]
    pub const fn bom(self) -> &'static [u8] {
        match self {
            Self::Utf8 => &[0xEF, 0xBB, 0xBF],
            Self::Utf16Le => &[0xFF, 0xFE],
            Self::Utf16Be => &[0xFE, 0xFF],
            Self::Utf32Le => &[0xFF, 0xFE, 0x00, 0x00],
            Self::Utf32Be => &[0x00, 0x00, 0xFE, 0xFF],
        }
    }

    /// Encode text without a byte-order mark.
    #[must_use]
    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            Self::Utf8 => text.as_bytes().to_vec(),
            Self::Utf16Le => text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
            Self::Utf16Be => text.encode_utf16().flat_map(u16::to_be_bytes).collect(),
            Self::Utf32Le => text.chars().flat_map(|c| u32::from(c).to_le_bytes()).collect(),
            Self::Utf32Be => text.chars().flat_map(|c| u32::from(c).to_be_bytes()).collect(),
        }
    }

    /// Decode bytes, skipping a leading byte-order mark for this encoding.
    ///
    /// Malformed sequences become U+FFFD rather than failing.
    #[must_use]
    pub fn decode(self, bytes: &[u8]) -> String {
        let bytes = bytes.strip_prefix(self.bom()).unwrap_or(bytes);
        match self {
            Self::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Self::Utf16Le => decode_utf16(bytes, u16::from_le_bytes),
            Self::Utf16Be => decode_utf16(bytes, u16::from_be_bytes),
            Self::Utf32Le => decode_utf32(bytes, u32::from_le_bytes),
            Self::Utf32Be => decode_utf32(bytes, u32::from_be_bytes),
        }
    }

    /// Guess the encoding of a document.
    ///
    /// A byte-order mark wins. Without one, a document that is mostly zero
    /// bytes is taken to be UTF-32 (more than half) or UTF-16 (more than a
    /// fifth), both little-endian; everything else is UTF-8.
    #[must_use]
    pub fn sniff(bytes: &[u8]) -> Self {
        // UTF-32LE must be checked before UTF-16LE: their marks share a prefix.
        for encoding in [
            Self::Utf32Be,
            Self::Utf32Le,
            Self::Utf16Be,
            Self::Utf16Le,
            Self::Utf8,
        ] {
            if bytes.starts_with(encoding.bom()) {
                return encoding;
            }
        }

        let zeros = bytes.iter().filter(|&&b| b == 0).count();
        if zeros * 2 > bytes.len() {
            Self::Utf32Le
        } else if zeros * 5 > bytes.len() {
            Self::Utf16Le
        } else {
            Self::Utf8
        }
    }
}

fn decode_utf16(bytes: &[u8], word: fn([u8; 2]) -> u16) -> String {
    let chunks = bytes.chunks_exact(2);
    let trailing = !chunks.remainder().is_empty();
    let units = chunks.map(|pair| word([pair[0], pair[1]]));
    let mut text: String = char::decode_utf16(units)
        .map(|unit| unit.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect();
    if trailing {
        text.push(char::REPLACEMENT_CHARACTER);
    }
    text
}

fn decode_utf32(bytes: &[u8], word: fn([u8; 4]) -> u32) -> String {
    let chunks = bytes.chunks_exact(4);
    let trailing = !chunks.remainder().is_empty();
    let mut text: String = chunks
        .map(|quad| {
            char::from_u32(word([quad[0], quad[1], quad[2], quad[3]]))
                .unwrap_or(char::REPLACEMENT_CHARACTER)
        })
        .collect();
    if trailing {
        text.push(char::REPLACEMENT_CHARACTER);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "<DL><p>ĄČĘĖįšųū τ</DL>";

    #[test]
    fn every_encoding_decodes_what_it_encodes() {
        for encoding in [
            TextEncoding::Utf8,
            TextEncoding::Utf16Le,
            TextEncoding::Utf16Be,
            TextEncoding::Utf32Le,
            TextEncoding::Utf32Be,
        ] {
            let mut bytes = encoding.bom().to_vec();
            bytes.extend(encoding.encode(SAMPLE));
            assert_eq!(TextEncoding::sniff(&bytes), encoding, "{encoding:?}");
            assert_eq!(encoding.decode(&bytes), SAMPLE, "{encoding:?}");
        }
    }

    #[test]
    fn sniffs_encodings_without_bom_by_zero_bytes() {
        let ascii = "<DL><p>plain</DL>";
        assert_eq!(
            TextEncoding::sniff(&TextEncoding::Utf16Le.encode(ascii)),
            TextEncoding::Utf16Le
        );
        assert_eq!(
            TextEncoding::sniff(&TextEncoding::Utf32Le.encode(ascii)),
            TextEncoding::Utf32Le
        );
        assert_eq!(TextEncoding::sniff(ascii.as_bytes()), TextEncoding::Utf8);
        assert_eq!(TextEncoding::sniff(b""), TextEncoding::Utf8);
    }

    #[test]
    fn labels_are_case_insensitive() {
        assert_eq!(TextEncoding::from_label("UTF-8"), Some(TextEncoding::Utf8));
        assert_eq!(TextEncoding::from_label(" utf-32 "), Some(TextEncoding::Utf32Le));
        assert_eq!(TextEncoding::from_label("windows-1257"), None);
    }

    #[test]
    fn truncated_input_is_replaced() {
        assert_eq!(TextEncoding::Utf16Le.decode(&[0x41, 0x00, 0x42]), "A\u{FFFD}");
    }
}
