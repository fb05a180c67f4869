use core::fmt;

use strum_macros::Display;

/// What a [`Chunk`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ChunkKind {
    /// Character data between tags, whitespace collapsed and entities decoded.
    Text,
    /// `<name ...>`
    OpenTag,
    /// `</name ...>`
    CloseTag,
    /// `<!-- ... -->`
    Comment,
}

/// An attribute on an open or close tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Lower-cased attribute name.
    pub name: String,
    /// Value with quotes removed and entities decoded; empty for bare names.
    pub value: String,
}

impl Attribute {
    /// Create a new attribute with the given name and value.
    #[must_use]
    pub const fn new(name: String, value: String) -> Self {
        Self { name, value }
    }
}

/// One tokenized unit of bookmark markup.
///
/// Every call to the tokenizer yields a fresh, owned chunk, so chunks stay
/// valid after further tokenization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Kind of markup this chunk holds.
    pub kind: ChunkKind,
    /// Lower-cased tag name; `!--` for comments, empty for text.
    pub tag: String,
    /// Character data for text chunks, the body for comments.
    pub text: String,
    /// Attributes in source order, duplicates included.
    pub attributes: Vec<Attribute>,
    /// The tag ended with `/>`.
    pub self_closing: bool,
    /// At least one character reference was decoded in this chunk.
    pub has_entities: bool,
    /// Byte offset where this chunk starts; rewinding to it re-reads the chunk.
    pub start: usize,
}

impl Chunk {
    pub(crate) const fn new(kind: ChunkKind, start: usize) -> Self {
        Self {
            kind,
            tag: String::new(),
            text: String::new(),
            attributes: Vec::new(),
            self_closing: false,
            has_entities: false,
            start,
        }
    }

    /// True for character data.
    #[must_use]
    pub fn is_text(&self) -> bool {
        self.kind == ChunkKind::Text
    }

    /// True if this is an open tag named `name` (lower-case).
    #[must_use]
    pub fn is_open_tag(&self, name: &str) -> bool {
        self.kind == ChunkKind::OpenTag && self.tag == name
    }

    /// True if this is a close tag named `name` (lower-case).
    #[must_use]
    pub fn is_close_tag(&self, name: &str) -> bool {
        self.kind == ChunkKind::CloseTag && self.tag == name
    }

    /// Value of the first attribute called `name`.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ChunkKind::Text => f.write_str(&self.text),
            ChunkKind::Comment => write!(f, "<!--{}-->", self.text),
            ChunkKind::OpenTag | ChunkKind::CloseTag => {
                let slash = if self.kind == ChunkKind::CloseTag { "/" } else { "" };
                write!(f, "<{slash}{}", self.tag)?;
                for attr in &self.attributes {
                    write!(f, " {}=\"{}\"", attr.name, attr.value)?;
                }
                if self.self_closing {
                    f.write_str(" /")?;
                }
                f.write_str(">")
            }
        }
    }
}
