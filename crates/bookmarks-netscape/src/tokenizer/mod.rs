//! Byte-level tokenizer for Netscape bookmark markup.
//!
//! This is not a general HTML tokenizer. It understands just enough markup
//! for bookmark files: tags with quoted or bare attributes, comments, text
//! with collapsed whitespace, and HTML 4 character references.

/// Chunk types produced by the tokenizer.
pub mod chunk;
/// HTML 4 named character reference table.
pub mod entities;
/// Cursor and character-reference helpers.
mod helpers;
/// The tokenizer state machine.
mod machine;

pub use chunk::{Attribute, Chunk, ChunkKind};
pub use machine::Tokenizer;
