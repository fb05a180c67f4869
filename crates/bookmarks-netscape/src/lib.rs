//! Netscape bookmark file format.
//!
//! The de facto interchange format for browser bookmark export and import:
//! an HTML dialect of nested `<DL>` lists. This crate provides
//!
//! - [`tokenizer`]: a byte-level tokenizer with one-chunk lookahead and pushback
//! - [`parse`] / [`NetscapeReader`]: build a [`bookmarks_tree::Folder`] tree
//! - [`NetscapeWriter`]: serialize a tree back to markup
//!
//! Writing a parsed tree and parsing the result yields the same tree, so a
//! second write reproduces the first byte for byte.

/// Read and write error types.
pub mod error;
/// Recursive-descent parser.
pub mod parser;
/// Reader configuration and encoding detection.
pub mod reader;
/// Byte-level markup tokenizer.
pub mod tokenizer;
/// Document writer.
pub mod writer;

pub use error::{ReadError, WriteError};
pub use parser::{MAX_NESTING_DEPTH, looks_like_bookmark_document, parse};
pub use reader::NetscapeReader;
pub use writer::{IGNORED_ATTRIBUTES, NetscapeWriter};
