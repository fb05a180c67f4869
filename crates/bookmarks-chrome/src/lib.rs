//! Chrome bookmark reader.
//!
//! Accepts the two JSON shapes Chrome hands out:
//!
//! - the profile's on-disk `Bookmarks` file, `{"roots": {"bookmark_bar": ..., "other": ...}}`
//! - the extension API dump from `chrome.bookmarks.getTree()`, `[BookmarkTreeNode, ...]`
//!
//! Both become a [`Folder`] whose children are the top-level Chrome folders,
//! ready to be written out by any other format crate.

/// Serde model of Chrome bookmark nodes.
pub mod model;

use std::io;

use bookmarks_common::encoding::TextEncoding;
use bookmarks_common::timestamp::from_epoch_value;
use bookmarks_common::warning::warn_once;
use bookmarks_tree::{Attributes, Folder, Item, Link, OffsetDateTime, PERSONAL_TOOLBAR_FOLDER};
use serde_json::{Map, Value};
use thiserror::Error;

pub use model::{ChromeNode, Stamp};
use model::windows_micros_to_unix_seconds;

/// Title Chrome gives the toolbar folder in English builds.
pub const BOOKMARKS_BAR_TITLE: &str = "Bookmarks bar";

/// Errors from reading Chrome bookmark JSON.
#[derive(Debug, Error)]
pub enum ChromeError {
    /// The input is not valid JSON, or a node has fields of the wrong type.
    #[error("malformed bookmark JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Valid JSON that is neither a bookmarks file nor a node list.
    #[error("JSON is neither a Chrome bookmarks file nor a bookmark node list")]
    UnrecognizedShape,
    /// The source could not be read.
    #[error("failed to read bookmarks: {0}")]
    Io(#[from] io::Error),
}

/// Reads Chrome bookmark JSON into a bookmark tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChromeReader {
    /// Title (compared ignoring ASCII case) of the folder marked as the
    /// bookmarks toolbar. Localized Chrome builds use their own.
    pub bookmarks_bar_title: String,
}

impl Default for ChromeReader {
    fn default() -> Self {
        Self {
            bookmarks_bar_title: BOOKMARKS_BAR_TITLE.to_string(),
        }
    }
}

impl ChromeReader {
    /// A reader for English profiles.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a bookmarks file or an API node list.
    ///
    /// # Errors
    ///
    /// Returns [`ChromeError::Json`] for malformed JSON and
    /// [`ChromeError::UnrecognizedShape`] for JSON of another shape.
    pub fn read_str(&self, input: &str) -> Result<Folder, ChromeError> {
        let document: Value = serde_json::from_str(input)?;
        let nodes = match document {
            Value::Object(mut file) => match file.remove("roots") {
                Some(Value::Object(roots)) => root_nodes(roots)?,
                _ => return Err(ChromeError::UnrecognizedShape),
            },
            list @ Value::Array(_) => serde_json::from_value(list)?,
            _ => return Err(ChromeError::UnrecognizedShape),
        };

        let mut root = Folder::new();
        for node in nodes {
            root.push(item(node, &self.bookmarks_bar_title));
        }
        Ok(root)
    }

    /// Decode (UTF-8, or UTF-16/32 with a byte-order mark) and parse.
    ///
    /// # Errors
    ///
    /// As [`ChromeReader::read_str`].
    pub fn read_bytes(&self, input: &[u8]) -> Result<Folder, ChromeError> {
        let text = TextEncoding::sniff(input).decode(input);
        self.read_str(&text)
    }

    /// Read a source to its end and parse it.
    ///
    /// # Errors
    ///
    /// Returns [`ChromeError::Io`] if the source fails, otherwise as
    /// [`ChromeReader::read_str`].
    pub fn read_from(&self, mut source: impl io::Read) -> Result<Folder, ChromeError> {
        let mut input = Vec::new();
        let _ = source.read_to_end(&mut input)?;
        self.read_bytes(&input)
    }
}

/// True if `input` looks like Chrome bookmark JSON rather than markup.
#[must_use]
pub fn looks_like_chrome_json(input: &[u8]) -> bool {
    let body = input.strip_prefix(TextEncoding::Utf8.bom()).unwrap_or(input);
    body.iter()
        .copied()
        .find(|byte| !byte.is_ascii_whitespace())
        .is_some_and(|first| matches!(first, b'{' | b'['))
}

/// The object-valued entries of a bookmarks file's `roots`, in key order.
fn root_nodes(roots: Map<String, Value>) -> Result<Vec<ChromeNode>, ChromeError> {
    let mut nodes = Vec::with_capacity(roots.len());
    for (key, value) in roots {
        if value.is_object() {
            nodes.push(serde_json::from_value(value)?);
        } else {
            warn_once("Chrome Reader", &format!("skipping root entry {key:?}: not a bookmark node"));
        }
    }
    Ok(nodes)
}

fn item(node: ChromeNode, toolbar_title: &str) -> Item {
    let attributes = node_attributes(&node, toolbar_title);
    let added = unix_millis(node.date_added_ms.as_ref()).or_else(|| windows_time(node.date_added.as_ref()));
    let last_modified = unix_millis(node.date_group_modified_ms.as_ref())
        .or_else(|| windows_time(node.date_modified.as_ref()));
    let is_link = node.is_link();
    let title = node.title.or(node.name);

    if is_link {
        return Link {
            url: node.url.unwrap_or_default(),
            title,
            added,
            last_modified,
            last_visit: windows_time(node.date_last_used.as_ref()),
            attributes,
            ..Link::default()
        }
        .into();
    }

    let mut folder = Folder::new();
    folder.title = title;
    folder.added = added;
    folder.last_modified = last_modified;
    folder.attributes = attributes;

    let mut children = node.children.unwrap_or_default();
    children.sort_by_key(|child| child.index.unwrap_or(0));
    for child in children {
        folder.push(item(child, toolbar_title));
    }
    folder.into()
}

fn node_attributes(node: &ChromeNode, toolbar_title: &str) -> Attributes {
    let mut attributes = Attributes::new();
    if let Some(kind) = &node.kind {
        let _ = attributes.insert("type".to_string(), kind.clone());
    }
    if let Some(id) = &node.id {
        let _ = attributes.insert("id".to_string(), id.clone());
    }
    if let Some(parent_id) = &node.parent_id {
        let _ = attributes.insert("parentid".to_string(), parent_id.clone());
    }
    let is_toolbar = node
        .display_title()
        .is_some_and(|title| title.eq_ignore_ascii_case(toolbar_title));
    if is_toolbar && node.url.is_none() {
        let _ = attributes.insert(PERSONAL_TOOLBAR_FOLDER.to_string(), "true".to_string());
    }
    attributes
}

fn unix_millis(stamp: Option<&Stamp>) -> Option<OffsetDateTime> {
    stamp.and_then(Stamp::value).and_then(from_epoch_value)
}

fn windows_time(stamp: Option<&Stamp>) -> Option<OffsetDateTime> {
    stamp
        .and_then(Stamp::value)
        .and_then(windows_micros_to_unix_seconds)
        .and_then(|seconds| OffsetDateTime::from_unix_timestamp(seconds).ok())
}
