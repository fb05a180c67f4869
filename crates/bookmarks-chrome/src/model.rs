//! Serde model shared by both Chrome JSON dialects.
//!
//! The on-disk `Bookmarks` file and `chrome.bookmarks.getTree()` output
//! describe the same nodes with different field names:
//!
//! | Field     | Bookmarks file                   | Extension API               |
//! |-----------|----------------------------------|-----------------------------|
//! | title     | `name`                           | `title`                     |
//! | added     | `date_added` (µs since 1601)     | `dateAdded` (ms since 1970) |
//! | modified  | `date_modified` (µs since 1601)  | `dateGroupModified` (ms)    |
//! | last used | `date_last_used` (µs since 1601) | n/a                         |
//! | parent    | n/a                              | `parentId`                  |
//! | order     | array order                      | `index`                     |

use serde::Deserialize;

/// Seconds between 1601-01-01 and 1970-01-01.
const WINDOWS_EPOCH_OFFSET_SECONDS: i64 = 11_644_473_600;

/// One bookmark or folder node, in either dialect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ChromeNode {
    /// Node id, unique within one profile.
    pub id: Option<String>,
    /// Target URL; absent for folders.
    pub url: Option<String>,
    /// Parent node id (API only).
    #[serde(rename = "parentId", alias = "parentid")]
    pub parent_id: Option<String>,
    /// Position among the siblings (API only).
    pub index: Option<i64>,
    /// Display title (API).
    pub title: Option<String>,
    /// Display title (bookmarks file).
    pub name: Option<String>,
    /// `"url"` or `"folder"` (bookmarks file only).
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Creation time in ms since the Unix epoch (API).
    #[serde(rename = "dateAdded", alias = "dateadded")]
    pub date_added_ms: Option<Stamp>,
    /// Last change to a folder's contents, ms since the Unix epoch (API).
    #[serde(rename = "dateGroupModified", alias = "dategroupmodified")]
    pub date_group_modified_ms: Option<Stamp>,
    /// Creation time in µs since 1601 (bookmarks file).
    pub date_added: Option<Stamp>,
    /// Modification time in µs since 1601 (bookmarks file).
    pub date_modified: Option<Stamp>,
    /// Last time the bookmark was opened, µs since 1601 (bookmarks file).
    pub date_last_used: Option<Stamp>,
    /// Child nodes; present (possibly empty) for folders.
    pub children: Option<Vec<ChromeNode>>,
}

impl ChromeNode {
    /// `title`, falling back to `name`.
    #[must_use]
    pub fn display_title(&self) -> Option<&str> {
        self.title.as_deref().or(self.name.as_deref())
    }

    /// A node with a non-empty URL and no child list is a bookmark.
    #[must_use]
    pub fn is_link(&self) -> bool {
        self.url.as_deref().is_some_and(|url| !url.is_empty()) && self.children.is_none()
    }
}

/// A timestamp that may be serialized as a JSON number or a decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Stamp {
    /// `1376331421280`
    Number(i64),
    /// `"13245678901234567"`
    Text(String),
}

impl Stamp {
    /// The integer value, if there is one.
    #[must_use]
    pub fn value(&self) -> Option<i64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => text.trim().parse().ok(),
        }
    }
}

/// Convert microseconds since 1601-01-01 UTC (a Windows `FILETIME` divided
/// by ten) to Unix seconds. Zero means "never" and yields `None`.
#[must_use]
pub fn windows_micros_to_unix_seconds(micros: i64) -> Option<i64> {
    (micros > 0).then(|| micros / 1_000_000 - WINDOWS_EPOCH_OFFSET_SECONDS)
}
