//! Bookmark tree model shared by every reader and writer.
//!
//! # Design
//!
//! A document is a single root [`Folder`] owning an ordered list of
//! [`Item`]s. Ownership only flows downwards: there are no parent links,
//! so the tree is acyclic by construction and a subtree can be moved or
//! dropped like any other value.
//!
//! Items share one capability, [`BookmarkItem`] (a title). The two built-in
//! kinds are [`Link`] and [`Folder`]; callers can add their own kinds
//! through [`Item::Custom`]. Traversal helpers such as
//! [`Folder::all_items`] walk the tree without caring which kind an item is.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::slice;

pub use time::OffsetDateTime;

/// Every attribute seen on an item's source tag, keyed by lower-cased name.
///
/// Ordered by key so that writers emit attributes deterministically.
pub type Attributes = BTreeMap<String, String>;

/// Attribute marking the folder a browser shows as its bookmarks toolbar.
pub const PERSONAL_TOOLBAR_FOLDER: &str = "personal_toolbar_folder";

/// The capability every bookmark item shares.
pub trait BookmarkItem: fmt::Debug {
    /// The item's title; `None` when the source had no title at all, which is
    /// distinct from an empty title.
    fn title(&self) -> Option<&str>;

    /// Replace the item's title.
    fn set_title(&mut self, title: Option<String>);

    /// Access to the concrete type, for callers that store their own kinds.
    fn as_any(&self) -> &dyn Any;
}

/// An icon embedded in a link: raw image bytes and their content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icon {
    /// MIME type of `data` (e.g. `image/png`).
    pub content_type: String,
    /// Raw image bytes.
    pub data: Vec<u8>,
}

/// A bookmarked URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Link {
    /// Display title.
    pub title: Option<String>,
    /// Target URL. Empty when the source tag had no `HREF`.
    pub url: String,
    /// Favicon location.
    pub icon_url: Option<String>,
    /// Embedded favicon.
    pub icon: Option<Icon>,
    /// URL of the RSS/Atom feed this bookmark follows.
    pub feed_url: Option<String>,
    /// When the URL was last visited.
    pub last_visit: Option<OffsetDateTime>,
    /// When the bookmark was last edited.
    pub last_modified: Option<OffsetDateTime>,
    /// When the bookmark was created.
    pub added: Option<OffsetDateTime>,
    /// Free-form note attached to the bookmark.
    pub description: Option<String>,
    /// Every attribute from the source tag, including those also held in the
    /// typed fields above.
    pub attributes: Attributes,
}

impl Link {
    /// Create a titled link.
    #[must_use]
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: Some(title.into()),
            ..Self::default()
        }
    }
}

impl BookmarkItem for Link {
    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn set_title(&mut self, title: Option<String>) {
        self.title = title;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title.as_deref().unwrap_or_default(), self.url)
    }
}

/// An ordered container of bookmark items.
#[derive(Debug, Default)]
pub struct Folder {
    /// Display title. The synthetic root folder has none.
    pub title: Option<String>,
    /// When the folder was created.
    pub added: Option<OffsetDateTime>,
    /// When the folder was last edited.
    pub last_modified: Option<OffsetDateTime>,
    /// Every attribute from the source tag.
    pub attributes: Attributes,
    children: Vec<Item>,
}

impl Folder {
    /// Create an untitled, empty folder (the shape of a document root).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty folder with a title.
    #[must_use]
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Append an item; insertion order is preserved.
    pub fn push(&mut self, item: impl Into<Item>) {
        self.children.push(item.into());
    }

    /// Direct children, in insertion order.
    #[must_use]
    pub fn children(&self) -> &[Item] {
        &self.children
    }

    /// Mutable access to the direct children.
    pub const fn children_mut(&mut self) -> &mut Vec<Item> {
        &mut self.children
    }

    /// Number of direct children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// True if the folder has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Iterate over the direct children.
    pub fn iter(&self) -> slice::Iter<'_, Item> {
        self.children.iter()
    }

    /// Every descendant item, depth-first, each folder before its contents.
    #[must_use]
    pub fn all_items(&self) -> Descendants<'_> {
        Descendants {
            stack: vec![self.children.iter()],
        }
    }

    /// Every link in the tree, flattened.
    pub fn all_links(&self) -> impl Iterator<Item = &Link> {
        self.all_items().filter_map(Item::as_link)
    }

    /// Every folder in the tree (excluding `self`), flattened.
    pub fn all_folders(&self) -> impl Iterator<Item = &Folder> {
        self.all_items().filter_map(Item::as_folder)
    }

    /// The folder a browser displays as its bookmarks toolbar, if any.
    #[must_use]
    pub fn bookmarks_bar(&self) -> Option<&Self> {
        self.all_folders()
            .find(|folder| folder.attributes.contains_key(PERSONAL_TOOLBAR_FOLDER))
    }
}

impl BookmarkItem for Folder {
    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn set_title(&mut self, title: Option<String>) {
        self.title = title;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Display for Folder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ">>> {} <<<", self.title.as_deref().unwrap_or_default())
    }
}

impl<'a> IntoIterator for &'a Folder {
    type Item = &'a Item;
    type IntoIter = slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One entry of a [`Folder`].
#[derive(Debug)]
pub enum Item {
    /// A bookmarked URL.
    Link(Link),
    /// A nested folder.
    Folder(Folder),
    /// A caller-defined item kind. Writers that cannot represent it skip it.
    Custom(Box<dyn BookmarkItem>),
}

impl Item {
    /// Wrap a caller-defined item kind.
    #[must_use]
    pub fn custom(item: impl BookmarkItem + 'static) -> Self {
        Self::Custom(Box::new(item))
    }

    /// The link, if this item is one.
    #[must_use]
    pub const fn as_link(&self) -> Option<&Link> {
        match self {
            Self::Link(link) => Some(link),
            _ => None,
        }
    }

    /// The folder, if this item is one.
    #[must_use]
    pub const fn as_folder(&self) -> Option<&Folder> {
        match self {
            Self::Folder(folder) => Some(folder),
            _ => None,
        }
    }

    /// The caller-defined item, if this item is one of type `T`.
    #[must_use]
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        match self {
            Self::Custom(item) => item.as_any().downcast_ref(),
            _ => None,
        }
    }
}

impl BookmarkItem for Item {
    fn title(&self) -> Option<&str> {
        match self {
            Self::Link(link) => link.title(),
            Self::Folder(folder) => folder.title(),
            Self::Custom(item) => item.title(),
        }
    }

    fn set_title(&mut self, title: Option<String>) {
        match self {
            Self::Link(link) => link.set_title(title),
            Self::Folder(folder) => folder.set_title(title),
            Self::Custom(item) => item.set_title(title),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl From<Link> for Item {
    fn from(link: Link) -> Self {
        Self::Link(link)
    }
}

impl From<Folder> for Item {
    fn from(folder: Folder) -> Self {
        Self::Folder(folder)
    }
}

/// Pre-order iterator over every item below a folder.
///
/// Returned by [`Folder::all_items`].
#[derive(Debug)]
pub struct Descendants<'a> {
    stack: Vec<slice::Iter<'a, Item>>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Item;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let level = self.stack.last_mut()?;
            if let Some(item) = level.next() {
                if let Item::Folder(folder) = item {
                    self.stack.push(folder.children.iter());
                }
                return Some(item);
            }
            let _ = self.stack.pop();
        }
    }
}
