//! Netscape bookmark document writer.
//!
//! The output is the structural inverse of [`crate::parse`]: reading a
//! written document and writing it again reproduces the same bytes.
//!
//! ```text
//! <!DOCTYPE NETSCAPE-Bookmark-file-1>
//! ...header...
//! <DL><p>
//!     <DT><H3 ADD_DATE="1355307132">Folder</H3>
//!     <DL><p>
//!         <DT><A HREF="https://example.com/">Link</A>
//!         <DD>Description
//!     </DL><p>
//! </DL><p>
//! ```

/// Escaping markup serializer used for every tag the writer emits.
pub mod markup;

use std::io;

use bookmarks_common::data_url::DataUrl;
use bookmarks_common::encoding::TextEncoding;
use bookmarks_common::timestamp::to_epoch_seconds;
use bookmarks_common::warning::warn_once;
use bookmarks_tree::{Attributes, BookmarkItem, Folder, Item, Link, OffsetDateTime};

use crate::error::WriteError;
use markup::MarkupWriter;

/// One level of nesting.
pub const INDENTATION: &str = "    ";

/// Attributes that only exist as typed fields and are never written from
/// an item's generic attribute map.
pub const IGNORED_ATTRIBUTES: [&str; 7] = [
    "last_modified",
    "icon",
    "icon_uri",
    "href",
    "last_visit",
    "add_date",
    "feedurl",
];

/// True if `name` is in [`IGNORED_ATTRIBUTES`], ignoring ASCII case.
#[must_use]
pub fn is_ignored_attribute(name: &str) -> bool {
    IGNORED_ATTRIBUTES
        .iter()
        .any(|ignored| ignored.eq_ignore_ascii_case(name))
}

/// Writes bookmark trees as Netscape bookmark documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetscapeWriter {
    /// Output encoding, also declared in the document's `charset`.
    pub encoding: TextEncoding,
}

impl NetscapeWriter {
    /// A writer producing `encoding`.
    #[must_use]
    pub const fn new(encoding: TextEncoding) -> Self {
        Self { encoding }
    }

    /// Render `root` as document text.
    #[must_use]
    pub fn write_string(&self, root: &Folder) -> String {
        let mut markup = MarkupWriter::new();
        markup.raw(&header(self.encoding));
        write_lists(&mut markup, root);
        markup.into_string()
    }

    /// Render `root` as encoded bytes. UTF-16 and UTF-32 output starts with
    /// a byte-order mark; UTF-8 output does not.
    #[must_use]
    pub fn to_bytes(&self, root: &Folder) -> Vec<u8> {
        let text = self.write_string(root);
        let mut bytes = match self.encoding {
            TextEncoding::Utf8 => Vec::with_capacity(text.len()),
            other => other.bom().to_vec(),
        };
        bytes.extend(self.encoding.encode(&text));
        bytes
    }

    /// Write `root` to `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::Io`] if the sink fails.
    pub fn write_to(&self, root: &Folder, mut sink: impl io::Write) -> Result<(), WriteError> {
        sink.write_all(&self.to_bytes(root))?;
        sink.flush()?;
        Ok(())
    }
}

fn header(encoding: TextEncoding) -> String {
    format!(
        "<!DOCTYPE NETSCAPE-Bookmark-file-1>\n\
         <!--This is an automatically generated file.\n\
         It will be read and overwritten.\n\
         Do Not Edit! -->\n\
         <META HTTP-EQUIV=\"Content-Type\" CONTENT=\"text/html; charset={}\">\n\
         <Title>Bookmarks</Title>\n\
         <H1>Bookmarks</H1>\n",
        encoding.web_name()
    )
}

fn indent(markup: &mut MarkupWriter, depth: usize) {
    markup.raw(&INDENTATION.repeat(depth));
}

/// Nested `<DL><p>` blocks for `root` and every folder below it.
///
/// Walks with an explicit stack rather than recursing per folder.
fn write_lists(markup: &mut MarkupWriter, root: &Folder) {
    markup.raw("<DL><p>\n");
    let mut open = vec![(root.iter(), 0)];
    while let Some((items, depth)) = open.last_mut() {
        let depth = *depth;
        match items.next() {
            Some(Item::Link(link)) => write_link(markup, link, depth + 1),
            Some(Item::Folder(inner)) => {
                write_folder_header(markup, inner, depth + 1);
                indent(markup, depth + 1);
                markup.raw("<DL><p>\n");
                open.push((inner.iter(), depth + 1));
            }
            Some(Item::Custom(custom)) => {
                let title = BookmarkItem::title(&**custom).unwrap_or_default();
                warn_once(
                    "Netscape Writer",
                    &format!("skipping custom bookmark item {title:?}: not representable in this format"),
                );
            }
            None => {
                indent(markup, depth);
                markup.raw("</DL><p>\n");
                let _ = open.pop();
            }
        }
    }
}

fn write_link(markup: &mut MarkupWriter, link: &Link, depth: usize) {
    indent(markup, depth);
    markup.raw("<DT>");
    markup.start_element("A");
    write_timestamp(markup, "LAST_MODIFIED", link.last_modified);
    write_timestamp(markup, "LAST_VISIT", link.last_visit);
    write_timestamp(markup, "ADD_DATE", link.added);
    if let Some(icon_url) = link.icon_url.as_deref().filter(|url| !url.is_empty()) {
        markup.attribute("ICON_URI", icon_url);
    }
    if let Some(icon) = link.icon.as_ref().filter(|icon| !icon.content_type.is_empty()) {
        let data_url = DataUrl::new(icon.content_type.clone(), icon.data.clone());
        markup.attribute("ICON", &data_url.to_string());
    }
    let feed_url = link.feed_url.as_deref().filter(|url| !url.is_empty());
    if let Some(feed_url) = feed_url {
        markup.attribute("FEED", "true");
        markup.attribute("FEEDURL", feed_url);
    }
    markup.attribute("HREF", &link.url);
    write_custom_attributes(markup, &link.attributes, |name| {
        feed_url.is_some() && name.eq_ignore_ascii_case("feed")
    });
    if let Some(title) = &link.title {
        markup.text(title);
    }
    markup.end_element();

    if let Some(description) = link.description.as_deref().filter(|text| !text.is_empty()) {
        markup.raw("\n");
        indent(markup, depth);
        markup.raw("<DD>");
        markup.text(description);
    }
    markup.raw("\n");
}

fn write_folder_header(markup: &mut MarkupWriter, folder: &Folder, depth: usize) {
    indent(markup, depth);
    markup.raw("<DT>");
    markup.start_element("H3");
    write_timestamp(markup, "LAST_MODIFIED", folder.last_modified);
    write_timestamp(markup, "ADD_DATE", folder.added);
    write_custom_attributes(markup, &folder.attributes, |_| false);
    if let Some(title) = &folder.title {
        markup.text(title);
    }
    markup.end_element();
    markup.raw("\n");
}

fn write_timestamp(markup: &mut MarkupWriter, name: &str, value: Option<OffsetDateTime>) {
    if let Some(value) = value {
        markup.attribute(name, &to_epoch_seconds(value).to_string());
    }
}

/// True if `name` reads back as the same single attribute name: not empty,
/// with no whitespace, quotes, `=`, `&`, `<`, `>` or `/`.
#[must_use]
pub fn is_writable_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && !name
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '=' | '&' | '<' | '>' | '/'))
}

/// Every attribute not in [`IGNORED_ATTRIBUTES`] (nor `skip`), upper-cased.
fn write_custom_attributes(markup: &mut MarkupWriter, attributes: &Attributes, skip: impl Fn(&str) -> bool) {
    for (name, value) in attributes {
        if is_ignored_attribute(name) || skip(name) {
            continue;
        }
        if !is_writable_attribute_name(name) {
            warn_once(
                "Netscape Writer",
                &format!("skipping attribute {name:?}: not a valid attribute name"),
            );
            continue;
        }
        markup.attribute(&name.to_ascii_uppercase(), value);
    }
}
