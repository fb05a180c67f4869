//! Recursive-descent parser turning tokenizer chunks into a bookmark tree.
//!
//! The grammar is tiny. A `<DL>` opens a folder body and `</DL>` closes it.
//! Each `<DT>` introduces one item: an `<A>` link (optionally followed by a
//! `<DD>` description) or an `<H3>` folder header whose body is the next
//! `<DL>`. Everything else (`<p>`, `<H1>`, comments, stray text) is skipped.

use bookmarks_common::data_url::DataUrl;
use bookmarks_common::timestamp::parse_epoch_value;
use bookmarks_common::warning::warn_once;
use bookmarks_tree::{Attributes, Folder, Icon, Item, Link};

use crate::error::ReadError;
use crate::tokenizer::{Attribute, Chunk, Tokenizer};

/// Deepest folder nesting the parser builds. Lists opened below this depth
/// are flattened into the deepest folder.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Parse a UTF-8 Netscape bookmark document into its root folder.
///
/// # Errors
///
/// Returns [`ReadError::NotNetscapeDocument`] if the input has no
/// `<DL> ... </DL>` block. Malformed content inside the document never fails
/// the parse.
pub fn parse(input: &[u8]) -> Result<Folder, ReadError> {
    if !looks_like_bookmark_document(input) {
        return Err(ReadError::NotNetscapeDocument);
    }
    let mut parser = Parser {
        tokenizer: Tokenizer::new(input),
    };
    Ok(parser.folder(Folder::new(), true, 0))
}

/// Cheap structural check: a `<DL>` tag followed, after at least one byte,
/// by a `</DL>` tag. Tag names are case-insensitive and may carry trailing
/// whitespace before `>`.
#[must_use]
pub fn looks_like_bookmark_document(input: &[u8]) -> bool {
    find_list_tag(input, 0, b"<dl").is_some_and(|open_end| find_list_tag(input, open_end + 1, b"</dl").is_some())
}

/// Offset just past the first `<dl\s*>` (or `</dl\s*>`) at or after `from`.
fn find_list_tag(input: &[u8], from: usize, prefix: &[u8]) -> Option<usize> {
    let mut at = from;
    while at + prefix.len() <= input.len() {
        if input[at..at + prefix.len()].eq_ignore_ascii_case(prefix) {
            let mut end = at + prefix.len();
            while input.get(end).is_some_and(u8::is_ascii_whitespace) {
                end += 1;
            }
            if input.get(end) == Some(&b'>') {
                return Some(end + 1);
            }
        }
        at += 1;
    }
    None
}

struct Parser<'a> {
    tokenizer: Tokenizer<'a>,
}

impl Parser<'_> {
    /// Fill `folder` with items until its `</DL>` (or the end of input).
    ///
    /// `top_level` is set only for the document root, whose first untitled
    /// `<DL>` holds the root's own items rather than a nested folder.
    /// `depth` is the nesting of `folder` below the root.
    fn folder(&mut self, mut folder: Folder, mut top_level: bool, depth: usize) -> Folder {
        // An <H3> header waiting for the <DL> that holds its items.
        let mut header: Option<Folder> = None;
        // Lists past the nesting limit still open inside this folder.
        let mut flattened = 0_usize;

        while let Some(chunk) = self.tokenizer.next_chunk() {
            if chunk.is_open_tag("dt") {
                match self.item() {
                    Some(Item::Folder(next)) => {
                        if let Some(empty) = header.replace(next) {
                            folder.push(empty);
                        }
                    }
                    Some(item) => {
                        if let Some(empty) = header.take() {
                            folder.push(empty);
                        }
                        folder.push(item);
                    }
                    None => {}
                }
            } else if chunk.is_open_tag("dl") {
                if top_level && header.is_none() {
                    top_level = false;
                    folder = self.folder(folder, false, depth);
                } else if depth >= MAX_NESTING_DEPTH {
                    if let Some(empty) = header.take() {
                        folder.push(empty);
                    }
                    warn_once(
                        "Netscape Parser",
                        &format!("flattening lists nested deeper than {MAX_NESTING_DEPTH} levels"),
                    );
                    flattened += 1;
                } else {
                    let nested = self.folder(header.take().unwrap_or_default(), false, depth + 1);
                    folder.push(nested);
                }
            } else if chunk.is_close_tag("dl") {
                if flattened == 0 {
                    break;
                }
                flattened -= 1;
            }
        }

        if let Some(empty) = header {
            folder.push(empty);
        }
        folder
    }

    /// Parse the item after a `<DT>`.
    ///
    /// Stops at the next `<DT>` or any `<DL>`/`</DL>`, which is stepped back
    /// over so the enclosing folder sees it.
    fn item(&mut self) -> Option<Item> {
        let mut link: Option<Link> = None;

        while let Some(chunk) = self.tokenizer.next_chunk() {
            if chunk.is_open_tag("a") {
                let mut next = link_from_attributes(&chunk.attributes);
                next.title = self.title();
                link = Some(next);
            } else if chunk.is_open_tag("dd") {
                if let Some(link) = link.as_mut() {
                    link.description = self.description();
                }
            } else if chunk.is_open_tag("h3") {
                let mut folder = folder_from_attributes(&chunk.attributes);
                folder.title = self.title();
                return Some(folder.into());
            } else if chunk.is_open_tag("dt") || chunk.is_open_tag("dl") || chunk.is_close_tag("dl") {
                self.tokenizer.step_back(&chunk);
                break;
            }
        }

        link.map(Item::from)
    }

    /// The text right after a tag, or `None` (leaving the cursor in place)
    /// if a tag comes first.
    fn title(&mut self) -> Option<String> {
        let chunk = self.tokenizer.next_chunk()?;
        if chunk.is_text() {
            return Some(chunk.text);
        }
        self.tokenizer.step_back(&chunk);
        None
    }

    /// Trimmed text after a `<DD>`. Whitespace-only text yields `None`.
    fn description(&mut self) -> Option<String> {
        let chunk = self.tokenizer.peek_next().filter(Chunk::is_text)?;
        let _ = self.tokenizer.next_chunk();
        let text = chunk.text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

fn link_from_attributes(attributes: &[Attribute]) -> Link {
    let mut link = Link::default();
    for attribute in attributes {
        let value = &attribute.value;
        match attribute.name.as_str() {
            "href" => link.url.clone_from(value),
            "add_date" => link.added = parse_epoch_value(value),
            "last_modified" => link.last_modified = parse_epoch_value(value),
            "last_visited" | "last_visit" => link.last_visit = parse_epoch_value(value),
            "icon" => link.icon = decode_icon(value),
            "icon_uri" => link.icon_url = Some(value.clone()),
            "feedurl" => link.feed_url = Some(value.clone()),
            _ => {}
        }
        record(&mut link.attributes, attribute);
    }
    link
}

fn folder_from_attributes(attributes: &[Attribute]) -> Folder {
    let mut folder = Folder::new();
    for attribute in attributes {
        match attribute.name.as_str() {
            "add_date" => folder.added = parse_epoch_value(&attribute.value),
            "last_modified" => folder.last_modified = parse_epoch_value(&attribute.value),
            _ => {}
        }
        record(&mut folder.attributes, attribute);
    }
    folder
}

/// Keep the first value seen for each attribute name.
fn record(attributes: &mut Attributes, attribute: &Attribute) {
    let _ = attributes
        .entry(attribute.name.clone())
        .or_insert_with(|| attribute.value.clone());
}

fn decode_icon(value: &str) -> Option<Icon> {
    match DataUrl::parse(value) {
        Ok(DataUrl { content_type, data }) => Some(Icon { content_type, data }),
        Err(err) => {
            warn_once("Netscape Parser", &format!("ignoring embedded icon: {err}"));
            None
        }
    }
}
