//! Terminal and JSON views of a bookmark tree.

use bookmarks_common::timestamp::to_epoch_seconds;
use bookmarks_tree::{Folder, Item, Link, PERSONAL_TOOLBAR_FOLDER};
use owo_colors::OwoColorize;
use serde_json::{Map, Value, json};

/// Print the folder tree with per-folder counts, then totals.
pub fn print_tree(root: &Folder) {
    print_children(root, 0);
    println!();
    print_summary(root);
}

fn print_children(folder: &Folder, indent: usize) {
    let prefix = "  ".repeat(indent);
    for item in folder {
        match item {
            Item::Folder(inner) => {
                let marker = if inner.attributes.contains_key(PERSONAL_TOOLBAR_FOLDER) {
                    " [toolbar]"
                } else {
                    ""
                };
                println!(
                    "{prefix}{}{} {}",
                    display_title(inner.title.as_deref()).blue().bold(),
                    marker.yellow(),
                    format!("({} items)", inner.len()).dimmed()
                );
                print_children(inner, indent + 1);
            }
            Item::Link(link) => {
                println!("{prefix}{} {}", display_title(link.title.as_deref()), link.url.dimmed());
            }
            Item::Custom(custom) => {
                println!("{prefix}{}", display_title(custom.title()).magenta());
            }
        }
    }
}

/// Print every link, one `title (url)` per line.
pub fn print_links(root: &Folder) {
    for link in root.all_links() {
        println!("{link}");
    }
    println!();
    print_summary(root);
}

fn print_summary(root: &Folder) {
    let folders = root.all_folders().count();
    let links = root.all_links().count();
    println!("{} folders, {} links", folders.bold(), links.bold());
}

fn display_title(title: Option<&str>) -> &str {
    match title {
        Some(title) if !title.is_empty() => title,
        _ => "(untitled)",
    }
}

/// JSON view of a folder and everything under it.
pub fn folder_to_json(folder: &Folder) -> Value {
    let mut obj = Map::new();
    let _ = obj.insert("type".to_string(), json!("folder"));
    let _ = obj.insert("title".to_string(), json!(folder.title));
    if let Some(added) = folder.added {
        let _ = obj.insert("added".to_string(), json!(to_epoch_seconds(added)));
    }
    if let Some(modified) = folder.last_modified {
        let _ = obj.insert("lastModified".to_string(), json!(to_epoch_seconds(modified)));
    }
    if !folder.attributes.is_empty() {
        let _ = obj.insert("attributes".to_string(), json!(folder.attributes));
    }
    let children: Vec<Value> = folder.iter().map(item_to_json).collect();
    let _ = obj.insert("children".to_string(), Value::Array(children));
    Value::Object(obj)
}

fn item_to_json(item: &Item) -> Value {
    match item {
        Item::Folder(folder) => folder_to_json(folder),
        Item::Link(link) => link_to_json(link),
        Item::Custom(custom) => json!({ "type": "custom", "title": custom.title() }),
    }
}

fn link_to_json(link: &Link) -> Value {
    let mut obj = Map::new();
    let _ = obj.insert("type".to_string(), json!("link"));
    let _ = obj.insert("title".to_string(), json!(link.title));
    let _ = obj.insert("url".to_string(), json!(link.url));
    for (key, value) in [
        ("added", link.added),
        ("lastModified", link.last_modified),
        ("lastVisit", link.last_visit),
    ] {
        if let Some(value) = value {
            let _ = obj.insert(key.to_string(), json!(to_epoch_seconds(value)));
        }
    }
    for (key, value) in [
        ("description", &link.description),
        ("iconUrl", &link.icon_url),
        ("feedUrl", &link.feed_url),
    ] {
        if let Some(value) = value {
            let _ = obj.insert(key.to_string(), json!(value));
        }
    }
    if let Some(icon) = &link.icon {
        let _ = obj.insert("iconType".to_string(), json!(icon.content_type));
    }
    if !link.attributes.is_empty() {
        let _ = obj.insert("attributes".to_string(), json!(link.attributes));
    }
    Value::Object(obj)
}
