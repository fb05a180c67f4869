//! Integration tests for the Chrome bookmark JSON reader.

use bookmarks_chrome::{ChromeError, ChromeReader, looks_like_chrome_json};
use bookmarks_common::warning::was_warned;
use bookmarks_tree::{BookmarkItem, Folder, OffsetDateTime, PERSONAL_TOOLBAR_FOLDER};

/// `chrome.bookmarks.getTree()` output, children of the invisible root node.
const API_DUMP: &str = r#"[
  {
    "children": [
      {
        "children": [
          {
            "dateAdded": 1376331421280,
            "id": "1761",
            "index": 0,
            "parentId": "1764",
            "title": "One billion dollar extension!",
            "url": "https://example.com"
          }
        ],
        "dateAdded": 1376985076144,
        "dateGroupModified": 1399979366446,
        "id": "1764",
        "index": 1,
        "parentId": "1",
        "title": "ADDOn bugai"
      },
      {
        "dateAdded": 1354574135265,
        "dateGroupModified": 1394173513394,
        "id": "943",
        "index": 2,
        "parentId": "1",
        "title": "--ON AIR--"
      }
    ],
    "dateAdded": 1351969749600,
    "dateGroupModified": 1405951149160,
    "id": "1",
    "index": 0,
    "parentId": "0",
    "title": "Bookmarks bar"
  },
  {
    "children": [
      {
        "children": [
          {
            "dateAdded": 1351972113883,
            "id": "904",
            "index": 0,
            "parentId": "903",
            "title": "Incredible StartPage Settings",
            "url": "chrome-extension://zzz/options.html"
          }
        ],
        "dateAdded": 1351972113883,
        "dateGroupModified": 1361517185887,
        "id": "903",
        "index": 0,
        "parentId": "902",
        "title": "Extension Settings"
      }
    ],
    "dateAdded": 1351969749600,
    "dateGroupModified": 1361517185886,
    "id": "902",
    "index": 1,
    "parentId": "0",
    "title": "Other bookmarks"
  },
  {
    "children": [
      {
        "dateAdded": 1394876140533,
        "id": "2498",
        "index": 0,
        "parentId": "905",
        "title": "example.net",
        "url": "http://example.number.two"
      }
    ],
    "dateAdded": 1351969749600,
    "dateGroupModified": 1394876140533,
    "id": "905",
    "index": 2,
    "parentId": "0",
    "title": "Mobile bookmarks"
  }
]"#;

/// A profile's on-disk `Bookmarks` file.
const BOOKMARKS_FILE: &str = r#"{
   "checksum": "0f1e2d3c4b5a69788796a5b4c3d2e1f0",
   "roots": {
      "bookmark_bar": {
         "children": [ {
            "date_added": "13245678901234567",
            "date_last_used": "13245679000000000",
            "guid": "00000000-0000-4000-a000-000000000005",
            "id": "5",
            "meta_info": { "last_visited_desktop": "13245679000000000" },
            "name": "Rust",
            "type": "url",
            "url": "https://www.rust-lang.org/"
         }, {
            "children": [ ],
            "date_added": "13245678902000000",
            "date_modified": "0",
            "id": "6",
            "name": "Later",
            "type": "folder"
         } ],
         "date_added": "13245678900000000",
         "date_modified": "13245678905000000",
         "id": "1",
         "name": "Bookmarks bar",
         "type": "folder"
      },
      "other": {
         "children": [ ],
         "date_added": "13245678900000000",
         "date_modified": "0",
         "id": "2",
         "name": "Other bookmarks",
         "type": "folder"
      },
      "sync_transaction_version": "3",
      "synced": {
         "children": [ ],
         "date_added": "13245678900000000",
         "date_modified": "0",
         "id": "3",
         "name": "Mobile bookmarks",
         "type": "folder"
      }
   },
   "version": 1
}"#;

/// Helper to read JSON that must be accepted
fn read(json: &str) -> Folder {
    ChromeReader::new().read_str(json).expect("JSON should be read")
}

fn utc(seconds: i64) -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(seconds).expect("valid timestamp")
}

#[test]
fn test_empty_container() {
    let root = read("[]");
    assert_eq!(root.title, None);
    assert!(root.attributes.is_empty());
    assert!(root.is_empty());
    assert_eq!(root.all_items().count(), 0);
}

#[test]
fn test_api_dump() {
    let root = read(API_DUMP);
    assert_eq!(root.len(), 3);
    assert_eq!(root.all_items().count(), 9);
    assert_eq!(root.all_links().count(), 3);
    assert_eq!(
        root.iter()
            .filter(|item| item.title().is_some_and(|t| t.eq_ignore_ascii_case("mobile bookmarks")))
            .count(),
        1
    );

    let empty = root
        .all_folders()
        .find(|folder| folder.title.as_deref() == Some("--ON AIR--"))
        .expect("folder without children");
    assert!(empty.is_empty());
}

#[test]
fn test_api_fields() {
    let root = read(API_DUMP);
    let bar = root.bookmarks_bar().expect("bookmarks bar");
    assert_eq!(bar.title.as_deref(), Some("Bookmarks bar"));
    assert_eq!(bar.attributes["id"], "1");
    assert_eq!(bar.attributes["parentid"], "0");
    assert!(!bar.attributes.contains_key("type"));
    assert_eq!(bar.added, Some(utc(1_351_969_749)));
    assert_eq!(bar.last_modified, Some(utc(1_405_951_149)));

    let link = root
        .all_links()
        .find(|link| link.url == "https://example.com")
        .expect("link");
    assert_eq!(link.title.as_deref(), Some("One billion dollar extension!"));
    assert_eq!(link.added, Some(utc(1_376_331_421)));
    assert_eq!(link.last_modified, None);
    assert_eq!(link.attributes["parentid"], "1764");
    assert!(!link.attributes.contains_key(PERSONAL_TOOLBAR_FOLDER));
}

#[test]
fn test_children_ordered_by_index() {
    let root = read(
        r#"[{"title": "f", "children": [
            {"title": "c", "url": "c", "index": 2},
            {"title": "a", "url": "a", "index": 0},
            {"title": "none", "url": "n"},
            {"title": "b", "url": "b", "index": 1}
        ]}]"#,
    );
    let folder = root.children()[0].as_folder().expect("folder");
    let titles: Vec<_> = folder.iter().filter_map(BookmarkItem::title).collect();
    assert_eq!(titles, ["a", "none", "b", "c"]);
}

#[test]
fn test_bookmarks_file() {
    let root = read(BOOKMARKS_FILE);
    let titles: Vec<_> = root.iter().filter_map(BookmarkItem::title).collect();
    assert_eq!(titles, ["Bookmarks bar", "Other bookmarks", "Mobile bookmarks"]);
    assert!(was_warned(
        "Chrome Reader",
        "skipping root entry \"sync_transaction_version\": not a bookmark node"
    ));

    let bar = root.bookmarks_bar().expect("bookmarks bar");
    assert_eq!(bar.attributes["type"], "folder");
    assert_eq!(bar.added, Some(utc(1_601_205_300)));
    assert_eq!(bar.last_modified, Some(utc(1_601_205_305)));
    assert_eq!(bar.len(), 2);

    let rust = bar.children()[0].as_link().expect("link");
    assert_eq!(rust.title.as_deref(), Some("Rust"));
    assert_eq!(rust.url, "https://www.rust-lang.org/");
    assert_eq!(rust.added, Some(utc(1_601_205_301)));
    assert_eq!(rust.last_visit, Some(utc(1_601_205_400)));
    assert_eq!(rust.attributes["type"], "url");

    let later = bar.children()[1].as_folder().expect("folder");
    assert!(later.is_empty());
    assert_eq!(later.last_modified, None);
}

#[test]
fn test_localized_bookmarks_bar() {
    let json = r#"[{"title": "Barra de favoritos", "children": []}, {"title": "Bookmarks bar", "children": []}]"#;
    let reader = ChromeReader {
        bookmarks_bar_title: "barra de favoritos".to_string(),
    };
    let root = reader.read_str(json).expect("JSON should be read");
    let bar = root.bookmarks_bar().expect("bookmarks bar");
    assert_eq!(bar.title.as_deref(), Some("Barra de favoritos"));
    assert_eq!(root.all_folders().filter(|f| f.attributes.contains_key(PERSONAL_TOOLBAR_FOLDER)).count(), 1);
}

#[test]
fn test_link_named_bookmarks_bar_is_not_a_toolbar() {
    let root = read(r#"[{"title": "Bookmarks bar", "url": "https://example.com"}]"#);
    assert!(root.bookmarks_bar().is_none());
    assert_eq!(root.all_links().count(), 1);
}

#[test]
fn test_title_falls_back_to_name() {
    let root = read(r#"[{"name": "from name", "url": "a"}, {"title": "", "name": "ignored", "url": "b"}]"#);
    assert_eq!(root.children()[0].title(), Some("from name"));
    assert_eq!(root.children()[1].title(), Some(""));
}

#[test]
fn test_read_bytes_with_bom() {
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice(API_DUMP.as_bytes());
    let root = ChromeReader::new().read_bytes(&bytes).expect("JSON should be read");
    assert_eq!(root.len(), 3);

    let root = ChromeReader::new()
        .read_from(BOOKMARKS_FILE.as_bytes())
        .expect("JSON should be read");
    assert_eq!(root.len(), 3);
}

#[test]
fn test_errors() {
    let reader = ChromeReader::new();
    assert!(matches!(reader.read_str("<DL><p></DL>"), Err(ChromeError::Json(_))));
    assert!(matches!(reader.read_str(r#"[{"title": 5}]"#), Err(ChromeError::Json(_))));
    assert!(matches!(reader.read_str(r#"{"version": 1}"#), Err(ChromeError::UnrecognizedShape)));
    assert!(matches!(reader.read_str(r#"{"roots": []}"#), Err(ChromeError::UnrecognizedShape)));
    assert!(matches!(reader.read_str("42"), Err(ChromeError::UnrecognizedShape)));
}

#[test]
fn test_looks_like_chrome_json() {
    assert!(looks_like_chrome_json(API_DUMP.as_bytes()));
    assert!(looks_like_chrome_json(b"\xEF\xBB\xBF\n  {\"roots\": {}}"));
    assert!(!looks_like_chrome_json(b"<!DOCTYPE NETSCAPE-Bookmark-file-1>"));
    assert!(!looks_like_chrome_json(b"   "));
}
