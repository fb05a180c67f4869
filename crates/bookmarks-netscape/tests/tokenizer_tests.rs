//! Integration tests for the bookmark markup tokenizer.

use bookmarks_netscape::tokenizer::{Attribute, Chunk, ChunkKind, Tokenizer};
use quickcheck_macros::quickcheck;

/// Helper to tokenize a whole input
fn chunks(input: &str) -> Vec<Chunk> {
    Tokenizer::new(input.as_bytes()).collect()
}

/// Helper to tokenize and return the single chunk produced
fn single(input: &str) -> Chunk {
    let mut all = chunks(input);
    assert_eq!(all.len(), 1, "expected one chunk from {input:?}, got {all:?}");
    all.remove(0)
}

fn attr(name: &str, value: &str) -> Attribute {
    Attribute::new(name.to_string(), value.to_string())
}

#[test]
fn test_tag_text_tag() {
    let all = chunks(r#"<A HREF="x">Hello   world</A>"#);
    assert_eq!(all.len(), 3);

    assert_eq!(all[0].kind, ChunkKind::OpenTag);
    assert_eq!(all[0].tag, "a");
    assert_eq!(all[0].attributes, vec![attr("href", "x")]);

    assert!(all[1].is_text());
    assert_eq!(all[1].text, "Hello world");

    assert!(all[2].is_close_tag("a"));
}

#[test]
fn test_whitespace_between_tags_becomes_single_space() {
    let all = chunks("<b> \n\t <i>");
    assert_eq!(all.len(), 3);
    assert!(all[1].is_text());
    assert_eq!(all[1].text, " ");
}

#[test]
fn test_whitespace_at_end_is_not_a_chunk() {
    let all = chunks("<b>   \r\n");
    assert_eq!(all.len(), 1);
    assert!(all[0].is_open_tag("b"));
    assert!(chunks("").is_empty());
    assert!(chunks("  \n ").is_empty());
}

#[test]
fn test_text_keeps_surrounding_space_before_tag() {
    let all = chunks("  hi there <b>");
    assert_eq!(all[0].text, " hi there ");
}

#[test]
fn test_text_at_end_of_input() {
    assert_eq!(single("just text").text, "just text");
}

#[test]
fn test_comment() {
    let all = chunks("<!-- a > b -->x");
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].kind, ChunkKind::Comment);
    assert_eq!(all[0].tag, "!--");
    assert_eq!(all[0].text, " a > b ");
    assert_eq!(all[1].text, "x");
}

#[test]
fn test_empty_comment() {
    let comment = single("<!---->");
    assert_eq!(comment.kind, ChunkKind::Comment);
    assert_eq!(comment.text, "");
}

#[test]
fn test_comment_ignores_quotes_and_entities() {
    let comment = single(r#"<!--"unbalanced &amp; -->"#);
    assert_eq!(comment.text, r#""unbalanced &amp; "#);
    assert!(!comment.has_entities);
}

#[test]
fn test_named_entities_in_text() {
    let text = single("&lt;&nbsp;&gt;");
    assert_eq!(text.text, "< >");
    assert!(text.has_entities);
}

#[test]
fn test_named_entities_are_case_sensitive() {
    assert_eq!(single("&Eacute;&eacute;").text, "\u{c9}\u{e9}");
    assert_eq!(single("&EACUTE;").text, "&EACUTE;");
}

#[test]
fn test_numeric_entities() {
    assert_eq!(single("&#65;&#x42;&#X43;&#68").text, "ABCD");
    assert_eq!(single("&#x263A;").text, "\u{263a}");
}

#[test]
fn test_failed_entities_are_restored() {
    let text = single("AT&T &bogus; &#xZZ; &#0; &amp");
    assert_eq!(text.text, "AT&T &bogus; &#xZZ; &#0; &amp");
    assert!(!text.has_entities);
}

#[test]
fn test_entity_never_starts_a_tag() {
    let text = single("&lt;b&gt;");
    assert_eq!(text.text, "<b>");
}

#[test]
fn test_escaped_gt_in_attribute_is_dropped() {
    let tag = single("<a href='&gt;12c%233'>");
    assert_eq!(tag.attribute("href"), Some("12c%233"));
    assert!(tag.has_entities);
}

#[test]
fn test_escaped_gt_outside_quotes_ends_tag() {
    let all = chunks("<a href=x&gt;tail");
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].attributes, vec![attr("href", "x")]);
    assert!(all[0].has_entities);
    assert_eq!(all[1].text, "tail");
}

#[test]
fn test_entities_in_attributes_are_data() {
    let tag = single(r#"<a title="say &quot;hi&quot; &amp; &lt;go&gt;">"#);
    assert_eq!(tag.attribute("title"), Some("say \"hi\" & <go"));
}

#[test]
fn test_attribute_quoting() {
    let tag = single(r#"<a title="two words" data='it"s' bare FLAG>"#);
    assert_eq!(
        tag.attributes,
        vec![
            attr("title", "two words"),
            attr("data", "it\"s"),
            attr("bare", ""),
            attr("flag", ""),
        ]
    );
}

#[test]
fn test_quoted_gt_does_not_end_tag() {
    let all = chunks(r#"<a title="a > b">t"#);
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].attribute("title"), Some("a  b"));
    assert_eq!(all[1].text, "t");
}

#[test]
fn test_attribute_split_on_first_equals() {
    let tag = single("<a ICON=data:image/jpeg;base64,YQ== =x>");
    assert_eq!(tag.attribute("icon"), Some("data:image/jpeg;base64,YQ=="));
    assert_eq!(tag.attribute("=x"), Some(""));
}

#[test]
fn test_names_lowercased_values_kept() {
    let tag = single(r#"<A HREF="HTTP://Example.COM/">"#);
    assert_eq!(tag.tag, "a");
    assert_eq!(tag.attribute("href"), Some("HTTP://Example.COM/"));
}

#[test]
fn test_carriage_returns_dropped_inside_quotes() {
    let tag = single("<a title=\"one\r\ntwo\">");
    assert_eq!(tag.attribute("title"), Some("one\ntwo"));
}

#[test]
fn test_close_tag() {
    let tag = single("</DL >");
    assert_eq!(tag.kind, ChunkKind::CloseTag);
    assert_eq!(tag.tag, "dl");
    assert!(tag.attributes.is_empty());
}

#[test]
fn test_self_closing_tags() {
    let br = single("<br/>");
    assert!(br.is_open_tag("br"));
    assert!(br.self_closing);

    let link = single("<a href=x/>");
    assert!(link.self_closing);
    assert_eq!(link.attribute("href"), Some("x"));

    let quoted = single(r#"<a href="x/">"#);
    assert!(!quoted.self_closing);
    assert_eq!(quoted.attribute("href"), Some("x/"));
}

#[test]
fn test_doctype_is_an_open_tag() {
    let doctype = single("<!DOCTYPE NETSCAPE-Bookmark-file-1>");
    assert!(doctype.is_open_tag("!doctype"));
    assert_eq!(doctype.attribute("netscape-bookmark-file-1"), Some(""));
}

#[test]
fn test_unterminated_tags_are_best_effort() {
    let open = single(r#"<a href="x"#);
    assert!(open.is_open_tag("a"));
    assert_eq!(open.attribute("href"), Some("x"));

    assert!(single("</dl").is_close_tag("dl"));

    let comment = single("<!-- never closed");
    assert_eq!(comment.kind, ChunkKind::Comment);
    assert_eq!(comment.text, " never closed");
}

#[test]
fn test_utf8_passes_through() {
    let all = chunks("<a>\u{104}\u{17e} \u{3c4}</a>");
    assert_eq!(all[1].text, "\u{104}\u{17e} \u{3c4}");
}

#[test]
fn test_peek_and_step_back() {
    let mut tokenizer = Tokenizer::new(b"<dt><a>t</a>");
    let dt = tokenizer.next_chunk().expect("dt chunk");
    assert!(dt.is_open_tag("dt"));
    assert_eq!(dt.start, 0);

    let peeked = tokenizer.peek_next();
    assert_eq!(tokenizer.position(), 4);
    let a = tokenizer.next_chunk();
    assert_eq!(peeked, a);

    let a = a.expect("a chunk");
    assert_eq!(a.start, 4);
    tokenizer.step_back(&a);
    assert_eq!(tokenizer.position(), 4);
    assert_eq!(tokenizer.next_chunk(), Some(a));
    assert_eq!(tokenizer.next_chunk().map(|chunk| chunk.text), Some("t".to_string()));
}

#[test]
fn test_display() {
    let tag = single("<A HREF=x ADD_DATE='1'>");
    assert_eq!(tag.to_string(), r#"<a href="x" add_date="1">"#);
    assert_eq!(single("</H3>").to_string(), "</h3>");
    assert_eq!(single("<!--c-->").to_string(), "<!--c-->");
    assert_eq!(ChunkKind::OpenTag.to_string(), "OpenTag");
}

#[quickcheck]
fn tokenizer_always_makes_progress(bytes: Vec<u8>) -> bool {
    let mut tokenizer = Tokenizer::new(&bytes);
    let mut last = 0;
    let mut count = 0;
    while tokenizer.next_chunk().is_some() {
        count += 1;
        if tokenizer.position() <= last || count > bytes.len() {
            return false;
        }
        last = tokenizer.position();
    }
    true
}

#[quickcheck]
fn peek_matches_next_and_step_back_rereads(input: String) -> bool {
    let mut tokenizer = Tokenizer::new(input.as_bytes());
    loop {
        let peeked = tokenizer.peek_next();
        let next = tokenizer.next_chunk();
        if peeked != next {
            return false;
        }
        let Some(chunk) = next else {
            return true;
        };
        let after = tokenizer.position();
        tokenizer.step_back(&chunk);
        if tokenizer.next_chunk().as_ref() != Some(&chunk) || tokenizer.position() != after {
            return false;
        }
    }
}
