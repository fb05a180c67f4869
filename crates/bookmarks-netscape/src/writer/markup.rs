//! A small streaming markup serializer.
//!
//! Takes care of escaping so that callers only deal in element names,
//! attribute pairs and plain text. Start tags stay open until text, raw
//! markup or an end tag follows, so attributes can be added one at a time.

use std::borrow::Cow;

/// Builds markup into an in-memory string.
#[derive(Debug, Default)]
pub struct MarkupWriter {
    buffer: String,
    open_elements: Vec<String>,
    in_start_tag: bool,
}

impl MarkupWriter {
    /// An empty writer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append markup verbatim.
    pub fn raw(&mut self, markup: &str) {
        self.close_start_tag();
        self.buffer.push_str(markup);
    }

    /// Open an element. Its start tag accepts attributes until anything else
    /// is written.
    pub fn start_element(&mut self, name: &str) {
        self.close_start_tag();
        self.buffer.push('<');
        self.buffer.push_str(name);
        self.open_elements.push(name.to_string());
        self.in_start_tag = true;
    }

    /// Add `name="value"` to the open start tag. Ignored outside a start tag.
    pub fn attribute(&mut self, name: &str, value: &str) {
        if !self.in_start_tag {
            return;
        }
        self.buffer.push(' ');
        self.buffer.push_str(name);
        self.buffer.push_str("=\"");
        self.buffer.push_str(&escape_attribute(value));
        self.buffer.push('"');
    }

    /// Append escaped character data.
    pub fn text(&mut self, text: &str) {
        self.close_start_tag();
        self.buffer.push_str(&escape_text(text));
    }

    /// Close the innermost open element with a full end tag.
    pub fn end_element(&mut self) {
        self.close_start_tag();
        if let Some(name) = self.open_elements.pop() {
            self.buffer.push_str("</");
            self.buffer.push_str(&name);
            self.buffer.push('>');
        }
    }

    /// Finish writing and return the markup.
    #[must_use]
    pub fn into_string(mut self) -> String {
        self.close_start_tag();
        self.buffer
    }

    fn close_start_tag(&mut self) {
        if self.in_start_tag {
            self.buffer.push('>');
            self.in_start_tag = false;
        }
    }
}

/// Escape `&`, `<` and `>` in character data.
#[must_use]
pub fn escape_text(text: &str) -> Cow<'_, str> {
    escape(text, false)
}

/// Escape `&`, `<`, `>` and `"` in a double-quoted attribute value.
#[must_use]
pub fn escape_attribute(value: &str) -> Cow<'_, str> {
    escape(value, true)
}

fn escape(input: &str, quotes: bool) -> Cow<'_, str> {
    let needs_escape = |c: char| matches!(c, '&' | '<' | '>') || (quotes && c == '"');
    if !input.contains(needs_escape) {
        return Cow::Borrowed(input);
    }

    let mut escaped = String::with_capacity(input.len() + 8);
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' if quotes => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
