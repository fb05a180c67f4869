use super::chunk::{Attribute, Chunk, ChunkKind};

/// Where the tag scanner goes after reading a tag name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagState {
    /// Whitespace followed the name; attribute tokens come next.
    Attributes,
    /// The name was `!--`; everything up to `-->` is comment body.
    Comment,
    /// The tag was closed (or input ran out) while reading the name.
    Closed,
}

/// Byte-level tokenizer for Netscape bookmark markup.
///
/// The tokenizer is a cursor over a borrowed byte buffer. Each call to
/// [`Tokenizer::next_chunk`] returns a fresh [`Chunk`] and advances the cursor
/// past it. [`Tokenizer::peek_next`] returns the same chunk without moving,
/// and [`Tokenizer::step_back`] rewinds to the start of a chunk already
/// returned so the caller's next read yields it again.
///
/// Malformed markup never fails: an unterminated tag becomes a best-effort
/// chunk built from whatever was read before the input ended.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    pub(super) input: &'a [u8],
    pub(super) pos: usize,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer positioned at the start of `input`.
    #[must_use]
    pub const fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    /// Current byte offset of the cursor.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Return the chunk the next [`Tokenizer::next_chunk`] call would return,
    /// leaving the cursor where it is.
    #[must_use]
    pub fn peek_next(&self) -> Option<Chunk> {
        self.clone().next_chunk()
    }

    /// Rewind the cursor to the start of `chunk`.
    pub const fn step_back(&mut self, chunk: &Chunk) {
        self.pos = chunk.start;
    }

    /// Read the next chunk, or `None` once only whitespace (or nothing) is left.
    pub fn next_chunk(&mut self) -> Option<Chunk> {
        let start = self.pos;
        let mut chunk = Chunk::new(ChunkKind::Text, start);
        let mut text = Vec::new();

        loop {
            let saw_whitespace = self.skip_whitespace();
            let Some(byte) = self.current() else {
                break;
            };

            if byte == b'<' {
                if text.is_empty() && !saw_whitespace {
                    self.pos += 1;
                    return Some(self.tag(start));
                }
                // Leave `<` for the next call.
                if saw_whitespace {
                    text.push(b' ');
                }
                break;
            }

            self.pos += 1;
            if saw_whitespace {
                text.push(b' ');
            }
            if byte == b'&' {
                match self.character_reference() {
                    Some(decoded) => {
                        chunk.has_entities = true;
                        push_char(&mut text, decoded);
                    }
                    None => text.push(b'&'),
                }
            } else {
                text.push(byte);
            }
        }

        if text.is_empty() {
            return None;
        }
        chunk.text = String::from_utf8_lossy(&text).into_owned();
        Some(chunk)
    }

    /// Scan a tag whose `<` has just been consumed.
    fn tag(&mut self, start: usize) -> Chunk {
        let mut chunk = Chunk::new(ChunkKind::OpenTag, start);
        match self.tag_name(&mut chunk) {
            TagState::Attributes => self.tag_attributes(&mut chunk),
            TagState::Comment => self.comment(&mut chunk),
            TagState::Closed => {}
        }
        chunk
    }

    fn tag_name(&mut self, chunk: &mut Chunk) -> TagState {
        let mut name = Vec::new();
        let state = loop {
            let Some(byte) = self.consume() else {
                break TagState::Closed;
            };
            match byte {
                b'>' => break TagState::Closed,
                b'/' if name.is_empty() => chunk.kind = ChunkKind::CloseTag,
                b'/' if self.current() == Some(b'>') => chunk.self_closing = true,
                _ if is_whitespace(byte) => {
                    if !name.is_empty() {
                        break TagState::Attributes;
                    }
                }
                _ => {
                    name.push(byte);
                    if name == b"!--" {
                        break TagState::Comment;
                    }
                }
            }
        };
        chunk.tag = String::from_utf8_lossy(&name).to_ascii_lowercase();
        state
    }

    fn tag_attributes(&mut self, chunk: &mut Chunk) {
        let mut token = Vec::new();
        let mut quote = None;

        while let Some(byte) = self.consume() {
            match (byte, quote) {
                (b'&', _) => match self.character_reference() {
                    // A decoded `>` acts like a literal one: it ends an
                    // unquoted tag and is dropped inside quotes.
                    Some('>') if quote.is_none() => {
                        chunk.has_entities = true;
                        push_attribute(chunk, &mut token);
                        return;
                    }
                    Some('>') => chunk.has_entities = true,
                    Some(decoded) => {
                        chunk.has_entities = true;
                        push_char(&mut token, decoded);
                    }
                    None => token.push(b'&'),
                },
                (_, Some(open)) if byte == open => quote = None,
                (b'>' | b'\r', Some(_)) => {}
                (_, Some(_)) => token.push(byte),
                (b'"' | b'\'', None) => quote = Some(byte),
                (b'>', None) => {
                    push_attribute(chunk, &mut token);
                    return;
                }
                (b'/', None) if self.current() == Some(b'>') => chunk.self_closing = true,
                (_, None) if is_whitespace(byte) => push_attribute(chunk, &mut token),
                (_, None) => token.push(byte),
            }
        }

        push_attribute(chunk, &mut token);
    }

    /// Read a comment body up to the `>` that follows `--`.
    fn comment(&mut self, chunk: &mut Chunk) {
        chunk.kind = ChunkKind::Comment;
        let body_start = self.pos;
        let mut body_end = self.input.len();

        while let Some(byte) = self.consume() {
            let gt = self.pos - 1;
            if byte == b'>' && self.input[..gt].ends_with(b"--") {
                body_end = gt;
                break;
            }
        }

        let body = &self.input[body_start..body_end];
        let body = body.strip_suffix(b"--").unwrap_or(body);
        chunk.text = String::from_utf8_lossy(body).into_owned();
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        self.next_chunk()
    }
}

pub(super) const fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r' | b'\n')
}

fn push_char(buffer: &mut Vec<u8>, c: char) {
    let mut utf8 = [0; 4];
    buffer.extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
}

/// Split an attribute token on its first `=` and record it on the chunk.
///
/// A token starting with `=` or without one is a bare name with an empty value.
fn push_attribute(chunk: &mut Chunk, token: &mut Vec<u8>) {
    if token.is_empty() {
        return;
    }
    let attribute = {
        let raw = String::from_utf8_lossy(token.as_slice());
        match raw.find('=') {
            Some(eq) if eq > 0 => {
                Attribute::new(raw[..eq].to_ascii_lowercase(), raw[eq + 1..].to_string())
            }
            _ => Attribute::new(raw.to_ascii_lowercase(), String::new()),
        }
    };
    chunk.attributes.push(attribute);
    token.clear();
}
