//! Cursor and character-reference helpers for the tokenizer.

use super::entities::{MAX_ENTITY_LEN, lookup_entity};
use super::machine::{Tokenizer, is_whitespace};

// =============================================================================
// Input Helpers
// =============================================================================

impl Tokenizer<'_> {
    /// The byte under the cursor, without consuming it.
    pub(super) fn current(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Consume the byte under the cursor.
    pub(super) fn consume(&mut self) -> Option<u8> {
        let byte = self.current()?;
        self.pos += 1;
        Some(byte)
    }

    /// Skip spaces, tabs and line breaks. Returns true if any were skipped.
    pub(super) fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.current().is_some_and(is_whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }
}

// =============================================================================
// Character References
// =============================================================================

impl Tokenizer<'_> {
    /// Decode the character reference following an `&` that was just consumed.
    ///
    /// On success the cursor is left after the reference. On failure the
    /// cursor is restored so the caller can emit the `&` literally and
    /// re-read the bytes after it.
    pub(super) fn character_reference(&mut self) -> Option<char> {
        let start = self.pos;
        let decoded = if self.current() == Some(b'#') {
            self.pos += 1;
            self.numeric_reference()
        } else {
            self.named_reference()
        };
        if decoded.is_none() {
            self.pos = start;
        }
        decoded
    }

    /// `&#NNN;` or `&#xHH;`. The trailing `;` is optional.
    fn numeric_reference(&mut self) -> Option<char> {
        let hex = matches!(self.current(), Some(b'x' | b'X'));
        if hex {
            self.pos += 1;
        }
        let (radix, is_digit): (u32, fn(&u8) -> bool) = if hex {
            (16, u8::is_ascii_hexdigit)
        } else {
            (10, u8::is_ascii_digit)
        };

        let digits_start = self.pos;
        while self.current().as_ref().is_some_and(is_digit) {
            self.pos += 1;
        }
        let digits = std::str::from_utf8(&self.input[digits_start..self.pos]).ok()?;
        let code = u32::from_str_radix(digits, radix).ok()?;

        if self.current() == Some(b';') {
            self.pos += 1;
        }
        char::from_u32(code).filter(|&c| c != '\0')
    }

    /// `&name;` where `name` is an HTML 4 entity.
    fn named_reference(&mut self) -> Option<char> {
        let name_start = self.pos;
        while self.pos - name_start <= MAX_ENTITY_LEN
            && self.current().is_some_and(|byte| byte.is_ascii_alphanumeric())
        {
            self.pos += 1;
        }
        if self.current() != Some(b';') {
            return None;
        }

        let name = std::str::from_utf8(&self.input[name_start..self.pos]).ok()?;
        let decoded = lookup_entity(name)?;
        self.pos += 1;
        Some(decoded)
    }
}
