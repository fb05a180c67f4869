//! `data:` URL codec for embedded bookmark icons.
//!
//! Netscape bookmark files embed favicons as
//! `data:<content-type>;base64,<payload>`. Only that exact four-segment
//! shape is understood; anything else is reported as a [`DataUrlError`].

use std::fmt;
use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

/// Reasons an embedded icon could not be decoded.
#[derive(Debug, Error)]
pub enum DataUrlError {
    /// The value did not split into `data`, content type, encoding and payload.
    #[error("expected 4 segments in data URL, found {0}")]
    Shape(usize),
    /// The first segment was not the `data` scheme.
    #[error("missing data: scheme")]
    NotDataScheme,
    /// Only base64 payloads are supported.
    #[error("unsupported data URL encoding: {0}")]
    UnsupportedEncoding(String),
    /// The payload was not valid base64.
    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// A decoded `data:` URL: the payload bytes and their content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    /// MIME type of the payload (e.g. `image/png`).
    pub content_type: String,
    /// Decoded payload bytes.
    pub data: Vec<u8>,
}

impl DataUrl {
    /// Create a data URL from a content type and raw bytes.
    #[must_use]
    pub const fn new(content_type: String, data: Vec<u8>) -> Self {
        Self { content_type, data }
    }

    /// Parse `data:<content-type>;base64,<payload>`.
    ///
    /// # Errors
    ///
    /// Returns a [`DataUrlError`] if the value has any other shape or the
    /// payload is not valid base64.
    pub fn parse(raw: &str) -> Result<Self, DataUrlError> {
        let parts: Vec<&str> = raw.split([':', ';', ',']).collect();
        let [scheme, content_type, encoding, payload] = parts.as_slice() else {
            return Err(DataUrlError::Shape(parts.len()));
        };
        if !scheme.trim().eq_ignore_ascii_case("data") {
            return Err(DataUrlError::NotDataScheme);
        }
        if !encoding.eq_ignore_ascii_case("base64") {
            return Err(DataUrlError::UnsupportedEncoding((*encoding).to_string()));
        }
        let data = STANDARD.decode(payload.trim())?;
        Ok(Self::new((*content_type).to_string(), data))
    }
}

impl FromStr for DataUrl {
    type Err = DataUrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DataUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "data:{};base64,{}",
            self.content_type,
            STANDARD.encode(&self.data)
        )
    }
}
