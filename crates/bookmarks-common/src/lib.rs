//! Common utilities for the bookmarks readers and writers.
//!
//! This crate provides shared infrastructure used by every format crate:
//! - **Warning System** - colored terminal output for recoverable malformations
//! - **Timestamps** - epoch value normalization across seconds, milliseconds and microseconds
//! - **Data URLs** - the `data:<mime>;base64,<payload>` codec used for embedded icons
//! - **Text Encodings** - byte-order-mark sniffing and Unicode encoders/decoders

pub mod data_url;
pub mod encoding;
pub mod timestamp;
pub mod warning;

pub use data_url::{DataUrl, DataUrlError};
pub use encoding::TextEncoding;
