//! Error types for reading and writing Netscape bookmark documents.

use std::io;

use thiserror::Error;

/// Failure to read a bookmark document.
///
/// Malformed tags, attributes and icons inside an otherwise valid document
/// are not errors; they leave the affected fields empty.
#[derive(Debug, Error)]
pub enum ReadError {
    /// The input has no `<DL> ... </DL>` block.
    #[error(
        "not a recognized Netscape bookmark document: no <DL> ... </DL> block found \
         (wrong encoding or not a bookmark file)"
    )]
    NotNetscapeDocument,
    /// The input source could not be read.
    #[error("failed to read bookmark document: {0}")]
    Io(#[from] io::Error),
}

/// Failure to write a bookmark document to its sink.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The output sink rejected the write.
    #[error("failed to write bookmark document: {0}")]
    Io(#[from] io::Error),
}
