//! Unified error type for the StarOffice decoding layer.
//!
//! Low-level reads fail with one of these variants; decoder entry points turn
//! them into explicit status results so that a damaged sub-object never aborts
//! the surrounding document.
use thiserror::Error;

/// Main error type for stoff operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A read needed more bytes than the stream holds
    #[error("Unexpected end of data at {offset}: needed {needed} bytes, {available} available")]
    UnexpectedEof {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// Invalid structure
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// A magic constant did not match
    #[error("Bad magic: expected {expected}, found {found}")]
    BadMagic { expected: String, found: String },

    /// Version number that no decoder handles
    #[error("Unsupported version: {0}")]
    UnsupportedVersion(i64),

    /// Corrupted or inconsistent data
    #[error("Corrupted data: {0}")]
    Corrupted(String),
}

/// Result type for stoff operations.
pub type Result<T> = std::result::Result<T, Error>;
