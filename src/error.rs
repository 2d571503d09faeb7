//! Error types for STL decoding.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, StlError>;

/// Everything that can go wrong while reading an STL file.
///
/// The first failure aborts the whole parse; a partial triangle soup is never
/// returned.
#[derive(Debug, Error)]
pub enum StlError {
    /// The underlying file could not be opened or read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A read expected more data than remained in the input.
    #[error("unexpected end of input while reading {context}")]
    UnexpectedEof {
        /// What was being read when the input ran out.
        context: &'static str,
    },

    /// An expected keyword did not match the next token (ASCII only).
    #[error("expected token '{expected}', got '{found}'")]
    TokenMismatch {
        expected: &'static str,
        found: String,
    },

    /// A token expected to be a float could not be parsed as one (ASCII only).
    #[error("invalid float '{token}' for {context}")]
    BadFloat {
        token: String,
        context: &'static str,
    },

    /// Input ended before `endsolid` while strict termination was requested.
    #[error("input ended before 'endsolid'")]
    MissingEndSolid,
}
