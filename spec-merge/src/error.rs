//! Error types for the merge engine.

use thiserror::Error;

/// Result type alias for merge operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during a merge invocation.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error reading an input file or rewriting the current file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The caller supplied a conflict marker length of zero.
    #[error("Invalid conflict marker length: {0}")]
    InvalidMarkerLength(usize),

    /// The merge algorithm reached a state that should be unreachable
    /// on well-formed input.
    #[error("Internal merge invariant violated: {0}")]
    Internal(String),
}
