//! Error types for CSON decoding operations.

use thiserror::Error;

/// Errors that can occur while decoding CSON.
#[derive(Error, Debug)]
pub enum CsonError {
    /// Reading the underlying byte source (or opening the file) failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input was not valid CSON.
    /// `line` is the 1-based logical line, `column` the 1-based byte column.
    #[error("CSON syntax error at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },
}

impl CsonError {
    /// True for lexical/structural violations, false for I/O failures.
    pub fn is_syntax(&self) -> bool {
        matches!(self, CsonError::Syntax { .. })
    }
}

/// Convenience alias used throughout cson-core.
pub type Result<T> = std::result::Result<T, CsonError>;
