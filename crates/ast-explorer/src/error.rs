//! Error types for explorer operations.
//!
//! "Not found" is never an error in this crate: lookups that miss return an
//! absent [`crate::AstExplorer`] or an empty [`crate::Explorers`]. The
//! variants below cover the genuinely exceptional cases only.

use thiserror::Error;

/// Errors from parsing, handle construction and indexed access.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExplorerError {
    /// Failed to initialise the Tree-sitter parser for Python.
    #[error("failed to initialise the Python parser: {message}")]
    ParserInitError {
        /// Description of the failure.
        message: String,
    },

    /// A handle was requested for a node the explorer cannot wrap.
    #[error("invalid explorer input: {message}")]
    InvalidInput {
        /// Why the input was rejected.
        message: String,
    },

    /// The parser rejected the supplied source text.
    #[error("failed to parse Python source at {line}:{column}: {message}")]
    ParseError {
        /// One-based line of the first syntax error.
        line: u32,
        /// One-based column of the first syntax error.
        column: u32,
        /// Description of the failure.
        message: String,
    },

    /// An index fell outside a statement block or handle sequence.
    #[error("index {index} is out of range for a sequence of length {len}")]
    OutOfRange {
        /// The requested position.
        index: usize,
        /// The number of entries actually available.
        len: usize,
    },
}

impl ExplorerError {
    /// Creates a parser initialisation error.
    #[must_use]
    pub fn parser_init(message: impl Into<String>) -> Self {
        Self::ParserInitError {
            message: message.into(),
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates a parse error located at a one-based line and column.
    #[must_use]
    pub fn parse(line: u32, column: u32, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            column,
            message: message.into(),
        }
    }

    /// Creates an out-of-range error.
    #[must_use]
    pub const fn out_of_range(index: usize, len: usize) -> Self {
        Self::OutOfRange { index, len }
    }
}
