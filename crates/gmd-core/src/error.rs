use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::token::{Token, TokenKind};

/// Result alias used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error kinds for categorizing syntax errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// A token that the grammar does not allow at this point.
    UnexpectedToken,
    /// A heading whose depth does not fit its nesting position.
    InvalidDepth,
    /// A heading marker with nothing after it.
    MissingTitle,
}

/// A grammar violation with its position in the source.
///
/// Renders as `<file>:<line>: <message>`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{file}:{line}: {message}")]
pub struct SyntaxError {
    /// Identifier of the document being parsed.
    pub file: String,
    /// 1-based line of the offending token.
    pub line: u32,
    /// Human-readable message.
    pub message: String,
    /// Error categorization.
    pub kind: SyntaxErrorKind,
}

impl SyntaxError {
    /// Create an error for a token the grammar does not accept here.
    pub fn unexpected_token(file: &str, found: &Token<'_>, expected: TokenKind) -> Self {
        Self {
            file: file.to_string(),
            line: found.line,
            message: format!("unexpected token read: {} (expected {})", found, expected),
            kind: SyntaxErrorKind::UnexpectedToken,
        }
    }

    /// Create an error for a `#` run without title text.
    pub fn missing_title(file: &str, line: u32, hashes: &str) -> Self {
        Self {
            file: file.to_string(),
            line,
            message: format!("missing title text after {:?}", hashes),
            kind: SyntaxErrorKind::MissingTitle,
        }
    }

    /// Create an error for a heading at the wrong depth.
    pub fn invalid_depth(file: &str, line: u32, found: usize, expected: usize) -> Self {
        Self {
            file: file.to_string(),
            line,
            message: format!("invalid section depth {} (expected {})", found, expected),
            kind: SyntaxErrorKind::InvalidDepth,
        }
    }
}

/// Top-level error type.
#[derive(Debug, Error)]
pub enum Error {
    /// The source document could not be read.
    #[error("failed to read file {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The document does not match the grammar.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    /// A diagnostic raised against an already parsed node.
    #[error("{file}:{line}: {message}")]
    Semantic {
        file: String,
        line: u32,
        message: String,
    },
}

impl Error {
    /// Source line the error points at, if it has one.
    pub fn line(&self) -> Option<u32> {
        match self {
            Error::Io { .. } => None,
            Error::Syntax(e) => Some(e.line),
            Error::Semantic { line, .. } => Some(*line),
        }
    }

    /// The syntax error, if this is one.
    pub fn as_syntax(&self) -> Option<&SyntaxError> {
        match self {
            Error::Syntax(e) => Some(e),
            _ => None,
        }
    }
}
