//! Token model shared by the tokenizer and the parser.
//!
//! Every token is derived from a single source line and remembers the
//! 1-based number of that line, so the parser can report positions without
//! tracking byte offsets.

use std::fmt;

/// The closed set of token kinds produced by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Run of `#` characters opening a heading line.
    Hash,
    /// Textual line content (untrimmed).
    Text,
    /// Leading whitespace of a code line.
    Indent,
    /// Quote marker (`>`).
    Arrow,
    /// Blank or whitespace-only line.
    EmptyLine,
    /// Terminal sentinel, repeated for every read after the last line.
    EndOfInput,
}

impl TokenKind {
    /// Name used for this kind in diagnostics.
    ///
    /// A `Hash` is only ever expected in title position, hence `title`.
    #[inline]
    pub const fn display_name(self) -> &'static str {
        match self {
            TokenKind::Hash => "title",
            TokenKind::Text => "text",
            TokenKind::Indent => "indent",
            TokenKind::Arrow => "arrow",
            TokenKind::EmptyLine => "empty line",
            TokenKind::EndOfInput => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A classified piece of one source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Token classification.
    pub kind: TokenKind,
    /// Payload borrowed from the input, for `Hash`, `Text` and `Indent`.
    pub value: Option<&'a str>,
    /// 1-based source line.
    pub line: u32,
}

impl<'a> Token<'a> {
    /// Create a token carrying a payload.
    #[inline]
    pub const fn with_value(kind: TokenKind, value: &'a str, line: u32) -> Self {
        Self {
            kind,
            value: Some(value),
            line,
        }
    }

    /// Create a token without payload.
    #[inline]
    pub const fn bare(kind: TokenKind, line: u32) -> Self {
        Self {
            kind,
            value: None,
            line,
        }
    }

    /// Check the token kind.
    #[inline(always)]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// The payload, or an empty string for bare tokens.
    #[inline(always)]
    pub fn text(&self) -> &'a str {
        self.value.unwrap_or("")
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.display_name())?;
        if self.kind == TokenKind::Text {
            write!(f, " ({:?})", self.text().trim())?;
        }
        Ok(())
    }
}
