//! Line-oriented tokenizer with SIMD-accelerated line splitting.
//!
//! The tokenizer splits the input into lines and classifies each line into
//! one or two tokens. Classification is purely lexical and line-local; the
//! tokenizer knows nothing about the section grammar.
//!
//! # Classification
//!
//! - whitespace-only line (any Unicode whitespace): `EmptyLine`
//! - `#`-run followed by whitespace or end of line: `Hash`, then `Text`
//!   with the rest of the line (possibly blank)
//! - `>` as first non-whitespace character: `Arrow`, then `Text` if any
//! - leading spaces or tabs: `Indent`, then `Text`
//! - anything else: `Text` with the full line
//!
//! # Performance
//!
//! - Zero-copy: token payloads borrow directly from the input
//! - Newline scanning via `memchr`
//! - Tokens are produced on demand, one line at a time

use std::iter::FusedIterator;

use memchr::memchr;

use crate::token::{Token, TokenKind};

/// A single line from the input with its 1-based line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// The line text (without trailing newline or carriage return).
    pub text: &'a str,
    /// 1-based line number.
    pub number: u32,
}

impl<'a> Line<'a> {
    /// Check if this line contains only whitespace.
    #[inline(always)]
    pub fn is_blank(&self) -> bool {
        is_blank(self.text)
    }

    /// Split the line into its leading whitespace and the remainder.
    #[inline]
    pub fn split_indent(&self) -> (&'a str, &'a str) {
        let width = self
            .text
            .bytes()
            .take_while(|&b| is_indent_byte(b))
            .count();
        self.text.split_at(width)
    }
}

#[inline(always)]
fn is_indent_byte(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

/// Blank means nothing but Unicode whitespace, the same set `str::trim` drops.
#[inline(always)]
fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Split a heading marker off `rest` (already stripped of indentation).
///
/// The `#` run must be followed by whitespace or the end of the line.
fn split_heading(rest: &str) -> Option<(&str, &str)> {
    let run = rest.bytes().take_while(|&b| b == b'#').count();
    if run == 0 {
        return None;
    }
    let (hashes, after) = rest.split_at(run);
    match after.bytes().next() {
        None => Some((hashes, after)),
        Some(b) if is_indent_byte(b) => Some((hashes, after)),
        Some(_) => None,
    }
}

/// Pull-based tokenizer over a complete document.
///
/// [`next_token`](Tokenizer::next_token) never runs dry: after the last line
/// it keeps returning `EndOfInput`. The [`Iterator`] implementation yields
/// every token up to and including the first `EndOfInput`, then stops.
pub struct Tokenizer<'a> {
    /// The complete input text.
    input: &'a str,
    /// Input as bytes for newline scanning.
    bytes: &'a [u8],
    /// Current byte offset.
    offset: usize,
    /// Number of lines read so far.
    line_no: u32,
    /// Second token of a line that produces two.
    pending: Option<Token<'a>>,
    /// Whether the iterator has already yielded `EndOfInput`.
    finished: bool,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer for the given input.
    #[inline]
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            offset: 0,
            line_no: 0,
            pending: None,
            finished: false,
        }
    }

    /// Produce the next token.
    pub fn next_token(&mut self) -> Token<'a> {
        if let Some(token) = self.pending.take() {
            return token;
        }
        match self.read_line() {
            Some(line) => self.classify(line),
            None => Token::bare(TokenKind::EndOfInput, self.line_no + 1),
        }
    }

    fn classify(&mut self, line: Line<'a>) -> Token<'a> {
        let number = line.number;
        if line.is_blank() {
            return Token::bare(TokenKind::EmptyLine, number);
        }

        let (indent, rest) = line.split_indent();

        if let Some((hashes, title)) = split_heading(rest) {
            // Always followed by the remainder, even a blank one.
            self.pending = Some(Token::with_value(TokenKind::Text, title, number));
            return Token::with_value(TokenKind::Hash, hashes, number);
        }

        if let Some(quoted) = rest.strip_prefix('>') {
            self.queue_text(quoted, number);
            return Token::bare(TokenKind::Arrow, number);
        }

        if !indent.is_empty() {
            self.pending = Some(Token::with_value(TokenKind::Text, rest, number));
            return Token::with_value(TokenKind::Indent, indent, number);
        }

        Token::with_value(TokenKind::Text, line.text, number)
    }

    /// Queue a trailing `Text` token unless `rest` is blank.
    #[inline]
    fn queue_text(&mut self, rest: &'a str, number: u32) {
        if !is_blank(rest) {
            self.pending = Some(Token::with_value(TokenKind::Text, rest, number));
        }
    }

    /// Read the next line from input.
    ///
    /// Uses `memchr` for newline scanning. A trailing newline does not start
    /// an extra empty line.
    #[inline(always)]
    fn read_line(&mut self) -> Option<Line<'a>> {
        if self.offset >= self.bytes.len() {
            return None;
        }

        let start = self.offset;

        let end = match memchr(b'\n', &self.bytes[start..]) {
            Some(pos) => start + pos,
            None => self.bytes.len(),
        };

        // CRLF
        let text_end = if end > start && self.bytes[end - 1] == b'\r' {
            end - 1
        } else {
            end
        };

        self.offset = if end < self.bytes.len() { end + 1 } else { end };
        self.line_no += 1;

        // `start` and `text_end` sit next to ASCII newline bytes or at the
        // input bounds, so both are char boundaries.
        Some(Line {
            text: &self.input[start..text_end],
            number: self.line_no,
        })
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if token.is(TokenKind::EndOfInput) {
            self.finished = true;
        }
        Some(token)
    }
}

impl FusedIterator for Tokenizer<'_> {}

/// Tokenize a whole document, including the final `EndOfInput`.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Tokenizer::new(input).collect()
}
