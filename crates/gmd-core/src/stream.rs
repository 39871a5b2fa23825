//! Token buffer with lookahead and backtracking.
//!
//! The parser pulls tokens one at a time. Tokens already read stay in the
//! buffer so the parser can back up over them; [`TokenStream::commit`] drops
//! everything consumed so far once a construct is complete.

use crate::token::{Token, TokenKind};

/// Pull-based token stream over any token source.
///
/// If the source ends without producing `EndOfInput`, one is synthesized on
/// the line after the last token seen. Once `EndOfInput` has been read, every
/// later read returns it again.
pub struct TokenStream<'a, I>
where
    I: Iterator<Item = Token<'a>>,
{
    source: I,
    /// Tokens read since the last commit.
    buffer: Vec<Token<'a>>,
    /// Read position within `buffer`.
    pos: usize,
    /// Line of the most recent token pulled from `source`.
    last_line: u32,
    /// Sticky end-of-input token.
    end: Option<Token<'a>>,
}

impl<'a, I> TokenStream<'a, I>
where
    I: Iterator<Item = Token<'a>>,
{
    /// Wrap a token source.
    pub fn new(source: I) -> Self {
        Self {
            source,
            buffer: Vec::with_capacity(8),
            pos: 0,
            last_line: 0,
            end: None,
        }
    }

    /// Consume and return the next token.
    #[inline]
    pub fn next(&mut self) -> Token<'a> {
        if self.pos == self.buffer.len() {
            let token = self.pull();
            self.buffer.push(token);
        }
        let token = self.buffer[self.pos];
        self.pos += 1;
        token
    }

    /// Look at the next token without consuming it.
    #[inline]
    pub fn peek(&mut self) -> Token<'a> {
        let token = self.next();
        self.backup();
        token
    }

    /// Step back over the most recently consumed token.
    ///
    /// # Panics
    ///
    /// Panics when nothing has been consumed since the last commit.
    #[inline]
    pub fn backup(&mut self) {
        self.backup_n(1);
    }

    /// Step back over the `n` most recently consumed tokens.
    ///
    /// # Panics
    ///
    /// Panics when fewer than `n` tokens were consumed since the last commit.
    pub fn backup_n(&mut self, n: usize) {
        assert!(
            n <= self.pos,
            "cannot back up {} tokens, only {} consumed since last commit",
            n,
            self.pos
        );
        self.pos -= n;
    }

    /// Forget every consumed token. Unread lookahead is kept.
    pub fn commit(&mut self) {
        self.buffer.drain(..self.pos);
        self.pos = 0;
    }

    /// Number of tokens that can currently be backed over.
    #[inline]
    pub fn consumed(&self) -> usize {
        self.pos
    }

    fn pull(&mut self) -> Token<'a> {
        if let Some(end) = self.end {
            return end;
        }
        let token = self
            .source
            .next()
            .unwrap_or_else(|| Token::bare(TokenKind::EndOfInput, self.last_line + 1));
        if token.is(TokenKind::EndOfInput) {
            self.end = Some(token);
        }
        self.last_line = token.line;
        token
    }
}
