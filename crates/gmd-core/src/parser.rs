//! Recursive-descent parser for gmd documents.
//!
//! The grammar has two heading levels. The root call owns the single depth-1
//! section; every `##` heading it meets opens a nested call that collects a
//! subsection until the next heading or the end of input. Parsing stops at
//! the first syntax error.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use crate::ast::{AstNode, CowStr, NodeKind};
use crate::error::{Error, Result, SyntaxError};
use crate::lexer::Tokenizer;
use crate::stream::TokenStream;
use crate::token::{Token, TokenKind};

/// Depth of the document's root section.
const ROOT_DEPTH: usize = 1;

/// Outcome of processing one token inside a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Keep collecting content into the open section.
    Continue,
    /// The open section ends here; the current token is left unread.
    Close,
}

/// Parse in-memory text. `file` only decorates diagnostics.
pub fn parse_document<'a>(file: &'a str, text: &'a str) -> Result<AstNode<'a>> {
    Parser::from_text(file, text).parse()
}

/// Read a document from disk and parse it, using the path as identifier.
pub fn parse_file(path: impl AsRef<Path>) -> Result<AstNode<'static>> {
    let path = path.as_ref();
    let input = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let file = path.display().to_string();
    let root = parse_document(&file, &input)?;
    Ok(root.into_owned())
}

/// gmd parser over a token source.
pub struct Parser<'a, I>
where
    I: Iterator<Item = Token<'a>>,
{
    file: &'a str,
    tokens: TokenStream<'a, I>,
}

impl<'a> Parser<'a, Tokenizer<'a>> {
    /// Create a parser that tokenizes `text`.
    pub fn from_text(file: &'a str, text: &'a str) -> Self {
        Self::new(file, Tokenizer::new(text))
    }
}

impl<'a, I> Parser<'a, I>
where
    I: Iterator<Item = Token<'a>>,
{
    /// Create a parser over an arbitrary token source.
    pub fn new(file: &'a str, tokens: I) -> Self {
        Self {
            file,
            tokens: TokenStream::new(tokens),
        }
    }

    /// Parse the whole document into its root section.
    pub fn parse(mut self) -> Result<AstNode<'a>> {
        self.parse_section(None)
    }

    /// Collect one section. `enclosing` is the depth of the parent section,
    /// `None` at the document root.
    fn parse_section(&mut self, enclosing: Option<usize>) -> Result<AstNode<'a>> {
        let mut open: Option<AstNode<'a>> = None;
        while self.step(&mut open, enclosing)? == Step::Continue {}

        match open {
            Some(section) => Ok(section),
            // Only reachable at the root, on a document without any title.
            None => {
                let token = self.tokens.peek();
                Err(self.unexpected(&token, TokenKind::Hash))
            }
        }
    }

    fn step(
        &mut self,
        open: &mut Option<AstNode<'a>>,
        enclosing: Option<usize>,
    ) -> Result<Step> {
        let token = self.tokens.peek();
        match token.kind {
            TokenKind::EmptyLine => {
                self.tokens.next();
            }
            TokenKind::EndOfInput => return Ok(Step::Close),
            TokenKind::Hash => match open.as_mut() {
                None => *open = Some(self.parse_heading(enclosing)?),
                // A nested section hands the heading back to its parent.
                Some(_) if enclosing.is_some() => return Ok(Step::Close),
                Some(section) => {
                    let depth = section.depth();
                    let subsection = self.parse_section(Some(depth))?;
                    section.push_child(subsection);
                }
            },
            TokenKind::Text | TokenKind::Indent | TokenKind::Arrow => {
                let section = match open.as_mut() {
                    Some(section) => section,
                    None => return Err(self.unexpected(&token, TokenKind::Hash)),
                };
                let node = match token.kind {
                    TokenKind::Text => self.parse_text(),
                    TokenKind::Indent => self.parse_code()?,
                    _ => self.parse_quote(),
                };
                section.push_child(node);
            }
        }
        self.tokens.commit();
        Ok(Step::Continue)
    }

    /// Parse a title and check its depth against the nesting position.
    fn parse_heading(&mut self, enclosing: Option<usize>) -> Result<AstNode<'a>> {
        let line = self.tokens.peek().line;
        let (depth, section) = self.parse_title()?;
        let expected = enclosing.map_or(ROOT_DEPTH, |d| d + 1);
        if depth != expected {
            return Err(SyntaxError::invalid_depth(self.file, line, depth, expected).into());
        }
        Ok(section)
    }

    /// Parse `Hash Text` into a section node, returning its depth.
    fn parse_title(&mut self) -> Result<(usize, AstNode<'a>)> {
        let hash = self.tokens.peek();
        if !hash.is(TokenKind::Hash) {
            return Err(self.unexpected(&hash, TokenKind::Hash));
        }
        self.tokens.next();

        let title = self.tokens.peek();
        if !title.is(TokenKind::Text) || title.line != hash.line {
            return Err(self.unexpected(&title, TokenKind::Text));
        }
        self.tokens.next();

        let prefix = hash.text();
        let text = title.text().trim();
        if text.is_empty() {
            return Err(SyntaxError::missing_title(self.file, hash.line, prefix).into());
        }
        let heading = format!("{} {}", prefix, text);
        let section = AstNode::new(
            NodeKind::Section,
            vec![Cow::Owned(heading)],
            self.file,
            hash.line,
        );
        Ok((prefix.len(), section))
    }

    /// Run of `Text` tokens, one trimmed line each.
    fn parse_text(&mut self) -> AstNode<'a> {
        let line = self.tokens.peek().line;
        let mut lines: Vec<CowStr<'a>> = Vec::new();
        while self.tokens.peek().is(TokenKind::Text) {
            lines.push(Cow::Borrowed(self.tokens.next().text().trim()));
        }
        AstNode::new(NodeKind::Text, lines, self.file, line)
    }

    /// Run of `Arrow` tokens, each with an optional `Text`.
    fn parse_quote(&mut self) -> AstNode<'a> {
        let line = self.tokens.peek().line;
        let mut lines: Vec<CowStr<'a>> = Vec::new();
        while self.tokens.peek().is(TokenKind::Arrow) {
            self.tokens.next();
            if self.tokens.peek().is(TokenKind::Text) {
                lines.push(Cow::Borrowed(self.tokens.next().text().trim()));
            }
        }
        AstNode::new(NodeKind::Quote, lines, self.file, line)
    }

    /// Run of `Indent Text` pairs.
    ///
    /// The first indent is the block's baseline and is stripped as a literal
    /// prefix from every line; deeper indentation stays on the line.
    fn parse_code(&mut self) -> Result<AstNode<'a>> {
        let line = self.tokens.peek().line;
        let mut baseline: Option<&'a str> = None;
        let mut lines: Vec<CowStr<'a>> = Vec::new();

        while self.tokens.peek().is(TokenKind::Indent) {
            let indent = self.tokens.next().text();
            let base = *baseline.get_or_insert(indent);
            let extra = indent.strip_prefix(base).unwrap_or(indent);

            let text = self.tokens.next();
            if !text.is(TokenKind::Text) {
                return Err(self.unexpected(&text, TokenKind::Text));
            }

            let content = text.text().trim();
            lines.push(if extra.is_empty() {
                Cow::Borrowed(content)
            } else {
                Cow::Owned(format!("{}{}", extra, content))
            });
        }

        Ok(AstNode::new(NodeKind::Code, lines, self.file, line))
    }

    #[inline]
    fn unexpected(&self, found: &Token<'a>, expected: TokenKind) -> Error {
        SyntaxError::unexpected_token(self.file, found, expected).into()
    }
}
