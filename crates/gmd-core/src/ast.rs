//! Abstract Syntax Tree for gmd documents.
//!
//! A document is a tree of [`AstNode`]s. The root is always a depth-1
//! section; its children are paragraphs, quotes, code blocks and depth-2
//! sections, which in turn only hold paragraphs, quotes and code blocks.
//!
//! Nodes are:
//!
//! - **Zero-copy where possible**: lines borrow from the input via `Cow<'a, str>`
//!   unless they had to be rebuilt (titles, indented code lines)
//! - **Line-tracked**: every node records the 1-based line it starts on and
//!   the file identifier it came from, for diagnostics

use std::borrow::Cow;
use std::fmt;

use crate::error::Error;

/// Borrowed or owned string type for zero-copy parsing.
pub type CowStr<'a> = Cow<'a, str>;

/// Kind of an AST node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Titled section; the only kind with children.
    Section,
    /// Indented code block.
    Code,
    /// Paragraph of plain text lines.
    Text,
    /// Run of quoted lines.
    Quote,
}

impl NodeKind {
    /// Lowercase name, as used in the CLI output.
    pub const fn as_str(self) -> &'static str {
        match self {
            NodeKind::Section => "section",
            NodeKind::Code => "code",
            NodeKind::Text => "text",
            NodeKind::Quote => "quote",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node of the document tree.
///
/// The meaning of `lines` depends on the kind:
///
/// - `Section`: exactly one entry, the `#` prefix, a space and the title
/// - `Text`, `Quote`: one trimmed entry per source line
/// - `Code`: one entry per source line, keeping indentation deeper than the
///   block's first line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstNode<'a> {
    pub kind: NodeKind,
    pub lines: Vec<CowStr<'a>>,
    pub children: Vec<AstNode<'a>>,
    /// 1-based line of the first token that contributed to this node.
    pub line: u32,
    /// Identifier of the originating document.
    pub file: CowStr<'a>,
}

impl<'a> AstNode<'a> {
    /// Create a childless node.
    pub fn new(
        kind: NodeKind,
        lines: Vec<CowStr<'a>>,
        file: impl Into<CowStr<'a>>,
        line: u32,
    ) -> Self {
        Self {
            kind,
            lines,
            children: Vec::new(),
            line,
            file: file.into(),
        }
    }

    /// Append a child node.
    #[inline]
    pub fn push_child(&mut self, child: AstNode<'a>) {
        self.children.push(child);
    }

    #[inline]
    pub fn is_section(&self) -> bool {
        self.kind == NodeKind::Section
    }

    /// Heading depth of a section (number of `#`), or 0 for other kinds.
    pub fn depth(&self) -> usize {
        if !self.is_section() {
            return 0;
        }
        self.lines
            .first()
            .map_or(0, |l| l.bytes().take_while(|&b| b == b'#').count())
    }

    /// Title text of a section, without the `#` prefix.
    pub fn title(&self) -> Option<&str> {
        if !self.is_section() {
            return None;
        }
        self.lines
            .first()
            .map(|l| l.trim_start_matches('#').trim_start())
    }

    /// Iterate over all nodes below this one, depth-first in document order.
    pub fn descendants(&self) -> Descendants<'_, 'a> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    /// Build a diagnostic located `offset` lines below this node's start.
    ///
    /// Renders as `<file>:<line>: <message>`.
    pub fn error_at(&self, offset: u32, message: impl Into<String>) -> Error {
        Error::Semantic {
            file: self.file.to_string(),
            line: self.line.saturating_add(offset),
            message: message.into(),
        }
    }

    /// Detach the tree from the input it was parsed from.
    pub fn into_owned(self) -> AstNode<'static> {
        AstNode {
            kind: self.kind,
            lines: self
                .lines
                .into_iter()
                .map(|l| Cow::Owned(l.into_owned()))
                .collect(),
            children: self.children.into_iter().map(AstNode::into_owned).collect(),
            line: self.line,
            file: Cow::Owned(self.file.into_owned()),
        }
    }
}

/// Depth-first iterator returned by [`AstNode::descendants`].
pub struct Descendants<'n, 'a> {
    stack: Vec<&'n AstNode<'a>>,
}

impl<'n, 'a> Iterator for Descendants<'n, 'a> {
    type Item = &'n AstNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
