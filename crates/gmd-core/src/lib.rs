//! # gmd Core
//!
//! Tokenizer and recursive-descent parser for gmd, a small line-oriented
//! markup dialect with exactly two heading levels.
//!
//! A gmd document has a single `#` title. Below it come paragraphs, quoted
//! lines (`>`), indented code blocks and `##` subsections; subsections hold
//! paragraphs, quotes and code blocks but no further headings.
//!
//! ## Quick Start
//!
//! ```rust
//! use gmd_core::{parse_document, NodeKind};
//!
//! let input = "# Hello\n\nSome text.\n\n## Part\n\n    let x = 1;\n";
//! let root = parse_document("hello.gmd", input).unwrap();
//!
//! assert_eq!(root.lines, ["# Hello"]);
//! assert_eq!(root.children[0].kind, NodeKind::Text);
//! assert_eq!(root.children[1].title(), Some("Part"));
//! ```
//!
//! ## Errors
//!
//! Parsing is all-or-nothing. The first grammar violation is returned as a
//! [`SyntaxError`] rendered as `<file>:<line>: <message>`:
//!
//! ```rust
//! use gmd_core::parse_document;
//!
//! let err = parse_document("stdin", "foobar").unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     r#"stdin:1: unexpected token read: text ("foobar") (expected title)"#
//! );
//! ```

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod stream;
pub mod token;

pub use ast::{AstNode, NodeKind};
pub use error::{Error, Result, SyntaxError, SyntaxErrorKind};
pub use lexer::{tokenize, Tokenizer};
pub use parser::{parse_document, parse_file, Parser};
pub use stream::TokenStream;
pub use token::{Token, TokenKind};
