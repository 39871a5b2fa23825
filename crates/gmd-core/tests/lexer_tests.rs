//! Integration tests for the gmd tokenizer

use gmd_core::{tokenize, Token, TokenKind, Tokenizer};

fn kinds(input: &str) -> Vec<TokenKind> {
    tokenize(input).iter().map(|t| t.kind).collect()
}

// ============================================================================
// Line Classification Tests
// ============================================================================

#[test]
fn test_heading_line() {
    let tokens = tokenize("## Sub title");
    assert_eq!(
        tokens,
        vec![
            Token::with_value(TokenKind::Hash, "##", 1),
            Token::with_value(TokenKind::Text, " Sub title", 1),
            Token::bare(TokenKind::EndOfInput, 2),
        ]
    );
}

#[test]
fn test_heading_after_leading_whitespace() {
    let tokens = tokenize("  # Title");
    assert_eq!(tokens[0], Token::with_value(TokenKind::Hash, "#", 1));
    assert_eq!(tokens[1].kind, TokenKind::Text);
}

#[test]
fn test_hash_without_space_is_text() {
    let tokens = tokenize("#NoSpace");
    assert_eq!(tokens[0], Token::with_value(TokenKind::Text, "#NoSpace", 1));
}

#[test]
fn test_bare_hash_keeps_blank_remainder() {
    assert_eq!(
        tokenize("#\n##   "),
        vec![
            Token::with_value(TokenKind::Hash, "#", 1),
            Token::with_value(TokenKind::Text, "", 1),
            Token::with_value(TokenKind::Hash, "##", 2),
            Token::with_value(TokenKind::Text, "   ", 2),
            Token::bare(TokenKind::EndOfInput, 3),
        ]
    );
}

#[test]
fn test_quote_line() {
    let tokens = tokenize("> quoted");
    assert_eq!(
        tokens,
        vec![
            Token::bare(TokenKind::Arrow, 1),
            Token::with_value(TokenKind::Text, " quoted", 1),
            Token::bare(TokenKind::EndOfInput, 2),
        ]
    );
}

#[test]
fn test_empty_quote_line() {
    assert_eq!(kinds(">"), vec![TokenKind::Arrow, TokenKind::EndOfInput]);
    assert_eq!(kinds(">   "), vec![TokenKind::Arrow, TokenKind::EndOfInput]);
}

#[test]
fn test_indented_line() {
    let tokens = tokenize("    let x = 1;");
    assert_eq!(
        tokens,
        vec![
            Token::with_value(TokenKind::Indent, "    ", 1),
            Token::with_value(TokenKind::Text, "let x = 1;", 1),
            Token::bare(TokenKind::EndOfInput, 2),
        ]
    );
}

#[test]
fn test_tab_indent() {
    let tokens = tokenize("\t\tcode");
    assert_eq!(tokens[0], Token::with_value(TokenKind::Indent, "\t\t", 1));
    assert_eq!(tokens[1], Token::with_value(TokenKind::Text, "code", 1));
}

#[test]
fn test_plain_text_line() {
    let tokens = tokenize("Hello world.  ");
    assert_eq!(tokens[0], Token::with_value(TokenKind::Text, "Hello world.  ", 1));
}

#[test]
fn test_blank_lines() {
    assert_eq!(
        kinds("\n   \n\t\nx"),
        vec![
            TokenKind::EmptyLine,
            TokenKind::EmptyLine,
            TokenKind::EmptyLine,
            TokenKind::Text,
            TokenKind::EndOfInput,
        ]
    );
}

#[test]
fn test_other_whitespace_lines_are_blank() {
    let separated = vec![
        TokenKind::Text,
        TokenKind::EmptyLine,
        TokenKind::Text,
        TokenKind::EndOfInput,
    ];
    assert_eq!(kinds("a\n\x0c\nb"), separated);
    assert_eq!(kinds("a\n\u{a0}\nb"), separated);
    assert_eq!(kinds("a\n \u{a0}\t\nb"), separated);
    assert_eq!(kinds("a\n\r\r\nb"), separated);
    assert_eq!(kinds("a\n\r\nb"), separated);
}

#[test]
fn test_quote_with_only_other_whitespace() {
    assert_eq!(kinds(">\u{a0}"), vec![TokenKind::Arrow, TokenKind::EndOfInput]);
}

#[test]
fn test_nbsp_is_not_indentation() {
    let tokens = tokenize("\u{a0}text");
    assert_eq!(tokens[0], Token::with_value(TokenKind::Text, "\u{a0}text", 1));
}

// ============================================================================
// Line Numbering Tests
// ============================================================================

#[test]
fn test_line_numbers_are_one_based_and_ordered() {
    let tokens = tokenize("# T\n\ntext\n  code\n> q");
    let lines: Vec<u32> = tokens.iter().map(|t| t.line).collect();
    assert_eq!(lines, vec![1, 1, 2, 3, 4, 4, 5, 5, 6]);
    assert!(lines.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_trailing_newline_does_not_add_line() {
    assert_eq!(kinds("text\n"), vec![TokenKind::Text, TokenKind::EndOfInput]);
    assert_eq!(tokenize("text\n")[1].line, 2);
}

#[test]
fn test_crlf_line_endings() {
    let tokens = tokenize("# T\r\nbody\r\n");
    assert_eq!(tokens[1], Token::with_value(TokenKind::Text, " T", 1));
    assert_eq!(tokens[2], Token::with_value(TokenKind::Text, "body", 2));
}

// ============================================================================
// End Of Input Tests
// ============================================================================

#[test]
fn test_empty_input() {
    assert_eq!(tokenize(""), vec![Token::bare(TokenKind::EndOfInput, 1)]);
}

#[test]
fn test_end_of_input_is_sticky() {
    let mut tokenizer = Tokenizer::new("one");
    assert_eq!(tokenizer.next_token().kind, TokenKind::Text);
    for _ in 0..3 {
        assert_eq!(tokenizer.next_token(), Token::bare(TokenKind::EndOfInput, 2));
    }
}

#[test]
fn test_iterator_stops_after_end_of_input() {
    let mut tokenizer = Tokenizer::new("one");
    assert!(tokenizer.next().is_some());
    assert_eq!(tokenizer.next().map(|t| t.kind), Some(TokenKind::EndOfInput));
    assert_eq!(tokenizer.next(), None);
    assert_eq!(tokenizer.next(), None);
}

// ============================================================================
// Display Tests
// ============================================================================

#[test]
fn test_display_names() {
    let names: Vec<&str> = [
        TokenKind::Hash,
        TokenKind::Text,
        TokenKind::Indent,
        TokenKind::Arrow,
        TokenKind::EmptyLine,
        TokenKind::EndOfInput,
    ]
    .iter()
    .map(|k| k.display_name())
    .collect();
    assert_eq!(
        names,
        vec!["title", "text", "indent", "arrow", "empty line", "end of input"]
    );
}

#[test]
fn test_token_display() {
    let text = Token::with_value(TokenKind::Text, "  foobar ", 3);
    assert_eq!(text.to_string(), r#"text ("foobar")"#);
    assert_eq!(Token::bare(TokenKind::Arrow, 1).to_string(), "arrow");
    assert_eq!(
        Token::with_value(TokenKind::Indent, "  ", 1).to_string(),
        "indent"
    );
    assert_eq!(Token::with_value(TokenKind::Hash, "##", 1).to_string(), "title");
}
