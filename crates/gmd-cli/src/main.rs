//! gmd CLI - Parse, validate, and inspect gmd documents
//!
//! Usage:
//!   gmd [OPTIONS] [COMMAND] <FILE>
//!
//! Commands:
//!   parse     Parse and display document structure (default)
//!   validate  Check document for errors
//!   stats     Show document statistics

use std::env;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use gmd_core::{parse_document, parse_file, AstNode, Error, NodeKind};
use serde::Serialize;

/// File argument that reads the document from standard input.
const STDIN_ARG: &str = "-";

/// Identifier used in diagnostics for standard input.
const STDIN_NAME: &str = "stdin";

fn main() {
    let args: Vec<String> = env::args().collect();

    match run(&args) {
        Ok(()) => {}
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    }
}

fn run(args: &[String]) -> Result<(), String> {
    let config = parse_args(args)?;

    match config.command {
        Command::Parse => cmd_parse(&config),
        Command::Validate => cmd_validate(&config),
        Command::Stats => cmd_stats(&config),
    }
}

/// Read and parse the document named by `file`, or standard input for `-`.
fn load(file: &str) -> gmd_core::Result<AstNode<'static>> {
    if file != STDIN_ARG {
        return parse_file(file);
    }

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .map_err(|source| Error::Io {
            path: PathBuf::from(STDIN_NAME),
            source,
        })?;
    Ok(parse_document(STDIN_NAME, &input)?.into_owned())
}

#[derive(Debug)]
struct Config {
    command: Command,
    file: String,
    format: OutputFormat,
    verbose: bool,
}

#[derive(Debug, Clone, Copy)]
enum Command {
    Parse,
    Validate,
    Stats,
}

#[derive(Debug, Clone, Copy)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_args(args: &[String]) -> Result<Config, String> {
    let mut command = Command::Parse;
    let mut format = OutputFormat::Text;
    let mut verbose = false;
    let mut file = None;

    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                process::exit(0);
            }
            "-V" | "--version" => {
                println!("gmd {}", env!("CARGO_PKG_VERSION"));
                process::exit(0);
            }
            "-v" | "--verbose" => verbose = true,
            "-j" | "--json" => format = OutputFormat::Json,
            "parse" => command = Command::Parse,
            "validate" => command = Command::Validate,
            "stats" => command = Command::Stats,
            _ if arg.starts_with('-') && arg != STDIN_ARG => {
                return Err(format!("unknown option: {}", arg));
            }
            _ => {
                if file.is_some() {
                    return Err("multiple files specified".to_string());
                }
                file = Some(arg.clone());
            }
        }
    }

    let file = file.ok_or_else(|| "no input file specified".to_string())?;

    Ok(Config {
        command,
        file,
        format,
        verbose,
    })
}

fn print_help() {
    eprintln!(
        r#"gmd - gmd document parser and validator

USAGE:
    gmd [OPTIONS] [COMMAND] <FILE>

COMMANDS:
    parse       Parse and display document structure (default)
    validate    Check document for errors without output
    stats       Show document statistics

OPTIONS:
    -v, --verbose    Show every node and line
    -j, --json       Output in JSON format
    -h, --help       Print help information
    -V, --version    Print version information

Use - as FILE to read from standard input.

EXAMPLES:
    gmd notes.gmd            Parse a gmd file
    gmd -v notes.gmd         Parse with verbose output
    gmd -j notes.gmd         Output AST as JSON
    gmd validate notes.gmd   Validate without output
    gmd stats notes.gmd      Show document statistics
"#
    );
}

// =============================================================================
// Parse Command
// =============================================================================

fn cmd_parse(config: &Config) -> Result<(), String> {
    let root = load(&config.file).map_err(|e| e.to_string())?;

    match config.format {
        OutputFormat::Json => print_json(&root)?,
        OutputFormat::Text => {
            if config.verbose {
                print_tree_verbose(&root);
            } else {
                print_summary(&root);
            }
        }
    }

    Ok(())
}

// =============================================================================
// Validate Command
// =============================================================================

fn cmd_validate(config: &Config) -> Result<(), String> {
    let json = matches!(config.format, OutputFormat::Json);

    match load(&config.file) {
        Ok(_) => {
            if json {
                println!("{}", serde_json::json!({"valid": true, "error": null}));
            } else {
                println!("Valid: no errors found");
            }
            Ok(())
        }
        // An unreadable input is a failure of the tool, not of the document.
        Err(e @ Error::Io { .. }) => Err(e.to_string()),
        Err(e) => {
            if json {
                let line = e.line();
                println!(
                    "{}",
                    serde_json::json!({"valid": false, "error": e.to_string(), "line": line})
                );
                process::exit(1);
            }
            Err(e.to_string())
        }
    }
}

// =============================================================================
// Stats Command
// =============================================================================

fn cmd_stats(config: &Config) -> Result<(), String> {
    let root = load(&config.file).map_err(|e| e.to_string())?;
    let stats = DocumentStats::from_document(&root);

    println!("Document Statistics");
    println!("-------------------");
    println!("Title:          {}", root.title().unwrap_or_default());
    println!();
    println!("Content:");
    println!("  Total nodes:    {}", stats.total_nodes);
    println!("  Subsections:    {}", stats.subsections);
    println!("  Paragraphs:     {}", stats.paragraphs);
    println!("  Quotes:         {}", stats.quotes);
    println!("  Code blocks:    {}", stats.code_blocks);
    println!("  Code lines:     {}", stats.code_lines);
    println!();
    println!("Content size:");
    println!("  Characters:     {}", stats.chars);
    println!("  Words (est.):   {}", stats.words);
    println!("  Lines:          {}", stats.lines);

    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
struct DocumentStats {
    total_nodes: usize,
    subsections: usize,
    paragraphs: usize,
    quotes: usize,
    code_blocks: usize,
    code_lines: usize,
    chars: usize,
    words: usize,
    lines: usize,
}

impl DocumentStats {
    /// Counts nodes by kind and measures the text the nodes hold.
    fn from_document(root: &AstNode) -> Self {
        let mut stats = Self {
            total_nodes: 0,
            subsections: 0,
            paragraphs: 0,
            quotes: 0,
            code_blocks: 0,
            code_lines: 0,
            chars: 0,
            words: 0,
            lines: 0,
        };

        stats.measure(root);
        for node in root.descendants() {
            stats.measure(node);
            match node.kind {
                NodeKind::Section => stats.subsections += 1,
                NodeKind::Text => stats.paragraphs += 1,
                NodeKind::Quote => stats.quotes += 1,
                NodeKind::Code => {
                    stats.code_blocks += 1;
                    stats.code_lines += node.lines.len();
                }
            }
        }

        stats
    }

    fn measure(&mut self, node: &AstNode) {
        self.total_nodes += 1;
        self.lines += node.lines.len();
        for line in &node.lines {
            self.chars += line.chars().count();
            self.words += line.split_whitespace().count();
        }
    }
}

// =============================================================================
// JSON Output
// =============================================================================

#[derive(Serialize)]
struct JsonNode<'a> {
    kind: &'static str,
    line: u32,
    lines: Vec<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<JsonNode<'a>>,
}

fn print_json(root: &AstNode) -> Result<(), String> {
    let json_root = convert_node(root);
    let out = serde_json::to_string_pretty(&json_root).map_err(|e| e.to_string())?;
    println!("{}", out);
    Ok(())
}

fn convert_node<'a>(node: &'a AstNode) -> JsonNode<'a> {
    JsonNode {
        kind: node.kind.as_str(),
        line: node.line,
        lines: node.lines.iter().map(|l| l.as_ref()).collect(),
        children: node.children.iter().map(convert_node).collect(),
    }
}

// =============================================================================
// Text Output
// =============================================================================

fn print_summary(root: &AstNode) {
    println!("Title: {}", root.title().unwrap_or_default());
    println!("Children: {}", root.children.len());
    for (i, child) in root.children.iter().enumerate() {
        println!("  [{}] {}", i + 1, describe_node(child));
    }
}

fn print_tree_verbose(root: &AstNode) {
    println!("=== gmd AST ===");
    println!();
    println!("File: {}", root.file);
    println!();
    println!("[{}] {}", root.line, describe_node(root));
    for child in &root.children {
        print_node_verbose(child, 1);
    }
}

fn describe_node(node: &AstNode) -> String {
    match node.kind {
        NodeKind::Section => format!(
            "Section (depth {}, line {}): {}",
            node.depth(),
            node.line,
            node.title().unwrap_or_default()
        ),
        NodeKind::Text | NodeKind::Quote | NodeKind::Code => format!(
            "{} (line {}, {} lines): {}",
            kind_label(node.kind),
            node.line,
            node.lines.len(),
            node.lines.first().map_or("", |l| l.as_ref())
        ),
    }
}

fn kind_label(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Section => "Section",
        NodeKind::Text => "Text",
        NodeKind::Quote => "Quote",
        NodeKind::Code => "Code",
    }
}

fn print_node_verbose(node: &AstNode, indent: usize) {
    let prefix = "  ".repeat(indent);

    println!("{}{}", prefix, describe_node(node));
    if node.kind != NodeKind::Section {
        for line in &node.lines {
            println!("{}  | {}", prefix, line);
        }
    }
    for child in &node.children {
        print_node_verbose(child, indent + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.gmd");
        let err = load(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().starts_with("failed to read file "));
    }

    #[test]
    fn test_load_reports_path_in_syntax_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"## Too deep\n").unwrap();
        let name = file.path().to_str().unwrap().to_string();
        let err = load(&name).unwrap_err();
        assert!(err.as_syntax().is_some());
        assert!(err.to_string().starts_with(&format!("{}:1: ", name)));
    }

    #[test]
    fn test_describe_node_shows_first_line() {
        let root = parse_document(
            "stdin",
            "# Title\nfirst para\nsecond\n> quoted\n    code()\n## Sub",
        )
        .unwrap();
        let described: Vec<String> = root.children.iter().map(describe_node).collect();
        assert_eq!(
            described,
            [
                "Text (line 2, 2 lines): first para",
                "Quote (line 4, 1 lines): quoted",
                "Code (line 5, 1 lines): code()",
                "Section (depth 2, line 6): Sub",
            ]
        );
    }

    #[test]
    fn test_describe_node_with_bare_quote() {
        let root = parse_document("stdin", "# Title\n>").unwrap();
        assert_eq!(describe_node(&root.children[0]), "Quote (line 2, 0 lines): ");
    }

    #[test]
    fn test_stats_count_nodes_and_content() {
        let root = parse_document(
            "stdin",
            "# Title\nsome words here\n\n    a b\n    c\n## Sub\n> q",
        )
        .unwrap();
        let stats = DocumentStats::from_document(&root);
        assert_eq!(stats.total_nodes, 5);
        assert_eq!(stats.subsections, 1);
        assert_eq!(stats.paragraphs, 1);
        assert_eq!(stats.quotes, 1);
        assert_eq!(stats.code_blocks, 1);
        assert_eq!(stats.code_lines, 2);
        assert_eq!(stats.lines, 6);
        assert_eq!(stats.words, 11);
    }
}
