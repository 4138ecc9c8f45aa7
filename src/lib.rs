//! descent: hand-written recursive-descent front end
//!
//! Two small languages share one table-driven tokenizer, one diagnostics sink
//! and one uniform syntax tree:
//! - JSON, parsed into detached [`Value`]s
//! - a calculator language, parsed by precedence climbing into [`Node`]s
//!
//! Both parsers recover from errors. They always produce a result, reporting
//! every problem they find instead of stopping at the first one.
//!
//! # Quick Start
//!
//! ```
//! use descent::{parse_expression, parse_value, ParseOptions};
//!
//! let (value, ok) = parse_value(r#"{"name": "John", "tags": [1, 2]}"#, ParseOptions::default());
//! assert!(ok);
//! assert_eq!(value["name"].as_string(), Some("John"));
//!
//! let (node, errors) = parse_expression("3(x-1)(x+1)");
//! assert!(errors.is_empty());
//! assert_eq!(node.to_string(), "(* (* 3 (- x 1)) (+ x 1))");
//! ```

#![forbid(unsafe_code)]

use tracing::{debug, instrument};

pub mod ast;
pub use ast::{Node, Scalar, Symbol};

pub mod diagnostics;
pub use diagnostics::{DiagnosticSink, Diagnostics, SharedDiagnostics};

pub mod error;
pub use error::{Category, Error, ErrorKind, Pos, Result, Span};

pub mod lexer;
pub use lexer::{LexerConfig, Token, TokenKind, Tokenizer};

pub mod value;
pub use value::{Array, Object, Value};

pub mod expr;
pub mod json;
pub use expr::ExpressionConfig;
pub use json::ParseOptions;

/// Convenience re-exports
pub use expr::Parser as ExpressionParser;
pub use json::Parser as JsonParser;

/// Parse a JSON document, returning the value and whether it was error-free
#[instrument(skip_all, fields(len = source.len()))]
pub fn parse_value(source: &str, options: ParseOptions) -> (Value, bool) {
    let mut diagnostics = Diagnostics::new();
    let value = parse_value_with(source, options, &mut diagnostics);
    debug!(errors = diagnostics.len(), "parsed value");
    (value, diagnostics.is_empty())
}

/// Parse a JSON document, reporting problems to `sink`
pub fn parse_value_with(
    source: &str,
    options: ParseOptions,
    sink: &mut dyn DiagnosticSink,
) -> Value {
    JsonParser::new(source, options, sink).parse()
}

/// Parse JSON from string, failing on the first problem found
pub fn from_str(s: &str) -> Result<Value> {
    from_str_with_options(s, ParseOptions::default())
}

/// Parse JSON with custom options, failing on the first problem found
pub fn from_str_with_options(s: &str, options: ParseOptions) -> Result<Value> {
    let mut diagnostics = Diagnostics::new();
    let value = parse_value_with(s, options, &mut diagnostics);
    first_error(diagnostics).map_or(Ok(value), Err)
}

/// Parse a calculator expression, returning the tree and every problem found
#[instrument(skip_all, fields(len = source.len()))]
pub fn parse_expression(source: &str) -> (Node, Vec<Error>) {
    let mut diagnostics = Diagnostics::new();
    let node = parse_expression_with(source, ExpressionConfig::default(), &mut diagnostics);
    debug!(errors = diagnostics.len(), "parsed expression");
    (node, diagnostics.into_vec())
}

/// Parse a calculator expression, reporting problems to `sink`
pub fn parse_expression_with(
    source: &str,
    config: ExpressionConfig,
    sink: &mut dyn DiagnosticSink,
) -> Node {
    ExpressionParser::new(source, config, sink).parse()
}

/// Parse a calculator expression, failing on the first problem found
pub fn expression_from_str(s: &str) -> Result<Node> {
    let mut diagnostics = Diagnostics::new();
    let node = parse_expression_with(s, ExpressionConfig::default(), &mut diagnostics);
    first_error(diagnostics).map_or(Ok(node), Err)
}

/// Tokenize `source` completely, trivia included when `config` keeps it
#[instrument(skip_all, fields(len = source.len()))]
pub fn tokenize(source: &str, config: LexerConfig) -> (Vec<Token>, Vec<Error>) {
    let mut diagnostics = Diagnostics::new();
    let tokens = Tokenizer::new(source, config, &mut diagnostics).tokenize();
    (tokens, diagnostics.into_vec())
}

fn first_error(diagnostics: Diagnostics) -> Option<Error> {
    diagnostics.into_iter().next()
}
