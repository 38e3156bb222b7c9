//! # json-ast
//!
//! `json-ast` is an RFC 8259-compliant JSON lexer and recursive-descent
//! parser, built from scratch in pure Rust.
//!
//! Parsing happens in two stages:
//!
//! 1. [`tokenize`] scans UTF-8 text into a [`Token`] sequence that always
//!    ends with [`TokenKind::EndOfInput`]. It fails with a [`LexError`].
//! 2. [`parse`] consumes that sequence into an [`AstNode`] tree. It fails
//!    with a [`ParseError`].
//!
//! [`parse_json`] runs both and reports either failure as a [`JsonError`].
//!
//! ## Key Features
//!
//! * **Order-preserving objects:** members keep their source order.
//! * **Fail-fast errors:** the first problem is reported with its line,
//!   column and byte offset; nothing is silently dropped or defaulted.
//! * **Bounded nesting:** input nested [`DEFAULT_MAX_DEPTH`] levels deep
//!   is rejected instead of exhausting the stack.
//! * **Policies:** duplicate keys (last wins, or reject) and numbers
//!   (`f64`, or exact text) are chosen through [`ParseOptions`].
//!
//! ## Quick Start
//!
//! ```
//! use json_ast::{parse_json, AstNode};
//!
//! let ast = parse_json(r#"{ "name": "Babbage", "tags": ["math", "engines"] }"#).unwrap();
//!
//! assert_eq!(ast.get("name").and_then(AstNode::as_str), Some("Babbage"));
//! assert_eq!(ast.get("tags").and_then(|t| t.get_index(1)), Some(&AstNode::from("engines")));
//! ```
//!
//! ## Errors
//!
//! ```
//! use json_ast::{parse_json, JsonError, ParseError};
//!
//! let err = parse_json(r#"{"a":1,}"#).unwrap_err();
//! assert!(matches!(err, JsonError::Parse(ParseError::TrailingComma { .. })));
//! assert_eq!(err.to_string(), "Trailing comma before '}' at line 1, column 7");
//! ```

/// The `AstNode` tree and `JsonNumber`.
pub mod ast;
/// Error types for both stages.
pub mod error;
/// `ParseOptions` and the default limits.
pub mod options;
/// The recursive-descent `Parser`.
pub mod parser;
/// `Token`, `TokenKind` and `Position`.
pub mod token;
/// The `Tokenizer` (lexer).
pub mod tokenizer;

pub use ast::{AstNode, JsonNumber, Object, MAX_SAFE_INTEGER};
pub use error::{JsonError, LexError, ParseError};
pub use options::{DuplicateKeys, NumberMode, ParseOptions, DEFAULT_MAX_DEPTH, MAX_JSON_SIZE_BYTES};
pub use parser::{parse, parse_with_options, Parser};
pub use token::{Position, Token, TokenKind};
pub use tokenizer::{tokenize, Tokenizer};

/// Parses JSON text into an `AstNode` with the default `ParseOptions`.
///
/// # Errors
/// Returns `JsonError::Lex` or `JsonError::Parse` with the first error
/// encountered. Empty input is rejected with `ParseError::EmptyInput`.
///
/// # Examples
/// ```
/// use json_ast::{parse_json, AstNode};
///
/// let ast = parse_json("[1, 2, [3, 4]]").unwrap();
/// assert_eq!(ast.as_array().map(<[AstNode]>::len), Some(3));
/// assert!(parse_json("").is_err());
/// ```
pub fn parse_json(text: &str) -> Result<AstNode, JsonError> {
    parse_json_with_options(text, &ParseOptions::default())
}

/// Parses JSON text with custom `ParseOptions`.
///
/// # Errors
/// In addition to lexing and parsing errors, returns
/// `JsonError::InputTooLarge` if `text` exceeds `options.max_input_bytes`
/// *before* lexing begins.
pub fn parse_json_with_options(text: &str, options: &ParseOptions) -> Result<AstNode, JsonError> {
    if text.len() > options.max_input_bytes {
        return Err(JsonError::InputTooLarge {
            size: text.len(),
            limit: options.max_input_bytes,
        });
    }
    let tokens = tokenize(text)?;
    Ok(parse_with_options(tokens, options)?)
}
