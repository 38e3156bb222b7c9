//! Contains the error types for both parsing stages.
//!
//! `LexError` and `ParseError` are disjoint: the tokenizer only ever
//! returns the former, the parser only the latter. `JsonError` wraps
//! either one for the composed `parse_json` entry point.

use crate::token::{Position, TokenKind};
use thiserror::Error;

/// An error raised while turning text into tokens.
#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum LexError {
    /// The input ended before the closing quote. `start` is the opening quote.
    #[error("Unterminated string starting at {start}")]
    UnterminatedString { start: Position },

    /// A backslash followed by something that is not a JSON escape,
    /// or a `\u` not followed by four hex digits.
    #[error("Invalid escape sequence at {position}")]
    InvalidEscape { position: Position },

    /// A `\u` escape naming half of a surrogate pair without its partner.
    #[error("Unpaired surrogate \\u{code_point:04X} at {position}")]
    LoneSurrogate { code_point: u16, position: Position },

    /// A raw control character (U+0000 to U+001F) inside a string.
    #[error("Unescaped control character 0x{byte:02X} in string at {position}")]
    ControlCharacter { byte: u8, position: Position },

    /// A word that is neither `true`, `false`, `null`, nor a number.
    #[error("Unrecognized token '{literal}' at {position}")]
    UnrecognizedToken { literal: String, position: Position },

    /// A number-shaped literal that breaks the JSON number grammar.
    #[error("Invalid number '{literal}' at {position}")]
    InvalidNumber { literal: String, position: Position },

    /// A character that cannot start any token.
    #[error("Unexpected character '{character}' at {position}")]
    UnexpectedCharacter { character: char, position: Position },
}

impl LexError {
    /// Where the error was detected.
    pub fn position(&self) -> Position {
        match self {
            LexError::UnterminatedString { start } => *start,
            LexError::InvalidEscape { position }
            | LexError::LoneSurrogate { position, .. }
            | LexError::ControlCharacter { position, .. }
            | LexError::UnrecognizedToken { position, .. }
            | LexError::InvalidNumber { position, .. }
            | LexError::UnexpectedCharacter { position, .. } => *position,
        }
    }
}

/// An error raised while building the AST from tokens.
#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum ParseError {
    /// The token sequence held nothing but `EndOfInput`.
    #[error("Empty input")]
    EmptyInput,

    #[error("Expected {expected}, found {found} at {position}")]
    UnexpectedToken {
        expected: &'static str,
        found: TokenKind,
        position: Position,
    },

    #[error("Expected a string key, found {found} at {position}")]
    ExpectedObjectKey { found: TokenKind, position: Position },

    #[error("Expected ':', found {found} at {position}")]
    ExpectedColon { found: TokenKind, position: Position },

    /// A `,` directly followed by `}` or `]`. `position` is the comma.
    #[error("Trailing comma before {closing} at {position}")]
    TrailingComma { closing: TokenKind, position: Position },

    /// `EndOfInput` reached inside an object. `start` is its `{`.
    #[error("Unterminated object starting at {start}")]
    UnterminatedObject { start: Position },

    /// `EndOfInput` reached inside an array. `start` is its `[`.
    #[error("Unterminated array starting at {start}")]
    UnterminatedArray { start: Position },

    /// A complete value was followed by more tokens.
    #[error("Unexpected trailing {found} at {position}")]
    TrailingContent { found: TokenKind, position: Position },

    #[error("Maximum nesting depth of {max_depth} exceeded at {position}")]
    MaxDepthExceeded { max_depth: usize, position: Position },

    /// Only raised under `DuplicateKeys::Reject`.
    #[error("Duplicate key '{key}' at {position}")]
    DuplicateKey { key: String, position: Position },

    /// The literal does not fit in an `f64`.
    #[error("Number '{literal}' is out of range at {position}")]
    NumberOutOfRange { literal: String, position: Position },
}

impl ParseError {
    /// Where the error was detected, if it has a location.
    pub fn position(&self) -> Option<Position> {
        match self {
            ParseError::EmptyInput => None,
            ParseError::UnterminatedObject { start } | ParseError::UnterminatedArray { start } => {
                Some(*start)
            }
            ParseError::UnexpectedToken { position, .. }
            | ParseError::ExpectedObjectKey { position, .. }
            | ParseError::ExpectedColon { position, .. }
            | ParseError::TrailingComma { position, .. }
            | ParseError::TrailingContent { position, .. }
            | ParseError::MaxDepthExceeded { position, .. }
            | ParseError::DuplicateKey { position, .. }
            | ParseError::NumberOutOfRange { position, .. } => Some(*position),
        }
    }
}

/// Any error from `parse_json`.
#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum JsonError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Checked before lexing starts.
    #[error("Input of {size} bytes exceeds the limit of {limit} bytes")]
    InputTooLarge { size: usize, limit: usize },
}

impl JsonError {
    /// Where the error was detected, if it has a location.
    pub fn position(&self) -> Option<Position> {
        match self {
            JsonError::Lex(e) => Some(e.position()),
            JsonError::Parse(e) => e.position(),
            JsonError::InputTooLarge { .. } => None,
        }
    }
}
