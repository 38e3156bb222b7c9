//! Defines `Token`, its closed set of `TokenKind`s, and `Position`.
//!
//! Tokens are the intermediate representation between the `Tokenizer`
//! (lexer) and the `Parser`. They are produced once and never mutated.

use std::borrow::Cow;
use std::fmt;

/// The kind of a `Token`.
///
/// This is a closed set of the smallest meaningful units of JSON grammar.
/// It carries no payload so it can be copied into error values; the
/// matched text lives in [`Token::lexeme`].
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// A string, e.g., `"hello"`
    String,
    /// A number, e.g., `123.4`
    Number,
    /// `,`
    Comma,
    /// `:`
    Colon,
    /// `true`
    True,
    /// `false`
    False,
    /// `null`
    Null,
    /// Always the last token of a sequence.
    EndOfInput,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TokenKind::LeftBrace => "'{'",
            TokenKind::RightBrace => "'}'",
            TokenKind::LeftBracket => "'['",
            TokenKind::RightBracket => "']'",
            TokenKind::String => "string",
            TokenKind::Number => "number",
            TokenKind::Comma => "','",
            TokenKind::Colon => "':'",
            TokenKind::True => "'true'",
            TokenKind::False => "'false'",
            TokenKind::Null => "'null'",
            TokenKind::EndOfInput => "end of input",
        })
    }
}

/// A location in the source text.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Default)]
pub struct Position {
    /// The 0-indexed byte offset into the input.
    pub offset: usize,
    /// The 1-indexed line number.
    pub line: usize,
    /// The 1-indexed column number (in bytes).
    pub column: usize,
}

impl Position {
    /// The position of the first byte of any input.
    pub const START: Position = Position {
        offset: 0,
        line: 1,
        column: 1,
    };
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// A single token produced by the `Tokenizer`.
///
/// For `String` tokens the lexeme is the *unescaped* content. It borrows
/// from the input when the literal has no escape sequences. For `Number`
/// tokens it is the raw numeric text, already validated against the JSON
/// number grammar.
#[derive(Debug, PartialEq, Clone)]
pub struct Token<'a> {
    pub(crate) kind: TokenKind,
    pub(crate) lexeme: Cow<'a, str>,
    pub(crate) position: Position,
}

impl<'a> Token<'a> {
    /// Creates a token. Mostly useful for building token sequences by hand.
    pub fn new(kind: TokenKind, lexeme: impl Into<Cow<'a, str>>, position: Position) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            position,
        }
    }

    /// The kind of the token.
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The matched text (unescaped for strings).
    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    /// Where the token starts in the input.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Detaches the token from the input buffer.
    pub fn into_owned(self) -> Token<'static> {
        Token {
            kind: self.kind,
            lexeme: Cow::Owned(self.lexeme.into_owned()),
            position: self.position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_kind_display() {
        assert_eq!(TokenKind::RightBrace.to_string(), "'}'");
        assert_eq!(TokenKind::String.to_string(), "string");
        assert_eq!(TokenKind::EndOfInput.to_string(), "end of input");
    }

    #[test]
    fn test_into_owned_keeps_fields() {
        let input = String::from("hello");
        let token = Token::new(TokenKind::String, input.as_str(), Position::START);
        let owned = token.into_owned();
        drop(input);
        assert_eq!(owned.kind(), TokenKind::String);
        assert_eq!(owned.lexeme(), "hello");
        assert_eq!(owned.position(), Position::START);
    }
}
