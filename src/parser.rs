//! Contains the recursive-descent `Parser`.
//!
//! The parser owns the token sequence and a single forward-only cursor.
//! JSON is LL(1), so one token of lookahead is enough and nothing is
//! ever backtracked. Recursion depth equals nesting depth and is bounded
//! by `ParseOptions::max_depth`.

use crate::ast::{AstNode, JsonNumber, Object};
use crate::error::ParseError;
use crate::options::{DuplicateKeys, NumberMode, ParseOptions};
use crate::token::{Position, Token, TokenKind};
use indexmap::map::Entry;
use log::{debug, trace};
use std::borrow::Cow;

/// The recursive-descent parser.
pub struct Parser<'a> {
    /// The token sequence, normally ending with `EndOfInput`.
    tokens: Vec<Token<'a>>,
    /// Index of the current token.
    pos: usize,
    options: ParseOptions,
    /// Number of containers currently open.
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Token<'a>>, options: ParseOptions) -> Self {
        Parser {
            tokens,
            pos: 0,
            options,
            depth: 0,
        }
    }

    /// Parses exactly one value followed by `EndOfInput`.
    pub fn parse(mut self) -> Result<AstNode, ParseError> {
        if self.peek() == TokenKind::EndOfInput {
            return Err(ParseError::EmptyInput);
        }

        let root = self.parse_value()?;

        match self.peek() {
            // `EndOfInput` must also be the last token of the sequence.
            TokenKind::EndOfInput => match self.tokens.get(self.pos + 1) {
                None => Ok(root),
                Some(extra) => Err(ParseError::TrailingContent {
                    found: extra.kind,
                    position: extra.position,
                }),
            },
            found => Err(ParseError::TrailingContent {
                found,
                position: self.position(),
            }),
        }
    }

    /// The kind of the current token. Past the end reads as `EndOfInput`,
    /// so a sequence missing its terminator is still handled.
    fn peek(&self) -> TokenKind {
        self.tokens
            .get(self.pos)
            .map_or(TokenKind::EndOfInput, |t| t.kind)
    }

    /// The position of the current token.
    fn position(&self) -> Position {
        match self.tokens.get(self.pos) {
            Some(token) => token.position,
            None => self.tokens.last().map_or(Position::START, |t| t.position),
        }
    }

    /// Moves past the current token, taking its lexeme.
    fn bump(&mut self) -> Cow<'a, str> {
        match self.tokens.get_mut(self.pos) {
            Some(token) => {
                self.pos += 1;
                std::mem::take(&mut token.lexeme)
            }
            None => Cow::Borrowed(""),
        }
    }

    /// Dispatches on the current token to the rule for its value.
    fn parse_value(&mut self) -> Result<AstNode, ParseError> {
        match self.peek() {
            TokenKind::String => Ok(AstNode::String(self.bump().into_owned())),
            TokenKind::Number => self.parse_number(),
            TokenKind::True => {
                self.bump();
                Ok(AstNode::Boolean(true))
            }
            TokenKind::False => {
                self.bump();
                Ok(AstNode::Boolean(false))
            }
            TokenKind::Null => {
                self.bump();
                Ok(AstNode::Null)
            }
            TokenKind::LeftBrace => self.parse_object(),
            TokenKind::LeftBracket => self.parse_array(),
            found => Err(ParseError::UnexpectedToken {
                expected: "value",
                found,
                position: self.position(),
            }),
        }
    }

    fn parse_number(&mut self) -> Result<AstNode, ParseError> {
        let position = self.position();
        let literal = self.bump();
        let number = match self.options.number_mode {
            NumberMode::Exact => JsonNumber::Exact(literal.into_owned()),
            NumberMode::Float => match literal.parse::<f64>() {
                Ok(n) if n.is_finite() => JsonNumber::Float(n),
                _ => {
                    return Err(ParseError::NumberOutOfRange {
                        literal: literal.into_owned(),
                        position,
                    })
                }
            },
        };
        Ok(AstNode::Number(number))
    }

    /// Opens a container at the current token, enforcing the depth bound.
    fn enter(&mut self) -> Result<Position, ParseError> {
        let position = self.position();
        if self.depth + 1 >= self.options.max_depth {
            debug!(
                "rejecting container at {position}: depth limit {} reached",
                self.options.max_depth
            );
            return Err(ParseError::MaxDepthExceeded {
                max_depth: self.options.max_depth,
                position,
            });
        }
        self.depth += 1;
        trace!("entered container at {position}, depth {}", self.depth);
        self.bump();
        Ok(position)
    }

    fn parse_object(&mut self) -> Result<AstNode, ParseError> {
        let start = self.enter()?;
        let mut members = Object::new();

        // Empty object
        if self.peek() == TokenKind::RightBrace {
            self.bump();
            self.depth -= 1;
            return Ok(AstNode::Object(members));
        }

        loop {
            // Key
            let key_position = self.position();
            let key = match self.peek() {
                TokenKind::String => self.bump().into_owned(),
                TokenKind::EndOfInput => return Err(ParseError::UnterminatedObject { start }),
                found => {
                    return Err(ParseError::ExpectedObjectKey {
                        found,
                        position: key_position,
                    })
                }
            };

            // Colon
            match self.peek() {
                TokenKind::Colon => {
                    self.bump();
                }
                TokenKind::EndOfInput => return Err(ParseError::UnterminatedObject { start }),
                found => {
                    return Err(ParseError::ExpectedColon {
                        found,
                        position: self.position(),
                    })
                }
            }

            // Value
            if self.peek() == TokenKind::EndOfInput {
                return Err(ParseError::UnterminatedObject { start });
            }
            let value = self.parse_value()?;
            self.insert_member(&mut members, key, value, key_position)?;

            // Comma or closing brace
            match self.peek() {
                TokenKind::Comma => {
                    let comma = self.position();
                    self.bump();
                    if self.peek() == TokenKind::RightBrace {
                        return Err(ParseError::TrailingComma {
                            closing: TokenKind::RightBrace,
                            position: comma,
                        });
                    }
                }
                TokenKind::RightBrace => {
                    self.bump();
                    break;
                }
                TokenKind::EndOfInput => return Err(ParseError::UnterminatedObject { start }),
                found => {
                    return Err(ParseError::UnexpectedToken {
                        expected: "',' or '}'",
                        found,
                        position: self.position(),
                    })
                }
            }
        }

        self.depth -= 1;
        Ok(AstNode::Object(members))
    }

    fn insert_member(
        &self,
        members: &mut Object,
        key: String,
        value: AstNode,
        position: Position,
    ) -> Result<(), ParseError> {
        match members.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(value);
            }
            Entry::Occupied(mut slot) => match self.options.duplicate_keys {
                DuplicateKeys::LastWins => {
                    slot.insert(value);
                }
                DuplicateKeys::Reject => {
                    return Err(ParseError::DuplicateKey {
                        key: slot.key().clone(),
                        position,
                    })
                }
            },
        }
        Ok(())
    }

    fn parse_array(&mut self) -> Result<AstNode, ParseError> {
        let start = self.enter()?;
        let mut items = Vec::new();

        // Empty array
        if self.peek() == TokenKind::RightBracket {
            self.bump();
            self.depth -= 1;
            return Ok(AstNode::Array(items));
        }

        loop {
            if self.peek() == TokenKind::EndOfInput {
                return Err(ParseError::UnterminatedArray { start });
            }
            items.push(self.parse_value()?);

            // Comma or closing bracket
            match self.peek() {
                TokenKind::Comma => {
                    let comma = self.position();
                    self.bump();
                    if self.peek() == TokenKind::RightBracket {
                        return Err(ParseError::TrailingComma {
                            closing: TokenKind::RightBracket,
                            position: comma,
                        });
                    }
                }
                TokenKind::RightBracket => {
                    self.bump();
                    break;
                }
                TokenKind::EndOfInput => return Err(ParseError::UnterminatedArray { start }),
                found => {
                    return Err(ParseError::UnexpectedToken {
                        expected: "',' or ']'",
                        found,
                        position: self.position(),
                    })
                }
            }
        }

        self.depth -= 1;
        Ok(AstNode::Array(items))
    }
}

/// Parses a token sequence with the default `ParseOptions`.
///
/// # Errors
/// Returns the first `ParseError` encountered; no partial tree is returned.
pub fn parse(tokens: Vec<Token<'_>>) -> Result<AstNode, ParseError> {
    parse_with_options(tokens, &ParseOptions::default())
}

/// Parses a token sequence with custom `ParseOptions`.
pub fn parse_with_options(
    tokens: Vec<Token<'_>>,
    options: &ParseOptions,
) -> Result<AstNode, ParseError> {
    trace!("parsing {} tokens", tokens.len());
    Parser::new(tokens, *options)
        .parse()
        .inspect_err(|e| debug!("parse rejected input: {e}"))
}
