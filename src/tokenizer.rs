//! The byte-based tokenizer (lexer).
//!
//! It consumes the raw input `&str` (as `&[u8]`) and produces a sequence
//! of `Token`s that always ends with `TokenKind::EndOfInput`.

use crate::error::LexError;
use crate::token::{Position, Token, TokenKind};
use log::{debug, trace};
use memchr::memchr;
use std::borrow::Cow;

// --- The Lookup Table (LUT) ---
// A 256-entry array. We can check the class of any
// byte with a single, branchless lookup.
pub(crate) const W: u8 = 1; // Whitespace
pub(crate) const S: u8 = 2; // Structural
pub(crate) const L: u8 = 3; // Literal
pub(crate) const D: u8 = 4; // Digit
pub(crate) const Q: u8 = 5; // Quote

static BYTE_PROPERTIES: [u8; 256] = {
    let mut table = [0; 256];
    // 1: Whitespace
    table[b' ' as usize] = W;
    table[b'\n' as usize] = W;
    table[b'\r' as usize] = W;
    table[b'\t' as usize] = W;

    // 2: Structural
    table[b'{' as usize] = S;
    table[b'}' as usize] = S;
    table[b'[' as usize] = S;
    table[b']' as usize] = S;
    table[b':' as usize] = S;
    table[b',' as usize] = S;

    // 3: Literal
    table[b't' as usize] = L;
    table[b'f' as usize] = L;
    table[b'n' as usize] = L;

    // 5: Quote
    table[b'"' as usize] = Q;

    // 4: Digit (and '-')
    table[b'-' as usize] = D;
    let mut digit = b'0';
    while digit <= b'9' {
        table[digit as usize] = D;
        digit += 1;
    }

    // 0: All other bytes cannot start a token
    table
};

/// Bytes that extend a literal or number once it has started.
#[inline]
fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'.' | b'+' | b'-')
}

/// Checks `literal` against the RFC 8259 number grammar:
/// `-? (0 | [1-9][0-9]*) (. [0-9]+)? ([eE] [+-]? [0-9]+)?`
fn is_json_number(literal: &[u8]) -> bool {
    fn digits(bytes: &[u8]) -> usize {
        bytes.iter().take_while(|b| b.is_ascii_digit()).count()
    }

    let mut i = 0;
    if literal.first() == Some(&b'-') {
        i += 1;
    }

    match literal.get(i) {
        Some(b'0') => i += 1,
        Some(b'1'..=b'9') => i += 1 + digits(&literal[i + 1..]),
        _ => return false,
    }

    if literal.get(i) == Some(&b'.') {
        i += 1;
        let n = digits(&literal[i..]);
        if n == 0 {
            return false;
        }
        i += n;
    }

    if matches!(literal.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(literal.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let n = digits(&literal[i..]);
        if n == 0 {
            return false;
        }
        i += n;
    }

    i == literal.len()
}

fn hex_value(byte: u8) -> Option<u16> {
    match byte {
        b'0'..=b'9' => Some((byte - b'0') as u16),
        b'a'..=b'f' => Some((byte - b'a' + 10) as u16),
        b'A'..=b'F' => Some((byte - b'A' + 10) as u16),
        _ => None,
    }
}

/// The tokenizer (lexer).
///
/// An `Iterator` over `Result<Token, LexError>`. It yields exactly one
/// `EndOfInput` token at the end, and stops after that or after the
/// first error.
pub struct Tokenizer<'a> {
    /// The input, kept as `&str` so lexemes can borrow from it.
    input: &'a str,
    /// The raw byte view of `input`.
    bytes: &'a [u8],
    /// The current position (index) in `bytes`.
    cursor: usize,
    /// The current line number (1-indexed) for error reporting.
    line: usize,
    /// The current column number (1-indexed) for error reporting.
    column: usize,
    /// Set once `EndOfInput` or an error has been yielded.
    finished: bool,
}

impl<'a> Tokenizer<'a> {
    /// Creates a new `Tokenizer` over an input string.
    pub fn new(input: &'a str) -> Self {
        Tokenizer {
            input,
            bytes: input.as_bytes(),
            cursor: 0,
            line: 1,
            column: 1,
            finished: false,
        }
    }

    /// The position of the next unread byte.
    pub fn current_position(&self) -> Position {
        Position {
            offset: self.cursor,
            line: self.line,
            column: self.column,
        }
    }

    /// Skips insignificant whitespace using the LUT.
    #[inline]
    fn skip_whitespace(&mut self) {
        while let Some(&byte) = self.bytes.get(self.cursor) {
            if BYTE_PROPERTIES[byte as usize] != W {
                break;
            }
            self.advance_byte();
        }
    }

    /// Advances the cursor by one byte, updating line/col, and returns the byte.
    /// Assumes the cursor is not at the end.
    #[inline]
    fn advance_byte(&mut self) -> u8 {
        let byte = self.bytes[self.cursor];
        if byte == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.cursor += 1;
        byte
    }

    /// Scans a maximal run of word bytes and classifies it as a literal,
    /// a number, or an error.
    fn lex_word(&mut self, start: Position) -> Result<(TokenKind, Cow<'a, str>), LexError> {
        while let Some(&byte) = self.bytes.get(self.cursor) {
            if !is_word_byte(byte) {
                break;
            }
            self.advance_byte();
        }

        // Only ASCII bytes were consumed, so both ends are char boundaries.
        let literal = &self.input[start.offset..self.cursor];
        let kind = match literal {
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "null" => TokenKind::Null,
            _ if matches!(literal.as_bytes()[0], b'-' | b'0'..=b'9') => {
                if !is_json_number(literal.as_bytes()) {
                    return Err(LexError::InvalidNumber {
                        literal: literal.to_string(),
                        position: start,
                    });
                }
                TokenKind::Number
            }
            _ => {
                return Err(LexError::UnrecognizedToken {
                    literal: literal.to_string(),
                    position: start,
                })
            }
        };
        Ok((kind, Cow::Borrowed(literal)))
    }

    /// Finds the closing quote of the string whose content starts at the
    /// cursor. Returns its index relative to the cursor.
    fn find_closing_quote(&self) -> Option<usize> {
        let mut current_slice = &self.bytes[self.cursor..];
        let mut total_offset = 0;

        loop {
            let i = memchr(b'"', current_slice)?;
            // An odd number of preceding backslashes escapes the quote.
            let backslashes = current_slice[..i]
                .iter()
                .rev()
                .take_while(|&&b| b == b'\\')
                .count();
            if backslashes % 2 == 0 {
                return Some(total_offset + i);
            }
            total_offset += i + 1;
            current_slice = &current_slice[i + 1..];
        }
    }

    /// Lexes a string literal, resolving escapes. Borrows from the input
    /// when there is nothing to resolve.
    fn lex_string(&mut self, start: Position) -> Result<Cow<'a, str>, LexError> {
        self.advance_byte(); // Consume opening '"'

        let content_start = self.cursor;
        let quote_index = self
            .find_closing_quote()
            .ok_or(LexError::UnterminatedString { start })?;
        let content_end = content_start + quote_index;

        if memchr(b'\\', &self.bytes[content_start..content_end]).is_none() {
            // --- No escapes ---
            // We still walk the bytes to reject control characters and
            // keep line/column counters right.
            while self.cursor < content_end {
                let position = self.current_position();
                let byte = self.advance_byte();
                if byte < 0x20 {
                    return Err(LexError::ControlCharacter { byte, position });
                }
            }
            self.advance_byte(); // Consume closing '"'
            return Ok(Cow::Borrowed(&self.input[content_start..content_end]));
        }

        // --- Escapes present ---
        // Copy unescaped runs as whole slices so multi-byte characters
        // survive, and resolve each escape in between.
        let mut s = String::with_capacity(quote_index);
        let mut run_start = content_start;

        while self.cursor < content_end {
            let position = self.current_position();
            let byte = self.advance_byte();
            if byte < 0x20 {
                return Err(LexError::ControlCharacter { byte, position });
            }
            if byte != b'\\' {
                continue;
            }
            s.push_str(&self.input[run_start..position.offset]);
            s.push(self.lex_escape(position, content_end)?);
            run_start = self.cursor;
        }
        s.push_str(&self.input[run_start..content_end]);

        self.advance_byte(); // Consume closing '"'
        Ok(Cow::Owned(s))
    }

    /// Resolves the escape whose backslash sits at `backslash`.
    fn lex_escape(&mut self, backslash: Position, end: usize) -> Result<char, LexError> {
        if self.cursor >= end {
            return Err(LexError::InvalidEscape {
                position: backslash,
            });
        }
        match self.advance_byte() {
            b'"' => Ok('"'),
            b'\\' => Ok('\\'),
            b'/' => Ok('/'),
            b'b' => Ok('\u{0008}'), // Backspace
            b'f' => Ok('\u{000C}'), // Form feed
            b'n' => Ok('\n'),
            b'r' => Ok('\r'),
            b't' => Ok('\t'),
            b'u' => self.lex_unicode_escape(backslash, end),
            _ => Err(LexError::InvalidEscape {
                position: backslash,
            }),
        }
    }

    /// Handles `\uXXXX`, combining a high surrogate with the `\uXXXX`
    /// low surrogate that must follow it.
    fn lex_unicode_escape(&mut self, backslash: Position, end: usize) -> Result<char, LexError> {
        let code = self.read_hex4(end).ok_or(LexError::InvalidEscape {
            position: backslash,
        })?;

        let code_point = match code {
            0xD800..=0xDBFF => {
                let lone = LexError::LoneSurrogate {
                    code_point: code,
                    position: backslash,
                };
                let second = self.current_position();
                if self.bytes.get(self.cursor..self.cursor + 2) != Some(b"\\u".as_slice())
                    || self.cursor + 2 > end
                {
                    return Err(lone);
                }
                self.advance_byte();
                self.advance_byte();
                let low = self.read_hex4(end).ok_or(LexError::InvalidEscape {
                    position: second,
                })?;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(lone);
                }
                0x10000 + ((code as u32 - 0xD800) << 10) + (low as u32 - 0xDC00)
            }
            0xDC00..=0xDFFF => {
                return Err(LexError::LoneSurrogate {
                    code_point: code,
                    position: backslash,
                })
            }
            _ => code as u32,
        };

        char::from_u32(code_point).ok_or(LexError::InvalidEscape {
            position: backslash,
        })
    }

    /// Reads four hex digits that end at or before `end`.
    fn read_hex4(&mut self, end: usize) -> Option<u16> {
        if self.cursor + 4 > end {
            return None;
        }
        let mut value = 0u16;
        for &byte in &self.bytes[self.cursor..self.cursor + 4] {
            value = (value << 4) | hex_value(byte)?;
        }
        for _ in 0..4 {
            self.advance_byte();
        }
        Some(value)
    }

    fn next_token(&mut self) -> Result<Token<'a>, LexError> {
        // 1. Skip all insignificant whitespace.
        self.skip_whitespace();

        // 2. Record position *after* skipping whitespace.
        let start = self.current_position();

        // 3. Peek at the next byte to see what to do.
        let byte = match self.bytes.get(self.cursor) {
            Some(&b) => b,
            None => {
                return Ok(Token {
                    kind: TokenKind::EndOfInput,
                    lexeme: Cow::Borrowed(""),
                    position: start,
                })
            }
        };

        // 4. Use the LUT to decide which lexer to call.
        let (kind, lexeme) = match BYTE_PROPERTIES[byte as usize] {
            S => {
                self.advance_byte();
                let kind = match byte {
                    b'{' => TokenKind::LeftBrace,
                    b'}' => TokenKind::RightBrace,
                    b'[' => TokenKind::LeftBracket,
                    b']' => TokenKind::RightBracket,
                    b':' => TokenKind::Colon,
                    _ => TokenKind::Comma,
                };
                (kind, Cow::Borrowed(&self.input[start.offset..self.cursor]))
            }
            L | D => self.lex_word(start)?,
            Q => (TokenKind::String, self.lex_string(start)?),
            _ => {
                // The cursor always rests on a char boundary between tokens.
                let character = self.input[self.cursor..]
                    .chars()
                    .next()
                    .unwrap_or(char::REPLACEMENT_CHARACTER);
                return Err(LexError::UnexpectedCharacter {
                    character,
                    position: start,
                });
            }
        };

        Ok(Token {
            kind,
            lexeme,
            position: start,
        })
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token<'a>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let result = self.next_token();
        self.finished = match &result {
            Ok(token) => token.kind == TokenKind::EndOfInput,
            Err(_) => true,
        };
        Some(result)
    }
}

impl std::iter::FusedIterator for Tokenizer<'_> {}

/// Converts `text` into tokens, ending with a single `EndOfInput`.
///
/// Empty (or whitespace-only) input is not an error here: it yields just
/// `[EndOfInput]`, and the parser rejects it.
///
/// # Errors
/// Returns the first `LexError` encountered. No tokens are returned on error.
///
/// # Examples
/// ```
/// use json_ast::{tokenize, TokenKind};
///
/// let tokens = tokenize(r#"{"a": [1, true]}"#).unwrap();
/// let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind()).collect();
/// assert_eq!(kinds.len(), 10);
/// assert_eq!(tokens[1].lexeme(), "a");
/// assert_eq!(kinds.last(), Some(&TokenKind::EndOfInput));
/// ```
pub fn tokenize(text: &str) -> Result<Vec<Token<'_>>, LexError> {
    let tokens = Tokenizer::new(text)
        .collect::<Result<Vec<_>, _>>()
        .inspect_err(|e| debug!("tokenize rejected input: {e}"))?;
    trace!("tokenized {} bytes into {} tokens", text.len(), tokens.len());
    Ok(tokens)
}
