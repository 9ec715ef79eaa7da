//! WAVE decoder: text printed by a component export invocation → [`Value`].
//!
//! The input is a parenthesized encoding such as
//! `(record (name "Rex") (species "Dog") (age 3) (is-mammal true))`.
//! Decoding is a recursive descent over a lazy tokenizer, so nested records
//! are representable and the first error reported is the leftmost one.
//!
//! # Grammar
//!
//! ```text
//! value      := string | integer | boolean | record
//! record     := "(" "record" field* ")"
//! field      := "(" field-name WS value ")"
//! field-name := [a-z][a-z-]*
//! string     := '"' char* '"'
//! integer    := digit+
//! boolean    := "true" | "false"
//! ```
//!
//! Whitespace between tokens is insignificant, except that a field name must
//! be followed by at least one whitespace character: `(name "Rex")` parses,
//! `(name"Rex")` does not.
//!
//! Inside strings a backslash protects the next character from ending the
//! literal. `\"` and `\\` decode to `"` and `\`; every other backslash
//! sequence is kept as written. This is a deliberate departure from plain
//! quote stripping, needed so that [`to_wave`](crate::to_wave) can write any
//! string and parse it back. One consequence: `"\\n"` and `"\n"` both decode
//! to the two characters `\n`.
//!
//! Decoding is all-or-nothing: on any error no partial value is returned.

use std::str::FromStr;

use crate::error::{ParseError, Result, Span};
use crate::types::{is_field_name, Record, Value};

/// Maximum record nesting accepted before failing with `MalformedSyntax`.
pub const MAX_DEPTH: usize = 128;

/// Parse WAVE text into a [`Value`].
///
/// The whole input must be exactly one value, optionally surrounded by
/// whitespace.
///
/// ```
/// use wave_core::{parse, Value};
///
/// let value = parse(r#"(record (name "Rex") (age 3))"#).unwrap();
/// let record = value.as_record().unwrap();
/// assert_eq!(record.get("name"), Some(&Value::String("Rex".into())));
/// assert_eq!(record.get("age"), Some(&Value::Integer(3)));
/// ```
pub fn parse(text: &str) -> Result<Value> {
    let mut parser = Parser::new(text);
    let value = parser.parse_value(0)?;
    if let Some(token) = parser.next()? {
        return Err(ParseError::malformed(
            Span::new(token.span.start, text.len()),
            "unexpected content after the value",
        ));
    }
    Ok(value)
}

/// Parse WAVE text whose top level must be a record.
///
/// This is the entry point for export results, which are always records.
pub fn parse_top_level_record(text: &str) -> Result<Record> {
    match parse(text)? {
        Value::Record(record) => Ok(record),
        other => Err(ParseError::malformed(
            Span::new(0, text.len()),
            format!("expected a record at top level, found {}", other.kind()),
        )),
    }
}

impl FromStr for Value {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TokenKind<'a> {
    Open,
    Close,
    Str(String),
    Int(&'a str),
    Bool(bool),
    Ident(&'a str),
}

#[derive(Debug)]
struct Token<'a> {
    kind: TokenKind<'a>,
    span: Span,
}

struct Lexer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    /// `true` if the next character is whitespace.
    fn at_whitespace(&self) -> bool {
        self.src[self.pos..].starts_with(char::is_whitespace)
    }

    /// Next token, or `None` at end of input.
    fn next_token(&mut self) -> Result<Option<Token<'a>>> {
        let src: &'a str = self.src;
        let rest = &src[self.pos..];
        let trimmed = rest.trim_start();
        self.pos += rest.len() - trimmed.len();

        let start = self.pos;
        let Some(c) = trimmed.chars().next() else {
            return Ok(None);
        };
        let kind = match c {
            '(' => {
                self.pos += 1;
                TokenKind::Open
            }
            ')' => {
                self.pos += 1;
                TokenKind::Close
            }
            '"' => TokenKind::Str(self.lex_string(start)?),
            _ => self.lex_word(start)?,
        };
        Ok(Some(Token {
            kind,
            span: Span::new(start, self.pos),
        }))
    }

    /// Lex a string literal whose opening quote is at `start`.
    fn lex_string(&mut self, start: usize) -> Result<String> {
        let body_start = start + 1;
        let mut out = String::new();
        let mut chars = self.src[body_start..].char_indices();
        while let Some((i, c)) = chars.next() {
            match c {
                '"' => {
                    self.pos = body_start + i + 1;
                    return Ok(out);
                }
                '\\' => match chars.next() {
                    Some((_, escaped @ ('"' | '\\'))) => out.push(escaped),
                    Some((_, other)) => {
                        out.push('\\');
                        out.push(other);
                    }
                    None => break,
                },
                _ => out.push(c),
            }
        }
        Err(ParseError::malformed(
            Span::new(start, self.src.len()),
            "unterminated string literal",
        ))
    }

    /// Lex a bare word: a digit run, a boolean literal or a field name.
    fn lex_word(&mut self, start: usize) -> Result<TokenKind<'a>> {
        let src: &'a str = self.src;
        let rest = &src[start..];
        let len = rest
            .find(|c: char| c.is_whitespace() || matches!(c, '(' | ')' | '"'))
            .unwrap_or(rest.len());
        let word = &rest[..len];
        self.pos = start + len;

        if word.bytes().all(|b| b.is_ascii_digit()) {
            return Ok(TokenKind::Int(word));
        }
        match word {
            "true" => Ok(TokenKind::Bool(true)),
            "false" => Ok(TokenKind::Bool(false)),
            _ if is_field_name(word) => Ok(TokenKind::Ident(word)),
            _ => Err(ParseError::malformed(
                Span::new(start, self.pos),
                format!("unrecognized token `{word}`"),
            )),
        }
    }
}

struct Parser<'a> {
    lexer: Lexer<'a>,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            lexer: Lexer::new(src),
        }
    }

    fn next(&mut self) -> Result<Option<Token<'a>>> {
        self.lexer.next_token()
    }

    fn end_of_input(&self) -> Span {
        Span::at(self.lexer.src.len())
    }

    /// Error for a `(` at `open` that is never matched.
    fn unclosed(&self, open: Span) -> ParseError {
        ParseError::malformed(
            Span::new(open.start, self.lexer.src.len()),
            "unbalanced parentheses: `(` is never closed",
        )
    }

    /// `depth` is the number of records enclosing this value.
    fn parse_value(&mut self, depth: usize) -> Result<Value> {
        let Some(token) = self.next()? else {
            return Err(ParseError::malformed(
                self.end_of_input(),
                "unexpected end of input, expected a value",
            ));
        };
        match token.kind {
            TokenKind::Str(s) => Ok(Value::String(s)),
            TokenKind::Int(digits) => parse_integer(digits, token.span).map(Value::Integer),
            TokenKind::Bool(b) => Ok(Value::Boolean(b)),
            TokenKind::Open => self.parse_record(token.span, depth + 1).map(Value::Record),
            TokenKind::Close => Err(ParseError::malformed(
                token.span,
                "unexpected `)`, expected a value",
            )),
            TokenKind::Ident(word) => Err(ParseError::malformed(
                token.span,
                format!("`{word}` is not a string, integer, boolean or record"),
            )),
        }
    }

    /// Parse the rest of a record whose `(` has been consumed.
    fn parse_record(&mut self, open: Span, depth: usize) -> Result<Record> {
        if depth > MAX_DEPTH {
            return Err(ParseError::malformed(
                open,
                format!("records nested deeper than {MAX_DEPTH} levels"),
            ));
        }
        match self.next()? {
            Some(Token {
                kind: TokenKind::Ident("record"),
                ..
            }) => {}
            Some(token) => {
                return Err(ParseError::malformed(
                    token.span,
                    "expected `record` after `(`",
                ))
            }
            None => return Err(self.unclosed(open)),
        }

        let mut record = Record::new();
        loop {
            let Some(token) = self.next()? else {
                return Err(self.unclosed(open));
            };
            match token.kind {
                TokenKind::Close => return Ok(record),
                TokenKind::Open => {
                    let (name, value) = self.parse_field(token.span, depth)?;
                    // Duplicate names: last value wins.
                    record.insert(name, value);
                }
                _ => {
                    return Err(ParseError::malformed(
                        token.span,
                        "expected `(` to start a field or `)` to close the record",
                    ))
                }
            }
        }
    }

    /// Parse `name value )` after a field's `(`.
    fn parse_field(&mut self, open: Span, depth: usize) -> Result<(String, Value)> {
        let name = match self.next()? {
            Some(Token {
                kind: TokenKind::Ident(name),
                ..
            }) => name.to_string(),
            // `true` and `false` also match the field-name pattern.
            Some(Token {
                kind: TokenKind::Bool(b),
                ..
            }) => b.to_string(),
            Some(token) => {
                return Err(ParseError::malformed(
                    token.span,
                    "expected a field name matching [a-z][a-z-]*",
                ))
            }
            None => return Err(self.unclosed(open)),
        };

        if !self.lexer.at_whitespace() {
            return Err(ParseError::malformed(
                Span::at(self.lexer.pos),
                format!("expected whitespace after field name `{name}`"),
            ));
        }
        let value = self.parse_value(depth)?;

        match self.next()? {
            Some(Token {
                kind: TokenKind::Close,
                ..
            }) => Ok((name, value)),
            Some(token) => Err(ParseError::malformed(
                token.span,
                format!("expected `)` to close field `{name}`"),
            )),
            None => Err(self.unclosed(open)),
        }
    }
}

/// Digit runs are validated by the lexer, so the only failure is overflow.
fn parse_integer(digits: &str, span: Span) -> Result<i64> {
    digits.parse::<i64>().map_err(|_| ParseError::IntegerOverflow {
        span,
        literal: digits.to_string(),
    })
}
