//! Error types for WAVE parsing, projection and JSON conversion.

use std::fmt;
use thiserror::Error;

/// A half-open byte range `start..end` into the parsed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Zero-width span at `offset`, used for end-of-input errors.
    pub fn at(offset: usize) -> Self {
        Self::new(offset, offset)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Errors that can occur while parsing WAVE text or working with parsed values.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The input does not match the grammar at `span`: unbalanced parentheses,
    /// an unterminated string, a token that is not a value, or trailing content.
    #[error("malformed WAVE at {span}: {message}")]
    MalformedSyntax { span: Span, message: String },

    /// A digit run that does not fit in an `i64`.
    #[error("integer literal {literal} at {span} does not fit in 64 bits")]
    IntegerOverflow { span: Span, literal: String },

    /// A record projection required a field the record does not have.
    #[error("missing required field `{field}`")]
    MissingRequiredField { field: String },

    /// A record projection found the field but with a different value shape.
    #[error("field `{field}` should be {expected}, found {found}")]
    FieldTypeMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    /// The input string was not valid JSON (JSON bridge).
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Valid JSON that has no WAVE counterpart (null, arrays, floats, ...).
    #[error("cannot convert JSON at {path} to WAVE: {reason}")]
    UnsupportedJson { path: String, reason: String },
}

impl ParseError {
    pub(crate) fn malformed(span: Span, message: impl Into<String>) -> Self {
        Self::MalformedSyntax {
            span,
            message: message.into(),
        }
    }

    /// Byte span of the offending input, for the syntax-level variants.
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::MalformedSyntax { span, .. } | Self::IntegerOverflow { span, .. } => Some(*span),
            _ => None,
        }
    }
}

/// Convenience alias used throughout wave-core.
pub type Result<T> = std::result::Result<T, ParseError>;
