//! Error types for the tokenizer, parser, and checker.
//!
//! Every front-end failure is a [`ParseError`]: a kind plus the span of the
//! offending lexeme or node. Errors propagate as ordinary `Result` values
//! through `parse_expression`, `parse_value`, and `parse_scope`; the driver
//! is the single place that turns one into a fatal diagnostic and a
//! non-zero exit. Nothing in this crate aborts the process.

use std::fmt;

use sable_base::Span;

use crate::token::TokenTag;

/// Alias for front-end results.
pub type ParseResult<T> = Result<T, ParseError>;

/// A front-end failure annotated with its source location.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        ParseError { kind, span }
    }
}

/// What went wrong.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    // Lexical
    /// A code point with no lexical role.
    UnknownCharacter { character: char },
    /// End of text inside a quoted literal.
    UnterminatedText,
    /// A second `.` in a numeric lexeme, or a `.` after a base prefix.
    MalformedNumber,

    // Parse
    /// Token cannot begin an expression.
    UnexpectedToken { found: TokenTag },
    /// A `(` or `[` group was not closed.
    MissingCloser { expected: TokenTag, found: TokenTag },
    /// A declaration position requires a name.
    ExpectedName { found: TokenTag },
    /// A declaration name must be followed by `:`.
    ExpectedColon { found: TokenTag },
    /// A value declaration with neither type nor initialization.
    UntypedUninitialized,
    /// `""` has no content.
    EmptyText,

    // Semantic (partial checker)
    /// Assignment between values of known, different primitive types.
    MismatchedTypes,
    /// Shift and negation apply to primitive operands only.
    PrimitiveRequired,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::UnknownCharacter { character } => {
                write!(f, "unknown character U+{:04X}", *character as u32)
            }
            ParseErrorKind::UnterminatedText => write!(f, "unterminated text"),
            ParseErrorKind::MalformedNumber => write!(f, "malformed number"),
            ParseErrorKind::UnexpectedToken { found } => {
                write!(f, "unexpected token {} when parsing expression", found)
            }
            ParseErrorKind::MissingCloser { expected, found } => {
                write!(f, "expected {} but found {}", expected, found)
            }
            ParseErrorKind::ExpectedName { found } => {
                write!(f, "expected a name but found {}", found)
            }
            ParseErrorKind::ExpectedColon { found } => {
                write!(f, "expected `:` after a declaration name but found {}", found)
            }
            ParseErrorKind::UntypedUninitialized => {
                write!(f, "value is untyped and uninitialised")
            }
            ParseErrorKind::EmptyText => write!(f, "empty text literal"),
            ParseErrorKind::MismatchedTypes => write!(f, "mismatched types"),
            ParseErrorKind::PrimitiveRequired => {
                write!(f, "operation requires a primitive operand")
            }
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}..{}", self.kind, self.span.start, self.span.end)
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_span() {
        let err = ParseError::new(ParseErrorKind::UnterminatedText, Span::new(5, 9, 0, 5));
        let text = err.to_string();
        assert!(text.contains("unterminated text"));
        assert!(text.contains("5..9"));
    }

    #[test]
    fn display_names_offending_token() {
        let err = ParseError::new(
            ParseErrorKind::UnexpectedToken { found: TokenTag::ShlEq },
            Span::default(),
        );
        assert!(err.to_string().contains("`<<=`"));
    }
}
