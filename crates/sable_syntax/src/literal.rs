//! Literal parsers: token byte ranges to semantic values.
//!
//! The tokenizer only classifies lexemes; the functions here convert the
//! raw bytes of a literal token into its value when the expression parser
//! reaches it. Integers fold left-to-right under the base implied by the
//! token tag, wrapping silently in 64 bits. Reals defer to the standard
//! float parser (scientific and hex float notation remain TODO until the
//! checker grows real number semantics). Text processes escapes
//! byte-by-byte, so multi-byte UTF-8 passes through untouched.

use sable_base::Span;

use crate::error::{ParseError, ParseErrorKind, ParseResult};
use crate::token::TokenTag;

/// Numeric value of one digit byte, for bases up to 16.
fn digit_value(byte: u8) -> u64 {
    match byte {
        b'0'..=b'9' => (byte - b'0') as u64,
        b'a'..=b'f' => (byte - b'a' + 10) as u64,
        b'A'..=b'F' => (byte - b'A' + 10) as u64,
        _ => 0,
    }
}

/// Folds an integer literal's bytes into a 64-bit value.
///
/// `tag` selects the base: [`TokenTag::Binary`], [`TokenTag::Hexadecimal`],
/// or anything else for base 10. Base-prefixed lexemes skip their two-byte
/// prefix; `_` separators are skipped everywhere. Overflow wraps.
pub fn parse_integer(lexeme: &[u8], tag: TokenTag) -> u64 {
    let (base, body) = match tag {
        TokenTag::Binary => (2u64, &lexeme[2.min(lexeme.len())..]),
        TokenTag::Hexadecimal => (16u64, &lexeme[2.min(lexeme.len())..]),
        _ => (10u64, lexeme),
    };
    let mut value = 0u64;
    for &byte in body {
        if byte == b'_' {
            continue;
        }
        value = value.wrapping_mul(base).wrapping_add(digit_value(byte));
    }
    value
}

/// Parses a real literal in decimal notation.
pub fn parse_real(lexeme: &[u8], span: Span) -> ParseResult<f64> {
    let cleaned: Vec<u8> = lexeme.iter().copied().filter(|&b| b != b'_').collect();
    std::str::from_utf8(&cleaned)
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or(ParseError::new(ParseErrorKind::MalformedNumber, span))
}

/// Decodes a quoted text literal's escapes into `out`.
///
/// The lexeme includes its quotes; the body between them is processed
/// byte-by-byte. `\b \f \n \r \t \v` map to their control bytes (`\b` is
/// 0x07 in Sable), a `\` followed by a decimal digit run is a decimal byte
/// escape, and any other escaped byte stands for itself. An empty literal
/// is a parse failure.
pub fn parse_text(lexeme: &[u8], span: Span, out: &mut Vec<u8>) -> ParseResult<()> {
    let body = &lexeme[1..lexeme.len().saturating_sub(1)];
    if body.is_empty() {
        return Err(ParseError::new(ParseErrorKind::EmptyText, span));
    }

    let mut i = 0;
    while i < body.len() {
        let byte = body[i];
        if byte != b'\\' {
            out.push(byte);
            i += 1;
            continue;
        }
        i += 1;
        if i >= body.len() {
            break;
        }
        match body[i] {
            b'b' => out.push(0x07),
            b'f' => out.push(0x0c),
            b'n' => out.push(0x0a),
            b'r' => out.push(0x0d),
            b't' => out.push(0x09),
            b'v' => out.push(0x0b),
            b'0'..=b'9' => {
                let mut value = 0u32;
                while i < body.len() && body[i].is_ascii_digit() {
                    value = value.wrapping_mul(10).wrapping_add((body[i] - b'0') as u32);
                    i += 1;
                }
                out.push(value as u8);
                continue;
            }
            other => out.push(other),
        }
        i += 1;
    }
    Ok(())
}
