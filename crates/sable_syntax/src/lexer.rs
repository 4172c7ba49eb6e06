//! The tokenizer: byte stream in, tagged tokens out.
//!
//! [`Lexer`] drives a [`Caret`] over the source and produces one [`Token`]
//! per call to [`next_token`](Lexer::next_token), skipping whitespace and
//! `# `-prefixed line comments. Every token carries the byte span of its
//! lexeme together with the row and column where it begins.
//!
//! The lexer is a value type: the scope parser snapshots it (plus the
//! parser's current token) for its one-token rewinds.
//!
//! ## Lexical rules
//!
//! - names start with `_` or an ASCII letter and continue with letters,
//!   digits, or interior `-`; a trailing `-` is tolerated (the parser treats
//!   the whole run as one name)
//! - `0b` and `0x` select binary and hexadecimal integer bodies; a `.`
//!   inside a plain digit run promotes the token to a real literal; a second
//!   `.`, or any `.` after a base prefix, is a lexical failure
//! - `_` passes through numeric bodies as a visual separator
//! - two adjacent full stops form the `..` token, so `1..10` lexes as
//!   `1` `..` `10` rather than a malformed real
//! - `"` opens a text literal; `\` escapes the next code point; the escape
//!   is resolved later by the literal parser
//! - `#` followed by a space starts a comment running to the newline; a
//!   bare `#` is the `` `#` `` token

use sable_base::Span;

use crate::caret::{Caret, ETX};
use crate::error::{ParseError, ParseErrorKind, ParseResult};
use crate::source::Source;
use crate::token::{Token, TokenTag};

fn is_whitespace(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\x0b' | '\x0c' | '\r' | ' ')
}

fn is_letter(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

fn is_binary(c: char) -> bool {
    c == '0' || c == '1'
}

fn is_digital(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_hexadecimal(c: char) -> bool {
    c.is_ascii_hexdigit()
}

/// The tokenizer. Copyable so the parser can checkpoint and rewind.
#[derive(Clone, Copy)]
pub struct Lexer<'s> {
    caret: Caret<'s>,
}

impl<'s> Lexer<'s> {
    pub fn new(source: &'s Source) -> Self {
        Lexer { caret: Caret::new(source) }
    }

    /// The source this lexer reads.
    pub fn source(&self) -> &'s Source {
        self.caret.source()
    }

    /// Produces the next token, or the ETX token at end of text.
    pub fn next_token(&mut self) -> ParseResult<Token> {
        loop {
            while is_whitespace(self.caret.character) {
                self.caret.advance();
            }

            let start = self.caret.location();
            let begin = |end: usize| Span::new(start.position, end, start.row, start.column);

            let c = self.caret.character;

            if c == '#' {
                self.caret.advance();
                if self.caret.character == ' ' {
                    while self.caret.character != '\n' && self.caret.character != ETX {
                        self.caret.advance();
                    }
                    continue;
                }
                return Ok(Token::new(TokenTag::Hash, begin(self.caret.position())));
            }

            if is_letter(c) {
                while is_letter(self.caret.character)
                    || is_digital(self.caret.character)
                    || self.caret.character == '-'
                {
                    self.caret.advance();
                }
                return Ok(Token::new(TokenTag::Name, begin(self.caret.position())));
            }

            if is_digital(c) {
                return self.lex_number(start.position, start.row, start.column);
            }

            if c == '"' {
                return self.lex_text(start.position, start.row, start.column);
            }

            if c == ETX {
                return Ok(Token::new(TokenTag::Etx, begin(start.position)));
            }

            let tag = self.lex_punctuation(c, start.position, start.row, start.column)?;
            return Ok(Token::new(tag, begin(self.caret.position())));
        }
    }

    fn lex_number(&mut self, start: usize, row: usize, column: usize) -> ParseResult<Token> {
        let mut tag = TokenTag::Digital;
        let mut body: fn(char) -> bool = is_digital;

        if self.caret.character == '0' {
            match self.caret.advance() {
                'b' => {
                    tag = TokenTag::Binary;
                    body = is_binary;
                    self.caret.advance();
                }
                'x' => {
                    tag = TokenTag::Hexadecimal;
                    body = is_hexadecimal;
                    self.caret.advance();
                }
                _ => {}
            }
        }

        loop {
            let c = self.caret.character;
            if body(c) || c == '_' {
                self.caret.advance();
                continue;
            }
            if c == '.' {
                // leave both dots of a range operator for the next token
                if self.caret.peek() == '.' {
                    break;
                }
                match tag {
                    TokenTag::Decimal | TokenTag::Binary | TokenTag::Hexadecimal => {
                        let span = Span::new(start, self.caret.position(), row, column);
                        return Err(ParseError::new(ParseErrorKind::MalformedNumber, span));
                    }
                    _ => {
                        tag = TokenTag::Decimal;
                        self.caret.advance();
                    }
                }
                continue;
            }
            break;
        }

        let span = Span::new(start, self.caret.position(), row, column);
        Ok(Token::new(tag, span))
    }

    fn lex_text(&mut self, start: usize, row: usize, column: usize) -> ParseResult<Token> {
        loop {
            match self.caret.advance() {
                '\\' => {
                    self.caret.advance();
                }
                ETX => {
                    let span = Span::new(start, self.caret.position(), row, column);
                    return Err(ParseError::new(ParseErrorKind::UnterminatedText, span));
                }
                '"' => break,
                _ => {}
            }
        }
        self.caret.advance();
        let span = Span::new(start, self.caret.position(), row, column);
        Ok(Token::new(TokenTag::Text, span))
    }

    fn lex_punctuation(
        &mut self,
        c: char,
        start: usize,
        row: usize,
        column: usize,
    ) -> ParseResult<TokenTag> {
        // operators whose second code point may extend them
        if matches!(c, '!' | '%' | '&' | '*' | '+' | '-' | '/' | '<' | '=' | '>' | '^' | '|') {
            let second = self.caret.peek();
            if second == '=' {
                let tag = match c {
                    '!' => TokenTag::BangEq,
                    '%' => TokenTag::PercentEq,
                    '&' => TokenTag::AmpEq,
                    '*' => TokenTag::StarEq,
                    '+' => TokenTag::PlusEq,
                    '-' => TokenTag::MinusEq,
                    '/' => TokenTag::SlashEq,
                    '<' => TokenTag::LtEq,
                    '=' => TokenTag::EqEq,
                    '>' => TokenTag::GtEq,
                    '^' => TokenTag::CaretEq,
                    _ => TokenTag::PipeEq,
                };
                self.caret.advance();
                self.caret.advance();
                return Ok(tag);
            }
            if second == c && matches!(c, '&' | '|') {
                self.caret.advance();
                self.caret.advance();
                return Ok(if c == '&' { TokenTag::AmpAmp } else { TokenTag::PipePipe });
            }
            if second == c && matches!(c, '<' | '>') {
                self.caret.advance();
                let tag = if self.caret.peek() == '=' {
                    self.caret.advance();
                    if c == '<' { TokenTag::ShlEq } else { TokenTag::ShrEq }
                } else if c == '<' {
                    TokenTag::Shl
                } else {
                    TokenTag::Shr
                };
                self.caret.advance();
                return Ok(tag);
            }
            if c == '-' && second == '>' {
                self.caret.advance();
                self.caret.advance();
                return Ok(TokenTag::Arrow);
            }
        }

        if c == '.' && self.caret.peek() == '.' {
            self.caret.advance();
            self.caret.advance();
            return Ok(TokenTag::DotDot);
        }

        let tag = match c {
            '!' => TokenTag::Bang,
            '$' => TokenTag::Dollar,
            '%' => TokenTag::Percent,
            '&' => TokenTag::Ampersand,
            '\'' => TokenTag::Apostrophe,
            '(' => TokenTag::LParen,
            ')' => TokenTag::RParen,
            '*' => TokenTag::Star,
            '+' => TokenTag::Plus,
            ',' => TokenTag::Comma,
            '-' => TokenTag::Minus,
            '.' => TokenTag::Dot,
            '/' => TokenTag::Slash,
            ':' => TokenTag::Colon,
            ';' => TokenTag::Semicolon,
            '<' => TokenTag::Lt,
            '=' => TokenTag::Eq,
            '>' => TokenTag::Gt,
            '?' => TokenTag::Question,
            '@' => TokenTag::At,
            '[' => TokenTag::LBracket,
            '\\' => TokenTag::Backslash,
            ']' => TokenTag::RBracket,
            '^' => TokenTag::Caret,
            '`' => TokenTag::Backtick,
            '{' => TokenTag::LBrace,
            '|' => TokenTag::Pipe,
            '}' => TokenTag::RBrace,
            '~' => TokenTag::Tilde,
            _ => {
                self.caret.advance();
                let span = Span::new(start, self.caret.position(), row, column);
                return Err(ParseError::new(
                    ParseErrorKind::UnknownCharacter { character: c },
                    span,
                ));
            }
        };
        self.caret.advance();
        Ok(tag)
    }
}
