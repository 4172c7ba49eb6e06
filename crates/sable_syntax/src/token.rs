//! Token types for the Sable tokenizer and parser.
//!
//! A [`Token`] is a lexical tag plus the byte span of its lexeme. Tokens
//! carry no owned storage: literal values are recovered from the source
//! bytes by the literal parsers when the expression parser needs them.
//!
//! ## Token Categories
//!
//! | Category | Examples |
//! |----------|----------|
//! | Punctuation singletons | `(` `)` `;` `@` `~` and every other ASCII punctuation |
//! | Compound operators | `!=` `&&` `<<=` `->` `..` |
//! | Names | `main`, `loop-count`, `_x1` |
//! | Number literals | `0b1010`, `42`, `0xff`, `3.14` |
//! | Text literals | `"hello\n"` |
//! | End of text | ETX |

use std::fmt;

use sable_base::Span;

/// The closed set of lexical categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenTag {
    // Punctuation singletons
    /// `!`
    Bang,
    /// `#`
    Hash,
    /// `$`
    Dollar,
    /// `%`
    Percent,
    /// `&`
    Ampersand,
    /// `'`
    Apostrophe,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `*`
    Star,
    /// `+`
    Plus,
    /// `,`
    Comma,
    /// `-`
    Minus,
    /// `.`
    Dot,
    /// `/`
    Slash,
    /// `:`
    Colon,
    /// `;`
    Semicolon,
    /// `<`
    Lt,
    /// `=`
    Eq,
    /// `>`
    Gt,
    /// `?`
    Question,
    /// `@`
    At,
    /// `[`
    LBracket,
    /// `\`
    Backslash,
    /// `]`
    RBracket,
    /// `^`
    Caret,
    /// `` ` ``
    Backtick,
    /// `{`
    LBrace,
    /// `|`
    Pipe,
    /// `}`
    RBrace,
    /// `~`
    Tilde,

    // Compound operators
    /// `!=`
    BangEq,
    /// `%=`
    PercentEq,
    /// `&=`
    AmpEq,
    /// `&&`
    AmpAmp,
    /// `*=`
    StarEq,
    /// `+=`
    PlusEq,
    /// `-=`
    MinusEq,
    /// `->`
    Arrow,
    /// `..`
    DotDot,
    /// `/=`
    SlashEq,
    /// `<=`
    LtEq,
    /// `<<`
    Shl,
    /// `<<=`
    ShlEq,
    /// `==`
    EqEq,
    /// `>=`
    GtEq,
    /// `>>`
    Shr,
    /// `>>=`
    ShrEq,
    /// `^=`
    CaretEq,
    /// `|=`
    PipeEq,
    /// `||`
    PipePipe,

    // Names and literals
    /// Identifier: `_` or ASCII letter, then letters, digits, interior `-`.
    Name,
    /// Binary integer literal: `0b1010`.
    Binary,
    /// Decimal integer literal: `42`.
    Digital,
    /// Hexadecimal integer literal: `0xff`.
    Hexadecimal,
    /// Real literal: `3.14`.
    Decimal,
    /// Quoted text literal: `"hello"`.
    Text,

    /// End of text.
    Etx,
}

impl fmt::Display for TokenTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let representation = match self {
            TokenTag::Bang => "`!`",
            TokenTag::Hash => "`#`",
            TokenTag::Dollar => "`$`",
            TokenTag::Percent => "`%`",
            TokenTag::Ampersand => "`&`",
            TokenTag::Apostrophe => "`'`",
            TokenTag::LParen => "`(`",
            TokenTag::RParen => "`)`",
            TokenTag::Star => "`*`",
            TokenTag::Plus => "`+`",
            TokenTag::Comma => "`,`",
            TokenTag::Minus => "`-`",
            TokenTag::Dot => "`.`",
            TokenTag::Slash => "`/`",
            TokenTag::Colon => "`:`",
            TokenTag::Semicolon => "`;`",
            TokenTag::Lt => "`<`",
            TokenTag::Eq => "`=`",
            TokenTag::Gt => "`>`",
            TokenTag::Question => "`?`",
            TokenTag::At => "`@`",
            TokenTag::LBracket => "`[`",
            TokenTag::Backslash => "`\\`",
            TokenTag::RBracket => "`]`",
            TokenTag::Caret => "`^`",
            TokenTag::Backtick => "```",
            TokenTag::LBrace => "`{`",
            TokenTag::Pipe => "`|`",
            TokenTag::RBrace => "`}`",
            TokenTag::Tilde => "`~`",
            TokenTag::BangEq => "`!=`",
            TokenTag::PercentEq => "`%=`",
            TokenTag::AmpEq => "`&=`",
            TokenTag::AmpAmp => "`&&`",
            TokenTag::StarEq => "`*=`",
            TokenTag::PlusEq => "`+=`",
            TokenTag::MinusEq => "`-=`",
            TokenTag::Arrow => "`->`",
            TokenTag::DotDot => "`..`",
            TokenTag::SlashEq => "`/=`",
            TokenTag::LtEq => "`<=`",
            TokenTag::Shl => "`<<`",
            TokenTag::ShlEq => "`<<=`",
            TokenTag::EqEq => "`==`",
            TokenTag::GtEq => "`>=`",
            TokenTag::Shr => "`>>`",
            TokenTag::ShrEq => "`>>=`",
            TokenTag::CaretEq => "`^=`",
            TokenTag::PipeEq => "`|=`",
            TokenTag::PipePipe => "`||`",
            TokenTag::Name => "name",
            TokenTag::Binary => "binary",
            TokenTag::Digital => "digital",
            TokenTag::Hexadecimal => "hexadecimal",
            TokenTag::Decimal => "decimal",
            TokenTag::Text => "text",
            TokenTag::Etx => "ETX",
        };
        f.write_str(representation)
    }
}

/// One token: its lexical tag and the byte span of its lexeme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub tag: TokenTag,
    pub span: Span,
}

impl Token {
    pub fn new(tag: TokenTag, span: Span) -> Self {
        Token { tag, span }
    }
}
