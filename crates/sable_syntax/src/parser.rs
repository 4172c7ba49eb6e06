//! The expression and scope parser.
//!
//! Expressions are parsed by precedence climbing: every infix operator
//! carries a precedence, and the main loop consumes operators while their
//! precedence is strictly greater than the caller's minimum, which makes
//! operators of equal precedence left-associative. Prefix dispatch is by
//! the current token; any non-operator token following a complete left
//! operand is treated as juxtaposition and synthesizes an invocation.
//!
//! ## Operator table
//!
//! | Precedence | Operators |
//! |---|---|
//! | 16 | `.` |
//! | 15 | invocation, `->` |
//! | 14 | unary prefixes |
//! | 13 | `*` `/` `%` |
//! | 12 | `+` `-` |
//! | 11 | `<<` `>>` |
//! | 10 | `>` `<` `>=` `<=` |
//! | 9  | `==` `!=` |
//! | 8  | `&` |
//! | 7  | `^` |
//! | 6  | `\|` |
//! | 5  | `&&` |
//! | 4  | `\|\|` |
//! | 3  | `..` `?` `=` and compound assignments |
//! | 2  | `:` |
//! | 1  | `,` |
//!
//! The pseudo-precedence [`DECLARATION`] sits outside the table: it stops
//! before the assignment family, `,`, and `:` but admits every other infix
//! operator. The type sub-expression of a value declaration parses at this
//! level so composite type syntax (`@int`, `[8]int`, `(a: int) -> int`)
//! reads naturally while the declaration's own `=`, `,`, or `:` stays
//! unconsumed.
//!
//! Scope parsing drives the statement loop over the same machinery, using
//! a one-token checkpoint/rewind to tell declarations from expression
//! statements.

use sable_base::{Interner, Span, Symbol};

use crate::arenas::AstArenas;
use crate::ast::{BinaryOp, Expr, ExprKind, Label, Routine, Scope, Stmt, UnaryOp, Value};
use crate::error::{ParseError, ParseErrorKind, ParseResult};
use crate::lexer::Lexer;
use crate::literal;
use crate::source::Source;
use crate::token::{Token, TokenTag};

/// Operator binding strength; larger binds tighter.
pub type Precedence = u8;

/// Pseudo-precedence for type expressions, initializers, and routine
/// parameters: stops cleanly at `=`, `,`, and `:`.
pub const DECLARATION: Precedence = u8::MAX;

const PREFIX_PRECEDENCE: Precedence = 14;
const INVOCATION_PRECEDENCE: Precedence = 15;
const CONDITION_PRECEDENCE: Precedence = 3;

fn precedence_of(op: BinaryOp) -> Precedence {
    match op {
        BinaryOp::Resolution => 16,
        BinaryOp::Invocation | BinaryOp::Lambda => 15,
        BinaryOp::Multiplication | BinaryOp::Division | BinaryOp::Remainder => 13,
        BinaryOp::Addition | BinaryOp::Subtraction => 12,
        BinaryOp::ShiftLeft | BinaryOp::ShiftRight => 11,
        BinaryOp::Greater
        | BinaryOp::Lesser
        | BinaryOp::GreaterEquality
        | BinaryOp::LesserEquality => 10,
        BinaryOp::Equality | BinaryOp::Inequality => 9,
        BinaryOp::And => 8,
        BinaryOp::Xor => 7,
        BinaryOp::Or => 6,
        BinaryOp::Conjunction => 5,
        BinaryOp::Disjunction => 4,
        BinaryOp::Range => 3,
        op if op.is_assignment() => 3,
        BinaryOp::Field => 2,
        BinaryOp::List => 1,
        _ => unreachable!("assignment arm covers the rest"),
    }
}

/// The infix operator a token denotes, if any.
fn infix_op(tag: TokenTag) -> Option<BinaryOp> {
    match tag {
        TokenTag::Dot => Some(BinaryOp::Resolution),
        TokenTag::Arrow => Some(BinaryOp::Lambda),
        TokenTag::Star => Some(BinaryOp::Multiplication),
        TokenTag::Slash => Some(BinaryOp::Division),
        TokenTag::Percent => Some(BinaryOp::Remainder),
        TokenTag::Plus => Some(BinaryOp::Addition),
        TokenTag::Minus => Some(BinaryOp::Subtraction),
        TokenTag::Shl => Some(BinaryOp::ShiftLeft),
        TokenTag::Shr => Some(BinaryOp::ShiftRight),
        TokenTag::Gt => Some(BinaryOp::Greater),
        TokenTag::Lt => Some(BinaryOp::Lesser),
        TokenTag::GtEq => Some(BinaryOp::GreaterEquality),
        TokenTag::LtEq => Some(BinaryOp::LesserEquality),
        TokenTag::EqEq => Some(BinaryOp::Equality),
        TokenTag::BangEq => Some(BinaryOp::Inequality),
        TokenTag::Ampersand => Some(BinaryOp::And),
        TokenTag::Caret => Some(BinaryOp::Xor),
        TokenTag::Pipe => Some(BinaryOp::Or),
        TokenTag::AmpAmp => Some(BinaryOp::Conjunction),
        TokenTag::PipePipe => Some(BinaryOp::Disjunction),
        TokenTag::DotDot => Some(BinaryOp::Range),
        TokenTag::Eq => Some(BinaryOp::Assignment),
        TokenTag::PlusEq => Some(BinaryOp::AdditionAssignment),
        TokenTag::MinusEq => Some(BinaryOp::SubtractionAssignment),
        TokenTag::StarEq => Some(BinaryOp::MultiplicationAssignment),
        TokenTag::SlashEq => Some(BinaryOp::DivisionAssignment),
        TokenTag::PercentEq => Some(BinaryOp::RemainderAssignment),
        TokenTag::AmpEq => Some(BinaryOp::AndAssignment),
        TokenTag::PipeEq => Some(BinaryOp::OrAssignment),
        TokenTag::CaretEq => Some(BinaryOp::XorAssignment),
        TokenTag::ShlEq => Some(BinaryOp::ShiftLeftAssignment),
        TokenTag::ShrEq => Some(BinaryOp::ShiftRightAssignment),
        TokenTag::Colon => Some(BinaryOp::Field),
        TokenTag::Comma => Some(BinaryOp::List),
        _ => None,
    }
}

/// Tokens that end an expression without being consumed. A bare `!` is
/// among them so the consequence of `a ? b ! c` terminates cleanly.
fn is_expression_terminator(tag: TokenTag) -> bool {
    matches!(
        tag,
        TokenTag::Semicolon
            | TokenTag::RParen
            | TokenTag::RBracket
            | TokenTag::LBrace
            | TokenTag::RBrace
            | TokenTag::Bang
            | TokenTag::Etx
    )
}

/// Whether an operator about to be consumed at `minimum` stops the loop.
fn stops(minimum: Precedence, op: BinaryOp) -> bool {
    if minimum == DECLARATION {
        op.is_assignment() || matches!(op, BinaryOp::List | BinaryOp::Field)
    } else {
        precedence_of(op) <= minimum
    }
}

/// A saved parser position for the scope parser's one-token rewinds.
pub struct ParserCheckpoint<'s> {
    lexer: Lexer<'s>,
    token: Token,
}

/// The parser: one tokenizer, one current token, the arena bundle, and the
/// interner for names.
pub struct Parser<'s, 'a, 'i> {
    lexer: Lexer<'s>,
    token: Token,
    arenas: AstArenas<'a>,
    interner: &'i mut Interner,
}

impl<'s, 'a, 'i> Parser<'s, 'a, 'i> {
    /// Creates a parser over `source`, primed on the first token.
    pub fn new(
        source: &'s Source,
        arenas: AstArenas<'a>,
        interner: &'i mut Interner,
    ) -> ParseResult<Self> {
        let mut lexer = Lexer::new(source);
        let token = lexer.next_token()?;
        Ok(Parser { lexer, token, arenas, interner })
    }

    fn advance(&mut self) -> ParseResult<()> {
        self.token = self.lexer.next_token()?;
        Ok(())
    }

    fn checkpoint(&self) -> ParserCheckpoint<'s> {
        ParserCheckpoint { lexer: self.lexer, token: self.token }
    }

    fn restore(&mut self, checkpoint: ParserCheckpoint<'s>) {
        self.lexer = checkpoint.lexer;
        self.token = checkpoint.token;
    }

    fn intern_name(&mut self, span: Span) -> Symbol {
        self.interner.intern_bytes(self.lexer.source().slice(span))
    }

    /// Parses one expression at the given minimum precedence.
    pub fn parse_expression(&mut self, minimum: Precedence) -> ParseResult<&'a Expr<'a>> {
        let mut left = self.parse_prefix()?;

        loop {
            let tag = self.token.tag;
            if is_expression_terminator(tag) {
                break;
            }

            if tag == TokenTag::Question {
                if minimum != DECLARATION && CONDITION_PRECEDENCE <= minimum {
                    break;
                }
                self.advance()?;
                // precedence 0 so the `!` separator terminates the branch
                let consequence = self.parse_expression(0)?;
                let alternative = if self.token.tag == TokenTag::Bang {
                    self.advance()?;
                    Some(self.parse_expression(CONDITION_PRECEDENCE)?)
                } else {
                    None
                };
                let end = alternative.unwrap_or(consequence).span;
                left = self.arenas.condition(
                    left,
                    consequence,
                    alternative,
                    left.span.to(end),
                );
                continue;
            }

            if let Some(op) = infix_op(tag) {
                if stops(minimum, op) {
                    break;
                }
                self.advance()?;
                let right = self.parse_expression(precedence_of(op))?;
                left = self.arenas.binary(op, left, right);
                continue;
            }

            // juxtaposition: a second complete expression is an invocation
            if minimum != DECLARATION && INVOCATION_PRECEDENCE <= minimum {
                break;
            }
            let right = self.parse_expression(INVOCATION_PRECEDENCE)?;
            left = self.arenas.binary(BinaryOp::Invocation, left, right);
        }

        Ok(left)
    }

    fn parse_prefix(&mut self) -> ParseResult<&'a Expr<'a>> {
        let token = self.token;
        match token.tag {
            TokenTag::Binary | TokenTag::Digital | TokenTag::Hexadecimal => {
                let value =
                    literal::parse_integer(self.lexer.source().slice(token.span), token.tag);
                self.advance()?;
                Ok(self.arenas.integer(value, token.span))
            }
            TokenTag::Decimal => {
                let value =
                    literal::parse_real(self.lexer.source().slice(token.span), token.span)?;
                self.advance()?;
                Ok(self.arenas.alloc_expr(token.span, ExprKind::Real(value)))
            }
            TokenTag::Text => {
                let mut decoded = Vec::new();
                literal::parse_text(
                    self.lexer.source().slice(token.span),
                    token.span,
                    &mut decoded,
                )?;
                self.advance()?;
                let bytes = self.arenas.alloc_text(&decoded);
                Ok(self.arenas.alloc_expr(token.span, ExprKind::Text(bytes)))
            }
            TokenTag::Name => {
                let symbol = self.intern_name(token.span);
                self.advance()?;
                Ok(self.arenas.alloc_expr(token.span, ExprKind::Reference(symbol)))
            }
            TokenTag::LParen => {
                self.parse_enclosed(UnaryOp::Subexpression, TokenTag::RParen)
            }
            TokenTag::LBracket => {
                self.parse_enclosed(UnaryOp::Enumeration, TokenTag::RBracket)
            }
            TokenTag::Minus => self.parse_prefix_operator(UnaryOp::Negative),
            TokenTag::Bang => self.parse_prefix_operator(UnaryOp::Negation),
            TokenTag::Tilde => self.parse_prefix_operator(UnaryOp::BitwiseNot),
            TokenTag::At => self.parse_prefix_operator(UnaryOp::Address),
            TokenTag::Backslash => self.parse_prefix_operator(UnaryOp::Indirection),
            TokenTag::Caret => self.parse_prefix_operator(UnaryOp::Jump),
            TokenTag::Apostrophe => self.parse_prefix_operator(UnaryOp::Inference),
            TokenTag::Dot => self.parse_prefix_operator(UnaryOp::Designation),
            TokenTag::Semicolon
            | TokenTag::RParen
            | TokenTag::RBracket
            | TokenTag::LBrace
            | TokenTag::RBrace
            | TokenTag::Etx => {
                let span =
                    Span::new(token.span.start, token.span.start, token.span.row, token.span.column);
                Ok(self.arenas.nil(span))
            }
            found => Err(ParseError::new(
                ParseErrorKind::UnexpectedToken { found },
                token.span,
            )),
        }
    }

    fn parse_enclosed(
        &mut self,
        op: UnaryOp,
        closer: TokenTag,
    ) -> ParseResult<&'a Expr<'a>> {
        let begin = self.token.span;
        self.advance()?;
        let inner = self.parse_expression(0)?;
        if self.token.tag != closer {
            return Err(ParseError::new(
                ParseErrorKind::MissingCloser { expected: closer, found: self.token.tag },
                self.token.span,
            ));
        }
        let end = self.token.span;
        self.advance()?;
        Ok(self.arenas.unary(op, inner, begin.to(end)))
    }

    fn parse_prefix_operator(&mut self, op: UnaryOp) -> ParseResult<&'a Expr<'a>> {
        let begin = self.token.span;
        self.advance()?;
        let operand = self.parse_expression(PREFIX_PRECEDENCE)?;
        Ok(self.arenas.unary(op, operand, begin.to(operand.span)))
    }

    /// Parses a whole compilation unit as one implicit scope, terminated by
    /// end of text.
    pub fn parse_program(&mut self) -> ParseResult<&'a Scope<'a>> {
        let begin = self.token.span;
        self.parse_scope_body(TokenTag::Etx, begin)
    }

    /// Parses a braced scope; the current token must be `{`.
    fn parse_scope(&mut self) -> ParseResult<&'a Scope<'a>> {
        let begin = self.token.span;
        self.advance()?;
        self.parse_scope_body(TokenTag::RBrace, begin)
    }

    fn parse_scope_body(
        &mut self,
        closer: TokenTag,
        begin: Span,
    ) -> ParseResult<&'a Scope<'a>> {
        let mut statements: Vec<Stmt<'a>> = Vec::new();
        let mut values: Vec<&'a Value<'a>> = Vec::new();
        let mut labels: Vec<Label> = Vec::new();
        let mut routines: Vec<Routine<'a>> = Vec::new();

        let end;
        loop {
            let tag = self.token.tag;
            if tag == closer {
                end = self.token.span;
                if closer == TokenTag::RBrace {
                    self.advance()?;
                }
                break;
            }
            match tag {
                TokenTag::Etx => {
                    return Err(ParseError::new(
                        ParseErrorKind::MissingCloser { expected: closer, found: tag },
                        self.token.span,
                    ));
                }
                TokenTag::Semicolon => {
                    self.advance()?;
                }
                TokenTag::LBrace => {
                    let scope = self.parse_scope()?;
                    statements.push(Stmt::Scope(scope));
                }
                TokenTag::Name => {
                    let checkpoint = self.checkpoint();
                    self.advance()?;
                    let is_declaration = self.token.tag == TokenTag::Colon;
                    self.restore(checkpoint);
                    if is_declaration {
                        let value = self.parse_value()?;
                        values.push(value);
                        // constants and uninitialised declarations do not execute
                        if !value.constant && value.initializer.is_some() {
                            statements.push(Stmt::Value(value));
                        }
                    } else {
                        let expr = self.parse_expression(0)?;
                        statements.push(Stmt::Expr(expr));
                    }
                }
                TokenTag::Dot => {
                    let checkpoint = self.checkpoint();
                    self.advance()?;
                    if self.token.tag == TokenTag::Name {
                        let identifier = self.intern_name(self.token.span);
                        self.advance()?;
                        if self.token.tag == TokenTag::Colon {
                            self.advance()?;
                            if self.token.tag == TokenTag::LParen {
                                let parameters = self.parse_expression(DECLARATION)?;
                                let scope = if self.token.tag == TokenTag::LBrace {
                                    Some(self.parse_scope()?)
                                } else {
                                    None
                                };
                                routines.push(Routine { identifier, parameters, scope });
                            } else {
                                labels
                                    .push(Label { identifier, position: statements.len() });
                            }
                        } else {
                            labels.push(Label { identifier, position: statements.len() });
                        }
                    } else {
                        self.restore(checkpoint);
                        let expr = self.parse_expression(0)?;
                        statements.push(Stmt::Expr(expr));
                    }
                }
                TokenTag::RBrace | TokenTag::RParen | TokenTag::RBracket => {
                    return Err(ParseError::new(
                        ParseErrorKind::UnexpectedToken { found: tag },
                        self.token.span,
                    ));
                }
                _ => {
                    let expr = self.parse_expression(0)?;
                    statements.push(Stmt::Expr(expr));
                }
            }
        }

        Ok(self
            .arenas
            .alloc_scope(begin.to(end), statements, values, labels, routines))
    }

    /// Parses one value declaration; the current token must be its name.
    fn parse_value(&mut self) -> ParseResult<&'a Value<'a>> {
        let name_token = self.token;
        if name_token.tag != TokenTag::Name {
            return Err(ParseError::new(
                ParseErrorKind::ExpectedName { found: name_token.tag },
                name_token.span,
            ));
        }
        let identifier = self.intern_name(name_token.span);
        self.advance()?;

        if self.token.tag != TokenTag::Colon {
            return Err(ParseError::new(
                ParseErrorKind::ExpectedColon { found: self.token.tag },
                self.token.span,
            ));
        }
        self.advance()?;

        let type_expr = match self.token.tag {
            TokenTag::Eq | TokenTag::Colon => None,
            _ => {
                let expr = self.parse_expression(DECLARATION)?;
                if expr.is_nil() { None } else { Some(expr) }
            }
        };

        let (constant, initializer) = match self.token.tag {
            TokenTag::Colon => {
                self.advance()?;
                (true, Some(self.parse_initializer()?))
            }
            TokenTag::Eq => {
                self.advance()?;
                (false, Some(self.parse_initializer()?))
            }
            _ => {
                if type_expr.is_none() {
                    return Err(ParseError::new(
                        ParseErrorKind::UntypedUninitialized,
                        name_token.span.to(self.token.span),
                    ));
                }
                (false, None)
            }
        };

        let end = initializer.or(type_expr).map(|e| e.span).unwrap_or(name_token.span);
        Ok(self.arenas.alloc_value(Value {
            span: name_token.span.to(end),
            identifier,
            type_expr,
            initializer,
            constant,
        }))
    }

    fn parse_initializer(&mut self) -> ParseResult<&'a Expr<'a>> {
        let expr = self.parse_expression(DECLARATION)?;
        if expr.is_nil() {
            return Err(ParseError::new(
                ParseErrorKind::UnexpectedToken { found: self.token.tag },
                self.token.span,
            ));
        }
        Ok(expr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sable_base::{Arena, ByteArena};

    fn with_parser(
        text: &str,
        run: impl for<'a> FnOnce(&mut Parser<'_, 'a, '_>, &AstArenas<'a>),
    ) {
        let source = Source::from_bytes("parse.sb", text.as_bytes().to_vec()).unwrap();
        let exprs = Arena::new();
        let values = Arena::new();
        let scopes = Arena::new();
        let stmts = Arena::new();
        let value_lists = Arena::new();
        let labels = Arena::new();
        let routines = Arena::new();
        let byte_arena = ByteArena::new();
        let arenas = AstArenas::new(
            &exprs, &values, &scopes, &stmts, &value_lists, &labels, &routines, &byte_arena,
        );
        let mut interner = Interner::new();
        let mut parser = Parser::new(&source, arenas, &mut interner).unwrap();
        run(&mut parser, &arenas);
    }

    fn render(expr: &Expr<'_>, parser: &Parser<'_, '_, '_>) -> String {
        match &expr.kind {
            ExprKind::Nil => "nil".to_string(),
            ExprKind::Integer(v) => format!("integer({v})"),
            ExprKind::Real(v) => format!("real({v})"),
            ExprKind::Text(bytes) => {
                format!("string({})", String::from_utf8_lossy(bytes))
            }
            ExprKind::Reference(sym) => {
                format!("reference({})", parser.interner.resolve(*sym))
            }
            ExprKind::Unary { op, operand } => {
                format!("{}({})", op.name(), render(operand, parser))
            }
            ExprKind::Binary { op, left, right } => {
                format!("{}({},{})", op.name(), render(left, parser), render(right, parser))
            }
            ExprKind::Condition { condition, consequence, alternative } => format!(
                "condition({},{},{})",
                render(condition, parser),
                render(consequence, parser),
                alternative.map_or("nil".to_string(), |a| render(a, parser))
            ),
        }
    }

    fn parsed(text: &str) -> String {
        let mut result = String::new();
        with_parser(text, |parser, _| {
            let expr = parser.parse_expression(0).unwrap();
            result = render(expr, parser);
        });
        result
    }

    fn parse_failure(text: &str) -> ParseErrorKind {
        let mut kind = None;
        with_parser(text, |parser, _| {
            kind = Some(parser.parse_expression(0).unwrap_err().kind);
        });
        kind.unwrap()
    }

    #[test]
    fn literals_parse_to_leaves() {
        assert_eq!(parsed("42"), "integer(42)");
        assert_eq!(parsed("0b101"), "integer(5)");
        assert_eq!(parsed("0x10"), "integer(16)");
        assert_eq!(parsed("2.5"), "real(2.5)");
        assert_eq!(parsed("\"hi\\n\""), "string(hi\n)");
        assert_eq!(parsed("counter"), "reference(counter)");
    }

    #[test]
    fn subtraction_is_left_associative() {
        assert_eq!(
            parsed("a - b - c"),
            "subtraction(subtraction(reference(a),reference(b)),reference(c))"
        );
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        assert_eq!(
            parsed("1 + 2 * 3"),
            "addition(integer(1),multiplication(integer(2),integer(3)))"
        );
        assert_eq!(
            parsed("1 * 2 + 3"),
            "addition(multiplication(integer(1),integer(2)),integer(3))"
        );
    }

    #[test]
    fn equality_binds_tighter_than_bitwise_and() {
        // unusual but the table says so
        assert_eq!(
            parsed("a & b == c"),
            "and(reference(a),equality(reference(b),reference(c)))"
        );
    }

    #[test]
    fn shifts_sit_between_additive_and_relational() {
        assert_eq!(
            parsed("a + b << c < d"),
            "lesser(lsh(addition(reference(a),reference(b)),reference(c)),reference(d))"
        );
    }

    #[test]
    fn logical_operators_nest_under_bitwise() {
        assert_eq!(
            parsed("a & b && c | d"),
            "conjunction(and(reference(a),reference(b)),or(reference(c),reference(d)))"
        );
        assert_eq!(
            parsed("a && b || c"),
            "disjunction(conjunction(reference(a),reference(b)),reference(c))"
        );
    }

    #[test]
    fn assignments_chain_left() {
        assert_eq!(
            parsed("x = y = z"),
            "assignment(assignment(reference(x),reference(y)),reference(z))"
        );
        assert_eq!(
            parsed("x += 1"),
            "addition_assignment(reference(x),integer(1))"
        );
    }

    #[test]
    fn list_binds_loosest() {
        assert_eq!(
            parsed("a, b = c, d"),
            "list(list(reference(a),assignment(reference(b),reference(c))),reference(d))"
        );
    }

    #[test]
    fn range_parses_between_integers() {
        assert_eq!(parsed("1..10"), "range(integer(1),integer(10))");
    }

    #[test]
    fn conditional_with_both_branches() {
        assert_eq!(
            parsed("a ? b ! c"),
            "condition(reference(a),reference(b),reference(c))"
        );
    }

    #[test]
    fn conditional_without_alternative() {
        assert_eq!(parsed("a ? b"), "condition(reference(a),reference(b),nil)");
    }

    #[test]
    fn conditional_consequence_can_be_compound() {
        assert_eq!(
            parsed("a ? b + c ! d"),
            "condition(reference(a),addition(reference(b),reference(c)),reference(d))"
        );
    }

    #[test]
    fn prefix_operators_bind_tighter_than_infix() {
        assert_eq!(
            parsed("-a * b"),
            "multiplication(negative(reference(a)),reference(b))"
        );
        assert_eq!(parsed("!a && b"), "conjunction(negation(reference(a)),reference(b))");
        assert_eq!(parsed("~x | y"), "or(not(reference(x)),reference(y))");
    }

    #[test]
    fn prefix_operators_reach_through_resolution() {
        assert_eq!(
            parsed("-a.b"),
            "negative(resolution(reference(a),reference(b)))"
        );
    }

    #[test]
    fn remaining_prefixes_parse() {
        assert_eq!(parsed("@p"), "address(reference(p))");
        assert_eq!(parsed("\\p"), "indirection(reference(p))");
        assert_eq!(parsed("^exit"), "jump(reference(exit))");
        assert_eq!(parsed("'t"), "inference(reference(t))");
        assert_eq!(parsed(".x"), "designation(reference(x))");
    }

    #[test]
    fn juxtaposition_synthesizes_invocation() {
        assert_eq!(parsed("f x"), "invocation(reference(f),reference(x))");
        assert_eq!(
            parsed("f x y"),
            "invocation(invocation(reference(f),reference(x)),reference(y))"
        );
    }

    #[test]
    fn call_with_parenthesized_argument() {
        assert_eq!(
            parsed("print(1)"),
            "invocation(reference(print),subexpression(integer(1)))"
        );
    }

    #[test]
    fn invocation_argument_admits_resolution() {
        assert_eq!(
            parsed("f a.b"),
            "invocation(reference(f),resolution(reference(a),reference(b)))"
        );
    }

    #[test]
    fn array_type_is_enumeration_invocation() {
        assert_eq!(
            parsed("[8]int"),
            "invocation(enumeration(integer(8)),reference(int))"
        );
    }

    #[test]
    fn lambda_type_shape() {
        assert_eq!(
            parsed("(a: int) -> int"),
            "lambda(subexpression(field(reference(a),reference(int))),reference(int))"
        );
    }

    #[test]
    fn empty_groups_hold_nil() {
        assert_eq!(parsed("()"), "subexpression(nil)");
        assert_eq!(parsed("[]"), "enumeration(nil)");
    }

    #[test]
    fn missing_closer_is_reported() {
        assert!(matches!(
            parse_failure("(1 + 2"),
            ParseErrorKind::MissingCloser { expected: TokenTag::RParen, .. }
        ));
        assert!(matches!(
            parse_failure("[1"),
            ParseErrorKind::MissingCloser { expected: TokenTag::RBracket, .. }
        ));
    }

    #[test]
    fn junk_token_is_unexpected() {
        assert!(matches!(
            parse_failure("$"),
            ParseErrorKind::UnexpectedToken { found: TokenTag::Dollar }
        ));
        assert!(matches!(
            parse_failure("a $ b"),
            ParseErrorKind::UnexpectedToken { found: TokenTag::Dollar }
        ));
    }

    #[test]
    fn terminator_yields_nil() {
        assert_eq!(parsed(";"), "nil");
        assert_eq!(parsed(""), "nil");
    }

    #[test]
    fn parent_spans_contain_child_spans() {
        with_parser("1 + 2 * 3", |parser, _| {
            let expr = parser.parse_expression(0).unwrap();
            fn walk(expr: &Expr<'_>) {
                match &expr.kind {
                    ExprKind::Unary { operand, .. } => {
                        assert!(expr.span.contains(operand.span));
                        walk(operand);
                    }
                    ExprKind::Binary { left, right, .. } => {
                        assert!(expr.span.contains(left.span));
                        assert!(expr.span.contains(right.span));
                        walk(left);
                        walk(right);
                    }
                    ExprKind::Condition { condition, consequence, alternative } => {
                        assert!(expr.span.contains(condition.span));
                        assert!(expr.span.contains(consequence.span));
                        if let Some(alternative) = alternative {
                            assert!(expr.span.contains(alternative.span));
                        }
                    }
                    _ => {}
                }
            }
            walk(expr);
            assert_eq!(expr.span.start, 0);
            assert_eq!(expr.span.end, 9);
        });
    }

    // scope parsing

    #[test]
    fn typed_mutable_value_emits_statement() {
        with_parser("x: int = 1 + 2 * 3;", |parser, _| {
            let scope = parser.parse_program().unwrap();
            assert_eq!(scope.values.len(), 1);
            let value = scope.values[0];
            assert!(!value.constant);
            assert!(value.type_expr.is_some());
            assert!(value.initializer.is_some());
            assert_eq!(parser.interner.resolve(value.identifier), "x");
            assert_eq!(scope.statements.len(), 1);
            assert!(matches!(scope.statements[0], Stmt::Value(_)));
        });
    }

    #[test]
    fn constant_value_emits_no_statement() {
        with_parser("y: int : 42;", |parser, _| {
            let scope = parser.parse_program().unwrap();
            assert_eq!(scope.values.len(), 1);
            assert!(scope.values[0].constant);
            assert!(scope.statements.is_empty());
        });
    }

    #[test]
    fn untyped_value_parses_with_initializer_only() {
        with_parser("z := 5;", |parser, _| {
            // `:=` is two tokens: the declaration colon then `=`
            let scope = parser.parse_program().unwrap();
            assert!(scope.values[0].type_expr.is_none());
            assert!(scope.values[0].initializer.is_some());
        });
    }

    #[test]
    fn typed_value_without_initializer_is_declaration_only() {
        with_parser("x: int;", |parser, _| {
            let scope = parser.parse_program().unwrap();
            assert_eq!(scope.values.len(), 1);
            assert!(scope.values[0].initializer.is_none());
            assert!(scope.statements.is_empty());
        });
    }

    #[test]
    fn untyped_uninitialized_value_fails() {
        with_parser("x: ;", |parser, _| {
            let err = parser.parse_program().unwrap_err();
            assert_eq!(err.kind, ParseErrorKind::UntypedUninitialized);
        });
    }

    #[test]
    fn label_records_statement_position() {
        with_parser("{ .loop: print(1); print(2) }", |parser, _| {
            let scope = parser.parse_program().unwrap();
            assert_eq!(scope.statements.len(), 1);
            let inner = match scope.statements[0] {
                Stmt::Scope(inner) => inner,
                _ => panic!("expected a scope statement"),
            };
            assert_eq!(inner.labels.len(), 1);
            assert_eq!(parser.interner.resolve(inner.labels[0].identifier), "loop");
            assert_eq!(inner.labels[0].position, 0);
            assert_eq!(inner.statements.len(), 2);
            assert!(matches!(inner.statements[0], Stmt::Expr(_)));
        });
    }

    #[test]
    fn label_between_statements_counts_predecessors() {
        with_parser("{ print(1); .mid print(2) }", |parser, _| {
            let scope = parser.parse_program().unwrap();
            let inner = match scope.statements[0] {
                Stmt::Scope(inner) => inner,
                _ => panic!("expected a scope statement"),
            };
            assert_eq!(inner.labels[0].position, 1);
            assert_eq!(inner.statements.len(), 2);
        });
    }

    #[test]
    fn routine_with_body_scope() {
        with_parser(".main: (args: int) -> int { x: int = 1; }", |parser, _| {
            let scope = parser.parse_program().unwrap();
            assert_eq!(scope.routines.len(), 1);
            let routine = &scope.routines[0];
            assert_eq!(parser.interner.resolve(routine.identifier), "main");
            let body = routine.scope.expect("routine body");
            assert_eq!(body.values.len(), 1);
            assert!(scope.statements.is_empty());
        });
    }

    #[test]
    fn routine_declaration_without_body() {
        with_parser(".forward: (a: int);", |parser, _| {
            let scope = parser.parse_program().unwrap();
            assert_eq!(scope.routines.len(), 1);
            assert!(scope.routines[0].scope.is_none());
        });
    }

    #[test]
    fn nested_scope_becomes_statement() {
        with_parser("{ a; } { b; }", |parser, _| {
            let scope = parser.parse_program().unwrap();
            assert_eq!(scope.statements.len(), 2);
            assert!(matches!(scope.statements[0], Stmt::Scope(_)));
            assert!(matches!(scope.statements[1], Stmt::Scope(_)));
        });
    }

    #[test]
    fn empty_statements_are_skipped() {
        with_parser(";;;", |parser, _| {
            let scope = parser.parse_program().unwrap();
            assert!(scope.statements.is_empty());
        });
    }

    #[test]
    fn unterminated_scope_fails() {
        with_parser("{ a;", |parser, _| {
            let err = parser.parse_program().unwrap_err();
            assert!(matches!(
                err.kind,
                ParseErrorKind::MissingCloser { expected: TokenTag::RBrace, .. }
            ));
        });
    }

    #[test]
    fn stray_closer_fails() {
        with_parser("}", |parser, _| {
            let err = parser.parse_program().unwrap_err();
            assert!(matches!(
                err.kind,
                ParseErrorKind::UnexpectedToken { found: TokenTag::RBrace }
            ));
        });
    }

    #[test]
    fn statements_preserve_source_order() {
        with_parser("first; second; third;", |parser, _| {
            let scope = parser.parse_program().unwrap();
            let names: Vec<&str> = scope
                .statements
                .iter()
                .map(|stmt| match stmt {
                    Stmt::Expr(e) => match e.kind {
                        ExprKind::Reference(sym) => parser.interner.resolve(sym),
                        _ => panic!("expected reference"),
                    },
                    _ => panic!("expected expression statement"),
                })
                .collect();
            assert_eq!(names, ["first", "second", "third"]);
        });
    }

    #[test]
    fn scope_span_covers_braces() {
        with_parser("{ a; }", |parser, _| {
            let scope = parser.parse_program().unwrap();
            let inner = match scope.statements[0] {
                Stmt::Scope(inner) => inner,
                _ => panic!("expected scope statement"),
            };
            assert_eq!(inner.span.start, 0);
            assert_eq!(inner.span.end, 6);
        });
    }
}
