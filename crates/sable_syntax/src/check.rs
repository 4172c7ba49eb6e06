//! The partial type checker.
//!
//! This is deliberately a sketch, not a type system: it knows the primitive
//! integer widths and `real`, tracks value bindings through nested scopes
//! with a scope stack, and rejects exactly two shapes:
//!
//! - assignment (or typed initialization) between values whose primitive
//!   types are both known and different;
//! - shift and arithmetic negation applied to an operand that is known not
//!   to be primitive (a text literal).
//!
//! Anything it cannot classify passes. Identifier uniqueness, full
//! inference, and composite types are future work for a real semantic pass.

use std::collections::HashMap;

use sable_base::{Interner, Symbol};

use crate::ast::{BinaryOp, Expr, ExprKind, Scope, Stmt, UnaryOp, Value};
use crate::error::{ParseError, ParseErrorKind, ParseResult};

/// The primitive types the checker understands.
///
/// Integer literals carry width 0, meaning "fits whatever it is assigned
/// to"; declared integers carry their bit width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Integer { width: u8, signed: bool },
    Real,
}

impl Primitive {
    fn conflicts_with(self, other: Primitive) -> bool {
        match (self, other) {
            (Primitive::Real, Primitive::Real) => false,
            (Primitive::Real, _) | (_, Primitive::Real) => true,
            (
                Primitive::Integer { width: a, signed: sa },
                Primitive::Integer { width: b, signed: sb },
            ) => a != 0 && b != 0 && (a != b || sa != sb),
        }
    }
}

fn primitive_from_name(name: &str) -> Option<Primitive> {
    let primitive = match name {
        "int" => Primitive::Integer { width: 64, signed: true },
        "s8" => Primitive::Integer { width: 8, signed: true },
        "s16" => Primitive::Integer { width: 16, signed: true },
        "s32" => Primitive::Integer { width: 32, signed: true },
        "s64" => Primitive::Integer { width: 64, signed: true },
        "u8" => Primitive::Integer { width: 8, signed: false },
        "u16" => Primitive::Integer { width: 16, signed: false },
        "u32" => Primitive::Integer { width: 32, signed: false },
        "u64" => Primitive::Integer { width: 64, signed: false },
        "real" => Primitive::Real,
        _ => return None,
    };
    Some(primitive)
}

/// Stack of per-scope binding tables, innermost last.
#[derive(Debug, Default)]
pub struct ScopeStack {
    scopes: Vec<HashMap<Symbol, Option<Primitive>>>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    pub fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    pub fn bind(&mut self, name: Symbol, primitive: Option<Primitive>) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name, primitive);
        }
    }

    pub fn lookup(&self, name: Symbol) -> Option<Primitive> {
        for scope in self.scopes.iter().rev() {
            if let Some(entry) = scope.get(&name) {
                return *entry;
            }
        }
        None
    }
}

/// Walks a parsed scope tree and applies the sketch checks.
pub struct Checker<'i> {
    interner: &'i Interner,
    stack: ScopeStack,
}

impl<'i> Checker<'i> {
    pub fn new(interner: &'i Interner) -> Self {
        Checker { interner, stack: ScopeStack::new() }
    }

    /// Checks one scope tree, failing on the first rejected shape.
    pub fn check(&mut self, scope: &Scope<'_>) -> ParseResult<()> {
        self.check_scope(scope)
    }

    fn check_scope(&mut self, scope: &Scope<'_>) -> ParseResult<()> {
        self.stack.push_scope();
        let result = self.check_scope_inner(scope);
        self.stack.pop_scope();
        result
    }

    fn check_scope_inner(&mut self, scope: &Scope<'_>) -> ParseResult<()> {
        for value in scope.values {
            self.check_value(value)?;
        }
        for statement in scope.statements {
            match statement {
                Stmt::Expr(expr) => self.check_expr(expr)?,
                Stmt::Scope(inner) => self.check_scope(inner)?,
                // initialization expressions were checked with the value
                Stmt::Value(_) => {}
            }
        }
        for routine in scope.routines {
            if let Some(body) = routine.scope {
                self.check_scope(body)?;
            }
        }
        Ok(())
    }

    fn check_value(&mut self, value: &Value<'_>) -> ParseResult<()> {
        let declared = value.type_expr.and_then(|t| self.declared_primitive(t));
        if let Some(initializer) = value.initializer {
            self.check_expr(initializer)?;
            if let (Some(declared), Some(inferred)) =
                (declared, self.infer(initializer))
            {
                if declared.conflicts_with(inferred) {
                    return Err(ParseError::new(
                        ParseErrorKind::MismatchedTypes,
                        value.span,
                    ));
                }
            }
        }
        self.stack.bind(value.identifier, declared);
        Ok(())
    }

    fn check_expr(&mut self, expr: &Expr<'_>) -> ParseResult<()> {
        match &expr.kind {
            ExprKind::Unary { op, operand } => {
                if *op == UnaryOp::Negative && self.known_non_primitive(operand) {
                    return Err(ParseError::new(
                        ParseErrorKind::PrimitiveRequired,
                        expr.span,
                    ));
                }
                self.check_expr(operand)
            }
            ExprKind::Binary { op, left, right } => {
                match op {
                    BinaryOp::ShiftLeft | BinaryOp::ShiftRight => {
                        if self.known_non_primitive(left)
                            || self.known_non_primitive(right)
                            || matches!(self.infer(left), Some(Primitive::Real))
                            || matches!(self.infer(right), Some(Primitive::Real))
                        {
                            return Err(ParseError::new(
                                ParseErrorKind::PrimitiveRequired,
                                expr.span,
                            ));
                        }
                    }
                    BinaryOp::Assignment => {
                        if let (Some(target), Some(source)) =
                            (self.infer(left), self.infer(right))
                        {
                            if target.conflicts_with(source) {
                                return Err(ParseError::new(
                                    ParseErrorKind::MismatchedTypes,
                                    expr.span,
                                ));
                            }
                        }
                    }
                    _ => {}
                }
                self.check_expr(left)?;
                self.check_expr(right)
            }
            ExprKind::Condition { condition, consequence, alternative } => {
                self.check_expr(condition)?;
                self.check_expr(consequence)?;
                if let Some(alternative) = alternative {
                    self.check_expr(alternative)?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// The primitive a type expression names, if it is a plain reference.
    fn declared_primitive(&self, type_expr: &Expr<'_>) -> Option<Primitive> {
        match type_expr.kind {
            ExprKind::Reference(symbol) => {
                primitive_from_name(self.interner.resolve(symbol))
            }
            _ => None,
        }
    }

    /// What the checker can tell about an expression's type.
    fn infer(&self, expr: &Expr<'_>) -> Option<Primitive> {
        match &expr.kind {
            ExprKind::Integer(_) => Some(Primitive::Integer { width: 0, signed: true }),
            ExprKind::Real(_) => Some(Primitive::Real),
            ExprKind::Reference(symbol) => self.stack.lookup(*symbol),
            ExprKind::Unary { op: UnaryOp::Subexpression, operand } => self.infer(operand),
            ExprKind::Unary { op: UnaryOp::Negative, operand } => self.infer(operand),
            ExprKind::Binary { op, left, .. }
                if matches!(
                    op,
                    BinaryOp::Addition
                        | BinaryOp::Subtraction
                        | BinaryOp::Multiplication
                        | BinaryOp::Division
                        | BinaryOp::Remainder
                ) =>
            {
                self.infer(left)
            }
            _ => None,
        }
    }

    /// Shapes the checker positively knows are not primitive operands.
    fn known_non_primitive(&self, expr: &Expr<'_>) -> bool {
        matches!(expr.kind, ExprKind::Text(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arenas::AstArenas;
    use crate::parser::Parser;
    use crate::source::Source;
    use sable_base::{Arena, ByteArena, Interner};

    fn check_program(text: &str) -> ParseResult<()> {
        let source = Source::from_bytes("check.sb", text.as_bytes().to_vec()).unwrap();
        let exprs = Arena::new();
        let values = Arena::new();
        let scopes = Arena::new();
        let stmts = Arena::new();
        let value_lists = Arena::new();
        let labels = Arena::new();
        let routines = Arena::new();
        let text_arena = ByteArena::new();
        let arenas = AstArenas::new(
            &exprs, &values, &scopes, &stmts, &value_lists, &labels, &routines, &text_arena,
        );
        let mut interner = Interner::new();
        let mut parser = Parser::new(&source, arenas, &mut interner).unwrap();
        let scope = parser.parse_program()?;
        Checker::new(&interner).check(scope)
    }

    #[test]
    fn integer_initialization_passes() {
        assert!(check_program("x: int = 1;").is_ok());
        assert!(check_program("w: u8 = 255;").is_ok());
    }

    #[test]
    fn real_initialization_of_integer_fails() {
        let err = check_program("x: int = 1.5;").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MismatchedTypes);
    }

    #[test]
    fn real_accepts_real() {
        assert!(check_program("r: real = 1.5;").is_ok());
    }

    #[test]
    fn assignment_between_matching_widths_passes() {
        assert!(check_program("a: u8 = 1; b: u8 = 2; a = b;").is_ok());
    }

    #[test]
    fn assignment_between_different_widths_fails() {
        let err = check_program("a: u8 = 1; b: u16 = 2; a = b;").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MismatchedTypes);
    }

    #[test]
    fn assignment_between_different_signedness_fails() {
        let err = check_program("a: s8 = 1; b: u8 = 2; a = b;").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MismatchedTypes);
    }

    #[test]
    fn literal_widths_fit_any_integer() {
        assert!(check_program("a: u8 = 1; a = 200;").is_ok());
    }

    #[test]
    fn real_assigned_to_integer_fails() {
        let err = check_program("a: int = 1; a = 2.5;").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MismatchedTypes);
    }

    #[test]
    fn shifting_text_fails() {
        let err = check_program("x: int = 1; x << \"two\";").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::PrimitiveRequired);
    }

    #[test]
    fn shifting_reals_fails() {
        let err = check_program("1.5 << 2;").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::PrimitiveRequired);
    }

    #[test]
    fn negating_text_fails() {
        let err = check_program("-\"abc\";").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::PrimitiveRequired);
    }

    #[test]
    fn unknown_references_pass() {
        // the sketch has no use-before-declaration rule
        assert!(check_program("mystery << 2;").is_ok());
        assert!(check_program("a = b;").is_ok());
    }

    #[test]
    fn nested_scopes_shadow_outer_bindings() {
        assert!(check_program("a: u8 = 1; { a: real = 1.5; a = 2.5; }").is_ok());
        let err = check_program("a: u8 = 1; { a: real = 1.5; } a = 2.5;").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MismatchedTypes);
    }

    #[test]
    fn routine_bodies_are_checked() {
        let err = check_program(".r: () { x: int = 1.5; }").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MismatchedTypes);
    }

    #[test]
    fn scope_stack_lookup_walks_outward() {
        let mut interner = Interner::new();
        let name = interner.intern("x");
        let mut stack = ScopeStack::new();
        stack.push_scope();
        stack.bind(name, Some(Primitive::Real));
        stack.push_scope();
        assert_eq!(stack.lookup(name), Some(Primitive::Real));
        stack.pop_scope();
        stack.pop_scope();
        assert_eq!(stack.lookup(name), None);
    }
}
