//! Arena context for AST allocation.
//!
//! This module provides [`AstArenas`], a collection of typed arenas used
//! during parsing to allocate AST nodes. All nodes are bump-allocated, with
//! the `'a` lifetime tracking the arenas' scope. The caller owns the arenas
//! and hands a copyable bundle of references to the parser:
//!
//! ```
//! use sable_base::{Arena, ByteArena};
//! use sable_syntax::arenas::AstArenas;
//!
//! let exprs = Arena::new();
//! let values = Arena::new();
//! let scopes = Arena::new();
//! let stmts = Arena::new();
//! let value_lists = Arena::new();
//! let labels = Arena::new();
//! let routines = Arena::new();
//! let text = ByteArena::new();
//! let arenas = AstArenas::new(
//!     &exprs, &values, &scopes, &stmts, &value_lists, &labels, &routines, &text,
//! );
//! let one = arenas.integer(1, Default::default());
//! assert!(!one.is_nil());
//! ```

use sable_base::{Arena, ByteArena, Span};

use crate::ast::{BinaryOp, Expr, ExprKind, Label, Routine, Scope, Stmt, UnaryOp, Value};

/// Collection of typed arenas for AST allocation during parsing.
///
/// The separation by node type keeps allocation monomorphic while the
/// whole bundle stays `Copy` for cheap threading through the parser.
#[derive(Clone, Copy)]
pub struct AstArenas<'a> {
    /// Arena for expression nodes.
    pub exprs: &'a Arena<Expr<'a>>,
    /// Arena for value declarations.
    pub values: &'a Arena<Value<'a>>,
    /// Arena for scopes.
    pub scopes: &'a Arena<Scope<'a>>,
    /// Arena for scope statement lists.
    pub stmts: &'a Arena<Stmt<'a>>,
    /// Arena for scope value tables.
    pub value_lists: &'a Arena<&'a Value<'a>>,
    /// Arena for scope label tables.
    pub labels: &'a Arena<Label>,
    /// Arena for scope routine tables.
    pub routines: &'a Arena<Routine<'a>>,
    /// Arena for decoded text literal bytes.
    pub text: &'a ByteArena,
}

impl<'a> AstArenas<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        exprs: &'a Arena<Expr<'a>>,
        values: &'a Arena<Value<'a>>,
        scopes: &'a Arena<Scope<'a>>,
        stmts: &'a Arena<Stmt<'a>>,
        value_lists: &'a Arena<&'a Value<'a>>,
        labels: &'a Arena<Label>,
        routines: &'a Arena<Routine<'a>>,
        text: &'a ByteArena,
    ) -> Self {
        AstArenas { exprs, values, scopes, stmts, value_lists, labels, routines, text }
    }

    /// Allocates an expression node.
    pub fn alloc_expr(&self, span: Span, kind: ExprKind<'a>) -> &'a Expr<'a> {
        self.exprs.alloc(Expr { span, kind })
    }

    /// Allocates a value declaration.
    pub fn alloc_value(&self, value: Value<'a>) -> &'a Value<'a> {
        self.values.alloc(value)
    }

    /// Allocates a finished scope from its accreted tables.
    pub fn alloc_scope(
        &self,
        span: Span,
        statements: Vec<Stmt<'a>>,
        values: Vec<&'a Value<'a>>,
        labels: Vec<Label>,
        routines: Vec<Routine<'a>>,
    ) -> &'a Scope<'a> {
        self.scopes.alloc(Scope {
            span,
            statements: self.stmts.alloc_slice(statements),
            values: self.value_lists.alloc_slice(values),
            labels: self.labels.alloc_slice(labels),
            routines: self.routines.alloc_slice(routines),
        })
    }

    /// Copies decoded text literal bytes into the byte arena.
    pub fn alloc_text(&self, bytes: &[u8]) -> &'a [u8] {
        self.text.alloc_bytes(bytes)
    }

    /// Creates a nil expression at `span`.
    #[inline(always)]
    pub fn nil(&self, span: Span) -> &'a Expr<'a> {
        self.alloc_expr(span, ExprKind::Nil)
    }

    /// Creates an integer literal node.
    #[inline(always)]
    pub fn integer(&self, value: u64, span: Span) -> &'a Expr<'a> {
        self.alloc_expr(span, ExprKind::Integer(value))
    }

    /// Creates a unary operation: `op operand`.
    #[inline(always)]
    pub fn unary(&self, op: UnaryOp, operand: &'a Expr<'a>, span: Span) -> &'a Expr<'a> {
        self.alloc_expr(span, ExprKind::Unary { op, operand })
    }

    /// Creates a binary operation: `left op right`.
    #[inline(always)]
    pub fn binary(
        &self,
        op: BinaryOp,
        left: &'a Expr<'a>,
        right: &'a Expr<'a>,
    ) -> &'a Expr<'a> {
        self.alloc_expr(left.span.to(right.span), ExprKind::Binary { op, left, right })
    }

    /// Creates a conditional: `condition ? consequence ! alternative`.
    #[inline(always)]
    pub fn condition(
        &self,
        condition: &'a Expr<'a>,
        consequence: &'a Expr<'a>,
        alternative: Option<&'a Expr<'a>>,
        span: Span,
    ) -> &'a Expr<'a> {
        self.alloc_expr(span, ExprKind::Condition { condition, consequence, alternative })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_arenas(run: impl for<'a> FnOnce(AstArenas<'a>)) {
        let exprs = Arena::new();
        let values = Arena::new();
        let scopes = Arena::new();
        let stmts = Arena::new();
        let value_lists = Arena::new();
        let labels = Arena::new();
        let routines = Arena::new();
        let text = ByteArena::new();
        run(AstArenas::new(
            &exprs, &values, &scopes, &stmts, &value_lists, &labels, &routines, &text,
        ));
    }

    #[test]
    fn binary_builder_merges_spans() {
        with_arenas(|arenas| {
            let left = arenas.integer(1, Span::new(0, 1, 0, 1));
            let right = arenas.integer(2, Span::new(4, 5, 0, 5));
            let sum = arenas.binary(BinaryOp::Addition, left, right);
            assert_eq!(sum.span.start, 0);
            assert_eq!(sum.span.end, 5);
            assert!(matches!(sum.kind, ExprKind::Binary { op: BinaryOp::Addition, .. }));
        });
    }

    #[test]
    fn unary_builder_wraps_operand() {
        with_arenas(|arenas| {
            let operand = arenas.integer(3, Span::new(1, 2, 0, 2));
            let negated = arenas.unary(UnaryOp::Negative, operand, Span::new(0, 2, 0, 1));
            assert!(matches!(
                negated.kind,
                ExprKind::Unary { op: UnaryOp::Negative, .. }
            ));
        });
    }

    #[test]
    fn scope_builder_freezes_tables() {
        with_arenas(|arenas| {
            let one = arenas.integer(1, Span::new(0, 1, 0, 1));
            let scope = arenas.alloc_scope(
                Span::new(0, 1, 0, 1),
                vec![Stmt::Expr(one)],
                Vec::new(),
                vec![Label { identifier: sable_base::Symbol::EMPTY, position: 0 }],
                Vec::new(),
            );
            assert_eq!(scope.statements.len(), 1);
            assert_eq!(scope.labels.len(), 1);
            assert!(scope.values.is_empty());
        });
    }

    #[test]
    fn text_bytes_live_in_the_arena() {
        with_arenas(|arenas| {
            let decoded = arenas.alloc_text(b"h\x0allo");
            assert_eq!(decoded, b"h\x0allo");
        });
    }
}
