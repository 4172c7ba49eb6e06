//! # sable-syntax
//!
//! The Sable front-end core: a Unicode-aware tokenizer driving a
//! precedence-climbing expression parser that emits an arena-backed AST,
//! plus the scope/declaration parser, a partial type checker, a
//! severity-tagged diagnostics sink, and the canonical AST dumper.
//!
//! # Pipeline
//!
//! Data flows downstream only:
//!
//! ```text
//! Source ──▶ Caret ──▶ Lexer ──▶ Parser ──▶ Scope/AST ──▶ Checker
//!                                   │                        │
//!                                   ▼                        ▼
//!                                 dump                    Reporter
//! ```
//!
//! # Example
//!
//! ```
//! use sable_base::{Arena, ByteArena, Interner};
//! use sable_syntax::{AstArenas, Parser, Source};
//!
//! let source = Source::from_bytes("demo.sb", b"x: int = 1 + 2 * 3;".to_vec()).unwrap();
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
//! let mut interner = Interner::new();
//!
//! let mut parser = Parser::new(&source, arenas, &mut interner).unwrap();
//! let scope = parser.parse_program().unwrap();
//! assert_eq!(scope.values.len(), 1);
//! ```

pub mod arenas;
pub mod ast;
pub mod caret;
pub mod check;
pub mod dump;
pub mod error;
pub mod lexer;
pub mod literal;
pub mod parser;
pub mod report;
pub mod source;
pub mod token;
pub mod unicode;

pub use arenas::AstArenas;
pub use ast::{BinaryOp, Expr, ExprKind, Label, Routine, Scope, Stmt, UnaryOp, Value};
pub use caret::Caret;
pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use lexer::Lexer;
pub use parser::Parser;
pub use report::{Reporter, Severity};
pub use source::Source;
pub use token::{Token, TokenTag};
