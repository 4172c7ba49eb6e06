//! # sable-base
//!
//! Structural atoms for the Sable front-end.
//!
//! This crate provides the foundational types the parser is built on:
//!
//! - [`Arena`]/[`ByteArena`] — bump allocation for stable AST references
//! - [`Interner`]/[`Symbol`] — string interning for O(1) identifier equality
//! - [`Span`]/[`Location`] — source position tracking
//!
//! # Design Principles
//!
//! This crate has **no knowledge of Sable syntax or I/O**. It provides
//! only generic, reusable infrastructure that the syntax crate builds upon.
//!
//! # Example
//!
//! ```
//! use sable_base::{Arena, Interner, Span};
//!
//! let arena: Arena<u64> = Arena::new();
//! let mut interner = Interner::new();
//!
//! let name = interner.intern("counter");
//! let span = Span::new(0, 7, 0, 0);
//!
//! let allocated = arena.alloc(42);
//! assert_eq!(*allocated, 42);
//! assert_eq!(interner.resolve(name), "counter");
//! assert_eq!(span.len(), 7);
//! ```

pub mod arena;
pub mod intern;
pub mod span;

pub use arena::{Arena, ByteArena};
pub use intern::{Interner, Symbol};
pub use span::{Location, Span};
