//! Source position tracking for tokens, AST nodes, and diagnostics.
//!
//! A [`Span`] is a contiguous byte region of one source file together with
//! the row and column where the region begins. Every token and every AST
//! node in Sable carries a span; diagnostics use it to print the offending
//! slice and its position.
//!
//! # Byte Offsets, Character Rows
//!
//! `start` and `end` are byte offsets, matching Rust's slicing semantics:
//! `&source[span.start..span.end]` extracts the spanned text. `row` and
//! `column` are counted in decoded code points: the scanner increments the
//! column once per character, not per byte, and resets it after every
//! newline. Both are 0-based.
//!
//! # Example
//!
//! ```
//! use sable_base::Span;
//!
//! let source = "x: int = 1;";
//! let span = Span::new(3, 6, 0, 3);
//!
//! assert_eq!(&source[span.start..span.end], "int");
//! assert_eq!(span.len(), 3);
//! ```

/// A byte-offset range in source text, plus the row/column of its start.
///
/// Spans are `Copy` and cheap to pass around. Use [`Span::merge`] to combine
/// spans when building compound expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Byte offset of the first byte (inclusive).
    pub start: usize,
    /// Byte offset past the last byte (exclusive).
    pub end: usize,
    /// 0-based row of `start`, counted in `\n`-terminated lines.
    pub row: usize,
    /// 0-based column of `start`, counted in code points.
    pub column: usize,
}

impl Span {
    /// Creates a span from byte offsets and the starting row/column.
    ///
    /// No validation is performed; `start` may exceed `end`.
    pub fn new(start: usize, end: usize, row: usize, column: usize) -> Self {
        Self { start, end, row, column }
    }

    /// Extends this span to the end of `other`, keeping this span's start
    /// position. The span of `a + b` is `a.span.to(b.span)`.
    pub fn to(self, other: Span) -> Span {
        Span {
            start: self.start,
            end: other.end.max(self.end),
            row: self.row,
            column: self.column,
        }
    }

    /// Returns the length of the span in bytes.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` if this span covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Returns `true` if `other` lies entirely within this span.
    pub fn contains(&self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// A point in source text: byte position plus character-wise row and column.
///
/// The scanner carries one of these and turns it into the starting
/// row/column of each token's [`Span`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location {
    /// Byte offset into the source data.
    pub position: usize,
    /// 0-based row, incremented after consuming a newline.
    pub row: usize,
    /// 0-based column, reset on newline and incremented per code point.
    pub column: usize,
}

impl Location {
    /// Creates a location at the given position, row, and column.
    pub fn new(position: usize, row: usize, column: usize) -> Self {
        Self { position, row, column }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_new_stores_positions() {
        let span = Span::new(5, 10, 2, 1);
        assert_eq!(span.start, 5);
        assert_eq!(span.end, 10);
        assert_eq!(span.row, 2);
        assert_eq!(span.column, 1);
    }

    #[test]
    fn span_default_is_zero() {
        let span = Span::default();
        assert_eq!(span.start, 0);
        assert_eq!(span.end, 0);
    }

    #[test]
    fn span_to_extends_end_and_keeps_start() {
        let a = Span::new(5, 10, 1, 4);
        let b = Span::new(12, 20, 1, 11);
        let joined = a.to(b);
        assert_eq!(joined.start, 5);
        assert_eq!(joined.end, 20);
        assert_eq!(joined.row, 1);
        assert_eq!(joined.column, 4);
    }

    #[test]
    fn span_to_never_shrinks() {
        let a = Span::new(5, 10, 0, 5);
        let nil = Span::new(10, 10, 0, 10);
        assert_eq!(a.to(nil).end, 10);
    }

    #[test]
    fn span_len_returns_size() {
        let span = Span::new(5, 10, 0, 5);
        assert_eq!(span.len(), 5);
    }

    #[test]
    fn span_is_empty_for_zero_length() {
        assert!(Span::new(5, 5, 0, 5).is_empty());
        assert!(!Span::new(5, 10, 0, 5).is_empty());
    }

    #[test]
    fn span_contains_nested_spans() {
        let parent = Span::new(0, 20, 0, 0);
        let child = Span::new(4, 9, 0, 4);
        assert!(parent.contains(child));
        assert!(!child.contains(parent));
    }

    #[test]
    fn location_new_stores_fields() {
        let loc = Location::new(17, 3, 2);
        assert_eq!(loc.position, 17);
        assert_eq!(loc.row, 3);
        assert_eq!(loc.column, 2);
    }
}
