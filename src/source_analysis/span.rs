// Copyright 2026 The Adder Project Authors
// SPDX-License-Identifier: Apache-2.0

//! Byte spans into the source text.
//!
//! A [`Span`] is the half-open range `[start, end)` that a token, AST node,
//! or diagnostic occupies. Offsets are bytes, not characters; the parser
//! keeps parent spans covering their children so the point queries can walk
//! the tree by offset containment alone.

use std::ops::Range;

/// A half-open byte range in a source file.
///
/// # Examples
///
/// ```
/// use adder_core::source_analysis::Span;
///
/// let name = Span::new(4, 8);
/// assert_eq!(name.len(), 4);
/// assert!(Span::new(0, 12).contains(name));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    start: u32,
    end: u32,
}

impl Span {
    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// An empty span sitting at `offset`, used for synthesized tokens.
    #[must_use]
    pub const fn point(offset: u32) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    #[must_use]
    pub const fn start(self) -> u32 {
        self.start
    }

    /// One past the last byte.
    #[must_use]
    pub const fn end(self) -> u32 {
        self.end
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }

    #[must_use]
    pub const fn len(self) -> u32 {
        self.end - self.start
    }

    /// The smallest span covering both `self` and `other`.
    #[must_use]
    pub const fn merge(self, other: Self) -> Self {
        let start = if other.start < self.start {
            other.start
        } else {
            self.start
        };
        let end = if other.end > self.end {
            other.end
        } else {
            self.end
        };
        Self { start, end }
    }

    /// Whether `other` lies entirely within this span.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Whether a cursor offset hits this span.
    ///
    /// Deliberately end-inclusive: a cursor placed directly after the last
    /// byte of a token still belongs to it, which is what editors expect
    /// when completing or hovering at the end of a word.
    #[must_use]
    pub const fn contains_offset(self, offset: u32) -> bool {
        self.start <= offset && offset <= self.end
    }

    /// The equivalent `Range<usize>`, for slicing source text.
    #[must_use]
    pub const fn as_range(self) -> Range<usize> {
        self.start as usize..self.end as usize
    }
}

impl From<Range<u32>> for Span {
    fn from(range: Range<u32>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl From<Range<usize>> for Span {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "source files over 4GB are not supported"
    )]
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start as u32, range.end as u32)
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.as_range()
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        (span.start as usize, span.len() as usize).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_and_length() {
        let span = Span::new(5, 15);
        assert_eq!(span.start(), 5);
        assert_eq!(span.end(), 15);
        assert_eq!(span.len(), 10);
        assert!(!span.is_empty());
    }

    #[test]
    fn point_spans_are_empty() {
        let span = Span::point(7);
        assert!(span.is_empty());
        assert_eq!(span.as_range(), 7..7);
    }

    #[test]
    fn offset_containment_is_end_inclusive() {
        let span = Span::new(4, 8);
        assert!(!span.contains_offset(3));
        assert!(span.contains_offset(4));
        assert!(span.contains_offset(8));
        assert!(!span.contains_offset(9));
    }

    #[test]
    fn merge_covers_both_spans_in_either_order() {
        let a = Span::new(5, 10);
        let b = Span::new(15, 20);
        assert_eq!(a.merge(b), Span::new(5, 20));
        assert_eq!(b.merge(a), Span::new(5, 20));
    }

    #[test]
    fn containment_is_not_symmetric() {
        let outer = Span::new(0, 20);
        let inner = Span::new(5, 10);
        assert!(outer.contains(inner));
        assert!(outer.contains(outer));
        assert!(!inner.contains(outer));
    }

    #[test]
    fn range_conversions_round_trip() {
        let span: Span = (3u32..9u32).into();
        assert_eq!(span, Span::from(3usize..9usize));
        let range: Range<usize> = span.into();
        assert_eq!(range, 3..9);
    }
}
