//! Source locations
//!
//! A span covers a character range of the source and remembers the
//! 1-based line and column where it starts.

use serde::{Deserialize, Serialize};

/// Character range in the source, with the position of its first character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Start offset (inclusive, in characters)
    pub start: usize,
    /// End offset (exclusive, in characters)
    pub end: usize,
    /// Line of the first character (1-based)
    pub line: u32,
    /// Column of the first character (1-based)
    pub column: u32,
}

impl Span {
    /// Create a span at the given offsets, positioned at line 1, column `start + 1`
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            line: 1,
            column: start as u32 + 1,
        }
    }

    /// Create a span with an explicit line/column position
    pub fn at(start: usize, end: usize, line: u32, column: u32) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    /// Placeholder span for synthesized nodes (desugaring)
    pub fn dummy() -> Self {
        Self {
            start: 0,
            end: 0,
            line: 0,
            column: 0,
        }
    }

    /// Whether this is a synthesized span
    pub fn is_dummy(&self) -> bool {
        self.line == 0
    }

    /// Number of characters covered
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Smallest span covering both; keeps the position of whichever starts first
    pub fn merge(self, other: Span) -> Span {
        if self.is_dummy() {
            return other;
        }
        if other.is_dummy() {
            return self;
        }
        let (first, _) = if self.start <= other.start {
            (self, other)
        } else {
            (other, self)
        };
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
            line: first.line,
            column: first.column,
        }
    }
}
