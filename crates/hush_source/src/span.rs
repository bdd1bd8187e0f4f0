//! Lexical ranges within a source file.

use crate::file_id::FileId;
use serde::{Deserialize, Serialize};

/// A byte offset into a source file.
pub type Pos = u32;

/// A lexical interval `[start, end)` within a single source file.
///
/// Containment follows one extra rule: a position equal to `start` is always
/// contained, even when the span is empty. Diagnostics are usually anchored at
/// a declaration's first token, so that token must resolve to the
/// declaration itself.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Span {
    /// The source file this span belongs to.
    pub file: FileId,
    /// Byte offset of the start of the span (inclusive).
    pub start: Pos,
    /// Byte offset of the end of the span (exclusive).
    pub end: Pos,
}

impl Span {
    /// A span containing every position of every file.
    pub const MAXIMAL: Span = Span {
        file: FileId::SYNTHETIC,
        start: 0,
        end: Pos::MAX,
    };

    /// Creates a new span in the given file with the given byte range.
    ///
    /// # Panics
    ///
    /// Panics if `end < start`.
    pub fn new(file: FileId, start: Pos, end: Pos) -> Self {
        assert!(start <= end, "span end {end} precedes start {start}");
        Self { file, start, end }
    }

    /// Returns `true` if this is the [`MAXIMAL`](Self::MAXIMAL) span.
    pub fn is_maximal(&self) -> bool {
        *self == Self::MAXIMAL
    }

    /// Returns `true` if `pos` lies inside this span.
    pub fn contains(&self, pos: Pos) -> bool {
        if self.is_maximal() {
            return true;
        }
        pos == self.start || (self.start <= pos && pos < self.end)
    }

    /// Returns `true` if `other` lies entirely inside this span.
    pub fn contains_span(&self, other: &Span) -> bool {
        self.is_maximal() || (self.start <= other.start && other.end <= self.end)
    }

    /// Returns `true` if the two spans share at least one position.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.contains(other.start) || other.contains(self.start)
    }

    /// Returns the length of this span in bytes.
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Returns `true` if this span has zero length.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}
