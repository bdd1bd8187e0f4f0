//! Opaque identifier for source files taking part in a compilation.

use serde::{Deserialize, Serialize};

/// Opaque identifier for a source file (translation unit).
///
/// The parser assigns each file a `FileId` before any declaration spans are
/// produced. Spans carry the `FileId` so the position index can route a
/// query to the right per-file tree.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct FileId(u32);

impl FileId {
    /// A file ID for synthetic spans that belong to no real file.
    pub const SYNTHETIC: FileId = FileId(u32::MAX);

    /// Creates a `FileId` from a raw `u32` value.
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw `u32` value of this `FileId`.
    pub fn as_raw(self) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_value_preserved() {
        assert_eq!(FileId::from_raw(42).as_raw(), 42);
    }

    #[test]
    fn synthetic_is_distinct() {
        assert_ne!(FileId::SYNTHETIC, FileId::from_raw(0));
        assert_eq!(FileId::SYNTHETIC.as_raw(), u32::MAX);
    }

    #[test]
    fn ordered_by_raw_value() {
        assert!(FileId::from_raw(1) < FileId::from_raw(2));
    }
}
