//! Compact, copyable sets of categories.

use crate::category::Category;
use strum::EnumCount;

bitflags::bitflags! {
    /// A set of [`Category`] values stored as a bit mask.
    ///
    /// `Copy`, so deriving a new lint state copies its sets instead of sharing
    /// them with the parent. Flags follow [`Category::ALL`] order.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CategorySet: u64 {
        /// `auxiliaryclass`
        const AUXILIARY_CLASS = 1 << 0;
        /// `cast`
        const CAST = 1 << 1;
        /// `classfile`
        const CLASSFILE = 1 << 2;
        /// `dangling-doc-comments`
        const DANGLING_DOC_COMMENTS = 1 << 3;
        /// `deprecation`
        const DEPRECATION = 1 << 4;
        /// `dep-ann`
        const DEP_ANN = 1 << 5;
        /// `divzero`
        const DIV_ZERO = 1 << 6;
        /// `empty`
        const EMPTY = 1 << 7;
        /// `exports`
        const EXPORTS = 1 << 8;
        /// `fallthrough`
        const FALLTHROUGH = 1 << 9;
        /// `finally`
        const FINALLY = 1 << 10;
        /// `identity`
        const IDENTITY = 1 << 11;
        /// `incubating`
        const INCUBATING = 1 << 12;
        /// `lossy-conversions`
        const LOSSY_CONVERSIONS = 1 << 13;
        /// `missing-explicit-ctor`
        const MISSING_EXPLICIT_CTOR = 1 << 14;
        /// `module`
        const MODULE = 1 << 15;
        /// `opens`
        const OPENS = 1 << 16;
        /// `options`
        const OPTIONS = 1 << 17;
        /// `output-file-clash`
        const OUTPUT_FILE_CLASH = 1 << 18;
        /// `overloads`
        const OVERLOADS = 1 << 19;
        /// `overrides`
        const OVERRIDES = 1 << 20;
        /// `path`
        const PATH = 1 << 21;
        /// `preview`
        const PREVIEW = 1 << 22;
        /// `processing`
        const PROCESSING = 1 << 23;
        /// `rawtypes`
        const RAW_TYPES = 1 << 24;
        /// `removal`
        const REMOVAL = 1 << 25;
        /// `requires-automatic`
        const REQUIRES_AUTOMATIC = 1 << 26;
        /// `requires-transitive-automatic`
        const REQUIRES_TRANSITIVE_AUTOMATIC = 1 << 27;
        /// `restricted`
        const RESTRICTED = 1 << 28;
        /// `serial`
        const SERIAL = 1 << 29;
        /// `static`
        const STATIC = 1 << 30;
        /// `strictfp`
        const STRICTFP = 1 << 31;
        /// `suppression`
        const SUPPRESSION = 1 << 32;
        /// `suppression-option`
        const SUPPRESSION_OPTION = 1 << 33;
        /// `text-blocks`
        const TEXT_BLOCKS = 1 << 34;
        /// `this-escape`
        const THIS_ESCAPE = 1 << 35;
        /// `try`
        const TRY = 1 << 36;
        /// `unchecked`
        const UNCHECKED = 1 << 37;
        /// `varargs`
        const VARARGS = 1 << 38;
    }
}

const _: () = assert!(CategorySet::all().bits().count_ones() as usize == Category::COUNT);

impl Category {
    /// Returns the single-member set for this category.
    pub const fn as_set(self) -> CategorySet {
        CategorySet::from_bits_retain(1 << self as u64)
    }
}

impl CategorySet {
    /// Returns a set holding only `category`.
    pub const fn of(category: Category) -> Self {
        category.as_set()
    }

    /// Returns the number of members.
    pub fn len(self) -> usize {
        self.bits().count_ones() as usize
    }

    /// Iterates over the members in catalog order.
    pub fn categories(self) -> impl Iterator<Item = Category> {
        Category::ALL
            .into_iter()
            .filter(move |c| self.contains(c.as_set()))
    }
}

impl From<Category> for CategorySet {
    fn from(category: Category) -> Self {
        category.as_set()
    }
}

impl FromIterator<Category> for CategorySet {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        let mut set = Self::empty();
        for c in iter {
            set |= c.as_set();
        }
        set
    }
}

impl<const N: usize> From<[Category; N]> for CategorySet {
    fn from(categories: [Category; N]) -> Self {
        categories.into_iter().collect()
    }
}
