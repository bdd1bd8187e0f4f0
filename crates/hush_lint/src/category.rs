//! The closed catalog of lint categories and lookup by option token.

use crate::set::CategorySet;
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;
use strum::EnumCount;

/// A named class of diagnostics that can be enabled or suppressed independently.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, EnumCount)]
#[repr(u8)]
pub enum Category {
    /// A class is declared in a file whose name does not match it.
    AuxiliaryClass,
    /// Redundant casts.
    Cast,
    /// Problems reading class files.
    Classfile,
    /// Documentation comments not attached to any declaration.
    DanglingDocComments,
    /// Use of deprecated API.
    Deprecation,
    /// Documentation marks an item deprecated but the annotation is missing.
    DepAnn,
    /// Integer division by a constant zero.
    DivZero,
    /// Empty statement after `if`.
    Empty,
    /// Exported packages that are not accessible.
    Exports,
    /// Fall-through between switch cases.
    Fallthrough,
    /// `finally` clauses that cannot complete normally.
    Finally,
    /// Synchronization on value-based instances.
    Identity,
    /// Use of incubating modules.
    Incubating,
    /// Possible lossy conversions in compound assignment.
    LossyConversions,
    /// Public classes in exported packages without an explicit constructor.
    MissingExplicitCtor,
    /// Module system related issues.
    Module,
    /// Opened packages that do not exist or are empty.
    Opens,
    /// Issues with command-line options.
    Options,
    /// Output files overwritten because of case-insensitive file systems.
    OutputFileClash,
    /// Ambiguous method overloads.
    Overloads,
    /// Method override issues.
    Overrides,
    /// Invalid path elements on the command line.
    Path,
    /// Use of preview language features.
    Preview,
    /// Annotation processing issues.
    Processing,
    /// Use of raw types.
    RawTypes,
    /// Use of API marked for removal.
    Removal,
    /// Use of automatic modules in `requires` clauses.
    RequiresAutomatic,
    /// Automatic modules in `requires transitive` clauses.
    RequiresTransitiveAutomatic,
    /// Use of restricted methods.
    Restricted,
    /// Serializable classes without a serial version id.
    Serial,
    /// Static members accessed through an instance.
    Static,
    /// Unnecessary `strictfp` modifier.
    Strictfp,
    /// Suppressions that suppress nothing.
    Suppression,
    /// `--lint:-category` options that disable nothing.
    SuppressionOption,
    /// Inconsistent white space in text blocks.
    TextBlocks,
    /// `this` escaping a constructor before initialization completes.
    ThisEscape,
    /// Issues with `try` blocks and resources.
    Try,
    /// Unchecked generic type operations.
    Unchecked,
    /// Unsafe variable-arity method declarations.
    Varargs,
}

/// How a category behaves under the global lint modes.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tier {
    /// On unless `--lint:none` (or an explicit disable).
    Default,
    /// Additionally on with bare `--lint`.
    Extra,
    /// Only on with `--lint:all` or an explicit enable.
    OptIn,
}

struct CategoryInfo {
    token: &'static str,
    annotation_suppressible: bool,
    suppression_tracked: bool,
    tier: Tier,
}

const fn info(
    token: &'static str,
    annotation_suppressible: bool,
    suppression_tracked: bool,
    tier: Tier,
) -> CategoryInfo {
    CategoryInfo {
        token,
        annotation_suppressible,
        suppression_tracked,
        tier,
    }
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Category; Category::COUNT] = [
        Category::AuxiliaryClass,
        Category::Cast,
        Category::Classfile,
        Category::DanglingDocComments,
        Category::Deprecation,
        Category::DepAnn,
        Category::DivZero,
        Category::Empty,
        Category::Exports,
        Category::Fallthrough,
        Category::Finally,
        Category::Identity,
        Category::Incubating,
        Category::LossyConversions,
        Category::MissingExplicitCtor,
        Category::Module,
        Category::Opens,
        Category::Options,
        Category::OutputFileClash,
        Category::Overloads,
        Category::Overrides,
        Category::Path,
        Category::Preview,
        Category::Processing,
        Category::RawTypes,
        Category::Removal,
        Category::RequiresAutomatic,
        Category::RequiresTransitiveAutomatic,
        Category::Restricted,
        Category::Serial,
        Category::Static,
        Category::Strictfp,
        Category::Suppression,
        Category::SuppressionOption,
        Category::TextBlocks,
        Category::ThisEscape,
        Category::Try,
        Category::Unchecked,
        Category::Varargs,
    ];

    fn info(self) -> CategoryInfo {
        use Tier::*;
        match self {
            Category::AuxiliaryClass => info("auxiliaryclass", true, true, OptIn),
            Category::Cast => info("cast", true, true, Extra),
            Category::Classfile => info("classfile", false, false, OptIn),
            Category::DanglingDocComments => info("dangling-doc-comments", true, true, Extra),
            Category::Deprecation => info("deprecation", true, true, Extra),
            Category::DepAnn => info("dep-ann", true, true, Default),
            Category::DivZero => info("divzero", true, true, Default),
            Category::Empty => info("empty", true, true, Extra),
            Category::Exports => info("exports", true, true, OptIn),
            Category::Fallthrough => info("fallthrough", true, true, Extra),
            Category::Finally => info("finally", true, true, Extra),
            Category::Identity => info("identity", true, true, Default),
            Category::Incubating => info("incubating", false, false, Default),
            Category::LossyConversions => info("lossy-conversions", true, true, Extra),
            Category::MissingExplicitCtor => info("missing-explicit-ctor", true, true, OptIn),
            Category::Module => info("module", true, true, Default),
            Category::Opens => info("opens", true, true, Default),
            Category::Options => info("options", false, false, Default),
            Category::OutputFileClash => info("output-file-clash", false, false, OptIn),
            Category::Overloads => info("overloads", true, true, OptIn),
            Category::Overrides => info("overrides", true, true, Extra),
            Category::Path => info("path", false, false, OptIn),
            Category::Preview => info("preview", true, true, Default),
            Category::Processing => info("processing", false, false, OptIn),
            Category::RawTypes => info("rawtypes", true, true, Extra),
            Category::Removal => info("removal", true, true, Default),
            Category::RequiresAutomatic => info("requires-automatic", true, true, OptIn),
            Category::RequiresTransitiveAutomatic => {
                info("requires-transitive-automatic", true, true, Default)
            }
            Category::Restricted => info("restricted", true, true, Default),
            Category::Serial => info("serial", true, true, OptIn),
            Category::Static => info("static", true, true, Extra),
            Category::Strictfp => info("strictfp", true, true, Default),
            Category::Suppression => info("suppression", true, false, OptIn),
            Category::SuppressionOption => info("suppression-option", false, false, OptIn),
            Category::TextBlocks => info("text-blocks", true, true, OptIn),
            Category::ThisEscape => info("this-escape", true, true, OptIn),
            Category::Try => info("try", true, true, Extra),
            Category::Unchecked => info("unchecked", true, true, Extra),
            Category::Varargs => info("varargs", true, true, Extra),
        }
    }

    /// Returns the option token used in `--lint` flags and suppression annotations.
    pub fn token(self) -> &'static str {
        self.info().token
    }

    /// Returns `true` if a declaration annotation may suppress this category.
    ///
    /// Categories reported outside any declaration (command-line, class-path
    /// and output-file problems) can only be controlled by flags.
    pub fn annotation_suppressible(self) -> bool {
        self.info().annotation_suppressible
    }

    /// Returns `true` if unnecessary suppressions of this category are tracked.
    pub fn suppression_tracked(self) -> bool {
        self.info().suppression_tracked
    }

    /// Returns the tier deciding whether the category is on under each mode.
    pub fn tier(self) -> Tier {
        self.info().tier
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Catalog of all categories, indexed by option token.
///
/// Built once and never mutated, so a single instance is shared by every
/// compilation (and every worker thread of a parallel front end).
pub struct CategoryRegistry {
    by_token: HashMap<&'static str, Category>,
}

static GLOBAL: LazyLock<CategoryRegistry> = LazyLock::new(CategoryRegistry::new);

impl CategoryRegistry {
    fn new() -> Self {
        let by_token: HashMap<_, _> = Category::ALL.iter().map(|&c| (c.token(), c)).collect();
        assert_eq!(
            by_token.len(),
            Category::COUNT,
            "category option tokens must be unique"
        );
        Self { by_token }
    }

    /// Returns the process-wide registry.
    pub fn global() -> &'static CategoryRegistry {
        &GLOBAL
    }

    /// Looks up a category by its option token. Unknown tokens yield `None`.
    pub fn lookup(&self, token: &str) -> Option<Category> {
        self.by_token.get(token.trim()).copied()
    }

    /// Returns every known category.
    pub fn all(&self) -> CategorySet {
        CategorySet::all()
    }

    /// Returns the categories of the given tier.
    pub fn tier(&self, tier: Tier) -> CategorySet {
        Category::ALL.iter().copied().filter(|c| c.tier() == tier).collect()
    }
}
