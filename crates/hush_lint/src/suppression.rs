//! Extraction of the categories a declaration suppresses.

use crate::category::CategoryRegistry;
use crate::decl::DeclAnnotations;
use crate::set::CategorySet;

/// Returns every category suppressed by a declaration with `annotations`.
///
/// This is the explicit suppressions (see [`explicit_suppressions`]) plus the
/// implied ones: a deprecated declaration suppresses
/// [`Category::Deprecation`](crate::Category::Deprecation)
/// inside itself even without an annotation naming it.
pub fn suppressions_from(
    registry: &CategoryRegistry,
    annotations: &DeclAnnotations,
    include_all: bool,
) -> CategorySet {
    let explicit = explicit_suppressions(
        registry,
        annotations.suppress_warnings.as_slice(),
        include_all,
    );
    explicit | implied_suppressions(annotations, explicit)
}

/// Maps suppression tokens to categories.
///
/// Unknown tokens are dropped. Unless `include_all` is set, categories that
/// cannot be suppressed by annotation are dropped too.
pub fn explicit_suppressions<S: AsRef<str>>(
    registry: &CategoryRegistry,
    tokens: &[S],
    include_all: bool,
) -> CategorySet {
    let mut set = CategorySet::empty();
    for token in tokens {
        let token = token.as_ref();
        match registry.lookup(token) {
            Some(c) if include_all || c.annotation_suppressible() => set.insert(c.as_set()),
            Some(c) => tracing::trace!(category = %c, "category cannot be suppressed by annotation"),
            None => tracing::trace!(token, "ignoring unknown suppression token"),
        }
    }
    set
}

/// Suppressions that follow from the deprecation marker alone.
fn implied_suppressions(annotations: &DeclAnnotations, explicit: CategorySet) -> CategorySet {
    if annotations.deprecated && !explicit.contains(CategorySet::DEPRECATION) {
        CategorySet::DEPRECATION
    } else {
        CategorySet::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;

    fn annotations(tokens: &[&str], deprecated: bool) -> DeclAnnotations {
        DeclAnnotations {
            suppress_warnings: tokens.iter().map(|t| t.to_string()).collect(),
            deprecated,
        }
    }

    #[test]
    fn known_tokens_map_to_categories() {
        let set = suppressions_from(
            CategoryRegistry::global(),
            &annotations(&["unchecked", "rawtypes"], false),
            false,
        );
        assert_eq!(set, CategorySet::from([Category::Unchecked, Category::RawTypes]));
    }

    #[test]
    fn unknown_tokens_are_dropped() {
        let set = suppressions_from(
            CategoryRegistry::global(),
            &annotations(&["xyz", "cast", "all"], false),
            false,
        );
        assert_eq!(set, CategorySet::of(Category::Cast));
    }

    #[test]
    fn flag_only_categories_need_include_all() {
        let registry = CategoryRegistry::global();
        let tokens = ["options", "path", "serial"];
        assert_eq!(
            explicit_suppressions(registry, &tokens[..], false),
            CategorySet::of(Category::Serial)
        );
        assert_eq!(
            explicit_suppressions(registry, &tokens[..], true),
            CategorySet::from([Category::Options, Category::Path, Category::Serial])
        );
    }

    #[test]
    fn deprecation_marker_implies_suppression() {
        let set = suppressions_from(CategoryRegistry::global(), &annotations(&[], true), false);
        assert_eq!(set, CategorySet::of(Category::Deprecation));
    }

    #[test]
    fn explicit_deprecation_is_not_doubled() {
        let set = suppressions_from(
            CategoryRegistry::global(),
            &annotations(&["deprecation"], true),
            false,
        );
        assert_eq!(set, CategorySet::of(Category::Deprecation));
    }

    #[test]
    fn no_annotations_no_suppressions() {
        let set = suppressions_from(CategoryRegistry::global(), &DeclAnnotations::default(), false);
        assert!(set.is_empty());
    }
}
