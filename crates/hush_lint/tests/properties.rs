use std::sync::Arc;

use hush_config::{LintMode, LintSettings};
use hush_lint::{
    suppressions_from, Augmented, Category, CategoryRegistry, Compilation, Decl, DeclId, LintState,
};
use hush_source::{FileId, Span};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Step {
    Enable(Category),
    Suppress(Category),
    Augment { tokens: Vec<String>, deprecated: bool },
}

fn category() -> impl Strategy<Value = Category> {
    prop::sample::select(Category::ALL.to_vec())
}

fn non_suppressible() -> impl Strategy<Value = Category> {
    let categories: Vec<_> = Category::ALL
        .into_iter()
        .filter(|c| !c.annotation_suppressible())
        .collect();
    prop::sample::select(categories)
}

fn token() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => category().prop_map(|c| c.token().to_string()),
        1 => "[a-z]{1,8}",
    ]
}

fn mode() -> impl Strategy<Value = LintMode> {
    prop_oneof![
        Just(LintMode::Default),
        Just(LintMode::Extended),
        Just(LintMode::All),
        Just(LintMode::None),
    ]
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        category().prop_map(Step::Enable),
        category().prop_map(Step::Suppress),
        (prop::collection::vec(token(), 0..4), any::<bool>())
            .prop_map(|(tokens, deprecated)| Step::Augment { tokens, deprecated }),
    ]
}

fn decl(id: u32, tokens: &[String], deprecated: bool) -> Decl {
    let d = Decl::new(DeclId::from_raw(id), format!("d{id}"), Span::new(FileId::from_raw(0), 0, 1))
        .suppressing(tokens.iter().cloned());
    if deprecated {
        d.deprecated()
    } else {
        d
    }
}

fn run(root: &Arc<LintState>, steps: &[Step]) -> Arc<LintState> {
    let mut state = Arc::clone(root);
    for (i, step) in steps.iter().enumerate() {
        state = match step {
            Step::Enable(c) => state.enable(*c),
            Step::Suppress(c) => state.suppress(*c),
            Step::Augment { tokens, deprecated } => {
                state.augmented(&decl(i as u32, tokens, *deprecated))
            }
        };
    }
    state
}

proptest! {
    #[test]
    fn enabled_and_suppressed_stay_disjoint(
        mode in mode(),
        steps in prop::collection::vec(step(), 0..24),
    ) {
        let compilation = Compilation::new(LintSettings::with_mode(mode));
        let state = run(compilation.root(), &steps);
        prop_assert!((state.enabled() & state.suppressed()).is_empty());
        for c in Category::ALL {
            prop_assert!(!(state.is_enabled(c, true) && state.is_suppressed(c, true)));
        }
    }

    #[test]
    fn augment_is_unchanged_iff_nothing_is_suppressed(
        mode in mode(),
        tokens in prop::collection::vec(token(), 0..4),
        deprecated in any::<bool>(),
    ) {
        let compilation = Compilation::new(LintSettings::with_mode(mode));
        let d = decl(1, &tokens, deprecated);
        let expected = suppressions_from(CategoryRegistry::global(), &d.annotations, false);
        match compilation.root().augment(&d) {
            Augmented::Unchanged => prop_assert!(expected.is_empty()),
            Augmented::Changed(state) => {
                prop_assert!(!expected.is_empty());
                prop_assert_eq!(state.scope(), Some(d.id));
                for c in expected.categories() {
                    prop_assert!(state.is_suppressed(c, false));
                    prop_assert!(!state.is_enabled(c, false));
                }
            }
        }
    }

    #[test]
    fn augmenting_twice_with_the_same_declaration_is_idempotent(
        steps in prop::collection::vec(step(), 0..12),
        tokens in prop::collection::vec(token(), 0..4),
        deprecated in any::<bool>(),
    ) {
        let compilation = Compilation::new(LintSettings::default());
        let base = run(compilation.root(), &steps);
        let d = decl(99, &tokens, deprecated);
        let once = base.augmented(&d);
        let twice = once.augmented(&d);
        prop_assert_eq!(&*once, &*twice);
    }

    #[test]
    fn non_suppressible_categories_ignore_annotations(c in non_suppressible()) {
        let compilation = Compilation::new(LintSettings::with_mode(LintMode::All));
        let d = decl(1, &[c.token().to_string()], false);
        let state = compilation.root().augmented(&d);
        prop_assert!(state.is_enabled(c, false));
        prop_assert!(!state.is_suppressed(c, false));
    }
}
