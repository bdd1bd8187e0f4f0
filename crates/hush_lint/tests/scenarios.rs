//! End-to-end flows through parse, attribution and position queries.

use std::cell::RefCell;
use std::sync::Arc;

use hush_config::{parse_lint_flags, LintMode, LintSettings};
use hush_lint::{Augmented, Category, CategorySet, Compilation, Decl, DeclId, LintState, Node};
use hush_source::{FileId, Span};

fn file() -> FileId {
    FileId::from_raw(0)
}

fn span(start: u32, end: u32) -> Span {
    Span::new(file(), start, end)
}

fn flags(flags: &[&str]) -> LintSettings {
    parse_lint_flags(LintSettings::default(), flags).unwrap()
}

#[test]
fn suppression_disables_only_enabled_category() {
    let compilation = Compilation::new(flags(&["--lint:none,cast"]));
    let root = compilation.root();
    assert!(root.is_enabled(Category::Cast, false));

    let s = Decl::new(DeclId::from_raw(1), "S", span(0, 10)).suppressing(["cast"]);
    let Augmented::Changed(state) = root.augment(&s) else {
        panic!("suppressing declaration must derive a new state");
    };
    assert!(!state.is_enabled(Category::Cast, false));
    assert!(state.is_suppressed(Category::Cast, false));
    // Nothing else was enabled, so nothing else changed.
    assert!(state.enabled().is_empty());
}

#[test]
fn explicit_disable_is_recorded() {
    let compilation = Compilation::new(flags(&["--lint:-removal"]));
    assert!(compilation
        .explicitly_disabled_categories()
        .contains(CategorySet::REMOVAL));
    assert!(!compilation.root().is_enabled(Category::Removal, false));

    // `removal` is on by default; merely leaving a category off is not a disable.
    let plain = Compilation::new(flags(&["--lint:none"]));
    assert!(plain.explicitly_disabled_categories().is_empty());
}

#[test]
fn inner_declaration_re_enables_outer_suppression() {
    let mut compilation = Compilation::new(flags(&["--lint:cast"]));
    compilation.file_parsed(file(), vec![span(0, 100)]);

    let outer = Node::Class(
        Decl::new(DeclId::from_raw(1), "Outer", span(0, 100))
            .suppressing(["cast"])
            .with_child(Node::Method(Decl::new(DeclId::from_raw(2), "inner", span(40, 60)))),
    );
    compilation.declaration_attributed_with(&outer, |state, decl| {
        let derived = state.augmented(decl);
        if decl.name == "inner" {
            derived.enable(Category::Cast)
        } else {
            derived
        }
    });

    let inside = compilation.lint_at(file(), 50).unwrap();
    assert_eq!(inside.scope(), Some(DeclId::from_raw(2)));
    assert!(inside.is_enabled(Category::Cast, false));
    assert!(!inside.is_suppressed(Category::Cast, false));

    for pos in [0, 39, 60, 99] {
        let state = compilation.lint_at(file(), pos).unwrap();
        assert!(state.is_suppressed(Category::Cast, false), "at {pos}");
    }
    assert!(compilation
        .index()
        .file(file())
        .unwrap()
        .root()
        .is_properly_nested());
}

#[test]
fn deferred_reports_wait_for_flush() {
    let compilation = Compilation::new(flags(&["--lint:serial"]));
    let log = RefCell::new(Vec::new());
    let d = DeclId::from_raw(7);
    let final_state = compilation
        .root()
        .augmented(&Decl::new(d, "Ser", span(0, 10)).suppressing(["serial"]));
    let mut reporter = compilation.reporter();

    reporter.report(|state| log.borrow_mut().push(state.is_enabled(Category::Serial, false)));
    assert_eq!(*log.borrow(), vec![true]);

    reporter.set_scope(Some(d));
    reporter.report(|state| log.borrow_mut().push(state.is_enabled(Category::Serial, false)));
    assert_eq!(log.borrow().len(), 1);

    reporter.flush(d, &final_state);
    assert_eq!(*log.borrow(), vec![true, false]);
    reporter.flush(d, &final_state);
    assert_eq!(log.borrow().len(), 2);
}

#[test]
fn positions_become_known_after_attribution() {
    let mut compilation = Compilation::new(LintSettings::default());
    compilation.file_parsed(file(), vec![span(0, 50), span(50, 120)]);

    let first = Node::Class(Decl::new(DeclId::from_raw(1), "First", span(0, 50)));
    let second = Node::Class(
        Decl::new(DeclId::from_raw(2), "Second", span(50, 120)).suppressing(["removal"]),
    );

    for pos in [0, 25, 50, 119] {
        assert!(compilation.lint_at(file(), pos).is_none(), "at {pos}");
    }

    compilation.declaration_attributed(&second);
    assert!(compilation.lint_at(file(), 25).is_none());
    let in_second = compilation.lint_at(file(), 50).unwrap();
    assert!(in_second.is_suppressed(Category::Removal, false));

    compilation.declaration_attributed(&first);
    let in_first = compilation.lint_at(file(), 25).unwrap();
    assert_eq!(*in_first, **compilation.root());
    assert!(compilation.index().is_complete(file()));
}

#[test]
fn best_match_prefers_deepest_annotated_declaration() {
    // package [0,1000) > class [100,900) > method [200,800) > variable [300,400)
    fn tree(annotate: [bool; 4]) -> Node {
        let mk = |raw: u32, name: &str, s: u32, e: u32, on: bool| {
            let d = Decl::new(DeclId::from_raw(raw), name, span(s, e));
            if on {
                d.suppressing(["unchecked"])
            } else {
                d
            }
        };
        let var = Node::Variable(mk(4, "v", 300, 400, annotate[3]));
        let method = Node::Method(mk(3, "m", 200, 800, annotate[2]).with_child(Node::Other(vec![var])));
        let class = Node::Class(mk(2, "C", 100, 900, annotate[1]).with_child(method));
        Node::Package(mk(1, "p", 0, 1000, annotate[0]).with_child(class))
    }

    let scope_at = |annotate: [bool; 4], pos: u32| {
        let mut compilation = Compilation::new(LintSettings::default());
        compilation.file_parsed(file(), vec![span(0, 1000)]);
        compilation.declaration_attributed(&tree(annotate));
        compilation.lint_at(file(), pos).unwrap().scope()
    };

    assert_eq!(scope_at([true; 4], 350), Some(DeclId::from_raw(4)));
    assert_eq!(scope_at([true; 4], 500), Some(DeclId::from_raw(3)));
    assert_eq!(scope_at([true; 4], 150), Some(DeclId::from_raw(2)));
    assert_eq!(scope_at([true; 4], 950), Some(DeclId::from_raw(1)));

    // Dropping the innermost annotation falls back to the next enclosing one.
    assert_eq!(scope_at([true, true, true, false], 350), Some(DeclId::from_raw(3)));
    assert_eq!(scope_at([true, false, false, false], 350), Some(DeclId::from_raw(1)));
    assert_eq!(scope_at([false; 4], 350), None);
}

#[test]
fn unnecessary_suppressions_end_to_end() {
    let mut compilation =
        Compilation::new(flags(&["--lint", "--lint:suppression,suppression-option,-static"]));
    compilation.file_parsed(file(), vec![span(0, 200)]);

    let class = Node::Class(
        Decl::new(DeclId::from_raw(1), "Legacy", span(0, 200))
            .suppressing(["rawtypes"])
            .with_child(Node::Method(
                Decl::new(DeclId::from_raw(2), "convert", span(20, 80))
                    .suppressing(["unchecked", "fallthrough", "bogus"]),
            ))
            .with_child(Node::Method(
                Decl::new(DeclId::from_raw(3), "old", span(100, 150)).deprecated(),
            )),
    );
    compilation.declaration_attributed(&class);

    // A raw type use and an unchecked call inside `convert`.
    let at = compilation.lint_at(file(), 30).unwrap();
    assert!(!at.is_enabled(Category::RawTypes, true));
    assert!(at.is_suppressed(Category::Unchecked, true));
    // A deprecated use inside `old` relies on the implied suppression only.
    let at_old = compilation.lint_at(file(), 120).unwrap();
    assert!(at_old.is_suppressed(Category::Deprecation, true));

    let messages: Vec<_> = compilation
        .unnecessary_suppressions()
        .into_iter()
        .map(|d| d.message)
        .collect();
    assert_eq!(
        messages,
        vec!["suppression of 'fallthrough' in 'convert' is unnecessary"]
    );

    let options: Vec<_> = compilation
        .unnecessary_suppression_options()
        .into_iter()
        .map(|d| d.message)
        .collect();
    assert_eq!(options, vec!["option '--lint:-static' has no effect"]);
}

#[test]
fn field_hushing_suppression_does_not_hide_class_report() {
    let mut compilation = Compilation::new(flags(&["--lint", "--lint:suppression"]));
    compilation.file_parsed(file(), vec![span(0, 100)]);
    let outer = Node::Class(
        Decl::new(DeclId::from_raw(1), "Outer", span(0, 100))
            .suppressing(["cast"])
            .with_child(Node::Variable(
                Decl::new(DeclId::from_raw(2), "first", span(0, 10)).suppressing(["suppression"]),
            )),
    );
    compilation.declaration_attributed(&outer);

    let at_start = compilation.lint_at(file(), 0).unwrap();
    assert_eq!(at_start.scope(), Some(DeclId::from_raw(2)));
    assert!(!at_start.is_enabled(Category::Suppression, false));

    let messages: Vec<_> = compilation
        .unnecessary_suppressions()
        .into_iter()
        .map(|d| d.message)
        .collect();
    assert_eq!(messages, vec!["suppression of 'cast' in 'Outer' is unnecessary"]);
}

#[test]
fn states_are_shared_across_threads() {
    let compilation = Compilation::new(LintSettings::with_mode(LintMode::All));
    let state: Arc<LintState> = compilation.root().augmented(
        &Decl::new(DeclId::from_raw(1), "Shared", span(0, 10)).suppressing(["cast", "serial"]),
    );

    std::thread::scope(|scope| {
        for i in 0..8 {
            let state = Arc::clone(&state);
            scope.spawn(move || {
                let category = if i % 2 == 0 { Category::Cast } else { Category::Serial };
                for _ in 0..100 {
                    assert!(state.is_suppressed(category, true));
                }
            });
        }
    });

    let entry = compilation.tracker().entry(DeclId::from_raw(1)).unwrap();
    assert!(entry.unused().is_empty());
}
