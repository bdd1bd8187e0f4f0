//! The per-compilation context owning every lint component.

use crate::category::{Category, CategoryRegistry};
use crate::decl::{Decl, Node};
use crate::deferred::DeferredReporter;
use crate::index::PositionIndex;
use crate::set::CategorySet;
use crate::state::LintState;
use crate::tracker::SuppressionTracker;
use hush_config::LintSettings;
use hush_diagnostics::Diagnostic;
use hush_source::{FileId, Pos, Span};
use std::sync::{Arc, OnceLock};

/// Lint configuration for one compilation.
///
/// Owns the global settings, the root state (computed from the settings on
/// first use), the suppression tracker shared by all derived states, and
/// the position index fed by the parse and attribution passes.
pub struct Compilation {
    settings: LintSettings,
    registry: &'static CategoryRegistry,
    tracker: Arc<SuppressionTracker>,
    root: OnceLock<Arc<LintState>>,
    index: PositionIndex,
}

impl Compilation {
    /// Creates a compilation context for the given global settings.
    pub fn new(settings: LintSettings) -> Self {
        Self {
            settings,
            registry: CategoryRegistry::global(),
            tracker: Arc::new(SuppressionTracker::new()),
            root: OnceLock::new(),
            index: PositionIndex::new(),
        }
    }

    /// Returns the global settings.
    pub fn settings(&self) -> &LintSettings {
        &self.settings
    }

    /// Returns the category registry.
    pub fn registry(&self) -> &'static CategoryRegistry {
        self.registry
    }

    /// Returns the root state, computing it on first access.
    pub fn root(&self) -> &Arc<LintState> {
        self.root.get_or_init(|| {
            Arc::new(LintState::root_from_options(
                &self.settings,
                self.registry,
                Arc::clone(&self.tracker),
            ))
        })
    }

    /// Returns the categories disabled by an explicit `--lint:-category` option.
    pub fn explicitly_disabled_categories(&self) -> CategorySet {
        self.root().explicitly_disabled()
    }

    /// Returns the suppression tracker.
    pub fn tracker(&self) -> &SuppressionTracker {
        &self.tracker
    }

    /// Returns the position index.
    pub fn index(&self) -> &PositionIndex {
        &self.index
    }

    /// Records that `file` was parsed with top-level declarations at `decl_spans`.
    pub fn file_parsed(&mut self, file: FileId, decl_spans: Vec<Span>) {
        let root = Arc::clone(self.root());
        self.index.on_file_parsed(file, root, decl_spans);
    }

    /// Records that the top-level declaration `node` finished attribution.
    pub fn declaration_attributed(&mut self, node: &Node) {
        let root = Arc::clone(self.root());
        self.index.on_declaration_attributed(node, &root);
    }

    /// Like [`declaration_attributed`](Self::declaration_attributed), with a
    /// custom derivation of nested declaration states.
    pub fn declaration_attributed_with<F>(&mut self, node: &Node, derive: F)
    where
        F: Fn(&Arc<LintState>, &Decl) -> Arc<LintState>,
    {
        let root = Arc::clone(self.root());
        self.index.on_declaration_attributed_with(node, &root, derive);
    }

    /// Returns the state at `pos` in `file`, or `None` if it is not known yet.
    pub fn lint_at(&self, file: FileId, pos: Pos) -> Option<Arc<LintState>> {
        self.index.lint_at(file, pos)
    }

    /// Creates a deferred reporter in immediate mode against the root state.
    pub fn reporter<'a>(&self) -> DeferredReporter<'a> {
        DeferredReporter::new(Arc::clone(self.root()))
    }

    /// Reports explicit suppressions that never suppressed anything.
    ///
    /// One `suppression` warning per unused category, for declarations whose
    /// own state has `suppression` enabled. That is decided when the
    /// declaration's state is derived, so a nested declaration at the same
    /// position cannot hide its parent's report.
    pub fn unnecessary_suppressions(&self) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for entry in self.tracker.unused() {
            if !entry.reportable {
                continue;
            }
            for category in entry.unused().categories() {
                diagnostics.push(Diagnostic::lint(
                    Category::Suppression.token(),
                    format!(
                        "suppression of '{category}' in '{}' is unnecessary",
                        entry.name
                    ),
                    entry.span,
                ));
            }
        }
        diagnostics
    }

    /// Reports `--lint:-category` options that never changed an outcome.
    ///
    /// Empty unless `suppression-option` is enabled at the root.
    pub fn unnecessary_suppression_options(&self) -> Vec<Diagnostic> {
        let root = self.root();
        if !root.is_enabled(Category::SuppressionOption, false) {
            return Vec::new();
        }
        self.tracker
            .unused_options(root.explicitly_disabled())
            .categories()
            .map(|category| {
                Diagnostic::unlocated_lint(
                    Category::SuppressionOption.token(),
                    format!("option '--lint:-{category}' has no effect"),
                )
            })
            .collect()
    }
}
