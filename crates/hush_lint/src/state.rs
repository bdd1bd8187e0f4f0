//! Immutable lint configuration snapshots and their derivation.
//!
//! A [`LintState`] answers "is category X enabled or suppressed here". The
//! root state comes from the global settings; every other state is derived
//! from a parent by [`augment`](LintState::augment) (annotation-driven) or by
//! the explicit [`enable`](LintState::enable) and
//! [`suppress`](LintState::suppress) overrides. Derivation always copies;
//! a state never changes after construction.

use crate::category::{Category, CategoryRegistry, Tier};
use crate::decl::{Decl, DeclId};
use crate::set::CategorySet;
use crate::suppression::{explicit_suppressions, suppressions_from};
use crate::tracker::SuppressionTracker;
use hush_config::{LintMode, LintSettings};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Result of [`LintState::augment`].
#[derive(Clone, Debug)]
pub enum Augmented {
    /// The declaration suppresses nothing; the parent state applies unchanged.
    Unchanged,
    /// The declaration has its own state.
    Changed(Arc<LintState>),
}

/// An immutable snapshot of which categories are enabled and which are suppressed.
///
/// `enabled` and `suppressed` are always disjoint. Equality compares the
/// configuration (sets, scope, suppression origins), not the identity of the
/// shared tracker.
#[derive(Clone)]
pub struct LintState {
    enabled: CategorySet,
    suppressed: CategorySet,
    scope: Option<DeclId>,
    /// Innermost annotated declaration responsible for each suppressed category.
    origins: BTreeMap<Category, DeclId>,
    explicitly_disabled: CategorySet,
    registry: &'static CategoryRegistry,
    tracker: Arc<SuppressionTracker>,
}

impl LintState {
    /// Computes the root state from global settings.
    ///
    /// The mode picks the baseline, explicit enables are added, and explicit
    /// disables are removed last and remembered for `suppression-option`
    /// reporting. Unknown tokens are ignored.
    pub fn root_from_options(
        settings: &LintSettings,
        registry: &'static CategoryRegistry,
        tracker: Arc<SuppressionTracker>,
    ) -> Self {
        let mut enabled = match settings.mode {
            LintMode::All => registry.all(),
            LintMode::None => CategorySet::empty(),
            LintMode::Default => registry.tier(Tier::Default),
            LintMode::Extended => registry.tier(Tier::Default) | registry.tier(Tier::Extra),
        };
        enabled |= lookup_all(registry, &settings.enable);
        let explicitly_disabled = lookup_all(registry, &settings.disable);
        enabled -= explicitly_disabled;

        tracing::debug!(
            mode = ?settings.mode,
            enabled = enabled.len(),
            disabled = explicitly_disabled.len(),
            "initialized root lint state"
        );

        Self {
            enabled,
            suppressed: CategorySet::empty(),
            scope: None,
            origins: BTreeMap::new(),
            explicitly_disabled,
            registry,
            tracker,
        }
    }

    /// Derives the state that applies inside `decl`.
    ///
    /// Returns [`Augmented::Unchanged`] exactly when the declaration
    /// suppresses nothing. Otherwise the suppressed categories move from
    /// `enabled` into `suppressed`, `decl` becomes the scope and the origin
    /// of those suppressions, and the explicit tracked ones are declared to
    /// the tracker together with whether the new state reports unnecessary
    /// suppressions.
    pub fn augment(self: &Arc<Self>, decl: &Decl) -> Augmented {
        let suppressions = suppressions_from(self.registry, &decl.annotations, false);
        if suppressions.is_empty() {
            return Augmented::Unchanged;
        }

        let explicit = explicit_suppressions(
            self.registry,
            decl.annotations.suppress_warnings.as_slice(),
            false,
        );
        let tracked: CategorySet = explicit
            .categories()
            .filter(|c| c.suppression_tracked())
            .collect();

        let mut next = (**self).clone();
        next.scope = Some(decl.id);
        next.enabled -= suppressions;
        next.suppressed |= suppressions;
        for c in suppressions.categories() {
            next.origins.insert(c, decl.id);
        }
        next.assert_disjoint();

        let reportable = next.enabled.contains(CategorySet::SUPPRESSION);
        self.tracker.declare(decl.id, &decl.name, decl.span, tracked, reportable);
        Augmented::Changed(Arc::new(next))
    }

    /// Like [`augment`](Self::augment), returning the parent itself when unchanged.
    pub fn augmented(self: &Arc<Self>, decl: &Decl) -> Arc<Self> {
        match self.augment(decl) {
            Augmented::Unchanged => Arc::clone(self),
            Augmented::Changed(state) => state,
        }
    }

    /// Returns a new state with `categories` enabled and no longer suppressed.
    ///
    /// The scope stays the parent's; see [`scoped_to`](Self::scoped_to).
    pub fn enable(&self, categories: impl Into<CategorySet>) -> Arc<Self> {
        let categories = categories.into();
        let mut next = self.clone();
        next.enabled |= categories;
        next.suppressed -= categories;
        next.origins.retain(|c, _| !categories.contains(c.as_set()));
        next.assert_disjoint();
        Arc::new(next)
    }

    /// Returns a new state with `categories` suppressed and no longer enabled.
    ///
    /// Programmatic suppressions have no annotation behind them, so they are
    /// never reported as unnecessary. The scope stays the parent's.
    pub fn suppress(&self, categories: impl Into<CategorySet>) -> Arc<Self> {
        let categories = categories.into();
        let mut next = self.clone();
        next.suppressed |= categories;
        next.enabled -= categories;
        next.origins.retain(|c, _| !categories.contains(c.as_set()));
        next.assert_disjoint();
        Arc::new(next)
    }

    /// Returns this state with `decl` as its scope.
    ///
    /// [`enable`](Self::enable) and [`suppress`](Self::suppress) cannot know
    /// which declaration they derive for, so the position index calls this
    /// before storing a state under `decl`. Returns `self` when the scope
    /// already matches.
    pub fn scoped_to(self: &Arc<Self>, decl: DeclId) -> Arc<Self> {
        if self.scope == Some(decl) {
            return Arc::clone(self);
        }
        let mut next = (**self).clone();
        next.scope = Some(decl);
        Arc::new(next)
    }

    /// Returns `true` if `category` is enabled.
    ///
    /// With `validate`, a suppression or disabling option that is the reason
    /// the category is off gets marked as used.
    pub fn is_enabled(&self, category: Category, validate: bool) -> bool {
        if validate {
            self.validate(category);
        }
        self.enabled.contains(category.as_set())
    }

    /// Returns `true` if `category` is suppressed.
    ///
    /// With `validate`, the responsible suppression gets marked as used.
    pub fn is_suppressed(&self, category: Category, validate: bool) -> bool {
        if validate {
            self.validate(category);
        }
        self.suppressed.contains(category.as_set())
    }

    /// Returns `true` if a check for `category` is worth running here.
    ///
    /// That is the case when the category is enabled, and also when it is
    /// off only because of a suppression (or disabling option) whose
    /// necessity is itself being checked, so the check can feed validation.
    pub fn is_active(&self, category: Category) -> bool {
        if self.enabled.contains(category.as_set()) {
            return true;
        }
        if !category.suppression_tracked() {
            return false;
        }
        (self.suppressed.contains(category.as_set()) && self.enabled.contains(CategorySet::SUPPRESSION))
            || (self.explicitly_disabled.contains(category.as_set())
                && self.enabled.contains(CategorySet::SUPPRESSION_OPTION))
    }

    fn validate(&self, category: Category) {
        if !category.suppression_tracked() || self.enabled.contains(category.as_set()) {
            return;
        }
        if let Some(&decl) = self.origins.get(&category) {
            self.tracker.mark_used(decl, category);
        } else if !self.suppressed.contains(category.as_set())
            && self.explicitly_disabled.contains(category.as_set())
        {
            self.tracker.mark_option_used(category);
        }
    }

    fn assert_disjoint(&self) {
        assert!(
            (self.enabled & self.suppressed).is_empty(),
            "lint state both enables and suppresses {:?}",
            self.enabled & self.suppressed
        );
    }

    /// Returns the enabled categories.
    pub fn enabled(&self) -> CategorySet {
        self.enabled
    }

    /// Returns the suppressed categories.
    pub fn suppressed(&self) -> CategorySet {
        self.suppressed
    }

    /// Returns the declaration this state belongs to, or `None` for the root.
    ///
    /// States stored in the position index are scoped to the declaration
    /// they were stored for.
    pub fn scope(&self) -> Option<DeclId> {
        self.scope
    }

    /// Returns the declaration whose annotation suppresses `category` here.
    pub fn suppression_origin(&self, category: Category) -> Option<DeclId> {
        self.origins.get(&category).copied()
    }

    /// Returns the categories disabled by an explicit `--lint:-category` option.
    pub fn explicitly_disabled(&self) -> CategorySet {
        self.explicitly_disabled
    }

    /// Returns the registry the state resolves tokens against.
    pub fn registry(&self) -> &'static CategoryRegistry {
        self.registry
    }
}

fn lookup_all(registry: &CategoryRegistry, tokens: &[String]) -> CategorySet {
    tokens
        .iter()
        .filter_map(|t| {
            let found = registry.lookup(t);
            if found.is_none() {
                tracing::trace!(token = %t, "ignoring unknown lint option");
            }
            found
        })
        .collect()
}

impl PartialEq for LintState {
    fn eq(&self, other: &Self) -> bool {
        self.enabled == other.enabled
            && self.suppressed == other.suppressed
            && self.scope == other.scope
            && self.origins == other.origins
            && self.explicitly_disabled == other.explicitly_disabled
    }
}

impl Eq for LintState {}

impl fmt::Debug for LintState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LintState")
            .field("scope", &self.scope)
            .field("enabled", &self.enabled)
            .field("suppressed", &self.suppressed)
            .finish_non_exhaustive()
    }
}
