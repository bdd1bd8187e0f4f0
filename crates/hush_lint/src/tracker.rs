//! Bookkeeping of which suppressions actually mattered.
//!
//! Every lint state of a compilation shares one [`SuppressionTracker`].
//! Declaring a suppression happens when a declaration's state is derived;
//! marking it used happens on validating reads. Whatever was declared but
//! never marked is an unnecessary suppression.

use crate::category::Category;
use crate::decl::DeclId;
use crate::set::CategorySet;
use hush_source::Span;
use parking_lot::Mutex;
use std::collections::HashMap;

/// A declaration's explicit suppressions together with the subset that was used.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeclaredSuppression {
    /// The declaration carrying the annotation.
    pub decl: DeclId,
    /// The declaration's name.
    pub name: String,
    /// The declaration's span.
    pub span: Span,
    /// Tracked categories named by the annotation.
    pub declared: CategorySet,
    /// Categories for which a validating read hit this suppression.
    pub used: CategorySet,
    /// Whether `suppression` is enabled in the declaration's own state.
    pub reportable: bool,
}

impl DeclaredSuppression {
    /// Returns the declared categories that were never used.
    pub fn unused(&self) -> CategorySet {
        self.declared - self.used
    }
}

#[derive(Default)]
struct Ledger {
    entries: Vec<DeclaredSuppression>,
    by_decl: HashMap<DeclId, usize>,
    options_used: CategorySet,
}

/// Thread-safe sink for suppression validation.
///
/// Lint states are shared read-only across worker threads while validating
/// reads still need to write here, hence the lock.
#[derive(Default)]
pub struct SuppressionTracker {
    ledger: Mutex<Ledger>,
}

impl SuppressionTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `decl` explicitly suppresses `categories`.
    ///
    /// `reportable` tells whether the declaration's own state has
    /// `suppression` enabled. Declaring the same declaration again widens its
    /// entry, keeps what was already marked used and takes the latest
    /// `reportable`.
    pub fn declare(
        &self,
        decl: DeclId,
        name: &str,
        span: Span,
        categories: CategorySet,
        reportable: bool,
    ) {
        if categories.is_empty() {
            return;
        }
        let mut ledger = self.ledger.lock();
        if let Some(&i) = ledger.by_decl.get(&decl) {
            let entry = &mut ledger.entries[i];
            entry.declared |= categories;
            entry.reportable = reportable;
            return;
        }
        let i = ledger.entries.len();
        ledger.entries.push(DeclaredSuppression {
            decl,
            name: name.to_string(),
            span,
            declared: categories,
            used: CategorySet::empty(),
            reportable,
        });
        ledger.by_decl.insert(decl, i);
    }

    /// Records that the suppression of `category` by `decl` changed an outcome.
    ///
    /// Marks for categories `decl` never declared (implied suppressions) are ignored.
    pub fn mark_used(&self, decl: DeclId, category: Category) {
        let mut ledger = self.ledger.lock();
        if let Some(&i) = ledger.by_decl.get(&decl) {
            let entry = &mut ledger.entries[i];
            if entry.declared.contains(category.as_set()) {
                entry.used.insert(category.as_set());
            }
        }
    }

    /// Records that the `--lint:-category` option changed an outcome.
    pub fn mark_option_used(&self, category: Category) {
        self.ledger.lock().options_used.insert(category.as_set());
    }

    /// Returns the entry for `decl`, if it declared any tracked suppression.
    pub fn entry(&self, decl: DeclId) -> Option<DeclaredSuppression> {
        let ledger = self.ledger.lock();
        ledger.by_decl.get(&decl).map(|&i| ledger.entries[i].clone())
    }

    /// Returns the entries with at least one unused category, in declaration order.
    pub fn unused(&self) -> Vec<DeclaredSuppression> {
        self.ledger
            .lock()
            .entries
            .iter()
            .filter(|e| !e.unused().is_empty())
            .cloned()
            .collect()
    }

    /// Returns the members of `disabled` whose disabling option never mattered.
    pub fn unused_options(&self, disabled: CategorySet) -> CategorySet {
        let tracked: CategorySet = disabled.categories().filter(|c| c.suppression_tracked()).collect();
        tracked - self.ledger.lock().options_used
    }
}
