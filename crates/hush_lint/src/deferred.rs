//! Reporting of lint decisions that must wait for a declaration's final state.
//!
//! Some diagnostics are detected before the enclosing declaration has been
//! attributed, so whether they are suppressed is not known yet. Code that
//! finds such a diagnostic hands a callback to the [`DeferredReporter`];
//! the callback runs against the final [`LintState`] when the declaration
//! is flushed.

use crate::decl::DeclId;
use crate::state::LintState;
use std::collections::HashMap;
use std::sync::Arc;

/// A queued report, run once against the state that finally applies.
pub type LintCallback<'a> = Box<dyn FnOnce(&LintState) + 'a>;

/// Runs reports immediately, or queues them under the current declaration.
///
/// With no current declaration (immediate mode) a report runs at once
/// against the immediate state. With a current declaration every report is
/// queued until [`flush`](Self::flush) for that declaration.
pub struct DeferredReporter<'a> {
    current: Option<DeclId>,
    immediate: Arc<LintState>,
    queues: HashMap<DeclId, Vec<LintCallback<'a>>>,
}

impl<'a> DeferredReporter<'a> {
    /// Creates a reporter in immediate mode, reporting against `immediate`.
    pub fn new(immediate: Arc<LintState>) -> Self {
        Self {
            current: None,
            immediate,
            queues: HashMap::new(),
        }
    }

    /// Runs `callback` now, or queues it under the current declaration.
    pub fn report(&mut self, callback: impl FnOnce(&LintState) + 'a) {
        match self.current {
            None => callback(&self.immediate),
            Some(decl) => self.queues.entry(decl).or_default().push(Box::new(callback)),
        }
    }

    /// Makes `decl` the current declaration and returns the previous one.
    ///
    /// Restoring the returned value is the caller's job.
    pub fn set_scope(&mut self, decl: Option<DeclId>) -> Option<DeclId> {
        std::mem::replace(&mut self.current, decl)
    }

    /// Switches back to immediate mode, reporting against `state` from now on.
    pub fn immediate(&mut self, state: Arc<LintState>) {
        self.immediate = state;
        self.current = None;
    }

    /// Runs every callback queued under `decl`, in order, against `state`.
    ///
    /// The queue is removed before any callback runs, so flushing the same
    /// declaration again (or one that never queued anything) does nothing.
    pub fn flush(&mut self, decl: DeclId, state: &LintState) {
        let Some(queue) = self.queues.remove(&decl) else {
            return;
        };
        tracing::trace!(?decl, reports = queue.len(), "flushing deferred lint reports");
        for callback in queue {
            callback(state);
        }
    }

    /// Returns the current declaration, or `None` in immediate mode.
    pub fn current_scope(&self) -> Option<DeclId> {
        self.current
    }

    /// Returns the number of reports queued under `decl`.
    pub fn pending(&self, decl: DeclId) -> usize {
        self.queues.get(&decl).map_or(0, Vec::len)
    }

    /// Returns `true` if any declaration still has queued reports.
    pub fn has_pending(&self) -> bool {
        !self.queues.is_empty()
    }
}
