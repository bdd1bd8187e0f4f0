//! Thread-safe diagnostic accumulator.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A thread-safe accumulator for diagnostics emitted during compilation.
///
/// The warning count is tracked atomically so callers can check it without
/// locking the diagnostic vector.
pub struct DiagnosticSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
    warning_count: AtomicUsize,
}

impl DiagnosticSink {
    /// Creates a new empty diagnostic sink.
    pub fn new() -> Self {
        Self {
            diagnostics: Mutex::new(Vec::new()),
            warning_count: AtomicUsize::new(0),
        }
    }

    /// Emits a diagnostic into the sink.
    pub fn emit(&self, diag: Diagnostic) {
        if diag.severity == Severity::Warning {
            self.warning_count.fetch_add(1, Ordering::Relaxed);
        }
        self.diagnostics.lock().push(diag);
    }

    /// Returns the number of warnings emitted so far.
    pub fn warning_count(&self) -> usize {
        self.warning_count.load(Ordering::Relaxed)
    }

    /// Returns `true` if any error-severity diagnostic has been emitted.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .lock()
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Takes all accumulated diagnostics, leaving the sink empty.
    pub fn take_all(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.diagnostics.lock())
    }

    /// Returns a snapshot of all accumulated diagnostics without draining.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.lock().clone()
    }
}

impl Default for DiagnosticSink {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hush_source::Span;

    #[test]
    fn empty_sink() {
        let sink = DiagnosticSink::new();
        assert_eq!(sink.warning_count(), 0);
        assert!(!sink.has_errors());
        assert!(sink.take_all().is_empty());
    }

    #[test]
    fn counts_warnings_only() {
        let sink = DiagnosticSink::new();
        sink.emit(Diagnostic::lint("cast", "redundant cast", Span::MAXIMAL));
        sink.emit(Diagnostic::error("bad", Span::MAXIMAL));
        assert_eq!(sink.warning_count(), 1);
        assert!(sink.has_errors());
        assert_eq!(sink.diagnostics().len(), 2);
    }

    #[test]
    fn take_all_drains() {
        let sink = DiagnosticSink::new();
        sink.emit(Diagnostic::lint("empty", "empty statement", Span::MAXIMAL));
        assert_eq!(sink.take_all().len(), 1);
        assert!(sink.take_all().is_empty());
        assert_eq!(sink.warning_count(), 1);
    }

    #[test]
    fn concurrent_emitters() {
        use std::sync::Arc;
        use std::thread;

        let sink = Arc::new(DiagnosticSink::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let sink = Arc::clone(&sink);
                thread::spawn(move || {
                    for _ in 0..50 {
                        sink.emit(Diagnostic::lint("serial", "missing id", Span::MAXIMAL));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(sink.warning_count(), 400);
    }
}
