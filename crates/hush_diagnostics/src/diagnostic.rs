//! Structured diagnostic messages.

use crate::severity::Severity;
use hush_source::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A diagnostic message, usually anchored at a source span.
///
/// Lint diagnostics carry the option token of the category that governs them
/// (e.g. `"unchecked"`), rendered as `[unchecked]` after the message the way
/// command-line compilers tag lint output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The severity level of this diagnostic.
    pub severity: Severity,
    /// Option token of the governing lint category, if any.
    pub lint: Option<String>,
    /// The main diagnostic message.
    pub message: String,
    /// The source span where the issue was detected, if it has one.
    pub span: Option<Span>,
    /// Explanatory footnotes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl Diagnostic {
    /// Creates a lint warning governed by the category with option token `lint`.
    pub fn lint(lint: impl Into<String>, message: impl Into<String>, span: Span) -> Self {
        Self {
            severity: Severity::Warning,
            lint: Some(lint.into()),
            message: message.into(),
            span: Some(span),
            notes: Vec::new(),
        }
    }

    /// Creates a lint warning with no source location (e.g. about a flag).
    pub fn unlocated_lint(lint: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            lint: Some(lint.into()),
            message: message.into(),
            span: None,
            notes: Vec::new(),
        }
    }

    /// Creates an error diagnostic not governed by any lint category.
    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self {
            severity: Severity::Error,
            lint: None,
            message: message.into(),
            span: Some(span),
            notes: Vec::new(),
        }
    }

    /// Adds a note to this diagnostic.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.severity)?;
        if let Some(lint) = &self.lint {
            write!(f, "[{lint}] ")?;
        }
        write!(f, "{}", self.message)?;
        for note in &self.notes {
            write!(f, "\n  note: {note}")?;
        }
        Ok(())
    }
}
