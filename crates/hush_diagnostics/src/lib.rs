//! Diagnostic values and a thread-safe accumulator.
//!
//! The lint engine only answers whether a category is active at a position;
//! the [`Diagnostic`] and [`DiagnosticSink`] types here are what its callers
//! (and the meta-reporting helpers for unnecessary suppressions) emit once
//! that answer is known.

#![warn(missing_docs)]

pub mod diagnostic;
pub mod severity;
pub mod sink;

pub use diagnostic::Diagnostic;
pub use severity::Severity;
pub use sink::DiagnosticSink;
