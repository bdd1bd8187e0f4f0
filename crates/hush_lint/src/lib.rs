//! Lint configuration and suppression resolution.
//!
//! Given global `--lint` settings and per-declaration suppression
//! annotations, this crate answers which lint categories are active at any
//! source position, and keeps track of whether each explicit suppression
//! ever suppressed anything.
//!
//! # Components
//!
//! - [`CategoryRegistry`]: the closed catalog of [`Category`] values.
//! - [`LintState`]: an immutable snapshot of enabled and suppressed
//!   categories, derived per declaration with [`LintState::augment`].
//! - [`suppressions_from`]: annotation tokens to suppressed categories.
//! - [`DeferredReporter`]: holds back reports until a declaration's final
//!   state is known.
//! - [`PositionIndex`]: a sparse tree of ranges per file, filled in one
//!   top-level declaration at a time.
//! - [`SuppressionTracker`]: the validation sink behind unnecessary
//!   suppression reporting.
//! - [`Compilation`]: owns all of the above for one compilation.

#![warn(missing_docs)]

mod category;
mod compilation;
mod decl;
mod deferred;
mod index;
mod set;
mod state;
mod suppression;
mod tracker;

pub use category::{Category, CategoryRegistry, Tier};
pub use compilation::Compilation;
pub use decl::{Decl, DeclAnnotations, DeclId, DeclKind, Node};
pub use deferred::{DeferredReporter, LintCallback};
pub use index::{FileInfo, LintRange, PositionIndex};
pub use set::CategorySet;
pub use state::{Augmented, LintState};
pub use suppression::{explicit_suppressions, suppressions_from};
pub use tracker::{DeclaredSuppression, SuppressionTracker};
