//! Source locations shared by the hush lint engine.
//!
//! This crate provides [`FileId`] for identifying translation units and
//! [`Span`] for lexical ranges, including the start-inclusive containment
//! rule used when mapping diagnostic positions back to declarations.

#![warn(missing_docs)]

pub mod file_id;
pub mod span;

pub use file_id::FileId;
pub use span::{Pos, Span};
