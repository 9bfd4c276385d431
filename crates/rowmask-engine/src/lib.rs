//! RowMask Masking Engine
//!
//! This crate implements the masking core:
//! - The strategy library (full, email, regex and substring redaction)
//! - Path-addressed editing of JSON column values
//! - Output-schema projection
//! - The per-record masking dispatcher
//!
//! Rules and the projected schema are built once; record processing is
//! synchronous, one record at a time, with no cross-record state.

pub mod engine;
pub mod projector;
pub mod rules;
pub mod strategy;
pub mod tree;

pub use engine::MaskEngine;
pub use projector::project;
pub use rules::{ColumnRuleSpec, MaskKind, MaskRule, PathRule, PathRuleSpec, compile};
pub use strategy::MASK_CHAR;
pub use tree::PathExpr;
