//! RowMask Core Types
//!
//! This crate provides the fundamental types used throughout RowMask:
//! - Column and schema model
//! - Record and value model
//! - Core error types

pub mod error;
pub mod record;
pub mod schema;

pub use error::{Error, Result};
pub use record::{Record, Value};
pub use schema::{Column, ColumnType, Schema};
