//! Core domain types
//!
//! This module contains the domain model shared across the crate:
//! error types, the crate-wide [`Result`] alias, and sanitized tabular data.

pub mod errors;
pub mod result;
pub mod table;

pub use errors::{SheetporterError, SheetsError};
pub use result::Result;
pub use table::TableData;
