//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod convert;
pub mod export;
pub mod tables;
pub mod validate;
