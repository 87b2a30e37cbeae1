//! External integrations
//!
//! Adapters isolate the third-party surfaces: the SQLite source database,
//! the Google Sheets destination API, and local XLSX workbook output.

pub mod sheets;
pub mod sqlite;
pub mod xlsx;
