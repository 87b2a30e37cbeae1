//! Result type alias for sheetporter

use super::errors::SheetporterError;

/// Result type alias for sheetporter operations
///
/// This is a convenience type alias that uses `SheetporterError` as the error
/// type. Use this throughout the codebase for fallible operations.
pub type Result<T> = std::result::Result<T, SheetporterError>;
