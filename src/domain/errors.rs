//! Domain error types
//!
//! This module defines the error hierarchy for sheetporter. All errors are
//! domain-specific and don't expose third-party types; remote failures carry
//! enough context for the CLI to print actionable checklists.

use thiserror::Error;

/// Main sheetporter error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum SheetporterError {
    /// Configuration-related errors (unknown story, missing keys)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Local file access errors (credentials, database file, output paths)
    #[error("Local file error: {0}")]
    LocalFile(String),

    /// Source database errors
    #[error("Database error: {0}")]
    Database(String),

    /// Google Sheets API errors
    #[error("Google Sheets error: {0}")]
    Sheets(#[from] SheetsError),

    /// Workbook writing errors (XLSX output)
    #[error("Workbook error: {0}")]
    Workbook(String),

    /// CSV reading errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Google Sheets-specific errors
///
/// Errors that occur when talking to the Sheets REST API. The HTTP status is
/// preserved for server/client errors so the rendered message carries the
/// markers the retry wrapper classifies on.
#[derive(Debug, Error)]
pub enum SheetsError {
    /// Failed to reach the Sheets API at all
    #[error("Failed to connect to Google Sheets: {0}")]
    ConnectionFailed(String),

    /// Service account authentication failed
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Spreadsheet ID did not resolve to a workbook (404)
    #[error("Spreadsheet not found: {0}")]
    SpreadsheetNotFound(String),

    /// The API rejected the request for permission reasons (403)
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx other than 403/404)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Response body could not be parsed
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),
}

impl SheetsError {
    /// Whether this error is expected to succeed if retried after a delay.
    ///
    /// The retry wrapper classifies by rendered message text, matching the
    /// behavior callers have always relied on; this typed view exists for
    /// callers that hold the concrete error.
    pub fn is_transient(&self) -> bool {
        matches!(self, SheetsError::ServerError { .. })
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for SheetporterError {
    fn from(err: std::io::Error) -> Self {
        SheetporterError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for SheetporterError {
    fn from(err: serde_json::Error) -> Self {
        SheetporterError::Serialization(err.to_string())
    }
}

// Conversion from YAML parse errors
impl From<serde_yaml::Error> for SheetporterError {
    fn from(err: serde_yaml::Error) -> Self {
        SheetporterError::Configuration(format!("YAML parse error: {err}"))
    }
}

impl From<csv::Error> for SheetporterError {
    fn from(err: csv::Error) -> Self {
        SheetporterError::Csv(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for SheetporterError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        SheetporterError::Workbook(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SheetporterError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_sheets_error_conversion() {
        let sheets_err = SheetsError::SpreadsheetNotFound("abc123".to_string());
        let err: SheetporterError = sheets_err.into();
        assert!(matches!(err, SheetporterError::Sheets(_)));
    }

    #[test]
    fn test_server_error_message_carries_status() {
        let err = SheetsError::ServerError {
            status: 500,
            message: "backendError".to_string(),
        };
        assert!(err.to_string().contains("500"));
        assert!(err.is_transient());
    }

    #[test]
    fn test_client_error_not_transient() {
        let err = SheetsError::ClientError {
            status: 400,
            message: "bad range".to_string(),
        };
        assert!(!err.is_transient());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: SheetporterError = io_err.into();
        assert!(matches!(err, SheetporterError::Io(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>(": bad :").unwrap_err();
        let err: SheetporterError = yaml_err.into();
        assert!(matches!(err, SheetporterError::Configuration(_)));
        assert!(err.to_string().contains("YAML parse error"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let err = SheetporterError::Database("test".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
