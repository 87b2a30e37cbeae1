//! Export summary and reporting

use std::time::Duration;

/// Summary of one export run
#[derive(Debug, Clone, Default)]
pub struct ExportSummary {
    /// Number of tabs reconciled
    pub tabs_exported: usize,

    /// Total data rows written (headers excluded)
    pub total_rows: usize,

    /// Duration of the run
    pub duration: Duration,
}

impl ExportSummary {
    /// Create a new empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one reconciled tab
    pub fn record_tab(&mut self, rows: usize) {
        self.tabs_exported += 1;
        self.total_rows += rows;
    }
}
