//! Export orchestration
//!
//! Resolves a story's export items (by view prefix or explicit list) and
//! drives the tab reconciler over them, strictly one item at a time. The
//! first non-transient failure aborts the whole run; the failing source is
//! reported alongside the underlying error.

pub mod reconciler;
pub mod summary;

pub use reconciler::TabReconciler;
pub use summary::ExportSummary;

use crate::adapters::sheets::SheetsApi;
use crate::adapters::sqlite::SqliteSource;
use crate::config::{ExportItem, StoryConfig};
use crate::core::retry::{with_backoff, RetryPolicy};
use crate::domain::Result;
use std::time::Instant;

/// Resolve the export items for a story.
///
/// A configured `view_prefix` wins: every view whose name starts with the
/// prefix maps to a tab of the same name. Otherwise the explicit `exports`
/// list is used. A story configured with neither yields an empty list.
pub async fn resolve_export_items(
    source: &mut SqliteSource,
    story: &StoryConfig,
) -> Result<Vec<ExportItem>> {
    if let Some(prefix) = &story.view_prefix {
        tracing::info!(prefix = %prefix, "Finding views by prefix");
        let views = source.views_with_prefix(prefix).await?;
        return Ok(views.into_iter().map(ExportItem::from_view_name).collect());
    }

    if let Some(exports) = &story.exports {
        tracing::info!(count = exports.len(), "Using configured export list");
        return Ok(exports.clone());
    }

    Ok(Vec::new())
}

/// Drives one story's export end to end
pub struct ExportCoordinator<'a, C: SheetsApi + ?Sized> {
    sheets: &'a C,
    retry: RetryPolicy,
}

impl<'a, C: SheetsApi + ?Sized> ExportCoordinator<'a, C> {
    /// Create a coordinator over an authenticated Sheets handle
    pub fn new(sheets: &'a C, retry: RetryPolicy) -> Self {
        Self { sheets, retry }
    }

    /// Export every item into the destination workbook, sequentially.
    ///
    /// # Errors
    ///
    /// Any failure aborts the run immediately. The failing item's source
    /// name is logged with the error before it propagates unchanged, so the
    /// caller can still match on the concrete failure class.
    pub async fn export_story(
        &self,
        source: &mut SqliteSource,
        spreadsheet_id: &str,
        items: &[ExportItem],
    ) -> Result<ExportSummary> {
        let started = Instant::now();
        let mut summary = ExportSummary::new();

        let workbook =
            with_backoff(&self.retry, || self.sheets.open_by_id(spreadsheet_id)).await?;
        tracing::info!(workbook = %workbook.title, items = items.len(), "Starting export");

        let reconciler = TabReconciler::new(self.sheets, self.retry);

        for item in items {
            let table = source.fetch_table(&item.db_view).await.map_err(|e| {
                tracing::error!(view = %item.db_view, error = %e, "Failed to read source");
                e
            })?;

            reconciler
                .reconcile(spreadsheet_id, &item.sheet_name, &table)
                .await
                .map_err(|e| {
                    tracing::error!(
                        view = %item.db_view,
                        tab = %item.sheet_name,
                        error = %e,
                        "Failed to reconcile tab"
                    );
                    e
                })?;

            tracing::info!(view = %item.db_view, tab = %item.sheet_name, "Exported");
            summary.record_tab(table.row_count());
        }

        summary.duration = started.elapsed();
        Ok(summary)
    }
}
