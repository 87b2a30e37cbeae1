//! Tab reconciliation
//!
//! Makes one destination tab's content equal to a sanitized source table,
//! header row included. The policy over an existing tab:
//!
//! - no tab with that name: create one sized to the data, then write;
//! - the tab is the workbook's only tab: clear it in place (the service
//!   rejects deleting the last remaining tab) and resize it, then write;
//! - other tabs exist: delete it and create a fresh one with the same name,
//!   so no stale columns or formatting survive a source schema change.
//!
//! Every remote call goes through the backoff wrapper individually.

use crate::adapters::sheets::SheetsApi;
use crate::core::retry::{with_backoff, RetryPolicy};
use crate::domain::{Result, TableData};

/// Reconciles destination tabs against source tables
pub struct TabReconciler<'a, C: SheetsApi + ?Sized> {
    sheets: &'a C,
    retry: RetryPolicy,
}

impl<'a, C: SheetsApi + ?Sized> TabReconciler<'a, C> {
    /// Create a reconciler over an authenticated Sheets handle
    pub fn new(sheets: &'a C, retry: RetryPolicy) -> Self {
        Self { sheets, retry }
    }

    /// Make `tab_name` in the workbook contain exactly `table`.
    ///
    /// The tab list is fetched fresh on every call: earlier reconciliations
    /// in the same run may have changed the workbook's structure.
    pub async fn reconcile(
        &self,
        spreadsheet_id: &str,
        tab_name: &str,
        table: &TableData,
    ) -> Result<()> {
        let values = table.to_values();
        let row_count = values.len() as u32;
        let col_count = table.column_count().max(1) as u32;

        let workbook =
            with_backoff(&self.retry, || self.sheets.open_by_id(spreadsheet_id)).await?;

        match workbook.tab_by_name(tab_name) {
            Some(tab) if workbook.tabs.len() == 1 => {
                tracing::info!(
                    tab = tab_name,
                    "Tab is the only one in the workbook, clearing in place"
                );
                with_backoff(&self.retry, || self.sheets.clear_tab(spreadsheet_id, tab_name))
                    .await?;
                let tab_id = tab.id;
                with_backoff(&self.retry, || {
                    self.sheets
                        .resize_tab(spreadsheet_id, tab_id, row_count, col_count)
                })
                .await?;
            }
            Some(tab) => {
                tracing::info!(tab = tab_name, "Deleting existing tab for a clean slate");
                let tab_id = tab.id;
                with_backoff(&self.retry, || self.sheets.delete_tab(spreadsheet_id, tab_id))
                    .await?;
                with_backoff(&self.retry, || {
                    self.sheets
                        .create_tab(spreadsheet_id, tab_name, row_count, col_count)
                })
                .await?;
            }
            None => {
                tracing::info!(tab = tab_name, "Creating new tab");
                with_backoff(&self.retry, || {
                    self.sheets
                        .create_tab(spreadsheet_id, tab_name, row_count, col_count)
                })
                .await?;
            }
        }

        tracing::info!(
            tab = tab_name,
            rows = table.row_count(),
            columns = table.column_count(),
            "Writing table to tab"
        );
        with_backoff(&self.retry, || {
            self.sheets.write_rows(spreadsheet_id, tab_name, &values)
        })
        .await?;

        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::adapters::sheets::{TabInfo, WorkbookInfo};
    use crate::domain::SheetporterError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// In-memory workbook standing in for the remote service
    #[derive(Debug, Default)]
    pub(crate) struct MockSheets {
        pub state: Mutex<MockWorkbook>,
    }

    #[derive(Debug, Default)]
    pub(crate) struct MockWorkbook {
        pub tabs: Vec<MockTab>,
        pub next_id: i64,
        pub deletes: Vec<i64>,
    }

    #[derive(Debug, Clone)]
    pub(crate) struct MockTab {
        pub id: i64,
        pub title: String,
        pub grid: (u32, u32),
        pub values: Vec<Vec<String>>,
    }

    impl MockSheets {
        pub fn with_tabs(titles: &[(&str, Vec<Vec<String>>)]) -> Self {
            let tabs = titles
                .iter()
                .enumerate()
                .map(|(i, (title, values))| MockTab {
                    id: i as i64,
                    title: title.to_string(),
                    grid: (1000, 26),
                    values: values.clone(),
                })
                .collect::<Vec<_>>();
            let next_id = tabs.len() as i64;
            Self {
                state: Mutex::new(MockWorkbook {
                    tabs,
                    next_id,
                    deletes: Vec::new(),
                }),
            }
        }

        pub fn tab(&self, title: &str) -> Option<MockTab> {
            self.state
                .lock()
                .unwrap()
                .tabs
                .iter()
                .find(|t| t.title == title)
                .cloned()
        }
    }

    #[async_trait]
    impl SheetsApi for MockSheets {
        async fn open_by_id(&self, _spreadsheet_id: &str) -> Result<WorkbookInfo> {
            let state = self.state.lock().unwrap();
            Ok(WorkbookInfo {
                title: "mock".to_string(),
                tabs: state
                    .tabs
                    .iter()
                    .map(|t| TabInfo {
                        id: t.id,
                        title: t.title.clone(),
                    })
                    .collect(),
            })
        }

        async fn clear_tab(&self, _spreadsheet_id: &str, tab: &str) -> Result<()> {
            let mut state = self.state.lock().unwrap();
            let tab = state
                .tabs
                .iter_mut()
                .find(|t| t.title == tab)
                .ok_or_else(|| SheetporterError::Other("no such tab".into()))?;
            tab.values.clear();
            Ok(())
        }

        async fn delete_tab(&self, _spreadsheet_id: &str, tab_id: i64) -> Result<()> {
            let mut state = self.state.lock().unwrap();
            if state.tabs.len() == 1 {
                return Err(SheetporterError::Other(
                    "cannot delete the only tab".into(),
                ));
            }
            state.tabs.retain(|t| t.id != tab_id);
            state.deletes.push(tab_id);
            Ok(())
        }

        async fn create_tab(
            &self,
            _spreadsheet_id: &str,
            title: &str,
            rows: u32,
            cols: u32,
        ) -> Result<TabInfo> {
            let mut state = self.state.lock().unwrap();
            let id = state.next_id;
            state.next_id += 1;
            state.tabs.push(MockTab {
                id,
                title: title.to_string(),
                grid: (rows, cols),
                values: Vec::new(),
            });
            Ok(TabInfo {
                id,
                title: title.to_string(),
            })
        }

        async fn resize_tab(
            &self,
            _spreadsheet_id: &str,
            tab_id: i64,
            rows: u32,
            cols: u32,
        ) -> Result<()> {
            let mut state = self.state.lock().unwrap();
            let tab = state
                .tabs
                .iter_mut()
                .find(|t| t.id == tab_id)
                .ok_or_else(|| SheetporterError::Other("no such tab id".into()))?;
            tab.grid = (rows, cols);
            Ok(())
        }

        async fn write_rows(
            &self,
            _spreadsheet_id: &str,
            tab: &str,
            values: &[Vec<String>],
        ) -> Result<()> {
            let mut state = self.state.lock().unwrap();
            let tab = state
                .tabs
                .iter_mut()
                .find(|t| t.title == tab)
                .ok_or_else(|| SheetporterError::Other("no such tab".into()))?;
            tab.values = values.to_vec();
            Ok(())
        }
    }

    fn sample_table() -> TableData {
        TableData::new(
            vec!["id".to_string(), "name".to_string()],
            vec![
                vec!["1".to_string(), "widget".to_string()],
                vec!["2".to_string(), String::new()],
            ],
        )
    }

    #[tokio::test]
    async fn test_creates_missing_tab() {
        let sheets = MockSheets::with_tabs(&[("Sheet1", vec![])]);
        let reconciler = TabReconciler::new(&sheets, RetryPolicy::default());

        reconciler
            .reconcile("sheet-id", "dash_orders", &sample_table())
            .await
            .unwrap();

        let tab = sheets.tab("dash_orders").unwrap();
        // header + 2 data rows, 2 columns
        assert_eq!(tab.values.len(), 3);
        assert_eq!(tab.values[0], vec!["id", "name"]);
        assert_eq!(tab.values[2][1], "");
        assert_eq!(tab.grid, (3, 2));
        // the pre-existing default tab is untouched
        assert!(sheets.tab("Sheet1").is_some());
    }

    #[tokio::test]
    async fn test_only_tab_is_cleared_not_deleted() {
        let stale = vec![vec![
            "old_a".to_string(),
            "old_b".to_string(),
            "old_c".to_string(),
        ]];
        let sheets = MockSheets::with_tabs(&[("dash_orders", stale)]);
        let reconciler = TabReconciler::new(&sheets, RetryPolicy::default());

        reconciler
            .reconcile("sheet-id", "dash_orders", &sample_table())
            .await
            .unwrap();

        let state = sheets.state.lock().unwrap();
        assert!(state.deletes.is_empty());
        assert_eq!(state.tabs.len(), 1);
        let tab = &state.tabs[0];
        assert_eq!(tab.values.len(), 3);
        assert_eq!(tab.values[0], vec!["id", "name"]);
        assert_eq!(tab.grid, (3, 2));
    }

    #[tokio::test]
    async fn test_existing_tab_is_deleted_and_recreated() {
        // Stale tab carries an extra column that must not survive.
        let stale = vec![
            vec!["id".to_string(), "name".to_string(), "extra".to_string()],
            vec!["9".to_string(), "old".to_string(), "junk".to_string()],
        ];
        let sheets = MockSheets::with_tabs(&[("Sheet1", vec![]), ("dash_orders", stale)]);
        let old_id = sheets.tab("dash_orders").unwrap().id;
        let reconciler = TabReconciler::new(&sheets, RetryPolicy::default());

        reconciler
            .reconcile("sheet-id", "dash_orders", &sample_table())
            .await
            .unwrap();

        let tab = sheets.tab("dash_orders").unwrap();
        assert_ne!(tab.id, old_id);
        assert_eq!(sheets.state.lock().unwrap().deletes, vec![old_id]);
        // extra column is gone: delete-and-recreate, not merge
        assert!(tab.values.iter().all(|row| row.len() == 2));
        assert_eq!(tab.values[0], vec!["id", "name"]);
    }

    #[tokio::test]
    async fn test_empty_source_writes_header_only() {
        let sheets = MockSheets::with_tabs(&[("Sheet1", vec![])]);
        let reconciler = TabReconciler::new(&sheets, RetryPolicy::default());
        let table = TableData::new(vec!["id".to_string()], Vec::new());

        reconciler
            .reconcile("sheet-id", "dash_empty", &table)
            .await
            .unwrap();

        let tab = sheets.tab("dash_empty").unwrap();
        assert_eq!(tab.values, vec![vec!["id".to_string()]]);
        assert_eq!(tab.grid, (1, 1));
    }
}
