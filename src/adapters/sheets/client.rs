//! Google Sheets REST client
//!
//! [`SheetsApi`] is the seam the reconciler works against: open a workbook,
//! clear, delete, create, resize, and write tabs. [`SheetsClient`] is the
//! production implementation over the Sheets REST API v4, authenticated with
//! a service-account bearer token.

use super::auth;
use super::models::{
    BatchUpdateResponse, GridProperties, SpreadsheetResponse, TabInfo, WorkbookInfo,
};
use crate::config::SecretString;
use crate::domain::{Result, SheetsError};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Response};
use secrecy::ExposeSecret;
use serde_json::json;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Production endpoint of the Sheets API
const SHEETS_API_BASE: &str = "https://sheets.googleapis.com";

/// Operations the export reconciler needs from the destination workbook API
#[async_trait]
pub trait SheetsApi: Send + Sync {
    /// Fetch a workbook's title and tab list by its opaque ID.
    async fn open_by_id(&self, spreadsheet_id: &str) -> Result<WorkbookInfo>;

    /// Clear every cell of the named tab, keeping the tab itself.
    async fn clear_tab(&self, spreadsheet_id: &str, tab: &str) -> Result<()>;

    /// Delete a tab by its numeric sheet ID.
    async fn delete_tab(&self, spreadsheet_id: &str, tab_id: i64) -> Result<()>;

    /// Create a new tab with the given title and grid size.
    async fn create_tab(
        &self,
        spreadsheet_id: &str,
        title: &str,
        rows: u32,
        cols: u32,
    ) -> Result<TabInfo>;

    /// Resize an existing tab's grid to exactly the given dimensions.
    async fn resize_tab(&self, spreadsheet_id: &str, tab_id: i64, rows: u32, cols: u32)
        -> Result<()>;

    /// Write a cell grid to the named tab, starting at A1.
    async fn write_rows(
        &self,
        spreadsheet_id: &str,
        tab: &str,
        values: &[Vec<String>],
    ) -> Result<()>;
}

/// Reqwest-backed Sheets API client
pub struct SheetsClient {
    base_url: String,
    client: Client,
    token: SecretString,
}

impl SheetsClient {
    /// Authenticate against the production API using a service-account
    /// credential file.
    pub async fn connect(creds_path: &Path) -> Result<Self> {
        let key = auth::load_service_account_key(creds_path)?;

        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| SheetsError::ConnectionFailed(format!("HTTP client: {e}")))?;

        let token = auth::fetch_access_token(&client, &key).await?;

        tracing::info!(client_email = %key.client_email, "Authenticated with Google Sheets");

        Ok(Self {
            base_url: SHEETS_API_BASE.to_string(),
            client,
            token,
        })
    }

    /// Build a client against an explicit endpoint with a pre-issued token.
    /// Used by tests against a local mock server.
    pub fn with_token(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: Client::new(),
            token: crate::config::secret_string(token.into()),
        }
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.token.expose_secret().as_ref())
    }

    /// Build a URL under `/v4/spreadsheets/{id}/`, percent-encoding each
    /// extra path segment (tab names may contain spaces).
    fn spreadsheet_url(&self, spreadsheet_id: &str, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| SheetsError::ConnectionFailed(format!("Invalid base URL: {e}")))?;
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| SheetsError::ConnectionFailed("Base URL cannot-be-a-base".into()))?;
            path.extend(["v4", "spreadsheets", spreadsheet_id]);
            path.extend(segments);
        }
        Ok(url)
    }

    async fn batch_update(
        &self,
        spreadsheet_id: &str,
        requests: serde_json::Value,
        context: &str,
    ) -> Result<BatchUpdateResponse> {
        // The method suffix rides on the ID segment: /v4/spreadsheets/{id}:batchUpdate
        let url = self.spreadsheet_url(&format!("{spreadsheet_id}:batchUpdate"), &[])?;

        let response = self
            .client
            .post(url)
            .header("Authorization", self.bearer())
            .json(&json!({ "requests": requests }))
            .send()
            .await
            .map_err(|e| SheetsError::ConnectionFailed(format!("{context}: {e}")))?;

        let response = check_response(response, spreadsheet_id).await?;
        response
            .json()
            .await
            .map_err(|e| SheetsError::InvalidResponse(format!("{context}: {e}")).into())
    }
}

#[async_trait]
impl SheetsApi for SheetsClient {
    async fn open_by_id(&self, spreadsheet_id: &str) -> Result<WorkbookInfo> {
        let mut url = self.spreadsheet_url(spreadsheet_id, &[])?;
        url.query_pairs_mut()
            .append_pair("fields", "properties.title,sheets.properties");

        let response = self
            .client
            .get(url)
            .header("Authorization", self.bearer())
            .send()
            .await
            .map_err(|e| SheetsError::ConnectionFailed(format!("open spreadsheet: {e}")))?;

        let response = check_response(response, spreadsheet_id).await?;
        let spreadsheet: SpreadsheetResponse = response
            .json()
            .await
            .map_err(|e| SheetsError::InvalidResponse(format!("open spreadsheet: {e}")))?;

        Ok(spreadsheet.into())
    }

    async fn clear_tab(&self, spreadsheet_id: &str, tab: &str) -> Result<()> {
        let range = format!("'{tab}':clear");
        let url = self.spreadsheet_url(spreadsheet_id, &["values", &range])?;

        let response = self
            .client
            .post(url)
            .header("Authorization", self.bearer())
            .send()
            .await
            .map_err(|e| SheetsError::ConnectionFailed(format!("clear tab: {e}")))?;

        check_response(response, spreadsheet_id).await?;
        Ok(())
    }

    async fn delete_tab(&self, spreadsheet_id: &str, tab_id: i64) -> Result<()> {
        self.batch_update(
            spreadsheet_id,
            json!([{ "deleteSheet": { "sheetId": tab_id } }]),
            "delete tab",
        )
        .await?;
        Ok(())
    }

    async fn create_tab(
        &self,
        spreadsheet_id: &str,
        title: &str,
        rows: u32,
        cols: u32,
    ) -> Result<TabInfo> {
        let grid = GridProperties {
            row_count: rows.max(1),
            column_count: cols.max(1),
        };
        let response = self
            .batch_update(
                spreadsheet_id,
                json!([{
                    "addSheet": {
                        "properties": {
                            "title": title,
                            "gridProperties": grid,
                        }
                    }
                }]),
                "create tab",
            )
            .await?;

        let properties = response
            .replies
            .into_iter()
            .find_map(|reply| reply.add_sheet)
            .map(|added| added.properties)
            .ok_or_else(|| {
                SheetsError::InvalidResponse("addSheet reply missing from batchUpdate".into())
            })?;

        Ok(TabInfo {
            id: properties.sheet_id,
            title: properties.title,
        })
    }

    async fn resize_tab(
        &self,
        spreadsheet_id: &str,
        tab_id: i64,
        rows: u32,
        cols: u32,
    ) -> Result<()> {
        let grid = GridProperties {
            row_count: rows.max(1),
            column_count: cols.max(1),
        };
        self.batch_update(
            spreadsheet_id,
            json!([{
                "updateSheetProperties": {
                    "properties": {
                        "sheetId": tab_id,
                        "gridProperties": grid,
                    },
                    "fields": "gridProperties.rowCount,gridProperties.columnCount",
                }
            }]),
            "resize tab",
        )
        .await?;
        Ok(())
    }

    async fn write_rows(
        &self,
        spreadsheet_id: &str,
        tab: &str,
        values: &[Vec<String>],
    ) -> Result<()> {
        let range = format!("'{tab}'");
        let mut url = self.spreadsheet_url(spreadsheet_id, &["values", &range])?;
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");

        let response = self
            .client
            .put(url)
            .header("Authorization", self.bearer())
            .json(&json!({ "values": values }))
            .send()
            .await
            .map_err(|e| SheetsError::ConnectionFailed(format!("write rows: {e}")))?;

        check_response(response, spreadsheet_id).await?;
        Ok(())
    }
}

/// Map a non-success HTTP response to the domain error taxonomy.
///
/// 404 means the workbook ID did not resolve; 403 means the API or the
/// sharing permissions rejected us; 5xx is a server fault and keeps its
/// status in the message so the retry wrapper can classify it.
async fn check_response(response: Response, spreadsheet_id: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let err = match status.as_u16() {
        404 => SheetsError::SpreadsheetNotFound(spreadsheet_id.to_string()),
        401 => SheetsError::AuthenticationFailed(body),
        403 => SheetsError::PermissionDenied(body),
        s if s >= 500 => SheetsError::ServerError {
            status: s,
            message: body,
        },
        s => SheetsError::ClientError {
            status: s,
            message: body,
        },
    };

    tracing::debug!(status = status.as_u16(), error = %err, "Sheets API request failed");
    Err(err.into())
}
