//! Wire models for the Google Sheets REST API
//!
//! Response shapes are deserialized here and converted to the small
//! domain-facing types (`WorkbookInfo`, `TabInfo`) so the rest of the crate
//! never handles raw API structures.

use serde::{Deserialize, Serialize};

/// Domain-facing description of a workbook: its title and tabs
#[derive(Debug, Clone)]
pub struct WorkbookInfo {
    /// Workbook title
    pub title: String,

    /// Tabs, in workbook order
    pub tabs: Vec<TabInfo>,
}

impl WorkbookInfo {
    /// Find a tab by its title.
    pub fn tab_by_name(&self, name: &str) -> Option<&TabInfo> {
        self.tabs.iter().find(|tab| tab.title == name)
    }
}

/// Domain-facing description of a single tab
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabInfo {
    /// Numeric sheet ID used by structural operations (delete, resize)
    pub id: i64,

    /// Tab title
    pub title: String,
}

/// `spreadsheets.get` response
#[derive(Debug, Deserialize)]
pub struct SpreadsheetResponse {
    pub properties: SpreadsheetProperties,
    #[serde(default)]
    pub sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
pub struct SpreadsheetProperties {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct SheetEntry {
    pub properties: SheetProperties,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetProperties {
    pub sheet_id: i64,
    pub title: String,
}

impl From<SpreadsheetResponse> for WorkbookInfo {
    fn from(response: SpreadsheetResponse) -> Self {
        WorkbookInfo {
            title: response.properties.title,
            tabs: response
                .sheets
                .into_iter()
                .map(|sheet| TabInfo {
                    id: sheet.properties.sheet_id,
                    title: sheet.properties.title,
                })
                .collect(),
        }
    }
}

/// Grid dimensions for `addSheet` / `updateSheetProperties` requests
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridProperties {
    pub row_count: u32,
    pub column_count: u32,
}

/// `batchUpdate` response; only the `addSheet` reply is inspected
#[derive(Debug, Deserialize)]
pub struct BatchUpdateResponse {
    #[serde(default)]
    pub replies: Vec<BatchUpdateReply>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchUpdateReply {
    #[serde(default)]
    pub add_sheet: Option<AddSheetReply>,
}

#[derive(Debug, Deserialize)]
pub struct AddSheetReply {
    pub properties: SheetProperties,
}

/// OAuth token endpoint response
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: u64,
}
