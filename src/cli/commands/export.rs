//! Export command implementation
//!
//! This module implements the `export` command: read a story's views out of
//! the local SQLite database and reconcile them into tabs of the story's
//! Google Sheets workbook.

use crate::adapters::sheets::SheetsClient;
use crate::adapters::sqlite::SqliteSource;
use crate::config::{load_secrets, load_stories_config, resolve_credentials_path};
use crate::core::export::{resolve_export_items, ExportCoordinator};
use crate::core::preflight::pre_flight_checks;
use crate::core::retry::RetryPolicy;
use crate::domain::{SheetporterError, SheetsError};
use clap::Args;
use std::path::Path;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Story identifier, as named in the stories configuration file
    pub story: String,

    /// Path to the SQLite database file
    #[arg(long, default_value = "ecom_retailer.db")]
    pub db_name: String,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config_path: &str, secrets_path: &str) -> anyhow::Result<i32> {
        tracing::info!(story = %self.story, db = %self.db_name, "Starting export command");

        match self.run(config_path, secrets_path).await {
            Ok(code) => Ok(code),
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("❌ Export failed: {e}");
                print_remediation_hints(&e);
                Ok(1)
            }
        }
    }

    async fn run(&self, config_path: &str, secrets_path: &str) -> crate::domain::Result<i32> {
        let stories = load_stories_config(config_path)?;
        let story = stories.story(&self.story)?;
        let secrets = load_secrets(secrets_path)?;
        let spreadsheet_id = secrets.sheet_id(&story.sheet_id_var)?.to_string();

        let creds_path = resolve_credentials_path(&secrets)?;
        let db_path = Path::new(&self.db_name);
        pre_flight_checks(&creds_path, db_path)?;

        let mut source = SqliteSource::open(db_path).await?;

        let items = resolve_export_items(&mut source, story).await?;
        if items.is_empty() {
            println!(
                "⚠️  Story '{}' has no views to export (no matching prefix views, no export list).",
                self.story
            );
            return Ok(0);
        }

        println!("🚀 Exporting {} view(s) for '{}'...", items.len(), self.story);

        let sheets = SheetsClient::connect(&creds_path).await?;
        let coordinator = ExportCoordinator::new(&sheets, RetryPolicy::default());
        let summary = coordinator
            .export_story(&mut source, &spreadsheet_id, &items)
            .await?;

        println!();
        println!("📊 Export Summary:");
        println!("  Tabs exported: {}", summary.tabs_exported);
        println!("  Rows written: {}", summary.total_rows);
        println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
        println!();
        println!("✅ Export completed successfully!");

        Ok(0)
    }
}

/// Print a remediation checklist for the failure classes a user can fix.
fn print_remediation_hints(error: &SheetporterError) {
    match error {
        SheetporterError::Sheets(SheetsError::SpreadsheetNotFound(id)) => {
            eprintln!();
            eprintln!("💡 The workbook '{id}' could not be opened. Check that:");
            eprintln!("   1. The sheet ID in your secrets file is correct.");
            eprintln!("   2. The sheet is shared with the service account email as Editor.");
        }
        SheetporterError::Sheets(SheetsError::PermissionDenied(_)) => {
            eprintln!();
            eprintln!("💡 The service account was rejected. Check that:");
            eprintln!("   1. The Google Sheets API is enabled for the service account's project.");
            eprintln!("   2. The sheet is shared with the service account email as Editor.");
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_args_default_db() {
        let args = ExportArgs {
            story: "story_05".to_string(),
            db_name: "ecom_retailer.db".to_string(),
        };
        assert_eq!(args.db_name, "ecom_retailer.db");
    }

    #[tokio::test]
    async fn test_missing_config_exits_one() {
        let args = ExportArgs {
            story: "story_05".to_string(),
            db_name: "missing.db".to_string(),
        };
        let code = args
            .execute("definitely_missing.yaml", "also_missing.yaml")
            .await
            .unwrap();
        assert_eq!(code, 1);
    }
}
