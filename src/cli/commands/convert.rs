//! Convert command implementation
//!
//! This module implements the `convert` command: turn folders of CSV files
//! under a base directory into one XLSX workbook per folder.

use crate::adapters::xlsx::convert_folder;
use clap::Args;
use std::path::{Path, PathBuf};

/// Arguments for the convert command
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Base directory holding the CSV folders
    #[arg(long, default_value = "output_data")]
    pub base_dir: String,

    /// Convert only this folder under the base directory
    #[arg(long)]
    pub folder: Option<String>,
}

impl ConvertArgs {
    /// Execute the convert command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(base_dir = %self.base_dir, folder = ?self.folder, "Starting convert command");

        match self.run() {
            Ok(code) => Ok(code),
            Err(e) => {
                tracing::error!(error = %e, "Conversion failed");
                eprintln!("❌ Conversion failed: {e}");
                Ok(1)
            }
        }
    }

    fn run(&self) -> crate::domain::Result<i32> {
        let base_dir = Path::new(&self.base_dir);

        let folders = match &self.folder {
            Some(name) => vec![base_dir.join(name)],
            None => subfolders(base_dir)?,
        };

        if folders.is_empty() {
            println!("⚠️  No folders found under {}.", base_dir.display());
            return Ok(0);
        }

        let mut workbooks = 0usize;
        for folder in &folders {
            let name = folder
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let output = base_dir.join(format!("{name}_export.xlsx"));

            let sheets = convert_folder(folder, &output)?;
            if sheets > 0 {
                println!("📗 {} ({} sheet(s))", output.display(), sheets);
                workbooks += 1;
            } else {
                println!("⚠️  {} has no CSV files, skipped.", folder.display());
            }
        }

        println!();
        println!("✅ Wrote {workbooks} workbook(s).");
        Ok(0)
    }
}

/// Immediate subdirectories of the base directory, in name order.
fn subfolders(base_dir: &Path) -> crate::domain::Result<Vec<PathBuf>> {
    if !base_dir.is_dir() {
        return Err(crate::domain::SheetporterError::LocalFile(format!(
            "Base directory not found: {}",
            base_dir.display()
        )));
    }

    let mut folders: Vec<_> = std::fs::read_dir(base_dir)
        .map_err(|e| {
            crate::domain::SheetporterError::LocalFile(format!(
                "Cannot read {}: {}",
                base_dir.display(),
                e
            ))
        })?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_dir())
        .collect();
    folders.sort();
    Ok(folders)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_convert_all_subfolders() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("output_data");
        fs::create_dir_all(base.join("week_1")).unwrap();
        fs::create_dir_all(base.join("week_2")).unwrap();
        fs::write(base.join("week_1/orders.csv"), "id\n1\n").unwrap();
        fs::write(base.join("week_2/users.csv"), "id\n2\n").unwrap();

        let args = ConvertArgs {
            base_dir: base.to_string_lossy().into_owned(),
            folder: None,
        };

        assert_eq!(args.execute().await.unwrap(), 0);
        assert!(base.join("week_1_export.xlsx").exists());
        assert!(base.join("week_2_export.xlsx").exists());
    }

    #[tokio::test]
    async fn test_convert_single_folder() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("output_data");
        fs::create_dir_all(base.join("week_1")).unwrap();
        fs::create_dir_all(base.join("week_2")).unwrap();
        fs::write(base.join("week_1/orders.csv"), "id\n1\n").unwrap();
        fs::write(base.join("week_2/users.csv"), "id\n2\n").unwrap();

        let args = ConvertArgs {
            base_dir: base.to_string_lossy().into_owned(),
            folder: Some("week_2".to_string()),
        };

        assert_eq!(args.execute().await.unwrap(), 0);
        assert!(!base.join("week_1_export.xlsx").exists());
        assert!(base.join("week_2_export.xlsx").exists());
    }

    #[tokio::test]
    async fn test_missing_base_dir_exits_one() {
        let args = ConvertArgs {
            base_dir: "definitely_missing_dir".to_string(),
            folder: None,
        };
        assert_eq!(args.execute().await.unwrap(), 1);
    }
}
