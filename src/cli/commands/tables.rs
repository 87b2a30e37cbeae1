//! Tables command implementation
//!
//! This module implements the `tables` command: a quick sanity check that
//! the SQLite database exists and actually contains tables.

use crate::adapters::sqlite::SqliteSource;
use clap::Args;

/// Arguments for the tables command
#[derive(Args, Debug)]
pub struct TablesArgs {
    /// Path to the SQLite database file
    #[arg(long, default_value = "ecom_retailer.db")]
    pub db_name: String,
}

impl TablesArgs {
    /// Execute the tables command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(db = %self.db_name, "Starting tables command");

        match self.run().await {
            Ok(code) => Ok(code),
            Err(e) => {
                tracing::error!(error = %e, "Database inspection failed");
                eprintln!("❌ Could not inspect database: {e}");
                Ok(1)
            }
        }
    }

    async fn run(&self) -> crate::domain::Result<i32> {
        let mut source = SqliteSource::open(&self.db_name).await?;
        let tables = source.table_names().await?;

        if tables.is_empty() {
            println!(
                "⚠️  {} exists but contains no tables.\n\
                 💡 It may be a freshly created empty database.",
                self.db_name
            );
            return Ok(0);
        }

        println!("📋 Tables in {}:", self.db_name);
        for table in &tables {
            println!("  - {table}");
        }
        println!();
        println!("✅ Found {} table(s).", tables.len());

        Ok(0)
    }
}
