//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Sheetporter using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Sheetporter - SQLite to Google Sheets export tool
#[derive(Parser, Debug)]
#[command(name = "sheetporter")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the stories configuration file
    #[arg(short, long, default_value = "stories.yaml", env = "SHEETPORTER_CONFIG")]
    pub config: String,

    /// Path to the secrets file
    #[arg(short, long, default_value = "secrets.yaml", env = "SHEETPORTER_SECRETS")]
    pub secrets: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "SHEETPORTER_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export a story's database views to its Google Sheets workbook
    Export(commands::export::ExportArgs),

    /// Convert a folder of CSV files into a single XLSX workbook
    Convert(commands::convert::ConvertArgs),

    /// List the tables and views in a SQLite database
    Tables(commands::tables::TablesArgs),

    /// Validate the stories configuration and secrets files
    ValidateConfig(commands::validate::ValidateArgs),
}
