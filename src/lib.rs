// Sheetporter - SQLite to Google Sheets export tool
// Copyright (c) 2026 Sheetporter Contributors
// Licensed under the MIT License

//! # Sheetporter - SQLite to Google Sheets export
//!
//! Sheetporter publishes analytics views from a local SQLite database into
//! Google Sheets workbooks, and converts folders of CSV files into XLSX
//! workbooks for offline hand-off.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Reading** tables and views from a SQLite database as sanitized text
//! - **Reconciling** destination tabs so each one mirrors its source view,
//!   header row included
//! - **Retrying** transient Sheets API faults with exponential backoff
//! - **Converting** CSV folders into one XLSX workbook per folder
//!
//! ## Architecture
//!
//! Sheetporter follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (export orchestration, reconciliation, retry)
//! - [`adapters`] - External integrations (SQLite, Google Sheets, XLSX)
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Stories and secrets configuration
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sheetporter::adapters::sheets::SheetsClient;
//! use sheetporter::adapters::sqlite::SqliteSource;
//! use sheetporter::core::export::ExportCoordinator;
//! use sheetporter::core::retry::RetryPolicy;
//! use sheetporter::config::ExportItem;
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut source = SqliteSource::open("ecom_retailer.db").await?;
//!     let sheets = SheetsClient::connect(Path::new("creds.json")).await?;
//!
//!     let coordinator = ExportCoordinator::new(&sheets, RetryPolicy::default());
//!     let items = vec![ExportItem::from_view_name("dash_orders")];
//!     let summary = coordinator
//!         .export_story(&mut source, "spreadsheet-id", &items)
//!         .await?;
//!
//!     println!("Exported {} tab(s)", summary.tabs_exported);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Sheetporter uses the [`domain::SheetporterError`] type for all errors:
//!
//! ```rust,no_run
//! use sheetporter::domain::SheetporterError;
//!
//! fn example() -> Result<(), SheetporterError> {
//!     let stories = sheetporter::config::load_stories_config("stories.yaml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Sheetporter uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!("Starting export");
//! warn!(view = "dash_orders", "View is empty, writing header only");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
