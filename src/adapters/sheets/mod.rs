//! Google Sheets destination adapter
//!
//! Splits into three parts: wire models, service-account authentication,
//! and the REST client implementing the [`SheetsApi`] trait the reconciler
//! depends on.

pub mod auth;
pub mod client;
pub mod models;

pub use auth::{load_service_account_key, ServiceAccountKey};
pub use client::{SheetsApi, SheetsClient};
pub use models::{TabInfo, WorkbookInfo};
