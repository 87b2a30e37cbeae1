//! Configuration loading from YAML files
//!
//! Loads the stories configuration and the secrets file, and resolves the
//! path to the service-account credential file (environment variable first,
//! secrets-file fallback second).

use super::schema::{SecretsFile, StoriesConfig};
use crate::domain::{Result, SheetporterError};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming the service-account credential file
pub const CREDS_ENV: &str = "SHEETPORTER_CREDS_PATH";

/// Load the stories configuration from a YAML file.
///
/// The configuration is validated on load; an invalid file is rejected
/// before any database or network access happens.
pub fn load_stories_config(path: impl AsRef<Path>) -> Result<StoriesConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(SheetporterError::LocalFile(format!(
            "Stories config file not found at: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        SheetporterError::LocalFile(format!(
            "Failed to read stories config {}: {}",
            path.display(),
            e
        ))
    })?;

    let config: StoriesConfig = serde_yaml::from_str(&contents).map_err(|e| {
        SheetporterError::Configuration(format!(
            "Failed to parse stories config {}: {}",
            path.display(),
            e
        ))
    })?;

    config.validate()?;

    Ok(config)
}

/// Load the secrets file.
pub fn load_secrets(path: impl AsRef<Path>) -> Result<SecretsFile> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(SheetporterError::LocalFile(format!(
            "Secrets file not found at: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        SheetporterError::LocalFile(format!(
            "Failed to read secrets file {}: {}",
            path.display(),
            e
        ))
    })?;

    serde_yaml::from_str(&contents).map_err(|e| {
        SheetporterError::Configuration(format!(
            "Failed to parse secrets file {}: {}",
            path.display(),
            e
        ))
    })
}

/// Resolve the service-account credential file path.
///
/// The `SHEETPORTER_CREDS_PATH` environment variable wins; otherwise the
/// `google_drive.service_account_path` entry of the secrets file is used.
///
/// # Errors
///
/// Returns a local-file error with a remediation hint when neither source
/// supplies a path. This is checked before any database or network access.
pub fn resolve_credentials_path(secrets: &SecretsFile) -> Result<PathBuf> {
    if let Ok(path) = std::env::var(CREDS_ENV) {
        if !path.trim().is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    if let Some(path) = &secrets.google_drive.service_account_path {
        if !path.trim().is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    Err(SheetporterError::LocalFile(format!(
        "Environment variable '{CREDS_ENV}' is not set and the secrets file has no \
         'google_drive.service_account_path' fallback.\n\
         💡 Set the variable to the absolute path of your service account JSON file.\n\
         \x20  Example: export {CREDS_ENV}=\"/path/to/your/creds.json\""
    )))
}
