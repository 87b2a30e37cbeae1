//! Configuration schema for stories and secrets
//!
//! Two YAML files drive an export run:
//!
//! - the stories config maps a story identifier to the views it exports and
//!   the secrets key naming its destination workbook;
//! - the secrets file supplies workbook IDs (under `variables`) and an
//!   optional fallback path to the service-account credential file.
//!
//! Both are loaded once at startup and treated as read-only for the run.

use crate::domain::{Result, SheetporterError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Destination tab names are capped by the spreadsheet service.
pub const MAX_TAB_NAME_LEN: usize = 31;

/// One source-to-tab mapping within a story's explicit export list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExportItem {
    /// Name of the database view (or table) to read
    pub db_view: String,

    /// Name of the destination tab
    pub sheet_name: String,
}

impl ExportItem {
    /// Map a view name to a tab of the same name
    pub fn from_view_name(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            db_view: name.clone(),
            sheet_name: name,
        }
    }
}

/// Per-story export configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StoryConfig {
    /// Key under `variables` in the secrets file that holds the workbook ID
    pub sheet_id_var: String,

    /// Export every view whose name starts with this prefix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_prefix: Option<String>,

    /// Explicit export list, used when no prefix is configured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exports: Option<Vec<ExportItem>>,
}

/// The full stories configuration file: story identifier -> story config
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct StoriesConfig(pub BTreeMap<String, StoryConfig>);

impl StoriesConfig {
    /// Look up a story by identifier.
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the available stories when the
    /// identifier is unknown.
    pub fn story(&self, name: &str) -> Result<&StoryConfig> {
        self.0.get(name).ok_or_else(|| {
            SheetporterError::Configuration(format!(
                "Story '{}' not found. Available stories: {:?}",
                name,
                self.story_names()
            ))
        })
    }

    /// All configured story identifiers
    pub fn story_names(&self) -> Vec<&str> {
        self.0.keys().map(String::as_str).collect()
    }

    /// Validate every story entry.
    ///
    /// Checks that `sheet_id_var` is set and that explicit export lists
    /// name non-empty views and tab names within the service's length cap.
    pub fn validate(&self) -> Result<()> {
        for (story, config) in &self.0 {
            if config.sheet_id_var.trim().is_empty() {
                return Err(SheetporterError::Configuration(format!(
                    "Story '{story}' is missing 'sheet_id_var'"
                )));
            }

            if let Some(exports) = &config.exports {
                for item in exports {
                    if item.db_view.trim().is_empty() {
                        return Err(SheetporterError::Configuration(format!(
                            "Story '{story}' has an export with an empty 'db_view'"
                        )));
                    }
                    if item.sheet_name.trim().is_empty() {
                        return Err(SheetporterError::Configuration(format!(
                            "Story '{story}' has an export with an empty 'sheet_name'"
                        )));
                    }
                    if item.sheet_name.chars().count() > MAX_TAB_NAME_LEN {
                        return Err(SheetporterError::Configuration(format!(
                            "Story '{story}': sheet name '{}' exceeds {MAX_TAB_NAME_LEN} characters",
                            item.sheet_name
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}

/// The secrets file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecretsFile {
    /// Google Drive-related secrets
    #[serde(default)]
    pub google_drive: GoogleDriveSecrets,

    /// Named variables, including workbook IDs referenced by `sheet_id_var`
    #[serde(default)]
    pub variables: BTreeMap<String, String>,
}

/// Google Drive section of the secrets file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoogleDriveSecrets {
    /// Fallback path to the service-account JSON credential file,
    /// used when the credentials environment variable is unset
    #[serde(default)]
    pub service_account_path: Option<String>,
}

impl SecretsFile {
    /// Resolve a workbook ID by its `sheet_id_var` key.
    pub fn sheet_id(&self, var: &str) -> Result<&str> {
        match self.variables.get(var) {
            Some(id) if !id.trim().is_empty() => Ok(id),
            _ => Err(SheetporterError::Configuration(format!(
                "'{var}' not found in the secrets file under 'variables'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> StoriesConfig {
        serde_yaml::from_str(
            r#"
story_05:
  sheet_id_var: story_05_sheet_id
  view_prefix: dash_
story_07:
  sheet_id_var: story_07_sheet_id
  exports:
    - db_view: vp_summary
      sheet_name: Summary
"#,
        )
        .expect("sample config should parse")
    }

    #[test]
    fn test_story_lookup() {
        let config = sample_config();
        let story = config.story("story_05").unwrap();
        assert_eq!(story.view_prefix.as_deref(), Some("dash_"));
    }

    #[test]
    fn test_unknown_story_lists_available() {
        let config = sample_config();
        let err = config.story("story_99").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("story_99"));
        assert!(message.contains("story_05"));
        assert!(message.contains("story_07"));
    }

    #[test]
    fn test_validate_accepts_sample() {
        assert!(sample_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_sheet_id_var() {
        let config: StoriesConfig = serde_yaml::from_str(
            r#"
bad_story:
  sheet_id_var: ""
"#,
        )
        .unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("sheet_id_var"));
    }

    #[test]
    fn test_validate_rejects_long_tab_name() {
        let config: StoriesConfig = serde_yaml::from_str(
            r#"
bad_story:
  sheet_id_var: some_var
  exports:
    - db_view: v
      sheet_name: this_sheet_name_is_well_over_thirty_one_characters
"#,
        )
        .unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("exceeds 31"));
    }

    #[test]
    fn test_secrets_sheet_id_lookup() {
        let secrets: SecretsFile = serde_yaml::from_str(
            r#"
google_drive:
  service_account_path: /path/to/creds.json
variables:
  story_05_sheet_id: "1AbCdEf"
"#,
        )
        .unwrap();

        assert_eq!(secrets.sheet_id("story_05_sheet_id").unwrap(), "1AbCdEf");
        assert!(secrets.sheet_id("missing_var").is_err());
        assert_eq!(
            secrets.google_drive.service_account_path.as_deref(),
            Some("/path/to/creds.json")
        );
    }

    #[test]
    fn test_export_item_from_view_name() {
        let item = ExportItem::from_view_name("dash_orders");
        assert_eq!(item.db_view, "dash_orders");
        assert_eq!(item.sheet_name, "dash_orders");
    }
}
