//! Configuration management
//!
//! YAML-based configuration loading and validation. Two files are involved:
//! the stories config (what to export, and where) and the secrets file
//! (workbook IDs and the credential-file fallback path).
//!
//! ```yaml
//! # stories.yaml
//! story_05:
//!   sheet_id_var: story_05_sheet_id
//!   view_prefix: dash_
//! story_07:
//!   sheet_id_var: story_07_sheet_id
//!   exports:
//!     - db_view: vp_summary
//!       sheet_name: Summary
//! ```
//!
//! ```yaml
//! # secrets.yaml
//! google_drive:
//!   service_account_path: /path/to/creds.json
//! variables:
//!   story_05_sheet_id: "1AbCdEf..."
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_secrets, load_stories_config, resolve_credentials_path, CREDS_ENV};
pub use schema::{
    ExportItem, GoogleDriveSecrets, SecretsFile, StoriesConfig, StoryConfig, MAX_TAB_NAME_LEN,
};
pub use secret::{secret_string, SecretString, SecretValue};
