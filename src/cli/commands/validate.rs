//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the stories configuration and secrets files.

use crate::config::{load_secrets, load_stories_config};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str, secrets_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config = %config_path, secrets = %secrets_path, "Validating configuration");

        println!("🔍 Validating configuration files");
        println!();

        let stories = match load_stories_config(config_path) {
            Ok(s) => {
                println!("✅ Stories config loaded: {config_path}");
                s
            }
            Err(e) => {
                println!("❌ Failed to load stories config {config_path}");
                println!("   Error: {e}");
                return Ok(1);
            }
        };

        let secrets = match load_secrets(secrets_path) {
            Ok(s) => {
                println!("✅ Secrets file loaded: {secrets_path}");
                s
            }
            Err(e) => {
                println!("❌ Failed to load secrets file {secrets_path}");
                println!("   Error: {e}");
                return Ok(1);
            }
        };

        println!();
        println!("Configuration Summary:");
        for name in stories.story_names() {
            let story = stories.story(name)?;
            let source = match (&story.view_prefix, &story.exports) {
                (Some(prefix), _) => format!("views matching '{prefix}*'"),
                (None, Some(exports)) => format!("{} explicit export(s)", exports.len()),
                (None, None) => "nothing configured".to_string(),
            };
            let sheet = match secrets.sheet_id(&story.sheet_id_var) {
                Ok(_) => "sheet ID resolved".to_string(),
                Err(_) => format!("⚠️  '{}' missing from secrets", story.sheet_id_var),
            };
            println!("  {name}: {source}, {sheet}");
        }
        println!();
        println!("✅ Configuration is valid");

        Ok(0)
    }
}
