//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "subvault.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("Initializing Subvault configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(3); // Configuration error exit code
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Set your DMZJ credentials:");
                println!("     - dmzj.user_id (or SUBVAULT_DMZJ_USER_ID)");
                println!("     - dmzj.token (or SUBVAULT_DMZJ_TOKEN)");
                println!("  3. Validate configuration: subvault validate-config");
                println!("  4. Run export: subvault export");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(4) // Persistence error exit code
            }
        }
    }

    /// Generate sample configuration
    fn generate_config() -> String {
        r#"# Subvault Configuration File
# DMZJ subscription backup exporter

[application]
log_level = "info"

[dmzj]
base_url = "https://v3api.dmzj.com/UCenter/subscribe"
# Big-category filter (0 = all)
category = 0
# Initial-letter filter
letter = "all"
# Subscription status filter (1 = reading)
subscription_status = 1
# Your DMZJ user id; ${VAR} placeholders are substituted from the environment
user_id = "${SUBVAULT_DMZJ_USER_ID}"
token = "${SUBVAULT_DMZJ_TOKEN}"
timeout_seconds = 30

[dmzj.retry]
# Total attempts per page, including the first
max_retries = 3
delay_ms = 2000

[dmzj.fetch]
# Concurrent page workers
workers = 5

[output]
raw_path = "all_subscriptions.json"
backup_path = "backup_data.json"

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_config_is_valid_toml() {
        let content = InitArgs::generate_config();
        let parsed: toml::Value = toml::from_str(&content).unwrap();
        assert!(parsed.get("dmzj").is_some());
        assert!(parsed.get("output").is_some());
    }

    #[test]
    fn test_generated_config_mentions_env_placeholders() {
        let content = InitArgs::generate_config();
        assert!(content.contains("${SUBVAULT_DMZJ_USER_ID}"));
        assert!(content.contains("${SUBVAULT_DMZJ_TOKEN}"));
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("subvault.toml");
        fs::write(&path, "existing").unwrap();

        let args = InitArgs {
            output: path.to_string_lossy().to_string(),
            force: false,
        };
        let code = args.execute().await.unwrap();

        assert_eq!(code, 3);
        assert_eq!(fs::read_to_string(&path).unwrap(), "existing");
    }

    #[tokio::test]
    async fn test_init_writes_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("subvault.toml");

        let args = InitArgs {
            output: path.to_string_lossy().to_string(),
            force: false,
        };
        let code = args.execute().await.unwrap();

        assert_eq!(code, 0);
        assert!(path.exists());
    }
}
