//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Subvault configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("Validating configuration file: {config_path}");
        println!();

        // load_config validates internally, so a successful load is a
        // valid configuration
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("Configuration is invalid");
                println!("   Error: {e}");
                return Ok(3); // Configuration error exit code
            }
        };

        println!("Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Endpoint: {}", config.dmzj.base_url);
        println!("  User ID: {}", config.dmzj.user_id);
        println!("  Category: {}", config.dmzj.category);
        println!("  Letter: {}", config.dmzj.letter);
        println!("  Subscription Status: {}", config.dmzj.subscription_status);
        println!("  Timeout: {}s", config.dmzj.timeout_seconds);
        println!(
            "  Retry: {} attempts, {}ms delay",
            config.dmzj.retry.max_retries, config.dmzj.retry.delay_ms
        );
        println!("  Workers: {}", config.dmzj.fetch.workers);
        println!("  Raw dump: {}", config.output.raw_path);
        println!("  Backup: {}", config.output.backup_path);
        println!();
        Ok(0)
    }
}
