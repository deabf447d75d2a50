//! Configuration schema types
//!
//! This module defines the configuration structure that maps to the
//! `subvault.toml` file.

use crate::config::SecretString;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

/// Main Subvault configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Serialize, Deserialize)]
pub struct SubvaultConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// DMZJ subscription API configuration
    pub dmzj: DmzjConfig,

    /// Output file settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SubvaultConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.dmzj.validate()?;
        self.output.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Retry configuration for page fetches
///
/// The delay is fixed between attempts, matching the observed behavior of
/// the upstream endpoint under load. `max_retries` is the total number of
/// attempts for one page, not the number of re-tries after the first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total attempts per page before giving up
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// Fixed delay between attempts, in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub delay_ms: u64,
}

impl RetryConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_retries == 0 || self.max_retries > 10 {
            return Err(format!(
                "dmzj.retry.max_retries must be between 1 and 10, got {}",
                self.max_retries
            ));
        }
        Ok(())
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            delay_ms: default_retry_delay_ms(),
        }
    }
}

/// Concurrency configuration for page fetches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Maximum number of pages fetched concurrently
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl FetchConfig {
    fn validate(&self) -> Result<(), String> {
        if self.workers == 0 || self.workers > 50 {
            return Err(format!(
                "dmzj.fetch.workers must be between 1 and 50, got {}",
                self.workers
            ));
        }
        Ok(())
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
        }
    }
}

/// DMZJ subscription API configuration
#[derive(Debug, Serialize, Deserialize)]
pub struct DmzjConfig {
    /// Subscription endpoint URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Big-category filter (`type` query parameter, 0 = all)
    #[serde(default)]
    pub category: u32,

    /// Initial-letter filter (`letter` query parameter)
    #[serde(default = "default_letter")]
    pub letter: String,

    /// Subscription-status filter (`sub_type` query parameter)
    #[serde(default = "default_subscription_status")]
    pub subscription_status: u32,

    /// DMZJ user id (`uid` query parameter)
    pub user_id: String,

    /// DMZJ auth token (`dmzj_token` query parameter)
    /// Stored securely in memory and automatically zeroized on drop
    pub token: SecretString,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Retry configuration
    #[serde(default)]
    pub retry: RetryConfig,

    /// Concurrency configuration
    #[serde(default)]
    pub fetch: FetchConfig,
}

impl DmzjConfig {
    fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("dmzj.base_url cannot be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("dmzj.base_url must start with http:// or https://".to_string());
        }

        if self.user_id.is_empty() {
            return Err("dmzj.user_id cannot be empty".to_string());
        }

        if self.token.expose_secret().is_empty() {
            return Err("dmzj.token cannot be empty".to_string());
        }

        if self.timeout_seconds == 0 {
            return Err("dmzj.timeout_seconds must be > 0".to_string());
        }

        self.retry.validate()?;
        self.fetch.validate()?;
        Ok(())
    }
}

/// Output file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Path for the raw archival dump (untransformed records)
    #[serde(default = "default_raw_path")]
    pub raw_path: String,

    /// Path for the consolidated backup document
    #[serde(default = "default_backup_path")]
    pub backup_path: String,
}

impl OutputConfig {
    fn validate(&self) -> Result<(), String> {
        if self.raw_path.is_empty() {
            return Err("output.raw_path cannot be empty".to_string());
        }
        if self.backup_path.is_empty() {
            return Err("output.backup_path cannot be empty".to_string());
        }
        if self.raw_path == self.backup_path {
            return Err("output.raw_path and output.backup_path must differ".to_string());
        }
        Ok(())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            raw_path: default_raw_path(),
            backup_path: default_backup_path(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log file path
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily or hourly)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        Ok(())
    }

    /// Console-only logging, used before a config file is available
    pub fn console_only() -> Self {
        Self {
            local_enabled: false,
            local_path: String::new(),
            local_rotation: default_local_rotation(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    "https://v3api.dmzj.com/UCenter/subscribe".to_string()
}

fn default_letter() -> String {
    "all".to_string()
}

fn default_subscription_status() -> u32 {
    1
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_max_retries() -> usize {
    3
}

fn default_retry_delay_ms() -> u64 {
    2000
}

fn default_workers() -> usize {
    5
}

fn default_raw_path() -> String {
    "all_subscriptions.json".to_string()
}

fn default_backup_path() -> String {
    "backup_data.json".to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
