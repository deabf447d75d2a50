//! Configuration management for Subvault.
//!
//! Subvault uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `SUBVAULT_*` environment variable overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [dmzj]
//! user_id = "119517"
//! token = "${SUBVAULT_DMZJ_TOKEN}"
//!
//! [dmzj.retry]
//! max_retries = 3
//! delay_ms = 2000
//!
//! [dmzj.fetch]
//! workers = 5
//!
//! [output]
//! raw_path = "all_subscriptions.json"
//! backup_path = "backup_data.json"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, DmzjConfig, FetchConfig, LoggingConfig, OutputConfig, RetryConfig,
    SubvaultConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
