//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::SubvaultConfig;
use crate::config::secret_string;
use crate::domain::errors::SubvaultError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into SubvaultConfig
/// 4. Applies environment variable overrides (SUBVAULT_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
pub fn load_config(path: impl AsRef<Path>) -> Result<SubvaultConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(SubvaultError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        SubvaultError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    // Perform environment variable substitution
    let contents = substitute_env_vars(&contents)?;

    // Parse TOML
    let mut config: SubvaultConfig = toml::from_str(&contents)
        .map_err(|e| SubvaultError::Configuration(format!("Failed to parse TOML: {e}")))?;

    // Apply environment variable overrides
    apply_env_overrides(&mut config);

    // Validate configuration
    config
        .validate()
        .map_err(|e| SubvaultError::Configuration(format!("Configuration validation failed: {e}")))?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched. Referencing an unset variable is an
/// error so that a missing token fails loudly instead of being sent as the
/// literal placeholder.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("static regex");
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim_start();

        // Skip comment lines - don't process env vars in comments
        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(SubvaultError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the SUBVAULT_* prefix
///
/// Environment variables follow the pattern: SUBVAULT_<SECTION>_<KEY>
/// For example: SUBVAULT_DMZJ_USER_ID, SUBVAULT_OUTPUT_BACKUP_PATH
fn apply_env_overrides(config: &mut SubvaultConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("SUBVAULT_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // DMZJ overrides
    if let Ok(val) = std::env::var("SUBVAULT_DMZJ_BASE_URL") {
        config.dmzj.base_url = val;
    }
    if let Ok(val) = std::env::var("SUBVAULT_DMZJ_USER_ID") {
        config.dmzj.user_id = val;
    }
    if let Ok(val) = std::env::var("SUBVAULT_DMZJ_TOKEN") {
        config.dmzj.token = secret_string(val);
    }
    if let Ok(val) = std::env::var("SUBVAULT_DMZJ_CATEGORY") {
        if let Ok(category) = val.parse() {
            config.dmzj.category = category;
        }
    }
    if let Ok(val) = std::env::var("SUBVAULT_DMZJ_LETTER") {
        config.dmzj.letter = val;
    }
    if let Ok(val) = std::env::var("SUBVAULT_DMZJ_SUBSCRIPTION_STATUS") {
        if let Ok(status) = val.parse() {
            config.dmzj.subscription_status = status;
        }
    }
    if let Ok(val) = std::env::var("SUBVAULT_DMZJ_RETRY_MAX_RETRIES") {
        if let Ok(retries) = val.parse() {
            config.dmzj.retry.max_retries = retries;
        }
    }
    if let Ok(val) = std::env::var("SUBVAULT_DMZJ_RETRY_DELAY_MS") {
        if let Ok(delay) = val.parse() {
            config.dmzj.retry.delay_ms = delay;
        }
    }
    if let Ok(val) = std::env::var("SUBVAULT_DMZJ_FETCH_WORKERS") {
        if let Ok(workers) = val.parse() {
            config.dmzj.fetch.workers = workers;
        }
    }

    // Output overrides
    if let Ok(val) = std::env::var("SUBVAULT_OUTPUT_RAW_PATH") {
        config.output.raw_path = val;
    }
    if let Ok(val) = std::env::var("SUBVAULT_OUTPUT_BACKUP_PATH") {
        config.output.backup_path = val;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("SUBVAULT_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("SUBVAULT_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}
