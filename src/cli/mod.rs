//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Subvault using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Subvault - DMZJ subscription backup exporter
#[derive(Parser, Debug)]
#[command(name = "subvault")]
#[command(version, about, long_about = None)]
#[command(author = "Subvault Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "subvault.toml", env = "SUBVAULT_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "SUBVAULT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export the subscription list to backup files
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_export() {
        let cli = Cli::parse_from(["subvault", "export"]);
        assert_eq!(cli.config, "subvault.toml");
        assert!(matches!(cli.command, Commands::Export(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["subvault", "--config", "custom.toml", "export"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["subvault", "--log-level", "debug", "export"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["subvault", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["subvault", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }

    #[test]
    fn test_cli_parse_export_with_overrides() {
        let cli = Cli::parse_from(["subvault", "export", "--yes", "--workers", "2"]);
        match cli.command {
            Commands::Export(args) => {
                assert!(args.yes);
                assert_eq!(args.workers, Some(2));
            }
            other => panic!("expected export, got {other:?}"),
        }
    }
}
