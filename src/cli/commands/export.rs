//! Export command implementation
//!
//! This module implements the `export` command: fetch the full
//! subscription list, write the raw dump, and write the backup document.

use crate::adapters::dmzj::{DmzjClient, FetchRequest, SubscriptionSource};
use crate::config::load_config;
use crate::core::fetch::{FetchCoordinator, FetchSummary, RetryPolicy};
use crate::core::transform::{assemble_backup, transform_record};
use crate::persistence::write_json;
use clap::Args;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Indent width of the raw archival dump
const RAW_INDENT: usize = 2;

/// Indent width of the backup document
const BACKUP_INDENT: usize = 4;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Override the number of concurrent page workers
    #[arg(long)]
    pub workers: Option<usize>,

    /// Override the raw dump output path
    #[arg(long)]
    pub raw_output: Option<String>,

    /// Override the backup document output path
    #[arg(long)]
    pub backup_output: Option<String>,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        // Load configuration
        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(3); // Configuration error exit code
            }
        };

        // Apply CLI overrides
        if let Some(workers) = self.workers {
            tracing::info!(workers = workers, "Overriding worker count from CLI");
            config.dmzj.fetch.workers = workers;
        }

        if let Some(raw_output) = &self.raw_output {
            config.output.raw_path = raw_output.clone();
        }

        if let Some(backup_output) = &self.backup_output {
            config.output.backup_path = backup_output.clone();
        }

        // Re-validate after overrides
        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(3);
        }

        // Confirmation prompt (unless --yes)
        if !self.yes {
            println!("Export Configuration:");
            println!("  Endpoint: {}", config.dmzj.base_url);
            println!("  User ID: {}", config.dmzj.user_id);
            println!("  Workers: {}", config.dmzj.fetch.workers);
            println!("  Raw dump: {}", config.output.raw_path);
            println!("  Backup: {}", config.output.backup_path);
            println!();
            print!("Proceed with export? [y/N]: ");
            use std::io::{self, Write};
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;

            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Export cancelled.");
                return Ok(0);
            }
        }

        // Build the client and coordinator
        let client = match DmzjClient::new(&config.dmzj) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to build HTTP client");
                eprintln!("Failed to initialize export: {e}");
                return Ok(3);
            }
        };

        let retry = RetryPolicy::new(
            config.dmzj.retry.max_retries,
            Duration::from_millis(config.dmzj.retry.delay_ms),
        );
        let coordinator = FetchCoordinator::new(
            Arc::new(client) as Arc<dyn SubscriptionSource>,
            retry,
            config.dmzj.fetch.workers,
        );

        println!("Starting export...");
        let started = Instant::now();

        let template = FetchRequest::from_config(&config.dmzj);
        let outcome = coordinator.run(&template).await;

        let mut summary = FetchSummary::new().with_duration(started.elapsed());
        summary.total_records = outcome.records.len();
        summary.pages = outcome.pages;
        summary.failure_reason = outcome.failure.as_ref().map(|f| f.to_string());

        // Nothing collected and no failure: the account has no
        // subscriptions matching the filters. Write nothing.
        if outcome.records.is_empty() && outcome.is_complete() {
            tracing::warn!("No subscriptions matched the configured filters");
            summary.log_summary();
            println!();
            println!("No subscriptions found. No output written.");
            return Ok(1);
        }

        // Write outputs for whatever was collected, even on a partial run
        if !outcome.records.is_empty() {
            if let Err(e) = write_json(
                Path::new(&config.output.raw_path),
                &outcome.records,
                RAW_INDENT,
            ) {
                tracing::error!(error = %e, "Failed to write raw dump");
                eprintln!("Failed to write raw dump: {e}");
                return Ok(4); // Persistence error exit code
            }

            let entries: Vec<_> = outcome.records.iter().map(transform_record).collect();
            summary.entries_written = entries.len();
            let backup = assemble_backup(entries);

            if let Err(e) = write_json(
                Path::new(&config.output.backup_path),
                &backup,
                BACKUP_INDENT,
            ) {
                tracing::error!(error = %e, "Failed to write backup document");
                eprintln!("Failed to write backup document: {e}");
                return Ok(4);
            }
        }

        summary.log_summary();

        // Display summary
        println!();
        println!("Export Summary:");
        println!("  Records: {}", summary.total_records);
        println!("  Pages: {}", summary.pages);
        println!("  Entries written: {}", summary.entries_written);
        println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
        println!();

        match &outcome.failure {
            Some(failure) => {
                println!("Export aborted early: {failure}");
                println!("Partial output written for the pages collected so far.");
                Ok(2) // Fetch failure exit code
            }
            None => {
                println!("Export completed successfully!");
                println!("  Raw dump: {}", config.output.raw_path);
                println!("  Backup: {}", config.output.backup_path);
                Ok(0)
            }
        }
    }
}
