// Subvault - DMZJ Subscription Backup Exporter
// Copyright (c) 2025 Subvault Contributors
// Licensed under the MIT License

//! # Subvault - DMZJ Subscription Backup Exporter
//!
//! Subvault exports a user's full DMZJ manga subscription list and
//! converts it into a Mihon/Tachiyomi backup document ready for import.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Fetching** the paginated subscription list with bounded concurrency
//! - **Retrying** individual pages on transient failures
//! - **Transforming** raw records into the reader's backup format
//! - **Writing** the raw archival dump and the backup document as JSON
//!
//! ## Architecture
//!
//! Subvault follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (paginated fetch, transformation)
//! - [`adapters`] - External integrations (DMZJ subscription API)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//! - [`persistence`] - Output file writing
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use subvault::adapters::dmzj::{DmzjClient, FetchRequest, SubscriptionSource};
//! use subvault::config::load_config;
//! use subvault::core::fetch::{FetchCoordinator, RetryPolicy};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("subvault.toml")?;
//!
//!     let client = DmzjClient::new(&config.dmzj)?;
//!     let retry = RetryPolicy::new(3, Duration::from_secs(2));
//!     let coordinator =
//!         FetchCoordinator::new(Arc::new(client) as Arc<dyn SubscriptionSource>, retry, 5);
//!
//!     let template = FetchRequest::from_config(&config.dmzj);
//!     let outcome = coordinator.run(&template).await;
//!
//!     println!("Collected {} records", outcome.records.len());
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
pub mod persistence;
