//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Configurable log levels
//! - Local file logging with rotation
//! - JSON-formatted file logs
//!
//! # Example
//!
//! ```no_run
//! use subvault::logging::init_logging;
//! use subvault::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};
