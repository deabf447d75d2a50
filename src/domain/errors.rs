//! Domain error types
//!
//! This module defines the error hierarchy for Subvault. All errors are
//! domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Subvault error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum SubvaultError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Fetch-related errors (DMZJ subscription API)
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Output file write errors
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Page-fetch errors
///
/// A `Transient` error is recoverable and retried inside the retry policy;
/// it never escapes a page attempt. `Exhausted` means the retry budget for
/// one page was spent and the whole run must abort. Exhaustion is never
/// converted into an end-of-data signal.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Recoverable network or protocol failure for a single attempt
    #[error("transient failure on page {page}: {message}")]
    Transient { page: u32, message: String },

    /// Retry budget spent for one page; aborts the run
    #[error("page {page} failed after {attempts} attempts: {last_error}")]
    Exhausted {
        page: u32,
        attempts: usize,
        last_error: String,
    },

    /// A page worker task ended abnormally (panic or runtime shutdown)
    #[error("page worker aborted unexpectedly: {0}")]
    Aborted(String),
}

impl FetchError {
    /// Whether the error may succeed on a subsequent attempt
    pub fn is_transient(&self) -> bool {
        matches!(self, FetchError::Transient { .. })
    }

    /// Page number the error refers to, when known
    pub fn page(&self) -> Option<u32> {
        match self {
            FetchError::Transient { page, .. } | FetchError::Exhausted { page, .. } => Some(*page),
            FetchError::Aborted(_) => None,
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for SubvaultError {
    fn from(err: std::io::Error) -> Self {
        SubvaultError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for SubvaultError {
    fn from(err: serde_json::Error) -> Self {
        SubvaultError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for SubvaultError {
    fn from(err: toml::de::Error) -> Self {
        SubvaultError::Configuration(format!("TOML parse error: {err}"))
    }
}
