//! Result type alias for Subvault operations

use super::errors::SubvaultError;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, SubvaultError>;
