//! Domain models and types for Subvault.
//!
//! The domain layer provides:
//! - **Raw records** ([`RawRecord`]) - opaque subscription records as
//!   returned by the source API
//! - **Backup types** ([`BackupEntry`], [`BackupDocument`]) - the reader's
//!   import schema
//! - **Error types** ([`SubvaultError`], [`FetchError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T>`]; errors convert
//! automatically with the `?` operator:
//!
//! ```rust,no_run
//! use subvault::domain::Result;
//!
//! fn example() -> Result<()> {
//!     let _config = subvault::config::load_config("subvault.toml")?;
//!     Ok(())
//! }
//! ```

pub mod backup;
pub mod errors;
pub mod record;
pub mod result;

// Re-export commonly used types for convenience
pub use backup::{BackupCategory, BackupDocument, BackupEntry, BackupExtensionRepo, BackupSource};
pub use errors::{FetchError, SubvaultError};
pub use record::RawRecord;
pub use result::Result;
