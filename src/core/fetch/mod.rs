//! Paginated fetch engine
//!
//! The engine pages through the server-driven subscription list with a
//! bounded pool of page workers, retrying each page independently and
//! detecting termination on the first empty page. See
//! [`coordinator::FetchCoordinator`] for the state machine.

pub mod coordinator;
pub mod retry;
pub mod summary;

pub use coordinator::{FetchCoordinator, FetchOutcome};
pub use retry::RetryPolicy;
pub use summary::FetchSummary;
