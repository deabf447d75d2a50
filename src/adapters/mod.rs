//! External integrations
//!
//! Adapters wrap remote services behind domain-facing traits so the core
//! never touches HTTP types directly.

pub mod dmzj;
