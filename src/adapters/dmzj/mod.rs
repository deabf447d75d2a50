//! DMZJ subscription API adapter
//!
//! This module integrates with the DMZJ UCenter subscribe endpoint. The
//! [`SubscriptionSource`] trait is the seam between the HTTP client and the
//! fetch core.

pub mod client;
pub mod models;

pub use client::DmzjClient;
pub use models::{FetchRequest, PageOutcome, SubscriptionSource};
