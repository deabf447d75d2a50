//! Fetch request and page outcome types

use crate::config::{DmzjConfig, SecretString};
use crate::domain::{FetchError, RawRecord};
use async_trait::async_trait;

/// Parameters for one page attempt
///
/// Immutable value; the coordinator stamps a fresh instance per page with
/// [`FetchRequest::for_page`]. Everything except `page` is constant for
/// the lifetime of a run.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    /// Big-category filter (`type` query parameter)
    pub category: u32,

    /// Initial-letter filter (`letter` query parameter)
    pub letter: String,

    /// Subscription-status filter (`sub_type` query parameter)
    pub subscription_status: u32,

    /// DMZJ user id (`uid` query parameter)
    pub user_id: String,

    /// DMZJ auth token (`dmzj_token` query parameter)
    pub token: SecretString,

    /// Zero-based page number (`page` query parameter)
    pub page: u32,
}

impl FetchRequest {
    /// Build the page-0 request template from configuration
    pub fn from_config(config: &DmzjConfig) -> Self {
        Self {
            category: config.category,
            letter: config.letter.clone(),
            subscription_status: config.subscription_status,
            user_id: config.user_id.clone(),
            token: config.token.clone(),
            page: 0,
        }
    }

    /// Copy of this request targeting a different page
    pub fn for_page(&self, page: u32) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }
}

/// Classification of one successful page response
#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome {
    /// Non-empty page payload, in server order
    Records(Vec<RawRecord>),

    /// Empty or absent payload; no further pages exist at or beyond this one
    EndOfData,
}

/// A source of paginated subscription data.
///
/// One call is exactly one network attempt with no retry; transient
/// failures surface as [`FetchError::Transient`]. The retry policy and the
/// coordinator compose on top of this seam, which also lets tests script
/// page sequences without a server.
#[async_trait]
pub trait SubscriptionSource: Send + Sync {
    /// Fetch a single page
    async fn fetch_page(&self, request: &FetchRequest) -> Result<PageOutcome, FetchError>;
}
