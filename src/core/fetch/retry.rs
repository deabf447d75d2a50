//! Bounded fixed-delay retry for single page attempts
//!
//! Wraps one [`SubscriptionSource`] call. Transient failures are retried
//! with a fixed delay (the upstream endpoint recovers on a flat cadence;
//! exponential backoff buys nothing here). `Records` and `EndOfData` pass
//! through untouched. A spent budget surfaces as
//! [`FetchError::Exhausted`] so the coordinator can distinguish "server
//! says no more data" from "we gave up on this page".

use crate::adapters::dmzj::{FetchRequest, PageOutcome, SubscriptionSource};
use crate::domain::FetchError;
use std::time::Duration;

/// Retry policy for one page fetch
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts per page, including the first
    max_retries: usize,

    /// Fixed delay between attempts
    delay: Duration,
}

impl RetryPolicy {
    /// Create a new retry policy
    ///
    /// `max_retries` counts total attempts; a value of 0 is clamped to 1
    /// since every page gets at least one attempt.
    pub fn new(max_retries: usize, delay: Duration) -> Self {
        Self {
            max_retries: max_retries.max(1),
            delay,
        }
    }

    /// Total attempts allowed per page
    pub fn max_retries(&self) -> usize {
        self.max_retries
    }

    /// Fetch one page, retrying transient failures up to the budget
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Exhausted`] once `max_retries` attempts have
    /// failed transiently, carrying the page number, attempt count, and
    /// the last underlying error.
    pub async fn attempt(
        &self,
        source: &dyn SubscriptionSource,
        request: &FetchRequest,
    ) -> Result<PageOutcome, FetchError> {
        let mut attempt = 0;

        loop {
            attempt += 1;

            match source.fetch_page(request).await {
                Ok(outcome) => return Ok(outcome),
                Err(FetchError::Transient { page, message }) => {
                    if attempt >= self.max_retries {
                        return Err(FetchError::Exhausted {
                            page,
                            attempts: attempt,
                            last_error: message,
                        });
                    }

                    tracing::warn!(
                        page = page,
                        attempt = attempt,
                        max_retries = self.max_retries,
                        error = %message,
                        "Retrying page fetch after transient failure"
                    );

                    tokio::time::sleep(self.delay).await;
                }
                // Non-transient errors are not this policy's to absorb
                Err(other) => return Err(other),
            }
        }
    }
}
