//! Fetch coordinator - drives the paginated fetch to completion
//!
//! The coordinator owns all mutable fetch state and is the single writer
//! to it. Page workers are spawned tasks that fetch exactly one page
//! (through the retry policy) and communicate by returning
//! `(page, result)`; they never touch shared state. Dispatch is bounded by
//! the worker limit, and the coordinator blocks on the first completion
//! whenever the limit is reached.
//!
//! The run moves through three phases:
//! - **Running**: consecutive page numbers are dispatched, starting at 0.
//! - **Draining**: after end-of-data or a fatal page failure, no new pages
//!   are dispatched but in-flight work is awaited. Records returned by
//!   drained pages are kept: the server's end-of-data signal is
//!   authoritative only for pages at or beyond the page that produced it.
//! - **Completed / Failed**: all work has settled. On failure the
//!   already-collected records are still returned (best-effort output)
//!   together with the failure reason.

use crate::adapters::dmzj::{FetchRequest, PageOutcome, SubscriptionSource};
use crate::core::fetch::retry::RetryPolicy;
use crate::domain::{FetchError, RawRecord};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tokio::task::JoinSet;

/// Result of a coordinator run
#[derive(Debug)]
pub struct FetchOutcome {
    /// All collected records, concatenated in ascending page order
    pub records: Vec<RawRecord>,

    /// Number of non-empty pages collected
    pub pages: usize,

    /// Fatal failure, if the run aborted early
    pub failure: Option<FetchError>,
}

impl FetchOutcome {
    /// Whether the run ended without a fatal failure
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

/// Coordinator-owned aggregate state.
///
/// Invariant: every dispatched page number is in exactly one of
/// {in_flight, collected, settled-without-records}; page numbers are
/// assigned monotonically and never re-dispatched.
struct AggregateState {
    /// Records keyed by page number; BTreeMap ordering gives the final
    /// ascending-page concatenation for free
    collected: BTreeMap<u32, Vec<RawRecord>>,

    /// Next page number to dispatch
    next_page: u32,

    /// Pages dispatched but not yet settled
    in_flight: HashSet<u32>,

    /// Set once end-of-data or a fatal failure is observed
    terminated: bool,

    /// First fatal failure observed
    failure: Option<FetchError>,
}

impl AggregateState {
    fn new() -> Self {
        Self {
            collected: BTreeMap::new(),
            next_page: 0,
            in_flight: HashSet::new(),
            terminated: false,
            failure: None,
        }
    }

    /// Apply one settled page result. Called only from the coordinator
    /// loop; workers never mutate state.
    fn apply(&mut self, page: u32, result: Result<PageOutcome, FetchError>) {
        self.in_flight.remove(&page);

        match result {
            Ok(PageOutcome::Records(records)) => {
                tracing::info!(page = page, count = records.len(), "Collected page");
                self.collected.insert(page, records);
            }
            Ok(PageOutcome::EndOfData) => {
                tracing::info!(page = page, "End of data reached");
                self.terminated = true;
            }
            Err(e) => {
                tracing::error!(page = page, error = %e, "Page failed permanently");
                self.terminated = true;
                if self.failure.is_none() {
                    self.failure = Some(e);
                }
            }
        }
    }

    fn into_outcome(self) -> FetchOutcome {
        let pages = self.collected.len();
        let records: Vec<RawRecord> = self.collected.into_values().flatten().collect();
        FetchOutcome {
            records,
            pages,
            failure: self.failure,
        }
    }
}

/// Drives page workers until the paginated result set is exhausted
pub struct FetchCoordinator {
    source: Arc<dyn SubscriptionSource>,
    retry: RetryPolicy,
    workers: usize,
}

impl FetchCoordinator {
    /// Create a new coordinator
    ///
    /// `workers` is the maximum number of concurrently in-flight pages; a
    /// value of 0 is clamped to 1.
    pub fn new(source: Arc<dyn SubscriptionSource>, retry: RetryPolicy, workers: usize) -> Self {
        Self {
            source,
            retry,
            workers: workers.max(1),
        }
    }

    /// Fetch every page of the result set described by `template`
    ///
    /// Returns the full collection on success; on a fatal page failure the
    /// outcome still carries everything collected before the abort, with
    /// `failure` set.
    pub async fn run(&self, template: &FetchRequest) -> FetchOutcome {
        let mut state = AggregateState::new();
        let mut tasks: JoinSet<(u32, Result<PageOutcome, FetchError>)> = JoinSet::new();

        tracing::debug!(workers = self.workers, "Starting paginated fetch");

        loop {
            // Fill the dispatch window while still running
            while !state.terminated && state.in_flight.len() < self.workers {
                let page = state.next_page;
                state.next_page += 1;
                state.in_flight.insert(page);

                let source = Arc::clone(&self.source);
                let retry = self.retry.clone();
                let request = template.for_page(page);

                tracing::debug!(page = page, "Dispatching page worker");
                tasks.spawn(async move {
                    let result = retry.attempt(source.as_ref(), &request).await;
                    (page, result)
                });
            }

            // Block on the first completion; None means nothing is in
            // flight and, since dispatch happens first, the run is over.
            let Some(joined) = tasks.join_next().await else {
                break;
            };

            match joined {
                Ok((page, result)) => state.apply(page, result),
                Err(e) => {
                    // A panicking worker leaves its page unaccounted for;
                    // treat the run as fatally broken.
                    tracing::error!(error = %e, "Page worker aborted");
                    state.terminated = true;
                    if state.failure.is_none() {
                        state.failure = Some(FetchError::Aborted(e.to_string()));
                    }
                }
            }
        }

        let outcome = state.into_outcome();
        match &outcome.failure {
            None => tracing::info!(
                records = outcome.records.len(),
                pages = outcome.pages,
                "Fetch completed"
            ),
            Some(failure) => tracing::warn!(
                records = outcome.records.len(),
                pages = outcome.pages,
                failure = %failure,
                "Fetch aborted; returning partial collection"
            ),
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    /// What a scripted page does when fetched
    #[derive(Clone)]
    enum PageScript {
        /// Yield this many records, tagged with the page number, after an
        /// optional delay
        Records { count: usize, delay_ms: u64 },
        /// Signal end-of-data
        Empty,
        /// Fail transiently on every attempt
        AlwaysFail,
    }

    /// Scripted in-memory source; pages beyond the script are empty.
    struct FakeSource {
        script: Vec<PageScript>,
        attempts: Mutex<HashMap<u32, usize>>,
    }

    impl FakeSource {
        fn new(script: Vec<PageScript>) -> Self {
            Self {
                script,
                attempts: Mutex::new(HashMap::new()),
            }
        }

        fn attempts_for(&self, page: u32) -> usize {
            *self.attempts.lock().unwrap().get(&page).unwrap_or(&0)
        }

        fn records_for(page: u32, count: usize) -> Vec<RawRecord> {
            (0..count)
                .map(|i| RawRecord::new(json!({"id": u64::from(page) * 1000 + i as u64, "page": page})))
                .collect()
        }
    }

    #[async_trait]
    impl SubscriptionSource for FakeSource {
        async fn fetch_page(&self, request: &FetchRequest) -> Result<PageOutcome, FetchError> {
            let page = request.page;
            *self.attempts.lock().unwrap().entry(page).or_insert(0) += 1;

            match self.script.get(page as usize).cloned() {
                Some(PageScript::Records { count, delay_ms }) => {
                    if delay_ms > 0 {
                        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                    }
                    Ok(PageOutcome::Records(Self::records_for(page, count)))
                }
                Some(PageScript::Empty) | None => Ok(PageOutcome::EndOfData),
                Some(PageScript::AlwaysFail) => Err(FetchError::Transient {
                    page,
                    message: "scripted failure".to_string(),
                }),
            }
        }
    }

    fn template() -> FetchRequest {
        FetchRequest {
            category: 0,
            letter: "all".to_string(),
            subscription_status: 1,
            user_id: "u".to_string(),
            token: crate::config::secret_string("t".to_string()),
            page: 0,
        }
    }

    fn coordinator(source: FakeSource, workers: usize) -> FetchCoordinator {
        FetchCoordinator::new(
            Arc::new(source),
            RetryPolicy::new(3, Duration::from_millis(1)),
            workers,
        )
    }

    fn flat_script(counts: &[usize]) -> Vec<PageScript> {
        counts
            .iter()
            .map(|&count| PageScript::Records { count, delay_ms: 0 })
            .chain(std::iter::once(PageScript::Empty))
            .collect()
    }

    #[tokio::test]
    async fn test_collects_all_records_regardless_of_worker_count() {
        let counts = [3usize, 5, 2, 7, 1, 4];
        let expected: usize = counts.iter().sum();

        for workers in [1, 5, 20] {
            let source = FakeSource::new(flat_script(&counts));
            let outcome = coordinator(source, workers).run(&template()).await;

            assert!(outcome.is_complete(), "workers={workers}");
            assert_eq!(outcome.records.len(), expected, "workers={workers}");
            assert_eq!(outcome.pages, counts.len(), "workers={workers}");
        }
    }

    #[tokio::test]
    async fn test_output_order_follows_page_numbers_not_completion_order() {
        // Early pages are slow, later pages fast: completion order is
        // roughly reversed relative to page order.
        let script = vec![
            PageScript::Records { count: 2, delay_ms: 50 },
            PageScript::Records { count: 2, delay_ms: 30 },
            PageScript::Records { count: 2, delay_ms: 10 },
            PageScript::Records { count: 2, delay_ms: 0 },
            PageScript::Empty,
        ];
        let source = FakeSource::new(script);
        let outcome = coordinator(source, 5).run(&template()).await;

        assert!(outcome.is_complete());
        let pages: Vec<u64> = outcome
            .records
            .iter()
            .map(|r| r.as_value()["page"].as_u64().unwrap())
            .collect();
        assert_eq!(pages, vec![0, 0, 1, 1, 2, 2, 3, 3]);
    }

    #[tokio::test]
    async fn test_no_duplicate_pages_dispatched() {
        let source = FakeSource::new(flat_script(&[1, 1, 1, 1]));
        let coordinator = coordinator(source, 20);
        let outcome = coordinator.run(&template()).await;

        assert!(outcome.is_complete());
        // Each record is unique by id, so duplicates would show up here
        let mut ids: Vec<u64> = outcome
            .records
            .iter()
            .map(|r| r.as_value()["id"].as_u64().unwrap())
            .collect();
        let before = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }

    #[tokio::test]
    async fn test_records_racing_past_end_of_data_are_retained() {
        // Page 1 signals end-of-data quickly while pages 2 and 3 are
        // already in flight and later return data. The drained data must
        // be kept.
        let script = vec![
            PageScript::Records { count: 1, delay_ms: 0 },
            PageScript::Empty,
            PageScript::Records { count: 2, delay_ms: 40 },
            PageScript::Records { count: 1, delay_ms: 40 },
        ];
        let source = FakeSource::new(script);
        let outcome = coordinator(source, 4).run(&template()).await;

        assert!(outcome.is_complete());
        assert_eq!(outcome.records.len(), 4);
        let pages: Vec<u64> = outcome
            .records
            .iter()
            .map(|r| r.as_value()["page"].as_u64().unwrap())
            .collect();
        assert_eq!(pages, vec![0, 2, 2, 3]);
    }

    #[tokio::test]
    async fn test_exhausted_page_fails_the_run_but_keeps_partial_data() {
        let script = vec![
            PageScript::Records { count: 2, delay_ms: 0 },
            PageScript::AlwaysFail,
        ];
        let source = FakeSource::new(script);
        let coordinator = FetchCoordinator::new(
            Arc::new(source),
            RetryPolicy::new(3, Duration::from_millis(1)),
            1,
        );
        let outcome = coordinator.run(&template()).await;

        assert!(!outcome.is_complete());
        assert_eq!(outcome.records.len(), 2);
        match outcome.failure {
            Some(FetchError::Exhausted { page, attempts, .. }) => {
                assert_eq!(page, 1);
                assert_eq!(attempts, 3);
            }
            other => panic!("expected Exhausted, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_failure_stops_new_dispatch() {
        // With a single worker the failing page settles before anything
        // else can be dispatched, so no page beyond it is ever attempted.
        let script = vec![
            PageScript::AlwaysFail,
            PageScript::Records { count: 5, delay_ms: 0 },
        ];
        let source = Arc::new(FakeSource::new(script));
        let coordinator = FetchCoordinator::new(
            Arc::clone(&source) as Arc<dyn SubscriptionSource>,
            RetryPolicy::new(2, Duration::from_millis(1)),
            1,
        );

        let outcome = coordinator.run(&template()).await;

        assert!(!outcome.is_complete());
        assert!(outcome.records.is_empty());
        // Page 1 was scripted with data but must never have been attempted
        assert_eq!(source.attempts_for(1), 0);
    }

    #[tokio::test]
    async fn test_retry_happens_inside_worker_not_coordinator() {
        let script = vec![PageScript::AlwaysFail];
        let source = FakeSource::new(script);
        let source = Arc::new(source);
        let coordinator = FetchCoordinator::new(
            Arc::clone(&source) as Arc<dyn SubscriptionSource>,
            RetryPolicy::new(3, Duration::from_millis(1)),
            1,
        );

        let outcome = coordinator.run(&template()).await;

        assert!(!outcome.is_complete());
        // Exactly the retry budget: the coordinator never re-dispatches a
        // failed page on top of the policy's attempts.
        assert_eq!(source.attempts_for(0), 3);
    }

    #[tokio::test]
    async fn test_empty_first_page_yields_empty_outcome() {
        let source = FakeSource::new(vec![PageScript::Empty]);
        let outcome = coordinator(source, 5).run(&template()).await;

        assert!(outcome.is_complete());
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.pages, 0);
    }
}
