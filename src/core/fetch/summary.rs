//! Run summary and reporting

use std::time::Duration;

/// Summary of one export run
#[derive(Debug, Clone)]
pub struct FetchSummary {
    /// Total records collected
    pub total_records: usize,

    /// Number of non-empty pages collected
    pub pages: usize,

    /// Number of backup entries written
    pub entries_written: usize,

    /// Duration of the run
    pub duration: Duration,

    /// Fatal failure reason, if the fetch aborted early
    pub failure_reason: Option<String>,
}

impl FetchSummary {
    /// Create a new empty summary
    pub fn new() -> Self {
        Self {
            total_records: 0,
            pages: 0,
            entries_written: 0,
            duration: Duration::from_secs(0),
            failure_reason: None,
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Whether the run completed without a fatal failure
    pub fn is_successful(&self) -> bool {
        self.failure_reason.is_none()
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            total_records = self.total_records,
            pages = self.pages,
            entries_written = self.entries_written,
            duration_ms = self.duration.as_millis() as u64,
            "Export run finished"
        );

        if let Some(reason) = &self.failure_reason {
            tracing::warn!(
                collected_before_failure = self.total_records,
                reason = %reason,
                "Export run aborted early"
            );
        }
    }
}

impl Default for FetchSummary {
    fn default() -> Self {
        Self::new()
    }
}
