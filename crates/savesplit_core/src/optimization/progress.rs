//! Progress reporting and cancellation for a running search

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Stage of a running search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    Started,
    Running,
    Completed,
    LimitReached,
    Cancelled,
}

impl ProgressStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressStatus::Started => "started",
            ProgressStatus::Running => "running",
            ProgressStatus::Completed => "completed",
            ProgressStatus::LimitReached => "limit_reached",
            ProgressStatus::Cancelled => "cancelled",
        }
    }

    /// Whether this is the last event of a run
    #[must_use]
    pub fn is_final(&self) -> bool {
        !matches!(self, ProgressStatus::Started | ProgressStatus::Running)
    }
}

impl fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One progress report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub status: ProgressStatus,
    /// 0 to 100; stays at 0 when the total is unknown until the run completes
    pub percent_complete: f64,
    pub total_scenarios: Option<u64>,
    pub current_scenario: u64,
}

impl ProgressEvent {
    pub(crate) fn new(status: ProgressStatus, current: u64, total: Option<u64>) -> Self {
        let percent_complete = match (status, total) {
            (ProgressStatus::Completed, _) => 100.0,
            (_, Some(total)) if total > 0 => (current as f64 / total as f64 * 100.0).min(100.0),
            _ => 0.0,
        };
        Self {
            status,
            percent_complete,
            total_scenarios: total,
            current_scenario: current,
        }
    }
}

/// Progress callback invoked once per batch and once at the end
pub type ProgressCallback = Box<dyn Fn(&ProgressEvent) + Send + Sync>;

/// Shared progress counters for a search running on another thread
#[derive(Debug, Clone)]
pub struct SearchProgress {
    /// Scenarios examined so far
    processed: Arc<AtomicU64>,
    /// Size of the search space, 0 while unknown
    total: Arc<AtomicU64>,
    /// Cancellation flag
    cancelled: Arc<AtomicBool>,
}

impl SearchProgress {
    #[must_use]
    pub fn new() -> Self {
        Self {
            processed: Arc::new(AtomicU64::new(0)),
            total: Arc::new(AtomicU64::new(0)),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    #[must_use]
    pub fn processed(&self) -> u64 {
        self.processed.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn total(&self) -> Option<u64> {
        match self.total.load(Ordering::Relaxed) {
            0 => None,
            n => Some(n),
        }
    }

    pub(crate) fn reset(&self, total: Option<u64>) {
        self.processed.store(0, Ordering::Relaxed);
        self.total.store(total.unwrap_or(0), Ordering::Relaxed);
    }

    pub(crate) fn advance(&self, by: u64) {
        self.processed.fetch_add(by, Ordering::Relaxed);
    }

    /// Ask the search to stop at the next batch boundary
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

impl Default for SearchProgress {
    fn default() -> Self {
        Self::new()
    }
}
