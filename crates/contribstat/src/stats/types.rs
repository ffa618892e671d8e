//! Core types and constants for the statistics pipeline.

use std::collections::HashMap;
use std::time::Duration;

use chrono::NaiveDate;

use crate::gitlab::{CommitDiffStats, CommitRef};
use crate::retry::RetryConfig;

/// Number of concurrent per-commit fetch workers.
pub const WORKER_COUNT: usize = 10;

/// Commits requested per history page.
pub const COMMITS_PAGE_SIZE: u32 = 100;

/// Pause between history page requests (ms).
pub const PAGE_THROTTLE_MS: u64 = 200;

/// Initial retry backoff delay (ms).
pub const INITIAL_BACKOFF_MS: u64 = 1_000;

/// Maximum retry backoff delay (ms).
pub const MAX_BACKOFF_MS: u64 = 60_000;

/// Maximum attempts per API call (first try included).
pub const MAX_FETCH_ATTEMPTS: usize = 5;

/// Emit a progress event every this many reduced commits.
pub const PROGRESS_EVERY: usize = 10;

/// An inclusive date window, in whole days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Immutable configuration for one statistics run.
#[derive(Debug, Clone)]
pub struct StatsOptions {
    /// Number of concurrent per-commit fetch workers.
    pub workers: usize,
    /// Commits requested per history page.
    pub page_size: u32,
    /// Pause between history page requests.
    pub page_throttle: Duration,
    /// Retry schedule for every API call.
    pub retry: RetryConfig,
}

impl Default for StatsOptions {
    fn default() -> Self {
        Self {
            workers: WORKER_COUNT,
            page_size: COMMITS_PAGE_SIZE,
            page_throttle: Duration::from_millis(PAGE_THROTTLE_MS),
            retry: RetryConfig::default(),
        }
    }
}

/// Output of one enrichment worker for one commit.
#[derive(Debug, Clone)]
pub enum EnrichedCommit {
    /// The commit and its diff statistics.
    Stats {
        commit: CommitRef,
        stats: CommitDiffStats,
    },
    /// The per-commit fetch failed after all retries.
    Failed { id: String, error: String },
}

/// Per-project line counts for a single author.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectStats {
    pub additions: i64,
    pub deletions: i64,
    pub changes: i64,
}

/// Aggregated line counts for a single author.
///
/// `changes` accumulates the upstream diff `total` field; `total` accumulates
/// `additions + deletions`. The two are independent sums and may disagree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserStats {
    pub additions: i64,
    pub deletions: i64,
    pub changes: i64,
    pub total: i64,
    /// Per-project breakdown, keyed by project ID.
    pub projects: HashMap<u64, ProjectStats>,
}

impl UserStats {
    /// Record one accepted commit against a project.
    pub fn record(&mut self, project_id: u64, stats: &CommitDiffStats) {
        self.additions += stats.additions;
        self.deletions += stats.deletions;
        self.changes += stats.total;
        self.total += stats.additions + stats.deletions;

        let project = self.projects.entry(project_id).or_default();
        project.additions += stats.additions;
        project.deletions += stats.deletions;
        project.changes += stats.total;
    }
}

/// Per-author statistics, keyed by author name.
pub type UserStatsMap = HashMap<String, UserStats>;
