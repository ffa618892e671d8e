//! Progress reporting for statistics runs.

/// Progress events emitted while collecting statistics.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum StatsProgress {
    /// Starting to list a project's commit history.
    ListingCommits {
        project_id: u64,
    },

    /// Listed a page of commits.
    ListedPage {
        project_id: u64,
        /// Page number (1-indexed).
        page: u32,
        /// Commits on this page.
        count: usize,
        /// Running total of listed commits.
        total_so_far: usize,
    },

    /// The commit history is exhausted.
    ListingComplete {
        project_id: u64,
        total: usize,
    },

    /// A batch of commits has been reduced.
    CommitsProcessed {
        project_id: u64,
        processed: usize,
    },

    /// A per-commit fetch failed after all retries; the commit is dropped.
    CommitFetchError {
        project_id: u64,
        id: String,
        error: String,
    },

    /// An API call failed and is being retried after a backoff.
    Retrying {
        context: String,
        retry_after_ms: u64,
        attempt: u32,
    },

    /// One project run finished.
    ProjectComplete {
        project_id: u64,
        /// Commits reduced (accepted or deduplicated).
        commits: usize,
        /// Distinct authors attributed.
        authors: usize,
    },

    /// Warning message (non-fatal).
    Warning {
        message: String,
    },
}

/// Callback for progress updates during a statistics run.
pub type ProgressCallback = Box<dyn Fn(StatsProgress) + Send + Sync>;

/// Emit a progress event if a callback is provided.
#[inline]
pub fn emit(on_progress: Option<&ProgressCallback>, event: StatsProgress) {
    if let Some(cb) = on_progress {
        cb(event);
    }
}
