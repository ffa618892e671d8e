use contribstat::stats::StatsProgress;

/// Logging reporter using tracing for structured output.
pub struct LoggingReporter;

impl LoggingReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, event: StatsProgress) {
        match event {
            StatsProgress::ListingCommits { project_id } => {
                tracing::info!(project_id, "Listing commits");
            }

            StatsProgress::ListedPage {
                project_id,
                page,
                count,
                total_so_far,
            } => {
                tracing::debug!(project_id, page, count, total_so_far, "Listed page");
            }

            StatsProgress::ListingComplete { project_id, total } => {
                tracing::info!(project_id, total, "Listing complete");
            }

            StatsProgress::CommitsProcessed {
                project_id,
                processed,
            } => {
                tracing::debug!(project_id, processed, "Processed commits");
            }

            StatsProgress::CommitFetchError { project_id, id, error } => {
                tracing::warn!(project_id, commit = %id, error = %error, "Dropped commit");
            }

            StatsProgress::Retrying {
                context,
                retry_after_ms,
                attempt,
            } => {
                tracing::warn!(context = %context, retry_after_ms, attempt, "Retrying after backoff");
            }

            StatsProgress::ProjectComplete {
                project_id,
                commits,
                authors,
            } => {
                tracing::info!(project_id, commits, authors, "Project complete");
            }

            StatsProgress::Warning { message } => {
                tracing::warn!(message = %message, "Warning");
            }

            _ => {}
        }
    }
}

impl Default for LoggingReporter {
    fn default() -> Self {
        Self::new()
    }
}
