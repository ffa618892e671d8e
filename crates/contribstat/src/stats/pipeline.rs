//! The per-project statistics pipeline.
//!
//! One run wires three stages together: a commit lister paginating the
//! history endpoint, a fixed pool of enrichment workers fetching per-commit
//! line counts, and a reducer folding the unordered results into per-author
//! totals. Lister and reducer run on the caller's task; only the workers are
//! spawned.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{Mutex, mpsc};

use crate::gitlab::{CommitRef, GitLabClient, GitLabError, short_error_message};
use crate::retry::{RetryConfig, with_retry};

use super::accumulate::{Accumulator, ApplyOutcome};
use super::progress::{ProgressCallback, StatsProgress, emit};
use super::types::{DateWindow, EnrichedCommit, PROGRESS_EVERY, StatsOptions, UserStatsMap};

/// Fatal errors for one project run.
#[derive(Debug, Error)]
pub enum StatsError {
    /// Listing the commit history failed after all retries. The run's
    /// partial accumulation is discarded.
    #[error("listing commits for project {project_id} failed on page {page}: {source}")]
    Listing {
        project_id: u64,
        page: u32,
        #[source]
        source: GitLabError,
    },
}

/// Collect per-author statistics for one project over a date window.
///
/// Per-commit fetch failures are logged and dropped. A listing failure is
/// fatal: in-flight enrichment is drained, then the whole run's accumulation
/// is discarded and the error returned.
pub async fn collect_project_stats(
    client: &GitLabClient,
    project_id: u64,
    window: DateWindow,
    options: &StatsOptions,
    on_progress: Option<&ProgressCallback>,
) -> Result<UserStatsMap, StatsError> {
    let (commit_tx, commit_rx) = mpsc::channel::<CommitRef>(options.page_size.max(1) as usize);
    let (result_tx, mut result_rx) = mpsc::channel::<EnrichedCommit>(1);

    let commit_rx = Arc::new(Mutex::new(commit_rx));
    for _ in 0..options.workers {
        tokio::spawn(enrich_commits(
            client.clone(),
            project_id,
            options.retry.clone(),
            Arc::clone(&commit_rx),
            result_tx.clone(),
        ));
    }
    // The reducer loop must end once the workers do.
    drop(result_tx);

    let lister = list_commits(client, project_id, window, options, commit_tx, on_progress);

    let reducer = async {
        let mut acc = Accumulator::new();
        let mut processed = 0usize;
        while let Some(item) = result_rx.recv().await {
            match item {
                EnrichedCommit::Stats { commit, stats } => {
                    match acc.apply(project_id, &commit, &stats) {
                        ApplyOutcome::Accepted => {}
                        ApplyOutcome::DuplicateSignature => {
                            tracing::debug!(project_id, commit = %commit.id, "skipping re-applied commit");
                        }
                        ApplyOutcome::MergeWithProcessedParent => {
                            tracing::debug!(project_id, commit = %commit.id, "skipping merge commit with counted parent");
                        }
                        ApplyOutcome::DuplicateId => {
                            tracing::debug!(project_id, commit = %commit.id, "skipping duplicate commit id");
                        }
                    }
                    processed += 1;
                    if processed % PROGRESS_EVERY == 0 {
                        emit(
                            on_progress,
                            StatsProgress::CommitsProcessed {
                                project_id,
                                processed,
                            },
                        );
                    }
                }
                EnrichedCommit::Failed { id, error } => {
                    emit(
                        on_progress,
                        StatsProgress::CommitFetchError {
                            project_id,
                            id,
                            error,
                        },
                    );
                }
            }
        }
        (acc, processed)
    };

    let (listed, (acc, processed)) = tokio::join!(lister, reducer);
    listed?;

    emit(
        on_progress,
        StatsProgress::ProjectComplete {
            project_id,
            commits: processed,
            authors: acc.author_count(),
        },
    );
    Ok(acc.into_users())
}

/// Paginate the commit history into the worker queue.
///
/// Stops at the first empty page. Pages are requested strictly in order with
/// a throttle pause between them.
async fn list_commits(
    client: &GitLabClient,
    project_id: u64,
    window: DateWindow,
    options: &StatsOptions,
    tx: mpsc::Sender<CommitRef>,
    on_progress: Option<&ProgressCallback>,
) -> Result<usize, StatsError> {
    emit(on_progress, StatsProgress::ListingCommits { project_id });

    let mut page = 1u32;
    let mut total = 0usize;
    loop {
        let commits = with_retry(
            || client.list_commits_page(project_id, window.start, window.end, page, options.page_size),
            &options.retry,
            short_error_message,
            &format!("project {project_id} commit page {page}"),
            on_progress,
        )
        .await
        .map_err(|source| StatsError::Listing {
            project_id,
            page,
            source,
        })?;

        if commits.is_empty() {
            break;
        }
        total += commits.len();
        emit(
            on_progress,
            StatsProgress::ListedPage {
                project_id,
                page,
                count: commits.len(),
                total_so_far: total,
            },
        );

        for commit in commits {
            if tx.send(commit).await.is_err() {
                // Workers are gone; nothing left to feed.
                return Ok(total);
            }
        }

        page += 1;
        tokio::time::sleep(options.page_throttle).await;
    }

    emit(
        on_progress,
        StatsProgress::ListingComplete { project_id, total },
    );
    Ok(total)
}

/// One enrichment worker: pull commits off the shared queue, fetch their
/// line counts, and push the results downstream.
async fn enrich_commits(
    client: GitLabClient,
    project_id: u64,
    retry: RetryConfig,
    queue: Arc<Mutex<mpsc::Receiver<CommitRef>>>,
    results: mpsc::Sender<EnrichedCommit>,
) {
    loop {
        // Hold the queue lock only for the dequeue, not the fetch.
        let next = { queue.lock().await.recv().await };
        let Some(commit) = next else { break };

        let fetched = with_retry(
            || client.get_commit(project_id, &commit.id),
            &retry,
            short_error_message,
            &format!("project {project_id} commit {}", commit.id),
            None,
        )
        .await;

        let item = match fetched {
            Ok(detail) => EnrichedCommit::Stats {
                stats: detail.stats,
                commit,
            },
            Err(err) => {
                let error = short_error_message(&err);
                tracing::warn!(project_id, commit = %commit.id, error = %error, "dropping commit after retries");
                EnrichedCommit::Failed {
                    id: commit.id,
                    error,
                }
            }
        };

        if results.send(item).await.is_err() {
            break;
        }
    }
}
