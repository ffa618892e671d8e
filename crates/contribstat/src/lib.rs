//! contribstat - per-author code-change statistics across GitLab projects.
//!
//! This library paginates a project's commit history, enriches each commit
//! with its diff line counts through a bounded pool of concurrent workers,
//! deduplicates re-applied and merge commits, and merges per-project results
//! into one per-author map.
//!
//! # Example
//!
//! ```ignore
//! use contribstat::gitlab::GitLabClient;
//! use contribstat::stats::{DateWindow, StatsOptions, collect_project_stats, merge_user_stats};
//!
//! async fn run(client: &GitLabClient, window: DateWindow) {
//!     let options = StatsOptions::default();
//!     let billing = collect_project_stats(client, 42, window, &options, None).await?;
//!     let gateway = collect_project_stats(client, 7, window, &options, None).await?;
//!     let merged = merge_user_stats(vec![billing, gateway], &[]);
//!     println!("{} authors", merged.len());
//! }
//! ```

pub mod gitlab;
pub mod http;
pub mod manifest;
pub mod report;
pub mod retry;
pub mod stats;

pub use gitlab::{GitLabClient, GitLabError};
pub use stats::{
    DateWindow, StatsError, StatsOptions, UserStats, UserStatsMap, collect_project_stats,
    merge_user_stats,
};
