//! GitLab REST API client: commit history, per-commit diff statistics, and
//! project listings.

mod client;
mod error;
mod types;

pub use client::GitLabClient;
pub use error::{GitLabError, short_error_message};
pub use types::{CommitDetail, CommitDiffStats, CommitRef, Project};
