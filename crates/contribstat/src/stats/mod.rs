//! Per-author statistics collection.
//!
//! - `types` - core types: `StatsOptions`, `UserStats`, constants
//! - `progress` - progress reporting: `StatsProgress`, `ProgressCallback`, `emit()`
//! - `accumulate` - the dedup and attribution reducer
//! - `pipeline` - the concurrent per-project run: `collect_project_stats()`
//! - `merge` - cross-project merge: `merge_user_stats()`

mod accumulate;
mod merge;
mod pipeline;
mod progress;
mod types;

pub use accumulate::{Accumulator, ApplyOutcome, CommitSignature};
pub use merge::merge_user_stats;
pub use pipeline::{StatsError, collect_project_stats};
pub use progress::{ProgressCallback, StatsProgress, emit};
pub use types::{
    DateWindow, EnrichedCommit, ProjectStats, StatsOptions, UserStats, UserStatsMap,
};
pub use types::{
    COMMITS_PAGE_SIZE, INITIAL_BACKOFF_MS, MAX_BACKOFF_MS, MAX_FETCH_ATTEMPTS, PAGE_THROTTLE_MS,
    PROGRESS_EVERY, WORKER_COUNT,
};
