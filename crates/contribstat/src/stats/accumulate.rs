//! The dedup and attribution reducer.

use std::collections::HashSet;

use crate::gitlab::{CommitDiffStats, CommitRef};

use super::types::{UserStats, UserStatsMap};

/// Content identity of a commit, independent of its SHA.
///
/// Cherry-picks and re-applied commits get new SHAs but keep their message,
/// author and line counts; two commits with the same signature are counted
/// once.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommitSignature {
    message: String,
    author_name: String,
    stats: CommitDiffStats,
}

impl CommitSignature {
    fn of(commit: &CommitRef, stats: &CommitDiffStats) -> Self {
        Self {
            message: commit.message.clone(),
            author_name: commit.author_name.clone(),
            stats: *stats,
        }
    }
}

/// Why a commit was not counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Accepted,
    /// Same message, author and line counts as an already-counted commit.
    DuplicateSignature,
    /// Merge commit whose parent was already counted.
    MergeWithProcessedParent,
    /// The exact commit ID was already counted.
    DuplicateId,
}

/// Single-owner reducer state for one project run.
///
/// The checks run in a fixed order per commit: signature dedup, then the
/// merge-parent rule, then ID dedup, then acceptance. IDs and signatures are
/// recorded only on acceptance, so a dropped commit never shadows a later
/// one. Because enrichment is unordered, a merge commit reduced before its
/// parent slips past the merge-parent rule; the drop is best-effort.
#[derive(Debug, Default)]
pub struct Accumulator {
    users: UserStatsMap,
    processed_ids: HashSet<String>,
    seen_signatures: HashSet<CommitSignature>,
}

impl Accumulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reduce one enriched commit into the per-author totals.
    pub fn apply(
        &mut self,
        project_id: u64,
        commit: &CommitRef,
        stats: &CommitDiffStats,
    ) -> ApplyOutcome {
        let signature = CommitSignature::of(commit, stats);
        if self.seen_signatures.contains(&signature) {
            return ApplyOutcome::DuplicateSignature;
        }

        if commit.is_merge()
            && commit
                .parent_ids
                .iter()
                .any(|parent| self.processed_ids.contains(parent))
        {
            return ApplyOutcome::MergeWithProcessedParent;
        }

        if self.processed_ids.contains(&commit.id) {
            return ApplyOutcome::DuplicateId;
        }

        self.processed_ids.insert(commit.id.clone());
        self.seen_signatures.insert(signature);
        self.users
            .entry(commit.author_name.clone())
            .or_default()
            .record(project_id, stats);

        ApplyOutcome::Accepted
    }

    /// Number of distinct authors attributed so far.
    #[must_use]
    pub fn author_count(&self) -> usize {
        self.users.len()
    }

    /// Consume the reducer and return the per-author totals.
    #[must_use]
    pub fn into_users(self) -> UserStatsMap {
        self.users
    }
}
