//! Serde types for the GitLab API payloads this tool reads.

use serde::Deserialize;

/// A commit as returned by the repository commit listing.
///
/// The listing carries everything the dedup rules need (author, message,
/// parents); only the line counts require a second fetch per commit.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CommitRef {
    pub id: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub author_name: String,
    #[serde(default)]
    pub parent_ids: Vec<String>,
}

impl CommitRef {
    /// Whether this commit has more than one parent.
    #[must_use]
    pub fn is_merge(&self) -> bool {
        self.parent_ids.len() > 1
    }
}

/// Line-count statistics attached to a single commit.
///
/// `total` is reported by the API and carried verbatim; it is not
/// recomputed from `additions` and `deletions`.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq, Hash)]
pub struct CommitDiffStats {
    #[serde(default)]
    pub additions: i64,
    #[serde(default)]
    pub deletions: i64,
    #[serde(default)]
    pub total: i64,
}

/// A single commit with its diff statistics, from the per-commit endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitDetail {
    pub id: String,
    #[serde(default)]
    pub stats: CommitDiffStats,
}

/// Project metadata from the project listing endpoint.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Project {
    pub id: u64,
    pub name: String,
    pub path_with_namespace: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_ref_deserializes_listing_payload() {
        let json = r#"{
            "id": "abc123",
            "short_id": "abc",
            "title": "Fix parser",
            "message": "Fix parser\n",
            "author_name": "dev one",
            "author_email": "dev@example.com",
            "parent_ids": ["p1"]
        }"#;
        let commit: CommitRef = serde_json::from_str(json).unwrap();
        assert_eq!(commit.id, "abc123");
        assert_eq!(commit.author_name, "dev one");
        assert!(!commit.is_merge());
    }

    #[test]
    fn commit_with_two_parents_is_a_merge() {
        let commit = CommitRef {
            id: "m".to_string(),
            message: "Merge branch".to_string(),
            author_name: "dev".to_string(),
            parent_ids: vec!["a".to_string(), "b".to_string()],
        };
        assert!(commit.is_merge());
    }

    #[test]
    fn commit_detail_defaults_missing_stats_to_zero() {
        let json = r#"{"id": "abc123", "author_name": "dev"}"#;
        let detail: CommitDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.stats, CommitDiffStats::default());
    }

    #[test]
    fn commit_detail_reads_stats_block() {
        let json = r#"{
            "id": "abc123",
            "stats": {"additions": 10, "deletions": 4, "total": 14}
        }"#;
        let detail: CommitDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.stats.additions, 10);
        assert_eq!(detail.stats.deletions, 4);
        assert_eq!(detail.stats.total, 14);
    }
}
