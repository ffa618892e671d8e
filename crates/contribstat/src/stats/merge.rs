//! Cross-project merge of per-author statistics.

use super::types::UserStatsMap;

/// Merge per-project result maps into one map.
///
/// The merge is a plain sum at both the author and per-project level, so the
/// result does not depend on the order of the inputs. When `authors` is
/// non-empty it acts as an allow-list; other authors are dropped.
#[must_use]
pub fn merge_user_stats<I>(results: I, authors: &[String]) -> UserStatsMap
where
    I: IntoIterator<Item = UserStatsMap>,
{
    let mut merged = UserStatsMap::new();
    for result in results {
        for (author, stats) in result {
            if !authors.is_empty() && !authors.iter().any(|a| a == &author) {
                continue;
            }
            let entry = merged.entry(author).or_default();
            entry.additions += stats.additions;
            entry.deletions += stats.deletions;
            entry.changes += stats.changes;
            entry.total += stats.total;
            for (project_id, project) in stats.projects {
                let merged_project = entry.projects.entry(project_id).or_default();
                merged_project.additions += project.additions;
                merged_project.deletions += project.deletions;
                merged_project.changes += project.changes;
            }
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gitlab::CommitDiffStats;
    use crate::stats::types::UserStats;

    fn user(project_id: u64, additions: i64, deletions: i64) -> UserStats {
        let mut stats = UserStats::default();
        stats.record(
            project_id,
            &CommitDiffStats {
                additions,
                deletions,
                total: additions + deletions,
            },
        );
        stats
    }

    fn map(entries: Vec<(&str, UserStats)>) -> UserStatsMap {
        entries
            .into_iter()
            .map(|(name, stats)| (name.to_string(), stats))
            .collect()
    }

    #[test]
    fn merge_sums_across_projects_per_author() {
        let a = map(vec![("alice", user(1, 5, 2)), ("bob", user(1, 1, 0))]);
        let b = map(vec![("alice", user(2, 3, 3))]);

        let merged = merge_user_stats(vec![a, b], &[]);

        let alice = &merged["alice"];
        assert_eq!(alice.additions, 8);
        assert_eq!(alice.deletions, 5);
        assert_eq!(alice.total, 13);
        assert_eq!(alice.projects.len(), 2);
        assert_eq!(alice.projects[&1].additions, 5);
        assert_eq!(alice.projects[&2].additions, 3);
        assert_eq!(merged["bob"].additions, 1);
    }

    #[test]
    fn merge_is_commutative() {
        let a = map(vec![("alice", user(1, 5, 2))]);
        let b = map(vec![("alice", user(2, 3, 3)), ("bob", user(2, 1, 1))]);

        let forward = merge_user_stats(vec![a.clone(), b.clone()], &[]);
        let backward = merge_user_stats(vec![b, a], &[]);
        assert_eq!(forward, backward);
    }

    #[test]
    fn merge_is_associative() {
        let a = map(vec![("alice", user(1, 1, 0))]);
        let b = map(vec![("alice", user(2, 2, 0))]);
        let c = map(vec![("alice", user(3, 4, 0)), ("bob", user(3, 8, 0))]);

        let left = merge_user_stats(
            vec![merge_user_stats(vec![a.clone(), b.clone()], &[]), c.clone()],
            &[],
        );
        let right = merge_user_stats(vec![a, merge_user_stats(vec![b, c], &[])], &[]);
        assert_eq!(left, right);
    }

    #[test]
    fn allow_list_filters_authors() {
        let a = map(vec![("alice", user(1, 5, 0)), ("bob", user(1, 3, 0))]);
        let allow = vec!["alice".to_string()];

        let merged = merge_user_stats(vec![a], &allow);
        assert_eq!(merged.len(), 1);
        assert!(merged.contains_key("alice"));
        assert!(!merged.contains_key("bob"));
    }

    #[test]
    fn empty_allow_list_keeps_everyone() {
        let a = map(vec![("alice", user(1, 5, 0)), ("bob", user(1, 3, 0))]);
        let merged = merge_user_stats(vec![a], &[]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn merging_nothing_yields_empty_map() {
        let merged = merge_user_stats(Vec::new(), &[]);
        assert!(merged.is_empty());
    }
}
