//! Per-author CSV report export.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::manifest::{self, ProjectInfo};
use crate::stats::{DateWindow, UserStatsMap};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("report io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("report write error: {0}")]
    Csv(#[from] csv::Error),
}

const HEADER: [&str; 5] = [
    "project_name",
    "project_path",
    "additions",
    "changes",
    "deletions",
];

/// Write one CSV report per author into `dir`, creating it if needed.
///
/// Each file is named `{author}_stats_{start}_to_{end}.csv` and holds one
/// row per project the author touched, sorted by project ID. Project names
/// come from the manifest; unknown IDs get blank name and path columns.
/// Returns the written paths.
pub fn write_reports(
    dir: &Path,
    merged: &UserStatsMap,
    window: &DateWindow,
    projects: &[ProjectInfo],
) -> Result<Vec<PathBuf>, ReportError> {
    fs::create_dir_all(dir)?;
    let index = manifest::by_id(projects);

    let mut written = Vec::with_capacity(merged.len());
    for (author, stats) in merged {
        let path = dir.join(format!(
            "{}_stats_{}_to_{}.csv",
            file_safe(author),
            window.start,
            window.end
        ));
        let mut writer = csv::Writer::from_path(&path)?;
        writer.write_record(HEADER)?;

        let mut rows: Vec<_> = stats.projects.iter().collect();
        rows.sort_by_key(|(project_id, _)| **project_id);
        for (project_id, project) in rows {
            let (name, namespace_path) = match index.get(project_id) {
                Some(info) => (info.name.as_str(), info.path_with_namespace.as_str()),
                None => ("", ""),
            };
            let additions = project.additions.to_string();
            let changes = project.changes.to_string();
            let deletions = project.deletions.to_string();
            writer.write_record([
                name,
                namespace_path,
                additions.as_str(),
                changes.as_str(),
                deletions.as_str(),
            ])?;
        }
        writer.flush()?;
        written.push(path);
    }
    Ok(written)
}

/// Replace path separators and whitespace so an author name is usable as a
/// file name.
fn file_safe(author: &str) -> String {
    author
        .chars()
        .map(|c| {
            if c == '/' || c == '\\' || c.is_whitespace() {
                '_'
            } else {
                c
            }
        })
        .collect()
}
