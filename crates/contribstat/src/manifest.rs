//! Project manifest loading.
//!
//! The manifest is a CSV file mapping project IDs to display names, used
//! only when rendering reports. Statistics collection never depends on it.

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;

/// One manifest row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInfo {
    pub id: u64,
    pub name: String,
    pub path_with_namespace: String,
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("manifest read error: {0}")]
    Csv(#[from] csv::Error),

    #[error("manifest is missing required column '{0}'")]
    MissingColumn(&'static str),
}

const COLUMNS: [&str; 3] = ["id", "name", "path_with_namespace"];

/// Load a project manifest.
///
/// The header row must contain `id`, `name` and `path_with_namespace`
/// columns, in any order and possibly among others. Rows with a malformed
/// or empty ID are skipped with a warning.
pub fn load(path: &Path) -> Result<Vec<ProjectInfo>, ManifestError> {
    let mut reader = csv::Reader::from_path(path)?;

    let headers = reader.headers()?.clone();
    let mut columns = [0usize; 3];
    for (slot, name) in columns.iter_mut().zip(COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or(ManifestError::MissingColumn(name))?;
    }
    let [id_col, name_col, path_col] = columns;

    let mut projects = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let raw_id = record.get(id_col).unwrap_or("").trim();
        let Ok(id) = raw_id.parse::<u64>() else {
            tracing::warn!(row = row + 2, id = raw_id, "skipping manifest row with bad project id");
            continue;
        };
        projects.push(ProjectInfo {
            id,
            name: record.get(name_col).unwrap_or("").trim().to_string(),
            path_with_namespace: record.get(path_col).unwrap_or("").trim().to_string(),
        });
    }
    Ok(projects)
}

/// Index a manifest by project ID.
#[must_use]
pub fn by_id(projects: &[ProjectInfo]) -> HashMap<u64, &ProjectInfo> {
    projects.iter().map(|p| (p.id, p)).collect()
}
