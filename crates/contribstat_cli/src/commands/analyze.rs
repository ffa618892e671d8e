use std::path::PathBuf;
use std::time::Instant;

use chrono::NaiveDate;
use contribstat::gitlab::GitLabClient;
use contribstat::stats::{
    DateWindow, ProgressCallback, StatsOptions, collect_project_stats, merge_user_stats,
};
use contribstat::{manifest, report};

use crate::AnalyzeArgs;
use crate::config::{self, Config};
use crate::progress::LoggingReporter;

pub(crate) async fn handle_analyze(
    args: AnalyzeArgs,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let gitlab_url = config
        .gitlab_url()
        .ok_or("CONTRIBSTAT_GITLAB_URL must be set in environment, .env file, or config file")?;
    let gitlab_token = config
        .gitlab_token()
        .ok_or("CONTRIBSTAT_GITLAB_TOKEN must be set in environment, .env file, or config file")?;

    // Merge CLI args with config defaults
    let window = resolve_window(
        args.start_date.or_else(|| config.analyze.start_date.clone()),
        args.end_date.or_else(|| config.analyze.end_date.clone()),
    )?;

    let projects_arg = args
        .projects
        .or_else(|| config.analyze.projects.clone())
        .unwrap_or_default();
    let project_ids = parse_project_ids(&projects_arg)?;
    if project_ids.is_empty() {
        return Err("no project IDs given; use --projects or [analyze].projects".into());
    }

    let authors = args
        .authors
        .or_else(|| config.analyze.authors.clone())
        .map(|list| config::split_list(&list))
        .unwrap_or_default();

    let manifest_path = args
        .manifest
        .unwrap_or_else(|| PathBuf::from(&config.analyze.manifest));
    let projects_meta = if manifest_path.exists() {
        manifest::load(&manifest_path)?
    } else {
        tracing::warn!(
            path = %manifest_path.display(),
            "manifest not found; reports will have blank project names"
        );
        Vec::new()
    };

    let output_dir = args
        .output_dir
        .unwrap_or_else(|| PathBuf::from(&config.analyze.output_dir));

    let client = GitLabClient::new(&gitlab_url, &gitlab_token, &config.gitlab.api_version)?;
    let options = StatsOptions::default();
    let reporter = LoggingReporter::new();
    let on_progress: ProgressCallback = Box::new(move |event| reporter.handle(event));

    tracing::info!(
        projects = project_ids.len(),
        start = %window.start,
        end = %window.end,
        "Starting analysis"
    );
    let started = Instant::now();

    let mut results = Vec::with_capacity(project_ids.len());
    let mut failed = 0usize;
    for &project_id in &project_ids {
        match collect_project_stats(&client, project_id, window, &options, Some(&on_progress)).await
        {
            Ok(stats) => results.push(stats),
            Err(e) => {
                failed += 1;
                tracing::warn!(project_id, error = %e, "Skipping failed project run");
            }
        }
    }

    if results.is_empty() {
        return Err("all project runs failed".into());
    }

    let merged = merge_user_stats(results, &authors);
    let written = report::write_reports(&output_dir, &merged, &window, &projects_meta)?;

    tracing::info!(
        succeeded = project_ids.len() - failed,
        failed,
        authors = merged.len(),
        reports = written.len(),
        elapsed = ?started.elapsed(),
        "Analysis complete"
    );
    for path in &written {
        println!("{}", path.display());
    }

    Ok(())
}

/// Resolve the date window from flags/config, falling back to the first day
/// of the current month and today.
fn resolve_window(
    start: Option<String>,
    end: Option<String>,
) -> Result<DateWindow, Box<dyn std::error::Error>> {
    let start = match start {
        Some(s) => parse_date(&s)?,
        None => config::default_start_date(),
    };
    let end = match end {
        Some(s) => parse_date(&s)?,
        None => config::default_end_date(),
    };
    if start > end {
        return Err(format!("start date {start} is after end date {end}").into());
    }
    Ok(DateWindow { start, end })
}

fn parse_date(value: &str) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    value
        .trim()
        .parse::<NaiveDate>()
        .map_err(|_| format!("invalid date '{value}', expected YYYY-MM-DD").into())
}

fn parse_project_ids(list: &str) -> Result<Vec<u64>, Box<dyn std::error::Error>> {
    config::split_list(list)
        .iter()
        .map(|part| {
            part.parse::<u64>()
                .map_err(|_| format!("invalid project ID '{part}'").into())
        })
        .collect()
}
