//! Configuration file support for contribstat.
//!
//! Configuration is loaded with the following precedence (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (prefixed with `CONTRIBSTAT_`, e.g., `CONTRIBSTAT_GITLAB_TOKEN`)
//! 3. Config file (~/.config/contribstat/config.toml or ./contribstat.toml)
//! 4. Built-in defaults
//!
//! Example config file:
//! ```toml
//! [gitlab]
//! url = "https://gitlab.example.com"
//! token = "glpat-..."  # or use CONTRIBSTAT_GITLAB_TOKEN env var
//! api_version = "v4"   # optional, this is the default
//!
//! [analyze]
//! projects = "42,7"
//! manifest = "projects.csv"
//! output_dir = "output"
//! authors = "alice,bob"
//! ```

use std::path::PathBuf;

use chrono::{Datelike, Local, NaiveDate};
use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// GitLab connection configuration.
    pub gitlab: GitLabConfig,
    /// Defaults for the analyze command.
    pub analyze: AnalyzeConfig,
}

/// GitLab connection configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GitLabConfig {
    /// GitLab instance URL (e.g., "https://gitlab.example.com").
    /// Can also be set via CONTRIBSTAT_GITLAB_URL environment variable.
    pub url: Option<String>,
    /// GitLab personal access token with `read_api` scope.
    /// Can also be set via CONTRIBSTAT_GITLAB_TOKEN environment variable.
    pub token: Option<String>,
    /// API version path segment.
    pub api_version: String,
}

impl Default for GitLabConfig {
    fn default() -> Self {
        Self {
            url: None,
            token: None,
            api_version: "v4".to_string(),
        }
    }
}

/// Defaults for the analyze command.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AnalyzeConfig {
    /// Comma-separated project IDs.
    pub projects: Option<String>,
    /// Window start date (YYYY-MM-DD). Defaults to the first day of the
    /// current month when unset.
    pub start_date: Option<String>,
    /// Window end date (YYYY-MM-DD). Defaults to today when unset.
    pub end_date: Option<String>,
    /// Project manifest CSV path.
    pub manifest: String,
    /// Report output directory.
    pub output_dir: String,
    /// Comma-separated author allow-list. Empty means everyone.
    pub authors: Option<String>,
}

impl Default for AnalyzeConfig {
    fn default() -> Self {
        Self {
            projects: None,
            start_date: None,
            end_date: None,
            manifest: "projects.csv".to_string(),
            output_dir: "output".to_string(),
            authors: None,
        }
    }
}

impl Config {
    /// Load configuration using the config crate's layered approach.
    ///
    /// Sources are loaded in order (later sources override earlier):
    /// 1. Built-in defaults
    /// 2. XDG config file (~/.config/contribstat/config.toml)
    /// 3. Local config file (./contribstat.toml)
    /// 4. Environment variables with CONTRIBSTAT_ prefix
    pub fn load() -> Self {
        let mut builder = ConfigBuilder::builder();

        if let Some(proj_dirs) = ProjectDirs::from("", "", "contribstat") {
            let xdg_config = proj_dirs.config_dir().join("config.toml");
            if xdg_config.exists() {
                tracing::debug!("Loading config from {:?}", xdg_config);
                builder = builder.add_source(
                    File::from(xdg_config)
                        .format(FileFormat::Toml)
                        .required(false),
                );
            }
        }

        // Local config file (higher priority than XDG)
        let local_config = PathBuf::from("contribstat.toml");
        if local_config.exists() {
            tracing::debug!("Loading config from ./contribstat.toml");
            builder = builder.add_source(
                File::from(local_config)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        // CONTRIBSTAT_ prefixed environment variables
        // e.g., CONTRIBSTAT_GITLAB_TOKEN -> gitlab.token
        builder = builder.add_source(
            Environment::with_prefix("CONTRIBSTAT")
                .separator("_")
                .try_parsing(true),
        );

        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<Config>() {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to deserialize config: {}", e);
                    Config::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to build config: {}", e);
                Config::default()
            }
        }
    }

    /// Get the GitLab instance URL.
    pub fn gitlab_url(&self) -> Option<String> {
        self.gitlab.url.clone()
    }

    /// Get the GitLab token.
    pub fn gitlab_token(&self) -> Option<String> {
        self.gitlab.token.clone()
    }
}

/// The default window start: the first day of the current month.
pub fn default_start_date() -> NaiveDate {
    let today = Local::now().date_naive();
    today.with_day(1).unwrap_or(today)
}

/// The default window end: today.
pub fn default_end_date() -> NaiveDate {
    Local::now().date_naive()
}

/// Split a comma-separated list, trimming whitespace and dropping empties.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
