//! contribstat CLI - per-author code-change statistics for GitLab projects.

mod commands;
mod config;
mod progress;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "contribstat")]
#[command(version)]
#[command(about = "Per-author code-change statistics for GitLab projects")]
#[command(
    long_about = "contribstat aggregates line-change statistics (additions, deletions, changes) \
per author across one or more GitLab projects over a date range, deduplicating \
cherry-picked and merge commits, and exports one CSV report per author."
)]
#[command(after_long_help = r#"EXAMPLES
    Analyze two projects over the current month:
        $ contribstat analyze -p 42,7

    Analyze a fixed window for selected authors:
        $ contribstat analyze -p 42 -s 2024-01-01 -e 2024-01-31 -u alice,bob

    List the projects visible to the configured token:
        $ contribstat projects

CONFIGURATION
    contribstat reads configuration from:
      1. ~/.config/contribstat/config.toml (or $XDG_CONFIG_HOME/contribstat/config.toml)
      2. ./contribstat.toml
      3. Environment variables (CONTRIBSTAT_* prefix)
      4. .env file in current directory

ENVIRONMENT VARIABLES
    CONTRIBSTAT_GITLAB_URL       GitLab instance URL (e.g. https://gitlab.example.com)
    CONTRIBSTAT_GITLAB_TOKEN     GitLab personal access token (read_api scope)
    CONTRIBSTAT_ANALYZE_PROJECTS Comma-separated project IDs
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect statistics and export per-author CSV reports
    Analyze {
        #[command(flatten)]
        args: AnalyzeArgs,
    },
    /// List projects visible to the configured token
    Projects,
}

/// Options for the analyze command. Flags override config file values.
#[derive(Debug, Clone, clap::Args)]
struct AnalyzeArgs {
    /// Project IDs to analyze, comma-separated (default from config)
    #[arg(short = 'p', long)]
    projects: Option<String>,

    /// Window start date, YYYY-MM-DD (default: first day of the current month)
    #[arg(short = 's', long)]
    start_date: Option<String>,

    /// Window end date, YYYY-MM-DD (default: today)
    #[arg(short = 'e', long)]
    end_date: Option<String>,

    /// Project manifest CSV for display names (default: projects.csv)
    #[arg(short = 'f', long)]
    manifest: Option<std::path::PathBuf>,

    /// Directory for the CSV reports (default: output)
    #[arg(short = 'o', long)]
    output_dir: Option<std::path::PathBuf>,

    /// Only report these authors, comma-separated (default: everyone)
    #[arg(short = 'u', long)]
    authors: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("contribstat=info,contribstat_cli=info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    // Load configuration (config file -> env vars -> defaults)
    let config = config::Config::load();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { args } => {
            commands::analyze::handle_analyze(args, &config).await?;
        }
        Commands::Projects => {
            commands::projects::handle_projects(&config).await?;
        }
    }

    Ok(())
}
