use clap::Parser;
use std::path::PathBuf;

/// Live terminal dashboard for a security-findings pipeline
#[derive(Parser, Debug, Default)]
#[command(name = "secdash")]
#[command(version)]
#[command(
    about = "Live terminal dashboard for a security-findings pipeline",
    long_about = None
)]
pub struct Args {
    /// Base URL of the findings API (default: http://127.0.0.1:8001/api)
    #[arg(short, long)]
    pub api_url: Option<String>,

    /// Path to a config file (default: ./secdash.config.yml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Scope the aggregate views to one project (owner/repo form)
    #[arg(short, long)]
    pub repo: Option<String>,

    /// Findings table page size (default: 15)
    #[arg(long)]
    pub per_page: Option<u64>,

    /// Seconds between stats and project polls (default: 5)
    #[arg(long)]
    pub fast_interval: Option<u64>,

    /// Seconds between findings table polls (default: 30)
    #[arg(long)]
    pub findings_interval: Option<u64>,

    /// Seconds between scan progress polls (default: 2)
    #[arg(long)]
    pub progress_interval: Option<u64>,

    /// Render one snapshot and exit instead of polling
    #[arg(long)]
    pub once: bool,
}

impl Args {
    /// Parses command-line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }
}
