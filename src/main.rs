mod adapters;
mod application;
mod cli;
mod config;
mod live_view;
mod ports;
mod shared;

use adapters::outbound::console::{TerminalChartRenderer, TerminalPresenter};
use adapters::outbound::network::HttpFindingsApi;
use application::use_cases::DashboardSession;
use cli::Args;
use shared::error::{DashboardError, ExitCode};
use shared::Result;
use std::path::Path;
use std::process;
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

fn main() {
    // Log to stderr so the dashboard itself owns stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("secdash=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse_args();

    if let Err(e) = run(args) {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        let code = e
            .downcast_ref::<DashboardError>()
            .map(DashboardError::exit_code)
            .unwrap_or(ExitCode::ApplicationError);
        process::exit(code.as_i32());
    }
}

fn run(args: Args) -> Result<()> {
    // Load configuration: an explicit --config must exist, otherwise a
    // secdash.config.yml beside the binary is picked up when present.
    let config_file = match args.config.as_deref() {
        Some(path) => Some(config::load_config_from_path(path)?),
        None => config::discover_config(Path::new("."))?,
    };
    let settings = config::resolve_settings(&args, config_file)?;

    // Create adapters (Dependency Injection)
    let api = HttpFindingsApi::new(&settings.api_url)?;
    let renderer = TerminalChartRenderer::new();
    let presenter = TerminalPresenter::new();

    let session = Rc::new(DashboardSession::new(
        api,
        renderer,
        presenter,
        settings.options,
    ));

    // The whole session runs on one logical thread; fetches interleave
    // but never run in parallel, which is what makes the reconciler's
    // staleness guard race-free without locking.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let local = tokio::task::LocalSet::new();
    runtime.block_on(local.run_until(session.run()))
}
