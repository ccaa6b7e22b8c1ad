mod catalog;
mod cli;
mod config;
mod error;
mod install;
mod runner;
mod ui;

use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::Cli;
use ui::Reporter;

/// Log filter without `-v`. Per-tool failures go to stdout and are logged at
/// debug, so a run that exits 0 leaves stderr empty.
pub(crate) const DEFAULT_LOG_FILTER: &str = "armory=warn";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };

    let default_filter = if cli.verbose { "armory=debug" } else { DEFAULT_LOG_FILTER };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_ansi(std::io::stderr().is_terminal())
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.execute().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_usage() => {
            eprintln!("error: {}\n", e);
            eprint!("{}", cli::usage());
            ExitCode::from(e.exit_code())
        }
        Err(e) => {
            Reporter::stdio().error(&e.to_string());
            ExitCode::from(e.exit_code())
        }
    }
}
