//! `taxids-to-pplacer` binary.

use std::process::ExitCode;

use clap::Parser;
use taxdump_cli::{run, Cli};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Diagnostics go to stderr; stdout carries the CSV rows
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .init();

    let stdout = std::io::stdout();
    match run(&cli, stdout.lock(), std::io::stderr()) {
        Ok(summary) => {
            tracing::info!(
                written = summary.written,
                skipped = summary.skipped,
                "conversion finished"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
