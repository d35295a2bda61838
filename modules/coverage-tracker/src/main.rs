use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use coverage_core::{CoverageError, RequestBuilder};
use coverage_tracker::cli::Cli;
use coverage_tracker::render::{render_raw, render_rows, render_summary, render_transport_error};
use coverage_tracker::{Tracker, TrackerConfig};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Logs go to stderr; stdout carries the table
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("coverage=info".parse()?)
                .add_directive("apify_client=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    // Validate input before touching credentials or the network
    let queries = cli.load_queries()?;
    let request = RequestBuilder::new().build(&queries, &cli.search_options())?;

    let config = TrackerConfig::from_env()?;
    config.log_redacted();

    let tracker = Tracker::new(config.apify_client(), cli.exclude_pattern());
    info!(recency = %cli.recency, "Coverage tracker search starting");

    let outcome = match tracker.run(&request).await {
        Ok(outcome) => outcome,
        Err(CoverageError::Transport { status, body }) => {
            eprintln!("{}", render_transport_error(status, &body));
            return Ok(ExitCode::FAILURE);
        }
        Err(err) => return Err(err.into()),
    };

    let mut summary = render_summary(&outcome).into_iter();
    if let Some(first) = summary.next() {
        eprintln!("{first}");
    }
    if !outcome.rows.is_empty() {
        println!("{}", render_rows(&outcome.rows, cli.format));
    }
    for line in summary {
        eprintln!("{line}");
    }

    if cli.raw {
        println!("{}", render_raw(&outcome));
    }

    Ok(ExitCode::SUCCESS)
}
