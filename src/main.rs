use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::io;
use tailrs::cli::Args;
use tailrs::executor::TailExecutor;
use tailrs::signal;

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose)?;

    let config = args.into_config();
    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        eprintln!();
        Args::command().write_help(&mut io::stderr())?;
        std::process::exit(1);
    }

    // Ctrl+C stops followers at their next poll; a second one exits at once
    let cancel =
        signal::setup_shutdown_handlers().context("Failed to install signal handlers")?;

    let report = TailExecutor::new(config)
        .execute(io::stdout().lock(), &cancel)
        .context("Failed to write output")?;

    if !report.is_success() {
        std::process::exit(1);
    }

    Ok(())
}

/// Diagnostics go to stderr; stdout carries only tailed lines
fn init_tracing(verbose: bool) -> Result<()> {
    let directive = if verbose { "tailrs=debug" } else { "tailrs=warn" };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(directive.parse()?),
        )
        .with_writer(io::stderr)
        .init();

    Ok(())
}
