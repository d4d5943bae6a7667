mod cli;
mod cli_modes;
mod render;

use anyhow::Result;
use cli::Cli;
use cli_modes::{CliModeResult, calendar_mode, overview_mode, read_mode, write_mode};
use render::{RenderOptions, Renderer};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracker_core::Tracker;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("tracker: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::new();
    let tracker = Tracker::new(cli.data_dir.clone())?;
    debug!(table = %tracker.store.path().display(), "tracker ready");

    let renderer = Renderer::new(RenderOptions {
        date_format: tracker.config.date_format.clone(),
        use_color: cli.color.enabled(),
        labels: tracker.field_labels(),
    });

    if cli.path {
        println!("{}", tracker.store.path().display());
        return Ok(());
    }

    if let CliModeResult::Finish = write_mode(&cli, &renderer, &tracker)? {
        return Ok(());
    }

    if let CliModeResult::Finish = read_mode(&cli, &renderer, &tracker)? {
        return Ok(());
    }

    if let CliModeResult::Finish = calendar_mode(&cli, &renderer, &tracker)? {
        return Ok(());
    }

    overview_mode(&renderer, &tracker)?;
    Ok(())
}
