mod app;
mod archive;
mod category;
mod cli;
mod config;
mod picker;
mod state;
mod task;
mod ui;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::archive::ArchiveClient;
use crate::cli::Cli;
use crate::config::Config;

/// Set up tracing. Logs go to stderr so CLI output stays clean.
fn init_logging(cli: &Cli) {
    let default_filter = match (&cli.command, cli.output.verbose) {
        (_, true) => "archive_roulette=debug,info",
        (Some(_), false) => "archive_roulette=warn,warn",
        (None, false) => "archive_roulette=debug,info",
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run_desktop() -> Result<()> {
    tracing::info!("Starting Archive Roulette");

    let config = Config::load().unwrap_or_else(|e| {
        tracing::error!("Failed to load config, using defaults: {}", e);
        Config::default()
    });
    let client = ArchiveClient::new(&config.archive)?;

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([900.0, 700.0])
        .with_min_inner_size([500.0, 400.0])
        .with_title("Random Media Generator");

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Archive Roulette",
        native_options,
        Box::new(|cc| Ok(Box::new(app::RouletteApp::new(cc, config, client)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))?;

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let runtime = tokio::runtime::Runtime::new()?;

    // The window runs on this thread with the runtime entered rather than
    // inside block_on, so polling finished tasks never hits a spent budget
    let Some(command) = cli.command else {
        let _guard = runtime.enter();
        return run_desktop();
    };

    if let Err(e) = runtime.block_on(cli::run(command, &cli.output)) {
        cli::print_error(&e.to_string());
        std::process::exit(1);
    }

    Ok(())
}
