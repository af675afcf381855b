//! Configuration management commands

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;

use crate::cli::output::{OutputFormat, print_formatted, print_success};
use crate::config::Config;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Show config file path
    Path,

    /// Write a config file with default values if none exists
    Init,
}

#[derive(Serialize)]
struct ConfigPathResult {
    path: String,
    exists: bool,
}

pub async fn run(command: ConfigCommands, format: OutputFormat, quiet: bool) -> Result<()> {
    match command {
        ConfigCommands::Show => show(format).await,
        ConfigCommands::Path => path(format).await,
        ConfigCommands::Init => init(quiet).await,
    }
}

async fn show(format: OutputFormat) -> Result<()> {
    let config = Config::load()?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
        OutputFormat::Text => println!("{}", toml::to_string_pretty(&config)?),
    }

    Ok(())
}

async fn path(format: OutputFormat) -> Result<()> {
    let path = Config::config_path()?;
    let result = ConfigPathResult {
        path: path.to_string_lossy().to_string(),
        exists: path.exists(),
    };

    print_formatted(&result, format, |r| {
        if r.exists {
            r.path.clone()
        } else {
            format!("{} (not created yet)", r.path)
        }
    });

    Ok(())
}

async fn init(quiet: bool) -> Result<()> {
    let path = Config::config_path()?;
    if path.exists() {
        print_success(&format!("Config already exists at {}", path.display()), quiet);
        return Ok(());
    }

    Config::default().save_to(&path)?;
    print_success(&format!("Wrote default config to {}", path.display()), quiet);
    Ok(())
}
