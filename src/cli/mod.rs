//! Command-line interface
//!
//! Running without a subcommand opens the desktop window; the subcommands
//! below work headless.

mod commands;
mod output;

use clap::{Parser, Subcommand};

pub use output::{OutputFormat, print_error};

/// Archive Roulette - random media from the Internet Archive
#[derive(Parser, Debug)]
#[command(name = "archive-roulette")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[command(flatten)]
    pub output: OutputOptions,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output formatting options
#[derive(Parser, Debug, Clone)]
pub struct OutputOptions {
    /// Output in JSON format (for machine parsing)
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl OutputOptions {
    pub fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch one random item
    Random(commands::random::RandomArgs),

    /// List the available media categories
    Categories,

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: commands::config::ConfigCommands,
    },
}

/// Run a subcommand
pub async fn run(command: Commands, options: &OutputOptions) -> anyhow::Result<()> {
    let format = options.format();
    let quiet = options.quiet;

    match command {
        Commands::Random(args) => commands::random::run(args, format, quiet).await,
        Commands::Categories => commands::categories::run(format).await,
        Commands::Config { command } => commands::config::run(command, format, quiet).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;

    #[test]
    fn test_no_subcommand_means_desktop() {
        let cli = Cli::try_parse_from(["archive-roulette"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.output.format(), OutputFormat::Text);
    }

    #[test]
    fn test_random_with_categories() {
        let cli = Cli::try_parse_from([
            "archive-roulette",
            "random",
            "-c",
            "images",
            "--category",
            "videos",
            "--json",
        ])
        .unwrap();

        assert_eq!(cli.output.format(), OutputFormat::Json);
        match cli.command {
            Some(Commands::Random(args)) => {
                assert_eq!(args.categories, vec![Category::Images, Category::Movies]);
                assert!(!args.open);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        assert!(Cli::try_parse_from(["archive-roulette", "random", "-c", "music"]).is_err());
    }
}
