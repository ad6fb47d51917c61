//! Content Mirror CLI
//!
//! Mirrors a content space into one front-matter Markdown file per entry.

mod cli;
mod commands;
mod context;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;
use mirror_core::SyncOptions;

use cli::{Cli, Commands};
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose)
        .map_err(|e| CliError::user(format!("Failed to initialise logging: {e}")))?;
    if cli.verbose {
        tracing::debug!("Verbose mode enabled");
    }

    let Some(command) = cli.command.clone() else {
        println!("{} Content Mirror CLI", "mirror".green().bold());
        println!();
        println!("Run {} for available commands.", "mirror --help".cyan());
        return Ok(());
    };

    let cwd = std::env::current_dir()?;
    let config = context::load_config(&cli, &cwd)?;

    match command {
        Commands::Sync {
            dry_run,
            full,
            json,
        } => commands::run_sync(&config, SyncOptions { dry_run, full }, json),
        Commands::Status { json } => commands::run_status(&config, json),
    }
}
