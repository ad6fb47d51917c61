//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Config file read when `--config` is not given
pub const DEFAULT_CONFIG: &str = "mirror.toml";

/// Content Mirror - Keep a local folder of front-matter files in sync with a content space
#[derive(Parser, Debug)]
#[command(name = "mirror")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (TOML, JSON or YAML); defaults to ./mirror.toml when present
    #[arg(short, long, global = true, env = "MIRROR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the data directory from the config file
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    /// Override the export directory the space is replayed from
    #[arg(long, global = true)]
    pub source: Option<String>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Pull changes since the last sync and update the mirrored files
    ///
    /// Examples:
    ///   mirror sync                  # Incremental sync from the stored cursor
    ///   mirror sync --dry-run        # Show what would change
    ///   mirror sync --full           # Start again from the initial delta
    Sync {
        /// Preview changes without writing files or state
        #[arg(long)]
        dry_run: bool,

        /// Ignore the stored cursor and request the initial delta
        #[arg(long)]
        full: bool,

        /// Output the sync report as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Show the stored cursor and what the mirror currently tracks
    Status {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}
