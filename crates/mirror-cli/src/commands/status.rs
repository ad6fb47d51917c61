//! Status command implementation

use std::collections::BTreeMap;

use colored::Colorize;
use mirror_core::{MirrorConfig, SyncState, SyncStateStore};
use serde::Serialize;

use crate::error::Result;

/// Snapshot of the persisted sync state
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusSummary {
    data_directory: String,
    cursor: Option<String>,
    entry_files: usize,
    cached_entries: usize,
    cached_assets: usize,
    /// Entry files per content type directory
    directories: BTreeMap<String, usize>,
}

impl StatusSummary {
    fn new(config: &MirrorConfig, state: &SyncState) -> Self {
        let mut directories = BTreeMap::new();
        for path in state.entry_files().values() {
            let directory = path
                .parent()
                .and_then(|parent| parent.file_name().map(str::to_owned))
                .unwrap_or_default();
            *directories.entry(directory).or_insert(0) += 1;
        }

        Self {
            data_directory: config.data_directory.clone(),
            cursor: state.cursor().map(str::to_owned),
            entry_files: state.entry_files().len(),
            cached_entries: state.entry_cache().len(),
            cached_assets: state.asset_cache().len(),
            directories,
        }
    }
}

/// Run the status command
pub fn run_status(config: &MirrorConfig, json: bool) -> Result<()> {
    let store = SyncStateStore::new(config.state_path());
    let state = store.load()?;
    let summary = StatusSummary::new(config, &state);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}", "Mirror Status".bold());
    println!();
    println!("{}:  {}", "Data".dimmed(), summary.data_directory);

    match &summary.cursor {
        Some(cursor) => println!("{}:  {}", "Cursor".dimmed(), cursor.cyan()),
        None => {
            println!("{}:  {}", "Cursor".dimmed(), "none".yellow());
            println!();
            println!("Never synced. Run {} to start.", "mirror sync".cyan());
            return Ok(());
        }
    }
    println!();

    println!("{}:", "Entries".bold());
    for (directory, count) in &summary.directories {
        println!("   {} {} ({})", "-".green(), directory, count);
    }
    println!(
        "   {} files, {} cached entries, {} cached assets",
        summary.entry_files, summary.cached_entries, summary.cached_assets
    );

    Ok(())
}
