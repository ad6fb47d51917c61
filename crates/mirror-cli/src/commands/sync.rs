//! Sync command implementation

use colored::Colorize;
use mirror_core::{
    DryRunWriter, FrontMatterWriter, MirrorConfig, ReplaySource, SyncEngine, SyncOptions,
    SyncReport, SyncStateStore,
};
use mirror_fs::io;

use crate::error::{CliError, Result};

/// Run the sync command
///
/// Applies everything that changed since the stored cursor to the data
/// directory and persists the new state. With `dry_run` the planned file
/// actions are printed instead.
pub fn run_sync(config: &MirrorConfig, options: SyncOptions, json: bool) -> Result<()> {
    let source_dir = config.source.as_deref().ok_or_else(|| {
        CliError::user("No source configured. Set `source` in mirror.toml or pass --source")
    })?;
    let source = ReplaySource::new(source_dir);
    let root = config.data_root();
    let store = SyncStateStore::new(config.state_path());

    if !json {
        let verb = if options.dry_run { "Previewing sync" } else { "Syncing" };
        println!("{} {} into {}...", "=>".blue().bold(), verb, root.as_str().cyan());
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let report = if options.dry_run {
        let engine = SyncEngine::new(source, DryRunWriter::new(), config.content_types.clone());
        let report = runtime.block_on(engine.run(&store, &options))?;
        if !json {
            for action in engine.writer().actions() {
                println!("   {}", action.dimmed());
            }
        }
        report
    } else {
        io::ensure_dir(&root)?;
        let engine = SyncEngine::new(
            source,
            FrontMatterWriter::new(root.clone()),
            config.content_types.clone(),
        );
        runtime.block_on(engine.run(&store, &options))?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &SyncReport) {
    if report.is_empty() && report.skipped_deletions.is_empty() {
        println!("{} Already up to date.", "OK".green().bold());
    } else {
        for path in &report.written {
            println!("   {} {}", "+".green(), path.as_str());
        }
        for path in &report.deleted {
            println!("   {} {}", "-".red(), path.as_str());
        }
        for id in &report.skipped_deletions {
            println!("   {} {} (never mirrored)", "?".yellow(), id.dimmed());
        }
        println!(
            "{} {} written, {} deleted, {} assets cached, {} assets forgotten.",
            "OK".green().bold(),
            report.written.len(),
            report.deleted.len(),
            report.assets_cached,
            report.assets_forgotten
        );
    }

    if report.dry_run {
        println!("{} Dry run, nothing was changed.", "NOTE".yellow().bold());
    } else {
        println!("{}:  {}", "Cursor".dimmed(), report.next_cursor);
    }
}
