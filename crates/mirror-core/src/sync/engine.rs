//! SyncEngine implementation
//!
//! A pass runs two linear stages against an in-memory [`SyncState`]:
//! created/updated entries are written, then deletions are applied and the
//! asset cache refreshed. The cursor advances only after both stages
//! succeed, and the state is persisted only after that. A failed pass
//! leaves earlier file writes in place; since every write is a whole-file
//! overwrite and deleting an absent file is a no-op, replaying the same
//! delta converges on the same result.

use std::collections::{BTreeMap, HashMap};

use mirror_fs::NormalizedPath;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::ContentTypeOverride;
use crate::model::{Delta, Locale, default_locale};
use crate::naming::PathNamer;
use crate::remote::RemoteSource;
use crate::resolve::{DeltaIndex, LinkResolver, Record};
use crate::schema::{ContentType, ContentTypeRegistry};
use crate::state::{SyncState, SyncStateStore};
use crate::writer::EntryWriter;
use crate::{Error, Result};

use super::report::SyncReport;

/// Options for a sync run
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// Run the pass but do not persist the resulting state.
    pub dry_run: bool,
    /// Ignore the stored cursor and request the initial delta.
    pub full: bool,
}

/// Drives sync passes from a [`RemoteSource`] into an [`EntryWriter`].
pub struct SyncEngine<S, W> {
    source: S,
    writer: W,
    overrides: BTreeMap<String, ContentTypeOverride>,
    namer: PathNamer,
}

impl<S: RemoteSource, W: EntryWriter> SyncEngine<S, W> {
    pub fn new(source: S, writer: W, overrides: BTreeMap<String, ContentTypeOverride>) -> Self {
        Self {
            source,
            writer,
            overrides,
            namer: PathNamer::default(),
        }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Load the state, run one pass, and persist the result.
    ///
    /// # Errors
    ///
    /// Any error aborts the pass; the persisted state (and its cursor) is
    /// then left exactly as it was before the call.
    pub async fn run(&self, store: &SyncStateStore, options: &SyncOptions) -> Result<SyncReport> {
        let mut state = store.load()?;
        let cursor = if options.full {
            None
        } else {
            state.cursor().map(str::to_owned)
        };
        info!(cursor = ?cursor, full = options.full, "starting sync pass");

        let mut report = self.run_pass(&mut state, cursor.as_deref()).await?;

        if options.dry_run {
            report.dry_run = true;
            info!("dry run, sync state not persisted");
        } else {
            store.save(&state)?;
        }

        Ok(report)
    }

    /// Fetch locales, schemas and the delta concurrently, then apply the delta.
    pub async fn run_pass(&self, state: &mut SyncState, cursor: Option<&str>) -> Result<SyncReport> {
        let (locales, content_types, delta) = tokio::try_join!(
            self.source.list_locales(),
            self.source.list_content_types(),
            self.source.fetch_delta(cursor),
        )?;

        debug!(
            entries = delta.entries.len(),
            assets = delta.assets.len(),
            deleted_entries = delta.deleted_entries.len(),
            deleted_assets = delta.deleted_assets.len(),
            "fetched delta"
        );

        self.apply(state, &locales, content_types, &delta)
    }

    /// Apply an already fetched delta to `state` and the filesystem.
    ///
    /// On success the state's cursor is set to the delta's continuation
    /// token; persisting it is left to the caller.
    pub fn apply(
        &self,
        state: &mut SyncState,
        locales: &[Locale],
        content_types: Vec<ContentType>,
        delta: &Delta,
    ) -> Result<SyncReport> {
        let locale = default_locale(locales)?;
        let registry = ContentTypeRegistry::new(content_types, &self.overrides)?;
        let mut report = SyncReport::new(delta.next_cursor.clone());

        for content_type in registry.content_types() {
            self.writer
                .ensure_directory(&self.namer.type_directory(&registry, content_type))?;
        }

        self.apply_entries(state, &registry, locale, delta, &mut report)?;
        self.apply_deletions(state, delta, &mut report)?;

        state.advance_cursor(delta.next_cursor.clone());
        info!(
            written = report.written.len(),
            deleted = report.deleted.len(),
            skipped = report.skipped_deletions.len(),
            cursor = %report.next_cursor,
            "sync pass applied"
        );

        Ok(report)
    }

    fn apply_entries(
        &self,
        state: &mut SyncState,
        registry: &ContentTypeRegistry,
        locale: &str,
        delta: &Delta,
        report: &mut SyncReport,
    ) -> Result<()> {
        let index = DeltaIndex::new(delta);
        let mut written_by: HashMap<NormalizedPath, &str> = HashMap::new();

        for entry in &delta.entries {
            let (path, metadata, body) = {
                let resolver = LinkResolver::new(registry, locale, &index, state);
                let content_type = registry.find_by_id(entry.content_type_id())?;
                let mut record = resolver.project(entry, true)?;
                let path = self.namer.file_name_for(registry, content_type, &record);
                let body = split_body(&mut record, registry.body_field_of(content_type));
                (path, record, body)
            };

            if let Some(first) = written_by.insert(path.clone(), entry.id())
                && first != entry.id()
            {
                return Err(Error::PathCollision {
                    path: path.to_string(),
                    first: first.to_string(),
                    second: entry.id().to_string(),
                });
            }

            if state.path_in_use(&path, entry.id()) {
                warn!(id = entry.id(), path = %path, "entry file is shared with another entry");
            }

            self.writer.write_record(&path, &metadata, &body)?;
            report.written.push(path.clone());

            // A changed identifier value moves the file; drop the old one
            if let Some(previous) = state.record_entry(entry.clone(), path.clone())
                && previous != path
                && !state.path_in_use(&previous, entry.id())
            {
                debug!(id = entry.id(), from = %previous, to = %path, "entry file renamed");
                self.remove_file(&previous, report)?;
            }
        }

        Ok(())
    }

    fn apply_deletions(
        &self,
        state: &mut SyncState,
        delta: &Delta,
        report: &mut SyncReport,
    ) -> Result<()> {
        for id in &delta.deleted_entries {
            let Some(path) = state.entry_path(id).cloned() else {
                warn!(id = %id, "deleted entry was never mirrored, skipping");
                state.forget_entry(id);
                report.skipped_deletions.push(id.clone());
                continue;
            };

            if state.path_in_use(&path, id) {
                warn!(id = %id, path = %path, "entry file now belongs to another entry, keeping it");
            } else {
                self.remove_file(&path, report)?;
            }
            state.forget_entry(id);
        }

        for asset in &delta.assets {
            state.record_asset(asset.clone());
            report.assets_cached += 1;
        }

        for id in &delta.deleted_assets {
            if state.forget_asset(id) {
                report.assets_forgotten += 1;
            }
        }

        Ok(())
    }

    fn remove_file(&self, path: &NormalizedPath, report: &mut SyncReport) -> Result<()> {
        if self.writer.delete_file(path)? {
            report.deleted.push(path.clone());
        } else {
            warn!(path = %path, "entry file already absent");
        }
        Ok(())
    }
}

/// Take the body field out of the record; what remains is the metadata.
fn split_body(record: &mut Record, body_field: Option<&str>) -> String {
    match body_field.and_then(|field| record.shift_remove(field)) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(body)) => body,
        Some(other) => other.to_string(),
    }
}
