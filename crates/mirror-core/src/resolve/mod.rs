//! Field projection and link resolution
//!
//! Turns a raw [`Entry`] into a flat [`Record`]: scalars copied, links
//! flattened into `{id, title[, url]}` summaries. Links inside a linked
//! entry are never followed, so resolution is bounded at depth one.

mod link;
mod projection;

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::model::{Asset, Delta, Entry};
use crate::schema::ContentTypeRegistry;
use crate::state::SyncState;

/// A projected entry: field id to display-ready value.
pub type Record = Map<String, Value>;

/// Id-keyed view of the objects carried by the current delta.
#[derive(Debug, Default)]
pub struct DeltaIndex<'a> {
    entries: HashMap<&'a str, &'a Entry>,
    assets: HashMap<&'a str, &'a Asset>,
}

impl<'a> DeltaIndex<'a> {
    pub fn new(delta: &'a Delta) -> Self {
        Self {
            entries: delta.entries.iter().map(|e| (e.id(), e)).collect(),
            assets: delta.assets.iter().map(|a| (a.id(), a)).collect(),
        }
    }

    pub fn entry(&self, id: &str) -> Option<&'a Entry> {
        self.entries.get(id).copied()
    }

    pub fn asset(&self, id: &str) -> Option<&'a Asset> {
        self.assets.get(id).copied()
    }
}

/// Resolves references against the current delta first, then the sync
/// state's caches from earlier passes.
#[derive(Debug)]
pub struct LinkResolver<'a> {
    registry: &'a ContentTypeRegistry,
    locale: &'a str,
    delta: &'a DeltaIndex<'a>,
    state: &'a SyncState,
}

impl<'a> LinkResolver<'a> {
    pub fn new(
        registry: &'a ContentTypeRegistry,
        locale: &'a str,
        delta: &'a DeltaIndex<'a>,
        state: &'a SyncState,
    ) -> Self {
        Self {
            registry,
            locale,
            delta,
            state,
        }
    }
}
