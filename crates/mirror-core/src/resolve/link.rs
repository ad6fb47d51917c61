use serde_json::{Value, json};
use tracing::trace;

use super::LinkResolver;
use crate::model::{Asset, Entry, LinkType, Reference};
use crate::{Error, Result};

impl<'a> LinkResolver<'a> {
    /// Inline summary of a referenced object.
    ///
    /// Assets become `{id, title, url}`, entries `{id, title}` where the
    /// title is the linked entry's display field read from a
    /// non-resolving projection.
    pub fn resolve(&self, reference: &Reference) -> Result<Value> {
        match reference {
            Reference::Asset(asset) => Ok(self.asset_summary(asset)),
            Reference::Entry(entry) => self.entry_summary(entry),
            Reference::Pointer {
                link_type: LinkType::Asset,
                id,
            } => Ok(self.asset_summary(self.lookup_asset(id)?)),
            Reference::Pointer {
                link_type: LinkType::Entry,
                id,
            } => self.entry_summary(self.lookup_entry(id)?),
        }
    }

    /// Find an entry by id in the current delta, falling back to the cache.
    pub fn lookup_entry(&self, id: &str) -> Result<&'a Entry> {
        if let Some(entry) = self.delta.entry(id) {
            return Ok(entry);
        }
        trace!(id, "entry link not in delta, using cached snapshot");
        self.state
            .cached_entry(id)
            .ok_or_else(|| Error::UnresolvedLink {
                link_type: LinkType::Entry,
                id: id.to_string(),
            })
    }

    /// Find an asset by id in the current delta, falling back to the cache.
    pub fn lookup_asset(&self, id: &str) -> Result<&'a Asset> {
        if let Some(asset) = self.delta.asset(id) {
            return Ok(asset);
        }
        trace!(id, "asset link not in delta, using cached snapshot");
        self.state
            .cached_asset(id)
            .ok_or_else(|| Error::UnresolvedLink {
                link_type: LinkType::Asset,
                id: id.to_string(),
            })
    }

    fn asset_summary(&self, asset: &Asset) -> Value {
        json!({
            "id": asset.id(),
            "title": asset.title(self.locale),
            "url": asset.url(self.locale),
        })
    }

    fn entry_summary(&self, entry: &Entry) -> Result<Value> {
        let content_type = self.registry.find_by_id(entry.content_type_id())?;
        let fields = self.project(entry, false)?;
        let title = content_type
            .display_field
            .as_deref()
            .and_then(|field| fields.get(field))
            .cloned()
            .unwrap_or(Value::Null);

        Ok(json!({
            "id": entry.id(),
            "title": title,
        }))
    }
}
