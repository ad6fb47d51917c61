//! Fixtures shared by the mirror-core integration tests.
#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use mirror_core::{
    Asset, ContentType, ContentTypeOverride, Delta, Entry, EntryWriter, Error, FrontMatterWriter,
    Locale, Record, RemoteSource, Result, STATE_FILE, SyncState, SyncStateStore,
};
use mirror_fs::NormalizedPath;
use serde_json::{Map, Value, json};
use tempfile::TempDir;

pub const LOCALE: &str = "en-US";

pub fn locales() -> Vec<Locale> {
    vec![
        Locale { code: "de-DE".into(), is_default: false },
        Locale { code: LOCALE.into(), is_default: true },
    ]
}

pub fn content_type(id: &str, name: &str, display_field: &str, fields: Value) -> ContentType {
    serde_json::from_value(json!({
        "sys": {"id": id},
        "name": name,
        "displayField": display_field,
        "fields": fields,
    }))
    .unwrap()
}

/// `Post` (title, slug, body, category, image, related, tags) and `Category` (title).
pub fn blog_schema() -> Vec<ContentType> {
    vec![
        content_type(
            "post",
            "Post",
            "title",
            json!([
                {"id": "title", "type": "Symbol"},
                {"id": "slug", "type": "Symbol"},
                {"id": "body", "type": "Text"},
                {"id": "category", "type": "Link", "linkType": "Entry"},
                {"id": "image", "type": "Link", "linkType": "Asset"},
                {"id": "related", "type": "Array", "items": {"type": "Link", "linkType": "Entry"}},
                {"id": "tags", "type": "Array", "items": {"type": "Symbol"}}
            ]),
        ),
        content_type("category", "Category", "title", json!([{"id": "title", "type": "Symbol"}])),
    ]
}

/// Post files take their body from `body`.
pub fn post_overrides() -> BTreeMap<String, ContentTypeOverride> {
    let mut overrides = BTreeMap::new();
    overrides.insert(
        "Post".to_string(),
        ContentTypeOverride { id: None, contents: Some("body".into()) },
    );
    overrides
}

/// Build an entry, placing every field value under the default locale.
pub fn entry(id: &str, type_id: &str, fields: Value) -> Entry {
    let localized: Map<String, Value> = fields
        .as_object()
        .cloned()
        .unwrap_or_default()
        .into_iter()
        .map(|(field, value)| (field, json!({ LOCALE: value })))
        .collect();

    serde_json::from_value(json!({
        "sys": {"id": id, "type": "Entry", "contentType": {"sys": {"type": "Link", "linkType": "ContentType", "id": type_id}}},
        "fields": localized,
    }))
    .unwrap()
}

pub fn asset(id: &str, title: &str, url: &str) -> Asset {
    serde_json::from_value(json!({
        "sys": {"id": id, "type": "Asset"},
        "fields": {
            "title": { LOCALE: title },
            "file": { LOCALE: {"url": url, "contentType": "image/png"} }
        }
    }))
    .unwrap()
}

pub fn entry_link(id: &str) -> Value {
    json!({"sys": {"type": "Link", "linkType": "Entry", "id": id}})
}

pub fn asset_link(id: &str) -> Value {
    json!({"sys": {"type": "Link", "linkType": "Asset", "id": id}})
}

pub fn delta(next_cursor: &str) -> Delta {
    Delta { next_cursor: next_cursor.to_string(), ..Delta::default() }
}

/// Remote source serving canned deltas keyed by the cursor they answer.
pub struct FakeSource {
    pub locales: Vec<Locale>,
    pub content_types: Vec<ContentType>,
    deltas: HashMap<Option<String>, Delta>,
    requested: Mutex<Vec<Option<String>>>,
}

impl FakeSource {
    pub fn new(content_types: Vec<ContentType>) -> Self {
        Self {
            locales: locales(),
            content_types,
            deltas: HashMap::new(),
            requested: Mutex::new(Vec::new()),
        }
    }

    /// Serve `delta` when asked for changes since `cursor` (`None` = initial).
    pub fn with_delta(mut self, cursor: Option<&str>, delta: Delta) -> Self {
        self.deltas.insert(cursor.map(str::to_owned), delta);
        self
    }

    pub fn requested_cursors(&self) -> Vec<Option<String>> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteSource for FakeSource {
    async fn list_locales(&self) -> Result<Vec<Locale>> {
        Ok(self.locales.clone())
    }

    async fn list_content_types(&self) -> Result<Vec<ContentType>> {
        Ok(self.content_types.clone())
    }

    async fn fetch_delta(&self, cursor: Option<&str>) -> Result<Delta> {
        let key = cursor.map(str::to_owned);
        self.requested.lock().unwrap().push(key.clone());
        self.deltas
            .get(&key)
            .cloned()
            .ok_or_else(|| Error::remote(format!("no delta for cursor {key:?}")))
    }
}

/// A real front-matter writer that fails on the n-th `write_record` call.
pub struct FlakyWriter {
    inner: FrontMatterWriter,
    fail_on_write: usize,
    writes: AtomicUsize,
}

impl FlakyWriter {
    pub fn new(root: NormalizedPath, fail_on_write: usize) -> Self {
        Self {
            inner: FrontMatterWriter::new(root),
            fail_on_write,
            writes: AtomicUsize::new(0),
        }
    }
}

impl EntryWriter for FlakyWriter {
    fn ensure_directory(&self, path: &NormalizedPath) -> Result<()> {
        self.inner.ensure_directory(path)
    }

    fn write_record(&self, path: &NormalizedPath, metadata: &Record, body: &str) -> Result<()> {
        let call = self.writes.fetch_add(1, Ordering::SeqCst) + 1;
        if call == self.fail_on_write {
            return Err(Error::Fs(mirror_fs::Error::io(
                path.to_native(),
                std::io::Error::other("simulated disk failure"),
            )));
        }
        self.inner.write_record(path, metadata, body)
    }

    fn delete_file(&self, path: &NormalizedPath) -> Result<bool> {
        self.inner.delete_file(path)
    }
}

/// Scratch data directory with its state store.
pub struct Mirror {
    pub temp: TempDir,
    pub root: NormalizedPath,
    pub store: SyncStateStore,
}

impl Mirror {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let root = NormalizedPath::new(temp.path());
        let store = SyncStateStore::new(root.join(STATE_FILE));
        Self { temp, root, store }
    }

    pub fn writer(&self) -> FrontMatterWriter {
        FrontMatterWriter::new(self.root.clone())
    }

    pub fn file(&self, relative: &str) -> NormalizedPath {
        self.root.join(relative)
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.file(relative).to_native()).unwrap()
    }

    pub fn state(&self) -> SyncState {
        self.store.load().unwrap()
    }
}

/// Split a written entry file into its YAML metadata and body.
pub fn split_front_matter(text: &str) -> (Value, String) {
    let rest = text.strip_prefix("---\n").expect("entry file starts with a fence");
    let end = rest.find("\n---\n").expect("metadata block is closed");
    let metadata = serde_yaml::from_str(&rest[..end]).unwrap();
    (metadata, rest[end + "\n---\n".len()..].to_string())
}
