//! Raw objects delivered by the remote source
//!
//! Shapes follow the content delivery sync JSON: every object carries a
//! `sys` block, and `fields` map a field id to its per-locale values.
//! Entries and assets are kept raw so the sync state can cache exactly
//! what was observed.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Error, Result};

/// `{"sys": {"id": ...}}` pointer used for content type references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SysRef {
    pub sys: SysId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SysId {
    pub id: String,
}

/// A locale of the mirrored space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locale {
    pub code: String,
    #[serde(default, rename = "default", alias = "isDefault")]
    pub is_default: bool,
}

/// Pick the default locale code out of a locale listing.
pub fn default_locale(locales: &[Locale]) -> Result<&str> {
    locales
        .iter()
        .find(|locale| locale.is_default)
        .map(|locale| locale.code.as_str())
        .ok_or(Error::MissingDefaultLocale)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntrySys {
    pub id: String,
    pub content_type: SysRef,
    /// Remaining sys attributes (type, revision, timestamps) kept verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A content entry with per-locale field values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub sys: EntrySys,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Entry {
    pub fn id(&self) -> &str {
        &self.sys.id
    }

    pub fn content_type_id(&self) -> &str {
        &self.sys.content_type.sys.id
    }

    /// Value of `field` in `locale`, if the entry has one.
    pub fn localized(&self, field: &str, locale: &str) -> Option<&Value> {
        self.fields.get(field)?.get(locale)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetSys {
    pub id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A binary asset. Only its metadata is mirrored, inline into referencing entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub sys: AssetSys,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Asset {
    pub fn id(&self) -> &str {
        &self.sys.id
    }

    pub fn title(&self, locale: &str) -> Value {
        self.fields
            .get("title")
            .and_then(|title| title.get(locale))
            .cloned()
            .unwrap_or(Value::Null)
    }

    pub fn url(&self, locale: &str) -> Value {
        self.fields
            .get("file")
            .and_then(|file| file.get(locale))
            .and_then(|file| file.get("url"))
            .cloned()
            .unwrap_or(Value::Null)
    }
}

/// Everything that changed since a cursor, plus the cursor to resume from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delta {
    pub next_cursor: String,
    #[serde(default)]
    pub entries: Vec<Entry>,
    #[serde(default)]
    pub assets: Vec<Asset>,
    #[serde(default)]
    pub deleted_entries: Vec<String>,
    #[serde(default)]
    pub deleted_assets: Vec<String>,
}

/// What a link points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkType {
    Entry,
    Asset,
}

impl std::fmt::Display for LinkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Entry => write!(f, "Entry"),
            Self::Asset => write!(f, "Asset"),
        }
    }
}

/// A field value that refers to another object.
///
/// The remote source may deliver a link either as a bare pointer
/// (`{"sys": {"type": "Link", "linkType": "Entry", "id": "c1"}}`) or
/// with the target already embedded in place.
#[derive(Debug, Clone, PartialEq)]
pub enum Reference {
    Pointer { link_type: LinkType, id: String },
    Entry(Box<Entry>),
    Asset(Box<Asset>),
}

impl Reference {
    /// Interpret a raw field value as a reference; `field` is used for error context.
    pub fn from_value(field: &str, value: &Value) -> Result<Self> {
        let sys = value
            .get("sys")
            .and_then(Value::as_object)
            .ok_or_else(|| Error::malformed_link(field, "missing sys block"))?;
        let kind = sys
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::malformed_link(field, "missing sys.type"))?;

        match kind {
            "Link" => {
                let link_type = match sys.get("linkType").and_then(Value::as_str) {
                    Some("Entry") => LinkType::Entry,
                    Some("Asset") => LinkType::Asset,
                    other => {
                        return Err(Error::malformed_link(
                            field,
                            format!("unsupported linkType {other:?}"),
                        ));
                    }
                };
                let id = sys
                    .get("id")
                    .and_then(Value::as_str)
                    .ok_or_else(|| Error::malformed_link(field, "link without sys.id"))?;
                Ok(Self::Pointer {
                    link_type,
                    id: id.to_string(),
                })
            }
            "Entry" => serde_json::from_value(value.clone())
                .map(|entry| Self::Entry(Box::new(entry)))
                .map_err(|e| Error::malformed_link(field, e.to_string())),
            "Asset" => serde_json::from_value(value.clone())
                .map(|asset| Self::Asset(Box::new(asset)))
                .map_err(|e| Error::malformed_link(field, e.to_string())),
            other => Err(Error::malformed_link(
                field,
                format!("unexpected sys.type {other:?}"),
            )),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Pointer { id, .. } => id,
            Self::Entry(entry) => entry.id(),
            Self::Asset(asset) => asset.id(),
        }
    }

    pub fn link_type(&self) -> LinkType {
        match self {
            Self::Pointer { link_type, .. } => *link_type,
            Self::Entry(_) => LinkType::Entry,
            Self::Asset(_) => LinkType::Asset,
        }
    }
}
