//! Mirror configuration
//!
//! Loaded from `mirror.toml` (or a JSON/YAML equivalent) by the CLI and
//! handed to the engine as a plain structure.

use std::collections::BTreeMap;

use mirror_fs::{ConfigStore, NormalizedPath};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Name of the persisted sync state inside the data directory
pub const STATE_FILE: &str = "sync-state.json";

fn default_data_directory() -> String {
    "./contentful-data".to_string()
}

/// Per-content-type overrides, keyed by content type name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentTypeOverride {
    /// Field whose value becomes the file stem (default: the entry id)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Field whose value becomes the file body (default: no body)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contents: Option<String>,
}

/// Top-level mirror configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirrorConfig {
    /// Root of the local mirror; entries and the sync state live below it
    #[serde(default = "default_data_directory", alias = "dataDirectory")]
    pub data_directory: String,

    /// Directory holding an exported space for the replay source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(default, alias = "contentTypes")]
    pub content_types: BTreeMap<String, ContentTypeOverride>,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            data_directory: default_data_directory(),
            source: None,
            content_types: BTreeMap::new(),
        }
    }
}

impl MirrorConfig {
    /// Load and validate a config file; format follows the file extension.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let config: MirrorConfig = ConfigStore::new().load(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject options the engine cannot act on.
    pub fn validate(&self) -> Result<()> {
        if self.data_directory.trim().is_empty() {
            return Err(Error::config("data_directory must not be empty"));
        }

        for (name, overrides) in &self.content_types {
            for (key, value) in [("id", &overrides.id), ("contents", &overrides.contents)] {
                if let Some(field) = value
                    && field.trim().is_empty()
                {
                    return Err(Error::config(format!(
                        "content_types.\"{name}\".{key} must name a field"
                    )));
                }
            }
        }

        Ok(())
    }

    pub fn data_root(&self) -> NormalizedPath {
        NormalizedPath::new(&self.data_directory)
    }

    pub fn state_path(&self) -> NormalizedPath {
        self.data_root().join(STATE_FILE)
    }
}
