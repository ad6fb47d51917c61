//! Replay of an exported space from disk
//!
//! Layout of the export directory:
//!
//! ```text
//! <root>/locales.json         [{"code": "en-US", "default": true}, ...]
//! <root>/content_types.json   {"items": [...]} or a bare array
//! <root>/sync/initial.json    delta served for a null cursor
//! <root>/sync/<cursor>.json   delta served for each later cursor
//! ```

use std::path::PathBuf;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::RemoteSource;
use crate::model::{Delta, Locale};
use crate::schema::ContentType;
use crate::{Error, Result};

/// Delta page served when no cursor has been stored yet
pub const INITIAL_PAGE: &str = "initial";

/// Listing endpoints wrap their results in `items`; plain arrays are accepted too.
#[derive(Deserialize)]
#[serde(untagged)]
enum Listing<T> {
    Wrapped { items: Vec<T> },
    Bare(Vec<T>),
}

impl<T> Listing<T> {
    fn into_items(self) -> Vec<T> {
        match self {
            Self::Wrapped { items } => items,
            Self::Bare(items) => items,
        }
    }
}

/// Serves locales, schemas and delta pages from an export directory.
#[derive(Debug, Clone)]
pub struct ReplaySource {
    root: PathBuf,
}

impl ReplaySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    async fn read_json<T: DeserializeOwned>(&self, relative: &str) -> Result<T> {
        let path = self.root.join(relative);
        debug!(path = %path.display(), "reading replay file");
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| Error::remote(format!("{}: {e}", path.display())))?;
        serde_json::from_str(&content)
            .map_err(|e| Error::remote(format!("{}: {e}", path.display())))
    }
}

fn page_name(cursor: Option<&str>) -> Result<String> {
    let Some(cursor) = cursor else {
        return Ok(INITIAL_PAGE.to_string());
    };
    let file_safe = !cursor.is_empty()
        && cursor != INITIAL_PAGE
        && cursor
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        && !cursor.starts_with('.');
    if !file_safe {
        return Err(Error::remote(format!("cursor {cursor:?} cannot name a replay page")));
    }
    Ok(cursor.to_string())
}

#[async_trait]
impl RemoteSource for ReplaySource {
    async fn list_locales(&self) -> Result<Vec<Locale>> {
        Ok(self.read_json::<Listing<Locale>>("locales.json").await?.into_items())
    }

    async fn list_content_types(&self) -> Result<Vec<ContentType>> {
        Ok(self
            .read_json::<Listing<ContentType>>("content_types.json")
            .await?
            .into_items())
    }

    async fn fetch_delta(&self, cursor: Option<&str>) -> Result<Delta> {
        let page = page_name(cursor)?;
        self.read_json(&format!("sync/{page}.json")).await
    }
}
