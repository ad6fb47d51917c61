//! Error types for mirror-core

use std::path::PathBuf;

use crate::model::LinkType;

/// Result type for mirror-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during a sync pass.
///
/// None of these are downgraded by the engine: any of them aborts the
/// current pass before the cursor is advanced.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed or missing options
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    /// An entry references a content type absent from the fetched schemas
    #[error("Unknown content type: {id}")]
    UnknownContentType { id: String },

    #[error("Content types \"{first}\" and \"{second}\" both map to directory \"{slug}\"")]
    SlugCollision {
        first: String,
        second: String,
        slug: String,
    },

    #[error("Content type {id} has a name that yields an empty directory name: {name:?}")]
    EmptyTypeSlug { id: String, name: String },

    /// Two entries of one delta resolve to the same file
    #[error("Entries {first} and {second} both map to {path}")]
    PathCollision {
        path: String,
        first: String,
        second: String,
    },

    #[error("Remote source reported no default locale")]
    MissingDefaultLocale,

    /// A referenced object was never observed by this or any earlier pass
    #[error("Unresolved {link_type} link: {id} is neither in the current delta nor in the sync state")]
    UnresolvedLink { link_type: LinkType, id: String },

    #[error("Malformed link in field {field}: {message}")]
    MalformedLink { field: String, message: String },

    #[error("Sync state at {path} is unreadable: {message}")]
    StateCorrupt { path: PathBuf, message: String },

    /// Opaque failure propagated from the remote collaborator
    #[error("Remote source error: {0}")]
    Remote(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Filesystem error from mirror-fs
    #[error(transparent)]
    Fs(#[from] mirror_fs::Error),

    /// Rendering error from mirror-content
    #[error(transparent)]
    Content(#[from] mirror_content::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn remote(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Remote(source.into())
    }

    pub fn malformed_link(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedLink {
            field: field.into(),
            message: message.into(),
        }
    }
}
