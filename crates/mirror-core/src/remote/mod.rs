//! Remote content source
//!
//! The engine reads locales, schemas and deltas through [`RemoteSource`].
//! Transport, authentication and pagination live behind the trait.

mod replay;

pub use replay::ReplaySource;

use async_trait::async_trait;

use crate::Result;
use crate::model::{Delta, Locale};
use crate::schema::ContentType;

#[async_trait]
pub trait RemoteSource: Send + Sync {
    async fn list_locales(&self) -> Result<Vec<Locale>>;

    async fn list_content_types(&self) -> Result<Vec<ContentType>>;

    /// Changes since `cursor`; `None` requests the full initial delta.
    ///
    /// Links inside the returned entries may already be embedded.
    async fn fetch_delta(&self, cursor: Option<&str>) -> Result<Delta>;
}
