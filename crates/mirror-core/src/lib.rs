//! Delta reconciliation engine for mirroring a content repository
//!
//! A remote space (entries grouped by content type, plus assets) is
//! mirrored into one front-matter file per entry. The first run applies the
//! full initial delta; later runs resume from the cursor stored in the sync
//! state and only touch what changed.
//!
//! # Architecture
//!
//! ```text
//!   RemoteSource --(locales, schemas, delta)--> SyncEngine
//!                                                  |
//!        +-------------------+---------------------+----------------+
//!        |                   |                     |                |
//! ContentTypeRegistry   LinkResolver          PathNamer        EntryWriter
//!                            |                                      |
//!                        SyncState  <------ SyncStateStore      mirror-fs
//! ```

pub mod config;
pub mod error;
pub mod model;
pub mod naming;
pub mod remote;
pub mod resolve;
pub mod schema;
pub mod state;
pub mod sync;
pub mod writer;

pub use config::{ContentTypeOverride, MirrorConfig, STATE_FILE};
pub use error::{Error, Result};
pub use model::{Asset, Delta, Entry, LinkType, Locale, Reference};
pub use naming::{ENTRIES_DIR, PathNamer, slug};
pub use remote::{RemoteSource, ReplaySource};
pub use resolve::{DeltaIndex, LinkResolver, Record};
pub use schema::{ContentType, ContentTypeRegistry, Field, FieldKind};
pub use state::{SyncState, SyncStateStore};
pub use sync::{SyncEngine, SyncOptions, SyncReport};
pub use writer::{DryRunWriter, EntryWriter, FrontMatterWriter};
