//! Filesystem plumbing for the content mirror
//!
//! Provides forward-slash path handling, typed existence queries and
//! atomic I/O used by the sync engine and the CLI.

pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use path::{NormalizedPath, PathKind};
