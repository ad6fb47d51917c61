//! Reconciliation of remote deltas into the local mirror
//!
//! - **engine**: one sync pass, from fetching a delta to committing the cursor
//! - **report**: what a pass did

mod engine;
mod report;

pub use engine::{SyncEngine, SyncOptions};
pub use report::SyncReport;
