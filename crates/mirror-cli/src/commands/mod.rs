//! Command implementations for mirror-cli

pub mod status;
pub mod sync;

pub use status::run_status;
pub use sync::run_sync;
