//! Config resolution
//!
//! Combines the config file (if any) with command-line overrides into the
//! [`MirrorConfig`] every command runs against.

use std::path::Path;

use mirror_core::MirrorConfig;
use mirror_fs::NormalizedPath;
use tracing::debug;

use crate::cli::{Cli, DEFAULT_CONFIG};
use crate::error::{CliError, Result};

/// Load the config named by `--config`, or `./mirror.toml` if it exists,
/// then apply `--data-dir` and `--source`.
///
/// An explicitly named config file must exist; the default one is optional.
pub fn load_config(cli: &Cli, cwd: &Path) -> Result<MirrorConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let path = NormalizedPath::new(cwd.join(path));
            if !path.exists() {
                return Err(CliError::user(format!("Config file not found: {path}")));
            }
            MirrorConfig::load(&path)?
        }
        None => {
            let path = NormalizedPath::new(cwd.join(DEFAULT_CONFIG));
            if path.exists() {
                MirrorConfig::load(&path)?
            } else {
                debug!("no {DEFAULT_CONFIG} found, using defaults");
                MirrorConfig::default()
            }
        }
    };

    if let Some(data_dir) = &cli.data_dir {
        config.data_directory = data_dir.clone();
    }
    if let Some(source) = &cli.source {
        config.source = Some(source.clone());
    }

    // Relative locations are taken from the working directory
    config.data_directory = absolutize(cwd, &config.data_directory);
    config.source = config.source.map(|source| absolutize(cwd, &source));

    config.validate()?;
    Ok(config)
}

fn absolutize(cwd: &Path, path: &str) -> String {
    if path.trim().is_empty() || Path::new(path).is_absolute() {
        return path.to_string();
    }
    let path = path.strip_prefix("./").unwrap_or(path);
    NormalizedPath::new(cwd.join(path)).as_str().to_string()
}
