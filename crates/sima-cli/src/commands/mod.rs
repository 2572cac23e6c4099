pub mod config;
pub mod index;
pub mod info;
pub mod presets;
pub mod split;

mod progress;

use std::path::Path;

use anyhow::{Context, Result};
use sima_core::pipeline::config::BatchConfig;
use tracing::debug;

/// Load a batch config from a TOML file.
pub(crate) fn load_config(path: &Path) -> Result<BatchConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: BatchConfig = toml::from_str(&contents).context("Invalid batch config")?;
    debug!(path = %path.display(), inputs = config.inputs.len(), "Loaded batch config");
    Ok(config)
}
