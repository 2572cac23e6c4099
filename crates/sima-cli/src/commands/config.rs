use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use sima_core::pipeline::config::BatchConfig;
use sima_core::presets::PresetTable;

#[derive(Args)]
pub struct ConfigArgs {
    /// Write config to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Include the built-in preset table so it can be edited
    #[arg(long)]
    pub with_presets: bool,
}

/// Print or save a default BatchConfig as TOML.
pub fn run(args: &ConfigArgs) -> Result<()> {
    let config = BatchConfig {
        channels: vec!["1".to_string(), "2".to_string()],
        presets: args.with_presets.then(PresetTable::default),
        ..BatchConfig::default()
    };
    let toml_str = toml::to_string_pretty(&config)?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &toml_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        println!("Default config saved to {}", path.display());
    } else {
        print!("{}", toml_str);
    }

    Ok(())
}
