use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::load_config;
use crate::summary::print_presets;

#[derive(Args)]
pub struct PresetsArgs {
    /// Show the preset table of a batch config instead of the built-in one
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: &PresetsArgs) -> Result<()> {
    let table = match args.config {
        Some(ref path) => load_config(path)?.preset_table(),
        None => Default::default(),
    };
    print_presets(&table);
    Ok(())
}
