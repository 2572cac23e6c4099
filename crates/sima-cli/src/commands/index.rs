use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Args;
use sima_core::consts::DEFAULT_INDEX_FILENAME;
use sima_core::pipeline::config::{BatchConfig, BatchMode};
use sima_core::pipeline::run_batch_reported;

use super::load_config;
use super::progress::BarReporter;
use crate::summary::{print_batch_result, print_batch_summary};

#[derive(Args)]
pub struct IndexArgs {
    /// Split frame files or directories containing them
    pub inputs: Vec<PathBuf>,

    /// Batch config file (TOML); replaces all other flags
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory the index is written to
    #[arg(short, long, default_value = "output")]
    pub output: PathBuf,

    /// Index filename inside the output directory
    #[arg(long, default_value = DEFAULT_INDEX_FILENAME)]
    pub index_name: String,

    /// Only scan the top level of input directories
    #[arg(long)]
    pub no_recursive: bool,
}

pub fn run(args: &IndexArgs) -> Result<()> {
    let mut config = match args.config {
        Some(ref path) => load_config(path)?,
        None => {
            if args.inputs.is_empty() {
                bail!("No inputs given; pass frame files or directories, or --config");
            }
            BatchConfig {
                inputs: args.inputs.clone(),
                output_dir: args.output.clone(),
                index_filename: args.index_name.clone(),
                recursive: !args.no_recursive,
                ..BatchConfig::default()
            }
        }
    };
    config.mode = BatchMode::Index;

    print_batch_summary(&config, None);

    let reporter = Arc::new(BarReporter::new()?);
    let summary = run_batch_reported(&config, reporter.clone())?;
    reporter.finish();

    print_batch_result(&summary);
    Ok(())
}
