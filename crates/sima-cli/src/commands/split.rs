use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use sima_core::consts::DEFAULT_INDEX_FILENAME;
use sima_core::pipeline::config::{BatchConfig, BatchMode, OutputFormat};
use sima_core::pipeline::run_batch_reported;

use super::load_config;
use super::progress::BarReporter;
use crate::summary::{print_batch_result, print_batch_summary};

#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Tif,
    Tiff,
    Png,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Tif => OutputFormat::Tif,
            FormatArg::Tiff => OutputFormat::Tiff,
            FormatArg::Png => OutputFormat::Png,
        }
    }
}

#[derive(Args)]
pub struct SplitArgs {
    /// Stack files or directories containing them
    pub inputs: Vec<PathBuf>,

    /// Batch config file (TOML); replaces all other flags
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Channel presets in frame order, by number or name (see `sima presets`)
    #[arg(short, long, value_delimiter = ',')]
    pub channels: Vec<String>,

    /// Output directory for frames and the index
    #[arg(short, long, default_value = "output")]
    pub output: PathBuf,

    /// Write each well's frames into its own subdirectory
    #[arg(long)]
    pub group_by_well: bool,

    /// Image format of the split frames
    #[arg(long, value_enum, default_value = "tif")]
    pub format: FormatArg,

    /// Index filename inside the output directory
    #[arg(long, default_value = DEFAULT_INDEX_FILENAME)]
    pub index_name: String,

    /// Only scan the top level of input directories
    #[arg(long)]
    pub no_recursive: bool,
}

pub fn run(args: &SplitArgs) -> Result<()> {
    let mut config = match args.config {
        Some(ref path) => load_config(path)?,
        None => build_config_from_args(args)?,
    };
    config.mode = BatchMode::Split;

    let assignment = config
        .preset_table()
        .resolve(&config.channels)
        .context("Invalid channel selection")?;
    print_batch_summary(&config, Some(&assignment));

    let reporter = Arc::new(BarReporter::new()?);
    let summary = run_batch_reported(&config, reporter.clone())?;
    reporter.finish();

    print_batch_result(&summary);
    Ok(())
}

fn build_config_from_args(args: &SplitArgs) -> Result<BatchConfig> {
    if args.inputs.is_empty() {
        bail!("No inputs given; pass stack files or directories, or --config");
    }
    if args.channels.is_empty() {
        bail!("No channels given; pass --channels with one preset per channel");
    }
    Ok(BatchConfig {
        inputs: args.inputs.clone(),
        output_dir: args.output.clone(),
        mode: BatchMode::Split,
        group_by_well: args.group_by_well,
        channels: args.channels.clone(),
        index_filename: args.index_name.clone(),
        output_format: args.format.into(),
        recursive: !args.no_recursive,
        presets: None,
    })
}
