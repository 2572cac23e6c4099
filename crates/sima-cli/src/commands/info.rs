use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use sima_core::error::SimaError;
use sima_core::io::discover::validate_input;
use sima_core::io::tiff_stack::TiffStack;
use sima_core::metadata::extract_from_stack;
use sima_core::metadata::locate::default_strategies;
use tracing::debug;

use crate::summary::print_stack_info;

#[derive(Args)]
pub struct InfoArgs {
    /// Input TIFF stack
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    validate_input(&args.file)?;
    let stack = TiffStack::open(&args.file)
        .with_context(|| format!("Failed to open {}", args.file.display()))?;
    let info = stack.source_info();

    let metadata = match extract_from_stack(&stack, &default_strategies()) {
        Ok(m) => Some(m),
        Err(SimaError::NoMetadataFound(path)) => {
            debug!(file = %path.display(), "Stack carries no instrument metadata");
            None
        }
        Err(e) => return Err(e.into()),
    };

    print_stack_info(&info, metadata.as_ref());
    Ok(())
}
