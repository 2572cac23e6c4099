use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use crate::channel::ChannelAssignment;
use crate::error::Result;
use crate::index::{CsvIndexWriter, OutputFrameRecord};
use crate::io::discover::resolve_inputs;
use crate::io::tiff_stack::TiffStack;
use crate::metadata::locate::default_strategies;
use crate::metadata::extract_from_stack;
use crate::split::{backfill, split_stack, total_timepoints, SplitOptions};

use super::config::{BatchConfig, BatchMode};
use super::types::{BatchSummary, NoOpReporter, PipelineStage, ProgressReporter};

/// Run a batch with a thread-safe progress reporter.
///
/// All inputs are resolved and validated before any file is processed. The
/// first failing file aborts the batch; frames and index rows already written
/// for earlier files stay in place.
pub fn run_batch_reported(
    config: &BatchConfig,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<BatchSummary> {
    reporter.begin_stage(PipelineStage::Discovering, None);
    let files = resolve_inputs(&config.inputs, config.recursive)?;
    reporter.finish_stage();
    info!(files = files.len(), mode = ?config.mode, "Resolved batch inputs");

    let assignment = match config.mode {
        BatchMode::Split => Some(config.preset_table().resolve(&config.channels)?),
        BatchMode::Index => None,
    };

    fs::create_dir_all(&config.output_dir)?;
    let index = CsvIndexWriter::new(config.index_path());

    let summary = match &assignment {
        Some(assignment) => run_split(config, &files, assignment, &index, reporter.as_ref())?,
        None => run_index(&files, &index, reporter.as_ref())?,
    };

    info!(
        files = summary.files_processed,
        frames = summary.frames_written,
        rows = summary.rows_indexed,
        index = %summary.index_path.display(),
        "Batch complete"
    );
    Ok(summary)
}

/// Run a batch without progress reporting.
pub fn run_batch(config: &BatchConfig) -> Result<BatchSummary> {
    run_batch_reported(config, Arc::new(NoOpReporter))
}

fn run_split(
    config: &BatchConfig,
    files: &[PathBuf],
    assignment: &ChannelAssignment,
    index: &CsvIndexWriter,
    reporter: &dyn ProgressReporter,
) -> Result<BatchSummary> {
    let options = SplitOptions {
        output_dir: config.output_dir.clone(),
        group_by_well: config.group_by_well,
        extension: config.output_format.extension().to_string(),
    };
    let strategies = default_strategies();
    let mut summary = new_summary(index.path());

    for (i, path) in files.iter().enumerate() {
        reporter.begin_file(i, files.len(), path);
        info!(file = %path.display(), "Processing stack");

        reporter.begin_stage(PipelineStage::Extracting, None);
        let stack = TiffStack::open(path)?;
        let metadata = extract_from_stack(&stack, &strategies)?;
        reporter.finish_stage();

        if let Some(size_c) = metadata.num_channels {
            if size_c as usize != assignment.len() {
                warn!(
                    file = %path.display(),
                    metadata_channels = size_c,
                    assigned = assignment.len(),
                    "Channel assignment does not match SizeC"
                );
            }
        }

        reporter.begin_stage(PipelineStage::Splitting, Some(stack.frame_count()));
        let rows = split_stack(&stack, &metadata, assignment, &options, |done| {
            reporter.advance(done)
        })?;
        reporter.finish_stage();

        append(index, &rows, reporter)?;
        summary.files_processed += 1;
        summary.frames_written += rows.len();
        summary.rows_indexed += rows.len();
    }

    Ok(summary)
}

fn run_index(
    files: &[PathBuf],
    index: &CsvIndexWriter,
    reporter: &dyn ProgressReporter,
) -> Result<BatchSummary> {
    reporter.begin_stage(PipelineStage::Backfilling, None);
    let timepoints = total_timepoints(files)?;
    reporter.finish_stage();
    info!(timepoints, "Largest timepoint in batch");

    let strategies = default_strategies();
    let mut summary = new_summary(index.path());

    for (i, path) in files.iter().enumerate() {
        reporter.begin_file(i, files.len(), path);
        info!(file = %path.display(), "Indexing frame");

        reporter.begin_stage(PipelineStage::Extracting, None);
        let stack = TiffStack::open(path)?;
        let metadata = extract_from_stack(&stack, &strategies)?;
        let filled = backfill(path, &metadata, timepoints)?;
        reporter.finish_stage();

        let rows = [OutputFrameRecord::from(&filled)];
        append(index, &rows, reporter)?;
        summary.files_processed += 1;
        summary.rows_indexed += rows.len();
    }

    Ok(summary)
}

fn append(
    index: &CsvIndexWriter,
    rows: &[OutputFrameRecord],
    reporter: &dyn ProgressReporter,
) -> Result<()> {
    reporter.begin_stage(PipelineStage::Indexing, Some(rows.len()));
    index.append(rows)?;
    reporter.advance(rows.len());
    reporter.finish_stage();
    Ok(())
}

fn new_summary(index_path: &Path) -> BatchSummary {
    BatchSummary {
        index_path: index_path.to_path_buf(),
        ..BatchSummary::default()
    }
}
