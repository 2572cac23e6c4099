use std::path::PathBuf;

/// Batch processing stage, used for progress reporting.
#[derive(Clone, Copy, Debug)]
pub enum PipelineStage {
    Discovering,
    Extracting,
    Splitting,
    Backfilling,
    Indexing,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Discovering => write!(f, "Discovering inputs"),
            Self::Extracting => write!(f, "Extracting metadata"),
            Self::Splitting => write!(f, "Splitting frames"),
            Self::Backfilling => write!(f, "Reading filenames"),
            Self::Indexing => write!(f, "Writing index"),
        }
    }
}

/// Thread-safe progress reporting for a batch.
///
/// All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A new stage has started. `total_items` is the number of work items in
    /// this stage, if known.
    fn begin_stage(&self, _stage: PipelineStage, _total_items: Option<usize>) {}

    /// Work items completed so far in the current stage.
    fn advance(&self, _items_done: usize) {}

    fn finish_stage(&self) {}

    /// Processing of one source file has started.
    fn begin_file(&self, _index: usize, _total: usize, _path: &std::path::Path) {}
}

/// No-op progress reporter, used when `run_batch` delegates.
pub(super) struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}

/// Outcome of a completed batch.
#[derive(Clone, Debug, Default)]
pub struct BatchSummary {
    pub files_processed: usize,
    pub frames_written: usize,
    pub rows_indexed: usize,
    pub index_path: PathBuf,
}
