pub mod config;
mod orchestrator;
mod types;

pub use orchestrator::{run_batch, run_batch_reported};
pub use types::{BatchSummary, PipelineStage, ProgressReporter};
