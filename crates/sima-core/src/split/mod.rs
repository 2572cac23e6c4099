pub mod backfill;
pub mod naming;
pub mod splitter;

pub use backfill::{backfill, total_timepoints};
pub use naming::FrameName;
pub use splitter::{grid_position, split, split_stack, SplitOptions};
