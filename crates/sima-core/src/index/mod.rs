pub mod record;
pub mod writer;

pub use record::{OutputFrameRecord, INDEX_COLUMNS};
pub use writer::CsvIndexWriter;
