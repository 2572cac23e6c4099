use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::index::record::{OutputFrameRecord, INDEX_COLUMNS};

/// Append-only CSV image index.
///
/// The file is opened and closed on every [`append`](Self::append), so a
/// batch holds no handle between source files. Only one process may write a
/// given index at a time.
#[derive(Clone, Debug)]
pub struct CsvIndexWriter {
    path: PathBuf,
}

impl CsvIndexWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append rows, writing the header first when the file is new or empty.
    pub fn append(&self, rows: &[OutputFrameRecord]) -> Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let write_header = file.metadata()?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if write_header {
            writer.write_record(INDEX_COLUMNS)?;
        }
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;

        debug!(
            path = %self.path.display(),
            rows = rows.len(),
            header = write_header,
            "Appended index rows"
        );
        Ok(())
    }
}
