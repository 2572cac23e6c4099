use std::fmt;
use std::path::Path;

use crate::consts::{READ_STEP_LITERAL, TIMEPOINT_DIGITS};
use crate::error::{Result, SimaError};

/// Filename of one split frame.
///
/// Encoded as `{well}_{readStep}_{slot}_{field}_{channelName}_{timepoint:03}`
/// plus an extension. `slot` and `timepoint` are 1-based. Channel names may
/// themselves contain underscores; everything between the field and the last
/// segment belongs to the channel name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameName {
    pub well: String,
    pub read_step: String,
    pub slot: u32,
    pub field: u32,
    pub channel_name: String,
    pub timepoint: u32,
}

impl FrameName {
    pub fn new(well: &str, slot: u32, field: u32, channel_name: &str, timepoint: u32) -> Self {
        Self {
            well: well.to_string(),
            read_step: READ_STEP_LITERAL.to_string(),
            slot,
            field,
            channel_name: channel_name.to_string(),
            timepoint,
        }
    }

    /// Full filename with the given extension (without the dot).
    pub fn file_name(&self, extension: &str) -> String {
        format!("{self}.{extension}")
    }

    /// Decode the stem of an already-split frame.
    pub fn parse(stem: &str) -> Result<Self> {
        let malformed = |reason: &str| SimaError::MalformedFilename {
            name: stem.to_string(),
            reason: reason.to_string(),
        };

        let segments: Vec<&str> = stem.split('_').collect();
        if segments.len() < 6 {
            return Err(malformed("expected at least 6 underscore-separated segments"));
        }
        let last = segments.len() - 1;

        if segments[0].is_empty() {
            return Err(malformed("empty well segment"));
        }
        if segments[1].is_empty() {
            return Err(malformed("empty read step segment"));
        }
        let slot = segments[2]
            .parse::<u32>()
            .ok()
            .filter(|&s| s >= 1)
            .ok_or_else(|| malformed("channel slot is not a positive integer"))?;
        let field = segments[3]
            .parse::<u32>()
            .map_err(|_| malformed("field is not an integer"))?;
        let channel_name = segments[4..last].join("_");
        if channel_name.is_empty() {
            return Err(malformed("empty channel name"));
        }
        let timepoint = segments[last]
            .parse::<u32>()
            .map_err(|_| malformed("timepoint is not an integer"))?;

        Ok(Self {
            well: segments[0].to_string(),
            read_step: segments[1].to_string(),
            slot,
            field,
            channel_name,
            timepoint,
        })
    }

    /// Decode the filename of a path, ignoring its directory and extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| SimaError::MalformedFilename {
                name: path.display().to_string(),
                reason: "no UTF-8 file stem".to_string(),
            })?;
        Self::parse(stem)
    }
}

impl fmt::Display for FrameName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{}_{}_{}_{:0width$}",
            self.well,
            self.read_step,
            self.slot,
            self.field,
            self.channel_name,
            self.timepoint,
            width = TIMEPOINT_DIGITS,
        )
    }
}
