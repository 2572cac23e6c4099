use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::channel::ChannelAssignment;
use crate::consts::FIELD_NUMBER;
use crate::error::{Result, SimaError};
use crate::index::OutputFrameRecord;
use crate::io::image_io::save_frame;
use crate::io::tiff_stack::TiffStack;
use crate::metadata::CanonicalImageMetadata;
use crate::split::naming::FrameName;

/// Where and how split frames are written.
#[derive(Clone, Debug)]
pub struct SplitOptions {
    pub output_dir: PathBuf,
    /// Nest frames under one subdirectory per well.
    pub group_by_well: bool,
    /// Output extension without the dot; selects the encoder.
    pub extension: String,
}

/// Grid position of frame `index` in a stack multiplexed over `channels`.
///
/// Channel varies fastest. Both results are 0-based.
pub fn grid_position(index: usize, channels: usize) -> (usize, usize) {
    (index % channels, index / channels)
}

/// Split the stack at `path` into single-frame images.
pub fn split(
    path: &Path,
    metadata: &CanonicalImageMetadata,
    assignment: &ChannelAssignment,
    options: &SplitOptions,
) -> Result<Vec<OutputFrameRecord>> {
    let stack = TiffStack::open(path)?;
    split_stack(&stack, metadata, assignment, options, |_done| {})
}

/// Split an opened stack, one output image and index row per frame.
///
/// Frame `i` becomes channel slot `i mod C + 1` at timepoint `i div C + 1`.
/// The frame count is validated before anything is written. Records are
/// returned in frame order. `on_frame` receives the number of frames written
/// so far.
pub fn split_stack<F>(
    stack: &TiffStack,
    metadata: &CanonicalImageMetadata,
    assignment: &ChannelAssignment,
    options: &SplitOptions,
    mut on_frame: F,
) -> Result<Vec<OutputFrameRecord>>
where
    F: FnMut(usize),
{
    let total = stack.frame_count();
    let channels = assignment.len();
    if channels == 0 {
        return Err(SimaError::EmptyChannelAssignment);
    }
    if total % channels != 0 {
        return Err(SimaError::FrameCountMismatch {
            path: stack.path().to_path_buf(),
            frames: total,
            channels,
        });
    }
    let timepoints = total / channels;

    let target_dir = if options.group_by_well {
        options.output_dir.join(&metadata.well_id)
    } else {
        options.output_dir.clone()
    };
    fs::create_dir_all(&target_dir)?;

    info!(
        file = %stack.path().display(),
        frames = total,
        channels,
        timepoints,
        dir = %target_dir.display(),
        "Splitting stack"
    );

    let mut records = Vec::with_capacity(total);
    for frame in stack.frames()? {
        let frame = frame?;
        let (channel, timepoint) = grid_position(frame.index, channels);
        let Some(slot) = assignment.slot(channel) else {
            return Err(SimaError::EmptyChannelAssignment);
        };

        let name = FrameName::new(
            &metadata.well_id,
            channel as u32 + 1,
            FIELD_NUMBER,
            &slot.name,
            timepoint as u32 + 1,
        );
        let file_name = name.file_name(&options.extension);
        save_frame(&frame, &target_dir.join(&file_name))?;
        debug!(
            frame = frame.index,
            bits = frame.pixels.bit_depth(),
            file = %file_name,
            "Wrote frame"
        );

        let mut row = metadata.clone();
        row.channel = Some(name.slot);
        row.timepoint = Some(name.timepoint);
        row.channel_name = Some(slot.name.clone());
        row.channel_color = slot.color.clone();
        row.acquisition_type = Some(slot.acquisition_type);
        row.num_timepoints = metadata.num_timepoints.or(Some(timepoints as u32));
        row.source_filename = Some(file_name);
        records.push(OutputFrameRecord::from(&row));

        on_frame(records.len());
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_position_channel_fastest() {
        assert_eq!(grid_position(0, 3), (0, 0));
        assert_eq!(grid_position(2, 3), (2, 0));
        assert_eq!(grid_position(3, 3), (0, 1));
        assert_eq!(grid_position(7, 3), (1, 2));
    }
}
