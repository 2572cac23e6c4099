use std::path::Path;

use tracing::warn;

use crate::channel::AcquisitionType;
use crate::error::{Result, SimaError};
use crate::index::OutputFrameRecord;
use crate::metadata::CanonicalImageMetadata;
use crate::split::naming::FrameName;

/// Specialize `metadata` to an already-split frame using its filename.
///
/// The channel slot and timepoint come from the filename. Pre-split frames
/// carry a single channel each, so `num_channels` is 1. When neither
/// wavelength is known both are recorded as 0. Fields still empty afterwards
/// are logged, not rejected.
pub fn backfill(
    path: &Path,
    metadata: &CanonicalImageMetadata,
    total_timepoints: u32,
) -> Result<CanonicalImageMetadata> {
    let name = FrameName::from_path(path)?;
    let mut filled = metadata.clone();

    filled.source_filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string);
    filled.timepoint = Some(name.timepoint);
    filled.channel = Some(name.slot);
    if filled.channel_name.is_none() {
        filled.channel_name = Some(name.channel_name.clone());
    }
    filled.acquisition_type = filled
        .channel_name
        .as_deref()
        .map(AcquisitionType::from_channel_name);
    filled.num_timepoints = Some(total_timepoints);
    filled.num_channels = Some(1);

    if filled.emission_wavelength_nm.is_none() && filled.excitation_wavelength_nm.is_none() {
        filled.emission_wavelength_nm = Some(0.0);
        filled.excitation_wavelength_nm = Some(0.0);
    }

    let missing = OutputFrameRecord::from(&filled).missing_fields();
    if !missing.is_empty() {
        warn!(
            file = %path.display(),
            missing = ?missing,
            "Index row has empty fields after backfill"
        );
    }

    Ok(filled)
}

/// Largest timepoint encoded in a set of split filenames.
pub fn total_timepoints(paths: &[impl AsRef<Path>]) -> Result<u32> {
    let mut largest = 0;
    for path in paths {
        let name = FrameName::from_path(path.as_ref())?;
        largest = largest.max(name.timepoint);
    }
    if largest < 1 {
        return Err(SimaError::MalformedFilename {
            name: paths
                .first()
                .map(|p| p.as_ref().display().to_string())
                .unwrap_or_default(),
            reason: "no timepoint of at least 1 in batch".to_string(),
        });
    }
    Ok(largest)
}
