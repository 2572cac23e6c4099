use serde::{Deserialize, Serialize};

use crate::channel::{AcquisitionType, ChannelAssignment, ChannelSlot};
use crate::consts::DEFAULT_CHANNEL_TYPE;
use crate::error::{Result, SimaError};

/// A named channel configuration an operator can pick per physical slot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChannelPreset {
    /// Lookup key, e.g. `Confocal DAPI`.
    pub name: String,
    /// Channel name written to filenames and the index.
    pub display_name: String,
    pub color: String,
    pub acquisition_type: AcquisitionType,
    #[serde(default = "default_channel_type")]
    pub channel_type: String,
}

fn default_channel_type() -> String {
    DEFAULT_CHANNEL_TYPE.to_string()
}

impl ChannelPreset {
    fn new(name: &str, display_name: &str, color: &str, acquisition_type: AcquisitionType) -> Self {
        Self {
            name: name.to_string(),
            display_name: display_name.to_string(),
            color: color.to_string(),
            acquisition_type,
            channel_type: default_channel_type(),
        }
    }

    pub fn to_slot(&self) -> ChannelSlot {
        ChannelSlot {
            name: self.display_name.clone(),
            acquisition_type: self.acquisition_type,
            color: self.color.clone(),
        }
    }
}

/// Ordered preset list. Selections refer to entries by 1-based position or
/// by name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PresetTable {
    presets: Vec<ChannelPreset>,
}

impl Default for PresetTable {
    fn default() -> Self {
        use AcquisitionType::{Confocal, NonConfocal};
        Self {
            presets: vec![
                ChannelPreset::new("Confocal DRAQ7", "DRAQ7", "#dd00ff", Confocal),
                ChannelPreset::new("Nonconfocal DAPI", "DAPI", "#0035ff", NonConfocal),
                ChannelPreset::new("Confocal DAPI", "DAPI", "#0035ff", Confocal),
                ChannelPreset::new(
                    "NonConfocal Bright Field",
                    "Bright Field",
                    "#888a8c",
                    NonConfocal,
                ),
                ChannelPreset::new(
                    "NonConfocal Bright Field-High Contrast",
                    "Bright Field-High Contrast",
                    "#48494a",
                    NonConfocal,
                ),
                ChannelPreset::new("Confocal Texas Red", "Texas Red", "#ed0707", Confocal),
                ChannelPreset::new("Confocal GFP", "GFP", "#07ed07", Confocal),
                ChannelPreset::new("Confocal CY5", "CY5", "#dd00ff", Confocal),
                ChannelPreset::new("Confocal TRITC", "TRITC", "#ed0707", Confocal),
            ],
        }
    }
}

impl PresetTable {
    pub fn new(presets: Vec<ChannelPreset>) -> Self {
        Self { presets }
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChannelPreset> {
        self.presets.iter()
    }

    /// Look up one selection: a 1-based index or a preset name
    /// (case-insensitive).
    pub fn select(&self, selection: &str) -> Result<&ChannelPreset> {
        let selection = selection.trim();
        let found = match selection.parse::<usize>() {
            Ok(index) if index >= 1 => self.presets.get(index - 1),
            Ok(_) => None,
            Err(_) => self
                .presets
                .iter()
                .find(|p| p.name.eq_ignore_ascii_case(selection)),
        };
        found.ok_or_else(|| SimaError::InvalidPresetSelection {
            selection: selection.to_string(),
            available: self.presets.len(),
        })
    }

    /// Resolve an ordered selection, one entry per physical channel slot.
    pub fn resolve<S: AsRef<str>>(&self, selections: &[S]) -> Result<ChannelAssignment> {
        let slots = selections
            .iter()
            .map(|s| self.select(s.as_ref()).map(ChannelPreset::to_slot))
            .collect::<Result<Vec<_>>>()?;
        ChannelAssignment::new(slots)
    }
}
