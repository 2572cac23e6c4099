use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_INDEX_FILENAME;
use crate::presets::PresetTable;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Stack files or directories to scan for them.
    pub inputs: Vec<PathBuf>,
    pub output_dir: PathBuf,
    #[serde(default)]
    pub mode: BatchMode,
    #[serde(default)]
    pub group_by_well: bool,
    /// Preset selections, one per physical channel slot, in frame order.
    #[serde(default)]
    pub channels: Vec<String>,
    #[serde(default = "default_index_filename")]
    pub index_filename: String,
    #[serde(default)]
    pub output_format: OutputFormat,
    #[serde(default = "default_recursive")]
    pub recursive: bool,
    /// Replaces the built-in preset table when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presets: Option<PresetTable>,
}

fn default_index_filename() -> String {
    DEFAULT_INDEX_FILENAME.to_string()
}

fn default_recursive() -> bool {
    true
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            inputs: vec![PathBuf::from("stacks")],
            output_dir: PathBuf::from("output"),
            mode: BatchMode::default(),
            group_by_well: false,
            channels: vec![],
            index_filename: default_index_filename(),
            output_format: OutputFormat::default(),
            recursive: default_recursive(),
            presets: None,
        }
    }
}

impl BatchConfig {
    pub fn index_path(&self) -> PathBuf {
        self.output_dir.join(&self.index_filename)
    }

    pub fn preset_table(&self) -> PresetTable {
        self.presets.clone().unwrap_or_default()
    }
}

/// What a batch does with each input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchMode {
    /// Split multiplexed stacks into frames, then index them.
    #[default]
    Split,
    /// Index frames that were already split.
    Index,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Tif,
    Tiff,
    Png,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Tif => "tif",
            Self::Tiff => "tiff",
            Self::Png => "png",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
