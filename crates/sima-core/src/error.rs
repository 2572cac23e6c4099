use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TIFF error: {0}")]
    Tiff(#[from] tiff::TiffError),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Malformed XML: {0}")]
    MalformedXml(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("{}: {reason}", path.display())]
    InvalidInput { path: PathBuf, reason: String },

    #[error("No TIFF files found under {}", .0.display())]
    NoInputs(PathBuf),

    #[error("No instrument metadata found in {}", .0.display())]
    NoMetadataFound(PathBuf),

    #[error("Required metadata field '{field}' missing in {}", path.display())]
    MissingMetadataField { path: PathBuf, field: String },

    #[error("Invalid value for '{field}': {value:?}")]
    InvalidValue { field: String, value: String },

    #[error("Unrecognized objective magnification: {0}x (expected 4, 10, 20, 40 or 60)")]
    UnrecognizedObjective(u32),

    #[error("Invalid well identifier: {0:?}")]
    InvalidWellId(String),

    #[error("Invalid measurement date: {0:?}")]
    InvalidDate(String),

    #[error(
        "{}: {frames} frames cannot be split evenly into {channels} channels",
        path.display()
    )]
    FrameCountMismatch {
        path: PathBuf,
        frames: usize,
        channels: usize,
    },

    #[error("Channel assignment is empty")]
    EmptyChannelAssignment,

    #[error("Malformed frame filename {name:?}: {reason}")]
    MalformedFilename { name: String, reason: String },

    #[error("Unsupported pixel format: {0}")]
    UnsupportedPixelFormat(String),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error(
        "Invalid channel preset selection {selection:?} (choose 1-{available} or a preset name)"
    )]
    InvalidPresetSelection { selection: String, available: usize },
}

pub type Result<T> = std::result::Result<T, SimaError>;
