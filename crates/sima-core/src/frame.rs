use std::path::PathBuf;

/// Decoded samples of one page, in the codec's native type.
#[derive(Clone, Debug, PartialEq)]
pub enum FramePixels {
    Gray8(Vec<u8>),
    Gray16(Vec<u16>),
    Rgb8(Vec<u8>),
    Rgb16(Vec<u16>),
}

impl FramePixels {
    pub fn samples_per_pixel(&self) -> usize {
        match self {
            Self::Gray8(_) | Self::Gray16(_) => 1,
            Self::Rgb8(_) | Self::Rgb16(_) => 3,
        }
    }

    pub fn bit_depth(&self) -> u8 {
        match self {
            Self::Gray8(_) | Self::Rgb8(_) => 8,
            Self::Gray16(_) | Self::Rgb16(_) => 16,
        }
    }

    pub fn sample_count(&self) -> usize {
        match self {
            Self::Gray8(v) | Self::Rgb8(v) => v.len(),
            Self::Gray16(v) | Self::Rgb16(v) => v.len(),
        }
    }
}

/// A single page of a stack.
#[derive(Clone, Debug)]
pub struct Frame {
    /// Zero-based page index within the source stack.
    pub index: usize,
    pub width: u32,
    pub height: u32,
    pub pixels: FramePixels,
}

impl Frame {
    pub fn new(index: usize, width: u32, height: u32, pixels: FramePixels) -> Self {
        Self {
            index,
            width,
            height,
            pixels,
        }
    }
}

/// Textual metadata carried by the first page of a stack.
#[derive(Clone, Debug, Default)]
pub struct PageText {
    /// ImageDescription tag, NUL padding stripped.
    pub description: Option<String>,
    /// `info` entry of the ImageJ metadata tag, if present.
    pub imagej_info: Option<String>,
}

/// Summary of a source stack.
#[derive(Clone, Debug)]
pub struct SourceInfo {
    pub filename: PathBuf,
    pub total_frames: usize,
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub samples_per_pixel: usize,
}
