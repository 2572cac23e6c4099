use std::fs::File;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use memmap2::Mmap;
use tiff::decoder::ifd::Value;
use tiff::decoder::{Decoder, DecodingResult, Limits};
use tiff::tags::Tag;
use tiff::ColorType;
use tracing::debug;

use crate::consts::{IJ_METADATA_BYTE_COUNTS_TAG, IJ_METADATA_TAG};
use crate::error::{Result, SimaError};
use crate::frame::{Frame, FramePixels, PageText, SourceInfo};
use crate::io::imagej;

/// Memory-mapped multi-page TIFF reader.
pub struct TiffStack {
    path: PathBuf,
    mmap: Mmap,
    frame_count: usize,
    width: u32,
    height: u32,
    color_type: ColorType,
}

impl TiffStack {
    /// Open a TIFF file and count its pages.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };

        let mut decoder = new_decoder(&mmap)?;
        let (width, height) = decoder.dimensions()?;
        let color_type = decoder.colortype()?;

        let mut frame_count = 1;
        while decoder.more_images() {
            decoder.next_image()?;
            frame_count += 1;
        }

        Ok(Self {
            path: path.to_path_buf(),
            mmap,
            frame_count,
            width,
            height,
            color_type,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Read the description and ImageJ info text of the first page.
    pub fn first_page_text(&self) -> Result<PageText> {
        let mut decoder = new_decoder(&self.mmap)?;

        let description = match decoder.find_tag(Tag::ImageDescription)? {
            Some(value) => {
                let text = value.into_string()?;
                let text = text.trim_end_matches('\0');
                if text.trim().is_empty() {
                    None
                } else {
                    Some(text.to_string())
                }
            }
            None => None,
        };

        let imagej_info = read_imagej_info(&mut decoder);

        Ok(PageText {
            description,
            imagej_info,
        })
    }

    /// Iterator over all pages, decoded in file order.
    pub fn frames(&self) -> Result<FrameIter<'_>> {
        Ok(FrameIter {
            decoder: new_decoder(&self.mmap)?,
            next_index: 0,
            total: self.frame_count,
        })
    }

    /// Build SourceInfo from the first page.
    pub fn source_info(&self) -> SourceInfo {
        let (bit_depth, samples_per_pixel) = match self.color_type {
            ColorType::Gray(bits) => (bits, 1),
            ColorType::RGB(bits) => (bits, 3),
            ColorType::RGBA(bits) => (bits, 4),
            _ => (0, 0),
        };
        SourceInfo {
            filename: self.path.clone(),
            total_frames: self.frame_count,
            width: self.width,
            height: self.height,
            bit_depth,
            samples_per_pixel,
        }
    }
}

/// Sequential page iterator over a [`TiffStack`].
pub struct FrameIter<'a> {
    decoder: Decoder<Cursor<&'a [u8]>>,
    next_index: usize,
    total: usize,
}

impl FrameIter<'_> {
    fn read_current(&mut self) -> Result<Frame> {
        let index = self.next_index;
        if index > 0 {
            self.decoder.next_image()?;
        }
        let (width, height) = self.decoder.dimensions()?;
        let color_type = self.decoder.colortype()?;
        let pixels = match (color_type, self.decoder.read_image()?) {
            (ColorType::Gray(8), DecodingResult::U8(v)) => FramePixels::Gray8(v),
            (ColorType::Gray(16), DecodingResult::U16(v)) => FramePixels::Gray16(v),
            (ColorType::RGB(8), DecodingResult::U8(v)) => FramePixels::Rgb8(v),
            (ColorType::RGB(16), DecodingResult::U16(v)) => FramePixels::Rgb16(v),
            (other, _) => {
                return Err(SimaError::UnsupportedPixelFormat(format!(
                    "{other:?} on page {index}"
                )))
            }
        };
        Ok(Frame::new(index, width, height, pixels))
    }
}

impl Iterator for FrameIter<'_> {
    type Item = Result<Frame>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_index >= self.total {
            return None;
        }
        let result = self.read_current();
        self.next_index += 1;
        if result.is_err() {
            // A failed page leaves the decoder in an unknown position.
            self.next_index = self.total;
        }
        Some(result)
    }
}

/// Decode the ImageJ `info` text of the current page.
///
/// An absent, unreadable or malformed ImageJ tag yields `None`; it never
/// hides the page description.
fn read_imagej_info(decoder: &mut Decoder<Cursor<&[u8]>>) -> Option<String> {
    let data = match decoder.find_tag(Tag::Unknown(IJ_METADATA_TAG)) {
        Ok(Some(value)) => value_bytes(value),
        Ok(None) => return None,
        Err(e) => {
            debug!(error = %e, "ImageJ metadata tag unreadable");
            return None;
        }
    };
    let Some(data) = data else {
        debug!("ImageJ metadata tag is not a byte array");
        return None;
    };

    let counts = match decoder.find_tag(Tag::Unknown(IJ_METADATA_BYTE_COUNTS_TAG)) {
        Ok(Some(value)) => value.into_u32_vec().ok(),
        Ok(None) => None,
        Err(e) => {
            debug!(error = %e, "ImageJ byte counts tag unreadable");
            None
        }
    };
    let Some(counts) = counts else {
        debug!("ImageJ metadata tag has no usable byte counts");
        return None;
    };
    imagej::decode_info(&data, &counts)
}

/// Flatten a BYTE-typed tag. Long byte arrays decode as a list of wide
/// integers, short ones as single bytes.
fn value_bytes(value: Value) -> Option<Vec<u8>> {
    match value {
        Value::List(items) => items.into_iter().map(value_byte).collect(),
        other => value_byte(other).map(|b| vec![b]),
    }
}

fn value_byte(value: Value) -> Option<u8> {
    match value {
        Value::Byte(b) => Some(b),
        Value::Short(v) => u8::try_from(v).ok(),
        Value::Unsigned(v) => u8::try_from(v).ok(),
        Value::UnsignedBig(v) => u8::try_from(v).ok(),
        _ => None,
    }
}

fn new_decoder(bytes: &[u8]) -> Result<Decoder<Cursor<&[u8]>>> {
    Ok(Decoder::new(Cursor::new(bytes))?.with_limits(Limits::unlimited()))
}
