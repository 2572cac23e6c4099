use std::path::Path;

use image::{ImageBuffer, ImageFormat, Luma, Pixel, Rgb};

use crate::error::{Result, SimaError};
use crate::frame::{Frame, FramePixels};

/// Save a frame as a standalone single-page image, keeping its bit depth.
///
/// The format follows the file extension: `.png` writes PNG, anything else
/// writes TIFF.
pub fn save_frame(frame: &Frame, path: &Path) -> Result<()> {
    let format = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("png") => ImageFormat::Png,
        _ => ImageFormat::Tiff,
    };

    let expected = frame.width as usize * frame.height as usize * frame.pixels.samples_per_pixel();
    if frame.pixels.sample_count() != expected {
        return Err(SimaError::InvalidDimensions {
            width: frame.width,
            height: frame.height,
        });
    }

    match &frame.pixels {
        FramePixels::Gray8(v) => save_buffer::<Luma<u8>>(frame, v.clone(), path, format),
        FramePixels::Gray16(v) => save_buffer::<Luma<u16>>(frame, v.clone(), path, format),
        FramePixels::Rgb8(v) => save_buffer::<Rgb<u8>>(frame, v.clone(), path, format),
        FramePixels::Rgb16(v) => save_buffer::<Rgb<u16>>(frame, v.clone(), path, format),
    }
}

fn save_buffer<P>(
    frame: &Frame,
    samples: Vec<P::Subpixel>,
    path: &Path,
    format: ImageFormat,
) -> Result<()>
where
    P: Pixel + image::PixelWithColorType,
    [P::Subpixel]: image::EncodableLayout,
{
    let img = ImageBuffer::<P, Vec<P::Subpixel>>::from_raw(frame.width, frame.height, samples)
        .ok_or(SimaError::InvalidDimensions {
            width: frame.width,
            height: frame.height,
        })?;
    img.save_with_format(path, format)?;
    Ok(())
}

/// Load a single-page image as a frame. Used to verify split output.
pub fn load_frame(path: &Path) -> Result<Frame> {
    let img = image::open(path)?;
    let (width, height) = (img.width(), img.height());
    let pixels = match img {
        image::DynamicImage::ImageLuma8(buf) => FramePixels::Gray8(buf.into_raw()),
        image::DynamicImage::ImageLuma16(buf) => FramePixels::Gray16(buf.into_raw()),
        image::DynamicImage::ImageRgb8(buf) => FramePixels::Rgb8(buf.into_raw()),
        image::DynamicImage::ImageRgb16(buf) => FramePixels::Rgb16(buf.into_raw()),
        other => {
            return Err(SimaError::UnsupportedPixelFormat(format!(
                "{:?}",
                other.color()
            )))
        }
    };
    Ok(Frame::new(0, width, height, pixels))
}
