//! Image compression to a fixed square canvas.
//!
//! Scales the input uniformly so its longer dimension fits the canvas,
//! centers it on a white background, and encodes JPEG. Decode and encode
//! failures are reported; nothing is written on failure.

use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageReader, Rgb, RgbImage};
use tracing::info;

use crate::error::{Error, Result};

/// Default canvas size in pixels (both dimensions).
pub const DEFAULT_CANVAS_SIZE: u32 = 500;

/// Default JPEG quality (percent).
pub const DEFAULT_JPEG_QUALITY: u8 = 80;

/// Compute the scaled dimensions: the longer side maps to `size`, aspect
/// ratio preserved, neither side rounding to zero.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn scaled_dimensions(width: u32, height: u32, size: u32) -> (u32, u32) {
    if width >= height {
        let scaled = (f64::from(size) * f64::from(height) / f64::from(width)).round() as u32;
        (size, scaled.max(1))
    } else {
        let scaled = (f64::from(size) * f64::from(width) / f64::from(height)).round() as u32;
        (scaled.max(1), size)
    }
}

/// Scale the image and center it on a white `size`×`size` canvas.
#[must_use]
pub fn compose(img: &DynamicImage, size: u32) -> RgbImage {
    let (width, height) = scaled_dimensions(img.width(), img.height(), size);
    let resized = img
        .resize_exact(width, height, FilterType::Lanczos3)
        .to_rgb8();

    let mut canvas = RgbImage::from_pixel(size, size, Rgb([255, 255, 255]));
    let x = i64::from((size - width) / 2);
    let y = i64::from((size - height) / 2);
    imageops::replace(&mut canvas, &resized, x, y);
    canvas
}

/// Default output path: `compressed_<input stem>.jpg` next to the input.
#[must_use]
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "image".to_string(), |s| s.to_string_lossy().to_string());
    input.with_file_name(format!("compressed_{stem}.jpg"))
}

/// Compress `input` to a `size`×`size` JPEG at `output`.
///
/// # Errors
///
/// - [`Error::ImageDecode`] if the input cannot be read, is not a
///   recognized image format, or fails to decode.
/// - [`Error::ImageEncode`] if JPEG encoding fails.
/// - An I/O error if the output cannot be written.
pub fn compress_image(input: &Path, output: &Path, size: u32, quality: u8) -> Result<()> {
    let reader = ImageReader::open(input)
        .map_err(|e| Error::image_decode(input, e.to_string()))?
        .with_guessed_format()
        .map_err(|e| Error::image_decode(input, e.to_string()))?;

    if reader.format().is_none() {
        return Err(Error::image_decode(input, "unrecognized image format"));
    }

    let img = reader
        .decode()
        .map_err(|e| Error::image_decode(input, e.to_string()))?;

    let canvas = compose(&img, size);

    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, quality)
        .encode_image(&canvas)
        .map_err(|e| Error::ImageEncode(e.to_string()))?;

    std::fs::write(output, buf)?;
    info!(
        "Compressed {} ({}x{}) to {}x{} JPEG at {}",
        input.display(),
        img.width(),
        img.height(),
        size,
        size,
        output.display()
    );
    Ok(())
}
