//! Image encoding for the compression pipeline.
//!
//! This module provides functionality for:
//! - Encoding to JPEG with a 1-100 quality knob
//! - Encoding to WebP, lossy with a 1-100 quality knob under `lossy-webp`
//! - Encoding to PNG, where quality selects compression effort
//!
//! [`encode_image`] picks the right codec and pixel layout for a decoded
//! image; the per-codec functions take raw interleaved pixels.

mod jpeg;
mod png;
mod types;
mod webp;

use image::DynamicImage;

use crate::options::OutputFormat;

pub use self::jpeg::{encode_jpeg, JPEG_MAX_DIMENSION};
pub use self::png::{encode_png, PngEffort, PNG_MAX_DIMENSION};
pub use self::types::{clamp_quality, EncodeError, PixelLayout};
pub use self::webp::{encode_webp, WEBP_MAX_DIMENSION};

/// Encode `image` into `format` using the unclamped `quality` knob.
///
/// Alpha is kept for PNG and WebP and dropped for JPEG.
pub fn encode_image(
    image: &DynamicImage,
    format: OutputFormat,
    quality: i32,
) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = (image.width(), image.height());

    match format {
        OutputFormat::Jpeg => {
            let rgb = image.to_rgb8();
            encode_jpeg(rgb.as_raw(), width, height, clamp_quality(quality))
        }
        OutputFormat::Png => {
            let effort = PngEffort::from_quality(quality);
            with_pixels(image, |pixels, layout| {
                encode_png(pixels, width, height, layout, effort)
            })
        }
        OutputFormat::WebP => {
            let quality = clamp_quality(quality);
            with_pixels(image, |pixels, layout| {
                encode_webp(pixels, width, height, layout, quality)
            })
        }
    }
}

/// Hand `f` 8-bit RGB or RGBA pixels, depending on whether `image` has alpha.
fn with_pixels<T>(image: &DynamicImage, f: impl FnOnce(&[u8], PixelLayout) -> T) -> T {
    if image.color().has_alpha() {
        let rgba = image.to_rgba8();
        f(rgba.as_raw(), PixelLayout::Rgba8)
    } else {
        let rgb = image.to_rgb8();
        f(rgb.as_raw(), PixelLayout::Rgb8)
    }
}
