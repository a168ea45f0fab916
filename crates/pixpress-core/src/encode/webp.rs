//! WebP encoding.
//!
//! The `image` crate only writes lossless WebP, which ignores the quality
//! knob, so with the `lossy-webp` feature (on by default) output goes through
//! the libwebp bindings instead. Without it the pure-Rust lossless encoder is
//! used, which keeps the crate buildable for `wasm32-unknown-unknown`.

use super::types::{check_buffer, EncodeError, PixelLayout};

/// libwebp's per-side limit.
pub const WEBP_MAX_DIMENSION: u32 = 16_383;

/// Encode RGB or RGBA pixel data to lossy WebP bytes.
///
/// `quality` is clamped to 1-100.
#[cfg(feature = "lossy-webp")]
pub fn encode_webp(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    check_buffer("WebP", pixels, width, height, layout, WEBP_MAX_DIMENSION)?;

    let encoder = match layout {
        PixelLayout::Rgb8 => webp::Encoder::from_rgb(pixels, width, height),
        PixelLayout::Rgba8 => webp::Encoder::from_rgba(pixels, width, height),
    };

    let memory = encoder
        .encode_simple(false, quality.clamp(1, 100) as f32)
        .map_err(|e| EncodeError::EncodingFailed {
            codec: "WebP",
            message: format!("{e:?}"),
        })?;

    Ok(memory.to_vec())
}

/// Encode RGB or RGBA pixel data to lossless WebP bytes. `quality` is unused.
#[cfg(not(feature = "lossy-webp"))]
pub fn encode_webp(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
    _quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    use image::codecs::webp::WebPEncoder;
    use image::ImageEncoder;

    check_buffer("WebP", pixels, width, height, layout, WEBP_MAX_DIMENSION)?;

    let mut buf = Vec::new();
    WebPEncoder::new_lossless(&mut buf)
        .write_image(pixels, width, height, layout.to_color_type())
        .map_err(|e| EncodeError::EncodingFailed {
            codec: "WebP",
            message: e.to_string(),
        })?;

    Ok(buf)
}
