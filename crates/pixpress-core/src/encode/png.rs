//! PNG encoding.
//!
//! PNG is lossless, so the quality knob cannot trade fidelity for size. It is
//! mapped onto deflate effort instead: low quality asks for the smallest file
//! (most effort), high quality for the fastest encode (least effort). Pixels
//! are identical whichever effort is used.
//!
//! | quality | effort    |
//! |---------|-----------|
//! | 1-33    | `Best`    |
//! | 34-66   | `Default` |
//! | 67-100  | `Fast`    |

use image::codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder};
use image::ImageEncoder;
use std::io::Cursor;

use super::types::{check_buffer, clamp_quality, EncodeError, PixelLayout};

/// PNG's format limit is 2^31-1; keep well inside it.
pub const PNG_MAX_DIMENSION: u32 = 1 << 24;

/// Deflate effort derived from the quality knob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PngEffort {
    /// Maximum compression, slowest.
    Best,
    /// Balanced.
    Default,
    /// Minimal compression, fastest.
    Fast,
}

impl PngEffort {
    /// Map a quality value (clamped to 1-100 first) to an effort level.
    pub fn from_quality(quality: i32) -> Self {
        match clamp_quality(quality) {
            1..=33 => PngEffort::Best,
            34..=66 => PngEffort::Default,
            _ => PngEffort::Fast,
        }
    }

    fn compression(self) -> CompressionType {
        match self {
            PngEffort::Best => CompressionType::Best,
            PngEffort::Default => CompressionType::Default,
            PngEffort::Fast => CompressionType::Fast,
        }
    }
}

/// Encode RGB or RGBA pixel data to PNG bytes at the given effort.
pub fn encode_png(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
    effort: PngEffort,
) -> Result<Vec<u8>, EncodeError> {
    check_buffer("PNG", pixels, width, height, layout, PNG_MAX_DIMENSION)?;

    let mut buffer = Cursor::new(Vec::new());
    let encoder =
        PngEncoder::new_with_quality(&mut buffer, effort.compression(), PngFilterType::Adaptive);

    encoder
        .write_image(pixels, width, height, layout.to_color_type())
        .map_err(|e| EncodeError::EncodingFailed {
            codec: "PNG",
            message: e.to_string(),
        })?;

    Ok(buffer.into_inner())
}
