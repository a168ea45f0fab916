//! Shared types for the encoders.

use image::ExtendedColorType;
use thiserror::Error;

/// Errors that can occur while encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero or beyond what the codec can represent
    #[error("Invalid dimensions for {codec}: {width}x{height}")]
    InvalidDimensions {
        codec: &'static str,
        width: u32,
        height: u32,
    },

    /// The codec itself rejected the input
    #[error("{codec} encoding failed: {message}")]
    EncodingFailed {
        codec: &'static str,
        message: String,
    },
}

/// Interleaved 8-bit pixel layouts the encoders accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelLayout {
    Rgb8,
    Rgba8,
}

impl PixelLayout {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelLayout::Rgb8 => 3,
            PixelLayout::Rgba8 => 4,
        }
    }

    pub fn to_color_type(self) -> ExtendedColorType {
        match self {
            PixelLayout::Rgb8 => ExtendedColorType::Rgb8,
            PixelLayout::Rgba8 => ExtendedColorType::Rgba8,
        }
    }
}

/// Check that `pixels` matches `width * height * bpp` and that neither side
/// is zero or above `max_side`.
pub(crate) fn check_buffer(
    codec: &'static str,
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
    max_side: u32,
) -> Result<(), EncodeError> {
    if width == 0 || height == 0 || width > max_side || height > max_side {
        return Err(EncodeError::InvalidDimensions {
            codec,
            width,
            height,
        });
    }

    let expected = (width as usize) * (height as usize) * layout.bytes_per_pixel();
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }

    Ok(())
}

/// Clamp the caller's quality knob to the 1-100 range lossy codecs accept.
pub fn clamp_quality(quality: i32) -> u8 {
    quality.clamp(1, 100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_quality() {
        assert_eq!(clamp_quality(-20), 1);
        assert_eq!(clamp_quality(0), 1);
        assert_eq!(clamp_quality(1), 1);
        assert_eq!(clamp_quality(80), 80);
        assert_eq!(clamp_quality(100), 100);
        assert_eq!(clamp_quality(5000), 100);
    }

    #[test]
    fn test_check_buffer() {
        assert!(check_buffer("x", &[0; 12], 2, 2, PixelLayout::Rgb8, 10).is_ok());
        assert!(check_buffer("x", &[0; 16], 2, 2, PixelLayout::Rgba8, 10).is_ok());
        assert!(matches!(
            check_buffer("x", &[0; 11], 2, 2, PixelLayout::Rgb8, 10),
            Err(EncodeError::InvalidPixelData { expected: 12, actual: 11 })
        ));
        assert!(matches!(
            check_buffer("x", &[], 0, 2, PixelLayout::Rgb8, 10),
            Err(EncodeError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            check_buffer("x", &[0; 33], 11, 1, PixelLayout::Rgb8, 10),
            Err(EncodeError::InvalidDimensions { width: 11, .. })
        ));
    }

    #[test]
    fn test_error_display() {
        let err = EncodeError::EncodingFailed {
            codec: "WebP",
            message: "bad".into(),
        };
        assert_eq!(err.to_string(), "WebP encoding failed: bad");
    }
}
