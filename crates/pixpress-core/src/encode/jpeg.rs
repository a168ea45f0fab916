//! JPEG encoding.
//!
//! Uses the `image` crate's baseline JPEG encoder. JPEG has no alpha, so
//! callers hand in RGB data.

use image::codecs::jpeg::JpegEncoder;
use image::ImageEncoder;
use std::io::Cursor;

use super::types::{check_buffer, EncodeError, PixelLayout};

/// Largest side a baseline JPEG header can describe.
pub const JPEG_MAX_DIMENSION: u32 = 65_535;

/// Encode RGB pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality (1-100); out-of-range values are clamped
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    check_buffer("JPEG", pixels, width, height, PixelLayout::Rgb8, JPEG_MAX_DIMENSION)?;

    let quality = quality.clamp(1, 100);
    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);

    encoder
        .write_image(pixels, width, height, PixelLayout::Rgb8.to_color_type())
        .map_err(|e| EncodeError::EncodingFailed {
            codec: "JPEG",
            message: e.to_string(),
        })?;

    Ok(buffer.into_inner())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn textured(width: u32, height: u32) -> Vec<u8> {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width) as u8);
                pixels.push(((y * 255) / height) as u8);
                pixels.push(((x * 37 + y * 91) % 256) as u8);
            }
        }
        pixels
    }

    proptest! {
        /// Property: same input always produces same output.
        #[test]
        fn prop_deterministic_output(
            (width, height) in (1u32..=20, 1u32..=20),
            quality in 1u8..=100,
        ) {
            let pixels = vec![100u8; (width * height * 3) as usize];
            let first = encode_jpeg(&pixels, width, height, quality).unwrap();
            let second = encode_jpeg(&pixels, width, height, quality).unwrap();
            prop_assert_eq!(first, second);
        }

        /// Property: raising quality never shrinks the output.
        #[test]
        fn prop_size_monotonic_in_quality(
            (width, height) in (32u32..=64, 32u32..=64),
            low in 5u8..=45,
            gap in 30u8..=50,
        ) {
            let pixels = textured(width, height);
            let high = low + gap;
            let low_size = encode_jpeg(&pixels, width, height, low).unwrap().len();
            let high_size = encode_jpeg(&pixels, width, height, high).unwrap().len();
            prop_assert!(high_size >= low_size,
                "q{}={} bytes, q{}={} bytes", low, low_size, high, high_size);
        }
    }
}
