//! The compression engine: decode, optionally shrink, re-encode.
//!
//! One call is one synchronous, bounded unit of CPU work. It either returns a
//! complete encoded buffer or an error; there is no partial output.

use serde::Serialize;
use thiserror::Error;

use crate::decode::{decode_image, resize_to_box, DecodeError};
use crate::encode::{encode_image, EncodeError};
use crate::options::{CompressionOptions, OutputFormat};

/// Failure inside the engine.
#[derive(Debug, Error)]
pub enum CompressionError {
    /// The bytes are not a decodable JPEG, PNG or WebP image.
    #[error("Failed to decode image: {0}")]
    Decode(#[from] DecodeError),

    /// The encoder could not produce output for otherwise valid pixels.
    #[error("Failed to encode image: {0}")]
    Encode(#[from] EncodeError),
}

/// Output of a successful compression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompressionResult {
    /// Encoded image bytes.
    #[serde(skip)]
    pub bytes: Vec<u8>,
    /// Format the bytes are in.
    pub format: OutputFormat,
    /// Input size in bytes.
    pub original_size: u64,
    /// Output size in bytes.
    pub compressed_size: u64,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
}

impl CompressionResult {
    /// `image/<format>`.
    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }

    /// Output size relative to input size; below 1.0 means the file shrank.
    pub fn ratio(&self) -> f64 {
        if self.original_size == 0 {
            return 1.0;
        }
        self.compressed_size as f64 / self.original_size as f64
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Decode `buffer`, fit it into the requested box, and encode it.
pub fn compress(
    buffer: &[u8],
    options: &CompressionOptions,
) -> Result<CompressionResult, CompressionError> {
    let decoded = decode_image(buffer)?;

    let decoded = if options.has_resize() {
        resize_to_box(decoded, options.width, options.height)
    } else {
        decoded
    };

    let (width, height) = decoded.dimensions();
    let bytes = encode_image(&decoded.image, options.format, options.quality)?;

    Ok(CompressionResult {
        original_size: buffer.len() as u64,
        compressed_size: bytes.len() as u64,
        bytes,
        format: options.format,
        width,
        height,
    })
}
