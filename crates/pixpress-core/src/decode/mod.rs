//! Image decoding for the compression pipeline.
//!
//! This module provides functionality for:
//! - Sniffing the real codec from magic bytes (JPEG, PNG, WebP)
//! - Decoding into an upright image, with EXIF orientation baked in
//! - Bounding-box resizing that never enlarges
//!
//! # Examples
//!
//! ```ignore
//! use pixpress_core::decode::{decode_image, resize_to_box};
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! let preview = resize_to_box(image, Some(800), None);
//! println!("Resized to {}x{}", preview.width(), preview.height());
//! ```

mod reader;
mod resize;
mod types;

pub use reader::{decode_image, get_orientation, sniff_format};
pub use resize::{fit_within, resize_to_box};
pub use types::{DecodeError, DecodedImage, Orientation, SourceFormat};
