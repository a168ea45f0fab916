//! Byte-level decoding with format sniffing and EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::ImageReader;

use super::{DecodeError, DecodedImage, Orientation, SourceFormat};

/// Decode JPEG, PNG or WebP bytes into an upright image.
///
/// The codec is picked from the magic bytes. Whatever MIME type the upload
/// declared is irrelevant here.
///
/// # Errors
///
/// Returns `DecodeError::Empty` for an empty buffer,
/// `DecodeError::InvalidFormat` if the bytes are not one of the three
/// accepted codecs, and `DecodeError::CorruptedFile` if decoding fails.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }

    let source_format = sniff_format(bytes)?;

    let format = source_to_image_format(source_format);
    let reader = ImageReader::with_format(Cursor::new(bytes), format);
    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let orientation = get_orientation(bytes);
    Ok(DecodedImage::new(source_format, orientation.apply(img)))
}

/// Identify the codec from the leading bytes.
pub fn sniff_format(bytes: &[u8]) -> Result<SourceFormat, DecodeError> {
    image::guess_format(bytes)
        .ok()
        .and_then(SourceFormat::from_image_format)
        .ok_or(DecodeError::InvalidFormat)
}

/// Read the EXIF orientation tag, defaulting to `Normal` when absent or
/// unreadable.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    Reader::new()
        .read_from_container(&mut cursor)
        .ok()
        .and_then(|exif| {
            exif.get_field(Tag::Orientation, In::PRIMARY)
                .and_then(|field| field.value.get_uint(0))
        })
        .map(Orientation::from)
        .unwrap_or_default()
}

fn source_to_image_format(format: SourceFormat) -> image::ImageFormat {
    match format {
        SourceFormat::Jpeg => image::ImageFormat::Jpeg,
        SourceFormat::Png => image::ImageFormat::Png,
        SourceFormat::WebP => image::ImageFormat::WebP,
    }
}
