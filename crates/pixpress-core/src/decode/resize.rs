//! Bounding-box resizing.
//!
//! The requested width/height describe a box. The image is scaled to fit
//! inside it with its aspect ratio intact, and is never scaled up.

use image::imageops::FilterType;

use super::DecodedImage;

/// Compute the dimensions of `(width, height)` fitted inside the box.
///
/// A missing side places no constraint on that axis. If the box is larger
/// than the source in every constrained direction, the source dimensions are
/// returned unchanged. Each output side is at least 1 px.
pub fn fit_within(
    width: u32,
    height: u32,
    box_width: Option<u32>,
    box_height: Option<u32>,
) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (width, height);
    }

    let scale_w = box_width.map_or(1.0, |w| w as f64 / width as f64);
    let scale_h = box_height.map_or(1.0, |h| h as f64 / height as f64);
    let scale = scale_w.min(scale_h).min(1.0);

    if scale >= 1.0 {
        return (width, height);
    }

    let new_width = ((width as f64 * scale).round() as u32).clamp(1, width);
    let new_height = ((height as f64 * scale).round() as u32).clamp(1, height);
    (new_width, new_height)
}

/// Resize `image` to fit the box, using a Lanczos3 filter.
///
/// Returns the input untouched when no shrinking is needed.
pub fn resize_to_box(
    image: DecodedImage,
    box_width: Option<u32>,
    box_height: Option<u32>,
) -> DecodedImage {
    let (src_width, src_height) = image.dimensions();
    let (new_width, new_height) = fit_within(src_width, src_height, box_width, box_height);

    if (new_width, new_height) == (src_width, src_height) {
        return image;
    }

    let resized = image
        .image
        .resize_exact(new_width, new_height, FilterType::Lanczos3);
    DecodedImage::new(image.source_format, resized)
}
