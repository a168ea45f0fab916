//! Option resolution.
//!
//! Turns the caller's raw string fields into a [`CompressionOptions`]. This
//! step is total: anything it cannot parse is treated as absent and replaced
//! by a default, so it never produces an error of its own.

use serde::{Deserialize, Serialize};

use crate::config::PipelineConfig;
use crate::request::RawOptions;

/// Output container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Jpeg,
    Png,
    WebP,
}

impl OutputFormat {
    /// Parse a format name. Case-insensitive; `jpg` is accepted for JPEG.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" => Some(OutputFormat::Jpeg),
            "png" => Some(OutputFormat::Png),
            "webp" => Some(OutputFormat::WebP),
            _ => None,
        }
    }

    /// Lowercase name as used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Png => "png",
            OutputFormat::WebP => "webp",
        }
    }

    /// The `image/<format>` content type.
    pub fn content_type(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Png => "image/png",
            OutputFormat::WebP => "image/webp",
        }
    }

    /// Convert to the image crate's format enum.
    pub fn to_image_format(self) -> image::ImageFormat {
        match self {
            OutputFormat::Jpeg => image::ImageFormat::Jpeg,
            OutputFormat::Png => image::ImageFormat::Png,
            OutputFormat::WebP => image::ImageFormat::WebP,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully resolved settings for one compression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressionOptions {
    /// Quality knob. Nominally 1-100 but carried unclamped; each encoder
    /// decides what out-of-range values mean.
    pub quality: i32,
    /// Target format.
    pub format: OutputFormat,
    /// Bounding-box width, if requested.
    pub width: Option<u32>,
    /// Bounding-box height, if requested.
    pub height: Option<u32>,
}

impl CompressionOptions {
    /// Options with the given quality and format and no resize.
    pub fn new(quality: i32, format: OutputFormat) -> Self {
        Self {
            quality,
            format,
            width: None,
            height: None,
        }
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    /// Whether a resize box was requested at all.
    pub fn has_resize(&self) -> bool {
        self.width.is_some() || self.height.is_some()
    }
}

/// Resolve raw caller input into options.
pub fn resolve(raw: &RawOptions, config: &PipelineConfig) -> CompressionOptions {
    let quality = raw
        .quality
        .as_deref()
        .and_then(parse_int)
        .and_then(|q| i32::try_from(q).ok())
        .unwrap_or(config.default_quality);

    let format = raw
        .format
        .as_deref()
        .and_then(OutputFormat::parse)
        .unwrap_or_default();

    CompressionOptions {
        quality,
        format,
        width: raw.width.as_deref().and_then(parse_dimension),
        height: raw.height.as_deref().and_then(parse_dimension),
    }
}

/// Read the leading integer of `value`, ignoring whatever follows it.
///
/// `"55.5"` reads as 55 and `"800px"` as 800. Input with no leading digits,
/// or a number that does not fit in an `i64`, counts as absent.
fn parse_int(value: &str) -> Option<i64> {
    let value = value.trim_start();
    let sign_len = usize::from(value.starts_with(|c| c == '+' || c == '-'));
    let digits_len = value[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return None;
    }
    value[..sign_len + digits_len].parse::<i64>().ok()
}

/// Dimensions must be positive; zero and negatives count as absent.
fn parse_dimension(value: &str) -> Option<u32> {
    parse_int(value)
        .filter(|v| *v > 0)
        .and_then(|v| u32::try_from(v).ok())
}
