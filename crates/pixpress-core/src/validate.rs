//! Upload validation.
//!
//! Validation looks only at metadata (presence, declared type, length) and
//! never at the bytes themselves, so it runs in constant time before any
//! decode work is scheduled. The decoder is the authority on whether the
//! bytes really are an image.

use thiserror::Error;

use crate::config::PipelineConfig;
use crate::request::UploadedFile;

/// Reasons an upload is rejected before decoding.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    /// The request carried no file.
    #[error("No file uploaded")]
    MissingFile,

    /// Declared MIME type is not in the allow-list.
    #[error("Invalid file type. Only JPEG, PNG and WebP are allowed")]
    UnsupportedType { mime_type: String },

    /// Declared length exceeds the configured maximum.
    #[error("File too large. Maximum size is {}MB", format_mb(.max_bytes))]
    TooLarge { size: u64, max_bytes: u64 },
}

/// Validate an upload against the configured limits.
///
/// Checks run in a fixed order: presence, type, size. On success the file
/// itself is handed back so callers don't have to unwrap the option again.
pub fn validate<'a>(
    file: Option<&'a UploadedFile>,
    limits: &PipelineConfig,
) -> Result<&'a UploadedFile, ValidationError> {
    let file = file.ok_or(ValidationError::MissingFile)?;

    let essence = mime_essence(file.mime_type());
    if !limits.allows(essence) {
        return Err(ValidationError::UnsupportedType {
            mime_type: file.mime_type().to_string(),
        });
    }

    if file.len() > limits.max_file_size {
        return Err(ValidationError::TooLarge {
            size: file.len(),
            max_bytes: limits.max_file_size,
        });
    }

    Ok(file)
}

/// Strip parameters and surrounding whitespace from a media type.
///
/// `"image/png; charset=binary"` becomes `"image/png"`.
pub fn mime_essence(mime: &str) -> &str {
    mime.split(';').next().unwrap_or("").trim()
}

fn format_mb(bytes: &u64) -> String {
    let mb = *bytes as f64 / 1024.0 / 1024.0;
    if mb.fract() == 0.0 {
        format!("{}", mb as u64)
    } else {
        format!("{:.2}", mb)
    }
}
