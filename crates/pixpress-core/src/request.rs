//! Request-scoped inputs handed to the pipeline by a transport.

use serde::{Deserialize, Serialize};

/// An uploaded file as received by the transport.
///
/// The byte length is always the buffer length; there is no way to construct
/// one that disagrees with its own data.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    bytes: Vec<u8>,
    mime_type: String,
    filename: Option<String>,
}

impl UploadedFile {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
            filename: None,
        }
    }

    /// Attach the client-supplied filename. Advisory only, never trusted.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// Declared byte length.
    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Raw option fields exactly as the caller sent them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawOptions {
    pub quality: Option<String>,
    pub format: Option<String>,
    pub width: Option<String>,
    pub height: Option<String>,
}

impl RawOptions {
    /// Set a field by its wire name. Unknown names are ignored.
    ///
    /// Returns `true` if the name matched one of the option fields.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> bool {
        let slot = match name {
            "quality" => &mut self.quality,
            "format" => &mut self.format,
            "width" => &mut self.width,
            "height" => &mut self.height,
            _ => return false,
        };
        *slot = Some(value.into());
        true
    }
}

/// Everything one pipeline invocation needs.
#[derive(Debug, Clone, Default)]
pub struct CompressionRequest {
    pub file: Option<UploadedFile>,
    pub options: RawOptions,
}

impl CompressionRequest {
    pub fn new(file: UploadedFile, options: RawOptions) -> Self {
        Self {
            file: Some(file),
            options,
        }
    }
}
