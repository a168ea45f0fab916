//! Request orchestration: validate, resolve, compress.
//!
//! [`handle`] is the single entry point transports call per request. It runs
//! each stage once, in order, and folds their failures into a
//! [`PipelineError`] whose [`ErrorKind`] maps to a fault class through a
//! fixed table.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::PipelineConfig;
use crate::engine::{compress, CompressionError, CompressionResult};
use crate::options::resolve;
use crate::request::CompressionRequest;
use crate::validate::{validate, ValidationError};

/// Message returned to callers for any server-side failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error during compression";

/// Message returned to callers when the bytes are not a decodable image.
pub const DECODE_ERROR_MESSAGE: &str = "Uploaded file is not a valid JPEG, PNG or WebP image";

/// Machine-checkable failure kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    MissingFile,
    UnsupportedType,
    TooLarge,
    DecodeError,
    EncodeError,
}

/// Who is responsible for a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fault {
    /// Bad input; the caller can fix it and resubmit.
    Client,
    /// Internal failure; not the caller's doing.
    Server,
}

impl ErrorKind {
    pub fn fault(self) -> Fault {
        match self {
            ErrorKind::MissingFile
            | ErrorKind::UnsupportedType
            | ErrorKind::TooLarge
            | ErrorKind::DecodeError => Fault::Client,
            ErrorKind::EncodeError => Fault::Server,
        }
    }

    /// Stable name, identical to the variant name.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::MissingFile => "MissingFile",
            ErrorKind::UnsupportedType => "UnsupportedType",
            ErrorKind::TooLarge => "TooLarge",
            ErrorKind::DecodeError => "DecodeError",
            ErrorKind::EncodeError => "EncodeError",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any failure of one pipeline invocation.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Compression(#[from] CompressionError),
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::Validation(ValidationError::MissingFile) => ErrorKind::MissingFile,
            PipelineError::Validation(ValidationError::UnsupportedType { .. }) => {
                ErrorKind::UnsupportedType
            }
            PipelineError::Validation(ValidationError::TooLarge { .. }) => ErrorKind::TooLarge,
            PipelineError::Compression(CompressionError::Decode(_)) => ErrorKind::DecodeError,
            PipelineError::Compression(CompressionError::Encode(_)) => ErrorKind::EncodeError,
        }
    }

    pub fn fault(&self) -> Fault {
        self.kind().fault()
    }

    /// Message safe to show the caller.
    ///
    /// Client faults name the violated constraint. Server faults get a fixed
    /// generic message; the detail is only logged.
    pub fn user_message(&self) -> String {
        match self {
            PipelineError::Validation(e) => e.to_string(),
            PipelineError::Compression(CompressionError::Decode(_)) => {
                DECODE_ERROR_MESSAGE.to_string()
            }
            PipelineError::Compression(CompressionError::Encode(_)) => {
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        }
    }
}

/// Run one request through validation, option resolution and compression.
///
/// Consumes the request; the upload buffer is dropped before this returns.
pub fn handle(
    request: CompressionRequest,
    config: &PipelineConfig,
) -> Result<CompressionResult, PipelineError> {
    let CompressionRequest { file, options } = request;

    let file = validate(file.as_ref(), config).map_err(|e| {
        let err = PipelineError::from(e);
        tracing::debug!(kind = %err.kind(), "Upload rejected: {}", err);
        err
    })?;

    let options = resolve(&options, config);
    tracing::debug!(
        filename = ?file.filename(),
        size = file.len(),
        quality = options.quality,
        format = %options.format,
        width = ?options.width,
        height = ?options.height,
        "Compressing image"
    );

    match compress(file.bytes(), &options) {
        Ok(result) => {
            tracing::info!(
                format = %result.format,
                original_size = result.original_size,
                compressed_size = result.compressed_size,
                width = result.width,
                height = result.height,
                "Compression complete"
            );
            Ok(result)
        }
        Err(e) => {
            let err = PipelineError::from(e);
            match err.fault() {
                Fault::Server => {
                    tracing::error!(kind = %err.kind(), "Compression error: {:#}", err)
                }
                Fault::Client => {
                    tracing::warn!(kind = %err.kind(), "Rejected undecodable upload: {}", err)
                }
            }
            Err(err)
        }
    }
}
