//! Immutable pipeline configuration.
//!
//! A `PipelineConfig` is built once at process start (by whichever transport
//! hosts the pipeline) and passed by reference into the validator, resolver
//! and request handler. Nothing in the core reads the environment.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default maximum upload size in bytes (5 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// Default quality used when the caller omits one or sends garbage.
pub const DEFAULT_QUALITY: i32 = 80;

/// MIME types accepted by default.
pub const DEFAULT_ALLOWED_MIME_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

/// Errors raised when a configuration is internally inconsistent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max_file_size must be greater than zero")]
    ZeroMaxFileSize,

    #[error("default_quality must be between 1 and 100, got {0}")]
    DefaultQualityOutOfRange(i32),

    #[error("allowed_mime_types must not be empty")]
    EmptyAllowList,
}

/// Limits and defaults consumed by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Maximum accepted upload size in bytes.
    pub max_file_size: u64,
    /// Quality applied when the request does not carry a usable one.
    pub default_quality: i32,
    /// Declared MIME types the validator lets through.
    pub allowed_mime_types: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            default_quality: DEFAULT_QUALITY,
            allowed_mime_types: DEFAULT_ALLOWED_MIME_TYPES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl PipelineConfig {
    /// Check the configuration for values the pipeline cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_file_size == 0 {
            return Err(ConfigError::ZeroMaxFileSize);
        }
        if !(1..=100).contains(&self.default_quality) {
            return Err(ConfigError::DefaultQualityOutOfRange(self.default_quality));
        }
        if self.allowed_mime_types.is_empty() {
            return Err(ConfigError::EmptyAllowList);
        }
        Ok(())
    }

    /// Whether `mime` (already normalized to its essence) is in the allow-list.
    pub fn allows(&self, mime: &str) -> bool {
        self.allowed_mime_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(mime))
    }
}
