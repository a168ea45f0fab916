//! Pixpress Core - Image compression pipeline
//!
//! This crate turns one uploaded image into a smaller one. A request passes
//! through four stages:
//!
//! 1. [`validate`] checks presence, declared MIME type and size.
//! 2. [`resolve`] turns raw text options into typed [`CompressionOptions`].
//! 3. [`compress`] decodes, optionally shrinks, and re-encodes the image.
//! 4. [`handle`] runs the three in order and classifies failures.
//!
//! The crate is transport-agnostic; the HTTP service and the WASM bindings
//! both build a [`CompressionRequest`] and call [`handle`].

pub mod config;
pub mod decode;
pub mod encode;
pub mod engine;
pub mod handler;
pub mod options;
pub mod request;
pub mod validate;

pub use config::{ConfigError, PipelineConfig};
pub use engine::{compress, CompressionError, CompressionResult};
pub use handler::{handle, ErrorKind, Fault, PipelineError};
pub use options::{resolve, CompressionOptions, OutputFormat};
pub use request::{CompressionRequest, RawOptions, UploadedFile};
pub use validate::{validate, ValidationError};
