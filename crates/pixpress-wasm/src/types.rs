//! JavaScript-facing types.
//!
//! [`JsCompressionResult`] wraps a core `CompressionResult`; [`JsOptions`] is
//! the plain object callers pass as compression options.

use pixpress_core::{CompressionResult, RawOptions};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

/// A compressed image returned to JavaScript.
///
/// The encoded bytes live in WASM memory until `bytes()` copies them out as a
/// `Uint8Array`.
#[wasm_bindgen]
pub struct JsCompressionResult {
    inner: CompressionResult,
}

#[wasm_bindgen]
impl JsCompressionResult {
    /// Encoded image bytes (copied into a new `Uint8Array`).
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.bytes.clone()
    }

    /// MIME type of the encoded bytes, e.g. `image/webp`.
    #[wasm_bindgen(getter)]
    pub fn content_type(&self) -> String {
        self.inner.content_type().to_string()
    }

    /// Output format name: `jpeg`, `png` or `webp`.
    #[wasm_bindgen(getter)]
    pub fn format(&self) -> String {
        self.inner.format.as_str().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn original_size(&self) -> f64 {
        self.inner.original_size as f64
    }

    #[wasm_bindgen(getter)]
    pub fn compressed_size(&self) -> f64 {
        self.inner.compressed_size as f64
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Compressed size over original size.
    #[wasm_bindgen(getter)]
    pub fn ratio(&self) -> f64 {
        self.inner.ratio()
    }
}

impl From<CompressionResult> for JsCompressionResult {
    fn from(inner: CompressionResult) -> Self {
        Self { inner }
    }
}

/// One option value as JavaScript sends it: form-style text or a number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum JsField {
    Text(String),
    Number(f64),
}

impl JsField {
    /// The raw text the pipeline resolves, as a form field would carry it.
    pub fn into_text(self) -> String {
        match self {
            JsField::Text(text) => text,
            JsField::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", n as i64),
            JsField::Number(n) => n.to_string(),
        }
    }
}

/// Options object accepted by `compress_image`. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct JsOptions {
    pub quality: Option<JsField>,
    pub format: Option<JsField>,
    pub width: Option<JsField>,
    pub height: Option<JsField>,
}

impl From<JsOptions> for RawOptions {
    fn from(options: JsOptions) -> Self {
        RawOptions {
            quality: options.quality.map(JsField::into_text),
            format: options.format.map(JsField::into_text),
            width: options.width.map(JsField::into_text),
            height: options.height.map(JsField::into_text),
        }
    }
}
