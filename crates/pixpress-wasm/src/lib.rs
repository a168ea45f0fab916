//! Pixpress WASM - WebAssembly bindings for the compression pipeline
//!
//! Runs `pixpress-core` in the browser so images can be compressed without
//! uploading them.
//!
//! # Module Structure
//!
//! - `compress` - `compress_image` and `supported_mime_types`
//! - `types` - JavaScript-facing result and options types
//!
//! # Usage
//!
//! ```typescript
//! import init, { compress_image } from '@pixpress/wasm';
//!
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const result = compress_image(bytes, file.type, { quality: 70 });
//! console.log(`${result.original_size} -> ${result.compressed_size} bytes`);
//! ```

use wasm_bindgen::prelude::*;

mod compress;
mod types;

pub use compress::{compress_image, supported_mime_types};
pub use types::{JsCompressionResult, JsField, JsOptions};

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
