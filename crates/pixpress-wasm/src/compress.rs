//! Compression bindings.
//!
//! # Example
//!
//! ```typescript
//! import { compress_image } from '@pixpress/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! try {
//!   const result = compress_image(bytes, file.type, { format: 'webp', quality: 80, width: 800 });
//!   const blob = new Blob([result.bytes()], { type: result.content_type });
//! } catch (e) {
//!   console.warn(e.kind, e.message);
//! }
//! ```

use pixpress_core::{
    handle, CompressionRequest, CompressionResult, Fault, PipelineConfig, PipelineError,
    RawOptions, UploadedFile,
};
use wasm_bindgen::prelude::*;

use crate::types::{JsCompressionResult, JsOptions};

/// Compress one image with the default pipeline configuration.
///
/// `options` may be `undefined`, `null` or an object with any of `quality`,
/// `format`, `width` and `height`, given as strings or numbers.
///
/// # Errors
///
/// Throws an `Error` whose `message` is safe to show and whose `kind` is one
/// of `MissingFile`, `UnsupportedType`, `TooLarge`, `DecodeError` or
/// `EncodeError`.
#[wasm_bindgen]
pub fn compress_image(
    bytes: &[u8],
    mime_type: &str,
    options: JsValue,
) -> Result<JsCompressionResult, JsValue> {
    let raw = parse_options(options)?;
    run(bytes, mime_type, raw)
        .map(JsCompressionResult::from)
        .map_err(|e| to_js_error(&e))
}

/// MIME types `compress_image` accepts.
#[wasm_bindgen]
pub fn supported_mime_types() -> Vec<String> {
    PipelineConfig::default().allowed_mime_types
}

fn run(bytes: &[u8], mime_type: &str, raw: RawOptions) -> Result<CompressionResult, PipelineError> {
    let request = CompressionRequest::new(UploadedFile::new(bytes.to_vec(), mime_type), raw);
    handle(request, &PipelineConfig::default())
}

fn parse_options(options: JsValue) -> Result<RawOptions, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(RawOptions::default());
    }
    let options: JsOptions = serde_wasm_bindgen::from_value(options)
        .map_err(|e| JsValue::from_str(&format!("Invalid compression options: {}", e)))?;
    Ok(options.into())
}

fn to_js_error(err: &PipelineError) -> JsValue {
    if err.fault() == Fault::Server {
        web_sys::console::error_1(&format!("pixpress: {:#}", err).into());
    }

    let error = js_sys::Error::new(&err.user_message());
    // Setting a property on a fresh Error object cannot fail.
    let _ = js_sys::Reflect::set(&error, &"kind".into(), &err.kind().as_str().into());
    error.into()
}


/// Tests that need a JavaScript host. Run with `wasm-pack test`.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn kind_of(err: &JsValue) -> String {
        js_sys::Reflect::get(err, &"kind".into())
            .unwrap()
            .as_string()
            .unwrap()
    }

    #[wasm_bindgen_test]
    fn test_compress_with_numeric_options() {
        let img = image::RgbImage::from_pixel(64, 32, image::Rgb([90, 120, 150]));
        let mut buf = std::io::Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png).unwrap();

        let options = js_sys::Object::new();
        js_sys::Reflect::set(&options, &"format".into(), &"jpeg".into()).unwrap();
        js_sys::Reflect::set(&options, &"width".into(), &JsValue::from_f64(32.0)).unwrap();

        let result = compress_image(buf.get_ref(), "image/png", options.into()).unwrap();
        assert_eq!(result.content_type(), "image/jpeg");
        assert_eq!((result.width(), result.height()), (32, 16));
    }

    #[wasm_bindgen_test]
    fn test_error_carries_kind() {
        let err = compress_image(&[], "image/png", JsValue::UNDEFINED)
            .err()
            .unwrap();
        assert_eq!(kind_of(&err), "DecodeError");

        let err = compress_image(b"hello", "text/plain", JsValue::NULL)
            .err()
            .unwrap();
        assert_eq!(kind_of(&err), "UnsupportedType");
    }
}
