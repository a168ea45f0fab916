//! Route handlers.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use pixpress_core::{handle, CompressionRequest, PipelineError, UploadedFile, ValidationError};

use crate::errors::ApiError;
use crate::AppState;

/// Multipart field carrying the image.
pub const IMAGE_FIELD: &str = "image";

pub const X_ORIGINAL_SIZE: HeaderName = HeaderName::from_static("x-original-size");
pub const X_COMPRESSED_SIZE: HeaderName = HeaderName::from_static("x-compressed-size");

const DEFAULT_PART_TYPE: &str = "application/octet-stream";

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// `POST /api/compress`
///
/// Reads the multipart body into a [`CompressionRequest`], runs the pipeline
/// on the blocking pool, and answers with the encoded image.
pub async fn compress_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    let request = match multipart {
        Ok(multipart) => read_request(multipart, &state).await?,
        Err(rejection) => {
            // Not a multipart body at all, so there is no file to find.
            tracing::debug!(reason = %rejection.body_text(), "Request is not multipart");
            CompressionRequest::default()
        }
    };

    let pipeline = state.pipeline.clone();
    let result = tokio::task::spawn_blocking(move || handle(request, &pipeline))
        .await
        .map_err(|e| ApiError::Worker {
            message: e.to_string(),
        })??;

    let headers = [
        (
            header::CONTENT_TYPE,
            HeaderValue::from_static(result.content_type()),
        ),
        (X_ORIGINAL_SIZE, HeaderValue::from(result.original_size)),
        (X_COMPRESSED_SIZE, HeaderValue::from(result.compressed_size)),
    ];

    Ok((StatusCode::OK, headers, result.into_bytes()).into_response())
}

/// Collect the `image` part and the text option fields.
async fn read_request(
    mut multipart: Multipart,
    state: &AppState,
) -> Result<CompressionRequest, ApiError> {
    let mut request = CompressionRequest::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, state))?
    {
        let name = field.name().unwrap_or("").to_string();

        if name == IMAGE_FIELD {
            let mime_type = field.content_type().unwrap_or(DEFAULT_PART_TYPE).to_string();
            let filename = field.file_name().map(str::to_string);
            let bytes = field.bytes().await.map_err(|e| multipart_error(e, state))?;

            // An empty file input in a browser form still sends the part.
            if bytes.is_empty() && filename.as_deref().map_or(true, str::is_empty) {
                continue;
            }

            let mut file = UploadedFile::new(bytes.to_vec(), mime_type);
            if let Some(filename) = filename {
                file = file.with_filename(filename);
            }
            request.file = Some(file);
        } else {
            let value = field.text().await.map_err(|e| multipart_error(e, state))?;
            if !request.options.set(&name, value) {
                tracing::debug!(field = %name, "Ignoring unknown form field");
            }
        }
    }

    Ok(request)
}

/// A body cut off by the size limit is reported as an oversized upload.
fn multipart_error(err: axum::extract::multipart::MultipartError, state: &AppState) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        let max_bytes = state.pipeline.max_file_size;
        // The exact size is unknown once the stream is cut off.
        return ApiError::Pipeline(PipelineError::Validation(ValidationError::TooLarge {
            size: max_bytes.saturating_add(1),
            max_bytes,
        }));
    }
    ApiError::Multipart {
        message: err.body_text(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_router;
    use crate::config::Config;
    use axum_test::multipart::{MultipartForm, Part};
    use axum_test::TestServer;
    use image::{DynamicImage, ImageFormat};
    use std::io::Cursor;

    fn test_server(config: Config) -> TestServer {
        TestServer::new(build_router(&config)).unwrap()
    }

    fn encoded(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(image::RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, ((x * y) % 251) as u8])
        }));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, format).unwrap();
        buf.into_inner()
    }

    fn image_part(bytes: Vec<u8>, mime: &str) -> Part {
        Part::bytes(bytes).file_name("photo").mime_type(mime)
    }

    fn error_message(response: &axum_test::TestResponse) -> String {
        let body: serde_json::Value = response.json();
        body["error"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let server = test_server(Config::default());
        let response = server.get("/health").await;
        response.assert_status_ok();
        response.assert_text("ok");
    }

    #[tokio::test]
    async fn test_compress_png_to_webp_with_resize() {
        let server = test_server(Config::default());
        let input = encoded(400, 200, ImageFormat::Png);
        let original_size = input.len();

        let response = server
            .post("/api/compress")
            .multipart(
                MultipartForm::new()
                    .add_part("image", image_part(input, "image/png"))
                    .add_text("format", "webp")
                    .add_text("quality", "70")
                    .add_text("width", "100"),
            )
            .await;

        response.assert_status_ok();
        assert_eq!(response.header(header::CONTENT_TYPE), "image/webp");
        assert_eq!(
            response.header(X_ORIGINAL_SIZE),
            original_size.to_string().as_str()
        );

        let body = response.as_bytes();
        assert_eq!(
            response.header(X_COMPRESSED_SIZE),
            body.len().to_string().as_str()
        );
        let decoded = image::load_from_memory(body).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (100, 50));
    }

    #[tokio::test]
    async fn test_defaults_to_jpeg() {
        let server = test_server(Config::default());
        let response = server
            .post("/api/compress")
            .multipart(
                MultipartForm::new()
                    .add_part("image", image_part(encoded(32, 32, ImageFormat::Png), "image/png")),
            )
            .await;

        response.assert_status_ok();
        assert_eq!(response.header(header::CONTENT_TYPE), "image/jpeg");
        assert_eq!(
            image::guess_format(response.as_bytes()).unwrap(),
            ImageFormat::Jpeg
        );
    }

    #[tokio::test]
    async fn test_missing_file() {
        let server = test_server(Config::default());
        let response = server
            .post("/api/compress")
            .multipart(MultipartForm::new().add_text("quality", "50"))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(error_message(&response), "No file uploaded");
    }

    #[tokio::test]
    async fn test_non_multipart_body_is_missing_file() {
        let server = test_server(Config::default());
        let response = server
            .post("/api/compress")
            .json(&serde_json::json!({ "image": "nope" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(error_message(&response), "No file uploaded");
    }

    #[tokio::test]
    async fn test_unsupported_type() {
        let server = test_server(Config::default());
        let response = server
            .post("/api/compress")
            .multipart(
                MultipartForm::new().add_part("image", image_part(b"hello".to_vec(), "text/plain")),
            )
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            error_message(&response),
            "Invalid file type. Only JPEG, PNG and WebP are allowed"
        );
    }

    #[tokio::test]
    async fn test_file_over_limit_within_body_limit() {
        let mut config = Config::default();
        config.pipeline.max_file_size = 512 * 1024;
        let server = test_server(config);

        // Over the file limit but under the body limit, so the validator decides.
        let response = server
            .post("/api/compress")
            .multipart(
                MultipartForm::new()
                    .add_part("image", image_part(vec![0u8; 520 * 1024], "image/jpeg")),
            )
            .await;

        response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            error_message(&response),
            "File too large. Maximum size is 0.50MB"
        );
    }

    #[tokio::test]
    async fn test_body_over_limit_is_too_large() {
        let server = test_server(Config::default());
        let response = server
            .post("/api/compress")
            .multipart(MultipartForm::new().add_part(
                "image",
                image_part(vec![0u8; 10 * 1024 * 1024], "image/jpeg"),
            ))
            .await;

        response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            error_message(&response),
            "File too large. Maximum size is 5MB"
        );
    }

    #[tokio::test]
    async fn test_undecodable_bytes() {
        let server = test_server(Config::default());
        let response = server
            .post("/api/compress")
            .multipart(
                MultipartForm::new()
                    .add_part("image", image_part(b"definitely not a jpeg".to_vec(), "image/jpeg")),
            )
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            error_message(&response),
            pixpress_core::handler::DECODE_ERROR_MESSAGE
        );
    }

    #[tokio::test]
    async fn test_encode_failure_is_generic_500() {
        let server = test_server(Config::default());
        // Decodes fine but is wider than lossy WebP allows.
        let wide = encoded(20_000, 1, ImageFormat::Png);
        let response = server
            .post("/api/compress")
            .multipart(
                MultipartForm::new()
                    .add_part("image", image_part(wide, "image/png"))
                    .add_text("format", "webp"),
            )
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            error_message(&response),
            pixpress_core::handler::INTERNAL_ERROR_MESSAGE
        );
    }
}
