use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pixpress_core::{handler::INTERNAL_ERROR_MESSAGE, ErrorKind, Fault, PipelineError};
use thiserror::Error;

/// Everything a compression request can fail with over HTTP.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A stage of the pipeline rejected or failed the request.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// The multipart body could not be parsed.
    #[error("Malformed multipart body: {message}")]
    Multipart { message: String },

    /// The blocking compression task panicked or was cancelled.
    #[error("Compression worker failed: {message}")]
    Worker { message: String },
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Pipeline(e) => match e.kind() {
                ErrorKind::MissingFile | ErrorKind::UnsupportedType | ErrorKind::DecodeError => {
                    StatusCode::BAD_REQUEST
                }
                ErrorKind::TooLarge => StatusCode::PAYLOAD_TOO_LARGE,
                ErrorKind::EncodeError => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Multipart { .. } => StatusCode::BAD_REQUEST,
            ApiError::Worker { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message placed in the JSON body.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Pipeline(e) => e.user_message(),
            ApiError::Multipart { .. } => self.to_string(),
            ApiError::Worker { .. } => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Pipeline(e) if e.fault() == Fault::Client => {
                tracing::debug!(kind = %e.kind(), "Client error: {}", self);
            }
            ApiError::Pipeline(e) => {
                tracing::error!(kind = %e.kind(), "Internal service error: {:#}", self);
            }
            ApiError::Multipart { .. } => {
                tracing::debug!("Client error: {}", self);
            }
            ApiError::Worker { .. } => {
                tracing::error!("Internal service error: {:#}", self);
            }
        }

        let body = serde_json::json!({ "error": self.user_message() });
        (self.status_code(), Json(body)).into_response()
    }
}
