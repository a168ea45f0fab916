//! Pixpress Server - HTTP front end for the compression pipeline
//!
//! Exposes `POST /api/compress` (multipart upload in, compressed image out)
//! and `GET /health`. All image work happens in `pixpress-core`; this crate
//! only moves bytes between HTTP and [`pixpress_core::handle`].

pub mod api;
pub mod config;
pub mod errors;
pub mod telemetry;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use pixpress_core::PipelineConfig;
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};

pub use config::{Args, Config};

/// Room for multipart boundaries, part headers and the text option fields.
pub const MULTIPART_OVERHEAD: u64 = 64 * 1024;

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<PipelineConfig>,
}

/// Build the router with all routes and middleware.
pub fn build_router(config: &Config) -> Router {
    let state = AppState {
        pipeline: Arc::new(config.pipeline.clone()),
    };

    let body_limit = config.pipeline.max_file_size.saturating_add(MULTIPART_OVERHEAD);
    let body_limit = usize::try_from(body_limit).unwrap_or(usize::MAX);

    let mut router = Router::new()
        .route(
            "/api/compress",
            post(api::compress_image).layer(DefaultBodyLimit::max(body_limit)),
        )
        .route("/health", get(api::health))
        .with_state(state);

    if config.cors_allow_any {
        router = router.layer(CorsLayer::permissive());
    }

    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    )
}

/// Bind, serve until `shutdown` resolves, then drain in-flight requests.
pub async fn serve<F>(config: Config, shutdown: F) -> anyhow::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let bind_addr = config.bind_address();
    let listener = TcpListener::bind(&bind_addr).await?;
    info!(
        max_file_size = config.pipeline.max_file_size,
        default_quality = config.pipeline.default_quality,
        "Pixpress listening on http://{}",
        bind_addr
    );

    axum::serve(listener, build_router(&config))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server stopped");
    Ok(())
}
