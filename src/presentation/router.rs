use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{health_handler, upload_handler};
use crate::presentation::state::AppState;

/// Headroom for multipart boundaries and part headers, on top of the
/// configured file size cap.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn create_router(state: AppState) -> Router {
    // Axum's stock body limit is 2 MB, well under the configured upload
    // cap; without raising it, any larger upload dies while the multipart
    // body is read instead of reaching the handler's size check.
    let body_limit =
        DefaultBodyLimit::max(state.settings.max_upload_bytes() + MULTIPART_OVERHEAD_BYTES);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    // ServeDir answers `/` with the directory's index.html and `/<path>`
    // with the file at that relative path, 404 otherwise.
    let static_files = ServeDir::new(&state.settings.static_files.dir);

    Router::new()
        .route("/health", get(health_handler))
        .route("/upload", post(upload_handler))
        .fallback_service(static_files)
        .layer(body_limit)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
