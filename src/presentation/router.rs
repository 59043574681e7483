use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::ModelClient;
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    analyze_handler, get_warranty_handler, health_handler, reanalyze_handler, root_handler,
};
use crate::presentation::state::AppState;

pub fn create_router<M: ModelClient + 'static>(state: AppState<M>) -> Router {
    let cors = cors_layer(&state.settings.cors.allowed_origins);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    // Multipart bodies carry the whole document; leave headroom above the
    // upload limit for the surrounding form encoding.
    let body_limit = state.settings.upload.max_file_size_bytes as usize + 1_048_576;

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler::<M>))
        .route("/analyze-warranty", post(analyze_handler::<M>))
        .route(
            "/warranty-contract/{warranty_id}",
            get(get_warranty_handler::<M>),
        )
        .route("/reanalyze", post(reanalyze_handler::<M>))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
