/**
 * Router Configuration
 *
 * Combines the chat API, the WebSocket endpoint and the health check into
 * a single router, then applies tracing and CORS.
 *
 * Request spans record the path only. The query string can carry the
 * WebSocket token and never reaches the logs.
 *
 * - `GET /health` - liveness probe, unauthenticated
 * - `GET /ws` - realtime connection, token checked on upgrade
 * - `/api/chat/...` - see [`chat_api_routes`]
 */

use axum::{
    body::Body,
    http::{header, HeaderValue, Method, Request},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::Span;

use crate::backend::error::BackendError;
use crate::backend::realtime::handle_chat_socket;
use crate::backend::routes::api_routes::chat_api_routes;
use crate::backend::server::state::AppState;

async fn health() -> &'static str {
    "ok"
}

async fn not_found() -> BackendError {
    BackendError::not_found("Route not found")
}

/// Span for one request, without the query string
fn request_span(request: &Request<Body>) -> Span {
    tracing::debug_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        version = ?request.version(),
    )
}

/// CORS policy: the configured origin, or any origin when unset.
fn cors_layer(cors_origin: Option<&str>) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    match cors_origin.map(HeaderValue::from_str) {
        Some(Ok(origin)) => layer.allow_origin(origin),
        Some(Err(e)) => {
            tracing::warn!("Ignoring invalid CORS origin: {}", e);
            layer.allow_origin(Any)
        }
        None => layer.allow_origin(Any),
    }
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, cors_origin: Option<&str>) -> Router<()> {
    Router::new()
        .route("/health", get(health))
        .route("/ws", get(handle_chat_socket))
        .nest("/api/chat", chat_api_routes(app_state.clone()))
        .fallback(not_found)
        .layer(cors_layer(cors_origin))
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .with_state(app_state)
}
