//! HTTP surface of the lead search service.

use crate::handlers::{self, AppState};
use crate::models::{ChatMessage, ChatRequest, ChatResponse, Lead};
use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use utoipa::OpenApi;

/// Request bodies above this size are rejected with 413.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(OpenApi)]
#[openapi(
    paths(handlers::health, handlers::search_leads, handlers::chat),
    components(schemas(Lead, ChatMessage, ChatRequest, ChatResponse)),
    tags((name = "lead-search", description = "Lead search and chat filter suggestions"))
)]
pub struct ApiDoc;

/// Routes subject to rate limiting.
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/docs", get(serve_swagger_ui))
        .route("/api-docs/openapi.json", get(serve_openapi_spec))
        .route("/search", get(handlers::search_leads))
        .route("/chat", post(handlers::chat))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
}

/// Adds `/health`, binds state, and applies tracing and CORS to every route.
pub fn finish(api: Router<Arc<AppState>>, state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .merge(api)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// The complete application without rate limiting.
pub fn app(state: Arc<AppState>) -> Router {
    finish(api_routes(), state)
}

async fn serve_openapi_spec() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

async fn serve_swagger_ui() -> impl IntoResponse {
    let html = r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Lead Search API - Swagger UI</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
    <style>
        body { margin: 0; padding: 0; }
    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
        window.onload = function() {
            window.ui = SwaggerUIBundle({
                url: "/api-docs/openapi.json",
                dom_id: '#swagger-ui',
                deepLinking: true
            });
        };
    </script>
</body>
</html>
"#;
    (
        StatusCode::OK,
        [(axum::http::header::CONTENT_TYPE, "text/html; charset=utf-8")],
        html,
    )
}
