use crate::chat;
use crate::config::Config;
use crate::db_storage::LeadStorage;
use crate::errors::AppError;
use crate::models::*;
use crate::search::LeadQuery;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use sqlx::PgPool;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: PgPool,
    /// Application configuration.
    pub config: Config,
}

/// Health check endpoint.
///
/// Reports the service version and whether the lead store answers `SELECT 1`.
/// Responds 503 while the store is down so load balancers can drain the
/// instance.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service and lead store are up"),
        (status = 503, description = "Lead store unreachable")
    )
)]
pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<serde_json::Value>) {
    let storage = LeadStorage::new(state.db.clone());
    let (status, database) = match storage.ping().await {
        Ok(()) => (StatusCode::OK, "up"),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "down")
        }
    };

    (
        status,
        Json(json!({
            "status": if status == StatusCode::OK { "healthy" } else { "degraded" },
            "service": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "database": database,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}

/// GET /search
///
/// Case-insensitive substring search over the `leads` table. Every non-empty
/// query parameter adds one condition; conditions are conjoined. Parameter
/// names outside the allow-list are rejected with 400.
#[utoipa::path(
    get,
    path = "/search",
    params(
        ("name" = Option<String>, Query, description = "Substring of the lead name"),
        ("username" = Option<String>, Query, description = "Substring of the handle"),
        ("category" = Option<String>, Query, description = "Substring of the category"),
        ("location" = Option<String>, Query, description = "Substring of the location"),
        ("state" = Option<String>, Query, description = "Whole word in the location, e.g. FL"),
        ("email" = Option<String>, Query, description = "Substring of the email"),
        ("followers" = Option<String>, Query, description = "Substring of the follower count"),
        ("minFollowers" = Option<i64>, Query, description = "Minimum follower count")
    ),
    responses(
        (status = 200, description = "Up to 50 matching leads", body = [Lead]),
        (status = 400, description = "Unknown field or malformed value"),
        (status = 503, description = "Lead store unreachable")
    )
)]
pub async fn search_leads(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BTreeMap<String, String>>,
) -> Result<Json<Vec<Lead>>, AppError> {
    tracing::info!("GET /search - params: {:?}", params);

    let query = LeadQuery::from_params(params.iter().map(|(k, v)| (k.as_str(), v.as_str())))?;

    let storage = LeadStorage::new(state.db.clone());
    let leads = storage.search(&query).await?;

    tracing::info!(
        "Lead search returned {} row(s) for {} condition(s)",
        leads.len(),
        query.conditions().len()
    );

    Ok(Json(leads))
}

/// POST /chat
///
/// Turns the last message of a transcript into search filter suggestions.
#[utoipa::path(
    post,
    path = "/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Reply and suggested filters", body = ChatResponse),
        (status = 400, description = "Empty transcript")
    )
)]
pub async fn chat(Json(request): Json<ChatRequest>) -> Result<Json<ChatResponse>, AppError> {
    tracing::info!("POST /chat - {} message(s)", request.messages.len());

    let response = chat::respond(&request.messages, chat::DEFAULT_RULES)?;

    tracing::debug!("Chat filters: {:?}", response.filters);

    Ok(Json(response))
}
