use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};

use lead_search::api;
use lead_search::config::Config;
use lead_search::db::Database;
use lead_search::handlers::AppState;
use lead_search::obs;

/// Main entry point for the lead search API.
///
/// Initializes tracing, loads configuration, opens the database pool, and
/// serves `/search`, `/chat` and `/health`.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    obs::init_tracing(obs::DEFAULT_LOG_FILTER)?;

    let config = Config::from_env()?;
    tracing::info!("Configuration loaded successfully");

    let db = Database::new(&config).await?;
    tracing::info!(
        "Database connection pool established ({} max connections)",
        config.db_max_connections
    );

    let port = config.port;
    let app_state = Arc::new(AppState {
        db: db.pool.clone(),
        config,
    });

    // 10 requests/second per IP, burst of 20
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(10)
            .burst_size(20)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .context("Invalid rate limiter configuration")?,
    );

    // /health stays outside the rate limiter
    let protected_routes = api::api_routes().layer(GovernorLayer {
        config: governor_conf,
    });
    let app = api::finish(protected_routes, app_state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
