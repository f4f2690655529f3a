//! Static asset server: serves `STATIC_ROOT` (default `.`) on `PORT` (default 8080)
//! with `Access-Control-Allow-Origin: *` on every response.

use lead_search::config::StaticConfig;
use lead_search::{obs, static_files};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    obs::init_tracing(obs::DEFAULT_LOG_FILTER)?;

    let config = StaticConfig::from_env()?;
    tracing::info!("Serving {}", config.root.display());

    let app = static_files::router(config.root.clone());

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Static server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
