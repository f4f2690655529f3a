//! Observability setup shared by both binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "lead_search=debug,static_server=debug,tower_http=debug";

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over `default_filter`. Calling this twice
/// returns an error instead of panicking.
pub fn init_tracing(default_filter: &str) -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;
    Ok(())
}
