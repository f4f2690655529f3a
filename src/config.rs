use serde::Deserialize;
use std::path::PathBuf;

/// Default port of the lead search API.
pub const DEFAULT_API_PORT: u16 = 3000;
/// Default port of the static asset server.
pub const DEFAULT_STATIC_PORT: u16 = 8080;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub db_max_connections: u32,
    pub db_acquire_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// `from_env` passes the process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            database_url: lookup("DATABASE_URL")
                .or_else(|| lookup("DB_URL"))
                .ok_or_else(|| {
                    anyhow::anyhow!("DATABASE_URL or DB_URL environment variable required")
                })
                .and_then(|url| {
                    if url.trim().is_empty() {
                        anyhow::bail!("DATABASE_URL cannot be empty");
                    }
                    if !url.starts_with("postgresql://") && !url.starts_with("postgres://") {
                        anyhow::bail!("DATABASE_URL must start with postgresql:// or postgres://");
                    }
                    Ok(url)
                })?,
            port: parse_port(lookup("PORT"), DEFAULT_API_PORT)?,
            db_max_connections: parse_positive(
                "DB_MAX_CONNECTIONS",
                lookup("DB_MAX_CONNECTIONS"),
                10,
            )?,
            db_acquire_timeout_secs: parse_positive(
                "DB_ACQUIRE_TIMEOUT_SECS",
                lookup("DB_ACQUIRE_TIMEOUT_SECS"),
                5,
            )?,
        };

        tracing::debug!("Database URL: {}", redact_database_url(&config.database_url));
        tracing::debug!(
            "Pool: max {} connections, {}s acquire timeout",
            config.db_max_connections,
            config.db_acquire_timeout_secs
        );
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }
}

/// Configuration of the static asset server.
#[derive(Debug, Clone)]
pub struct StaticConfig {
    pub port: u16,
    pub root: PathBuf,
}

impl StaticConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let root = lookup("STATIC_ROOT")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        if !root.is_dir() {
            anyhow::bail!("STATIC_ROOT {} is not a directory", root.display());
        }

        let config = Self {
            port: parse_port(lookup("PORT"), DEFAULT_STATIC_PORT)?,
            root,
        };

        tracing::debug!("Static root: {}", config.root.display());
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }
}

/// Strips the userinfo (`user:password@`) from a connection URL for logging.
///
/// Everything between `://` and the last `@` is replaced, so a password
/// containing `@` is still hidden.
pub fn redact_database_url(url: &str) -> String {
    let Some(scheme_end) = url.find("://") else {
        return "<redacted>".to_string();
    };
    let (scheme, rest) = url.split_at(scheme_end + 3);
    match rest.rfind('@') {
        Some(at) => format!("{}***{}", scheme, &rest[at..]),
        None => url.to_string(),
    }
}

fn parse_port(raw: Option<String>, default: u16) -> anyhow::Result<u16> {
    match raw.filter(|s| !s.trim().is_empty()) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse::<u16>()
            .ok()
            .filter(|port| *port != 0)
            .ok_or_else(|| anyhow::anyhow!("PORT must be a valid number between 1-65535")),
    }
}

fn parse_positive<T>(name: &str, raw: Option<String>, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr + PartialOrd + From<u8>,
{
    match raw.filter(|s| !s.trim().is_empty()) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse::<T>()
            .ok()
            .filter(|n| *n >= T::from(1))
            .ok_or_else(|| anyhow::anyhow!("{} must be a positive integer", name)),
    }
}
