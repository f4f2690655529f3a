use crate::config::Config;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

pub struct Database {
    pub pool: PgPool,
}

impl Database {
    /// Connects the pool and verifies the store answers.
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let pool = pool_options(config).connect(&config.database_url).await?;

        sqlx::query("SELECT 1").execute(&pool).await?;

        Ok(Self { pool })
    }

    /// Builds the pool without opening a connection; the first query connects.
    pub fn lazy(config: &Config) -> anyhow::Result<Self> {
        let pool = pool_options(config).connect_lazy(&config.database_url)?;
        Ok(Self { pool })
    }
}

fn pool_options(config: &Config) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_acquire_timeout_secs))
}
