use crate::errors::{AppError, ResultExt};
use crate::models::Lead;
use crate::search::LeadQuery;
use sqlx::PgPool;

/// Read access to the `leads` table.
///
/// Every call checks a connection out of the pool for the duration of one
/// statement; the connection returns to the pool when the call completes.
pub struct LeadStorage {
    pool: PgPool,
}

impl LeadStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Runs a validated search and returns at most `query.limit()` leads.
    pub async fn search(&self, query: &LeadQuery) -> Result<Vec<Lead>, AppError> {
        let mut builder = query.to_builder();
        tracing::debug!("Lead search SQL: {}", builder.sql());

        let leads = builder
            .build_query_as::<Lead>()
            .fetch_all(&self.pool)
            .await
            .context("Lead search failed")?;

        Ok(leads)
    }

    /// Round-trips `SELECT 1` to confirm the store is reachable.
    pub async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .context("Lead store health check failed")?;
        Ok(())
    }
}
