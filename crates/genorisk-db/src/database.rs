//! Database connection and schema management.

use genorisk_common::Result;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use crate::schema;

/// Main database handle.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL with a small pool sized for a demo service.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(url)
            .await?;
        Ok(Self { pool })
    }

    /// Wrap an existing pool (tests, shared pools).
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get the underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply the idempotent DDL. Safe to run on every startup.
    pub async fn initialize(&self) -> Result<()> {
        for statement in schema::DDL {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        info!("schema initialized ({} statements)", schema::DDL.len());
        Ok(())
    }
}
