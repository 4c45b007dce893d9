//! Database connection and table management.

use crate::error::Result;
use crate::schema;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// Main database handle.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open or create a database at the given sqlx URL
    /// (e.g. `sqlite://data/workwave.db`).
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await?;

        tracing::debug!(url, "sqlite pool opened");
        Ok(Self { pool })
    }

    /// A private, initialized in-memory database.
    ///
    /// Every SQLite memory connection is its own database, so the pool is
    /// pinned to a single connection that is never recycled.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.initialize().await?;
        Ok(db)
    }

    /// Get the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create every table and index that does not exist yet.
    pub async fn initialize(&self) -> Result<()> {
        for statement in schema::CREATE_STATEMENTS {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    async fn count_rows(&self, table: &str) -> Result<u64> {
        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&self.pool)
            .await?;
        Ok(count as u64)
    }

    /// Get table statistics.
    pub async fn stats(&self) -> Result<DatabaseStats> {
        Ok(DatabaseStats {
            users: self.count_rows(schema::TABLE_USERS).await?,
            admins: self.count_rows(schema::TABLE_ADMINS).await?,
            businesses: self.count_rows(schema::TABLE_BUSINESSES).await?,
            services: self.count_rows(schema::TABLE_SERVICES).await?,
            bookings: self.count_rows(schema::TABLE_BOOKINGS).await?,
            reviews: self.count_rows(schema::TABLE_REVIEWS).await?,
        })
    }
}

/// Database statistics.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct DatabaseStats {
    pub users: u64,
    pub admins: u64,
    pub businesses: u64,
    pub services: u64,
    pub bookings: u64,
    pub reviews: u64,
}
