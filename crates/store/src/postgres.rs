use async_trait::async_trait;
use sqlx::PgPool;

use crate::{Result, StoreError, store::DocumentStore};

const PRIMARY_KEY_CONSTRAINT: &str = "documents_pkey";

/// PostgreSQL-backed document store.
///
/// Documents live in a single `documents` table keyed by
/// `(collection, key)` with the body stored as JSONB.
#[derive(Clone)]
pub struct PostgresDocumentStore {
    pool: PgPool,
}

impl PostgresDocumentStore {
    /// Creates a new PostgreSQL document store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to `database_url` and creates a store over the new pool.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        Ok(Self::new(pool))
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    async fn put(&self, collection: &str, key: &str, value: serde_json::Value) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO documents (collection, key, value)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(collection)
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.constraint() == Some(PRIMARY_KEY_CONSTRAINT)
            {
                return StoreError::DuplicateKey {
                    collection: collection.to_string(),
                    key: key.to_string(),
                };
            }
            StoreError::Database(e)
        })?;

        tracing::debug!(collection, key, "document stored");
        Ok(())
    }

    async fn get(&self, collection: &str, key: &str) -> Result<Option<serde_json::Value>> {
        let value: Option<serde_json::Value> = sqlx::query_scalar(
            "SELECT value FROM documents WHERE collection = $1 AND key = $2",
        )
        .bind(collection)
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(value)
    }

    async fn count(&self, collection: &str) -> Result<u64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM documents WHERE collection = $1")
                .bind(collection)
                .fetch_one(&self.pool)
                .await?;

        Ok(count.max(0) as u64)
    }
}
