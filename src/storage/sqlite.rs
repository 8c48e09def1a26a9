//! SQLite client storage implementation.

use crate::errors::StorageError;
use crate::oauth::types::ClientRecord;
use crate::storage::traits::{ClientStore, Result, client_key};
use async_trait::async_trait;
use sqlx::Row;
use sqlx::sqlite::SqlitePool;

/// SQLite implementation of [`ClientStore`].
///
/// One row per client in a key/value table; the record itself is JSON text
/// under the same namespaced key used by every other backend.
pub struct SqliteClientStore {
    pool: SqlitePool,
}

impl SqliteClientStore {
    /// Create a new SQLite client store
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the backing table if it does not exist
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS client_records (
                record_key TEXT PRIMARY KEY,
                record TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::DatabaseError(format!("Migration failed: {}", e)))?;
        Ok(())
    }
}

#[async_trait]
impl ClientStore for SqliteClientStore {
    async fn get_client(&self, client_id: &str) -> Result<Option<ClientRecord>> {
        let row = sqlx::query("SELECT record FROM client_records WHERE record_key = ?")
            .bind(client_key(client_id))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StorageError::DatabaseError(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let raw: String = row
            .try_get("record")
            .map_err(|e| StorageError::DatabaseError(e.to_string()))?;

        // An unreadable record reads as absent.
        match serde_json::from_str::<ClientRecord>(&raw) {
            Ok(record) => Ok(Some(record)),
            Err(err) => {
                tracing::warn!(?err, client_id, "discarding malformed client record");
                Ok(None)
            }
        }
    }

    async fn put_client(&self, record: &ClientRecord) -> Result<()> {
        let raw = serde_json::to_string(record)
            .map_err(|e| StorageError::SerializationFailed(e.to_string()))?;

        sqlx::query(
            "INSERT INTO client_records (record_key, record) VALUES (?, ?)
             ON CONFLICT(record_key) DO UPDATE SET record = excluded.record",
        )
        .bind(client_key(&record.client_id))
        .bind(raw)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn put_client_if_absent(&self, record: &ClientRecord) -> Result<bool> {
        let raw = serde_json::to_string(record)
            .map_err(|e| StorageError::SerializationFailed(e.to_string()))?;

        let result = sqlx::query(
            "INSERT INTO client_records (record_key, record) VALUES (?, ?)
             ON CONFLICT(record_key) DO NOTHING",
        )
        .bind(client_key(&record.client_id))
        .bind(raw)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() == 1)
    }
}
