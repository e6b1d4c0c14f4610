use async_trait::async_trait;
use chrono::Utc;
use portal_core::model::{Client, ClientId};

use super::SqliteRepository;
use super::mapping::{encode_client, map_client_row};
use crate::repository::{ClientRepository, StorageError};

#[async_trait]
impl ClientRepository for SqliteRepository {
    async fn list_clients(&self) -> Result<Vec<Client>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, body
            FROM clients
            ORDER BY position ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut clients = Vec::with_capacity(rows.len());
        for row in rows {
            clients.push(map_client_row(&row)?);
        }
        Ok(clients)
    }

    async fn get_client(&self, id: &ClientId) -> Result<Option<Client>, StorageError> {
        let row = sqlx::query("SELECT id, body FROM clients WHERE id = ?1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        row.as_ref().map(map_client_row).transpose()
    }

    async fn insert_client(&self, client: &Client) -> Result<(), StorageError> {
        let body = encode_client(client)?;
        let res = sqlx::query(
            r"
            INSERT INTO clients (id, position, body, updated_at)
            VALUES (?1, (SELECT COALESCE(MAX(position), 0) + 1 FROM clients), ?2, ?3)
            ON CONFLICT(id) DO NOTHING
            ",
        )
        .bind(client.id.as_str())
        .bind(body)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        if res.rows_affected() == 0 {
            return Err(StorageError::Conflict);
        }
        tracing::debug!(client_id = %client.id, "inserted client row");
        Ok(())
    }

    async fn upsert_client(&self, client: &Client) -> Result<(), StorageError> {
        let body = encode_client(client)?;
        sqlx::query(
            r"
            INSERT INTO clients (id, position, body, updated_at)
            VALUES (?1, (SELECT COALESCE(MAX(position), 0) + 1 FROM clients), ?2, ?3)
            ON CONFLICT(id) DO UPDATE SET
                body = excluded.body,
                updated_at = excluded.updated_at
            ",
        )
        .bind(client.id.as_str())
        .bind(body)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        tracing::debug!(client_id = %client.id, "stored client row");
        Ok(())
    }
}
