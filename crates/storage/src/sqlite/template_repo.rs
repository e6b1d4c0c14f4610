use async_trait::async_trait;
use chrono::Utc;
use portal_core::model::PhaseTemplate;
use portal_core::template::default_phase_templates;
use sqlx::Row;

use super::SqliteRepository;
use super::mapping::{decode_templates, encode_templates, ser};
use crate::repository::{StorageError, TemplateRepository};

#[async_trait]
impl TemplateRepository for SqliteRepository {
    /// Falls back to the default templates until a snapshot has been saved.
    async fn load_templates(&self) -> Result<Vec<PhaseTemplate>, StorageError> {
        let row = sqlx::query("SELECT body FROM phase_templates WHERE id = 1")
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let Some(row) = row else {
            return Ok(default_phase_templates());
        };
        let body: String = row.try_get("body").map_err(ser)?;
        decode_templates(&body)
    }

    async fn replace_templates(&self, templates: &[PhaseTemplate]) -> Result<(), StorageError> {
        let body = encode_templates(templates)?;
        sqlx::query(
            r"
            INSERT INTO phase_templates (id, body, updated_at)
            VALUES (1, ?1, ?2)
            ON CONFLICT(id) DO UPDATE SET
                body = excluded.body,
                updated_at = excluded.updated_at
            ",
        )
        .bind(body)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        tracing::debug!(phases = templates.len(), "stored template snapshot");
        Ok(())
    }
}
