use portal_core::model::{Client, PhaseTemplate};
use serde::{Deserialize, Serialize};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::repository::StorageError;

/// Bumped whenever the persisted JSON shape changes incompatibly.
pub(crate) const DOCUMENT_VERSION: u32 = 1;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn encode_client(client: &Client) -> Result<String, StorageError> {
    serde_json::to_string(client).map_err(ser)
}

pub(crate) fn map_client_row(row: &SqliteRow) -> Result<Client, StorageError> {
    let id: String = row.try_get("id").map_err(ser)?;
    let body: String = row.try_get("body").map_err(ser)?;
    let client: Client = serde_json::from_str(&body).map_err(ser)?;
    if client.id.as_str() != id {
        return Err(StorageError::Serialization(format!(
            "client row {id} holds record {}",
            client.id
        )));
    }
    Ok(client)
}

#[derive(Serialize, Deserialize)]
struct TemplateDocument {
    version: u32,
    phases: Vec<PhaseTemplate>,
}

pub(crate) fn encode_templates(templates: &[PhaseTemplate]) -> Result<String, StorageError> {
    serde_json::to_string(&TemplateDocument {
        version: DOCUMENT_VERSION,
        phases: templates.to_vec(),
    })
    .map_err(ser)
}

pub(crate) fn decode_templates(body: &str) -> Result<Vec<PhaseTemplate>, StorageError> {
    let doc: TemplateDocument = serde_json::from_str(body).map_err(ser)?;
    if doc.version != DOCUMENT_VERSION {
        return Err(StorageError::Serialization(format!(
            "unsupported template document version {}",
            doc.version
        )));
    }
    Ok(doc.phases)
}
