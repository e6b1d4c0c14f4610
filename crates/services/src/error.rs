//! Shared error types for the services crate.

use thiserror::Error;

use portal_core::model::{AttachmentError, ClientError, ClientId};
use portal_core::template::TemplateError;
use storage::mock::MockDataError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `ClientService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientServiceError {
    #[error("client not found: {0}")]
    UnknownClient(ClientId),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Attachment(#[from] AttachmentError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `TemplateService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TemplateServiceError {
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `SessionService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("client not found: {0}")]
    UnknownClient(ClientId),
    #[error("no client accounts exist yet")]
    NoClients,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    MockData(#[from] MockDataError),
}
