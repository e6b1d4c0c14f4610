use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use portal_core::model::{Client, ClientId, PhaseTemplate};
use portal_core::template::default_phase_templates;
use thiserror::Error;

use crate::mock::{MockDataError, mock_clients};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for client records.
///
/// Writes replace the whole record; the last writer wins.
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// All clients in creation order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn list_clients(&self) -> Result<Vec<Client>, StorageError>;

    /// Fetch a client by id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read or the record is corrupt.
    async fn get_client(&self, id: &ClientId) -> Result<Option<Client>, StorageError>;

    /// Store a brand-new client at the end of the list.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the id is already taken.
    async fn insert_client(&self, client: &Client) -> Result<(), StorageError>;

    /// Replace an existing client, or append it if missing.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    async fn upsert_client(&self, client: &Client) -> Result<(), StorageError>;
}

/// Repository contract for the admin-managed template list.
#[async_trait]
pub trait TemplateRepository: Send + Sync {
    /// Current templates in display order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn load_templates(&self) -> Result<Vec<PhaseTemplate>, StorageError>;

    /// Replace the whole template list with a new snapshot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be stored.
    async fn replace_templates(&self, templates: &[PhaseTemplate]) -> Result<(), StorageError>;
}

/// In-memory repository that keeps clients in insertion order.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    clients: Arc<Mutex<Vec<Client>>>,
    templates: Arc<Mutex<Vec<PhaseTemplate>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::with_data(Vec::new(), default_phase_templates())
    }

    #[must_use]
    pub fn with_data(clients: Vec<Client>, templates: Vec<PhaseTemplate>) -> Self {
        Self {
            clients: Arc::new(Mutex::new(clients)),
            templates: Arc::new(Mutex::new(templates)),
        }
    }
}

#[async_trait]
impl ClientRepository for InMemoryRepository {
    async fn list_clients(&self) -> Result<Vec<Client>, StorageError> {
        let guard = self
            .clients
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn get_client(&self, id: &ClientId) -> Result<Option<Client>, StorageError> {
        let guard = self
            .clients
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.iter().find(|client| &client.id == id).cloned())
    }

    async fn insert_client(&self, client: &Client) -> Result<(), StorageError> {
        let mut guard = self
            .clients
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        if guard.iter().any(|existing| existing.id == client.id) {
            return Err(StorageError::Conflict);
        }
        guard.push(client.clone());
        Ok(())
    }

    async fn upsert_client(&self, client: &Client) -> Result<(), StorageError> {
        let mut guard = self
            .clients
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        match guard.iter_mut().find(|existing| existing.id == client.id) {
            Some(slot) => *slot = client.clone(),
            None => guard.push(client.clone()),
        }
        Ok(())
    }
}

#[async_trait]
impl TemplateRepository for InMemoryRepository {
    async fn load_templates(&self) -> Result<Vec<PhaseTemplate>, StorageError> {
        let guard = self
            .templates
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn replace_templates(&self, templates: &[PhaseTemplate]) -> Result<(), StorageError> {
        let mut guard = self
            .templates
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = templates.to_vec();
        Ok(())
    }
}

/// Aggregates client and template repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub clients: Arc<dyn ClientRepository>,
    pub templates: Arc<dyn TemplateRepository>,
}

impl Storage {
    /// Empty client list with the default templates.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_repo(InMemoryRepository::new())
    }

    /// The demo data set: three sample clients and the default templates.
    ///
    /// # Errors
    ///
    /// Returns `MockDataError` if the built-in sample records fail validation.
    pub fn in_memory_seeded() -> Result<Self, MockDataError> {
        let repo = InMemoryRepository::with_data(mock_clients()?, default_phase_templates());
        Ok(Self::from_repo(repo))
    }

    fn from_repo(repo: InMemoryRepository) -> Self {
        let clients: Arc<dyn ClientRepository> = Arc::new(repo.clone());
        let templates: Arc<dyn TemplateRepository> = Arc::new(repo);
        Self { clients, templates }
    }
}
