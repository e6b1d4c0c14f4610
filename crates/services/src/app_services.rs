use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::client_service::ClientService;
use crate::error::AppServicesError;
use crate::session::SessionService;
use crate::template_service::TemplateService;

/// Assembles the app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    clients: Arc<ClientService>,
    templates: Arc<TemplateService>,
    sessions: Arc<SessionService>,
}

impl AppServices {
    #[must_use]
    pub fn new(storage: &Storage, clock: Clock) -> Self {
        let clients = Arc::new(ClientService::new(
            clock,
            Arc::clone(&storage.clients),
            Arc::clone(&storage.templates),
        ));
        let templates = Arc::new(TemplateService::new(Arc::clone(&storage.templates)));
        let sessions = Arc::new(SessionService::new(Arc::clone(&storage.clients)));
        Self {
            clients,
            templates,
            sessions,
        }
    }

    /// Build services over the in-memory demo data set.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::MockData` if the sample records fail validation.
    pub fn in_memory_seeded(clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::in_memory_seeded()?;
        Ok(Self::new(&storage, clock))
    }

    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Sqlite` if the database cannot be opened or migrated.
    pub async fn sqlite(db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::new(&storage, clock))
    }

    #[must_use]
    pub fn clients(&self) -> Arc<ClientService> {
        Arc::clone(&self.clients)
    }

    #[must_use]
    pub fn templates(&self) -> Arc<TemplateService> {
        Arc::clone(&self.templates)
    }

    #[must_use]
    pub fn sessions(&self) -> Arc<SessionService> {
        Arc::clone(&self.sessions)
    }
}
