use std::sync::Arc;

use chrono::NaiveDateTime;
use portal_core::model::{
    Client, ClientDraft, ClientId, FileId, FileKind, FinalRecordStatus, MeetingId, MeetingLink,
    PhaseId, StepId, UploadedFile, Uploader,
};
use portal_core::progress;
use storage::repository::{ClientRepository, TemplateRepository};
use tokio::sync::Mutex;

use crate::Clock;
use crate::error::ClientServiceError;

/// Read-modify-write operations over client records.
///
/// Each mutation loads the current snapshot, applies a pure domain function and
/// stores the whole record back. The updated client is returned to the caller.
/// Mutations are serialised so a snapshot is never written over a newer one.
#[derive(Clone)]
pub struct ClientService {
    clock: Clock,
    clients: Arc<dyn ClientRepository>,
    templates: Arc<dyn TemplateRepository>,
    write_lock: Arc<Mutex<()>>,
}

impl ClientService {
    #[must_use]
    pub fn new(
        clock: Clock,
        clients: Arc<dyn ClientRepository>,
        templates: Arc<dyn TemplateRepository>,
    ) -> Self {
        Self {
            clock,
            clients,
            templates,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Clients whose name or email contains `query`, in creation order.
    ///
    /// # Errors
    ///
    /// Returns `ClientServiceError::Storage` if repository access fails.
    pub async fn list_clients(&self, query: &str) -> Result<Vec<Client>, ClientServiceError> {
        let clients = self.clients.list_clients().await?;
        tracing::debug!(total = clients.len(), query, "listing clients");
        Ok(clients
            .into_iter()
            .filter(|client| client.matches_search(query))
            .collect())
    }

    /// Fetch a client by id.
    ///
    /// Returns `Ok(None)` when the client does not exist.
    ///
    /// # Errors
    ///
    /// Returns `ClientServiceError::Storage` if repository access fails.
    pub async fn get_client(&self, id: &ClientId) -> Result<Option<Client>, ClientServiceError> {
        Ok(self.clients.get_client(id).await?)
    }

    /// Validate a draft, clone the current templates into it and store it.
    ///
    /// # Errors
    ///
    /// Returns `ClientServiceError::Client` if the draft fails validation.
    /// Returns `ClientServiceError::Storage` if persistence fails.
    pub async fn create_client(&self, draft: &ClientDraft) -> Result<Client, ClientServiceError> {
        let validated = draft.validate().inspect_err(|err| {
            tracing::warn!(%err, "rejected new client");
        })?;
        let templates = self.templates.load_templates().await?;
        let client = validated.assign_id(ClientId::generate(), &templates);
        self.clients.insert_client(&client).await?;
        tracing::info!(
            client_id = %client.id,
            product = client.product.code(),
            phases = client.phases.len(),
            "created client"
        );
        Ok(client)
    }

    /// Flip one step and recompute the client's progress.
    ///
    /// # Errors
    ///
    /// Returns `ClientServiceError::UnknownClient` if the client does not exist.
    /// Returns `ClientServiceError::Storage` if repository access fails.
    pub async fn toggle_step(
        &self,
        client_id: &ClientId,
        phase_id: &PhaseId,
        step_id: &StepId,
    ) -> Result<Client, ClientServiceError> {
        let client = self
            .update(client_id, |client| {
                Ok(progress::toggle_step(client, phase_id, step_id))
            })
            .await?;
        tracing::info!(
            client_id = %client_id,
            phase_id = %phase_id,
            step_id = %step_id,
            progress = client.progress,
            "toggled step"
        );
        Ok(client)
    }

    /// # Errors
    ///
    /// Returns `ClientServiceError::UnknownClient` if the client does not exist.
    /// Returns `ClientServiceError::Storage` if repository access fails.
    pub async fn set_step_description(
        &self,
        client_id: &ClientId,
        phase_id: &PhaseId,
        step_id: &StepId,
        description: &str,
    ) -> Result<Client, ClientServiceError> {
        self.update(client_id, |client| {
            Ok(progress::set_step_description(
                client,
                phase_id,
                step_id,
                description,
            ))
        })
        .await
    }

    /// # Errors
    ///
    /// Returns `ClientServiceError::UnknownClient` if the client does not exist.
    /// Returns `ClientServiceError::Storage` if repository access fails.
    pub async fn set_phase_description(
        &self,
        client_id: &ClientId,
        phase_id: &PhaseId,
        description: &str,
    ) -> Result<Client, ClientServiceError> {
        self.update(client_id, |client| {
            Ok(progress::set_phase_description(client, phase_id, description))
        })
        .await
    }

    /// Client-side request for the Final Project Record.
    ///
    /// # Errors
    ///
    /// Returns `ClientServiceError::UnknownClient` if the client does not exist.
    /// Returns `ClientServiceError::Storage` if repository access fails.
    pub async fn request_final_record(
        &self,
        client_id: &ClientId,
    ) -> Result<Client, ClientServiceError> {
        let client = self
            .update(client_id, |client| Ok(client.request_final_record()))
            .await?;
        tracing::info!(client_id = %client_id, "final record requested");
        Ok(client)
    }

    /// Write the record status. Out-of-order writes are accepted and logged.
    ///
    /// # Errors
    ///
    /// Returns `ClientServiceError::UnknownClient` if the client does not exist.
    /// Returns `ClientServiceError::Storage` if repository access fails.
    pub async fn set_final_record_status(
        &self,
        client_id: &ClientId,
        status: FinalRecordStatus,
    ) -> Result<Client, ClientServiceError> {
        self.update(client_id, |client| {
            let current = client.final_record_status;
            if current != status && !current.can_advance_to(status) {
                tracing::warn!(
                    client_id = %client_id,
                    from = current.key(),
                    to = status.key(),
                    "final record status written out of order"
                );
            }
            Ok(client.with_final_record_status(status))
        })
        .await
    }

    /// # Errors
    ///
    /// Returns `ClientServiceError::Attachment` if the title or url is invalid.
    /// Returns `ClientServiceError::UnknownClient` if the client does not exist.
    /// Returns `ClientServiceError::Storage` if repository access fails.
    pub async fn add_meeting_link(
        &self,
        client_id: &ClientId,
        title: &str,
        url: &str,
        scheduled_for: NaiveDateTime,
    ) -> Result<Client, ClientServiceError> {
        let link = MeetingLink::new(MeetingId::generate(), title, url, scheduled_for)?;
        self.update(client_id, |client| Ok(client.with_meeting_link(link)))
            .await
    }

    /// # Errors
    ///
    /// Returns `ClientServiceError::UnknownClient` if the client does not exist.
    /// Returns `ClientServiceError::Storage` if repository access fails.
    pub async fn remove_meeting_link(
        &self,
        client_id: &ClientId,
        meeting_id: &MeetingId,
    ) -> Result<Client, ClientServiceError> {
        self.update(client_id, |client| Ok(client.without_meeting_link(meeting_id)))
            .await
    }

    /// Record metadata for an uploaded file, dated today by the service clock.
    ///
    /// # Errors
    ///
    /// Returns `ClientServiceError::Attachment` if the file name is blank.
    /// Returns `ClientServiceError::UnknownClient` if the client does not exist.
    /// Returns `ClientServiceError::Storage` if repository access fails.
    pub async fn record_file(
        &self,
        client_id: &ClientId,
        uploaded_by: Uploader,
        name: &str,
        kind: FileKind,
        size_bytes: u64,
    ) -> Result<Client, ClientServiceError> {
        let file = UploadedFile::new(
            FileId::generate(),
            name,
            kind,
            uploaded_by,
            self.clock.today(),
            size_bytes,
        )?;
        let file_id = file.id.clone();
        let client = self
            .update(client_id, |client| Ok(client.with_file(file)))
            .await?;
        tracing::info!(client_id = %client_id, file_id = %file_id, ?uploaded_by, "recorded file");
        Ok(client)
    }

    /// # Errors
    ///
    /// Returns `ClientServiceError::UnknownClient` if the client does not exist.
    /// Returns `ClientServiceError::Storage` if repository access fails.
    pub async fn remove_file(
        &self,
        client_id: &ClientId,
        file_id: &FileId,
    ) -> Result<Client, ClientServiceError> {
        self.update(client_id, |client| Ok(client.without_file(file_id)))
            .await
    }

    async fn update<F>(&self, client_id: &ClientId, apply: F) -> Result<Client, ClientServiceError>
    where
        F: FnOnce(&Client) -> Result<Client, ClientServiceError> + Send,
    {
        let _guard = self.write_lock.lock().await;
        let current = self
            .clients
            .get_client(client_id)
            .await?
            .ok_or_else(|| ClientServiceError::UnknownClient(client_id.clone()))?;
        let next = apply(&current)?;
        if next != current {
            self.clients.upsert_client(&next).await?;
        }
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;
    use portal_core::model::{ClientError, ModuleKey, ModuleSet, ProductType};
    use portal_core::time::fixed_clock;
    use storage::repository::{InMemoryRepository, Storage};

    fn service() -> ClientService {
        let storage = Storage::in_memory_seeded().unwrap();
        ClientService::new(fixed_clock(), storage.clients, storage.templates)
    }

    #[tokio::test]
    async fn list_filters_by_query() {
        let service = service();
        let all = service.list_clients("").await.unwrap();
        assert_eq!(all.len(), 3);

        let chen = service.list_clients("CHEN").await.unwrap();
        assert_eq!(chen.len(), 1);
        assert_eq!(chen[0].name, "Michael Chen");

        let by_email = service.list_clients("rodriguez@").await.unwrap();
        assert_eq!(by_email[0].id, ClientId::new("client3"));
    }

    #[tokio::test]
    async fn create_hestia_client_clones_matching_templates() {
        let service = service();
        let client = service
            .create_client(&ClientDraft {
                name: "Nora Diaz".into(),
                email: "nora@example.com".into(),
                product: ProductType::Hestia,
                modules: ModuleSet::from([ModuleKey::Design]),
            })
            .await
            .unwrap();

        assert!(client.id.as_str().starts_with("client_"));
        let names: Vec<_> = client.phases.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(names, vec!["design"]);
        assert_eq!(service.list_clients("").await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn invalid_draft_creates_nothing() {
        let repo = Arc::new(InMemoryRepository::new());
        let service = ClientService::new(fixed_clock(), repo.clone(), repo);
        let err = service
            .create_client(&ClientDraft {
                name: "Nora".into(),
                email: "nora@example.com".into(),
                product: ProductType::Hestia,
                modules: ModuleSet::new(),
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ClientServiceError::Client(ClientError::NoModulesSelected)
        ));
        assert!(service.list_clients("").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn toggle_persists_progress() {
        let service = service();
        let id = ClientId::new("client1");
        let updated = service
            .toggle_step(&id, &PhaseId::new("vetting"), &StepId::new("v3"))
            .await
            .unwrap();
        assert_eq!(updated.progress, 25);

        let stored = service.get_client(&id).await.unwrap().unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn description_overrides_stay_on_the_client() {
        let storage = Storage::in_memory_seeded().unwrap();
        let templates = Arc::clone(&storage.templates);
        let service = ClientService::new(fixed_clock(), storage.clients, storage.templates);
        let before = templates.load_templates().await.unwrap();
        let id = ClientId::new("client1");
        let vetting = PhaseId::new("vetting");

        service
            .set_step_description(&id, &vetting, &StepId::new("v1"), " Two references called ")
            .await
            .unwrap();
        let updated = service
            .set_phase_description(&id, &vetting, "Checked by our team")
            .await
            .unwrap();

        let stored = service.get_client(&id).await.unwrap().unwrap();
        assert_eq!(stored, updated);
        let phase = stored.phases.iter().find(|p| p.id == vetting).unwrap();
        assert_eq!(phase.description.as_deref(), Some("Checked by our team"));
        assert_eq!(
            phase.steps[0].description.as_deref(),
            Some("Two references called")
        );
        assert_eq!(templates.load_templates().await.unwrap(), before);
    }

    #[tokio::test]
    async fn unknown_client_is_reported() {
        let service = service();
        let err = service
            .request_final_record(&ClientId::new("ghost"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientServiceError::UnknownClient(_)));
    }

    #[tokio::test]
    async fn status_writes_are_permissive() {
        let service = service();
        let id = ClientId::new("client1");
        let delivered = service
            .set_final_record_status(&id, FinalRecordStatus::Delivered)
            .await
            .unwrap();
        assert_eq!(delivered.final_record_status, FinalRecordStatus::Delivered);
    }

    #[tokio::test]
    async fn files_are_dated_by_the_clock() {
        let service = service();
        let id = ClientId::new("client2");
        let updated = service
            .record_file(&id, Uploader::Admin, "review_notes.pdf", FileKind::Document, 2048)
            .await
            .unwrap();
        let file = updated.admin_files.last().unwrap();
        assert_eq!(file.uploaded_at, NaiveDate::from_ymd_opt(2026, 1, 26).unwrap());
        assert_eq!(updated.admin_files.len(), 2);

        let removed = service.remove_file(&id, &file.id).await.unwrap();
        assert_eq!(removed.admin_files.len(), 1);
    }

    #[tokio::test]
    async fn meeting_links_validate_urls() {
        let service = service();
        let id = ClientId::new("client3");
        let at = NaiveDate::from_ymd_opt(2026, 2, 3)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();

        let err = service
            .add_meeting_link(&id, "Warranty Call", "not a url", at)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientServiceError::Attachment(_)));

        let updated = service
            .add_meeting_link(&id, "Warranty Call", "https://zoom.us/j/1", at)
            .await
            .unwrap();
        assert_eq!(updated.meeting_links.len(), 2);

        let link_id = updated.meeting_links[1].id.clone();
        let removed = service.remove_meeting_link(&id, &link_id).await.unwrap();
        assert_eq!(removed.meeting_links.len(), 1);
    }
}
