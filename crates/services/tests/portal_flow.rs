use std::sync::Arc;

use async_trait::async_trait;
use portal_core::model::{
    Client, ClientDraft, ClientId, FileKind, FinalRecordStatus, ModuleKey, ModuleSet, PhaseId,
    PhaseTemplate, ProductType, StepId, Uploader,
};
use portal_core::progress::visible_phases;
use portal_core::template::PendingDeletion;
use portal_core::time::fixed_clock;
use services::{AppServices, ClientService, ClientServiceError, TemplateEdit};
use storage::repository::{ClientRepository, StorageError, TemplateRepository};
use storage::sqlite::SqliteRepository;

#[tokio::test]
async fn template_edits_only_reach_new_clients() {
    let url = "sqlite:file:memdb_portal_flow?mode=memory&cache=shared";
    let services = AppServices::sqlite(url, fixed_clock())
        .await
        .expect("services");
    let clients = services.clients();
    let templates = services.templates();

    let before = clients
        .create_client(&ClientDraft {
            name: "Ana Park".into(),
            email: "ana@example.com".into(),
            product: ProductType::Zeus,
            modules: ModuleSet::new(),
        })
        .await
        .expect("create first client");
    assert_eq!(before.phases.len(), 5);

    templates
        .apply(&TemplateEdit::AddPhase {
            name: "Permit Phase".into(),
            modules: ModuleSet::new(),
        })
        .await
        .expect("add phase");
    templates
        .confirm_deletion(PendingDeletion::Phase {
            phase_id: PhaseId::new("vetting"),
        })
        .await
        .expect("delete phase");

    let after = clients
        .create_client(&ClientDraft {
            name: "Ben Ortiz".into(),
            email: "ben@example.com".into(),
            product: ProductType::Hestia,
            modules: ModuleSet::from([ModuleKey::Inspection]),
        })
        .await
        .expect("create second client");

    let names: Vec<_> = after.phases.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Inspection & Warranty Phase", "Permit Phase"]);

    let reloaded = clients
        .get_client(&before.id)
        .await
        .expect("get")
        .expect("first client still stored");
    assert_eq!(reloaded.phases, before.phases);
}

#[tokio::test]
async fn client_journey_through_the_final_record() {
    let services = AppServices::in_memory_seeded(fixed_clock()).expect("seeded services");
    let sessions = services.sessions();
    let clients = services.clients();

    let (session, client) = sessions.login_demo_client().await.expect("demo login");
    let id = session.client_id().cloned().expect("client session");
    assert_eq!(client.progress, 20);
    assert_eq!(visible_phases(&client).len(), 5);

    let uploaded = clients
        .record_file(&id, Uploader::Client, "permit.pdf", FileKind::Document, 10 * 1024)
        .await
        .expect("upload");
    assert_eq!(uploaded.client_files.len(), 4);

    let requested = clients.request_final_record(&id).await.expect("request");
    assert_eq!(requested.final_record_status, FinalRecordStatus::Requested);

    sessions.logout(session);
    let admin = sessions.login_admin();
    assert!(admin.is_admin());

    let generated = clients
        .set_final_record_status(&id, FinalRecordStatus::Generated)
        .await
        .expect("generate");
    let delivered = clients
        .set_final_record_status(&id, FinalRecordStatus::Delivered)
        .await
        .expect("deliver");
    assert_eq!(generated.final_record_status, FinalRecordStatus::Generated);
    assert_eq!(delivered.final_record_status, FinalRecordStatus::Delivered);
}

#[tokio::test]
async fn sqlite_progress_survives_reconnect() {
    let url = "sqlite:file:memdb_portal_reconnect?mode=memory&cache=shared";
    let keep_alive = SqliteRepository::connect(url).await.expect("connect");

    let services = AppServices::sqlite(url, fixed_clock()).await.expect("services");
    let created = services
        .clients()
        .create_client(&ClientDraft {
            name: "Cleo Hart".into(),
            email: "cleo@example.com".into(),
            product: ProductType::Zeus,
            modules: ModuleSet::new(),
        })
        .await
        .expect("create");
    services
        .clients()
        .toggle_step(&created.id, &PhaseId::new("review"), &StepId::new("r1"))
        .await
        .expect("toggle");

    let reopened = AppServices::sqlite(url, fixed_clock()).await.expect("reopen");
    let stored = reopened
        .clients()
        .get_client(&created.id)
        .await
        .expect("get")
        .expect("stored");
    assert_eq!(stored.progress, 5);
    drop(keep_alive);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn simultaneous_toggles_on_one_client_both_land() {
    let url = "sqlite:file:memdb_portal_toggles?mode=memory&cache=shared";
    let services = AppServices::sqlite(url, fixed_clock()).await.expect("services");
    let clients = services.clients();
    let created = clients
        .create_client(&ClientDraft {
            name: "Dana Wells".into(),
            email: "dana@example.com".into(),
            product: ProductType::Zeus,
            modules: ModuleSet::new(),
        })
        .await
        .expect("create");
    let vetting = PhaseId::new("vetting");
    let design = PhaseId::new("design");

    for round in 0..20 {
        let v1 = StepId::new("v1");
        let d1 = StepId::new("d1");
        let (left, right) = tokio::join!(
            clients.toggle_step(&created.id, &vetting, &v1),
            clients.toggle_step(&created.id, &design, &d1),
        );
        left.expect("toggle vetting");
        right.expect("toggle design");

        let stored = clients
            .get_client(&created.id)
            .await
            .expect("get")
            .expect("stored");
        let done = |phase: &PhaseId| {
            stored
                .phases
                .iter()
                .find(|p| &p.id == phase)
                .map(|p| p.steps[0].completed)
        };
        let expected = round % 2 == 0;
        assert_eq!(done(&vetting), Some(expected), "round {round}");
        assert_eq!(done(&design), Some(expected), "round {round}");
    }
}

struct BrokenRepository;

#[async_trait]
impl ClientRepository for BrokenRepository {
    async fn list_clients(&self) -> Result<Vec<Client>, StorageError> {
        Err(StorageError::Connection("offline".into()))
    }

    async fn get_client(&self, _id: &ClientId) -> Result<Option<Client>, StorageError> {
        Err(StorageError::Connection("offline".into()))
    }

    async fn insert_client(&self, _client: &Client) -> Result<(), StorageError> {
        Err(StorageError::Connection("offline".into()))
    }

    async fn upsert_client(&self, _client: &Client) -> Result<(), StorageError> {
        Err(StorageError::Connection("offline".into()))
    }
}

#[async_trait]
impl TemplateRepository for BrokenRepository {
    async fn load_templates(&self) -> Result<Vec<PhaseTemplate>, StorageError> {
        Err(StorageError::Connection("offline".into()))
    }

    async fn replace_templates(&self, _templates: &[PhaseTemplate]) -> Result<(), StorageError> {
        Err(StorageError::Connection("offline".into()))
    }
}

#[tokio::test]
async fn storage_failures_surface_as_errors() {
    let repo = Arc::new(BrokenRepository);
    let service = ClientService::new(fixed_clock(), repo.clone(), repo);

    let err = service
        .toggle_step(&ClientId::new("client1"), &PhaseId::new("vetting"), &StepId::new("v1"))
        .await
        .expect_err("storage is offline");
    assert!(matches!(err, ClientServiceError::Storage(StorageError::Connection(_))));
}
