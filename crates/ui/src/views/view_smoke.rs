use portal_core::model::{ClientId, FileKind, Uploader};

use super::test_harness::{ViewKind, client_session, seeded_app, setup_view_harness};

#[tokio::test(flavor = "current_thread")]
async fn login_view_smoke_renders_both_portals() {
    let mut harness = setup_view_harness(seeded_app(), ViewKind::Login, None);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Aegis Shield"), "missing brand in {html}");
    assert!(html.contains("Client Portal"), "missing client option in {html}");
    assert!(html.contains("Admin Console"), "missing admin option in {html}");
    assert!(html.contains("Contractor Vetting"), "missing feature tile in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn client_dashboard_smoke_renders_progress_and_phase() {
    let app = seeded_app();
    let session = client_session(&app, "client1").await;
    let mut harness = setup_view_harness(app, ViewKind::Client, Some(session));
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Welcome, Sarah!"), "missing greeting in {html}");
    assert!(html.contains("20%"), "missing progress in {html}");
    assert!(html.contains("Current Phase:"), "missing current phase in {html}");
    assert!(html.contains("Request Final Record"), "missing request button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn client_dashboard_smoke_lists_recorded_uploads() {
    let app = seeded_app();
    app.clients()
        .record_file(
            &ClientId::new("client1"),
            Uploader::Client,
            "kitchen_plan.pdf",
            FileKind::Document,
            2048,
        )
        .await
        .expect("record file");
    let session = client_session(&app, "client1").await;
    let mut harness = setup_view_harness(app, ViewKind::Client, Some(session));
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("kitchen_plan.pdf"), "missing upload in {html}");
    assert!(html.contains("2 KB"), "missing size in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn client_dashboard_without_session_shows_sign_in_link() {
    let mut harness = setup_view_harness(seeded_app(), ViewKind::Client, None);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Please sign in to continue."), "missing fallback in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn admin_view_smoke_lists_clients() {
    let app = seeded_app();
    let session = app.sessions().login_admin();
    let mut harness = setup_view_harness(app, ViewKind::Admin, Some(session));
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Aegis Shield Admin"), "missing header in {html}");
    assert!(html.contains("Select a Client"), "missing empty detail in {html}");
    assert!(html.contains("Sarah Johnson"), "missing client row in {html}");
    assert!(html.contains("Emily Rodriguez"), "missing client row in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn admin_view_rejects_client_session() {
    let app = seeded_app();
    let session = client_session(&app, "client2").await;
    let mut harness = setup_view_harness(app, ViewKind::Admin, Some(session));
    harness.settle().await;
    let html = harness.render();
    assert!(!html.contains("Aegis Shield Admin"), "admin leaked in {html}");
    assert!(html.contains("Please sign in to continue."), "missing fallback in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn template_manager_smoke_renders_phases() {
    let mut harness = setup_view_harness(seeded_app(), ViewKind::Templates, None);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Phase &amp; Step Templates") || html.contains("Phase & Step Templates"));
    assert!(html.contains("Vetting Phase"), "missing template in {html}");
    assert!(html.contains("+ Add Step"), "missing add step in {html}");
}
