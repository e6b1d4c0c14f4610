use dioxus::prelude::*;
use dioxus_router::{Link, navigator};
use portal_core::model::{Client, FinalRecordStatus, ProductType, StepId, Uploader};
use portal_core::progress::{phase_overview, visible_phases};

use crate::components::{
    CalendarIcon, CheckCircleIcon, DownloadIcon, ShieldIcon, UploadModal, UploadRequest,
};
use crate::context::{AppContext, use_session};
use crate::routes::Route;
use crate::views::actions::{ErrorBanner, spawn_mutation};
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{
    PhaseRowVm, RING_CIRCUMFERENCE, file_icon, format_file_size, format_meeting_time,
    map_phase_rows, module_names, ring_offset,
};

#[component]
pub fn ClientDashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_session();
    let clients = ctx.clients();

    let mut resource = use_resource(move || {
        let clients = clients.clone();
        let client_id = session
            .current()
            .and_then(|current| current.client_id().cloned());
        async move {
            let Some(client_id) = client_id else {
                return Err(ViewError::NotFound);
            };
            clients
                .get_client(&client_id)
                .await
                .map_err(|_| ViewError::Unknown)?
                .ok_or(ViewError::NotFound)
        }
    });

    let state = view_state_from_resource(&resource);

    match state {
        ViewState::Ready(client) => rsx! {
            Dashboard { client, on_changed: move |()| resource.restart() }
        },
        ViewState::Error(ViewError::NotFound) => rsx! {
            SignedOut {}
        },
        ViewState::Error(err) => rsx! {
            div { class: "page",
                p { "{err.message()}" }
                button {
                    class: "btn",
                    r#type: "button",
                    onclick: move |_| resource.restart(),
                    "Retry"
                }
            }
        },
        ViewState::Idle | ViewState::Loading => rsx! {
            div { class: "page",
                p { "Loading..." }
            }
        },
    }
}

#[component]
pub(crate) fn SignedOut() -> Element {
    rsx! {
        div { class: "page signed-out",
            p { "Please sign in to continue." }
            Link { to: Route::Login {}, "Back to sign in" }
        }
    }
}

#[component]
fn Dashboard(client: Client, on_changed: EventHandler<()>) -> Element {
    let ctx = use_context::<AppContext>();
    let mut session = use_session();
    let nav = navigator();
    let mut show_upload = use_signal(|| false);
    let mut expanded_step = use_signal(|| None::<StepId>);
    let error = use_signal(|| None::<String>);

    let visible = visible_phases(&client);
    let overview = phase_overview(visible.iter().copied());
    let current_phase = overview.current.map(|phase| phase.name.clone());
    let next_step = overview.next_step.map(|step| step.name.clone());
    let finished = overview.is_finished();
    let rows = map_phase_rows(visible.iter().copied());

    let progress = client.progress;
    let dash_offset = ring_offset(progress);
    let status = client.final_record_status;
    let is_hestia = client.product == ProductType::Hestia;
    let modules = module_names(&client.hestia_modules, "");
    let first_name = client.first_name().to_owned();

    let sessions = ctx.sessions();
    let logout = move |_| {
        if let Some(ended) = session.sign_out() {
            sessions.logout(ended);
        }
        nav.push(Route::Login {});
    };

    let clients_for_request = ctx.clients();
    let request_id = client.id.clone();
    let request_record = move |_| {
        let clients = clients_for_request.clone();
        let id = request_id.clone();
        spawn_mutation(
            async move { clients.request_final_record(&id).await },
            move |_| on_changed.call(()),
            error,
        );
    };

    let clients_for_upload = ctx.clients();
    let upload_id = client.id.clone();
    let upload = move |request: UploadRequest| {
        let clients = clients_for_upload.clone();
        let id = upload_id.clone();
        show_upload.set(false);
        spawn_mutation(
            async move {
                clients
                    .record_file(
                        &id,
                        Uploader::Client,
                        &request.name,
                        request.kind,
                        request.size_bytes,
                    )
                    .await
            },
            move |_| on_changed.call(()),
            error,
        );
    };

    rsx! {
        div { class: "dashboard client-dashboard",
            header { class: "dashboard-header",
                div { class: "header-left",
                    div { class: "logo-small",
                        ShieldIcon { class: "logo-icon" }
                        span { "Aegis Shield" }
                    }
                }
                div { class: "header-right",
                    span { class: "user-name", "{client.name}" }
                    button { class: "logout-btn", r#type: "button", onclick: logout, "Logout" }
                }
            }

            main { class: "dashboard-content",
                ErrorBanner { error }

                section { class: "welcome-section",
                    div { class: "welcome-content",
                        h1 { "Welcome, {first_name}!" }
                        div { class: "product-badge {client.product.css_class()}",
                            "{client.product.label()}"
                        }
                        if is_hestia {
                            span { class: "modules-list", "Modules: {modules}" }
                        }
                    }
                    div { class: "welcome-progress",
                        div { class: "progress-ring-container",
                            svg { class: "progress-ring", view_box: "0 0 100 100",
                                circle { class: "progress-ring-bg", cx: "50", cy: "50", r: "42" }
                                circle {
                                    class: "progress-ring-fill",
                                    cx: "50",
                                    cy: "50",
                                    r: "42",
                                    stroke_dasharray: "{RING_CIRCUMFERENCE}",
                                    stroke_dashoffset: "{dash_offset}",
                                }
                            }
                            span { class: "progress-ring-text", "{progress}%" }
                        }
                        span { class: "progress-label", "Complete" }
                    }
                }

                div { class: "client-dashboard-grid",
                    div { class: "dashboard-main",
                        section { class: "current-phase-section card",
                            if finished {
                                h2 { class: "phase-finished",
                                    CheckCircleIcon { class: "finished-icon" }
                                    "All phases complete"
                                }
                                p { class: "next-step", "Every step of your project has been completed." }
                            } else {
                                if let Some(name) = current_phase {
                                    h2 { "Current Phase: {name}" }
                                }
                                if let Some(step) = next_step {
                                    p { class: "next-step", "Next step: {step}" }
                                }
                            }
                        }

                        section { class: "phases-section card",
                            h2 { "Project Phases" }
                            div { class: "phases-list",
                                for row in rows {
                                    PhaseItem {
                                        key: "{row.id}",
                                        row,
                                        expanded: expanded_step(),
                                        on_step_click: move |step_id: StepId| {
                                            let next = if expanded_step.read().as_ref() == Some(&step_id) {
                                                None
                                            } else {
                                                Some(step_id)
                                            };
                                            expanded_step.set(next);
                                        },
                                    }
                                }
                            }
                        }

                        section { class: "final-record-section card",
                            div { class: "final-record-content",
                                div { class: "final-record-info",
                                    h2 { "Final Project Record" }
                                    p {
                                        "Request a compiled package of all project documentation, files, and deliverables."
                                    }
                                    span { class: "record-status {status.key()}", "{status.label()}" }
                                }
                                div { class: "final-record-actions",
                                    if status == FinalRecordStatus::NotRequested {
                                        button {
                                            class: "request-record-btn",
                                            r#type: "button",
                                            onclick: request_record,
                                            "Request Final Record"
                                        }
                                    }
                                    if status == FinalRecordStatus::Generated {
                                        button { class: "download-record-btn", r#type: "button",
                                            DownloadIcon {}
                                            "Download ZIP"
                                        }
                                    }
                                }
                            }
                        }
                    }

                    aside { class: "dashboard-sidebar",
                        section { class: "meetings-section card compact",
                            h3 {
                                CalendarIcon { class: "section-icon" }
                                "Scheduled Meetings"
                            }
                            if client.meeting_links.is_empty() {
                                p { class: "empty-state compact", "No meetings scheduled" }
                            } else {
                                div { class: "meetings-list compact",
                                    for meeting in client.meeting_links.iter() {
                                        div { class: "meeting-item compact", key: "{meeting.id}",
                                            div { class: "meeting-info",
                                                span { class: "meeting-title", "{meeting.title}" }
                                                span { class: "meeting-date",
                                                    "{format_meeting_time(meeting.scheduled_for)}"
                                                }
                                            }
                                            a {
                                                class: "join-btn compact",
                                                href: "{meeting.url}",
                                                target: "_blank",
                                                rel: "noopener noreferrer",
                                                "Join"
                                            }
                                        }
                                    }
                                }
                            }
                        }

                        section { class: "upload-section card compact",
                            div { class: "section-header",
                                h3 { "Your Uploads" }
                                button {
                                    class: "upload-btn compact",
                                    r#type: "button",
                                    title: "Upload file",
                                    onclick: move |_| show_upload.set(true),
                                    "+"
                                }
                            }
                            if client.client_files.is_empty() {
                                p { class: "empty-state compact", "No files uploaded" }
                            } else {
                                div { class: "files-list compact",
                                    for file in client.client_files.iter() {
                                        div { class: "file-item compact", key: "{file.id}",
                                            span { class: "file-icon", "{file_icon(file.kind)}" }
                                            div { class: "file-info",
                                                span { class: "file-name", "{file.name}" }
                                                span { class: "file-meta", "{format_file_size(file.size_bytes)}" }
                                            }
                                        }
                                    }
                                }
                            }
                        }

                        section { class: "deliverables-section card compact",
                            h3 { "Deliverables" }
                            if client.admin_files.is_empty() {
                                p { class: "empty-state compact", "No deliverables yet" }
                            } else {
                                div { class: "files-list compact",
                                    for file in client.admin_files.iter() {
                                        div { class: "file-item compact", key: "{file.id}",
                                            span { class: "file-icon", "{file_icon(file.kind)}" }
                                            div { class: "file-info",
                                                span { class: "file-name", "{file.name}" }
                                                span { class: "file-meta", "{format_file_size(file.size_bytes)}" }
                                            }
                                            button { class: "download-btn compact", r#type: "button",
                                                DownloadIcon {}
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            if show_upload() {
                UploadModal {
                    on_close: move |()| show_upload.set(false),
                    on_upload: upload,
                }
            }
        }
    }
}

#[component]
fn PhaseItem(row: PhaseRowVm, expanded: Option<StepId>, on_step_click: EventHandler<StepId>) -> Element {
    let class = if row.complete { "phase-item complete" } else { "phase-item" };
    rsx! {
        div { class,
            div { class: "phase-header",
                h3 { "{row.name}" }
                span { class: "phase-progress", "{row.done}/{row.total}" }
            }
            if let Some(description) = row.description.as_ref() {
                p { class: "phase-description", "{description}" }
            }
            div { class: "phase-progress-bar",
                div { class: "phase-fill", style: "width: {row.percent}%" }
            }
            ul { class: "steps-list",
                for step in row.steps {
                    li {
                        key: "{step.id}",
                        class: if step.completed { "step completed" } else { "step" },
                        onclick: {
                            let id = step.id.clone();
                            move |_| on_step_click.call(id.clone())
                        },
                        span { class: "step-check", if step.completed { "✓" } else { "○" } }
                        span { class: "step-name", "{step.name}" }
                        if expanded.as_ref() == Some(&step.id) {
                            if let Some(description) = step.description.as_ref() {
                                p { class: "step-description", "{description}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
