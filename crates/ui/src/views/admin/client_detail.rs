use dioxus::prelude::*;
use portal_core::model::{
    Client, FileId, FinalRecordStatus, MeetingId, PhaseId, ProductType, StepId, UploadedFile,
    Uploader,
};

use crate::components::{TrashIcon, UploadModal, UploadRequest};
use crate::context::AppContext;
use crate::views::actions::{ErrorBanner, spawn_mutation};
use crate::vm::{
    capitalize, file_icon, format_file_size, format_meeting_time, format_upload_date,
    module_names, status_color,
};

use super::description_modal::{DescriptionModal, DescriptionTarget};
use super::meeting_modal::{MeetingModal, MeetingRequest};

#[component]
pub(super) fn ClientDetail(client: Client, on_changed: EventHandler<()>) -> Element {
    let ctx = use_context::<AppContext>();
    let mut show_upload = use_signal(|| false);
    let mut show_meeting = use_signal(|| false);
    let mut editing_description = use_signal(|| None::<DescriptionTarget>);
    let error = use_signal(|| None::<String>);

    let status = client.final_record_status;
    let is_hestia = client.product == ProductType::Hestia;
    let modules = module_names(&client.hestia_modules, "");

    let clients = ctx.clients();
    let client_id = client.id.clone();
    let toggle = move |(phase_id, step_id): (PhaseId, StepId)| {
        let clients = clients.clone();
        let id = client_id.clone();
        spawn_mutation(
            async move { clients.toggle_step(&id, &phase_id, &step_id).await },
            move |_| on_changed.call(()),
            error,
        );
    };

    let clients = ctx.clients();
    let client_id = client.id.clone();
    let set_status = move |next: FinalRecordStatus| {
        let clients = clients.clone();
        let id = client_id.clone();
        spawn_mutation(
            async move { clients.set_final_record_status(&id, next).await },
            move |_| on_changed.call(()),
            error,
        );
    };
    let generate = set_status.clone();
    let deliver = set_status;

    let clients = ctx.clients();
    let client_id = client.id.clone();
    let remove_file = move |file_id: FileId| {
        let clients = clients.clone();
        let id = client_id.clone();
        spawn_mutation(
            async move { clients.remove_file(&id, &file_id).await },
            move |_| on_changed.call(()),
            error,
        );
    };

    let clients = ctx.clients();
    let client_id = client.id.clone();
    let upload_deliverable = move |request: UploadRequest| {
        let clients = clients.clone();
        let id = client_id.clone();
        show_upload.set(false);
        spawn_mutation(
            async move {
                clients
                    .record_file(
                        &id,
                        Uploader::Admin,
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

    let clients = ctx.clients();
    let client_id = client.id.clone();
    let add_meeting = move |request: MeetingRequest| {
        let clients = clients.clone();
        let id = client_id.clone();
        show_meeting.set(false);
        spawn_mutation(
            async move {
                clients
                    .add_meeting_link(&id, &request.title, &request.url, request.scheduled_for)
                    .await
            },
            move |_| on_changed.call(()),
            error,
        );
    };

    let clients = ctx.clients();
    let client_id = client.id.clone();
    let remove_meeting = move |meeting_id: MeetingId| {
        let clients = clients.clone();
        let id = client_id.clone();
        spawn_mutation(
            async move { clients.remove_meeting_link(&id, &meeting_id).await },
            move |_| on_changed.call(()),
            error,
        );
    };

    let clients = ctx.clients();
    let client_id = client.id.clone();
    let save_description = move |text: String| {
        let Some(target) = editing_description.take() else {
            return;
        };
        let clients = clients.clone();
        let id = client_id.clone();
        spawn_mutation(
            async move {
                match target {
                    DescriptionTarget::Phase { phase_id, .. } => {
                        clients.set_phase_description(&id, &phase_id, &text).await
                    }
                    DescriptionTarget::Step {
                        phase_id, step_id, ..
                    } => {
                        clients
                            .set_step_description(&id, &phase_id, &step_id, &text)
                            .await
                    }
                }
            },
            move |_| on_changed.call(()),
            error,
        );
    };

    rsx! {
        div { class: "client-detail",
            div { class: "detail-header",
                div {
                    h1 { "{client.name}" }
                    p { class: "client-email", "{client.email}" }
                }
                div { class: "product-info",
                    span { class: "product-badge large {client.product.css_class()}",
                        "{client.product.label()}"
                    }
                    if is_hestia {
                        div { class: "modules-edit",
                            span { "Modules: {modules}" }
                        }
                    }
                }
            }

            ErrorBanner { error }

            section { class: "admin-section",
                h2 { "Progress Management" }
                div { class: "progress-control",
                    div { class: "progress-display",
                        div { class: "progress-bar large",
                            div { class: "progress-fill", style: "width: {client.progress}%" }
                        }
                        span { class: "progress-text", "{client.progress}%" }
                    }
                }
            }

            section { class: "admin-section",
                h2 { "Phase & Step Management" }
                div { class: "phases-admin",
                    for phase in client.phases.iter() {
                        div { class: "phase-admin-item", key: "{phase.id}",
                            div { class: "phase-admin-header",
                                h3 {
                                    "{phase.name} "
                                    span { class: "phase-progress",
                                        "{phase.completed_steps()}/{phase.total_steps()}"
                                    }
                                }
                                button {
                                    class: "action-btn",
                                    r#type: "button",
                                    title: "Edit this client's phase description",
                                    onclick: {
                                        let target = DescriptionTarget::phase(phase);
                                        move |_| editing_description.set(Some(target.clone()))
                                    },
                                    "Edit Description"
                                }
                            }
                            if let Some(description) = &phase.description {
                                p { class: "phase-description", "{description}" }
                            }
                            ul { class: "steps-admin-list",
                                for step in phase.steps.iter() {
                                    li { key: "{step.id}",
                                        label { class: "step-checkbox",
                                            input {
                                                r#type: "checkbox",
                                                checked: step.completed,
                                                onchange: {
                                                    let ids = (phase.id.clone(), step.id.clone());
                                                    let toggle = toggle.clone();
                                                    move |_| toggle(ids.clone())
                                                },
                                            }
                                            span { class: if step.completed { "completed" }, "{step.name}" }
                                        }
                                        button {
                                            class: "action-btn small",
                                            r#type: "button",
                                            title: "Edit this client's step description",
                                            onclick: {
                                                let target = DescriptionTarget::step(&phase.id, step);
                                                move |_| editing_description.set(Some(target.clone()))
                                            },
                                            "Edit"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            section { class: "admin-section",
                h2 { "Client Uploaded Files" }
                if client.client_files.is_empty() {
                    p { class: "empty-state", "No files uploaded by client" }
                } else {
                    FilesTable { files: client.client_files.clone(), on_remove: remove_file.clone() }
                }
            }

            section { class: "admin-section",
                div { class: "section-header",
                    h2 { "Deliverables (Admin Uploads)" }
                    button {
                        class: "upload-btn",
                        r#type: "button",
                        onclick: move |_| show_upload.set(true),
                        "+ Upload Deliverable"
                    }
                }
                if client.admin_files.is_empty() {
                    p { class: "empty-state", "No deliverables uploaded yet" }
                } else {
                    FilesTable { files: client.admin_files.clone(), on_remove: remove_file }
                }
            }

            div { class: "admin-sections-grid",
                section { class: "admin-section",
                    div { class: "section-header",
                        h2 { "Meeting Links" }
                        button {
                            class: "add-btn",
                            r#type: "button",
                            onclick: move |_| show_meeting.set(true),
                            "+ Add Meeting Link"
                        }
                    }
                    if client.meeting_links.is_empty() {
                        p { class: "empty-state", "No meeting links added" }
                    } else {
                        div { class: "meetings-admin-list",
                            for meeting in client.meeting_links.iter() {
                                div { class: "meeting-admin-item", key: "{meeting.id}",
                                    div { class: "meeting-info",
                                        strong { "{meeting.title}" }
                                        span { class: "meeting-date",
                                            "{format_meeting_time(meeting.scheduled_for)}"
                                        }
                                        a {
                                            class: "meeting-url",
                                            href: "{meeting.url}",
                                            target: "_blank",
                                            rel: "noopener noreferrer",
                                            "{meeting.url}"
                                        }
                                    }
                                    div { class: "meeting-actions",
                                        button {
                                            class: "action-btn danger",
                                            r#type: "button",
                                            onclick: {
                                                let id = meeting.id.clone();
                                                let remove_meeting = remove_meeting.clone();
                                                move |_| remove_meeting(id.clone())
                                            },
                                            "Delete"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }

                section { class: "admin-section",
                    h2 { "Final Project Record" }
                    div { class: "final-record-admin",
                        div { class: "record-status-admin",
                            span { "Status:" }
                            span {
                                class: "status-indicator",
                                style: "background-color: {status_color(status)}",
                                "{status.admin_label()}"
                            }
                        }
                        div { class: "record-actions",
                            if status == FinalRecordStatus::Requested {
                                button {
                                    class: "generate-btn",
                                    r#type: "button",
                                    onclick: move |_| generate(FinalRecordStatus::Generated),
                                    "Generate Final Record"
                                }
                            }
                            if status == FinalRecordStatus::Generated {
                                button {
                                    class: "deliver-btn",
                                    r#type: "button",
                                    onclick: move |_| deliver(FinalRecordStatus::Delivered),
                                    "Mark as Delivered"
                                }
                            }
                        }
                    }
                }
            }

            if show_upload() {
                UploadModal {
                    title: "Upload Deliverable",
                    on_close: move |()| show_upload.set(false),
                    on_upload: upload_deliverable,
                }
            }
            if let Some(target) = editing_description() {
                DescriptionModal {
                    target,
                    on_close: move |()| editing_description.set(None),
                    on_save: save_description,
                }
            }
            if show_meeting() {
                MeetingModal {
                    on_close: move |()| show_meeting.set(false),
                    on_submit: add_meeting,
                }
            }
        }
    }
}

#[component]
fn FilesTable(files: Vec<UploadedFile>, on_remove: EventHandler<FileId>) -> Element {
    rsx! {
        table { class: "files-table",
            thead {
                tr {
                    th { "File" }
                    th { "Type" }
                    th { "Uploaded" }
                    th { "Size" }
                    th { "Actions" }
                }
            }
            tbody {
                for file in files {
                    tr { key: "{file.id}",
                        td {
                            span { class: "file-icon", "{file_icon(file.kind)}" }
                            "{file.name}"
                        }
                        td { class: "capitalize", "{capitalize(file.kind.key())}" }
                        td { "{format_upload_date(file.uploaded_at)}" }
                        td { "{format_file_size(file.size_bytes)}" }
                        td {
                            button {
                                class: "action-btn danger",
                                r#type: "button",
                                title: "Remove file",
                                onclick: {
                                    let id = file.id.clone();
                                    move |_| on_remove.call(id.clone())
                                },
                                TrashIcon {}
                            }
                        }
                    }
                }
            }
        }
    }
}
