use dioxus::prelude::*;
use portal_core::model::{ModuleKey, ModuleSet, PhaseId, PhaseTemplate, StepId, StepTemplate};
use portal_core::template::{MoveDirection, PendingDeletion};
use services::TemplateEdit;

use crate::components::{ConfirmDialog, Modal, TrashIcon};
use crate::context::AppContext;
use crate::views::actions::{ErrorBanner, spawn_mutation};
use crate::views::{ViewError, ViewState, view_state_from_resource};

#[derive(Clone, Debug, Default, PartialEq)]
struct PhaseForm {
    editing: Option<PhaseId>,
    name: String,
    description: String,
    modules: ModuleSet,
}

impl PhaseForm {
    fn edit(phase: &PhaseTemplate) -> Self {
        Self {
            editing: Some(phase.id.clone()),
            name: phase.name.clone(),
            description: phase.description.clone().unwrap_or_default(),
            modules: phase.modules.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct StepForm {
    phase_id: PhaseId,
    step_id: StepId,
    name: String,
    description: String,
}

/// Add or update a phase, then store its description.
fn phase_edit(form: PhaseForm) -> TemplateEdit {
    TemplateEdit::SavePhase {
        phase_id: form.editing,
        name: form.name,
        modules: form.modules,
        description: form.description,
    }
}

fn step_edit(form: StepForm) -> TemplateEdit {
    TemplateEdit::SaveStep {
        phase_id: form.phase_id,
        step_id: form.step_id,
        name: form.name,
        description: form.description,
    }
}

#[component]
pub(crate) fn TemplateManager() -> Element {
    let ctx = use_context::<AppContext>();
    let mut phase_form = use_signal(|| None::<PhaseForm>);
    let mut step_form = use_signal(|| None::<StepForm>);
    let mut pending = use_signal(|| None::<PendingDeletion>);
    let error = use_signal(|| None::<String>);

    let templates_for_list = ctx.templates();
    let mut resource = use_resource(move || {
        let templates = templates_for_list.clone();
        async move {
            templates
                .list_templates()
                .await
                .map_err(|_| ViewError::Unknown)
        }
    });

    let templates = ctx.templates();
    let on_edit = move |edit: TemplateEdit| {
        let templates = templates.clone();
        spawn_mutation(
            async move { templates.apply(&edit).await },
            move |_| resource.restart(),
            error,
        );
    };

    let templates = ctx.templates();
    let on_save_phase = move |form: PhaseForm| {
        let templates = templates.clone();
        phase_form.set(None);
        let edit = phase_edit(form);
        spawn_mutation(
            async move { templates.apply(&edit).await },
            move |_| resource.restart(),
            error,
        );
    };

    let templates = ctx.templates();
    let on_save_step = move |form: StepForm| {
        let templates = templates.clone();
        step_form.set(None);
        let edit = step_edit(form);
        spawn_mutation(
            async move { templates.apply(&edit).await },
            move |_| resource.restart(),
            error,
        );
    };

    let templates = ctx.templates();
    let on_confirm_delete = move |()| {
        let Some(confirmed) = pending.take() else {
            return;
        };
        let templates = templates.clone();
        spawn_mutation(
            async move { templates.confirm_deletion(confirmed).await },
            move |_| resource.restart(),
            error,
        );
    };

    let body = match view_state_from_resource(&resource) {
        ViewState::Ready(phases) if phases.is_empty() => rsx! {
            div { class: "empty-templates",
                p { "No phase templates defined yet." }
                p { "Click \"Add New Phase\" to create your first phase template." }
            }
        },
        ViewState::Ready(phases) => {
            let count = phases.len();
            rsx! {
                div { class: "templates-list",
                    for (index, phase) in phases.into_iter().enumerate() {
                        PhaseCard {
                            key: "{phase.id}",
                            phase,
                            index,
                            count,
                            on_edit: on_edit.clone(),
                            on_open: move |form: PhaseForm| phase_form.set(Some(form)),
                            on_edit_step: move |form: StepForm| step_form.set(Some(form)),
                            on_delete: move |request: PendingDeletion| pending.set(Some(request)),
                        }
                    }
                }
            }
        }
        ViewState::Error(err) => rsx! {
            p { class: "form-error", "{err.message()}" }
        },
        ViewState::Idle | ViewState::Loading => rsx! {
            p { class: "loading", "Loading..." }
        },
    };

    rsx! {
        div { class: "template-manager",
            div { class: "template-header",
                div {
                    h2 { "Phase & Step Templates" }
                    p { class: "template-subtitle",
                        "Manage the phases and steps that can be assigned to client projects"
                    }
                }
                button {
                    class: "add-phase-btn",
                    r#type: "button",
                    onclick: move |_| phase_form.set(Some(PhaseForm::default())),
                    "+ Add New Phase"
                }
            }

            ErrorBanner { error }

            {body}

            if let Some(form) = phase_form() {
                PhaseModal {
                    initial: form,
                    on_close: move |()| phase_form.set(None),
                    on_save: on_save_phase,
                }
            }
            if let Some(form) = step_form() {
                StepModal {
                    initial: form,
                    on_close: move |()| step_form.set(None),
                    on_save: on_save_step,
                }
            }
            if let Some(request) = pending() {
                ConfirmDialog {
                    title: request.title(),
                    message: request.prompt(),
                    on_confirm: on_confirm_delete,
                    on_cancel: move |()| pending.set(None),
                }
            }
        }
    }
}

#[component]
fn PhaseCard(
    phase: PhaseTemplate,
    index: usize,
    count: usize,
    on_edit: EventHandler<TemplateEdit>,
    on_open: EventHandler<PhaseForm>,
    on_edit_step: EventHandler<StepForm>,
    on_delete: EventHandler<PendingDeletion>,
) -> Element {
    let mut adding = use_signal(|| false);
    let mut new_step = use_signal(String::new);

    let phase_id = phase.id.clone();
    let move_phase = move |direction: MoveDirection| {
        let phase_id = phase_id.clone();
        move |_| {
            on_edit.call(TemplateEdit::MovePhase {
                phase_id: phase_id.clone(),
                direction,
            });
        }
    };

    let phase_id = phase.id.clone();
    let submit_step = move |_| {
        let name = new_step.read().trim().to_owned();
        if name.is_empty() {
            return;
        }
        on_edit.call(TemplateEdit::AddStep {
            phase_id: phase_id.clone(),
            name,
        });
        new_step.set(String::new());
        adding.set(false);
    };

    let form = PhaseForm::edit(&phase);
    let delete_phase = PendingDeletion::Phase {
        phase_id: phase.id.clone(),
    };
    let step_count = phase.steps.len();

    rsx! {
        div { class: "template-phase-card",
            div { class: "template-phase-header",
                div { class: "phase-order-controls",
                    button {
                        class: "order-btn",
                        r#type: "button",
                        title: "Move up",
                        disabled: index == 0,
                        onclick: move_phase(MoveDirection::Up),
                        "▲"
                    }
                    button {
                        class: "order-btn",
                        r#type: "button",
                        title: "Move down",
                        disabled: index + 1 == count,
                        onclick: move_phase(MoveDirection::Down),
                        "▼"
                    }
                }
                div { class: "template-phase-info",
                    h3 { "{phase.name}" }
                    if let Some(description) = phase.description.as_ref() {
                        p { class: "template-phase-description", "{description}" }
                    }
                    div { class: "template-phase-modules",
                        if phase.modules.is_empty() {
                            span { class: "module-tag all", "All modules (ZEUS)" }
                        } else {
                            for module in phase.modules.iter() {
                                span { key: "{module.key()}", class: "module-tag", "{module.display_name()}" }
                            }
                        }
                    }
                }
                div { class: "template-phase-actions",
                    button {
                        class: "action-btn",
                        r#type: "button",
                        onclick: move |_| on_open.call(form.clone()),
                        "Edit"
                    }
                    button {
                        class: "action-btn danger",
                        r#type: "button",
                        title: "Delete phase",
                        onclick: move |_| on_delete.call(delete_phase.clone()),
                        TrashIcon {}
                    }
                }
            }

            div { class: "template-steps",
                if phase.steps.is_empty() {
                    p { class: "empty-steps", "No steps defined for this phase" }
                } else {
                    ul { class: "template-steps-list",
                        for (position, step) in phase.steps.iter().enumerate() {
                            StepRow {
                                key: "{step.id}",
                                phase_id: phase.id.clone(),
                                step: step.clone(),
                                position,
                                count: step_count,
                                on_edit,
                                on_edit_step,
                                on_delete,
                            }
                        }
                    }
                }

                if adding() {
                    div { class: "add-step-form",
                        input {
                            r#type: "text",
                            placeholder: "Enter step name...",
                            value: "{new_step}",
                            oninput: move |evt| new_step.set(evt.value()),
                        }
                        button {
                            class: "cancel-btn",
                            r#type: "button",
                            onclick: move |_| {
                                new_step.set(String::new());
                                adding.set(false);
                            },
                            "Cancel"
                        }
                        button {
                            class: "submit-btn",
                            r#type: "button",
                            disabled: new_step.read().trim().is_empty(),
                            onclick: submit_step,
                            "Add Step"
                        }
                    }
                } else {
                    button {
                        class: "add-step-btn",
                        r#type: "button",
                        onclick: move |_| adding.set(true),
                        "+ Add Step"
                    }
                }
            }
        }
    }
}

#[component]
fn StepRow(
    phase_id: PhaseId,
    step: StepTemplate,
    position: usize,
    count: usize,
    on_edit: EventHandler<TemplateEdit>,
    on_edit_step: EventHandler<StepForm>,
    on_delete: EventHandler<PendingDeletion>,
) -> Element {
    let number = position + 1;
    let form = StepForm {
        phase_id: phase_id.clone(),
        step_id: step.id.clone(),
        name: step.name.clone(),
        description: step.description.clone().unwrap_or_default(),
    };
    let delete_step = PendingDeletion::Step {
        phase_id: phase_id.clone(),
        step_id: step.id.clone(),
    };
    let step_id = step.id.clone();
    let move_step = move |direction: MoveDirection| {
        let phase_id = phase_id.clone();
        let step_id = step_id.clone();
        move |_| {
            on_edit.call(TemplateEdit::MoveStep {
                phase_id: phase_id.clone(),
                step_id: step_id.clone(),
                direction,
            });
        }
    };

    rsx! {
        li { class: "template-step",
            span { class: "step-number", "{number}." }
            div { class: "template-step-info",
                span { class: "step-name", "{step.name}" }
                if let Some(description) = step.description.as_ref() {
                    span { class: "step-description", "{description}" }
                }
            }
            div { class: "template-step-actions",
                button {
                    class: "order-btn small",
                    r#type: "button",
                    title: "Move up",
                    disabled: position == 0,
                    onclick: move_step(MoveDirection::Up),
                    "▲"
                }
                button {
                    class: "order-btn small",
                    r#type: "button",
                    title: "Move down",
                    disabled: number == count,
                    onclick: move_step(MoveDirection::Down),
                    "▼"
                }
                button {
                    class: "action-btn small",
                    r#type: "button",
                    onclick: move |_| on_edit_step.call(form.clone()),
                    "Edit"
                }
                button {
                    class: "action-btn small danger",
                    r#type: "button",
                    title: "Delete step",
                    onclick: move |_| on_delete.call(delete_step.clone()),
                    TrashIcon {}
                }
            }
        }
    }
}

#[component]
fn PhaseModal(initial: PhaseForm, on_close: EventHandler<()>, on_save: EventHandler<PhaseForm>) -> Element {
    let mut form = use_signal(move || initial);
    let editing = form.read().editing.is_some();
    let title = if editing { "Edit Phase" } else { "Add New Phase" };
    let submit_label = if editing { "Save Changes" } else { "Add Phase" };
    let can_submit = !form.read().name.trim().is_empty();

    rsx! {
        Modal { title, on_close, class: "phase-modal",
            div { class: "form-group",
                label { r#for: "phase-name", "Phase Name" }
                input {
                    id: "phase-name",
                    r#type: "text",
                    placeholder: "e.g., Vetting Phase",
                    value: "{form.read().name}",
                    oninput: move |evt| form.write().name = evt.value(),
                }
            }
            div { class: "form-group",
                label { r#for: "phase-description", "Description" }
                textarea {
                    id: "phase-description",
                    rows: "3",
                    placeholder: "Optional summary shown to clients",
                    value: "{form.read().description}",
                    oninput: move |evt| form.write().description = evt.value(),
                }
            }
            div { class: "form-group",
                label { "Associated Modules (HESTIA)" }
                p { class: "form-hint",
                    "Select which HESTIA modules this phase belongs to. Leave empty for ZEUS (all modules)."
                }
                div { class: "modules-grid",
                    for module in ModuleKey::ALL {
                        label { key: "{module.key()}", class: "module-checkbox",
                            input {
                                r#type: "checkbox",
                                checked: form.read().modules.contains(module),
                                onchange: move |_| form.write().modules.toggle(module),
                            }
                            span { "{module.display_name()}" }
                        }
                    }
                }
            }
            div { class: "modal-actions",
                button {
                    class: "cancel-btn",
                    r#type: "button",
                    onclick: move |_| on_close.call(()),
                    "Cancel"
                }
                button {
                    class: "submit-btn",
                    r#type: "button",
                    disabled: !can_submit,
                    onclick: move |_| on_save.call(form.read().clone()),
                    "{submit_label}"
                }
            }
        }
    }
}

#[component]
fn StepModal(initial: StepForm, on_close: EventHandler<()>, on_save: EventHandler<StepForm>) -> Element {
    let mut form = use_signal(move || initial);
    let can_submit = !form.read().name.trim().is_empty();

    rsx! {
        Modal { title: "Edit Step", on_close, class: "step-modal",
            div { class: "form-group",
                label { r#for: "step-name", "Step Name" }
                input {
                    id: "step-name",
                    r#type: "text",
                    value: "{form.read().name}",
                    oninput: move |evt| form.write().name = evt.value(),
                }
            }
            div { class: "form-group",
                label { r#for: "step-description", "Description" }
                textarea {
                    id: "step-description",
                    rows: "3",
                    placeholder: "Optional detail shown when a client expands the step",
                    value: "{form.read().description}",
                    oninput: move |evt| form.write().description = evt.value(),
                }
            }
            div { class: "modal-actions",
                button {
                    class: "cancel-btn",
                    r#type: "button",
                    onclick: move |_| on_close.call(()),
                    "Cancel"
                }
                button {
                    class: "submit-btn",
                    r#type: "button",
                    disabled: !can_submit,
                    onclick: move |_| on_save.call(form.read().clone()),
                    "Save Changes"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use services::{TemplateService, TemplateServiceError};
    use storage::repository::InMemoryRepository;

    fn service() -> Arc<TemplateService> {
        Arc::new(TemplateService::new(Arc::new(InMemoryRepository::new())))
    }

    #[tokio::test]
    async fn save_phase_adds_with_description() {
        let service = service();
        let next = service
            .apply(&phase_edit(PhaseForm {
                editing: None,
                name: "Permit Phase".into(),
                description: "City permits".into(),
                modules: ModuleSet::from([ModuleKey::Design]),
            }))
            .await
            .unwrap();
        let added = next.last().unwrap();
        assert_eq!(added.name, "Permit Phase");
        assert_eq!(added.description.as_deref(), Some("City permits"));
        assert!(added.modules.contains(ModuleKey::Design));
    }

    #[tokio::test]
    async fn save_phase_updates_existing_phase() {
        let service = service();
        let first = service.list_templates().await.unwrap()[0].clone();
        let mut form = PhaseForm::edit(&first);
        form.name = "Contractor Vetting".into();
        form.description = String::new();

        let next = service.apply(&phase_edit(form)).await.unwrap();
        assert_eq!(next[0].id, first.id);
        assert_eq!(next[0].name, "Contractor Vetting");
        assert_eq!(next[0].description, None);
    }

    #[tokio::test]
    async fn save_step_renames_and_describes() {
        let service = service();
        let phase = service.list_templates().await.unwrap()[0].clone();
        let step = phase.steps[0].clone();

        let next = service
            .apply(&step_edit(StepForm {
                phase_id: phase.id.clone(),
                step_id: step.id.clone(),
                name: "License lookup".into(),
                description: "State board search".into(),
            }))
            .await
            .unwrap();
        assert_eq!(next[0].steps[0].name, "License lookup");
        assert_eq!(
            next[0].steps[0].description.as_deref(),
            Some("State board search")
        );
    }

    #[tokio::test]
    async fn blank_step_name_leaves_the_description_alone() {
        let service = service();
        let before = service.list_templates().await.unwrap();
        let phase = before[0].clone();
        let step = phase.steps[0].clone();

        let result = service
            .apply(&step_edit(StepForm {
                phase_id: phase.id,
                step_id: step.id,
                name: "   ".into(),
                description: "Replaced text".into(),
            }))
            .await;
        assert!(matches!(result, Err(TemplateServiceError::Template(_))));
        assert_eq!(service.list_templates().await.unwrap(), before);
    }
}
