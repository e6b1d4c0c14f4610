use dioxus::prelude::*;
use portal_core::model::{Phase, PhaseId, Step, StepId};

use crate::components::Modal;

/// The phase or step whose per-client description is being edited.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) enum DescriptionTarget {
    Phase {
        phase_id: PhaseId,
        name: String,
        current: String,
    },
    Step {
        phase_id: PhaseId,
        step_id: StepId,
        name: String,
        current: String,
    },
}

impl DescriptionTarget {
    pub(super) fn phase(phase: &Phase) -> Self {
        DescriptionTarget::Phase {
            phase_id: phase.id.clone(),
            name: phase.name.clone(),
            current: phase.description.clone().unwrap_or_default(),
        }
    }

    pub(super) fn step(phase_id: &PhaseId, step: &Step) -> Self {
        DescriptionTarget::Step {
            phase_id: phase_id.clone(),
            step_id: step.id.clone(),
            name: step.name.clone(),
            current: step.description.clone().unwrap_or_default(),
        }
    }

    fn title(&self) -> String {
        match self {
            DescriptionTarget::Phase { name, .. } => format!("Phase Description: {name}"),
            DescriptionTarget::Step { name, .. } => format!("Step Description: {name}"),
        }
    }

    fn current(&self) -> &str {
        match self {
            DescriptionTarget::Phase { current, .. } | DescriptionTarget::Step { current, .. } => {
                current
            }
        }
    }
}

/// Edits the text one client sees; the templates stay as they are.
#[component]
pub(super) fn DescriptionModal(
    target: DescriptionTarget,
    on_close: EventHandler<()>,
    on_save: EventHandler<String>,
) -> Element {
    let initial = target.current().to_owned();
    let mut text = use_signal(move || initial);

    rsx! {
        Modal { title: target.title(), on_close,
            div { class: "form-group",
                label { r#for: "client-description", "Description" }
                textarea {
                    id: "client-description",
                    rows: "4",
                    placeholder: "Leave empty to hide the description",
                    value: "{text}",
                    oninput: move |evt| text.set(evt.value()),
                }
                p { class: "form-hint", "Only this client's copy changes." }
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
                    onclick: move |_| on_save.call(text.read().clone()),
                    "Save Description"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::model::ModuleSet;

    #[test]
    fn targets_carry_the_current_text() {
        let phase = Phase {
            id: PhaseId::new("design"),
            name: "Design & Material Phase".into(),
            description: None,
            modules: ModuleSet::new(),
            steps: vec![Step {
                id: StepId::new("d1"),
                name: "Plans reviewed".into(),
                completed: false,
                description: Some("Layout check".into()),
            }],
        };

        let phase_target = DescriptionTarget::phase(&phase);
        assert_eq!(phase_target.title(), "Phase Description: Design & Material Phase");
        assert_eq!(phase_target.current(), "");

        let step_target = DescriptionTarget::step(&phase.id, &phase.steps[0]);
        assert_eq!(step_target.title(), "Step Description: Plans reviewed");
        assert_eq!(step_target.current(), "Layout check");
    }
}
