//! Admin-managed phase templates: cloning into new clients and copy-on-write editing.
//!
//! Every editor function takes the current template list and returns the next
//! one. Deletes are only reachable through [`PendingDeletion::confirm`].

mod defaults;

pub use defaults::default_phase_templates;

use thiserror::Error;

use crate::model::{
    ModuleKey, ModuleSet, Phase, PhaseId, PhaseTemplate, ProductType, StepId, StepTemplate,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TemplateError {
    #[error("name cannot be empty")]
    EmptyName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveDirection {
    Up,
    Down,
}

//
// ─── CLONING ───────────────────────────────────────────────────────────────────
//

/// Build a new client's phase list from the current templates.
///
/// ZEUS takes every template. HESTIA keeps templates without modules plus those
/// sharing a module with `selected`. Order is preserved and every step starts
/// incomplete.
#[must_use]
pub fn create_phases_from_templates(
    product: ProductType,
    selected: &ModuleSet,
    templates: &[PhaseTemplate],
) -> Vec<Phase> {
    templates
        .iter()
        .filter(|template| match product {
            ProductType::Zeus => true,
            ProductType::Hestia => {
                template.modules.is_empty() || template.modules.intersects(selected)
            }
        })
        .map(PhaseTemplate::instantiate)
        .collect()
}

//
// ─── PHASE EDITS ───────────────────────────────────────────────────────────────
//

/// Append a new phase with no steps.
///
/// # Errors
///
/// Returns `TemplateError::EmptyName` if `name` is blank.
pub fn add_phase(
    templates: &[PhaseTemplate],
    name: &str,
    modules: ModuleSet,
) -> Result<Vec<PhaseTemplate>, TemplateError> {
    let name = required_name(name)?;
    let mut next = templates.to_vec();
    next.push(PhaseTemplate {
        id: PhaseId::generate(),
        name,
        description: None,
        modules,
        steps: Vec::new(),
    });
    Ok(next)
}

/// Rename a phase and replace its module membership.
///
/// # Errors
///
/// Returns `TemplateError::EmptyName` if `name` is blank.
pub fn update_phase(
    templates: &[PhaseTemplate],
    phase_id: &PhaseId,
    name: &str,
    modules: ModuleSet,
) -> Result<Vec<PhaseTemplate>, TemplateError> {
    let name = required_name(name)?;
    Ok(map_phase(templates, phase_id, |phase| {
        phase.name = name.clone();
        phase.modules = modules.clone();
    }))
}

#[must_use]
pub fn set_phase_description(
    templates: &[PhaseTemplate],
    phase_id: &PhaseId,
    description: &str,
) -> Vec<PhaseTemplate> {
    let description = optional_text(description);
    map_phase(templates, phase_id, |phase| {
        phase.description = description.clone();
    })
}

/// Write everything the phase form edits in one pass.
///
/// With no `phase_id` a new empty phase is appended.
///
/// # Errors
///
/// Returns `TemplateError::EmptyName` if `name` is blank.
pub fn save_phase(
    templates: &[PhaseTemplate],
    phase_id: Option<&PhaseId>,
    name: &str,
    modules: ModuleSet,
    description: &str,
) -> Result<Vec<PhaseTemplate>, TemplateError> {
    let name = required_name(name)?;
    let description = optional_text(description);
    let Some(phase_id) = phase_id else {
        let mut next = templates.to_vec();
        next.push(PhaseTemplate {
            id: PhaseId::generate(),
            name,
            description,
            modules,
            steps: Vec::new(),
        });
        return Ok(next);
    };
    Ok(map_phase(templates, phase_id, |phase| {
        phase.name = name.clone();
        phase.description = description.clone();
        phase.modules = modules.clone();
    }))
}

#[must_use]
pub fn toggle_phase_module(
    templates: &[PhaseTemplate],
    phase_id: &PhaseId,
    module: ModuleKey,
) -> Vec<PhaseTemplate> {
    map_phase(templates, phase_id, |phase| phase.modules.toggle(module))
}

/// Swap a phase with its neighbour. No-op at either boundary.
#[must_use]
pub fn move_phase(
    templates: &[PhaseTemplate],
    phase_id: &PhaseId,
    direction: MoveDirection,
) -> Vec<PhaseTemplate> {
    let mut next = templates.to_vec();
    if let Some(idx) = next.iter().position(|p| &p.id == phase_id) {
        swap_with_neighbour(&mut next, idx, direction);
    }
    next
}

//
// ─── STEP EDITS ────────────────────────────────────────────────────────────────
//

/// Append a step to a phase.
///
/// # Errors
///
/// Returns `TemplateError::EmptyName` if `name` is blank.
pub fn add_step(
    templates: &[PhaseTemplate],
    phase_id: &PhaseId,
    name: &str,
) -> Result<Vec<PhaseTemplate>, TemplateError> {
    let name = required_name(name)?;
    Ok(map_phase(templates, phase_id, |phase| {
        phase.steps.push(StepTemplate {
            id: StepId::generate(),
            name: name.clone(),
            description: None,
        });
    }))
}

/// # Errors
///
/// Returns `TemplateError::EmptyName` if `name` is blank.
pub fn rename_step(
    templates: &[PhaseTemplate],
    phase_id: &PhaseId,
    step_id: &StepId,
    name: &str,
) -> Result<Vec<PhaseTemplate>, TemplateError> {
    let name = required_name(name)?;
    Ok(map_step(templates, phase_id, step_id, |step| {
        step.name = name.clone();
    }))
}

#[must_use]
pub fn set_step_description(
    templates: &[PhaseTemplate],
    phase_id: &PhaseId,
    step_id: &StepId,
    description: &str,
) -> Vec<PhaseTemplate> {
    let description = optional_text(description);
    map_step(templates, phase_id, step_id, |step| {
        step.description = description.clone();
    })
}

/// Rename a step and replace its description together.
///
/// # Errors
///
/// Returns `TemplateError::EmptyName` if `name` is blank.
pub fn save_step(
    templates: &[PhaseTemplate],
    phase_id: &PhaseId,
    step_id: &StepId,
    name: &str,
    description: &str,
) -> Result<Vec<PhaseTemplate>, TemplateError> {
    let name = required_name(name)?;
    let description = optional_text(description);
    Ok(map_step(templates, phase_id, step_id, |step| {
        step.name = name.clone();
        step.description = description.clone();
    }))
}

/// Swap a step with its neighbour inside the same phase. No-op at either boundary.
#[must_use]
pub fn move_step(
    templates: &[PhaseTemplate],
    phase_id: &PhaseId,
    step_id: &StepId,
    direction: MoveDirection,
) -> Vec<PhaseTemplate> {
    map_phase(templates, phase_id, |phase| {
        if let Some(idx) = phase.steps.iter().position(|s| &s.id == step_id) {
            swap_with_neighbour(&mut phase.steps, idx, direction);
        }
    })
}

//
// ─── DELETION ──────────────────────────────────────────────────────────────────
//

/// A destructive template edit waiting for explicit confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingDeletion {
    Phase { phase_id: PhaseId },
    Step { phase_id: PhaseId, step_id: StepId },
}

impl PendingDeletion {
    /// Text shown in the confirmation dialog.
    #[must_use]
    pub fn prompt(&self) -> &'static str {
        match self {
            PendingDeletion::Phase { .. } => {
                "Are you sure you want to delete this phase? This cannot be undone."
            }
            PendingDeletion::Step { .. } => "Are you sure you want to delete this step?",
        }
    }

    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            PendingDeletion::Phase { .. } => "Delete Phase",
            PendingDeletion::Step { .. } => "Delete Step",
        }
    }

    /// Apply the delete. Unknown ids leave the list unchanged.
    #[must_use]
    pub fn confirm(self, templates: &[PhaseTemplate]) -> Vec<PhaseTemplate> {
        match self {
            PendingDeletion::Phase { phase_id } => templates
                .iter()
                .filter(|phase| phase.id != phase_id)
                .cloned()
                .collect(),
            PendingDeletion::Step { phase_id, step_id } => {
                map_phase(templates, &phase_id, |phase| {
                    phase.steps.retain(|step| step.id != step_id);
                })
            }
        }
    }
}

//
// ─── HELPERS ───────────────────────────────────────────────────────────────────
//

fn required_name(name: &str) -> Result<String, TemplateError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(TemplateError::EmptyName);
    }
    Ok(trimmed.to_owned())
}

fn optional_text(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

fn map_phase(
    templates: &[PhaseTemplate],
    phase_id: &PhaseId,
    mut edit: impl FnMut(&mut PhaseTemplate),
) -> Vec<PhaseTemplate> {
    templates
        .iter()
        .cloned()
        .map(|mut phase| {
            if &phase.id == phase_id {
                edit(&mut phase);
            }
            phase
        })
        .collect()
}

fn map_step(
    templates: &[PhaseTemplate],
    phase_id: &PhaseId,
    step_id: &StepId,
    mut edit: impl FnMut(&mut StepTemplate),
) -> Vec<PhaseTemplate> {
    map_phase(templates, phase_id, |phase| {
        if let Some(step) = phase.steps.iter_mut().find(|s| &s.id == step_id) {
            edit(step);
        }
    })
}

fn swap_with_neighbour<T>(items: &mut [T], idx: usize, direction: MoveDirection) {
    let target = match direction {
        MoveDirection::Up => idx.checked_sub(1),
        MoveDirection::Down => Some(idx + 1).filter(|&t| t < items.len()),
    };
    if let Some(target) = target {
        items.swap(idx, target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Client, ClientDraft, ClientId};

    fn phase_ids(templates: &[PhaseTemplate]) -> Vec<&str> {
        templates.iter().map(|t| t.id.as_str()).collect()
    }

    fn step_ids(template: &PhaseTemplate) -> Vec<&str> {
        template.steps.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn zeus_clones_every_template_in_order() {
        let templates = default_phase_templates();
        let phases = create_phases_from_templates(ProductType::Zeus, &ModuleSet::new(), &templates);
        let ids: Vec<_> = phases.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, phase_ids(&templates));
    }

    #[test]
    fn hestia_keeps_matching_and_unrestricted_templates() {
        let mut templates = default_phase_templates();
        templates = add_phase(&templates, "Kickoff", ModuleSet::new()).unwrap();
        let phases = create_phases_from_templates(
            ProductType::Hestia,
            &ModuleSet::from([ModuleKey::Design]),
            &templates,
        );
        let names: Vec<_> = phases.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Design & Material Phase", "Kickoff"]);
        assert!(phases.iter().flat_map(|p| &p.steps).all(|s| !s.completed));
        assert!(phases[0].steps[0].description.is_some());
    }

    #[test]
    fn blank_names_are_rejected() {
        let templates = default_phase_templates();
        assert_eq!(
            add_phase(&templates, "  ", ModuleSet::new()),
            Err(TemplateError::EmptyName)
        );
        assert_eq!(
            add_step(&templates, &PhaseId::new("review"), ""),
            Err(TemplateError::EmptyName)
        );
        assert_eq!(
            rename_step(&templates, &PhaseId::new("review"), &StepId::new("r1"), "\t"),
            Err(TemplateError::EmptyName)
        );
    }

    #[test]
    fn moves_are_no_ops_at_boundaries() {
        let templates = default_phase_templates();

        let first_step_up = move_step(
            &templates,
            &PhaseId::new("vetting"),
            &StepId::new("v1"),
            MoveDirection::Up,
        );
        assert_eq!(first_step_up, templates);

        let last_phase_down = move_phase(&templates, &PhaseId::new("dispute"), MoveDirection::Down);
        assert_eq!(last_phase_down, templates);
    }

    #[test]
    fn moves_swap_neighbours() {
        let templates = default_phase_templates();

        let moved = move_phase(&templates, &PhaseId::new("review"), MoveDirection::Up);
        assert_eq!(
            phase_ids(&moved),
            vec!["review", "vetting", "design", "inspection", "dispute"]
        );

        let moved = move_step(
            &templates,
            &PhaseId::new("design"),
            &StepId::new("d2"),
            MoveDirection::Down,
        );
        assert_eq!(step_ids(&moved[2]), vec!["d1", "d3", "d2", "d4"]);
        assert_eq!(step_ids(&templates[2]), vec!["d1", "d2", "d3", "d4"]);
    }

    #[test]
    fn update_and_toggle_module_membership() {
        let templates = default_phase_templates();
        let id = PhaseId::new("inspection");

        let updated = update_phase(
            &templates,
            &id,
            " Inspections ",
            ModuleSet::from([ModuleKey::Inspection, ModuleKey::Dispute]),
        )
        .unwrap();
        assert_eq!(updated[3].name, "Inspections");
        assert_eq!(updated[3].modules.len(), 2);

        let toggled = toggle_phase_module(&updated, &id, ModuleKey::Dispute);
        assert_eq!(toggled[3].modules, ModuleSet::from([ModuleKey::Inspection]));
    }

    #[test]
    fn saving_a_form_writes_name_modules_and_description_together() {
        let templates = default_phase_templates();

        let added = save_phase(&templates, None, " Permit Phase ", ModuleSet::new(), " City sign-off ")
            .unwrap();
        assert_eq!(added.len(), templates.len() + 1);
        let permit = &added[templates.len()];
        assert_eq!(permit.name, "Permit Phase");
        assert_eq!(permit.description.as_deref(), Some("City sign-off"));
        assert!(permit.steps.is_empty());

        let review = PhaseId::new("review");
        let edited = save_phase(
            &templates,
            Some(&review),
            "Reviews",
            ModuleSet::from([ModuleKey::Review]),
            "   ",
        )
        .unwrap();
        assert_eq!(edited[1].name, "Reviews");
        assert_eq!(edited[1].description, None);
        assert_eq!(edited[1].steps, templates[1].steps);

        let step = save_step(&templates, &review, &StepId::new("r1"), "Walkthrough", "On site")
            .unwrap();
        assert_eq!(step[1].steps[0].name, "Walkthrough");
        assert_eq!(step[1].steps[0].description.as_deref(), Some("On site"));

        assert_eq!(
            save_step(&templates, &review, &StepId::new("r1"), " ", "kept?"),
            Err(TemplateError::EmptyName)
        );
    }

    #[test]
    fn unknown_ids_are_no_ops() {
        let templates = default_phase_templates();
        let ghost = PhaseId::new("ghost");
        assert_eq!(toggle_phase_module(&templates, &ghost, ModuleKey::Review), templates);
        assert_eq!(add_step(&templates, &ghost, "Step").unwrap(), templates);
        assert_eq!(
            set_step_description(&templates, &PhaseId::new("review"), &StepId::new("zz"), "x"),
            templates
        );
    }

    #[test]
    fn deletion_goes_through_confirmation() {
        let templates = default_phase_templates();

        let pending = PendingDeletion::Phase {
            phase_id: PhaseId::new("design"),
        };
        assert_eq!(
            pending.prompt(),
            "Are you sure you want to delete this phase? This cannot be undone."
        );
        let without_design = pending.confirm(&templates);
        assert_eq!(
            phase_ids(&without_design),
            vec!["vetting", "review", "inspection", "dispute"]
        );

        let pending = PendingDeletion::Step {
            phase_id: PhaseId::new("review"),
            step_id: StepId::new("r3"),
        };
        assert_eq!(pending.prompt(), "Are you sure you want to delete this step?");
        let without_step = pending.confirm(&templates);
        assert_eq!(step_ids(&without_step[1]), vec!["r1", "r2", "r4"]);
        assert_eq!(templates[1].steps.len(), 4);
    }

    #[test]
    fn template_edits_do_not_touch_existing_clients() {
        let templates = default_phase_templates();
        let client: Client = ClientDraft {
            name: "Ann Lee".into(),
            email: "ann@example.com".into(),
            product: ProductType::Zeus,
            modules: ModuleSet::new(),
        }
        .validate()
        .unwrap()
        .assign_id(ClientId::new("ann"), &templates);
        let before = client.phases.clone();

        let review = PhaseId::new("review");
        let edited = rename_step(&templates, &review, &StepId::new("r1"), "Renamed").unwrap();
        let edited = set_phase_description(&edited, &review, "New text");
        let edited = move_phase(&edited, &review, MoveDirection::Up);
        let edited = PendingDeletion::Phase {
            phase_id: PhaseId::new("dispute"),
        }
        .confirm(&edited);

        assert_ne!(edited, templates);
        assert_eq!(client.phases, before);
        assert_eq!(client.phases[1].steps[0].name, "Contract review initiated");
    }
}
