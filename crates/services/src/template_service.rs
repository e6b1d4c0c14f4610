use std::sync::Arc;

use portal_core::model::{ModuleKey, ModuleSet, PhaseId, PhaseTemplate, StepId};
use portal_core::template::{self, MoveDirection, PendingDeletion};
use storage::repository::TemplateRepository;
use tokio::sync::Mutex;

use crate::error::TemplateServiceError;

/// A single admin edit to the template list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateEdit {
    AddPhase {
        name: String,
        modules: ModuleSet,
    },
    UpdatePhase {
        phase_id: PhaseId,
        name: String,
        modules: ModuleSet,
    },
    SetPhaseDescription {
        phase_id: PhaseId,
        description: String,
    },
    TogglePhaseModule {
        phase_id: PhaseId,
        module: ModuleKey,
    },
    MovePhase {
        phase_id: PhaseId,
        direction: MoveDirection,
    },
    AddStep {
        phase_id: PhaseId,
        name: String,
    },
    RenameStep {
        phase_id: PhaseId,
        step_id: StepId,
        name: String,
    },
    SetStepDescription {
        phase_id: PhaseId,
        step_id: StepId,
        description: String,
    },
    MoveStep {
        phase_id: PhaseId,
        step_id: StepId,
        direction: MoveDirection,
    },
    /// The whole phase form; `phase_id: None` adds a phase.
    SavePhase {
        phase_id: Option<PhaseId>,
        name: String,
        modules: ModuleSet,
        description: String,
    },
    /// The whole step form.
    SaveStep {
        phase_id: PhaseId,
        step_id: StepId,
        name: String,
        description: String,
    },
}

impl TemplateEdit {
    fn apply_to(
        &self,
        templates: &[PhaseTemplate],
    ) -> Result<Vec<PhaseTemplate>, TemplateServiceError> {
        let next = match self {
            TemplateEdit::AddPhase { name, modules } => {
                template::add_phase(templates, name, modules.clone())?
            }
            TemplateEdit::UpdatePhase {
                phase_id,
                name,
                modules,
            } => template::update_phase(templates, phase_id, name, modules.clone())?,
            TemplateEdit::SetPhaseDescription {
                phase_id,
                description,
            } => template::set_phase_description(templates, phase_id, description),
            TemplateEdit::TogglePhaseModule { phase_id, module } => {
                template::toggle_phase_module(templates, phase_id, *module)
            }
            TemplateEdit::MovePhase {
                phase_id,
                direction,
            } => template::move_phase(templates, phase_id, *direction),
            TemplateEdit::AddStep { phase_id, name } => {
                template::add_step(templates, phase_id, name)?
            }
            TemplateEdit::RenameStep {
                phase_id,
                step_id,
                name,
            } => template::rename_step(templates, phase_id, step_id, name)?,
            TemplateEdit::SetStepDescription {
                phase_id,
                step_id,
                description,
            } => template::set_step_description(templates, phase_id, step_id, description),
            TemplateEdit::MoveStep {
                phase_id,
                step_id,
                direction,
            } => template::move_step(templates, phase_id, step_id, *direction),
            TemplateEdit::SavePhase {
                phase_id,
                name,
                modules,
                description,
            } => template::save_phase(
                templates,
                phase_id.as_ref(),
                name,
                modules.clone(),
                description,
            )?,
            TemplateEdit::SaveStep {
                phase_id,
                step_id,
                name,
                description,
            } => template::save_step(templates, phase_id, step_id, name, description)?,
        };
        Ok(next)
    }

    fn label(&self) -> &'static str {
        match self {
            TemplateEdit::AddPhase { .. } => "add_phase",
            TemplateEdit::UpdatePhase { .. } => "update_phase",
            TemplateEdit::SetPhaseDescription { .. } => "set_phase_description",
            TemplateEdit::TogglePhaseModule { .. } => "toggle_phase_module",
            TemplateEdit::MovePhase { .. } => "move_phase",
            TemplateEdit::AddStep { .. } => "add_step",
            TemplateEdit::RenameStep { .. } => "rename_step",
            TemplateEdit::SetStepDescription { .. } => "set_step_description",
            TemplateEdit::MoveStep { .. } => "move_step",
            TemplateEdit::SavePhase { .. } => "save_phase",
            TemplateEdit::SaveStep { .. } => "save_step",
        }
    }
}

/// Loads, edits and stores the template list as whole snapshots.
///
/// Edits never reach existing clients; only clients created afterwards see them.
#[derive(Clone)]
pub struct TemplateService {
    templates: Arc<dyn TemplateRepository>,
    write_lock: Arc<Mutex<()>>,
}

impl TemplateService {
    #[must_use]
    pub fn new(templates: Arc<dyn TemplateRepository>) -> Self {
        Self {
            templates,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// # Errors
    ///
    /// Returns `TemplateServiceError::Storage` if the templates cannot be loaded.
    pub async fn list_templates(&self) -> Result<Vec<PhaseTemplate>, TemplateServiceError> {
        Ok(self.templates.load_templates().await?)
    }

    /// Apply one edit and store the resulting snapshot.
    ///
    /// # Errors
    ///
    /// Returns `TemplateServiceError::Template` if a required name is blank.
    /// Returns `TemplateServiceError::Storage` if persistence fails.
    pub async fn apply(
        &self,
        edit: &TemplateEdit,
    ) -> Result<Vec<PhaseTemplate>, TemplateServiceError> {
        let _guard = self.write_lock.lock().await;
        let current = self.templates.load_templates().await?;
        let next = edit.apply_to(&current)?;
        if next != current {
            self.templates.replace_templates(&next).await?;
        }
        tracing::debug!(edit = edit.label(), phases = next.len(), "applied template edit");
        Ok(next)
    }

    /// Carry out a delete the admin has confirmed.
    ///
    /// # Errors
    ///
    /// Returns `TemplateServiceError::Storage` if persistence fails.
    pub async fn confirm_deletion(
        &self,
        pending: PendingDeletion,
    ) -> Result<Vec<PhaseTemplate>, TemplateServiceError> {
        let _guard = self.write_lock.lock().await;
        let current = self.templates.load_templates().await?;
        tracing::info!(?pending, "deleting from templates");
        let next = pending.confirm(&current);
        self.templates.replace_templates(&next).await?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use portal_core::template::TemplateError;
    use storage::repository::InMemoryRepository;

    fn service() -> TemplateService {
        TemplateService::new(Arc::new(InMemoryRepository::new()))
    }

    #[tokio::test]
    async fn add_phase_appends_an_empty_phase() {
        let service = service();
        let next = service
            .apply(&TemplateEdit::AddPhase {
                name: "  Permit Phase ".into(),
                modules: ModuleSet::new(),
            })
            .await
            .unwrap();
        let added = next.last().unwrap();
        assert_eq!(next.len(), 6);
        assert_eq!(added.name, "Permit Phase");
        assert!(added.steps.is_empty());
        assert_eq!(service.list_templates().await.unwrap(), next);
    }

    #[tokio::test]
    async fn blank_names_are_rejected_without_writing() {
        let service = service();
        let before = service.list_templates().await.unwrap();
        let err = service
            .apply(&TemplateEdit::AddStep {
                phase_id: PhaseId::new("vetting"),
                name: "   ".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, TemplateServiceError::Template(TemplateError::EmptyName)));
        assert_eq!(service.list_templates().await.unwrap(), before);
    }

    #[tokio::test]
    async fn moves_are_persisted() {
        let service = service();
        let next = service
            .apply(&TemplateEdit::MovePhase {
                phase_id: PhaseId::new("review"),
                direction: MoveDirection::Up,
            })
            .await
            .unwrap();
        assert_eq!(next[0].id.as_str(), "review");

        let stored = service.list_templates().await.unwrap();
        assert_eq!(stored[1].id.as_str(), "vetting");
    }

    #[tokio::test]
    async fn rejected_form_save_leaves_templates_untouched() {
        let service = service();
        let before = service.list_templates().await.unwrap();
        let err = service
            .apply(&TemplateEdit::SavePhase {
                phase_id: None,
                name: " ".into(),
                modules: ModuleSet::new(),
                description: "Permits and inspections".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, TemplateServiceError::Template(TemplateError::EmptyName)));
        assert_eq!(service.list_templates().await.unwrap(), before);

        let saved = service
            .apply(&TemplateEdit::SaveStep {
                phase_id: PhaseId::new("design"),
                step_id: StepId::new("d1"),
                name: "Layout review".into(),
                description: "Room by room".into(),
            })
            .await
            .unwrap();
        let stored = service.list_templates().await.unwrap();
        assert_eq!(stored, saved);
        let step = &stored[2].steps[0];
        assert_eq!(step.name, "Layout review");
        assert_eq!(step.description.as_deref(), Some("Room by room"));
    }

    #[tokio::test]
    async fn confirmed_step_deletion_removes_only_that_step() {
        let service = service();
        let next = service
            .confirm_deletion(PendingDeletion::Step {
                phase_id: PhaseId::new("design"),
                step_id: StepId::new("d2"),
            })
            .await
            .unwrap();
        let design = next.iter().find(|p| p.id.as_str() == "design").unwrap();
        let ids: Vec<_> = design.steps.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["d1", "d3", "d4"]);
    }
}
