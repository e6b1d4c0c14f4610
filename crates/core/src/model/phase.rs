use serde::{Deserialize, Serialize};

use crate::model::ids::{PhaseId, StepId};
use crate::model::module::ModuleSet;
use crate::progress::percent;

//
// ─── CLIENT-OWNED PHASES ───────────────────────────────────────────────────────
//

/// An atomic, independently completable unit of work within a phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub id: StepId,
    pub name: String,
    pub completed: bool,
    /// Per-client text, seeded from the template at clone time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// An ordered stage of the service process, owned by a single client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    pub id: PhaseId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Empty means the phase is shown for every product and module selection.
    #[serde(default)]
    pub modules: ModuleSet,
    pub steps: Vec<Step>,
}

impl Phase {
    /// True when every step is completed.
    ///
    /// A phase without steps is vacuously complete.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.steps.iter().all(|step| step.completed)
    }

    #[must_use]
    pub fn completed_steps(&self) -> usize {
        self.steps.iter().filter(|step| step.completed).count()
    }

    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.steps.len()
    }

    /// Share of completed steps in this phase, 0 for an empty phase.
    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        percent(self.completed_steps(), self.total_steps())
    }

    /// First step in stored order that is not completed.
    #[must_use]
    pub fn next_step(&self) -> Option<&Step> {
        self.steps.iter().find(|step| !step.completed)
    }
}

//
// ─── TEMPLATES ─────────────────────────────────────────────────────────────────
//

/// Admin-managed master definition of a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepTemplate {
    pub id: StepId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Admin-managed master definition of a phase, cloned into new clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseTemplate {
    pub id: PhaseId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub modules: ModuleSet,
    pub steps: Vec<StepTemplate>,
}

impl PhaseTemplate {
    /// Produce a fresh client-owned phase with every step incomplete.
    #[must_use]
    pub fn instantiate(&self) -> Phase {
        Phase {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            modules: self.modules.clone(),
            steps: self
                .steps
                .iter()
                .map(|step| Step {
                    id: step.id.clone(),
                    name: step.name.clone(),
                    completed: false,
                    description: step.description.clone(),
                })
                .collect(),
        }
    }
}
