use portal_core::model::{Client, ClientId, Phase, PhaseId, StepId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepRowVm {
    pub id: StepId,
    pub name: String,
    pub description: Option<String>,
    pub completed: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhaseRowVm {
    pub id: PhaseId,
    pub name: String,
    pub description: Option<String>,
    pub done: usize,
    pub total: usize,
    pub percent: u8,
    pub complete: bool,
    pub steps: Vec<StepRowVm>,
}

impl From<&Phase> for PhaseRowVm {
    fn from(phase: &Phase) -> Self {
        Self {
            id: phase.id.clone(),
            name: phase.name.clone(),
            description: phase.description.clone(),
            done: phase.completed_steps(),
            total: phase.total_steps(),
            percent: phase.progress_percent(),
            complete: phase.is_complete(),
            steps: phase
                .steps
                .iter()
                .map(|step| StepRowVm {
                    id: step.id.clone(),
                    name: step.name.clone(),
                    description: step.description.clone(),
                    completed: step.completed,
                })
                .collect(),
        }
    }
}

#[must_use]
pub fn map_phase_rows<'a, I>(phases: I) -> Vec<PhaseRowVm>
where
    I: IntoIterator<Item = &'a Phase>,
{
    phases.into_iter().map(PhaseRowVm::from).collect()
}

/// One entry of the admin client list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientRowVm {
    pub id: ClientId,
    pub name: String,
    pub email: String,
    pub initials: String,
    pub product_code: &'static str,
    pub product_class: &'static str,
    pub progress: u8,
}

impl From<&Client> for ClientRowVm {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id.clone(),
            name: client.name.clone(),
            email: client.email.clone(),
            initials: client.initials(),
            product_code: client.product.code(),
            product_class: client.product.css_class(),
            progress: client.progress,
        }
    }
}

#[must_use]
pub fn map_client_rows(clients: &[Client]) -> Vec<ClientRowVm> {
    clients.iter().map(ClientRowVm::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::model::{ModuleSet, Step};

    #[test]
    fn phase_row_counts_completed_steps() {
        let phase = Phase {
            id: PhaseId::new("review"),
            name: "Review Phase".into(),
            description: None,
            modules: ModuleSet::new(),
            steps: vec![
                Step {
                    id: StepId::new("r1"),
                    name: "Contract review initiated".into(),
                    description: None,
                    completed: true,
                },
                Step {
                    id: StepId::new("r2"),
                    name: "Scope of work documented".into(),
                    description: None,
                    completed: false,
                },
            ],
        };

        let rows = map_phase_rows([&phase]);
        assert_eq!(rows[0].done, 1);
        assert_eq!(rows[0].total, 2);
        assert_eq!(rows[0].percent, 50);
        assert!(!rows[0].complete);
        assert!(rows[0].steps[0].completed);
    }
}
