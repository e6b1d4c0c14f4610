//! Derived progress views over a client's phase tree, and the step toggle.
//!
//! Every function here is pure: mutations return a new `Client` and leave the
//! input snapshot untouched, so callers can publish the result as the next state.

use crate::model::{Client, Phase, PhaseId, ProductType, Step, StepId};

/// `round(100 * done / total)` with halves rounded up; 0 when `total` is 0.
#[must_use]
pub fn percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let done = done.min(total) as u128;
    let total = total as u128;
    let rounded = (200 * done + total) / (2 * total);
    u8::try_from(rounded).unwrap_or(100)
}

/// Completion across every step of every phase, visible or not.
#[must_use]
pub fn progress_percent(phases: &[Phase]) -> u8 {
    let (done, total) = phases.iter().fold((0, 0), |(done, total), phase| {
        (done + phase.completed_steps(), total + phase.total_steps())
    });
    percent(done, total)
}

/// Phases the client is allowed to see, in stored order.
///
/// ZEUS sees everything. HESTIA sees phases with no module restriction plus
/// phases sharing at least one module with the purchase.
#[must_use]
pub fn visible_phases(client: &Client) -> Vec<&Phase> {
    match client.product {
        ProductType::Zeus => client.phases.iter().collect(),
        ProductType::Hestia => client
            .phases
            .iter()
            .filter(|phase| {
                phase.modules.is_empty() || phase.modules.intersects(&client.hestia_modules)
            })
            .collect(),
    }
}

/// Flip one step and recompute `progress` over the full phase set.
///
/// Unknown phase or step ids leave the client unchanged.
#[must_use]
pub fn toggle_step(client: &Client, phase_id: &PhaseId, step_id: &StepId) -> Client {
    let Some((phase_idx, step_idx)) = locate(client, phase_id, step_id) else {
        return client.clone();
    };
    let mut next = client.clone();
    let step = &mut next.phases[phase_idx].steps[step_idx];
    step.completed = !step.completed;
    next.with_recomputed_progress()
}

/// Replace the per-client description of a step. Blank text clears it.
#[must_use]
pub fn set_step_description(
    client: &Client,
    phase_id: &PhaseId,
    step_id: &StepId,
    description: &str,
) -> Client {
    let Some((phase_idx, step_idx)) = locate(client, phase_id, step_id) else {
        return client.clone();
    };
    let mut next = client.clone();
    next.phases[phase_idx].steps[step_idx].description = normalize_text(description);
    next
}

/// Replace the per-client description of a phase. Blank text clears it.
#[must_use]
pub fn set_phase_description(client: &Client, phase_id: &PhaseId, description: &str) -> Client {
    let Some(phase_idx) = client.phases.iter().position(|p| &p.id == phase_id) else {
        return client.clone();
    };
    let mut next = client.clone();
    next.phases[phase_idx].description = normalize_text(description);
    next
}

fn locate(client: &Client, phase_id: &PhaseId, step_id: &StepId) -> Option<(usize, usize)> {
    let phase_idx = client.phases.iter().position(|p| &p.id == phase_id)?;
    let step_idx = client.phases[phase_idx]
        .steps
        .iter()
        .position(|s| &s.id == step_id)?;
    Some((phase_idx, step_idx))
}

fn normalize_text(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

//
// ─── CURRENT PHASE ─────────────────────────────────────────────────────────────
//

/// Where a client stands in an ordered list of phases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseOverview<'a> {
    /// Phases before `current`.
    pub completed: Vec<&'a Phase>,
    /// First phase in order that is not fully complete.
    pub current: Option<&'a Phase>,
    /// Phases after `current`.
    pub upcoming: Vec<&'a Phase>,
    /// First incomplete step of `current`.
    pub next_step: Option<&'a Step>,
}

impl PhaseOverview<'_> {
    /// True when no phase is left to work on.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.current.is_none()
    }
}

/// Scan phases in stored order and split them around the current one.
///
/// A phase with no steps counts as complete and is skipped over.
#[must_use]
pub fn phase_overview<'a, I>(phases: I) -> PhaseOverview<'a>
where
    I: IntoIterator<Item = &'a Phase>,
{
    let mut overview = PhaseOverview {
        completed: Vec::new(),
        current: None,
        upcoming: Vec::new(),
        next_step: None,
    };

    for phase in phases {
        if overview.current.is_some() {
            overview.upcoming.push(phase);
        } else if phase.is_complete() {
            overview.completed.push(phase);
        } else {
            overview.current = Some(phase);
            overview.next_step = phase.next_step();
        }
    }

    overview
}
