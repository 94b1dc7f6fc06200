//! # Contract View
//!
//! Everything the contract detail screen derives from one status string,
//! resolved in a single call.

use serde::Serialize;

use crate::action::{available_action, ContractAction};
use crate::badge::{status_color, status_text, BadgeColor};
use crate::escrow::{escrow_state, EscrowState};
use crate::milestone::{current_step_index, lifecycle_steps, milestones, Milestone, MilestoneTimes};
use crate::status::ContractStatus;

/// Derived rendering model of a contract status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractView {
    /// The status exactly as received.
    pub code: String,
    /// The parsed status, if the code is recognized.
    pub status: Option<ContractStatus>,
    /// Badge label.
    pub label: String,
    /// Badge color.
    pub color: BadgeColor,
    /// The action button to render, if any.
    pub action: Option<ContractAction>,
    /// Escrow badge, if the status is recognized.
    pub escrow: Option<EscrowState>,
    /// Escrow timeline.
    pub milestones: Vec<Milestone>,
    /// Index into the progress steps.
    pub current_step: Option<usize>,
}

impl ContractView {
    /// Resolve the view for a raw status code.
    ///
    /// Never fails: an unknown code yields a gray badge labelled with the
    /// code itself, no action, no escrow badge and no completed milestones.
    pub fn resolve(code: &str, times: &MilestoneTimes) -> Self {
        let status = ContractStatus::parse_lenient(code);
        Self {
            code: code.to_string(),
            status,
            label: status_text(code).to_string(),
            color: status_color(code),
            action: available_action(code),
            escrow: status.map(escrow_state),
            milestones: milestones(status, times),
            current_step: status.and_then(current_step_index),
        }
    }

    /// Label of the current progress step.
    pub fn current_step_label(&self) -> Option<&'static str> {
        self.current_step
            .and_then(|i| lifecycle_steps().get(i))
            .map(|step| step.label)
    }

    /// Number of completed milestones.
    pub fn completed_milestones(&self) -> usize {
        self.milestones.iter().filter(|m| m.completed).count()
    }

    /// Whether the code was recognized.
    pub fn is_recognized(&self) -> bool {
        self.status.is_some()
    }
}
