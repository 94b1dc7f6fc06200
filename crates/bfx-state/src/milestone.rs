//! # Milestones and Progress Steps
//!
//! Two derived views of where a contract sits in its lifecycle:
//!
//! - **Milestones**: the escrow timeline. Each milestone is complete when
//!   the status belongs to its completion set.
//! - **Lifecycle steps**: the horizontal progress indicator. Each step
//!   groups one or more statuses.
//!
//! Neither is stored. Both are recomputed from the status on every render,
//! so off-path statuses (`DISPUTED`, `CANCELLED`, `TERMINATED`) only show
//! the creation milestone: the status alone does not say how far the
//! contract got before it left the happy path.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use bfx_core::Timestamp;

use crate::status::{ContractStatus, StatusQuery, StatusSet};

/// Timeline milestone identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneKey {
    Created,
    Approved,
    Funded,
    Shipped,
    Received,
    Completed,
}

impl MilestoneKey {
    /// Timeline order.
    pub const ALL: [MilestoneKey; 6] = [
        Self::Created,
        Self::Approved,
        Self::Funded,
        Self::Shipped,
        Self::Received,
        Self::Completed,
    ];

    /// Wire key (`created`, `approved`, …).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Approved => "approved",
            Self::Funded => "funded",
            Self::Shipped => "shipped",
            Self::Received => "received",
            Self::Completed => "completed",
        }
    }

    /// Timeline label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Created => "Contract Created",
            Self::Approved => "Contract Approved",
            Self::Funded => "Escrow Funded",
            Self::Shipped => "Goods Shipped",
            Self::Received => "Goods Received",
            Self::Completed => "Funds Released",
        }
    }

    /// Statuses in which this milestone counts as reached.
    pub fn completed_in(&self) -> StatusSet {
        match self {
            Self::Created => StatusSet::ANY,
            Self::Approved => StatusSet::APPROVED,
            Self::Funded => StatusSet::FUNDED,
            Self::Shipped => StatusSet::SHIPPED,
            Self::Received => StatusSet::RECEIVED,
            Self::Completed => StatusSet::COMPLETED,
        }
    }
}

impl std::fmt::Display for MilestoneKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Known milestone times, keyed by milestone.
pub type MilestoneTimes = BTreeMap<MilestoneKey, Timestamp>;

/// One entry of the escrow timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub key: MilestoneKey,
    pub label: String,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
}

/// Derive the timeline for `status`.
///
/// Times are attached only to completed milestones; a time supplied for a
/// milestone the status has not reached is ignored.
pub fn milestones(status: Option<ContractStatus>, times: &MilestoneTimes) -> Vec<Milestone> {
    MilestoneKey::ALL
        .into_iter()
        .map(|key| {
            let completed = status.is_some_and(|s| key.completed_in().contains(s));
            Milestone {
                key,
                label: key.label().to_string(),
                completed,
                timestamp: if completed { times.get(&key).copied() } else { None },
            }
        })
        .collect()
}

// ─── Progress steps ──────────────────────────────────────────────────

/// One step of the progress indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleStep {
    pub statuses: StatusSet,
    pub label: &'static str,
    pub icon: &'static str,
}

const LIFECYCLE_STEPS: [LifecycleStep; 7] = [
    LifecycleStep {
        statuses: StatusSet::new(&[ContractStatus::Draft]),
        label: "Draft",
        icon: "file-text",
    },
    LifecycleStep {
        statuses: StatusSet::new(&[ContractStatus::PendingApproval]),
        label: "Approval",
        icon: "check-circle",
    },
    LifecycleStep {
        statuses: StatusSet::new(&[ContractStatus::AwaitingFunds, ContractStatus::Funded]),
        label: "Funding",
        icon: "wallet",
    },
    LifecycleStep {
        statuses: StatusSet::new(&[ContractStatus::Active]),
        label: "In Progress",
        icon: "activity",
    },
    LifecycleStep {
        statuses: StatusSet::new(&[ContractStatus::GoodsShipped]),
        label: "Shipped",
        icon: "truck",
    },
    LifecycleStep {
        statuses: StatusSet::new(&[ContractStatus::GoodsReceived]),
        label: "Delivered",
        icon: "package",
    },
    LifecycleStep {
        statuses: StatusSet::new(&[ContractStatus::Completed]),
        label: "Completed",
        icon: "award",
    },
];

/// The progress steps, in order.
pub fn lifecycle_steps() -> &'static [LifecycleStep] {
    &LIFECYCLE_STEPS
}

/// Index of the step containing `status`; `None` for off-path statuses.
pub fn current_step_index(status: ContractStatus) -> Option<usize> {
    LIFECYCLE_STEPS
        .iter()
        .position(|step| step.statuses.contains(status))
}
