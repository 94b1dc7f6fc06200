//! # Contract Actions
//!
//! The three status-changing buttons on the contract detail screen. Each is
//! offered in exactly one status, so at most one button renders at a time.
//!
//! | Action  | Button            | Offered in        | Requests        |
//! |---------|-------------------|-------------------|-----------------|
//! | approve | Approve Contract  | `DRAFT`           | `PENDINGAPPROVAL` |
//! | fund    | Fund Escrow       | `PENDINGAPPROVAL` | `FUNDED`        |
//! | release | Release Funds     | `GOODSRECEIVED`   | `COMPLETED`     |
//!
//! Availability is advisory. Sending an action is a plain status update;
//! nothing here decides whether the backend will accept it.

use serde::{Deserialize, Serialize};

use crate::status::{check_status, ContractStatus, StatusError};

/// A status-changing action on a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractAction {
    /// Approve a draft.
    Approve,
    /// Fund the escrow.
    Fund,
    /// Release escrowed funds to the seller.
    Release,
}

impl ContractAction {
    /// All actions in lifecycle order.
    pub const ALL: [ContractAction; 3] = [Self::Approve, Self::Fund, Self::Release];

    /// Button label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Approve => "Approve Contract",
            Self::Fund => "Fund Escrow",
            Self::Release => "Release Funds",
        }
    }

    /// Endpoint verb (`approve`, `fund`, `release`).
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Fund => "fund",
            Self::Release => "release",
        }
    }

    /// The status in which the button is shown.
    pub fn offered_in(&self) -> ContractStatus {
        match self {
            Self::Approve => ContractStatus::Draft,
            Self::Fund => ContractStatus::PendingApproval,
            Self::Release => ContractStatus::GoodsReceived,
        }
    }

    /// The status the action asks the backend to set.
    pub fn target_status(&self) -> ContractStatus {
        match self {
            Self::Approve => ContractStatus::PendingApproval,
            Self::Fund => ContractStatus::Funded,
            Self::Release => ContractStatus::Completed,
        }
    }

    /// Whether the button renders for the raw `status`.
    pub fn is_available(&self, status: &str) -> bool {
        check_status(status, self.offered_in())
    }
}

impl std::fmt::Display for ContractAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.verb())
    }
}

impl std::str::FromStr for ContractAction {
    type Err = StatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "approve" => Ok(Self::Approve),
            "fund" => Ok(Self::Fund),
            "release" => Ok(Self::Release),
            _ => Err(StatusError::UnknownAction(s.to_string())),
        }
    }
}

/// Every action whose button renders for the raw `status`.
pub fn visible_actions(status: &str) -> Vec<ContractAction> {
    ContractAction::ALL
        .into_iter()
        .filter(|a| a.is_available(status))
        .collect()
}

/// The single action offered for the raw `status`, if any.
pub fn available_action(status: &str) -> Option<ContractAction> {
    ContractAction::ALL
        .into_iter()
        .find(|a| a.is_available(status))
}
