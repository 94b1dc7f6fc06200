//! # Escrow Badge
//!
//! Where the contract funds sit, as implied by the status. Simulated: no
//! ledger is consulted.

use serde::{Deserialize, Serialize};

use crate::badge::BadgeColor;
use crate::status::{ContractStatus, StatusQuery, StatusSet};

/// Escrow state shown next to the contract amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EscrowState {
    /// Not yet funded.
    Pending,
    /// Funds held in escrow.
    Held,
    /// Funds paid out to the seller.
    Released,
    /// Funds frozen pending dispute resolution.
    Disputed,
    /// Funds returned to the buyer.
    Refunded,
}

impl EscrowState {
    /// Badge label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Held => "Held in Escrow",
            Self::Released => "Released",
            Self::Disputed => "Frozen",
            Self::Refunded => "Refunded",
        }
    }

    /// Badge color.
    pub fn color(&self) -> BadgeColor {
        match self {
            Self::Pending => BadgeColor::Yellow,
            Self::Held => BadgeColor::Blue,
            Self::Released => BadgeColor::Green,
            Self::Disputed => BadgeColor::Red,
            Self::Refunded => BadgeColor::Gray,
        }
    }
}

impl std::fmt::Display for EscrowState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Escrow state implied by `status`.
pub fn escrow_state(status: ContractStatus) -> EscrowState {
    if StatusSet::PRE_FUNDING.contains(status) {
        EscrowState::Pending
    } else if StatusSet::ESCROW_HELD.contains(status) {
        EscrowState::Held
    } else if StatusSet::CLOSED_EARLY.contains(status) {
        EscrowState::Refunded
    } else if status == ContractStatus::Disputed {
        EscrowState::Disputed
    } else {
        EscrowState::Released
    }
}
