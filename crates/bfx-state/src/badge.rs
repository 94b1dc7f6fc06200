//! # Status Badges
//!
//! Pure lookups from a status code to the badge color and label. Neither
//! lookup fails: an unknown code gets the gray badge and is shown as-is.

use serde::{Deserialize, Serialize};

use crate::status::ContractStatus;

/// Badge color variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeColor {
    #[default]
    Gray,
    Blue,
    Yellow,
    Orange,
    Green,
    Purple,
    Indigo,
    Teal,
    Red,
}

impl BadgeColor {
    /// CSS utility classes for the badge.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Gray => "bg-gray-100 text-gray-800",
            Self::Blue => "bg-blue-100 text-blue-800",
            Self::Yellow => "bg-yellow-100 text-yellow-800",
            Self::Orange => "bg-orange-100 text-orange-800",
            Self::Green => "bg-green-100 text-green-800",
            Self::Purple => "bg-purple-100 text-purple-800",
            Self::Indigo => "bg-indigo-100 text-indigo-800",
            Self::Teal => "bg-teal-100 text-teal-800",
            Self::Red => "bg-red-100 text-red-800",
        }
    }

    /// Lower-case color name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Gray => "gray",
            Self::Blue => "blue",
            Self::Yellow => "yellow",
            Self::Orange => "orange",
            Self::Green => "green",
            Self::Purple => "purple",
            Self::Indigo => "indigo",
            Self::Teal => "teal",
            Self::Red => "red",
        }
    }
}

impl std::fmt::Display for BadgeColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl ContractStatus {
    /// Badge color for this status.
    pub fn color(&self) -> BadgeColor {
        match self {
            Self::Draft => BadgeColor::Gray,
            Self::PendingApproval => BadgeColor::Yellow,
            Self::AwaitingFunds => BadgeColor::Orange,
            Self::Funded => BadgeColor::Blue,
            Self::Active => BadgeColor::Indigo,
            Self::GoodsShipped => BadgeColor::Purple,
            Self::GoodsReceived => BadgeColor::Teal,
            Self::Completed => BadgeColor::Green,
            Self::Disputed | Self::Cancelled | Self::Terminated => BadgeColor::Red,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::PendingApproval => "Pending Approval",
            Self::AwaitingFunds => "Awaiting Funds",
            Self::Funded => "Funded",
            Self::Active => "Active",
            Self::GoodsShipped => "Goods Shipped",
            Self::GoodsReceived => "Goods Received",
            Self::Completed => "Completed",
            Self::Disputed => "Disputed",
            Self::Cancelled => "Cancelled",
            Self::Terminated => "Terminated",
        }
    }
}

/// Badge color for a raw status code. Unknown codes get [`BadgeColor::Gray`].
pub fn status_color(status: &str) -> BadgeColor {
    ContractStatus::parse_lenient(status)
        .map(|s| s.color())
        .unwrap_or_default()
}

/// Display label for a raw status code. Unknown codes are returned unchanged.
pub fn status_text(status: &str) -> &str {
    match ContractStatus::parse_lenient(status) {
        Some(s) => s.label(),
        None => status,
    }
}
