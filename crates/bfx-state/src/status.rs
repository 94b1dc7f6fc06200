//! # Contract Status
//!
//! The eleven status codes a contract can carry, and the membership test
//! the views use to gate buttons and milestones.
//!
//! ## Casing
//!
//! Backends and older screens disagree on casing and separators
//! (`DRAFT`, `draft`, `Draft`, `PENDING_APPROVAL`, `pending-approval`).
//! Parsing folds case and drops `_`, `-` and whitespace before matching.
//! The canonical code is upper case with no separators (`PENDINGAPPROVAL`).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use bfx_core::BfxError;

// ─── Status ──────────────────────────────────────────────────────────

/// Lifecycle status of a trade contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContractStatus {
    /// Being drafted; not yet approved.
    Draft,
    /// Approved by the initiating party, waiting on the counterparty.
    PendingApproval,
    /// Approved by both parties, escrow not yet funded.
    AwaitingFunds,
    /// Escrow holds the contract amount.
    Funded,
    /// Trade is in progress.
    Active,
    /// Seller has shipped the goods.
    GoodsShipped,
    /// Buyer has confirmed receipt.
    GoodsReceived,
    /// Funds released to the seller (terminal).
    Completed,
    /// A party has raised a dispute.
    Disputed,
    /// Withdrawn before performance (terminal).
    Cancelled,
    /// Ended early after performance began (terminal).
    Terminated,
}

impl ContractStatus {
    /// Every status, happy path first.
    pub const ALL: [ContractStatus; 11] = [
        Self::Draft,
        Self::PendingApproval,
        Self::AwaitingFunds,
        Self::Funded,
        Self::Active,
        Self::GoodsShipped,
        Self::GoodsReceived,
        Self::Completed,
        Self::Disputed,
        Self::Cancelled,
        Self::Terminated,
    ];

    /// The canonical code (`PENDINGAPPROVAL`).
    pub fn code(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::PendingApproval => "PENDINGAPPROVAL",
            Self::AwaitingFunds => "AWAITINGFUNDS",
            Self::Funded => "FUNDED",
            Self::Active => "ACTIVE",
            Self::GoodsShipped => "GOODSSHIPPED",
            Self::GoodsReceived => "GOODSRECEIVED",
            Self::Completed => "COMPLETED",
            Self::Disputed => "DISPUTED",
            Self::Cancelled => "CANCELLED",
            Self::Terminated => "TERMINATED",
        }
    }

    /// Parse a status code, ignoring case and `_`/`-`/whitespace separators.
    ///
    /// Returns `None` for anything unrecognized.
    pub fn parse_lenient(raw: &str) -> Option<Self> {
        let status = match fold_code(raw).as_str() {
            "draft" => Self::Draft,
            "pendingapproval" => Self::PendingApproval,
            "awaitingfunds" => Self::AwaitingFunds,
            "funded" => Self::Funded,
            "active" => Self::Active,
            "goodsshipped" => Self::GoodsShipped,
            "goodsreceived" => Self::GoodsReceived,
            "completed" => Self::Completed,
            "disputed" => Self::Disputed,
            "cancelled" | "canceled" => Self::Cancelled,
            "terminated" => Self::Terminated,
            _ => return None,
        };
        Some(status)
    }

    /// Position on the happy path (`DRAFT` = 0 … `COMPLETED` = 7).
    ///
    /// `None` for the off-path statuses.
    pub fn lifecycle_rank(&self) -> Option<u8> {
        match self {
            Self::Draft => Some(0),
            Self::PendingApproval => Some(1),
            Self::AwaitingFunds => Some(2),
            Self::Funded => Some(3),
            Self::Active => Some(4),
            Self::GoodsShipped => Some(5),
            Self::GoodsReceived => Some(6),
            Self::Completed => Some(7),
            Self::Disputed | Self::Cancelled | Self::Terminated => None,
        }
    }

    /// Whether no further lifecycle movement is expected.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::Terminated)
    }
}

/// Lower-case `raw` and drop `_`, `-` and whitespace.
fn fold_code(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '_' | '-') && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

impl std::fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for ContractStatus {
    type Err = StatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_lenient(s).ok_or_else(|| StatusError::Unknown(s.to_string()))
    }
}

impl Serialize for ContractStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for ContractStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors from status parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatusError {
    /// The code does not name any contract status.
    #[error("unknown contract status: {0:?}")]
    Unknown(String),

    /// The name does not match approve, fund or release.
    #[error("unknown contract action: {0:?}")]
    UnknownAction(String),
}

impl From<StatusError> for BfxError {
    fn from(e: StatusError) -> Self {
        BfxError::Validation(e.to_string())
    }
}

// ─── Status sets ─────────────────────────────────────────────────────

/// A named group of statuses used for membership tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSet(&'static [ContractStatus]);

impl StatusSet {
    /// Every recognized status.
    pub const ANY: StatusSet = StatusSet(&ContractStatus::ALL);

    /// Approved by at least the initiating party.
    pub const APPROVED: StatusSet = StatusSet(&[
        ContractStatus::PendingApproval,
        ContractStatus::AwaitingFunds,
        ContractStatus::Funded,
        ContractStatus::Active,
        ContractStatus::GoodsShipped,
        ContractStatus::GoodsReceived,
        ContractStatus::Completed,
    ]);

    /// Escrow has been funded.
    pub const FUNDED: StatusSet = StatusSet(&[
        ContractStatus::Funded,
        ContractStatus::Active,
        ContractStatus::GoodsShipped,
        ContractStatus::GoodsReceived,
        ContractStatus::Completed,
    ]);

    /// Goods are in transit or delivered.
    pub const SHIPPED: StatusSet = StatusSet(&[
        ContractStatus::GoodsShipped,
        ContractStatus::GoodsReceived,
        ContractStatus::Completed,
    ]);

    /// Buyer has confirmed delivery.
    pub const RECEIVED: StatusSet =
        StatusSet(&[ContractStatus::GoodsReceived, ContractStatus::Completed]);

    /// Funds released.
    pub const COMPLETED: StatusSet = StatusSet(&[ContractStatus::Completed]);

    /// Not yet approved or funded.
    pub const PRE_FUNDING: StatusSet = StatusSet(&[
        ContractStatus::Draft,
        ContractStatus::PendingApproval,
        ContractStatus::AwaitingFunds,
    ]);

    /// Escrow holds funds and the trade is underway.
    pub const ESCROW_HELD: StatusSet = StatusSet(&[
        ContractStatus::Funded,
        ContractStatus::Active,
        ContractStatus::GoodsShipped,
        ContractStatus::GoodsReceived,
    ]);

    /// Ended without completing.
    pub const CLOSED_EARLY: StatusSet =
        StatusSet(&[ContractStatus::Cancelled, ContractStatus::Terminated]);

    /// Build a set from a static list.
    pub const fn new(statuses: &'static [ContractStatus]) -> Self {
        Self(statuses)
    }

    /// The statuses in the set.
    pub fn statuses(&self) -> &'static [ContractStatus] {
        self.0
    }
}

/// Something a status can be tested against: a single status, a raw code,
/// a slice, an array, or a [`StatusSet`].
pub trait StatusQuery {
    /// Whether `status` matches.
    fn contains(&self, status: ContractStatus) -> bool;

    /// Whether a code outside the known statuses matches, given its folded
    /// form. Only raw codes can name such a status.
    fn contains_unrecognized(&self, _folded: &str) -> bool {
        false
    }
}

impl StatusQuery for ContractStatus {
    fn contains(&self, status: ContractStatus) -> bool {
        *self == status
    }
}

impl StatusQuery for str {
    fn contains(&self, status: ContractStatus) -> bool {
        ContractStatus::parse_lenient(self) == Some(status)
    }

    fn contains_unrecognized(&self, folded: &str) -> bool {
        !folded.is_empty() && fold_code(self) == folded
    }
}

impl StatusQuery for String {
    fn contains(&self, status: ContractStatus) -> bool {
        StatusQuery::contains(self.as_str(), status)
    }

    fn contains_unrecognized(&self, folded: &str) -> bool {
        self.as_str().contains_unrecognized(folded)
    }
}

impl StatusQuery for [ContractStatus] {
    fn contains(&self, status: ContractStatus) -> bool {
        self.iter().any(|s| *s == status)
    }
}

impl<const N: usize> StatusQuery for [ContractStatus; N] {
    fn contains(&self, status: ContractStatus) -> bool {
        self.as_slice().contains(&status)
    }
}

impl StatusQuery for StatusSet {
    fn contains(&self, status: ContractStatus) -> bool {
        self.0.iter().any(|s| *s == status)
    }
}

impl<Q: StatusQuery + ?Sized> StatusQuery for &Q {
    fn contains(&self, status: ContractStatus) -> bool {
        (**self).contains(status)
    }

    fn contains_unrecognized(&self, folded: &str) -> bool {
        (**self).contains_unrecognized(folded)
    }
}

/// Whether the raw `status` equals or is contained in `query`.
///
/// Comparison ignores case and separators. A status outside the known set
/// still equals a raw code with the same folded form (`ON_HOLD` and
/// `on-hold`), but is never in a typed status or [`StatusSet`].
pub fn check_status<Q: StatusQuery>(status: &str, query: Q) -> bool {
    match ContractStatus::parse_lenient(status) {
        Some(parsed) => query.contains(parsed),
        None => query.contains_unrecognized(&fold_code(status)),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
