//! # bfx-state — Contract Lifecycle Status Resolver
//!
//! Derives everything the dashboard renders from a contract's status
//! string: which action button is offered, which timeline milestones are
//! complete, the badge color and label, and the escrow badge.
//!
//! ## Lifecycle
//!
//! ```text
//! DRAFT ──▶ PENDINGAPPROVAL ──▶ AWAITINGFUNDS / FUNDED ──▶ ACTIVE
//!                                                            │
//!        COMPLETED ◀── GOODSRECEIVED ◀── GOODSSHIPPED ◀──────┘
//!
//! off-path: DISPUTED, CANCELLED, TERMINATED
//! ```
//!
//! The model above is what the views assume. It is not enforced: the
//! status is whatever the backend returns, and an unrecognized code still
//! resolves (gray badge, raw code as label, no action).
//!
//! ## Modules
//!
//! - [`status`]: `ContractStatus`, lenient parsing, status sets, `check_status`.
//! - [`badge`]: badge color and label lookup.
//! - [`action`]: approve / fund / release availability.
//! - [`milestone`]: timeline milestones and progress steps.
//! - [`escrow`]: escrow badge state.
//! - [`view`]: the assembled `ContractView`.

pub mod action;
pub mod badge;
pub mod escrow;
pub mod milestone;
pub mod status;
pub mod view;

pub use action::{available_action, visible_actions, ContractAction};
pub use badge::{status_color, status_text, BadgeColor};
pub use escrow::{escrow_state, EscrowState};
pub use milestone::{
    current_step_index, lifecycle_steps, milestones, LifecycleStep, Milestone, MilestoneKey,
    MilestoneTimes,
};
pub use status::{check_status, ContractStatus, StatusError, StatusQuery, StatusSet};
pub use view::ContractView;
