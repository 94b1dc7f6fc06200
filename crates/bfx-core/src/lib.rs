//! # bfx-core — Foundational Types for BlockFinaX
//!
//! Leaf crate of the workspace. Defines the identifier newtypes, the
//! UTC-only [`Timestamp`], and the shared [`BfxError`]. Every other
//! `bfx-*` crate depends on it; it depends on nothing internal.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `bfx-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod identity;
pub mod temporal;

pub use error::BfxError;
pub use identity::{ContractId, DocumentId, ShipmentId};
pub use temporal::Timestamp;
