//! # bfx-cli — BlockFinaX Command-Line Interface
//!
//! ## Subcommands
//!
//! - `status`: resolve a status code offline
//! - `contract`: list, show, create, and approve / fund / release
//! - `documents`, `shipments`, `risk`: records attached to a contract
//!
//! Handlers take an [`AppContext`] and an output sink, and return the
//! process exit code. Argument parsing lives in `main.rs`; rendering in
//! [`render`].

pub mod context;
pub mod contract;
pub mod records;
pub mod render;
pub mod status;

pub use context::{AppContext, OutputFormat};
