//! # Status Subcommand
//!
//! Resolves a status code offline, without contacting the API.

use std::io::Write;

use clap::Args;

use bfx_state::{ContractView, MilestoneTimes};

use crate::context::OutputFormat;
use crate::render;

/// Arguments for the status subcommand.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Status code as the backend sends it (any casing).
    pub code: String,
}

/// Print the resolved view. Unknown codes still resolve; exit code is 0.
pub fn run_status(
    args: &StatusArgs,
    format: OutputFormat,
    out: &mut dyn Write,
) -> anyhow::Result<u8> {
    let view = ContractView::resolve(&args.code, &MilestoneTimes::new());
    if !view.is_recognized() {
        tracing::warn!(code = %args.code, "unrecognized contract status");
    }
    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&view)?)?,
        OutputFormat::Text => write!(out, "{}", render::view(&view))?,
    }
    Ok(0)
}
