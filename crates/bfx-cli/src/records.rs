//! # Record Subcommands
//!
//! Documents, shipments and risk assessment for a contract.

use std::io::Write;

use clap::Args;

use bfx_client::RiskAssessmentRequest;
use bfx_core::ContractId;

use crate::context::{AppContext, OutputFormat};
use crate::render;

/// Arguments naming a contract.
#[derive(Args, Debug)]
pub struct ContractRef {
    /// Contract identifier.
    pub contract_id: ContractId,
}

/// Extra arguments for a risk assessment.
#[derive(Args, Debug)]
pub struct RiskArgs {
    /// Contract identifier.
    pub contract_id: ContractId,
    #[arg(long)]
    pub counterparty: Option<String>,
    #[arg(long)]
    pub origin_country: Option<String>,
    #[arg(long)]
    pub destination_country: Option<String>,
}

/// List documents attached to a contract.
pub async fn run_documents(
    args: &ContractRef,
    ctx: &AppContext,
    out: &mut dyn Write,
) -> anyhow::Result<u8> {
    let docs = ctx.client.documents().list(Some(&args.contract_id)).await?;
    match ctx.format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&docs)?)?,
        OutputFormat::Text if docs.is_empty() => writeln!(out, "No documents")?,
        OutputFormat::Text => write!(out, "{}", render::documents(&docs))?,
    }
    Ok(0)
}

/// List shipments for a contract.
pub async fn run_shipments(
    args: &ContractRef,
    ctx: &AppContext,
    out: &mut dyn Write,
) -> anyhow::Result<u8> {
    let shipments = ctx.client.logistics().list(Some(&args.contract_id)).await?;
    match ctx.format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&shipments)?)?,
        OutputFormat::Text if shipments.is_empty() => writeln!(out, "No shipments")?,
        OutputFormat::Text => write!(out, "{}", render::shipments(&shipments))?,
    }
    Ok(0)
}

/// Request a risk assessment for a contract.
pub async fn run_risk(args: &RiskArgs, ctx: &AppContext, out: &mut dyn Write) -> anyhow::Result<u8> {
    let req = RiskAssessmentRequest {
        contract_id: args.contract_id.clone(),
        counterparty: args.counterparty.clone(),
        origin_country: args.origin_country.clone(),
        destination_country: args.destination_country.clone(),
    };
    let assessment = ctx.client.risk().assess(&req).await?;
    match ctx.format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&assessment)?)?,
        OutputFormat::Text => write!(out, "{}", render::risk(&assessment))?,
    }
    Ok(0)
}
