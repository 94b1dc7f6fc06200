//! # Contract Subcommand
//!
//! List, show and create contracts, and send lifecycle actions.
//!
//! Actions follow the dashboard's behavior: the request is sent even when
//! the current status would not offer the button (a warning is logged),
//! failures print the generic notification, and the contract is always
//! refetched afterwards so the printed view reflects the backend.

use std::io::Write;

use anyhow::Context;
use clap::{Args, Subcommand};

use bfx_client::{Contract, CreateContractRequest};
use bfx_core::ContractId;
use bfx_state::ContractAction;

use crate::context::{AppContext, OutputFormat};
use crate::render;

/// Arguments for the contract subcommand.
#[derive(Args, Debug)]
pub struct ContractArgs {
    #[command(subcommand)]
    pub command: ContractCommand,
}

/// Contract operations.
#[derive(Subcommand, Debug)]
pub enum ContractCommand {
    /// List contracts with their status and offered action.
    List,
    /// Show one contract and its resolved lifecycle view.
    Show { id: ContractId },
    /// Create a draft contract.
    Create(CreateArgs),
    /// Approve a draft contract.
    Approve { id: ContractId },
    /// Fund the escrow of an approved contract.
    Fund { id: ContractId },
    /// Release escrowed funds after goods are received.
    Release { id: ContractId },
}

/// Fields for a new draft.
#[derive(Args, Debug)]
pub struct CreateArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub buyer: Option<String>,
    #[arg(long)]
    pub seller: Option<String>,
    #[arg(long)]
    pub commodity: Option<String>,
    /// Contract value, sent as a string to preserve precision.
    #[arg(long)]
    pub value: Option<String>,
    #[arg(long)]
    pub currency: Option<String>,
}

/// Dispatch a contract operation.
pub async fn run_contract(
    args: &ContractArgs,
    ctx: &AppContext,
    out: &mut dyn Write,
) -> anyhow::Result<u8> {
    match &args.command {
        ContractCommand::List => list(ctx, out).await,
        ContractCommand::Show { id } => show(ctx, id, out).await,
        ContractCommand::Create(create_args) => create(ctx, create_args, out).await,
        ContractCommand::Approve { id } => run_action(ctx, id, ContractAction::Approve, out).await,
        ContractCommand::Fund { id } => run_action(ctx, id, ContractAction::Fund, out).await,
        ContractCommand::Release { id } => run_action(ctx, id, ContractAction::Release, out).await,
    }
}

async fn list(ctx: &AppContext, out: &mut dyn Write) -> anyhow::Result<u8> {
    let contracts = ctx.client.contracts().list().await?;
    match ctx.format {
        OutputFormat::Json => {
            let rows: Vec<serde_json::Value> = contracts.iter().map(contract_json).collect();
            writeln!(out, "{}", serde_json::to_string_pretty(&rows)?)?;
        }
        OutputFormat::Text => write!(out, "{}", render::contract_table(&contracts))?,
    }
    Ok(0)
}

async fn show(ctx: &AppContext, id: &ContractId, out: &mut dyn Write) -> anyhow::Result<u8> {
    match ctx.client.contracts().get(id).await? {
        Some(contract) => {
            print_contract(ctx.format, &contract, out)?;
            Ok(0)
        }
        None => {
            writeln!(out, "Contract {} not found", id.as_str())?;
            Ok(1)
        }
    }
}

async fn create(ctx: &AppContext, args: &CreateArgs, out: &mut dyn Write) -> anyhow::Result<u8> {
    let mut req = CreateContractRequest::draft(args.title.clone());
    req.buyer = args.buyer.clone();
    req.seller = args.seller.clone();
    req.commodity = args.commodity.clone();
    req.value = args.value.clone().map(serde_json::Value::String);
    req.currency = args.currency.clone();

    let contract = ctx
        .client
        .contracts()
        .create(&req)
        .await
        .context("creating contract")?;
    print_contract(ctx.format, &contract, out)?;
    Ok(0)
}

/// Send `action`, then refetch and print the contract.
///
/// Returns exit code 1 when the action failed; the detailed error goes to
/// the log and the user sees the generic notification.
pub async fn run_action(
    ctx: &AppContext,
    id: &ContractId,
    action: ContractAction,
    out: &mut dyn Write,
) -> anyhow::Result<u8> {
    let contracts = ctx.client.contracts();

    match contracts.get(id).await {
        Ok(Some(current)) if !action.is_available(&current.status) => {
            tracing::warn!(
                %id,
                status = %current.status,
                %action,
                "action is not offered in the current status; sending anyway"
            );
        }
        Ok(Some(_)) => {}
        Ok(None) => {
            writeln!(out, "Contract {} not found", id.as_str())?;
            return Ok(1);
        }
        Err(e) => tracing::warn!(%id, "could not read current status before {action}: {e}"),
    }

    let code = match contracts.apply(id, action).await {
        Ok(_) => {
            tracing::info!(%id, %action, "contract action accepted");
            0
        }
        Err(e) => {
            tracing::error!(%id, %action, "contract action failed: {e}");
            writeln!(out, "{}", e.user_message())?;
            1
        }
    };

    match contracts.get(id).await {
        Ok(Some(refreshed)) => print_contract(ctx.format, &refreshed, out)?,
        Ok(None) => writeln!(out, "Contract {} not found", id.as_str())?,
        Err(e) => tracing::error!(%id, "refetch after {action} failed: {e}"),
    }
    Ok(code)
}

fn print_contract(format: OutputFormat, contract: &Contract, out: &mut dyn Write) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&contract_json(contract))?)?
        }
        OutputFormat::Text => write!(out, "{}", render::contract(contract))?,
    }
    Ok(())
}

fn contract_json(contract: &Contract) -> serde_json::Value {
    serde_json::json!({
        "contract": contract,
        "view": contract.view(),
    })
}
