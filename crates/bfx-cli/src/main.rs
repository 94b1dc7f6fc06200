//! # bfx CLI entry point
//!
//! Parses command-line arguments, installs logging, and dispatches to the
//! subcommand handlers in the `bfx_cli` library.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use bfx_cli::contract::{run_contract, ContractArgs};
use bfx_cli::records::{run_documents, run_risk, run_shipments, ContractRef, RiskArgs};
use bfx_cli::status::{run_status, StatusArgs};
use bfx_cli::{AppContext, OutputFormat};

/// BlockFinaX CLI
///
/// Resolves contract lifecycle statuses and talks to the dashboard API.
#[derive(Parser, Debug)]
#[command(name = "bfx", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Dashboard API base URL. Overrides BFX_API_URL.
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Print JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve a status code: badge, action, escrow, milestones.
    Status(StatusArgs),

    /// Contract operations (list, show, create, approve, fund, release).
    Contract(ContractArgs),

    /// List documents attached to a contract.
    Documents(ContractRef),

    /// List shipments for a contract.
    Shipments(ContractRef),

    /// Request a risk assessment for a contract.
    Risk(RiskArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("bfx CLI v{} starting", env!("CARGO_PKG_VERSION"));

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    match run(cli.command, cli.api_url.as_deref(), format).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

async fn run(command: Commands, api_url: Option<&str>, format: OutputFormat) -> anyhow::Result<u8> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    // `status` is offline; everything else needs the API client.
    let context = || AppContext::from_env(api_url, format);
    match command {
        Commands::Status(args) => run_status(&args, format, &mut out),
        Commands::Contract(args) => {
            let ctx = context()?;
            run_contract(&args, &ctx, &mut out).await
        }
        Commands::Documents(args) => {
            let ctx = context()?;
            run_documents(&args, &ctx, &mut out).await
        }
        Commands::Shipments(args) => {
            let ctx = context()?;
            run_shipments(&args, &ctx, &mut out).await
        }
        Commands::Risk(args) => {
            let ctx = context()?;
            run_risk(&args, &ctx, &mut out).await
        }
    }
}
