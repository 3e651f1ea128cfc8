//! gnosis-loader
//!
//! Command-line front end: loads the configured Safe and prints the result as
//! JSON on stdout. Logs go to stderr.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use gnosis_loader::blockchain::{EnsNameResolver, ProviderBundle, Wallet};
use gnosis_loader::blockchain::types::parse_address;
use gnosis_loader::config::{load_config, LoaderConfig};
use gnosis_loader::gnosis::workflow::resolve_owner_names;
use gnosis_loader::gnosis::{load_gnosis_data, GnosisLoadResult, GnosisSlice, RpcBackend};
use gnosis_loader::observability::logging;
use gnosis_loader::safe::SafeReader;

#[derive(Parser)]
#[command(name = "gnosis-loader")]
#[command(about = "Load Safe multisig state and NFT holdings", long_about = None)]
struct Cli {
    /// TOML config file; built-in defaults when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Overrides `observability.log_level`.
    #[arg(short, long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full load and print the final state
    Load,
    /// List owners with their ENS names
    Owners,
    /// List enabled modules
    Modules,
    /// Check whether an address owns the Safe
    IsOwner { address: String },
    /// Print the Safe contract version
    Version,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => LoaderConfig::default(),
    };

    let level = cli
        .log_level
        .as_deref()
        .unwrap_or(config.observability.log_level.as_str());
    logging::init(level);

    tracing::info!(
        rpc_url = %config.blockchain.rpc_url,
        chain_id = config.blockchain.chain_id,
        safe = %config.gnosis.safe_address,
        "gnosis-loader v0.1.0 starting"
    );

    let wallet = Wallet::from_env()?;
    let bundle = ProviderBundle::connect(&config.blockchain)
        .await
        .map(|client| RpcBackend::new(client, config.gnosis.clone(), wallet));

    match cli.command {
        Commands::Load => {
            let slice = GnosisSlice::new();
            load_gnosis_data(bundle, &slice).await;

            let state = slice.current();
            println!("{}", serde_json::to_string_pretty(&state)?);
            if let Some(GnosisLoadResult::Error { .. }) = state {
                std::process::exit(1);
            }
        }
        Commands::Owners => {
            let backend = connected(bundle)?;
            let safe = backend.safe_client()?;
            let owners = safe.get_owners().await?;
            let names = EnsNameResolver::new(backend.client().clone());
            let owners = resolve_owner_names(&names, owners).await;
            println!("{}", serde_json::to_string_pretty(&owners)?);
        }
        Commands::Modules => {
            let safe = connected(bundle)?.safe_client()?;
            let modules = safe.get_modules().await?;
            println!("{}", serde_json::to_string_pretty(&modules)?);
        }
        Commands::IsOwner { address } => {
            let address = parse_address(&address)?;
            let safe = connected(bundle)?.safe_client()?;
            println!("{}", safe.is_owner(address).await?);
        }
        Commands::Version => {
            let safe = connected(bundle)?.safe_client()?;
            println!("{}", safe.get_version().await?);
        }
    }

    Ok(())
}

fn connected(bundle: ProviderBundle<RpcBackend>) -> Result<RpcBackend, Box<dyn std::error::Error>> {
    match bundle {
        ProviderBundle::Connected(backend) => Ok(backend),
        ProviderBundle::Failure { reason } => Err(reason.into()),
    }
}
