mod client;
mod commands;
mod config;
mod contracts;
mod crypto;
mod encoding;
mod error;
mod output;
mod transaction;
mod types;
mod utils;

use anyhow::Result;
use clap::Parser;
use config::{AppConfig, Network, Settings};
use std::process;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(name = "twbtc-cli")]
#[command(about = "CLI for APT transfers and the TWBTC bridge on Aptos", long_about = None)]
struct Cli {
    /// Hex Ed25519 private key of the signing account; falls back to PRIVATE_KEY
    ///
    /// Older releases took the key as the first positional argument. That slot
    /// is the command name now, so pass the key with this flag or the
    /// PRIVATE_KEY environment variable.
    #[arg(long, env = "PRIVATE_KEY", hide_env_values = true, global = true)]
    private_key: Option<String>,

    /// Address that published the TWBTC token and bridge modules
    #[arg(long, env = "MODULE_PUBLISHER_ACCOUNT_ADDRESS", global = true)]
    module_address: Option<String>,

    #[arg(long, value_enum, default_value_t = Network::Devnet, global = true)]
    network: Network,

    /// Fullnode REST endpoint; overrides --network
    #[arg(long, env = "APTOS_NODE_URL", global = true)]
    node_url: Option<String>,

    /// Seconds to wait for a submitted transaction to commit
    #[arg(long, default_value_t = 60, global = true)]
    wait_timeout: u64,

    #[command(subcommand)]
    command: commands::Commands,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        output::error(&format!("❌ {:#}", e));
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let settings = Settings {
        private_key: cli.private_key,
        module_address: cli.module_address,
        network: cli.network,
        node_url: cli.node_url,
        wait_timeout_secs: cli.wait_timeout,
    };
    let config = AppConfig::new(&settings)?;
    commands::handle_command(cli.command, &config).await
}
