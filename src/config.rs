use crate::client::{DEFAULT_POLL_INTERVAL, RestClient};
use crate::crypto::LocalAccount;
use crate::error::CliError;
use crate::types::AccountAddress;
use clap::ValueEnum;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Network {
    Devnet,
    Testnet,
    Mainnet,
}

impl Network {
    pub fn node_url(&self) -> &'static str {
        match self {
            Network::Devnet => "https://fullnode.devnet.aptoslabs.com/v1",
            Network::Testnet => "https://fullnode.testnet.aptoslabs.com/v1",
            Network::Mainnet => "https://fullnode.mainnet.aptoslabs.com/v1",
        }
    }
}

/// Settings gathered from flags and the environment before any command runs.
#[derive(Debug, Clone)]
pub struct Settings {
    pub private_key: Option<String>,
    pub module_address: Option<String>,
    pub network: Network,
    pub node_url: Option<String>,
    pub wait_timeout_secs: u64,
}

pub struct AppConfig {
    pub client: RestClient,
    pub account: LocalAccount,
    /// Publisher of the `btc_tokenv3` / `btc_bridgev3` modules.
    pub module_address: AccountAddress,
}

impl AppConfig {
    pub fn new(settings: &Settings) -> Result<Self, CliError> {
        let private_key = settings
            .private_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                CliError::Config(
                    "missing private key; set PRIVATE_KEY or pass --private-key".to_string(),
                )
            })?;
        let account = LocalAccount::from_private_key_hex(private_key)?;

        let module_address = settings
            .module_address
            .as_deref()
            .filter(|a| !a.trim().is_empty())
            .ok_or_else(|| {
                CliError::Config(
                    "missing module address; set MODULE_PUBLISHER_ACCOUNT_ADDRESS".to_string(),
                )
            })?
            .parse::<AccountAddress>()?;

        let node_url = settings
            .node_url
            .as_deref()
            .unwrap_or_else(|| settings.network.node_url());
        let client = RestClient::new(node_url)
            .with_wait(DEFAULT_POLL_INTERVAL, Duration::from_secs(settings.wait_timeout_secs));
        debug!(
            "Using node {} as {} (module publisher {})",
            client.base_url(),
            account.address(),
            module_address
        );

        Ok(Self { client, account, module_address })
    }
}
