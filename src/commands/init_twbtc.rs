use anyhow::{Context, Result};
use crate::client::ChainClient;
use crate::contracts::{self, TOKEN_MODULE};
use crate::crypto::LocalAccount;
use crate::error::CliError;
use crate::types::AccountAddress;
use crate::{config::AppConfig, output, transaction};

pub async fn execute(config: &AppConfig) -> Result<()> {
    output::info("🏭 Initializing the TWBTC token module");

    let hash = initialize(&config.client, &config.account, config.module_address)
        .await
        .context("Failed to initialize TWBTC")?;

    output::success("✅ TWBTC initialized");
    output::success(&format!("   Transaction hash: {}", hash));
    Ok(())
}

pub async fn initialize<C: ChainClient + ?Sized>(
    client: &C,
    account: &LocalAccount,
    publisher: AccountAddress,
) -> Result<String, CliError> {
    let function = contracts::entry_function(publisher, TOKEN_MODULE, "initialize_module")?;
    transaction::submit_entry_function(client, account, &function, &[], &[]).await
}
