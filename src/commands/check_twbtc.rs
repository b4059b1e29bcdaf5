use anyhow::{Context, Result};
use crate::client::ChainClient;
use crate::contracts;
use crate::error::CliError;
use crate::types::{AccountAddress, TypeTag};
use crate::{config::AppConfig, output, utils};
use tracing::debug;

pub async fn execute(config: &AppConfig, address: Option<String>) -> Result<()> {
    let address = match address {
        Some(a) => utils::parse_address(&a)?,
        None => config.account.address(),
    };

    let balance = twbtc_balance(&config.client, address, config.module_address)
        .await
        .context("Failed to check TWBTC balance")?;

    match balance {
        Some(satoshis) => {
            output::info(&format!("💰 TWBTC balance of {}: {} Satoshis", address, satoshis))
        }
        None => {
            output::info(&format!("💰 TWBTC balance of {}: 0 Satoshis", address));
            output::warning("   This account has not registered for TWBTC yet");
        }
    }
    Ok(())
}

/// Reads `coin.value` from the owner's TWBTC coin store.
///
/// `None` means the store does not exist, i.e. the account never registered.
pub async fn twbtc_balance<C: ChainClient + ?Sized>(
    client: &C,
    owner: AccountAddress,
    publisher: AccountAddress,
) -> Result<Option<u64>, CliError> {
    let store_type = contracts::twbtc_coin_store(publisher);
    let resources = client.account_resources(owner).await?;
    debug!("{} has {} resources", owner, resources.len());

    // The node may print addresses inside type strings in short form,
    // so compare parsed tags rather than strings.
    let Some(store) = resources
        .iter()
        .find(|r| r.resource_type.parse::<TypeTag>().is_ok_and(|t| t == store_type))
    else {
        return Ok(None);
    };

    let value = store
        .data
        .get("coin")
        .and_then(|coin| coin.get("value"))
        .and_then(|v| v.as_str())
        .ok_or_else(|| {
            CliError::UnexpectedResponse(format!("{} has no coin.value field", store.resource_type))
        })?;
    value
        .parse()
        .map(Some)
        .map_err(|_| CliError::UnexpectedResponse(format!("coin value '{}' is not a u64", value)))
}
