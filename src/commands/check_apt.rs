use anyhow::Result;
use crate::{config::AppConfig, output, utils};
use crate::client::ChainClient;
use tracing::debug;

pub async fn execute(config: &AppConfig, address: Option<String>) -> Result<()> {
    let address = match address {
        Some(a) => utils::parse_address(&a)?,
        None => config.account.address(),
    };
    debug!("Checking APT balance of {}", address);

    let balance = config.client.apt_balance(address).await?;

    output::info(&format!(
        "💰 APT balance of {}: {} APT ({} Octas)",
        address,
        utils::format_amount(balance, utils::COIN_DECIMALS),
        balance
    ));
    Ok(())
}
