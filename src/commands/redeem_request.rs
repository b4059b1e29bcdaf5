use anyhow::{Context, Result};
use crate::client::ChainClient;
use crate::contracts::{self, BRIDGE_MODULE};
use crate::crypto::LocalAccount;
use crate::encoding::MoveArg;
use crate::error::CliError;
use crate::types::AccountAddress;
use crate::{config::AppConfig, output, transaction, utils};

pub async fn execute(config: &AppConfig, receiver: String, amount: String) -> Result<()> {
    let amount = utils::parse_u64(&amount)?;

    output::info(&format!("🔁 Requesting redemption of {} Satoshis to {}", amount, receiver));

    let hash = redeem(&config.client, &config.account, config.module_address, &receiver, amount)
        .await
        .context("Redeem request failed")?;

    output::success(&format!("✅ Redeem request for {} Satoshis to {} submitted", amount, receiver));
    output::success(&format!("   Transaction hash: {}", hash));
    Ok(())
}

/// `btc_bridgev3::redeem_request(amount: u64, receiver: String)`
///
/// `receiver` is a bitcoin address and travels as a Move `String`.
pub async fn redeem<C: ChainClient + ?Sized>(
    client: &C,
    account: &LocalAccount,
    publisher: AccountAddress,
    receiver: &str,
    amount: u64,
) -> Result<String, CliError> {
    let function = contracts::entry_function(publisher, BRIDGE_MODULE, "redeem_request")?;
    let args = [MoveArg::U64(amount), MoveArg::String(receiver.to_string())];
    transaction::submit_entry_function(client, account, &function, &[], &args).await
}
