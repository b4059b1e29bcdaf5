use anyhow::{Context, Result};
use crate::client::ChainClient;
use crate::contracts::APT_TRANSFER;
use crate::crypto::LocalAccount;
use crate::encoding::MoveArg;
use crate::error::CliError;
use crate::types::{AccountAddress, EntryFunctionId};
use crate::{config::AppConfig, output, transaction, utils};

pub async fn execute(config: &AppConfig, recipient: String, amount: String) -> Result<()> {
    let recipient_address = utils::parse_address(&recipient)?;
    let octas = utils::parse_scaled_amount(&amount, utils::COIN_DECIMALS)?;

    output::info(&format!(
        "📤 Sending {} APT ({} Octas) to {}",
        amount, octas, recipient_address
    ));

    let hash = send_apt(&config.client, &config.account, recipient_address, octas)
        .await
        .context("Failed to send APT")?;

    output::success(&format!("✅ Sent {} APT to {}", amount, recipient));
    output::success(&format!("   Transaction hash: {}", hash));
    Ok(())
}

/// `0x1::aptos_account::transfer(recipient, octas)`
pub async fn send_apt<C: ChainClient + ?Sized>(
    client: &C,
    account: &LocalAccount,
    recipient: AccountAddress,
    octas: u64,
) -> Result<String, CliError> {
    let function: EntryFunctionId = APT_TRANSFER.parse()?;
    transaction::submit_entry_function(
        client,
        account,
        &function,
        &[],
        &[MoveArg::Address(recipient), MoveArg::U64(octas)],
    )
    .await
}
