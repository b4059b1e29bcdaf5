use anyhow::Result;
use crate::client::ChainClient;
use crate::commands::check_twbtc::twbtc_balance;
use crate::error::CliError;
use crate::types::AccountAddress;
use crate::{config::AppConfig, output, utils};

pub async fn execute(config: &AppConfig, recipient: String, amount: String) -> Result<()> {
    let recipient = utils::parse_address(&recipient)?;

    match check_recipient(&config.client, recipient, config.module_address).await {
        RecipientStatus::Registered(balance) => {
            output::info(&format!("Recipient TWBTC balance: {} Satoshis", balance))
        }
        RecipientStatus::Unregistered => output::warning(
            "⚠️  Recipient has not registered for TWBTC; it must register before receiving",
        ),
        RecipientStatus::Unknown(e) => {
            output::warning(&format!("⚠️  Could not check recipient TWBTC balance: {}", e))
        }
    }

    let satoshis = utils::parse_scaled_amount(&amount, utils::COIN_DECIMALS)?;
    output::info(&format!("📤 {} BTC = {} Satoshis", amount, satoshis));

    Err(transfer_unsupported().into())
}

/// What the pre-flight lookup learned about the recipient.
#[derive(Debug)]
pub enum RecipientStatus {
    Registered(u64),
    Unregistered,
    /// The lookup itself failed; the command carries on regardless.
    Unknown(CliError),
}

pub async fn check_recipient<C: ChainClient + ?Sized>(
    client: &C,
    recipient: AccountAddress,
    publisher: AccountAddress,
) -> RecipientStatus {
    match twbtc_balance(client, recipient, publisher).await {
        Ok(Some(balance)) => RecipientStatus::Registered(balance),
        Ok(None) => RecipientStatus::Unregistered,
        Err(e) => RecipientStatus::Unknown(e),
    }
}

// The token module's transfer entry point has not been published, so there
// is no signature to call.
fn transfer_unsupported() -> CliError {
    CliError::Unsupported(
        "TWBTC transfers are not available yet; the token module exposes no transfer entry function"
            .to_string(),
    )
}
