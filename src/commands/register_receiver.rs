use anyhow::{Context, Result};
use crate::client::ChainClient;
use crate::contracts::{self, TOKEN_MODULE};
use crate::crypto::LocalAccount;
use crate::encoding::MoveArg;
use crate::error::CliError;
use crate::types::AccountAddress;
use crate::{config::AppConfig, output, transaction, utils};

pub async fn execute(config: &AppConfig, receiver: String) -> Result<()> {
    let receiver = utils::parse_address(&receiver)?;

    output::info(&format!("📝 Registering {} for TWBTC", receiver));

    let hash = register_for(&config.client, &config.account, config.module_address, receiver)
        .await
        .context("Failed to register receiver for TWBTC")?;

    output::success(&format!("✅ Registered {} for TWBTC", receiver));
    output::success(&format!("   Transaction hash: {}", hash));
    Ok(())
}

/// `btc_tokenv3::registerv2(receiver: address)`
pub async fn register_for<C: ChainClient + ?Sized>(
    client: &C,
    account: &LocalAccount,
    publisher: AccountAddress,
    receiver: AccountAddress,
) -> Result<String, CliError> {
    let function = contracts::entry_function(publisher, TOKEN_MODULE, "registerv2")?;
    transaction::submit_entry_function(client, account, &function, &[], &[MoveArg::Address(receiver)])
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::serialize_address;
    use crate::transaction::tests::{MockChain, TEST_KEY};

    #[tokio::test]
    async fn passes_receiver_address() {
        let chain = MockChain::default();
        let account = LocalAccount::from_private_key_hex(TEST_KEY).unwrap();
        let receiver: AccountAddress = "0xb0b".parse().unwrap();

        register_for(&chain, &account, "0xcafe".parse().unwrap(), receiver)
            .await
            .unwrap();

        let entry = chain.last_entry_function();
        assert_eq!(entry.module.name, "btc_tokenv3");
        assert_eq!(entry.function, "registerv2");
        assert_eq!(entry.args, vec![serialize_address(&receiver).unwrap()]);
    }
}
