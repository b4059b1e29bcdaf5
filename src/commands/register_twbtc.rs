use anyhow::{Context, Result};
use crate::client::ChainClient;
use crate::contracts::{self, LEGACY_TOKEN_MODULE};
use crate::crypto::LocalAccount;
use crate::error::CliError;
use crate::types::AccountAddress;
use crate::{config::AppConfig, output, transaction};

pub async fn execute(config: &AppConfig) -> Result<()> {
    output::info(&format!("📝 Registering {} for TWBTC", config.account.address()));

    let hash = register(&config.client, &config.account, config.module_address)
        .await
        .context("Failed to register for TWBTC")?;

    output::success("✅ Registered for TWBTC");
    output::success(&format!("   Transaction hash: {}", hash));
    Ok(())
}

/// `btc_tokenv2::register()` for the signing account.
pub async fn register<C: ChainClient + ?Sized>(
    client: &C,
    account: &LocalAccount,
    publisher: AccountAddress,
) -> Result<String, CliError> {
    let function = contracts::entry_function(publisher, LEGACY_TOKEN_MODULE, "register")?;
    transaction::submit_entry_function(client, account, &function, &[], &[]).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::tests::{MockChain, TEST_KEY};

    #[tokio::test]
    async fn calls_register_without_arguments() {
        let chain = MockChain::default();
        let account = LocalAccount::from_private_key_hex(TEST_KEY).unwrap();

        let hash = register(&chain, &account, "0xcafe".parse().unwrap()).await.unwrap();

        assert_eq!(hash, "0xfeed");
        let entry = chain.last_entry_function();
        assert_eq!(entry.module.name, "btc_tokenv2");
        assert_eq!(entry.function, "register");
        assert!(entry.args.is_empty());
        assert!(entry.ty_args.is_empty());
    }
}
