use anyhow::{Context, Result};
use crate::client::ChainClient;
use crate::contracts::{self, BRIDGE_MODULE};
use crate::crypto::LocalAccount;
use crate::encoding::MoveArg;
use crate::error::CliError;
use crate::types::AccountAddress;
use crate::{config::AppConfig, output, transaction, utils};

pub async fn execute(config: &AppConfig, fee_account: String, fee: String) -> Result<()> {
    let fee_account = utils::parse_address(&fee_account)?;
    let fee = utils::parse_u64(&fee)?;

    output::info(&format!("🌉 Initializing bridge: fee account {}, fee {}", fee_account, fee));

    let hash = initialize(&config.client, &config.account, config.module_address, fee_account, fee)
        .await
        .context("Failed to initialize bridge")?;

    output::success("✅ Bridge initialized");
    output::success(&format!("   Transaction hash: {}", hash));
    Ok(())
}

/// `btc_bridgev3::initialize(fee_account: address, fee: u64)`
pub async fn initialize<C: ChainClient + ?Sized>(
    client: &C,
    account: &LocalAccount,
    publisher: AccountAddress,
    fee_account: AccountAddress,
    fee: u64,
) -> Result<String, CliError> {
    let function = contracts::entry_function(publisher, BRIDGE_MODULE, "initialize")?;
    let args = [MoveArg::Address(fee_account), MoveArg::U64(fee)];
    transaction::submit_entry_function(client, account, &function, &[], &args).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::{serialize_address, serialize_u64};
    use crate::transaction::tests::{MockChain, TEST_KEY};

    #[tokio::test]
    async fn passes_fee_account_then_fee() {
        let chain = MockChain::default();
        let account = LocalAccount::from_private_key_hex(TEST_KEY).unwrap();
        let fee_account: AccountAddress = "0xfee".parse().unwrap();

        initialize(&chain, &account, "0xcafe".parse().unwrap(), fee_account, 250)
            .await
            .unwrap();

        let entry = chain.last_entry_function();
        assert_eq!(entry.module.name, "btc_bridgev3");
        assert_eq!(entry.function, "initialize");
        assert_eq!(
            entry.args,
            vec![serialize_address(&fee_account).unwrap(), serialize_u64(250).unwrap()]
        );
    }
}
