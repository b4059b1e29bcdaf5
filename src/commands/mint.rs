use anyhow::{Context, Result};
use crate::client::ChainClient;
use crate::contracts::{self, BRIDGE_MODULE};
use crate::crypto::LocalAccount;
use crate::encoding::MoveArg;
use crate::error::CliError;
use crate::types::AccountAddress;
use crate::{config::AppConfig, output, transaction, utils};

pub async fn execute(
    config: &AppConfig,
    btc_tx_id: String,
    receiver: String,
    amount: String,
) -> Result<()> {
    let receiver_address = utils::parse_address(&receiver)?;
    let amount = utils::parse_u64(&amount)?;

    output::info(&format!(
        "🪙 Minting {} Satoshis to {} for bitcoin tx {}",
        amount, receiver_address, btc_tx_id
    ));

    let hash = mint(
        &config.client,
        &config.account,
        config.module_address,
        &btc_tx_id,
        receiver_address,
        amount,
    )
    .await
    .context("Mint failed")?;

    output::success(&format!("✅ Minted {} Satoshis to {}", amount, receiver));
    output::success(&format!("   Transaction hash: {}", hash));
    Ok(())
}

/// `btc_bridgev3::mint(btc_tx_id: String, receiver: address, amount: u64)`
pub async fn mint<C: ChainClient + ?Sized>(
    client: &C,
    account: &LocalAccount,
    publisher: AccountAddress,
    btc_tx_id: &str,
    receiver: AccountAddress,
    amount: u64,
) -> Result<String, CliError> {
    let function = contracts::entry_function(publisher, BRIDGE_MODULE, "mint")?;
    let args = [
        MoveArg::String(btc_tx_id.to_string()),
        MoveArg::Address(receiver),
        MoveArg::U64(amount),
    ];
    transaction::submit_entry_function(client, account, &function, &[], &args).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::{encode_string_arg, serialize_address, serialize_u64};
    use crate::transaction::tests::{MockChain, TEST_KEY};

    #[tokio::test]
    async fn payload_arguments_in_declared_order() {
        let chain = MockChain::default();
        let account = LocalAccount::from_private_key_hex(TEST_KEY).unwrap();
        let publisher: AccountAddress = "0xcafe".parse().unwrap();
        let receiver: AccountAddress = "0xb0b".parse().unwrap();

        let hash = mint(&chain, &account, publisher, "abc", receiver, 1000).await.unwrap();

        assert_eq!(hash, "0xfeed");
        let entry = chain.last_entry_function();
        assert_eq!(entry.module.address, publisher);
        assert_eq!(entry.module.name, "btc_bridgev3");
        assert_eq!(entry.function, "mint");
        assert_eq!(
            entry.args,
            vec![
                encode_string_arg("abc"),
                serialize_address(&receiver).unwrap(),
                serialize_u64(1000).unwrap(),
            ]
        );
        assert_eq!(entry.args[0], vec![3, b'a', b'b', b'c']);
    }

    #[tokio::test]
    async fn long_tx_ids_get_a_proper_prefix() {
        let chain = MockChain::default();
        let account = LocalAccount::from_private_key_hex(TEST_KEY).unwrap();
        let tx_id = "f".repeat(200);

        mint(&chain, &account, "0xcafe".parse().unwrap(), &tx_id, "0xb0b".parse().unwrap(), 1)
            .await
            .unwrap();

        let entry = chain.last_entry_function();
        assert_eq!(&entry.args[0][..2], &[0xc8, 0x01]);
        assert_eq!(
            crate::encoding::tests::decode_string_arg(&entry.args[0]).as_deref(),
            Some(tx_id.as_str())
        );
    }

    #[tokio::test]
    async fn execution_failure_is_not_reported_as_success() {
        let chain = MockChain::failing("INSUFFICIENT_BALANCE");
        let account = LocalAccount::from_private_key_hex(TEST_KEY).unwrap();

        let result = mint(
            &chain,
            &account,
            "0xcafe".parse().unwrap(),
            "abc",
            "0xb0b".parse().unwrap(),
            1000,
        )
        .await;

        match result {
            Err(CliError::ExecutionFailed { vm_status, .. }) => {
                assert_eq!(vm_status, "INSUFFICIENT_BALANCE")
            }
            other => panic!("expected execution failure, got {:?}", other),
        }
    }
}
