//! Build → sign → submit → wait → verify, shared by every state-changing
//! command.

use crate::client::ChainClient;
use crate::crypto::LocalAccount;
use crate::encoding::{MoveArg, encode_args};
use crate::error::CliError;
use crate::types::{EntryFunction, EntryFunctionId, TransactionPayload, TypeTag};
use tracing::{debug, info};

/// Assembles an entry-function payload from typed arguments.
pub fn entry_function_payload(
    function: &EntryFunctionId,
    type_args: &[&str],
    args: &[MoveArg],
) -> Result<TransactionPayload, CliError> {
    let ty_args = type_args
        .iter()
        .map(|t| t.parse::<TypeTag>())
        .collect::<Result<Vec<_>, _>>()?;
    Ok(TransactionPayload::EntryFunction(EntryFunction {
        module: function.module.clone(),
        function: function.function.clone(),
        ty_args,
        args: encode_args(args)?,
    }))
}

/// Calls `function` with `args` and returns the committed transaction hash.
///
/// A transaction that commits with a failed VM status is an error carrying
/// that status.
pub async fn submit_entry_function<C: ChainClient + ?Sized>(
    client: &C,
    account: &LocalAccount,
    function: &EntryFunctionId,
    type_args: &[&str],
    args: &[MoveArg],
) -> Result<String, CliError> {
    let payload = entry_function_payload(function, type_args, args)?;
    info!("Calling {} with {} argument(s)", function, args.len());
    execute_payload(client, account, payload).await
}

pub async fn execute_payload<C: ChainClient + ?Sized>(
    client: &C,
    account: &LocalAccount,
    payload: TransactionPayload,
) -> Result<String, CliError> {
    let raw_txn = client.build_transaction(account.address(), payload).await?;
    let signed = account.sign_transaction(raw_txn)?;
    let hash = client.submit_transaction(&signed).await?;

    client.wait_for_transaction(&hash).await?;

    let txn = client.transaction_by_hash(&hash).await?;
    debug!(
        "Transaction {} finished: success={} vm_status={}",
        txn.hash, txn.success, txn.vm_status
    );
    if txn.success {
        Ok(hash)
    } else {
        Err(CliError::ExecutionFailed { hash, vm_status: txn.vm_status })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::types::{AccountAddress, AccountResource, RawTransaction, SignedTransaction, TransactionInfo};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    pub(crate) const TEST_KEY: &str =
        "0x9bf49a6a0755f953811fce125f2683d50429c3bb49e074147e0089a52eae155f";

    /// In-memory node: records every call and every submitted payload.
    #[derive(Default)]
    pub(crate) struct MockChain {
        pub calls: Mutex<Vec<&'static str>>,
        pub submitted: Mutex<Vec<SignedTransaction>>,
        pub failure: Option<String>,
        pub balances: HashMap<AccountAddress, u64>,
        pub resources: HashMap<AccountAddress, Vec<AccountResource>>,
    }

    impl MockChain {
        pub(crate) fn failing(vm_status: &str) -> Self {
            Self { failure: Some(vm_status.to_string()), ..Default::default() }
        }

        pub(crate) fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }

        pub(crate) fn last_entry_function(&self) -> EntryFunction {
            let submitted = self.submitted.lock().unwrap();
            let TransactionPayload::EntryFunction(entry) =
                &submitted.last().expect("nothing submitted").raw_txn.payload;
            entry.clone()
        }
    }

    #[async_trait]
    impl ChainClient for MockChain {
        async fn build_transaction(
            &self,
            sender: AccountAddress,
            payload: TransactionPayload,
        ) -> Result<RawTransaction, CliError> {
            self.calls.lock().unwrap().push("build");
            Ok(RawTransaction {
                sender,
                sequence_number: 0,
                payload,
                max_gas_amount: 100_000,
                gas_unit_price: 100,
                expiration_timestamp_secs: 1_700_000_000,
                chain_id: 4,
            })
        }

        async fn submit_transaction(&self, txn: &SignedTransaction) -> Result<String, CliError> {
            self.calls.lock().unwrap().push("submit");
            self.submitted.lock().unwrap().push(txn.clone());
            Ok("0xfeed".to_string())
        }

        async fn wait_for_transaction(&self, _hash: &str) -> Result<(), CliError> {
            self.calls.lock().unwrap().push("wait");
            Ok(())
        }

        async fn transaction_by_hash(&self, hash: &str) -> Result<TransactionInfo, CliError> {
            self.calls.lock().unwrap().push("fetch");
            Ok(TransactionInfo {
                kind: "user_transaction".to_string(),
                hash: hash.to_string(),
                success: self.failure.is_none(),
                vm_status: self
                    .failure
                    .clone()
                    .unwrap_or_else(|| "Executed successfully".to_string()),
            })
        }

        async fn apt_balance(&self, address: AccountAddress) -> Result<u64, CliError> {
            Ok(self.balances.get(&address).copied().unwrap_or(0))
        }

        async fn account_resources(
            &self,
            address: AccountAddress,
        ) -> Result<Vec<AccountResource>, CliError> {
            self.resources.get(&address).cloned().ok_or_else(|| CliError::Api {
                status: 404,
                message: format!("Account not found by Address({})", address),
            })
        }
    }

    fn account() -> LocalAccount {
        LocalAccount::from_private_key_hex(TEST_KEY).unwrap()
    }

    #[tokio::test]
    async fn lifecycle_runs_in_order() {
        let chain = MockChain::default();
        let function: EntryFunctionId = "0xcafe::btc_tokenv3::initialize_module".parse().unwrap();

        let hash = submit_entry_function(&chain, &account(), &function, &[], &[])
            .await
            .unwrap();

        assert_eq!(hash, "0xfeed");
        assert_eq!(chain.calls(), vec!["build", "submit", "wait", "fetch"]);
        let entry = chain.last_entry_function();
        assert_eq!(entry.function, "initialize_module");
        assert_eq!(entry.module.name, "btc_tokenv3");
        assert!(entry.args.is_empty());
    }

    #[tokio::test]
    async fn failed_execution_reports_vm_status() {
        let chain = MockChain::failing("INSUFFICIENT_BALANCE");
        let function: EntryFunctionId = "0x1::aptos_account::transfer".parse().unwrap();
        let args = [MoveArg::Address("0xb0b".parse().unwrap()), MoveArg::U64(1)];

        let err = submit_entry_function(&chain, &account(), &function, &[], &args)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("INSUFFICIENT_BALANCE"));
        assert!(!err.to_string().contains("0xfeed"));
        assert!(matches!(err, CliError::ExecutionFailed { .. }));
    }

    #[tokio::test]
    async fn type_args_are_parsed_into_payload() {
        let chain = MockChain::default();
        let function: EntryFunctionId = "0x1::coin::transfer".parse().unwrap();

        submit_entry_function(&chain, &account(), &function, &["0x1::aptos_coin::AptosCoin"], &[])
            .await
            .unwrap();

        let entry = chain.last_entry_function();
        assert_eq!(entry.ty_args.len(), 1);
        assert_eq!(entry.ty_args[0].to_string(), "0x1::aptos_coin::AptosCoin");
    }

    #[tokio::test]
    async fn bad_type_arg_stops_before_build() {
        let chain = MockChain::default();
        let function: EntryFunctionId = "0x1::coin::transfer".parse().unwrap();

        let result = submit_entry_function(&chain, &account(), &function, &["0x1::coin"], &[]).await;

        assert!(matches!(result, Err(CliError::InvalidTypeTag(_))));
        assert!(chain.calls().is_empty());
    }
}
