//! Node access.
//!
//! `ChainClient` is the seam between the commands and the network: it builds
//! unsigned transactions, submits signed ones, waits for them to commit and
//! answers balance/resource queries. `RestClient` implements it against a
//! fullnode's REST API.

use crate::error::CliError;
use crate::types::{
    AccountAddress, AccountResource, RawTransaction, SignedTransaction, TransactionInfo,
    TransactionPayload,
};
use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

pub const DEFAULT_MAX_GAS_AMOUNT: u64 = 100_000;
pub const DEFAULT_EXPIRATION_SECS: u64 = 300;
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(60);

const BCS_SIGNED_TRANSACTION: &str = "application/x.aptos.signed_transaction+bcs";

#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Fills in sequence number, gas and expiration for `payload`.
    async fn build_transaction(
        &self,
        sender: AccountAddress,
        payload: TransactionPayload,
    ) -> Result<RawTransaction, CliError>;

    /// Returns the transaction hash.
    async fn submit_transaction(&self, txn: &SignedTransaction) -> Result<String, CliError>;

    /// Blocks until the transaction is no longer pending.
    async fn wait_for_transaction(&self, hash: &str) -> Result<(), CliError>;

    async fn transaction_by_hash(&self, hash: &str) -> Result<TransactionInfo, CliError>;

    /// Native coin balance in octas.
    async fn apt_balance(&self, address: AccountAddress) -> Result<u64, CliError>;

    async fn account_resources(
        &self,
        address: AccountAddress,
    ) -> Result<Vec<AccountResource>, CliError>;
}

#[derive(Debug, Deserialize)]
struct AccountData {
    sequence_number: String,
}

#[derive(Debug, Deserialize)]
struct LedgerInfo {
    chain_id: u8,
}

#[derive(Debug, Deserialize)]
struct GasEstimate {
    gas_estimate: u64,
}

#[derive(Debug, Deserialize)]
struct PendingTransaction {
    hash: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
    max_gas_amount: u64,
    expiration_secs: u64,
    poll_interval: Duration,
    wait_timeout: Duration,
}

impl RestClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            max_gas_amount: DEFAULT_MAX_GAS_AMOUNT,
            expiration_secs: DEFAULT_EXPIRATION_SECS,
            poll_interval: DEFAULT_POLL_INTERVAL,
            wait_timeout: DEFAULT_WAIT_TIMEOUT,
        }
    }

    pub fn with_wait(mut self, poll_interval: Duration, wait_timeout: Duration) -> Self {
        self.poll_interval = poll_interval;
        self.wait_timeout = wait_timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: for<'de> Deserialize<'de>>(&self, path: &str) -> Result<T, CliError> {
        debug!("GET {}", path);
        let response = self.http.get(self.url(path)).send().await?;
        decode(response).await
    }

    async fn chain_id(&self) -> Result<u8, CliError> {
        let ledger: LedgerInfo = self.get("/").await?;
        Ok(ledger.chain_id)
    }

    async fn sequence_number(&self, address: AccountAddress) -> Result<u64, CliError> {
        let account: AccountData = self.get(&format!("/accounts/{}", address)).await?;
        account.sequence_number.parse().map_err(|_| {
            CliError::UnexpectedResponse(format!(
                "sequence number '{}' is not a u64",
                account.sequence_number
            ))
        })
    }

    async fn gas_unit_price(&self) -> Result<u64, CliError> {
        let estimate: GasEstimate = self.get("/estimate_gas_price").await?;
        Ok(estimate.gas_estimate)
    }
}

async fn decode<T: for<'de> Deserialize<'de>>(response: Response) -> Result<T, CliError> {
    let status = response.status();
    if !status.is_success() {
        return Err(api_error(status, response).await);
    }
    Ok(response.json::<T>().await?)
}

async fn api_error(status: StatusCode, response: Response) -> CliError {
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .map(|e| e.message)
        .unwrap_or(body);
    CliError::Api { status: status.as_u16(), message }
}

#[async_trait]
impl ChainClient for RestClient {
    async fn build_transaction(
        &self,
        sender: AccountAddress,
        payload: TransactionPayload,
    ) -> Result<RawTransaction, CliError> {
        let sequence_number = self.sequence_number(sender).await?;
        let chain_id = self.chain_id().await?;
        let gas_unit_price = self.gas_unit_price().await?;
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| CliError::Config(format!("system clock before epoch: {}", e)))?
            .as_secs();

        debug!(
            "Building transaction: sender={} seq={} chain_id={} gas_price={}",
            sender, sequence_number, chain_id, gas_unit_price
        );

        Ok(RawTransaction {
            sender,
            sequence_number,
            payload,
            max_gas_amount: self.max_gas_amount,
            gas_unit_price,
            expiration_timestamp_secs: now + self.expiration_secs,
            chain_id,
        })
    }

    async fn submit_transaction(&self, txn: &SignedTransaction) -> Result<String, CliError> {
        let body = bcs::to_bytes(txn)?;
        debug!("POST /transactions ({} bytes)", body.len());
        let response = self
            .http
            .post(self.url("/transactions"))
            .header(reqwest::header::CONTENT_TYPE, BCS_SIGNED_TRANSACTION)
            .body(body)
            .send()
            .await?;
        let pending: PendingTransaction = decode(response).await?;
        info!("Submitted transaction {}", pending.hash);
        Ok(pending.hash)
    }

    async fn wait_for_transaction(&self, hash: &str) -> Result<(), CliError> {
        let started = Instant::now();
        loop {
            match self.transaction_by_hash(hash).await {
                Ok(txn) if !txn.is_pending() => return Ok(()),
                Ok(_) => debug!("Transaction {} still pending", hash),
                // Not yet indexed by this node.
                Err(CliError::Api { status: 404, .. }) => debug!("Transaction {} not found yet", hash),
                Err(e) => return Err(e),
            }
            if started.elapsed() >= self.wait_timeout {
                return Err(CliError::Timeout(hash.to_string()));
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn transaction_by_hash(&self, hash: &str) -> Result<TransactionInfo, CliError> {
        self.get(&format!("/transactions/by_hash/{}", hash)).await
    }

    async fn apt_balance(&self, address: AccountAddress) -> Result<u64, CliError> {
        let request = json!({
            "function": "0x1::coin::balance",
            "type_arguments": ["0x1::aptos_coin::AptosCoin"],
            "arguments": [address.to_string()],
        });
        debug!("POST /view 0x1::coin::balance for {}", address);
        let response = self.http.post(self.url("/view")).json(&request).send().await?;
        let values: Vec<Value> = decode(response).await?;

        let raw = values
            .first()
            .and_then(Value::as_str)
            .ok_or_else(|| CliError::UnexpectedResponse(format!("view returned {:?}", values)))?;
        raw.parse()
            .map_err(|_| CliError::UnexpectedResponse(format!("balance '{}' is not a u64", raw)))
    }

    async fn account_resources(
        &self,
        address: AccountAddress,
    ) -> Result<Vec<AccountResource>, CliError> {
        self.get(&format!("/accounts/{}/resources", address)).await
    }
}
