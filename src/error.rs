//! Error types for the TWBTC CLI

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    /// Missing or malformed configuration
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Malformed `address::module::function` descriptor
    #[error("Invalid function descriptor: {0}")]
    InvalidFunction(String),

    #[error("Invalid type tag: {0}")]
    InvalidTypeTag(String),

    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// Transport-level failures talking to the node
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The node answered with a non-success status code
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] bcs::Error),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// The transaction was committed but the VM reported a failure
    #[error("Transaction execution failed: {vm_status}")]
    ExecutionFailed { hash: String, vm_status: String },

    #[error("Timed out waiting for transaction {0}")]
    Timeout(String),

    #[error("Unsupported operation: {0}")]
    Unsupported(String),
}
