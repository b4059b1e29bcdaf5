use crate::error::CliError;
use crate::types::{
    AccountAddress, Ed25519PublicKey, Ed25519Signature, RawTransaction, SignedTransaction,
    TransactionAuthenticator,
};
use ed25519_dalek::{Signer, SigningKey};
use sha3::{Digest, Sha3_256};

const ED25519_SCHEME: u8 = 0x00;
const RAW_TRANSACTION_SALT: &[u8] = b"APTOS::RawTransaction";

/// An Ed25519 key pair plus the account address it authenticates.
pub struct LocalAccount {
    signing_key: SigningKey,
    address: AccountAddress,
}

impl LocalAccount {
    /// Accepts hex with an optional `0x` or `ed25519-priv-0x` prefix.
    pub fn from_private_key_hex(key: &str) -> Result<Self, CliError> {
        let key = key.trim();
        let key = key.strip_prefix("ed25519-priv-").unwrap_or(key);
        let key = key.strip_prefix("0x").unwrap_or(key);

        let bytes = hex::decode(key).map_err(|e| CliError::InvalidPrivateKey(e.to_string()))?;
        let bytes: [u8; 32] = bytes.try_into().map_err(|b: Vec<u8>| {
            CliError::InvalidPrivateKey(format!("expected 32 bytes, got {}", b.len()))
        })?;

        let signing_key = SigningKey::from_bytes(&bytes);
        let address = derive_address(&signing_key.verifying_key().to_bytes());
        Ok(Self { signing_key, address })
    }

    pub fn address(&self) -> AccountAddress {
        self.address
    }

    pub fn public_key(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    pub fn sign_transaction(&self, raw_txn: RawTransaction) -> Result<SignedTransaction, CliError> {
        let message = signing_message(&raw_txn)?;
        let signature = self.signing_key.sign(&message);
        Ok(SignedTransaction {
            raw_txn,
            authenticator: TransactionAuthenticator::Ed25519 {
                public_key: Ed25519PublicKey(self.public_key()),
                signature: Ed25519Signature(signature.to_bytes()),
            },
        })
    }
}

/// Single-key accounts: `sha3_256(public_key || scheme)`.
pub fn derive_address(public_key: &[u8; 32]) -> AccountAddress {
    let mut hasher = Sha3_256::new();
    hasher.update(public_key);
    hasher.update([ED25519_SCHEME]);
    AccountAddress::new(hasher.finalize().into())
}

pub fn signing_message(raw_txn: &RawTransaction) -> Result<Vec<u8>, CliError> {
    let mut message = Sha3_256::digest(RAW_TRANSACTION_SALT).to_vec();
    message.extend(bcs::to_bytes(raw_txn)?);
    Ok(message)
}
