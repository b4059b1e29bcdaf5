//! On-chain data types: addresses, entry functions and transactions.
//!
//! The serialized layout of everything that derives or implements
//! `Serialize` here matches the node's BCS wire format.

use crate::error::CliError;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub const ADDRESS_LENGTH: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AccountAddress([u8; ADDRESS_LENGTH]);

impl AccountAddress {
    pub const ONE: Self = Self::from_last_byte(1);

    const fn from_last_byte(b: u8) -> Self {
        let mut bytes = [0u8; ADDRESS_LENGTH];
        bytes[ADDRESS_LENGTH - 1] = b;
        Self(bytes)
    }

    pub fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    /// `0x0` through `0xf` are reserved framework addresses.
    pub fn is_special(&self) -> bool {
        self.0[..ADDRESS_LENGTH - 1].iter().all(|b| *b == 0) && self.0[ADDRESS_LENGTH - 1] < 0x10
    }
}

/// Relaxed parsing: the `0x` prefix is optional and short forms are
/// left-padded with zeros.
impl FromStr for AccountAddress {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if digits.is_empty() {
            return Err(CliError::InvalidAddress(format!("'{}' has no hex digits", s)));
        }
        if digits.len() > ADDRESS_LENGTH * 2 {
            return Err(CliError::InvalidAddress(format!(
                "'{}' is longer than {} hex digits",
                s,
                ADDRESS_LENGTH * 2
            )));
        }

        let padded = format!("{:0>width$}", digits, width = ADDRESS_LENGTH * 2);
        let mut bytes = [0u8; ADDRESS_LENGTH];
        hex::decode_to_slice(&padded, &mut bytes)
            .map_err(|e| CliError::InvalidAddress(format!("'{}': {}", s, e)))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_special() {
            write!(f, "0x{:x}", self.0[ADDRESS_LENGTH - 1])
        } else {
            write!(f, "0x{}", hex::encode(self.as_bytes()))
        }
    }
}

fn check_identifier(ident: &str, what: &str, input: &str) -> Result<(), CliError> {
    let mut chars = ident.chars();
    let valid_start = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_');
    if !valid_start || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(CliError::InvalidFunction(format!(
            "invalid {} '{}' in '{}'",
            what, ident, input
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleId {
    pub address: AccountAddress,
    pub name: String,
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.address, self.name)
    }
}

/// A fully qualified `address::module::function` reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFunctionId {
    pub module: ModuleId,
    pub function: String,
}

impl EntryFunctionId {
    pub fn new(address: AccountAddress, module: &str, function: &str) -> Self {
        Self {
            module: ModuleId { address, name: module.to_string() },
            function: function.to_string(),
        }
    }
}

impl FromStr for EntryFunctionId {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split("::").collect();
        if parts.len() != 3 || parts.iter().any(|p| p.is_empty()) {
            return Err(CliError::InvalidFunction(format!(
                "expected 'address::module::function', got '{}'",
                s
            )));
        }
        let address = parts[0]
            .parse::<AccountAddress>()
            .map_err(|e| CliError::InvalidFunction(format!("'{}': {}", s, e)))?;
        check_identifier(parts[1], "module name", s)?;
        check_identifier(parts[2], "function name", s)?;
        Ok(Self::new(address, parts[1], parts[2]))
    }
}

impl fmt::Display for EntryFunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.module, self.function)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructTag {
    pub address: AccountAddress,
    pub module: String,
    pub name: String,
    pub type_args: Vec<TypeTag>,
}

/// Variant order is the BCS discriminant; do not reorder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TypeTag {
    Bool,
    U8,
    U64,
    U128,
    Address,
    Signer,
    Vector(Box<TypeTag>),
    Struct(Box<StructTag>),
    U16,
    U32,
    U256,
}

/// Splits on commas that are not nested inside `<...>`.
fn split_type_args(s: &str) -> Result<Vec<&str>, CliError> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| CliError::InvalidTypeTag(format!("unbalanced '>' in '{}'", s)))?
            }
            ',' if depth == 0 => {
                parts.push(s[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(CliError::InvalidTypeTag(format!("unbalanced '<' in '{}'", s)));
    }
    parts.push(s[start..].trim());
    Ok(parts)
}

impl FromStr for TypeTag {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let tag = match s {
            "bool" => TypeTag::Bool,
            "u8" => TypeTag::U8,
            "u16" => TypeTag::U16,
            "u32" => TypeTag::U32,
            "u64" => TypeTag::U64,
            "u128" => TypeTag::U128,
            "u256" => TypeTag::U256,
            "address" => TypeTag::Address,
            "signer" => TypeTag::Signer,
            _ => {
                if let Some(inner) = s.strip_prefix("vector<").and_then(|r| r.strip_suffix('>')) {
                    return Ok(TypeTag::Vector(Box::new(inner.parse()?)));
                }

                let (base, type_args) = match s.find('<') {
                    Some(open) => {
                        let inner = s[open + 1..].strip_suffix('>').ok_or_else(|| {
                            CliError::InvalidTypeTag(format!("missing closing '>' in '{}'", s))
                        })?;
                        let args = split_type_args(inner)?
                            .into_iter()
                            .map(str::parse)
                            .collect::<Result<Vec<TypeTag>, _>>()?;
                        (&s[..open], args)
                    }
                    None => (s, Vec::new()),
                };

                let parts: Vec<&str> = base.split("::").collect();
                if parts.len() != 3 || parts.iter().any(|p| p.is_empty()) {
                    return Err(CliError::InvalidTypeTag(format!(
                        "expected a primitive or 'address::module::Name', got '{}'",
                        s
                    )));
                }
                TypeTag::Struct(Box::new(StructTag {
                    address: parts[0]
                        .parse()
                        .map_err(|e| CliError::InvalidTypeTag(format!("'{}': {}", s, e)))?,
                    module: parts[1].to_string(),
                    name: parts[2].to_string(),
                    type_args,
                }))
            }
        };
        Ok(tag)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Bool => write!(f, "bool"),
            TypeTag::U8 => write!(f, "u8"),
            TypeTag::U16 => write!(f, "u16"),
            TypeTag::U32 => write!(f, "u32"),
            TypeTag::U64 => write!(f, "u64"),
            TypeTag::U128 => write!(f, "u128"),
            TypeTag::U256 => write!(f, "u256"),
            TypeTag::Address => write!(f, "address"),
            TypeTag::Signer => write!(f, "signer"),
            TypeTag::Vector(inner) => write!(f, "vector<{}>", inner),
            TypeTag::Struct(tag) => {
                write!(f, "{}::{}::{}", tag.address, tag.module, tag.name)?;
                if !tag.type_args.is_empty() {
                    let args: Vec<String> = tag.type_args.iter().map(ToString::to_string).collect();
                    write!(f, "<{}>", args.join(", "))?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryFunction {
    pub module: ModuleId,
    pub function: String,
    pub ty_args: Vec<TypeTag>,
    pub args: Vec<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionPayload {
    EntryFunction(EntryFunction),
}

impl Serialize for TransactionPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // 0 = script, 1 = module bundle (retired)
        match self {
            TransactionPayload::EntryFunction(entry) => {
                serializer.serialize_newtype_variant("TransactionPayload", 2, "EntryFunction", entry)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawTransaction {
    pub sender: AccountAddress,
    pub sequence_number: u64,
    pub payload: TransactionPayload,
    pub max_gas_amount: u64,
    pub gas_unit_price: u64,
    pub expiration_timestamp_secs: u64,
    pub chain_id: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ed25519PublicKey(pub [u8; 32]);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ed25519Signature(pub [u8; 64]);

impl Serialize for Ed25519PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&self.0)
    }
}

impl Serialize for Ed25519Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TransactionAuthenticator {
    Ed25519 {
        public_key: Ed25519PublicKey,
        signature: Ed25519Signature,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignedTransaction {
    pub raw_txn: RawTransaction,
    pub authenticator: TransactionAuthenticator,
}

/// Transaction detail as reported by the node.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionInfo {
    #[serde(rename = "type")]
    pub kind: String,
    pub hash: String,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub vm_status: String,
}

impl TransactionInfo {
    pub fn is_pending(&self) -> bool {
        self.kind == "pending_transaction"
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountResource {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub data: serde_json::Value,
}
