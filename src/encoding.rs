//! Entry-function argument encoding.
//!
//! Arguments of an entry-function call travel as a list of opaque byte
//! strings. Addresses and `u64` integers go through `bcs`; `String` (and raw
//! `vector<u8>`) arguments carry a ULEB128 length prefix followed by the
//! UTF-8 bytes.

use crate::error::CliError;
use crate::types::AccountAddress;

/// Unsigned LEB128: seven value bits per byte, high bit set on every byte
/// except the last.
pub fn encode_uleb128(mut value: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(2);
    while value >= 0x80 {
        out.push(((value & 0x7f) as u8) | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
    out
}

/// Encodes a Move `String` argument: `uleb128(len) ++ bytes`.
pub fn encode_string_arg(s: &str) -> Vec<u8> {
    let bytes = s.as_bytes();
    let mut out = encode_uleb128(bytes.len() as u64);
    out.extend_from_slice(bytes);
    out
}

pub fn serialize_address(address: &AccountAddress) -> Result<Vec<u8>, CliError> {
    Ok(bcs::to_bytes(address)?)
}

pub fn serialize_u64(value: u64) -> Result<Vec<u8>, CliError> {
    Ok(bcs::to_bytes(&value)?)
}

/// A typed entry-function argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveArg {
    Address(AccountAddress),
    U64(u64),
    String(String),
}

impl MoveArg {
    pub fn encode(&self) -> Result<Vec<u8>, CliError> {
        match self {
            MoveArg::Address(address) => serialize_address(address),
            MoveArg::U64(value) => serialize_u64(*value),
            MoveArg::String(s) => Ok(encode_string_arg(s)),
        }
    }
}

/// Encodes every argument in order.
pub fn encode_args(args: &[MoveArg]) -> Result<Vec<Vec<u8>>, CliError> {
    args.iter().map(MoveArg::encode).collect()
}
