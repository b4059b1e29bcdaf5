//! Entry points and types of the deployed TWBTC token and bridge modules.

use crate::error::CliError;
use crate::types::{AccountAddress, EntryFunctionId, StructTag, TypeTag};

pub const TOKEN_MODULE: &str = "btc_tokenv3";
/// Self-registration still lives in the previous token module.
pub const LEGACY_TOKEN_MODULE: &str = "btc_tokenv2";
pub const BRIDGE_MODULE: &str = "btc_bridgev3";
pub const COIN_NAME: &str = "BTC";

pub const APT_TRANSFER: &str = "0x1::aptos_account::transfer";

/// Resolves `publisher::module::function`.
pub fn entry_function(
    publisher: AccountAddress,
    module: &str,
    function: &str,
) -> Result<EntryFunctionId, CliError> {
    format!("{}::{}::{}", publisher, module, function).parse()
}

/// `publisher::btc_tokenv3::BTC`
pub fn twbtc_coin_type(publisher: AccountAddress) -> TypeTag {
    TypeTag::Struct(Box::new(StructTag {
        address: publisher,
        module: TOKEN_MODULE.to_string(),
        name: COIN_NAME.to_string(),
        type_args: vec![],
    }))
}

/// `0x1::coin::CoinStore<publisher::btc_tokenv3::BTC>`
pub fn twbtc_coin_store(publisher: AccountAddress) -> TypeTag {
    TypeTag::Struct(Box::new(StructTag {
        address: AccountAddress::ONE,
        module: "coin".to_string(),
        name: "CoinStore".to_string(),
        type_args: vec![twbtc_coin_type(publisher)],
    }))
}
