pub mod check_apt;
pub mod check_twbtc;
pub mod init_bridge;
pub mod init_twbtc;
pub mod mint;
pub mod redeem_request;
pub mod register_receiver;
pub mod register_twbtc;
pub mod send_apt;
pub mod send_twbtc;

use crate::config::AppConfig;
use anyhow::Result;
use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the APT balance of an address (defaults to your own)
    CheckApt {
        address: Option<String>,
    },

    /// Send APT; amount in APT, e.g. 1.5
    SendApt {
        recipient: String,
        amount: String,
    },

    /// Show the TWBTC balance of an address in satoshis (defaults to your own)
    CheckTwbtc {
        address: Option<String>,
    },

    /// Register your account for TWBTC
    RegisterTwbtc,

    /// Send TWBTC; amount in BTC
    SendTwbtc {
        recipient: String,
        amount: String,
    },

    /// Initialize the TWBTC token module
    InitTwbtc,

    /// Initialize the bridge with a fee account and fee
    InitBridge {
        fee_account: String,
        fee: String,
    },

    /// Request a redemption to a bitcoin address; amount in satoshis
    RedeemRequest {
        receiver: String,
        amount: String,
    },

    /// Mint TWBTC against a bitcoin deposit; amount in satoshis
    Mint {
        btc_tx_id: String,
        receiver: String,
        amount: String,
    },

    /// Register another account for TWBTC
    #[command(name = "registerTWBTC")]
    RegisterReceiver {
        receiver: String,
    },
}

pub async fn handle_command(command: Commands, config: &AppConfig) -> Result<()> {
    match command {
        Commands::CheckApt { address } => check_apt::execute(config, address).await,
        Commands::SendApt { recipient, amount } => {
            send_apt::execute(config, recipient, amount).await
        }
        Commands::CheckTwbtc { address } => check_twbtc::execute(config, address).await,
        Commands::RegisterTwbtc => register_twbtc::execute(config).await,
        Commands::SendTwbtc { recipient, amount } => {
            send_twbtc::execute(config, recipient, amount).await
        }
        Commands::InitTwbtc => init_twbtc::execute(config).await,
        Commands::InitBridge { fee_account, fee } => {
            init_bridge::execute(config, fee_account, fee).await
        }
        Commands::RedeemRequest { receiver, amount } => {
            redeem_request::execute(config, receiver, amount).await
        }
        Commands::Mint { btc_tx_id, receiver, amount } => {
            mint::execute(config, btc_tx_id, receiver, amount).await
        }
        Commands::RegisterReceiver { receiver } => {
            register_receiver::execute(config, receiver).await
        }
    }
}
