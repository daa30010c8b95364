//! Command-line arguments

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use vault_core::Network;

#[derive(Parser, Debug)]
#[command(name = "vault-cli")]
#[command(about = "Query exchange vaults and assemble unsigned vault transactions", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Connection settings; flags override the config file
#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    /// JSON config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Network whose public fullnode is used unless --rpc-url is given
    #[arg(short, long)]
    pub network: Option<Network>,

    /// Fullnode JSON-RPC URL
    #[arg(long)]
    pub rpc_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Package ID of the vault program
    #[arg(short, long)]
    pub package_id: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Probe the RPC endpoint
    Status,
    /// Show a vault's rate and reserve
    Vault { vault_id: String },
    /// Show a vault's display metadata
    Metadata { vault_id: String },
    /// Quote a mint (default) or redeem against a vault
    Quote {
        vault_id: String,
        /// Amount in smallest units of the asset being sent
        amount: String,
        #[arg(long)]
        redeem: bool,
    },
    /// Show an owner's balance of a coin type
    Balance {
        owner: String,
        #[arg(long, default_value = vault_core::constants::SUI_COIN_TYPE)]
        coin_type: String,
    },
    /// Find the owner capability held by an address
    OwnerCap {
        owner: String,
        /// Only match a capability bound to this vault
        #[arg(long)]
        vault: Option<String>,
    },
    /// Assemble a vault creation
    BuildCreateVault(CreateVaultArgs),
    /// Assemble a mint transaction
    BuildMint(ExchangeArgs),
    /// Assemble a redeem transaction
    BuildRedeem(ExchangeArgs),
    /// Assemble a reserve deposit
    BuildDeposit {
        #[command(flatten)]
        owner: OwnerArgs,
        /// Coin object of the input asset to add to the reserve
        #[arg(long)]
        coin: String,
    },
    /// Assemble a reserve withdrawal
    BuildWithdraw {
        #[command(flatten)]
        owner: OwnerArgs,
        /// Amount in smallest units of the input asset
        #[arg(long)]
        amount: String,
        /// Send the withdrawn coin here
        #[arg(long)]
        recipient: Option<String>,
    },
    /// Assemble a rate change
    BuildUpdateRate {
        #[command(flatten)]
        owner: OwnerArgs,
        /// New rate, scaled by 10^rate_decimals
        #[arg(long)]
        rate: String,
    },
}

/// Vault generic parameters; read from chain when omitted
#[derive(Args, Debug)]
pub struct TypeArgs {
    #[arg(long, requires = "output_type")]
    pub input_type: Option<String>,
    #[arg(long, requires = "input_type")]
    pub output_type: Option<String>,
}

#[derive(Args, Debug)]
pub struct CreateVaultArgs {
    /// Treasury capability of the output coin
    #[arg(long)]
    pub treasury: String,
    /// Rate, scaled by 10^rate_decimals
    #[arg(long)]
    pub rate: String,
    #[arg(long)]
    pub rate_decimals: u32,
    #[arg(long)]
    pub symbol: String,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub description: String,
    #[arg(long)]
    pub icon_url: Option<String>,
    #[arg(long)]
    pub input_type: String,
    #[arg(long)]
    pub output_type: String,
}

#[derive(Args, Debug)]
pub struct ExchangeArgs {
    #[arg(long)]
    pub vault: String,
    /// Metadata object; looked up under the vault when omitted
    #[arg(long)]
    pub metadata: Option<String>,
    /// Coin object to exchange
    #[arg(long)]
    pub coin: String,
    /// Send the resulting coin here
    #[arg(long)]
    pub recipient: Option<String>,
    #[command(flatten)]
    pub types: TypeArgs,
}

#[derive(Args, Debug)]
pub struct OwnerArgs {
    #[arg(long)]
    pub owner_cap: String,
    #[arg(long)]
    pub vault: String,
    #[command(flatten)]
    pub types: TypeArgs,
}
