//! Subcommand handlers
//!
//! Query commands print JSON read from the chain. Build commands print the
//! unsigned transaction accumulator as JSON.

mod build;
mod query;

use anyhow::Context;
use exchange_vault::VaultClient;
use serde::Serialize;
use sui_rpc_client::SuiClient;
use vault_core::AppConfig;

use crate::cli::Commands;

pub async fn dispatch(config: &AppConfig, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Status => query::status(config).await,
        Commands::Vault { vault_id } => query::vault(config, &vault_id).await,
        Commands::Metadata { vault_id } => query::metadata(config, &vault_id).await,
        Commands::Quote {
            vault_id,
            amount,
            redeem,
        } => query::quote(config, &vault_id, &amount, redeem).await,
        Commands::Balance { owner, coin_type } => query::balance(config, &owner, &coin_type).await,
        Commands::OwnerCap { owner, vault } => {
            query::owner_cap(config, &owner, vault.as_deref()).await
        }
        Commands::BuildCreateVault(args) => build::create_vault(config, args),
        Commands::BuildMint(args) => build::exchange(config, args, build::Direction::Mint).await,
        Commands::BuildRedeem(args) => {
            build::exchange(config, args, build::Direction::Redeem).await
        }
        Commands::BuildDeposit { owner, coin } => build::deposit(config, owner, coin).await,
        Commands::BuildWithdraw {
            owner,
            amount,
            recipient,
        } => build::withdraw(config, owner, amount, recipient).await,
        Commands::BuildUpdateRate { owner, rate } => build::update_rate(config, owner, rate).await,
    }
}

fn rpc_client(config: &AppConfig) -> anyhow::Result<SuiClient> {
    Ok(SuiClient::new(config.rpc.clone())?)
}

fn vault_client(config: &AppConfig) -> anyhow::Result<VaultClient<SuiClient>> {
    let package_id = config
        .package_id
        .as_deref()
        .context("No package ID configured; pass --package-id or set packageId in the config file")?;
    Ok(VaultClient::new(rpc_client(config)?, package_id)?)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
