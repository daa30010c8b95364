use anyhow::Context;
use exchange_vault::{
    DepositParams, ExchangeParams, NumericValue, UpdateRateParams, VaultClient, VaultConfig,
    VaultTypeArgs, WithdrawParams,
};
use sui_rpc_client::SuiClient;
use sui_tx::{ObjectHandle, ProgrammableTransaction};
use vault_core::AppConfig;

use super::vault_client;
use crate::cli::{CreateVaultArgs, ExchangeArgs, OwnerArgs, TypeArgs};

#[derive(Debug, Clone, Copy)]
pub enum Direction {
    Mint,
    Redeem,
}

/// Type arguments from flags, or read from the vault's on-chain type
async fn type_args(
    client: &VaultClient<SuiClient>,
    types: TypeArgs,
    vault: &str,
) -> anyhow::Result<VaultTypeArgs> {
    match (types.input_type, types.output_type) {
        (Some(input), Some(output)) => Ok(VaultTypeArgs::new(input, output)),
        _ => client
            .infer_type_arguments(vault)
            .await
            .with_context(|| format!("Could not read type arguments of vault {}", vault)),
    }
}

fn print_tx(tx: &ProgrammableTransaction) -> anyhow::Result<()> {
    println!("{}", tx.to_json_pretty()?);
    Ok(())
}

pub fn create_vault(config: &AppConfig, args: CreateVaultArgs) -> anyhow::Result<()> {
    let client = vault_client(config)?;
    let vault_config = VaultConfig {
        rate: NumericValue::from(args.rate),
        rate_decimals: args.rate_decimals,
        symbol: args.symbol,
        name: args.name,
        description: args.description,
        icon_url: args.icon_url,
        input_type: args.input_type,
        output_type: args.output_type,
    };

    let mut tx = ProgrammableTransaction::new();
    client.create_vault(&mut tx, &vault_config, &ObjectHandle::from(args.treasury))?;
    print_tx(&tx)
}

pub async fn exchange(
    config: &AppConfig,
    args: ExchangeArgs,
    direction: Direction,
) -> anyhow::Result<()> {
    let client = vault_client(config)?;
    let type_args = type_args(&client, args.types, &args.vault).await?;
    let metadata = match args.metadata {
        Some(id) => id,
        None => client
            .find_vault_metadata(&args.vault)
            .await?
            .with_context(|| format!("Vault {} has no metadata field; pass --metadata", args.vault))?,
    };

    let params = ExchangeParams {
        type_args,
        vault: ObjectHandle::from(args.vault),
        metadata: ObjectHandle::from(metadata),
        coin: ObjectHandle::from(args.coin),
    };

    let mut tx = ProgrammableTransaction::new();
    match (direction, args.recipient.as_deref()) {
        (Direction::Mint, Some(recipient)) => client.mint_and_transfer(&mut tx, &params, recipient)?,
        (Direction::Mint, None) => {
            client.mint(&mut tx, &params)?;
        }
        (Direction::Redeem, Some(recipient)) => {
            client.redeem_and_transfer(&mut tx, &params, recipient)?
        }
        (Direction::Redeem, None) => {
            client.redeem(&mut tx, &params)?;
        }
    }
    print_tx(&tx)
}

pub async fn deposit(config: &AppConfig, owner: OwnerArgs, coin: String) -> anyhow::Result<()> {
    let client = vault_client(config)?;
    let type_args = type_args(&client, owner.types, &owner.vault).await?;
    let params = DepositParams {
        type_args,
        owner_cap: ObjectHandle::from(owner.owner_cap),
        vault: ObjectHandle::from(owner.vault),
        coin: ObjectHandle::from(coin),
    };

    let mut tx = ProgrammableTransaction::new();
    client.deposit(&mut tx, &params)?;
    print_tx(&tx)
}

pub async fn withdraw(
    config: &AppConfig,
    owner: OwnerArgs,
    amount: String,
    recipient: Option<String>,
) -> anyhow::Result<()> {
    let client = vault_client(config)?;
    let type_args = type_args(&client, owner.types, &owner.vault).await?;
    let params = WithdrawParams {
        type_args,
        owner_cap: ObjectHandle::from(owner.owner_cap),
        vault: ObjectHandle::from(owner.vault),
        amount: NumericValue::from(amount),
    };

    let mut tx = ProgrammableTransaction::new();
    match recipient.as_deref() {
        Some(recipient) => client.withdraw_and_transfer(&mut tx, &params, recipient)?,
        None => {
            client.withdraw(&mut tx, &params)?;
        }
    }
    print_tx(&tx)
}

pub async fn update_rate(config: &AppConfig, owner: OwnerArgs, rate: String) -> anyhow::Result<()> {
    let client = vault_client(config)?;
    let type_args = type_args(&client, owner.types, &owner.vault).await?;
    let params = UpdateRateParams {
        type_args,
        owner_cap: ObjectHandle::from(owner.owner_cap),
        vault: ObjectHandle::from(owner.vault),
        new_rate: NumericValue::from(rate),
    };

    let mut tx = ProgrammableTransaction::new();
    client.update_rate(&mut tx, &params)?;
    print_tx(&tx)
}
