use anyhow::Context;
use exchange_vault::{
    format_amount, format_rate, validate, CoinRegistry, NumericValue, QuoteDirection,
};
use serde_json::json;
use sui_rpc_client::probe_endpoint;
use vault_core::AppConfig;

use super::{print_json, vault_client};

pub async fn status(config: &AppConfig) -> anyhow::Result<()> {
    let probe = probe_endpoint(&config.rpc.url)
        .await
        .with_context(|| format!("RPC endpoint {} is not responding", config.rpc.url))?;
    print_json(&json!({
        "network": config.network,
        "packageId": config.package_id,
        "endpoint": probe,
    }))
}

pub async fn vault(config: &AppConfig, vault_id: &str) -> anyhow::Result<()> {
    let client = vault_client(config)?;
    let state = client.get_vault_state(vault_id).await?;
    print_json(&json!({
        "vault": state,
        "displayRate": format_rate(state.rate, state.rate_decimals),
    }))
}

pub async fn metadata(config: &AppConfig, vault_id: &str) -> anyhow::Result<()> {
    let client = vault_client(config)?;
    let metadata_id = client
        .find_vault_metadata(vault_id)
        .await?
        .with_context(|| format!("Vault {} has no metadata field", vault_id))?;
    let metadata = client.get_vault_metadata(&metadata_id).await?;
    print_json(&metadata)
}

pub async fn quote(
    config: &AppConfig,
    vault_id: &str,
    amount: &str,
    redeem: bool,
) -> anyhow::Result<()> {
    let client = vault_client(config)?;
    let direction = if redeem {
        QuoteDirection::Redeem
    } else {
        QuoteDirection::Mint
    };
    let quote = client
        .get_quote(vault_id, NumericValue::from(amount), direction)
        .await?;
    print_json(&json!({
        "quote": quote,
        "displayRate": format_rate(quote.rate, quote.rate_decimals),
    }))
}

/// Lookup failures print a zero balance; the cause is logged
pub async fn balance(config: &AppConfig, owner: &str, coin_type: &str) -> anyhow::Result<()> {
    let owner = validate::validate_address(owner)?;
    validate::validate_coin_type(coin_type)?;

    let client = vault_client(config)?;
    let total = client.get_balance(&owner, coin_type).await;

    let registry = CoinRegistry::with_sui();
    print_json(&json!({
        "owner": owner,
        "coinType": coin_type,
        "symbol": registry.symbol(coin_type),
        "balance": total.to_string(),
        "display": format_amount(total, registry.decimals(coin_type)),
    }))
}

pub async fn owner_cap(
    config: &AppConfig,
    owner: &str,
    vault_id: Option<&str>,
) -> anyhow::Result<()> {
    let client = vault_client(config)?;
    match client.find_owner_cap(owner, vault_id).await? {
        Some(cap) => print_json(&json!({ "ownerCap": cap })),
        None => anyhow::bail!("{} holds no matching owner capability", owner),
    }
}
