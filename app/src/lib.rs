//! vault-cli: query exchange vaults and print unsigned transactions as JSON
//!
//! Nothing here signs or submits. Built transactions are printed for a
//! wallet or signer to complete.

pub mod cli;
pub mod commands;

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use vault_core::{AppConfig, RpcConfig};

use crate::cli::{Cli, GlobalArgs};

/// Log to stderr so stdout carries only JSON output
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("vault_cli=debug,info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Merge the config file (or defaults) with command-line overrides
pub fn resolve_config(args: &GlobalArgs) -> anyhow::Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => AppConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => AppConfig::default(),
    };

    if let Some(network) = args.network {
        let timeout = config.rpc.request_timeout_secs;
        config.network = network;
        config.rpc = RpcConfig {
            request_timeout_secs: timeout,
            ..RpcConfig::for_network(network)
        };
    }
    if let Some(url) = &args.rpc_url {
        config.rpc.url = url.clone();
    }
    if let Some(timeout) = args.timeout {
        config.rpc.request_timeout_secs = timeout;
    }
    if let Some(package_id) = &args.package_id {
        config.package_id = Some(package_id.clone());
    }

    config.validate()?;
    Ok(config)
}

/// Run one CLI invocation
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = resolve_config(&cli.global)?;
    tracing::debug!(network = %config.network, rpc = %config.rpc.url, "Resolved configuration");
    commands::dispatch(&config, cli.command).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};
    use vault_core::Network;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_build_mint() {
        let cli = Cli::try_parse_from([
            "vault-cli",
            "--package-id",
            "0xbeef",
            "build-mint",
            "--vault",
            "0xa1",
            "--coin",
            "0xc0",
            "--recipient",
            "0x5",
        ])
        .unwrap();
        assert_eq!(cli.global.package_id.as_deref(), Some("0xbeef"));
        match cli.command {
            crate::cli::Commands::BuildMint(args) => {
                assert_eq!(args.vault, "0xa1");
                assert!(args.metadata.is_none());
                assert!(args.types.input_type.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_owner_builds() {
        let cli = Cli::try_parse_from([
            "vault-cli",
            "build-deposit",
            "--owner-cap",
            "0xca",
            "--vault",
            "0xa1",
            "--coin",
            "0xc0",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            crate::cli::Commands::BuildDeposit { ref coin, .. } if coin == "0xc0"
        ));

        let cli = Cli::try_parse_from([
            "vault-cli",
            "build-create-vault",
            "--treasury",
            "0x7e",
            "--rate",
            "2000000000",
            "--rate-decimals",
            "9",
            "--symbol",
            "VLT",
            "--name",
            "Vault Token",
            "--description",
            "Minted at a fixed rate",
            "--input-type",
            "0x2::sui::SUI",
            "--output-type",
            "0xabc::vlt::VLT",
        ])
        .unwrap();
        match cli.command {
            crate::cli::Commands::BuildCreateVault(args) => {
                assert_eq!(args.rate_decimals, 9);
                assert!(args.icon_url.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }

        // Output type is required when creating
        assert!(Cli::try_parse_from([
            "vault-cli",
            "build-create-vault",
            "--treasury",
            "0x7e",
            "--rate",
            "1",
            "--rate-decimals",
            "0",
            "--symbol",
            "V",
            "--name",
            "V",
            "--description",
            "V",
            "--input-type",
            "0x2::sui::SUI",
        ])
        .is_err());
    }

    #[test]
    fn test_type_args_must_come_in_pairs() {
        let result = Cli::try_parse_from([
            "vault-cli",
            "build-redeem",
            "--vault",
            "0xa1",
            "--coin",
            "0xc0",
            "--input-type",
            "0x2::sui::SUI",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_config_defaults() {
        let config = resolve_config(&GlobalArgs::default()).unwrap();
        assert_eq!(config.network, Network::Mainnet);
        assert!(config.package_id.is_none());
    }

    #[test]
    fn test_resolve_config_overrides() {
        let args = GlobalArgs {
            network: Some(Network::Testnet),
            timeout: Some(5),
            package_id: Some("0xbeef".into()),
            ..Default::default()
        };
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.rpc.url, Network::Testnet.default_rpc_url());
        assert_eq!(config.rpc.request_timeout_secs, 5);
        assert_eq!(config.package_id.as_deref(), Some("0xbeef"));

        let args = GlobalArgs {
            network: Some(Network::Localnet),
            rpc_url: Some("http://10.0.0.2:9000".into()),
            ..Default::default()
        };
        assert_eq!(resolve_config(&args).unwrap().rpc.url, "http://10.0.0.2:9000");
    }

    #[test]
    fn test_resolve_config_rejects_bad_values() {
        let bad_url = GlobalArgs {
            rpc_url: Some("ftp://node".into()),
            ..Default::default()
        };
        assert!(resolve_config(&bad_url).is_err());

        let zero_timeout = GlobalArgs {
            timeout: Some(0),
            ..Default::default()
        };
        assert!(resolve_config(&zero_timeout).is_err());

        let missing_file = GlobalArgs {
            config: Some("/nonexistent/vault.json".into()),
            ..Default::default()
        };
        assert!(resolve_config(&missing_file).is_err());
    }
}
