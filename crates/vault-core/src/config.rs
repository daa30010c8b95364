//! Configuration types for the exchange vault client

use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{Error, Network};

/// RPC connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcConfig {
    /// Fullnode JSON-RPC URL (e.g., "https://fullnode.mainnet.sui.io:443")
    pub url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl RpcConfig {
    pub fn for_network(network: Network) -> Self {
        Self {
            url: network.default_rpc_url().to_string(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self::for_network(Network::Mainnet)
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// RPC connection settings
    #[serde(default)]
    pub rpc: RpcConfig,

    /// Network the package is deployed on
    #[serde(default = "default_network")]
    pub network: Network,

    /// Package ID of the deployed vault program
    #[serde(default)]
    pub package_id: Option<String>,
}

fn default_network() -> Network {
    Network::Mainnet
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rpc: RpcConfig::default(),
            network: default_network(),
            package_id: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::invalid_parameters(format!(
                "Failed to read config {}: {}",
                path.display(),
                e
            ))
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            Error::invalid_parameters(format!(
                "Failed to parse config {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Check the RPC settings. The package ID is checked by the client that consumes it.
    pub fn validate(&self) -> Result<(), Error> {
        parse_rpc_url(&self.rpc.url)?;
        if self.rpc.request_timeout_secs == 0 {
            return Err(Error::invalid_parameters(
                "Request timeout must be at least 1 second",
            ));
        }
        Ok(())
    }
}

/// Parse a URL and require an HTTP or HTTPS scheme
pub fn parse_rpc_url(raw: &str) -> Result<Url, Error> {
    let url = Url::parse(raw)
        .map_err(|e| Error::invalid_parameters(format!("Invalid URL '{}': {}", raw, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::invalid_parameters(format!(
            "RPC URL '{}' must use http or https, got '{}'",
            raw, other
        ))),
    }
}
