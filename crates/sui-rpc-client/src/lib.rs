//! sui-rpc-client: Fullnode JSON-RPC client behind a query trait
//!
//! `ChainQuery` is the read-only surface the vault client depends on.
//! `SuiClient` implements it over HTTP JSON-RPC; tests substitute in-memory
//! implementations.

pub mod probe;
pub mod queries;
pub mod types;

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use vault_core::{parse_rpc_url, RpcConfig, RpcError};

pub use probe::{probe_endpoint, EndpointProbe};
pub use types::*;

/// Result type for RPC client operations
pub type Result<T> = std::result::Result<T, RpcError>;

/// Read-only chain queries
///
/// Every method performs one request and may fail with a transport, timeout,
/// or RPC-level error. Implementations hold no mutable state, so calls may be
/// issued concurrently.
pub trait ChainQuery: Send + Sync {
    /// Fetch an object by ID with the requested projection
    fn get_object(
        &self,
        object_id: &str,
        options: ObjectDataOptions,
    ) -> impl Future<Output = Result<SuiObjectData>> + Send;

    /// Total balance of `coin_type` held by `owner`
    fn get_balance(
        &self,
        owner: &str,
        coin_type: &str,
    ) -> impl Future<Output = Result<Balance>> + Send;

    /// One page of coin objects of `coin_type` held by `owner`
    fn get_coins(
        &self,
        owner: &str,
        coin_type: &str,
        cursor: Option<String>,
        limit: Option<u32>,
    ) -> impl Future<Output = Result<CoinPage>> + Send;

    /// One page of objects owned by `owner`
    fn get_owned_objects(
        &self,
        owner: &str,
        query: OwnedObjectsQuery,
        cursor: Option<String>,
        limit: Option<u32>,
    ) -> impl Future<Output = Result<ObjectPage>> + Send;

    /// One page of dynamic fields under `parent_id`
    fn get_dynamic_fields(
        &self,
        parent_id: &str,
        cursor: Option<String>,
        limit: Option<u32>,
    ) -> impl Future<Output = Result<DynamicFieldPage>> + Send;
}

/// HTTP JSON-RPC client for a fullnode
#[derive(Clone)]
pub struct SuiClient {
    http: reqwest::Client,
    config: RpcConfig,
    next_id: Arc<AtomicU64>,
}

impl SuiClient {
    /// Create a client. No request is made until the first query.
    pub fn new(config: RpcConfig) -> vault_core::Result<Self> {
        parse_rpc_url(&config.url)?;
        let http = reqwest::Client::builder()
            .user_agent(concat!("exchange-vault/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| vault_core::Error::unknown(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            config,
            next_id: Arc::new(AtomicU64::new(1)),
        })
    }

    /// Get the current RPC configuration
    pub fn config(&self) -> &RpcConfig {
        &self.config
    }

    /// Chain identifier (first checkpoint digest prefix)
    pub async fn chain_identifier(&self) -> Result<String> {
        self.call("sui_getChainIdentifier", json!([])).await
    }

    /// Latest executed checkpoint sequence number
    pub async fn latest_checkpoint(&self) -> Result<u64> {
        let raw: String = self
            .call("sui_getLatestCheckpointSequenceNumber", json!([]))
            .await?;
        parse_u64_string(&raw)
    }

    /// Send one JSON-RPC request and decode its result
    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = RpcRequest {
            jsonrpc: "2.0",
            id,
            method,
            params,
        };

        tracing::debug!(method, id, url = %self.config.url, "Sending RPC request");

        timed_request(self.config.request_timeout_secs, async {
            let response = self
                .http
                .post(&self.config.url)
                .json(&request)
                .send()
                .await
                .map_err(|e| RpcError::Unreachable {
                    url: self.config.url.clone(),
                    message: e.to_string(),
                })?;

            let status = response.status();
            if !status.is_success() {
                let message = response.text().await.unwrap_or_default();
                return Err(RpcError::Http {
                    status: status.as_u16(),
                    message,
                });
            }

            let envelope: RpcResponse<T> = response
                .json()
                .await
                .map_err(|e| RpcError::Parse(format!("{} response: {}", method, e)))?;

            envelope.into_result()
        })
        .await
        .inspect_err(|e| tracing::debug!(method, id, error = %e, "RPC request failed"))
    }
}

impl ChainQuery for SuiClient {
    async fn get_object(
        &self,
        object_id: &str,
        options: ObjectDataOptions,
    ) -> Result<SuiObjectData> {
        let response: SuiObjectResponse = self
            .call("sui_getObject", json!([object_id, options]))
            .await?;
        response.into_data(object_id)
    }

    async fn get_balance(&self, owner: &str, coin_type: &str) -> Result<Balance> {
        self.call("suix_getBalance", json!([owner, coin_type])).await
    }

    async fn get_coins(
        &self,
        owner: &str,
        coin_type: &str,
        cursor: Option<String>,
        limit: Option<u32>,
    ) -> Result<CoinPage> {
        self.call("suix_getCoins", json!([owner, coin_type, cursor, limit]))
            .await
    }

    async fn get_owned_objects(
        &self,
        owner: &str,
        query: OwnedObjectsQuery,
        cursor: Option<String>,
        limit: Option<u32>,
    ) -> Result<ObjectPage> {
        self.call("suix_getOwnedObjects", json!([owner, query, cursor, limit]))
            .await
    }

    async fn get_dynamic_fields(
        &self,
        parent_id: &str,
        cursor: Option<String>,
        limit: Option<u32>,
    ) -> Result<DynamicFieldPage> {
        self.call("suix_getDynamicFields", json!([parent_id, cursor, limit]))
            .await
    }
}

/// Wrap an RPC call with a timeout
async fn timed_request<T>(
    timeout_secs: u64,
    fut: impl Future<Output = Result<T>>,
) -> Result<T> {
    tokio::time::timeout(Duration::from_secs(timeout_secs), fut)
        .await
        .map_err(|_| RpcError::Timeout { timeout_secs })?
}
