//! Endpoint reachability probe

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use vault_core::RpcConfig;

use crate::SuiClient;

const PROBE_TIMEOUT_SECS: u64 = 4;

/// Result of probing a single fullnode URL
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointProbe {
    pub url: String,
    pub chain_id: String,
    /// Latest checkpoint, if the node answered the second request
    pub checkpoint: Option<u64>,
    pub latency_ms: u64,
}

/// Probe a fullnode URL. Returns None when the URL is invalid or the node
/// does not answer within 4 seconds.
pub async fn probe_endpoint(url: &str) -> Option<EndpointProbe> {
    let client = SuiClient::new(RpcConfig {
        url: url.to_string(),
        request_timeout_secs: PROBE_TIMEOUT_SECS,
    })
    .ok()?;

    let start = Instant::now();
    let chain_id = client.chain_identifier().await.ok()?;
    let latency_ms = start.elapsed().as_millis() as u64;

    let checkpoint = tokio::time::timeout(
        Duration::from_secs(PROBE_TIMEOUT_SECS),
        client.latest_checkpoint(),
    )
    .await
    .ok()
    .and_then(|r| r.ok());

    Some(EndpointProbe {
        url: url.to_string(),
        chain_id,
        checkpoint,
        latency_ms,
    })
}
