use crate::domain::aa::PaymasterChain;
use crate::foundation::VoteSproutError;
use crate::infrastructure::config::PaymasterConfig;
use crate::infrastructure::rpc::retry::{poll_until_some, RetryPolicy};
use crate::infrastructure::rpc::transport::{HttpJsonRpcTransport, JsonRpcTransport};
use log::{debug, info, warn};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

pub const SPONSOR_METHOD: &str = "pm_sponsorUserOperation";
pub const SEND_METHOD: &str = "eth_sendUserOperation";
pub const RECEIPT_METHOD: &str = "eth_getUserOperationReceipt";

const SPONSOR_FAILED: &str = "Sponsor failed";
const SEND_FAILED: &str = "Send failed";

/// `{endpoint}/{chain}/rpc?apikey=<key>`
pub fn paymaster_rpc_url(endpoint: &str, chain: PaymasterChain, api_key: &str) -> String {
    format!("{}/{}/rpc?apikey={}", endpoint.trim_end_matches('/'), chain, api_key)
}

/// Server-side client for the bundler/paymaster JSON-RPC API.
pub struct PaymasterClient {
    transport: Arc<dyn JsonRpcTransport>,
    receipt_poll: RetryPolicy,
}

impl PaymasterClient {
    pub fn new(transport: Arc<dyn JsonRpcTransport>, receipt_poll: RetryPolicy) -> Self {
        Self { transport, receipt_poll }
    }

    /// `Ok(None)` when no API key is configured; the proxy routes report that per request.
    pub fn from_config(config: &PaymasterConfig) -> Result<Option<Self>, VoteSproutError> {
        let Some(api_key) = config.api_key() else {
            warn!("paymaster api key not set; sponsor/send/receipt routes will fail");
            return Ok(None);
        };
        let url = paymaster_rpc_url(&config.endpoint, config.chain, api_key);
        let transport = HttpJsonRpcTransport::new(url, config.request_timeout_ms.map(Duration::from_millis))?;
        info!(
            "paymaster client ready endpoint={} chain={} receipt_attempts={} receipt_interval_ms={} receipt_window_ms={}",
            config.endpoint,
            config.chain,
            config.receipt_poll.max_attempts,
            config.receipt_poll.interval_ms,
            config.receipt_poll.total_wait().as_millis()
        );
        Ok(Some(Self::new(Arc::new(transport), config.receipt_poll)))
    }

    pub fn receipt_poll(&self) -> &RetryPolicy {
        &self.receipt_poll
    }

    /// `pm_sponsorUserOperation`; returns the remote `result` untouched.
    pub async fn sponsor(&self, user_operation: Value, entry_point: Value) -> Result<Value, VoteSproutError> {
        let response = self.transport.call(SPONSOR_METHOD, json!([user_operation, entry_point])).await?;
        let result = response.into_result(SPONSOR_METHOD, SPONSOR_FAILED)?;
        debug!("paymaster sponsored user operation");
        Ok(result)
    }

    /// `eth_sendUserOperation`; returns the user operation hash reported by the bundler.
    pub async fn send(&self, user_operation: Value, entry_point: Value) -> Result<Value, VoteSproutError> {
        let response = self.transport.call(SEND_METHOD, json!([user_operation, entry_point])).await?;
        let user_op_hash = response.into_result(SEND_METHOD, SEND_FAILED)?;
        info!("user operation submitted user_op_hash={}", user_op_hash);
        Ok(user_op_hash)
    }

    /// Poll `eth_getUserOperationReceipt` until a non-null result shows up.
    /// Remote error replies count as "not yet"; transport failures abort.
    pub async fn poll_receipt(&self, user_op_hash: &str) -> Result<Option<Value>, VoteSproutError> {
        let transport = &self.transport;
        let receipt = poll_until_some(&self.receipt_poll, |attempt| async move {
            let response = transport.call(RECEIPT_METHOD, json!([user_op_hash])).await?;
            if let Some(error) = response.error.as_ref() {
                debug!("receipt lookup error treated as pending attempt={} message={:?}", attempt + 1, error.message);
            }
            Ok(response.found())
        })
        .await?;
        match &receipt {
            Some(_) => info!("user operation receipt found user_op_hash={}", user_op_hash),
            None => info!(
                "user operation receipt not found user_op_hash={} attempts={}",
                user_op_hash, self.receipt_poll.max_attempts
            ),
        }
        Ok(receipt)
    }
}
