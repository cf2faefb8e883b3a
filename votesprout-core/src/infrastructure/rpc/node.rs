use crate::foundation::VoteSproutError;
use crate::infrastructure::rpc::transport::{HttpJsonRpcTransport, JsonRpcTransport};
use crate::infrastructure::rpc::AccountChain;
use alloy::primitives::{Address, Bytes, U256};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::str::FromStr;
use std::sync::Arc;

/// Minimal Ethereum node client: read-only calls needed to build a user operation.
pub struct EthNodeClient {
    transport: Arc<dyn JsonRpcTransport>,
}

impl EthNodeClient {
    pub fn new(transport: Arc<dyn JsonRpcTransport>) -> Self {
        Self { transport }
    }

    pub fn connect_http(url: &str) -> Result<Self, VoteSproutError> {
        Ok(Self::new(Arc::new(HttpJsonRpcTransport::new(url, None)?)))
    }

    async fn request(&self, method: &str, params: Value) -> Result<String, VoteSproutError> {
        let result = self.transport.call(method, params).await?.into_result(method, "node request failed")?;
        result.as_str().map(str::to_string).ok_or_else(|| VoteSproutError::remote(method, None, format!("expected hex string, got {result}")))
    }

    async fn request_quantity(&self, method: &str) -> Result<U256, VoteSproutError> {
        let hex = self.request(method, json!([])).await?;
        U256::from_str(&hex).map_err(|err| VoteSproutError::EncodingError(format!("{method}: invalid quantity {hex}: {err}")))
    }
}

#[async_trait]
impl AccountChain for EthNodeClient {
    async fn chain_id(&self) -> Result<u64, VoteSproutError> {
        let id = self.request_quantity("eth_chainId").await?;
        u64::try_from(id).map_err(|_| VoteSproutError::EncodingError(format!("chain id out of range: {id}")))
    }

    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, VoteSproutError> {
        let hex = self.request("eth_call", json!([{ "to": to, "data": data }, "latest"])).await?;
        Bytes::from_str(&hex).map_err(|err| VoteSproutError::EncodingError(format!("eth_call: invalid bytes: {err}")))
    }

    async fn has_code(&self, address: Address) -> Result<bool, VoteSproutError> {
        let hex = self.request("eth_getCode", json!([address, "latest"])).await?;
        let code = Bytes::from_str(&hex).map_err(|err| VoteSproutError::EncodingError(format!("eth_getCode: invalid bytes: {err}")))?;
        Ok(!code.is_empty())
    }

    async fn gas_price(&self) -> Result<U256, VoteSproutError> {
        self.request_quantity("eth_gasPrice").await
    }

    async fn max_priority_fee_per_gas(&self) -> Result<U256, VoteSproutError> {
        self.request_quantity("eth_maxPriorityFeePerGas").await
    }
}
