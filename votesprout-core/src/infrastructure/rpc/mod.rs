pub mod direct;
pub mod mirror;
pub mod node;
pub mod paymaster;
pub mod relay;
pub mod retry;
pub mod transport;

pub use direct::{DirectSender, WalletSender};
pub use mirror::{ActionMirror, ServiceMirrorClient};
pub use node::EthNodeClient;
pub use paymaster::{paymaster_rpc_url, PaymasterClient};
pub use relay::ProxyRelayClient;
pub use retry::{poll_until_some, RetryPolicy};
pub use transport::{HttpJsonRpcTransport, JsonRpcErrorObject, JsonRpcResponse, JsonRpcTransport};

use crate::domain::aa::{Sponsorship, UserOperation};
use crate::foundation::VoteSproutError;
use alloy::primitives::{Address, Bytes, U256};
use async_trait::async_trait;
use serde_json::Value;

/// Chain reads the gasless executor needs.
#[async_trait]
pub trait AccountChain: Send + Sync {
    async fn chain_id(&self) -> Result<u64, VoteSproutError>;
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, VoteSproutError>;
    async fn has_code(&self, address: Address) -> Result<bool, VoteSproutError>;
    async fn gas_price(&self) -> Result<U256, VoteSproutError>;
    async fn max_priority_fee_per_gas(&self) -> Result<U256, VoteSproutError>;
}

/// Sponsorship, submission and receipt lookup for user operations.
#[async_trait]
pub trait SponsorRelay: Send + Sync {
    async fn sponsor(&self, user_operation: &UserOperation, entry_point: Address) -> Result<Sponsorship, VoteSproutError>;
    async fn send(&self, user_operation: &UserOperation, entry_point: Address) -> Result<String, VoteSproutError>;
    /// Receipt or `None` once the server-side poll gives up.
    async fn receipt(&self, user_op_hash: &str) -> Result<Option<Value>, VoteSproutError>;
}
