//! Plain EOA transactions: the owner key pays gas and no paymaster is involved.

use crate::domain::aa::PaymasterChain;
use crate::domain::DirectOutcome;
use crate::foundation::VoteSproutError;
use alloy::network::EthereumWallet;
use alloy::primitives::{hex, Address, Bytes};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::signers::local::PrivateKeySigner;
use async_trait::async_trait;
use log::info;

#[async_trait]
pub trait DirectSender: Send + Sync {
    fn address(&self) -> Address;
    /// Send `to.call(data)` and wait for the mined receipt.
    async fn send_call(&self, to: Address, data: Bytes) -> Result<DirectOutcome, VoteSproutError>;
}

pub struct WalletSender {
    signer: PrivateKeySigner,
    rpc_url: String,
    chain: PaymasterChain,
}

impl WalletSender {
    pub fn new(signer: PrivateKeySigner, rpc_url: &str, chain: PaymasterChain) -> Self {
        Self { signer, rpc_url: rpc_url.trim().to_string(), chain }
    }

    pub fn from_private_key_hex(private_key: &str, rpc_url: &str, chain: PaymasterChain) -> Result<Self, VoteSproutError> {
        let signer: PrivateKeySigner =
            private_key.trim().parse().map_err(|err| VoteSproutError::ConfigError(format!("invalid owner private key: {err}")))?;
        Ok(Self::new(signer, rpc_url, chain))
    }
}

#[async_trait]
impl DirectSender for WalletSender {
    fn address(&self) -> Address {
        self.signer.address()
    }

    async fn send_call(&self, to: Address, data: Bytes) -> Result<DirectOutcome, VoteSproutError> {
        let url: reqwest::Url =
            self.rpc_url.parse().map_err(|err| VoteSproutError::ConfigError(format!("invalid node rpc url '{}': {err}", self.rpc_url)))?;
        let wallet = EthereumWallet::from(self.signer.clone());
        let provider = ProviderBuilder::new().with_recommended_fillers().wallet(wallet).on_http(url);

        let chain_id = provider.get_chain_id().await.map_err(|err| VoteSproutError::NetworkError(format!("eth_chainId: {err}")))?;
        if chain_id != self.chain.chain_id() {
            return Err(VoteSproutError::ConfigError(format!(
                "node reports chain id {chain_id} but the paymaster chain {} is {}",
                self.chain,
                self.chain.chain_id()
            )));
        }

        let tx = TransactionRequest::default().to(to).input(data.into());
        let pending = provider.send_transaction(tx).await.map_err(|err| VoteSproutError::SubmissionFailed(err.to_string()))?;
        let tx_hash = hex::encode_prefixed(pending.tx_hash());
        info!("direct transaction sent from={} to={} tx_hash={}", self.signer.address(), to, tx_hash);

        let receipt =
            pending.get_receipt().await.map_err(|err| VoteSproutError::SubmissionFailed(format!("receipt for {tx_hash} failed: {err}")))?;
        info!("direct transaction mined tx_hash={} status={} block_number={:?}", tx_hash, receipt.status(), receipt.block_number);

        Ok(DirectOutcome {
            explorer_url: self.chain.explorer_tx_url(&tx_hash),
            tx_hash,
            success: receipt.status(),
            block_number: receipt.block_number,
        })
    }
}
