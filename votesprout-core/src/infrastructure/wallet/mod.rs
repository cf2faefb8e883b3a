//! Account owner keys for the gasless flow.

use crate::foundation::VoteSproutError;
use alloy::primitives::{Address, Bytes, B256};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::Signer;
use async_trait::async_trait;

#[async_trait]
pub trait OwnerSigner: Send + Sync {
    fn address(&self) -> Address;

    /// EIP-191 personal-sign over the 32 raw hash bytes; 65-byte `r ‖ s ‖ v` signature.
    async fn sign_user_op_hash(&self, hash: B256) -> Result<Bytes, VoteSproutError>;
}

pub struct LocalOwnerSigner {
    signer: PrivateKeySigner,
}

impl LocalOwnerSigner {
    pub fn new(signer: PrivateKeySigner) -> Self {
        Self { signer }
    }

    pub fn from_private_key_hex(private_key: &str) -> Result<Self, VoteSproutError> {
        let signer: PrivateKeySigner =
            private_key.trim().parse().map_err(|err| VoteSproutError::ConfigError(format!("invalid owner private key: {err}")))?;
        Ok(Self::new(signer))
    }

    pub fn random() -> Self {
        Self::new(PrivateKeySigner::random())
    }
}

#[async_trait]
impl OwnerSigner for LocalOwnerSigner {
    fn address(&self) -> Address {
        self.signer.address()
    }

    async fn sign_user_op_hash(&self, hash: B256) -> Result<Bytes, VoteSproutError> {
        let signature = self.signer.sign_message(hash.as_slice()).await.map_err(|err| VoteSproutError::SigningFailed(err.to_string()))?;
        Ok(Bytes::from(signature.as_bytes().to_vec()))
    }
}
