//! Gasless execution of one contract call through an ERC-4337 SimpleAccount.
//!
//! The executor derives the owner's counterfactual account, builds an unsigned
//! EntryPoint v0.6 user operation, gets it sponsored, signs the sponsored
//! operation, submits it and waits for the receipt through a [`SponsorRelay`].

use crate::domain::aa::calls::{
    decode_get_address, decode_get_nonce, encode_create_proposal, encode_execute, encode_get_address, encode_get_nonce, encode_init_code,
    encode_vote,
};
use crate::domain::aa::{PaymasterChain, UserOperation};
use crate::domain::submission::receipt_transaction_hash;
use crate::domain::validation::validate_proposal_content;
use crate::domain::{GaslessOutcome, SubmissionState};
use crate::foundation::VoteSproutError;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::rpc::{AccountChain, SponsorRelay};
use crate::infrastructure::wallet::OwnerSigner;
use alloy::primitives::{Address, Bytes, U256};
use log::{debug, info, warn};
use parking_lot::Mutex;
use std::str::FromStr;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GaslessSettings {
    pub entry_point: Address,
    pub account_factory: Address,
    pub account_salt: U256,
    pub governance: Option<Address>,
    pub chain: PaymasterChain,
}

impl GaslessSettings {
    pub fn from_config(config: &AppConfig) -> Result<Self, VoteSproutError> {
        let gasless = &config.gasless;
        let governance = gasless.governance_address.as_deref().map(|address| parse_address("gasless.governance_address", address)).transpose()?;
        Ok(Self {
            entry_point: parse_address("gasless.entry_point", &gasless.entry_point)?,
            account_factory: parse_address("gasless.account_factory", &gasless.account_factory)?,
            account_salt: U256::from(gasless.account_salt),
            governance,
            chain: config.paymaster.chain,
        })
    }
}

fn parse_address(field: &str, value: &str) -> Result<Address, VoteSproutError> {
    Address::from_str(value.trim()).map_err(|err| VoteSproutError::ConfigError(format!("invalid {field} '{value}': {err}")))
}

pub struct GaslessExecutor {
    chain: Arc<dyn AccountChain>,
    relay: Arc<dyn SponsorRelay>,
    signer: Option<Arc<dyn OwnerSigner>>,
    settings: GaslessSettings,
    sender: Mutex<Option<Address>>,
}

impl GaslessExecutor {
    pub fn new(
        chain: Arc<dyn AccountChain>,
        relay: Arc<dyn SponsorRelay>,
        signer: Option<Arc<dyn OwnerSigner>>,
        settings: GaslessSettings,
    ) -> Self {
        Self { chain, relay, signer, settings, sender: Mutex::new(None) }
    }

    pub fn settings(&self) -> &GaslessSettings {
        &self.settings
    }

    fn signer(&self) -> Result<&Arc<dyn OwnerSigner>, VoteSproutError> {
        self.signer.as_ref().ok_or_else(|| VoteSproutError::ConfigError("no wallet signer connected".to_string()))
    }

    /// EOA that owns the smart account.
    pub fn owner_address(&self) -> Result<Address, VoteSproutError> {
        Ok(self.signer()?.address())
    }

    pub fn governance(&self) -> Result<Address, VoteSproutError> {
        self.settings.governance.ok_or_else(|| VoteSproutError::ConfigError("governance contract address is not configured".to_string()))
    }

    /// Counterfactual SimpleAccount of the signer, resolved once per executor.
    pub async fn account_address(&self) -> Result<Address, VoteSproutError> {
        let cached = *self.sender.lock();
        if let Some(sender) = cached {
            return Ok(sender);
        }
        let owner = self.signer()?.address();
        let data = encode_get_address(owner, self.settings.account_salt);
        let sender = decode_get_address(&self.chain.call(self.settings.account_factory, data).await?)?;
        debug!("resolved smart account owner={} sender={}", owner, sender);
        *self.sender.lock() = Some(sender);
        Ok(sender)
    }

    /// Governance `createProposal(title, description, options)` paid by the paymaster.
    pub async fn create_proposal_gasless(&self, title: &str, description: &str, options: &[String]) -> Result<GaslessOutcome, VoteSproutError> {
        let governance = self.governance()?;
        validate_proposal_content(title, Some(description), options)?;
        self.execute_call(governance, encode_create_proposal(title, description, options)).await
    }

    /// Governance `vote(proposalId, choiceIndex)` paid by the paymaster.
    pub async fn vote_gasless(&self, proposal_id: u64, choice_index: i64) -> Result<GaslessOutcome, VoteSproutError> {
        let governance = self.governance()?;
        self.execute_call(governance, encode_vote(proposal_id, choice_index)?).await
    }

    /// Run `to.call(data)` from the signer's smart account without the signer paying gas.
    pub async fn execute_call(&self, to: Address, data: Bytes) -> Result<GaslessOutcome, VoteSproutError> {
        let signer = self.signer()?.clone();
        self.governance()?;
        let entry_point = self.settings.entry_point;

        let chain_id = self.chain.chain_id().await?;
        let expected_chain_id = self.settings.chain.chain_id();
        if chain_id != expected_chain_id {
            return Err(VoteSproutError::ConfigError(format!(
                "node reports chain id {chain_id} but the paymaster chain {} is {expected_chain_id}",
                self.settings.chain
            )));
        }

        let sender = self.account_address().await?;
        let init_code = if self.chain.has_code(sender).await? {
            Bytes::new()
        } else {
            encode_init_code(self.settings.account_factory, signer.address(), self.settings.account_salt)
        };
        let nonce = decode_get_nonce(&self.chain.call(entry_point, encode_get_nonce(sender)).await?)?;
        let max_fee_per_gas = self.chain.gas_price().await?;
        let max_priority_fee_per_gas = self.chain.max_priority_fee_per_gas().await?;

        let mut user_operation =
            UserOperation::unsigned(sender, nonce, init_code, encode_execute(to, U256::ZERO, data), max_fee_per_gas, max_priority_fee_per_gas)?;
        let mut state = SubmissionState::Created;
        info!("gasless call prepared sender={} to={} nonce={} deploy={}", sender, to, nonce, !user_operation.init_code.is_empty());

        let sponsorship = self.relay.sponsor(&user_operation, entry_point).await.map_err(|err| match err {
            VoteSproutError::SponsorshipFailed(_) => err,
            other => VoteSproutError::SponsorshipFailed(other.to_string()),
        })?;
        user_operation.apply_sponsorship(&sponsorship);
        state = state.transition(SubmissionState::Sponsored)?;

        let op_hash = user_operation.hash(entry_point, chain_id);
        user_operation.signature = signer.sign_user_op_hash(op_hash).await?;
        debug!("user operation signed hash={} chain_id={}", op_hash, chain_id);

        let user_op_hash = self.relay.send(&user_operation, entry_point).await.map_err(|err| match err {
            VoteSproutError::SubmissionFailed(_) => err,
            other => VoteSproutError::SubmissionFailed(other.to_string()),
        })?;
        state = state.transition(SubmissionState::Submitted)?;
        info!("user operation submitted user_op_hash={}", user_op_hash);

        let receipt = match self.relay.receipt(&user_op_hash).await {
            Ok(receipt) => receipt,
            Err(err) => {
                warn!("receipt lookup failed; operation may still land user_op_hash={} error={}", user_op_hash, err);
                None
            }
        };
        let tx_hash = receipt.as_ref().and_then(receipt_transaction_hash);
        state = state.transition(if receipt.is_some() { SubmissionState::ReceiptFound } else { SubmissionState::ReceiptUnknown })?;
        let explorer_url = tx_hash.as_deref().map(|hash| self.settings.chain.explorer_tx_url(hash));
        info!("gasless call finished user_op_hash={} state={:?} tx_hash={:?}", user_op_hash, state, tx_hash);

        Ok(GaslessOutcome { user_op_hash, state, tx_hash, explorer_url, receipt })
    }
}
