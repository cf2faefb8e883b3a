//! On-chain governance actions followed by their off-chain mirror.
//!
//! Calls go out either gasless through the [`GaslessExecutor`] or as a plain
//! transaction through a [`DirectSender`]. Once the chain reports a transaction
//! hash, the proposal or vote is recorded through the [`ActionMirror`] with the
//! owner EOA as creator/voter. A mirror failure never hides the on-chain result.

use crate::application::GaslessExecutor;
use crate::domain::aa::calls::{encode_create_proposal, encode_vote};
use crate::domain::validation::{validate_choice_index, validate_proposal_content};
use crate::domain::{DirectOutcome, GaslessOutcome, NewProposal, NewVote, Proposal, Vote};
use crate::foundation::util::time::now;
use crate::foundation::{DaoId, VoteSproutError};
use crate::infrastructure::rpc::{ActionMirror, DirectSender};
use alloy::primitives::Address;
use log::{info, warn};
use serde::Serialize;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ChainOutcome {
    Gasless(GaslessOutcome),
    Direct(DirectOutcome),
}

impl ChainOutcome {
    /// Hash of a transaction known to have executed successfully.
    pub fn landed_tx_hash(&self) -> Option<&str> {
        match self {
            ChainOutcome::Gasless(outcome) => outcome.tx_hash.as_deref(),
            ChainOutcome::Direct(outcome) => outcome.success.then_some(outcome.tx_hash.as_str()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MirrorStatus<T> {
    Recorded { record: T },
    Skipped { reason: String },
    Failed { error: String },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GovernanceReport<T> {
    pub outcome: ChainOutcome,
    pub mirror: MirrorStatus<T>,
}

pub struct GovernanceClient {
    executor: Arc<GaslessExecutor>,
    direct: Option<Arc<dyn DirectSender>>,
    mirror: Arc<dyn ActionMirror>,
}

impl GovernanceClient {
    pub fn new(executor: Arc<GaslessExecutor>, mirror: Arc<dyn ActionMirror>) -> Self {
        Self { executor, direct: None, mirror }
    }

    /// Send calls as plain owner transactions instead of sponsored user operations.
    pub fn with_direct(mut self, sender: Arc<dyn DirectSender>) -> Self {
        self.direct = Some(sender);
        self
    }

    pub fn is_direct(&self) -> bool {
        self.direct.is_some()
    }

    /// Address that appears as `msg.sender` at the governance contract.
    pub async fn acting_address(&self) -> Result<Address, VoteSproutError> {
        match &self.direct {
            Some(sender) => Ok(sender.address()),
            None => self.executor.account_address().await,
        }
    }

    fn owner_address(&self) -> Result<Address, VoteSproutError> {
        match &self.direct {
            Some(sender) => Ok(sender.address()),
            None => self.executor.owner_address(),
        }
    }

    pub async fn create_proposal(
        &self,
        dao_id: DaoId,
        title: &str,
        description: &str,
        options: &[String],
    ) -> Result<GovernanceReport<Proposal>, VoteSproutError> {
        validate_proposal_content(title, Some(description), options)?;
        let creator = self.owner_address()?;

        let outcome = match &self.direct {
            Some(sender) => {
                let governance = self.executor.governance()?;
                ChainOutcome::Direct(sender.send_call(governance, encode_create_proposal(title, description, options)).await?)
            }
            None => ChainOutcome::Gasless(self.executor.create_proposal_gasless(title, description, options).await?),
        };

        let mirror = match outcome.landed_tx_hash() {
            Some(tx_hash) => {
                let draft = NewProposal {
                    dao_id,
                    title: title.to_string(),
                    description: (!description.is_empty()).then(|| description.to_string()),
                    options: options.to_vec(),
                    creator: Some(creator.to_string()),
                    tx_hash: Some(tx_hash.to_string()),
                };
                mirror_status("proposal", self.mirror.record_proposal(&draft).await)
            }
            None => skipped("proposal", &outcome),
        };
        Ok(GovernanceReport { outcome, mirror })
    }

    /// Cast a vote. With `check_window` the mirrored proposal's voting window must still be open.
    pub async fn vote(&self, proposal_id: u64, choice_index: i64, check_window: bool) -> Result<GovernanceReport<Vote>, VoteSproutError> {
        validate_choice_index(choice_index)?;
        let mirrored_id = i64::try_from(proposal_id).map_err(|_| VoteSproutError::validation("proposalId", format!("out of range: {proposal_id}")))?;
        if check_window {
            let closes_at = self.mirror.voting_closes_at(proposal_id).await?;
            if now() >= closes_at {
                return Err(VoteSproutError::validation("proposalId", format!("voting closed at {}", closes_at.to_rfc3339())));
            }
        }
        let voter = self.owner_address()?;

        let outcome = match &self.direct {
            Some(sender) => {
                let governance = self.executor.governance()?;
                ChainOutcome::Direct(sender.send_call(governance, encode_vote(proposal_id, choice_index)?).await?)
            }
            None => ChainOutcome::Gasless(self.executor.vote_gasless(proposal_id, choice_index).await?),
        };

        let mirror = match outcome.landed_tx_hash() {
            Some(tx_hash) => {
                let vote = NewVote { proposal_id: mirrored_id, voter: voter.to_string(), choice_index, tx_hash: Some(tx_hash.to_string()) };
                mirror_status("vote", self.mirror.record_vote(&vote).await)
            }
            None => skipped("vote", &outcome),
        };
        Ok(GovernanceReport { outcome, mirror })
    }
}

fn mirror_status<T>(what: &str, result: Result<T, VoteSproutError>) -> MirrorStatus<T> {
    match result {
        Ok(record) => {
            info!("{} mirrored to the service", what);
            MirrorStatus::Recorded { record }
        }
        Err(err) => {
            warn!("on-chain {} landed but mirroring failed error={}", what, err);
            MirrorStatus::Failed { error: err.to_string() }
        }
    }
}

fn skipped<T>(what: &str, outcome: &ChainOutcome) -> MirrorStatus<T> {
    let reason = match outcome {
        ChainOutcome::Gasless(_) => "no transaction receipt yet".to_string(),
        ChainOutcome::Direct(direct) => format!("transaction {} reverted", direct.tx_hash),
    };
    warn!("{} not mirrored: {}", what, reason);
    MirrorStatus::Skipped { reason }
}
