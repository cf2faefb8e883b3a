use crate::domain::tally::tally_grouped;
use crate::domain::validation::{normalize_voter, validate_choice_in_range, validate_choice_index, validate_new_dao, validate_new_proposal};
use crate::domain::{Dao, NewDao, NewProposal, NewVote, Proposal, ProposalDetail, ProposalTally, Vote};
use crate::foundation::util::ResultExt;
use crate::foundation::{DaoId, ProposalId, VoteSproutError};
use crate::infrastructure::storage::Storage;
use log::{debug, info, warn};
use std::sync::Arc;

/// Validation and persistence for DAOs, proposals and votes.
#[derive(Clone)]
pub struct VoteRepository {
    storage: Arc<dyn Storage>,
    strict_choice_index: bool,
}

impl VoteRepository {
    pub fn new(storage: Arc<dyn Storage>, strict_choice_index: bool) -> Self {
        Self { storage, strict_choice_index }
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    pub async fn create_dao(&self, dao: NewDao) -> Result<Dao, VoteSproutError> {
        validate_new_dao(&dao)?;
        let dao = self.storage.create_dao(dao).await?;
        info!("dao created dao_id={} name={}", dao.id, dao.name);
        Ok(dao)
    }

    pub async fn list_daos(&self) -> Result<Vec<Dao>, VoteSproutError> {
        self.storage.list_daos().await
    }

    pub async fn create_proposal(&self, proposal: NewProposal) -> Result<Proposal, VoteSproutError> {
        validate_new_proposal(&proposal)?;
        self.storage.get_dao(proposal.dao_id).await.required(|| VoteSproutError::not_found("dao", proposal.dao_id))?;
        let proposal = self.storage.create_proposal(proposal).await?;
        info!(
            "proposal created proposal_id={} dao_id={} options={} tx_hash={:?}",
            proposal.id,
            proposal.dao_id,
            proposal.options.len(),
            proposal.tx_hash
        );
        Ok(proposal)
    }

    /// Newest first; empty for an unknown DAO.
    pub async fn list_proposals(&self, dao_id: DaoId) -> Result<Vec<Proposal>, VoteSproutError> {
        self.storage.list_proposals(dao_id).await
    }

    pub async fn get_proposal(&self, proposal_id: ProposalId) -> Result<ProposalDetail, VoteSproutError> {
        let proposal = self.load_proposal(proposal_id).await?;
        let tally = self.tally_for(&proposal).await?;
        Ok(ProposalDetail { proposal, tallies: tally.tallies, total_votes: tally.total_votes })
    }

    /// Per-option counts aligned to the proposal's options.
    pub async fn tallies(&self, proposal_id: ProposalId) -> Result<ProposalTally, VoteSproutError> {
        let proposal = self.load_proposal(proposal_id).await?;
        self.tally_for(&proposal).await
    }

    /// Validate and record one vote. A voter (compared case-insensitively) votes once per proposal.
    pub async fn cast_vote(&self, vote: NewVote) -> Result<Vote, VoteSproutError> {
        let voter = normalize_voter(&vote.voter)?;
        validate_choice_index(vote.choice_index)?;
        let proposal = self.load_proposal(vote.proposal_id).await?;
        if self.strict_choice_index {
            validate_choice_in_range(vote.choice_index, proposal.options.len())?;
        } else if usize::try_from(vote.choice_index).map_or(true, |index| index >= proposal.options.len()) {
            warn!(
                "accepting out-of-range choice proposal_id={} choice_index={} options={}",
                proposal.id,
                vote.choice_index,
                proposal.options.len()
            );
        }

        let proposal_id = vote.proposal_id;
        match self.storage.insert_vote(NewVote { voter: voter.clone(), ..vote }).await? {
            Some(vote) => {
                info!("vote cast proposal_id={} vote_id={} choice_index={}", proposal_id, vote.id, vote.choice_index);
                Ok(vote)
            }
            None => {
                debug!("duplicate vote rejected proposal_id={} voter={}", proposal_id, voter);
                Err(VoteSproutError::DuplicateVote { proposal_id, voter })
            }
        }
    }

    async fn load_proposal(&self, proposal_id: ProposalId) -> Result<Proposal, VoteSproutError> {
        self.storage.get_proposal(proposal_id).await.required(|| VoteSproutError::not_found("proposal", proposal_id))
    }

    async fn tally_for(&self, proposal: &Proposal) -> Result<ProposalTally, VoteSproutError> {
        let groups = self.storage.vote_counts(proposal.id).await?;
        Ok(tally_grouped(proposal.options.len(), groups))
    }
}
