use crate::domain::{Dao, NewDao, NewProposal, NewVote, Proposal, Vote};
use crate::foundation::{DaoId, ProposalId, VoteSproutError};
use async_trait::async_trait;
use std::fmt;

pub type Result<T> = std::result::Result<T, VoteSproutError>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Postgres,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => f.write_str("memory"),
            Self::Postgres => f.write_str("postgres"),
        }
    }
}

/// Row store for DAOs, proposals and votes. Inputs arrive validated; every write is one atomic insert.
#[async_trait]
pub trait Storage: Send + Sync {
    fn backend(&self) -> StorageBackend;

    async fn create_dao(&self, dao: NewDao) -> Result<Dao>;
    /// Newest first.
    async fn list_daos(&self) -> Result<Vec<Dao>>;
    async fn get_dao(&self, id: DaoId) -> Result<Option<Dao>>;

    async fn create_proposal(&self, proposal: NewProposal) -> Result<Proposal>;
    /// Newest first.
    async fn list_proposals(&self, dao_id: DaoId) -> Result<Vec<Proposal>>;
    async fn get_proposal(&self, id: ProposalId) -> Result<Option<Proposal>>;

    /// Insert a vote unless `(proposal_id, voter)` already exists.
    /// Returns `Ok(None)` for the duplicate.
    async fn insert_vote(&self, vote: NewVote) -> Result<Option<Vote>>;
    /// `(choice_index, count)` groups for a proposal, including out-of-range indices.
    async fn vote_counts(&self, proposal_id: ProposalId) -> Result<Vec<(i64, u64)>>;

    async fn health_check(&self) -> Result<()>;
}
