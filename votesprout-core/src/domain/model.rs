use crate::foundation::{DaoId, ProposalId, Timestamp, VoteId, VOTING_WINDOW_HOURS};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dao {
    pub id: DaoId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    pub dao_id: DaoId,
    pub title: String,
    pub description: Option<String>,
    pub options: Vec<String>,
    pub created_at: Timestamp,
    pub creator: Option<String>,
    pub tx_hash: Option<String>,
}

impl Proposal {
    /// End of the implicit voting window. Not persisted; clients enforce it.
    pub fn voting_closes_at(&self) -> Timestamp {
        self.created_at + chrono::Duration::hours(VOTING_WINDOW_HOURS)
    }

    pub fn is_voting_open(&self, now: Timestamp) -> bool {
        now < self.voting_closes_at()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub id: VoteId,
    pub proposal_id: ProposalId,
    pub voter: String,
    pub choice_index: i64,
    pub created_at: Timestamp,
    pub tx_hash: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewDao {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewProposal {
    pub dao_id: DaoId,
    pub title: String,
    pub description: Option<String>,
    pub options: Vec<String>,
    pub creator: Option<String>,
    pub tx_hash: Option<String>,
}

/// Vote as accepted by storage. `voter` is already normalized.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewVote {
    pub proposal_id: ProposalId,
    pub voter: String,
    pub choice_index: i64,
    pub tx_hash: Option<String>,
}

/// Proposal together with its current tally, as served by the detail route.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProposalDetail {
    pub proposal: Proposal,
    pub tallies: Vec<u64>,
    pub total_votes: u64,
}
