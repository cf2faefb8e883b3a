use crate::domain::{Dao, NewDao, NewProposal, NewVote, Proposal, Vote};
use crate::foundation::util::now;
use crate::foundation::{DaoId, ProposalId, VoteId, VoteSproutError};
use crate::infrastructure::storage::{Result, Storage, StorageBackend};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Default)]
struct MemoryInner {
    daos: BTreeMap<DaoId, Dao>,
    proposals: BTreeMap<ProposalId, Proposal>,
    votes: BTreeMap<VoteId, Vote>,
    voters: HashSet<(ProposalId, String)>,
    dao_seq: DaoId,
    proposal_seq: ProposalId,
    vote_seq: VoteId,
}

/// Process-local store with monotonic ids. Contents are lost on restart.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with the demo DAOs and the gasless voting proposal.
    pub fn with_demo_data() -> Self {
        let created_at = now();
        let mut inner = MemoryInner::default();
        for (id, name, description) in [(1, "VoteSprout Core", "Core governance DAO"), (2, "Community Grants", "Grants and funding")] {
            inner.daos.insert(id, Dao { id, name: name.to_string(), description: Some(description.to_string()), created_at });
        }
        inner.proposals.insert(
            1,
            Proposal {
                id: 1,
                dao_id: 1,
                title: "Adopt Gasless Voting Standard".to_string(),
                description: Some("Adopt gasless voting across all products.".to_string()),
                options: ["For", "Against", "Abstain"].into_iter().map(str::to_string).collect(),
                created_at,
                creator: None,
                tx_hash: None,
            },
        );
        inner.dao_seq = 2;
        inner.proposal_seq = 1;
        Self { inner: Arc::new(Mutex::new(inner)) }
    }

    fn lock_inner(&self) -> Result<MutexGuard<'_, MemoryInner>> {
        self.inner
            .lock()
            .map_err(|_| VoteSproutError::StorageError { operation: "memory storage lock".to_string(), details: "poisoned".to_string() })
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    fn backend(&self) -> StorageBackend {
        StorageBackend::Memory
    }

    async fn create_dao(&self, dao: NewDao) -> Result<Dao> {
        let mut inner = self.lock_inner()?;
        inner.dao_seq += 1;
        let row = Dao { id: inner.dao_seq, name: dao.name, description: dao.description, created_at: now() };
        inner.daos.insert(row.id, row.clone());
        Ok(row)
    }

    async fn list_daos(&self) -> Result<Vec<Dao>> {
        Ok(self.lock_inner()?.daos.values().rev().cloned().collect())
    }

    async fn get_dao(&self, id: DaoId) -> Result<Option<Dao>> {
        Ok(self.lock_inner()?.daos.get(&id).cloned())
    }

    async fn create_proposal(&self, proposal: NewProposal) -> Result<Proposal> {
        let mut inner = self.lock_inner()?;
        if !inner.daos.contains_key(&proposal.dao_id) {
            return Err(VoteSproutError::not_found("dao", proposal.dao_id));
        }
        inner.proposal_seq += 1;
        let row = Proposal {
            id: inner.proposal_seq,
            dao_id: proposal.dao_id,
            title: proposal.title,
            description: proposal.description,
            options: proposal.options,
            created_at: now(),
            creator: proposal.creator,
            tx_hash: proposal.tx_hash,
        };
        inner.proposals.insert(row.id, row.clone());
        Ok(row)
    }

    async fn list_proposals(&self, dao_id: DaoId) -> Result<Vec<Proposal>> {
        let inner = self.lock_inner()?;
        Ok(inner.proposals.values().rev().filter(|proposal| proposal.dao_id == dao_id).cloned().collect())
    }

    async fn get_proposal(&self, id: ProposalId) -> Result<Option<Proposal>> {
        Ok(self.lock_inner()?.proposals.get(&id).cloned())
    }

    async fn insert_vote(&self, vote: NewVote) -> Result<Option<Vote>> {
        let mut inner = self.lock_inner()?;
        if !inner.proposals.contains_key(&vote.proposal_id) {
            return Err(VoteSproutError::not_found("proposal", vote.proposal_id));
        }
        if !inner.voters.insert((vote.proposal_id, vote.voter.clone())) {
            return Ok(None);
        }
        inner.vote_seq += 1;
        let row = Vote {
            id: inner.vote_seq,
            proposal_id: vote.proposal_id,
            voter: vote.voter,
            choice_index: vote.choice_index,
            created_at: now(),
            tx_hash: vote.tx_hash,
        };
        inner.votes.insert(row.id, row.clone());
        Ok(Some(row))
    }

    async fn vote_counts(&self, proposal_id: ProposalId) -> Result<Vec<(i64, u64)>> {
        let inner = self.lock_inner()?;
        let mut counts: HashMap<i64, u64> = HashMap::new();
        for vote in inner.votes.values().filter(|vote| vote.proposal_id == proposal_id) {
            *counts.entry(vote.choice_index).or_default() += 1;
        }
        let mut groups: Vec<(i64, u64)> = counts.into_iter().collect();
        groups.sort_unstable();
        Ok(groups)
    }

    async fn health_check(&self) -> Result<()> {
        self.lock_inner().map(|_| ())
    }
}
