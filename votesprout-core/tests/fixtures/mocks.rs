#![allow(dead_code)]

use crate::fixtures::TEST_DIRECT_TX_HASH;
use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::SolValue;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Mutex;
use votesprout_core::domain::aa::{Sponsorship, UserOperation};
use votesprout_core::domain::{DirectOutcome, NewProposal, NewVote, Proposal, Vote};
use votesprout_core::foundation::util::time::now;
use votesprout_core::foundation::{Timestamp, VoteSproutError};
use votesprout_core::infrastructure::rpc::{AccountChain, ActionMirror, DirectSender, JsonRpcResponse, JsonRpcTransport, SponsorRelay};

/// Replies with queued responses in order, then with `fallback` forever.
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<JsonRpcResponse, VoteSproutError>>>,
    fallback: JsonRpcResponse,
    calls: Mutex<Vec<(String, Value)>>,
}

impl ScriptedTransport {
    pub fn new(fallback: JsonRpcResponse) -> Self {
        Self { replies: Mutex::new(VecDeque::new()), fallback, calls: Mutex::new(Vec::new()) }
    }

    pub fn always_null() -> Self {
        Self::new(JsonRpcResponse::ok(Value::Null))
    }

    pub fn push(self, reply: Result<JsonRpcResponse, VoteSproutError>) -> Self {
        self.replies.lock().expect("replies lock").push_back(reply);
        self
    }

    pub fn push_n(self, count: usize, reply: JsonRpcResponse) -> Self {
        {
            let mut replies = self.replies.lock().expect("replies lock");
            for _ in 0..count {
                replies.push_back(Ok(reply.clone()));
            }
        }
        self
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("calls lock").len()
    }
}

#[async_trait]
impl JsonRpcTransport for ScriptedTransport {
    async fn call(&self, method: &str, params: Value) -> Result<JsonRpcResponse, VoteSproutError> {
        self.calls.lock().expect("calls lock").push((method.to_string(), params));
        let next = self.replies.lock().expect("replies lock").pop_front();
        next.unwrap_or_else(|| Ok(self.fallback.clone()))
    }
}

/// Node answering `getAddress` / `getNonce` for one counterfactual account.
pub struct MockChain {
    pub factory: Address,
    pub entry_point: Address,
    pub sender: Address,
    pub nonce: U256,
    pub deployed: bool,
    pub chain_id: u64,
    calls: Mutex<Vec<Address>>,
}

impl MockChain {
    pub fn new(factory: Address, entry_point: Address, sender: Address) -> Self {
        Self { factory, entry_point, sender, nonce: U256::from(3u64), deployed: false, chain_id: 8453, calls: Mutex::new(Vec::new()) }
    }

    pub fn deployed(mut self) -> Self {
        self.deployed = true;
        self
    }

    pub fn calls_to(&self, to: Address) -> usize {
        self.calls.lock().expect("calls lock").iter().filter(|called| **called == to).count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().expect("calls lock").len()
    }
}

#[async_trait]
impl AccountChain for MockChain {
    async fn chain_id(&self) -> Result<u64, VoteSproutError> {
        Ok(self.chain_id)
    }

    async fn call(&self, to: Address, _data: Bytes) -> Result<Bytes, VoteSproutError> {
        self.calls.lock().expect("calls lock").push(to);
        if to == self.factory {
            Ok(Bytes::from(self.sender.abi_encode()))
        } else if to == self.entry_point {
            Ok(Bytes::from(self.nonce.abi_encode()))
        } else {
            Err(VoteSproutError::Message(format!("unexpected eth_call to {to}")))
        }
    }

    async fn has_code(&self, _address: Address) -> Result<bool, VoteSproutError> {
        Ok(self.deployed)
    }

    async fn gas_price(&self) -> Result<U256, VoteSproutError> {
        Ok(U256::from(1_000_000u64))
    }

    async fn max_priority_fee_per_gas(&self) -> Result<U256, VoteSproutError> {
        Ok(U256::from(100_000u64))
    }
}

pub fn test_sponsorship() -> Sponsorship {
    Sponsorship {
        paymaster_and_data: Bytes::from(vec![0xab; 24]),
        pre_verification_gas: U256::from(50_000u64),
        verification_gas_limit: U256::from(150_000u64),
        call_gas_limit: U256::from(80_000u64),
        max_fee_per_gas: Some(U256::from(2_000_000u64)),
        max_priority_fee_per_gas: None,
    }
}

pub fn test_receipt(tx_hash: &str) -> Value {
    json!({ "success": true, "receipt": { "transactionHash": tx_hash, "status": "0x1" } })
}

/// In-process stand-in for the proxy routes; records every operation it sees.
pub struct MockRelay {
    pub fail_sponsor: bool,
    pub fail_send: bool,
    pub fail_receipt: bool,
    pub user_op_hash: String,
    pub receipt: Option<Value>,
    sponsored: Mutex<Vec<UserOperation>>,
    sent: Mutex<Vec<UserOperation>>,
    receipt_queries: Mutex<Vec<String>>,
}

impl MockRelay {
    pub fn new(user_op_hash: &str, receipt: Option<Value>) -> Self {
        Self {
            fail_sponsor: false,
            fail_send: false,
            fail_receipt: false,
            user_op_hash: user_op_hash.to_string(),
            receipt,
            sponsored: Mutex::new(Vec::new()),
            sent: Mutex::new(Vec::new()),
            receipt_queries: Mutex::new(Vec::new()),
        }
    }

    pub fn sponsored(&self) -> Vec<UserOperation> {
        self.sponsored.lock().expect("sponsored lock").clone()
    }

    pub fn sent(&self) -> Vec<UserOperation> {
        self.sent.lock().expect("sent lock").clone()
    }

    pub fn receipt_queries(&self) -> Vec<String> {
        self.receipt_queries.lock().expect("receipt lock").clone()
    }
}

#[async_trait]
impl SponsorRelay for MockRelay {
    async fn sponsor(&self, user_operation: &UserOperation, _entry_point: Address) -> Result<Sponsorship, VoteSproutError> {
        self.sponsored.lock().expect("sponsored lock").push(user_operation.clone());
        if self.fail_sponsor {
            return Err(VoteSproutError::NetworkError("paymaster unreachable".to_string()));
        }
        Ok(test_sponsorship())
    }

    async fn send(&self, user_operation: &UserOperation, _entry_point: Address) -> Result<String, VoteSproutError> {
        self.sent.lock().expect("sent lock").push(user_operation.clone());
        if self.fail_send {
            return Err(VoteSproutError::remote("eth_sendUserOperation", Some(-32500), "AA23 reverted"));
        }
        Ok(self.user_op_hash.clone())
    }

    async fn receipt(&self, user_op_hash: &str) -> Result<Option<Value>, VoteSproutError> {
        self.receipt_queries.lock().expect("receipt lock").push(user_op_hash.to_string());
        if self.fail_receipt {
            return Err(VoteSproutError::NetworkError("connection reset".to_string()));
        }
        Ok(self.receipt.clone())
    }
}

/// Service mirror that keeps what it was asked to record.
pub struct MockMirror {
    pub voting_closes_at: Option<Timestamp>,
    pub fail_record: bool,
    proposals: Mutex<Vec<NewProposal>>,
    votes: Mutex<Vec<NewVote>>,
}

impl MockMirror {
    pub fn open_for(hours: i64) -> Self {
        Self {
            voting_closes_at: Some(now() + chrono::Duration::hours(hours)),
            fail_record: false,
            proposals: Mutex::new(Vec::new()),
            votes: Mutex::new(Vec::new()),
        }
    }

    pub fn proposals(&self) -> Vec<NewProposal> {
        self.proposals.lock().expect("proposals lock").clone()
    }

    pub fn votes(&self) -> Vec<NewVote> {
        self.votes.lock().expect("votes lock").clone()
    }
}

#[async_trait]
impl ActionMirror for MockMirror {
    async fn voting_closes_at(&self, proposal_id: u64) -> Result<Timestamp, VoteSproutError> {
        self.voting_closes_at.ok_or_else(|| VoteSproutError::not_found("proposal", proposal_id as i64))
    }

    async fn record_proposal(&self, proposal: &NewProposal) -> Result<Proposal, VoteSproutError> {
        self.proposals.lock().expect("proposals lock").push(proposal.clone());
        if self.fail_record {
            return Err(VoteSproutError::remote("/daos/1/proposals", Some(404), "dao 1 not found"));
        }
        Ok(Proposal {
            id: 1,
            dao_id: proposal.dao_id,
            title: proposal.title.clone(),
            description: proposal.description.clone(),
            options: proposal.options.clone(),
            created_at: now(),
            creator: proposal.creator.clone(),
            tx_hash: proposal.tx_hash.clone(),
        })
    }

    async fn record_vote(&self, vote: &NewVote) -> Result<Vote, VoteSproutError> {
        self.votes.lock().expect("votes lock").push(vote.clone());
        if self.fail_record {
            return Err(VoteSproutError::remote("/proposals/1/vote", Some(400), "You already voted on this proposal."));
        }
        Ok(Vote {
            id: 1,
            proposal_id: vote.proposal_id,
            voter: vote.voter.to_lowercase(),
            choice_index: vote.choice_index,
            created_at: now(),
            tx_hash: vote.tx_hash.clone(),
        })
    }
}

/// Owner wallet that "mines" every call immediately.
pub struct MockDirectSender {
    pub owner: Address,
    pub reverts: bool,
    calls: Mutex<Vec<(Address, Bytes)>>,
}

impl MockDirectSender {
    pub fn new(owner: Address) -> Self {
        Self { owner, reverts: false, calls: Mutex::new(Vec::new()) }
    }

    pub fn calls(&self) -> Vec<(Address, Bytes)> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl DirectSender for MockDirectSender {
    fn address(&self) -> Address {
        self.owner
    }

    async fn send_call(&self, to: Address, data: Bytes) -> Result<DirectOutcome, VoteSproutError> {
        self.calls.lock().expect("calls lock").push((to, data));
        Ok(DirectOutcome {
            tx_hash: TEST_DIRECT_TX_HASH.to_string(),
            success: !self.reverts,
            block_number: Some(12),
            explorer_url: format!("https://basescan.org/tx/{TEST_DIRECT_TX_HASH}"),
        })
    }
}
