//! Client side of the off-chain mirror routes: after an on-chain action lands,
//! the proposal or vote is recorded through the service API with its tx hash.

use crate::domain::{NewProposal, NewVote, Proposal, Vote};
use crate::foundation::{Timestamp, VoteSproutError};
use async_trait::async_trait;
use log::debug;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

#[async_trait]
pub trait ActionMirror: Send + Sync {
    /// End of the voting window of the mirrored proposal.
    async fn voting_closes_at(&self, proposal_id: u64) -> Result<Timestamp, VoteSproutError>;
    async fn record_proposal(&self, proposal: &NewProposal) -> Result<Proposal, VoteSproutError>;
    async fn record_vote(&self, vote: &NewVote) -> Result<Vote, VoteSproutError>;
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProposalWindowBody {
    voting_closes_at: Timestamp,
}

#[derive(Deserialize)]
struct ProposalBody {
    proposal: Proposal,
}

#[derive(Deserialize)]
struct VoteBody {
    vote: Vote,
}

pub struct ServiceMirrorClient {
    client: reqwest::Client,
    base_url: String,
}

impl ServiceMirrorClient {
    pub fn new(base_url: &str) -> Self {
        Self { client: reqwest::Client::new(), base_url: base_url.trim_end_matches('/').to_string() }
    }

    async fn read<T: DeserializeOwned>(&self, route: &str, response: reqwest::Response) -> Result<T, VoteSproutError> {
        let status = response.status();
        let bytes = response.bytes().await?;
        debug!("mirror reply route={} status={} bytes={}", route, status.as_u16(), bytes.len());
        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&bytes)
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| format!("{route} returned http {}", status.as_u16()));
            return Err(VoteSproutError::remote(route, Some(i64::from(status.as_u16())), message));
        }
        serde_json::from_slice(&bytes).map_err(|err| VoteSproutError::remote(route, None, format!("unexpected response: {err}")))
    }

    async fn post<T: DeserializeOwned>(&self, route: &str, body: Value) -> Result<T, VoteSproutError> {
        let response = self.client.post(format!("{}{}", self.base_url, route)).json(&body).send().await?;
        self.read(route, response).await
    }
}

#[async_trait]
impl ActionMirror for ServiceMirrorClient {
    async fn voting_closes_at(&self, proposal_id: u64) -> Result<Timestamp, VoteSproutError> {
        let route = format!("/proposals/{proposal_id}");
        let response = self.client.get(format!("{}{}", self.base_url, route)).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(VoteSproutError::not_found("proposal", i64::try_from(proposal_id).unwrap_or(i64::MAX)));
        }
        let body: ProposalWindowBody = self.read(&route, response).await?;
        Ok(body.voting_closes_at)
    }

    async fn record_proposal(&self, proposal: &NewProposal) -> Result<Proposal, VoteSproutError> {
        let body = json!({
            "title": proposal.title,
            "description": proposal.description,
            "options": proposal.options,
            "creator": proposal.creator,
            "txHash": proposal.tx_hash,
        });
        let reply: ProposalBody = self.post(&format!("/daos/{}/proposals", proposal.dao_id), body).await?;
        Ok(reply.proposal)
    }

    async fn record_vote(&self, vote: &NewVote) -> Result<Vote, VoteSproutError> {
        let body = json!({ "voter": vote.voter, "choiceIndex": vote.choice_index, "txHash": vote.tx_hash });
        let reply: VoteBody = self.post(&format!("/proposals/{}/vote", vote.proposal_id), body).await?;
        Ok(reply.vote)
    }
}
