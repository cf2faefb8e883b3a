use super::super::state::ApiState;
use super::super::util::serde_helpers::string_list_or_default;
use super::types::{created, parse_id, parse_json_body, ApiResult};
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use votesprout_core::domain::NewProposal;
use votesprout_core::foundation::DEFAULT_PROPOSAL_OPTIONS;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateProposalRequest {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, deserialize_with = "string_list_or_default")]
    options: Option<Vec<String>>,
    #[serde(default)]
    creator: Option<String>,
    #[serde(default)]
    tx_hash: Option<String>,
}

pub async fn list_proposals(State(state): State<Arc<ApiState>>, Path(dao_id): Path<String>) -> ApiResult<Json<Value>> {
    let dao_id = parse_id(&dao_id, "dao")?;
    let proposals = state.repository.list_proposals(dao_id).await?;
    Ok(Json(json!({ "proposals": proposals })))
}

pub async fn create_proposal(State(state): State<Arc<ApiState>>, Path(dao_id): Path<String>, body: Bytes) -> ApiResult<Response> {
    let dao_id = parse_id(&dao_id, "dao")?;
    let request: CreateProposalRequest = parse_json_body(&body)?;
    let options = request.options.unwrap_or_else(|| DEFAULT_PROPOSAL_OPTIONS.iter().map(|option| option.to_string()).collect());
    let proposal = state
        .repository
        .create_proposal(NewProposal {
            dao_id,
            title: request.title.unwrap_or_default(),
            description: request.description,
            options,
            creator: request.creator,
            tx_hash: request.tx_hash,
        })
        .await?;
    Ok(created(json!({ "proposal": proposal })))
}

pub async fn get_proposal(State(state): State<Arc<ApiState>>, Path(proposal_id): Path<String>) -> ApiResult<Json<Value>> {
    let proposal_id = parse_id(&proposal_id, "proposal")?;
    let detail = state.repository.get_proposal(proposal_id).await?;
    let voting_closes_at = detail.proposal.voting_closes_at();
    Ok(Json(json!({
        "proposal": detail.proposal,
        "tallies": detail.tallies,
        "totalVotes": detail.total_votes,
        "votingClosesAt": voting_closes_at,
    })))
}
