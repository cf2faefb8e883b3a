use super::super::state::ApiState;
use super::super::util::serde_helpers::js_integer_opt;
use super::types::{created, parse_id, parse_json_body, ApiResult};
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::response::Response;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use votesprout_core::domain::NewVote;
use votesprout_core::foundation::{ErrorCode, VoteSproutError};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CastVoteRequest {
    #[serde(default)]
    voter: Option<String>,
    #[serde(default, deserialize_with = "js_integer_opt")]
    choice_index: Option<i64>,
    #[serde(default)]
    tx_hash: Option<String>,
}

fn vote_outcome(err: &VoteSproutError) -> &'static str {
    match err.code() {
        ErrorCode::DuplicateVote => "duplicate",
        ErrorCode::Validation => "invalid",
        ErrorCode::NotFound => "not_found",
        _ => "error",
    }
}

fn parse_vote(raw_proposal_id: &str, body: &Bytes) -> ApiResult<NewVote> {
    let proposal_id = parse_id(raw_proposal_id, "proposal")?;
    let request: CastVoteRequest = parse_json_body(body)?;
    let choice_index = request.choice_index.ok_or_else(|| VoteSproutError::validation("choiceIndex", "is required"))?;
    Ok(NewVote { proposal_id, voter: request.voter.unwrap_or_default(), choice_index, tx_hash: request.tx_hash })
}

pub async fn cast_vote(State(state): State<Arc<ApiState>>, Path(proposal_id): Path<String>, body: Bytes) -> ApiResult<Response> {
    let vote = match parse_vote(&proposal_id, &body) {
        Ok(vote) => vote,
        Err(err) => {
            state.metrics.inc_vote("invalid");
            return Err(err);
        }
    };
    match state.repository.cast_vote(vote).await {
        Ok(vote) => {
            state.metrics.inc_vote("accepted");
            Ok(created(json!({ "vote": vote })))
        }
        Err(err) => {
            state.metrics.inc_vote(vote_outcome(&err));
            Err(err.into())
        }
    }
}
