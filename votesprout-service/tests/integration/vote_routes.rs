use super::helpers::{app, create_dao, create_proposal, get_json, post_json, state_with, test_state};
use axum::http::StatusCode;
use serde_json::json;
use votesprout_core::infrastructure::storage::MemoryStorage;

#[tokio::test]
async fn votes_feed_the_detail_tallies() {
    let app = app(test_state());
    let dao_id = create_dao(&app, "Core").await;
    let proposal_id = create_proposal(&app, dao_id, json!(["Yes", "No", "Abstain"])).await;
    let vote_uri = format!("/proposals/{proposal_id}/vote");

    for (voter, choice) in [("0xvoter-one", json!(0)), ("0xvoter-two", json!("0")), ("0xvoter-three", json!(2))] {
        let (status, body) = post_json(&app, &vote_uri, json!({ "voter": voter, "choiceIndex": choice })).await;
        assert_eq!(status, StatusCode::CREATED, "vote by {voter}: {body}");
        assert_eq!(body["vote"]["voter"], voter);
    }

    let (_, body) = get_json(&app, &format!("/proposals/{proposal_id}")).await;
    assert_eq!(body["tallies"], json!([2, 0, 1]));
    assert_eq!(body["totalVotes"], 3);
}

#[tokio::test]
async fn duplicate_vote_is_rejected_with_fixed_message() {
    let app = app(test_state());
    let dao_id = create_dao(&app, "Core").await;
    let proposal_id = create_proposal(&app, dao_id, json!(["Yes", "No"])).await;
    let vote_uri = format!("/proposals/{proposal_id}/vote");

    let (status, body) = post_json(&app, &vote_uri, json!({ "voter": "0xABCDEF", "choiceIndex": 1, "txHash": "0xbeef" })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["vote"]["voter"], "0xabcdef");
    assert_eq!(body["vote"]["tx_hash"], "0xbeef");

    let (status, body) = post_json(&app, &vote_uri, json!({ "voter": "0xabcdef", "choiceIndex": 0 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "You already voted on this proposal.");

    let (_, body) = get_json(&app, &format!("/proposals/{proposal_id}")).await;
    assert_eq!(body["tallies"], json!([0, 1]));
}

#[tokio::test]
async fn invalid_votes_are_bad_requests() {
    let app = app(test_state());
    let dao_id = create_dao(&app, "Core").await;
    let proposal_id = create_proposal(&app, dao_id, json!(["Yes", "No"])).await;
    let vote_uri = format!("/proposals/{proposal_id}/vote");

    for body in [
        json!({ "voter": "0xvoter", "choiceIndex": 2 }),
        json!({ "voter": "0xvoter", "choiceIndex": -1 }),
        json!({ "voter": "0xvoter", "choiceIndex": "first" }),
        json!({ "voter": "0xvoter" }),
        json!({ "voter": "0x1", "choiceIndex": 0 }),
    ] {
        let (status, reply) = post_json(&app, &vote_uri, body.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body} -> {reply}");
        assert!(reply["error"].is_string());
    }
}

#[tokio::test]
async fn vote_on_unknown_proposal_is_not_found() {
    let app = app(test_state());
    let (status, _) = post_json(&app, "/proposals/404/vote", json!({ "voter": "0xvoter", "choiceIndex": 0 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn permissive_mode_accepts_choice_equal_to_option_count() {
    let app = app(state_with(MemoryStorage::new(), false, None));
    let dao_id = create_dao(&app, "Core").await;
    let proposal_id = create_proposal(&app, dao_id, json!(["Yes", "No"])).await;

    let (status, _) = post_json(&app, &format!("/proposals/{proposal_id}/vote"), json!({ "voter": "0xvoter", "choiceIndex": 2 })).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = get_json(&app, &format!("/proposals/{proposal_id}")).await;
    assert_eq!(body["tallies"], json!([0, 0]));
    assert_eq!(body["totalVotes"], 1);
}

#[tokio::test]
async fn choice_index_coerces_like_js_number() {
    let app = app(test_state());
    let dao_id = create_dao(&app, "Core").await;
    let proposal_id = create_proposal(&app, dao_id, json!(["Yes", "No", "Abstain"])).await;
    let vote_uri = format!("/proposals/{proposal_id}/vote");

    for (voter, choice, expected) in [("0xvoter-one", json!("2.0"), 2), ("0xvoter-two", json!(""), 0), ("0xvoter-three", json!(null), 0)] {
        let (status, body) = post_json(&app, &vote_uri, json!({ "voter": voter, "choiceIndex": choice })).await;
        assert_eq!(status, StatusCode::CREATED, "vote by {voter}: {body}");
        assert_eq!(body["vote"]["choice_index"], expected);
    }

    let (_, body) = get_json(&app, &format!("/proposals/{proposal_id}")).await;
    assert_eq!(body["tallies"], json!([2, 0, 1]));
}
