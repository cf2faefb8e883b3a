use super::helpers::{app, create_dao, get_json, post_json, request_raw, state_with, test_state, BODY_LIMIT};
use axum::http::{Method, StatusCode};
use serde_json::json;
use votesprout_core::infrastructure::storage::MemoryStorage;

#[tokio::test]
async fn one_letter_dao_name_is_bad_request() {
    let app = app(test_state());
    let (status, body) = post_json(&app, "/daos", json!({ "name": "A" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().expect("error text").starts_with("name"));
}

#[tokio::test]
async fn created_daos_are_listed_newest_first() {
    let app = app(test_state());
    let (status, body) = post_json(&app, "/daos", json!({ "name": "Core", "description": "Core governance" })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["dao"]["id"], 1);
    assert_eq!(body["dao"]["description"], "Core governance");
    create_dao(&app, "Grants").await;

    let (status, body) = get_json(&app, "/daos").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["daos"].as_array().expect("daos").iter().filter_map(|dao| dao["name"].as_str()).collect();
    assert_eq!(names, vec!["Grants", "Core"]);
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let app = app(test_state());
    let (status, body) = request_raw(&app, Method::POST, "/daos", Some("{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn proposal_options_default_to_yes_no() {
    let app = app(test_state());
    let dao_id = create_dao(&app, "Core").await;

    let (status, body) = post_json(&app, &format!("/daos/{dao_id}/proposals"), json!({ "title": "Ship it", "options": "Yes,No,Maybe" })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["proposal"]["options"], json!(["Yes", "No"]));

    let (status, body) = post_json(
        &app,
        &format!("/daos/{dao_id}/proposals"),
        json!({ "title": "Pick one", "options": ["A", "B", "C"], "creator": "0xcreator", "txHash": "0xfeed" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["proposal"]["options"], json!(["A", "B", "C"]));
    assert_eq!(body["proposal"]["tx_hash"], "0xfeed");

    let (status, body) = get_json(&app, &format!("/daos/{dao_id}/proposals")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["proposals"].as_array().expect("proposals").len(), 2);
    assert_eq!(body["proposals"][0]["title"], "Pick one");
}

#[tokio::test]
async fn proposal_validation_and_missing_dao() {
    let app = app(test_state());
    let dao_id = create_dao(&app, "Core").await;

    let (status, _) = post_json(&app, &format!("/daos/{dao_id}/proposals"), json!({ "title": "Solo", "options": ["Only"] })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = post_json(&app, "/daos/77/proposals", json!({ "title": "Orphan" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().expect("error").contains("not found"));

    let (status, _) = get_json(&app, "/daos/abc/proposals").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn proposal_detail_reports_tallies_and_window() {
    let app = app(state_with(MemoryStorage::with_demo_data(), true, None));

    let (status, body) = get_json(&app, "/proposals/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["proposal"]["title"], "Adopt Gasless Voting Standard");
    assert_eq!(body["tallies"], json!([0, 0, 0]));
    assert_eq!(body["totalVotes"], 0);

    let created_at = chrono::DateTime::parse_from_rfc3339(body["proposal"]["created_at"].as_str().expect("created_at")).expect("rfc3339");
    let closes_at = chrono::DateTime::parse_from_rfc3339(body["votingClosesAt"].as_str().expect("votingClosesAt")).expect("rfc3339");
    assert_eq!(closes_at - created_at, chrono::Duration::hours(72));

    let (status, body) = get_json(&app, "/proposals/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());

    let (status, _) = get_json(&app, "/proposals/not-a-number").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn oversized_body_gets_json_error() {
    let app = app(test_state());
    let description = "d".repeat(BODY_LIMIT + 1);
    let (status, body) = post_json(&app, "/daos", json!({ "name": "Core", "description": description })).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(body["error"].as_str().is_some_and(|message| !message.is_empty()), "{body}");
}

#[tokio::test]
async fn unknown_route_and_wrong_method_get_json_errors() {
    let app = app(test_state());
    let (status, body) = get_json(&app, "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");

    let (status, body) = request_raw(&app, Method::DELETE, "/daos", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert!(body["error"].is_string());
}
