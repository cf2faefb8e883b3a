use crate::fixtures::{test_receipt, ScriptedTransport, TEST_TX_HASH, TEST_USER_OP_HASH};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use votesprout_core::foundation::{ErrorCode, VoteSproutError};
use votesprout_core::infrastructure::rpc::paymaster::RECEIPT_METHOD;
use votesprout_core::infrastructure::rpc::{JsonRpcResponse, PaymasterClient, RetryPolicy};

fn client(transport: Arc<ScriptedTransport>) -> PaymasterClient {
    PaymasterClient::new(transport, RetryPolicy::default())
}

#[tokio::test(start_paused = true)]
async fn receipt_found_on_twentieth_attempt() {
    let transport = Arc::new(ScriptedTransport::always_null().push_n(19, JsonRpcResponse::ok(Value::Null)).push(Ok(JsonRpcResponse::ok(test_receipt(TEST_TX_HASH)))));
    let started = tokio::time::Instant::now();

    let receipt = client(transport.clone()).poll_receipt(TEST_USER_OP_HASH).await.expect("poll");

    assert_eq!(receipt, Some(test_receipt(TEST_TX_HASH)));
    assert_eq!(transport.call_count(), 20);
    assert!(started.elapsed() >= Duration::from_millis(19 * 1_500));
    let (method, params) = &transport.calls()[0];
    assert_eq!(method, RECEIPT_METHOD);
    assert_eq!(params, &json!([TEST_USER_OP_HASH]));
}

#[tokio::test(start_paused = true)]
async fn receipt_gives_up_after_twenty_nulls() {
    let transport = Arc::new(ScriptedTransport::always_null());
    let started = tokio::time::Instant::now();

    let receipt = client(transport.clone()).poll_receipt(TEST_USER_OP_HASH).await.expect("poll");

    assert!(receipt.is_none());
    assert_eq!(transport.call_count(), 20);
    assert_eq!(started.elapsed(), Duration::from_secs(30));
}

#[tokio::test(start_paused = true)]
async fn remote_error_replies_count_as_pending() {
    let transport = Arc::new(
        ScriptedTransport::always_null()
            .push_n(3, JsonRpcResponse::remote_error(-32602, "unknown user operation"))
            .push(Ok(JsonRpcResponse::ok(test_receipt(TEST_TX_HASH)))),
    );
    let receipt = client(transport.clone()).poll_receipt(TEST_USER_OP_HASH).await.expect("poll");
    assert!(receipt.is_some());
    assert_eq!(transport.call_count(), 4);
}

#[tokio::test(start_paused = true)]
async fn transport_failure_aborts_poll() {
    let transport = Arc::new(
        ScriptedTransport::always_null()
            .push(Ok(JsonRpcResponse::ok(Value::Null)))
            .push(Err(VoteSproutError::NetworkError("connection refused".to_string()))),
    );
    let err = client(transport.clone()).poll_receipt(TEST_USER_OP_HASH).await.expect_err("transport failure");
    assert_eq!(err.code(), ErrorCode::NetworkError);
    assert_eq!(transport.call_count(), 2);
}

#[tokio::test]
async fn sponsor_returns_remote_result_verbatim() {
    let sponsorship = json!({ "paymasterAndData": "0xabcd", "callGasLimit": "0x1", "extra": { "kept": true } });
    let transport = Arc::new(ScriptedTransport::always_null().push(Ok(JsonRpcResponse::ok(sponsorship.clone()))));
    let result = client(transport.clone()).sponsor(json!({ "sender": "0x01" }), json!("0xentry")).await.expect("sponsor");
    assert_eq!(result, sponsorship);
    let (method, params) = &transport.calls()[0];
    assert_eq!(method, "pm_sponsorUserOperation");
    assert_eq!(params, &json!([{ "sender": "0x01" }, "0xentry"]));
}

#[tokio::test]
async fn remote_error_message_passes_through() {
    let transport = Arc::new(ScriptedTransport::always_null().push(Ok(JsonRpcResponse::remote_error(-32500, "AA21 didn't pay prefund"))));
    let err = client(transport).sponsor(json!({}), json!("0xentry")).await.expect_err("remote error");
    assert_eq!(err.to_string(), "AA21 didn't pay prefund");
}

#[tokio::test]
async fn failures_without_message_use_fallback_text() {
    let http_failure = JsonRpcResponse { http_ok: false, result: None, error: None };
    let transport = Arc::new(ScriptedTransport::always_null().push(Ok(http_failure.clone())).push(Ok(http_failure)));
    let paymaster = client(transport);
    assert_eq!(paymaster.sponsor(json!({}), json!("0xentry")).await.expect_err("sponsor").to_string(), "Sponsor failed");
    assert_eq!(paymaster.send(json!({}), json!("0xentry")).await.expect_err("send").to_string(), "Send failed");
}

#[tokio::test]
async fn send_returns_user_op_hash() {
    let transport = Arc::new(ScriptedTransport::always_null().push(Ok(JsonRpcResponse::ok(json!(TEST_USER_OP_HASH)))));
    let hash = client(transport.clone()).send(json!({}), json!("0xentry")).await.expect("send");
    assert_eq!(hash, json!(TEST_USER_OP_HASH));
    assert_eq!(transport.calls()[0].0, "eth_sendUserOperation");
}
