//! Authenticated transport tests against a mock server
//!
//! Covers canonical body encoding, HMAC-SHA512 signing, and the
//! single-retry nonce resynchronization protocol.

use btce_rest::{BtceClient, ClientConfig, Credentials, RestError};
use rust_decimal::Decimal;
use serde_json::json;
use wiremock::matchers::{body_string, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// HMAC-SHA512 of `method=TestMethod&nonce=101&foo=bar` under key `s3cr3t`,
/// computed with `openssl dgst -sha512 -hmac`
const TEST_METHOD_SIGN: &str =
    "5449777c22c75c4892c6a1a3bb33bb6de42e57f4f6cd497dfe06b21c76438937\
     457c4a3a39979b1734a560d627d67b56dce356fc1719f7e223ab057d6aa3db3c";

fn client_for(server: &MockServer, nonce_seed: u64) -> BtceClient {
    let config = ClientConfig::new()
        .with_credentials(Credentials::new("KEY", "s3cr3t"))
        .with_nonce_seed(nonce_seed)
        .with_trade_url(format!("{}/tapi/", server.uri()))
        .with_public_url(server.uri());
    BtceClient::with_config(config)
}

fn success_body(payload: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"success": 1, "return": payload}))
}

#[tokio::test]
async fn signs_canonical_body_in_insertion_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tapi/"))
        .and(body_string("method=TestMethod&nonce=101&foo=bar"))
        .and(header("Key", "KEY"))
        .and(header("Sign", TEST_METHOD_SIGN))
        .respond_with(success_body(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 100);
    let result: serde_json::Value = client
        .query("TestMethod", &[("foo", "bar".to_string())])
        .await
        .unwrap();

    assert_eq!(result, json!({"ok": true}));
}

#[tokio::test]
async fn nonce_rejection_triggers_exactly_one_resynced_retry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tapi/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": 0,
            "error": "invalid nonce parameter; on key:0, you should send nonce:150,..."
        })))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/tapi/"))
        .and(body_string_contains("nonce=151"))
        .respond_with(success_body(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 100);
    let result: serde_json::Value = client
        .query("TestMethod", &[("foo", "bar".to_string())])
        .await
        .unwrap();

    assert_eq!(result, json!({"ok": true}));
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn second_nonce_rejection_fails_without_a_third_attempt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tapi/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": 0,
            "error": "invalid nonce parameter; on key:0, you should send nonce:150,..."
        })))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server, 100);
    let err = client
        .query::<serde_json::Value>("getInfo", &[])
        .await
        .unwrap_err();

    assert!(matches!(err, RestError::Remote { .. }));
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn non_nonce_errors_are_never_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tapi/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": 0,
            "error": "invalid api key"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 100);
    let err = client
        .query::<serde_json::Value>("getInfo", &[])
        .await
        .unwrap_err();

    assert_eq!(err.remote_message(), Some("invalid api key"));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn retry_budget_is_per_call() {
    let server = MockServer::start().await;
    // Both calls hit one nonce rejection each; each owns its own retry.
    Mock::given(method("POST"))
        .and(path("/tapi/"))
        .and(body_string_contains("nonce=101"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": 0,
            "error": "invalid nonce parameter; on key:0, you should send nonce:200,..."
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/tapi/"))
        .and(body_string_contains("nonce=202"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": 0,
            "error": "invalid nonce parameter; on key:0, you should send nonce:300,..."
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/tapi/"))
        .respond_with(success_body(json!({"ok": true})))
        .mount(&server)
        .await;

    let client = client_for(&server, 100);
    let first: serde_json::Value = client.query("getInfo", &[]).await.unwrap();
    let second: serde_json::Value = client.query("getInfo", &[]).await.unwrap();

    assert_eq!(first, json!({"ok": true}));
    assert_eq!(second, json!({"ok": true}));
    assert_eq!(server.received_requests().await.unwrap().len(), 4);
}

#[tokio::test]
async fn non_json_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tapi/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>down</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 100);
    let err = client
        .query::<serde_json::Value>("getInfo", &[])
        .await
        .unwrap_err();

    assert!(matches!(err, RestError::MalformedResponse(_)));
}

#[tokio::test]
async fn success_without_payload_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tapi/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": 1})))
        .mount(&server)
        .await;

    let client = client_for(&server, 100);
    let err = client
        .query::<serde_json::Value>("getInfo", &[])
        .await
        .unwrap_err();

    assert!(matches!(err, RestError::MalformedResponse(_)));
}

#[tokio::test]
async fn get_info_deserializes_account_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tapi/"))
        .and(body_string("method=getInfo&nonce=101"))
        .respond_with(success_body(json!({
            "funds": {"usd": 325.0, "btc": 23.998},
            "rights": {"info": 1, "trade": 1, "withdraw": 0},
            "transaction_count": 80,
            "open_orders": 1,
            "server_time": 1342123547
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 100);
    let info = client.get_info().await.unwrap();

    assert_eq!(info.open_orders, 1);
    assert_eq!(info.rights.withdraw, 0);
    assert_eq!(info.funds["btc"], "23.998".parse::<Decimal>().unwrap());
}

#[tokio::test]
async fn place_order_builds_trade_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tapi/"))
        .and(body_string(
            "method=Trade&nonce=101&pair=btc_usd&type=buy&rate=550&amount=1.5",
        ))
        .respond_with(success_body(json!({
            "received": 0.1,
            "remains": 1.4,
            "order_id": 107,
            "funds": {"usd": 270.0, "btc": 0.1}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 100);
    let result = client
        .place_order(
            "btc_usd",
            "buy",
            "550".parse().unwrap(),
            "1.5".parse().unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(result.order_id, 107);
}

#[tokio::test]
async fn place_order_rejects_unknown_direction_before_any_request() {
    let server = MockServer::start().await;

    let client = client_for(&server, 100);
    let err = client
        .place_order(
            "btc_usd",
            "hold",
            "550".parse().unwrap(),
            "1.5".parse().unwrap(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, RestError::InvalidParameter(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn private_calls_without_credentials_fail_fast() {
    let server = MockServer::start().await;
    let client = BtceClient::with_config(
        ClientConfig::new()
            .with_trade_url(format!("{}/tapi/", server.uri()))
            .with_public_url(server.uri()),
    );

    let err = client
        .query::<serde_json::Value>("getInfo", &[])
        .await
        .unwrap_err();

    assert!(matches!(err, RestError::AuthRequired));
    assert!(server.received_requests().await.unwrap().is_empty());
}
