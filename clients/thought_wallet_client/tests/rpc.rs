//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use std::time::Duration;

use httpmock::{Method::POST, MockServer};
use serde_json::json;
use thought_wallet_client::{
    types::{Amount, SendOptions, TxInput, TxOutput, COIN},
    ThoughtWalletClient,
    WalletClient,
    WalletClientError,
};

// base64("user:pass")
const BASIC_AUTH: &str = "Basic dXNlcjpwYXNz";

fn client_for(server: &MockServer) -> ThoughtWalletClient {
    ThoughtWalletClient::connect(
        server.url("/"),
        "user".to_string(),
        "pass".to_string(),
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn get_balance_sends_credentials_and_decodes_amount() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/")
                .header("authorization", BASIC_AUTH)
                .body_contains(r#""method":"getbalance""#);
            then.status(200)
                .json_body(json!({ "result": 320000.5, "error": null, "id": 1 }));
        })
        .await;

    let mut client = client_for(&server);
    let balance = client.get_balance().await.unwrap();

    mock.assert_async().await;
    assert_eq!(balance, Amount::from_units(320_000 * COIN + COIN / 2));
}

#[tokio::test]
async fn list_unspent_passes_min_confirmations_and_keeps_wallet_order() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .body_contains(r#""method":"listunspent""#)
                .body_contains(r#""params":[6]"#);
            then.status(200).json_body(json!({
                "result": [
                    { "txid": "bb", "vout": 1, "amount": 70.0, "confirmations": 9 },
                    { "txid": "aa", "vout": 0, "amount": 40.0, "confirmations": 100 }
                ],
                "error": null,
                "id": 1
            }));
        })
        .await;

    let mut client = client_for(&server);
    let unspent = client.list_unspent(6).await.unwrap();

    mock.assert_async().await;
    let txids = unspent.iter().map(|u| u.txid.as_str()).collect::<Vec<_>>();
    assert_eq!(txids, vec!["bb", "aa"]);
    assert_eq!(unspent[0].amount, Amount::from_units(70 * COIN));
}

#[tokio::test]
async fn masternode_outputs_error_is_reported_with_code() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).body_contains(r#""params":["outputs"]"#);
            then.status(500).json_body(json!({
                "result": null,
                "error": { "code": -1, "message": "This is not a masternode" },
                "id": 1
            }));
        })
        .await;

    let mut client = client_for(&server);
    let err = client.list_masternode_outputs().await.unwrap_err();

    match err {
        WalletClientError::RequestFailedWithStatus { code, message } => {
            assert_eq!(code, -1);
            assert_eq!(message, "This is not a masternode");
        },
        other => panic!("unexpected error {:?}", other),
    }
}

#[tokio::test]
async fn build_raw_transaction_creates_then_signs() {
    let server = MockServer::start_async().await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST)
                .body_contains(r#""method":"createrawtransaction""#)
                .body_contains(r#"[{"txid":"aa","vout":0},{"txid":"bb","vout":1}]"#)
                .body_contains(r#"{"Tdest":110.0}"#);
            then.status(200)
                .json_body(json!({ "result": "0100unsigned", "error": null, "id": 1 }));
        })
        .await;
    let sign = server
        .mock_async(|when, then| {
            when.method(POST)
                .body_contains(r#""method":"signrawtransaction""#)
                .body_contains(r#""params":["0100unsigned"]"#);
            then.status(200).json_body(json!({
                "result": { "hex": "0100signed", "complete": true },
                "error": null,
                "id": 2
            }));
        })
        .await;

    let mut client = client_for(&server);
    let inputs = [
        TxInput {
            txid: "aa".to_string(),
            vout: 0,
        },
        TxInput {
            txid: "bb".to_string(),
            vout: 1,
        },
    ];
    let outputs = [TxOutput::new("Tdest", Amount::from_units(110 * COIN))];
    let raw = client.build_raw_transaction(&inputs, &outputs).await.unwrap();

    create.assert_async().await;
    sign.assert_async().await;
    assert_eq!(raw, "0100signed");
}

#[tokio::test]
async fn build_raw_transaction_rejects_incomplete_signature() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).body_contains(r#""method":"createrawtransaction""#);
            then.status(200)
                .json_body(json!({ "result": "0100unsigned", "error": null, "id": 1 }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).body_contains(r#""method":"signrawtransaction""#);
            then.status(200).json_body(json!({
                "result": { "hex": "0100partial", "complete": false },
                "error": null,
                "id": 2
            }));
        })
        .await;

    let mut client = client_for(&server);
    let err = client
        .build_raw_transaction(&[], &[TxOutput::new("Tdest", Amount::from_units(COIN))])
        .await
        .unwrap_err();
    assert!(matches!(err, WalletClientError::IncompleteSignature));
}

#[tokio::test]
async fn send_to_address_sends_full_amount_without_fee_subtraction() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .body_contains(r#""method":"sendtoaddress""#)
                .body_contains(r#""params":["Tdest",100.0,"","",false,false,false]"#);
            then.status(200)
                .json_body(json!({ "result": "txid-1", "error": null, "id": 1 }));
        })
        .await;

    let mut client = client_for(&server);
    let txid = client
        .send_to_address("Tdest", Amount::from_units(100 * COIN), &SendOptions::default())
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(txid, "txid-1");
}

#[tokio::test]
async fn rejected_credentials_are_a_transport_failure() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST);
            then.status(401);
        })
        .await;

    let mut client = client_for(&server);
    let err = client.get_balance().await.unwrap_err();
    assert!(matches!(err, WalletClientError::Unauthorized { status: 401 }));
    assert!(err.is_transport());
}

#[tokio::test]
async fn hung_wallet_times_out() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST);
            then.status(200)
                .delay(Duration::from_secs(2))
                .json_body(json!({ "result": 1.0, "error": null, "id": 1 }));
        })
        .await;

    let mut client = ThoughtWalletClient::connect(
        server.url("/"),
        "user".to_string(),
        "pass".to_string(),
        Duration::from_millis(200),
    )
    .unwrap();
    let err = client.get_balance().await.unwrap_err();
    assert!(err.is_transport(), "expected transport error, got {:?}", err);
}
