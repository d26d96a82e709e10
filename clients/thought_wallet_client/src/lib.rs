//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

pub mod error;
pub mod types;

mod traits;

use std::{collections::BTreeMap, time::Duration};

use async_trait::async_trait;
use json::Value;
use log::*;
use reqwest::{
    header::{self, HeaderMap, HeaderValue},
    IntoUrl,
    StatusCode,
    Url,
};
use serde::de::DeserializeOwned;
use serde_json as json;
use serde_json::json;
pub use traits::WalletClient;

pub use crate::error::WalletClientError;
use crate::types::{
    Amount,
    MasternodeOutput,
    SendOptions,
    SignRawTransactionResponse,
    TxInput,
    TxOutput,
    Unspent,
};

const LOG_TARGET: &str = "thought_wallet_client";

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// JSON-RPC client for a Thought wallet daemon (`thoughtd`), which speaks the Dash flavour of the bitcoind RPC.
#[derive(Debug, Clone)]
pub struct ThoughtWalletClient {
    client: reqwest::Client,
    endpoint: Url,
    user: String,
    password: String,
    request_id: i64,
}

impl ThoughtWalletClient {
    pub fn connect<T: IntoUrl>(
        endpoint: T,
        user: String,
        password: String,
        timeout: Duration,
    ) -> Result<Self, WalletClientError> {
        let client = reqwest::Client::builder()
            .default_headers({
                let mut headers = HeaderMap::with_capacity(1);
                headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
                headers
            })
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into_url()?,
            user,
            password,
            request_id: 0,
        })
    }

    /// Connects to `http://{host}:{port}/`.
    pub fn connect_host(
        host: &str,
        port: u16,
        user: String,
        password: String,
        timeout: Duration,
    ) -> Result<Self, WalletClientError> {
        let endpoint = Url::parse(&format!("http://{}:{}/", host, port))?;
        Self::connect(endpoint, user, password, timeout)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn next_request_id(&mut self) -> i64 {
        self.request_id += 1;
        self.request_id
    }

    async fn jrpc_call(&mut self, method: &str, params: Value) -> Result<Value, WalletClientError> {
        let request_json = json!(
            {
                "jsonrpc": "1.0",
                "id": self.next_request_id(),
                "method": method,
                "params": params,
            }
        );
        debug!(target: LOG_TARGET, "-> {} {}", method, params);
        let resp = self
            .client
            .post(self.endpoint.clone())
            .basic_auth(&self.user, Some(&self.password))
            .body(request_json.to_string())
            .send()
            .await?;

        // The daemon reports RPC errors with a 500 status and a JSON body, so only auth failures are decided by status
        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(WalletClientError::Unauthorized {
                status: status.as_u16(),
            });
        }

        let body = resp.text().await?;
        let val = json::from_str(&body).map_err(|e| WalletClientError::DeserializeResponse {
            source: e,
            method: method.to_string(),
        })?;
        jsonrpc_result(val)
    }

    async fn send_request<R: DeserializeOwned>(&mut self, method: &str, params: Value) -> Result<R, WalletClientError> {
        let resp = self.jrpc_call(method, params).await?;
        match json::from_value(resp) {
            Ok(r) => Ok(r),
            Err(e) => Err(WalletClientError::DeserializeResponse {
                source: e,
                method: method.to_string(),
            }),
        }
    }
}

#[async_trait]
impl WalletClient for ThoughtWalletClient {
    async fn get_balance(&mut self) -> Result<Amount, WalletClientError> {
        self.send_request("getbalance", json!([])).await
    }

    async fn list_unspent(&mut self, min_confirmations: u32) -> Result<Vec<Unspent>, WalletClientError> {
        self.send_request("listunspent", json!([min_confirmations])).await
    }

    async fn list_masternode_outputs(&mut self) -> Result<Vec<MasternodeOutput>, WalletClientError> {
        let resp = self.jrpc_call("masternode", json!(["outputs"])).await?;
        MasternodeOutput::from_outputs_object(&resp).map_err(|message| WalletClientError::InvalidResponse { message })
    }

    async fn build_raw_transaction(
        &mut self,
        inputs: &[TxInput],
        outputs: &[TxOutput],
    ) -> Result<String, WalletClientError> {
        let inputs = json::to_value(inputs).map_err(|e| WalletClientError::SerializeRequest {
            method: "createrawtransaction".to_string(),
            source: e,
        })?;
        let outputs = outputs_object(outputs)?;

        let unsigned: String = self
            .send_request("createrawtransaction", json!([inputs, outputs]))
            .await?;
        let signed: SignRawTransactionResponse = self.send_request("signrawtransaction", json!([unsigned])).await?;
        if !signed.complete {
            return Err(WalletClientError::IncompleteSignature);
        }

        Ok(signed.hex)
    }

    async fn broadcast_raw_transaction(&mut self, raw_tx: &str) -> Result<String, WalletClientError> {
        self.send_request("sendrawtransaction", json!([raw_tx])).await
    }

    async fn send_to_address(
        &mut self,
        address: &str,
        amount: Amount,
        options: &SendOptions,
    ) -> Result<String, WalletClientError> {
        self.send_request(
            "sendtoaddress",
            json!([
                address,
                amount,
                options.comment,
                options.comment_to,
                options.subtract_fee_from_amount,
                options.use_instant_send,
                options.use_private_send,
            ]),
        )
        .await
    }
}

/// `createrawtransaction` takes outputs as an `{address: amount}` object; repeated addresses are merged.
fn outputs_object(outputs: &[TxOutput]) -> Result<Value, WalletClientError> {
    let mut merged = BTreeMap::<&str, Amount>::new();
    for output in outputs {
        let entry = merged.entry(output.address.as_str()).or_insert(Amount::ZERO);
        *entry = entry
            .checked_add(output.amount)
            .ok_or_else(|| WalletClientError::InvalidResponse {
                message: format!("output total for {} overflows", output.address),
            })?;
    }

    json::to_value(merged).map_err(|e| WalletClientError::SerializeRequest {
        method: "createrawtransaction".to_string(),
        source: e,
    })
}

fn jsonrpc_result(val: Value) -> Result<Value, WalletClientError> {
    if let Some(err) = val.get("error").filter(|e| !e.is_null()) {
        let code = err.get("code").and_then(|c| c.as_i64()).unwrap_or(-1);
        let message = err.get("message").and_then(|m| m.as_str()).unwrap_or("Unknown error");
        return Err(WalletClientError::RequestFailedWithStatus {
            code,
            message: message.to_string(),
        });
    }

    let result = val.get("result").ok_or_else(|| WalletClientError::InvalidResponse {
        message: "Missing result field".to_string(),
    })?;
    Ok(result.clone())
}
