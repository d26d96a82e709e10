//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

#[derive(Debug, thiserror::Error)]
pub enum WalletClientError {
    #[error("Failed to deserialize response for method {method}: {source}")]
    DeserializeResponse { source: serde_json::Error, method: String },
    #[error("Failed to serialize request for method {method}: {source}")]
    SerializeRequest { method: String, source: serde_json::Error },
    #[error("Failed to send request: {source}")]
    RequestFailed {
        #[from]
        source: reqwest::Error,
    },
    #[error("Wallet rejected the RPC credentials (HTTP {status})")]
    Unauthorized { status: u16 },
    #[error("Request failed: code: {code} message: {message}")]
    RequestFailedWithStatus { code: i64, message: String },
    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },
    #[error("Invalid wallet endpoint: {source}")]
    InvalidEndpoint {
        #[from]
        source: url::ParseError,
    },
    #[error("Wallet could not sign every input of the transaction")]
    IncompleteSignature,
}

impl WalletClientError {
    /// True if the wallet could not be reached or refused the credentials, as opposed to the wallet answering with an
    /// error.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::RequestFailed { .. } | Self::Unauthorized { .. })
    }
}
