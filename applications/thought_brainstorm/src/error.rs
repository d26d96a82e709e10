// Copyright 2024 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

use thought_wallet_client::{types::Amount, WalletClientError};

#[derive(Debug, thiserror::Error)]
pub enum DisbursementError {
    #[error("Wallet unavailable: {0}")]
    GatewayUnavailable(#[source] WalletClientError),
    #[error("Failed to build transaction: {0}")]
    TransactionBuildFailed(#[source] WalletClientError),
    #[error("Failed to broadcast transaction: {0}")]
    TransactionBroadcastFailed(#[source] WalletClientError),
    #[error("Failed to send {amount} to {address}: {source}")]
    SendFailed {
        amount: Amount,
        address: String,
        source: WalletClientError,
    },
    #[error("Sampled transfer amount {0} cannot be represented")]
    InvalidAmount(f64),
    #[error("Accumulated amount overflows")]
    AmountOverflow,
}
