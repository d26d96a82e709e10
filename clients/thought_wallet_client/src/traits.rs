//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use async_trait::async_trait;

use crate::{
    error::WalletClientError,
    types::{Amount, MasternodeOutput, SendOptions, TxInput, TxOutput, Unspent},
};

/// The wallet operations the disbursement agent relies on.
#[async_trait]
pub trait WalletClient: Send + Sync {
    async fn get_balance(&mut self) -> Result<Amount, WalletClientError>;

    /// Unspent outputs with at least `min_confirmations`, in the order the wallet returns them.
    async fn list_unspent(&mut self, min_confirmations: u32) -> Result<Vec<Unspent>, WalletClientError>;

    /// Outputs held as masternode collateral. Fails when the daemon is not running as a masternode.
    async fn list_masternode_outputs(&mut self) -> Result<Vec<MasternodeOutput>, WalletClientError>;

    /// Creates a raw transaction spending `inputs` to `outputs` and has the wallet sign it. Returns the signed hex.
    async fn build_raw_transaction(
        &mut self,
        inputs: &[TxInput],
        outputs: &[TxOutput],
    ) -> Result<String, WalletClientError>;

    /// Submits a signed raw transaction, returning its transaction id.
    async fn broadcast_raw_transaction(&mut self, raw_tx: &str) -> Result<String, WalletClientError>;

    async fn send_to_address(
        &mut self,
        address: &str,
        amount: Amount,
        options: &SendOptions,
    ) -> Result<String, WalletClientError>;
}
