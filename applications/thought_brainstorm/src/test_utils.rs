// Copyright 2024 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

use async_trait::async_trait;
use thought_wallet_client::{
    types::{Amount, MasternodeOutput, SendOptions, TxInput, TxOutput, Unspent, COIN},
    WalletClient,
    WalletClientError,
};

#[derive(Debug, Clone, PartialEq)]
pub enum WalletCall {
    GetBalance,
    ListUnspent(u32),
    ListMasternodeOutputs,
    BuildRawTransaction {
        inputs: Vec<TxInput>,
        outputs: Vec<TxOutput>,
    },
    BroadcastRawTransaction(String),
    SendToAddress {
        address: String,
        amount: Amount,
        options: SendOptions,
    },
}

/// In-memory wallet that records every call made to it.
#[derive(Debug, Default)]
pub struct MockWallet {
    pub balance: Amount,
    pub unspent: Vec<Unspent>,
    /// `None` behaves like a daemon that is not a masternode
    pub masternode_outputs: Option<Vec<MasternodeOutput>>,
    pub fail_balance: bool,
    pub fail_build: bool,
    pub fail_broadcast: bool,
    pub fail_send: bool,
    /// Masternode listing fails as if the daemon were down
    pub masternode_unreachable: bool,
    pub calls: Vec<WalletCall>,
}

impl MockWallet {
    pub fn with_balance(coins: i64) -> Self {
        Self {
            balance: Amount::from_units(coins * COIN),
            ..Default::default()
        }
    }

    pub fn with_unspent(mut self, unspent: Vec<Unspent>) -> Self {
        self.unspent = unspent;
        self
    }

    pub fn with_masternode_outputs(mut self, outputs: Vec<MasternodeOutput>) -> Self {
        self.masternode_outputs = Some(outputs);
        self
    }

    pub fn count_calls<F: Fn(&WalletCall) -> bool>(&self, predicate: F) -> usize {
        self.calls.iter().filter(|c| predicate(c)).count()
    }

    pub fn made_spending_call(&self) -> bool {
        self.calls.iter().any(|c| {
            matches!(
                c,
                WalletCall::BuildRawTransaction { .. } |
                    WalletCall::BroadcastRawTransaction(_) |
                    WalletCall::SendToAddress { .. }
            )
        })
    }
}

fn rpc_error(message: &str) -> WalletClientError {
    WalletClientError::RequestFailedWithStatus {
        code: -4,
        message: message.to_string(),
    }
}

pub fn unspent(txid: &str, vout: u32, coins: i64) -> Unspent {
    Unspent {
        txid: txid.to_string(),
        vout,
        address: None,
        amount: Amount::from_units(coins * COIN),
        confirmations: 10,
        spendable: true,
    }
}

#[async_trait]
impl WalletClient for MockWallet {
    async fn get_balance(&mut self) -> Result<Amount, WalletClientError> {
        self.calls.push(WalletCall::GetBalance);
        if self.fail_balance {
            return Err(rpc_error("Loading wallet..."));
        }
        Ok(self.balance)
    }

    async fn list_unspent(&mut self, min_confirmations: u32) -> Result<Vec<Unspent>, WalletClientError> {
        self.calls.push(WalletCall::ListUnspent(min_confirmations));
        Ok(self
            .unspent
            .iter()
            .filter(|u| u.confirmations >= min_confirmations)
            .cloned()
            .collect())
    }

    async fn list_masternode_outputs(&mut self) -> Result<Vec<MasternodeOutput>, WalletClientError> {
        self.calls.push(WalletCall::ListMasternodeOutputs);
        if self.masternode_unreachable {
            return Err(WalletClientError::Unauthorized { status: 401 });
        }
        self.masternode_outputs
            .clone()
            .ok_or_else(|| rpc_error("This is not a masternode"))
    }

    async fn build_raw_transaction(
        &mut self,
        inputs: &[TxInput],
        outputs: &[TxOutput],
    ) -> Result<String, WalletClientError> {
        self.calls.push(WalletCall::BuildRawTransaction {
            inputs: inputs.to_vec(),
            outputs: outputs.to_vec(),
        });
        if self.fail_build {
            return Err(rpc_error("Insufficient funds"));
        }
        Ok(format!("signed:{}", inputs.len()))
    }

    async fn broadcast_raw_transaction(&mut self, raw_tx: &str) -> Result<String, WalletClientError> {
        self.calls.push(WalletCall::BroadcastRawTransaction(raw_tx.to_string()));
        if self.fail_broadcast {
            return Err(rpc_error("bad-txns-inputs-spent"));
        }
        Ok("broadcast-txid".to_string())
    }

    async fn send_to_address(
        &mut self,
        address: &str,
        amount: Amount,
        options: &SendOptions,
    ) -> Result<String, WalletClientError> {
        self.calls.push(WalletCall::SendToAddress {
            address: address.to_string(),
            amount,
            options: options.clone(),
        });
        if self.fail_send {
            return Err(rpc_error("Insufficient funds"));
        }
        Ok("send-txid".to_string())
    }
}
