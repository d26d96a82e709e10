// Copyright 2024 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

use std::collections::HashSet;

use log::*;
use thought_wallet_client::{
    types::{Amount, TxInput, TxOutput, Unspent},
    WalletClient,
};

use crate::{
    constants::MIN_CONFIRMATIONS,
    error::DisbursementError,
    reserved::ReservedOutputs,
    strategy::{DisbursementResult, SkipReason},
};

/// Gathers confirmed unspent outputs until they cover the threshold and sends all of them to the destination in a
/// single output.
///
/// The whole accumulated sum is sent, which can exceed the threshold. No change output is created and no fee is set
/// aside, so the wallet's own fee policy decides whether the transaction is accepted.
#[derive(Debug, Clone)]
pub struct ThresholdAccumulation {
    address: String,
    threshold: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub inputs: Vec<TxInput>,
    pub total: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Accumulation {
    Reached(Selection),
    Short { accumulated: Amount },
}

impl ThresholdAccumulation {
    pub fn new(address: String, threshold: Amount) -> Self {
        Self { address, threshold }
    }

    pub fn threshold(&self) -> Amount {
        self.threshold
    }

    pub async fn disburse<W: WalletClient>(&self, wallet: &mut W, reserved: &ReservedOutputs) -> DisbursementResult {
        match self.try_disburse(wallet, reserved).await {
            Ok(result) => result,
            Err(e) => DisbursementResult::Failed(e),
        }
    }

    async fn try_disburse<W: WalletClient>(
        &self,
        wallet: &mut W,
        reserved: &ReservedOutputs,
    ) -> Result<DisbursementResult, DisbursementError> {
        let candidates = wallet
            .list_unspent(MIN_CONFIRMATIONS)
            .await
            .map_err(DisbursementError::GatewayUnavailable)?;
        if candidates.is_empty() {
            return Ok(DisbursementResult::Skipped(SkipReason::NoSpendableOutputs));
        }
        debug!(
            "{} unspent output(s) with at least {} confirmations",
            candidates.len(),
            MIN_CONFIRMATIONS
        );

        let selection = match accumulate(&candidates, reserved, self.threshold)? {
            Accumulation::Reached(selection) => selection,
            Accumulation::Short { accumulated } => {
                return Ok(DisbursementResult::Skipped(SkipReason::InsufficientFunds {
                    accumulated,
                    threshold: self.threshold,
                }));
            },
        };
        info!(
            "Selected {} input(s) totalling {} (threshold {})",
            selection.inputs.len(),
            selection.total,
            self.threshold
        );

        let outputs = [TxOutput::new(self.address.as_str(), selection.total)];
        let raw_tx = wallet
            .build_raw_transaction(&selection.inputs, &outputs)
            .await
            .map_err(DisbursementError::TransactionBuildFailed)?;
        let txid = wallet
            .broadcast_raw_transaction(&raw_tx)
            .await
            .map_err(DisbursementError::TransactionBroadcastFailed)?;

        Ok(DisbursementResult::Sent {
            amount: selection.total,
            txid,
        })
    }
}

/// First-fit accumulation in wallet order: takes every spendable candidate until the running total reaches
/// `threshold` and stops there. Reserved outputs, outputs the wallet cannot sign and repeated outpoints are passed over.
pub fn accumulate(
    candidates: &[Unspent],
    reserved: &ReservedOutputs,
    threshold: Amount,
) -> Result<Accumulation, DisbursementError> {
    let mut selected = HashSet::new();
    let mut inputs = Vec::new();
    let mut total = Amount::ZERO;

    for candidate in candidates {
        if !reserved.is_spendable(candidate) {
            debug!("Skipping reserved output {}:{}", candidate.txid, candidate.vout);
            continue;
        }
        if !candidate.spendable {
            debug!("Skipping watch-only output {}:{}", candidate.txid, candidate.vout);
            continue;
        }
        if !selected.insert(candidate.outpoint()) {
            continue;
        }

        inputs.push(TxInput::from(candidate));
        total = total
            .checked_add(candidate.amount)
            .ok_or(DisbursementError::AmountOverflow)?;
        if total >= threshold {
            return Ok(Accumulation::Reached(Selection { inputs, total }));
        }
    }

    Ok(Accumulation::Short { accumulated: total })
}
