// Copyright 2024 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

mod sampled;
mod threshold;

use std::fmt::{self, Display};

pub use sampled::SampledTransfer;
pub use threshold::ThresholdAccumulation;
use thought_wallet_client::{types::Amount, WalletClient};

use crate::{config::StrategyConfig, error::DisbursementError, reserved::ReservedOutputs};

/// Outcome of one disbursement cycle.
#[derive(Debug)]
pub enum DisbursementResult {
    Skipped(SkipReason),
    Sent { amount: Amount, txid: String },
    Failed(DisbursementError),
}

impl DisbursementResult {
    #[cfg(test)]
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    BalanceAtOrBelowFloor { balance: Amount, floor: Amount },
    CollateralUnknown,
    NoSpendableOutputs,
    InsufficientFunds { accumulated: Amount, threshold: Amount },
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BalanceAtOrBelowFloor { balance, floor } => {
                write!(f, "balance {} is not above the minimum of {}", balance, floor)
            },
            Self::CollateralUnknown => write!(f, "masternode collateral outputs could not be fetched"),
            Self::NoSpendableOutputs => write!(f, "no confirmed unspent outputs"),
            Self::InsufficientFunds { accumulated, threshold } => {
                write!(f, "spendable outputs total {} which is below {}", accumulated, threshold)
            },
        }
    }
}

/// The way each cycle moves coins to the destination address.
#[derive(Debug)]
pub enum Disburser {
    Sampled(SampledTransfer),
    Threshold(ThresholdAccumulation),
}

impl Disburser {
    pub fn from_config(address: String, config: &StrategyConfig) -> anyhow::Result<Self> {
        let disburser = match config {
            StrategyConfig::Sampled { mean, std_dev, seed } => {
                Self::Sampled(SampledTransfer::new(address, *mean, *std_dev, *seed)?)
            },
            StrategyConfig::Threshold { amount } => Self::Threshold(ThresholdAccumulation::new(address, *amount)),
        };
        Ok(disburser)
    }

    pub async fn disburse<W: WalletClient>(&mut self, wallet: &mut W, reserved: &ReservedOutputs) -> DisbursementResult {
        match self {
            Self::Sampled(strategy) => strategy.disburse(wallet).await,
            Self::Threshold(strategy) => strategy.disburse(wallet, reserved).await,
        }
    }

    /// Whether the strategy spends individual outputs and therefore has to respect the reserved set
    pub fn selects_outputs(&self) -> bool {
        matches!(self, Self::Threshold(_))
    }
}

impl Display for Disburser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sampled(s) => write!(f, "sampled transfer (mean {}, std dev {})", s.mean(), s.std_dev()),
            Self::Threshold(s) => write!(f, "threshold accumulation (threshold {})", s.threshold()),
        }
    }
}
