// Copyright 2024 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

use std::str::FromStr;

use anyhow::{anyhow, bail};
use bigdecimal::{BigDecimal, RoundingMode, ToPrimitive};
use log::*;
use rand::{rngs::StdRng, SeedableRng};
use rand_distr::{Distribution, Normal};
use thought_wallet_client::{
    types::{Amount, SendOptions},
    WalletClient,
};

use crate::{error::DisbursementError, strategy::DisbursementResult};

/// Amounts are sent with this many decimal places
const AMOUNT_SCALE: i64 = 8;

/// Sends an amount drawn from a normal distribution straight to the destination address.
#[derive(Debug)]
pub struct SampledTransfer {
    address: String,
    mean: f64,
    std_dev: f64,
    distribution: Normal<f64>,
    rng: StdRng,
}

impl SampledTransfer {
    pub fn new(address: String, mean: f64, std_dev: f64, seed: Option<u64>) -> anyhow::Result<Self> {
        if !mean.is_finite() {
            bail!("Transfer mean must be a finite number, got {}", mean);
        }
        // Normal::new accepts a negative deviation
        if !(std_dev.is_finite() && std_dev >= 0.0) {
            bail!(
                "Transfer standard deviation must be a non-negative finite number, got {}",
                std_dev
            );
        }
        let distribution = Normal::new(mean, std_dev)
            .map_err(|e| anyhow!("Invalid transfer standard deviation {}: {}", std_dev, e))?;
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            address,
            mean,
            std_dev,
            distribution,
            rng,
        })
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Draws the next transfer amount. The sample is not clamped: it may be negative or very large.
    pub fn next_amount(&mut self) -> Result<Amount, DisbursementError> {
        let sample = self.distribution.sample(&mut self.rng);
        round_half_up(sample).ok_or(DisbursementError::InvalidAmount(sample))
    }

    pub async fn disburse<W: WalletClient>(&mut self, wallet: &mut W) -> DisbursementResult {
        let amount = match self.next_amount() {
            Ok(amount) => amount,
            Err(e) => return DisbursementResult::Failed(e),
        };
        if amount.is_negative() {
            warn!("Sampled a negative amount {}, the wallet will refuse it", amount);
        }
        debug!("Sending {} to {}", amount, self.address);

        match wallet
            .send_to_address(&self.address, amount, &SendOptions::default())
            .await
        {
            Ok(txid) => DisbursementResult::Sent { amount, txid },
            Err(source) => DisbursementResult::Failed(DisbursementError::SendFailed {
                amount,
                address: self.address.clone(),
                source,
            }),
        }
    }
}

/// Rounds to 8 decimal places, halves away from zero, starting from the shortest decimal form of `value`.
pub fn round_half_up(value: f64) -> Option<Amount> {
    if !value.is_finite() {
        return None;
    }
    let decimal = BigDecimal::from_str(&value.to_string()).ok()?;
    let (units, scale) = decimal
        .with_scale_round(AMOUNT_SCALE, RoundingMode::HalfUp)
        .as_bigint_and_exponent();
    debug_assert_eq!(scale, AMOUNT_SCALE);
    units.to_i64().map(Amount::from_units)
}
