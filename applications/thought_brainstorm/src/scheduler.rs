// Copyright 2024 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

use std::time::Duration;

use log::*;
use tari_shutdown::ShutdownSignal;
use thought_wallet_client::WalletClient;
use tokio::time;

use crate::{
    config::Config,
    error::DisbursementError,
    guard::BalanceGuard,
    reserved::ReservedOutputs,
    strategy::{DisbursementResult, Disburser, SkipReason},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Running,
    Terminated,
}

/// Runs one disbursement cycle per interval until shutdown is signalled.
///
/// Cycles never overlap. A cycle that has started always runs to completion; the shutdown signal is only looked at
/// before a cycle starts and while sleeping between cycles.
pub struct Scheduler<W> {
    wallet: W,
    guard: BalanceGuard,
    disburser: Disburser,
    reserved: ReservedOutputs,
    interval: Duration,
    reserved_refresh_interval: Option<Duration>,
    shutdown_signal: ShutdownSignal,
    state: SchedulerState,
}

impl<W: WalletClient> Scheduler<W> {
    pub fn new(config: &Config, wallet: W, shutdown_signal: ShutdownSignal) -> anyhow::Result<Self> {
        Ok(Self {
            wallet,
            guard: BalanceGuard::new(config.minimum_balance),
            disburser: Disburser::from_config(config.address.clone(), &config.strategy)?,
            reserved: ReservedOutputs::empty(),
            interval: config.interval,
            reserved_refresh_interval: config.reserved_refresh_interval,
            shutdown_signal,
            state: SchedulerState::Running,
        })
    }

    #[cfg(test)]
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    #[cfg(test)]
    pub fn wallet(&self) -> &W {
        &self.wallet
    }

    pub async fn run(&mut self) {
        info!(
            "Disbursing by {} every {}, keeping at least {} in the wallet",
            self.disburser,
            humantime::format_duration(self.interval),
            self.guard.floor()
        );

        if self.disburser.selects_outputs() && !self.shutdown_signal.is_triggered() {
            self.reserved = ReservedOutputs::fetch(&mut self.wallet).await;
        }

        loop {
            if self.shutdown_signal.is_triggered() {
                break;
            }
            self.refresh_reserved_if_stale().await;
            self.run_cycle().await;

            debug!("Next cycle in {}", humantime::format_duration(self.interval));
            tokio::select! {
                _ = time::sleep(self.interval) => {},
                _ = self.shutdown_signal.wait() => {
                    break;
                }
            }
        }

        self.state = SchedulerState::Terminated;
        info!("Scheduler stopped");
    }

    /// Checks the balance and, if the guard allows it, disburses once.
    pub async fn run_cycle(&mut self) -> DisbursementResult {
        let result = self.disburse().await;
        match &result {
            DisbursementResult::Skipped(reason) => info!("Skipping cycle: {}", reason),
            DisbursementResult::Sent { amount, txid } => info!("Sent {} in transaction {}", amount, txid),
            DisbursementResult::Failed(DisbursementError::GatewayUnavailable(e)) if e.is_transport() => {
                warn!("Wallet is unreachable, retrying next cycle: {}", e)
            },
            DisbursementResult::Failed(e) => error!("Disbursement failed: {}", e),
        }
        result
    }

    async fn disburse(&mut self) -> DisbursementResult {
        let balance = match self.wallet.get_balance().await {
            Ok(balance) => balance,
            Err(e) => return DisbursementResult::Failed(DisbursementError::GatewayUnavailable(e)),
        };
        info!("Wallet balance is {}", balance);

        if !self.guard.permits(balance) {
            return DisbursementResult::Skipped(SkipReason::BalanceAtOrBelowFloor {
                balance,
                floor: self.guard.floor(),
            });
        }

        if self.disburser.selects_outputs() && !self.reserved.is_complete() {
            return DisbursementResult::Skipped(SkipReason::CollateralUnknown);
        }

        self.disburser.disburse(&mut self.wallet, &self.reserved).await
    }

    async fn refresh_reserved_if_stale(&mut self) {
        if !self.disburser.selects_outputs() {
            return;
        }
        let stale = self
            .reserved_refresh_interval
            .map_or(false, |age| self.reserved.is_older_than(age));
        if stale || !self.reserved.is_complete() {
            debug!("Refreshing masternode collateral outputs");
            self.reserved = ReservedOutputs::fetch(&mut self.wallet).await;
        }
    }
}
