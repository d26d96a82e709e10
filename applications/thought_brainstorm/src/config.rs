// Copyright 2024 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

use std::time::Duration;

use anyhow::bail;
use thought_wallet_client::types::Amount;
use tokio::io::{self, AsyncWriteExt};

use crate::constants::{
    DEFAULT_DISBURSEMENT_INTERVAL,
    DEFAULT_MINIMUM_BALANCE,
    DEFAULT_TRANSFER_MEAN,
    DEFAULT_TRANSFER_STD_DEV,
    DEFAULT_WALLET_HOST,
    DEFAULT_WALLET_PASSWORD,
    DEFAULT_WALLET_PORT,
    DEFAULT_WALLET_RPC_TIMEOUT,
    DEFAULT_WALLET_USER,
};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Config {
    /// The wallet address receiving every disbursement. Brainstorm refuses to start without one.
    #[serde(default)]
    pub address: String,

    /// Time to wait between two disbursement cycles
    #[serde(with = "humantime_serde")]
    pub interval: Duration,

    /// Balance to keep in the source wallet. Nothing is disbursed unless the balance is strictly above it.
    pub minimum_balance: Amount,

    /// Re-fetch the masternode collateral outputs this often. When unset they are fetched once at startup.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "humantime_serde")]
    pub reserved_refresh_interval: Option<Duration>,

    /// The Thought wallet RPC connection
    pub wallet: WalletConfig,

    /// How each disbursement is sized and funded
    pub strategy: StrategyConfig,
}

impl Config {
    pub(crate) async fn write<W: io::AsyncWrite + Unpin>(&self, mut writer: W) -> anyhow::Result<()> {
        let toml = toml::to_string_pretty(self)?;
        writer.write_all(toml.as_bytes()).await?;
        writer.flush().await?;
        Ok(())
    }

    pub fn missing_conf(&self) -> Option<Vec<&str>> {
        let mut v: Vec<&str> = Vec::new();
        if self.address.is_empty() {
            v.push("address");
        }
        if self.wallet.host.is_empty() {
            v.push("wallet.host");
        }
        if v.is_empty() {
            None
        } else {
            Some(v)
        }
    }

    /// Rejects values that are present but unusable.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.interval.is_zero() {
            bail!("interval must be greater than zero");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct WalletConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    /// Upper bound on any single RPC call, so a hung wallet cannot stall the scheduler
    #[serde(with = "humantime_serde")]
    pub rpc_timeout: Duration,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_WALLET_HOST.to_string(),
            port: DEFAULT_WALLET_PORT,
            user: DEFAULT_WALLET_USER.to_string(),
            password: DEFAULT_WALLET_PASSWORD.to_string(),
            rpc_timeout: DEFAULT_WALLET_RPC_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StrategyConfig {
    /// Send an amount drawn from a normal distribution every cycle
    Sampled {
        mean: f64,
        std_dev: f64,
        /// Fixes the random sequence. Seeded from the OS when unset.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        seed: Option<u64>,
    },
    /// Gather confirmed unspent outputs until they cover `amount`, then send them all in one transaction
    Threshold { amount: Amount },
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self::Sampled {
            mean: DEFAULT_TRANSFER_MEAN,
            std_dev: DEFAULT_TRANSFER_STD_DEV,
            seed: None,
        }
    }
}

pub fn get_base_config() -> Config {
    Config {
        address: String::new(),
        interval: DEFAULT_DISBURSEMENT_INTERVAL,
        minimum_balance: DEFAULT_MINIMUM_BALANCE,
        reserved_refresh_interval: None,
        wallet: WalletConfig::default(),
        strategy: StrategyConfig::default(),
    }
}
