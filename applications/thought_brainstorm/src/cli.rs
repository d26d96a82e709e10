// Copyright 2024 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use thought_wallet_client::types::Amount;

use crate::{
    config::{Config, StrategyConfig},
    constants::{DEFAULT_BRAINSTORM_CONFIG_PATH, DEFAULT_TRANSFER_MEAN, DEFAULT_TRANSFER_STD_DEV},
};

#[derive(Clone, Debug, Parser)]
#[clap(name = "brainstorm", version, about = "Periodically disburses coins from a Thought masternode wallet")]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonCli,
    #[clap(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn init() -> Self {
        Self::parse()
    }

    pub fn get_config_path(&self) -> PathBuf {
        self.common.config_path.clone()
    }
}

#[derive(Debug, Clone, clap::Args)]
pub struct CommonCli {
    /// Configuration file to load options from. Command line options override the file.
    #[clap(short = 'c', long, parse(from_os_str), default_value = DEFAULT_BRAINSTORM_CONFIG_PATH)]
    pub config_path: PathBuf,
    #[clap(long, default_value = "info")]
    pub log_level: log::LevelFilter,
}

#[derive(Clone, Debug, clap::Subcommand)]
pub enum Commands {
    /// Write a configuration file with default values (plus any overrides given)
    Init(Overrides),
    /// Start disbursing
    Start(Overrides),
}

#[derive(Clone, Debug, Default, clap::Args)]
pub struct Overrides {
    /// Thought RPC server host
    #[clap(long)]
    pub host: Option<String>,
    /// Thought RPC server port
    #[clap(short = 'P', long)]
    pub port: Option<u16>,
    /// Thought server RPC user
    #[clap(short = 'u', long)]
    pub user: Option<String>,
    /// Thought server RPC password
    #[clap(short = 'p', long)]
    pub password: Option<String>,
    /// Thought wallet address to send coins to
    #[clap(short = 'a', long)]
    pub address: Option<String>,
    /// Polling interval in seconds
    #[clap(short = 'i', long)]
    pub interval: Option<u64>,
    /// Mean amount to transfer per interval
    #[clap(short = 't', long)]
    pub transfer_mean: Option<f64>,
    /// Standard deviation of the transfer amount
    #[clap(short = 's', long)]
    pub transfer_sd: Option<f64>,
    /// Accumulate confirmed outputs until they reach this amount, then send them in one transaction
    #[clap(short = 'T', long)]
    pub threshold: Option<Amount>,
    /// Minimum balance to keep in the source wallet
    #[clap(short = 'm', long)]
    pub minimum: Option<Amount>,
    /// Seed for the transfer amount sampler
    #[clap(long)]
    pub seed: Option<u64>,
}

impl Overrides {
    pub fn apply(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            log::info!("Overriding wallet host to {}", host);
            config.wallet.host = host.clone();
        }
        if let Some(port) = self.port {
            log::info!("Overriding wallet port to {}", port);
            config.wallet.port = port;
        }
        if let Some(user) = &self.user {
            config.wallet.user = user.clone();
        }
        if let Some(password) = &self.password {
            config.wallet.password = password.clone();
        }
        if let Some(address) = &self.address {
            log::info!("Overriding destination address to {}", address);
            config.address = address.clone();
        }
        if let Some(secs) = self.interval {
            config.interval = Duration::from_secs(secs);
        }
        if let Some(minimum) = self.minimum {
            log::info!("Overriding minimum balance to {}", minimum);
            config.minimum_balance = minimum;
        }

        if let Some(amount) = self.threshold {
            if self.transfer_mean.is_some() || self.transfer_sd.is_some() {
                log::warn!("Threshold given, ignoring transfer mean and standard deviation");
            }
            config.strategy = StrategyConfig::Threshold { amount };
            return;
        }

        let (mut mean, mut std_dev, mut seed) = match config.strategy {
            StrategyConfig::Sampled { mean, std_dev, seed } => (mean, std_dev, seed),
            StrategyConfig::Threshold { .. } => {
                if self.transfer_mean.is_none() && self.transfer_sd.is_none() {
                    return;
                }
                (DEFAULT_TRANSFER_MEAN, DEFAULT_TRANSFER_STD_DEV, None)
            },
        };
        mean = self.transfer_mean.unwrap_or(mean);
        std_dev = self.transfer_sd.unwrap_or(std_dev);
        seed = self.seed.or(seed);
        config.strategy = StrategyConfig::Sampled { mean, std_dev, seed };
    }
}
