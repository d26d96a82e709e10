// Copyright 2024 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

use std::time::Duration;

use thought_wallet_client::types::{Amount, COIN};

pub const DEFAULT_BRAINSTORM_CONFIG_PATH: &str = "data/brainstorm/config.toml";

pub const DEFAULT_WALLET_HOST: &str = "localhost";
pub const DEFAULT_WALLET_PORT: u16 = 10617;
pub const DEFAULT_WALLET_USER: &str = "user";
pub const DEFAULT_WALLET_PASSWORD: &str = "password";
pub const DEFAULT_WALLET_RPC_TIMEOUT: Duration = Duration::from_secs(30);

pub const DEFAULT_DISBURSEMENT_INTERVAL: Duration = Duration::from_secs(60 * 60 * 2);
pub const DEFAULT_TRANSFER_MEAN: f64 = 100.0;
pub const DEFAULT_TRANSFER_STD_DEV: f64 = 6.0;
// Keeps the masternode collateral (plus headroom) in the wallet
pub const DEFAULT_MINIMUM_BALANCE: Amount = Amount::from_units(315_000 * COIN);

// Only outputs this deep are used to fund threshold transactions
pub const MIN_CONFIRMATIONS: u32 = 6;
