// Copyright 2024 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

use std::{
    collections::{HashMap, HashSet},
    time::Duration,
};

use log::*;
use thought_wallet_client::{
    types::{MasternodeOutput, Unspent},
    WalletClient,
};
use tokio::time::Instant;

/// Snapshot of the outputs locked as masternode collateral, which must never be spent.
///
/// The snapshot is taken once and never changes; refreshing it means replacing it with a new one.
#[derive(Debug, Clone)]
pub struct ReservedOutputs {
    outputs: HashMap<String, HashSet<u32>>,
    fetched_at: Instant,
    // false when the wallet could not be reached, so the collateral is unknown rather than absent
    complete: bool,
}

impl ReservedOutputs {
    pub fn empty() -> Self {
        Self::from_outputs(Vec::new())
    }

    pub fn from_outputs<I: IntoIterator<Item = MasternodeOutput>>(outputs: I) -> Self {
        let mut map = HashMap::<String, HashSet<u32>>::new();
        for output in outputs {
            map.entry(output.txid).or_default().insert(output.vout);
        }
        Self {
            outputs: map,
            fetched_at: Instant::now(),
            complete: true,
        }
    }

    fn unavailable() -> Self {
        Self {
            complete: false,
            ..Self::empty()
        }
    }

    /// Asks the wallet for its collateral outputs. A wallet that is not a masternode has none, so a failure yields an
    /// empty set rather than an error. If the wallet could not be reached at all the empty set is marked incomplete and
    /// should be fetched again before the next cycle.
    pub async fn fetch<W: WalletClient>(wallet: &mut W) -> Self {
        match wallet.list_masternode_outputs().await {
            Ok(outputs) => {
                for output in &outputs {
                    debug!("Reserving masternode collateral output {}", output);
                }
                let reserved = Self::from_outputs(outputs);
                if reserved.is_empty() {
                    info!("Wallet holds no masternode collateral");
                } else {
                    info!("Excluding {} masternode collateral output(s)", reserved.len());
                }
                reserved
            },
            Err(e) if e.is_transport() => {
                warn!("Could not fetch masternode outputs, will retry next cycle: {}", e);
                Self::unavailable()
            },
            Err(e) => {
                info!("No masternode outputs found ({}), no outputs are reserved", e);
                Self::empty()
            },
        }
    }

    pub fn is_spendable(&self, unspent: &Unspent) -> bool {
        self.outputs
            .get(&unspent.txid)
            .map_or(true, |vouts| !vouts.contains(&unspent.vout))
    }

    pub fn len(&self) -> usize {
        self.outputs.values().map(HashSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    pub fn is_older_than(&self, age: Duration) -> bool {
        self.fetched_at.elapsed() >= age
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }
}
