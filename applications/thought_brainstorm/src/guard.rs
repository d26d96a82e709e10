// Copyright 2024 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

use thought_wallet_client::types::Amount;

/// Keeps a floor of funds in the source wallet.
#[derive(Debug, Clone, Copy)]
pub struct BalanceGuard {
    floor: Amount,
}

impl BalanceGuard {
    pub fn new(floor: Amount) -> Self {
        Self { floor }
    }

    pub fn floor(&self) -> Amount {
        self.floor
    }

    /// A balance exactly at the floor does not permit a disbursement.
    pub fn permits(&self, balance: Amount) -> bool {
        balance > self.floor
    }
}

#[cfg(test)]
mod tests {
    use thought_wallet_client::types::COIN;

    use super::*;

    #[test]
    fn permits_only_strictly_above_floor() {
        let guard = BalanceGuard::new(Amount::from_units(315_000 * COIN));

        assert!(guard.permits(Amount::from_units(320_000 * COIN)));
        assert!(guard.permits(Amount::from_units(315_000 * COIN + 1)));
        assert!(!guard.permits(Amount::from_units(315_000 * COIN)));
        assert!(!guard.permits(Amount::from_units(300_000 * COIN)));
        assert!(!guard.permits(Amount::from_units(-1)));
    }

    #[test]
    fn zero_floor_still_requires_positive_balance() {
        let guard = BalanceGuard::new(Amount::ZERO);
        assert!(!guard.permits(Amount::ZERO));
        assert!(guard.permits(Amount::from_units(1)));
    }
}
