//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json as json;

/// Number of base units (duffs) in one coin.
pub const COIN: i64 = 100_000_000;

/// A signed amount of coin, held as an integer number of 1e-8 units.
///
/// On the wire the wallet speaks whole coins as JSON numbers (e.g. `40.5`). Converting in and out of that form is the
/// only place floating point is involved; all arithmetic on `Amount` is exact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub const fn from_units(units: i64) -> Self {
        Self(units)
    }

    /// Converts a coin value to the nearest base unit. Returns `None` for NaN, infinities and values out of range.
    pub fn from_coins(coins: f64) -> Option<Self> {
        if !coins.is_finite() {
            return None;
        }
        let units = (coins * COIN as f64).round();
        if units < i64::MIN as f64 || units > i64::MAX as f64 {
            return None;
        }
        Some(Self(units as i64))
    }

    pub const fn units(self) -> i64 {
        self.0
    }

    pub fn as_coins(self) -> f64 {
        self.0 as f64 / COIN as f64
    }

    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let coin = COIN as u64;
        write!(f, "{}{}.{:08}", sign, abs / coin, abs % coin)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid amount '{0}': expected a decimal number of coins with at most 8 decimal places")]
pub struct ParseAmountError(String);

impl FromStr for Amount {
    type Err = ParseAmountError;

    /// Parses a decimal coin value exactly, e.g. `315000`, `0.5` or `-12.00000001`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseAmountError(s.to_string());
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (whole, frac) = digits.split_once('.').unwrap_or((digits, ""));
        if whole.is_empty() && frac.is_empty() {
            return Err(err());
        }
        if frac.len() > 8 || !whole.chars().chain(frac.chars()).all(|c| c.is_ascii_digit()) {
            return Err(err());
        }

        let whole = if whole.is_empty() {
            0
        } else {
            whole.parse::<i64>().map_err(|_| err())?
        };
        let frac = format!("{:0<8}", frac).parse::<i64>().map_err(|_| err())?;
        let units = whole
            .checked_mul(COIN)
            .and_then(|w| w.checked_add(frac))
            .ok_or_else(err)?;

        Ok(Self(if negative { -units } else { units }))
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_coins())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let coins = f64::deserialize(deserializer)?;
        Amount::from_coins(coins).ok_or_else(|| de::Error::custom(format!("amount {} is not representable", coins)))
    }
}

/// An unspent transaction output as reported by `listunspent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unspent {
    pub txid: String,
    pub vout: u32,
    #[serde(default)]
    pub address: Option<String>,
    pub amount: Amount,
    pub confirmations: u32,
    #[serde(default = "default_spendable")]
    pub spendable: bool,
}

fn default_spendable() -> bool {
    true
}

impl Unspent {
    pub fn outpoint(&self) -> (&str, u32) {
        (&self.txid, self.vout)
    }
}

/// An output locked as masternode collateral.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MasternodeOutput {
    pub txid: String,
    pub vout: u32,
}

impl MasternodeOutput {
    pub fn new<T: Into<String>>(txid: T, vout: u32) -> Self {
        Self { txid: txid.into(), vout }
    }

    /// Decodes the object returned by `masternode outputs`.
    ///
    /// Older daemons answer `{"<txid>": "<vout>"}`, newer ones key the object by `"<txid>-<vout>"`. Both are accepted.
    pub fn from_outputs_object(value: &json::Value) -> Result<Vec<Self>, String> {
        let object = value
            .as_object()
            .ok_or_else(|| format!("expected an object of masternode outputs, got {}", value))?;

        object
            .iter()
            .map(|(key, val)| {
                if let Some(vout) = parse_vout(val) {
                    return Ok(Self::new(key.as_str(), vout));
                }
                let (txid, vout) = key
                    .rsplit_once('-')
                    .ok_or_else(|| format!("unrecognised masternode output entry {}: {}", key, val))?;
                let vout = vout
                    .parse()
                    .map_err(|_| format!("invalid output index in masternode output {}", key))?;
                Ok(Self::new(txid, vout))
            })
            .collect()
    }
}

fn parse_vout(val: &json::Value) -> Option<u32> {
    match val {
        json::Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        json::Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

impl Display for MasternodeOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.txid, self.vout)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxInput {
    pub txid: String,
    pub vout: u32,
}

impl From<&Unspent> for TxInput {
    fn from(unspent: &Unspent) -> Self {
        Self {
            txid: unspent.txid.clone(),
            vout: unspent.vout,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOutput {
    pub address: String,
    pub amount: Amount,
}

impl TxOutput {
    pub fn new<T: Into<String>>(address: T, amount: Amount) -> Self {
        Self {
            address: address.into(),
            amount,
        }
    }
}

/// Flags accompanying a `sendtoaddress` call.
///
/// The default sends the full amount (the network fee is not deducted from it) with no comments, no InstantSend and no
/// PrivateSend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendOptions {
    pub comment: String,
    pub comment_to: String,
    pub subtract_fee_from_amount: bool,
    pub use_instant_send: bool,
    pub use_private_send: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SignRawTransactionResponse {
    pub hex: String,
    pub complete: bool,
}
