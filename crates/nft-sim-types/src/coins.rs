//! Fungible balances used for fees.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Default fee denomination for generated accounts.
pub const DEFAULT_DENOM: &str = "stake";

/// A single-denomination amount.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: u64,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: u64) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// A multi-denomination balance.
///
/// Always sorted by denom with no zero-amount entries, so two equal balances
/// have identical encodings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Coin>", into = "Vec<Coin>")]
pub struct Coins(Vec<Coin>);

impl Coins {
    /// Build a normalized balance, merging duplicate denoms.
    pub fn new(coins: impl IntoIterator<Item = Coin>) -> Self {
        let mut merged: BTreeMap<String, u64> = BTreeMap::new();
        for coin in coins {
            let entry = merged.entry(coin.denom).or_insert(0);
            *entry = entry.saturating_add(coin.amount);
        }
        Self(
            merged
                .into_iter()
                .filter(|(_, amount)| *amount > 0)
                .map(|(denom, amount)| Coin { denom, amount })
                .collect(),
        )
    }

    pub fn single(denom: impl Into<String>, amount: u64) -> Self {
        Self::new([Coin::new(denom, amount)])
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Coin> {
        self.0.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Coin> {
        self.0.get(index)
    }

    pub fn amount_of(&self, denom: &str) -> u64 {
        self.0
            .iter()
            .find(|c| c.denom == denom)
            .map(|c| c.amount)
            .unwrap_or(0)
    }

    pub fn add(&self, other: &Coins) -> Coins {
        Coins::new(self.0.iter().chain(other.0.iter()).cloned())
    }

    /// Subtract `other`, or `None` if any denom would go negative.
    pub fn checked_sub(&self, other: &Coins) -> Option<Coins> {
        let mut remaining: BTreeMap<&str, u64> = self
            .0
            .iter()
            .map(|c| (c.denom.as_str(), c.amount))
            .collect();
        for coin in &other.0 {
            let have = remaining.get(coin.denom.as_str()).copied().unwrap_or(0);
            let left = have.checked_sub(coin.amount)?;
            remaining.insert(coin.denom.as_str(), left);
        }
        Some(Coins::new(
            remaining
                .into_iter()
                .map(|(denom, amount)| Coin::new(denom, amount)),
        ))
    }

    /// Subtract `other`, clamping each denom at zero.
    pub fn saturating_sub(&self, other: &Coins) -> Coins {
        Coins::new(self.0.iter().map(|c| {
            Coin::new(
                c.denom.clone(),
                c.amount.saturating_sub(other.amount_of(&c.denom)),
            )
        }))
    }

    /// True when every denom in `other` is covered by this balance.
    pub fn is_all_gte(&self, other: &Coins) -> bool {
        other
            .0
            .iter()
            .all(|c| self.amount_of(&c.denom) >= c.amount)
    }
}

impl From<Vec<Coin>> for Coins {
    fn from(coins: Vec<Coin>) -> Self {
        Coins::new(coins)
    }
}

impl From<Coins> for Vec<Coin> {
    fn from(coins: Coins) -> Self {
        coins.0
    }
}

impl<'a> IntoIterator for &'a Coins {
    type Item = &'a Coin;
    type IntoIter = std::slice::Iter<'a, Coin>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|c| c.to_string()).collect();
        write!(f, "{}", parts.join(","))
    }
}
