use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{CoinIdError, COIN_COUNT, MAX_COIN_ID, MIN_COIN_ID};

/// Identifier of one of the nine coins (`1..=9`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct CoinId(u8);

impl CoinId {
    /// All coins in ascending order.
    pub const ALL: [CoinId; COIN_COUNT] = [
        CoinId(1),
        CoinId(2),
        CoinId(3),
        CoinId(4),
        CoinId(5),
        CoinId(6),
        CoinId(7),
        CoinId(8),
        CoinId(9),
    ];

    pub fn new(value: u8) -> Result<Self, CoinIdError> {
        if (MIN_COIN_ID..=MAX_COIN_ID).contains(&value) {
            Ok(Self(value))
        } else {
            Err(CoinIdError::OutOfRange { got: value })
        }
    }

    /// The identifier as printed on the coin.
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Zero-based slot, for indexing per-coin arrays.
    pub const fn index(self) -> usize {
        (self.0 - MIN_COIN_ID) as usize
    }

    /// Iterates [`CoinId::ALL`].
    pub fn all() -> impl Iterator<Item = CoinId> {
        Self::ALL.into_iter()
    }
}

impl TryFrom<u8> for CoinId {
    type Error = CoinIdError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CoinId> for u8 {
    fn from(coin: CoinId) -> Self {
        coin.0
    }
}

impl FromStr for CoinId {
    type Err = CoinIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<u8>()
            .map_err(|_| CoinIdError::Unparseable(s.to_string()))?;
        Self::new(value)
    }
}

impl fmt::Display for CoinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An order-irrelevant set of coins.
///
/// Stored as a bitmask where bit `n` is coin `n`; iteration is ascending.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<CoinId>", from = "Vec<CoinId>")]
pub struct CoinSet(u16);

impl CoinSet {
    pub const EMPTY: CoinSet = CoinSet(0);

    /// Every coin.
    pub fn all() -> Self {
        CoinId::all().collect()
    }

    pub fn contains(&self, coin: CoinId) -> bool {
        self.0 & Self::bit(coin) != 0
    }

    /// Adds `coin`, returning `true` if it was not already present.
    pub fn insert(&mut self, coin: CoinId) -> bool {
        let was_absent = !self.contains(coin);
        self.0 |= Self::bit(coin);
        was_absent
    }

    /// Removes `coin`, returning `true` if it was present.
    pub fn remove(&mut self, coin: CoinId) -> bool {
        let was_present = self.contains(coin);
        self.0 &= !Self::bit(coin);
        was_present
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Smallest coin in the set.
    pub fn first(&self) -> Option<CoinId> {
        self.iter().next()
    }

    pub fn iter(&self) -> Iter {
        Iter { bits: self.0 }
    }

    pub fn union(self, other: CoinSet) -> CoinSet {
        CoinSet(self.0 | other.0)
    }

    pub fn difference(self, other: CoinSet) -> CoinSet {
        CoinSet(self.0 & !other.0)
    }

    /// Coins not in this set.
    pub fn complement(self) -> CoinSet {
        Self::all().difference(self)
    }

    pub fn is_disjoint(&self, other: &CoinSet) -> bool {
        self.0 & other.0 == 0
    }

    fn bit(coin: CoinId) -> u16 {
        1 << coin.get()
    }
}

impl FromIterator<CoinId> for CoinSet {
    fn from_iter<I: IntoIterator<Item = CoinId>>(iter: I) -> Self {
        let mut set = CoinSet::EMPTY;
        set.extend(iter);
        set
    }
}

impl Extend<CoinId> for CoinSet {
    fn extend<I: IntoIterator<Item = CoinId>>(&mut self, iter: I) {
        for coin in iter {
            self.insert(coin);
        }
    }
}

impl From<Vec<CoinId>> for CoinSet {
    fn from(coins: Vec<CoinId>) -> Self {
        coins.into_iter().collect()
    }
}

impl From<CoinSet> for Vec<CoinId> {
    fn from(set: CoinSet) -> Self {
        set.iter().collect()
    }
}

impl IntoIterator for CoinSet {
    type Item = CoinId;
    type IntoIter = Iter;

    fn into_iter(self) -> Iter {
        self.iter()
    }
}

impl IntoIterator for &CoinSet {
    type Item = CoinId;
    type IntoIter = Iter;

    fn into_iter(self) -> Iter {
        self.iter()
    }
}

impl fmt::Debug for CoinSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Comma-separated ids, e.g. `1,4,7`. Empty sets print nothing.
impl fmt::Display for CoinSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, coin) in self.iter().enumerate() {
            if idx > 0 {
                f.write_str(",")?;
            }
            write!(f, "{coin}")?;
        }
        Ok(())
    }
}

/// Ascending iterator over a [`CoinSet`].
#[derive(Clone, Debug)]
pub struct Iter {
    bits: u16,
}

impl Iterator for Iter {
    type Item = CoinId;

    fn next(&mut self) -> Option<CoinId> {
        if self.bits == 0 {
            return None;
        }
        let lowest = self.bits.trailing_zeros() as u8;
        self.bits &= self.bits - 1;
        Some(CoinId(lowest))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.bits.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Iter {}
