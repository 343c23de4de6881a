use std::fmt;

use serde::{Deserialize, Serialize};

use super::{CoinId, CoinSet, Location};

/// Player-assigned tag on a coin. Independent of which coin is really fake.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Fake,
    Real,
    Candidate,
}

impl Label {
    pub fn name(self) -> &'static str {
        match self {
            Label::Fake => "fake",
            Label::Real => "real",
            Label::Candidate => "candidate",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Labels applied across all coins.
///
/// Invariants:
/// - at most one coin carries the fake label;
/// - no coin carries both the fake and the real label;
/// - the candidate flag is independent of the other two.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinLabels {
    fake: Option<CoinId>,
    real: CoinSet,
    candidates: CoinSet,
}

impl CoinLabels {
    /// Toggles `label` on `coin` and returns whether it is now applied.
    ///
    /// Marking a coin fake moves the fake label off any other coin and clears the
    /// coin's real label; marking a coin real clears its fake label.
    pub fn toggle(&mut self, coin: CoinId, label: Label) -> bool {
        match label {
            Label::Fake => {
                if self.fake == Some(coin) {
                    self.fake = None;
                    false
                } else {
                    self.fake = Some(coin);
                    self.real.remove(coin);
                    true
                }
            }
            Label::Real => {
                if self.real.remove(coin) {
                    false
                } else {
                    self.real.insert(coin);
                    if self.fake == Some(coin) {
                        self.fake = None;
                    }
                    true
                }
            }
            Label::Candidate => {
                if self.candidates.remove(coin) {
                    false
                } else {
                    self.candidates.insert(coin);
                    true
                }
            }
        }
    }

    pub fn has(&self, coin: CoinId, label: Label) -> bool {
        match label {
            Label::Fake => self.fake == Some(coin),
            Label::Real => self.real.contains(coin),
            Label::Candidate => self.candidates.contains(coin),
        }
    }

    /// The coin currently labeled fake, if any.
    pub fn fake(&self) -> Option<CoinId> {
        self.fake
    }

    pub fn real(&self) -> CoinSet {
        self.real
    }

    pub fn candidates(&self) -> CoinSet {
        self.candidates
    }

    pub fn is_empty(&self) -> bool {
        self.fake.is_none() && self.real.is_empty() && self.candidates.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Derived per-coin view used by clients.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinView {
    pub id: CoinId,
    pub location: Location,
    /// Only populated once the game is complete; `false` before then.
    pub is_fake: bool,
    pub labeled_fake: bool,
    pub labeled_real: bool,
    pub candidate: bool,
}

/// Outcome of a submitted guess.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub guess: CoinId,
    pub fake: CoinId,
    pub correct: bool,
    pub weigh_count: u32,
}

impl Verdict {
    pub fn new(guess: CoinId, fake: CoinId, weigh_count: u32) -> Self {
        Self {
            guess,
            fake,
            correct: guess == fake,
            weigh_count,
        }
    }

    /// One-line summary for display.
    pub fn summary(&self) -> String {
        if self.correct {
            format!(
                "Congratulations! Coin {} is the fake, found in {} weigh{}.",
                self.fake,
                self.weigh_count,
                if self.weigh_count == 1 { "" } else { "s" }
            )
        } else {
            format!(
                "Incorrect: you picked coin {}, the fake was coin {}.",
                self.guess, self.fake
            )
        }
    }
}
