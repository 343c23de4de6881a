//! Game state machine.
//!
//! Phases:
//! - setup: the secret fake coin is drawn. Transient; happens inside [`Game::new`] and
//!   [`Game::reset`].
//! - in progress: coins move between the pool and the pans, weighs are requested,
//!   labels are applied.
//! - complete: a guess was submitted. Only [`Game::reset`] is accepted.
//!
//! Each coin's location is stored per coin, so the pool and the two pans always
//! partition the nine coins. Every accepted transition returns a [`GameEvent`];
//! rejected transitions return a [`MoveError`] and change nothing.

use fakecoin_types::{
    CoinId, CoinLabels, CoinSet, CoinView, Label, Location, MoveError, Pan, Tilt, Verdict,
    WeighRecord, COIN_COUNT,
};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::rules::Rules;
use crate::weigh::weigh;

/// Draw a fake coin uniformly from `1..=9`.
pub fn draw_fake<R: Rng + ?Sized>(rng: &mut R) -> CoinId {
    CoinId::ALL[rng.gen_range(0..COIN_COUNT)]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    InProgress,
    Complete,
}

/// Record of an accepted transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    Started {
        weigh_limit: Option<u32>,
        allow_candidates: bool,
    },
    Moved {
        coin: CoinId,
        from: Location,
        to: Location,
    },
    ScaleCleared {
        returned: CoinSet,
    },
    Weighed {
        record: WeighRecord,
        weigh_count: u32,
    },
    Labeled {
        coin: CoinId,
        label: Label,
        applied: bool,
    },
    Finished {
        verdict: Verdict,
    },
}

#[derive(Clone, Debug)]
pub struct Game {
    fake: CoinId,
    rules: Rules,
    locations: [Location; COIN_COUNT],
    weigh_count: u32,
    /// `None` until the first weigh and whenever the pans change afterwards.
    last_tilt: Option<Tilt>,
    history: Vec<WeighRecord>,
    labels: CoinLabels,
    verdict: Option<Verdict>,
}

impl Game {
    /// Start a game with a freshly drawn fake coin.
    pub fn new<R: Rng + ?Sized>(rules: Rules, rng: &mut R) -> Self {
        let game = Self::with_fake(rules, draw_fake(rng));
        info!(
            weigh_limit = ?rules.weigh_limit,
            allow_candidates = rules.allow_candidates,
            "new game"
        );
        game
    }

    /// Start a game with a known fake coin.
    pub fn with_fake(rules: Rules, fake: CoinId) -> Self {
        debug!(fake = %fake, "fake coin chosen");
        Self {
            fake,
            rules,
            locations: [Location::Pool; COIN_COUNT],
            weigh_count: 0,
            last_tilt: None,
            history: Vec::new(),
            labels: CoinLabels::default(),
            verdict: None,
        }
    }

    /// Discard all progress and draw a new fake coin. Accepted in every phase.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) -> GameEvent {
        *self = Self::new(self.rules, rng);
        self.started_event()
    }

    /// The event describing how this game was set up.
    pub fn started_event(&self) -> GameEvent {
        GameEvent::Started {
            weigh_limit: self.rules.weigh_limit,
            allow_candidates: self.rules.allow_candidates,
        }
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn phase(&self) -> Phase {
        if self.verdict.is_some() {
            Phase::Complete
        } else {
            Phase::InProgress
        }
    }

    pub fn is_complete(&self) -> bool {
        self.verdict.is_some()
    }

    pub fn verdict(&self) -> Option<Verdict> {
        self.verdict
    }

    /// The secret, once a guess has been submitted.
    pub fn revealed_fake(&self) -> Option<CoinId> {
        self.verdict.map(|v| v.fake)
    }

    pub fn location(&self, coin: CoinId) -> Location {
        self.locations[coin.index()]
    }

    pub fn coins_at(&self, location: Location) -> CoinSet {
        CoinId::all()
            .filter(|coin| self.location(*coin) == location)
            .collect()
    }

    pub fn pool(&self) -> CoinSet {
        self.coins_at(Location::Pool)
    }

    pub fn pan(&self, pan: Pan) -> CoinSet {
        self.coins_at(Location::Pan(pan))
    }

    pub fn weigh_count(&self) -> u32 {
        self.weigh_count
    }

    /// Weighs left under the current limit, or `None` when unlimited.
    pub fn weighs_remaining(&self) -> Option<u32> {
        self.rules
            .weigh_limit
            .map(|limit| limit.saturating_sub(self.weigh_count))
    }

    /// Outcome of the last weigh, or `None` if the pans changed since.
    pub fn last_tilt(&self) -> Option<Tilt> {
        self.last_tilt
    }

    pub fn history(&self) -> &[WeighRecord] {
        &self.history
    }

    pub fn labels(&self) -> &CoinLabels {
        &self.labels
    }

    pub fn coin_view(&self, coin: CoinId) -> CoinView {
        CoinView {
            id: coin,
            location: self.location(coin),
            is_fake: self.revealed_fake() == Some(coin),
            labeled_fake: self.labels.has(coin, Label::Fake),
            labeled_real: self.labels.has(coin, Label::Real),
            candidate: self.labels.has(coin, Label::Candidate),
        }
    }

    pub fn coins(&self) -> Vec<CoinView> {
        CoinId::all().map(|coin| self.coin_view(coin)).collect()
    }

    /// Move `coin` to `to`, wherever it currently is.
    pub fn move_coin(&mut self, coin: CoinId, to: Location) -> Result<GameEvent, MoveError> {
        self.ensure_in_progress()?;
        let from = self.location(coin);
        if from == to {
            return Err(MoveError::AlreadyAt { coin, location: to });
        }

        self.locations[coin.index()] = to;
        self.last_tilt = None;
        debug!(coin = %coin, from = %from, to = %to, "coin moved");
        Ok(GameEvent::Moved { coin, from, to })
    }

    /// Put `coin` on `pan`, taking it from the pool or the other pan.
    pub fn place(&mut self, coin: CoinId, pan: Pan) -> Result<GameEvent, MoveError> {
        self.move_coin(coin, Location::Pan(pan))
    }

    /// Return `coin` to the pool.
    pub fn remove(&mut self, coin: CoinId) -> Result<GameEvent, MoveError> {
        self.move_coin(coin, Location::Pool)
    }

    /// Return every coin on the scale to the pool.
    pub fn clear_scale(&mut self) -> Result<GameEvent, MoveError> {
        self.ensure_in_progress()?;
        let returned = self.pan(Pan::Left).union(self.pan(Pan::Right));
        if returned.is_empty() {
            return Err(MoveError::ScaleEmpty);
        }

        self.locations = [Location::Pool; COIN_COUNT];
        self.last_tilt = None;
        debug!(returned = %returned, "scale cleared");
        Ok(GameEvent::ScaleCleared { returned })
    }

    /// Weigh the current pan contents.
    pub fn weigh(&mut self) -> Result<GameEvent, MoveError> {
        self.ensure_in_progress()?;
        if let Some(limit) = self.rules.weigh_limit {
            if self.weigh_count >= limit {
                return Err(MoveError::WeighLimitReached { limit });
            }
        }
        let left = self.pan(Pan::Left);
        let right = self.pan(Pan::Right);
        if self.rules.require_both_pans {
            if left.is_empty() {
                return Err(MoveError::EmptyPan(Pan::Left));
            }
            if right.is_empty() {
                return Err(MoveError::EmptyPan(Pan::Right));
            }
        }

        let tilt = weigh(left, right, Some(self.fake));
        let record = WeighRecord { left, right, tilt };
        self.weigh_count += 1;
        self.last_tilt = Some(tilt);
        self.history.push(record);
        debug!(
            left = %left,
            right = %right,
            tilt = %tilt,
            weigh_count = self.weigh_count,
            "weighed"
        );
        Ok(GameEvent::Weighed {
            record,
            weigh_count: self.weigh_count,
        })
    }

    /// Toggle `label` on `coin`.
    pub fn toggle_label(&mut self, coin: CoinId, label: Label) -> Result<GameEvent, MoveError> {
        self.ensure_in_progress()?;
        if label == Label::Candidate && !self.rules.allow_candidates {
            return Err(MoveError::LabelDisabled(label));
        }

        let applied = self.labels.toggle(coin, label);
        debug!(coin = %coin, label = %label, applied, "label toggled");
        Ok(GameEvent::Labeled {
            coin,
            label,
            applied,
        })
    }

    /// Submit the coin labeled fake as the answer.
    pub fn submit_guess(&mut self) -> Result<GameEvent, MoveError> {
        self.ensure_in_progress()?;
        let guess = self.labels.fake().ok_or(MoveError::NoFakeLabel)?;

        let verdict = Verdict::new(guess, self.fake, self.weigh_count);
        self.verdict = Some(verdict);
        info!(
            guess = %verdict.guess,
            fake = %verdict.fake,
            correct = verdict.correct,
            weigh_count = verdict.weigh_count,
            "game finished"
        );
        Ok(GameEvent::Finished { verdict })
    }

    fn ensure_in_progress(&self) -> Result<(), MoveError> {
        if self.is_complete() {
            Err(MoveError::GameComplete)
        } else {
            Ok(())
        }
    }
}
