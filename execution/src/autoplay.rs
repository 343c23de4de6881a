//! Autoplayer.
//!
//! Plays a game to completion by ternary search over the coins still consistent with
//! the weigh history: a third of the suspects on each pan, the rest in the pool. Nine
//! coins are always resolved in two weighs.

use fakecoin_types::{CoinSet, Label, MoveError, Pan, Verdict};
use tracing::{debug, info};

use crate::deduce::possible_fakes;
use crate::game::{Game, GameEvent};

/// Split `suspects` into the next pair of pans, or `None` when weighing cannot
/// narrow them further.
pub fn plan_weighing(suspects: CoinSet) -> Option<(CoinSet, CoinSet)> {
    let n = suspects.len();
    if n < 2 {
        return None;
    }
    let k = n.div_ceil(3);
    let mut coins = suspects.iter();
    let left: CoinSet = coins.by_ref().take(k).collect();
    let right: CoinSet = coins.take(k).collect();
    Some((left, right))
}

#[derive(Clone, Copy, Debug)]
pub struct Autoplayer {
    /// Label every eliminated coin real before guessing.
    pub label_eliminated: bool,
}

impl Default for Autoplayer {
    fn default() -> Self {
        Self {
            label_eliminated: true,
        }
    }
}

impl Autoplayer {
    /// Advance `game` by one decision: either set up and run a weigh, or label and
    /// submit the guess.
    pub fn step(&self, game: &mut Game) -> Result<Vec<GameEvent>, MoveError> {
        if game.is_complete() {
            return Err(MoveError::GameComplete);
        }

        let suspects = possible_fakes(game.history());
        let out_of_weighs = game.weighs_remaining() == Some(0);
        match plan_weighing(suspects) {
            Some((left, right)) if !out_of_weighs => self.weigh(game, left, right),
            _ => self.guess(game, suspects),
        }
    }

    /// Run [`Autoplayer::step`] until the game completes.
    pub fn solve(&self, game: &mut Game) -> Result<(Verdict, Vec<GameEvent>), MoveError> {
        let mut events = Vec::new();
        loop {
            for event in self.step(game)? {
                events.push(event);
                if let GameEvent::Finished { verdict } = event {
                    return Ok((verdict, events));
                }
            }
        }
    }

    fn weigh(
        &self,
        game: &mut Game,
        left: CoinSet,
        right: CoinSet,
    ) -> Result<Vec<GameEvent>, MoveError> {
        debug!(left = %left, right = %right, "autoplay weighing");
        let mut events = Vec::new();
        match game.clear_scale() {
            Ok(event) => events.push(event),
            Err(MoveError::ScaleEmpty) => {}
            Err(err) => return Err(err),
        }
        for (pan, coins) in [(Pan::Left, left), (Pan::Right, right)] {
            for coin in coins {
                events.push(game.place(coin, pan)?);
            }
        }
        events.push(game.weigh()?);
        Ok(events)
    }

    fn guess(&self, game: &mut Game, suspects: CoinSet) -> Result<Vec<GameEvent>, MoveError> {
        // An inconsistent history leaves no suspects; fall back to any unlabeled coin.
        let pick = suspects
            .first()
            .or_else(|| game.labels().real().complement().first())
            .or_else(|| CoinSet::all().first())
            .ok_or(MoveError::NoFakeLabel)?;

        let mut events = Vec::new();
        if self.label_eliminated && suspects.len() == 1 {
            for coin in suspects.complement() {
                if !game.labels().has(coin, Label::Real) {
                    events.push(game.toggle_label(coin, Label::Real)?);
                }
            }
        }
        if game.labels().fake() != Some(pick) {
            events.push(game.toggle_label(pick, Label::Fake)?);
        }
        events.push(game.submit_guess()?);
        info!(
            guess = %pick,
            suspects = %suspects,
            weigh_count = game.weigh_count(),
            "autoplay submitted guess"
        );
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Rules, Variant};
    use fakecoin_types::{CoinId, Tilt};
    use rand::{rngs::StdRng, SeedableRng};

    fn coin(id: u8) -> CoinId {
        CoinId::new(id).unwrap()
    }

    fn set(ids: &[u8]) -> CoinSet {
        ids.iter().map(|&id| coin(id)).collect()
    }

    #[test]
    fn test_plan_splits_into_thirds() {
        assert_eq!(
            plan_weighing(CoinSet::all()),
            Some((set(&[1, 2, 3]), set(&[4, 5, 6])))
        );
        assert_eq!(plan_weighing(set(&[4, 5, 6])), Some((set(&[4]), set(&[5]))));
        assert_eq!(plan_weighing(set(&[2, 8])), Some((set(&[2]), set(&[8]))));
        assert_eq!(
            plan_weighing(set(&[1, 2, 3, 4])),
            Some((set(&[1, 2]), set(&[3, 4])))
        );
        assert_eq!(plan_weighing(set(&[7])), None);
        assert_eq!(plan_weighing(CoinSet::EMPTY), None);
    }

    #[test]
    fn test_solves_every_fake_in_two_weighs() {
        for variant in Variant::ALL {
            for fake in CoinId::all() {
                let mut game = Game::with_fake(variant.rules(), fake);
                let (verdict, events) = Autoplayer::default().solve(&mut game).unwrap();
                assert!(verdict.correct, "{variant}: missed fake {fake}");
                assert_eq!(verdict.guess, fake);
                assert!(verdict.weigh_count <= 2);
                assert!(game.is_complete());
                assert!(matches!(events.last(), Some(GameEvent::Finished { .. })));
            }
        }
    }

    #[test]
    fn test_labels_eliminated_coins_real() {
        let mut game = Game::with_fake(Rules::default(), coin(6));
        Autoplayer::default().solve(&mut game).unwrap();
        assert_eq!(game.labels().real(), CoinSet::all().difference(set(&[6])));
        assert_eq!(game.labels().fake(), Some(coin(6)));
    }

    #[test]
    fn test_skip_real_labels() {
        let player = Autoplayer {
            label_eliminated: false,
        };
        let mut game = Game::with_fake(Rules::default(), coin(2));
        player.solve(&mut game).unwrap();
        assert!(game.labels().real().is_empty());
    }

    #[test]
    fn test_picks_up_mid_game() {
        let mut game = Game::with_fake(Rules::default(), coin(8));
        game.place(coin(1), Pan::Left).unwrap();
        game.place(coin(8), Pan::Right).unwrap();
        game.weigh().unwrap();
        assert_eq!(game.last_tilt(), Some(Tilt::LeftHeavy));

        let (verdict, _) = Autoplayer::default().solve(&mut game).unwrap();
        assert!(verdict.correct);
        assert_eq!(verdict.weigh_count, 1);
    }

    #[test]
    fn test_guesses_when_out_of_weighs() {
        let rules = Rules::default().with_weigh_limit(Some(1));
        let mut game = Game::with_fake(rules, coin(9));
        game.place(coin(1), Pan::Left).unwrap();
        game.place(coin(2), Pan::Right).unwrap();
        game.weigh().unwrap();

        let events = Autoplayer::default().step(&mut game).unwrap();
        assert!(matches!(events.last(), Some(GameEvent::Finished { .. })));
        // Coins 3..=9 remain possible; the first is guessed.
        assert_eq!(game.verdict().unwrap().guess, coin(3));
    }

    #[test]
    fn test_step_on_complete_game() {
        let mut game = Game::new(Rules::default(), &mut StdRng::seed_from_u64(11));
        Autoplayer::default().solve(&mut game).unwrap();
        assert_eq!(
            Autoplayer::default().step(&mut game),
            Err(MoveError::GameComplete)
        );
    }
}
