//! Property tests for the evaluator and the game state machine.

use crate::{possible_fakes, weigh, Game, GameEvent, Rules};
use fakecoin_types::{CoinId, CoinSet, Label, Pan, Tilt, COIN_COUNT};
use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

/// Disjoint pans drawn by assigning each coin to the pool, left, or right.
fn arb_pans() -> impl Strategy<Value = (CoinSet, CoinSet)> {
    prop::array::uniform9(0u8..3).prop_map(|slots| {
        let mut left = CoinSet::EMPTY;
        let mut right = CoinSet::EMPTY;
        for (coin, slot) in CoinId::all().zip(slots) {
            match slot {
                1 => {
                    left.insert(coin);
                }
                2 => {
                    right.insert(coin);
                }
                _ => {}
            }
        }
        (left, right)
    })
}

fn arb_coin() -> impl Strategy<Value = CoinId> {
    (0..COIN_COUNT).prop_map(|idx| CoinId::ALL[idx])
}

fn arb_pan() -> impl Strategy<Value = Pan> {
    prop_oneof![Just(Pan::Left), Just(Pan::Right)]
}

fn arb_label() -> impl Strategy<Value = Label> {
    prop_oneof![Just(Label::Fake), Just(Label::Real), Just(Label::Candidate)]
}

#[derive(Clone, Debug)]
enum Op {
    Place(CoinId, Pan),
    Remove(CoinId),
    Clear,
    Weigh,
    Toggle(CoinId, Label),
    Submit,
    Reset,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (arb_coin(), arb_pan()).prop_map(|(coin, pan)| Op::Place(coin, pan)),
        2 => arb_coin().prop_map(Op::Remove),
        1 => Just(Op::Clear),
        2 => Just(Op::Weigh),
        2 => (arb_coin(), arb_label()).prop_map(|(coin, label)| Op::Toggle(coin, label)),
        1 => Just(Op::Submit),
        1 => Just(Op::Reset),
    ]
}

/// Everything a client can observe about a game.
fn snapshot(game: &Game) -> String {
    format!(
        "{:?}|{}|{:?}|{:?}|{:?}|{:?}",
        game.coins(),
        game.weigh_count(),
        game.last_tilt(),
        game.history(),
        game.labels(),
        game.verdict()
    )
}

fn assert_partition(game: &Game) {
    let pool = game.pool();
    let left = game.pan(Pan::Left);
    let right = game.pan(Pan::Right);
    assert!(pool.is_disjoint(&left));
    assert!(pool.is_disjoint(&right));
    assert!(left.is_disjoint(&right));
    assert_eq!(pool.union(left).union(right), CoinSet::all());
    assert_eq!(pool.len() + left.len() + right.len(), COIN_COUNT);
}

proptest! {
    #[test]
    fn evaluator_mirrors_under_swap(
        (left, right) in arb_pans(),
        fake in prop::option::of(arb_coin()),
    ) {
        prop_assert_eq!(weigh(right, left, fake), weigh(left, right, fake).mirror());
    }

    #[test]
    fn evaluator_is_idempotent(
        (left, right) in arb_pans(),
        fake in prop::option::of(arb_coin()),
    ) {
        let first = weigh(left, right, fake);
        for _ in 0..3 {
            prop_assert_eq!(weigh(left, right, fake), first);
        }
    }

    #[test]
    fn lighter_pan_holds_fake_when_counts_match(
        (left, right) in arb_pans(),
        fake in arb_coin(),
    ) {
        let n = left.len().min(right.len());
        let left: CoinSet = left.iter().take(n).collect();
        let right: CoinSet = right.iter().take(n).collect();
        let tilt = weigh(left, right, Some(fake));
        match tilt {
            Tilt::RightHeavy => prop_assert!(left.contains(fake)),
            Tilt::LeftHeavy => prop_assert!(right.contains(fake)),
            Tilt::Balanced => prop_assert!(!left.contains(fake) && !right.contains(fake)),
        }
    }

    #[test]
    fn true_fake_always_remains_possible(
        fake in arb_coin(),
        weighs in prop::collection::vec(arb_pans(), 0..6),
    ) {
        let history: Vec<_> = weighs
            .into_iter()
            .map(|(left, right)| fakecoin_types::WeighRecord {
                left,
                right,
                tilt: weigh(left, right, Some(fake)),
            })
            .collect();
        prop_assert!(possible_fakes(&history).contains(fake));
    }

    #[test]
    fn game_invariants_hold_under_random_ops(
        seed in any::<u64>(),
        allow_candidates in any::<bool>(),
        weigh_limit in prop::option::of(0u32..4),
        ops in prop::collection::vec(arb_op(), 1..64),
    ) {
        let rules = Rules {
            weigh_limit,
            allow_candidates,
            require_both_pans: true,
        };
        let mut rng = StdRng::seed_from_u64(seed);
        let mut game = Game::new(rules, &mut rng);
        assert_partition(&game);

        for op in ops {
            let before = snapshot(&game);
            let count_before = game.weigh_count();
            let tilt_before = game.last_tilt();

            let result = match op {
                Op::Place(coin, pan) => game.place(coin, pan),
                Op::Remove(coin) => game.remove(coin),
                Op::Clear => game.clear_scale(),
                Op::Weigh => game.weigh(),
                Op::Toggle(coin, label) => game.toggle_label(coin, label),
                Op::Submit => game.submit_guess(),
                Op::Reset => Ok(game.reset(&mut rng)),
            };

            assert_partition(&game);
            let labels = game.labels();
            if let Some(fake) = labels.fake() {
                prop_assert!(!labels.real().contains(fake));
            }

            match result {
                Err(_) => prop_assert_eq!(snapshot(&game), before),
                Ok(GameEvent::Started { .. }) => {
                    prop_assert_eq!(game.weigh_count(), 0);
                    prop_assert!(game.labels().is_empty());
                }
                Ok(GameEvent::Weighed { weigh_count, .. }) => {
                    prop_assert_eq!(weigh_count, count_before + 1);
                    prop_assert!(game.last_tilt().is_some());
                    if let Some(limit) = weigh_limit {
                        prop_assert!(weigh_count <= limit);
                    }
                }
                Ok(GameEvent::Moved { .. }) | Ok(GameEvent::ScaleCleared { .. }) => {
                    prop_assert_eq!(game.weigh_count(), count_before);
                    prop_assert_eq!(game.last_tilt(), None::<Tilt>);
                }
                Ok(GameEvent::Labeled { .. }) | Ok(GameEvent::Finished { .. }) => {
                    prop_assert_eq!(game.weigh_count(), count_before);
                    prop_assert_eq!(game.last_tilt(), tilt_before);
                }
            }
        }
    }
}
