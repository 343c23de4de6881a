//! Fake coin puzzle execution layer.
//!
//! This crate contains the weigh evaluator and the game state machine that clients
//! drive, plus deduction helpers and an autoplayer built on top of them.
//!
//! ## Determinism requirements
//! - The only randomness is the secret fake coin drawn at game start/reset, and it is
//!   taken from the caller's [`rand::Rng`]. Seeding that RNG reproduces a game exactly.
//! - Rejected transitions never mutate state.
//!
//! The primary entrypoint is [`Game`].
//!
//! ## Minimal game (example)
//! ```rust
//! use fakecoin_execution::{Game, Rules};
//! use fakecoin_types::{CoinId, Label, Pan};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let mut game = Game::new(Rules::default(), &mut rng);
//! let coin = |id| CoinId::new(id).unwrap();
//!
//! game.place(coin(1), Pan::Left).unwrap();
//! game.place(coin(2), Pan::Right).unwrap();
//! game.weigh().unwrap();
//! assert!(game.last_tilt().is_some());
//!
//! game.toggle_label(coin(1), Label::Fake).unwrap();
//! game.submit_guess().unwrap();
//! assert!(game.is_complete());
//! ```

pub mod autoplay;
pub mod deduce;
pub mod game;
pub mod logging;
pub mod rules;
pub mod weigh;

#[cfg(test)]
mod property_tests;

pub use autoplay::{plan_weighing, Autoplayer};
pub use deduce::{is_consistent, possible_fakes};
pub use game::{draw_fake, Game, GameEvent, Phase};
pub use rules::{Rules, Variant};
pub use weigh::{pan_weight, weigh};
