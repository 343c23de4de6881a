//! Weigh evaluator.
//!
//! Every genuine coin weighs [`GENUINE_WEIGHT`]; the fake coin weighs nothing. The
//! evaluator is pure and total: empty pans are valid input and compare as balanced.

use fakecoin_types::{CoinId, CoinSet, Tilt, GENUINE_WEIGHT};

/// Weight of the coins in `pan`, given which coin (if any) is fake.
pub fn pan_weight(pan: CoinSet, fake: Option<CoinId>) -> u32 {
    let genuine = match fake {
        Some(fake) if pan.contains(fake) => pan.len() - 1,
        _ => pan.len(),
    };
    genuine as u32 * GENUINE_WEIGHT
}

/// Compare the two pans.
pub fn weigh(left: CoinSet, right: CoinSet, fake: Option<CoinId>) -> Tilt {
    Tilt::from_weights(pan_weight(left, fake), pan_weight(right, fake))
}
