/// Number of coins in play.
pub const COIN_COUNT: usize = 9;

/// Smallest valid coin identifier.
pub const MIN_COIN_ID: u8 = 1;

/// Largest valid coin identifier.
pub const MAX_COIN_ID: u8 = COIN_COUNT as u8;

/// Weigh limit used by the classic rule set.
pub const CLASSIC_WEIGH_LIMIT: u32 = 2;

/// Weight of a genuine coin, in arbitrary units. The fake weighs nothing.
pub const GENUINE_WEIGHT: u32 = 1;
