use thiserror::Error;

use super::{CoinId, Label, Location, Pan};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CoinIdError {
    #[error("coin id out of range (got={got}, expected 1..=9)")]
    OutOfRange { got: u8 },
    #[error("not a coin id: {0:?}")]
    Unparseable(String),
}

/// Reasons a game transition is rejected. State is left untouched in every case.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("game is already complete; start a new game")]
    GameComplete,
    #[error("coin {coin} is already in the {location}")]
    AlreadyAt { coin: CoinId, location: Location },
    #[error("the {0} pan is empty")]
    EmptyPan(Pan),
    #[error("the scale is already empty")]
    ScaleEmpty,
    #[error("weigh limit reached ({limit})")]
    WeighLimitReached { limit: u32 },
    #[error("{0} labels are disabled by the current rules")]
    LabelDisabled(Label),
    #[error("no coin is labeled fake")]
    NoFakeLabel,
}
