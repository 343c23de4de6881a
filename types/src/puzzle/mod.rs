//! Puzzle domain types.
//!
//! Defines coins, coin sets, pans/locations, tilt outcomes, labels, verdicts and the
//! move errors used by the execution layer and clients.

mod coin;
mod constants;
mod error;
mod label;
mod scale;

pub use coin::*;
pub use constants::*;
pub use error::*;
pub use label::*;
pub use scale::*;
