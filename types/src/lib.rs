//! Common types for the fake coin puzzle.
//!
//! Everything here is plain data: coin identifiers, coin sets, scale positions,
//! tilt outcomes, player labels and the errors returned by rejected moves. The
//! state machine that ties them together lives in `fakecoin-execution`.

pub mod puzzle;

pub use puzzle::*;
