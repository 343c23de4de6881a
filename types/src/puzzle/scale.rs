use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::CoinSet;

/// One side of the balance scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pan {
    Left,
    Right,
}

impl Pan {
    pub fn name(self) -> &'static str {
        match self {
            Pan::Left => "left",
            Pan::Right => "right",
        }
    }
}

impl fmt::Display for Pan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a coin currently sits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    #[default]
    Pool,
    Pan(Pan),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Pool => f.write_str("pool"),
            Location::Pan(pan) => write!(f, "{pan} pan"),
        }
    }
}

/// Outcome of a weigh.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tilt {
    Balanced,
    LeftHeavy,
    RightHeavy,
}

impl Tilt {
    /// Compares the weights on each pan.
    pub fn from_weights(left: u32, right: u32) -> Tilt {
        match left.cmp(&right) {
            Ordering::Greater => Tilt::LeftHeavy,
            Ordering::Less => Tilt::RightHeavy,
            Ordering::Equal => Tilt::Balanced,
        }
    }

    /// The outcome seen if the pans were swapped.
    pub fn mirror(self) -> Tilt {
        match self {
            Tilt::Balanced => Tilt::Balanced,
            Tilt::LeftHeavy => Tilt::RightHeavy,
            Tilt::RightHeavy => Tilt::LeftHeavy,
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Tilt::Balanced => "balanced",
            Tilt::LeftHeavy => "left pan heavier",
            Tilt::RightHeavy => "right pan heavier",
        }
    }
}

impl fmt::Display for Tilt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A completed weigh: what was on each pan and how the scale tipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeighRecord {
    pub left: CoinSet,
    pub right: CoinSet,
    pub tilt: Tilt,
}
