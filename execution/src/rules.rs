//! Rule sets for a game.
//!
//! The puzzle has been played two ways: a classic variant that caps the player at two
//! weighs and only offers fake/real labels, and an open variant with no cap and an
//! extra candidate label. Both are expressed as [`Rules`]; [`Variant`] names them.
//!
//! # Example
//! ```rust
//! use fakecoin_execution::{Rules, Variant};
//!
//! let classic = Variant::Classic.rules();
//! assert_eq!(classic.weigh_limit, Some(2));
//! assert_eq!(Rules::default(), Variant::Open.rules());
//! ```

use std::fmt;
use std::str::FromStr;

use fakecoin_types::CLASSIC_WEIGH_LIMIT;
use serde::{Deserialize, Serialize};

/// Per-game configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    /// Maximum number of weighs per game, or `None` for no limit.
    pub weigh_limit: Option<u32>,
    /// Whether the candidate label is offered.
    pub allow_candidates: bool,
    /// Reject weighing while either pan is empty.
    pub require_both_pans: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Variant::default().rules()
    }
}

impl Rules {
    pub fn with_weigh_limit(mut self, weigh_limit: Option<u32>) -> Self {
        self.weigh_limit = weigh_limit;
        self
    }

    /// Short human description, e.g. `2 weighs, fake/real labels`.
    pub fn describe(&self) -> String {
        let weighs = match self.weigh_limit {
            Some(1) => "1 weigh".to_string(),
            Some(n) => format!("{n} weighs"),
            None => "unlimited weighs".to_string(),
        };
        let labels = if self.allow_candidates {
            "fake/real/candidate labels"
        } else {
            "fake/real labels"
        };
        format!("{weighs}, {labels}")
    }
}

/// Named rule sets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Two weighs, fake/real labels only.
    Classic,
    /// Unlimited weighs, candidate labels enabled.
    #[default]
    Open,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Classic, Variant::Open];

    pub fn rules(self) -> Rules {
        match self {
            Variant::Classic => Rules {
                weigh_limit: Some(CLASSIC_WEIGH_LIMIT),
                allow_candidates: false,
                require_both_pans: true,
            },
            Variant::Open => Rules {
                weigh_limit: None,
                allow_candidates: true,
                require_both_pans: true,
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Variant::Classic => "classic",
            Variant::Open => "open",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "classic" => Ok(Variant::Classic),
            "open" => Ok(Variant::Open),
            other => Err(format!("unknown variant {other:?} (expected classic|open)")),
        }
    }
}
