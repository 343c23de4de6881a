//! Deduction from weigh history.
//!
//! A coin is still a possible fake if assuming it is the fake reproduces every
//! recorded outcome.

use fakecoin_types::{CoinId, CoinSet, WeighRecord};

use crate::weigh::weigh;

/// Whether `record` could have been observed with `candidate` as the fake.
pub fn is_consistent(candidate: CoinId, record: &WeighRecord) -> bool {
    weigh(record.left, record.right, Some(candidate)) == record.tilt
}

/// Coins consistent with every record in `history`.
pub fn possible_fakes<'a, I>(history: I) -> CoinSet
where
    I: IntoIterator<Item = &'a WeighRecord>,
{
    let mut suspects = CoinSet::all();
    for record in history {
        suspects = suspects
            .iter()
            .filter(|coin| is_consistent(*coin, record))
            .collect();
    }
    suspects
}

#[cfg(test)]
mod tests {
    use super::*;
    use fakecoin_types::Tilt;

    fn set(ids: &[u8]) -> CoinSet {
        ids.iter().map(|&id| CoinId::new(id).unwrap()).collect()
    }

    fn record(left: &[u8], right: &[u8], tilt: Tilt) -> WeighRecord {
        WeighRecord {
            left: set(left),
            right: set(right),
            tilt,
        }
    }

    #[test]
    fn test_no_history_everything_possible() {
        assert_eq!(possible_fakes(&[] as &[WeighRecord]), CoinSet::all());
    }

    #[test]
    fn test_balanced_clears_both_pans() {
        let history = [record(&[1, 2, 3], &[4, 5, 6], Tilt::Balanced)];
        assert_eq!(possible_fakes(&history), set(&[7, 8, 9]));
    }

    #[test]
    fn test_tilt_points_at_lighter_pan() {
        let history = [record(&[1, 2, 3], &[4, 5, 6], Tilt::LeftHeavy)];
        assert_eq!(possible_fakes(&history), set(&[4, 5, 6]));
    }

    #[test]
    fn test_two_weighs_narrow_to_one() {
        let history = [
            record(&[1, 2, 3], &[4, 5, 6], Tilt::RightHeavy),
            record(&[1], &[2], Tilt::Balanced),
        ];
        assert_eq!(possible_fakes(&history), set(&[3]));
    }

    #[test]
    fn test_contradictory_history_leaves_nothing() {
        let history = [
            record(&[1], &[2], Tilt::RightHeavy),
            record(&[1], &[2], Tilt::LeftHeavy),
        ];
        assert!(possible_fakes(&history).is_empty());
    }

    #[test]
    fn test_uneven_pans() {
        // 3 coins vs 1 tips left whichever coin is fake.
        let history = [record(&[1, 2, 3], &[4], Tilt::LeftHeavy)];
        assert_eq!(possible_fakes(&history), CoinSet::all());
        let history = [record(&[1, 2], &[4], Tilt::Balanced)];
        assert_eq!(possible_fakes(&history), set(&[1, 2]));
    }
}
