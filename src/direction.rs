//! Optimization direction.
//!
//! Every driver is configured with a fixed [`Direction`]. Drivers never
//! compare two qualities directly; they go through [`Direction::is_better`]
//! and [`Direction::is_at_least_as_good`], so minimization and maximization
//! share one code path.

use std::cmp::Ordering;

/// Whether lower or higher quality values are preferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Lower quality is better (cost, distance, error).
    #[default]
    Minimize,
    /// Higher quality is better (score, fitness).
    Maximize,
}

impl Direction {
    /// Returns `true` if `candidate` is strictly better than `reference`.
    ///
    /// NaN is never better than anything.
    pub fn is_better(self, candidate: f64, reference: f64) -> bool {
        match self {
            Direction::Minimize => candidate < reference,
            Direction::Maximize => candidate > reference,
        }
    }

    /// Returns `true` if `candidate` is better than or equal to `reference`.
    pub fn is_at_least_as_good(self, candidate: f64, reference: f64) -> bool {
        match self {
            Direction::Minimize => candidate <= reference,
            Direction::Maximize => candidate >= reference,
        }
    }

    /// Signed improvement of moving from `from` to `to`.
    ///
    /// Positive when `to` is better, negative when it is worse.
    pub fn gain(self, from: f64, to: f64) -> f64 {
        match self {
            Direction::Minimize => from - to,
            Direction::Maximize => to - from,
        }
    }

    /// The worst representable quality for this direction.
    pub fn worst(self) -> f64 {
        match self {
            Direction::Minimize => f64::INFINITY,
            Direction::Maximize => f64::NEG_INFINITY,
        }
    }

    /// Ordering that sorts better qualities first.
    pub fn best_first(self, a: f64, b: f64) -> Ordering {
        let ord = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
        match self {
            Direction::Minimize => ord,
            Direction::Maximize => ord.reverse(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_minimize() {
        let d = Direction::Minimize;
        assert!(d.is_better(1.0, 2.0));
        assert!(!d.is_better(2.0, 2.0));
        assert!(d.is_at_least_as_good(2.0, 2.0));
        assert_eq!(d.gain(5.0, 3.0), 2.0);
        assert_eq!(d.worst(), f64::INFINITY);
    }

    #[test]
    fn test_maximize() {
        let d = Direction::Maximize;
        assert!(d.is_better(3.0, 2.0));
        assert!(!d.is_better(1.0, 2.0));
        assert_eq!(d.gain(5.0, 3.0), -2.0);
        assert_eq!(d.worst(), f64::NEG_INFINITY);
    }

    #[test]
    fn test_best_first_sort() {
        let mut v = vec![3.0, 1.0, 2.0];
        v.sort_by(|a, b| Direction::Maximize.best_first(*a, *b));
        assert_eq!(v, vec![3.0, 2.0, 1.0]);
        v.sort_by(|a, b| Direction::Minimize.best_first(*a, *b));
        assert_eq!(v, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_nan_never_better() {
        for d in [Direction::Minimize, Direction::Maximize] {
            assert!(!d.is_better(f64::NAN, 0.0));
            assert!(!d.is_at_least_as_good(f64::NAN, 0.0));
        }
    }

    proptest! {
        #[test]
        fn prop_gain_sign_matches_is_better(a in -1e6f64..1e6, b in -1e6f64..1e6) {
            for d in [Direction::Minimize, Direction::Maximize] {
                prop_assert_eq!(d.is_better(b, a), d.gain(a, b) > 0.0);
            }
        }
    }
}
