//! Wall-clock time budget shared by all drivers.
//!
//! A [`TimeBudget`] captures its start instant on construction and never
//! changes afterwards. Drivers poll [`TimeBudget::expired`] before every unit
//! of work, so a run overshoots its budget by at most one iteration.

use std::time::{Duration, Instant};

/// An immutable deadline: start instant plus a limit.
#[derive(Debug, Clone, Copy)]
pub struct TimeBudget {
    start: Instant,
    limit: Duration,
}

impl TimeBudget {
    /// Starts a budget of `limit` from now.
    pub fn start(limit: Duration) -> Self {
        Self {
            start: Instant::now(),
            limit,
        }
    }

    /// Converts seconds to a budget limit.
    ///
    /// Zero, negative, NaN and overflowing values collapse to a zero limit,
    /// which makes the budget expired from the start.
    pub fn limit_from_secs(secs: f64) -> Duration {
        if secs.is_nan() || secs <= 0.0 {
            return Duration::ZERO;
        }
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
    }

    /// Whether this budget allows no work at all.
    pub fn is_degenerate(&self) -> bool {
        self.limit.is_zero()
    }

    /// Time since the budget started.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// The configured limit.
    pub fn limit(&self) -> Duration {
        self.limit
    }

    /// Time left before the deadline (zero once expired).
    pub fn remaining(&self) -> Duration {
        self.limit.saturating_sub(self.elapsed())
    }

    /// Whether the deadline has been reached.
    pub fn expired(&self) -> bool {
        self.elapsed() >= self.limit
    }

    /// A nested budget of `limit` starting now, clipped to this deadline.
    pub fn sub_budget(&self, limit: Duration) -> Self {
        Self::start(limit.min(self.remaining()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_budget_is_expired() {
        let budget = TimeBudget::start(Duration::ZERO);
        assert!(budget.is_degenerate());
        assert!(budget.expired());
        assert_eq!(budget.remaining(), Duration::ZERO);
    }

    #[test]
    fn test_limit_from_secs() {
        assert_eq!(TimeBudget::limit_from_secs(-1.0), Duration::ZERO);
        assert_eq!(TimeBudget::limit_from_secs(0.0), Duration::ZERO);
        assert_eq!(TimeBudget::limit_from_secs(f64::NAN), Duration::ZERO);
        assert_eq!(
            TimeBudget::limit_from_secs(0.25),
            Duration::from_millis(250)
        );
        assert_eq!(TimeBudget::limit_from_secs(f64::INFINITY), Duration::MAX);
    }

    #[test]
    fn test_expires_after_limit() {
        let budget = TimeBudget::start(Duration::from_millis(20));
        assert!(!budget.expired());
        std::thread::sleep(Duration::from_millis(25));
        assert!(budget.expired());
    }

    #[test]
    fn test_sub_budget_clipped_to_parent() {
        let parent = TimeBudget::start(Duration::from_millis(5));
        let child = parent.sub_budget(Duration::from_secs(60));
        assert!(child.limit() <= Duration::from_millis(5));

        let child = parent.sub_budget(Duration::from_millis(1));
        assert!(child.limit() <= Duration::from_millis(1));
    }
}
