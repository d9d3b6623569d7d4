//! Tabu Search configuration.

use std::time::Duration;

use crate::budget::TimeBudget;
use crate::direction::Direction;

/// Configuration parameters for Tabu Search.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use anytime_metaheur::tabu::TabuConfig;
///
/// let config = TabuConfig::default()
///     .with_tabu_capacity(70)
///     .with_candidates_per_iteration(16)
///     .with_timeout(Duration::from_millis(500));
/// assert_eq!(config.tabu_capacity, 70);
/// assert_eq!(config.candidates_per_iteration, 16);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabuConfig {
    /// Maximum number of solutions remembered in the tabu list.
    pub tabu_capacity: usize,
    /// Extra candidates generated after the first one in every iteration.
    pub candidates_per_iteration: usize,
    /// Whether the quality is minimized or maximized.
    pub direction: Direction,
    /// Wall-clock budget.
    pub timeout: Duration,
    /// Random seed (None for OS entropy).
    pub seed: Option<u64>,
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self {
            tabu_capacity: 50,
            candidates_per_iteration: 10,
            direction: Direction::Minimize,
            timeout: Duration::from_secs(1),
            seed: None,
        }
    }
}

impl TabuConfig {
    /// Preset scaled to a problem of `n` elements (cities, rows).
    ///
    /// Capacity `10 n`, `n² / 3` candidates per iteration.
    pub fn scaled(n: usize) -> Self {
        Self {
            tabu_capacity: n.saturating_mul(10),
            candidates_per_iteration: n.saturating_mul(n) / 3,
            ..Self::default()
        }
    }

    /// Sets the tabu list capacity.
    pub fn with_tabu_capacity(mut self, capacity: usize) -> Self {
        self.tabu_capacity = capacity;
        self
    }

    /// Sets how many extra candidates are generated per iteration.
    pub fn with_candidates_per_iteration(mut self, n: usize) -> Self {
        self.candidates_per_iteration = n;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the budget in seconds; non-positive values give a zero budget.
    pub fn with_timeout_secs(mut self, secs: f64) -> Self {
        self.timeout = TimeBudget::limit_from_secs(secs);
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
