//! Local search configuration.

use std::time::Duration;

use crate::budget::TimeBudget;
use crate::direction::Direction;
use crate::error::{MetaheurError, Result};

/// How long each hill-climbing phase may run.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InnerBudget {
    /// Every climb gets the same duration.
    ///
    /// Setting it to the whole timeout gives plain hill climbing.
    Fixed(Duration),

    /// Every climb draws its duration uniformly from `[0, max)`.
    Random {
        /// Upper bound of the drawn duration.
        max: Duration,
    },
}

impl Default for InnerBudget {
    fn default() -> Self {
        InnerBudget::Fixed(Duration::from_millis(10))
    }
}

/// Where the next climb starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Perturbation {
    /// Iterated local search: `large_tweak(homebase)`.
    #[default]
    Homebase,

    /// Random-restart hill climbing: a fresh `initial_solution`.
    RandomRestart,
}

/// Configuration for the local search driver.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use anytime_metaheur::ls::{InnerBudget, LsConfig, Perturbation};
///
/// let ils = LsConfig::default().with_timeout(Duration::from_millis(500));
/// assert_eq!(ils.perturbation, Perturbation::Homebase);
///
/// let restarts = LsConfig::default()
///     .with_perturbation(Perturbation::RandomRestart)
///     .with_inner_budget(InnerBudget::Random { max: Duration::from_secs(1) });
/// assert!(restarts.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LsConfig {
    /// Duration of every inner hill-climbing phase.
    pub inner_budget: InnerBudget,
    /// Restart strategy between climbs.
    pub perturbation: Perturbation,
    /// Whether the quality is minimized or maximized.
    pub direction: Direction,
    /// Wall-clock budget for the whole run.
    pub timeout: Duration,
    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for LsConfig {
    fn default() -> Self {
        Self {
            inner_budget: InnerBudget::default(),
            perturbation: Perturbation::default(),
            direction: Direction::Minimize,
            timeout: Duration::from_secs(1),
            seed: None,
        }
    }
}

impl LsConfig {
    /// Plain hill climbing: a single climb spanning the whole budget.
    pub fn hill_climbing(timeout: Duration) -> Self {
        Self {
            inner_budget: InnerBudget::Fixed(timeout),
            timeout,
            ..Self::default()
        }
    }

    pub fn with_inner_budget(mut self, inner: InnerBudget) -> Self {
        self.inner_budget = inner;
        self
    }

    pub fn with_perturbation(mut self, perturbation: Perturbation) -> Self {
        self.perturbation = perturbation;
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

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// A zero inner budget would spin without ever climbing; it is only
    /// accepted together with a zero timeout.
    pub fn validate(&self) -> Result<()> {
        let inner = match self.inner_budget {
            InnerBudget::Fixed(d) => d,
            InnerBudget::Random { max } => max,
        };
        if inner.is_zero() && !self.timeout.is_zero() {
            return Err(MetaheurError::InvalidConfig(
                "inner budget must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LsConfig::default();
        assert_eq!(
            config.inner_budget,
            InnerBudget::Fixed(Duration::from_millis(10))
        );
        assert_eq!(config.perturbation, Perturbation::Homebase);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_hill_climbing_preset() {
        let config = LsConfig::hill_climbing(Duration::from_secs(2));
        assert_eq!(config.inner_budget, InnerBudget::Fixed(Duration::from_secs(2)));
        assert_eq!(config.timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_zero_inner_budget_rejected() {
        let config = LsConfig::default().with_inner_budget(InnerBudget::Fixed(Duration::ZERO));
        assert!(config.validate().is_err());
        let config = LsConfig::default().with_inner_budget(InnerBudget::Random {
            max: Duration::ZERO,
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_degenerate_hill_climbing_is_valid() {
        assert!(LsConfig::hill_climbing(Duration::ZERO).validate().is_ok());
    }
}
