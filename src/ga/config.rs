//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use std::time::Duration;

use super::selection::Selection;
use crate::budget::TimeBudget;
use crate::direction::Direction;
use crate::error::{MetaheurError, Result};

/// How one generation replaces the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GaMode {
    /// Deduplicate, carry the elite over unchanged, breed the remainder
    /// from distinct parents, then keep the best `population_size` of the
    /// merged old and new generations.
    #[default]
    Elitist,

    /// Replace the whole population with freshly bred offspring. No
    /// elitism, no deduplication; parents may coincide.
    Generational,
}

/// Configuration for the Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use anytime_metaheur::ga::{GaConfig, GaMode};
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 10);
/// assert_eq!(config.elite_size, 4);
/// assert_eq!(config.mode, GaMode::Elitist);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use std::time::Duration;
/// use anytime_metaheur::ga::{GaConfig, Selection};
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_elite_size(20)
///     .with_selection(Selection::Tournament(5))
///     .with_timeout(Duration::from_secs(10))
///     .with_log_stagnation_window();
/// assert_eq!(config.stagnation_window, Some(Duration::from_secs_f64(10f64.ln())));
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Target number of individuals after every generation.
    pub population_size: usize,

    /// Number of best individuals carried over unchanged ([`GaMode::Elitist`]
    /// only). Equal to `population_size` disables breeding.
    pub elite_size: usize,

    /// Selection strategy for choosing parents.
    pub selection: Selection,

    /// Generation replacement scheme.
    pub mode: GaMode,

    /// Stop once the best fitness has not improved for this long.
    ///
    /// `None` disables stagnation-based termination.
    pub stagnation_window: Option<Duration>,

    /// Whether the fitness is minimized or maximized.
    pub direction: Direction,

    /// Wall-clock budget.
    pub timeout: Duration,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 10,
            elite_size: 4,
            selection: Selection::default(),
            mode: GaMode::default(),
            stagnation_window: None,
            direction: Direction::Minimize,
            timeout: Duration::from_secs(1),
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of elites.
    pub fn with_elite_size(mut self, n: usize) -> Self {
        self.elite_size = n;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Convenience builder for setting tournament size.
    ///
    /// Equivalent to `.with_selection(Selection::Tournament(k))`.
    pub fn with_tournament_size(self, k: usize) -> Self {
        self.with_selection(Selection::Tournament(k))
    }

    /// Sets the generation replacement scheme.
    pub fn with_mode(mut self, mode: GaMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the stagnation window.
    pub fn with_stagnation_window(mut self, window: Duration) -> Self {
        self.stagnation_window = Some(window);
        self
    }

    /// Sets the stagnation window to `ln(timeout in seconds)`, clamped at
    /// zero.
    ///
    /// Call after the timeout is set. A budget of one second or less gives
    /// a zero window: the run returns the best of the first generation.
    pub fn with_log_stagnation_window(mut self) -> Self {
        let secs = self.timeout.as_secs_f64().ln().max(0.0);
        self.stagnation_window = Some(Duration::from_secs_f64(secs));
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

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of children bred per generation.
    pub fn offspring_per_generation(&self) -> usize {
        match self.mode {
            GaMode::Elitist => self.population_size.saturating_sub(self.elite_size),
            GaMode::Generational => self.population_size,
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(MetaheurError::InvalidConfig(
                "population_size must be at least 1".into(),
            ));
        }
        if self.elite_size > self.population_size {
            return Err(MetaheurError::InvalidConfig(format!(
                "elite_size ({}) exceeds population_size ({})",
                self.elite_size, self.population_size
            )));
        }
        if self.selection == Selection::Tournament(0) {
            return Err(MetaheurError::InvalidConfig(
                "tournament size must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
