//! SA configuration and cooling schedules.

use std::time::Duration;

use super::types::Cooling;
use crate::budget::TimeBudget;
use crate::direction::Direction;
use crate::error::{MetaheurError, Result};

/// Built-in cooling schedules.
///
/// # References
///
/// - Geometric: standard textbook approach
/// - LundyMees: Lundy & Mees (1986), with convergence proof
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoolingSchedule {
    /// Geometric (exponential) cooling: `T_{k+1} = alpha * T_k`.
    ///
    /// Most widely used. Typical `alpha`: 0.95–0.999.
    Geometric {
        /// Cooling factor in (0, 1]. Higher = slower cooling.
        alpha: f64,
    },

    /// Lundy-Mees cooling: `T_{k+1} = T_k / (1 + beta * T_k)`.
    ///
    /// Cools fast at high T, slow at low T.
    LundyMees {
        /// Cooling parameter, positive.
        beta: f64,
    },

    /// Linear cooling: `T_{k+1} = max(T_k - step, floor)`.
    Linear {
        /// Amount subtracted per iteration.
        step: f64,
        /// Temperature never drops below this.
        floor: f64,
    },

    /// Temperature never changes.
    Constant,
}

impl Default for CoolingSchedule {
    fn default() -> Self {
        CoolingSchedule::Geometric { alpha: 0.999 }
    }
}

impl Cooling for CoolingSchedule {
    fn next_temperature(&self, temperature: f64, _iteration: usize) -> f64 {
        match *self {
            CoolingSchedule::Geometric { alpha } => temperature * alpha,
            CoolingSchedule::LundyMees { beta } => temperature / (1.0 + beta * temperature),
            CoolingSchedule::Linear { step, floor } => (temperature - step).max(floor),
            CoolingSchedule::Constant => temperature,
        }
    }
}

/// Configuration for the Simulated Annealing algorithm.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use anytime_metaheur::sa::{SaConfig, CoolingSchedule};
///
/// let config = SaConfig::default()
///     .with_initial_temperature(1e5)
///     .with_cooling(CoolingSchedule::Geometric { alpha: 0.999 })
///     .with_timeout(Duration::from_millis(200))
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaConfig {
    /// Initial temperature. Higher values allow more exploration.
    ///
    /// Zero turns SA into greedy descent.
    pub initial_temperature: f64,

    /// Cooling schedule used by [`SaRunner::run`](super::SaRunner::run).
    pub cooling: CoolingSchedule,

    /// Whether the quality is minimized or maximized.
    pub direction: Direction,

    /// Wall-clock budget. The only termination condition.
    pub timeout: Duration,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 100.0,
            cooling: CoolingSchedule::default(),
            direction: Direction::Minimize,
            timeout: Duration::from_secs(1),
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_cooling(mut self, cooling: CoolingSchedule) -> Self {
        self.cooling = cooling;
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
    pub fn validate(&self) -> Result<()> {
        if !self.initial_temperature.is_finite() || self.initial_temperature < 0.0 {
            return Err(MetaheurError::InvalidConfig(format!(
                "initial_temperature must be finite and non-negative, got {}",
                self.initial_temperature
            )));
        }
        match self.cooling {
            CoolingSchedule::Geometric { alpha } => {
                if !(alpha > 0.0 && alpha <= 1.0) {
                    return Err(MetaheurError::InvalidConfig(format!(
                        "geometric alpha must be in (0, 1], got {alpha}"
                    )));
                }
            }
            CoolingSchedule::LundyMees { beta } => {
                if !(beta > 0.0) {
                    return Err(MetaheurError::InvalidConfig(format!(
                        "lundy-mees beta must be positive, got {beta}"
                    )));
                }
            }
            CoolingSchedule::Linear { step, floor } => {
                if !(step >= 0.0) || !(floor >= 0.0) {
                    return Err(MetaheurError::InvalidConfig(format!(
                        "linear step and floor must be non-negative, got step={step}, floor={floor}"
                    )));
                }
            }
            CoolingSchedule::Constant => {}
        }
        Ok(())
    }
}
