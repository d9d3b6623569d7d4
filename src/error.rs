//! Error types shared by every driver.

use thiserror::Error;

/// Errors raised by the search drivers and the problem parsers.
///
/// Drivers never fail on a degenerate time budget or on a stalled tabu
/// iteration; those are ordinary outcomes. Errors are reserved for
/// configurations that cannot run at all and for malformed instances.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MetaheurError {
    /// A configuration parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Breeding needs two distinct parents but the population has fewer.
    #[error("population too small: {distinct} distinct individual(s), need at least 2")]
    PopulationTooSmall {
        /// Number of structurally distinct individuals available.
        distinct: usize,
    },

    /// A problem instance could not be parsed.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result alias for driver operations.
pub type Result<T> = std::result::Result<T, MetaheurError>;
