//! Error taxonomy for the simulation.
//!
//! Every variant describes a recoverable, locally detected condition.
//! An operation that returns one of these errors has left the population,
//! targets, configuration and history exactly as they were before the call.

use thiserror::Error;

/// Errors reported by the simulation engine and its components.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// A target vector does not have one entry per trait.
    #[error("target vector has length {actual}, expected {expected}")]
    TargetLength { expected: usize, actual: usize },

    /// An explicit matrix does not match the population shape.
    #[error("matrix has shape {actual:?}, expected {expected:?}")]
    MatrixShape {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// An initialization mode name was not recognized.
    #[error("unknown initialization mode '{0}'")]
    UnknownInitMode(String),

    /// A reproduction mode name was not recognized.
    #[error("unknown reproduction mode '{0}'")]
    UnknownReproductionMode(String),

    /// A fitness strategy name was not recognized.
    #[error("unknown fitness strategy '{0}'")]
    UnknownFitnessStrategy(String),

    /// Total fitness carries no positive probability mass.
    #[error("no viable parents: total fitness sums to {total}")]
    NoViableParents { total: f64 },

    /// A fitness value is NaN or infinite.
    #[error("fitness of individual {index} is not finite ({value})")]
    InvalidFitness { index: usize, value: f64 },

    /// A trait index beyond the number of traits was requested.
    #[error("trait {trait_index} out of range for {n_traits} traits")]
    TraitOutOfRange { trait_index: usize, n_traits: usize },

    /// A plot grid cannot hold every trait.
    #[error("grid {rows}x{cols} cannot hold {n_traits} traits")]
    GridTooSmall {
        rows: usize,
        cols: usize,
        n_traits: usize,
    },

    /// `run` was asked for zero generations.
    #[error("generation count must be positive")]
    InvalidGenerationCount,

    /// A configuration parameter is out of its valid range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias used throughout the crate.
pub type SimResult<T> = Result<T, SimError>;
