//! Population storage and initialization.
//!
//! [`TraitMatrix`] is the dense `individuals × traits` buffer that every
//! other component reads. [`PopulationState`] owns the live matrix and the
//! per-trait target vector.

use crate::error::{SimError, SimResult};
use rand::Rng;
use std::str::FromStr;

/// Dense row-major matrix of trait values.
///
/// Row `i` holds the traits of individual `i`. The shape is fixed at
/// construction; no method changes it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraitMatrix {
    n_individuals: usize,
    n_traits: usize,
    values: Vec<f64>,
}

impl TraitMatrix {
    /// Creates a matrix filled with zeros.
    pub fn zeros(n_individuals: usize, n_traits: usize) -> Self {
        Self::filled(n_individuals, n_traits, 0.0)
    }

    /// Creates a matrix with every entry set to `value`.
    pub fn filled(n_individuals: usize, n_traits: usize, value: f64) -> Self {
        Self {
            n_individuals,
            n_traits,
            values: vec![value; n_individuals * n_traits],
        }
    }

    /// Builds a matrix from a list of rows.
    ///
    /// All rows must have the same length.
    pub fn from_rows(rows: &[Vec<f64>]) -> SimResult<Self> {
        let n_individuals = rows.len();
        let n_traits = rows.first().map_or(0, Vec::len);
        let mut values = Vec::with_capacity(n_individuals * n_traits);
        for row in rows {
            if row.len() != n_traits {
                return Err(SimError::MatrixShape {
                    expected: (n_individuals, n_traits),
                    actual: (n_individuals, row.len()),
                });
            }
            values.extend_from_slice(row);
        }
        Ok(Self {
            n_individuals,
            n_traits,
            values,
        })
    }

    /// Returns `(n_individuals, n_traits)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.n_individuals, self.n_traits)
    }

    pub fn n_individuals(&self) -> usize {
        self.n_individuals
    }

    pub fn n_traits(&self) -> usize {
        self.n_traits
    }

    /// Returns the value of `trait_idx` for individual `individual`.
    ///
    /// # Panics
    /// Panics if either index is out of bounds.
    pub fn get(&self, individual: usize, trait_idx: usize) -> f64 {
        assert!(trait_idx < self.n_traits, "trait index out of bounds");
        self.values[individual * self.n_traits + trait_idx]
    }

    /// Sets the value of `trait_idx` for individual `individual`.
    ///
    /// # Panics
    /// Panics if either index is out of bounds.
    pub fn set(&mut self, individual: usize, trait_idx: usize, value: f64) {
        assert!(trait_idx < self.n_traits, "trait index out of bounds");
        self.values[individual * self.n_traits + trait_idx] = value;
    }

    /// Returns the traits of one individual.
    ///
    /// # Panics
    /// Panics if `individual` is out of bounds.
    pub fn row(&self, individual: usize) -> &[f64] {
        let start = individual * self.n_traits;
        &self.values[start..start + self.n_traits]
    }

    /// Iterates over individuals.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact(0) panics, and a zero-trait matrix has no values anyway
        self.values.chunks_exact(self.n_traits.max(1))
    }

    /// Row-major view of all values.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.values
    }

    /// Maximum over every entry of the matrix, or `None` when empty.
    pub fn max_value(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::max)
    }

    /// Mean of every trait across individuals.
    pub fn column_means(&self) -> Vec<f64> {
        let mut sums = vec![0.0; self.n_traits];
        for row in self.rows() {
            for (sum, &v) in sums.iter_mut().zip(row) {
                *sum += v;
            }
        }
        if self.n_individuals > 0 {
            let n = self.n_individuals as f64;
            sums.iter_mut().for_each(|s| *s /= n);
        }
        sums
    }

    /// Sum of each row.
    pub fn row_sums(&self) -> Vec<f64> {
        if self.n_traits == 0 {
            return vec![0.0; self.n_individuals];
        }
        self.rows().map(|row| row.iter().sum()).collect()
    }

    /// Builds a new matrix whose row `i` is row `indices[i]` of `self`.
    ///
    /// # Panics
    /// Panics if any index is out of bounds.
    pub fn gather_rows(&self, indices: &[usize]) -> Self {
        let mut values = Vec::with_capacity(indices.len() * self.n_traits);
        for &idx in indices {
            values.extend_from_slice(self.row(idx));
        }
        Self {
            n_individuals: indices.len(),
            n_traits: self.n_traits,
            values,
        }
    }
}

/// How the population matrix is filled on initialization.
#[derive(Debug, Clone, PartialEq)]
pub enum InitMode {
    /// Every entry drawn uniformly from `[0, 1)`.
    Random,
    /// Every entry set to the same value.
    Constant(f64),
    /// A caller-supplied matrix of exactly the population shape.
    Explicit(TraitMatrix),
}

impl FromStr for InitMode {
    type Err = SimError;

    /// Parses `"random"` or a finite number (constant initialization).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("random") {
            return Ok(InitMode::Random);
        }
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(InitMode::Constant(value)),
            _ => Err(SimError::UnknownInitMode(s.to_string())),
        }
    }
}

/// The live population and its per-trait fitness targets.
#[derive(Debug, Clone)]
pub struct PopulationState {
    matrix: TraitMatrix,
    targets: Vec<f64>,
}

impl PopulationState {
    /// Creates a zero-valued population with zero targets.
    pub fn new(n_individuals: usize, n_traits: usize) -> Self {
        Self {
            matrix: TraitMatrix::zeros(n_individuals, n_traits),
            targets: vec![0.0; n_traits],
        }
    }

    pub fn matrix(&self) -> &TraitMatrix {
        &self.matrix
    }

    pub fn targets(&self) -> &[f64] {
        &self.targets
    }

    pub fn shape(&self) -> (usize, usize) {
        self.matrix.shape()
    }

    /// Fills the population according to `mode`.
    ///
    /// A non-finite constant, or an explicit matrix of the wrong shape or
    /// holding a non-finite value, is rejected and the current values are
    /// kept.
    pub fn initialize<R: Rng>(&mut self, mode: InitMode, rng: &mut R) -> SimResult<()> {
        let (n, t) = self.shape();
        match mode {
            InitMode::Random => {
                self.matrix
                    .as_mut_slice()
                    .iter_mut()
                    .for_each(|v| *v = rng.random_range(0.0..1.0));
            }
            InitMode::Constant(value) => {
                if !value.is_finite() {
                    return Err(SimError::InvalidConfig(format!(
                        "initial trait value must be finite, got {value}"
                    )));
                }
                self.matrix = TraitMatrix::filled(n, t, value);
            }
            InitMode::Explicit(matrix) => {
                if matrix.shape() != (n, t) {
                    return Err(SimError::MatrixShape {
                        expected: (n, t),
                        actual: matrix.shape(),
                    });
                }
                if let Some(pos) = matrix.as_slice().iter().position(|v| !v.is_finite()) {
                    return Err(SimError::InvalidConfig(format!(
                        "initial trait value at ({}, {}) is not finite",
                        pos / t,
                        pos % t
                    )));
                }
                self.matrix = matrix;
            }
        }
        Ok(())
    }

    /// Replaces the target vector.
    ///
    /// Rejected unless `targets.len()` equals the number of traits; the
    /// previous targets are kept on rejection.
    pub fn set_targets(&mut self, targets: &[f64]) -> SimResult<()> {
        if targets.len() != self.targets.len() {
            return Err(SimError::TargetLength {
                expected: self.targets.len(),
                actual: targets.len(),
            });
        }
        self.targets.copy_from_slice(targets);
        Ok(())
    }

    /// Replaces the matrix with a same-shaped one.
    pub(crate) fn replace(&mut self, matrix: TraitMatrix) {
        debug_assert_eq!(matrix.shape(), self.matrix.shape());
        self.matrix = matrix;
    }
}
