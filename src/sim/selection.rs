//! Fitness-proportionate (roulette wheel) parent selection.
//!
//! Each individual is chosen with probability `p_i = w_i / Σw`, sampled
//! with replacement. Weights are the total fitness values with negative
//! entries clamped to zero, so an individual whose fitness is negative
//! (possible under the linear strategy) never reproduces.
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*, ch. 1
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use crate::error::{SimError, SimResult};
use rand::Rng;

/// Parent indices for the next generation.
///
/// Row `i` holds the `nparents` indices chosen for offspring slot `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentIndices {
    nparents: usize,
    indices: Vec<usize>,
}

impl ParentIndices {
    /// Number of offspring slots.
    pub fn len(&self) -> usize {
        if self.nparents == 0 {
            0
        } else {
            self.indices.len() / self.nparents
        }
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn nparents(&self) -> usize {
        self.nparents
    }

    /// Parents chosen for offspring slot `slot`.
    ///
    /// # Panics
    /// Panics if `slot` is out of bounds.
    pub fn parents(&self, slot: usize) -> &[usize] {
        let start = slot * self.nparents;
        &self.indices[start..start + self.nparents]
    }

    /// First parent of every slot, the whole lineage under clonal reproduction.
    pub fn first_parents(&self) -> Vec<usize> {
        self.indices
            .chunks_exact(self.nparents.max(1))
            .map(|chunk| chunk[0])
            .collect()
    }
}

/// Roulette wheel selector.
///
/// `nparents` is the number of parents drawn per offspring slot. Only `1`
/// (clonal reproduction) is consumed by the engine; larger values are
/// sampled the same way and left for a recombination step to combine.
///
/// # Examples
///
/// ```
/// use u_traitsim::sim::RouletteSelector;
///
/// let selector = RouletteSelector::default();
/// let p = selector.probabilities(&[1.0, 3.0]).unwrap();
/// assert_eq!(p, vec![0.25, 0.75]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouletteSelector {
    pub nparents: usize,
}

impl Default for RouletteSelector {
    fn default() -> Self {
        Self { nparents: 1 }
    }
}

impl RouletteSelector {
    pub fn new(nparents: usize) -> Self {
        Self { nparents }
    }

    /// Normalizes total fitness into a selection probability vector.
    ///
    /// Fails with [`SimError::InvalidFitness`] on a NaN or infinite value and
    /// with [`SimError::NoViableParents`] when no individual has positive
    /// fitness.
    pub fn probabilities(&self, total_fitness: &[f64]) -> SimResult<Vec<f64>> {
        let weights = clamped_weights(total_fitness)?;
        let total: f64 = weights.iter().sum();
        if total <= 0.0 || !total.is_finite() {
            return Err(SimError::NoViableParents { total });
        }
        Ok(weights.into_iter().map(|w| w / total).collect())
    }

    /// Draws `nparents` parent indices for each of the `total_fitness.len()`
    /// offspring slots.
    pub fn choose_parents<R: Rng>(
        &self,
        total_fitness: &[f64],
        rng: &mut R,
    ) -> SimResult<ParentIndices> {
        let n = total_fitness.len();
        let probs = self.probabilities(total_fitness)?;
        let cumulative = cumulative(&probs);

        let mut indices = Vec::with_capacity(n * self.nparents);
        for _ in 0..n * self.nparents {
            indices.push(spin(&cumulative, rng));
        }

        Ok(ParentIndices {
            nparents: self.nparents,
            indices,
        })
    }
}

/// Negative weights contribute no probability mass.
fn clamped_weights(total_fitness: &[f64]) -> SimResult<Vec<f64>> {
    total_fitness
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            if value.is_finite() {
                Ok(value.max(0.0))
            } else {
                Err(SimError::InvalidFitness { index, value })
            }
        })
        .collect()
}

fn cumulative(probs: &[f64]) -> Vec<f64> {
    let mut acc = 0.0;
    probs
        .iter()
        .map(|&p| {
            acc += p;
            acc
        })
        .collect()
}

/// Inverse-CDF sample over a cumulative distribution ending near 1.
fn spin<R: Rng>(cumulative: &[f64], rng: &mut R) -> usize {
    let last = cumulative.len() - 1;
    let threshold = rng.random_range(0.0..cumulative[last]);
    let idx = cumulative.partition_point(|&c| c <= threshold);
    // floating-point fallback
    idx.min(last)
}
