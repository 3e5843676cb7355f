//! Fitness strategies.
//!
//! A [`FitnessStrategy`] maps the population matrix and the target vector
//! to a per-individual, per-trait fitness matrix of the same shape. Row
//! sums of that matrix give the total fitness used for selection.
//!
//! Fitness is **maximized**: larger values mean more reproductive success.

use super::population::TraitMatrix;
use crate::error::{SimError, SimResult};
use std::f64::consts::PI;
use std::str::FromStr;

/// Default spread of the Gaussian strategy.
pub const DEFAULT_GAUSSIAN_SPREAD: f64 = 1.0;

/// Default slope of the linear strategy.
pub const DEFAULT_LINEAR_SPREAD: f64 = 0.1;

/// Closed set of fitness strategies.
///
/// # Examples
///
/// ```
/// use u_traitsim::sim::FitnessStrategy;
///
/// let gaussian = FitnessStrategy::gaussian(1.0);
/// assert!((gaussian.peak().unwrap() - 0.398_942_28).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FitnessStrategy {
    /// Normal probability density centered on the target.
    ///
    /// `f = exp(-((x - target) / spread)² / 2) / (spread · √(2π))`
    Gaussian { spread: f64 },

    /// Linear decay away from the target, offset by the population maximum.
    ///
    /// `f = |spread · max(P)| - |spread · (target - x)|`, where `max(P)` is
    /// the maximum over the whole matrix. Values can be negative for
    /// individuals far from the target.
    Linear { spread: f64 },

    /// Every trait scores 1: no selection pressure.
    Uniform,

    /// Fitness equals the raw trait value. Only useful for debugging.
    Identity,
}

impl Default for FitnessStrategy {
    fn default() -> Self {
        FitnessStrategy::Gaussian {
            spread: DEFAULT_GAUSSIAN_SPREAD,
        }
    }
}

impl FitnessStrategy {
    pub fn gaussian(spread: f64) -> Self {
        FitnessStrategy::Gaussian { spread }
    }

    pub fn linear(spread: f64) -> Self {
        FitnessStrategy::Linear { spread }
    }

    /// Short lowercase name of the strategy.
    pub fn name(&self) -> &'static str {
        match self {
            FitnessStrategy::Gaussian { .. } => "gaussian",
            FitnessStrategy::Linear { .. } => "linear",
            FitnessStrategy::Uniform => "uniform",
            FitnessStrategy::Identity => "identity",
        }
    }

    /// Maximum per-trait fitness of the Gaussian strategy, `None` otherwise.
    pub fn peak(&self) -> Option<f64> {
        match *self {
            FitnessStrategy::Gaussian { spread } => Some(gaussian_pdf(0.0, 0.0, spread)),
            _ => None,
        }
    }

    /// Checks the strategy parameters.
    pub fn validate(&self) -> SimResult<()> {
        match *self {
            FitnessStrategy::Gaussian { spread } | FitnessStrategy::Linear { spread } => {
                if !spread.is_finite() || spread <= 0.0 {
                    return Err(SimError::InvalidConfig(format!(
                        "{} fitness spread must be finite and positive, got {spread}",
                        self.name()
                    )));
                }
                Ok(())
            }
            FitnessStrategy::Uniform | FitnessStrategy::Identity => Ok(()),
        }
    }

    /// Computes the per-trait fitness matrix.
    ///
    /// # Panics
    /// Panics if `targets.len()` differs from the number of traits.
    pub fn evaluate(&self, population: &TraitMatrix, targets: &[f64]) -> TraitMatrix {
        let (n, t) = population.shape();
        assert_eq!(targets.len(), t, "one target per trait required");

        let mut out = TraitMatrix::zeros(n, t);
        let values = population.as_slice();
        let scores = out.as_mut_slice();

        match *self {
            FitnessStrategy::Gaussian { spread } => {
                for (i, (score, &x)) in scores.iter_mut().zip(values).enumerate() {
                    *score = gaussian_pdf(x, targets[i % t], spread);
                }
            }
            FitnessStrategy::Linear { spread } => {
                let offset = (spread * population.max_value().unwrap_or(0.0)).abs();
                for (i, (score, &x)) in scores.iter_mut().zip(values).enumerate() {
                    *score = offset - (spread * (targets[i % t] - x)).abs();
                }
            }
            FitnessStrategy::Uniform => scores.fill(1.0),
            FitnessStrategy::Identity => scores.copy_from_slice(values),
        }

        out
    }

    /// Computes the per-trait fitness matrix and its per-individual totals.
    pub fn evaluate_total(&self, population: &TraitMatrix, targets: &[f64]) -> FitnessEvaluation {
        let trait_fitness = self.evaluate(population, targets);
        let total = trait_fitness.row_sums();
        FitnessEvaluation {
            trait_fitness,
            total,
        }
    }
}

impl FromStr for FitnessStrategy {
    type Err = SimError;

    /// Parses a strategy name, using the default spread where one applies.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gaussian" | "gaus" => Ok(FitnessStrategy::gaussian(DEFAULT_GAUSSIAN_SPREAD)),
            "linear" | "lin" => Ok(FitnessStrategy::linear(DEFAULT_LINEAR_SPREAD)),
            "uniform" | "equal" => Ok(FitnessStrategy::Uniform),
            "identity" | "direct" => Ok(FitnessStrategy::Identity),
            _ => Err(SimError::UnknownFitnessStrategy(s.to_string())),
        }
    }
}

/// Normal density with mean `mean` and standard deviation `spread` at `x`.
fn gaussian_pdf(x: f64, mean: f64, spread: f64) -> f64 {
    let z = (x - mean) / spread;
    (-0.5 * z * z).exp() / (spread * (2.0 * PI).sqrt())
}

/// Fitness of one generation.
#[derive(Debug, Clone, PartialEq)]
pub struct FitnessEvaluation {
    /// Per-individual, per-trait scores.
    pub trait_fitness: TraitMatrix,
    /// Row sums of `trait_fitness`, one per individual.
    pub total: Vec<f64>,
}

impl FitnessEvaluation {
    /// Highest total fitness, or `None` for an empty population.
    pub fn max(&self) -> Option<f64> {
        self.total.iter().copied().reduce(f64::max)
    }

    /// Mean total fitness, or `None` for an empty population.
    pub fn mean(&self) -> Option<f64> {
        if self.total.is_empty() {
            return None;
        }
        Some(self.total.iter().sum::<f64>() / self.total.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: &[Vec<f64>]) -> TraitMatrix {
        TraitMatrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_gaussian_peak_at_target() {
        for spread in [0.5, 1.0, 2.0, 3.7] {
            let strategy = FitnessStrategy::gaussian(spread);
            let pop = matrix(&[vec![10.0, -4.0]]);
            let f = strategy.evaluate(&pop, &[10.0, -4.0]);
            let expected = 1.0 / (spread * (2.0 * PI).sqrt());
            assert!((f.get(0, 0) - expected).abs() < 1e-12);
            assert!((f.get(0, 1) - expected).abs() < 1e-12);
            assert!((strategy.peak().unwrap() - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_gaussian_symmetric_and_decaying() {
        let strategy = FitnessStrategy::gaussian(1.0);
        let pop = matrix(&[vec![4.0], vec![6.0], vec![8.0]]);
        let f = strategy.evaluate(&pop, &[5.0]);
        assert!((f.get(0, 0) - f.get(1, 0)).abs() < 1e-12);
        assert!(f.get(2, 0) < f.get(1, 0));
        assert!(f.as_slice().iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn test_linear_uses_global_max() {
        let strategy = FitnessStrategy::linear(0.5);
        let pop = matrix(&[vec![2.0, 10.0], vec![4.0, 0.0]]);
        let f = strategy.evaluate(&pop, &[2.0, 10.0]);
        // offset = |0.5 * 10| = 5
        assert!((f.get(0, 0) - 5.0).abs() < 1e-12);
        assert!((f.get(0, 1) - 5.0).abs() < 1e-12);
        assert!((f.get(1, 0) - 4.0).abs() < 1e-12);
        assert!((f.get(1, 1) - 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_linear_can_be_negative() {
        let strategy = FitnessStrategy::linear(1.0);
        let pop = matrix(&[vec![1.0], vec![-20.0]]);
        let f = strategy.evaluate(&pop, &[1.0]);
        // offset = 1, distance 21
        assert!((f.get(1, 0) - (1.0 - 21.0)).abs() < 1e-12);
    }

    #[test]
    fn test_uniform_and_identity() {
        let pop = matrix(&[vec![3.0, -1.0], vec![0.5, 2.0]]);
        let targets = [0.0, 0.0];

        let f = FitnessStrategy::Uniform.evaluate(&pop, &targets);
        assert!(f.as_slice().iter().all(|&v| v == 1.0));

        let f = FitnessStrategy::Identity.evaluate(&pop, &targets);
        assert_eq!(f, pop);
    }

    #[test]
    fn test_total_fitness_reductions() {
        let pop = matrix(&[vec![1.0, 2.0], vec![3.0, 4.0], vec![0.0, 0.0]]);
        let eval = FitnessStrategy::Identity.evaluate_total(&pop, &[0.0, 0.0]);
        assert_eq!(eval.total, vec![3.0, 7.0, 0.0]);
        assert_eq!(eval.max(), Some(7.0));
        assert!((eval.mean().unwrap() - 10.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_validate_spread() {
        assert!(FitnessStrategy::gaussian(1.0).validate().is_ok());
        assert!(FitnessStrategy::gaussian(0.0).validate().is_err());
        assert!(FitnessStrategy::linear(-0.1).validate().is_err());
        assert!(FitnessStrategy::gaussian(f64::NAN).validate().is_err());
        assert!(FitnessStrategy::Uniform.validate().is_ok());
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            "gaussian".parse::<FitnessStrategy>().unwrap(),
            FitnessStrategy::gaussian(1.0)
        );
        assert_eq!(
            "Linear".parse::<FitnessStrategy>().unwrap(),
            FitnessStrategy::linear(0.1)
        );
        assert_eq!(
            "uniform".parse::<FitnessStrategy>().unwrap(),
            FitnessStrategy::Uniform
        );
        assert!(matches!(
            "pareto".parse::<FitnessStrategy>(),
            Err(SimError::UnknownFitnessStrategy(_))
        ));
    }

    #[test]
    #[should_panic(expected = "one target per trait required")]
    fn test_target_length_mismatch_panics() {
        let pop = matrix(&[vec![1.0, 2.0]]);
        FitnessStrategy::Uniform.evaluate(&pop, &[1.0]);
    }
}
