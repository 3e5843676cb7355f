//! Simulation configuration.
//!
//! [`SimConfig`] holds all parameters that control the generational loop.

use super::fitness::FitnessStrategy;
use super::mutation::{MutationConfig, MutationTrigger};
use super::types::ReproductionMode;
use crate::error::{SimError, SimResult};

/// Configuration for a [`GenerationEngine`](super::GenerationEngine).
///
/// # Defaults
///
/// ```
/// use u_traitsim::sim::{FitnessStrategy, ReproductionMode, SimConfig};
///
/// let config = SimConfig::default();
/// assert_eq!(config.fitness, FitnessStrategy::gaussian(1.0));
/// assert_eq!(config.reproduction, ReproductionMode::Clonal);
/// assert!(config.record_history);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_traitsim::sim::{FitnessStrategy, ReproductionMode, SimConfig};
///
/// let config = SimConfig::default()
///     .with_fitness(FitnessStrategy::linear(0.1))
///     .with_reproduction(ReproductionMode::Exact)
///     .with_mutation_rate(0.05)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Strategy used to score each trait.
    pub fitness: FitnessStrategy,

    /// How the next generation is produced.
    pub reproduction: ReproductionMode,

    /// Mutation parameters applied every generation.
    pub mutation: MutationConfig,

    /// Parents drawn per offspring slot.
    ///
    /// Only 1 (clonal) is supported; recombination of several parents is
    /// not implemented.
    pub nparents: usize,

    /// Whether to snapshot the population after initialization and after
    /// every generation.
    pub record_history: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            fitness: FitnessStrategy::default(),
            reproduction: ReproductionMode::Clonal,
            mutation: MutationConfig::default(),
            nparents: 1,
            record_history: true,
            seed: None,
        }
    }
}

impl SimConfig {
    /// Sets the fitness strategy.
    pub fn with_fitness(mut self, fitness: FitnessStrategy) -> Self {
        self.fitness = fitness;
        self
    }

    /// Sets the reproduction mode.
    pub fn with_reproduction(mut self, mode: ReproductionMode) -> Self {
        self.reproduction = mode;
        self
    }

    /// Replaces all mutation parameters.
    pub fn with_mutation(mut self, mutation: MutationConfig) -> Self {
        self.mutation = mutation;
        self
    }

    /// Sets the mutation rate, clamped to `[0, 1]`.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation = self.mutation.with_rate(rate);
        self
    }

    /// Sets the mean and standard deviation of the mutation noise.
    pub fn with_mutation_noise(mut self, mean: f64, spread: f64) -> Self {
        self.mutation = self.mutation.with_mean(mean).with_spread(spread);
        self
    }

    /// Sets the mutation trigger law.
    pub fn with_mutation_trigger(mut self, trigger: MutationTrigger) -> Self {
        self.mutation = self.mutation.with_trigger(trigger);
        self
    }

    /// Enables or disables history recording.
    pub fn with_record_history(mut self, record: bool) -> Self {
        self.record_history = record;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Preset for neutral drift: uniform fitness, mutation-only reproduction.
    pub fn drift() -> Self {
        Self {
            fitness: FitnessStrategy::Uniform,
            reproduction: ReproductionMode::Exact,
            ..Self::default()
        }
    }

    /// Preset for stabilizing selection toward the targets: Gaussian
    /// fitness with clonal reproduction.
    pub fn selective() -> Self {
        Self {
            fitness: FitnessStrategy::default(),
            reproduction: ReproductionMode::Clonal,
            ..Self::default()
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> SimResult<()> {
        self.fitness.validate()?;
        self.mutation.validate()?;
        if self.nparents != 1 {
            return Err(SimError::InvalidConfig(format!(
                "nparents must be 1 (recombination is not supported), got {}",
                self.nparents
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimConfig::default();
        assert_eq!(config.fitness, FitnessStrategy::gaussian(1.0));
        assert_eq!(config.reproduction, ReproductionMode::Clonal);
        assert!((config.mutation.rate - 0.02).abs() < 1e-15);
        assert!((config.mutation.mean - 0.0).abs() < 1e-15);
        assert!((config.mutation.spread - 2.0).abs() < 1e-15);
        assert_eq!(config.mutation.trigger, MutationTrigger::Bernoulli);
        assert_eq!(config.nparents, 1);
        assert!(config.record_history);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = SimConfig::default()
            .with_fitness(FitnessStrategy::Identity)
            .with_reproduction(ReproductionMode::Exact)
            .with_mutation_rate(0.5)
            .with_mutation_noise(1.0, 0.25)
            .with_mutation_trigger(MutationTrigger::Rounding)
            .with_record_history(false)
            .with_seed(7);

        assert_eq!(config.fitness, FitnessStrategy::Identity);
        assert_eq!(config.reproduction, ReproductionMode::Exact);
        assert!((config.mutation.rate - 0.5).abs() < 1e-15);
        assert!((config.mutation.mean - 1.0).abs() < 1e-15);
        assert!((config.mutation.spread - 0.25).abs() < 1e-15);
        assert_eq!(config.mutation.trigger, MutationTrigger::Rounding);
        assert!(!config.record_history);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_clamp_rate() {
        let config = SimConfig::default().with_mutation_rate(3.0);
        assert!((config.mutation.rate - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_validate_ok() {
        assert!(SimConfig::default().validate().is_ok());
        assert!(SimConfig::drift().validate().is_ok());
        assert!(SimConfig::selective().validate().is_ok());
    }

    #[test]
    fn test_validate_bad_spread() {
        let config = SimConfig::default().with_fitness(FitnessStrategy::gaussian(0.0));
        assert!(matches!(config.validate(), Err(SimError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_bad_noise() {
        let config = SimConfig::default().with_mutation_noise(0.0, -2.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_nparents() {
        let config = SimConfig {
            nparents: 2,
            ..SimConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_presets() {
        let drift = SimConfig::drift();
        assert_eq!(drift.fitness, FitnessStrategy::Uniform);
        assert_eq!(drift.reproduction, ReproductionMode::Exact);

        let selective = SimConfig::selective().with_seed(1);
        assert_eq!(selective.reproduction, ReproductionMode::Clonal);
        assert_eq!(selective.seed, Some(1));
    }
}
