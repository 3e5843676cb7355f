//! Gaussian point mutation.
//!
//! Every trait of every individual is independently selected for mutation
//! with probability `rate`; a selected entry receives additive noise drawn
//! from `N(mean, spread)`. Values are never clamped.
//!
//! Sampling is split into [`MutationConfig::draw`], which produces the
//! mask and noise for a given shape, and [`MutationDraw::apply`], which adds
//! them to a matrix. Tests inspect the draw to check the exact deltas.

use super::population::TraitMatrix;
use crate::error::{SimError, SimResult};
use rand::distr::{Bernoulli, Distribution};
use rand::Rng;
use rand_distr::Normal;

/// How the per-entry mutation decision is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MutationTrigger {
    /// Exact Bernoulli(`rate`) trial per entry.
    #[default]
    Bernoulli,

    /// `round(u + rate - 0.5)` with `u ~ U[0, 1)`.
    ///
    /// Approximates Bernoulli(`rate`): the flag fires when `u >= 1 - rate`
    /// (ties round away from zero). Kept to reproduce the historical noise
    /// law; prefer [`MutationTrigger::Bernoulli`].
    Rounding,
}

/// Mutation parameters.
///
/// # Defaults
///
/// ```
/// use u_traitsim::sim::MutationConfig;
///
/// let config = MutationConfig::default();
/// assert_eq!(config.rate, 0.02);
/// assert_eq!(config.mean, 0.0);
/// assert_eq!(config.spread, 2.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MutationConfig {
    /// Per-entry mutation probability (0.0–1.0).
    pub rate: f64,

    /// Mean of the additive noise.
    pub mean: f64,

    /// Standard deviation of the additive noise.
    pub spread: f64,

    /// Per-entry trigger law.
    pub trigger: MutationTrigger,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            rate: 0.02,
            mean: 0.0,
            spread: 2.0,
            trigger: MutationTrigger::Bernoulli,
        }
    }
}

/// Mask and noise sampled for one mutation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationDraw {
    shape: (usize, usize),
    mask: Vec<bool>,
    deltas: Vec<f64>,
}

impl MutationDraw {
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    /// Row-major flags; `true` where the entry mutates.
    pub fn mask(&self) -> &[bool] {
        &self.mask
    }

    /// Row-major noise values, sampled for every entry.
    pub fn deltas(&self) -> &[f64] {
        &self.deltas
    }

    /// Number of entries that mutate.
    pub fn mutated_count(&self) -> usize {
        self.mask.iter().filter(|&&m| m).count()
    }

    /// Adds the noise to `matrix` where the mask fires.
    ///
    /// # Panics
    /// Panics if `matrix` has a different shape than the draw.
    pub fn apply(&self, matrix: &mut TraitMatrix) {
        assert_eq!(matrix.shape(), self.shape, "draw shape must match matrix");
        for ((value, &fire), &delta) in matrix
            .as_mut_slice()
            .iter_mut()
            .zip(&self.mask)
            .zip(&self.deltas)
        {
            if fire {
                *value += delta;
            }
        }
    }
}

impl MutationConfig {
    /// Sets the mutation rate, clamped to `[0, 1]`.
    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the noise mean.
    pub fn with_mean(mut self, mean: f64) -> Self {
        self.mean = mean;
        self
    }

    /// Sets the noise standard deviation.
    pub fn with_spread(mut self, spread: f64) -> Self {
        self.spread = spread;
        self
    }

    /// Sets the trigger law.
    pub fn with_trigger(mut self, trigger: MutationTrigger) -> Self {
        self.trigger = trigger;
        self
    }

    /// Validates the parameters.
    pub fn validate(&self) -> SimResult<()> {
        if !(0.0..=1.0).contains(&self.rate) {
            return Err(SimError::InvalidConfig(format!(
                "mutation rate must be in [0, 1], got {}",
                self.rate
            )));
        }
        if !self.mean.is_finite() {
            return Err(SimError::InvalidConfig(
                "mutation mean must be finite".into(),
            ));
        }
        if !self.spread.is_finite() || self.spread < 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "mutation spread must be finite and non-negative, got {}",
                self.spread
            )));
        }
        Ok(())
    }

    /// Samples the mask and noise for a matrix of `shape`.
    pub fn draw<R: Rng>(&self, shape: (usize, usize), rng: &mut R) -> SimResult<MutationDraw> {
        let len = shape.0 * shape.1;
        let noise = Normal::new(self.mean, self.spread)
            .map_err(|e| SimError::InvalidConfig(format!("mutation noise: {e}")))?;

        let mask: Vec<bool> = match self.trigger {
            MutationTrigger::Bernoulli => {
                let coin = Bernoulli::new(self.rate)
                    .map_err(|e| SimError::InvalidConfig(format!("mutation rate: {e}")))?;
                (0..len).map(|_| coin.sample(rng)).collect()
            }
            MutationTrigger::Rounding => (0..len)
                .map(|_| (rng.random_range(0.0..1.0) + self.rate - 0.5).round() >= 1.0)
                .collect(),
        };
        let deltas: Vec<f64> = (0..len).map(|_| noise.sample(rng)).collect();

        Ok(MutationDraw {
            shape,
            mask,
            deltas,
        })
    }

    /// Mutates `matrix` in place and returns the number of mutated entries.
    ///
    /// A zero rate returns immediately without sampling.
    pub fn mutate<R: Rng>(&self, matrix: &mut TraitMatrix, rng: &mut R) -> SimResult<usize> {
        if self.rate == 0.0 {
            return Ok(0);
        }
        let draw = self.draw(matrix.shape(), rng)?;
        draw.apply(matrix);
        Ok(draw.mutated_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_zero_rate_is_noop() {
        let mut rng = create_rng(42);
        let mut m = TraitMatrix::filled(20, 5, 3.25);
        let before = m.clone();
        let config = MutationConfig::default().with_rate(0.0);
        assert_eq!(config.mutate(&mut m, &mut rng).unwrap(), 0);
        assert_eq!(m, before);

        // The legacy trigger never fires at rate 0 either
        let draw = config
            .with_trigger(MutationTrigger::Rounding)
            .draw((20, 5), &mut rng)
            .unwrap();
        assert_eq!(draw.mutated_count(), 0);
    }

    #[test]
    fn test_full_rate_shifts_every_entry_by_its_delta() {
        let mut rng = create_rng(42);
        let config = MutationConfig::default().with_rate(1.0).with_spread(1.5);
        let original = TraitMatrix::from_rows(&[vec![1.0, 2.0, 3.0], vec![-4.0, 0.0, 9.0]]).unwrap();

        let draw = config.draw(original.shape(), &mut rng).unwrap();
        assert!(draw.mask().iter().all(|&m| m));

        let mut mutated = original.clone();
        draw.apply(&mut mutated);
        for ((&after, &before), &delta) in mutated
            .as_slice()
            .iter()
            .zip(original.as_slice())
            .zip(draw.deltas())
        {
            assert_eq!(after, before + delta);
        }
    }

    #[test]
    fn test_seeded_mutate_matches_draw() {
        let config = MutationConfig::default().with_rate(1.0);
        let original = TraitMatrix::filled(4, 3, 10.0);

        let mut m = original.clone();
        config.mutate(&mut m, &mut create_rng(99)).unwrap();

        let draw = config.draw(original.shape(), &mut create_rng(99)).unwrap();
        let mut expected = original.clone();
        draw.apply(&mut expected);
        assert_eq!(m, expected);
    }

    #[test]
    fn test_unselected_entries_unchanged() {
        let mut rng = create_rng(3);
        let config = MutationConfig::default().with_rate(0.3);
        let original = TraitMatrix::filled(30, 4, 1.0);
        let draw = config.draw(original.shape(), &mut rng).unwrap();

        let mut m = original.clone();
        draw.apply(&mut m);
        for (i, (&after, &fire)) in m.as_slice().iter().zip(draw.mask()).enumerate() {
            if !fire {
                assert_eq!(after, 1.0, "entry {i} changed without mutation flag");
            }
        }
    }

    #[test]
    fn test_mutation_frequency_matches_rate() {
        let mut rng = create_rng(42);
        for trigger in [MutationTrigger::Bernoulli, MutationTrigger::Rounding] {
            let config = MutationConfig::default()
                .with_rate(0.2)
                .with_trigger(trigger);
            let draw = config.draw((200, 50), &mut rng).unwrap();
            let freq = draw.mutated_count() as f64 / 10_000.0;
            assert!(
                (freq - 0.2).abs() < 0.02,
                "{trigger:?}: expected ~0.2, got {freq}"
            );
        }
    }

    #[test]
    fn test_noise_distribution() {
        let mut rng = create_rng(42);
        let config = MutationConfig::default()
            .with_rate(1.0)
            .with_mean(5.0)
            .with_spread(2.0);
        let draw = config.draw((100, 100), &mut rng).unwrap();
        let n = draw.deltas().len() as f64;
        let mean = draw.deltas().iter().sum::<f64>() / n;
        let var = draw.deltas().iter().map(|d| (d - mean).powi(2)).sum::<f64>() / n;
        assert!((mean - 5.0).abs() < 0.1, "mean {mean}");
        assert!((var.sqrt() - 2.0).abs() < 0.1, "sd {}", var.sqrt());
    }

    #[test]
    fn test_validate() {
        assert!(MutationConfig::default().validate().is_ok());
        let mut bad = MutationConfig::default();
        bad.rate = 1.5;
        assert!(bad.validate().is_err());
        assert!(MutationConfig::default().with_spread(-1.0).validate().is_err());
        assert!(MutationConfig::default()
            .with_mean(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_rate_clamped() {
        assert_eq!(MutationConfig::default().with_rate(2.0).rate, 1.0);
        assert_eq!(MutationConfig::default().with_rate(-1.0).rate, 0.0);
    }
}
