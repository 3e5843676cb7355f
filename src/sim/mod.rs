//! Continuous-trait population simulation.
//!
//! A population of `N` individuals with `T` real-valued traits evolves
//! toward per-trait targets under repeated fitness evaluation,
//! fitness-proportionate selection and Gaussian mutation.
//!
//! # Key Types
//!
//! - [`GenerationEngine`]: Owns the population and executes generations
//! - [`SimConfig`]: Fitness strategy, reproduction mode, mutation, recording, seed
//! - [`FitnessStrategy`]: Gaussian, linear, uniform and identity scoring
//! - [`RouletteSelector`]: Fitness-proportionate parent sampling
//! - [`MutationConfig`]: Per-entry Gaussian point mutation
//! - [`History`]: Append-only snapshots with trait-major views for plotting
//!
//! # Generation step
//!
//! | Mode | Evaluate | Select | Mutate | Snapshot |
//! |---|---|---|---|---|
//! | [`ReproductionMode::Clonal`] | yes | one parent per slot | yes | if recording |
//! | [`ReproductionMode::Exact`] | no | no | yes | if recording |
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Falconer & Mackay (1996), *Introduction to Quantitative Genetics*, ch. 20
//!   (stabilizing selection on metric traits)

mod config;
mod fitness;
mod history;
mod mutation;
mod population;
mod runner;
mod selection;
mod types;

pub use config::SimConfig;
pub use fitness::{
    FitnessEvaluation, FitnessStrategy, DEFAULT_GAUSSIAN_SPREAD, DEFAULT_LINEAR_SPREAD,
};
pub use history::{History, Snapshot};
pub use mutation::{MutationConfig, MutationDraw, MutationTrigger};
pub use population::{InitMode, PopulationState, TraitMatrix};
pub use runner::{GenerationEngine, GenerationStats, RunSummary};
pub use selection::{ParentIndices, RouletteSelector};
pub use types::{EngineState, ReproductionMode};
