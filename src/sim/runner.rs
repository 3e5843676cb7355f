//! Generational loop execution.
//!
//! [`GenerationEngine`] owns the population, the RNG and the history, and
//! orchestrates each step:
//! evaluation → selection → replacement → mutation → snapshot.

use super::config::SimConfig;
use super::fitness::{FitnessEvaluation, FitnessStrategy};
use super::history::History;
use super::mutation::MutationConfig;
use super::population::{InitMode, PopulationState, TraitMatrix};
use super::selection::RouletteSelector;
use super::types::{EngineState, ReproductionMode};
use crate::error::{SimError, SimResult};
use crate::random::{rng_from_option, SimRng};
use tracing::{debug, info, warn};

/// Statistics of one completed generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationStats {
    /// Index of the generation produced by the step (1-based).
    pub generation: usize,

    /// Highest total fitness of the parent population.
    ///
    /// `None` in exact mode, which skips fitness evaluation.
    pub max_fitness: Option<f64>,

    /// Mean total fitness of the parent population.
    ///
    /// `None` in exact mode, which skips fitness evaluation.
    pub mean_fitness: Option<f64>,

    /// Number of trait entries mutated during the step.
    pub mutations: usize,
}

/// Result of [`GenerationEngine::run`].
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Number of generations executed by this call.
    pub generations: usize,

    /// Per-generation statistics, in order.
    pub stats: Vec<GenerationStats>,

    /// Mean total fitness of the final population under the configured strategy.
    pub final_mean_fitness: Option<f64>,

    /// Highest total fitness of the final population.
    pub final_max_fitness: Option<f64>,
}

/// Executes the simulation.
///
/// # Usage
///
/// ```
/// use u_traitsim::sim::{GenerationEngine, InitMode, SimConfig};
///
/// let config = SimConfig::default().with_seed(42);
/// let mut engine = GenerationEngine::new(100, 4, config).unwrap();
/// engine.initialize(InitMode::Constant(15.0)).unwrap();
/// engine.set_targets(&[10.0, 20.0, 15.0, 25.0]).unwrap();
/// let summary = engine.run(10).unwrap();
///
/// assert_eq!(summary.generations, 10);
/// assert_eq!(engine.history().len(), 11);
/// ```
#[derive(Debug)]
pub struct GenerationEngine {
    config: SimConfig,
    population: PopulationState,
    selector: RouletteSelector,
    history: History,
    rng: SimRng,
    state: EngineState,
    generation: usize,
}

impl GenerationEngine {
    /// Creates an engine with a zero-valued `n_individuals × n_traits`
    /// population.
    pub fn new(n_individuals: usize, n_traits: usize, config: SimConfig) -> SimResult<Self> {
        if n_individuals == 0 || n_traits == 0 {
            return Err(SimError::InvalidConfig(format!(
                "population must have at least one individual and one trait, got {n_individuals}x{n_traits}"
            )));
        }
        config.validate()?;

        Ok(Self {
            population: PopulationState::new(n_individuals, n_traits),
            selector: RouletteSelector::new(config.nparents),
            history: History::new(config.record_history),
            rng: rng_from_option(config.seed),
            state: EngineState::Idle,
            generation: 0,
            config,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn population(&self) -> &TraitMatrix {
        self.population.matrix()
    }

    pub fn targets(&self) -> &[f64] {
        self.population.targets()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Number of generations stepped so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Fills the population and snapshots it.
    ///
    /// A rejected mode leaves the population and history untouched.
    pub fn initialize(&mut self, mode: InitMode) -> SimResult<()> {
        if let Err(e) = self.population.initialize(mode, &mut self.rng) {
            warn!(error = %e, "population initialization rejected");
            return Err(e);
        }
        self.history.record(self.population.matrix(), self.generation)?;
        self.state = EngineState::Initialized;
        debug!(shape = ?self.population.shape(), "population initialized");
        Ok(())
    }

    /// Parses `mode` (`"random"` or a number) and initializes with it.
    pub fn initialize_named(&mut self, mode: &str) -> SimResult<()> {
        let mode = mode.parse::<InitMode>().inspect_err(|e| {
            warn!(error = %e, "population initialization rejected");
        })?;
        self.initialize(mode)
    }

    /// Replaces the per-trait targets; rejected unless one per trait.
    pub fn set_targets(&mut self, targets: &[f64]) -> SimResult<()> {
        self.population.set_targets(targets).inspect_err(|e| {
            warn!(error = %e, "target update rejected");
        })
    }

    /// Switches the fitness strategy.
    pub fn set_fitness_strategy(&mut self, strategy: FitnessStrategy) -> SimResult<()> {
        strategy.validate().inspect_err(|e| {
            warn!(error = %e, "fitness strategy rejected");
        })?;
        self.config.fitness = strategy;
        Ok(())
    }

    /// Parses and switches the fitness strategy.
    pub fn set_fitness_strategy_named(&mut self, name: &str) -> SimResult<()> {
        let strategy = name.parse::<FitnessStrategy>().inspect_err(|e| {
            warn!(error = %e, "fitness strategy rejected");
        })?;
        self.set_fitness_strategy(strategy)
    }

    pub fn set_reproduction_mode(&mut self, mode: ReproductionMode) {
        self.config.reproduction = mode;
    }

    /// Parses and switches the reproduction mode.
    ///
    /// An unknown name keeps the current mode.
    pub fn set_reproduction_mode_named(&mut self, name: &str) -> SimResult<()> {
        let mode = name.parse::<ReproductionMode>().inspect_err(|e| {
            warn!(error = %e, "reproduction mode rejected");
        })?;
        self.set_reproduction_mode(mode);
        Ok(())
    }

    /// Replaces the mutation parameters.
    pub fn set_mutation(&mut self, mutation: MutationConfig) -> SimResult<()> {
        mutation.validate().inspect_err(|e| {
            warn!(error = %e, "mutation parameters rejected");
        })?;
        self.config.mutation = mutation;
        Ok(())
    }

    /// Turns snapshot recording on or off. Existing snapshots are kept.
    pub fn set_record_history(&mut self, record: bool) {
        self.config.record_history = record;
        self.history.set_enabled(record);
    }

    /// Scores the current population with the configured strategy.
    pub fn evaluate(&self) -> FitnessEvaluation {
        self.config
            .fitness
            .evaluate_total(self.population.matrix(), self.population.targets())
    }

    /// Highest total fitness of the current population.
    pub fn max_fitness(&self) -> Option<f64> {
        self.evaluate().max()
    }

    /// Mean total fitness of the current population.
    pub fn mean_fitness(&self) -> Option<f64> {
        self.evaluate().mean()
    }

    /// Advances one generation.
    ///
    /// On error the population, history and generation counter are
    /// unchanged.
    pub fn step(&mut self) -> SimResult<GenerationStats> {
        let previous = self.state;
        self.state = EngineState::Stepping;
        let result = self.advance();
        self.state = match result {
            Ok(_) => EngineState::Idle,
            Err(_) => previous,
        };
        result
    }

    /// Runs `generations` sequential steps.
    ///
    /// Stops at the first failing step; generations completed before it
    /// remain applied and recorded.
    pub fn run(&mut self, generations: usize) -> SimResult<RunSummary> {
        if generations == 0 {
            warn!("run requested with zero generations");
            return Err(SimError::InvalidGenerationCount);
        }

        info!(
            generations,
            mode = %self.config.reproduction,
            fitness = self.config.fitness.name(),
            "starting run"
        );

        let previous = self.state;
        self.state = EngineState::Stepping;
        let mut stats = Vec::with_capacity(generations);
        for _ in 0..generations {
            match self.advance() {
                Ok(s) => stats.push(s),
                Err(e) => {
                    warn!(generation = self.generation, error = %e, "run aborted");
                    self.state = if stats.is_empty() {
                        previous
                    } else {
                        EngineState::Idle
                    };
                    return Err(e);
                }
            }
        }
        self.state = EngineState::Idle;

        let final_eval = self.evaluate();
        info!(
            generation = self.generation,
            mean_fitness = ?final_eval.mean(),
            "run finished"
        );

        Ok(RunSummary {
            generations,
            stats,
            final_mean_fitness: final_eval.mean(),
            final_max_fitness: final_eval.max(),
        })
    }

    /// Builds the next generation off to the side, then commits it.
    fn advance(&mut self) -> SimResult<GenerationStats> {
        let current = self.population.matrix();

        let (mut next, max_fitness, mean_fitness) = match self.config.reproduction {
            ReproductionMode::Clonal => {
                let eval = self
                    .config
                    .fitness
                    .evaluate_total(current, self.population.targets());
                let parents = self.selector.choose_parents(&eval.total, &mut self.rng)?;
                let next = current.gather_rows(&parents.first_parents());
                (next, eval.max(), eval.mean())
            }
            ReproductionMode::Exact => (current.clone(), None, None),
        };

        let mutations = self.config.mutation.mutate(&mut next, &mut self.rng)?;

        // snapshot before commit: a rejected append leaves the population as is
        self.history.record(&next, self.generation + 1)?;
        self.population.replace(next);
        self.generation += 1;

        debug!(
            generation = self.generation,
            ?max_fitness,
            ?mean_fitness,
            mutations,
            "generation complete"
        );

        Ok(GenerationStats {
            generation: self.generation,
            max_fitness,
            mean_fitness,
            mutations,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
