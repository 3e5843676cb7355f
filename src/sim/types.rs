//! Small shared enums for the generation engine.

use crate::error::SimError;
use std::fmt;
use std::str::FromStr;

/// How the next generation is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReproductionMode {
    /// Fitness-proportionate selection of one parent per slot, then mutation.
    #[default]
    Clonal,
    /// Mutation only; no fitness evaluation or selection.
    Exact,
}

impl ReproductionMode {
    pub fn name(&self) -> &'static str {
        match self {
            ReproductionMode::Clonal => "clonal",
            ReproductionMode::Exact => "exact",
        }
    }
}

impl fmt::Display for ReproductionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReproductionMode {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clonal" => Ok(ReproductionMode::Clonal),
            "exact" => Ok(ReproductionMode::Exact),
            _ => Err(SimError::UnknownReproductionMode(s.to_string())),
        }
    }
}

/// Lifecycle of a [`GenerationEngine`](super::GenerationEngine).
///
/// `Idle → Initialized → Stepping → Idle`; `Idle` is re-entered after every
/// `run`, and further runs continue from the current population.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Constructed, or between runs.
    Idle,
    /// Population initialized, no generation stepped yet.
    Initialized,
    /// Inside `step`/`run`.
    Stepping,
}
