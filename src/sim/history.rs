//! Append-only record of population snapshots.
//!
//! Each [`Snapshot`] owns an independent copy of the matrix, so later
//! mutation of the live population can never leak into recorded entries.
//! The trait-major views reshape the record the way a plotting layer wants
//! it: trait → individual → generation.

use super::population::TraitMatrix;
use crate::error::{SimError, SimResult};

/// Population state captured at one point of a run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    /// Generation index; 0 for an initialization.
    pub generation: usize,
    matrix: TraitMatrix,
}

impl Snapshot {
    pub fn matrix(&self) -> &TraitMatrix {
        &self.matrix
    }
}

/// Ordered snapshots of a run.
#[derive(Debug, Clone)]
pub struct History {
    enabled: bool,
    snapshots: Vec<Snapshot>,
}

impl Default for History {
    fn default() -> Self {
        Self::new(true)
    }
}

impl History {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            snapshots: Vec::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Appends a copy of `matrix` when recording is enabled.
    ///
    /// Every snapshot must have the shape of the first one; a mismatch is
    /// rejected and nothing is appended. Returns whether a snapshot was taken.
    pub fn record(&mut self, matrix: &TraitMatrix, generation: usize) -> SimResult<bool> {
        if !self.enabled {
            return Ok(false);
        }
        if let Some(first) = self.snapshots.first() {
            if first.matrix.shape() != matrix.shape() {
                return Err(SimError::MatrixShape {
                    expected: first.matrix.shape(),
                    actual: matrix.shape(),
                });
            }
        }
        self.snapshots.push(Snapshot {
            generation,
            matrix: matrix.clone(),
        });
        Ok(true)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    pub fn latest(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.snapshots.iter()
    }

    pub fn as_slice(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// Number of traits per snapshot, 0 when nothing is recorded.
    pub fn n_traits(&self) -> usize {
        self.snapshots.first().map_or(0, |s| s.matrix.n_traits())
    }

    /// Values of one trait, indexed `[individual][snapshot]`.
    ///
    /// This is the series a single-trait plot draws: one line per individual.
    pub fn trait_series(&self, trait_idx: usize) -> SimResult<Vec<Vec<f64>>> {
        let n_traits = self.n_traits();
        if trait_idx >= n_traits {
            return Err(SimError::TraitOutOfRange {
                trait_index: trait_idx,
                n_traits,
            });
        }
        let n_individuals = self.snapshots[0].matrix.n_individuals();
        let mut series = vec![Vec::with_capacity(self.len()); n_individuals];
        for snapshot in &self.snapshots {
            for (ind, line) in series.iter_mut().enumerate() {
                line.push(snapshot.matrix.get(ind, trait_idx));
            }
        }
        Ok(series)
    }

    /// Full record indexed `[trait][individual][snapshot]`.
    pub fn trait_major(&self) -> Vec<Vec<Vec<f64>>> {
        (0..self.n_traits())
            .filter_map(|t| self.trait_series(t).ok())
            .collect()
    }

    /// Mean of every trait, indexed `[snapshot][trait]`.
    pub fn per_trait_means(&self) -> Vec<Vec<f64>> {
        self.snapshots
            .iter()
            .map(|s| s.matrix.column_means())
            .collect()
    }

    /// Assigns each trait a `(trait, row, col)` cell of a `rows × cols`
    /// grid, filled row by row.
    ///
    /// Fails if the grid has fewer cells than there are traits.
    pub fn grid_layout(&self, rows: usize, cols: usize) -> SimResult<Vec<(usize, usize, usize)>> {
        let n_traits = self.n_traits();
        if rows.checked_mul(cols).map_or(true, |cells| cells < n_traits) {
            return Err(SimError::GridTooSmall {
                rows,
                cols,
                n_traits,
            });
        }
        Ok((0..n_traits).map(|t| (t, t / cols, t % cols)).collect())
    }
}
