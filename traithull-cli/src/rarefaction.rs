//! Rarefaction driver: generates species sets and evaluates each one.
//!
//! Three sources of species sets, each producing one [`MetricRow`] per set:
//!
//! - **Plots** — the species observed in each plot, labelled by plot id
//! - **Random** — for every richness `r` in `D + 1 .. P`, `replicates`
//!   uniform samples of `r` species without replacement, labelled `Random`
//! - **Total** — the whole species pool, labelled `Total`
//!
//! Rows are handed to a caller-supplied sink as soon as they are computed.

use std::ops::Range;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;
use traithull_core::{PlotMatrix, Result, SpeciesSet, Summarizable, TraitMatrix};
use traithull_hull::{hull_volume, GeometryEngine};
use traithull_stats::dispersion::{aggregate_dispersion, neighbor_summary, per_trait_statistics};

use crate::row::{MetricOptions, MetricRow, RANDOM_LABEL, TOTAL_LABEL};

/// Evaluates the metric suite over species sets drawn from one matrix.
pub struct Rarefaction<'a, E: GeometryEngine + ?Sized> {
    matrix: &'a TraitMatrix,
    engine: &'a E,
    options: MetricOptions,
}

impl<'a, E: GeometryEngine + ?Sized> Rarefaction<'a, E> {
    pub fn new(matrix: &'a TraitMatrix, engine: &'a E, options: MetricOptions) -> Self {
        Self {
            matrix,
            engine,
            options,
        }
    }

    /// The matrix species sets are drawn from.
    pub fn matrix(&self) -> &'a TraitMatrix {
        self.matrix
    }

    /// Compute one row for `set`.
    pub fn evaluate(&self, label: &str, set: &SpeciesSet) -> Result<MetricRow> {
        let volume = hull_volume(self.matrix, set, self.engine)?;
        let traits = if self.options.individual {
            Some(per_trait_statistics(self.matrix, set)?)
        } else {
            None
        };
        let neighbors = if self.options.distance {
            Some(neighbor_summary(self.matrix, set)?)
        } else {
            None
        };
        let aggregate = if self.options.aggregate {
            Some(aggregate_dispersion(self.matrix, set)?)
        } else {
            None
        };
        let row = MetricRow {
            label: label.to_string(),
            richness: set.len(),
            volume,
            traits,
            neighbors,
            aggregate,
        };
        debug!("{}", row.summary());
        Ok(row)
    }

    /// One row per plot. Returns the number of rows emitted.
    pub fn plot_rows<F>(&self, plots: &PlotMatrix, mut emit: F) -> Result<usize>
    where
        F: FnMut(MetricRow) -> Result<()>,
    {
        let mut rows = 0;
        for (plot, set) in plots.iter() {
            emit(self.evaluate(plot, set)?)?;
            rows += 1;
        }
        Ok(rows)
    }

    /// Richness levels sampled in random mode: `D + 1` up to, but not
    /// including, the pool size. Empty when the pool has `D + 1` species
    /// or fewer.
    pub fn richness_levels(&self) -> Range<usize> {
        (self.matrix.dim() + 1)..self.matrix.len()
    }

    /// `replicates` random rows per richness level.
    ///
    /// Emits `replicates * (P - D - 1)` rows for a pool of `P > D + 1`
    /// species. Returns the number of rows emitted.
    pub fn random_rows<R, F>(&self, replicates: usize, rng: &mut R, mut emit: F) -> Result<usize>
    where
        R: Rng + ?Sized,
        F: FnMut(MetricRow) -> Result<()>,
    {
        let pool = self.matrix.species();
        let mut rows = 0;
        for richness in self.richness_levels() {
            for _ in 0..replicates {
                let sample = pool.choose_multiple(rng, richness).cloned().collect();
                let set = SpeciesSet::new(sample)?;
                emit(self.evaluate(RANDOM_LABEL, &set)?)?;
                rows += 1;
            }
        }
        Ok(rows)
    }

    /// The row for the full species pool.
    pub fn total_row(&self) -> Result<MetricRow> {
        self.evaluate(TOTAL_LABEL, &self.matrix.pool()?)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
