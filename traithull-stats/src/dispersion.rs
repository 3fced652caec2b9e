//! Functional dispersion of a species set.
//!
//! [`per_trait_statistics`] treats each trait as its own 1-D trait space:
//! range, sample variance, corrected kurtosis, and the mean and variance of
//! nearest-neighbour distances along that trait alone.
//! [`neighbor_summary`] and [`aggregate_dispersion`] work in the full
//! `D`-dimensional space.

use traithull_core::{Result, SpeciesSet, Summarizable, TraitMatrix};

use crate::descriptive::{corrected_kurtosis, mean, range, sample_variance};
use crate::distance::{aggregate_neighbor_distances, nearest_neighbor_distances, DistanceMetric};

/// Mean and variance of nearest-neighbour distances.
///
/// Both are `None` for a single species; `variance` is also `None` when
/// only one distance exists.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NeighborSummary {
    pub mean: Option<f64>,
    pub variance: Option<f64>,
}

impl NeighborSummary {
    /// Summarise a list of nearest-neighbour distances.
    pub fn from_distances(distances: &[f64]) -> Self {
        Self {
            mean: mean(distances).ok(),
            variance: sample_variance(distances),
        }
    }
}

/// 1-D dispersion statistics for one trait over a species set.
#[derive(Debug, Clone, PartialEq)]
pub struct TraitDispersion {
    /// Trait label.
    pub trait_name: String,
    /// max - min of the trait values.
    pub range: f64,
    /// Sample variance; `None` for a single species.
    pub variance: Option<f64>,
    /// Corrected kurtosis G2; `None` below four species or for a constant trait.
    pub kurtosis: Option<f64>,
    /// Nearest-neighbour distances along this trait alone.
    pub neighbors: NeighborSummary,
}

impl Summarizable for TraitDispersion {
    fn summary(&self) -> String {
        format!(
            "{}: range={:.4}, var={}, G2={}",
            self.trait_name,
            self.range,
            fmt_opt(self.variance),
            fmt_opt(self.kurtosis),
        )
    }
}

/// Per-trait dispersion for every trait of `matrix`, in trait order.
pub fn per_trait_statistics(
    matrix: &TraitMatrix,
    set: &SpeciesSet,
) -> Result<Vec<TraitDispersion>> {
    matrix
        .trait_names()
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let values = matrix.trait_column(set, idx)?;
            let points: Vec<&[f64]> = values.iter().map(std::slice::from_ref).collect();
            Ok(TraitDispersion {
                trait_name: name.clone(),
                range: range(&values)?,
                variance: sample_variance(&values),
                kurtosis: corrected_kurtosis(&values),
                neighbors: summarize_points(&points)?,
            })
        })
        .collect()
}

/// Nearest-neighbour summary of `set` in full trait space (Euclidean).
pub fn neighbor_summary(matrix: &TraitMatrix, set: &SpeciesSet) -> Result<NeighborSummary> {
    summarize_points(&matrix.points(set)?)
}

/// Aggregate dispersion index: sum over species of squared Euclidean
/// distances to all other species.
pub fn aggregate_dispersion(matrix: &TraitMatrix, set: &SpeciesSet) -> Result<f64> {
    let points = matrix.points(set)?;
    Ok(aggregate_neighbor_distances(&points, DistanceMetric::SquaredEuclidean)?
        .into_iter()
        .sum())
}

fn summarize_points(points: &[&[f64]]) -> Result<NeighborSummary> {
    if points.len() < 2 {
        return Ok(NeighborSummary::default());
    }
    let nn = nearest_neighbor_distances(points, DistanceMetric::Euclidean)?;
    Ok(NeighborSummary::from_distances(&nn))
}

fn fmt_opt(v: Option<f64>) -> String {
    v.map_or_else(|| "NA".to_string(), |x| format!("{:.4}", x))
}

// ── Tests ──────────────────────────────────────────────────────────────────
