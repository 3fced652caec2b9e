//! Trait-space statistics for functional diversity.
//!
//! - **Descriptive statistics** — mean, variance, range, corrected kurtosis (G2)
//! - **Distances** — Euclidean and squared Euclidean, pairwise and nearest-neighbour
//! - **Dispersion** — per-trait 1-D statistics, neighbour summaries, aggregate index

pub mod descriptive;
pub mod dispersion;
pub mod distance;

pub use descriptive::{
    corrected_kurtosis, corrected_kurtosis_or_sentinel, kurtosis_or_sentinel, KURTOSIS_SENTINEL,
};
pub use dispersion::{NeighborSummary, TraitDispersion};
pub use distance::DistanceMetric;
