//! Result rows and their tab-separated rendering.

use traithull_core::Summarizable;
use traithull_hull::HullVolume;
use traithull_stats::{kurtosis_or_sentinel, NeighborSummary, TraitDispersion};

/// Row label for randomly sampled species sets.
pub const RANDOM_LABEL: &str = "Random";
/// Row label for the full species pool.
pub const TOTAL_LABEL: &str = "Total";

const MISSING: &str = "NA";

/// Optional metrics evaluated for every row, in addition to richness and
/// hull volume. Each flag adds its own columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricOptions {
    /// Per-trait 1-D dispersion statistics.
    pub individual: bool,
    /// Mean and variance of nearest-neighbour distances.
    pub distance: bool,
    /// Aggregate dispersion index (summed squared distances).
    pub aggregate: bool,
}

impl MetricOptions {
    /// Column names for a matrix with the given traits.
    pub fn header(&self, trait_names: &[String]) -> Vec<String> {
        let mut cols: Vec<String> = vec!["Species_set".into(), "Richness".into(), "Volume".into()];
        if self.individual {
            for t in trait_names {
                for suffix in ["range", "var", "kurtosis", "nnmean", "nnvar"] {
                    cols.push(format!("{t}_{suffix}"));
                }
            }
        }
        if self.distance {
            cols.push("MeanNNeighbor".into());
            cols.push("NeighborVar".into());
        }
        if self.aggregate {
            cols.push("Aggregate".into());
        }
        cols
    }
}

/// Metrics of one evaluated species set.
#[derive(Debug, Clone)]
pub struct MetricRow {
    pub label: String,
    pub richness: usize,
    pub volume: HullVolume,
    /// Present when [`MetricOptions::individual`] is set.
    pub traits: Option<Vec<TraitDispersion>>,
    /// Present when [`MetricOptions::distance`] is set.
    pub neighbors: Option<NeighborSummary>,
    /// Present when [`MetricOptions::aggregate`] is set.
    pub aggregate: Option<f64>,
}

impl MetricRow {
    /// Output fields, aligned with [`MetricOptions::header`].
    ///
    /// Floats use six decimals. An uncomputable kurtosis is written as
    /// [`traithull_stats::KURTOSIS_SENTINEL`]; other absent values as `NA`.
    pub fn fields(&self) -> Vec<String> {
        let mut out = vec![
            self.label.clone(),
            self.richness.to_string(),
            fmt_f64(self.volume.value),
        ];
        if let Some(traits) = &self.traits {
            for t in traits {
                out.push(fmt_f64(t.range));
                out.push(fmt_opt(t.variance));
                out.push(fmt_f64(kurtosis_or_sentinel(t.kurtosis)));
                out.push(fmt_opt(t.neighbors.mean));
                out.push(fmt_opt(t.neighbors.variance));
            }
        }
        if let Some(nn) = &self.neighbors {
            out.push(fmt_opt(nn.mean));
            out.push(fmt_opt(nn.variance));
        }
        if let Some(agg) = self.aggregate {
            out.push(fmt_f64(agg));
        }
        out
    }
}

impl Summarizable for MetricRow {
    fn summary(&self) -> String {
        format!(
            "{}: richness={}, volume={:.4}{}",
            self.label,
            self.richness,
            self.volume.value,
            if self.volume.is_partial_failure() {
                " (engine failure)"
            } else {
                ""
            }
        )
    }
}

fn fmt_f64(v: f64) -> String {
    format!("{:.6}", v)
}

fn fmt_opt(v: Option<f64>) -> String {
    v.map_or_else(|| MISSING.to_string(), fmt_f64)
}
