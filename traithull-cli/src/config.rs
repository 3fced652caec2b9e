//! Run configuration, lowered from the command line.

use std::path::PathBuf;

use crate::row::MetricOptions;

/// Everything a run needs, independent of how it was specified.
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    /// Trait matrix file; standard input when `None`.
    pub trait_file: Option<PathBuf>,
    /// Plot occurrence file; enables plot mode.
    pub plot_file: Option<PathBuf>,
    /// Directory containing `qconvex`; empty means `PATH`.
    pub qhull_dir: PathBuf,
    /// Random samples per richness level when not in plot mode.
    pub replicates: usize,
    /// Append a row for the full species pool.
    pub total: bool,
    /// Seed for random sampling; entropy-seeded when `None`.
    pub seed: Option<u64>,
    pub metrics: MetricOptions,
}

/// Which species sets a run evaluates before the optional total row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingMode {
    Plots,
    Random { replicates: usize },
    None,
}

impl RunConfig {
    /// A plot file selects plot mode; otherwise random rarefaction runs
    /// when `replicates > 0`.
    pub fn sampling_mode(&self) -> SamplingMode {
        if self.plot_file.is_some() {
            SamplingMode::Plots
        } else if self.replicates > 0 {
            SamplingMode::Random {
                replicates: self.replicates,
            }
        } else {
            SamplingMode::None
        }
    }
}
