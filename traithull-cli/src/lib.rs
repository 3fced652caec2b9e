//! traithull CLI
//!
//! Convex hull volume (CHV) and related functional-diversity metrics for
//! species in trait space, with plot-based and random-rarefaction null
//! models. Hull volumes are computed by Qhull's `qconvex`.
//!
//! # Usage
//!
//! ```bash
//! # Random rarefaction, 100 samples per richness level
//! traithull -r 100 traits.txt > null.tsv
//!
//! # Observed plots with per-trait and nearest-neighbour statistics
//! traithull -p plots.txt -i -d traits.txt
//!
//! # Full pool only, qconvex from a specific directory
//! traithull -r 0 -t -q /opt/qhull/bin < traits.txt
//! ```

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use traithull_core::{PlotMatrix, Summarizable, TraitHullError, TraitMatrix};
use traithull_hull::{GeometryEngine, Qconvex};
use traithull_io::{read_plot_matrix, read_trait_matrix, read_trait_matrix_from, ResultWriter};

pub mod config;
pub mod rarefaction;
pub mod row;

use config::{RunConfig, SamplingMode};
use rarefaction::Rarefaction;
use row::{MetricOptions, MetricRow};

/// traithull command line interface
#[derive(Parser, Debug)]
#[command(name = "traithull")]
#[command(author, version, about = "Convex hull volume and null models for functional diversity")]
pub struct Cli {
    /// File containing species occurrence by plot
    #[arg(short, long = "plotfile", value_name = "FILE")]
    pub plotfile: Option<PathBuf>,

    /// Directory containing the qconvex executable
    #[arg(short, long, value_name = "DIR", env = "TRAITHULL_QHULL")]
    pub qhull: Option<PathBuf>,

    /// Number of random samples per richness
    #[arg(short = 'r', long = "randsample", value_name = "N", default_value_t = 1)]
    pub replicates: usize,

    /// Output mean and variance of nearest-neighbour distances
    #[arg(short, long)]
    pub distance: bool,

    /// Output the aggregate (Walker) functional dispersion index
    #[arg(short, long, visible_alias = "aussie")]
    pub aggregate: bool,

    /// Also treat each trait individually as a 1-dimensional trait space
    #[arg(short, long)]
    pub individual: bool,

    /// Output a row for the total species pool
    #[arg(short, long)]
    pub total: bool,

    /// Seed for random sampling
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Trait matrix file (reads standard input when omitted)
    #[arg(value_name = "TRAIT_FILE")]
    pub trait_file: Option<PathBuf>,
}

impl Cli {
    /// Lower the parsed arguments into a [`RunConfig`].
    pub fn into_config(self) -> RunConfig {
        RunConfig {
            trait_file: self.trait_file,
            plot_file: self.plotfile,
            qhull_dir: self.qhull.unwrap_or_default(),
            replicates: self.replicates,
            total: self.total,
            seed: self.seed,
            metrics: MetricOptions {
                individual: self.individual,
                distance: self.distance,
                aggregate: self.aggregate,
            },
        }
    }
}

/// Load inputs, evaluate every requested species set, and write the TSV
/// table to `out`. Returns the number of data rows written.
pub fn run<W: Write>(config: &RunConfig, out: W) -> Result<usize> {
    let matrix = load_trait_matrix(config)?;
    info!("trait matrix: {}", matrix.summary());

    let mode = config.sampling_mode();
    let plots = match (&mode, &config.plot_file) {
        (SamplingMode::Plots, Some(path)) => Some(load_plot_matrix(path, &matrix)?),
        _ => None,
    };
    if mode == SamplingMode::None && !config.total {
        warn!("no plot file, zero replicates and no total row requested; writing header only");
    }

    let engine = Qconvex::in_dir(&config.qhull_dir);
    let driver = Rarefaction::new(&matrix, &engine, config.metrics);
    run_with(&driver, config, plots.as_ref(), out)
}

/// Drive `driver` according to `config`, writing to `out`.
///
/// # Errors
///
/// Fails if `config` selects plot mode but `plots` is `None`, or if a row
/// cannot be computed or written.
pub fn run_with<E, W>(
    driver: &Rarefaction<'_, E>,
    config: &RunConfig,
    plots: Option<&PlotMatrix>,
    out: W,
) -> Result<usize>
where
    E: GeometryEngine + ?Sized,
    W: Write,
{
    let mode = config.sampling_mode();
    if mode == SamplingMode::Plots && plots.is_none() {
        return Err(TraitHullError::InvalidInput(
            "plot mode selected but no plot matrix was supplied".into(),
        )
        .into());
    }

    let mut writer = ResultWriter::new(out);
    writer.write_header(config.metrics.header(driver.matrix().trait_names()))?;

    let mut failures = 0usize;
    let mut emit = |row: MetricRow| {
        if row.volume.is_partial_failure() {
            failures += 1;
        }
        writer.write_row(row.fields())
    };

    let mut rows = match (mode, plots) {
        (SamplingMode::Plots, Some(plots)) => driver.plot_rows(plots, &mut emit)?,
        (SamplingMode::Random { replicates }, _) => {
            let mut rng = match config.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            driver.random_rows(replicates, &mut rng, &mut emit)?
        }
        (SamplingMode::Plots, None) | (SamplingMode::None, _) => 0,
    };
    if config.total {
        emit(driver.total_row()?)?;
        rows += 1;
    }

    if failures > 0 {
        warn!(failures, "hull volume reported as 0 where the geometry engine failed");
    }
    info!(rows, "run complete");
    Ok(rows)
}

fn load_trait_matrix(config: &RunConfig) -> Result<TraitMatrix> {
    match &config.trait_file {
        Some(path) => read_trait_matrix(path)
            .with_context(|| format!("bad or missing species input file: {}", path.display())),
        None => read_trait_matrix_from(io::stdin().lock())
            .context("bad species input on standard input"),
    }
}

fn load_plot_matrix(path: &std::path::Path, matrix: &TraitMatrix) -> Result<PlotMatrix> {
    read_plot_matrix(path)
        .and_then(|plots| {
            plots.validate_against(matrix)?;
            Ok(plots)
        })
        .with_context(|| format!("bad or missing plot input file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_flags_lower_into_config() {
        let cli = Cli::parse_from([
            "traithull", "-p", "plots.txt", "-q", "/opt/qhull", "-r", "5", "-d", "--aussie", "-i",
            "-t", "-s", "9", "traits.txt",
        ]);
        let cfg = cli.into_config();
        assert_eq!(cfg.plot_file, Some(PathBuf::from("plots.txt")));
        assert_eq!(cfg.qhull_dir, PathBuf::from("/opt/qhull"));
        assert_eq!(cfg.replicates, 5);
        assert_eq!(cfg.seed, Some(9));
        assert!(cfg.total);
        assert_eq!(
            cfg.metrics,
            MetricOptions {
                individual: true,
                distance: true,
                aggregate: true,
            }
        );
        assert_eq!(cfg.trait_file, Some(PathBuf::from("traits.txt")));
    }

    #[test]
    fn cli_defaults() {
        let cfg = Cli::parse_from(["traithull"]).into_config();
        assert_eq!(cfg.replicates, 1);
        assert!(cfg.trait_file.is_none());
        assert_eq!(cfg.metrics, MetricOptions::default());
    }

    #[test]
    fn missing_trait_file_is_reported() {
        let cfg = RunConfig {
            trait_file: Some("/nonexistent/traits.txt".into()),
            ..Default::default()
        };
        let err = run(&cfg, Vec::new()).unwrap_err();
        assert!(format!("{err:#}").contains("bad or missing species input file"));
    }
}
