//! Hull volume policy: short-circuit degenerate cases, delegate the rest.

use tracing::{debug, warn};
use traithull_core::{Result, SpeciesSet, TraitMatrix};

use crate::engine::{GeometryEngine, HullRequest};
use crate::report::{parse_volume, total_volume_line};

/// How a [`HullVolume`] was obtained.
#[derive(Debug, Clone, PartialEq)]
pub enum VolumeStatus {
    /// 1-D trait space: the value is the trait range.
    Range,
    /// Fewer than `D + 1` species: the value is 0.
    Degenerate,
    /// Read from the geometry engine's report.
    Computed,
    /// The engine failed or its report had no volume; the value is 0.
    /// `report` holds the raw engine output for manual inspection.
    EngineFailure { report: String },
}

/// Convex hull volume of one species set.
#[derive(Debug, Clone, PartialEq)]
pub struct HullVolume {
    pub value: f64,
    pub status: VolumeStatus,
}

impl HullVolume {
    fn new(value: f64, status: VolumeStatus) -> Self {
        Self { value, status }
    }

    /// Whether the value stands in for a failed engine computation.
    pub fn is_partial_failure(&self) -> bool {
        matches!(self.status, VolumeStatus::EngineFailure { .. })
    }
}

/// Convex hull volume of `set` in the trait space of `matrix`.
///
/// With `D < 2` the range of the single trait is returned, and with fewer
/// than `D + 1` species the volume is 0; neither case runs the engine.
/// Otherwise the engine is run exactly once. An engine that cannot be run,
/// or whose report lacks a volume, yields 0 with
/// [`VolumeStatus::EngineFailure`].
///
/// # Errors
///
/// Returns an error only if `set` names a species absent from `matrix`.
pub fn hull_volume<E>(matrix: &TraitMatrix, set: &SpeciesSet, engine: &E) -> Result<HullVolume>
where
    E: GeometryEngine + ?Sized,
{
    let dim = matrix.dim();
    let points = matrix.points(set)?;

    if dim < 2 {
        let (lo, hi) = points
            .iter()
            .map(|p| p[0])
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| {
                (lo.min(x), hi.max(x))
            });
        return Ok(HullVolume::new(hi - lo, VolumeStatus::Range));
    }

    if points.len() < dim + 1 {
        return Ok(HullVolume::new(0.0, VolumeStatus::Degenerate));
    }

    let request = HullRequest::new(dim, points)?;
    let report = match engine.volume_report(&request) {
        Ok(report) => report,
        Err(e) => {
            warn!(richness = set.len(), "geometry engine failed: {e}");
            return Ok(HullVolume::new(
                0.0,
                VolumeStatus::EngineFailure {
                    report: e.to_string(),
                },
            ));
        }
    };

    if let Some(line) = total_volume_line(&report) {
        debug!("{line}");
    }

    match parse_volume(&report) {
        Some(value) => Ok(HullVolume::new(value, VolumeStatus::Computed)),
        None => {
            warn!(
                richness = set.len(),
                "no volume in geometry engine report, using 0:\n{report}"
            );
            Ok(HullVolume::new(0.0, VolumeStatus::EngineFailure { report }))
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
