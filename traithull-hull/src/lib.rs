//! Convex hull volume (CHV) of species sets in trait space.
//!
//! Hull geometry is delegated to a [`GeometryEngine`]; the default engine
//! runs Qhull's `qconvex FA` as a subprocess. This crate decides when the
//! engine is needed at all and interprets its report:
//!
//! - **1-D trait space** — the volume is the range of the single trait
//! - **Too few points** — fewer than `D + 1` species bound no volume
//! - **Otherwise** — the engine's `volume:` figure, or 0 flagged as an
//!   engine failure when the report has none

pub mod engine;
pub mod report;
pub mod volume;

pub use engine::{GeometryEngine, HullRequest, Qconvex};
pub use volume::{hull_volume, HullVolume, VolumeStatus};
