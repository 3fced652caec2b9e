//! The geometry-engine seam and the `qconvex` subprocess engine.
//!
//! A [`HullRequest`] is serialised in Qhull's input format: a line
//! `"<D> <N>"` followed by `N` lines of `D` space-separated coordinates.
//! Engines return their raw text report; interpreting it is left to
//! [`crate::report`].

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;
use traithull_core::{Result, TraitHullError};

/// Points in `dim`-dimensional trait space whose hull volume is wanted.
#[derive(Debug, Clone)]
pub struct HullRequest<'a> {
    dim: usize,
    points: Vec<&'a [f64]>,
}

impl<'a> HullRequest<'a> {
    /// Create a request.
    ///
    /// # Errors
    ///
    /// Returns an error if any point's length differs from `dim`.
    pub fn new(dim: usize, points: Vec<&'a [f64]>) -> Result<Self> {
        if let Some((i, p)) = points.iter().enumerate().find(|(_, p)| p.len() != dim) {
            return Err(TraitHullError::InvalidInput(format!(
                "point {} has length {}, expected {}",
                i,
                p.len(),
                dim
            )));
        }
        Ok(Self { dim, points })
    }

    /// Dimensionality of the points.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// The points, in request order.
    pub fn points(&self) -> &[&'a [f64]] {
        &self.points
    }

    /// Serialise to Qhull's stdin format.
    pub fn to_qhull_input(&self) -> String {
        let mut input = format!("{} {}\n", self.dim, self.points.len());
        for point in &self.points {
            let coords: Vec<String> = point.iter().map(|x| x.to_string()).collect();
            input.push_str(&coords.join(" "));
            input.push('\n');
        }
        input
    }
}

/// Something that computes convex hulls and reports their volume as text.
pub trait GeometryEngine {
    /// Run the engine on `request` and return its full report.
    ///
    /// # Errors
    ///
    /// Returns [`TraitHullError::Geometry`] if the engine could not be run.
    /// A report without a volume is not an error at this level.
    fn volume_report(&self, request: &HullRequest<'_>) -> Result<String>;
}

/// Qhull's `qconvex` executable, invoked once per request.
#[derive(Debug, Clone)]
pub struct Qconvex {
    program: PathBuf,
}

impl Qconvex {
    /// Executable name resolved through `PATH`.
    pub const PROGRAM: &'static str = "qconvex";
    /// Flag requesting total facet area and volume.
    pub const VOLUME_FLAG: &'static str = "FA";

    /// Use `qconvex` from `PATH`.
    pub fn new() -> Self {
        Self {
            program: PathBuf::from(Self::PROGRAM),
        }
    }

    /// Use `qconvex` from `dir`; an empty path falls back to `PATH`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        if dir.as_os_str().is_empty() {
            return Self::new();
        }
        Self {
            program: dir.join(Self::PROGRAM),
        }
    }

    /// Path of the executable that will be run.
    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Default for Qconvex {
    fn default() -> Self {
        Self::new()
    }
}

impl GeometryEngine for Qconvex {
    fn volume_report(&self, request: &HullRequest<'_>) -> Result<String> {
        let mut child = Command::new(&self.program)
            .arg(Self::VOLUME_FLAG)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                TraitHullError::Geometry(format!(
                    "failed to run `{} {}`: {e}",
                    self.program.display(),
                    Self::VOLUME_FLAG
                ))
            })?;

        // stdin is closed when the handle drops, before we wait on output
        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(request.to_qhull_input().as_bytes()) {
                debug!("qconvex closed its input early: {e}");
            }
        }

        let output = child.wait_with_output().map_err(|e| {
            TraitHullError::Geometry(format!(
                "failed to read output of `{}`: {e}",
                self.program.display()
            ))
        })?;

        let mut report = String::from_utf8_lossy(&output.stdout).into_owned();
        if !output.stderr.is_empty() {
            report.push_str(&String::from_utf8_lossy(&output.stderr));
        }
        Ok(report)
    }
}


#[cfg(all(test, unix))]
mod process_tests {
    use super::*;
    use crate::report::parse_volume;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    /// Stands in for `qconvex`: echoes its flag and input, then a volume line.
    const FAKE_QCONVEX: &str = "#!/bin/sh\necho \"flag=$1\"\ncat\necho ' Total volume:  6'\n";

    #[test]
    fn qconvex_receives_flag_and_points() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join(Qconvex::PROGRAM);
        fs::write(&script, FAKE_QCONVEX).unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

        let a = [0.0, 0.0];
        let b = [0.0, 3.0];
        let c = [4.0, 0.0];
        let req = HullRequest::new(2, vec![&a[..], &b[..], &c[..]]).unwrap();
        let report = Qconvex::in_dir(dir.path()).volume_report(&req).unwrap();

        assert!(report.contains("flag=FA"), "{report}");
        assert!(report.contains("2 3\n0 0\n0 3\n4 0\n"), "{report}");
        assert_eq!(parse_volume(&report), Some(6.0));
    }
}
