//! Plot occurrence matrix parser.
//!
//! The header's first token is ignored and the remaining tokens are plot
//! names. Each following line is a species id followed by one integer flag
//! per plot; a non-zero flag means the species occurs in that plot.

use std::fs;
use std::path::Path;

use traithull_core::{PlotMatrix, Result, TraitHullError};

/// Parse a species-by-plot occurrence matrix from a string.
pub fn parse_plot_matrix(input: &str) -> Result<PlotMatrix> {
    let mut lines = input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let (_, header) = lines
        .next()
        .ok_or_else(|| TraitHullError::Parse("plot file is empty".into()))?;
    let plot_names: Vec<&str> = header.split_whitespace().skip(1).collect();
    if plot_names.is_empty() {
        return Err(TraitHullError::Parse(
            "plot file header names no plots".into(),
        ));
    }

    let mut plots = PlotMatrix::new();
    for (idx, line) in lines {
        let line_no = idx + 1;
        let fields: Vec<&str> = line.split_whitespace().collect();
        let (species, flags) = fields.split_first().ok_or_else(|| {
            TraitHullError::Parse(format!("line {}: missing species id", line_no))
        })?;
        if flags.len() != plot_names.len() {
            return Err(TraitHullError::Parse(format!(
                "line {}: species '{}' has {} plot flags, expected {}",
                line_no,
                species,
                flags.len(),
                plot_names.len()
            )));
        }
        for (plot, flag) in plot_names.iter().zip(flags) {
            let count: i64 = flag.parse().map_err(|_| {
                TraitHullError::Parse(format!(
                    "line {}: invalid occurrence flag '{}' for species '{}'",
                    line_no, flag, species
                ))
            })?;
            if count != 0 {
                plots.add_occurrence(plot, species);
            }
        }
    }
    Ok(plots)
}

/// Read and parse a plot occurrence file.
pub fn read_plot_matrix(path: impl AsRef<Path>) -> Result<PlotMatrix> {
    let path = path.as_ref();
    let input = fs::read_to_string(path).map_err(|e| {
        TraitHullError::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", path.display(), e),
        ))
    })?;
    parse_plot_matrix(&input)
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PLOTS: &str = "species P1 P2 P3\nA 1 0 0\nB 2 1 0\nC 0 1 0\n";

    fn ids(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn nonzero_flags_mark_presence() {
        let p = parse_plot_matrix(PLOTS).unwrap();
        assert_eq!(p.get("P1").unwrap().as_slice(), &ids(&["A", "B"])[..]);
        assert_eq!(p.get("P2").unwrap().as_slice(), &ids(&["B", "C"])[..]);
    }

    #[test]
    fn empty_plot_is_absent() {
        let p = parse_plot_matrix(PLOTS).unwrap();
        assert!(p.get("P3").is_none());
        assert_eq!(p.len(), 2);
    }

    #[test]
    fn flag_count_mismatch() {
        assert!(parse_plot_matrix("sp P1 P2\nA 1\n").is_err());
    }

    #[test]
    fn non_integer_flag() {
        assert!(parse_plot_matrix("sp P1\nA yes\n").is_err());
        assert!(parse_plot_matrix("sp P1\nA 1.0\n").is_err());
    }

    #[test]
    fn header_without_plots() {
        assert!(parse_plot_matrix("species\nA\n").is_err());
        assert!(parse_plot_matrix("").is_err());
    }

    #[test]
    fn read_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(PLOTS.as_bytes()).unwrap();
        f.flush().unwrap();
        let p = read_plot_matrix(f.path()).unwrap();
        assert_eq!(p.len(), 2);
        assert!(read_plot_matrix("/nonexistent/plots.txt").is_err());
    }
}
