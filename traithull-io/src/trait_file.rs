//! Trait matrix parser.
//!
//! The first line is a header whose tokens after the first are trait
//! names. Every following line is a species id followed by one numeric
//! value per trait, all whitespace-delimited. Blank lines are skipped.
//!
//! ```text
//! species  height  sla
//! spA      1.0     2.0
//! spB      0.5     3.5
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use traithull_core::{Result, TraitHullError, TraitMatrix};

/// Parse a trait matrix from a string.
///
/// # Examples
///
/// ```
/// # use traithull_io::parse_trait_matrix;
/// let m = parse_trait_matrix("id t1 t2\nspA 1.0 2.0\n").unwrap();
/// assert_eq!(m.trait_names(), &["t1".to_string(), "t2".to_string()]);
/// assert_eq!(m.get("spA"), Some(&[1.0, 2.0][..]));
/// ```
pub fn parse_trait_matrix(input: &str) -> Result<TraitMatrix> {
    let mut lines = input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let (_, header) = lines
        .next()
        .ok_or_else(|| TraitHullError::Parse("trait file is empty".into()))?;
    let trait_names: Vec<String> = header
        .split_whitespace()
        .skip(1)
        .map(str::to_string)
        .collect();
    if trait_names.is_empty() {
        return Err(TraitHullError::Parse(
            "trait file header names no traits".into(),
        ));
    }

    let mut matrix = TraitMatrix::new(trait_names)?;
    for (idx, line) in lines {
        let line_no = idx + 1;
        let mut fields = line.split_whitespace();
        let species = fields.next().unwrap_or_default();
        let values = fields
            .map(|tok| {
                tok.parse::<f64>().map_err(|_| {
                    TraitHullError::Parse(format!(
                        "line {}: invalid trait value '{}' for species '{}'",
                        line_no, tok, species
                    ))
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        matrix
            .insert(species, values)
            .map_err(|e| TraitHullError::Parse(format!("line {}: {}", line_no, e)))?;
    }

    if matrix.is_empty() {
        return Err(TraitHullError::Parse(
            "trait file has no species rows".into(),
        ));
    }
    Ok(matrix)
}

/// Read and parse a trait matrix from any reader (e.g. standard input).
pub fn read_trait_matrix_from(mut reader: impl Read) -> Result<TraitMatrix> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    parse_trait_matrix(&input)
}

/// Read and parse a trait matrix file.
pub fn read_trait_matrix(path: impl AsRef<Path>) -> Result<TraitMatrix> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        TraitHullError::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", path.display(), e),
        ))
    })?;
    read_trait_matrix_from(file)
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn header_and_single_row() {
        let m = parse_trait_matrix("id t1 t2\nspA 1.0 2.0\n").unwrap();
        assert_eq!(m.trait_names(), &["t1".to_string(), "t2".to_string()]);
        assert_eq!(m.get("spA"), Some(&[1.0, 2.0][..]));
        assert_eq!(m.dim(), 2);
    }

    #[test]
    fn keeps_file_order_and_skips_blank_lines() {
        let input = "species\theight\tsla\n\nspB\t0.5\t3.5\n  \nspA\t1\t-2e-1\n";
        let m = parse_trait_matrix(input).unwrap();
        assert_eq!(m.species(), &["spB".to_string(), "spA".to_string()]);
        assert_eq!(m.get("spA"), Some(&[1.0, -0.2][..]));
    }

    #[test]
    fn wrong_value_count_reports_line() {
        let err = parse_trait_matrix("id t1 t2\nspA 1.0\n").unwrap_err();
        match err {
            TraitHullError::Parse(msg) => assert!(msg.starts_with("line 2")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_numeric_value() {
        assert!(parse_trait_matrix("id t1\nspA abc\n").is_err());
    }

    #[test]
    fn duplicate_species() {
        assert!(parse_trait_matrix("id t1\nspA 1\nspA 2\n").is_err());
    }

    #[test]
    fn empty_or_headless_input() {
        assert!(parse_trait_matrix("").is_err());
        assert!(parse_trait_matrix("id\nspA\n").is_err());
        assert!(parse_trait_matrix("id t1\n").is_err());
    }

    #[test]
    fn read_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "id x y z\nA 0 0 0\nB 1 0 0\n").unwrap();
        f.flush().unwrap();
        let m = read_trait_matrix(f.path()).unwrap();
        assert_eq!(m.len(), 2);
        assert_eq!(m.dim(), 3);
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            read_trait_matrix("/nonexistent/traits.txt"),
            Err(TraitHullError::Io(_))
        ));
    }
}
