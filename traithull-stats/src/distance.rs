//! Distances between species in trait space.
//!
//! Point-level functions take trait vectors as slices; [`species_distance`]
//! looks species up in a [`TraitMatrix`] first.

use traithull_core::{Result, TraitHullError, TraitMatrix};

/// Supported distance metrics between trait vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceMetric {
    #[default]
    Euclidean,
    SquaredEuclidean,
}

/// Squared Euclidean distance between two trait vectors.
pub fn squared_euclidean(a: &[f64], b: &[f64]) -> Result<f64> {
    validate_pair(a, b)?;
    Ok(a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum())
}

/// Euclidean (L2) distance between two trait vectors.
pub fn euclidean(a: &[f64], b: &[f64]) -> Result<f64> {
    Ok(squared_euclidean(a, b)?.sqrt())
}

/// Compute distance between two trait vectors using the given metric.
pub fn compute_distance(a: &[f64], b: &[f64], metric: DistanceMetric) -> Result<f64> {
    match metric {
        DistanceMetric::Euclidean => euclidean(a, b),
        DistanceMetric::SquaredEuclidean => squared_euclidean(a, b),
    }
}

/// Distance between two species of `matrix`.
pub fn species_distance(
    matrix: &TraitMatrix,
    a: &str,
    b: &str,
    metric: DistanceMetric,
) -> Result<f64> {
    let pa = matrix
        .get(a)
        .ok_or_else(|| TraitHullError::UnknownSpecies(a.to_string()))?;
    let pb = matrix
        .get(b)
        .ok_or_else(|| TraitHullError::UnknownSpecies(b.to_string()))?;
    compute_distance(pa, pb, metric)
}

/// For each point, the distances to every other point.
///
/// Row `i` lists distances to points `0..n` in order with `i` skipped, so
/// each row has `n - 1` entries.
pub fn pairwise_distances(points: &[&[f64]], metric: DistanceMetric) -> Result<Vec<Vec<f64>>> {
    let n = points.len();
    let mut rows = Vec::with_capacity(n);
    for i in 0..n {
        let mut row = Vec::with_capacity(n.saturating_sub(1));
        for j in 0..n {
            if i != j {
                row.push(compute_distance(points[i], points[j], metric)?);
            }
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Distance from each point to its nearest neighbour.
///
/// # Errors
///
/// Returns an error with fewer than two points.
pub fn nearest_neighbor_distances(points: &[&[f64]], metric: DistanceMetric) -> Result<Vec<f64>> {
    if points.len() < 2 {
        return Err(TraitHullError::InvalidInput(format!(
            "nearest neighbour needs at least 2 points (got {})",
            points.len()
        )));
    }
    Ok(pairwise_distances(points, metric)?
        .into_iter()
        .map(|row| row.into_iter().fold(f64::INFINITY, f64::min))
        .collect())
}

/// Summed distance from each point to all others.
pub fn aggregate_neighbor_distances(
    points: &[&[f64]],
    metric: DistanceMetric,
) -> Result<Vec<f64>> {
    Ok(pairwise_distances(points, metric)?
        .into_iter()
        .map(|row| row.into_iter().sum())
        .collect())
}

fn validate_pair(a: &[f64], b: &[f64]) -> Result<()> {
    if a.len() != b.len() {
        return Err(TraitHullError::InvalidInput(format!(
            "dimension mismatch: {} vs {}",
            a.len(),
            b.len()
        )));
    }
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    #[test]
    fn euclidean_three_four_five() {
        assert!((euclidean(&[0.0, 0.0], &[3.0, 4.0]).unwrap() - 5.0).abs() < TOL);
        assert!((squared_euclidean(&[0.0, 0.0], &[3.0, 4.0]).unwrap() - 25.0).abs() < TOL);
    }

    #[test]
    fn dimension_mismatch_is_error() {
        assert!(euclidean(&[1.0], &[1.0, 2.0]).is_err());
    }

    #[test]
    fn species_distance_looks_up_matrix() {
        let m = TraitMatrix::from_rows(
            vec!["x".into(), "y".into()],
            vec![("A".into(), vec![0.0, 0.0]), ("B".into(), vec![0.0, 3.0])],
        )
        .unwrap();
        let d = species_distance(&m, "A", "B", DistanceMetric::Euclidean).unwrap();
        assert!((d - 3.0).abs() < TOL);
        assert!(species_distance(&m, "A", "Z", DistanceMetric::Euclidean).is_err());
    }

    #[test]
    fn pairwise_skips_self() {
        let pts: [&[f64]; 3] = [&[0.0], &[1.0], &[3.0]];
        let rows = pairwise_distances(&pts, DistanceMetric::Euclidean).unwrap();
        assert_eq!(rows, vec![vec![1.0, 3.0], vec![1.0, 2.0], vec![3.0, 2.0]]);
    }

    #[test]
    fn nearest_neighbor_minimum() {
        let pts: [&[f64]; 3] = [&[0.0], &[1.0], &[3.0]];
        let nn = nearest_neighbor_distances(&pts, DistanceMetric::Euclidean).unwrap();
        assert_eq!(nn, vec![1.0, 1.0, 2.0]);
    }

    #[test]
    fn nearest_neighbor_needs_two_points() {
        let pts: [&[f64]; 1] = [&[0.0]];
        assert!(nearest_neighbor_distances(&pts, DistanceMetric::Euclidean).is_err());
    }

    #[test]
    fn aggregate_sums_squared_distances() {
        let pts: [&[f64]; 3] = [&[0.0], &[1.0], &[3.0]];
        let agg = aggregate_neighbor_distances(&pts, DistanceMetric::SquaredEuclidean).unwrap();
        assert_eq!(agg, vec![10.0, 5.0, 13.0]);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn vector_pair() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
        (1usize..6).prop_flat_map(|d| {
            (
                proptest::collection::vec(-1e3..1e3f64, d),
                proptest::collection::vec(-1e3..1e3f64, d),
            )
        })
    }

    proptest! {
        #[test]
        fn euclidean_symmetric_and_non_negative((a, b) in vector_pair()) {
            let ab = euclidean(&a, &b).unwrap();
            let ba = euclidean(&b, &a).unwrap();
            prop_assert_eq!(ab, ba);
            prop_assert!(ab >= 0.0);
        }

        #[test]
        fn euclidean_self_is_zero((a, _b) in vector_pair()) {
            prop_assert_eq!(euclidean(&a, &a).unwrap(), 0.0);
        }
    }
}
