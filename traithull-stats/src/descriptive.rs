//! Descriptive statistics for numeric samples.
//!
//! Provides [`mean`], [`variance`], [`range`], the population excess
//! [`kurtosis`], and the small-sample corrected estimator
//! [`corrected_kurtosis`] (G2, Sokal & Rohlf).

use traithull_core::{Result, TraitHullError};

/// Value written in place of G2 when it cannot be computed.
///
/// Downstream consumers read it as an ordinary number.
pub const KURTOSIS_SENTINEL: f64 = -99.0;

/// Arithmetic mean.
pub fn mean(data: &[f64]) -> Result<f64> {
    if data.is_empty() {
        return Err(TraitHullError::InvalidInput(
            "mean: data must not be empty".into(),
        ));
    }
    Ok(data.iter().sum::<f64>() / data.len() as f64)
}

/// Variance with given degrees-of-freedom correction.
///
/// - `ddof = 0` → population variance
/// - `ddof = 1` → sample variance (Bessel's correction)
pub fn variance(data: &[f64], ddof: usize) -> Result<f64> {
    let n = data.len();
    if n <= ddof || n == 0 {
        return Err(TraitHullError::InvalidInput(format!(
            "variance: need more than {} observations (got {})",
            ddof, n,
        )));
    }
    let m = mean(data)?;
    let ss: f64 = data.iter().map(|&x| (x - m).powi(2)).sum();
    Ok(ss / (n - ddof) as f64)
}

/// Sample variance, or `None` with fewer than two observations.
pub fn sample_variance(data: &[f64]) -> Option<f64> {
    variance(data, 1).ok()
}

/// Range (max - min).
pub fn range(data: &[f64]) -> Result<f64> {
    if data.is_empty() {
        return Err(TraitHullError::InvalidInput(
            "range: data must not be empty".into(),
        ));
    }
    let (lo, hi) = data
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
            (lo.min(x), hi.max(x))
        });
    Ok(hi - lo)
}

/// Excess kurtosis from population moments: `m4 / m2² - 3`.
///
/// Returns `None` when the sample is empty or has zero variance.
pub fn kurtosis(data: &[f64]) -> Option<f64> {
    let n = data.len() as f64;
    let m = mean(data).ok()?;
    let (m2, m4) = data.iter().fold((0.0, 0.0), |(m2, m4), &x| {
        let d2 = (x - m) * (x - m);
        (m2 + d2, m4 + d2 * d2)
    });
    let (m2, m4) = (m2 / n, m4 / n);
    if m2 == 0.0 {
        return None;
    }
    Some(m4 / (m2 * m2) - 3.0)
}

/// Corrected excess kurtosis G2.
///
/// `G2 = ((n + 1) g2 + 6) (n - 1) / ((n - 2) (n - 3))` where `g2` is the
/// population excess [`kurtosis`]. Undefined, and `None`, for fewer than
/// four observations or a constant sample.
pub fn corrected_kurtosis(data: &[f64]) -> Option<f64> {
    let n = data.len();
    if n < 4 {
        return None;
    }
    let g2 = kurtosis(data)?;
    let n = n as f64;
    Some(((n + 1.0) * g2 + 6.0) * (n - 1.0) / ((n - 2.0) * (n - 3.0)))
}

/// A kurtosis estimate with [`KURTOSIS_SENTINEL`] standing in for `None`.
pub fn kurtosis_or_sentinel(kurtosis: Option<f64>) -> f64 {
    kurtosis.unwrap_or(KURTOSIS_SENTINEL)
}

/// [`corrected_kurtosis`] with [`KURTOSIS_SENTINEL`] standing in for `None`.
pub fn corrected_kurtosis_or_sentinel(data: &[f64]) -> f64 {
    kurtosis_or_sentinel(corrected_kurtosis(data))
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    #[test]
    fn mean_basic() {
        assert!((mean(&[2.0, 4.0, 6.0]).unwrap() - 4.0).abs() < TOL);
    }

    #[test]
    fn mean_empty() {
        assert!(mean(&[]).is_err());
    }

    #[test]
    fn variance_population() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((variance(&data, 0).unwrap() - 4.0).abs() < TOL);
    }

    #[test]
    fn variance_sample() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let expected = 32.0 / 7.0;
        assert!((variance(&data, 1).unwrap() - expected).abs() < TOL);
    }

    #[test]
    fn variance_too_few() {
        assert!(variance(&[1.0], 1).is_err());
        assert!(variance(&[], 0).is_err());
        assert!(sample_variance(&[1.0]).is_none());
    }

    #[test]
    fn range_basic() {
        assert!((range(&[3.0, -1.0, 7.5]).unwrap() - 8.5).abs() < TOL);
        assert_eq!(range(&[2.0]).unwrap(), 0.0);
        assert!(range(&[]).is_err());
    }

    #[test]
    fn kurtosis_uniform_five() {
        // m2 = 2, m4 = 6.8 → 1.7 - 3
        let k = kurtosis(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert!((k + 1.3).abs() < TOL);
    }

    #[test]
    fn corrected_kurtosis_matches_known_values() {
        let g2 = corrected_kurtosis(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert!((g2 + 1.2).abs() < TOL);
        let g2 = corrected_kurtosis(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert!((g2 + 1.2).abs() < TOL);
    }

    #[test]
    fn corrected_kurtosis_heavy_tail_positive() {
        let data = [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 10.0];
        assert!(corrected_kurtosis(&data).unwrap() > 0.0);
    }

    #[test]
    fn corrected_kurtosis_small_sample_is_sentinel() {
        assert!(corrected_kurtosis(&[1.0, 2.0, 3.0]).is_none());
        assert_eq!(corrected_kurtosis_or_sentinel(&[]), -99.0);
        assert_eq!(corrected_kurtosis_or_sentinel(&[1.0]), -99.0);
        assert_eq!(corrected_kurtosis_or_sentinel(&[1.0, 2.0]), -99.0);
        assert_eq!(corrected_kurtosis_or_sentinel(&[1.0, 2.0, 3.0]), -99.0);
    }

    #[test]
    fn corrected_kurtosis_constant_sample() {
        assert!(corrected_kurtosis(&[5.0; 6]).is_none());
        assert_eq!(corrected_kurtosis_or_sentinel(&[5.0; 6]), KURTOSIS_SENTINEL);
    }

    #[test]
    fn sentinel_only_replaces_missing_estimates() {
        assert_eq!(kurtosis_or_sentinel(None), KURTOSIS_SENTINEL);
        assert_eq!(kurtosis_or_sentinel(Some(-1.2)), -1.2);
        let g2 = corrected_kurtosis(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(corrected_kurtosis_or_sentinel(&[1.0, 2.0, 3.0, 4.0]), kurtosis_or_sentinel(g2));
    }
}
