//! Descriptive statistics shared by the quality and lithology stages.
//!
//! Quantiles use linear interpolation between closest ranks
//! (`h = (n - 1) * q`), the convention of common data-frame tooling, so that
//! baselines agree with values a petrophysicist computes in a spreadsheet.
//! Mean and standard deviation come from `statrs`.

use statrs::statistics::Statistics;

/// Sort a copy of `values` ascending.
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut v = values.to_vec();
    v.sort_by(f64::total_cmp);
    v
}

/// Quantile `q` in [0, 1] of already-sorted data. `None` for empty input.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    let q = q.clamp(0.0, 1.0);
    let h = (n - 1) as f64 * q;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    let frac = h - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Quantile `q` in [0, 1] of unsorted data
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    quantile_sorted(&sorted(values), q)
}

/// Percentile `p` in [0, 100] of unsorted data
pub fn percentile(values: &[f64], p: f64) -> Option<f64> {
    quantile(values, p / 100.0)
}

/// Arithmetic mean, `None` for empty input
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.mean())
    }
}

/// Population (ddof = 0) standard deviation, `None` for empty input
pub fn population_std_dev(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.population_std_dev())
    }
}

/// Mean of the defined entries of a series
pub fn mean_defined(series: &[Option<f64>]) -> Option<f64> {
    let values: Vec<f64> = series.iter().flatten().copied().collect();
    mean(&values)
}

/// (min, max) of a non-empty slice
pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}

/// Median of unsorted data
pub fn median(values: &[f64]) -> Option<f64> {
    quantile(values, 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quartiles_of_five_values() {
        let v = [1.0, 2.0, 3.0, 4.0, 100.0];
        assert_eq!(quantile(&v, 0.25), Some(2.0));
        assert_eq!(quantile(&v, 0.75), Some(4.0));
        assert_eq!(median(&v), Some(3.0));
    }

    #[test]
    fn test_quantile_interpolates() {
        let v = [10.0, 20.0, 30.0, 40.0];
        // h = 3 * 0.5 = 1.5 -> halfway between 20 and 30
        assert!((quantile(&v, 0.5).unwrap() - 25.0).abs() < 1e-12);
        // h = 3 * 0.05 = 0.15 -> 10 + 0.15 * 10
        assert!((percentile(&v, 5.0).unwrap() - 11.5).abs() < 1e-12);
    }

    #[test]
    fn test_quantile_unsorted_input() {
        let v = [4.0, 1.0, 3.0, 2.0];
        assert_eq!(quantile(&v, 0.0), Some(1.0));
        assert_eq!(quantile(&v, 1.0), Some(4.0));
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(quantile(&[], 0.5), None);
        assert_eq!(mean(&[]), None);
        assert_eq!(population_std_dev(&[]), None);
        assert_eq!(min_max(&[]), None);
    }

    #[test]
    fn test_population_std_dev() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((population_std_dev(&v).unwrap() - 2.0).abs() < 1e-12);
        assert!((mean(&v).unwrap() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_mean_defined_skips_missing() {
        let s = [Some(1.0), None, Some(3.0)];
        assert_eq!(mean_defined(&s), Some(2.0));
        assert_eq!(mean_defined(&[None, None]), None);
    }
}
