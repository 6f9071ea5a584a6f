//! Empirical porosity-permeability transforms (mD)

use crate::config::defaults::{
    KOZENY_CARMAN_COEFFICIENT, MAX_POROSITY, TIMUR_COEFFICIENT, TIMUR_EXPONENT,
};
use crate::types::PermeabilityResult;

/// Porosity is held at or below `MAX_POROSITY` (the validated ceiling of the
/// porosity clip) before the `(1 - phi)^2` division.
fn bounded(phi: f64) -> f64 {
    phi.clamp(0.0, MAX_POROSITY)
}

/// Kozeny-Carman: `5000 * phi^3 / (1 - phi)^2`
pub fn kozeny_carman(phi: f64) -> f64 {
    let phi = bounded(phi);
    KOZENY_CARMAN_COEFFICIENT * phi.powi(3) / (1.0 - phi).powi(2)
}

/// Timur: `0.136 * phi^4.4 / (1 - phi)^2`
pub fn timur(phi: f64) -> f64 {
    let phi = bounded(phi);
    TIMUR_COEFFICIENT * phi.powf(TIMUR_EXPONENT) / (1.0 - phi).powi(2)
}

pub fn compute(phi: &[Option<f64>]) -> PermeabilityResult {
    let k_kozeny_carman: Vec<Option<f64>> = phi.iter().map(|p| p.map(kozeny_carman)).collect();
    let k_timur: Vec<Option<f64>> = phi.iter().map(|p| p.map(timur)).collect();
    let k_average = k_kozeny_carman
        .iter()
        .zip(&k_timur)
        .map(|(kc, kt)| Some((kc.as_ref()? + kt.as_ref()?) / 2.0))
        .collect();
    PermeabilityResult {
        k_kozeny_carman,
        k_timur,
        k_average,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twenty_percent_porosity() {
        let result = compute(&[Some(0.20)]);
        let kc = result.k_kozeny_carman[0].unwrap();
        let kt = result.k_timur[0].unwrap();
        assert!((kc - 62.5).abs() < 1e-9);
        assert!((kt - 0.136 * 0.2f64.powf(4.4) / 0.64).abs() < 1e-12);
        // the two correlations differ by orders of magnitude here
        assert!(kc / kt > 1e4);
        assert!((result.k_average[0].unwrap() - (kc + kt) / 2.0).abs() < 1e-12);
        assert!((result.k_average[0].unwrap() - 31.25).abs() < 0.01);
    }

    #[test]
    fn test_permeability_non_negative_and_finite() {
        for phi in [-0.1, 0.0, 0.3, 0.5, 0.99, 1.0] {
            let kc = kozeny_carman(phi);
            let kt = timur(phi);
            assert!(kc >= 0.0 && kc.is_finite());
            assert!(kt >= 0.0 && kt.is_finite());
        }
        assert_eq!(kozeny_carman(0.0), 0.0);
    }

    #[test]
    fn test_missing_porosity_propagates() {
        let result = compute(&[None, Some(0.1)]);
        assert_eq!(result.k_average[0], None);
        assert!(result.k_average[1].is_some());
    }
}
