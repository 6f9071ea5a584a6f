//! Neutron-density cross-plot classification
//!
//! Nearest matrix point in (neutron porosity, bulk density) space, with the
//! density axis down-weighted, and a gas-effect override for light, low-neutron
//! readings.

use crate::config::{NeutronDensityConfig, NeutronScale};
use crate::types::{
    LithologyDetail, LithologyLabel, LithologyMethod, LithologyResult, LogCurve,
    NeutronDensityDetail,
};

/// A zero-porosity matrix reference point
#[derive(Debug, Clone, Copy)]
pub struct MatrixPoint {
    pub label: LithologyLabel,
    pub neutron: f64,
    pub density: f64,
}

pub const MATRIX_POINTS: [MatrixPoint; 4] = [
    MatrixPoint {
        label: LithologyLabel::Sandstone,
        neutron: 0.0,
        density: 2.65,
    },
    MatrixPoint {
        label: LithologyLabel::Limestone,
        neutron: 0.0,
        density: 2.71,
    },
    MatrixPoint {
        label: LithologyLabel::Dolomite,
        neutron: 0.0,
        density: 2.87,
    },
    MatrixPoint {
        label: LithologyLabel::Anhydrite,
        neutron: 0.0,
        density: 2.96,
    },
];

/// Neutron curve values converted to fractions
pub fn scaled_neutron(curve: &LogCurve, scale: NeutronScale) -> Vec<Option<f64>> {
    let factor = scale.factor_for(curve);
    curve.values().iter().map(|v| v.map(|n| n * factor)).collect()
}

/// Nearest matrix point and its weighted distance. Ties go to the earlier point.
pub fn nearest_matrix(neutron: f64, density: f64, density_weight: f64) -> (LithologyLabel, f64) {
    let mut best = (MATRIX_POINTS[0].label, f64::INFINITY);
    for point in &MATRIX_POINTS {
        let dn = neutron - point.neutron;
        let dd = density - point.density;
        let distance = (dn * dn + dd * dd * density_weight).sqrt();
        if distance < best.1 {
            best = (point.label, distance);
        }
    }
    best
}

pub fn is_gas_effect(neutron: f64, density: f64, config: &NeutronDensityConfig) -> bool {
    density < config.gas_density_max && neutron < config.gas_neutron_max
}

pub fn classify(
    neutron_curve: &LogCurve,
    density_curve: &LogCurve,
    scale: NeutronScale,
    config: &NeutronDensityConfig,
) -> LithologyResult {
    let neutron = scaled_neutron(neutron_curve, scale);
    let density = density_curve.values().to_vec();

    let n = neutron.len();
    let mut labels = Vec::with_capacity(n);
    let mut matrix_distance = Vec::with_capacity(n);
    let mut gas_override = Vec::with_capacity(n);

    for (nphi, rhob) in neutron.iter().zip(&density) {
        match (nphi, rhob) {
            (Some(nphi), Some(rhob)) => {
                let (nearest, distance) = nearest_matrix(*nphi, *rhob, config.density_weight);
                let gas = is_gas_effect(*nphi, *rhob, config);
                labels.push(Some(if gas { LithologyLabel::GasSand } else { nearest }));
                matrix_distance.push(Some(distance));
                gas_override.push(gas);
            }
            _ => {
                labels.push(None);
                matrix_distance.push(None);
                gas_override.push(false);
            }
        }
    }

    LithologyResult {
        method: LithologyMethod::NeutronDensity,
        labels,
        detail: LithologyDetail::NeutronDensity(NeutronDensityDetail {
            neutron_curve: neutron_curve.mnemonic.clone(),
            density_curve: density_curve.mnemonic.clone(),
            neutron,
            density,
            matrix_distance,
            gas_override,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gas_override_fires() {
        let config = NeutronDensityConfig::default();
        assert!(is_gas_effect(0.12, 2.25, &config));
        assert!(!is_gas_effect(0.15, 2.25, &config));
        assert!(!is_gas_effect(0.12, 2.30, &config));

        let neutron = LogCurve::new("NPHI", "V/V", vec![Some(0.12)]);
        let density = LogCurve::new("RHOB", "G/C3", vec![Some(2.25)]);
        let result = classify(&neutron, &density, NeutronScale::Auto, &config);
        assert_eq!(result.labels, vec![Some(LithologyLabel::GasSand)]);
    }

    #[test]
    fn test_nearest_matrix_points() {
        assert_eq!(nearest_matrix(0.0, 2.66, 0.1).0, LithologyLabel::Sandstone);
        assert_eq!(nearest_matrix(0.0, 2.70, 0.1).0, LithologyLabel::Limestone);
        assert_eq!(nearest_matrix(0.02, 2.88, 0.1).0, LithologyLabel::Dolomite);
        assert_eq!(nearest_matrix(0.0, 3.05, 0.1).0, LithologyLabel::Anhydrite);
    }

    #[test]
    fn test_density_axis_weighting() {
        let (_, d) = nearest_matrix(0.3, 2.75, 0.1);
        // nearest is limestone: sqrt(0.09 + 0.0016 * 0.1)
        assert!((d - (0.09f64 + 0.000_16).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_percent_neutron_scaled_to_fraction() {
        let neutron = LogCurve::new("NPRL", "%", vec![Some(12.0), None]);
        let density = LogCurve::new("DEN", "G/C3", vec![Some(2.25), Some(2.5)]);
        let result = classify(&neutron, &density, NeutronScale::Auto, &NeutronDensityConfig::default());
        assert_eq!(result.labels, vec![Some(LithologyLabel::GasSand), None]);
        let LithologyDetail::NeutronDensity(detail) = &result.detail else {
            panic!("expected neutron-density detail");
        };
        assert!((detail.neutron[0].unwrap() - 0.12).abs() < 1e-12);
        assert_eq!(detail.gas_override, vec![true, false]);
    }
}
