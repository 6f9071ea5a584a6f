//! Density, neutron and gas-corrected porosity

use crate::config::{NeutronScale, PorosityConfig};
use crate::lithology::neutron_density::scaled_neutron;
use crate::types::{LogCurve, PorosityResult};

/// Density porosity `(rho_ma - rho_b) / (rho_ma - rho_f)`, unclipped
pub fn density_porosity(rhob: f64, matrix_density: f64, fluid_density: f64) -> f64 {
    (matrix_density - rhob) / (matrix_density - fluid_density)
}

/// Porosity at one depth: (phi_d, phi_n, phi_combined, phi_corrected, gas)
pub fn porosity_at(nphi: f64, rhob: f64, config: &PorosityConfig) -> (f64, f64, f64, f64, bool) {
    let clip = |phi: f64| phi.clamp(0.0, config.max_porosity);
    let phi_d = clip(density_porosity(rhob, config.matrix_density, config.fluid_density));
    let phi_n = clip(nphi);
    let combined = (phi_d + phi_n) / 2.0;
    let gas = phi_n < phi_d - config.gas_threshold;
    let corrected = if gas { phi_d } else { combined };
    (phi_d, phi_n, combined, corrected, gas)
}

/// Porosity series over the depth index.
///
/// `crossplot_gas`, when given, marks extra gas depths (neutron-density Gas Sand)
/// that also take density porosity as the corrected value.
pub fn compute(
    neutron: &LogCurve,
    density: &LogCurve,
    scale: NeutronScale,
    config: &PorosityConfig,
    crossplot_gas: Option<&[bool]>,
) -> PorosityResult {
    let nphi = scaled_neutron(neutron, scale);
    let n = nphi.len();
    let mut result = PorosityResult {
        matrix_density: config.matrix_density,
        fluid_density: config.fluid_density,
        phi_density: Vec::with_capacity(n),
        phi_neutron: Vec::with_capacity(n),
        phi_combined: Vec::with_capacity(n),
        phi_corrected: Vec::with_capacity(n),
        gas_flag: Vec::with_capacity(n),
    };

    for (i, (nphi, rhob)) in nphi.iter().zip(density.values()).enumerate() {
        // each series is defined where its own input is
        let phi_d = rhob.map(|r| {
            density_porosity(r, config.matrix_density, config.fluid_density)
                .clamp(0.0, config.max_porosity)
        });
        let phi_n = nphi.map(|v| v.clamp(0.0, config.max_porosity));
        result.phi_density.push(phi_d);
        result.phi_neutron.push(phi_n);

        match (nphi, rhob) {
            (Some(nphi), Some(rhob)) => {
                let (phi_d, _, combined, corrected, gas) = porosity_at(*nphi, *rhob, config);
                let crossplot = crossplot_gas.and_then(|g| g.get(i)).copied().unwrap_or(false);
                let gas = gas || crossplot;
                result.phi_combined.push(Some(combined));
                result.phi_corrected.push(Some(if gas { phi_d } else { corrected }));
                result.gas_flag.push(gas);
            }
            _ => {
                result.phi_combined.push(None);
                result.phi_corrected.push(None);
                result.gas_flag.push(false);
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_density_porosity_sandstone() {
        // 2.65 - 2.32 = 0.33 over 1.65
        assert!((density_porosity(2.32, 2.65, 1.0) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_combined_porosity_without_gas() {
        let (phi_d, phi_n, combined, corrected, gas) =
            porosity_at(0.22, 2.32, &PorosityConfig::default());
        assert!((phi_d - 0.2).abs() < 1e-12);
        assert!((phi_n - 0.22).abs() < 1e-12);
        assert!((combined - 0.21).abs() < 1e-12);
        assert_eq!(corrected, combined);
        assert!(!gas);
    }

    #[test]
    fn test_gas_effect_uses_density_porosity() {
        // phi_d = 0.2, phi_n = 0.1 < 0.2 - 0.04
        let (phi_d, _, _, corrected, gas) = porosity_at(0.10, 2.32, &PorosityConfig::default());
        assert!(gas);
        assert_eq!(corrected, phi_d);
    }

    #[test]
    fn test_porosities_clipped() {
        let config = PorosityConfig::default();
        let (phi_d, phi_n, ..) = porosity_at(-0.05, 2.9, &config);
        assert_eq!(phi_d, 0.0);
        assert_eq!(phi_n, 0.0);
        let (phi_d, phi_n, combined, corrected, _) = porosity_at(0.9, 1.2, &config);
        assert_eq!(phi_d, 0.5);
        assert_eq!(phi_n, 0.5);
        assert!(combined <= 0.5 && corrected <= 0.5);
    }

    #[test]
    fn test_series_with_missing_and_percent_neutron() {
        let neutron = LogCurve::new("NPRL", "%", vec![Some(22.0), None, Some(10.0)]);
        let density = LogCurve::new("DEN", "G/C3", vec![Some(2.32), Some(2.32), Some(2.32)]);
        let result = compute(&neutron, &density, NeutronScale::Auto, &PorosityConfig::default(), None);
        assert!((result.phi_corrected[0].unwrap() - 0.21).abs() < 1e-12);
        assert_eq!(result.phi_corrected[1], None);
        assert!(result.phi_density[1].is_some());
        assert_eq!(result.gas_flag, vec![false, false, true]);
        assert_eq!(result.gas_count(), 1);
    }

    #[test]
    fn test_crossplot_gas_marks_extra_depths() {
        let neutron = LogCurve::new("NPHI", "V/V", vec![Some(0.22)]);
        let density = LogCurve::new("RHOB", "G/C3", vec![Some(2.32)]);
        let result = compute(
            &neutron,
            &density,
            NeutronScale::Auto,
            &PorosityConfig::default(),
            Some(&[true]),
        );
        assert_eq!(result.gas_flag, vec![true]);
        assert!((result.phi_corrected[0].unwrap() - 0.2).abs() < 1e-12);
    }
}
