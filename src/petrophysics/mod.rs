//! Petrophysical Calculator
//!
//! Derives porosity, water saturation, permeability and net-to-gross from the
//! loaded curves. Saturation and permeability consume the corrected porosity
//! series; any property whose inputs are absent is recorded as skipped.

pub mod net_to_gross;
pub mod permeability;
pub mod porosity;
pub mod saturation;

use tracing::{debug, info};

use crate::config::AnalysisConfig;
use crate::types::{
    CurveRole, LithologyDetail, LithologyMethod, LithologyResults, LogDataset, PetrophysicsProperty,
    PetrophysicsResult, SkipReason,
};

pub struct PetrophysicsCalculator;

impl PetrophysicsCalculator {
    /// Compute every available property.
    ///
    /// `lithology` is only consulted when `include_crossplot_gas` is enabled.
    pub fn calculate(
        dataset: &LogDataset,
        lithology: Option<&LithologyResults>,
        config: &AnalysisConfig,
    ) -> PetrophysicsResult {
        let aliases = &config.curves;
        let petro = &config.petrophysics;
        let mut result = PetrophysicsResult::default();

        // Porosity
        match (
            aliases.resolve(dataset, CurveRole::NeutronPorosity),
            aliases.resolve(dataset, CurveRole::BulkDensity),
        ) {
            (Some(neutron), Some(density)) => {
                let crossplot_gas = if petro.porosity.include_crossplot_gas {
                    lithology
                        .and_then(|l| l.get(LithologyMethod::NeutronDensity))
                        .and_then(|r| match &r.detail {
                            LithologyDetail::NeutronDensity(d) => Some(d.gas_override.as_slice()),
                            _ => None,
                        })
                } else {
                    None
                };
                let phi = porosity::compute(
                    neutron,
                    density,
                    aliases.neutron_scale,
                    &petro.porosity,
                    crossplot_gas,
                );
                debug!(
                    neutron = %neutron.mnemonic,
                    density = %density.mnemonic,
                    gas_points = phi.gas_count(),
                    "Porosity computed"
                );
                result.porosity = Some(phi);
            }
            _ => {
                let roles = aliases.missing(
                    dataset,
                    &[CurveRole::NeutronPorosity, CurveRole::BulkDensity],
                );
                result
                    .skipped
                    .insert(PetrophysicsProperty::Porosity, SkipReason::MissingCurves { roles });
            }
        }

        // Water saturation
        match (
            aliases.resolve(dataset, CurveRole::Resistivity),
            result.porosity.as_ref(),
        ) {
            (Some(rt), Some(phi)) => {
                let sw = saturation::compute(&phi.phi_corrected, rt, petro.archie);
                debug!(resistivity = %rt.mnemonic, "Water saturation computed");
                result.saturation = Some(sw);
            }
            (None, _) => {
                result.skipped.insert(
                    PetrophysicsProperty::WaterSaturation,
                    SkipReason::MissingCurves {
                        roles: vec![CurveRole::Resistivity],
                    },
                );
            }
            (Some(_), None) => {
                result.skipped.insert(
                    PetrophysicsProperty::WaterSaturation,
                    porosity_dependency(),
                );
            }
        }

        // Permeability
        match result.porosity.as_ref() {
            Some(phi) => result.permeability = Some(permeability::compute(&phi.phi_corrected)),
            None => {
                result
                    .skipped
                    .insert(PetrophysicsProperty::Permeability, porosity_dependency());
            }
        }

        // Net-to-gross
        match aliases.resolve(dataset, CurveRole::GammaRay) {
            Some(gr) => {
                let ntg = net_to_gross::compute(gr, petro.net_to_gross.gr_cutoff, dataset.step());
                debug!(curve = %gr.mnemonic, ratio = ntg.ratio, "Net-to-gross computed");
                result.net_to_gross = Some(ntg);
            }
            None => {
                result.skipped.insert(
                    PetrophysicsProperty::NetToGross,
                    SkipReason::MissingCurves {
                        roles: vec![CurveRole::GammaRay],
                    },
                );
            }
        }

        for (property, reason) in &result.skipped {
            info!(property = %property, reason = %reason, "Petrophysical property skipped");
        }
        result
    }
}

fn porosity_dependency() -> SkipReason {
    SkipReason::MissingDependency {
        dependency: PetrophysicsProperty::Porosity.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lithology::LithologyClassifier;
    use crate::types::{LoadDiagnostics, LogCurve, ParserKind, WellHeader};

    fn dataset(curves: Vec<LogCurve>) -> LogDataset {
        let n = curves[0].len();
        LogDataset::new(
            "DEPT",
            "F",
            (0..n).map(|i| 3000.0 + i as f64 * 0.5).collect(),
            curves,
            WellHeader::new(),
            -999.25,
            0.5,
            LoadDiagnostics::new(ParserKind::Sectioned),
        )
        .unwrap()
    }

    #[test]
    fn test_full_curve_set() {
        let ds = dataset(vec![
            LogCurve::new("GR", "GAPI", vec![Some(40.0), Some(100.0)]),
            LogCurve::new("NPHI", "V/V", vec![Some(0.22), Some(0.30)]),
            LogCurve::new("RHOB", "G/C3", vec![Some(2.32), Some(2.45)]),
            LogCurve::new("RT", "OHMM", vec![Some(50.0), Some(2.0)]),
        ]);
        let result = PetrophysicsCalculator::calculate(&ds, None, &AnalysisConfig::default());
        assert!(result.skipped.is_empty());
        for property in [
            PetrophysicsProperty::Porosity,
            PetrophysicsProperty::WaterSaturation,
            PetrophysicsProperty::Permeability,
            PetrophysicsProperty::NetToGross,
        ] {
            assert!(result.is_available(property));
        }
        let ntg = result.net_to_gross.unwrap();
        assert!((ntg.ratio - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_without_resistivity() {
        let ds = dataset(vec![
            LogCurve::new("NPHI", "V/V", vec![Some(0.22)]),
            LogCurve::new("RHOB", "G/C3", vec![Some(2.32)]),
        ]);
        let result = PetrophysicsCalculator::calculate(&ds, None, &AnalysisConfig::default());
        assert!(result.is_available(PetrophysicsProperty::Porosity));
        assert!(result.is_available(PetrophysicsProperty::Permeability));
        assert_eq!(
            result.skip_reason(PetrophysicsProperty::WaterSaturation),
            Some(&SkipReason::MissingCurves {
                roles: vec![CurveRole::Resistivity]
            })
        );
        assert!(result.skip_reason(PetrophysicsProperty::NetToGross).is_some());
    }

    #[test]
    fn test_porosity_dependency_chain() {
        let ds = dataset(vec![
            LogCurve::new("RT", "OHMM", vec![Some(10.0)]),
            LogCurve::new("RHOB", "G/C3", vec![Some(2.32)]),
        ]);
        let result = PetrophysicsCalculator::calculate(&ds, None, &AnalysisConfig::default());
        assert_eq!(
            result.skip_reason(PetrophysicsProperty::Porosity),
            Some(&SkipReason::MissingCurves {
                roles: vec![CurveRole::NeutronPorosity]
            })
        );
        assert_eq!(
            result.skip_reason(PetrophysicsProperty::WaterSaturation),
            Some(&porosity_dependency())
        );
        assert_eq!(
            result.skip_reason(PetrophysicsProperty::Permeability),
            Some(&porosity_dependency())
        );
    }

    #[test]
    fn test_crossplot_gas_opt_in() {
        // Gas Sand on a widened cross-plot window, no porosity separation
        let ds = dataset(vec![
            LogCurve::new("NPHI", "V/V", vec![Some(0.12)]),
            LogCurve::new("RHOB", "G/C3", vec![Some(2.45)]),
        ]);
        let mut config = AnalysisConfig::default();
        config.lithology.neutron_density.gas_density_max = 2.5;
        let lithology = LithologyClassifier::classify(&ds, &config);

        let plain = PetrophysicsCalculator::calculate(&ds, Some(&lithology), &config);
        assert_eq!(plain.porosity.unwrap().gas_flag, vec![false]);

        config.petrophysics.porosity.include_crossplot_gas = true;
        let with_gas = PetrophysicsCalculator::calculate(&ds, Some(&lithology), &config);
        let phi = with_gas.porosity.unwrap();
        assert_eq!(phi.gas_flag, vec![true]);
        assert_eq!(phi.phi_corrected, phi.phi_density);
    }

    #[test]
    fn test_permeability_uses_reported_porosity() {
        let ds = dataset(vec![
            LogCurve::new("NPHI", "V/V", vec![Some(0.8), Some(0.25)]),
            LogCurve::new("RHOB", "G/C3", vec![Some(1.4), Some(2.3)]),
        ]);
        let result = PetrophysicsCalculator::calculate(&ds, None, &AnalysisConfig::default());
        let phi = result.porosity.unwrap();
        let k = result.permeability.unwrap();
        assert_eq!(phi.phi_corrected[0], Some(0.5));
        for (phi, kc) in phi.phi_corrected.iter().zip(&k.k_kozeny_carman) {
            let (phi, kc) = (phi.unwrap(), kc.unwrap());
            assert!((0.0..=0.5).contains(&phi));
            assert!((kc - 5000.0 * phi.powi(3) / (1.0 - phi).powi(2)).abs() < 1e-9);
        }
    }
}
