//! Interpretation summary: distributions and averages over the stage outputs

use crate::config::defaults;
use crate::stats;
use crate::types::{
    InterpretationSummary, LabelShare, LithologyResult, LithologyResults, PetrophysicsResult,
    ReservoirQuality,
};

/// Label shares among a method's classified depths, largest first (ties in label order)
pub fn label_shares(result: &LithologyResult) -> Vec<LabelShare> {
    let classified = result.classified_count();
    let mut shares: Vec<LabelShare> = result
        .distribution()
        .into_iter()
        .map(|(label, count)| LabelShare {
            label,
            name: label.to_string(),
            count,
            fraction: if classified == 0 {
                0.0
            } else {
                count as f64 / classified as f64
            },
        })
        .collect();
    shares.sort_by(|a, b| b.count.cmp(&a.count).then(a.label.cmp(&b.label)));
    shares
}

/// Porosity classes over the defined samples of `phi`; `None` when none are defined.
pub fn reservoir_quality(phi: &[Option<f64>]) -> Option<ReservoirQuality> {
    let values: Vec<f64> = phi.iter().flatten().copied().collect();
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let share = |pred: &dyn Fn(f64) -> bool| values.iter().filter(|&&v| pred(v)).count() as f64 / n;
    Some(ReservoirQuality {
        excellent: share(&|v| v > defaults::QUALITY_EXCELLENT_MIN),
        good: share(&|v| v > defaults::QUALITY_GOOD_MIN && v <= defaults::QUALITY_EXCELLENT_MIN),
        fair: share(&|v| v > defaults::QUALITY_FAIR_MIN && v <= defaults::QUALITY_GOOD_MIN),
        poor: share(&|v| v <= defaults::QUALITY_FAIR_MIN),
        samples: values.len(),
    })
}

pub fn summarize(lithology: &LithologyResults, petrophysics: &PetrophysicsResult) -> InterpretationSummary {
    let mut summary = InterpretationSummary {
        lithology: lithology
            .iter()
            .map(|(method, result)| (*method, label_shares(result)))
            .collect(),
        ..InterpretationSummary::default()
    };

    if let Some(phi) = &petrophysics.porosity {
        summary.average_porosity = stats::mean_defined(&phi.phi_corrected);
        if !phi.gas_flag.is_empty() {
            summary.gas_fraction = Some(phi.gas_count() as f64 / phi.gas_flag.len() as f64);
        }
        summary.reservoir_quality = reservoir_quality(&phi.phi_corrected);
    }
    if let Some(sat) = &petrophysics.saturation {
        summary.average_water_saturation = stats::mean_defined(&sat.sw);
        summary.average_hydrocarbon_saturation = stats::mean_defined(&sat.sh);
    }
    if let Some(k) = &petrophysics.permeability {
        summary.average_permeability = stats::mean_defined(&k.k_average);
    }
    if let Some(ntg) = &petrophysics.net_to_gross {
        summary.net_to_gross = Some(ntg.ratio);
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        LithologyDetail, LithologyLabel, LithologyMethod, PhotoelectricDetail, PorosityResult,
    };

    #[test]
    fn test_reservoir_quality_classes() {
        let phi = [Some(0.20), Some(0.15), Some(0.12), Some(0.10), Some(0.07), Some(0.05), None, Some(0.0)];
        let q = reservoir_quality(&phi).unwrap();
        assert_eq!(q.samples, 7);
        assert!((q.excellent - 1.0 / 7.0).abs() < 1e-12);
        assert!((q.good - 2.0 / 7.0).abs() < 1e-12);
        assert!((q.fair - 2.0 / 7.0).abs() < 1e-12);
        assert!((q.poor - 2.0 / 7.0).abs() < 1e-12);
        assert!((q.excellent + q.good + q.fair + q.poor - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_label_shares_sorted_by_count() {
        let result = LithologyResult {
            method: LithologyMethod::Photoelectric,
            labels: vec![
                Some(LithologyLabel::Dolomite),
                Some(LithologyLabel::Unknown),
                Some(LithologyLabel::Unknown),
                None,
            ],
            detail: LithologyDetail::Photoelectric(PhotoelectricDetail {
                curve: "PE".to_string(),
                pe: vec![],
            }),
        };
        let shares = label_shares(&result);
        assert_eq!(shares[0].label, LithologyLabel::Unknown);
        assert_eq!(shares[0].name, "Unknown");
        assert!((shares[0].fraction - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(shares[1].count, 1);
    }

    #[test]
    fn test_summary_of_empty_outputs() {
        let summary = summarize(&LithologyResults::default(), &PetrophysicsResult::default());
        assert_eq!(summary, InterpretationSummary::default());
    }

    #[test]
    fn test_gas_fraction_and_average_porosity() {
        let petro = PetrophysicsResult {
            porosity: Some(PorosityResult {
                matrix_density: 2.65,
                fluid_density: 1.0,
                phi_density: vec![],
                phi_neutron: vec![],
                phi_combined: vec![],
                phi_corrected: vec![Some(0.1), Some(0.3), None, Some(0.2)],
                gas_flag: vec![false, true, false, false],
            }),
            ..PetrophysicsResult::default()
        };
        let summary = summarize(&LithologyResults::default(), &petro);
        assert!((summary.average_porosity.unwrap() - 0.2).abs() < 1e-12);
        assert!((summary.gas_fraction.unwrap() - 0.25).abs() < 1e-12);
        assert!(summary.average_water_saturation.is_none());
    }
}
