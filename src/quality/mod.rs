//! Data Quality Assessor
//!
//! One read-only pass over a loaded dataset: per-curve completeness, IQR
//! outlier screening and descriptive statistics, plus a depth-index summary.
//! The dataset is never modified.

use tracing::{debug, info, warn};

use crate::config::{defaults, QualityConfig};
use crate::stats;
use crate::types::{
    CurveQuality, CurveStatistics, LogCurve, LogDataset, OutlierScreen, QualityReport,
    QualityWarning,
};

pub struct QualityAssessor;

impl QualityAssessor {
    /// Build the quality report for `dataset`
    pub fn assess(dataset: &LogDataset, config: &QualityConfig) -> QualityReport {
        let curves: Vec<CurveQuality> = dataset
            .curves()
            .iter()
            .map(|curve| assess_curve(curve, config))
            .collect();

        let (depth_min, depth_max) = dataset.depth_range();
        let diffs: Vec<f64> = dataset.depth().windows(2).map(|w| w[1] - w[0]).collect();
        let step = stats::median(&diffs);

        let mut warnings = Vec::new();
        let mut step_consistent = true;
        if let (Some(observed), Some((min_step, max_step))) = (step, stats::min_max(&diffs)) {
            let tolerance = config.step_tolerance * observed.abs();
            if (max_step - observed).abs() > tolerance || (observed - min_step).abs() > tolerance {
                step_consistent = false;
                warn!(min_step, max_step, "Depth sampling is not constant");
                warnings.push(QualityWarning::NonConstantStep { min_step, max_step });
            }

            if let Some(header) = dataset.header().step().map(f64::abs) {
                if (header - observed).abs() > defaults::HEADER_STEP_TOLERANCE * observed {
                    warn!(header, observed, "Header STEP disagrees with depth column");
                    warnings.push(QualityWarning::HeaderStepMismatch { header, observed });
                }
            }
        }

        for cq in &curves {
            debug!(
                curve = %cq.mnemonic,
                completeness = format!("{:.1}%", cq.completeness * 100.0),
                outlier_fraction = ?cq.outlier_fraction(),
                "Curve quality"
            );
        }
        info!(
            samples = dataset.len(),
            curves = curves.len(),
            depth_interval = format!("{:.1}", depth_max - depth_min),
            warnings = warnings.len(),
            "Quality assessment complete"
        );

        QualityReport {
            sample_count: dataset.len(),
            depth_min,
            depth_max,
            step,
            step_consistent,
            curves,
            warnings,
        }
    }
}

fn assess_curve(curve: &LogCurve, config: &QualityConfig) -> CurveQuality {
    let samples = curve.len();
    let values = curve.valid_values();
    let valid_count = values.len();
    let completeness = if samples == 0 {
        0.0
    } else {
        valid_count as f64 / samples as f64
    };

    CurveQuality {
        mnemonic: curve.mnemonic.clone(),
        unit: curve.unit.clone(),
        samples,
        valid_count,
        completeness,
        outliers: screen_outliers(&values, config),
        statistics: describe(&values),
    }
}

/// Tukey fences at `q1 - k*IQR` and `q3 + k*IQR`; values strictly outside count.
fn screen_outliers(values: &[f64], config: &QualityConfig) -> Option<OutlierScreen> {
    if values.len() < config.min_values_for_iqr.max(1) {
        return None;
    }
    let sorted = stats::sorted(values);
    let q1 = stats::quantile_sorted(&sorted, 0.25)?;
    let q3 = stats::quantile_sorted(&sorted, 0.75)?;
    let iqr = q3 - q1;
    let lower_fence = q1 - config.iqr_multiplier * iqr;
    let upper_fence = q3 + config.iqr_multiplier * iqr;
    let outlier_count = values
        .iter()
        .filter(|&&v| v < lower_fence || v > upper_fence)
        .count();

    Some(OutlierScreen {
        q1,
        q3,
        lower_fence,
        upper_fence,
        outlier_count,
        outlier_fraction: outlier_count as f64 / values.len() as f64,
    })
}

fn describe(values: &[f64]) -> Option<CurveStatistics> {
    let (min, max) = stats::min_max(values)?;
    Some(CurveStatistics {
        min,
        max,
        mean: stats::mean(values)?,
        std_dev: stats::population_std_dev(values)?,
    })
}
