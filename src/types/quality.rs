//! Data quality report types

use serde::{Deserialize, Serialize};

/// Descriptive statistics over the non-missing values of a curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveStatistics {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
}

/// Interquartile-range outlier screen for one curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutlierScreen {
    pub q1: f64,
    pub q3: f64,
    pub lower_fence: f64,
    pub upper_fence: f64,
    pub outlier_count: usize,
    /// outliers / non-missing count, in [0, 1]
    pub outlier_fraction: f64,
}

/// Per-curve quality figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveQuality {
    pub mnemonic: String,
    pub unit: String,
    pub samples: usize,
    pub valid_count: usize,
    /// valid / samples, in [0, 1]
    pub completeness: f64,
    /// `None` when fewer than the minimum number of values are present
    pub outliers: Option<OutlierScreen>,
    /// `None` when the curve is entirely missing
    pub statistics: Option<CurveStatistics>,
}

impl CurveQuality {
    /// Outlier fraction, undefined (`None`) for sparse curves
    pub fn outlier_fraction(&self) -> Option<f64> {
        self.outliers.map(|o| o.outlier_fraction)
    }
}

/// Non-fatal observations about the depth index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QualityWarning {
    /// Consecutive depth differences are not all equal
    NonConstantStep { min_step: f64, max_step: f64 },
    /// Header STEP disagrees with the observed sampling
    HeaderStepMismatch { header: f64, observed: f64 },
}

/// Dataset-wide quality report, computed once by `QualityAssessor::assess`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub sample_count: usize,
    pub depth_min: f64,
    pub depth_max: f64,
    /// Observed step (median of consecutive differences); `None` for a single sample
    pub step: Option<f64>,
    pub step_consistent: bool,
    pub curves: Vec<CurveQuality>,
    pub warnings: Vec<QualityWarning>,
}

impl QualityReport {
    pub fn curve(&self, mnemonic: &str) -> Option<&CurveQuality> {
        self.curves
            .iter()
            .find(|c| c.mnemonic.eq_ignore_ascii_case(mnemonic))
    }

    pub fn depth_interval(&self) -> f64 {
        self.depth_max - self.depth_min
    }
}
