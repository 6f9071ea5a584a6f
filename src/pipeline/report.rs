//! Structured output of one analysis run

use serde::{Deserialize, Serialize};

use crate::types::{
    InterpretationSummary, LithologyResults, LoadDiagnostics, LogDataset, PetrophysicsResult,
    QualityReport, SkipReason, WellHeader,
};

/// Curve listing as loaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveInfo {
    pub mnemonic: String,
    pub unit: String,
    pub description: String,
    pub valid_count: usize,
}

/// Dataset identity and load bookkeeping (the curve values themselves are not repeated)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetInfo {
    pub well: Option<String>,
    pub company: Option<String>,
    pub field: Option<String>,
    pub depth_mnemonic: String,
    pub depth_unit: String,
    pub depth_min: f64,
    pub depth_max: f64,
    pub samples: usize,
    pub step: f64,
    pub null_value: f64,
    pub curves: Vec<CurveInfo>,
    pub header: WellHeader,
    pub diagnostics: LoadDiagnostics,
}

impl DatasetInfo {
    pub fn from_dataset(dataset: &LogDataset) -> Self {
        let header = dataset.header();
        let (depth_min, depth_max) = dataset.depth_range();
        Self {
            well: header.well_name().map(str::to_string),
            company: header.company().map(str::to_string),
            field: header.field().map(str::to_string),
            depth_mnemonic: dataset.depth_mnemonic().to_string(),
            depth_unit: dataset.depth_unit().to_string(),
            depth_min,
            depth_max,
            samples: dataset.len(),
            step: dataset.step(),
            null_value: dataset.null_value(),
            curves: dataset
                .curves()
                .iter()
                .map(|c| CurveInfo {
                    mnemonic: c.mnemonic.clone(),
                    unit: c.unit.clone(),
                    description: c.description.clone(),
                    valid_count: c.valid_count(),
                })
                .collect(),
            header: header.clone(),
            diagnostics: dataset.diagnostics().clone(),
        }
    }
}

/// Stage an omitted output belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Lithology,
    Petrophysics,
}

/// One output the run could not produce
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unavailable {
    pub stage: Stage,
    pub name: String,
    pub reason: SkipReason,
}

/// Everything a completed run produced.
///
/// A run that did not happen at all is an `Err(LoadError)` instead; a report
/// always means the pipeline ran, possibly with some outputs unavailable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub dataset: DatasetInfo,
    pub quality: QualityReport,
    pub lithology: LithologyResults,
    pub petrophysics: PetrophysicsResult,
    pub summary: InterpretationSummary,
}

impl AnalysisReport {
    /// Every lithology method and petrophysical property ran
    pub fn is_complete(&self) -> bool {
        self.lithology.skipped.is_empty() && self.petrophysics.skipped.is_empty()
    }

    /// Omitted outputs with their reasons
    pub fn unavailable(&self) -> Vec<Unavailable> {
        let lithology = self.lithology.skipped.iter().map(|(method, reason)| Unavailable {
            stage: Stage::Lithology,
            name: method.to_string(),
            reason: reason.clone(),
        });
        let petrophysics = self.petrophysics.skipped.iter().map(|(property, reason)| Unavailable {
            stage: Stage::Petrophysics,
            name: property.to_string(),
            reason: reason.clone(),
        });
        lithology.chain(petrophysics).collect()
    }
}
