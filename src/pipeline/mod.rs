//! Analysis Pipeline
//!
//! ```text
//! STAGE 1: Load          LAS file -> LogDataset            (fatal on failure)
//! STAGE 2: Quality       LogDataset -> QualityReport
//! STAGE 3: Lithology     LogDataset -> LithologyResults    (methods skip individually)
//! STAGE 4: Petrophysics  LogDataset -> PetrophysicsResult  (properties skip individually)
//! STAGE 5: Summary       stage 3 + 4 outputs -> InterpretationSummary
//! ```
//!
//! Each stage reads its inputs immutably and returns a fresh record.

mod report;

pub use report::{AnalysisReport, CurveInfo, DatasetInfo, Stage, Unavailable};

use std::path::Path;
use tracing::info;

use crate::config::AnalysisConfig;
use crate::lithology::LithologyClassifier;
use crate::loader::{LasLoader, LoadError};
use crate::petrophysics::PetrophysicsCalculator;
use crate::quality::QualityAssessor;
use crate::summary;
use crate::types::LogDataset;

/// Load `path` and run every stage
pub fn run_analysis(path: impl AsRef<Path>, config: &AnalysisConfig) -> Result<AnalysisReport, LoadError> {
    let dataset = LasLoader::new(config.loader.clone()).load(path)?;
    Ok(analyze_dataset(&dataset, config))
}

/// Run stages 2-5 over an already-loaded dataset
pub fn analyze_dataset(dataset: &LogDataset, config: &AnalysisConfig) -> AnalysisReport {
    let quality = QualityAssessor::assess(dataset, &config.quality);
    let lithology = LithologyClassifier::classify(dataset, config);
    let petrophysics = PetrophysicsCalculator::calculate(dataset, Some(&lithology), config);
    let summary = summary::summarize(&lithology, &petrophysics);

    let report = AnalysisReport {
        dataset: DatasetInfo::from_dataset(dataset),
        quality,
        lithology,
        petrophysics,
        summary,
    };
    info!(
        well = report.dataset.well.as_deref().unwrap_or("unknown"),
        samples = report.dataset.samples,
        lithology_methods = report.lithology.methods.len(),
        unavailable = report.unavailable().len(),
        complete = report.is_complete(),
        "Analysis complete"
    );
    report
}
