//! LAS-PETRO: Petrophysical Well-Log Interpretation
//!
//! Batch interpretation engine for LAS well-log files.
//!
//! ## Architecture
//!
//! - **Loader**: LAS file → depth-indexed `LogDataset` (sectioned parser with manual fallback)
//! - **Quality Assessor**: completeness, IQR outliers, curve statistics, depth sampling
//! - **Lithology Classifier**: gamma-ray Vsh, neutron-density cross-plot, photoelectric
//!   ranges, seeded k-means electrofacies
//! - **Petrophysical Calculator**: porosity with gas correction, Archie saturation,
//!   permeability, net-to-gross
//!
//! Every stage takes its inputs by reference and returns a fresh record; a method
//! or property whose curves are absent is skipped with a recorded reason.

pub mod config;
pub mod lithology;
pub mod loader;
pub mod petrophysics;
pub mod pipeline;
pub mod quality;
pub mod stats;
pub mod summary;
pub mod types;

// Re-export configuration
pub use config::{AnalysisConfig, ConfigError};

// Re-export commonly used types
pub use types::{
    CurveRole, InterpretationSummary, LithologyLabel, LithologyMethod, LithologyResult,
    LithologyResults, LogCurve, LogDataset, PetrophysicsProperty, PetrophysicsResult,
    QualityReport, SkipReason,
};

// Re-export stage entry points
pub use lithology::LithologyClassifier;
pub use loader::{LasLoader, LoadError};
pub use petrophysics::PetrophysicsCalculator;
pub use pipeline::{analyze_dataset, run_analysis, AnalysisReport};
pub use quality::QualityAssessor;
