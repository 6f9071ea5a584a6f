//! Shared data structures for the petrophysical interpretation pipeline
//!
//! This module defines the records passed between stages:
//! - Stage 1: LogDataset (depth-indexed curves + well header, produced by the loader)
//! - Stage 2: QualityReport (completeness / outlier statistics)
//! - Stage 3: LithologyResults (one LithologyResult per classification method)
//! - Stage 4: PetrophysicsResult (porosity, saturation, permeability, net-to-gross)
//! - Stage 5: InterpretationSummary (aggregates for the presentation layer)
//!
//! Every record is built once and never mutated by a later stage.

mod log;
mod quality;
mod lithology;
mod petrophysics;
mod skip;
mod summary;

pub use log::*;
pub use quality::*;
pub use lithology::*;
pub use petrophysics::*;
pub use skip::*;
pub use summary::*;
