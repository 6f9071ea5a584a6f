//! Analysis Configuration Module
//!
//! Interpretation constants (baselines, cutoffs, Archie calibration, clustering
//! controls) loaded from TOML, with built-in defaults for every field.
//!
//! ## Loading Order
//!
//! 1. `LAS_PETRO_CONFIG` environment variable (path to TOML file)
//! 2. `las_petro.toml` in the current working directory
//! 3. Built-in defaults
//!
//! ## Usage
//!
//! The config is passed by reference into every stage; there is no global:
//!
//! ```ignore
//! let config = AnalysisConfig::load();
//! let report = pipeline::run_analysis("well.las", &config)?;
//! ```

mod analysis_config;
pub mod defaults;
pub mod validation;

pub use analysis_config::*;
