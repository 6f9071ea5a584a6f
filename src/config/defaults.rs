//! System-wide default constants.
//!
//! Every `Default` impl in `analysis_config.rs` reads from here.
//! Grouped by subsystem for easy discovery.

// ============================================================================
// Loader
// ============================================================================

/// LAS null sentinel used when the header does not declare `NULL`.
pub const DEFAULT_NULL_VALUE: f64 = -999.25;

/// Sampling step (depth units) used when the header does not declare `STEP`.
pub const DEFAULT_STEP: f64 = 0.5;

/// Skipped-line issues kept in `LoadDiagnostics` (the count is always exact).
pub const MAX_REPORTED_ROW_ISSUES: usize = 10;

// ============================================================================
// Quality
// ============================================================================

/// Tukey fence multiplier.
pub const IQR_MULTIPLIER: f64 = 1.5;

/// Below this many non-missing values the outlier fraction is undefined.
pub const MIN_VALUES_FOR_IQR: usize = 4;

/// Relative tolerance when checking that consecutive depth steps are equal.
pub const STEP_TOLERANCE: f64 = 1e-6;

/// Relative tolerance between the header STEP and the observed step
/// (headers carry fewer decimals than the depth column).
pub const HEADER_STEP_TOLERANCE: f64 = 1e-3;

// ============================================================================
// Lithology
// ============================================================================

/// Percentile of gamma ray taken as the clean-sand baseline.
pub const GR_CLEAN_PERCENTILE: f64 = 5.0;

/// Percentile of gamma ray taken as the pure-shale baseline.
pub const GR_SHALE_PERCENTILE: f64 = 95.0;

/// Vsh below this is Clean Sandstone.
pub const VSH_CLEAN_CUTOFF: f64 = 0.15;

/// Vsh at or above this is Shale.
pub const VSH_SHALE_CUTOFF: f64 = 0.50;

/// Density-axis weight in the cross-plot distance (g/cc range vs porosity fraction).
pub const DENSITY_AXIS_WEIGHT: f64 = 0.1;

/// Gas override: bulk density strictly below this (g/cc) ...
pub const GAS_DENSITY_MAX: f64 = 2.3;

/// ... and neutron porosity strictly below this (fraction).
pub const GAS_NEUTRON_MAX: f64 = 0.15;

/// Rows with every feature present required for clustering.
pub const CLUSTER_MIN_ROWS: usize = 10;

/// Minimum number of feature curves present for clustering.
pub const CLUSTER_MIN_FEATURES: usize = 2;

pub const CLUSTER_K_MIN: usize = 2;
pub const CLUSTER_K_MAX: usize = 7;

/// Cluster count used when too few candidates exist for the elbow rule.
pub const CLUSTER_FALLBACK_K: usize = 3;

/// Average rows per cluster required for a candidate K.
pub const CLUSTER_ROWS_PER_K: usize = 5;

pub const CLUSTER_SEED: u64 = 42;
pub const CLUSTER_N_INIT: usize = 10;
pub const CLUSTER_MAX_ITER: usize = 300;
pub const CLUSTER_TOLERANCE: f64 = 1e-4;

// ============================================================================
// Petrophysics
// ============================================================================

/// Sandstone matrix density (g/cc).
pub const MATRIX_DENSITY: f64 = 2.65;

/// Fresh-water fluid density (g/cc).
pub const FLUID_DENSITY: f64 = 1.0;

/// Neutron below density porosity by more than this flags gas (4 p.u.).
pub const GAS_POROSITY_THRESHOLD: f64 = 0.04;

/// Upper porosity clip; also keeps (1 - phi) away from zero in permeability.
pub const MAX_POROSITY: f64 = 0.5;

/// Gamma-ray cutoff (API) for net reservoir.
pub const NET_GR_CUTOFF: f64 = 75.0;

/// Kozeny-Carman coefficient (mD).
pub const KOZENY_CARMAN_COEFFICIENT: f64 = 5000.0;

/// Timur coefficient and porosity exponent.
pub const TIMUR_COEFFICIENT: f64 = 0.136;
pub const TIMUR_EXPONENT: f64 = 4.4;

// ============================================================================
// Summary
// ============================================================================

/// Reservoir-quality class boundaries on corrected porosity (fractions).
pub const QUALITY_EXCELLENT_MIN: f64 = 0.15;
pub const QUALITY_GOOD_MIN: f64 = 0.10;
pub const QUALITY_FAIR_MIN: f64 = 0.05;
