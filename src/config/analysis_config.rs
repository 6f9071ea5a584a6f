//! Analysis Configuration - every interpretation constant as an operator-tunable TOML value
//!
//! Each struct implements `Default` with the values from `defaults.rs`, so an
//! empty (or absent) config file reproduces the standard interpretation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use super::defaults;
use crate::stats;
use crate::types::{ArchieParameters, CurveRole, LogCurve, LogDataset, ShaleVolumeModel};

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "LAS_PETRO_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "las_petro.toml";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for an analysis run.
///
/// Load with `AnalysisConfig::load()` which searches:
/// 1. `$LAS_PETRO_CONFIG` env var
/// 2. `./las_petro.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub loader: LoaderConfig,

    /// Mnemonic aliases per curve role
    #[serde(default)]
    pub curves: CurveAliases,

    #[serde(default)]
    pub quality: QualityConfig,

    #[serde(default)]
    pub lithology: LithologyConfig,

    #[serde(default)]
    pub petrophysics: PetrophysicsConfig,
}

impl AnalysisConfig {
    /// Load configuration using the standard search order:
    /// 1. `$LAS_PETRO_CONFIG` environment variable
    /// 2. `./las_petro.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded analysis config from {}", CONFIG_ENV_VAR);
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from {}, falling back", CONFIG_ENV_VAR);
                    }
                }
            } else {
                warn!(path = %path, "{} points to non-existent file, falling back", CONFIG_ENV_VAR);
            }
        }

        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded analysis config from ./{}", LOCAL_CONFIG_FILE);
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{}, using defaults", LOCAL_CONFIG_FILE);
                }
            }
        }

        info!("No {} found, using built-in defaults", LOCAL_CONFIG_FILE);
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
            other => other,
        })
    }

    /// Parse and validate a TOML document.
    ///
    /// Unknown keys are logged as warnings and otherwise ignored.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self = toml::from_str(contents)
            .map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Write the config to a file (e.g. to seed a calibration template).
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml()?;
        std::fs::write(path, contents)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        info!(path = %path.display(), "Analysis config saved");
        Ok(())
    }

    /// Validate all parameters for internal consistency.
    ///
    /// Rules:
    /// - Every float must be finite
    /// - Percentiles lie in [0, 100] and clean < shale
    /// - Vsh cutoffs are ordered and lie in [0, 1]
    /// - Archie parameters are positive
    /// - Matrix density exceeds fluid density
    /// - Cluster range satisfies 2 <= k_min <= k_max
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        let gr = &self.lithology.gamma_ray;
        for (name, p) in [
            ("lithology.gamma_ray.clean_percentile", gr.clean_percentile),
            ("lithology.gamma_ray.shale_percentile", gr.shale_percentile),
        ] {
            Self::check_finite(name, p, &mut errors);
            if !(0.0..=100.0).contains(&p) {
                errors.push(format!("{name} = {p} must lie in [0, 100]"));
            }
        }
        if gr.clean_percentile >= gr.shale_percentile {
            errors.push(format!(
                "lithology.gamma_ray.clean_percentile ({:.1}) must be < shale_percentile ({:.1})",
                gr.clean_percentile, gr.shale_percentile
            ));
        }
        Self::check_finite("lithology.gamma_ray.clean_cutoff", gr.clean_cutoff, &mut errors);
        Self::check_finite("lithology.gamma_ray.shale_cutoff", gr.shale_cutoff, &mut errors);
        if !(0.0 <= gr.clean_cutoff && gr.clean_cutoff < gr.shale_cutoff && gr.shale_cutoff <= 1.0) {
            errors.push(format!(
                "lithology.gamma_ray cutoffs must satisfy 0 <= clean_cutoff ({:.2}) < shale_cutoff ({:.2}) <= 1",
                gr.clean_cutoff, gr.shale_cutoff
            ));
        }

        let nd = &self.lithology.neutron_density;
        Self::check_finite("lithology.neutron_density.density_weight", nd.density_weight, &mut errors);
        Self::check_finite("lithology.neutron_density.gas_density_max", nd.gas_density_max, &mut errors);
        Self::check_finite("lithology.neutron_density.gas_neutron_max", nd.gas_neutron_max, &mut errors);
        if nd.density_weight <= 0.0 {
            errors.push("lithology.neutron_density.density_weight must be > 0".to_string());
        }

        let cl = &self.lithology.clustering;
        if cl.k_min < 2 {
            errors.push(format!("lithology.clustering.k_min = {} must be >= 2", cl.k_min));
        }
        if cl.k_max < cl.k_min {
            errors.push(format!(
                "lithology.clustering.k_max ({}) must be >= k_min ({})",
                cl.k_max, cl.k_min
            ));
        }
        if cl.n_init == 0 {
            errors.push("lithology.clustering.n_init must be > 0".to_string());
        }
        if cl.max_iter == 0 {
            errors.push("lithology.clustering.max_iter must be > 0".to_string());
        }
        if cl.min_features == 0 {
            errors.push("lithology.clustering.min_features must be > 0".to_string());
        }
        Self::check_finite("lithology.clustering.tolerance", cl.tolerance, &mut errors);

        let por = &self.petrophysics.porosity;
        Self::check_finite("petrophysics.porosity.matrix_density", por.matrix_density, &mut errors);
        Self::check_finite("petrophysics.porosity.fluid_density", por.fluid_density, &mut errors);
        Self::check_finite("petrophysics.porosity.gas_threshold", por.gas_threshold, &mut errors);
        Self::check_finite("petrophysics.porosity.max_porosity", por.max_porosity, &mut errors);
        if por.matrix_density <= por.fluid_density {
            errors.push(format!(
                "petrophysics.porosity.matrix_density ({:.2}) must be > fluid_density ({:.2})",
                por.matrix_density, por.fluid_density
            ));
        }
        if !(por.max_porosity > 0.0 && por.max_porosity <= defaults::MAX_POROSITY) {
            errors.push(format!(
                "petrophysics.porosity.max_porosity = {} must lie in (0, {}]",
                por.max_porosity,
                defaults::MAX_POROSITY
            ));
        }

        let archie = &self.petrophysics.archie;
        for (name, v) in [
            ("petrophysics.archie.a", archie.a),
            ("petrophysics.archie.rw", archie.rw),
            ("petrophysics.archie.m", archie.m),
            ("petrophysics.archie.n", archie.n),
        ] {
            Self::check_finite(name, v, &mut errors);
            if v <= 0.0 {
                errors.push(format!("{name} = {v} must be > 0"));
            }
        }

        Self::check_finite(
            "petrophysics.net_to_gross.gr_cutoff",
            self.petrophysics.net_to_gross.gr_cutoff,
            &mut errors,
        );

        let loader = &self.loader;
        Self::check_finite("loader.default_null_value", loader.default_null_value, &mut errors);
        Self::check_finite("loader.default_step", loader.default_step, &mut errors);
        if loader.default_step <= 0.0 {
            errors.push("loader.default_step must be > 0".to_string());
        }

        let q = &self.quality;
        Self::check_finite("quality.iqr_multiplier", q.iqr_multiplier, &mut errors);
        Self::check_finite("quality.step_tolerance", q.step_tolerance, &mut errors);
        if q.iqr_multiplier <= 0.0 {
            errors.push("quality.iqr_multiplier must be > 0".to_string());
        }

        for role in CurveRole::ALL {
            if self.curves.aliases(role).is_empty() {
                errors.push(format!("curves.{role} must list at least one mnemonic"));
            }
        }

        let (range_errors, range_warnings) = super::validation::validate_physical_ranges(self);
        errors.extend(range_errors);
        for w in &range_warnings {
            warn!("{}", w);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    fn check_finite(name: &str, value: f64, errors: &mut Vec<String>) {
        if !value.is_finite() {
            errors.push(format!("{name}: value must be finite (got {value})"));
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {1}", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config parse error ({}): {1}", .0.display())]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("Config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config validation failed:\n  - {}", .0.join("\n  - "))]
    Validation(Vec<String>),
}

// ============================================================================
// Loader
// ============================================================================

/// Which parsing strategy the loader uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParserSelection {
    /// Sectioned parser when compiled in, manual parser otherwise
    #[default]
    Auto,
    Sectioned,
    Manual,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoaderConfig {
    #[serde(default)]
    pub parser: ParserSelection,

    /// Null sentinel applied when the header has no `NULL` item
    #[serde(default = "default_null_value")]
    pub default_null_value: f64,

    /// Sampling step applied when the header has no usable `STEP` item
    #[serde(default = "default_step")]
    pub default_step: f64,

    #[serde(default = "default_max_reported_row_issues")]
    pub max_reported_row_issues: usize,
}

fn default_null_value() -> f64 {
    defaults::DEFAULT_NULL_VALUE
}
fn default_step() -> f64 {
    defaults::DEFAULT_STEP
}
fn default_max_reported_row_issues() -> usize {
    defaults::MAX_REPORTED_ROW_ISSUES
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            parser: ParserSelection::default(),
            default_null_value: default_null_value(),
            default_step: default_step(),
            max_reported_row_issues: default_max_reported_row_issues(),
        }
    }
}

// ============================================================================
// Curve Aliases
// ============================================================================

/// How neutron porosity values are scaled into fractions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeutronScale {
    /// Percent when the curve unit says so (`%`, `PU`, `P.U.`), fraction otherwise
    #[default]
    Auto,
    Fraction,
    Percent,
}

impl NeutronScale {
    /// Multiplier that converts raw neutron values with `unit` into fractions.
    pub fn factor(self, unit: &str) -> f64 {
        match self {
            Self::Fraction => 1.0,
            Self::Percent => 0.01,
            Self::Auto => {
                let u = unit.trim().to_uppercase().replace(['.', ' '], "");
                if u == "%" || u == "PU" || u == "PERCENT" || u.ends_with('%') {
                    0.01
                } else {
                    1.0
                }
            }
        }
    }

    /// Multiplier for a specific neutron curve.
    ///
    /// Under `Auto`, a curve without a unit is read as percent when the median
    /// of its values exceeds 1 (no porosity fraction does).
    pub fn factor_for(self, curve: &LogCurve) -> f64 {
        if self != Self::Auto || !curve.unit.trim().is_empty() {
            return self.factor(&curve.unit);
        }
        match stats::median(&curve.valid_values()) {
            Some(median) if median > 1.0 => {
                warn!(curve = %curve.mnemonic, median, "Neutron curve has no unit, reading it as percent");
                0.01
            }
            Some(median) => {
                warn!(curve = %curve.mnemonic, median, "Neutron curve has no unit, reading it as a fraction");
                1.0
            }
            None => 1.0,
        }
    }
}

/// Mnemonic aliases per role, searched in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveAliases {
    #[serde(default = "default_gamma_ray")]
    pub gamma_ray: Vec<String>,

    #[serde(default = "default_neutron_porosity")]
    pub neutron_porosity: Vec<String>,

    #[serde(default = "default_bulk_density")]
    pub bulk_density: Vec<String>,

    #[serde(default = "default_photoelectric")]
    pub photoelectric: Vec<String>,

    #[serde(default = "default_resistivity")]
    pub resistivity: Vec<String>,

    #[serde(default)]
    pub neutron_scale: NeutronScale,
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}
fn default_gamma_ray() -> Vec<String> {
    names(&["GGCE", "GR", "SGR", "CGR"])
}
fn default_neutron_porosity() -> Vec<String> {
    names(&["NPRL", "NPHI", "TNPH", "CNL"])
}
fn default_bulk_density() -> Vec<String> {
    names(&["DEN", "RHOB", "ZDEN"])
}
fn default_photoelectric() -> Vec<String> {
    names(&["PDPE", "PE", "PEF"])
}
fn default_resistivity() -> Vec<String> {
    names(&["RTAT", "RT", "ILD", "LLD"])
}

impl Default for CurveAliases {
    fn default() -> Self {
        Self {
            gamma_ray: default_gamma_ray(),
            neutron_porosity: default_neutron_porosity(),
            bulk_density: default_bulk_density(),
            photoelectric: default_photoelectric(),
            resistivity: default_resistivity(),
            neutron_scale: NeutronScale::default(),
        }
    }
}

impl CurveAliases {
    pub fn aliases(&self, role: CurveRole) -> &[String] {
        match role {
            CurveRole::GammaRay => &self.gamma_ray,
            CurveRole::NeutronPorosity => &self.neutron_porosity,
            CurveRole::BulkDensity => &self.bulk_density,
            CurveRole::Photoelectric => &self.photoelectric,
            CurveRole::Resistivity => &self.resistivity,
        }
    }

    /// First curve in `dataset` matching one of the role's aliases
    pub fn resolve<'d>(&self, dataset: &'d LogDataset, role: CurveRole) -> Option<&'d LogCurve> {
        dataset.find_curve(self.aliases(role))
    }

    /// Roles from `roles` that no curve in `dataset` satisfies
    pub fn missing(&self, dataset: &LogDataset, roles: &[CurveRole]) -> Vec<CurveRole> {
        roles
            .iter()
            .copied()
            .filter(|role| self.resolve(dataset, *role).is_none())
            .collect()
    }
}

// ============================================================================
// Quality
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityConfig {
    #[serde(default = "default_iqr_multiplier")]
    pub iqr_multiplier: f64,

    #[serde(default = "default_min_values_for_iqr")]
    pub min_values_for_iqr: usize,

    /// Relative tolerance for the constant-step check
    #[serde(default = "default_step_tolerance")]
    pub step_tolerance: f64,
}

fn default_iqr_multiplier() -> f64 {
    defaults::IQR_MULTIPLIER
}
fn default_min_values_for_iqr() -> usize {
    defaults::MIN_VALUES_FOR_IQR
}
fn default_step_tolerance() -> f64 {
    defaults::STEP_TOLERANCE
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            iqr_multiplier: default_iqr_multiplier(),
            min_values_for_iqr: default_min_values_for_iqr(),
            step_tolerance: default_step_tolerance(),
        }
    }
}

// ============================================================================
// Lithology
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LithologyConfig {
    #[serde(default)]
    pub gamma_ray: GammaRayConfig,

    #[serde(default)]
    pub neutron_density: NeutronDensityConfig,

    #[serde(default)]
    pub clustering: ClusteringConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GammaRayConfig {
    #[serde(default = "default_clean_percentile")]
    pub clean_percentile: f64,

    #[serde(default = "default_shale_percentile")]
    pub shale_percentile: f64,

    /// Vsh variant used for the class labels (both are always computed)
    #[serde(default)]
    pub shale_volume_model: ShaleVolumeModel,

    #[serde(default = "default_clean_cutoff")]
    pub clean_cutoff: f64,

    #[serde(default = "default_shale_cutoff")]
    pub shale_cutoff: f64,
}

fn default_clean_percentile() -> f64 {
    defaults::GR_CLEAN_PERCENTILE
}
fn default_shale_percentile() -> f64 {
    defaults::GR_SHALE_PERCENTILE
}
fn default_clean_cutoff() -> f64 {
    defaults::VSH_CLEAN_CUTOFF
}
fn default_shale_cutoff() -> f64 {
    defaults::VSH_SHALE_CUTOFF
}

impl Default for GammaRayConfig {
    fn default() -> Self {
        Self {
            clean_percentile: default_clean_percentile(),
            shale_percentile: default_shale_percentile(),
            shale_volume_model: ShaleVolumeModel::default(),
            clean_cutoff: default_clean_cutoff(),
            shale_cutoff: default_shale_cutoff(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeutronDensityConfig {
    #[serde(default = "default_density_weight")]
    pub density_weight: f64,

    #[serde(default = "default_gas_density_max")]
    pub gas_density_max: f64,

    #[serde(default = "default_gas_neutron_max")]
    pub gas_neutron_max: f64,
}

fn default_density_weight() -> f64 {
    defaults::DENSITY_AXIS_WEIGHT
}
fn default_gas_density_max() -> f64 {
    defaults::GAS_DENSITY_MAX
}
fn default_gas_neutron_max() -> f64 {
    defaults::GAS_NEUTRON_MAX
}

impl Default for NeutronDensityConfig {
    fn default() -> Self {
        Self {
            density_weight: default_density_weight(),
            gas_density_max: default_gas_density_max(),
            gas_neutron_max: default_gas_neutron_max(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusteringConfig {
    /// Feature roles, used when present
    #[serde(default = "default_cluster_features")]
    pub features: Vec<CurveRole>,

    #[serde(default = "default_cluster_min_features")]
    pub min_features: usize,

    #[serde(default = "default_cluster_min_rows")]
    pub min_rows: usize,

    #[serde(default = "default_k_min")]
    pub k_min: usize,

    #[serde(default = "default_k_max")]
    pub k_max: usize,

    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Independent k-means++ restarts; the lowest inertia wins
    #[serde(default = "default_n_init")]
    pub n_init: usize,

    #[serde(default = "default_max_iter")]
    pub max_iter: usize,

    /// Stop when every centroid moves less than this (standardized units)
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

fn default_cluster_features() -> Vec<CurveRole> {
    CurveRole::ALL.to_vec()
}
fn default_cluster_min_features() -> usize {
    defaults::CLUSTER_MIN_FEATURES
}
fn default_cluster_min_rows() -> usize {
    defaults::CLUSTER_MIN_ROWS
}
fn default_k_min() -> usize {
    defaults::CLUSTER_K_MIN
}
fn default_k_max() -> usize {
    defaults::CLUSTER_K_MAX
}
fn default_seed() -> u64 {
    defaults::CLUSTER_SEED
}
fn default_n_init() -> usize {
    defaults::CLUSTER_N_INIT
}
fn default_max_iter() -> usize {
    defaults::CLUSTER_MAX_ITER
}
fn default_tolerance() -> f64 {
    defaults::CLUSTER_TOLERANCE
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            features: default_cluster_features(),
            min_features: default_cluster_min_features(),
            min_rows: default_cluster_min_rows(),
            k_min: default_k_min(),
            k_max: default_k_max(),
            seed: default_seed(),
            n_init: default_n_init(),
            max_iter: default_max_iter(),
            tolerance: default_tolerance(),
        }
    }
}

// ============================================================================
// Petrophysics
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PetrophysicsConfig {
    #[serde(default)]
    pub porosity: PorosityConfig,

    /// Archie calibration (a, Rw, m, n)
    #[serde(default)]
    pub archie: ArchieParameters,

    #[serde(default)]
    pub net_to_gross: NetToGrossConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PorosityConfig {
    #[serde(default = "default_matrix_density")]
    pub matrix_density: f64,

    #[serde(default = "default_fluid_density")]
    pub fluid_density: f64,

    #[serde(default = "default_gas_threshold")]
    pub gas_threshold: f64,

    #[serde(default = "default_max_porosity")]
    pub max_porosity: f64,

    /// Also treat neutron-density Gas Sand depths as gas zones
    #[serde(default)]
    pub include_crossplot_gas: bool,
}

fn default_matrix_density() -> f64 {
    defaults::MATRIX_DENSITY
}
fn default_fluid_density() -> f64 {
    defaults::FLUID_DENSITY
}
fn default_gas_threshold() -> f64 {
    defaults::GAS_POROSITY_THRESHOLD
}
fn default_max_porosity() -> f64 {
    defaults::MAX_POROSITY
}

impl Default for PorosityConfig {
    fn default() -> Self {
        Self {
            matrix_density: default_matrix_density(),
            fluid_density: default_fluid_density(),
            gas_threshold: default_gas_threshold(),
            max_porosity: default_max_porosity(),
            include_crossplot_gas: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetToGrossConfig {
    /// Gamma ray strictly below this (API) is net reservoir
    #[serde(default = "default_gr_cutoff")]
    pub gr_cutoff: f64,
}

fn default_gr_cutoff() -> f64 {
    defaults::NET_GR_CUTOFF
}

impl Default for NetToGrossConfig {
    fn default() -> Self {
        Self {
            gr_cutoff: default_gr_cutoff(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(AnalysisConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_toml_matches_defaults() {
        let config = AnalysisConfig::from_toml_str("").unwrap();
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = AnalysisConfig::from_toml_str(
            r#"
[petrophysics.archie]
rw = 0.05
"#,
        )
        .unwrap();
        assert!((config.petrophysics.archie.rw - 0.05).abs() < 1e-12);
        assert!((config.petrophysics.archie.m - 2.0).abs() < 1e-12);
        assert!((config.petrophysics.porosity.matrix_density - 2.65).abs() < 1e-12);
    }

    #[test]
    fn test_inverted_percentiles_rejected() {
        let mut config = AnalysisConfig::default();
        config.lithology.gamma_ray.clean_percentile = 96.0;
        match config.validate() {
            Err(ConfigError::Validation(errors)) => {
                assert!(errors.iter().any(|e| e.contains("clean_percentile")));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_non_positive_archie_rejected() {
        let mut config = AnalysisConfig::default();
        config.petrophysics.archie.n = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_nan_rejected() {
        let mut config = AnalysisConfig::default();
        config.petrophysics.archie.rw = f64::NAN;
        match config.validate() {
            Err(ConfigError::Validation(errors)) => {
                assert!(errors.iter().any(|e| e.contains("finite")));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_k_range_rejected() {
        let mut config = AnalysisConfig::default();
        config.lithology.clustering.k_min = 5;
        config.lithology.clustering.k_max = 3;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_roundtrip_preserves_config() {
        let mut config = AnalysisConfig::default();
        config.lithology.gamma_ray.shale_volume_model = ShaleVolumeModel::Tertiary;
        config.curves.neutron_scale = NeutronScale::Percent;
        let text = config.to_toml().unwrap();
        let parsed = AnalysisConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_neutron_scale_auto_from_unit() {
        assert!((NeutronScale::Auto.factor("%") - 0.01).abs() < 1e-12);
        assert!((NeutronScale::Auto.factor("p.u.") - 0.01).abs() < 1e-12);
        assert!((NeutronScale::Auto.factor("V/V") - 1.0).abs() < 1e-12);
        assert!((NeutronScale::Fraction.factor("%") - 1.0).abs() < 1e-12);
        assert!((NeutronScale::Percent.factor("V/V") - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_unitless_neutron_scale_from_values() {
        let percent = LogCurve::new("NPRL", "", vec![Some(18.0), Some(25.0), None, Some(31.0)]);
        let fraction = LogCurve::new("NPHI", " ", vec![Some(0.18), Some(0.25), Some(0.31)]);
        let empty = LogCurve::new("NPHI", "", vec![None, None]);
        assert!((NeutronScale::Auto.factor_for(&percent) - 0.01).abs() < 1e-12);
        assert!((NeutronScale::Auto.factor_for(&fraction) - 1.0).abs() < 1e-12);
        assert!((NeutronScale::Auto.factor_for(&empty) - 1.0).abs() < 1e-12);
        // an explicit scale or a unit still decides on its own
        assert!((NeutronScale::Fraction.factor_for(&percent) - 1.0).abs() < 1e-12);
        let tagged = LogCurve::new("NPHI", "V/V", vec![Some(18.0)]);
        assert!((NeutronScale::Auto.factor_for(&tagged) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_alias_list_rejected() {
        let mut config = AnalysisConfig::default();
        config.curves.resistivity.clear();
        assert!(config.validate().is_err());
    }
}
