//! Lithology classification types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::SkipReason;

/// Classification method identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LithologyMethod {
    GammaRay,
    NeutronDensity,
    Photoelectric,
    Clustering,
}

impl LithologyMethod {
    pub const ALL: [Self; 4] = [
        Self::GammaRay,
        Self::NeutronDensity,
        Self::Photoelectric,
        Self::Clustering,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::GammaRay => "gamma_ray",
            Self::NeutronDensity => "neutron_density",
            Self::Photoelectric => "photoelectric",
            Self::Clustering => "clustering",
        }
    }
}

impl fmt::Display for LithologyMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rock-type label. Each method draws from its own closed subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LithologyLabel {
    // Gamma ray
    CleanSandstone,
    ShalySandstone,
    Shale,
    // Neutron-density matrix points
    Sandstone,
    Limestone,
    Dolomite,
    Anhydrite,
    GasSand,
    // Photoelectric minerals (Dolomite and Anhydrite shared with the cross-plot)
    QuartzSandstone,
    CalciteLimestone,
    ClayShale,
    Salt,
    Unknown,
    /// Opaque cluster id; carries no rock-type meaning by itself
    Facies(usize),
}

impl fmt::Display for LithologyLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CleanSandstone => f.write_str("Clean Sandstone"),
            Self::ShalySandstone => f.write_str("Shaly Sandstone"),
            Self::Shale => f.write_str("Shale"),
            Self::Sandstone => f.write_str("Sandstone"),
            Self::Limestone => f.write_str("Limestone"),
            Self::Dolomite => f.write_str("Dolomite"),
            Self::Anhydrite => f.write_str("Anhydrite"),
            Self::GasSand => f.write_str("Gas Sand"),
            Self::QuartzSandstone => f.write_str("Quartz/Sandstone"),
            Self::CalciteLimestone => f.write_str("Calcite/Limestone"),
            Self::ClayShale => f.write_str("Clay/Shale"),
            Self::Salt => f.write_str("Salt"),
            Self::Unknown => f.write_str("Unknown"),
            Self::Facies(id) => write!(f, "Facies_{id}"),
        }
    }
}

/// Larionov shale-volume variant used for gamma-ray classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShaleVolumeModel {
    /// Vsh = 0.083 * (2^(3.7 * GRn) - 1)
    Tertiary,
    /// Vsh = 0.33 * (2^(2 * GRn) - 1)
    #[default]
    Older,
}

/// Gamma-ray method auxiliary output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GammaRayDetail {
    pub curve: String,
    pub gr_clean: f64,
    pub gr_shale: f64,
    pub model: ShaleVolumeModel,
    /// Normalised gamma ray, clipped to [0, 1]
    pub gr_index: Vec<Option<f64>>,
    pub vsh_tertiary: Vec<Option<f64>>,
    pub vsh_older: Vec<Option<f64>>,
}

/// Neutron-density cross-plot auxiliary output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeutronDensityDetail {
    pub neutron_curve: String,
    pub density_curve: String,
    /// Neutron porosity as a fraction
    pub neutron: Vec<Option<f64>>,
    pub density: Vec<Option<f64>>,
    /// Weighted distance to the nearest matrix point
    pub matrix_distance: Vec<Option<f64>>,
    /// Gas override fired at this depth
    pub gas_override: Vec<bool>,
}

/// Photoelectric method auxiliary output (raw values only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoelectricDetail {
    pub curve: String,
    pub pe: Vec<Option<f64>>,
}

/// Inertia for one candidate cluster count
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElbowPoint {
    pub k: usize,
    pub inertia: f64,
}

/// Clustering method auxiliary output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusteringDetail {
    pub features: Vec<String>,
    pub feature_means: Vec<f64>,
    pub feature_std_devs: Vec<f64>,
    /// Rows with every feature present
    pub complete_rows: usize,
    pub candidates: Vec<ElbowPoint>,
    pub k: usize,
    pub inertia: f64,
    pub seed: u64,
    pub cluster_ids: Vec<Option<usize>>,
}

/// Method-specific continuous output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum LithologyDetail {
    GammaRay(GammaRayDetail),
    NeutronDensity(NeutronDensityDetail),
    Photoelectric(PhotoelectricDetail),
    Clustering(ClusteringDetail),
}

/// Per-method classification over the full depth index.
///
/// `labels[i]` is `None` where the method's inputs are missing at depth `i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LithologyResult {
    pub method: LithologyMethod,
    pub labels: Vec<Option<LithologyLabel>>,
    pub detail: LithologyDetail,
}

impl LithologyResult {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn classified_count(&self) -> usize {
        self.labels.iter().filter(|l| l.is_some()).count()
    }

    pub fn unclassified_count(&self) -> usize {
        self.len() - self.classified_count()
    }

    /// Count of each label among classified depths, ordered by label
    pub fn distribution(&self) -> BTreeMap<LithologyLabel, usize> {
        let mut counts = BTreeMap::new();
        for label in self.labels.iter().flatten() {
            *counts.entry(*label).or_insert(0) += 1;
        }
        counts
    }
}

/// All lithology methods for one dataset: computed entries plus observable omissions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LithologyResults {
    pub methods: BTreeMap<LithologyMethod, LithologyResult>,
    pub skipped: BTreeMap<LithologyMethod, SkipReason>,
}

impl LithologyResults {
    pub fn get(&self, method: LithologyMethod) -> Option<&LithologyResult> {
        self.methods.get(&method)
    }

    pub fn is_available(&self, method: LithologyMethod) -> bool {
        self.methods.contains_key(&method)
    }

    pub fn skip_reason(&self, method: LithologyMethod) -> Option<&SkipReason> {
        self.skipped.get(&method)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LithologyMethod, &LithologyResult)> {
        self.methods.iter()
    }
}
