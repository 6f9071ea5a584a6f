//! Petrophysical property types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::SkipReason;

/// Property group computed by the petrophysics calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PetrophysicsProperty {
    Porosity,
    WaterSaturation,
    Permeability,
    NetToGross,
}

impl fmt::Display for PetrophysicsProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Porosity => "porosity",
            Self::WaterSaturation => "water_saturation",
            Self::Permeability => "permeability",
            Self::NetToGross => "net_to_gross",
        })
    }
}

/// Porosity series (fractions), each clipped to [0, max_porosity]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PorosityResult {
    pub matrix_density: f64,
    pub fluid_density: f64,
    pub phi_density: Vec<Option<f64>>,
    pub phi_neutron: Vec<Option<f64>>,
    pub phi_combined: Vec<Option<f64>>,
    /// Combined porosity with density porosity substituted in gas zones
    pub phi_corrected: Vec<Option<f64>>,
    pub gas_flag: Vec<bool>,
}

impl PorosityResult {
    pub fn gas_count(&self) -> usize {
        self.gas_flag.iter().filter(|g| **g).count()
    }
}

/// Archie calibration inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchieParameters {
    /// Tortuosity factor
    pub a: f64,
    /// Formation-water resistivity (ohm·m)
    pub rw: f64,
    /// Cementation exponent
    pub m: f64,
    /// Saturation exponent
    pub n: f64,
}

impl Default for ArchieParameters {
    fn default() -> Self {
        Self {
            a: 1.0,
            rw: 0.1,
            m: 2.0,
            n: 2.0,
        }
    }
}

/// Archie water saturation; `sh[i] == 1 - sw[i]` wherever `sw[i]` is defined
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaturationResult {
    pub resistivity_curve: String,
    pub parameters: ArchieParameters,
    pub sw: Vec<Option<f64>>,
    pub sh: Vec<Option<f64>>,
    /// F = a / phi^m, undefined at zero porosity
    pub formation_factor: Vec<Option<f64>>,
}

/// Permeability estimates in millidarcies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermeabilityResult {
    pub k_kozeny_carman: Vec<Option<f64>>,
    pub k_timur: Vec<Option<f64>>,
    pub k_average: Vec<Option<f64>>,
}

/// Gamma-ray cutoff net reservoir
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetToGrossResult {
    pub curve: String,
    pub gr_cutoff: f64,
    pub step: f64,
    pub net_flag: Vec<bool>,
    pub net_thickness: f64,
    pub gross_thickness: f64,
    pub ratio: f64,
}

/// All petrophysical properties for one dataset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PetrophysicsResult {
    pub porosity: Option<PorosityResult>,
    pub saturation: Option<SaturationResult>,
    pub permeability: Option<PermeabilityResult>,
    pub net_to_gross: Option<NetToGrossResult>,
    pub skipped: BTreeMap<PetrophysicsProperty, SkipReason>,
}

impl PetrophysicsResult {
    pub fn is_available(&self, property: PetrophysicsProperty) -> bool {
        match property {
            PetrophysicsProperty::Porosity => self.porosity.is_some(),
            PetrophysicsProperty::WaterSaturation => self.saturation.is_some(),
            PetrophysicsProperty::Permeability => self.permeability.is_some(),
            PetrophysicsProperty::NetToGross => self.net_to_gross.is_some(),
        }
    }

    pub fn skip_reason(&self, property: PetrophysicsProperty) -> Option<&SkipReason> {
        self.skipped.get(&property)
    }
}
