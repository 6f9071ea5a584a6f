//! Aggregated interpretation figures for the presentation layer

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{LithologyLabel, LithologyMethod};

/// Share of one label among a method's classified depths
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelShare {
    pub label: LithologyLabel,
    /// Display name, e.g. "Shaly Sandstone"
    pub name: String,
    pub count: usize,
    pub fraction: f64,
}

/// Porosity-class distribution over defined corrected-porosity samples
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReservoirQuality {
    /// phi > 15%
    pub excellent: f64,
    /// 10% < phi <= 15%
    pub good: f64,
    /// 5% < phi <= 10%
    pub fair: f64,
    /// phi <= 5%
    pub poor: f64,
    pub samples: usize,
}

/// Derived summary; every field is `None` when its source output was unavailable
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterpretationSummary {
    pub lithology: BTreeMap<LithologyMethod, Vec<LabelShare>>,
    pub average_porosity: Option<f64>,
    pub gas_fraction: Option<f64>,
    pub average_water_saturation: Option<f64>,
    pub average_hydrocarbon_saturation: Option<f64>,
    pub average_permeability: Option<f64>,
    pub net_to_gross: Option<f64>,
    pub reservoir_quality: Option<ReservoirQuality>,
}
