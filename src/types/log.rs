//! Depth-indexed log dataset types (loader output)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

// ============================================================================
// Curve Roles
// ============================================================================

/// Physical measurement a method needs, independent of the vendor mnemonic.
///
/// A role is resolved to a concrete curve through the alias lists in
/// `config::CurveAliases` (first alias present wins).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveRole {
    GammaRay,
    NeutronPorosity,
    BulkDensity,
    Photoelectric,
    Resistivity,
}

impl CurveRole {
    pub const ALL: [Self; 5] = [
        Self::GammaRay,
        Self::NeutronPorosity,
        Self::BulkDensity,
        Self::Photoelectric,
        Self::Resistivity,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::GammaRay => "gamma_ray",
            Self::NeutronPorosity => "neutron_porosity",
            Self::BulkDensity => "bulk_density",
            Self::Photoelectric => "photoelectric",
            Self::Resistivity => "resistivity",
        }
    }
}

impl fmt::Display for CurveRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Curves
// ============================================================================

/// A named, unit-tagged series aligned to the dataset depth index.
///
/// Missing samples are `None`; the file's null sentinel never survives loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogCurve {
    pub mnemonic: String,
    pub unit: String,
    #[serde(default)]
    pub description: String,
    values: Vec<Option<f64>>,
}

impl LogCurve {
    pub fn new(mnemonic: impl Into<String>, unit: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            mnemonic: mnemonic.into(),
            unit: unit.into(),
            description: String::new(),
            values,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Value at a sample index, `None` when missing or out of range.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Non-missing values in depth order.
    pub fn valid_values(&self) -> Vec<f64> {
        self.values.iter().flatten().copied().collect()
    }

    pub fn valid_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }
}

// ============================================================================
// Well Header
// ============================================================================

/// One `MNEM.UNIT VALUE : DESCRIPTION` line from a header section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderItem {
    pub mnemonic: String,
    pub unit: String,
    pub value: String,
    pub description: String,
}

impl HeaderItem {
    /// Value parsed as a number, if it is one.
    pub fn numeric(&self) -> Option<f64> {
        self.value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }
}

/// Header metadata keyed by upper-case mnemonic (`COMP`, `WELL`, `NULL`, `STEP`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WellHeader {
    items: BTreeMap<String, HeaderItem>,
}

impl WellHeader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an item; a later duplicate mnemonic replaces an earlier one.
    pub fn insert(&mut self, item: HeaderItem) {
        self.items.insert(item.mnemonic.to_uppercase(), item);
    }

    pub fn get(&self, mnemonic: &str) -> Option<&HeaderItem> {
        self.items.get(&mnemonic.to_uppercase())
    }

    /// Raw string value; empty values are treated as absent.
    pub fn value(&self, mnemonic: &str) -> Option<&str> {
        self.get(mnemonic)
            .map(|item| item.value.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn numeric(&self, mnemonic: &str) -> Option<f64> {
        self.get(mnemonic).and_then(HeaderItem::numeric)
    }

    pub fn null_value(&self) -> Option<f64> {
        self.numeric("NULL")
    }

    /// Declared sampling step, `None` when absent or zero (LAS allows `STEP 0` for irregular data).
    pub fn step(&self) -> Option<f64> {
        self.numeric("STEP").filter(|s| *s != 0.0)
    }

    pub fn company(&self) -> Option<&str> {
        self.value("COMP")
    }

    pub fn well_name(&self) -> Option<&str> {
        self.value("WELL")
    }

    pub fn field(&self) -> Option<&str> {
        self.value("FLD")
    }

    pub fn location(&self) -> Option<&str> {
        self.value("LOC")
    }

    pub fn iter(&self) -> impl Iterator<Item = &HeaderItem> {
        self.items.values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// ============================================================================
// Load Diagnostics
// ============================================================================

/// Which parsing strategy produced the dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParserKind {
    Sectioned,
    Manual,
}

impl fmt::Display for ParserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sectioned => f.write_str("sectioned"),
            Self::Manual => f.write_str("manual"),
        }
    }
}

/// Why a single data line was skipped
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowIssueKind {
    FieldCount { expected: usize, found: usize },
    InvalidNumber { field: String },
    MissingDepth,
    DepthOutOfOrder { previous: f64, depth: f64 },
}

impl fmt::Display for RowIssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldCount { expected, found } => {
                write!(f, "expected {expected} fields, found {found}")
            }
            Self::InvalidNumber { field } => write!(f, "invalid number '{field}'"),
            Self::MissingDepth => f.write_str("depth is the null value"),
            Self::DepthOutOfOrder { previous, depth } => {
                write!(f, "depth {depth} does not follow {previous}")
            }
        }
    }
}

/// A recoverable per-line parse failure (the line is skipped).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowIssue {
    /// 1-based line number in the source file
    pub line: usize,
    #[serde(flatten)]
    pub kind: RowIssueKind,
}

/// Loader bookkeeping carried with the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadDiagnostics {
    pub parser: ParserKind,
    pub data_lines: usize,
    pub rows_parsed: usize,
    pub rows_skipped: usize,
    /// First few issues (capped by `loader.max_reported_row_issues`)
    pub issues: Vec<RowIssue>,
    /// Depth rows were stored in reverse file order (file was logged upwards)
    #[serde(default)]
    pub reversed: bool,
}

impl LoadDiagnostics {
    pub fn new(parser: ParserKind) -> Self {
        Self {
            parser,
            data_lines: 0,
            rows_parsed: 0,
            rows_skipped: 0,
            issues: Vec::new(),
            reversed: false,
        }
    }
}

// ============================================================================
// Dataset
// ============================================================================

/// Invariant violations rejected by `LogDataset::new`
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DatasetError {
    #[error("dataset has no depth samples")]
    Empty,

    #[error("curve {curve} has {found} samples, depth index has {expected}")]
    LengthMismatch {
        curve: String,
        expected: usize,
        found: usize,
    },

    #[error("depth index is not strictly increasing at sample {index}")]
    NotIncreasing { index: usize },

    #[error("sampling step must be positive and finite, got {0}")]
    InvalidStep(f64),
}

/// Depth-indexed table of log curves plus header metadata.
///
/// Depth is strictly increasing and every curve has exactly one value slot per depth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogDataset {
    depth_mnemonic: String,
    depth_unit: String,
    depth: Vec<f64>,
    curves: Vec<LogCurve>,
    header: WellHeader,
    null_value: f64,
    step: f64,
    diagnostics: LoadDiagnostics,
}

impl LogDataset {
    /// Build a dataset, enforcing the depth/curve invariants.
    ///
    /// `step` is the resolved sampling interval (header `STEP` or the configured default).
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        depth_mnemonic: impl Into<String>,
        depth_unit: impl Into<String>,
        depth: Vec<f64>,
        curves: Vec<LogCurve>,
        header: WellHeader,
        null_value: f64,
        step: f64,
        diagnostics: LoadDiagnostics,
    ) -> Result<Self, DatasetError> {
        if depth.is_empty() {
            return Err(DatasetError::Empty);
        }
        if !step.is_finite() || step <= 0.0 {
            return Err(DatasetError::InvalidStep(step));
        }
        if let Some(index) = depth.windows(2).position(|w| w[1] <= w[0]) {
            return Err(DatasetError::NotIncreasing { index: index + 1 });
        }
        for curve in &curves {
            if curve.len() != depth.len() {
                return Err(DatasetError::LengthMismatch {
                    curve: curve.mnemonic.clone(),
                    expected: depth.len(),
                    found: curve.len(),
                });
            }
        }

        Ok(Self {
            depth_mnemonic: depth_mnemonic.into(),
            depth_unit: depth_unit.into(),
            depth,
            curves,
            header,
            null_value,
            step,
            diagnostics,
        })
    }

    pub fn depth(&self) -> &[f64] {
        &self.depth
    }

    pub fn depth_mnemonic(&self) -> &str {
        &self.depth_mnemonic
    }

    pub fn depth_unit(&self) -> &str {
        &self.depth_unit
    }

    /// Number of depth samples
    pub fn len(&self) -> usize {
        self.depth.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depth.is_empty()
    }

    /// Curves in file order (depth column excluded)
    pub fn curves(&self) -> &[LogCurve] {
        &self.curves
    }

    pub fn header(&self) -> &WellHeader {
        &self.header
    }

    pub fn null_value(&self) -> f64 {
        self.null_value
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn diagnostics(&self) -> &LoadDiagnostics {
        &self.diagnostics
    }

    pub fn depth_range(&self) -> (f64, f64) {
        let first = self.depth.first().copied().unwrap_or(0.0);
        let last = self.depth.last().copied().unwrap_or(0.0);
        (first, last)
    }

    /// Case-insensitive lookup by mnemonic.
    pub fn curve(&self, mnemonic: &str) -> Option<&LogCurve> {
        self.curves
            .iter()
            .find(|c| c.mnemonic.eq_ignore_ascii_case(mnemonic))
    }

    pub fn has_curve(&self, mnemonic: &str) -> bool {
        self.curve(mnemonic).is_some()
    }

    /// First curve matching any of the candidate names, in candidate order.
    pub fn find_curve<S: AsRef<str>>(&self, candidates: &[S]) -> Option<&LogCurve> {
        candidates.iter().find_map(|name| self.curve(name.as_ref()))
    }

    pub fn curve_names(&self) -> Vec<&str> {
        self.curves.iter().map(|c| c.mnemonic.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(depth: Vec<f64>, curves: Vec<LogCurve>) -> Result<LogDataset, DatasetError> {
        LogDataset::new(
            "DEPT",
            "F",
            depth,
            curves,
            WellHeader::new(),
            -999.25,
            0.5,
            LoadDiagnostics::new(ParserKind::Manual),
        )
    }

    #[test]
    fn test_curve_lookup_is_case_insensitive() {
        let ds = dataset(
            vec![100.0, 100.5],
            vec![LogCurve::new("GR", "GAPI", vec![Some(40.0), None])],
        )
        .unwrap();
        assert!(ds.curve("gr").is_some());
        assert_eq!(ds.find_curve(&["GGCE", "Gr"]).unwrap().mnemonic, "GR");
        assert!(ds.find_curve(&["RHOB"]).is_none());
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let err = dataset(
            vec![100.0, 100.5, 101.0],
            vec![LogCurve::new("GR", "GAPI", vec![Some(40.0)])],
        )
        .unwrap_err();
        assert!(matches!(err, DatasetError::LengthMismatch { expected: 3, found: 1, .. }));
    }

    #[test]
    fn test_non_increasing_depth_rejected() {
        let err = dataset(vec![100.0, 100.0], vec![]).unwrap_err();
        assert_eq!(err, DatasetError::NotIncreasing { index: 1 });
    }

    #[test]
    fn test_empty_dataset_rejected() {
        assert_eq!(dataset(vec![], vec![]).unwrap_err(), DatasetError::Empty);
    }

    #[test]
    fn test_valid_values_skip_missing() {
        let curve = LogCurve::new("DEN", "G/C3", vec![Some(2.4), None, Some(2.5)]);
        assert_eq!(curve.valid_values(), vec![2.4, 2.5]);
        assert_eq!(curve.valid_count(), 2);
        assert_eq!(curve.get(1), None);
        assert_eq!(curve.get(9), None);
    }

    #[test]
    fn test_header_step_zero_is_absent() {
        let mut header = WellHeader::new();
        header.insert(HeaderItem {
            mnemonic: "step".to_string(),
            unit: "F".to_string(),
            value: "0.0".to_string(),
            description: "STEP".to_string(),
        });
        assert_eq!(header.step(), None);
        assert!(header.get("STEP").is_some());
    }
}
