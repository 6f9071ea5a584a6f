//! Recoverable omissions: why a method or property is absent from its result mapping.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::CurveRole;

/// Reason an optional computation did not run.
///
/// Stored next to the computed entries so callers can tell
/// "not applicable to this dataset" apart from "never attempted".
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    #[error("missing required curves: {roles:?}")]
    MissingCurves { roles: Vec<CurveRole> },

    #[error("insufficient data: need {needed} rows, have {available}")]
    InsufficientData { needed: usize, available: usize },

    #[error("depends on {dependency}, which was not computed")]
    MissingDependency { dependency: String },
}
