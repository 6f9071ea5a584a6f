//! Lithology Classifier
//!
//! Four independent methods, each producing one label per depth:
//!
//! | Method | Required roles |
//! |---|---|
//! | gamma ray | gamma ray |
//! | neutron-density | neutron porosity, bulk density |
//! | photoelectric | photoelectric factor |
//! | clustering | at least `min_features` of the configured feature roles |
//!
//! A method whose inputs are absent is left out of [`LithologyResults::methods`]
//! and recorded in [`LithologyResults::skipped`] with its reason.

pub mod clustering;
pub mod gamma_ray;
pub mod kmeans;
pub mod neutron_density;
pub mod photoelectric;

use tracing::{debug, info};

use crate::config::AnalysisConfig;
use crate::types::{CurveRole, LithologyMethod, LithologyResult, LithologyResults, LogDataset, SkipReason};

/// Curve roles a method cannot run without
pub fn required_roles(method: LithologyMethod) -> &'static [CurveRole] {
    match method {
        LithologyMethod::GammaRay => &[CurveRole::GammaRay],
        LithologyMethod::NeutronDensity => &[CurveRole::NeutronPorosity, CurveRole::BulkDensity],
        LithologyMethod::Photoelectric => &[CurveRole::Photoelectric],
        // feature availability is checked against the clustering config
        LithologyMethod::Clustering => &[],
    }
}

pub struct LithologyClassifier;

impl LithologyClassifier {
    /// Run every applicable method over `dataset`
    pub fn classify(dataset: &LogDataset, config: &AnalysisConfig) -> LithologyResults {
        let mut results = LithologyResults::default();
        for method in LithologyMethod::ALL {
            match Self::run_method(method, dataset, config) {
                Ok(result) => {
                    debug!(
                        method = %method,
                        classified = result.classified_count(),
                        unclassified = result.unclassified_count(),
                        "Lithology method complete"
                    );
                    results.methods.insert(method, result);
                }
                Err(reason) => {
                    info!(method = %method, reason = %reason, "Lithology method skipped");
                    results.skipped.insert(method, reason);
                }
            }
        }
        results
    }

    /// Run a single method, or report why it cannot run
    pub fn run_method(
        method: LithologyMethod,
        dataset: &LogDataset,
        config: &AnalysisConfig,
    ) -> Result<LithologyResult, SkipReason> {
        let aliases = &config.curves;
        let missing = aliases.missing(dataset, required_roles(method));
        if !missing.is_empty() {
            return Err(SkipReason::MissingCurves { roles: missing });
        }
        let curve = |role| {
            aliases
                .resolve(dataset, role)
                .ok_or_else(|| SkipReason::MissingCurves { roles: vec![role] })
        };

        let lithology = &config.lithology;
        match method {
            LithologyMethod::GammaRay => {
                gamma_ray::classify(curve(CurveRole::GammaRay)?, &lithology.gamma_ray)
            }
            LithologyMethod::NeutronDensity => Ok(neutron_density::classify(
                curve(CurveRole::NeutronPorosity)?,
                curve(CurveRole::BulkDensity)?,
                aliases.neutron_scale,
                &lithology.neutron_density,
            )),
            LithologyMethod::Photoelectric => {
                Ok(photoelectric::classify(curve(CurveRole::Photoelectric)?))
            }
            LithologyMethod::Clustering => {
                clustering::classify(dataset, aliases, &lithology.clustering)
            }
        }
    }
}
