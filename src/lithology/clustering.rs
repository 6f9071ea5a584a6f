//! Unsupervised electrofacies clustering
//!
//! Features are standardized over complete rows, the cluster count is picked
//! from the inertia curve, and the seeded k-means partition is written back to
//! the full depth index (incomplete rows stay unclassified).

use tracing::debug;

use super::kmeans::{KMeans, KMeansFit};
use crate::config::{defaults, ClusteringConfig, CurveAliases};
use crate::stats;
use crate::types::{
    ClusteringDetail, CurveRole, ElbowPoint, LithologyDetail, LithologyLabel, LithologyMethod,
    LithologyResult, LogCurve, LogDataset, SkipReason,
};

/// Largest cluster count the row count supports: `rows / 5 - 1`, capped at `k_max`.
pub fn k_cap(rows: usize, k_max: usize) -> usize {
    (rows / defaults::CLUSTER_ROWS_PER_K).saturating_sub(1).min(k_max)
}

/// Elbow of the inertia curve: the centre of the largest second difference.
///
/// With fewer than three candidates there is no curvature to read and the
/// fallback count is returned.
pub fn select_k(candidates: &[ElbowPoint], fallback: usize) -> usize {
    if candidates.len() < 3 {
        return fallback;
    }
    let mut best = (1, f64::NEG_INFINITY);
    for (i, w) in candidates.windows(3).enumerate() {
        let curvature = w[0].inertia - 2.0 * w[1].inertia + w[2].inertia;
        if curvature > best.1 {
            best = (i + 1, curvature);
        }
    }
    candidates[best.0].k
}

/// Resolve feature roles to distinct curves, in configured order
fn feature_curves<'d>(
    dataset: &'d LogDataset,
    aliases: &CurveAliases,
    roles: &[CurveRole],
) -> (Vec<&'d LogCurve>, Vec<CurveRole>) {
    let mut found: Vec<&LogCurve> = Vec::new();
    let mut missing = Vec::new();
    for &role in roles {
        match aliases.resolve(dataset, role) {
            Some(curve) if !found.iter().any(|c| c.mnemonic == curve.mnemonic) => found.push(curve),
            Some(_) => {}
            None => missing.push(role),
        }
    }
    (found, missing)
}

pub fn classify(
    dataset: &LogDataset,
    aliases: &CurveAliases,
    config: &ClusteringConfig,
) -> Result<LithologyResult, SkipReason> {
    let (curves, missing) = feature_curves(dataset, aliases, &config.features);
    if curves.len() < config.min_features.max(1) {
        return Err(SkipReason::MissingCurves { roles: missing });
    }

    // rows with every feature present
    let rows: Vec<usize> = (0..dataset.len())
        .filter(|&i| curves.iter().all(|c| c.get(i).is_some()))
        .collect();
    if rows.len() < config.min_rows {
        return Err(SkipReason::InsufficientData {
            needed: config.min_rows,
            available: rows.len(),
        });
    }

    let mut feature_means = Vec::with_capacity(curves.len());
    let mut feature_std_devs = Vec::with_capacity(curves.len());
    for curve in &curves {
        let column: Vec<f64> = rows.iter().filter_map(|&i| curve.get(i)).collect();
        feature_means.push(stats::mean(&column).unwrap_or(0.0));
        feature_std_devs.push(stats::population_std_dev(&column).unwrap_or(0.0));
    }

    let points: Vec<Vec<f64>> = rows
        .iter()
        .map(|&i| {
            curves
                .iter()
                .zip(feature_means.iter().zip(&feature_std_devs))
                .map(|(curve, (mean, std))| {
                    // constant feature: centred, not scaled
                    let scale = if *std > f64::EPSILON { *std } else { 1.0 };
                    (curve.get(i).unwrap_or(*mean) - mean) / scale
                })
                .collect()
        })
        .collect();

    let model = |k: usize| KMeans {
        k,
        n_init: config.n_init,
        max_iter: config.max_iter,
        tolerance: config.tolerance,
        seed: config.seed,
    };

    let mut fits: Vec<KMeansFit> = Vec::new();
    let mut candidates = Vec::new();
    for k in config.k_min..=k_cap(rows.len(), config.k_max) {
        if let Some(fit) = model(k).fit(&points) {
            candidates.push(ElbowPoint {
                k,
                inertia: fit.inertia,
            });
            fits.push(fit);
        }
    }

    let k = select_k(&candidates, defaults::CLUSTER_FALLBACK_K).min(rows.len());
    let fit = match candidates.iter().position(|c| c.k == k) {
        Some(idx) => fits.swap_remove(idx),
        None => model(k).fit(&points).ok_or(SkipReason::InsufficientData {
            needed: k,
            available: rows.len(),
        })?,
    };
    debug!(
        rows = rows.len(),
        features = curves.len(),
        candidates = candidates.len(),
        k,
        inertia = fit.inertia,
        "Clustering fitted"
    );

    let mut cluster_ids = vec![None; dataset.len()];
    for (&row, &cluster) in rows.iter().zip(&fit.assignments) {
        cluster_ids[row] = Some(cluster);
    }
    let labels = cluster_ids
        .iter()
        .map(|id| id.map(LithologyLabel::Facies))
        .collect();

    Ok(LithologyResult {
        method: LithologyMethod::Clustering,
        labels,
        detail: LithologyDetail::Clustering(ClusteringDetail {
            features: curves.iter().map(|c| c.mnemonic.clone()).collect(),
            feature_means,
            feature_std_devs,
            complete_rows: rows.len(),
            candidates,
            k,
            inertia: fit.inertia,
            seed: config.seed,
            cluster_ids,
        }),
    })
}
