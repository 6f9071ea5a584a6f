//! Gamma-ray shale-volume classification (Larionov)

use crate::config::GammaRayConfig;
use crate::stats;
use crate::types::{
    GammaRayDetail, LithologyDetail, LithologyLabel, LithologyMethod, LithologyResult, LogCurve,
    ShaleVolumeModel, SkipReason,
};

/// Larionov Tertiary-rock shale volume
pub fn vsh_tertiary(gr_index: f64) -> f64 {
    0.083 * (2f64.powf(3.7 * gr_index) - 1.0)
}

/// Larionov older-rock shale volume
pub fn vsh_older(gr_index: f64) -> f64 {
    0.33 * (2f64.powf(2.0 * gr_index) - 1.0)
}

/// Normalised gamma ray clipped to [0, 1]. A zero baseline spread maps every sample to 0.
pub fn gr_index(gr: f64, gr_clean: f64, gr_shale: f64) -> f64 {
    let spread = gr_shale - gr_clean;
    if spread.abs() < f64::EPSILON {
        return 0.0;
    }
    ((gr - gr_clean) / spread).clamp(0.0, 1.0)
}

pub fn label_for(vsh: f64, config: &GammaRayConfig) -> LithologyLabel {
    if vsh < config.clean_cutoff {
        LithologyLabel::CleanSandstone
    } else if vsh < config.shale_cutoff {
        LithologyLabel::ShalySandstone
    } else {
        LithologyLabel::Shale
    }
}

pub fn classify(curve: &LogCurve, config: &GammaRayConfig) -> Result<LithologyResult, SkipReason> {
    let values = curve.valid_values();
    let sorted = stats::sorted(&values);
    let (Some(gr_clean), Some(gr_shale)) = (
        stats::quantile_sorted(&sorted, config.clean_percentile / 100.0),
        stats::quantile_sorted(&sorted, config.shale_percentile / 100.0),
    ) else {
        return Err(SkipReason::InsufficientData {
            needed: 1,
            available: 0,
        });
    };

    let gr_idx: Vec<Option<f64>> = curve
        .values()
        .iter()
        .map(|v| v.map(|gr| gr_index(gr, gr_clean, gr_shale)))
        .collect();
    let tertiary: Vec<Option<f64>> = gr_idx.iter().map(|g| g.map(vsh_tertiary)).collect();
    let older: Vec<Option<f64>> = gr_idx.iter().map(|g| g.map(vsh_older)).collect();

    let selected = match config.shale_volume_model {
        ShaleVolumeModel::Tertiary => &tertiary,
        ShaleVolumeModel::Older => &older,
    };
    let labels = selected
        .iter()
        .map(|v| v.map(|vsh| label_for(vsh, config)))
        .collect();

    Ok(LithologyResult {
        method: LithologyMethod::GammaRay,
        labels,
        detail: LithologyDetail::GammaRay(GammaRayDetail {
            curve: curve.mnemonic.clone(),
            gr_clean,
            gr_shale,
            model: config.shale_volume_model,
            gr_index: gr_idx,
            vsh_tertiary: tertiary,
            vsh_older: older,
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shaly_sandstone_just_above_clean_cutoff() {
        let grn = gr_index(56.0, 20.0, 150.0);
        assert!((grn - 36.0 / 130.0).abs() < 1e-12);
        let vsh = vsh_older(grn);
        assert!((vsh - 0.154).abs() < 1e-3);
        assert_eq!(label_for(vsh, &GammaRayConfig::default()), LithologyLabel::ShalySandstone);
    }

    #[test]
    fn test_gr_index_is_clipped() {
        assert_eq!(gr_index(5.0, 20.0, 150.0), 0.0);
        assert_eq!(gr_index(300.0, 20.0, 150.0), 1.0);
        assert_eq!(gr_index(80.0, 60.0, 60.0), 0.0);
    }

    #[test]
    fn test_vsh_endpoints() {
        assert_eq!(vsh_older(0.0), 0.0);
        assert!((vsh_older(1.0) - 0.99).abs() < 1e-12);
        assert!((vsh_tertiary(1.0) - 0.083 * (2f64.powf(3.7) - 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_missing_gr_is_unclassified() {
        let values: Vec<Option<f64>> = (0..21)
            .map(|i| if i == 3 { None } else { Some(20.0 + i as f64 * 6.5) })
            .collect();
        let curve = LogCurve::new("GR", "GAPI", values);
        let result = classify(&curve, &GammaRayConfig::default()).unwrap();
        assert_eq!(result.len(), 21);
        assert_eq!(result.labels[3], None);
        assert_eq!(result.labels[0], Some(LithologyLabel::CleanSandstone));
        assert_eq!(result.labels[20], Some(LithologyLabel::Shale));
        assert_eq!(result.unclassified_count(), 1);
    }

    #[test]
    fn test_baselines_recorded() {
        let values: Vec<Option<f64>> = (0..=100).map(|i| Some(i as f64)).collect();
        let curve = LogCurve::new("GGCE", "GAPI", values);
        let result = classify(&curve, &GammaRayConfig::default()).unwrap();
        let LithologyDetail::GammaRay(detail) = &result.detail else {
            panic!("expected gamma-ray detail");
        };
        assert!((detail.gr_clean - 5.0).abs() < 1e-12);
        assert!((detail.gr_shale - 95.0).abs() < 1e-12);
        assert_eq!(detail.curve, "GGCE");
        assert_eq!(detail.model, ShaleVolumeModel::Older);
    }

    #[test]
    fn test_all_missing_gr_is_skipped() {
        let curve = LogCurve::new("GR", "GAPI", vec![None, None]);
        assert!(matches!(
            classify(&curve, &GammaRayConfig::default()),
            Err(SkipReason::InsufficientData { .. })
        ));
    }
}
