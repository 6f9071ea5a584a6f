//! Photoelectric-factor mineral ranges

use crate::types::{
    LithologyDetail, LithologyLabel, LithologyMethod, LithologyResult, LogCurve,
    PhotoelectricDetail,
};

/// Inclusive PE range (barns/electron) for one mineral
#[derive(Debug, Clone, Copy)]
pub struct PeRange {
    pub label: LithologyLabel,
    pub min: f64,
    pub max: f64,
}

/// Tested in order; narrower ranges precede the ones they overlap.
pub const PE_RANGES: [PeRange; 6] = [
    PeRange {
        label: LithologyLabel::QuartzSandstone,
        min: 1.8,
        max: 1.9,
    },
    PeRange {
        label: LithologyLabel::Dolomite,
        min: 3.0,
        max: 3.2,
    },
    PeRange {
        label: LithologyLabel::Anhydrite,
        min: 5.0,
        max: 5.1,
    },
    PeRange {
        label: LithologyLabel::CalciteLimestone,
        min: 5.0,
        max: 5.2,
    },
    PeRange {
        label: LithologyLabel::Salt,
        min: 4.6,
        max: 4.8,
    },
    PeRange {
        label: LithologyLabel::ClayShale,
        min: 2.8,
        max: 3.3,
    },
];

pub fn label_for(pe: f64) -> LithologyLabel {
    PE_RANGES
        .iter()
        .find(|r| pe >= r.min && pe <= r.max)
        .map_or(LithologyLabel::Unknown, |r| r.label)
}

pub fn classify(curve: &LogCurve) -> LithologyResult {
    let labels = curve.values().iter().map(|v| v.map(label_for)).collect();
    LithologyResult {
        method: LithologyMethod::Photoelectric,
        labels,
        detail: LithologyDetail::Photoelectric(PhotoelectricDetail {
            curve: curve.mnemonic.clone(),
            pe: curve.values().to_vec(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlaps_resolve_to_narrower_range() {
        assert_eq!(label_for(3.1), LithologyLabel::Dolomite);
        assert_eq!(label_for(3.0), LithologyLabel::Dolomite);
        assert_eq!(label_for(2.9), LithologyLabel::ClayShale);
        assert_eq!(label_for(3.25), LithologyLabel::ClayShale);
        assert_eq!(label_for(5.05), LithologyLabel::Anhydrite);
        assert_eq!(label_for(5.15), LithologyLabel::CalciteLimestone);
    }

    #[test]
    fn test_inclusive_bounds_and_unknown() {
        assert_eq!(label_for(1.8), LithologyLabel::QuartzSandstone);
        assert_eq!(label_for(1.9), LithologyLabel::QuartzSandstone);
        assert_eq!(label_for(4.7), LithologyLabel::Salt);
        assert_eq!(label_for(2.2), LithologyLabel::Unknown);
        assert_eq!(label_for(6.0), LithologyLabel::Unknown);
    }

    #[test]
    fn test_missing_pe_is_unclassified() {
        let curve = LogCurve::new("PE", "B/E", vec![Some(1.85), None, Some(9.0)]);
        let result = classify(&curve);
        assert_eq!(
            result.labels,
            vec![Some(LithologyLabel::QuartzSandstone), None, Some(LithologyLabel::Unknown)]
        );
    }
}
