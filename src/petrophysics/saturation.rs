//! Archie water saturation

use crate::types::{ArchieParameters, LogCurve, SaturationResult};

/// Formation factor `a / phi^m`; undefined for non-positive porosity.
pub fn formation_factor(phi: f64, params: &ArchieParameters) -> Option<f64> {
    (phi > 0.0).then(|| params.a / phi.powf(params.m))
}

/// Sw = ((a * Rw) / (phi^m * Rt))^(1/n), clipped to [0, 1].
///
/// Zero porosity is fully water saturated; a non-positive Rt leaves Sw undefined.
pub fn archie_sw(phi: f64, rt: f64, params: &ArchieParameters) -> Option<f64> {
    if rt <= 0.0 || !rt.is_finite() {
        return None;
    }
    let Some(f) = formation_factor(phi, params) else {
        return Some(1.0);
    };
    let sw = ((params.rw * f) / rt).powf(1.0 / params.n);
    sw.is_finite().then(|| sw.clamp(0.0, 1.0))
}

pub fn compute(phi: &[Option<f64>], resistivity: &LogCurve, params: ArchieParameters) -> SaturationResult {
    let mut sw = Vec::with_capacity(phi.len());
    let mut formation = Vec::with_capacity(phi.len());
    for (phi, rt) in phi.iter().zip(resistivity.values()) {
        formation.push(phi.and_then(|p| formation_factor(p, &params)));
        sw.push(match (phi, rt) {
            (Some(p), Some(r)) => archie_sw(*p, *r, &params),
            _ => None,
        });
    }
    let sh = sw.iter().map(|s| s.map(|s| 1.0 - s)).collect();

    SaturationResult {
        resistivity_curve: resistivity.mnemonic.clone(),
        parameters: params,
        sw,
        sh,
        formation_factor: formation,
    }
}
