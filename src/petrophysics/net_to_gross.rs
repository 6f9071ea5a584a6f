//! Gamma-ray cutoff net-to-gross

use crate::types::{LogCurve, NetToGrossResult};

/// Net flag per depth (missing gamma ray is not net) and thicknesses from `step`
pub fn compute(gr: &LogCurve, gr_cutoff: f64, step: f64) -> NetToGrossResult {
    let net_flag: Vec<bool> = gr
        .values()
        .iter()
        .map(|v| v.is_some_and(|g| g < gr_cutoff))
        .collect();
    let net_count = net_flag.iter().filter(|f| **f).count();
    let net_thickness = net_count as f64 * step;
    let gross_thickness = net_flag.len() as f64 * step;
    let ratio = if gross_thickness > 0.0 {
        net_thickness / gross_thickness
    } else {
        0.0
    };

    NetToGrossResult {
        curve: gr.mnemonic.clone(),
        gr_cutoff,
        step,
        net_flag,
        net_thickness,
        gross_thickness,
        ratio,
    }
}
