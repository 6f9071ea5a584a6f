//! Config validation: unknown-key detection with Levenshtein suggestions
//! and physical range checks.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Warnings never break existing configs.

use std::collections::HashSet;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for AnalysisConfig.
///
/// Maintained by hand to match the struct hierarchy in analysis_config.rs.
/// Any new field added to AnalysisConfig must be added here too.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [loader]
        "loader",
        "loader.parser",
        "loader.default_null_value",
        "loader.default_step",
        "loader.max_reported_row_issues",
        // [curves]
        "curves",
        "curves.gamma_ray",
        "curves.neutron_porosity",
        "curves.bulk_density",
        "curves.photoelectric",
        "curves.resistivity",
        "curves.neutron_scale",
        // [quality]
        "quality",
        "quality.iqr_multiplier",
        "quality.min_values_for_iqr",
        "quality.step_tolerance",
        // [lithology]
        "lithology",
        // [lithology.gamma_ray]
        "lithology.gamma_ray",
        "lithology.gamma_ray.clean_percentile",
        "lithology.gamma_ray.shale_percentile",
        "lithology.gamma_ray.shale_volume_model",
        "lithology.gamma_ray.clean_cutoff",
        "lithology.gamma_ray.shale_cutoff",
        // [lithology.neutron_density]
        "lithology.neutron_density",
        "lithology.neutron_density.density_weight",
        "lithology.neutron_density.gas_density_max",
        "lithology.neutron_density.gas_neutron_max",
        // [lithology.clustering]
        "lithology.clustering",
        "lithology.clustering.features",
        "lithology.clustering.min_features",
        "lithology.clustering.min_rows",
        "lithology.clustering.k_min",
        "lithology.clustering.k_max",
        "lithology.clustering.seed",
        "lithology.clustering.n_init",
        "lithology.clustering.max_iter",
        "lithology.clustering.tolerance",
        // [petrophysics]
        "petrophysics",
        // [petrophysics.porosity]
        "petrophysics.porosity",
        "petrophysics.porosity.matrix_density",
        "petrophysics.porosity.fluid_density",
        "petrophysics.porosity.gas_threshold",
        "petrophysics.porosity.max_porosity",
        "petrophysics.porosity.include_crossplot_gas",
        // [petrophysics.archie]
        "petrophysics.archie",
        "petrophysics.archie.a",
        "petrophysics.archie.rw",
        "petrophysics.archie.m",
        "petrophysics.archie.n",
        // [petrophysics.net_to_gross]
        "petrophysics.net_to_gross",
        "petrophysics.net_to_gross.gr_cutoff",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// For example, a table `{ a = { b = 1, c = 2 } }` yields:
/// `["a", "a.b", "a.c"]`
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

/// Compute the Levenshtein edit distance between two strings.
fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let b_len = b_chars.len();
    if a.is_empty() {
        return b_len;
    }
    if b_len == 0 {
        return a.chars().count();
    }

    let mut prev: Vec<usize> = (0..=b_len).collect();
    let mut curr = vec![0; b_len + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_len]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
///
/// Ties resolve alphabetically so the suggestion does not depend on set order.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    let mut best: Option<(&str, usize)> = None;
    for &k in known {
        let dist = levenshtein(unknown, k);
        if dist > 3 {
            continue;
        }
        best = match best {
            Some((bk, bd)) if bd < dist || (bd == dist && bk < k) => Some((bk, bd)),
            _ => Some((k, dist)),
        };
    }
    best.map(|(k, _)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// This does NOT fail on unknown keys; it only warns.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(), // parse errors are reported by serde later
    };

    let known = known_config_keys();
    let found = walk_toml_keys(&value, "");
    let mut warnings = Vec::new();

    for key in &found {
        if !known.contains(key.as_str()) {
            let suggestion = suggest_correction(key, &known);
            let message = format!("Unknown config key '{key}'");
            warnings.push(ValidationWarning {
                field: key.clone(),
                message,
                suggestion,
            });
        }
    }

    warnings
}

// ============================================================================
// Physical Range Validation
// ============================================================================

/// Validate physical ranges on a parsed AnalysisConfig.
///
/// Returns (errors, warnings): errors are impossible values that must
/// abort the run; warnings are unusual calibrations worth a second look.
pub fn validate_physical_ranges(
    config: &super::AnalysisConfig,
) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let por = &config.petrophysics.porosity;

    // Rock-forming minerals sit between ~2.0 (gypsum, coal excluded) and ~3.5 g/cc
    if por.matrix_density < 1.5 || por.matrix_density > 4.0 {
        errors.push(format!(
            "petrophysics.porosity.matrix_density = {:.2} is outside physical range (1.5-4.0 g/cc)",
            por.matrix_density
        ));
    }

    // Pore fluids: gas (~0.1) up to heavy brine (~1.2)
    if por.fluid_density <= 0.0 || por.fluid_density > 1.5 {
        errors.push(format!(
            "petrophysics.porosity.fluid_density = {:.2} is outside physical range (0-1.5 g/cc)",
            por.fluid_density
        ));
    }

    if por.gas_threshold < 0.0 {
        errors.push(format!(
            "petrophysics.porosity.gas_threshold = {:.3} cannot be negative",
            por.gas_threshold
        ));
    }

    let archie = &config.petrophysics.archie;
    if archie.rw < 0.005 || archie.rw > 10.0 {
        warnings.push(ValidationWarning {
            field: "petrophysics.archie.rw".to_string(),
            message: format!(
                "archie.rw = {:.3} is outside typical range (0.005-10 ohm·m)",
                archie.rw
            ),
            suggestion: None,
        });
    }
    for (field, value) in [("m", archie.m), ("n", archie.n)] {
        if !(1.0..=3.5).contains(&value) {
            warnings.push(ValidationWarning {
                field: format!("petrophysics.archie.{field}"),
                message: format!("archie.{field} = {value:.2} is outside typical range (1.0-3.5)"),
                suggestion: None,
            });
        }
    }
    if !(0.4..=2.0).contains(&archie.a) {
        warnings.push(ValidationWarning {
            field: "petrophysics.archie.a".to_string(),
            message: format!(
                "archie.a = {:.2} is outside typical range (0.4-2.0)",
                archie.a
            ),
            suggestion: None,
        });
    }

    let cutoff = config.petrophysics.net_to_gross.gr_cutoff;
    if !(10.0..=250.0).contains(&cutoff) {
        warnings.push(ValidationWarning {
            field: "petrophysics.net_to_gross.gr_cutoff".to_string(),
            message: format!(
                "net_to_gross.gr_cutoff = {cutoff:.1} is outside typical range (10-250 API)"
            ),
            suggestion: None,
        });
    }

    (errors, warnings)
}

// ============================================================================
// Tests
// ============================================================================
