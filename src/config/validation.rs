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

/// Returns the complete set of valid dotted key paths for DiagnosticConfig.
///
/// Any new field added to DiagnosticConfig must be added here too.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [machine]
        "machine",
        "machine.name",
        "machine.location",
        // [analysis]
        "analysis",
        "analysis.window_size",
        // [scan]
        "scan",
        "scan.sample_rate_hz",
        "scan.target_rpm",
        // [thresholds]
        "thresholds",
        "thresholds.unbalance_1x_min",
        "thresholds.unbalance_harmonic_max",
        "thresholds.misalignment_2x_min",
        "thresholds.looseness_min",
        "thresholds.noise_floor_min",
        "thresholds.nyquist_guard",
        "thresholds.peak_search_radius",
        // [history]
        "history",
        "history.capacity",
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
    if a.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a.chars().count();
    }

    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0; b_chars.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
///
/// Ties resolve to the lexicographically smallest key so suggestions are
/// stable across runs.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|&k| (levenshtein(unknown, k), k))
        .filter(|&(dist, _)| dist <= 3)
        .min()
        .map(|(_, k)| k.to_string())
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
        Err(_) => return Vec::new(), // parse errors are handled by serde later
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| {
            let suggestion = suggest_correction(&key, &known);
            let message = format!("Unknown config key '{key}'");
            ValidationWarning {
                field: key,
                message,
                suggestion,
            }
        })
        .collect()
}

// ============================================================================
// Physical Range Validation
// ============================================================================

/// Validate physical ranges on a parsed DiagnosticConfig.
///
/// Returns (errors, warnings). Errors are values the pipeline cannot work
/// with; warnings are suspicious but not fatal.
pub fn validate_physical_ranges(
    config: &super::DiagnosticConfig,
) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let t = &config.thresholds;

    // The search window must leave room for interior bins around each harmonic
    let max_radius = config.analysis.window_size / 8;
    if t.peak_search_radius > max_radius {
        errors.push(format!(
            "thresholds.peak_search_radius = {} exceeds window_size / 8 ({max_radius})",
            t.peak_search_radius
        ));
    }

    // Camera capture rarely exceeds 1 kHz; accelerometers go to tens of kHz
    let fs = config.scan.sample_rate_hz;
    if fs.is_finite() && !(1.0..=100_000.0).contains(&fs) {
        warnings.push(ValidationWarning {
            field: "scan.sample_rate_hz".to_string(),
            message: format!("sample_rate_hz = {fs:.1} is outside typical range (1-100000 Hz)"),
            suggestion: None,
        });
    }

    // Unbalance needs a quiet 2x/3x, so its harmonic ceiling sits below the 1x gate
    if t.unbalance_harmonic_max >= t.unbalance_1x_min {
        warnings.push(ValidationWarning {
            field: "thresholds.unbalance_harmonic_max".to_string(),
            message: format!(
                "unbalance_harmonic_max ({:.2}) >= unbalance_1x_min ({:.2}); unbalance may shadow looseness",
                t.unbalance_harmonic_max, t.unbalance_1x_min
            ),
            suggestion: None,
        });
    }

    if t.nyquist_guard > 0.95 && t.nyquist_guard <= 1.0 {
        warnings.push(ValidationWarning {
            field: "thresholds.nyquist_guard".to_string(),
            message: format!(
                "nyquist_guard = {:.2} leaves almost no margin against aliasing",
                t.nyquist_guard
            ),
            suggestion: None,
        });
    }

    (errors, warnings)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DiagnosticConfig;

    #[test]
    fn test_levenshtein_identical() {
        assert_eq!(levenshtein("hello", "hello"), 0);
    }

    #[test]
    fn test_levenshtein_one_edit() {
        assert_eq!(levenshtein("loosenes_min", "looseness_min"), 1);
    }

    #[test]
    fn test_levenshtein_empty() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
    }

    #[test]
    fn test_walk_toml_keys_nested() {
        let toml: toml::Value = r#"
            [thresholds]
            looseness_min = 3.0
        "#
        .parse()
        .unwrap();
        let keys = walk_toml_keys(&toml, "");
        assert!(keys.contains(&"thresholds".to_string()));
        assert!(keys.contains(&"thresholds.looseness_min".to_string()));
    }

    #[test]
    fn test_typo_key_produces_warning_with_suggestion() {
        let toml_str = r#"
[thresholds]
nyquist_gaurd = 0.8
"#;
        let warnings = validate_unknown_keys(toml_str);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].field.contains("nyquist_gaurd"));
        assert_eq!(
            warnings[0].suggestion.as_deref(),
            Some("thresholds.nyquist_guard")
        );
    }

    #[test]
    fn test_all_valid_keys_produce_zero_warnings() {
        let toml_str = r#"
[machine]
name = "HAV-402"
location = "Hall B"

[analysis]
window_size = 1024

[scan]
sample_rate_hz = 60.0
target_rpm = 1200.0

[thresholds]
unbalance_1x_min = 5.0
peak_search_radius = 3

[history]
capacity = 4096
"#;
        let warnings = validate_unknown_keys(toml_str);
        assert!(warnings.is_empty(), "Expected 0 warnings, got: {:?}", warnings);
    }

    #[test]
    fn test_suggest_correction_no_match_for_garbage() {
        let known = known_config_keys();
        assert!(suggest_correction("completely_unrelated_garbage_key_xyz", &known).is_none());
    }

    #[test]
    fn test_peak_radius_too_wide_is_error() {
        let mut config = DiagnosticConfig::default();
        config.analysis.window_size = 64;
        config.thresholds.peak_search_radius = 9;
        let (errors, _) = validate_physical_ranges(&config);
        assert!(errors.iter().any(|e| e.contains("peak_search_radius")));
    }

    #[test]
    fn test_inverted_unbalance_gates_warn() {
        let mut config = DiagnosticConfig::default();
        config.thresholds.unbalance_harmonic_max = 6.0;
        let (_, warnings) = validate_physical_ranges(&config);
        assert!(warnings
            .iter()
            .any(|w| w.field == "thresholds.unbalance_harmonic_max"));
    }

    #[test]
    fn test_physical_range_defaults_clean() {
        let config = DiagnosticConfig::default();
        let (errors, warnings) = validate_physical_ranges(&config);
        assert!(errors.is_empty(), "Defaults should produce no errors: {:?}", errors);
        assert!(warnings.is_empty(), "Defaults should produce no warnings: {:?}", warnings);
    }
}
