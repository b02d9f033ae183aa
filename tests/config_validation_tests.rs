//! Config Validation Tests
//!
//! Typo detection and range validation for `rotor_diag.toml`, exercised
//! independently from the analyzer.

use std::io::Write;

use rotor_diag::config::validation::{
    known_config_keys, suggest_correction, validate_physical_ranges, validate_unknown_keys,
};
use rotor_diag::config::{ConfigError, DiagnosticConfig};

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}

// ============================================================================
// Typo Detection
// ============================================================================

#[test]
fn typo_in_threshold_warns_with_suggestion() {
    let toml_str = r#"
[thresholds]
loosenes_min = 4.0
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 1, "Expected exactly 1 warning");
    assert!(warnings[0].field.contains("loosenes_min"));
    assert_eq!(
        warnings[0].suggestion.as_deref(),
        Some("thresholds.looseness_min")
    );
    assert!(warnings[0].to_string().contains("did you mean"));
}

#[test]
fn typo_in_machine_section_warns() {
    let toml_str = r#"
[machine]
naem = "FAN-12"
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].suggestion.as_deref(), Some("machine.name"));
}

#[test]
fn valid_config_produces_zero_warnings() {
    let toml_str = r#"
[machine]
name = "AHU-3 supply fan"
location = "Roof, block B"

[analysis]
window_size = 1024

[scan]
sample_rate_hz = 60.0
target_rpm = 1450.0

[thresholds]
unbalance_1x_min = 6.0
unbalance_harmonic_max = 2.5
misalignment_2x_min = 5.0
looseness_min = 3.0
noise_floor_min = 0.0001
nyquist_guard = 0.8
peak_search_radius = 3

[history]
capacity = 4096
"#;
    assert!(validate_unknown_keys(toml_str).is_empty());
}

#[test]
fn completely_unknown_section_has_no_suggestion() {
    let warnings = validate_unknown_keys("[telemetry_uplink_settings]\nendpoint = \"x\"\n");
    assert_eq!(warnings.len(), 2);
    assert!(warnings.iter().all(|w| w.suggestion.is_none()));
}

#[test]
fn unparseable_toml_yields_no_warnings() {
    assert!(validate_unknown_keys("[thresholds\nbroken").is_empty());
}

#[test]
fn known_keys_cover_every_serialized_field() {
    let text = DiagnosticConfig::default().to_toml().expect("serialize defaults");
    assert!(validate_unknown_keys(&text).is_empty());
    assert!(known_config_keys().contains("thresholds.nyquist_guard"));
}

#[test]
fn suggestion_requires_close_match() {
    let known = known_config_keys();
    assert_eq!(
        suggest_correction("history.capacty", &known).as_deref(),
        Some("history.capacity")
    );
    assert_eq!(suggest_correction("zzzzzzzzzz", &known), None);
}

// ============================================================================
// Range Validation
// ============================================================================

#[test]
fn default_config_has_no_range_findings() {
    let (errors, warnings) = validate_physical_ranges(&DiagnosticConfig::default());
    assert!(errors.is_empty());
    assert!(warnings.is_empty());
}

#[test]
fn oversized_search_radius_is_an_error() {
    let mut config = DiagnosticConfig::default();
    config.analysis.window_size = 64;
    config.thresholds.peak_search_radius = 9;
    let (errors, _) = validate_physical_ranges(&config);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("peak_search_radius"));
}

#[test]
fn unusual_sample_rate_warns() {
    let mut config = DiagnosticConfig::default();
    config.scan.sample_rate_hz = 0.5;
    let (errors, warnings) = validate_physical_ranges(&config);
    assert!(errors.is_empty());
    assert!(warnings.iter().any(|w| w.field == "scan.sample_rate_hz"));
}

#[test]
fn inverted_unbalance_thresholds_warn() {
    let mut config = DiagnosticConfig::default();
    config.thresholds.unbalance_harmonic_max = 6.0;
    let (_, warnings) = validate_physical_ranges(&config);
    assert!(warnings
        .iter()
        .any(|w| w.field == "thresholds.unbalance_harmonic_max"));
}

#[test]
fn nyquist_guard_close_to_one_warns() {
    let mut config = DiagnosticConfig::default();
    config.thresholds.nyquist_guard = 0.99;
    let (errors, warnings) = validate_physical_ranges(&config);
    assert!(errors.is_empty());
    assert!(warnings.iter().any(|w| w.field == "thresholds.nyquist_guard"));
}

// ============================================================================
// Loading From Disk
// ============================================================================

#[test]
fn load_from_file_reads_partial_config() {
    let file = write_config(
        r#"
[machine]
name = "PUMP-4"

[scan]
target_rpm = 1780.0
"#,
    );
    let config = DiagnosticConfig::load_from_file(file.path()).expect("valid config");
    assert_eq!(config.machine.name, "PUMP-4");
    assert_eq!(config.scan.target_rpm, 1780.0);
    assert_eq!(config.analysis.window_size, 512);
}

#[test]
fn load_from_file_tolerates_unknown_keys() {
    let file = write_config("[machine]\nnaem = \"typo\"\n");
    let config = DiagnosticConfig::load_from_file(file.path()).expect("typos only warn");
    assert_eq!(config.machine.name, "DEFAULT");
}

#[test]
fn load_from_file_rejects_invalid_values() {
    let file = write_config("[analysis]\nwindow_size = 300\n");
    match DiagnosticConfig::load_from_file(file.path()) {
        Err(ConfigError::Validation(errors)) => {
            assert!(errors.iter().any(|e| e.contains("analysis.window_size")));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn load_from_file_reports_parse_errors() {
    let file = write_config("[thresholds]\nlooseness_min = \"high\"\n");
    assert!(matches!(
        DiagnosticConfig::load_from_file(file.path()),
        Err(ConfigError::Parse(..))
    ));
}

#[test]
fn load_from_missing_file_is_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("absent.toml");
    assert!(matches!(
        DiagnosticConfig::load_from_file(&missing),
        Err(ConfigError::Io(..))
    ));
}

#[test]
fn save_then_load_preserves_thresholds() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("rotor_diag.toml");

    let mut config = DiagnosticConfig::default();
    config.machine.name = "COMPRESSOR-2".to_string();
    config.thresholds.looseness_min = 3.5;
    config.save_to_file(&path).expect("save");

    let loaded = DiagnosticConfig::load_from_file(&path).expect("reload");
    assert_eq!(loaded.machine.name, "COMPRESSOR-2");
    assert_eq!(loaded.thresholds, config.thresholds);
}
