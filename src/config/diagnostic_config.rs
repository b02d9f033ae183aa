//! Diagnostic Configuration - analysis policy as operator-tunable TOML values
//!
//! Each struct implements `Default` with values from [`super::defaults`],
//! so running without a config file gives the reference behavior.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::defaults;
use crate::analysis::AnalyzerSettings;
use crate::processing::MIN_WINDOW_SIZE;
use crate::types::AnalysisConfig;

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "ROTOR_DIAG_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "rotor_diag.toml";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for a monitored machine.
///
/// Load with `DiagnosticConfig::load()` which searches:
/// 1. `$ROTOR_DIAG_CONFIG`
/// 2. `./rotor_diag.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiagnosticConfig {
    /// Machine identification
    #[serde(default)]
    pub machine: MachineInfo,

    /// Analysis window sizing
    #[serde(default)]
    pub analysis: AnalysisWindowConfig,

    /// Default scan parameters (CLI flags override)
    #[serde(default)]
    pub scan: AnalysisConfig,

    /// Fault classification thresholds
    #[serde(default)]
    pub thresholds: HarmonicThresholds,

    /// Sample history sizing
    #[serde(default)]
    pub history: HistoryConfig,
}

impl DiagnosticConfig {
    /// Load configuration using the standard search order:
    /// 1. `$ROTOR_DIAG_CONFIG` environment variable
    /// 2. `./rotor_diag.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        // 1. Check env var
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), machine = %config.machine.name, "Loaded config from {CONFIG_ENV_VAR}");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from {CONFIG_ENV_VAR}, falling back");
                    }
                }
            } else {
                warn!(path = %path, "{CONFIG_ENV_VAR} points to non-existent file, falling back");
            }
        }

        // 2. Check ./rotor_diag.toml
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!(machine = %config.machine.name, "Loaded config from ./{LOCAL_CONFIG_FILE}");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{LOCAL_CONFIG_FILE}, using defaults");
                }
            }
        }

        // 3. Defaults
        info!("No {LOCAL_CONFIG_FILE} found, using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;

        // Two-pass: check for unknown keys first (warnings only)
        for w in super::validation::validate_unknown_keys(&contents) {
            warn!("{}", w);
        }

        let config: Self = toml::from_str(&contents)
            .map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Write the config to a file.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml()?;
        std::fs::write(path, contents).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        info!(path = %path.display(), "Config saved");
        Ok(())
    }

    /// Analyzer settings derived from this config.
    pub fn analyzer_settings(&self) -> AnalyzerSettings {
        AnalyzerSettings {
            window_size: self.analysis.window_size,
            thresholds: self.thresholds.clone(),
        }
    }

    /// Validate all values for internal consistency.
    ///
    /// Rules:
    /// - The window size must be a power of two no smaller than 8
    /// - Every threshold must be finite and positive
    /// - The Nyquist guard must lie in (0, 1]
    /// - The history must hold at least one full window
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        let window = self.analysis.window_size;
        if window < MIN_WINDOW_SIZE || !window.is_power_of_two() {
            errors.push(format!(
                "analysis.window_size = {window} must be a power of two >= {MIN_WINDOW_SIZE}"
            ));
        }

        let t = &self.thresholds;
        for (name, value) in [
            ("unbalance_1x_min", t.unbalance_1x_min),
            ("unbalance_harmonic_max", t.unbalance_harmonic_max),
            ("misalignment_2x_min", t.misalignment_2x_min),
            ("looseness_min", t.looseness_min),
            ("noise_floor_min", t.noise_floor_min),
        ] {
            Self::check_positive(value, &format!("thresholds.{name}"), &mut errors);
        }

        if !t.nyquist_guard.is_finite() || t.nyquist_guard <= 0.0 || t.nyquist_guard > 1.0 {
            errors.push(format!(
                "thresholds.nyquist_guard = {} must be in (0, 1]",
                t.nyquist_guard
            ));
        }

        if self.history.capacity < window {
            errors.push(format!(
                "history.capacity ({}) must be >= analysis.window_size ({window})",
                self.history.capacity
            ));
        }

        Self::check_positive(self.scan.sample_rate_hz, "scan.sample_rate_hz", &mut errors);
        if !self.scan.target_rpm.is_finite() {
            errors.push(format!(
                "scan.target_rpm must be finite (got {})",
                self.scan.target_rpm
            ));
        }

        // Physical range validation
        let (range_errors, range_warnings) = super::validation::validate_physical_ranges(self);
        errors.extend(range_errors);
        for w in &range_warnings {
            warn!("{}", w);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    fn check_positive(value: f64, name: &str, errors: &mut Vec<String>) {
        // NaN comparisons silently pass, so check finiteness first
        if !value.is_finite() {
            errors.push(format!("{name} must be finite (got {value})"));
        } else if value <= 0.0 {
            errors.push(format!("{name} must be > 0 (got {value})"));
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Serialize(toml::ser::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Config I/O error ({}): {}", path.display(), e),
            ConfigError::Parse(path, e) => {
                write!(f, "Config parse error ({}): {}", path.display(), e)
            }
            ConfigError::Serialize(e) => write!(f, "Config serialization error: {}", e),
            ConfigError::Validation(errors) => {
                writeln!(f, "Config validation failed:")?;
                for e in errors {
                    writeln!(f, "  - {}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Machine Info
// ============================================================================

/// Identification metadata; not used for logic, but appears in logs and reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineInfo {
    /// Asset tag / identifier
    #[serde(default = "default_machine_name")]
    pub name: String,

    /// Plant area or site
    #[serde(default)]
    pub location: String,
}

fn default_machine_name() -> String {
    "DEFAULT".to_string()
}

impl Default for MachineInfo {
    fn default() -> Self {
        Self {
            name: default_machine_name(),
            location: String::new(),
        }
    }
}

// ============================================================================
// Analysis Window
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisWindowConfig {
    /// FFT length; only the trailing `window_size` samples are analyzed
    #[serde(default = "default_window_size")]
    pub window_size: usize,
}

fn default_window_size() -> usize {
    defaults::FFT_SIZE
}

impl Default for AnalysisWindowConfig {
    fn default() -> Self {
        Self {
            window_size: default_window_size(),
        }
    }
}

// ============================================================================
// Harmonic Thresholds
// ============================================================================

/// Tunable policy for the harmonic classifier and Nyquist guard.
///
/// Ratios are harmonic amplitude divided by the estimated noise floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarmonicThresholds {
    /// Unbalance requires r_1x above this
    #[serde(default = "default_unbalance_1x_min")]
    pub unbalance_1x_min: f64,

    /// Unbalance requires r_2x and r_3x below this
    #[serde(default = "default_unbalance_harmonic_max")]
    pub unbalance_harmonic_max: f64,

    /// Misalignment requires r_2x above this (and above r_1x)
    #[serde(default = "default_misalignment_2x_min")]
    pub misalignment_2x_min: f64,

    /// Looseness requires all three ratios above this
    #[serde(default = "default_looseness_min")]
    pub looseness_min: f64,

    /// Lower bound on the noise floor estimate
    #[serde(default = "default_noise_floor_min")]
    pub noise_floor_min: f64,

    /// Shaft frequency must be below this fraction of Nyquist
    #[serde(default = "default_nyquist_guard")]
    pub nyquist_guard: f64,

    /// Harmonic peak search half-width (bins)
    #[serde(default = "default_peak_search_radius")]
    pub peak_search_radius: usize,
}

fn default_unbalance_1x_min() -> f64 { defaults::UNBALANCE_1X_MIN }
fn default_unbalance_harmonic_max() -> f64 { defaults::UNBALANCE_HARMONIC_MAX }
fn default_misalignment_2x_min() -> f64 { defaults::MISALIGNMENT_2X_MIN }
fn default_looseness_min() -> f64 { defaults::LOOSENESS_MIN }
fn default_noise_floor_min() -> f64 { defaults::NOISE_FLOOR_MIN }
fn default_nyquist_guard() -> f64 { defaults::NYQUIST_GUARD }
fn default_peak_search_radius() -> usize { defaults::PEAK_SEARCH_RADIUS }

impl Default for HarmonicThresholds {
    fn default() -> Self {
        Self {
            unbalance_1x_min: default_unbalance_1x_min(),
            unbalance_harmonic_max: default_unbalance_harmonic_max(),
            misalignment_2x_min: default_misalignment_2x_min(),
            looseness_min: default_looseness_min(),
            noise_floor_min: default_noise_floor_min(),
            nyquist_guard: default_nyquist_guard(),
            peak_search_radius: default_peak_search_radius(),
        }
    }
}

// ============================================================================
// History
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Maximum retained samples; oldest are trimmed first
    #[serde(default = "default_history_capacity")]
    pub capacity: usize,
}

fn default_history_capacity() -> usize {
    defaults::HISTORY_CAPACITY
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: default_history_capacity(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
