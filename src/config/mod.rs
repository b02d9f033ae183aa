//! Diagnostic Configuration Module
//!
//! Provides the analysis window, harmonic thresholds and history sizing
//! loaded from TOML, replacing hardcoded policy constants with
//! operator-tunable values.
//!
//! ## Loading Order
//!
//! 1. `ROTOR_DIAG_CONFIG` environment variable (path to TOML file)
//! 2. `rotor_diag.toml` in the current working directory
//! 3. Built-in defaults (see [`defaults`])
//!
//! ## Usage
//!
//! ```ignore
//! let config = DiagnosticConfig::load();
//! let analyzer = Analyzer::new(config.analyzer_settings())?;
//! ```
//!
//! The configuration is passed explicitly; there is no global instance, so
//! every analysis stays a pure function of its inputs.

mod diagnostic_config;
pub mod defaults;
pub mod validation;

pub use diagnostic_config::*;
