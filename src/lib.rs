//! ROTOR-DIAG: Rotating Machinery Fault Diagnosis
//!
//! Diagnoses unbalance, misalignment and looseness from a time series of
//! motion-intensity samples by comparing shaft harmonics in the frequency
//! domain.
//!
//! ## Architecture
//!
//! - **Processing**: DC removal, Hann window, radix-2 FFT, peak location
//!   with parabolic sub-bin refinement
//! - **Diagnosis**: noise-floor-normalized harmonic ratios and ordered
//!   fault rules
//! - **Analysis**: the [`Analyzer`] orchestrating blind and harmonic scans
//! - **Config**: TOML-tunable window size and thresholds
//!
//! ## Example
//!
//! ```
//! use rotor_diag::{analyze, AnalysisConfig, FaultKind};
//!
//! let samples: Vec<f64> = (0..512)
//!     .map(|i| (2.0 * std::f64::consts::PI * 5.0 * i as f64 / 30.0).sin())
//!     .collect();
//!
//! let result = analyze(&samples, &AnalysisConfig::new(30.0, 300.0));
//! assert_eq!(result.fault, FaultKind::Unbalance);
//! ```

pub mod acquisition;
pub mod analysis;
pub mod config;
pub mod diagnosis;
pub mod processing;
pub mod sample_history;
pub mod types;

// Re-export configuration
pub use config::{DiagnosticConfig, HarmonicThresholds};

// Re-export commonly used types
pub use types::{AnalysisConfig, AnalysisMode, AnalysisResult, FaultKind};

// Re-export the analyzer
pub use analysis::{analyze, Analyzer, AnalyzerSettings};

pub use processing::ProcessingError;
pub use sample_history::SampleHistory;
