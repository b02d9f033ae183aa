//! Scan parameters and the analysis result record

use serde::{Deserialize, Serialize};

use super::FaultKind;

// ============================================================================
// Scan Parameters
// ============================================================================

/// Per-call scan parameters.
///
/// `target_rpm <= 0` requests a blind scan for the strongest peak;
/// `target_rpm > 0` requests harmonic analysis against that shaft speed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Rate at which motion-intensity samples were captured (Hz, e.g. camera FPS)
    #[serde(default = "default_sample_rate")]
    pub sample_rate_hz: f64,

    /// Expected shaft speed (RPM); zero or negative selects blind mode
    #[serde(default)]
    pub target_rpm: f64,
}

fn default_sample_rate() -> f64 {
    crate::config::defaults::DEFAULT_SAMPLE_RATE_HZ
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: default_sample_rate(),
            target_rpm: 0.0,
        }
    }
}

impl AnalysisConfig {
    pub fn new(sample_rate_hz: f64, target_rpm: f64) -> Self {
        Self {
            sample_rate_hz,
            target_rpm,
        }
    }

    /// Resolve the analysis mode from the target speed.
    pub fn mode(&self) -> AnalysisMode {
        if self.target_rpm > 0.0 {
            AnalysisMode::Harmonic {
                shaft_hz: self.target_rpm / 60.0,
            }
        } else {
            AnalysisMode::Blind
        }
    }

    /// Nyquist frequency for this sample rate (Hz).
    pub fn nyquist_hz(&self) -> f64 {
        self.sample_rate_hz / 2.0
    }
}

/// Which analysis the orchestrator runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnalysisMode {
    /// Report the strongest spectral peak, no fault classification
    Blind,
    /// Classify against harmonics of the shaft frequency (Hz)
    Harmonic { shaft_hz: f64 },
}

// ============================================================================
// Result Record
// ============================================================================

/// Structured diagnosis produced by every analysis call.
///
/// `spectrum` always holds `N/2` normalized magnitudes in bin order, zero
/// filled when no spectrum could be computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub fault: FaultKind,
    /// Refined frequency of the reported peak (Hz)
    pub dominant_frequency_hz: f64,
    /// Normalized magnitude of the reported peak
    pub peak_amplitude: f64,
    /// Confidence in a detected fault, in [0, 1); 0 when no fault is claimed
    pub confidence: f64,
    pub message: String,
    pub spectrum: Vec<f64>,
}

impl AnalysisResult {
    /// Result with no spectral claims and a zero-filled spectrum.
    pub fn empty(window_size: usize, fault: FaultKind, message: impl Into<String>) -> Self {
        Self {
            fault,
            dominant_frequency_hz: 0.0,
            peak_amplitude: 0.0,
            confidence: 0.0,
            message: message.into(),
            spectrum: vec![0.0; window_size / 2],
        }
    }

    /// Flatten for transports that only carry `f64` arrays.
    ///
    /// Layout: dominant frequency, peak amplitude, confidence, fault code,
    /// spectrum length, then the spectrum values in bin order.
    pub fn to_flat(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(5 + self.spectrum.len());
        out.push(self.dominant_frequency_hz);
        out.push(self.peak_amplitude);
        out.push(self.confidence);
        out.push(f64::from(self.fault.code()));
        out.push(self.spectrum.len() as f64);
        out.extend_from_slice(&self.spectrum);
        out
    }

    /// Human-readable multi-line summary.
    pub fn format_report(&self) -> String {
        let mut output = String::new();
        output.push_str("Vibration Diagnosis\n");
        output.push_str("===================\n");
        output.push_str(&format!("Verdict: {}\n", self.fault));
        output.push_str(&format!("Message: {}\n", self.message));
        output.push_str(&format!(
            "Dominant Frequency: {:.3} Hz ({:.1} RPM)\n",
            self.dominant_frequency_hz,
            self.dominant_frequency_hz * 60.0
        ));
        output.push_str(&format!("Peak Amplitude: {:.5}\n", self.peak_amplitude));
        output.push_str(&format!("Confidence: {:.2}\n", self.confidence));
        output.push_str(&format!("Spectrum Bins: {}\n", self.spectrum.len()));
        output
    }
}
