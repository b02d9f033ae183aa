//! Analyzer - vibration spectrum analysis and harmonic fault diagnosis

use tracing::debug;

use crate::config::{defaults, HarmonicThresholds};
use crate::diagnosis::{classify, estimate_noise_floor, HarmonicAmplitudes};
use crate::processing::{
    find_global_peak, find_peak_near, interpolate_peak, magnitude_spectrum, prepare,
    validate_window_size, FftEngine, ProcessingError,
};
use crate::sample_history::SampleHistory;
use crate::types::{AnalysisConfig, AnalysisMode, AnalysisResult, FaultKind};

pub const MSG_BLIND_SCAN: &str = "Self-Test / Blind Scan Complete";
pub const MSG_NYQUIST_LIMIT: &str = "RPM exceeds Nyquist safety limit. Increase FPS.";

/// Fixed parameters of an [`Analyzer`].
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerSettings {
    /// FFT length; must be a power of two >= 8
    pub window_size: usize,
    pub thresholds: HarmonicThresholds,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            window_size: defaults::FFT_SIZE,
            thresholds: HarmonicThresholds::default(),
        }
    }
}

/// Rotating-machinery spectrum analyzer.
///
/// Holds only immutable state (settings and a pre-planned FFT), so one
/// analyzer can serve concurrent callers. Each call reads the caller's
/// samples and returns a freshly built result.
#[derive(Debug, Clone)]
pub struct Analyzer {
    settings: AnalyzerSettings,
    fft: FftEngine,
}

impl Default for Analyzer {
    fn default() -> Self {
        let settings = AnalyzerSettings::default();
        let fft = FftEngine::plan(settings.window_size);
        Self { settings, fft }
    }
}

impl Analyzer {
    /// Create an analyzer, rejecting window sizes the FFT cannot handle.
    pub fn new(settings: AnalyzerSettings) -> Result<Self, ProcessingError> {
        validate_window_size(settings.window_size)?;
        let fft = FftEngine::new(settings.window_size)?;
        Ok(Self { settings, fft })
    }

    pub fn settings(&self) -> &AnalyzerSettings {
        &self.settings
    }

    pub fn window_size(&self) -> usize {
        self.settings.window_size
    }

    /// Analyze the trailing window of `samples`.
    pub fn analyze(&self, samples: &[f64], config: &AnalysisConfig) -> AnalysisResult {
        let n = self.window_size();

        let mut buffer = match prepare(samples, n) {
            Ok(buffer) => buffer,
            Err(e) => {
                debug!(error = %e, "Analysis skipped");
                return AnalysisResult::empty(
                    n,
                    FaultKind::InsufficientData,
                    format!("Need at least {n} frames."),
                );
            }
        };

        self.fft.process(&mut buffer);
        let spectrum = magnitude_spectrum(&buffer);
        let resolution = config.sample_rate_hz / n as f64;

        debug!(
            samples = samples.len(),
            window = n,
            sample_rate_hz = config.sample_rate_hz,
            resolution_hz = resolution,
            "Spectrum computed"
        );

        match config.mode() {
            AnalysisMode::Blind => Self::blind_scan(spectrum, resolution),
            AnalysisMode::Harmonic { shaft_hz } => {
                self.harmonic_scan(spectrum, shaft_hz, config.nyquist_hz(), resolution)
            }
        }
    }

    /// Analyze the most recent window of a sample history.
    pub fn analyze_history(&self, history: &SampleHistory, config: &AnalysisConfig) -> AnalysisResult {
        self.analyze(&history.latest(self.window_size()), config)
    }

    /// Report the strongest peak anywhere above DC.
    fn blind_scan(spectrum: Vec<f64>, resolution: f64) -> AnalysisResult {
        let (peak_bin, amplitude) = find_global_peak(&spectrum);
        let exact_bin = interpolate_peak(&spectrum, peak_bin);

        debug!(peak_bin, exact_bin, amplitude, "Blind scan peak");

        AnalysisResult {
            fault: FaultKind::None,
            dominant_frequency_hz: exact_bin * resolution,
            peak_amplitude: amplitude,
            confidence: 0.0,
            message: MSG_BLIND_SCAN.to_string(),
            spectrum,
        }
    }

    /// Classify the spectrum against 1×, 2× and 3× shaft harmonics.
    fn harmonic_scan(
        &self,
        spectrum: Vec<f64>,
        shaft_hz: f64,
        nyquist_hz: f64,
        resolution: f64,
    ) -> AnalysisResult {
        let t = &self.settings.thresholds;

        if shaft_hz >= nyquist_hz * t.nyquist_guard {
            debug!(shaft_hz, nyquist_hz, guard = t.nyquist_guard, "Shaft frequency above Nyquist guard");
            return AnalysisResult {
                fault: FaultKind::Unmeasurable,
                dominant_frequency_hz: 0.0,
                peak_amplitude: 0.0,
                confidence: 0.0,
                message: MSG_NYQUIST_LIMIT.to_string(),
                spectrum,
            };
        }

        let expected_bin = |harmonic: f64| ((shaft_hz * harmonic) / resolution).round() as usize;

        let (bin_1x, amp_1x) = find_peak_near(&spectrum, expected_bin(1.0), t.peak_search_radius);
        let (_, amp_2x) = find_peak_near(&spectrum, expected_bin(2.0), t.peak_search_radius);
        let (_, amp_3x) = find_peak_near(&spectrum, expected_bin(3.0), t.peak_search_radius);

        let amplitudes = HarmonicAmplitudes {
            one_x: amp_1x,
            two_x: amp_2x,
            three_x: amp_3x,
        };
        let noise_floor = estimate_noise_floor(&spectrum, &amplitudes, t.noise_floor_min);
        let diagnosis = classify(&amplitudes, noise_floor, t);

        let exact_bin_1x = interpolate_peak(&spectrum, bin_1x);

        debug!(
            shaft_hz,
            bin_1x,
            exact_bin_1x,
            amp_1x,
            amp_2x,
            amp_3x,
            "Harmonic peaks located"
        );

        AnalysisResult {
            fault: diagnosis.fault,
            dominant_frequency_hz: exact_bin_1x * resolution,
            peak_amplitude: amp_1x,
            confidence: diagnosis.confidence,
            message: diagnosis.message.to_string(),
            spectrum,
        }
    }
}

/// Analyze `samples` with the default window and thresholds.
pub fn analyze(samples: &[f64], config: &AnalysisConfig) -> AnalysisResult {
    Analyzer::default().analyze(samples, config)
}

// ============================================================================
// Tests
// ============================================================================
