//! Harmonic-ratio fault classifier

use serde::{Deserialize, Serialize};

use crate::config::HarmonicThresholds;
use crate::types::FaultKind;

pub const MSG_UNBALANCE: &str = "WARNING: Mass Unbalance Detected (High 1X)";
pub const MSG_MISALIGNMENT: &str = "WARNING: Shaft Misalignment (Dominant 2X)";
pub const MSG_LOOSENESS: &str = "CRITICAL: Mechanical Looseness (Harmonic Forest)";
pub const MSG_HEALTHY: &str = "HEALTHY: Vibration within normal limits.";

/// Peak magnitudes found at the 1×, 2× and 3× shaft harmonics.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HarmonicAmplitudes {
    pub one_x: f64,
    pub two_x: f64,
    pub three_x: f64,
}

impl HarmonicAmplitudes {
    pub fn sum(&self) -> f64 {
        self.one_x + self.two_x + self.three_x
    }
}

/// Harmonic amplitudes expressed as multiples of the noise floor.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HarmonicRatios {
    pub one_x: f64,
    pub two_x: f64,
    pub three_x: f64,
}

impl HarmonicRatios {
    pub fn from_amplitudes(amplitudes: &HarmonicAmplitudes, noise_floor: f64) -> Self {
        Self {
            one_x: amplitudes.one_x / noise_floor,
            two_x: amplitudes.two_x / noise_floor,
            three_x: amplitudes.three_x / noise_floor,
        }
    }
}

/// Classifier verdict.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnosis {
    pub fault: FaultKind,
    pub message: &'static str,
    /// `m / (1 + m)` where `m` is the smallest relative margin by which the
    /// firing rule's conditions held; 0 for a healthy verdict
    pub confidence: f64,
    pub ratios: HarmonicRatios,
}

/// Average spectrum magnitude excluding the three harmonic peaks.
///
/// `(Σ spectrum - amp_1x - amp_2x - amp_3x) / (bins - 3)`, floored at
/// `floor_min` so ratios stay bounded on near-silent input.
pub fn estimate_noise_floor(
    spectrum: &[f64],
    amplitudes: &HarmonicAmplitudes,
    floor_min: f64,
) -> f64 {
    let total: f64 = spectrum.iter().sum();
    let other_bins = spectrum.len().saturating_sub(3).max(1) as f64;
    let floor = (total - amplitudes.sum()) / other_bins;
    floor.max(floor_min)
}

/// Map harmonic amplitudes to a fault verdict.
pub fn classify(
    amplitudes: &HarmonicAmplitudes,
    noise_floor: f64,
    thresholds: &HarmonicThresholds,
) -> Diagnosis {
    let r = HarmonicRatios::from_amplitudes(amplitudes, noise_floor);
    let t = thresholds;

    let (fault, message, margin) = if r.one_x > t.unbalance_1x_min
        && r.two_x < t.unbalance_harmonic_max
        && r.three_x < t.unbalance_harmonic_max
    {
        let m = min_margin(&[
            margin_above(r.one_x, t.unbalance_1x_min),
            margin_below(r.two_x, t.unbalance_harmonic_max),
            margin_below(r.three_x, t.unbalance_harmonic_max),
        ]);
        (FaultKind::Unbalance, MSG_UNBALANCE, m)
    } else if r.two_x > r.one_x && r.two_x > t.misalignment_2x_min {
        let dominance = if r.one_x > 0.0 {
            (r.two_x - r.one_x) / r.one_x
        } else {
            f64::INFINITY
        };
        let m = min_margin(&[dominance, margin_above(r.two_x, t.misalignment_2x_min)]);
        (FaultKind::Misalignment, MSG_MISALIGNMENT, m)
    } else if r.one_x > t.looseness_min && r.two_x > t.looseness_min && r.three_x > t.looseness_min
    {
        let m = min_margin(&[
            margin_above(r.one_x, t.looseness_min),
            margin_above(r.two_x, t.looseness_min),
            margin_above(r.three_x, t.looseness_min),
        ]);
        (FaultKind::Looseness, MSG_LOOSENESS, m)
    } else {
        (FaultKind::None, MSG_HEALTHY, 0.0)
    };

    let confidence = confidence_from_margin(margin);

    tracing::debug!(
        r_1x = r.one_x,
        r_2x = r.two_x,
        r_3x = r.three_x,
        noise_floor,
        fault = %fault,
        confidence,
        "Harmonic classification"
    );

    Diagnosis {
        fault,
        message,
        confidence,
        ratios: r,
    }
}

fn margin_above(value: f64, threshold: f64) -> f64 {
    (value - threshold) / threshold
}

fn margin_below(value: f64, threshold: f64) -> f64 {
    (threshold - value) / threshold
}

fn min_margin(margins: &[f64]) -> f64 {
    margins.iter().copied().fold(f64::INFINITY, f64::min)
}

fn confidence_from_margin(margin: f64) -> f64 {
    if margin <= 0.0 {
        0.0
    } else if margin.is_finite() {
        margin / (1.0 + margin)
    } else {
        1.0
    }
}

// ============================================================================
// Tests
// ============================================================================
