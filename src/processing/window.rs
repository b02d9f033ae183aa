//! Spectral preprocessing: window extraction, DC removal, Hann shading and
//! magnitude normalization.

use num_complex::Complex64;
use std::f64::consts::PI;

use super::ProcessingError;

/// Symmetric Hann window coefficient for sample `i` of an `n`-point window.
///
/// `w[i] = 0.5 * (1 - cos(2π·i/(n-1)))`, zero at both ends.
pub fn hann_coefficient(i: usize, n: usize) -> f64 {
    if n <= 1 {
        return 1.0;
    }
    0.5 * (1.0 - (2.0 * PI * i as f64 / (n - 1) as f64).cos())
}

/// Build the complex FFT input from the trailing `window_size` samples.
///
/// Older history is discarded, the window mean is subtracted (motion
/// intensity is non-negative, so its mean would otherwise dominate bin 0)
/// and a Hann window is applied. `samples` is only read.
pub fn prepare(samples: &[f64], window_size: usize) -> Result<Vec<Complex64>, ProcessingError> {
    if samples.len() < window_size {
        return Err(ProcessingError::InsufficientData {
            needed: window_size,
            available: samples.len(),
        });
    }

    let window = &samples[samples.len() - window_size..];
    let mean = window.iter().sum::<f64>() / window_size as f64;

    tracing::trace!(window_size, mean, "Removing DC bias");

    Ok(window
        .iter()
        .enumerate()
        .map(|(i, &x)| Complex64::new((x - mean) * hann_coefficient(i, window_size), 0.0))
        .collect())
}

/// Convert FFT output into the one-sided normalized magnitude spectrum.
///
/// Keeps bins `[0, N/2)` and scales each by `1 / (N/2)`. The input is
/// real-valued so the upper half mirrors the lower half.
pub fn magnitude_spectrum(fft_output: &[Complex64]) -> Vec<f64> {
    let half = fft_output.len() / 2;
    let scale = half as f64;

    fft_output
        .iter()
        .take(half)
        .map(|c| c.norm() / scale)
        .collect()
}
