//! Signal processing module - FFT, windowing and peak location for vibration analysis

mod fft;
mod peaks;
mod window;

pub use fft::FftEngine;
pub use peaks::{find_global_peak, find_peak_near, interpolate_peak};
pub use window::{hann_coefficient, magnitude_spectrum, prepare};

use thiserror::Error;

/// Errors in signal processing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessingError {
    #[error("Insufficient data: need {needed}, have {available}")]
    InsufficientData { needed: usize, available: usize },

    #[error("Invalid window size: {0}")]
    InvalidWindowSize(usize),
}

/// Smallest analysis window the pipeline accepts.
///
/// The fault classifier divides by `N/2 - 3`, and the peak locator needs
/// interior bins on both sides of each harmonic.
pub const MIN_WINDOW_SIZE: usize = 8;

/// Check that `size` satisfies the FFT precondition.
pub fn validate_window_size(size: usize) -> Result<(), ProcessingError> {
    if size < MIN_WINDOW_SIZE || !size.is_power_of_two() {
        return Err(ProcessingError::InvalidWindowSize(size));
    }
    Ok(())
}
