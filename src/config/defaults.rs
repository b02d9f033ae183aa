//! System-wide default constants.
//!
//! Every tunable value of the analysis pipeline starts here. The config
//! structs use these as their serde defaults, so a missing config file
//! reproduces the reference behavior exactly.

// ============================================================================
// Analysis Window
// ============================================================================

/// FFT length and analysis window size (samples). Must be a power of two.
pub const FFT_SIZE: usize = 512;

/// Capture rate assumed when neither the CLI nor the config names one (Hz).
///
/// 30 frames per second is the common camera rate for motion capture.
pub const DEFAULT_SAMPLE_RATE_HZ: f64 = 30.0;

// ============================================================================
// Sample History
// ============================================================================

/// Sample history capacity (samples). Twice the window keeps one full
/// window of headroom while capture continues.
pub const HISTORY_CAPACITY: usize = 1_024;

// ============================================================================
// Harmonic Classification
// ============================================================================

/// 1× ratio above which unbalance is considered (× noise floor).
pub const UNBALANCE_1X_MIN: f64 = 5.0;

/// 2× and 3× ratios must stay below this for an unbalance verdict.
pub const UNBALANCE_HARMONIC_MAX: f64 = 3.0;

/// 2× ratio above which misalignment is considered (× noise floor).
pub const MISALIGNMENT_2X_MIN: f64 = 5.0;

/// All three harmonic ratios above this indicate looseness.
pub const LOOSENESS_MIN: f64 = 3.0;

/// Lower bound on the estimated noise floor (normalized magnitude).
pub const NOISE_FLOOR_MIN: f64 = 1e-4;

/// Shaft frequency must stay below this fraction of Nyquist.
pub const NYQUIST_GUARD: f64 = 0.85;

/// Half-width of the harmonic peak search (bins).
pub const PEAK_SEARCH_RADIUS: usize = 2;
