//! Radix-2 FFT engine
//!
//! Iterative in-place Cooley-Tukey decimation-in-time transform with
//! pre-computed twiddle factors. The engine is planned once for a fixed
//! power-of-two length and reused for every analysis of that size, so the
//! stack depth stays constant and no allocation happens per transform.
//!
//! Forward convention: twiddle(k, n) = exp(-2πi·k/n), unnormalized output.
//!
//! # Example
//!
//! ```
//! use num_complex::Complex64;
//! use rotor_diag::processing::FftEngine;
//!
//! let engine = FftEngine::new(8)?;
//! let mut buffer = vec![Complex64::new(0.0, 0.0); 8];
//! buffer[0] = Complex64::new(1.0, 0.0);
//! engine.process(&mut buffer);
//! assert!(buffer.iter().all(|c| (c.norm() - 1.0).abs() < 1e-12));
//! # Ok::<(), rotor_diag::processing::ProcessingError>(())
//! ```

use num_complex::Complex64;
use std::f64::consts::PI;

use super::ProcessingError;

/// Pre-planned forward FFT for a single power-of-two length.
#[derive(Debug, Clone)]
pub struct FftEngine {
    size: usize,
    /// exp(-2πi·k/size) for k in [0, size/2)
    twiddles: Vec<Complex64>,
}

impl FftEngine {
    /// Plan a transform of `size` points.
    ///
    /// `size` must be a non-zero power of two.
    pub fn new(size: usize) -> Result<Self, ProcessingError> {
        if !size.is_power_of_two() {
            return Err(ProcessingError::InvalidWindowSize(size));
        }
        Ok(Self::plan(size))
    }

    /// Plan without validation. `size` must already be a power of two.
    pub(crate) fn plan(size: usize) -> Self {
        let twiddles = (0..size / 2)
            .map(|k| Complex64::from_polar(1.0, -2.0 * PI * k as f64 / size as f64))
            .collect();

        Self { size, twiddles }
    }

    /// Transform length this engine was planned for.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Compute the forward FFT of `buffer` in place.
    ///
    /// Precondition: `buffer.len() == self.size()`. The length is only
    /// checked in debug builds; the analyzer always passes its own window.
    pub fn process(&self, buffer: &mut [Complex64]) {
        debug_assert_eq!(
            buffer.len(),
            self.size,
            "FFT buffer length must match the planned size"
        );

        let n = buffer.len();
        if n <= 1 {
            return;
        }

        bit_reverse_permute(buffer);

        let mut len = 2;
        while len <= n {
            let half = len / 2;
            let stride = n / len;
            for start in (0..n).step_by(len) {
                for k in 0..half {
                    let t = self.twiddles[k * stride] * buffer[start + k + half];
                    let e = buffer[start + k];
                    buffer[start + k] = e + t;
                    buffer[start + k + half] = e - t;
                }
            }
            len <<= 1;
        }
    }

    /// Compute the forward FFT into a new vector, leaving `input` untouched.
    pub fn transform(&self, input: &[Complex64]) -> Vec<Complex64> {
        let mut output = input.to_vec();
        self.process(&mut output);
        output
    }
}

/// Reorder `buffer` so index `i` holds the element at bit-reversed `i`.
fn bit_reverse_permute(buffer: &mut [Complex64]) {
    let n = buffer.len();
    let bits = n.trailing_zeros();
    for i in 0..n {
        let j = i.reverse_bits() >> (usize::BITS - bits);
        if j > i {
            buffer.swap(i, j);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use rustfft::FftPlanner;

    fn naive_dft(input: &[Complex64]) -> Vec<Complex64> {
        let n = input.len();
        (0..n)
            .map(|k| {
                input
                    .iter()
                    .enumerate()
                    .map(|(t, &x)| {
                        x * Complex64::from_polar(1.0, -2.0 * PI * (k * t) as f64 / n as f64)
                    })
                    .sum()
            })
            .collect()
    }

    #[test]
    fn test_rejects_non_power_of_two() {
        assert!(FftEngine::new(12).is_err());
        assert!(FftEngine::new(0).is_err());
        assert_eq!(FftEngine::new(512).unwrap().size(), 512);
    }

    #[test]
    fn test_single_point_is_identity() {
        let engine = FftEngine::new(1).unwrap();
        let mut buffer = vec![Complex64::new(3.5, -1.0)];
        engine.process(&mut buffer);
        assert_eq!(buffer[0], Complex64::new(3.5, -1.0));
    }

    #[test]
    fn test_impulse_gives_flat_magnitude() {
        let engine = FftEngine::new(512).unwrap();
        let mut buffer = vec![Complex64::new(0.0, 0.0); 512];
        buffer[0] = Complex64::new(1.0, 0.0);
        engine.process(&mut buffer);

        for (k, c) in buffer.iter().enumerate() {
            assert!((c.norm() - 1.0).abs() < 1e-12, "bin {k} magnitude {}", c.norm());
        }
    }

    #[test]
    fn test_matches_naive_dft() {
        let mut rng = StdRng::seed_from_u64(7);
        let input: Vec<Complex64> = (0..32)
            .map(|_| Complex64::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
            .collect();

        let engine = FftEngine::new(32).unwrap();
        let fast = engine.transform(&input);
        let slow = naive_dft(&input);

        for (a, b) in fast.iter().zip(slow.iter()) {
            assert!((a - b).norm() < 1e-9);
        }
    }

    #[test]
    fn test_matches_rustfft() {
        let mut rng = StdRng::seed_from_u64(42);
        let input: Vec<Complex64> = (0..512)
            .map(|_| Complex64::new(rng.gen_range(-1.0..1.0), 0.0))
            .collect();

        let engine = FftEngine::new(512).unwrap();
        let ours = engine.transform(&input);

        let mut reference: Vec<rustfft::num_complex::Complex<f64>> = input
            .iter()
            .map(|c| rustfft::num_complex::Complex::new(c.re, c.im))
            .collect();
        FftPlanner::new().plan_fft_forward(512).process(&mut reference);

        for (a, b) in ours.iter().zip(reference.iter()) {
            assert!((a.re - b.re).abs() < 1e-9);
            assert!((a.im - b.im).abs() < 1e-9);
        }
    }

    #[test]
    fn test_transform_leaves_input_untouched() {
        let engine = FftEngine::new(8).unwrap();
        let input: Vec<Complex64> = (0..8).map(|i| Complex64::new(i as f64, 0.0)).collect();
        let copy = input.clone();
        let _ = engine.transform(&input);
        assert_eq!(input, copy);
    }
}
