//! Peak location and parabolic sub-bin refinement on magnitude spectra.

/// Find the strongest bin within `radius` bins of `expected_bin`.
///
/// The search is clamped to interior bins `[1, len-2]` so the result can
/// always be refined with [`interpolate_peak`]. When no bin in the window
/// rises above zero (including an empty window) the expected bin is
/// returned with amplitude 0.
pub fn find_peak_near(spectrum: &[f64], expected_bin: usize, radius: usize) -> (usize, f64) {
    let mut peak = (expected_bin, 0.0);
    if spectrum.len() < 3 {
        return peak;
    }

    let start = expected_bin.saturating_sub(radius).max(1);
    let end = expected_bin.saturating_add(radius).min(spectrum.len() - 2);

    for (bin, &amp) in spectrum.iter().enumerate().take(end + 1).skip(start) {
        if amp > peak.1 {
            peak = (bin, amp);
        }
    }

    tracing::trace!(
        expected_bin,
        peak_bin = peak.0,
        amplitude = peak.1,
        "Located harmonic peak"
    );

    peak
}

/// Find the global maximum over `[1, len)`, skipping the DC bin.
///
/// Ties keep the lowest bin. An all-zero spectrum yields `(1, 0.0)`.
pub fn find_global_peak(spectrum: &[f64]) -> (usize, f64) {
    let mut peak = (1, 0.0);
    for (bin, &amp) in spectrum.iter().enumerate().skip(1) {
        if amp > peak.1 {
            peak = (bin, amp);
        }
    }
    peak
}

/// Refine a peak location with a parabola through the bin and its neighbors.
///
/// Returns `peak_bin` unchanged at either spectral edge, when the triple is
/// not a strict local maximum, or when a neighbor is non-positive.
/// Otherwise returns `peak_bin + 0.5*(α-γ)/(α-2β+γ)`.
pub fn interpolate_peak(spectrum: &[f64], peak_bin: usize) -> f64 {
    if peak_bin == 0 || peak_bin + 1 >= spectrum.len() {
        return peak_bin as f64;
    }

    let alpha = spectrum[peak_bin - 1];
    let beta = spectrum[peak_bin];
    let gamma = spectrum[peak_bin + 1];

    if alpha <= 0.0 || gamma <= 0.0 || beta <= alpha || beta <= gamma {
        return peak_bin as f64;
    }

    let delta = 0.5 * (alpha - gamma) / (alpha - 2.0 * beta + gamma);
    peak_bin as f64 + delta
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_peak_near_picks_local_max() {
        let spectrum = [0.0, 0.1, 0.2, 0.9, 0.3, 0.1, 0.05, 0.0];
        assert_eq!(find_peak_near(&spectrum, 4, 2), (3, 0.9));
    }

    #[test]
    fn test_find_peak_near_clamps_to_interior() {
        // Bin 0 and the last bin are never candidates
        let spectrum = [5.0, 0.1, 0.2, 0.1, 0.3, 7.0];
        assert_eq!(find_peak_near(&spectrum, 0, 2), (2, 0.2));
        assert_eq!(find_peak_near(&spectrum, 5, 2), (4, 0.3));
    }

    #[test]
    fn test_find_peak_near_silent_window() {
        let spectrum = [0.0; 16];
        assert_eq!(find_peak_near(&spectrum, 6, 2), (6, 0.0));
    }

    #[test]
    fn test_find_peak_near_beyond_spectrum() {
        let spectrum = [0.5; 16];
        assert_eq!(find_peak_near(&spectrum, 40, 2), (40, 0.0));
    }

    #[test]
    fn test_find_global_peak() {
        let spectrum = [9.0, 0.1, 0.4, 0.2, 0.4];
        assert_eq!(find_global_peak(&spectrum), (2, 0.4));
        assert_eq!(find_global_peak(&[0.0; 8]), (1, 0.0));
    }

    #[test]
    fn test_interpolate_symmetric_peak_is_centered() {
        let spectrum = [0.0, 0.5, 1.0, 0.5, 0.0];
        assert!((interpolate_peak(&spectrum, 2) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_interpolate_shifts_toward_larger_neighbor() {
        let spectrum = [0.0, 0.2, 1.0, 0.6, 0.0];
        let refined = interpolate_peak(&spectrum, 2);
        assert!(refined > 2.0 && refined < 2.5, "refined = {refined}");
    }

    #[test]
    fn test_interpolate_rejects_non_concave_segment() {
        // Increasing then flat: no strict maximum at bin 2
        let spectrum = [0.1, 0.2, 0.3, 0.3, 0.3];
        assert_eq!(interpolate_peak(&spectrum, 2), 2.0);
        assert_eq!(interpolate_peak(&spectrum, 3), 3.0);
    }

    #[test]
    fn test_interpolate_rejects_edges_and_zero_neighbors() {
        let spectrum = [0.4, 0.2, 1.0, 0.0, 0.3];
        assert_eq!(interpolate_peak(&spectrum, 0), 0.0);
        assert_eq!(interpolate_peak(&spectrum, 4), 4.0);
        assert_eq!(interpolate_peak(&spectrum, 2), 2.0);
    }
}
