//! Magnitude reduction of a transformed spectrum.

/// Write the magnitude of each usable bin into `out`.
///
/// `spectrum` is an interleaved transform output of length `2N`; `out` holds
/// `N/2` slots, one per bin from DC upward. The mirrored upper half and the
/// Nyquist bin carry no extra information for a real signal and are skipped.
/// NaN components propagate into NaN magnitudes.
pub fn magnitudes_into(spectrum: &[f32], out: &mut [f32]) {
    assert_eq!(out.len(), spectrum.len() / 4, "output must hold N/2 bins");

    for (k, mag) in out.iter_mut().enumerate() {
        let re = spectrum[2 * k];
        let im = spectrum[2 * k + 1];
        *mag = (re * re + im * im).sqrt();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduces_lower_half_in_bin_order() {
        // N = 4: bins 0 and 1 survive, bins 2 (Nyquist) and 3 are dropped.
        let spectrum = [3.0, 4.0, 0.0, -2.0, 9.0, 9.0, 9.0, 9.0];
        let mut out = [0.0f32; 2];
        magnitudes_into(&spectrum, &mut out);
        assert_eq!(out, [5.0, 2.0]);
    }

    #[test]
    fn magnitudes_are_non_negative() {
        let spectrum = [-1.0, -1.0, -0.5, 0.5, 7.0, 7.0, 7.0, 7.0];
        let mut out = [0.0f32; 2];
        magnitudes_into(&spectrum, &mut out);
        assert!(out.iter().all(|&m| m >= 0.0));
        assert!((out[0] - 2.0f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn nan_components_flow_through() {
        let spectrum = [f32::NAN, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        let mut out = [0.0f32; 2];
        magnitudes_into(&spectrum, &mut out);
        assert!(out[0].is_nan());
        assert_eq!(out[1], 1.0);
    }
}
