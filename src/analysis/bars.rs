//! Magnitude-to-bar-length mapping.

/// Map one magnitude to a bar length: `min(max_width, floor(mag * scale))`.
///
/// The clamp is a hard ceiling, not a rescale; loud bins saturate. The
/// float-to-integer cast saturates, so the mapping is total: NaN maps to 0
/// and +inf to `max_width`. Non-positive `scale`/`max_width` are rejected at
/// configuration time and never reach this point.
pub fn bar_length(magnitude: f32, scale: f32, max_width: usize) -> usize {
    (((magnitude * scale).floor()) as usize).min(max_width)
}

/// Map a whole magnitude slice into a reused output slice.
pub fn bar_lengths_into(magnitudes: &[f32], scale: f32, max_width: usize, out: &mut [usize]) {
    assert_eq!(out.len(), magnitudes.len(), "one bar per magnitude");

    for (bar, &mag) in out.iter_mut().zip(magnitudes) {
        *bar = bar_length(mag, scale, max_width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_and_floors() {
        assert_eq!(bar_length(3.2, 10.0, 50), 32);
        assert_eq!(bar_length(0.09, 10.0, 50), 0);
        assert_eq!(bar_length(1.0, 10.0, 50), 10);
    }

    #[test]
    fn clamps_to_max_width() {
        assert_eq!(bar_length(6.0, 10.0, 50), 50);
        assert_eq!(bar_length(5.0, 10.0, 50), 50);
        assert_eq!(bar_length(4.99, 10.0, 50), 49);
    }

    #[test]
    fn degenerate_inputs_stay_total() {
        assert_eq!(bar_length(f32::NAN, 10.0, 50), 0);
        assert_eq!(bar_length(f32::INFINITY, 10.0, 50), 50);
        assert_eq!(bar_length(1e30, 10.0, 50), 50);
        assert_eq!(bar_length(0.0, 10.0, 50), 0);
    }

    #[test]
    fn maps_slices_elementwise() {
        let mags = [0.0, 1.5, 6.0, 0.33];
        let mut bars = [0usize; 4];
        bar_lengths_into(&mags, 10.0, 50, &mut bars);
        assert_eq!(bars, [0, 15, 50, 3]);
    }
}
