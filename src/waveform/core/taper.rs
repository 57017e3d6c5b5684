//! Start-of-signal taper.
//!
//! A waveform that switches on abruptly at `f_lower` leaks power across the
//! whole spectrum once transformed. The taper multiplies the first stretch of
//! the signal, from its first nonzero sample up to its second local extremum
//! (roughly one gravitational-wave cycle), by a Planck window
//!
//! ```text
//! σ(k) = 1 / (exp(z) + 1),   z = n/k + n/(k − n),   0 < k < n
//! ```
//!
//! with `σ(0) = 0`. The window rises smoothly from 0 to 1 over `n` samples and
//! leaves everything from the second extremum onward untouched.
use ndarray::Array1;

/// Fewest samples a taper ramp may span.
pub const MIN_TAPER_SAMPLES: usize = 4;

/// Outcome of [`taper_start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaperOutcome {
    /// Samples `start..start + len` were windowed.
    Applied { start: usize, len: usize },
    /// The signal is identically zero.
    SignalEmpty,
    /// Fewer than two extrema, or a ramp shorter than [`MIN_TAPER_SAMPLES`].
    TooShort,
}

/// Apply the Planck start taper in place.
pub fn taper_start(data: &mut Array1<f64>) -> TaperOutcome {
    let len = data.len();
    let Some(start) = data.iter().position(|&x| x != 0.0) else {
        return TaperOutcome::SignalEmpty;
    };
    let end = data.iter().rposition(|&x| x != 0.0).unwrap_or(start);
    if end <= start + 1 {
        return TaperOutcome::TooShort;
    }

    let mut extrema = 0;
    let mut mid = start;
    let mut i = start + 1;
    while extrema < 2 && i < end && i + 1 < len {
        let (prev, here, next) = (data[i - 1], data[i], data[i + 1]);
        if (here > prev && here > next) || (here < prev && here < next) {
            extrema += 1;
            mid = i;
        }
        i += 1;
    }
    if extrema < 2 {
        return TaperOutcome::TooShort;
    }

    let n = mid - start;
    if n < MIN_TAPER_SAMPLES {
        return TaperOutcome::TooShort;
    }
    let real_n = n as f64;
    data[start] = 0.0;
    for k in 1..n {
        let real_k = k as f64;
        let z = real_n / real_k + real_n / (real_k - real_n);
        data[start + k] *= 1.0 / (z.exp() + 1.0);
    }
    TaperOutcome::Applied { start, len: n }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Window placement (leading zeros skipped, stops at the second extremum).
    // - Monotone ramp of the window factor.
    // - Degenerate inputs.
    // -------------------------------------------------------------------------

    fn sinusoid(n: usize, lead: usize) -> Array1<f64> {
        Array1::from_iter((0..n).map(|i| {
            if i < lead { 0.0 } else { (0.2 * (i - lead) as f64 + 0.3).sin() }
        }))
    }

    #[test]
    // Purpose
    // -------
    // The taper starts at the first nonzero sample, zeroes it, and leaves
    // samples from the second extremum onward untouched.
    //
    // Given
    // -----
    // - 200 samples of sin(0.2 k + 0.3) after 10 leading zeros.
    //
    // Expect
    // ------
    // - `Applied { start: 10, .. }` and sample 10 becomes 0.
    // - Samples at index ≥ start + len are unchanged.
    fn taper_spans_first_cycle_only() {
        // Arrange
        let original = sinusoid(200, 10);
        let mut data = original.clone();

        // Act
        let outcome = taper_start(&mut data);

        // Assert
        let TaperOutcome::Applied { start, len } = outcome else {
            panic!("expected taper to be applied, got {outcome:?}");
        };
        assert_eq!(start, 10);
        assert_eq!(data[start], 0.0);
        for i in (start + len)..data.len() {
            assert_eq!(data[i], original[i]);
        }
        for i in start..(start + len) {
            assert!(data[i].abs() <= original[i].abs());
        }
    }

    #[test]
    // Purpose
    // -------
    // The window factor rises monotonically from 0 to 1.
    //
    // Given
    // -----
    // - The strictly positive signal 2 + sin(0.1 i), so every ratio is
    //   defined.
    //
    // Expect
    // ------
    // - data[i] / original[i] is non-decreasing over the windowed span.
    fn window_is_monotone() {
        // Arrange
        let original = Array1::from_iter((0..120).map(|i| 2.0 + (0.1 * i as f64).sin()));
        let mut data = original.clone();

        // Act
        let outcome = taper_start(&mut data);

        // Assert
        let TaperOutcome::Applied { start, len } = outcome else {
            panic!("expected taper to be applied, got {outcome:?}");
        };
        let ratios: Vec<f64> = (start..start + len).map(|i| data[i] / original[i]).collect();
        for w in ratios.windows(2) {
            assert!(w[1] >= w[0] - 1e-12, "window must not decrease: {w:?}");
        }
        assert_eq!(ratios[0], 0.0);
        assert!(*ratios.last().unwrap() > 0.9);
    }

    #[test]
    // Purpose
    // -------
    // All-zero and featureless inputs are reported, not tapered.
    fn degenerate_inputs_are_left_alone() {
        let mut zeros = Array1::<f64>::zeros(16);
        assert_eq!(taper_start(&mut zeros), TaperOutcome::SignalEmpty);

        let mut ramp = Array1::from_iter((1..=16).map(|i| i as f64));
        let before = ramp.clone();
        assert_eq!(taper_start(&mut ramp), TaperOutcome::TooShort);
        assert_eq!(ramp, before);
    }
}
