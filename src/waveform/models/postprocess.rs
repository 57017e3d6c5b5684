//! Frequency-domain conditioning of a time-domain polarization pair.
//!
//! Purpose
//! -------
//! Turn the time-domain output of the model into one-sided spectra on a
//! caller-chosen frequency grid without wraparound or start-up leakage.
//!
//! Key behaviors
//! -------------
//! 1. `target = round(1 / (Δf Δt))` samples; a waveform longer than `target`
//!    fails with `InsufficientFrequencyResolution` (and only then).
//! 2. Both polarizations are zero-padded at the end to `target` samples.
//! 3. The Planck start taper is applied when enabled.
//! 4. Each series is transformed (`Δt`-scaled FFT, `target/2 + 1` bins).
//! 5. Each spectrum is cyclically shifted by `dt = −epoch`, which delays the
//!    samples by the pre-merger duration and moves the epoch back by the
//!    same amount, so absolute feature times are preserved.
//! 6. `template_duration = n Δt` (unpadded length) is attached to the pair.
//!
//! Invariants & assumptions
//! ------------------------
//! - The input pair is a valid [`PolarizationPair`] (equal lengths, spacing,
//!   epoch); the output pair inherits those guarantees.
//! - `delta_f` must be finite and positive, and `1 / (Δf Δt)` may not exceed
//!   [`MAX_TARGET_SAMPLES`].
//!
//! Testing notes
//! -------------
//! - Unit tests cover the resolution boundary (equality passes), output
//!   length and spacing, the attached template duration, and that the
//!   cyclic shift matches a direct transform of the delayed signal.
use crate::waveform::{
    core::{
        series::{FrequencySeries, TimeSeries},
        taper::{TaperOutcome, taper_start},
    },
    errors::{WaveformError, WaveformResult},
    models::polarization::PolarizationPair,
};

/// Largest padded length accepted (2²⁸ samples, about 18 h at 4096 Hz).
pub const MAX_TARGET_SAMPLES: usize = 1 << 28;

/// What the conditioning did, for logging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConditioningReport {
    /// Unpadded sample count `n`.
    pub natural_len: usize,
    /// Padded sample count `round(1 / (Δf Δt))`.
    pub target_len: usize,
    /// Taper outcomes for plus and cross, `None` when tapering is disabled.
    pub taper: Option<(TaperOutcome, TaperOutcome)>,
    /// Cyclic shift applied to both spectra (s).
    pub shift: f64,
}

/// Number of time samples implied by a frequency spacing.
///
/// # Errors
/// - [`WaveformError::InvalidParameter`] if `delta_f` is not finite and
///   positive, or so small that the target exceeds [`MAX_TARGET_SAMPLES`].
pub fn target_length(delta_f: f64, delta_t: f64) -> WaveformResult<usize> {
    if !delta_f.is_finite() || delta_f <= 0.0 {
        return Err(WaveformError::InvalidParameter {
            key: "delta_f".to_string(),
            value: delta_f.to_string(),
            reason: "must be finite and > 0",
        });
    }
    let target = (1.0 / (delta_f * delta_t)).round();
    if !target.is_finite() || target > MAX_TARGET_SAMPLES as f64 {
        return Err(WaveformError::InvalidParameter {
            key: "delta_f".to_string(),
            value: delta_f.to_string(),
            reason: "implies more than MAX_TARGET_SAMPLES time samples",
        });
    }
    Ok(target as usize)
}

/// Condition and transform a time-domain pair onto the `delta_f` grid.
///
/// Parameters
/// ----------
/// - `pair`: time-domain plus/cross, consumed.
/// - `delta_f`: requested frequency spacing (Hz).
/// - `taper`: apply the Planck start taper before transforming.
///
/// Returns
/// -------
/// The frequency-domain pair (with `template_duration` set) and a
/// [`ConditioningReport`].
///
/// Errors
/// ------
/// - `InvalidParameter` for a non-positive `delta_f`.
/// - `InsufficientFrequencyResolution { required: n, available: target }`
///   iff `target < n`.
pub fn to_frequency_domain(
    pair: PolarizationPair<TimeSeries>, delta_f: f64, taper: bool,
) -> WaveformResult<(PolarizationPair<FrequencySeries>, ConditioningReport)> {
    let natural_len = pair.len();
    let (mut plus, mut cross) = pair.into_parts();
    let delta_t = plus.delta_t();

    let target_len = target_length(delta_f, delta_t)?;
    if target_len < natural_len {
        return Err(WaveformError::InsufficientFrequencyResolution {
            required: natural_len,
            available: target_len,
        });
    }

    plus.resize(target_len);
    cross.resize(target_len);

    let taper_outcomes = if taper {
        Some((taper_start(plus.data_mut()), taper_start(cross.data_mut())))
    } else {
        None
    };

    let shift = -plus.epoch();
    let mut plus_f = plus.to_frequencyseries();
    let mut cross_f = cross.to_frequencyseries();
    plus_f.cyclic_time_shift(shift);
    cross_f.cyclic_time_shift(shift);

    let template_duration = natural_len as f64 * delta_t;
    let out = PolarizationPair::new(plus_f, cross_f)?.with_template_duration(template_duration);
    let report = ConditioningReport { natural_len, target_len, taper: taper_outcomes, shift };
    Ok((out, report))
}
