//! Physical preconditions of the aligned-spin eccentric model.
//!
//! The negative-m reconstruction `h_{ℓ,−m} = (−1)^ℓ conj(h_{ℓm})` is exact only
//! when the orbital plane does not precess, i.e. when both in-plane spin
//! components of both bodies vanish. The model also only covers bound orbits,
//! `0 ≤ e ≤ 1`. Both checks are hard failures; nothing is clamped.
use crate::waveform::{
    core::params::{ParamDict, keys},
    errors::{WaveformError, WaveformResult},
};

/// Require `spin1x = spin1y = spin2x = spin2y = 0` exactly.
///
/// # Errors
/// - [`WaveformError::MissingParameter`] / [`WaveformError::InvalidParameter`]
///   if a component is absent or not a finite number.
/// - [`WaveformError::UnsupportedSpinConfiguration`] naming the first
///   nonzero component.
pub fn validate_aligned_spin(params: &ParamDict) -> WaveformResult<()> {
    for key in keys::IN_PLANE_SPINS {
        let value = params.require_f64(key)?;
        if value != 0.0 {
            return Err(WaveformError::UnsupportedSpinConfiguration {
                reason: format!("{key} = {value}; only aligned spins are supported"),
            });
        }
    }
    Ok(())
}

/// Require `|spin1z|, |spin2z| ≤ 1` (Kerr bound).
///
/// # Errors
/// - [`WaveformError::InvalidParameter`] for a super-extremal component.
pub fn validate_spin_magnitudes(chi1: f64, chi2: f64) -> WaveformResult<()> {
    for (key, chi) in [(keys::SPIN1Z, chi1), (keys::SPIN2Z, chi2)] {
        if chi.abs() > 1.0 {
            return Err(WaveformError::InvalidParameter {
                key: key.to_string(),
                value: chi.to_string(),
                reason: "dimensionless spin must satisfy |chi| <= 1",
            });
        }
    }
    Ok(())
}

/// Require `0 ≤ eccentricity ≤ 1`.
///
/// # Errors
/// - [`WaveformError::UnsupportedSpinConfiguration`] otherwise.
pub fn validate_eccentricity(eccentricity: f64) -> WaveformResult<()> {
    if !(0.0..=1.0).contains(&eccentricity) {
        return Err(WaveformError::UnsupportedSpinConfiguration {
            reason: format!("eccentricity = {eccentricity} lies outside [0, 1]"),
        });
    }
    Ok(())
}
