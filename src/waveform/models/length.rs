//! Template duration estimate from `f_lower` to the end of ringdown.
//!
//! The estimate is an upper bound built from three closed-form pieces:
//!
//! ```text
//! t_chirp = c0 v⁻⁸ [1 + (c2 + (c3 + c4 v) v) v²],   v = (π M f)^{1/3}
//!   c0 = 5M / (256 η)
//!   c2 = 743/252 + 11η/3
//!   c3 = 226χ/15,                    χ = max(|χ1|, |χ2|)
//!   c4 = 3058673/508032 + 5429η/504 + 617η²/72
//! t_merge = 2π r / v at r = 9M         (one orbit at the ISCO scale)
//! t_ring  = 11 τ_220 for a remnant of spin 0.998
//! ```
//!
//! with all masses in seconds (`M · MTSUN_SI`). The chirp time stops at 2PN
//! order; the merger and ringdown pieces depend on `M` only.
use crate::waveform::{
    core::{
        params::{ParamDict, keys},
        units::MTSUN_SI,
        validation::validate_spin_magnitudes,
    },
    errors::WaveformResult,
};
use std::f64::consts::PI;

/// Remnant spin used for the ringdown bound; near-extremal spins ring
/// longest.
const RINGDOWN_SPIN_BOUND: f64 = 0.998;

/// e-folds of the fundamental quasi-normal mode kept in the bound.
const RINGDOWN_EFOLDS: f64 = 11.0;

/// Radius (units of M) of the orbit used for the merger bound.
const MERGER_RADIUS: f64 = 9.0;

/// Inspiral chirp time (s) from `f_lower` to coalescence.
pub fn chirp_time_bound(f_lower: f64, mass1: f64, mass2: f64, chi1: f64, chi2: f64) -> f64 {
    let total = mass1 + mass2;
    let eta = mass1 * mass2 / (total * total);
    let m_sec = total * MTSUN_SI;
    let chi = chi1.abs().max(chi2.abs());

    let c0 = (5.0 * m_sec / (256.0 * eta)).abs();
    let c2 = 743.0 / 252.0 + 11.0 / 3.0 * eta;
    let c3 = 226.0 / 15.0 * chi;
    let c4 = 3_058_673.0 / 508_032.0 + 5429.0 / 504.0 * eta + 617.0 / 72.0 * eta * eta;
    let v = (PI * m_sec * f_lower).cbrt();

    c0 * v.powi(-8) * (1.0 + (c2 + (c3 + c4 * v) * v) * v * v)
}

/// Duration (s) of one orbit at `r = 9M`.
pub fn merge_time_bound(total_mass: f64) -> f64 {
    let r = MERGER_RADIUS * total_mass * MTSUN_SI;
    let v = (1.0 / MERGER_RADIUS).sqrt();
    2.0 * PI * r / v
}

/// Ringdown duration (s): `11` e-folds of the (2,2,0) quasi-normal mode
/// (Berti–Cardoso–Will fits) for remnant spin 0.998.
pub fn ringdown_time_bound(total_mass: f64) -> f64 {
    let s = RINGDOWN_SPIN_BOUND;
    let m_sec = total_mass * MTSUN_SI;
    let omega = 1.5251 - 1.1568 * (1.0 - s).powf(0.1292);
    let quality = 0.7 + 1.4187 * (1.0 - s).powf(-0.4990);
    let f = omega / (2.0 * PI * m_sec);
    let tau = quality / (PI * f);
    RINGDOWN_EFOLDS * tau
}

/// Estimate the template duration (s) for caller-convention parameters.
///
/// Reads `mass1`, `mass2`, `f_lower` (required, > 0) and `spin1z`, `spin2z`
/// (optional, default 0).
///
/// # Errors
/// - `MissingParameter` / `InvalidParameter` for absent or non-positive
///   masses or `f_lower`, and for |χ| > 1.
pub fn length_in_time(params: &ParamDict) -> WaveformResult<f64> {
    let mass1 = params.require_positive(keys::MASS1)?;
    let mass2 = params.require_positive(keys::MASS2)?;
    let f_lower = params.require_positive(keys::F_LOWER)?;
    let chi1 = params.optional_f64(keys::SPIN1Z)?.unwrap_or(0.0);
    let chi2 = params.optional_f64(keys::SPIN2Z)?.unwrap_or(0.0);
    validate_spin_magnitudes(chi1, chi2)?;

    let total = mass1 + mass2;
    Ok(chirp_time_bound(f_lower, mass1, mass2, chi1, chi2)
        + merge_time_bound(total)
        + ringdown_time_bound(total))
}
