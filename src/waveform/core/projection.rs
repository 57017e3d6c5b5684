//! Projection of a complete mode set onto an observer direction.
//!
//! Purpose
//! -------
//! Sum `h_ℓm` weighted by `₋₂Y_ℓm` to obtain the complex strain seen by an
//! observer and split it into the two real polarizations.
//!
//! Key behaviors
//! -------------
//! - Evaluates each harmonic once per mode at polar angle θ = inclination and
//!   azimuth `π/2 − φ_ref`.
//! - Returns `(plus, cross)` with `plus = Re S` and `cross = −Im S`, where
//!   `S[i] = Σ_ℓm ₋₂Y_ℓm · h_ℓm[i]`.
//!
//! Invariants & assumptions
//! ------------------------
//! - The input [`ModeSet`] already contains the negative-m companions (see
//!   `modes::reconstruct_negative_modes`); projection never synthesizes
//!   modes on its own.
//! - The azimuth offset `π/2 − φ_ref` and the sign of the cross polarization
//!   are a fixed contract shared with the reference model output; changing
//!   either rotates the polarizations.
//!
//! Conventions
//! -----------
//! - Inputs and outputs are in whatever units the modes are in; the
//!   generator projects geometric-unit modes and scales afterwards.
use crate::waveform::core::{harmonics::strain_harmonic, modes::ModeSet};
use ndarray::{Array1, Zip};
use num_complex::Complex64;
use std::f64::consts::FRAC_PI_2;

/// Line of sight of the observer in the source frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverDirection {
    /// Polar angle from the orbital angular momentum (rad).
    pub inclination: f64,
    /// Reference (coalescence) phase (rad).
    pub phi_ref: f64,
}

impl ObserverDirection {
    pub fn new(inclination: f64, phi_ref: f64) -> Self {
        ObserverDirection { inclination, phi_ref }
    }

    /// Azimuth passed to the harmonics, `π/2 − φ_ref`.
    pub fn azimuth(&self) -> f64 {
        FRAC_PI_2 - self.phi_ref
    }
}

/// Complex strain `S[i] = Σ_ℓm ₋₂Y_ℓm(θ, π/2 − φ_ref) · h_ℓm[i]`.
pub fn observed_strain(modes: &ModeSet, direction: &ObserverDirection) -> Array1<Complex64> {
    let theta = direction.inclination;
    let phi = direction.azimuth();
    let mut strain = Array1::<Complex64>::zeros(modes.len());
    for (key, data) in modes.iter() {
        let ylm = strain_harmonic(key, theta, phi);
        Zip::from(&mut strain).and(data).for_each(|s, &h| *s += ylm * h);
    }
    strain
}

/// Project a complete mode set onto `direction`.
///
/// Returns
/// -------
/// `(plus, cross)` with `plus = Re S`, `cross = −Im S`, each of length
/// `modes.len()`.
pub fn project_modes(
    modes: &ModeSet, direction: &ObserverDirection,
) -> (Array1<f64>, Array1<f64>) {
    let strain = observed_strain(modes, direction);
    let plus = strain.mapv(|s| s.re);
    let cross = strain.mapv(|s| -s.im);
    (plus, cross)
}
