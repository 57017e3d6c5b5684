//! Parameter translation from the caller convention to the model convention.
//!
//! Purpose
//! -------
//! Build the dictionary handed to the EOB model evaluator from a caller
//! dictionary in the host toolkit's naming. The output is a fresh
//! [`ParamDict`]; the caller's dictionary is never modified.
//!
//! Key behaviors
//! -------------
//! - Copies masses, all six spin components, distance and inclination
//!   unchanged.
//! - Renames `coa_phase → phi_ref`, `f_lower → f22_start` and `f_ref`,
//!   `delta_t → deltaT`, `delta_f → deltaF` (frequency domain only).
//! - Derives `M = m1 + m2`, `q = max/min ≥ 1`, `chi1 = spin1z`,
//!   `chi2 = spin2z` and `omega_start = π f_lower MTSUN_SI M`.
//! - Adds the fixed model settings: `approximant`, `ModeArray`,
//!   `postadiabatic`, `h_0` and (when enabled) `lmax_nyquist`.
//! - Resolves eccentricity / relativistic anomaly under the configured
//!   [`EccentricityPolicy`].
//!
//! Invariants & assumptions
//! ------------------------
//! - `f_ref` always equals `f22_start`: the model's reference frequency is
//!   pinned to the starting frequency.
//! - Translation is a pure function of its inputs.
//!
//! Downstream usage
//! ----------------
//! - The generator translates, validates the spin configuration, and then
//!   hands the result to a `ModelEvaluator`.
use crate::waveform::{
    core::{
        options::{APPROXIMANT, Domain, EccentricityPolicy, GenerationConfig, INITIAL_STEP},
        params::{ParamDict, keys},
        units::geometric_angular_frequency,
        validation::{validate_eccentricity, validate_spin_magnitudes},
    },
    errors::WaveformResult,
};

/// Eccentric-orbit initial conditions after applying the policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalInitialConditions {
    pub eccentricity: f64,
    pub rel_anomaly: f64,
    /// `true` when at least one value was filled in by
    /// [`EccentricityPolicy::ZeroIfAbsent`].
    pub defaulted: bool,
}

/// Read `eccentricity` and `rel_anomaly` under `policy`.
///
/// # Errors
/// - [`crate::waveform::errors::WaveformError::MissingParameter`] for an
///   absent key under [`EccentricityPolicy::Required`].
/// - [`crate::waveform::errors::WaveformError::UnsupportedSpinConfiguration`]
///   if the eccentricity lies outside [0, 1].
pub fn resolve_orbit(
    params: &ParamDict, policy: EccentricityPolicy,
) -> WaveformResult<OrbitalInitialConditions> {
    let (eccentricity, rel_anomaly, defaulted) = match policy {
        EccentricityPolicy::Required => (
            params.require_f64(keys::ECCENTRICITY)?,
            params.require_f64(keys::REL_ANOMALY)?,
            false,
        ),
        EccentricityPolicy::ZeroIfAbsent => {
            let e = params.optional_f64(keys::ECCENTRICITY)?;
            let l = params.optional_f64(keys::REL_ANOMALY)?;
            (e.unwrap_or(0.0), l.unwrap_or(0.0), e.is_none() || l.is_none())
        }
    };
    validate_eccentricity(eccentricity)?;
    Ok(OrbitalInitialConditions { eccentricity, rel_anomaly, defaulted })
}

/// Translate a caller dictionary into the model dictionary for `domain`.
///
/// Parameters
/// ----------
/// - `params`: caller-convention parameters (see [`keys`]).
/// - `config`: generation options supplying the mode request and the fixed
///   model settings.
/// - `domain`: `Frequency` additionally requires and forwards `delta_f`.
///
/// Errors
/// ------
/// - `MissingParameter` for any absent required key.
/// - `InvalidParameter` for non-numeric values, non-positive masses /
///   distance / `f_lower` / `delta_t` / `delta_f`, or |chi| > 1.
/// - `UnsupportedSpinConfiguration` for eccentricity outside [0, 1].
/// - `InvalidParameter` / `EmptyModeSet` from [`GenerationConfig::validate`].
pub fn translate(
    params: &ParamDict, config: &GenerationConfig, domain: Domain,
) -> WaveformResult<ParamDict> {
    translate_with_orbit(params, config, domain).map(|(out, _)| out)
}

/// [`translate`], also returning the orbital initial conditions it resolved
/// (so callers can report a defaulted eccentricity without re-reading the
/// caller dictionary).
pub fn translate_with_orbit(
    params: &ParamDict, config: &GenerationConfig, domain: Domain,
) -> WaveformResult<(ParamDict, OrbitalInitialConditions)> {
    config.validate()?;

    let mass1 = params.require_positive(keys::MASS1)?;
    let mass2 = params.require_positive(keys::MASS2)?;
    let distance = params.require_positive(keys::DISTANCE)?;
    let inclination = params.require_f64(keys::INCLINATION)?;
    let coa_phase = params.require_f64(keys::COA_PHASE)?;
    let f_lower = params.require_positive(keys::F_LOWER)?;
    let delta_t = params.require_positive(keys::DELTA_T)?;

    let spin1x = params.require_f64(keys::SPIN1X)?;
    let spin1y = params.require_f64(keys::SPIN1Y)?;
    let spin1z = params.require_f64(keys::SPIN1Z)?;
    let spin2x = params.require_f64(keys::SPIN2X)?;
    let spin2y = params.require_f64(keys::SPIN2Y)?;
    let spin2z = params.require_f64(keys::SPIN2Z)?;
    validate_spin_magnitudes(spin1z, spin2z)?;

    let orbit = resolve_orbit(params, config.eccentricity_policy)?;

    let total_mass = mass1 + mass2;
    let mass_ratio = mass1.max(mass2) / mass1.min(mass2);

    let mut out = ParamDict::new()
        .with(keys::MASS1, mass1)
        .with(keys::MASS2, mass2)
        .with(keys::SPIN1X, spin1x)
        .with(keys::SPIN1Y, spin1y)
        .with(keys::SPIN1Z, spin1z)
        .with(keys::SPIN2X, spin2x)
        .with(keys::SPIN2Y, spin2y)
        .with(keys::SPIN2Z, spin2z)
        .with(keys::DISTANCE, distance)
        .with(keys::INCLINATION, inclination)
        .with(keys::ECCENTRICITY, orbit.eccentricity)
        .with(keys::REL_ANOMALY, orbit.rel_anomaly)
        .with(keys::PHI_REF, coa_phase)
        .with(keys::F22_START, f_lower)
        .with(keys::F_REF, f_lower)
        .with(keys::DELTA_T_MODEL, delta_t)
        .with(keys::TOTAL_MASS, total_mass)
        .with(keys::MASS_RATIO, mass_ratio)
        .with(keys::CHI1, spin1z)
        .with(keys::CHI2, spin2z)
        .with(keys::OMEGA_START, geometric_angular_frequency(f_lower, total_mass))
        .with(keys::APPROXIMANT, APPROXIMANT)
        .with(keys::MODE_ARRAY, config.requested_modes())
        .with(keys::POSTADIABATIC, config.postadiabatic)
        .with(keys::H_0, INITIAL_STEP);

    if let Some(lmax) = config.lmax_nyquist {
        out.insert(keys::LMAX_NYQUIST, i64::from(lmax));
    }
    if domain == Domain::Frequency {
        out.insert(keys::DELTA_F_MODEL, params.require_positive(keys::DELTA_F)?);
    }
    Ok((out, orbit))
}
