//! Integration tests for the SEOBNR waveform pipeline.
//!
//! Purpose
//! -------
//! - Validate the end-to-end path from caller parameters, through parameter
//!   translation and an injected model evaluator, to SI time-domain and
//!   conditioned frequency-domain polarizations.
//! - Exercise a realistic binary (30 + 20 M☉ at 400 Mpc from 20 Hz) with a
//!   leading-order chirp standing in for the EOB solver.
//!
//! Coverage
//! --------
//! - `waveform::models::generator::WaveformGenerator`:
//!   - Time- and frequency-domain generation, both evaluator output shapes.
//!   - Error propagation for missing parameters, precessing spins, absent
//!     eccentricity, coarse `delta_f`, and evaluator failure.
//! - `waveform::core::options`:
//!   - Dominant vs higher-mode selection and the odd-m filter as seen by the
//!     evaluator.
//! - `waveform::models::length::length_in_time`:
//!   - Consistency with the generated signal duration.
//!
//! Exclusions
//! ----------
//! - Harmonic values, taper shape, and FFT normalization, which are covered
//!   by unit tests.
//! - Python bindings, which are exercised from Python.
use std::{
    cell::{Cell, RefCell},
    collections::BTreeMap,
    f64::consts::PI,
};

use approx::assert_relative_eq;
use ndarray::Array1;
use num_complex::Complex64;
use rust_seobnr::waveform::{
    core::{
        modes::{ModeKey, ModeSet},
        options::{Domain, EccentricityPolicy, GenerationConfig, ModeSelection},
        params::ParamDict,
        units::{C_SI, MPC_SI, MTSUN_SI},
    },
    errors::{WaveformError, WaveformResult},
    keys,
    models::{
        evaluator::{ModelEvaluator, ModelOutput},
        generator::WaveformGenerator,
        length::length_in_time,
    },
};

const DELTA_T: f64 = 1.0 / 4096.0;
const MASS1: f64 = 30.0;
const MASS2: f64 = 20.0;
const DISTANCE: f64 = 400.0;
const F_LOWER: f64 = 20.0;

/// Purpose
/// -------
/// Stand in for the EOB solver with a leading-order (Newtonian) quasi-circular
/// chirp, in geometric units, ending at the test-mass ISCO at `t = 0`.
///
/// Model
/// -----
/// With `τ = −t + τ_isco` and symmetric mass ratio `ν`:
/// - `Mω(τ) = (5 / (ν τ))^{3/8} / 8`, `φ(τ) = −(ν τ / 5)^{5/8} / ν`.
/// - `h_ℓm = a_ℓm · 8 √(π/5) ν x · e^{−i m φ}` with `x = (Mω)^{2/3}`,
///   `a_22 = 1` and `a_ℓm = 0.1` otherwise.
///
/// Only the modes listed in `ModeArray` are returned, m ≥ 0 only.
#[derive(Default)]
struct NewtonianChirp {
    calls: Cell<usize>,
    last_params: RefCell<Option<ParamDict>>,
}

fn coalescence_time(omega: f64, nu: f64) -> f64 {
    5.0 / nu * (8.0 * omega).powf(-8.0 / 3.0)
}

fn symmetric_mass_ratio(q: f64) -> f64 {
    q / ((1.0 + q) * (1.0 + q))
}

impl ModelEvaluator for NewtonianChirp {
    fn evaluate(&self, params: &ParamDict) -> WaveformResult<ModelOutput> {
        self.calls.set(self.calls.get() + 1);
        *self.last_params.borrow_mut() = Some(params.clone());

        let total_mass = params.require_f64(keys::TOTAL_MASS)?;
        let nu = symmetric_mass_ratio(params.require_f64(keys::MASS_RATIO)?);
        let omega_start = params.require_f64(keys::OMEGA_START)?;
        let dt_geo = params.require_f64(keys::DELTA_T_MODEL)? / (total_mass * MTSUN_SI);
        let requested = params.modes(keys::MODE_ARRAY).ok_or(WaveformError::EmptyModeSet)?;

        let tau_end = coalescence_time(6f64.powf(-1.5), nu);
        let tau_start = coalescence_time(omega_start, nu);
        let n = ((tau_start - tau_end) / dt_geo).floor() as usize + 1;
        let t0 = -((n - 1) as f64) * dt_geo;
        let times = Array1::from_iter((0..n).map(|i| t0 + i as f64 * dt_geo));

        let tau = times.mapv(|t| tau_end - t);
        let amp = tau.mapv(|tau| {
            let omega = (5.0 / (nu * tau)).powf(3.0 / 8.0) / 8.0;
            8.0 * (PI / 5.0).sqrt() * nu * omega.powf(2.0 / 3.0)
        });
        let phase = tau.mapv(|tau| -(nu * tau / 5.0).powf(5.0 / 8.0) / nu);

        let mut modes = BTreeMap::new();
        for key in requested {
            let weight = if key.l() == 2 && key.m() == 2 { 1.0 } else { 0.1 };
            let m = f64::from(key.m());
            let data = Array1::from_iter(
                amp.iter()
                    .zip(phase.iter())
                    .map(|(&a, &p)| Complex64::from_polar(weight * a, -m * p)),
            );
            modes.insert(*key, data);
        }
        ModelOutput::modes(times, ModeSet::new(modes)?)
    }
}

/// Purpose
/// -------
/// Stand in for a model binding that already returns SI polarizations: a
/// 100 Hz sinusoid with a Gaussian envelope over 0.25 s.
struct SinusoidPolarizations;

impl ModelEvaluator for SinusoidPolarizations {
    fn evaluate(&self, params: &ParamDict) -> WaveformResult<ModelOutput> {
        let delta_t = params.require_f64(keys::DELTA_T_MODEL)?;
        let n = (0.25 / delta_t).round() as usize;
        let epoch = -0.2;
        let t = Array1::from_iter((0..n).map(|i| epoch + i as f64 * delta_t));
        let env = t.mapv(|t| 1e-21 * (-(t + 0.075) * (t + 0.075) / 0.002).exp());
        let plus = &env * &t.mapv(|t| (2.0 * PI * 100.0 * t).cos());
        let cross = &env * &t.mapv(|t| (2.0 * PI * 100.0 * t).sin());
        ModelOutput::polarizations(plus, cross, delta_t, epoch)
    }
}

struct FailingModel;

impl ModelEvaluator for FailingModel {
    fn evaluate(&self, _params: &ParamDict) -> WaveformResult<ModelOutput> {
        Err(WaveformError::EvaluatorFailed { reason: "ODE integration did not converge".into() })
    }
}

/// The reference binary: aligned, non-spinning, quasi-circular, face-on.
fn reference_params() -> ParamDict {
    ParamDict::new()
        .with(keys::MASS1, MASS1)
        .with(keys::MASS2, MASS2)
        .with(keys::SPIN1X, 0.0)
        .with(keys::SPIN1Y, 0.0)
        .with(keys::SPIN1Z, 0.0)
        .with(keys::SPIN2X, 0.0)
        .with(keys::SPIN2Y, 0.0)
        .with(keys::SPIN2Z, 0.0)
        .with(keys::ECCENTRICITY, 0.0)
        .with(keys::REL_ANOMALY, 0.0)
        .with(keys::DISTANCE, DISTANCE)
        .with(keys::INCLINATION, 0.0)
        .with(keys::COA_PHASE, 0.0)
        .with(keys::F_LOWER, F_LOWER)
        .with(keys::DELTA_T, DELTA_T)
}

fn dominant_generator() -> WaveformGenerator<NewtonianChirp> {
    WaveformGenerator::new(NewtonianChirp::default(), GenerationConfig::default())
        .expect("default configuration is valid")
}

fn mode(l: i32, m: i32) -> ModeKey {
    ModeKey::new(l, m).expect("valid mode key")
}

#[test]
// Purpose
// -------
// The reference binary yields real, equal-length polarizations at the
// physically expected strain scale, sampled at the requested `delta_t`.
//
// Given
// -----
// - 30 + 20 M☉, 400 Mpc, face-on, f_lower = 20 Hz, delta_t = 1/4096 s.
//
// Expect
// ------
// - Peak envelope √(h₊² + h×²) = (2/3) ν c M T☉ / D ≈ 9.6e-22 at the final
//   sample, growing monotonically before it.
// - The epoch equals minus the signal duration, and the last sample time is
//   t = 0 (where the model ends).
fn reference_binary_has_expected_scale_and_grid() {
    // Arrange
    let generator = dominant_generator();
    let nu = symmetric_mass_ratio(MASS1 / MASS2);
    let total_mass = MASS1 + MASS2;
    let expected_peak = 2.0 / 3.0 * nu * C_SI * total_mass * MTSUN_SI / (DISTANCE * MPC_SI);

    // Act
    let pair = generator.generate_td(&reference_params()).unwrap();

    // Assert
    let n = pair.len();
    assert!(n > 4096 && n < 8192, "unexpected length {n}");
    assert_eq!(pair.plus().len(), pair.cross().len());
    assert_relative_eq!(pair.plus().delta_t(), DELTA_T, max_relative = 1e-9);
    assert_relative_eq!(pair.epoch(), -((n - 1) as f64) * DELTA_T, max_relative = 1e-6);
    assert!(pair.template_duration().is_none());
    let times = pair.plus().sample_times();
    assert_eq!(times.len(), n);
    assert_eq!(times[0], pair.epoch());
    assert!(times[n - 1].abs() < 1e-9, "last sample at {} s", times[n - 1]);

    let envelope: Vec<f64> = pair
        .plus()
        .data()
        .iter()
        .zip(pair.cross().data().iter())
        .map(|(p, c)| (p * p + c * c).sqrt())
        .collect();
    assert!(envelope.iter().all(|v| v.is_finite()));
    assert!(envelope.windows(2).all(|w| w[1] >= w[0] * (1.0 - 1e-12)));
    let peak = envelope[n - 1];
    assert_relative_eq!(peak, expected_peak, max_relative = 1e-6);
    assert!(peak > 1e-22 && peak < 1e-20);
}

#[test]
// Purpose
// -------
// The evaluator receives the model-convention parameter set.
//
// Given
// -----
// - The reference binary with default configuration.
//
// Expect
// ------
// - M = 50, q = 1.5, omega_start = π f_lower T☉ M, ModeArray = [(2,2)],
//   deltaT forwarded, no deltaF in the time domain.
fn evaluator_sees_translated_parameters() {
    // Arrange
    let generator = dominant_generator();

    // Act
    generator.generate_td(&reference_params()).unwrap();

    // Assert
    let seen = generator.evaluator().last_params.borrow().clone().unwrap();
    assert_eq!(seen.require_f64(keys::TOTAL_MASS).unwrap(), 50.0);
    assert_relative_eq!(seen.require_f64(keys::MASS_RATIO).unwrap(), 1.5);
    assert_relative_eq!(
        seen.require_f64(keys::OMEGA_START).unwrap(),
        PI * F_LOWER * MTSUN_SI * 50.0,
        max_relative = 1e-12
    );
    assert_eq!(seen.require_f64(keys::DELTA_T_MODEL).unwrap(), DELTA_T);
    assert_eq!(seen.modes(keys::MODE_ARRAY).unwrap(), &[mode(2, 2)]);
    assert!(!seen.contains(keys::DELTA_F_MODEL));
}

#[test]
// Purpose
// -------
// Generation is a pure function of its inputs.
//
// Given
// -----
// - The same parameters run twice through both domains.
//
// Expect
// ------
// - Bitwise-identical outputs; the evaluator is called once per generation.
fn repeated_generation_is_identical() {
    // Arrange
    let generator = dominant_generator();
    let params = reference_params().with(keys::DELTA_F, 0.25);

    // Act
    let td_a = generator.generate_td(&params).unwrap();
    let td_b = generator.generate_td(&params).unwrap();
    let fd_a = generator.generate_fd(&params).unwrap();
    let fd_b = generator.generate_fd(&params).unwrap();

    // Assert
    assert_eq!(td_a, td_b);
    assert_eq!(fd_a, fd_b);
    assert_eq!(generator.evaluator().calls.get(), 4);
}

#[test]
// Purpose
// -------
// Frequency-domain generation lands on the caller's grid and keeps the
// signal's power in the band the chirp sweeps.
//
// Given
// -----
// - delta_f = 0.25 Hz, so the target length is 16384 samples.
//
// Expect
// ------
// - 8193 one-sided bins spaced 0.25 Hz.
// - template_duration = natural length · delta_t; epoch = 2 · TD epoch.
// - |h̃₊| peaks between f_lower / 2 and the ISCO frequency (~88 Hz).
fn frequency_domain_output_on_requested_grid() {
    // Arrange
    let generator = dominant_generator();
    let params = reference_params().with(keys::DELTA_F, 0.25);
    let td = generator.generate_td(&params).unwrap();

    // Act
    let fd = generator.generate_fd(&params).unwrap();

    // Assert
    assert_eq!(fd.len(), 16384 / 2 + 1);
    assert_relative_eq!(fd.plus().delta_f(), 0.25, max_relative = 1e-12);
    assert_relative_eq!(
        fd.template_duration().unwrap(),
        td.len() as f64 * DELTA_T,
        max_relative = 1e-12
    );
    assert_relative_eq!(fd.epoch(), 2.0 * td.epoch(), max_relative = 1e-12);

    let freqs = fd.plus().sample_frequencies();
    let (peak_idx, _) = fd
        .plus()
        .data()
        .iter()
        .map(|c| c.norm())
        .enumerate()
        .fold((0, 0.0), |best, (i, v)| if v > best.1 { (i, v) } else { best });
    let f_peak = freqs[peak_idx];
    assert!(f_peak >= F_LOWER / 2.0 && f_peak <= 90.0, "peak at {f_peak} Hz");
}

#[test]
// Purpose
// -------
// A `delta_f` too coarse to hold the signal is rejected rather than
// truncating it.
//
// Given
// -----
// - delta_f = 1 Hz (4096 samples) for a signal longer than 4096 samples.
// - delta_f = 1e-300 Hz, whose sample count does not fit in memory.
//
// Expect
// ------
// - InsufficientFrequencyResolution { required: n, available: 4096 }.
// - InvalidParameter on delta_f for the vanishing spacing, without a panic.
fn coarse_delta_f_is_rejected() {
    // Arrange
    let generator = dominant_generator();
    let n = generator.generate_td(&reference_params()).unwrap().len();
    let params = reference_params().with(keys::DELTA_F, 1.0);
    let vanishing = reference_params().with(keys::DELTA_F, 1e-300);

    // Act
    let err = generator.generate_fd(&params).unwrap_err();
    let vanishing_err = generator.generate_fd(&vanishing).unwrap_err();

    // Assert
    assert_eq!(err, WaveformError::InsufficientFrequencyResolution { required: n, available: 4096 });
    assert!(matches!(
        vanishing_err,
        WaveformError::InvalidParameter { ref key, .. } if key == keys::DELTA_F
    ));
}

#[test]
// Purpose
// -------
// Missing or unsupported inputs fail before the model is evaluated.
//
// Given
// -----
// - No distance; an in-plane spin; no eccentricity under the default policy;
//   no delta_f for a frequency-domain call.
//
// Expect
// ------
// - MissingParameter / UnsupportedSpinConfiguration, and zero evaluator calls.
fn invalid_inputs_fail_before_evaluation() {
    // Arrange
    let generator = dominant_generator();
    let mut no_distance = reference_params();
    no_distance.remove(keys::DISTANCE);
    let precessing = reference_params().with(keys::SPIN1X, 0.3);
    let mut circular = reference_params();
    circular.remove(keys::ECCENTRICITY);

    // Act
    let distance_err = generator.generate_td(&no_distance).unwrap_err();
    let spin_err = generator.generate_td(&precessing).unwrap_err();
    let ecc_err = generator.generate_td(&circular).unwrap_err();
    let fd_err = generator.generate_fd(&reference_params()).unwrap_err();

    // Assert
    assert_eq!(distance_err, WaveformError::MissingParameter { key: keys::DISTANCE.into() });
    assert!(matches!(spin_err, WaveformError::UnsupportedSpinConfiguration { .. }));
    assert_eq!(ecc_err, WaveformError::MissingParameter { key: keys::ECCENTRICITY.into() });
    assert_eq!(fd_err, WaveformError::MissingParameter { key: keys::DELTA_F.into() });
    assert_eq!(generator.evaluator().calls.get(), 0);
}

#[test]
// Purpose
// -------
// The opt-in eccentricity policy substitutes a quasi-circular orbit.
//
// Given
// -----
// - No eccentricity / rel_anomaly and `EccentricityPolicy::ZeroIfAbsent`.
//
// Expect
// ------
// - Generation succeeds and the evaluator sees both keys set to 0.0.
fn absent_eccentricity_defaults_when_allowed() {
    // Arrange
    let config = GenerationConfig {
        eccentricity_policy: EccentricityPolicy::ZeroIfAbsent,
        ..GenerationConfig::default()
    };
    let generator = WaveformGenerator::new(NewtonianChirp::default(), config).unwrap();
    let mut params = reference_params();
    params.remove(keys::ECCENTRICITY);
    params.remove(keys::REL_ANOMALY);

    // Act
    let pair = generator.generate_td(&params).unwrap();

    // Assert
    assert!(!pair.is_empty());
    let seen = generator.evaluator().last_params.borrow().clone().unwrap();
    assert_eq!(seen.require_f64(keys::ECCENTRICITY).unwrap(), 0.0);
    assert_eq!(seen.require_f64(keys::REL_ANOMALY).unwrap(), 0.0);
}

#[test]
// Purpose
// -------
// Higher-mode selection changes both the request and the inclined signal,
// and the odd-m filter removes odd modes from the request.
//
// Given
// -----
// - Inclination π/3; dominant vs all model modes vs all modes without odd m.
//
// Expect
// ------
// - ModeArray lists six modes, then three once odd m is excluded.
// - The higher-mode waveform differs from the dominant one.
fn higher_mode_selection_reaches_the_model() {
    // Arrange
    let params = reference_params().with(keys::INCLINATION, PI / 3.0);
    let dominant = dominant_generator();
    let hm = WaveformGenerator::new(
        NewtonianChirp::default(),
        GenerationConfig::new(Domain::Time, ModeSelection::all_model_modes()),
    )
    .unwrap();
    let even_only = WaveformGenerator::new(
        NewtonianChirp::default(),
        GenerationConfig {
            include_odd_modes: false,
            ..GenerationConfig::new(Domain::Time, ModeSelection::all_model_modes())
        },
    )
    .unwrap();

    // Act
    let h_dom = dominant.generate_td(&params).unwrap();
    let h_hm = hm.generate_td(&params).unwrap();
    even_only.generate_td(&params).unwrap();

    // Assert
    let hm_seen = hm.evaluator().last_params.borrow().clone().unwrap();
    assert_eq!(hm_seen.modes(keys::MODE_ARRAY).unwrap().len(), 6);
    let even_seen = even_only.evaluator().last_params.borrow().clone().unwrap();
    assert_eq!(
        even_seen.modes(keys::MODE_ARRAY).unwrap(),
        &[mode(2, 2), mode(3, 2), mode(4, 4)]
    );

    assert_eq!(h_dom.len(), h_hm.len());
    let peak = h_dom.plus().data().iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    let max_diff = h_dom
        .plus()
        .data()
        .iter()
        .zip(h_hm.plus().data().iter())
        .fold(0.0_f64, |acc, (a, b)| acc.max((a - b).abs()));
    assert!(max_diff > 1e-3 * peak);
}

#[test]
// Purpose
// -------
// Pre-projected SI polarizations pass through unchanged in the time domain
// and are conditioned in the frequency domain.
//
// Given
// -----
// - An evaluator returning a 0.25 s sinusoid with epoch −0.2 s.
//
// Expect
// ------
// - TD: 1024 samples, epoch −0.2 s, cross is the quarter-cycle-shifted plus.
// - FD with delta_f = 1 Hz: 2049 bins, template_duration 0.25 s.
fn polarization_shaped_evaluator_round_trip() {
    // Arrange
    let td_gen = WaveformGenerator::new(SinusoidPolarizations, GenerationConfig::default()).unwrap();
    let fd_gen = WaveformGenerator::new(
        SinusoidPolarizations,
        GenerationConfig::new(Domain::Frequency, ModeSelection::Dominant),
    )
    .unwrap();
    let params = reference_params().with(keys::DELTA_F, 1.0);

    // Act
    let td = td_gen.generate_td(&params).unwrap();
    let fd = fd_gen.generate_fd(&params).unwrap();

    // Assert
    assert_eq!(td.len(), 1024);
    assert_relative_eq!(td.epoch(), -0.2, max_relative = 1e-12);
    assert_relative_eq!(td.plus().delta_t(), DELTA_T, max_relative = 1e-12);
    assert_eq!(fd.len(), 2049);
    assert_relative_eq!(fd.template_duration().unwrap(), 0.25, max_relative = 1e-12);
}

#[test]
// Purpose
// -------
// Evaluator failures surface unchanged.
//
// Given
// -----
// - A model that always reports EvaluatorFailed.
//
// Expect
// ------
// - The same error from both domains.
fn evaluator_failure_propagates() {
    // Arrange
    let generator = WaveformGenerator::new(FailingModel, GenerationConfig::default()).unwrap();
    let params = reference_params().with(keys::DELTA_F, 0.25);

    // Act
    let td_err = generator.generate_td(&params).unwrap_err();
    let fd_err = generator.generate_fd(&params).unwrap_err();

    // Assert
    for err in [td_err, fd_err] {
        assert!(matches!(err, WaveformError::EvaluatorFailed { .. }));
    }
}

#[test]
// Purpose
// -------
// The duration estimate bounds the generated inspiral and grows as f_lower
// drops.
//
// Given
// -----
// - The reference binary at f_lower = 20 Hz and 15 Hz.
//
// Expect
// ------
// - ≈ 2.0 s from 20 Hz, longer than the generated signal.
// - A longer estimate from 15 Hz.
fn length_in_time_bounds_generated_signal() {
    // Arrange
    let generator = dominant_generator();
    let low = reference_params().with(keys::F_LOWER, 15.0);

    // Act
    let estimate = length_in_time(&reference_params()).unwrap();
    let estimate_low = length_in_time(&low).unwrap();
    let generated = generator.generate_td(&reference_params()).unwrap();

    // Assert
    assert!(estimate > 1.8 && estimate < 2.3, "estimate {estimate}");
    assert!(estimate > generated.len() as f64 * DELTA_T);
    assert!(estimate_low > estimate);
}
