//! WaveformGenerator — end-to-end time- and frequency-domain generation.
//!
//! Purpose
//! -------
//! Drive one waveform request through the whole shim: translate caller
//! parameters, call the external model, turn the returned modes (or
//! pre-projected polarizations) into SI time series, and optionally condition
//! them onto a frequency grid.
//!
//! Key behaviors
//! -------------
//! - [`WaveformGenerator::generate_td`] returns a time-domain
//!   [`PolarizationPair`] with spacing `delta_t` and the model's epoch.
//! - [`WaveformGenerator::generate_fd`] additionally runs
//!   [`to_frequency_domain`] with the caller's `delta_f`.
//! - Mode output is filtered by the configured selection, completed with its
//!   negative-m companions, projected at `(inclination, coa_phase)`, and
//!   scaled by `M` and `distance`.
//!
//! Invariants & assumptions
//! ------------------------
//! - In-plane spins must be exactly zero before the model is called.
//! - The model time grid (units of M) converts to seconds with every
//!   consecutive step equal to `delta_t` within 1e-6 relative; its first
//!   sample is the epoch.
//! - Each call builds fresh dictionaries and arrays; the generator itself is
//!   never mutated, so repeated calls with equal inputs give equal outputs.
//!
//! Downstream usage
//! ----------------
//! - Rust callers implement [`ModelEvaluator`] for their model binding and
//!   call `generate_td` / `generate_fd` / `generate`.
//! - The Python bindings wrap a Python callable as the evaluator.
//!
//! Testing notes
//! -------------
//! - Unit tests use a closed-form chirp as the model and check face-on and
//!   edge-on polarizations, SI scaling, grid checks, mode filtering, the
//!   polarization-shaped output path, and repeatability.
//! - End-to-end behaviour with realistic masses lives in
//!   `tests/integration_waveform_pipeline.rs`.
use crate::waveform::{
    core::{
        modes::{ModeSet, reconstruct_negative_modes},
        options::{Domain, GenerationConfig},
        params::{ParamDict, keys},
        projection::{ObserverDirection, project_modes},
        series::{FrequencySeries, TimeSeries},
        translate::translate_with_orbit,
        units::PhysicalScale,
        validation::validate_aligned_spin,
    },
    errors::{WaveformError, WaveformResult},
    models::{
        evaluator::{ModelEvaluator, ModelOutput},
        observe::PipelineObserver,
        polarization::{PolarizationPair, Polarizations},
        postprocess::to_frequency_domain,
    },
};
use ndarray::Array1;

/// Relative tolerance between each model grid step and `delta_t`.
pub const GRID_SPACING_RTOL: f64 = 1e-6;

/// `WaveformGenerator` — configured front door of the shim.
///
/// Fields
/// ------
/// - `evaluator`: the external model.
/// - `config`: immutable generation options.
/// - `observer`: stage logger (active only when `config.verbose`).
#[derive(Debug)]
pub struct WaveformGenerator<E> {
    evaluator: E,
    config: GenerationConfig,
    observer: PipelineObserver,
}

impl<E: ModelEvaluator> WaveformGenerator<E> {
    /// Build a generator around `evaluator`.
    ///
    /// # Errors
    /// - Anything [`GenerationConfig::validate`] reports.
    pub fn new(evaluator: E, config: GenerationConfig) -> WaveformResult<Self> {
        config.validate()?;
        let observer = PipelineObserver::new(config.verbose);
        Ok(WaveformGenerator { evaluator, config, observer })
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Generate time-domain polarizations.
    ///
    /// Errors
    /// ------
    /// - Parameter errors from translation (`MissingParameter`,
    ///   `InvalidParameter`, `UnsupportedSpinConfiguration`).
    /// - Evaluator contract violations (`MalformedModeKey`,
    ///   `InconsistentModeGrid`, `EmptyModeSet`, `PolarizationLengthMismatch`,
    ///   `TimeGridMismatch`) and `EvaluatorFailed`.
    pub fn generate_td(&self, params: &ParamDict) -> WaveformResult<PolarizationPair<TimeSeries>> {
        self.time_domain(params, Domain::Time)
    }

    /// Generate frequency-domain polarizations on the caller's `delta_f` grid.
    ///
    /// Errors
    /// ------
    /// - Everything [`WaveformGenerator::generate_td`] reports, plus
    ///   `MissingParameter` for `delta_f` and
    ///   `InsufficientFrequencyResolution` when `delta_f` is too coarse.
    pub fn generate_fd(
        &self, params: &ParamDict,
    ) -> WaveformResult<PolarizationPair<FrequencySeries>> {
        let delta_f = params.require_positive(keys::DELTA_F)?;
        let td = self.time_domain(params, Domain::Frequency)?;
        let (fd, report) = to_frequency_domain(td, delta_f, self.config.taper)?;
        self.observer.conditioned(&report);
        Ok(fd)
    }

    /// Generate in the configured domain.
    pub fn generate(&self, params: &ParamDict) -> WaveformResult<Polarizations> {
        match self.config.domain {
            Domain::Time => self.generate_td(params).map(Polarizations::Time),
            Domain::Frequency => self.generate_fd(params).map(Polarizations::Frequency),
        }
    }

    fn time_domain(
        &self, params: &ParamDict, domain: Domain,
    ) -> WaveformResult<PolarizationPair<TimeSeries>> {
        let (model_params, orbit) = translate_with_orbit(params, &self.config, domain)?;
        validate_aligned_spin(params)?;
        let scale = PhysicalScale::new(
            model_params.require_f64(keys::TOTAL_MASS)?,
            model_params.require_f64(keys::DISTANCE)?,
        )?;
        self.observer.translated(model_params.len(), scale.total_mass(), &orbit);

        let delta_t = model_params.require_f64(keys::DELTA_T_MODEL)?;
        let direction = ObserverDirection::new(
            model_params.require_f64(keys::INCLINATION)?,
            model_params.require_f64(keys::PHI_REF)?,
        );

        let pair = match self.evaluator.evaluate(&model_params)? {
            ModelOutput::Modes { times, modes } => {
                self.from_modes(times, modes, &direction, &scale, delta_t)?
            }
            ModelOutput::Polarizations { plus, cross, delta_t: model_dt, epoch } => {
                if plus.len() != cross.len() {
                    return Err(WaveformError::PolarizationLengthMismatch {
                        plus: plus.len(),
                        cross: cross.len(),
                    });
                }
                check_spacing(delta_t, model_dt)?;
                PolarizationPair::new(
                    TimeSeries::new(plus, delta_t, epoch)?,
                    TimeSeries::new(cross, delta_t, epoch)?,
                )?
            }
        };
        self.observer.polarizations_ready(pair.len(), delta_t, pair.epoch());
        Ok(pair)
    }

    fn from_modes(
        &self, times: Array1<f64>, mut modes: ModeSet, direction: &ObserverDirection,
        scale: &PhysicalScale, delta_t: f64,
    ) -> WaveformResult<PolarizationPair<TimeSeries>> {
        if times.len() != modes.len() {
            return Err(WaveformError::InconsistentModeGrid {
                mode: "time grid".to_string(),
                expected: modes.len(),
                actual: times.len(),
            });
        }
        let received = modes.n_modes();
        modes.retain(|key| self.config.keeps(key))?;
        self.observer.modes_received(modes.n_modes(), modes.len(), received - modes.n_modes());

        reconstruct_negative_modes(&mut modes);
        let (mut plus, mut cross) = project_modes(&modes, direction);
        scale.scale_strain(&mut plus);
        scale.scale_strain(&mut cross);

        let si_times = scale.times_to_si(&times);
        let epoch = si_times.first().copied().unwrap_or(0.0);
        for step in si_times.windows(2) {
            check_spacing(delta_t, step[1] - step[0])?;
        }

        PolarizationPair::new(
            TimeSeries::new(plus, delta_t, epoch)?,
            TimeSeries::new(cross, delta_t, epoch)?,
        )
    }
}

fn check_spacing(expected: f64, actual: f64) -> WaveformResult<()> {
    if !actual.is_finite() || ((actual - expected) / expected).abs() > GRID_SPACING_RTOL {
        return Err(WaveformError::TimeGridMismatch { expected, actual });
    }
    Ok(())
}
