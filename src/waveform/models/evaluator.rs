//! External model evaluator seam.
//!
//! The EOB equations of motion are solved elsewhere. The generator only needs
//! something that takes a model-convention [`ParamDict`] and returns either a
//! geometric-unit mode set on a time grid, or polarizations that are already
//! projected and in SI units (the on-axis single-series shape).
use crate::waveform::{
    core::{modes::ModeSet, params::ParamDict},
    errors::{WaveformError, WaveformResult},
};
use ndarray::Array1;

/// What a model evaluation produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelOutput {
    /// Complex `(ℓ, m ≥ 0)` modes in geometric units and the time grid (units
    /// of M) they are sampled on.
    Modes { times: Array1<f64>, modes: ModeSet },
    /// Real SI polarizations with their sample spacing (s) and epoch (s).
    Polarizations { plus: Array1<f64>, cross: Array1<f64>, delta_t: f64, epoch: f64 },
}

impl ModelOutput {
    /// Build the polarization shape, checking that both series line up.
    ///
    /// # Errors
    /// - [`WaveformError::PolarizationLengthMismatch`] if the lengths differ.
    pub fn polarizations(
        plus: Array1<f64>, cross: Array1<f64>, delta_t: f64, epoch: f64,
    ) -> WaveformResult<Self> {
        if plus.len() != cross.len() {
            return Err(WaveformError::PolarizationLengthMismatch {
                plus: plus.len(),
                cross: cross.len(),
            });
        }
        Ok(ModelOutput::Polarizations { plus, cross, delta_t, epoch })
    }

    /// Build the mode shape, checking the time grid against the mode length.
    ///
    /// # Errors
    /// - [`WaveformError::InconsistentModeGrid`] if `times.len()` differs from
    ///   the per-mode sample count.
    pub fn modes(times: Array1<f64>, modes: ModeSet) -> WaveformResult<Self> {
        if times.len() != modes.len() {
            return Err(WaveformError::InconsistentModeGrid {
                mode: "time grid".to_string(),
                expected: modes.len(),
                actual: times.len(),
            });
        }
        Ok(ModelOutput::Modes { times, modes })
    }
}

/// Anything that can evaluate the EOB model for one parameter set.
///
/// Implementations must be deterministic for a given input and must not
/// retain the dictionary. Failures of the underlying solver should be
/// reported as [`WaveformError::EvaluatorFailed`].
pub trait ModelEvaluator {
    fn evaluate(&self, params: &ParamDict) -> WaveformResult<ModelOutput>;
}

impl<E: ModelEvaluator + ?Sized> ModelEvaluator for &E {
    fn evaluate(&self, params: &ParamDict) -> WaveformResult<ModelOutput> {
        (**self).evaluate(params)
    }
}

impl<E: ModelEvaluator + ?Sized> ModelEvaluator for Box<E> {
    fn evaluate(&self, params: &ParamDict) -> WaveformResult<ModelOutput> {
        (**self).evaluate(params)
    }
}
