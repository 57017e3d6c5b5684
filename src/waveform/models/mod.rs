//! models — waveform generation around an external EOB model evaluator.
//!
//! Purpose
//! -------
//! Sit on top of `waveform::core` and turn a caller parameter dictionary into
//! time- or frequency-domain polarizations, treating the EOB solver as an
//! injected [`ModelEvaluator`].
//!
//! Key behaviors
//! -------------
//! - [`WaveformGenerator`] runs translate → evaluate → select / reconstruct /
//!   project → scale → grid checks, and for the frequency domain adds
//!   [`to_frequency_domain`] (resize, taper, FFT, cyclic shift).
//! - [`ModelOutput`] accepts both evaluator shapes: geometric modes on a time
//!   grid, or pre-projected SI polarizations.
//! - [`length_in_time`] estimates the template duration without calling the
//!   model.
//! - [`PipelineObserver`] logs each stage when the generator is verbose and
//!   the `obs_slog` feature is enabled.
//!
//! Invariants & assumptions
//! ------------------------
//! - Returned [`PolarizationPair`]s always have equal-length plus / cross
//!   series sharing spacing and epoch; no partial result is returned on error.
//! - Generators are immutable after construction and hold no per-call state.
//!
//! Testing notes
//! -------------
//! - Unit tests in each submodule use closed-form synthetic evaluators; the
//!   integration test under `tests/` runs the full pipeline with realistic
//!   physical parameters.

pub mod evaluator;
pub mod generator;
pub mod length;
pub mod observe;
pub mod polarization;
pub mod postprocess;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::evaluator::{ModelEvaluator, ModelOutput};
pub use self::generator::{GRID_SPACING_RTOL, WaveformGenerator};
pub use self::length::{chirp_time_bound, length_in_time};
pub use self::observe::PipelineObserver;
pub use self::polarization::{PolarizationPair, Polarizations, Series};
pub use self::postprocess::{
    ConditioningReport, MAX_TARGET_SAMPLES, target_length, to_frequency_domain,
};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::evaluator::{ModelEvaluator, ModelOutput};
    pub use super::generator::WaveformGenerator;
    pub use super::length::length_in_time;
    pub use super::polarization::{PolarizationPair, Polarizations};
}
