//! waveform — SEOBNRv5EHM adaptation shim: core numerics, generation, errors.
//!
//! Purpose
//! -------
//! Bridge a gravitational-wave toolkit's waveform interface (flat parameter
//! dictionaries, time/frequency series out) and an external effective-one-body
//! model that speaks its own parameter convention and returns spherical-
//! harmonic modes in geometric units.
//!
//! Key behaviors
//! -------------
//! - [`core`] holds parameter translation, mode keys and sets, negative-m
//!   reconstruction, spin-weighted harmonics, projection, unit conversion,
//!   sample containers, and the start taper.
//! - [`models`] holds the [`ModelEvaluator`] seam, the [`WaveformGenerator`]
//!   pipeline, frequency-domain conditioning, and the duration estimate.
//! - [`errors`] defines [`WaveformError`] / [`WaveformResult`], shared by every
//!   stage.
//!
//! Invariants & assumptions
//! ------------------------
//! - Only aligned-spin, bound-orbit (0 ≤ e ≤ 1) systems are accepted.
//! - All data are created per call and handed to the caller on return; there
//!   is no global or cached state.
//!
//! Conventions
//! -----------
//! - Caller units: M☉, Mpc, rad, Hz, s. Model units: geometric (G = c = 1,
//!   lengths and times in units of the total mass M).
//! - `h₊ − i h× = Σ_ℓm ₋₂Y_ℓm(ι, π/2 − φ_ref) h_ℓm`.
//!
//! Downstream usage
//! ----------------
//! - Typical flow:
//!   1. Implement [`ModelEvaluator`] for the model binding.
//!   2. Build a [`GenerationConfig`] (or use `Default`).
//!   3. `WaveformGenerator::new(evaluator, config)?` then
//!      `generate_td(&params)` / `generate_fd(&params)`.
//! - Python bindings import from this module (or its [`prelude`]) and rely on
//!   the `WaveformError → PyErr` conversion in [`errors`].
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each submodule; `tests/` exercises the full
//!   pipeline through this public surface.

pub mod core;
pub mod errors;
pub mod models;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::{
    Domain, EccentricityPolicy, FrequencySeries, GenerationConfig, ModeKey, ModeSelection,
    ModeSet, ObserverDirection, ParamDict, ParamValue, PhysicalScale, TimeSeries, keys,
    project_modes, reconstruct_negative_modes, spin_weighted_ylm, translate,
};

pub use self::errors::{WaveformError, WaveformResult};

pub use self::models::{
    ModelEvaluator, ModelOutput, PolarizationPair, Polarizations, WaveformGenerator,
    length_in_time, to_frequency_domain,
};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_seobnr::waveform::prelude::*;
//
// to import the main waveform surface in a single line.

pub mod prelude {
    pub use super::{
        Domain, EccentricityPolicy, FrequencySeries, GenerationConfig, ModeKey, ModeSelection,
        ModeSet, ModelEvaluator, ModelOutput, ParamDict, ParamValue, PolarizationPair,
        Polarizations, TimeSeries, WaveformError, WaveformGenerator, WaveformResult, keys,
        length_in_time,
    };
}
