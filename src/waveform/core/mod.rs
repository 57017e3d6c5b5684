//! core — parameter translation, mode algebra, projection, and unit scaling.
//!
//! Purpose
//! -------
//! Collect the numerical and structural building blocks of the EOB waveform
//! shim: caller ↔ model parameter dictionaries, validated mode keys and mode
//! sets, spin-weighted spherical harmonics, projection onto an observer,
//! geometric ↔ SI conversion, sample containers, and the start taper. The
//! generator in `waveform::models` wires these together around an external
//! model evaluator.
//!
//! Key behaviors
//! -------------
//! - Translate caller parameters to the model convention ([`translate`]) under
//!   an explicit [`GenerationConfig`].
//! - Reconstruct negative-m modes from aligned-spin symmetry
//!   ([`reconstruct_negative_modes`]) and project a complete [`ModeSet`] onto
//!   an [`ObserverDirection`] ([`project_modes`]).
//! - Convert time, amplitude, and frequency between geometric and SI units
//!   via [`PhysicalScale`].
//! - Provide [`TimeSeries`] / [`FrequencySeries`] with the resize, FFT, and
//!   cyclic-shift primitives used by the frequency-domain post-processor, and
//!   the Planck start taper ([`taper_start`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - Mode keys satisfy ℓ ≥ 2 and |m| ≤ ℓ; mode sets are non-empty and share one
//!   sample grid.
//! - Negative-m reconstruction is only valid for aligned spins; callers check
//!   [`validate_aligned_spin`] first.
//! - Masses, distance, and sample spacings are finite and strictly positive
//!   once they leave the translator or the unit/series constructors.
//!
//! Conventions
//! -----------
//! - Masses in solar masses, distance in Mpc at the API and metres inside
//!   [`PhysicalScale`], angles in radians, times in seconds, frequencies in
//!   Hz.
//! - Projection uses azimuth `π/2 − φ_ref` and `h₊ − i h× = Σ ₋₂Y_ℓm h_ℓm`.
//! - This module performs no I/O and no logging; errors are reported as
//!   [`WaveformResult`](crate::waveform::errors::WaveformResult).
//!
//! Testing notes
//! -------------
//! - Unit tests in each submodule cover key mapping and error paths,
//!   mode-key parsing and grid validation, the negative-m symmetry, harmonic
//!   closed forms and identities, face-on / edge-on projections, unit
//!   round-trips, FFT normalisation and cyclic shifts, and taper placement.

pub mod harmonics;
pub mod modes;
pub mod options;
pub mod params;
pub mod projection;
pub mod series;
pub mod taper;
pub mod translate;
pub mod units;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::harmonics::{STRAIN_SPIN_WEIGHT, spin_weighted_ylm, strain_harmonic};
pub use self::modes::{DOMINANT_MODE, ModeKey, ModeSet, reconstruct_negative_modes};
pub use self::options::{Domain, EccentricityPolicy, GenerationConfig, ModeSelection};
pub use self::params::{ParamDict, ParamValue, keys};
pub use self::projection::{ObserverDirection, observed_strain, project_modes};
pub use self::series::{FrequencySeries, TimeSeries};
pub use self::taper::{TaperOutcome, taper_start};
pub use self::translate::{
    OrbitalInitialConditions, resolve_orbit, translate, translate_with_orbit,
};
pub use self::units::{PhysicalScale, geometric_angular_frequency};
pub use self::validation::{
    validate_aligned_spin, validate_eccentricity, validate_spin_magnitudes,
};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_seobnr::waveform::core::prelude::*;
//
// to import the main core surface in a single line.

pub mod prelude {
    pub use super::modes::{ModeKey, ModeSet};
    pub use super::options::{Domain, EccentricityPolicy, GenerationConfig, ModeSelection};
    pub use super::params::{ParamDict, ParamValue, keys};
    pub use super::projection::ObserverDirection;
    pub use super::series::{FrequencySeries, TimeSeries};
    pub use super::units::PhysicalScale;
}
