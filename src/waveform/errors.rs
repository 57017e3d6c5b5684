//! waveform::errors — error taxonomy for parameter translation, mode
//! synthesis, and post-processing.
//!
//! Purpose
//! -------
//! Provide a single error enum, [`WaveformError`], and its result alias
//! [`WaveformResult`] for every stage of the waveform pipeline, together with
//! the conversion into Python exceptions used by the PyO3 bindings.
//!
//! Key behaviors
//! -------------
//! - Distinguish caller mistakes (missing or invalid parameters, coarse
//!   frequency resolution) from contract violations by the external model
//!   evaluator (malformed mode keys, inconsistent grids).
//! - Attach the offending key / value / length to each variant so messages
//!   are actionable without a debugger.
//! - Map every variant to a Python `ValueError` at the FFI boundary.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every failure is fatal for the current call: no partial polarizations
//!   are ever returned and nothing is retried internally. Re-running a
//!   deterministic model with the same parameters cannot change the outcome.
//!
//! Testing notes
//! -------------
//! - Unit tests check that `Display` messages embed their payloads.
//!   The `PyErr` conversion is exercised by Python-level tests.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Crate-wide result alias for waveform operations that may produce
/// [`WaveformError`].
pub type WaveformResult<T> = Result<T, WaveformError>;

/// Unified error type for the waveform pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum WaveformError {
    // ---- Caller parameters ----
    /// A required parameter key is absent from the input dictionary.
    MissingParameter { key: String },

    /// A parameter is present but unusable (wrong kind, non-finite, or out of
    /// range).
    InvalidParameter { key: String, value: String, reason: &'static str },

    /// Input violates the aligned-spin / bound-orbit precondition.
    UnsupportedSpinConfiguration { reason: String },

    // ---- Model evaluator contract ----
    /// A mode key could not be parsed as `(ℓ, m)` with ℓ ≥ 2 and |m| ≤ ℓ.
    MalformedModeKey { key: String, reason: &'static str },

    /// A mode (or the time grid) has a different length than the rest.
    InconsistentModeGrid { mode: String, expected: usize, actual: usize },

    /// The evaluator returned no modes at all (after mode selection).
    EmptyModeSet,

    /// Pre-projected plus / cross series have different lengths.
    PolarizationLengthMismatch { plus: usize, cross: usize },

    /// The converted time-grid spacing disagrees with the requested `delta_t`.
    TimeGridMismatch { expected: f64, actual: f64 },

    /// The external evaluator itself reported a failure.
    EvaluatorFailed { reason: String },

    // ---- Post-processing ----
    /// The requested frequency spacing cannot hold the whole waveform.
    InsufficientFrequencyResolution { required: usize, available: usize },
}

impl std::error::Error for WaveformError {}

impl std::fmt::Display for WaveformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Caller parameters ----
            WaveformError::MissingParameter { key } => {
                write!(f, "Required parameter '{key}' is missing.")
            }
            WaveformError::InvalidParameter { key, value, reason } => {
                write!(f, "Parameter '{key}' has invalid value {value}: {reason}")
            }
            WaveformError::UnsupportedSpinConfiguration { reason } => {
                write!(f, "Unsupported spin/orbit configuration: {reason}")
            }
            // ---- Model evaluator contract ----
            WaveformError::MalformedModeKey { key, reason } => {
                write!(f, "Malformed mode key {key:?}: {reason}")
            }
            WaveformError::InconsistentModeGrid { mode, expected, actual } => {
                write!(
                    f,
                    "Mode {mode} has {actual} samples but the common grid has {expected}."
                )
            }
            WaveformError::EmptyModeSet => {
                write!(f, "Model evaluator returned no usable modes.")
            }
            WaveformError::PolarizationLengthMismatch { plus, cross } => {
                write!(
                    f,
                    "Plus and cross polarizations differ in length: plus {plus}, cross {cross}"
                )
            }
            WaveformError::TimeGridMismatch { expected, actual } => {
                write!(
                    f,
                    "Model time grid spacing {actual} s does not match requested delta_t {expected} s."
                )
            }
            WaveformError::EvaluatorFailed { reason } => {
                write!(f, "Model evaluator failed: {reason}")
            }
            // ---- Post-processing ----
            WaveformError::InsufficientFrequencyResolution { required, available } => {
                write!(
                    f,
                    "Waveform needs {required} samples but delta_f allows only {available}; \
                     request a finer delta_f or a higher f_lower."
                )
            }
        }
    }
}

/// Convert a [`WaveformError`] into a Python `ValueError` with the error
/// message.
#[cfg(feature = "python-bindings")]
impl From<WaveformError> for PyErr {
    fn from(err: WaveformError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
