//! rust_seobnr — SEOBNRv5 effective-one-body waveform shim with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that exposes
//! the waveform pipeline to Python via the `_rust_seobnr` extension module.
//! The pipeline adapts an external EOB model (injected as an evaluator) to a
//! gravitational-wave toolkit's flat-parameter waveform interface.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust module (`waveform`) as the public crate surface.
//! - Define `#[pyclass]` wrappers and the `#[pymodule]` initializer for the
//!   `_rust_seobnr` Python extension.
//! - Create and register the `waveforms` Python submodule under `rust_seobnr`
//!   so that dot-notation imports work as expected.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work is implemented in [`waveform`]; this file performs
//!   only FFI glue, option parsing, and error mapping.
//! - The Python evaluator is called with the GIL held and must not retain the
//!   parameter dict beyond the call.
//!
//! Conventions
//! -----------
//! - Caller parameters arrive as `**kwargs` in toolkit units (M☉, Mpc, rad,
//!   Hz, s); `None` values are treated as absent.
//! - Errors from core Rust code are propagated as [`waveform::WaveformError`]
//!   internally and converted to `ValueError` at the PyO3 boundary.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend on [`waveform`] directly and implement
//!   [`waveform::ModelEvaluator`] for its model binding.
//! - The Python packaging layer imports `_rust_seobnr` and plugs
//!   `SEOBNRGenerator.td` / `.fd` and `length_in_time` into the host toolkit's
//!   plugin registry.
//!
//! Testing notes
//! -------------
//! - Core behavior is covered by unit tests in the inner modules and by the
//!   Rust integration test in `tests/`.
//! - The PyO3 layer is exercised by Python smoke tests against a pure-Python
//!   evaluator.

pub mod utils;
pub mod waveform;

#[cfg(feature = "python-bindings")]
use numpy::ToPyArray;

#[cfg(feature = "python-bindings")]
use pyo3::{
    exceptions::PyValueError,
    prelude::*,
    types::{PyAny, PyDict},
};

#[cfg(feature = "python-bindings")]
use crate::{
    utils::{PyModelEvaluator, extract_param_dict},
    waveform::{
        core::{
            modes::ModeKey,
            options::{Domain, EccentricityPolicy, GenerationConfig, ModeSelection},
        },
        models::{
            generator::WaveformGenerator, length::length_in_time as estimate_length,
            polarization::Polarizations,
        },
    },
};

/// SEOBNRGenerator — Python-facing waveform generator around a model callable.
///
/// Purpose
/// -------
/// Expose [`WaveformGenerator`] to Python, with the EOB model supplied as a
/// Python callable wrapped in [`PyModelEvaluator`].
///
/// Key behaviors
/// -------------
/// - Parse generation options into a validated [`GenerationConfig`].
/// - `td(**params)` / `fd(**params)` run the time- or frequency-domain
///   pipeline; `generate(**params)` uses the configured domain.
///
/// Parameters
/// ----------
/// Constructed from Python via `SEOBNRGenerator(evaluator, ...)`:
/// - `evaluator`: callable
///   Receives one `dict` in the model convention and returns either
///   `(hp, hc, delta_t, epoch)` or `{"times": ..., "modes": {"2,2": ...}}`.
/// - `domain`: `str`
///   `"time"` (default) or `"frequency"`; selects what `generate` returns.
/// - `higher_modes`: `bool`
///   Request every mode the model provides instead of the dominant (2, 2).
/// - `mode_array`: `list[tuple[int, int]] | None`
///   Explicit m ≥ 0 mode list; overrides `higher_modes`.
/// - `include_odd_modes`: `bool`
///   Keep odd-m modes (default `True`).
/// - `lmax_nyquist`: `int | None`
///   Forwarded to the model; `None` omits the key.
/// - `postadiabatic`: `bool`
///   Forwarded to the model.
/// - `zero_eccentricity_if_absent`: `bool`
///   Substitute 0.0 for missing `eccentricity` / `rel_anomaly`.
/// - `taper`: `bool`
///   Taper the inspiral start before the FFT (default `True`).
/// - `verbose`: `bool`
///   Log each stage to stderr when built with `obs_slog`.
///
/// Fields
/// ------
/// - `inner`: [`WaveformGenerator<PyModelEvaluator>`]
///   Immutable generator shared by every call.
///
/// Invariants
/// ----------
/// - The configuration requests at least one mode and only m ≥ 0 keys.
///
/// Notes
/// -----
/// - Native Rust code should use [`WaveformGenerator`] with its own
///   [`waveform::ModelEvaluator`] implementation.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_seobnr.waveforms")]
pub struct SEOBNRGenerator {
    inner: WaveformGenerator<PyModelEvaluator>,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl SEOBNRGenerator {
    #[new]
    #[pyo3(
        text_signature = "(evaluator, /, domain='time', higher_modes=False, mode_array=None, \
                          include_odd_modes=True, lmax_nyquist=1, postadiabatic=False, \
                          zero_eccentricity_if_absent=False, taper=True, verbose=False)",
        signature = (
            evaluator,
            domain = "time",
            higher_modes = false,
            mode_array = None,
            include_odd_modes = true,
            lmax_nyquist = Some(1),
            postadiabatic = false,
            zero_eccentricity_if_absent = false,
            taper = true,
            verbose = false
        )
    )]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        evaluator: &Bound<'_, PyAny>, domain: &str, higher_modes: bool,
        mode_array: Option<Vec<(i32, i32)>>, include_odd_modes: bool, lmax_nyquist: Option<u32>,
        postadiabatic: bool, zero_eccentricity_if_absent: bool, taper: bool, verbose: bool,
    ) -> PyResult<SEOBNRGenerator> {
        let domain = match domain {
            "time" | "td" => Domain::Time,
            "frequency" | "fd" => Domain::Frequency,
            other => {
                return Err(PyValueError::new_err(format!(
                    "domain must be 'time' or 'frequency', got {other:?}"
                )));
            }
        };

        let mode_selection = match mode_array {
            Some(pairs) => {
                let keys = pairs
                    .into_iter()
                    .map(|(l, m)| ModeKey::new(l, m))
                    .collect::<Result<Vec<_>, _>>()?;
                ModeSelection::HigherModes(keys)
            }
            None if higher_modes => ModeSelection::all_model_modes(),
            None => ModeSelection::Dominant,
        };

        let config = GenerationConfig {
            domain,
            mode_selection,
            include_odd_modes,
            lmax_nyquist,
            postadiabatic,
            eccentricity_policy: if zero_eccentricity_if_absent {
                EccentricityPolicy::ZeroIfAbsent
            } else {
                EccentricityPolicy::Required
            },
            taper,
            verbose,
        };

        let evaluator = PyModelEvaluator::new(evaluator)?;
        Ok(SEOBNRGenerator { inner: WaveformGenerator::new(evaluator, config)? })
    }

    /// Time-domain `(h₊, h×)` sampled at `delta_t`.
    #[pyo3(signature = (**params))]
    pub fn td(&self, params: Option<&Bound<'_, PyDict>>) -> PyResult<WaveformPolarizations> {
        let params = extract_param_dict(params)?;
        let pair = self.inner.generate_td(&params)?;
        Ok(WaveformPolarizations { inner: Polarizations::Time(pair) })
    }

    /// Frequency-domain `(h̃₊, h̃×)` on the `delta_f` grid.
    #[pyo3(signature = (**params))]
    pub fn fd(&self, params: Option<&Bound<'_, PyDict>>) -> PyResult<WaveformPolarizations> {
        let params = extract_param_dict(params)?;
        let pair = self.inner.generate_fd(&params)?;
        Ok(WaveformPolarizations { inner: Polarizations::Frequency(pair) })
    }

    /// Polarizations in the configured domain.
    #[pyo3(signature = (**params))]
    pub fn generate(&self, params: Option<&Bound<'_, PyDict>>) -> PyResult<WaveformPolarizations> {
        let params = extract_param_dict(params)?;
        Ok(WaveformPolarizations { inner: self.inner.generate(&params)? })
    }

    /// The modes requested from the model, as `(l, m)` tuples.
    #[getter]
    pub fn mode_array(&self) -> Vec<(i32, i32)> {
        self.inner.config().requested_modes().iter().map(|k| (k.l(), k.m())).collect()
    }
}

/// WaveformPolarizations — Python-facing container for one generated waveform.
///
/// Purpose
/// -------
/// Hand a [`Polarizations`] value back to Python as numpy arrays plus the
/// metadata a toolkit series needs.
///
/// Fields
/// ------
/// - `inner`: [`Polarizations`]
///   Time-domain (real) or frequency-domain (complex) plus / cross pair.
///
/// Performance
/// -----------
/// - Each `hp` / `hc` access copies the samples into a fresh numpy array.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_seobnr.waveforms")]
pub struct WaveformPolarizations {
    inner: Polarizations,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl WaveformPolarizations {
    /// `"time"` or `"frequency"`.
    #[getter]
    pub fn domain(&self) -> &'static str {
        match self.inner {
            Polarizations::Time(_) => "time",
            Polarizations::Frequency(_) => "frequency",
        }
    }

    #[getter]
    pub fn hp(&self, py: Python<'_>) -> PyObject {
        match &self.inner {
            Polarizations::Time(pair) => pair.plus().data().to_pyarray(py).into_any().unbind(),
            Polarizations::Frequency(pair) => {
                pair.plus().data().to_pyarray(py).into_any().unbind()
            }
        }
    }

    #[getter]
    pub fn hc(&self, py: Python<'_>) -> PyObject {
        match &self.inner {
            Polarizations::Time(pair) => pair.cross().data().to_pyarray(py).into_any().unbind(),
            Polarizations::Frequency(pair) => {
                pair.cross().data().to_pyarray(py).into_any().unbind()
            }
        }
    }

    /// Sample spacing in seconds; `None` for frequency-domain output.
    #[getter]
    pub fn delta_t(&self) -> Option<f64> {
        match &self.inner {
            Polarizations::Time(pair) => Some(pair.plus().delta_t()),
            Polarizations::Frequency(_) => None,
        }
    }

    /// Bin spacing in hertz; `None` for time-domain output.
    #[getter]
    pub fn delta_f(&self) -> Option<f64> {
        match &self.inner {
            Polarizations::Time(_) => None,
            Polarizations::Frequency(pair) => Some(pair.plus().delta_f()),
        }
    }

    /// Time of the first sample (time domain) or the series epoch after the
    /// cyclic shift (frequency domain), in seconds.
    #[getter]
    pub fn epoch(&self) -> f64 {
        match &self.inner {
            Polarizations::Time(pair) => pair.epoch(),
            Polarizations::Frequency(pair) => pair.epoch(),
        }
    }

    #[getter]
    pub fn template_duration(&self) -> Option<f64> {
        match &self.inner {
            Polarizations::Time(pair) => pair.template_duration(),
            Polarizations::Frequency(pair) => pair.template_duration(),
        }
    }

    pub fn __len__(&self) -> usize {
        match &self.inner {
            Polarizations::Time(pair) => pair.len(),
            Polarizations::Frequency(pair) => pair.len(),
        }
    }
}

/// Upper-bound duration in seconds of the signal from `f_lower` to ringdown.
///
/// Requires `mass1`, `mass2`, `f_lower`; reads `spin1z` / `spin2z` when
/// present. The model is not evaluated.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (**params))]
pub fn length_in_time(params: Option<&Bound<'_, PyDict>>) -> PyResult<f64> {
    let params = extract_param_dict(params)?;
    Ok(estimate_length(&params)?)
}

/// _rust_seobnr — PyO3 module initializer for the Python extension.
///
/// Purpose
/// -------
/// Define the `_rust_seobnr` Python module and register its `waveforms`
/// submodule used by the public `rust_seobnr` package.
///
/// Key behaviors
/// -------------
/// - Create the `waveforms` submodule holding [`SEOBNRGenerator`],
///   [`WaveformPolarizations`], and [`length_in_time`].
/// - Register the submodule in `sys.modules` so it is importable via a dotted
///   path from Python.
///
/// Errors
/// ------
/// - `PyErr`
///   If creating the submodule or manipulating `sys.modules` fails.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_seobnr<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let waveforms_mod = PyModule::new(_py, "waveforms")?;
    waveforms(_py, m, &waveforms_mod)?;

    // Manually add the submodule into sys.modules to allow for dot notation.
    _py.import("sys")?.getattr("modules")?.set_item("rust_seobnr.waveforms", waveforms_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn waveforms<'py>(
    _py: Python, rust_seobnr: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<SEOBNRGenerator>()?;
    m.add_class::<WaveformPolarizations>()?;
    m.add_function(wrap_pyfunction!(length_in_time, m)?)?;
    rust_seobnr.add_submodule(m)?;
    Ok(())
}
