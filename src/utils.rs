//! Python ↔ Rust conversion helpers for the `_rust_seobnr` bindings.
//!
//! - Array extraction accepting numpy arrays, objects with `to_numpy`, and
//!   plain sequences.
//! - `**kwargs` ↔ [`ParamDict`] conversion.
//! - [`PyModelEvaluator`], which adapts a Python callable to
//!   [`ModelEvaluator`].
#[cfg(feature = "python-bindings")]
use ndarray::Array1;

#[cfg(feature = "python-bindings")]
use num_complex::Complex64;

#[cfg(feature = "python-bindings")]
use pyo3::{
    exceptions::PyTypeError,
    prelude::*,
    types::{PyAny, PyBool, PyDict, PyFloat, PyInt, PyList, PyString, PyTuple},
};

#[cfg(feature = "python-bindings")]
use crate::waveform::{
    core::{
        modes::ModeSet,
        params::{ParamDict, ParamValue},
    },
    errors::{WaveformError, WaveformResult},
    models::evaluator::{ModelEvaluator, ModelOutput},
};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
};

#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        PyTypeError::new_err("expected a 1-D numpy.ndarray or sequence of float64")
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Copy a 1-D real array-like into an owned `Array1<f64>`.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_owned<'py>(py: Python<'py>, raw_data: &Bound<'py, PyAny>) -> PyResult<Array1<f64>> {
    let arr = extract_f64_array(py, raw_data)?;
    Ok(arr.as_array().to_owned())
}

/// Copy a 1-D complex array-like into an owned `Array1<Complex64>`.
#[cfg(feature = "python-bindings")]
pub fn extract_complex_array<'py>(raw_data: &Bound<'py, PyAny>) -> PyResult<Array1<Complex64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<Complex64>>() {
        return Ok(arr_ro.as_array().to_owned());
    }
    let vec: Vec<Complex64> = raw_data.extract().map_err(|_| {
        PyTypeError::new_err("expected a 1-D numpy.ndarray or sequence of complex128")
    })?;
    Ok(Array1::from(vec))
}

/// Convert Python keyword arguments into a [`ParamDict`].
///
/// `None` values are skipped so that callers passing the host toolkit's full
/// default set (e.g. `delta_f=None` for time-domain calls) behave as if the
/// key were absent. `bool` is checked before `int` because Python booleans
/// are integers.
#[cfg(feature = "python-bindings")]
pub fn extract_param_dict(kwargs: Option<&Bound<'_, PyDict>>) -> PyResult<ParamDict> {
    let mut params = ParamDict::new();
    let Some(kwargs) = kwargs else {
        return Ok(params);
    };
    for (key, value) in kwargs.iter() {
        let key: String = key.extract()?;
        if value.is_none() {
            continue;
        }
        let parsed = if value.is_instance_of::<PyBool>() {
            ParamValue::Bool(value.extract()?)
        } else if value.is_instance_of::<PyInt>() {
            ParamValue::Int(value.extract()?)
        } else if value.is_instance_of::<PyFloat>() {
            ParamValue::Real(value.extract()?)
        } else if value.is_instance_of::<PyString>() {
            ParamValue::Text(value.extract()?)
        } else if let Ok(real) = value.extract::<f64>() {
            // numpy scalars and other objects implementing __float__
            ParamValue::Real(real)
        } else {
            return Err(PyTypeError::new_err(format!(
                "parameter {key:?} must be a number, bool, or str"
            )));
        };
        params.insert(key, parsed);
    }
    Ok(params)
}

/// Convert a model-convention [`ParamDict`] into a Python `dict`. Mode lists
/// become lists of `(l, m)` tuples.
#[cfg(feature = "python-bindings")]
pub fn param_dict_to_py<'py>(py: Python<'py>, params: &ParamDict) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    for (key, value) in params.iter() {
        match value {
            ParamValue::Real(v) => dict.set_item(key, *v)?,
            ParamValue::Int(v) => dict.set_item(key, *v)?,
            ParamValue::Bool(v) => dict.set_item(key, *v)?,
            ParamValue::Text(v) => dict.set_item(key, v.as_str())?,
            ParamValue::Modes(modes) => {
                let pairs: Vec<(i32, i32)> = modes.iter().map(|k| (k.l(), k.m())).collect();
                dict.set_item(key, PyList::new(py, pairs)?)?
            }
        }
    }
    Ok(dict)
}

/// Adapter that lets a Python callable act as the EOB model.
///
/// The callable receives one positional `dict` in the model convention and
/// returns either
/// - a tuple `(hp, hc, delta_t, epoch)` of SI polarizations, or
/// - a mapping `{"times": array, "modes": {"2,2": complex array, ...}}` with
///   geometric-unit modes; mode keys may also be `(l, m)` tuples.
#[cfg(feature = "python-bindings")]
#[derive(Debug)]
pub struct PyModelEvaluator {
    callable: Py<PyAny>,
}

#[cfg(feature = "python-bindings")]
impl PyModelEvaluator {
    /// Wrap `callable`.
    ///
    /// # Errors
    /// - `TypeError` if the object is not callable.
    pub fn new(callable: &Bound<'_, PyAny>) -> PyResult<Self> {
        if !callable.is_callable() {
            return Err(PyTypeError::new_err("evaluator must be callable"));
        }
        Ok(PyModelEvaluator { callable: callable.clone().unbind() })
    }
}

#[cfg(feature = "python-bindings")]
impl ModelEvaluator for PyModelEvaluator {
    fn evaluate(&self, params: &ParamDict) -> WaveformResult<ModelOutput> {
        Python::with_gil(|py| {
            let kwargs = param_dict_to_py(py, params).map_err(evaluator_failed)?;
            let output = self.callable.bind(py).call1((kwargs,)).map_err(evaluator_failed)?;
            parse_model_output(py, &output)
        })
    }
}

#[cfg(feature = "python-bindings")]
fn evaluator_failed(err: PyErr) -> WaveformError {
    WaveformError::EvaluatorFailed { reason: err.to_string() }
}

#[cfg(feature = "python-bindings")]
fn parse_model_output<'py>(
    py: Python<'py>, output: &Bound<'py, PyAny>,
) -> WaveformResult<ModelOutput> {
    if let Ok(tuple) = output.downcast::<PyTuple>() {
        let (hp, hc, delta_t, epoch): (Bound<'py, PyAny>, Bound<'py, PyAny>, f64, f64) =
            tuple.extract().map_err(evaluator_failed)?;
        let plus = extract_f64_owned(py, &hp).map_err(evaluator_failed)?;
        let cross = extract_f64_owned(py, &hc).map_err(evaluator_failed)?;
        return ModelOutput::polarizations(plus, cross, delta_t, epoch);
    }

    let times_obj = output.get_item("times").map_err(evaluator_failed)?;
    let modes_obj = output.get_item("modes").map_err(evaluator_failed)?;
    let times = extract_f64_owned(py, &times_obj).map_err(evaluator_failed)?;
    let modes_dict = modes_obj.downcast::<PyDict>().map_err(|e| evaluator_failed(e.into()))?;

    let mut labelled = Vec::with_capacity(modes_dict.len());
    for (key, value) in modes_dict.iter() {
        let label = match key.extract::<(i32, i32)>() {
            Ok((l, m)) => format!("{l},{m}"),
            Err(_) => key.extract::<String>().map_err(evaluator_failed)?,
        };
        let data = extract_complex_array(&value).map_err(evaluator_failed)?;
        labelled.push((label, data));
    }
    ModelOutput::modes(times, ModeSet::from_labelled(labelled)?)
}
