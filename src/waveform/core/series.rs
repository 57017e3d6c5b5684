//! Uniformly sampled time- and frequency-series containers.
//!
//! Purpose
//! -------
//! Provide the small container surface the post-processor needs: sample data
//! tagged with a spacing and an epoch, zero-padding, a scaled real FFT, and a
//! cyclic time shift applied in the frequency domain.
//!
//! Key behaviors
//! -------------
//! - [`TimeSeries`] holds real samples with spacing `delta_t` (s) and epoch
//!   (GPS-relative start time, s).
//! - [`FrequencySeries`] holds complex one-sided spectrum samples with
//!   spacing `delta_f` (Hz) and the epoch of the time series it came from.
//! - [`TimeSeries::to_frequencyseries`] computes `Δt · FFT(x)` over the
//!   non-negative frequencies, the continuous-transform normalisation.
//! - [`FrequencySeries::cyclic_time_shift`] delays the underlying signal by
//!   `dt` seconds (multiplying by `exp(−2πi f dt)`) and moves the epoch back
//!   by `dt` so sample times of features are unchanged.
//!
//! Invariants & assumptions
//! ------------------------
//! - `delta_t > 0` / `delta_f > 0`; checked by the constructors.
//! - Containers own their data; operations return new values or mutate in
//!   place, never share buffers.
use crate::waveform::errors::{WaveformError, WaveformResult};
use ndarray::{Array1, s};
use num_complex::Complex64;
use rustfft::FftPlanner;
use std::f64::consts::PI;

/// Real-valued, uniformly sampled time series.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    data: Array1<f64>,
    delta_t: f64,
    epoch: f64,
}

impl TimeSeries {
    /// Build a time series.
    ///
    /// # Errors
    /// - [`WaveformError::InvalidParameter`] if `delta_t` is not finite and
    ///   positive or `epoch` is not finite.
    pub fn new(data: Array1<f64>, delta_t: f64, epoch: f64) -> WaveformResult<Self> {
        check_spacing("delta_t", delta_t)?;
        check_epoch(epoch)?;
        Ok(TimeSeries { data, delta_t, epoch })
    }

    pub fn data(&self) -> &Array1<f64> {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut Array1<f64> {
        &mut self.data
    }

    pub fn into_data(self) -> Array1<f64> {
        self.data
    }

    pub fn delta_t(&self) -> f64 {
        self.delta_t
    }

    pub fn epoch(&self) -> f64 {
        self.epoch
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Length in seconds, `len · delta_t`.
    pub fn duration(&self) -> f64 {
        self.data.len() as f64 * self.delta_t
    }

    /// Time stamp of every sample, `epoch + i · delta_t`.
    pub fn sample_times(&self) -> Array1<f64> {
        Array1::from_iter((0..self.data.len()).map(|i| self.epoch + i as f64 * self.delta_t))
    }

    /// Zero-pad (or truncate) at the end to `len` samples. The epoch is
    /// unchanged.
    pub fn resize(&mut self, len: usize) {
        let current = self.data.len();
        if len == current {
            return;
        }
        let mut out = Array1::<f64>::zeros(len);
        let keep = current.min(len);
        out.slice_mut(s![..keep]).assign(&self.data.slice(s![..keep]));
        self.data = out;
    }

    /// One-sided spectrum `Δt · Σ_k x_k e^{−2πi jk/N}` for `j = 0..=N/2`.
    ///
    /// The result has `N/2 + 1` samples spaced `1/(N Δt)` and keeps this
    /// series' epoch.
    pub fn to_frequencyseries(&self) -> FrequencySeries {
        let n = self.data.len();
        let mut buf: Vec<Complex64> = self.data.iter().map(|&x| Complex64::new(x, 0.0)).collect();
        if n > 0 {
            let mut planner = FftPlanner::<f64>::new();
            let fft = planner.plan_fft_forward(n);
            fft.process(&mut buf);
        }
        let n_freq = n / 2 + 1;
        let dt = self.delta_t;
        let data = Array1::from_iter(buf.into_iter().take(n_freq).map(|c| c * dt));
        let delta_f = if n > 0 { 1.0 / (n as f64 * dt) } else { 1.0 / dt };
        FrequencySeries { data, delta_f, epoch: self.epoch }
    }
}

/// Complex, uniformly sampled one-sided frequency series.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencySeries {
    data: Array1<Complex64>,
    delta_f: f64,
    epoch: f64,
}

impl FrequencySeries {
    /// Build a frequency series.
    ///
    /// # Errors
    /// - [`WaveformError::InvalidParameter`] if `delta_f` is not finite and
    ///   positive or `epoch` is not finite.
    pub fn new(data: Array1<Complex64>, delta_f: f64, epoch: f64) -> WaveformResult<Self> {
        check_spacing("delta_f", delta_f)?;
        check_epoch(epoch)?;
        Ok(FrequencySeries { data, delta_f, epoch })
    }

    pub fn data(&self) -> &Array1<Complex64> {
        &self.data
    }

    pub fn into_data(self) -> Array1<Complex64> {
        self.data
    }

    pub fn delta_f(&self) -> f64 {
        self.delta_f
    }

    pub fn epoch(&self) -> f64 {
        self.epoch
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Frequency of every sample, `j · delta_f`.
    pub fn sample_frequencies(&self) -> Array1<f64> {
        Array1::from_iter((0..self.data.len()).map(|j| j as f64 * self.delta_f))
    }

    /// Delay the signal cyclically by `dt` seconds.
    ///
    /// Multiplies sample `j` by `exp(−2πi j Δf dt)` and sets
    /// `epoch ← epoch − dt`. Sub-sample shifts are allowed.
    pub fn cyclic_time_shift(&mut self, dt: f64) {
        let df = self.delta_f;
        for (j, value) in self.data.iter_mut().enumerate() {
            let phase = -2.0 * PI * j as f64 * df * dt;
            *value *= Complex64::from_polar(1.0, phase);
        }
        self.epoch -= dt;
    }
}

fn check_spacing(key: &str, value: f64) -> WaveformResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(WaveformError::InvalidParameter {
            key: key.to_string(),
            value: value.to_string(),
            reason: "sample spacing must be finite and > 0",
        });
    }
    Ok(())
}

fn check_epoch(epoch: f64) -> WaveformResult<()> {
    if !epoch.is_finite() {
        return Err(WaveformError::InvalidParameter {
            key: "epoch".to_string(),
            value: epoch.to_string(),
            reason: "epoch must be finite",
        });
    }
    Ok(())
}
