//! Polarization pairs returned by the generator.
use crate::waveform::{
    core::series::{FrequencySeries, TimeSeries},
    errors::{WaveformError, WaveformResult},
};

/// Common surface of the two series kinds a pair can hold.
pub trait Series {
    fn len(&self) -> usize;
    fn epoch(&self) -> f64;
    /// Sample spacing: `delta_t` for time series, `delta_f` for frequency
    /// series.
    fn spacing(&self) -> f64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Series for TimeSeries {
    fn len(&self) -> usize {
        TimeSeries::len(self)
    }

    fn epoch(&self) -> f64 {
        TimeSeries::epoch(self)
    }

    fn spacing(&self) -> f64 {
        self.delta_t()
    }
}

impl Series for FrequencySeries {
    fn len(&self) -> usize {
        FrequencySeries::len(self)
    }

    fn epoch(&self) -> f64 {
        FrequencySeries::epoch(self)
    }

    fn spacing(&self) -> f64 {
        self.delta_f()
    }
}

/// `PolarizationPair` — plus and cross series on one grid.
///
/// Invariants
/// ----------
/// - `plus` and `cross` have the same length, spacing, and epoch.
/// - `template_duration` is set only by the frequency-domain post-processor
///   and holds the unpadded signal length in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct PolarizationPair<S> {
    plus: S,
    cross: S,
    template_duration: Option<f64>,
}

impl<S: Series> PolarizationPair<S> {
    /// Pair two series.
    ///
    /// # Errors
    /// - [`WaveformError::PolarizationLengthMismatch`] if the lengths differ.
    /// - [`WaveformError::InvalidParameter`] if spacing or epoch differ.
    pub fn new(plus: S, cross: S) -> WaveformResult<Self> {
        if plus.len() != cross.len() {
            return Err(WaveformError::PolarizationLengthMismatch {
                plus: plus.len(),
                cross: cross.len(),
            });
        }
        if plus.spacing() != cross.spacing() || plus.epoch() != cross.epoch() {
            return Err(WaveformError::InvalidParameter {
                key: "cross".to_string(),
                value: format!("spacing {} epoch {}", cross.spacing(), cross.epoch()),
                reason: "plus and cross must share spacing and epoch",
            });
        }
        Ok(PolarizationPair { plus, cross, template_duration: None })
    }

    pub fn with_template_duration(mut self, seconds: f64) -> Self {
        self.template_duration = Some(seconds);
        self
    }

    pub fn plus(&self) -> &S {
        &self.plus
    }

    pub fn cross(&self) -> &S {
        &self.cross
    }

    pub fn template_duration(&self) -> Option<f64> {
        self.template_duration
    }

    pub fn len(&self) -> usize {
        self.plus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plus.is_empty()
    }

    pub fn epoch(&self) -> f64 {
        self.plus.epoch()
    }

    pub fn into_parts(self) -> (S, S) {
        (self.plus, self.cross)
    }
}

/// Output of `WaveformGenerator::generate`, tagged by domain.
#[derive(Debug, Clone, PartialEq)]
pub enum Polarizations {
    Time(PolarizationPair<TimeSeries>),
    Frequency(PolarizationPair<FrequencySeries>),
}
