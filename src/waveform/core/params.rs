//! Parameter dictionaries exchanged with the caller and the model evaluator.
//!
//! Purpose
//! -------
//! Represent the flat, string-keyed parameter mappings used on both sides of
//! the translator: the host toolkit's convention on input and the EOB model's
//! convention on output. Values are a small closed set of kinds so that
//! typed access can report precise errors instead of panicking.
//!
//! Key behaviors
//! -------------
//! - [`ParamDict`] is an ordered map `String → ParamValue`, rebuilt per call
//!   and never shared across calls.
//! - Typed getters (`require_f64`, `optional_f64`, …) turn absent keys into
//!   [`WaveformError::MissingParameter`] and wrong kinds / non-finite numbers
//!   into [`WaveformError::InvalidParameter`].
//!
//! Conventions
//! -----------
//! - Key names for both conventions live in [`keys`] so translator, generator
//!   and bindings never spell them twice.
//! - Integers are accepted wherever a real number is required (a caller
//!   passing `distance=400` means 400.0).
use crate::waveform::{
    core::modes::ModeKey,
    errors::{WaveformError, WaveformResult},
};
use std::collections::BTreeMap;

/// Parameter key names for the caller (host toolkit) and model conventions.
pub mod keys {
    // ---- Caller convention ----
    pub const MASS1: &str = "mass1";
    pub const MASS2: &str = "mass2";
    pub const SPIN1X: &str = "spin1x";
    pub const SPIN1Y: &str = "spin1y";
    pub const SPIN1Z: &str = "spin1z";
    pub const SPIN2X: &str = "spin2x";
    pub const SPIN2Y: &str = "spin2y";
    pub const SPIN2Z: &str = "spin2z";
    pub const DISTANCE: &str = "distance";
    pub const INCLINATION: &str = "inclination";
    pub const COA_PHASE: &str = "coa_phase";
    pub const F_LOWER: &str = "f_lower";
    pub const DELTA_T: &str = "delta_t";
    pub const DELTA_F: &str = "delta_f";
    pub const ECCENTRICITY: &str = "eccentricity";
    pub const REL_ANOMALY: &str = "rel_anomaly";

    // ---- Model convention ----
    pub const APPROXIMANT: &str = "approximant";
    pub const MODE_ARRAY: &str = "ModeArray";
    pub const PHI_REF: &str = "phi_ref";
    pub const F22_START: &str = "f22_start";
    pub const F_REF: &str = "f_ref";
    pub const DELTA_T_MODEL: &str = "deltaT";
    pub const DELTA_F_MODEL: &str = "deltaF";
    pub const POSTADIABATIC: &str = "postadiabatic";
    pub const H_0: &str = "h_0";
    pub const LMAX_NYQUIST: &str = "lmax_nyquist";
    pub const TOTAL_MASS: &str = "M";
    pub const MASS_RATIO: &str = "q";
    pub const CHI1: &str = "chi1";
    pub const CHI2: &str = "chi2";
    pub const OMEGA_START: &str = "omega_start";

    /// Spin components that must vanish for the aligned-spin symmetry.
    pub const IN_PLANE_SPINS: [&str; 4] = [SPIN1X, SPIN1Y, SPIN2X, SPIN2Y];
}

/// A single parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Real(f64),
    Int(i64),
    Bool(bool),
    Text(String),
    Modes(Vec<ModeKey>),
}

impl ParamValue {
    /// Numeric view of the value; integers widen to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Real(v) => Some(*v),
            ParamValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    fn describe(&self) -> String {
        match self {
            ParamValue::Real(v) => v.to_string(),
            ParamValue::Int(v) => v.to_string(),
            ParamValue::Bool(v) => v.to_string(),
            ParamValue::Text(v) => format!("{v:?}"),
            ParamValue::Modes(v) => format!("{} modes", v.len()),
        }
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Real(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Text(v)
    }
}

impl From<Vec<ModeKey>> for ParamValue {
    fn from(v: Vec<ModeKey>) -> Self {
        ParamValue::Modes(v)
    }
}

/// `ParamDict` — ordered, string-keyed parameter mapping.
///
/// Purpose
/// -------
/// Carry one waveform request's parameters in either naming convention.
///
/// Invariants
/// ----------
/// - Keys are unique; inserting an existing key replaces its value.
/// - Iteration order is lexicographic by key, so two dictionaries with the
///   same contents always translate identically.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamDict {
    entries: BTreeMap<String, ParamValue>,
}

impl ParamDict {
    pub fn new() -> Self {
        ParamDict { entries: BTreeMap::new() }
    }

    /// Insert or replace a value.
    pub fn insert<K: Into<String>, V: Into<ParamValue>>(&mut self, key: K, value: V) {
        self.entries.insert(key.into(), value.into());
    }

    /// Builder-style [`ParamDict::insert`].
    pub fn with<K: Into<String>, V: Into<ParamValue>>(mut self, key: K, value: V) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParamValue)> {
        self.entries.iter()
    }

    /// Fetch a finite real number.
    ///
    /// # Errors
    /// - [`WaveformError::MissingParameter`] if `key` is absent.
    /// - [`WaveformError::InvalidParameter`] if the value is not numeric or
    ///   not finite.
    pub fn require_f64(&self, key: &str) -> WaveformResult<f64> {
        match self.entries.get(key) {
            None => Err(WaveformError::MissingParameter { key: key.to_string() }),
            Some(value) => numeric(key, value),
        }
    }

    /// Like [`ParamDict::require_f64`] but an absent key yields `Ok(None)`.
    pub fn optional_f64(&self, key: &str) -> WaveformResult<Option<f64>> {
        self.entries.get(key).map(|value| numeric(key, value)).transpose()
    }

    /// Fetch a finite real number that must also be strictly positive.
    pub fn require_positive(&self, key: &str) -> WaveformResult<f64> {
        let value = self.require_f64(key)?;
        if value <= 0.0 {
            return Err(WaveformError::InvalidParameter {
                key: key.to_string(),
                value: value.to_string(),
                reason: "must be > 0",
            });
        }
        Ok(value)
    }

    pub fn optional_text(&self, key: &str) -> Option<&str> {
        match self.entries.get(key) {
            Some(ParamValue::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn optional_bool(&self, key: &str) -> Option<bool> {
        match self.entries.get(key) {
            Some(ParamValue::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn modes(&self, key: &str) -> Option<&[ModeKey]> {
        match self.entries.get(key) {
            Some(ParamValue::Modes(m)) => Some(m.as_slice()),
            _ => None,
        }
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for ParamDict {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut dict = ParamDict::new();
        for (k, v) in iter {
            dict.insert(k, v);
        }
        dict
    }
}

fn numeric(key: &str, value: &ParamValue) -> WaveformResult<f64> {
    let v = value.as_f64().ok_or_else(|| WaveformError::InvalidParameter {
        key: key.to_string(),
        value: value.describe(),
        reason: "expected a number",
    })?;
    if !v.is_finite() {
        return Err(WaveformError::InvalidParameter {
            key: key.to_string(),
            value: v.to_string(),
            reason: "must be finite",
        });
    }
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Typed access and its error mapping.
    // - Integer widening for numeric keys.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Absent keys surface as `MissingParameter`, never as a default.
    //
    // Given
    // -----
    // - An empty dictionary.
    //
    // Expect
    // ------
    // - `require_f64("mass1")` fails with `MissingParameter { key: "mass1" }`.
    // - `optional_f64("mass1")` is `Ok(None)`.
    fn require_f64_reports_missing_key() {
        // Arrange
        let dict = ParamDict::new();

        // Act
        let err = dict.require_f64(keys::MASS1).unwrap_err();
        let opt = dict.optional_f64(keys::MASS1).unwrap();

        // Assert
        assert_eq!(err, WaveformError::MissingParameter { key: "mass1".to_string() });
        assert_eq!(opt, None);
    }

    #[test]
    // Purpose
    // -------
    // Integers widen to reals; text and NaN are rejected.
    //
    // Given
    // -----
    // - distance = 400 (Int), approximant = "SEOBNRv5E", f_lower = NaN.
    //
    // Expect
    // ------
    // - distance reads as 400.0.
    // - approximant and f_lower fail with `InvalidParameter`.
    fn numeric_access_widens_ints_and_rejects_other_kinds() {
        // Arrange
        let dict = ParamDict::new()
            .with(keys::DISTANCE, 400_i64)
            .with(keys::APPROXIMANT, "SEOBNRv5E")
            .with(keys::F_LOWER, f64::NAN);

        // Act / Assert
        assert_eq!(dict.require_f64(keys::DISTANCE).unwrap(), 400.0);
        assert!(matches!(
            dict.require_f64(keys::APPROXIMANT),
            Err(WaveformError::InvalidParameter { .. })
        ));
        assert!(matches!(
            dict.require_f64(keys::F_LOWER),
            Err(WaveformError::InvalidParameter { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // `require_positive` rejects zero.
    //
    // Given
    // -----
    // - delta_t = 0.0.
    //
    // Expect
    // ------
    // - `InvalidParameter` naming "delta_t".
    fn require_positive_rejects_zero() {
        // Arrange
        let dict = ParamDict::new().with(keys::DELTA_T, 0.0);

        // Act
        let err = dict.require_positive(keys::DELTA_T).unwrap_err();

        // Assert
        match err {
            WaveformError::InvalidParameter { key, .. } => assert_eq!(key, "delta_t"),
            other => panic!("expected InvalidParameter, got {other:?}"),
        }
    }
}
