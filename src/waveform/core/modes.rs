//! Spherical-harmonic mode keys and mode sets.
//!
//! Purpose
//! -------
//! Replace string-keyed mode dictionaries (`"2,2"`) with a validated
//! [`ModeKey`] and a [`ModeSet`] whose sequences are guaranteed to share one
//! sample grid. Also hosts the aligned-spin negative-m reconstruction.
//!
//! Key behaviors
//! -------------
//! - [`ModeKey::new`] enforces `ℓ ≥ 2`, `|m| ≤ ℓ`; `FromStr` accepts `"2,2"`,
//!   `"2, -1"` and `"(3,3)"`.
//! - [`ModeSet::new`] / [`ModeSet::insert`] enforce non-emptiness and equal
//!   sequence lengths.
//! - [`reconstruct_negative_modes`] fills `(ℓ, −m)` from `(ℓ, m)` using
//!   `h_{ℓ,−m} = (−1)^ℓ · conj(h_{ℓm})`.
//!
//! Invariants & assumptions
//! ------------------------
//! - The negative-m symmetry holds only for aligned spins (no in-plane spin
//!   components). Callers validate that precondition before reconstruction;
//!   see `validation::validate_aligned_spin`.
//! - Existing `(ℓ, −m)` entries are overwritten so the symmetry holds
//!   exactly after reconstruction.
//!
//! Testing notes
//! -------------
//! - Unit tests cover key parsing (valid and malformed), grid validation,
//!   and the sample-wise symmetry after reconstruction for even and odd ℓ.
use crate::waveform::errors::{WaveformError, WaveformResult};
use ndarray::Array1;
use num_complex::Complex64;
use std::{collections::BTreeMap, fmt, str::FromStr};

/// Smallest radiative multipole.
pub const L_MIN: i32 = 2;

/// The dominant quadrupole mode.
pub const DOMINANT_MODE: ModeKey = ModeKey::known(2, 2);

/// `(ℓ, m)` index of a spin-weight −2 spherical-harmonic mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModeKey {
    l: i32,
    m: i32,
}

impl ModeKey {
    /// Validate and build a mode key.
    ///
    /// # Errors
    /// - [`WaveformError::MalformedModeKey`] if `l < 2` or `|m| > l`.
    pub fn new(l: i32, m: i32) -> WaveformResult<Self> {
        if l < L_MIN {
            return Err(WaveformError::MalformedModeKey {
                key: format!("{l},{m}"),
                reason: "l must be >= 2",
            });
        }
        if m.abs() > l {
            return Err(WaveformError::MalformedModeKey {
                key: format!("{l},{m}"),
                reason: "|m| must not exceed l",
            });
        }
        Ok(ModeKey { l, m })
    }

    /// Key for literal, known-valid indices.
    pub(crate) const fn known(l: i32, m: i32) -> Self {
        ModeKey { l, m }
    }

    pub fn l(&self) -> i32 {
        self.l
    }

    pub fn m(&self) -> i32 {
        self.m
    }

    /// The `(ℓ, −m)` companion.
    pub fn mirrored(&self) -> ModeKey {
        ModeKey { l: self.l, m: -self.m }
    }

    pub fn is_odd_m(&self) -> bool {
        self.m % 2 != 0
    }
}

impl fmt::Display for ModeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.l, self.m)
    }
}

impl FromStr for ModeKey {
    type Err = WaveformError;

    /// Parse `"l,m"`, optionally wrapped in parentheses and with whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = |reason| WaveformError::MalformedModeKey { key: s.to_string(), reason };
        let inner = s.trim();
        let inner = inner
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .unwrap_or(inner);
        let mut parts = inner.split(',');
        let (Some(l_str), Some(m_str), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(malformed("expected two comma-separated integers"));
        };
        let l = l_str.trim().parse::<i32>().map_err(|_| malformed("l is not an integer"))?;
        let m = m_str.trim().parse::<i32>().map_err(|_| malformed("m is not an integer"))?;
        ModeKey::new(l, m)
    }
}

/// `ModeSet` — complex mode sequences on a shared sample grid.
///
/// Purpose
/// -------
/// Hold the per-mode complex strain `h_ℓm[i]` produced by the model evaluator
/// (geometric units) and extended with its negative-m companions before
/// projection.
///
/// Invariants
/// ----------
/// - At least one mode.
/// - Every sequence has exactly `len()` samples.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeSet {
    modes: BTreeMap<ModeKey, Array1<Complex64>>,
    len: usize,
}

impl ModeSet {
    /// Build a validated mode set.
    ///
    /// # Errors
    /// - [`WaveformError::EmptyModeSet`] if `modes` is empty.
    /// - [`WaveformError::InconsistentModeGrid`] if any sequence length differs
    ///   from the first one (in key order).
    pub fn new(modes: BTreeMap<ModeKey, Array1<Complex64>>) -> WaveformResult<Self> {
        let len = match modes.values().next() {
            Some(first) => first.len(),
            None => return Err(WaveformError::EmptyModeSet),
        };
        for (key, data) in &modes {
            if data.len() != len {
                return Err(WaveformError::InconsistentModeGrid {
                    mode: key.to_string(),
                    expected: len,
                    actual: data.len(),
                });
            }
        }
        Ok(ModeSet { modes, len })
    }

    /// Build from string-keyed sequences as delivered by a dynamic evaluator.
    ///
    /// # Errors
    /// - [`WaveformError::MalformedModeKey`] for the first unparseable key.
    /// - Anything [`ModeSet::new`] reports.
    pub fn from_labelled<I, S>(labelled: I) -> WaveformResult<Self>
    where
        I: IntoIterator<Item = (S, Array1<Complex64>)>,
        S: AsRef<str>,
    {
        let mut modes = BTreeMap::new();
        for (label, data) in labelled {
            let key = label.as_ref().parse::<ModeKey>()?;
            modes.insert(key, data);
        }
        ModeSet::new(modes)
    }

    /// Insert or replace a mode, keeping the grid invariant.
    pub fn insert(&mut self, key: ModeKey, data: Array1<Complex64>) -> WaveformResult<()> {
        if data.len() != self.len {
            return Err(WaveformError::InconsistentModeGrid {
                mode: key.to_string(),
                expected: self.len,
                actual: data.len(),
            });
        }
        self.modes.insert(key, data);
        Ok(())
    }

    /// Number of samples per mode.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false` for a constructed set; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    pub fn n_modes(&self) -> usize {
        self.modes.len()
    }

    pub fn get(&self, key: &ModeKey) -> Option<&Array1<Complex64>> {
        self.modes.get(key)
    }

    pub fn contains(&self, key: &ModeKey) -> bool {
        self.modes.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &ModeKey> {
        self.modes.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ModeKey, &Array1<Complex64>)> {
        self.modes.iter()
    }

    /// Keep only the modes for which `keep` returns `true`.
    ///
    /// # Errors
    /// - [`WaveformError::EmptyModeSet`] if nothing survives.
    pub fn retain<F: FnMut(&ModeKey) -> bool>(&mut self, mut keep: F) -> WaveformResult<()> {
        self.modes.retain(|key, _| keep(key));
        if self.modes.is_empty() {
            return Err(WaveformError::EmptyModeSet);
        }
        Ok(())
    }
}

/// Extend `modes` in place with `(ℓ, −m)` for every `(ℓ, m)` with `m > 0`.
///
/// Applies `h_{ℓ,−m}[i] = (−1)^ℓ · conj(h_{ℓm}[i])` sample by sample. `m = 0`
/// modes are left untouched.
///
/// Notes
/// -----
/// - Valid only for aligned-spin binaries; the generator checks the spin
///   configuration before calling this.
pub fn reconstruct_negative_modes(modes: &mut ModeSet) {
    let positive: Vec<ModeKey> = modes.keys().filter(|key| key.m() > 0).copied().collect();
    for key in positive {
        let sign = if key.l() % 2 == 0 { 1.0 } else { -1.0 };
        let mirrored = match modes.get(&key) {
            Some(data) => data.mapv(|h| h.conj() * sign),
            None => continue,
        };
        // Lengths are equal by construction, so insertion cannot fail.
        modes.modes.insert(key.mirrored(), mirrored);
    }
}
