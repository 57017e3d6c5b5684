//! Generation options — explicit, immutable configuration for one generator.
//!
//! Purpose
//! -------
//! Collect every knob that changes what the pipeline asks the model for or
//! how it shapes the result: output domain, mode content, Nyquist check,
//! post-adiabatic toggle, eccentricity defaulting, tapering, and logging.
//! A configuration value is passed into the generator once and never mutated;
//! there is no module-level default state.
//!
//! Key behaviors
//! -------------
//! - [`GenerationConfig::default`] reproduces the plugin's historical
//!   settings: time domain, (2,2) only, Nyquist check up to ℓ = 1,
//!   post-adiabatic off, eccentricity required, taper on.
//! - [`GenerationConfig::requested_modes`] resolves the mode selection and
//!   odd-m filter into the `ModeArray` sent to the model.
//! - [`GenerationConfig::validate`] rejects mode lists the translator could
//!   not honour.
//!
//! Conventions
//! -----------
//! - Mode lists name m ≥ 0 modes only; negative-m companions are always
//!   reconstructed from symmetry, never requested.
//!
//! Testing notes
//! -------------
//! - Unit tests cover defaults, odd-mode filtering, and validation of
//!   user-supplied mode lists.
use crate::waveform::{
    core::modes::{DOMINANT_MODE, ModeKey},
    errors::{WaveformError, WaveformResult},
};

/// Name of the model requested from the evaluator.
pub const APPROXIMANT: &str = "SEOBNRv5EHM";

/// Initial step of the EOB ODE integration, in units of M.
pub const INITIAL_STEP: f64 = 1.0;

/// Output domain of a generation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    Time,
    Frequency,
}

/// Which (ℓ, m ≥ 0) modes are requested from the model.
#[derive(Debug, Clone, PartialEq)]
pub enum ModeSelection {
    /// Only the dominant (2,2) mode.
    Dominant,
    /// An explicit list of modes.
    HigherModes(Vec<ModeKey>),
}

impl ModeSelection {
    /// The full SEOBNRv5EHM mode content:
    /// (2,2), (2,1), (3,3), (3,2), (4,4), (4,3).
    pub fn all_model_modes() -> ModeSelection {
        let pairs = [(2, 2), (2, 1), (3, 3), (3, 2), (4, 4), (4, 3)];
        ModeSelection::HigherModes(pairs.iter().map(|&(l, m)| ModeKey::known(l, m)).collect())
    }
}

/// How absent eccentricity / relativistic-anomaly keys are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EccentricityPolicy {
    /// Both keys must be supplied; absence is a `MissingParameter` error.
    Required,
    /// Absent keys are filled with 0 (quasi-circular) and the substitution is
    /// logged.
    ZeroIfAbsent,
}

/// GenerationConfig — immutable options for a waveform generator.
///
/// Fields
/// ------
/// - `domain`: output domain used by `WaveformGenerator::generate`.
/// - `mode_selection`: modes requested from the model.
/// - `include_odd_modes`: when `false`, odd-m modes are dropped from the
///   request and from whatever the model returns.
/// - `lmax_nyquist`: `Some(ℓ)` asks the model to check modes up to ℓ against
///   the Nyquist frequency of `delta_t`; `None` disables the check.
/// - `postadiabatic`: enable the model's post-adiabatic inspiral.
/// - `eccentricity_policy`: see [`EccentricityPolicy`].
/// - `taper`: apply the start taper before the frequency-domain transform.
/// - `verbose`: emit per-stage log records (with the `obs_slog` feature).
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    pub domain: Domain,
    pub mode_selection: ModeSelection,
    pub include_odd_modes: bool,
    pub lmax_nyquist: Option<u32>,
    pub postadiabatic: bool,
    pub eccentricity_policy: EccentricityPolicy,
    pub taper: bool,
    pub verbose: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationConfig {
            domain: Domain::Time,
            mode_selection: ModeSelection::Dominant,
            include_odd_modes: true,
            lmax_nyquist: Some(1),
            postadiabatic: false,
            eccentricity_policy: EccentricityPolicy::Required,
            taper: true,
            verbose: false,
        }
    }
}

impl GenerationConfig {
    /// Default options for the given domain and mode content.
    pub fn new(domain: Domain, mode_selection: ModeSelection) -> Self {
        GenerationConfig { domain, mode_selection, ..GenerationConfig::default() }
    }

    /// Modes to request from the model after applying the odd-m filter.
    pub fn requested_modes(&self) -> Vec<ModeKey> {
        let modes = match &self.mode_selection {
            ModeSelection::Dominant => vec![DOMINANT_MODE],
            ModeSelection::HigherModes(list) => list.clone(),
        };
        modes.into_iter().filter(|key| self.keeps(key)).collect()
    }

    /// Whether a returned mode survives the selection. Negative-m modes are
    /// judged by their positive companion.
    pub fn keeps(&self, key: &ModeKey) -> bool {
        if !self.include_odd_modes && key.is_odd_m() {
            return false;
        }
        match &self.mode_selection {
            ModeSelection::Dominant => *key == DOMINANT_MODE || *key == DOMINANT_MODE.mirrored(),
            ModeSelection::HigherModes(list) => {
                let positive = if key.m() < 0 { key.mirrored() } else { *key };
                list.contains(&positive)
            }
        }
    }

    /// Check that the selection is usable.
    ///
    /// # Errors
    /// - [`WaveformError::InvalidParameter`] if an explicit list names a mode
    ///   with m < 0.
    /// - [`WaveformError::EmptyModeSet`] if nothing is left to request.
    pub fn validate(&self) -> WaveformResult<()> {
        if let ModeSelection::HigherModes(list) = &self.mode_selection {
            if let Some(bad) = list.iter().find(|key| key.m() < 0) {
                return Err(WaveformError::InvalidParameter {
                    key: "mode_selection".to_string(),
                    value: bad.to_string(),
                    reason: "requested modes must have m >= 0",
                });
            }
        }
        if self.requested_modes().is_empty() {
            return Err(WaveformError::EmptyModeSet);
        }
        Ok(())
    }
}
