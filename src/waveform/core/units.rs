//! Physical constants and geometric ↔ SI unit conversion.
//!
//! EOB models work in geometric units where times are measured in multiples
//! of the total mass `M` (G = c = 1) and strain is distance-independent.
//! [`PhysicalScale`] carries the two numbers needed to leave that system:
//! total mass in solar masses and luminosity distance in megaparsecs.
//!
//! All three conversions are linear:
//! - time: `t_SI = t_geo · M · MTSUN_SI`
//! - amplitude: `h_SI = h_geo · (C_SI · M · MTSUN_SI) / D_m`
//! - frequency: `ω_geo = π · f_Hz · MTSUN_SI · M`
//!
//! Constants match the LAL reference values to the last printed digit; waveform
//! comparisons against reference data are sensitive at the 9th significant
//! figure.
use crate::waveform::errors::{WaveformError, WaveformResult};
use ndarray::Array1;
use std::f64::consts::PI;

/// Speed of light in vacuum, m s⁻¹ (exact).
pub const C_SI: f64 = 299_792_458.0;

/// Geometrized solar mass in seconds, `G M☉ / c³`.
pub const MTSUN_SI: f64 = 4.925_490_947_641_267e-6;

/// Geometrized solar mass in metres, `G M☉ / c²`.
pub const MRSUN_SI: f64 = 1.476_625_038_050_125e3;

/// One parsec in metres.
pub const PC_SI: f64 = 3.085_677_581_491_367e16;

/// One megaparsec in metres.
pub const MPC_SI: f64 = 1.0e6 * PC_SI;

/// Total mass and distance used to convert geometric-unit waveforms to SI.
///
/// Invariants
/// ----------
/// - `total_mass > 0` and finite (solar masses).
/// - `distance_mpc > 0` and finite (megaparsecs).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalScale {
    total_mass: f64,
    distance_mpc: f64,
}

impl PhysicalScale {
    /// Build a validated scale.
    ///
    /// # Errors
    /// - [`WaveformError::InvalidParameter`] if either value is non-finite or
    ///   not strictly positive.
    pub fn new(total_mass: f64, distance_mpc: f64) -> WaveformResult<Self> {
        if !total_mass.is_finite() || total_mass <= 0.0 {
            return Err(WaveformError::InvalidParameter {
                key: "total_mass".to_string(),
                value: total_mass.to_string(),
                reason: "total mass must be finite and > 0",
            });
        }
        if !distance_mpc.is_finite() || distance_mpc <= 0.0 {
            return Err(WaveformError::InvalidParameter {
                key: "distance".to_string(),
                value: distance_mpc.to_string(),
                reason: "distance must be finite and > 0",
            });
        }
        Ok(PhysicalScale { total_mass, distance_mpc })
    }

    pub fn total_mass(&self) -> f64 {
        self.total_mass
    }

    pub fn distance_mpc(&self) -> f64 {
        self.distance_mpc
    }

    pub fn distance_m(&self) -> f64 {
        self.distance_mpc * MPC_SI
    }

    /// Seconds per geometric time unit, `M · MTSUN_SI`.
    pub fn time_unit(&self) -> f64 {
        self.total_mass * MTSUN_SI
    }

    /// Strain per geometric amplitude unit, `C_SI · M · MTSUN_SI / D_m`.
    pub fn amplitude_unit(&self) -> f64 {
        C_SI * self.time_unit() / self.distance_m()
    }

    pub fn time_to_si(&self, t_geo: f64) -> f64 {
        t_geo * self.time_unit()
    }

    pub fn time_to_geometric(&self, t_si: f64) -> f64 {
        t_si / self.time_unit()
    }

    pub fn amplitude_to_si(&self, h_geo: f64) -> f64 {
        h_geo * self.amplitude_unit()
    }

    pub fn amplitude_to_geometric(&self, h_si: f64) -> f64 {
        h_si / self.amplitude_unit()
    }

    /// Convert a gravitational-wave frequency in Hz to the geometric orbital
    /// angular frequency `ω = π f M MTSUN_SI`.
    pub fn frequency_to_geometric(&self, f_hz: f64) -> f64 {
        geometric_angular_frequency(f_hz, self.total_mass)
    }

    pub fn frequency_to_si(&self, omega_geo: f64) -> f64 {
        omega_geo / (PI * self.time_unit())
    }

    /// Scale a real geometric-unit strain array into SI strain in place.
    pub fn scale_strain(&self, data: &mut Array1<f64>) {
        let unit = self.amplitude_unit();
        data.mapv_inplace(|h| h * unit);
    }

    /// Convert a geometric time grid into seconds.
    pub fn times_to_si(&self, times: &Array1<f64>) -> Array1<f64> {
        let unit = self.time_unit();
        times.mapv(|t| t * unit)
    }
}

/// `ω = π f MTSUN_SI M` without building a full [`PhysicalScale`]; used by the
/// translator where no distance is involved.
pub fn geometric_angular_frequency(f_hz: f64, total_mass: f64) -> f64 {
    PI * f_hz * MTSUN_SI * total_mass
}
