//! Spin-weighted spherical harmonics `ₛY_ℓm(θ, φ)`.
//!
//! Uses Goldberg's closed form, which matches the LAL convention for the
//! spin weight `s = −2` used in gravitational-wave mode decompositions:
//!
//! ```text
//! ₛY_ℓm = (−1)^m √[(ℓ+m)!(ℓ−m)!(2ℓ+1) / (4π(ℓ+s)!(ℓ−s)!)] e^{imφ}
//!         Σ_r C(ℓ−s, r) C(ℓ+s, r+s−m) (−1)^{ℓ−r−s}
//!             sin^{2ℓ−2r−s+m}(θ/2) cos^{2r+s−m}(θ/2)
//! ```
//!
//! The `sin^{2ℓ} cot^{k}` product of the textbook form is expanded into
//! non-negative powers of `sin(θ/2)` and `cos(θ/2)` so the poles θ = 0 and
//! θ = π evaluate without division by zero. The factorial ratio under the
//! root is formed from log-factorials, so it stays finite for ℓ + m > 170.
use crate::waveform::core::modes::ModeKey;
use num_complex::Complex64;
use statrs::function::factorial::{binomial, ln_factorial};
use std::f64::consts::PI;

/// Spin weight of the gravitational-wave strain `h = h₊ − i h×`.
pub const STRAIN_SPIN_WEIGHT: i32 = -2;

/// Evaluate `ₛY_ℓm(θ, φ)`.
///
/// Returns zero when `|s| > ℓ` or `|m| > ℓ`, where the harmonic is not
/// defined.
pub fn spin_weighted_ylm(s: i32, l: i32, m: i32, theta: f64, phi: f64) -> Complex64 {
    if l < s.abs() || l < m.abs() {
        return Complex64::new(0.0, 0.0);
    }
    let half = 0.5 * theta;
    let (sin_half, cos_half) = half.sin_cos();

    let ln_ratio = ln_factorial((l + m) as u64) + ln_factorial((l - m) as u64)
        - ln_factorial((l + s) as u64)
        - ln_factorial((l - s) as u64);
    let norm = ((2 * l + 1) as f64 / (4.0 * PI)).sqrt() * (0.5 * ln_ratio).exp();
    let sign_m = if m % 2 == 0 { 1.0 } else { -1.0 };

    let r_min = 0.max(m - s);
    let r_max = (l - s).min(l + m);
    let mut sum = 0.0;
    for r in r_min..=r_max {
        let cos_pow = 2 * r + s - m;
        let sin_pow = 2 * l - 2 * r - s + m;
        let sign = if (l - r - s).rem_euclid(2) == 0 { 1.0 } else { -1.0 };
        sum += sign
            * binomial((l - s) as u64, r as u64)
            * binomial((l + s) as u64, (r + s - m) as u64)
            * sin_half.powi(sin_pow)
            * cos_half.powi(cos_pow);
    }

    Complex64::from_polar(sign_m * norm * sum, m as f64 * phi)
}

/// `₋₂Y_ℓm(θ, φ)` for a validated mode key.
pub fn strain_harmonic(key: &ModeKey, theta: f64, phi: f64) -> Complex64 {
    spin_weighted_ylm(STRAIN_SPIN_WEIGHT, key.l(), key.m(), theta, phi)
}
