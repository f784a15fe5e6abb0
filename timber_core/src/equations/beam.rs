//! # Simply-Supported Beam Formulas
//!
//! Serviceability formulas for a simply-supported member under a uniform
//! line load over the full span.
//!
//! ## Notation
//!
//! - `L` = Span length (mm)
//! - `q` = Uniform load intensity (N/mm)
//! - `E` = Modulus of elasticity (MPa)
//! - `I` = Second moment of area (mm⁴)
//! - `δ` = Deflection (mm)
//! - `φ` = Creep coefficient
//!
//! ## Sign Conventions
//!
//! - Loads: positive in the positive axis direction, negative for suction
//! - Deflection: carries the sign of the load
//!
//! ## References
//!
//! - Roark's Formulas for Stress and Strain, 8th Edition, Table 8.1
//! - NBR 7190-1:2022, 8.2 (final deflection with creep)

use crate::code_tables::DEFLECTION_LIMIT_DIVISOR;

/// Maximum deflection for uniform load (at midspan)
///
/// ```text
///    ↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓ q
///    ═════════════════
///    △        δ       △
///     ←───────L──────→
/// ```
///
/// # Formula
/// δ_max = 5qL⁴ / (384EI)
///
/// # Example
/// ```rust
/// use timber_core::equations::beam::uniform_load_max_deflection;
///
/// // 1 N/mm over 3 m, E = 7700 MPa, I = 13.72e6 mm⁴
/// let d = uniform_load_max_deflection(1.0, 3000.0, 7700.0, 13.72e6);
/// assert!((d - 9.983).abs() < 0.01);
/// ```
#[inline]
pub fn uniform_load_max_deflection(q: f64, l: f64, e: f64, i: f64) -> f64 {
    5.0 * q * l.powi(4) / (384.0 * e * i)
}

/// Final deflection including creep
///
/// # Formula
/// δ_fin = δ_inst × (1 + φ)
#[inline]
pub fn final_deflection(instantaneous: f64, creep_coefficient: f64) -> f64 {
    instantaneous * (1.0 + creep_coefficient)
}

/// Deflection limit L / 250
#[inline]
pub fn deflection_limit(l: f64) -> f64 {
    l / DEFLECTION_LIMIT_DIVISOR
}
