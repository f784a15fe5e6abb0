//! # Member Stability Formulas (NBR 7190-1 6.5)
//!
//! Slenderness, buckling reduction and minimum eccentricity for members in
//! compression.
//!
//! ```text
//! L0    = Ke × L
//! λ     = L0 / i
//! λ_rel = (λ / π) × √(f_c0k / E_0,05)
//! k     = 0.5 × (1 + β_c (λ_rel - 0.3) + λ_rel²)
//! k_c   = 1 / (k + √(k² - λ_rel²))          (k_c = 1 when λ_rel ≤ 0.3)
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::code_tables::RELATIVE_SLENDERNESS_THRESHOLD;

/// Slenderness ratio λ = Ke × L / i
#[inline]
pub fn slenderness(ke: f64, length_mm: f64, radius_of_gyration_mm: f64) -> f64 {
    ke * length_mm / radius_of_gyration_mm
}

/// Relative slenderness λ_rel = (λ / π) × √(f_c0k / E_0,05)
#[inline]
pub fn relative_slenderness(lambda: f64, f_c0k: f64, e_0_05: f64) -> f64 {
    (lambda / PI) * (f_c0k / e_0_05).sqrt()
}

/// Buckling reduction factor k_c, in (0, 1]
///
/// # Example
/// ```rust
/// use timber_core::equations::stability::buckling_factor;
///
/// assert_eq!(buckling_factor(0.25, 0.2), 1.0);
/// let kc = buckling_factor(1.0, 0.2);
/// assert!((kc - 0.6893).abs() < 1e-3);
/// ```
pub fn buckling_factor(lambda_rel: f64, beta_c: f64) -> f64 {
    if lambda_rel <= RELATIVE_SLENDERNESS_THRESHOLD {
        return 1.0;
    }
    let k = 0.5 * (1.0 + beta_c * (lambda_rel - RELATIVE_SLENDERNESS_THRESHOLD) + lambda_rel.powi(2));
    let radicand = (k * k - lambda_rel * lambda_rel).max(0.0);
    (1.0 / (k + radicand.sqrt())).min(1.0)
}

/// Minimum eccentricity moment N × e_min, with e_min = L / divisor
#[inline]
pub fn min_eccentricity_moment(axial_n: f64, length_mm: f64, divisor: f64) -> f64 {
    axial_n * length_mm / divisor
}

/// Slenderness quantities about one axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisSlenderness {
    /// Buckling length L0 = Ke × L (mm)
    pub buckling_length_mm: f64,
    /// λ
    pub lambda: f64,
    /// λ_rel
    pub lambda_rel: f64,
    /// k_c
    pub kc: f64,
}

impl AxisSlenderness {
    /// Evaluate λ, λ_rel and k_c about an axis with radius of gyration `r_mm`.
    pub fn evaluate(ke: f64, length_mm: f64, r_mm: f64, f_c0k: f64, e_0_05: f64, beta_c: f64) -> Self {
        let lambda = slenderness(ke, length_mm, r_mm);
        let lambda_rel = relative_slenderness(lambda, f_c0k, e_0_05);
        AxisSlenderness {
            buckling_length_mm: ke * length_mm,
            lambda,
            lambda_rel,
            kc: buckling_factor(lambda_rel, beta_c),
        }
    }

    /// Second-order amplification 1 / k_c applied to the axial term
    pub fn amplification(&self) -> f64 {
        1.0 / self.kc
    }
}
