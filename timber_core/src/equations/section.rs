//! # Cross-Section Property Formulas
//!
//! Geometric properties of a solid rectangular timber section.
//!
//! ## Notation
//!
//! - `b` = Width of section (mm), parallel to the y axis
//! - `h` = Height of section (mm), parallel to the x-axis bending plane
//! - `A` = Cross-sectional area (mm²)
//! - `I` = Second moment of area (mm⁴)
//! - `W` = Elastic section modulus I/c (mm³)
//! - `i` = Radius of gyration √(I/A) (mm)
//!
//! ```text
//!          y
//!          ↑
//!     ┌─────────┐
//!     │    │    │
//!   h │ ───┼────│──→ x      M_x bends about x (strong axis when h > b)
//!     │    │    │
//!     └─────────┘
//!          b
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

// =============================================================================
// RECTANGULAR SECTION FORMULAS
// =============================================================================

/// Cross-sectional area A = b × h
///
/// # Example
/// ```rust
/// use timber_core::equations::section::rectangular_area;
///
/// assert_eq!(rectangular_area(60.0, 140.0), 8400.0);
/// ```
#[inline]
pub fn rectangular_area(b: f64, h: f64) -> f64 {
    b * h
}

/// Second moment of area about the axis parallel to `b`
///
/// # Formula
/// I = b × h³ / 12
///
/// Swap the arguments for the other axis: I_y = h × b³ / 12.
///
/// # Example
/// ```rust
/// use timber_core::equations::section::rectangular_moment_of_inertia;
///
/// let i_x = rectangular_moment_of_inertia(60.0, 140.0);
/// assert!((i_x - 13_720_000.0).abs() < 1e-6);
/// ```
#[inline]
pub fn rectangular_moment_of_inertia(b: f64, h: f64) -> f64 {
    b * h.powi(3) / 12.0
}

/// Elastic section modulus W = I / (h/2) = b × h² / 6
///
/// # Example
/// ```rust
/// use timber_core::equations::section::rectangular_section_modulus;
///
/// let w_x = rectangular_section_modulus(60.0, 140.0);
/// assert!((w_x - 196_000.0).abs() < 1e-6);
/// ```
#[inline]
pub fn rectangular_section_modulus(b: f64, h: f64) -> f64 {
    rectangular_moment_of_inertia(b, h) / (h / 2.0)
}

/// Radius of gyration i = √(I/A) = h / √12
#[inline]
pub fn rectangular_radius_of_gyration(h: f64) -> f64 {
    h / (12.0_f64).sqrt()
}

/// Effective shear area 2A/3
///
/// The peak shear stress of a rectangle is 1.5 × V/A, so V_Rd = f_vd × 2A/3.
#[inline]
pub fn rectangular_shear_area(b: f64, h: f64) -> f64 {
    2.0 * b * h / 3.0
}

// =============================================================================
// GEOMETRIC PROPERTIES
// =============================================================================

/// All section properties needed by the checks.
///
/// ## JSON Example
///
/// ```json
/// {
///   "width_mm": 60.0,
///   "height_mm": 140.0,
///   "area_mm2": 8400.0,
///   "i_x_mm4": 13720000.0,
///   "i_y_mm4": 2520000.0,
///   "w_x_mm3": 196000.0,
///   "w_y_mm3": 84000.0,
///   "r_x_mm": 40.41,
///   "r_y_mm": 17.32
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometricProperties {
    /// Width b (mm)
    pub width_mm: f64,
    /// Height h (mm)
    pub height_mm: f64,
    /// Area A (mm²)
    pub area_mm2: f64,
    /// I_x = b h³ / 12 (mm⁴)
    pub i_x_mm4: f64,
    /// I_y = h b³ / 12 (mm⁴)
    pub i_y_mm4: f64,
    /// W_x = I_x / (h/2) (mm³)
    pub w_x_mm3: f64,
    /// W_y = I_y / (b/2) (mm³)
    pub w_y_mm3: f64,
    /// i_x = √(I_x / A) (mm)
    pub r_x_mm: f64,
    /// i_y = √(I_y / A) (mm)
    pub r_y_mm: f64,
}

impl GeometricProperties {
    /// Compute properties of a b × h rectangle.
    ///
    /// Fails with `InvalidGeometry` unless both dimensions are finite and positive.
    pub fn from_dimensions(width_mm: f64, height_mm: f64) -> CalcResult<Self> {
        if !width_mm.is_finite() || !height_mm.is_finite() {
            return Err(CalcError::invalid_geometry(width_mm, height_mm, "dimensions must be finite"));
        }
        if width_mm <= 0.0 || height_mm <= 0.0 {
            return Err(CalcError::invalid_geometry(width_mm, height_mm, "dimensions must be positive"));
        }

        let area = rectangular_area(width_mm, height_mm);
        let i_x = rectangular_moment_of_inertia(width_mm, height_mm);
        let i_y = rectangular_moment_of_inertia(height_mm, width_mm);

        Ok(GeometricProperties {
            width_mm,
            height_mm,
            area_mm2: area,
            i_x_mm4: i_x,
            i_y_mm4: i_y,
            w_x_mm3: rectangular_section_modulus(width_mm, height_mm),
            w_y_mm3: rectangular_section_modulus(height_mm, width_mm),
            r_x_mm: rectangular_radius_of_gyration(height_mm),
            r_y_mm: rectangular_radius_of_gyration(width_mm),
        })
    }

    /// Smaller side min(b, h)
    pub fn min_thickness_mm(&self) -> f64 {
        self.width_mm.min(self.height_mm)
    }

    /// Aspect ratio h / b
    pub fn aspect_ratio(&self) -> f64 {
        self.height_mm / self.width_mm
    }

    /// Effective shear area 2A/3
    pub fn shear_area_mm2(&self) -> f64 {
        rectangular_shear_area(self.width_mm, self.height_mm)
    }
}

/// Shorthand for [`GeometricProperties::from_dimensions`]
pub fn properties(width_mm: f64, height_mm: f64) -> CalcResult<GeometricProperties> {
    GeometricProperties::from_dimensions(width_mm, height_mm)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6 || (a - b).abs() / b.abs().max(1.0) < 1e-9
    }

    #[test]
    fn test_60x140_section() {
        let g = properties(60.0, 140.0).unwrap();
        assert!(approx_eq(g.area_mm2, 8400.0));
        assert!(approx_eq(g.i_x_mm4, 13_720_000.0), "I_x = {}", g.i_x_mm4);
        assert!(approx_eq(g.i_y_mm4, 2_520_000.0), "I_y = {}", g.i_y_mm4);
        assert!(approx_eq(g.w_x_mm3, 196_000.0), "W_x = {}", g.w_x_mm3);
        assert!(approx_eq(g.w_y_mm3, 84_000.0), "W_y = {}", g.w_y_mm3);
    }

    #[test]
    fn test_radius_of_gyration_matches_closed_form() {
        let g = properties(60.0, 140.0).unwrap();
        assert!(approx_eq(g.r_x_mm, (g.i_x_mm4 / g.area_mm2).sqrt()));
        assert!(approx_eq(g.r_y_mm, (g.i_y_mm4 / g.area_mm2).sqrt()));
        assert!(approx_eq(g.r_y_mm, 60.0 / 12f64.sqrt()));
    }

    #[test]
    fn test_derived_accessors() {
        let g = properties(60.0, 140.0).unwrap();
        assert_eq!(g.min_thickness_mm(), 60.0);
        assert!(approx_eq(g.aspect_ratio(), 140.0 / 60.0));
        assert!(approx_eq(g.shear_area_mm2(), 5600.0));
    }

    #[test]
    fn test_rejects_degenerate_dimensions() {
        for (b, h) in [(0.0, 100.0), (50.0, -10.0), (f64::NAN, 100.0), (50.0, f64::INFINITY)] {
            let err = properties(b, h).unwrap_err();
            assert_eq!(err.error_code(), "INVALID_GEOMETRY");
        }
    }

    #[test]
    fn test_serialization() {
        let g = properties(75.0, 150.0).unwrap();
        let json = serde_json::to_string(&g).unwrap();
        assert!(json.contains("\"w_x_mm3\""));
        let roundtrip: GeometricProperties = serde_json::from_str(&json).unwrap();
        assert!(approx_eq(roundtrip.w_x_mm3, g.w_x_mm3));
        assert!(approx_eq(roundtrip.r_y_mm, g.r_y_mm));
    }
}
