//! # Structural Equations
//!
//! Pure formulas used by the checks, kept in one place so each can be
//! compared line by line against NBR 7190-1:2022.
//!
//! ## Modules
//!
//! - [`section`] - Rectangular section properties (A, I, W, i)
//! - [`stability`] - Slenderness, k_c and minimum eccentricity
//! - [`beam`] - Simply-supported deflection under uniform load
//!
//! ## Units
//!
//! Lengths in mm, forces in N, stresses and moduli in MPa (N/mm²).

pub mod beam;
pub mod section;
pub mod stability;

pub use beam::{deflection_limit, final_deflection, uniform_load_max_deflection};
pub use section::GeometricProperties;
pub use stability::{buckling_factor, relative_slenderness, slenderness, AxisSlenderness};
